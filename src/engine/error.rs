// ==========================================
// 集装箱堆场排位系统 - 引擎层错误类型
// ==========================================
// 依据: 输入校验错误在模拟开始前拒绝, 全有或全无;
//       运行期的容量缺口一律走余量返回, 不走 Err
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 引擎层错误类型（仅运行前校验）
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("船舶 {vessel} 总箱量非法: {total_boxes}（必须 > 0）")]
    InvalidTotalBoxes { vessel: String, total_boxes: u32 },

    #[error("船舶 {vessel} 申报箱组数非法: {count}（必须 > 0）")]
    InvalidClusterCount { vessel: String, count: u32 },

    #[error("船名为空")]
    EmptyVesselName,

    #[error("船名重复: {0}")]
    DuplicateVesselName(String),

    #[error("堆场为空, 无可用箱区")]
    EmptyYard,

    #[error("模拟窗口非法: 开始日 {start} 晚于结束日 {end}")]
    InvalidDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("无船舶记录, 且未显式给出模拟窗口")]
    NoVessels,
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
