// ==========================================
// 集装箱堆场排位系统 - 分区偏好策略
// ==========================================
// 职责: 船舶偏好分区 → 有序候选分区列表
// 红线: 纯函数, 对每个分区全定义, 同输入必同输出
// ==========================================

use crate::domain::types::Zone;

/// 默认偏好序, 供无法识别的分区输入回退使用
pub const DEFAULT_ZONE_ORDER: [Zone; 3] = [Zone::A, Zone::B, Zone::C];

// ==========================================
// ZonePreference - 分区偏好策略
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ZonePreference;

impl ZonePreference {
    pub fn new() -> Self {
        Self
    }

    /// 按偏好降序给出候选分区
    ///
    /// 首选自身分区, 其后按就近原则排列
    pub fn zone_order(&self, preferred: Zone) -> &'static [Zone; 3] {
        match preferred {
            Zone::A => &[Zone::A, Zone::B, Zone::C],
            Zone::B => &[Zone::B, Zone::A, Zone::C],
            Zone::C => &[Zone::C, Zone::B, Zone::A],
        }
    }
}
