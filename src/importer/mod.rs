// ==========================================
// 集装箱堆场排位系统 - 导入层
// ==========================================
// 职责: 外部文件 → 校验通过的领域对象
// 红线: 导入失败必须发生在模拟开始前, 不留半成品状态
// ==========================================

pub mod error;
pub mod vessel_importer;
pub mod yard_importer;

pub use error::{ImportError, ImportResult};
pub use vessel_importer::VesselImporter;
pub use yard_importer::YardImporter;
