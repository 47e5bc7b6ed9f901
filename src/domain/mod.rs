// ==========================================
// 集装箱堆场排位系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、容量约束接口
// 红线: 不含分配逻辑,不含时间轴推进逻辑
// ==========================================

pub mod snapshot;
pub mod types;
pub mod vessel;
pub mod yard;

// 重导出核心类型
pub use snapshot::{BlockOccupancy, YardSnapshot};
pub use types::{BlockId, ClusterId, VesselPhase, YardEventKind, Zone};
pub use vessel::{Cluster, ClusterReport, VesselMaster, VesselState};
pub use yard::{BlockCapacity, Yard, YardBlock};
