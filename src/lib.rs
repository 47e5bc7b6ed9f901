// ==========================================
// 集装箱堆场排位系统 - 核心库
// ==========================================
// 系统定位: 船期驱动的堆场分配引擎 (展示层外置)
// 核心约束: 贪心启发式 + 单线程逐日推进, 结果可复现
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 分配规则与时间轴
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 运行参数
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{BlockId, ClusterId, VesselPhase, YardEventKind, Zone};

// 领域实体
pub use domain::{
    BlockCapacity, BlockOccupancy, Cluster, ClusterReport, VesselMaster, VesselState, Yard,
    YardBlock, YardSnapshot,
};

// 引擎
pub use engine::{
    ClashTracker, ClusterSplitter, EngineError, RunSummary, SimulationResult, SimulationState,
    TimelineOrchestrator, YardAllocator, YardDeallocator, YardEvent, ZonePreference,
};

// 配置与导入
pub use config::{ConfigError, PlanningConfig, SplitterConfig, YardLayoutConfig};
pub use importer::{ImportError, VesselImporter, YardImporter};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "集装箱堆场排位系统";
