// ==========================================
// 集装箱堆场排位系统 - 引擎层
// ==========================================
// 职责: 实现分配规则引擎与时间轴推进
// 红线: 运行期缺口走余量返回, 引擎不得 panic
// ==========================================

pub mod allocator;
pub mod clash;
pub mod deallocator;
pub mod error;
pub mod events;
pub mod orchestrator;
pub mod preference;
pub mod splitter;

// 重导出核心引擎
pub use allocator::YardAllocator;
pub use clash::{ClashRecord, ClashTracker};
pub use deallocator::YardDeallocator;
pub use error::{EngineError, EngineResult};
pub use events::YardEvent;
pub use orchestrator::{RunSummary, SimulationResult, SimulationState, TimelineOrchestrator};
pub use preference::{ZonePreference, DEFAULT_ZONE_ORDER};
pub use splitter::ClusterSplitter;
