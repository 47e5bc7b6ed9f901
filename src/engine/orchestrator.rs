// ==========================================
// 集装箱堆场排位系统 - 时间轴编排器
// ==========================================
// 职责: 按日推进船舶生命周期状态机, 调度放箱/提箱,
//       每日收盘生成全场快照与事件流
// 红线: 容量缺口/船期冲突不得中断运行;
//       运行必须处理 [start, end] 内的每一天直至收尾
// ==========================================

use crate::config::PlanningConfig;
use crate::domain::snapshot::YardSnapshot;
use crate::domain::types::VesselPhase;
use crate::domain::vessel::{ClusterReport, VesselMaster, VesselState};
use crate::domain::yard::Yard;
use crate::engine::allocator::YardAllocator;
use crate::engine::clash::ClashTracker;
use crate::engine::deallocator::YardDeallocator;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::events::YardEvent;
use crate::engine::splitter::ClusterSplitter;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, warn};
use uuid::Uuid;

// ==========================================
// SimulationState - 单次运行的全部可变状态
// ==========================================
// 每次运行构造一份, 运行间互不共享;
// 在场账本仅由 Allocator/Deallocator 串行触碰
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub yard: Yard,
    pub clash: ClashTracker,
    pub vessels: Vec<VesselState>,
    pub snapshots: BTreeMap<NaiveDate, YardSnapshot>,
    pub events: Vec<YardEvent>,
}

// ==========================================
// RunSummary - 运行摘要
// ==========================================
// run_id 仅作元数据, 不进入事件流/快照, 不影响可复现性
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub vessel_count: usize,
    pub day_count: usize,
    pub event_count: usize,
    pub unfinished_vessel_count: usize,
}

// ==========================================
// SimulationResult - 运行结果
// ==========================================
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub run_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub vessels: Vec<VesselState>,
    pub snapshots: BTreeMap<NaiveDate, YardSnapshot>,
    pub events: Vec<YardEvent>,
}

impl SimulationResult {
    pub fn snapshot_for(&self, date: NaiveDate) -> Option<&YardSnapshot> {
        self.snapshots.get(&date)
    }

    /// 全部箱组的期末诊断报表
    pub fn cluster_reports(&self) -> Vec<ClusterReport> {
        self.vessels
            .iter()
            .flat_map(|v| v.cluster_reports())
            .collect()
    }

    /// 期末仍有未放余量的船舶（容量缺口异常清单）
    pub fn unfinished_vessels(&self) -> Vec<&VesselState> {
        self.vessels
            .iter()
            .filter(|v| v.remaining_boxes() > 0)
            .collect()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            run_id: self.run_id,
            start_date: self.start_date,
            end_date: self.end_date,
            vessel_count: self.vessels.len(),
            day_count: self.snapshots.len(),
            event_count: self.events.len(),
            unfinished_vessel_count: self.unfinished_vessels().len(),
        }
    }
}

// ==========================================
// TimelineOrchestrator - 时间轴编排器
// ==========================================
pub struct TimelineOrchestrator {
    config: PlanningConfig,
    splitter: ClusterSplitter,
    allocator: YardAllocator,
    deallocator: YardDeallocator,
}

impl TimelineOrchestrator {
    pub fn new(config: PlanningConfig) -> Self {
        let splitter = ClusterSplitter::new(config.splitter.clone());
        Self {
            config,
            splitter,
            allocator: YardAllocator::new(),
            deallocator: YardDeallocator::new(),
        }
    }

    /// 执行完整模拟
    ///
    /// # 参数
    /// - `vessels`: 船舶静态记录（导入层已完成字段级校验）
    /// - `yard`: 初始堆场（空占用）
    /// - `window`: 模拟窗口; 缺省按船表推导
    ///   [min(集港开始日), max(装船结束日)]
    ///
    /// # 返回
    /// 运行结果（逐日快照 + 有序事件流 + 期末船舶状态）。
    /// 仅输入校验可失败; 运行期缺口一律吸收进状态
    pub fn run(
        &self,
        vessels: Vec<VesselMaster>,
        yard: Yard,
        window: Option<(NaiveDate, NaiveDate)>,
    ) -> EngineResult<SimulationResult> {
        // ==========================================
        // 步骤1: 输入校验（全有或全无, 先于任何状态变更）
        // ==========================================
        self.validate(&vessels, &yard, window)?;

        // ==========================================
        // 步骤2: 建立运行态（箱组拆分 + 窗口推导）
        // ==========================================
        let states: Vec<VesselState> = vessels
            .into_iter()
            .map(|master| {
                let clusters = self.splitter.split(&master);
                let loading_days = self.loading_days(master.total_boxes);
                VesselState::new(master, clusters, self.config.receiving_days, loading_days)
            })
            .collect();

        let (start_date, end_date) = match window {
            Some(range) => range,
            None => derive_window(&states)?,
        };

        let mut state = SimulationState {
            yard,
            clash: ClashTracker::new(self.config.clash_margin_days),
            vessels: states,
            snapshots: BTreeMap::new(),
            events: Vec::new(),
        };

        let run_id = Uuid::new_v4();
        info!(
            %run_id,
            start_date = %start_date,
            end_date = %end_date,
            vessel_count = state.vessels.len(),
            block_count = state.yard.block_count(),
            "开始堆场排位模拟"
        );

        // ==========================================
        // 步骤3: 逐日推进
        // ==========================================
        let mut day = start_date;
        while day <= end_date {
            self.advance_day(day, &mut state);
            day = day + chrono::Duration::days(1);
        }

        let unfinished = state
            .vessels
            .iter()
            .filter(|v| v.remaining_boxes() > 0)
            .count();
        info!(
            %run_id,
            event_count = state.events.len(),
            snapshot_count = state.snapshots.len(),
            unfinished_vessel_count = unfinished,
            "模拟结束"
        );

        Ok(SimulationResult {
            run_id,
            start_date,
            end_date,
            vessels: state.vessels,
            snapshots: state.snapshots,
            events: state.events,
        })
    }

    // ==========================================
    // 单日推进（§状态机步骤 1-6, 顺序固定）
    // ==========================================
    fn advance_day(&self, day: NaiveDate, state: &mut SimulationState) {
        debug!(day = %day, "推进模拟日");

        for idx in 0..state.vessels.len() {
            // 借用拆分: 船舶状态与在场账本/冲突表分开可变借用
            let (yard, clash, events) = (&mut state.yard, &mut state.clash, &mut state.events);
            let vessel = &mut state.vessels[idx];

            if vessel.is_finished() {
                continue;
            }

            // 步骤1: 完结检查 - 已越过装船窗口的船当日不再处理
            if day > vessel.loading_end {
                vessel.phase = VesselPhase::Finished;
                if vessel.remaining_boxes() > 0 {
                    warn!(
                        vessel = %vessel.master.vessel_name,
                        remaining_boxes = vessel.remaining_boxes(),
                        "船舶完结时仍有未放箱余量（堆场未能在窗口内完全服务该船）"
                    );
                }
                continue;
            }

            // 步骤2: 集港 - 按日均到箱量等比例分摊到各箱组
            if vessel.in_receiving_window(day) {
                vessel.phase = VesselPhase::Receiving;
                self.receive_daily(day, vessel, yard, clash, events);
            }

            // 步骤3: 到港补齐 - 集港欠量当日全量强制放箱
            if day == vessel.master.eta {
                vessel.phase = VesselPhase::Arrived;
                self.receive_final(day, vessel, yard, clash, events);
            }

            // 步骤4: 装船 - 按日均出箱量等比例分摊提箱
            if vessel.in_loading_window(day) {
                vessel.phase = VesselPhase::Loading;
                self.load_daily(day, vessel, yard, events);
            }

            // 步骤5: 装船完结 - 当日恰为装船结束日, 给出同日完结信号
            if day == vessel.loading_end {
                vessel.phase = VesselPhase::Finished;
                events.push(YardEvent::completion(
                    day,
                    &vessel.master.vessel_name,
                    vessel.loaded_boxes,
                ));
                if vessel.remaining_boxes() > 0 {
                    warn!(
                        vessel = %vessel.master.vessel_name,
                        remaining_boxes = vessel.remaining_boxes(),
                        "船舶完结时仍有未放箱余量（堆场未能在窗口内完全服务该船）"
                    );
                }
                info!(
                    vessel = %vessel.master.vessel_name,
                    loaded_boxes = vessel.loaded_boxes,
                    day = %day,
                    "船舶装船完结"
                );
            }
        }

        // 步骤6: 日终快照
        state
            .snapshots
            .insert(day, YardSnapshot::capture(day, &state.yard));
    }

    /// 集港: daily_in = ceil(total * rate), 按箱组目标量等比例分摊,
    /// 上限为该箱组未放余量
    fn receive_daily(
        &self,
        day: NaiveDate,
        vessel: &mut VesselState,
        yard: &mut Yard,
        clash: &mut ClashTracker,
        events: &mut Vec<YardEvent>,
    ) {
        let total = vessel.master.total_boxes;
        let daily_in = ceil_mul(total, self.config.receiving_rate);
        let master = vessel.master.clone();

        for cluster in &mut vessel.clusters {
            let quota = ceil_prorata(daily_in, cluster.target_boxes, total)
                .min(cluster.remaining_boxes);
            if quota == 0 {
                continue;
            }
            let unplaced = self
                .allocator
                .allocate(yard, clash, &cluster.id, quota, &master);
            let placed = quota - unplaced;
            cluster.mark_placed(placed);
            if placed > 0 {
                events.push(YardEvent::receiving(day, cluster.id.clone(), placed, quota));
            }
        }
    }

    /// 到港补齐: 各箱组剩余未放量全量放箱
    fn receive_final(
        &self,
        day: NaiveDate,
        vessel: &mut VesselState,
        yard: &mut Yard,
        clash: &mut ClashTracker,
        events: &mut Vec<YardEvent>,
    ) {
        let master = vessel.master.clone();
        for cluster in &mut vessel.clusters {
            let quota = cluster.remaining_boxes;
            if quota == 0 {
                continue;
            }
            let unplaced = self
                .allocator
                .allocate(yard, clash, &cluster.id, quota, &master);
            let placed = quota - unplaced;
            cluster.mark_placed(placed);
            if placed > 0 {
                events.push(YardEvent::final_receiving(
                    day,
                    cluster.id.clone(),
                    placed,
                    quota,
                ));
            }
            if unplaced > 0 {
                warn!(
                    cluster = %cluster.id,
                    unplaced,
                    "到港日补齐仍有缺口, 余量保留至诊断报表"
                );
            }
        }
    }

    /// 装船: daily_out = ceil(total / loading_days), 按箱组目标量
    /// 等比例分摊提箱。各箱组配额独立向上取整, 不做跨组再平衡
    /// (单日合计可能略超 daily_out, 按观测行为保留)
    fn load_daily(
        &self,
        day: NaiveDate,
        vessel: &mut VesselState,
        yard: &mut Yard,
        events: &mut Vec<YardEvent>,
    ) {
        let total = vessel.master.total_boxes;
        let daily_out = div_ceil_u32(total, vessel.loading_days as u32);

        for cluster in &vessel.clusters {
            let quota = ceil_prorata(daily_out, cluster.target_boxes, total);
            if quota == 0 {
                continue;
            }
            let unreleased = self.deallocator.release(yard, &cluster.id, quota);
            let released = quota - unreleased;
            vessel.loaded_boxes += released;
            if released > 0 {
                events.push(YardEvent::loading(day, cluster.id.clone(), released, quota));
            }
        }
    }

    /// 装船天数 = ceil(total / (岸桥台时量 * 岸桥数 * 24)), 至少 1 天
    fn loading_days(&self, total_boxes: u32) -> i64 {
        let daily_capacity = self.config.crane_moves_per_hour * self.config.crane_count * 24.0;
        let days = (f64::from(total_boxes) / daily_capacity).ceil() as i64;
        days.max(1)
    }

    /// 输入校验: 任何一项不合法即拒绝, 不触碰状态
    fn validate(
        &self,
        vessels: &[VesselMaster],
        yard: &Yard,
        window: Option<(NaiveDate, NaiveDate)>,
    ) -> EngineResult<()> {
        if yard.is_empty() {
            return Err(EngineError::EmptyYard);
        }
        if let Some((start, end)) = window {
            if start > end {
                return Err(EngineError::InvalidDateRange { start, end });
            }
        }
        let mut seen = HashSet::new();
        for v in vessels {
            if v.vessel_name.trim().is_empty() {
                return Err(EngineError::EmptyVesselName);
            }
            if !seen.insert(v.vessel_name.clone()) {
                return Err(EngineError::DuplicateVesselName(v.vessel_name.clone()));
            }
            if v.total_boxes == 0 {
                return Err(EngineError::InvalidTotalBoxes {
                    vessel: v.vessel_name.clone(),
                    total_boxes: v.total_boxes,
                });
            }
            if v.requested_cluster_count == 0 {
                return Err(EngineError::InvalidClusterCount {
                    vessel: v.vessel_name.clone(),
                    count: v.requested_cluster_count,
                });
            }
        }
        Ok(())
    }
}

/// 按船表推导模拟窗口: [min(集港开始日), max(装船结束日)]
fn derive_window(states: &[VesselState]) -> EngineResult<(NaiveDate, NaiveDate)> {
    let start = states.iter().map(|v| v.receiving_start).min();
    let end = states.iter().map(|v| v.loading_end).max();
    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(EngineError::NoVessels),
    }
}

/// ceil(n * rate)
fn ceil_mul(n: u32, rate: f64) -> u32 {
    (f64::from(n) * rate).ceil() as u32
}

/// ceil(daily * part / total), 64 位中间量防溢出
fn ceil_prorata(daily: u32, part: u32, total: u32) -> u32 {
    let numerator = u64::from(daily) * u64::from(part);
    let total = u64::from(total);
    ((numerator + total - 1) / total) as u32
}

/// ceil(a / b)
fn div_ceil_u32(a: u32, b: u32) -> u32 {
    (a + b - 1) / b
}
