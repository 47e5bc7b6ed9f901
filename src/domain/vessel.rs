// ==========================================
// 集装箱堆场排位系统 - 船舶领域模型
// ==========================================
// 职责: 船舶静态记录 + 运行期船舶状态
// 红线: VesselMaster 导入后不可变, 运行态全部落在 VesselState
// ==========================================

use crate::domain::types::{ClusterId, VesselPhase, Zone};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// VesselMaster - 船舶静态记录
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VesselMaster {
    pub vessel_name: String,           // 船名（运行内唯一）
    pub total_boxes: u32,              // 本航次出口箱总量
    pub requested_cluster_count: u32,  // 申报箱组数（可被阈值规则覆盖）
    pub eta: NaiveDate,                // 到港日
    pub preferred_zone: Zone,          // 偏好分区
}

impl VesselMaster {
    pub fn new(
        vessel_name: &str,
        total_boxes: u32,
        requested_cluster_count: u32,
        eta: NaiveDate,
        preferred_zone: Zone,
    ) -> Self {
        Self {
            vessel_name: vessel_name.to_string(),
            total_boxes,
            requested_cluster_count,
            eta,
            preferred_zone,
        }
    }
}

// ==========================================
// Cluster - 箱组
// ==========================================
// remaining_boxes 自 target_boxes 起, 随放箱成功递减, 永不为负;
// 当日容量不足时余量保留, 后续日重试
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    pub id: ClusterId,
    pub target_boxes: u32,
    pub remaining_boxes: u32,
}

impl Cluster {
    pub fn new(id: ClusterId, target_boxes: u32) -> Self {
        Self {
            id,
            target_boxes,
            remaining_boxes: target_boxes,
        }
    }

    /// 已完成放箱量
    pub fn placed_boxes(&self) -> u32 {
        self.target_boxes - self.remaining_boxes
    }

    /// 记录放箱成功
    pub fn mark_placed(&mut self, qty: u32) {
        debug_assert!(qty <= self.remaining_boxes, "放箱量超过箱组 {} 余量", self.id);
        self.remaining_boxes = self.remaining_boxes.saturating_sub(qty);
    }
}

// ==========================================
// VesselState - 船舶运行态
// ==========================================
// 每次运行为每艘船创建一份; 完结后仅置 Finished, 不销毁
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VesselState {
    pub master: VesselMaster,
    pub clusters: Vec<Cluster>,
    pub phase: VesselPhase,
    pub loaded_boxes: u32, // 装船累计出场箱数

    // ===== 计算窗口 =====
    pub receiving_start: NaiveDate, // 集港开始日 = eta - receiving_days
    pub receiving_end: NaiveDate,   // 集港结束日 = eta - 1
    pub loading_days: i64,          // 装船天数（由岸桥能力推导）
    pub loading_end: NaiveDate,     // 装船结束日 = eta + loading_days - 1
}

impl VesselState {
    /// 构造船舶运行态
    ///
    /// # 参数
    /// - `master`: 船舶静态记录
    /// - `clusters`: 拆分后的箱组（由 ClusterSplitter 产出）
    /// - `receiving_days`: 集港窗口天数
    /// - `loading_days`: 装船天数（>= 1, 由编排器按岸桥能力推导）
    pub fn new(
        master: VesselMaster,
        clusters: Vec<Cluster>,
        receiving_days: i64,
        loading_days: i64,
    ) -> Self {
        let receiving_start = master.eta - chrono::Duration::days(receiving_days);
        let receiving_end = master.eta - chrono::Duration::days(1);
        let loading_end = master.eta + chrono::Duration::days(loading_days - 1);
        Self {
            master,
            clusters,
            phase: VesselPhase::Upcoming,
            loaded_boxes: 0,
            receiving_start,
            receiving_end,
            loading_days,
            loading_end,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == VesselPhase::Finished
    }

    /// 当日是否在集港窗口内
    pub fn in_receiving_window(&self, day: NaiveDate) -> bool {
        day >= self.receiving_start && day <= self.receiving_end
    }

    /// 当日是否在装船窗口内
    pub fn in_loading_window(&self, day: NaiveDate) -> bool {
        day >= self.master.eta && day <= self.loading_end
    }

    /// 全船未放箱余量
    pub fn remaining_boxes(&self) -> u32 {
        self.clusters.iter().map(|c| c.remaining_boxes).sum()
    }

    /// 生成箱组诊断报表
    pub fn cluster_reports(&self) -> Vec<ClusterReport> {
        self.clusters
            .iter()
            .map(|c| ClusterReport {
                cluster_id: c.id.clone(),
                target_boxes: c.target_boxes,
                placed_boxes: c.placed_boxes(),
                remaining_boxes: c.remaining_boxes,
            })
            .collect()
    }
}

// ==========================================
// ClusterReport - 箱组诊断报表
// ==========================================
// 运行结束时导出; 正常完结 remaining_boxes == 0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterReport {
    pub cluster_id: ClusterId,
    pub target_boxes: u32,
    pub placed_boxes: u32,
    pub remaining_boxes: u32,
}
