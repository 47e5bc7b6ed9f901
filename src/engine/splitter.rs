// ==========================================
// 集装箱堆场排位系统 - 箱组拆分引擎
// ==========================================
// 职责: 船舶总箱量 → 等分箱组
// 红线: 各箱组目标量之和必须精确等于总箱量
//       (下游 remaining 计数依赖该恒等式)
// ==========================================

use crate::config::SplitterConfig;
use crate::domain::types::ClusterId;
use crate::domain::vessel::{Cluster, VesselMaster};
use tracing::debug;

// ==========================================
// ClusterSplitter - 箱组拆分引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct ClusterSplitter {
    config: SplitterConfig,
}

impl ClusterSplitter {
    pub fn new(config: SplitterConfig) -> Self {
        Self { config }
    }

    /// 小票量阈值覆盖规则
    ///
    /// - 总量 < small_volume_threshold: 强制 small_volume_cluster_count 组
    /// - 总量 ∈ [small, medium): 强制 medium_volume_cluster_count 组
    /// - 其余: 按申报组数
    pub fn effective_count(&self, total_boxes: u32, requested: u32) -> u32 {
        if total_boxes < self.config.small_volume_threshold {
            self.config.small_volume_cluster_count
        } else if total_boxes < self.config.medium_volume_threshold {
            self.config.medium_volume_cluster_count
        } else {
            requested
        }
    }

    /// 精确等分: base = total / count, 前 total % count 组各 +1
    ///
    /// 约定: count > 0（输入校验在导入/运行前完成, 此处不做除零兜底）
    pub fn split_sizes(&self, total_boxes: u32, count: u32) -> Vec<u32> {
        let base = total_boxes / count;
        let extra = total_boxes % count;
        (0..count)
            .map(|i| if i < extra { base + 1 } else { base })
            .collect()
    }

    /// 为船舶生成箱组
    pub fn split(&self, master: &VesselMaster) -> Vec<Cluster> {
        let count = self.effective_count(master.total_boxes, master.requested_cluster_count);
        let sizes = self.split_sizes(master.total_boxes, count);
        debug!(
            vessel = %master.vessel_name,
            total_boxes = master.total_boxes,
            requested = master.requested_cluster_count,
            effective = count,
            "箱组拆分完成"
        );
        sizes
            .into_iter()
            .enumerate()
            .map(|(i, size)| {
                Cluster::new(ClusterId::new(&master.vessel_name, i as u32 + 1), size)
            })
            .collect()
    }
}
