// ==========================================
// 集装箱堆场排位系统 - 船期冲突跟踪器
// ==========================================
// 职责: 记录各箱区的历史使用船舶与到港日,
//       禁止到港日临近的两艘船共用同一箱区
// 红线: 记录只增不删; 同一 (船, 箱区) 只记一次
// ==========================================

use crate::domain::types::BlockId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

// ==========================================
// ClashRecord - 箱区使用记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClashRecord {
    pub vessel_name: String,
    pub eta: NaiveDate,
}

// ==========================================
// ClashTracker - 冲突跟踪器
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClashTracker {
    margin_days: i64,
    records: BTreeMap<BlockId, Vec<ClashRecord>>,
}

impl ClashTracker {
    pub fn new(margin_days: i64) -> Self {
        Self {
            margin_days,
            records: BTreeMap::new(),
        }
    }

    /// 判定候选船在指定箱区是否存在船期冲突
    ///
    /// 冲突定义: 该箱区存在**其他**船舶的记录, 且
    /// |记录到港日 - 候选到港日| < margin_days（双向对称排斥）。
    /// 同船自身记录不构成冲突, 否则集港无法连日落在同一箱区。
    pub fn is_clashing(&self, vessel_name: &str, eta: NaiveDate, block: &BlockId) -> bool {
        let Some(entries) = self.records.get(block) else {
            return false;
        };
        entries.iter().any(|r| {
            r.vessel_name != vessel_name && (r.eta - eta).num_days().abs() < self.margin_days
        })
    }

    /// 登记箱区使用
    ///
    /// 在该船首次成功放箱进该箱区时调用一次;
    /// 重复调用幂等（按 (船, 箱区) 去重）, 不按箱计次
    pub fn mark_usage(&mut self, vessel_name: &str, eta: NaiveDate, block: BlockId) {
        let entries = self.records.entry(block).or_default();
        if entries.iter().any(|r| r.vessel_name == vessel_name) {
            return;
        }
        debug!(vessel = vessel_name, block = %block, eta = %eta, "登记箱区使用");
        entries.push(ClashRecord {
            vessel_name: vessel_name.to_string(),
            eta,
        });
    }

    /// 指定箱区的使用记录（测试/诊断用）
    pub fn records_for(&self, block: &BlockId) -> &[ClashRecord] {
        self.records.get(block).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Zone;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn block_a01() -> BlockId {
        BlockId::new(Zone::A, 1)
    }

    #[test]
    fn test_empty_tracker_never_clashes() {
        let tracker = ClashTracker::new(3);
        assert!(!tracker.is_clashing("V1", date(10), &block_a01()));
    }

    #[test]
    fn test_margin_boundary_is_strict() {
        let mut tracker = ClashTracker::new(3);
        tracker.mark_usage("V1", date(10), block_a01());

        // |Δ| < 3 冲突; |Δ| == 3 不冲突（严格小于）
        assert!(tracker.is_clashing("V2", date(8), &block_a01()));
        assert!(tracker.is_clashing("V2", date(10), &block_a01()));
        assert!(tracker.is_clashing("V2", date(12), &block_a01()));
        assert!(!tracker.is_clashing("V2", date(7), &block_a01()));
        assert!(!tracker.is_clashing("V2", date(13), &block_a01()));
    }

    #[test]
    fn test_exclusion_is_symmetric() {
        let mut tracker = ClashTracker::new(3);
        tracker.mark_usage("V1", date(10), block_a01());
        // 先到港与后到港的邻船同样被排斥
        assert!(tracker.is_clashing("EARLY", date(9), &block_a01()));
        assert!(tracker.is_clashing("LATE", date(11), &block_a01()));
    }

    #[test]
    fn test_own_records_do_not_clash() {
        let mut tracker = ClashTracker::new(3);
        tracker.mark_usage("V1", date(10), block_a01());
        // 同船连日集港须可复用同一箱区
        assert!(!tracker.is_clashing("V1", date(10), &block_a01()));
    }

    #[test]
    fn test_mark_usage_idempotent_per_vessel_block() {
        let mut tracker = ClashTracker::new(3);
        tracker.mark_usage("V1", date(10), block_a01());
        tracker.mark_usage("V1", date(10), block_a01());
        assert_eq!(tracker.records_for(&block_a01()).len(), 1);
    }

    #[test]
    fn test_records_scoped_per_block() {
        let mut tracker = ClashTracker::new(3);
        tracker.mark_usage("V1", date(10), block_a01());
        let other = BlockId::new(Zone::B, 1);
        assert!(!tracker.is_clashing("V2", date(10), &other));
    }
}
