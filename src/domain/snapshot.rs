// ==========================================
// 集装箱堆场排位系统 - 堆场日终快照
// ==========================================
// 职责: 每个模拟日的全场占用只读副本
// 红线: 快照与在场账本无别名共享, 生成后不可变
// ==========================================

use crate::domain::types::{BlockId, ClusterId};
use crate::domain::yard::Yard;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// BlockOccupancy - 单箱区占用切片
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockOccupancy {
    pub capacity_boxes: u32,
    pub total_boxes: u32,
    pub clusters: BTreeMap<ClusterId, u32>,
}

// ==========================================
// YardSnapshot - 全场日终快照
// ==========================================
// 按日留存, 供下游查询/可视化; 读取无需任何协调
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YardSnapshot {
    pub snapshot_date: NaiveDate,
    pub blocks: BTreeMap<BlockId, BlockOccupancy>,
}

impl YardSnapshot {
    /// 对在场账本做深拷贝快照
    ///
    /// 所有箱区均入快照（含空箱区）, 便于下游按固定网格渲染
    pub fn capture(snapshot_date: NaiveDate, yard: &Yard) -> Self {
        let blocks = yard
            .blocks()
            .map(|b| {
                (
                    b.id,
                    BlockOccupancy {
                        capacity_boxes: b.capacity_boxes,
                        total_boxes: b.occupied_boxes(),
                        clusters: b.occupancy.clone(),
                    },
                )
            })
            .collect();
        Self {
            snapshot_date,
            blocks,
        }
    }

    /// 全场在场箱总量
    pub fn total_boxes(&self) -> u64 {
        self.blocks.values().map(|b| u64::from(b.total_boxes)).sum()
    }
}
