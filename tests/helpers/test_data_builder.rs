// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

#![allow(dead_code)]

use chrono::NaiveDate;
use container_yard_aps::domain::types::{BlockId, Zone};
use container_yard_aps::domain::vessel::VesselMaster;
use container_yard_aps::domain::yard::{Yard, YardBlock};
use container_yard_aps::PlanningConfig;

// ==========================================
// VesselMaster 构建器
// ==========================================

pub struct VesselBuilder {
    vessel_name: String,
    total_boxes: u32,
    requested_cluster_count: u32,
    eta: NaiveDate,
    preferred_zone: Zone,
}

impl VesselBuilder {
    pub fn new(vessel_name: &str) -> Self {
        Self {
            vessel_name: vessel_name.to_string(),
            total_boxes: 900,
            requested_cluster_count: 3,
            eta: date(2025, 3, 10),
            preferred_zone: Zone::A,
        }
    }

    pub fn total_boxes(mut self, total: u32) -> Self {
        self.total_boxes = total;
        self
    }

    pub fn cluster_count(mut self, count: u32) -> Self {
        self.requested_cluster_count = count;
        self
    }

    pub fn eta(mut self, eta: NaiveDate) -> Self {
        self.eta = eta;
        self
    }

    pub fn zone(mut self, zone: Zone) -> Self {
        self.preferred_zone = zone;
        self
    }

    pub fn build(self) -> VesselMaster {
        VesselMaster::new(
            &self.vessel_name,
            self.total_boxes,
            self.requested_cluster_count,
            self.eta,
            self.preferred_zone,
        )
    }
}

// ==========================================
// 通用辅助
// ==========================================

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 默认布局堆场: 3 分区 × 5 箱区 × 1110 箱
pub fn default_yard() -> Yard {
    PlanningConfig::default().yard.build_yard()
}

/// 小型堆场: 每分区 blocks 个箱区, 每箱区 capacity 箱
pub fn small_yard(blocks: u8, capacity: u32) -> Yard {
    let mut yard = Yard::new();
    for zone in Zone::ALL {
        for idx in 1..=blocks {
            yard.insert_block(YardBlock::new(BlockId::new(zone, idx), capacity));
        }
    }
    yard
}

pub fn block_id(code: &str) -> BlockId {
    BlockId::parse(code).unwrap()
}
