// ==========================================
// 集装箱堆场排位系统 - 放箱分配引擎
// ==========================================
// 职责: 按分区偏好序贪心放箱
// 红线: 容量预检先于提交; 一经提交不回撤;
//       部分满足必须显式返回余量, 不得静默丢箱
// ==========================================

use crate::domain::types::ClusterId;
use crate::domain::vessel::VesselMaster;
use crate::domain::yard::{BlockCapacity, Yard};
use crate::engine::clash::ClashTracker;
use crate::engine::preference::ZonePreference;
use tracing::{debug, trace};

// ==========================================
// YardAllocator - 放箱分配引擎
// ==========================================
// 无状态引擎; 冲突与占用账本由调用方持有并传入
#[derive(Debug, Clone, Default)]
pub struct YardAllocator {
    preference: ZonePreference,
}

impl YardAllocator {
    pub fn new() -> Self {
        Self {
            preference: ZonePreference::new(),
        }
    }

    /// 为箱组放箱
    ///
    /// 算法: 按偏好序遍历分区; 分区内按箱区编号升序;
    /// 跳过与本船冲突的箱区; 每个箱区放 min(余量, 剩余容量);
    /// 首次成功放入某箱区时登记一次使用记录; 余量归零即提前结束。
    ///
    /// # 返回
    /// 未能放下的箱数（全部放下为 0）。余量非零不是错误,
    /// 由时间轴编排器在后续日重试。
    pub fn allocate(
        &self,
        yard: &mut Yard,
        clash: &mut ClashTracker,
        cluster: &ClusterId,
        qty: u32,
        vessel: &VesselMaster,
    ) -> u32 {
        let mut outstanding = qty;
        if outstanding == 0 {
            return 0;
        }

        'zones: for &zone in self.preference.zone_order(vessel.preferred_zone) {
            for block_id in yard.block_ids_in_zone(zone) {
                if clash.is_clashing(&vessel.vessel_name, vessel.eta, &block_id) {
                    trace!(block = %block_id, vessel = %vessel.vessel_name, "箱区存在船期冲突, 跳过");
                    continue;
                }

                let Some(block) = yard.block_mut(&block_id) else {
                    continue;
                };
                let take = outstanding.min(block.free_boxes());
                if take == 0 {
                    continue;
                }

                block.place(cluster, take);
                clash.mark_usage(&vessel.vessel_name, vessel.eta, block_id);
                outstanding -= take;
                debug!(
                    cluster = %cluster,
                    block = %block_id,
                    qty = take,
                    outstanding,
                    "放箱提交"
                );

                if outstanding == 0 {
                    break 'zones;
                }
            }
        }

        if outstanding > 0 {
            debug!(
                cluster = %cluster,
                requested = qty,
                unplaced = outstanding,
                "放箱部分满足, 余量留待后续日重试"
            );
        }
        outstanding
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{BlockId, Zone};
    use crate::domain::yard::YardBlock;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn vessel(name: &str, eta_day: u32, zone: Zone) -> VesselMaster {
        VesselMaster::new(name, 1000, 2, date(eta_day), zone)
    }

    /// 每分区两个箱区, 每箱区容量 100
    fn small_yard() -> Yard {
        let mut yard = Yard::new();
        for zone in Zone::ALL {
            for idx in 1..=2u8 {
                yard.insert_block(YardBlock::new(BlockId::new(zone, idx), 100));
            }
        }
        yard
    }

    fn held(yard: &Yard, code: &str, cluster: &ClusterId) -> u32 {
        yard.block(&BlockId::parse(code).unwrap())
            .unwrap()
            .held_boxes(cluster)
    }

    #[test]
    fn test_fills_preferred_zone_in_block_order() {
        let mut yard = small_yard();
        let mut clash = ClashTracker::new(3);
        let v = vessel("V1", 10, Zone::B);
        let c = ClusterId::new("V1", 1);

        let rest = YardAllocator::new().allocate(&mut yard, &mut clash, &c, 150, &v);

        assert_eq!(rest, 0);
        // 偏好 B 区: B01 满 100, 溢出 50 进 B02
        assert_eq!(held(&yard, "B01", &c), 100);
        assert_eq!(held(&yard, "B02", &c), 50);
        assert_eq!(held(&yard, "A01", &c), 0);
    }

    #[test]
    fn test_overflows_to_next_zone_when_preferred_full() {
        let mut yard = small_yard();
        let mut clash = ClashTracker::new(3);
        let v = vessel("V1", 10, Zone::A);
        let c = ClusterId::new("V1", 1);

        let rest = YardAllocator::new().allocate(&mut yard, &mut clash, &c, 250, &v);

        assert_eq!(rest, 0);
        // A 区 200 放满后, 余 50 进 B01（A 的次选分区）
        assert_eq!(held(&yard, "A01", &c), 100);
        assert_eq!(held(&yard, "A02", &c), 100);
        assert_eq!(held(&yard, "B01", &c), 50);
    }

    #[test]
    fn test_skips_clashing_blocks() {
        let mut yard = small_yard();
        let mut clash = ClashTracker::new(3);
        // 邻船已占 A01, 到港日仅差 1 天
        clash.mark_usage("OTHER", date(9), BlockId::new(Zone::A, 1));

        let v = vessel("V1", 10, Zone::A);
        let c = ClusterId::new("V1", 1);
        let rest = YardAllocator::new().allocate(&mut yard, &mut clash, &c, 120, &v);

        assert_eq!(rest, 0);
        assert_eq!(held(&yard, "A01", &c), 0);
        assert_eq!(held(&yard, "A02", &c), 100);
        assert_eq!(held(&yard, "B01", &c), 20);
    }

    #[test]
    fn test_partial_fulfillment_returns_remainder() {
        let mut yard = Yard::new();
        yard.insert_block(YardBlock::new(BlockId::new(Zone::A, 1), 30));
        let mut clash = ClashTracker::new(3);
        let v = vessel("V1", 10, Zone::A);
        let c = ClusterId::new("V1", 1);

        let rest = YardAllocator::new().allocate(&mut yard, &mut clash, &c, 100, &v);

        assert_eq!(rest, 70);
        assert_eq!(held(&yard, "A01", &c), 30);
    }

    #[test]
    fn test_marks_usage_once_per_block() {
        let mut yard = small_yard();
        let mut clash = ClashTracker::new(3);
        let v = vessel("V1", 10, Zone::A);
        let alloc = YardAllocator::new();

        // 连续两日放箱进同一箱区, 使用记录只应有一条
        let c1 = ClusterId::new("V1", 1);
        alloc.allocate(&mut yard, &mut clash, &c1, 10, &v);
        alloc.allocate(&mut yard, &mut clash, &c1, 10, &v);

        assert_eq!(clash.records_for(&BlockId::new(Zone::A, 1)).len(), 1);
    }

    #[test]
    fn test_second_vessel_excluded_after_first_marked() {
        let mut yard = small_yard();
        let mut clash = ClashTracker::new(3);
        let alloc = YardAllocator::new();

        let v1 = vessel("V1", 10, Zone::A);
        let c1 = ClusterId::new("V1", 1);
        alloc.allocate(&mut yard, &mut clash, &c1, 10, &v1);

        // V2 到港日差 1 天, 偏好同区: 不得进入 A01
        let v2 = vessel("V2", 11, Zone::A);
        let c2 = ClusterId::new("V2", 1);
        let rest = alloc.allocate(&mut yard, &mut clash, &c2, 50, &v2);

        assert_eq!(rest, 0);
        assert_eq!(held(&yard, "A01", &c2), 0);
        assert_eq!(held(&yard, "A02", &c2), 50);
    }

    #[test]
    fn test_zero_qty_is_noop() {
        let mut yard = small_yard();
        let mut clash = ClashTracker::new(3);
        let v = vessel("V1", 10, Zone::A);
        let c = ClusterId::new("V1", 1);

        let rest = YardAllocator::new().allocate(&mut yard, &mut clash, &c, 0, &v);
        assert_eq!(rest, 0);
        assert_eq!(yard.total_occupied_boxes(), 0);
        assert!(clash.records_for(&BlockId::new(Zone::A, 1)).is_empty());
    }

    #[test]
    fn test_all_zones_exhausted_returns_full_remainder() {
        let mut yard = small_yard();
        let mut clash = ClashTracker::new(3);
        // 全场均被邻船占用
        for zone in Zone::ALL {
            for idx in 1..=2u8 {
                clash.mark_usage("OTHER", date(10), BlockId::new(zone, idx));
            }
        }
        let v = vessel("V1", 11, Zone::A);
        let c = ClusterId::new("V1", 1);

        let rest = YardAllocator::new().allocate(&mut yard, &mut clash, &c, 40, &v);
        assert_eq!(rest, 40);
        assert_eq!(yard.total_occupied_boxes(), 0);
    }
}
