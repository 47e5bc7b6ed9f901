// ==========================================
// 集装箱堆场排位系统 - 提箱释放引擎
// ==========================================
// 职责: 装船时按箱组回收占用, 释放容量复用
// 红线: 扫描顺序固定（箱区编号升序）, 保证可复现
// ==========================================

use crate::domain::types::ClusterId;
use crate::domain::yard::Yard;
use tracing::debug;

// ==========================================
// YardDeallocator - 提箱释放引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct YardDeallocator;

impl YardDeallocator {
    pub fn new() -> Self {
        Self
    }

    /// 为箱组提箱
    ///
    /// 按箱区编号升序扫描全场, 从各箱区提走该箱组的在场箱,
    /// 直至满足请求量或该箱组全场无存
    ///
    /// # 返回
    /// 未能提走的箱数。非零说明该箱组在场量小于请求量,
    /// 属可记录的偏差, 不是致命错误
    pub fn release(&self, yard: &mut Yard, cluster: &ClusterId, qty: u32) -> u32 {
        let mut outstanding = qty;
        if outstanding == 0 {
            return 0;
        }

        for block in yard.blocks_mut() {
            let take = outstanding.min(block.held_boxes(cluster));
            if take == 0 {
                continue;
            }
            block.remove(cluster, take);
            outstanding -= take;
            debug!(cluster = %cluster, block = %block.id, qty = take, outstanding, "提箱提交");
            if outstanding == 0 {
                break;
            }
        }

        if outstanding > 0 {
            debug!(
                cluster = %cluster,
                requested = qty,
                unreleased = outstanding,
                "提箱请求超过在场量"
            );
        }
        outstanding
    }
}
