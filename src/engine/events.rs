// ==========================================
// 集装箱堆场排位系统 - 堆场事件日志
// ==========================================
// 职责: 定义有序事件流条目, 供下游展示层消费
// 说明: 事件即引擎对外的运行轨迹, 顺序本身携带语义
// ==========================================

use crate::domain::types::{ClusterId, YardEventKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// YardEvent - 堆场事件
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YardEvent {
    pub event_date: NaiveDate,
    pub kind: YardEventKind,
    pub vessel_name: String,
    pub cluster_id: Option<ClusterId>,
    pub qty: u32,
    pub message: String,
}

impl YardEvent {
    /// 集港入场事件（placed < requested 时附带缺口说明）
    pub fn receiving(
        event_date: NaiveDate,
        cluster_id: ClusterId,
        placed: u32,
        requested: u32,
    ) -> Self {
        let message = if placed < requested {
            format!(
                "RECEIVING_SHORTFALL: placed {} of {}, unplaced {}",
                placed,
                requested,
                requested - placed
            )
        } else {
            format!("RECEIVING: placed {} of {}", placed, requested)
        };
        Self {
            event_date,
            kind: YardEventKind::Receiving,
            vessel_name: cluster_id.vessel_name.clone(),
            cluster_id: Some(cluster_id),
            qty: placed,
            message,
        }
    }

    /// 到港日补齐事件
    pub fn final_receiving(
        event_date: NaiveDate,
        cluster_id: ClusterId,
        placed: u32,
        requested: u32,
    ) -> Self {
        let message = if placed < requested {
            format!(
                "FINAL_RECEIVING_SHORTFALL: placed {} of {}, unplaced {}",
                placed,
                requested,
                requested - placed
            )
        } else {
            format!("FINAL_RECEIVING: placed {} of {}", placed, requested)
        };
        Self {
            event_date,
            kind: YardEventKind::FinalReceiving,
            vessel_name: cluster_id.vessel_name.clone(),
            cluster_id: Some(cluster_id),
            qty: placed,
            message,
        }
    }

    /// 装船出场事件
    pub fn loading(
        event_date: NaiveDate,
        cluster_id: ClusterId,
        released: u32,
        requested: u32,
    ) -> Self {
        let message = if released < requested {
            format!(
                "LOADING_SHORT: released {} of {}, short {}",
                released,
                requested,
                requested - released
            )
        } else {
            format!("LOADING: released {} of {}", released, requested)
        };
        Self {
            event_date,
            kind: YardEventKind::Loading,
            vessel_name: cluster_id.vessel_name.clone(),
            cluster_id: Some(cluster_id),
            qty: released,
            message,
        }
    }

    /// 装船完结事件（船级, 无箱组维度）
    pub fn completion(event_date: NaiveDate, vessel_name: &str, loaded_total: u32) -> Self {
        Self {
            event_date,
            kind: YardEventKind::Completion,
            vessel_name: vessel_name.to_string(),
            cluster_id: None,
            qty: loaded_total,
            message: format!("LOADING_COMPLETED: vessel loaded {} boxes", loaded_total),
        }
    }
}

impl fmt::Display for YardEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cluster_id {
            Some(cluster) => write!(
                f,
                "[{}] {} {} {}",
                self.event_date, self.kind, cluster, self.message
            ),
            None => write!(
                f,
                "[{}] {} {} {}",
                self.event_date, self.kind, self.vessel_name, self.message
            ),
        }
    }
}
