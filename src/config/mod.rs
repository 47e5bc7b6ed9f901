// ==========================================
// 集装箱堆场排位系统 - 运行参数配置
// ==========================================
// 职责: 运行常量加载、校验、默认值管理
// 存储: JSON 配置文件（缺省用内置默认值）
// ==========================================

use crate::domain::types::{BlockId, Zone};
use crate::domain::yard::{Yard, YardBlock};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

// ==========================================
// 配置错误类型
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {0}")]
    FileReadError(String),

    #[error("配置文件 JSON 解析失败: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("配置值非法 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::FileReadError(err.to_string())
    }
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// SplitterConfig - 箱组拆分参数
// ==========================================
// 小票量阈值覆盖: < small 强制 small_count 组;
// [small, medium) 强制 medium_count 组; 其余按申报
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitterConfig {
    pub small_volume_threshold: u32,
    pub medium_volume_threshold: u32,
    pub small_volume_cluster_count: u32,
    pub medium_volume_cluster_count: u32,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            small_volume_threshold: 1000,
            medium_volume_threshold: 1500,
            small_volume_cluster_count: 3,
            medium_volume_cluster_count: 2,
        }
    }
}

// ==========================================
// YardLayoutConfig - 堆场布局参数
// ==========================================
// 默认网格: 3 分区 × 5 箱区, 每箱区 37 贝位 × 30 箱
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YardLayoutConfig {
    pub zones: Vec<Zone>,
    pub blocks_per_zone: u8,
    pub slots_per_block: u32,
    pub boxes_per_slot: u32,
}

impl Default for YardLayoutConfig {
    fn default() -> Self {
        Self {
            zones: Zone::ALL.to_vec(),
            blocks_per_zone: 5,
            slots_per_block: 37,
            boxes_per_slot: 30,
        }
    }
}

impl YardLayoutConfig {
    /// 单箱区容量（箱）
    pub fn block_capacity_boxes(&self) -> u32 {
        self.slots_per_block * self.boxes_per_slot
    }

    /// 按布局参数构建空堆场
    pub fn build_yard(&self) -> Yard {
        let capacity = self.block_capacity_boxes();
        let mut yard = Yard::new();
        for &zone in &self.zones {
            for idx in 1..=self.blocks_per_zone {
                yard.insert_block(YardBlock::new(BlockId::new(zone, idx), capacity));
            }
        }
        yard
    }
}

// ==========================================
// PlanningConfig - 运行参数全集
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    pub receiving_days: i64,        // 集港窗口天数（到港日前）
    pub receiving_rate: f64,        // 日均到箱比例（占总量）
    pub crane_moves_per_hour: f64,  // 单桥台时量（自然箱/小时）
    pub crane_count: f64,           // 平均在船岸桥数
    pub clash_margin_days: i64,     // 船期冲突排斥天数
    pub splitter: SplitterConfig,
    pub yard: YardLayoutConfig,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            receiving_days: 7,
            receiving_rate: 0.12,
            crane_moves_per_hour: 28.0,
            crane_count: 2.7,
            clash_margin_days: 3,
            splitter: SplitterConfig::default(),
            yard: YardLayoutConfig::default(),
        }
    }
}

impl PlanningConfig {
    /// 从 JSON 配置文件加载并校验
    ///
    /// 文件中缺省的字段取内置默认值
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: PlanningConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        info!(path = %path.as_ref().display(), "运行参数加载完成");
        Ok(config)
    }

    /// 配置合法性校验
    pub fn validate(&self) -> ConfigResult<()> {
        fn invalid(key: &str, value: String, message: &str) -> ConfigError {
            ConfigError::InvalidValue {
                key: key.to_string(),
                value,
                message: message.to_string(),
            }
        }

        if self.receiving_days <= 0 {
            return Err(invalid(
                "receiving_days",
                self.receiving_days.to_string(),
                "集港窗口天数必须 > 0",
            ));
        }
        if !(self.receiving_rate > 0.0 && self.receiving_rate <= 1.0) {
            return Err(invalid(
                "receiving_rate",
                self.receiving_rate.to_string(),
                "日均到箱比例必须在 (0, 1] 内",
            ));
        }
        if self.crane_moves_per_hour <= 0.0 {
            return Err(invalid(
                "crane_moves_per_hour",
                self.crane_moves_per_hour.to_string(),
                "单桥台时量必须 > 0",
            ));
        }
        if self.crane_count <= 0.0 {
            return Err(invalid(
                "crane_count",
                self.crane_count.to_string(),
                "岸桥数必须 > 0",
            ));
        }
        if self.clash_margin_days < 0 {
            return Err(invalid(
                "clash_margin_days",
                self.clash_margin_days.to_string(),
                "冲突排斥天数不得为负",
            ));
        }
        if self.splitter.small_volume_threshold >= self.splitter.medium_volume_threshold {
            return Err(invalid(
                "splitter.small_volume_threshold",
                self.splitter.small_volume_threshold.to_string(),
                "小票量阈值必须小于中票量阈值",
            ));
        }
        if self.splitter.small_volume_cluster_count == 0
            || self.splitter.medium_volume_cluster_count == 0
        {
            return Err(invalid(
                "splitter.cluster_count",
                "0".to_string(),
                "强制箱组数必须 > 0",
            ));
        }
        if self.yard.zones.is_empty() {
            return Err(invalid("yard.zones", "[]".to_string(), "分区列表不得为空"));
        }
        if self.yard.blocks_per_zone == 0 {
            return Err(invalid(
                "yard.blocks_per_zone",
                "0".to_string(),
                "每分区箱区数必须 > 0",
            ));
        }
        if self.yard.block_capacity_boxes() == 0 {
            return Err(invalid(
                "yard.slots_per_block",
                format!(
                    "{}x{}",
                    self.yard.slots_per_block, self.yard.boxes_per_slot
                ),
                "箱区容量必须 > 0",
            ));
        }
        Ok(())
    }
}
