// ==========================================
// 集装箱堆场排位系统 - 领域类型定义
// ==========================================
// 职责: 强类型键与状态枚举
// 红线: 箱区/箱组一律用类型键,不用裸字符串做 map key
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 堆场分区 (Zone)
// ==========================================
// 对应船舶泊位侧的箱区分组, 箱区编号以分区字母为前缀
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Zone {
    A, // 近泊位
    B, // 中部
    C, // 远端
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::A => write!(f, "A"),
            Zone::B => write!(f, "B"),
            Zone::C => write!(f, "C"),
        }
    }
}

impl Zone {
    /// 从字符串解析分区
    ///
    /// # 返回
    /// - `Some(Zone)`: 识别成功
    /// - `None`: 无法识别（调用方回退到默认偏好序）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "A" => Some(Zone::A),
            "B" => Some(Zone::B),
            "C" => Some(Zone::C),
            _ => None,
        }
    }

    /// 全部分区（固定顺序, 供布局构建与遍历使用）
    pub const ALL: [Zone; 3] = [Zone::A, Zone::B, Zone::C];
}

// ==========================================
// 箱区标识 (BlockId)
// ==========================================
// 分区字母 + 两位序号, 如 A01 / C05
// Ord 按 (zone, index) 派生, BTreeMap 遍历即为确定性排序
// 序列化为编码字符串, 可直接充当 JSON map key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId {
    pub zone: Zone,
    pub index: u8,
}

impl Serialize for BlockId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BlockId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        BlockId::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("非法箱区编码: {raw}")))
    }
}

impl BlockId {
    pub fn new(zone: Zone, index: u8) -> Self {
        Self { zone, index }
    }

    /// 从箱区编码解析, 如 "A01" / "b3"
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        let mut chars = code.chars();
        let zone = Zone::parse(&chars.next()?.to_string())?;
        let index: u8 = chars.as_str().parse().ok()?;
        if index == 0 {
            return None;
        }
        Some(Self { zone, index })
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}", self.zone, self.index)
    }
}

// ==========================================
// 箱组标识 (ClusterId)
// ==========================================
// 船名 + 箱组序号(1 起), 在一次运行内唯一
// 序列化为 "船名-C序号" 标签, 可直接充当 JSON map key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClusterId {
    pub vessel_name: String,
    pub seq: u32,
}

impl ClusterId {
    pub fn new(vessel_name: &str, seq: u32) -> Self {
        Self {
            vessel_name: vessel_name.to_string(),
            seq,
        }
    }

    /// 从标签解析, 如 "KAPAL A-C2"（按最后一个 "-C" 切分）
    pub fn parse(label: &str) -> Option<Self> {
        let (vessel_name, seq_raw) = label.rsplit_once("-C")?;
        if vessel_name.is_empty() {
            return None;
        }
        let seq: u32 = seq_raw.parse().ok()?;
        Some(Self {
            vessel_name: vessel_name.to_string(),
            seq,
        })
    }
}

impl Serialize for ClusterId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClusterId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ClusterId::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("非法箱组标签: {raw}")))
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-C{}", self.vessel_name, self.seq)
    }
}

// ==========================================
// 船舶生命周期阶段 (Vessel Phase)
// ==========================================
// 状态机: Upcoming → Receiving → Arrived → Loading → Finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VesselPhase {
    Upcoming,  // 未进入集港窗口
    Receiving, // 集港中
    Arrived,   // 到港当日
    Loading,   // 装船中
    Finished,  // 已完结
}

impl fmt::Display for VesselPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VesselPhase::Upcoming => write!(f, "UPCOMING"),
            VesselPhase::Receiving => write!(f, "RECEIVING"),
            VesselPhase::Arrived => write!(f, "ARRIVED"),
            VesselPhase::Loading => write!(f, "LOADING"),
            VesselPhase::Finished => write!(f, "FINISHED"),
        }
    }
}

// ==========================================
// 堆场事件类型 (Yard Event Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum YardEventKind {
    Receiving,      // 集港入场
    FinalReceiving, // 到港日补齐
    Loading,        // 装船出场
    Completion,     // 装船完结
}

impl YardEventKind {
    /// 转换为字符串标识
    pub fn as_str(&self) -> &'static str {
        match self {
            YardEventKind::Receiving => "RECEIVING",
            YardEventKind::FinalReceiving => "FINAL_RECEIVING",
            YardEventKind::Loading => "LOADING",
            YardEventKind::Completion => "COMPLETION",
        }
    }
}

impl fmt::Display for YardEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_parse() {
        assert_eq!(Zone::parse("A"), Some(Zone::A));
        assert_eq!(Zone::parse(" b "), Some(Zone::B));
        assert_eq!(Zone::parse("Z1"), None);
        assert_eq!(Zone::parse(""), None);
    }

    #[test]
    fn test_block_id_display_roundtrip() {
        let id = BlockId::new(Zone::A, 1);
        assert_eq!(id.to_string(), "A01");
        assert_eq!(BlockId::parse("A01"), Some(id));
        assert_eq!(BlockId::parse("c5"), Some(BlockId::new(Zone::C, 5)));
        assert_eq!(BlockId::parse("A00"), None);
        assert_eq!(BlockId::parse("D01"), None);
    }

    #[test]
    fn test_block_id_ordering() {
        // 同分区按序号, 跨分区按 A < B < C
        let mut ids = vec![
            BlockId::new(Zone::C, 1),
            BlockId::new(Zone::A, 2),
            BlockId::new(Zone::A, 1),
            BlockId::new(Zone::B, 5),
        ];
        ids.sort();
        let codes: Vec<String> = ids.iter().map(|b| b.to_string()).collect();
        assert_eq!(codes, vec!["A01", "A02", "B05", "C01"]);
    }

    #[test]
    fn test_cluster_id_display() {
        let id = ClusterId::new("MSC AURORA", 1);
        assert_eq!(id.to_string(), "MSC AURORA-C1");
    }

    #[test]
    fn test_cluster_id_parse_roundtrip() {
        let id = ClusterId::new("KAPAL A", 2);
        assert_eq!(ClusterId::parse(&id.to_string()), Some(id));
        assert_eq!(ClusterId::parse("KAPAL A"), None);
        assert_eq!(ClusterId::parse("-C1"), None);
        assert_eq!(ClusterId::parse("V1-Cx"), None);
    }

    #[test]
    fn test_typed_keys_serialize_as_strings() {
        let block = BlockId::new(Zone::B, 3);
        assert_eq!(serde_json::to_string(&block).unwrap(), "\"B03\"");
        let back: BlockId = serde_json::from_str("\"B03\"").unwrap();
        assert_eq!(back, block);

        let cluster = ClusterId::new("KAPAL A", 2);
        assert_eq!(serde_json::to_string(&cluster).unwrap(), "\"KAPAL A-C2\"");
        let back: ClusterId = serde_json::from_str("\"KAPAL A-C2\"").unwrap();
        assert_eq!(back, cluster);
    }

    #[test]
    fn test_event_kind_as_str() {
        assert_eq!(YardEventKind::FinalReceiving.as_str(), "FINAL_RECEIVING");
        assert_eq!(YardEventKind::Completion.to_string(), "COMPLETION");
    }
}
