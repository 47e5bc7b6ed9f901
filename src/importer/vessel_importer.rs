// ==========================================
// 集装箱堆场排位系统 - 船表导入器
// ==========================================
// 职责: 船舶清单 CSV → 校验通过的 VesselMaster 列表
// 红线: 字段级错误必须携带行号; 任何一行失败整批拒绝
// ==========================================

use crate::domain::types::Zone;
use crate::domain::vessel::VesselMaster;
use crate::importer::error::{ImportError, ImportResult};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::{info, warn};

// ===== 列名约定 =====
const COL_VESSEL_NAME: &str = "vessel_name";
const COL_TOTAL_BOXES: &str = "total_boxes";
const COL_CLUSTER_COUNT: &str = "cluster_count";
const COL_ETA: &str = "eta";
const COL_PREFERRED_ZONE: &str = "preferred_zone";

const ETA_FORMAT: &str = "%Y-%m-%d";

// ==========================================
// VesselImporter - 船表导入器
// ==========================================
pub struct VesselImporter;

impl VesselImporter {
    /// 读取并校验船舶清单 CSV
    ///
    /// # 行号约定
    /// 错误中的行号为数据行序号（表头后第一行记 1）
    pub fn import_from_csv<P: AsRef<Path>>(path: P) -> ImportResult<Vec<VesselMaster>> {
        let rows = read_csv_rows(path.as_ref())?;

        let mut vessels = Vec::with_capacity(rows.len());
        let mut seen_names: HashMap<String, usize> = HashMap::new();

        for (idx, row) in rows.iter().enumerate() {
            let row_no = idx + 1;

            let vessel_name = row
                .get(COL_VESSEL_NAME)
                .map(|s| s.trim())
                .unwrap_or_default();
            if vessel_name.is_empty() {
                return Err(ImportError::PrimaryKeyMissing(row_no));
            }
            if let Some(first_row) = seen_names.insert(vessel_name.to_string(), row_no) {
                return Err(ImportError::FieldMappingError {
                    row: row_no,
                    message: format!("船名 {} 与行 {} 重复", vessel_name, first_row),
                });
            }

            let total_boxes = parse_u32(row, row_no, COL_TOTAL_BOXES)?;
            if total_boxes == 0 {
                return Err(ImportError::ValueRangeError {
                    row: row_no,
                    field: COL_TOTAL_BOXES.to_string(),
                    value: 0,
                    min: 1,
                    max: i64::from(u32::MAX),
                });
            }

            let cluster_count = parse_u32(row, row_no, COL_CLUSTER_COUNT)?;
            if cluster_count == 0 {
                return Err(ImportError::ValueRangeError {
                    row: row_no,
                    field: COL_CLUSTER_COUNT.to_string(),
                    value: 0,
                    min: 1,
                    max: i64::from(u32::MAX),
                });
            }

            let eta_raw = row.get(COL_ETA).map(|s| s.trim()).unwrap_or_default();
            let eta = NaiveDate::parse_from_str(eta_raw, ETA_FORMAT).map_err(|_| {
                ImportError::DateFormatError {
                    row: row_no,
                    field: COL_ETA.to_string(),
                    value: eta_raw.to_string(),
                }
            })?;

            // 分区无法识别时回退默认偏好序首位, 不视为致命错误
            let zone_raw = row
                .get(COL_PREFERRED_ZONE)
                .map(|s| s.trim())
                .unwrap_or_default();
            let preferred_zone = match Zone::parse(zone_raw) {
                Some(zone) => zone,
                None => {
                    warn!(
                        row = row_no,
                        vessel = vessel_name,
                        zone = zone_raw,
                        "偏好分区无法识别, 回退默认偏好序"
                    );
                    crate::engine::preference::DEFAULT_ZONE_ORDER[0]
                }
            };

            vessels.push(VesselMaster::new(
                vessel_name,
                total_boxes,
                cluster_count,
                eta,
                preferred_zone,
            ));
        }

        info!(vessel_count = vessels.len(), "船表导入完成");
        Ok(vessels)
    }
}

/// 读取 CSV 为 表头→值 的行映射, 跳过全空行
pub(crate) fn read_csv_rows(path: &Path) -> ImportResult<Vec<HashMap<String, String>>> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    if let Some(ext) = path.extension() {
        if !ext.eq_ignore_ascii_case("csv") {
            return Err(ImportError::UnsupportedFormat(
                ext.to_string_lossy().to_string(),
            ));
        }
    }

    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // 允许行长度不一致
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row_map = HashMap::new();
        for (col_idx, value) in record.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                row_map.insert(header.clone(), value.trim().to_string());
            }
        }
        // 跳过完全空白的行
        if row_map.values().all(|v| v.is_empty()) {
            continue;
        }
        rows.push(row_map);
    }
    Ok(rows)
}

fn parse_u32(row: &HashMap<String, String>, row_no: usize, field: &str) -> ImportResult<u32> {
    let raw = row.get(field).map(|s| s.trim()).unwrap_or_default();
    raw.parse::<u32>()
        .map_err(|_| ImportError::TypeConversionError {
            row: row_no,
            field: field.to_string(),
            message: format!("无法解析为非负整数: {:?}", raw),
        })
}
