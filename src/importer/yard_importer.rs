// ==========================================
// 集装箱堆场排位系统 - 堆场容量表导入器
// ==========================================
// 职责: 箱区容量 CSV → 空占用堆场
// 列: block_code, capacity_boxes
// ==========================================

use crate::domain::types::BlockId;
use crate::domain::yard::{Yard, YardBlock};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::vessel_importer::read_csv_rows;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

const COL_BLOCK_CODE: &str = "block_code";
const COL_CAPACITY_BOXES: &str = "capacity_boxes";

// ==========================================
// YardImporter - 容量表导入器
// ==========================================
pub struct YardImporter;

impl YardImporter {
    /// 读取并校验箱区容量表 CSV
    pub fn import_from_csv<P: AsRef<Path>>(path: P) -> ImportResult<Yard> {
        let rows = read_csv_rows(path.as_ref())?;

        let mut yard = Yard::new();
        let mut seen: HashMap<BlockId, usize> = HashMap::new();

        for (idx, row) in rows.iter().enumerate() {
            let row_no = idx + 1;

            let code_raw = row.get(COL_BLOCK_CODE).map(|s| s.trim()).unwrap_or_default();
            let block_id = BlockId::parse(code_raw).ok_or_else(|| {
                ImportError::FieldMappingError {
                    row: row_no,
                    message: format!("箱区编码无法识别: {:?}", code_raw),
                }
            })?;
            if let Some(first_row) = seen.insert(block_id, row_no) {
                return Err(ImportError::FieldMappingError {
                    row: row_no,
                    message: format!("箱区 {} 与行 {} 重复", block_id, first_row),
                });
            }

            let capacity_raw = row
                .get(COL_CAPACITY_BOXES)
                .map(|s| s.trim())
                .unwrap_or_default();
            let capacity: u32 =
                capacity_raw
                    .parse()
                    .map_err(|_| ImportError::TypeConversionError {
                        row: row_no,
                        field: COL_CAPACITY_BOXES.to_string(),
                        message: format!("无法解析为非负整数: {:?}", capacity_raw),
                    })?;
            if capacity == 0 {
                return Err(ImportError::ValueRangeError {
                    row: row_no,
                    field: COL_CAPACITY_BOXES.to_string(),
                    value: 0,
                    min: 1,
                    max: i64::from(u32::MAX),
                });
            }

            yard.insert_block(YardBlock::new(block_id, capacity));
        }

        info!(block_count = yard.block_count(), "堆场容量表导入完成");
        Ok(yard)
    }
}
