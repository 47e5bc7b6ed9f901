// ==========================================
// 导入层集成测试
// ==========================================
// 职责: 船表/容量表 CSV → 领域对象 → 引擎可直接消费
// ==========================================

use container_yard_aps::domain::types::Zone;
use container_yard_aps::{
    ImportError, PlanningConfig, TimelineOrchestrator, VesselImporter, YardImporter,
};
use std::io::Write;
use tempfile::Builder;

fn csv_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

// ==========================================
// 测试1: 船表 + 容量表导入后直通引擎运行
// ==========================================
#[test]
fn test_imported_inputs_drive_full_run() {
    let manifest = csv_file(
        "vessel_name,total_boxes,cluster_count,eta,preferred_zone\n\
         KAPAL A,900,3,2025-01-25,A\n\
         KAPAL B,600,2,2025-01-25,B\n\
         KAPAL C,1200,2,2025-01-26,C\n",
    );
    let capacity_table = csv_file(
        "block_code,capacity_boxes\n\
         A01,1110\nA02,1110\nA03,1110\n\
         B01,1110\nB02,1110\n\
         C01,1110\nC02,1110\n",
    );

    let vessels = VesselImporter::import_from_csv(manifest.path()).unwrap();
    let yard = YardImporter::import_from_csv(capacity_table.path()).unwrap();
    assert_eq!(vessels.len(), 3);
    assert_eq!(yard.block_count(), 7);

    let result = TimelineOrchestrator::new(PlanningConfig::default())
        .run(vessels, yard, None)
        .unwrap();

    assert!(result.unfinished_vessels().is_empty());
    for report in result.cluster_reports() {
        assert_eq!(report.remaining_boxes, 0);
    }
}

// ==========================================
// 测试2: 行级错误整批拒绝
// ==========================================
#[test]
fn test_manifest_rejected_as_a_whole_on_row_error() {
    let manifest = csv_file(
        "vessel_name,total_boxes,cluster_count,eta,preferred_zone\n\
         KAPAL A,900,3,2025-01-25,A\n\
         KAPAL B,600,0,2025-01-25,B\n",
    );
    let err = VesselImporter::import_from_csv(manifest.path()).unwrap_err();
    assert!(matches!(
        err,
        ImportError::ValueRangeError { row: 2, .. }
    ));
}

// ==========================================
// 测试3: 未识别分区回退默认偏好, 不拒绝
// ==========================================
#[test]
fn test_unknown_zone_falls_back_to_default_order_head() {
    let manifest = csv_file(
        "vessel_name,total_boxes,cluster_count,eta,preferred_zone\n\
         KAPAL A,900,3,2025-01-25,Q7\n",
    );
    let vessels = VesselImporter::import_from_csv(manifest.path()).unwrap();
    assert_eq!(vessels[0].preferred_zone, Zone::A);
}

// ==========================================
// 测试4: 非 CSV 扩展名拒绝
// ==========================================
#[test]
fn test_non_csv_extension_rejected() {
    let mut file = Builder::new().suffix(".xlsx").tempfile().unwrap();
    write!(file, "vessel_name\nKAPAL A\n").unwrap();
    let err = VesselImporter::import_from_csv(file.path()).unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedFormat(_)));
}
