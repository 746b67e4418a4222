use super::*;
use tempfile::TempDir;

fn detail(patient: Option<&str>) -> ReportDetail {
    ReportDetail {
        analysis_id: "a1".to_string(),
        patient_id: patient.map(str::to_string),
        timestamp: "2025-01-02T10:00:00.123456".to_string(),
        risk_category: "High".to_string(),
        risk_score: Some(0.82),
        explanation: Some("Hypoxia markers elevated.".to_string()),
        disclaimer: None,
    }
}

#[test]
fn percent_has_one_decimal() {
    assert_eq!(format_percent(0.82), "82.0%");
    assert_eq!(format_percent(0.0), "0.0%");
    assert_eq!(format_percent(1.0), "100.0%");
    assert_eq!(format_percent(0.1234), "12.3%");
}

#[test]
fn timestamps_are_normalized_when_parseable() {
    assert_eq!(
        format_timestamp("2025-01-02T10:00:00.123456"),
        "2025-01-02 10:00:00"
    );
    assert_eq!(format_timestamp("2025-01-02T10:00:00"), "2025-01-02 10:00:00");
    assert_eq!(format_timestamp("2025-01-02 10:00:00"), "2025-01-02 10:00:00");
    assert_eq!(format_timestamp("2025-01-02T10:00:00Z"), "2025-01-02 10:00:00");
    assert_eq!(
        format_timestamp("2025-01-02T10:00:00+02:00"),
        "2025-01-02 10:00:00"
    );
}

#[test]
fn unparseable_timestamp_is_kept_verbatim() {
    assert_eq!(format_timestamp("yesterday"), "yesterday");
    assert_eq!(format_timestamp(""), "");
}

#[test]
fn filename_uses_patient_or_placeholder() {
    assert_eq!(export_filename(Some("PT-1")), "BioStrata_Report_PT-1.pdf");
    assert_eq!(export_filename(None), "BioStrata_Report_v1.pdf");
    assert_eq!(export_filename(Some("   ")), "BioStrata_Report_v1.pdf");
    assert_eq!(
        export_filename(Some("ward 3/bed:7")),
        "BioStrata_Report_ward 3_bed_7.pdf"
    );
}

#[test]
fn export_path_resolution() {
    let dir = TempDir::new().unwrap();
    let record = detail(Some("PT-1"));

    let into_dir = resolve_export_path(&record, Some(dir.path()), None).unwrap();
    assert_eq!(into_dir, dir.path().join("BioStrata_Report_PT-1.pdf"));

    let explicit = dir.path().join("custom.pdf");
    assert_eq!(
        resolve_export_path(&record, Some(&explicit), None).unwrap(),
        explicit
    );

    let defaulted = resolve_export_path(&record, None, Some(dir.path())).unwrap();
    assert_eq!(defaulted, dir.path().join("BioStrata_Report_PT-1.pdf"));

    assert!(matches!(
        resolve_export_path(&record, None, None),
        Err(ExportError::NoExportDir)
    ));
}

#[test]
fn export_creates_missing_directories() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("exports").join("nested");

    let path = export_report(&detail(None), None, Some(&target)).unwrap();

    assert_eq!(path, target.join("BioStrata_Report_v1.pdf"));
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.4"));
    assert!(bytes.ends_with(b"%%EOF\n"));
}
