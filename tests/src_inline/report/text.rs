use super::*;

fn summary(id: &str, patient: Option<&str>, score: Option<f64>) -> ReportSummary {
    ReportSummary {
        analysis_id: id.to_string(),
        patient_id: patient.map(str::to_string),
        timestamp: "2025-01-02T10:00:00".to_string(),
        risk_category: "Moderate".to_string(),
        risk_score: score,
    }
}

#[test]
fn detailed_result_shows_score_and_interpretation() {
    let result = AnalysisResult {
        risk_category: "High".to_string(),
        risk_score: Some(0.82),
        explanation: Some("Hypoxia markers elevated.".to_string()),
        disclaimer: Some("Research use only.".to_string()),
        analysis_id: None,
        timestamp: None,
        patient_id: None,
    };

    let text = render_result(&result);

    assert!(text.contains("Category: High Risk [HIGH]"));
    assert!(text.contains("Probability Score: 82.0%"));
    assert!(text.contains("Clinical Interpretation\nHypoxia markers elevated."));
    assert!(text.contains("DISCLAIMER: Research use only."));
}

#[test]
fn simple_result_omits_score_and_uses_fixed_notice() {
    let result = AnalysisResult {
        risk_category: "Borderline".to_string(),
        risk_score: None,
        explanation: None,
        disclaimer: None,
        analysis_id: Some("a9".to_string()),
        timestamp: None,
        patient_id: Some("PT-9".to_string()),
    };

    let text = render_result(&result);

    assert!(text.contains("Category: Borderline Risk [unrated]"));
    assert!(!text.contains("Probability Score"));
    assert!(!text.contains("Clinical Interpretation"));
    assert!(text.contains("Analysis ID: a9"));
    assert!(text.contains(RESEARCH_NOTICE));
}

#[test]
fn report_list_has_one_row_per_report() {
    let a = summary("a1", Some("PT-1"), Some(0.5));
    let b = summary("a2", None, None);

    let text = render_report_list(&[&a, &b]);
    let rows: Vec<&str> = text.lines().collect();

    assert_eq!(rows.len(), 3);
    assert!(rows[0].starts_with("DATE"));
    assert!(rows[1].contains("PT-1") && rows[1].contains("50.0%") && rows[1].ends_with("a1"));
    assert!(rows[2].starts_with("2025-01-02 10:00:00") && rows[2].ends_with("a2"));
}

#[test]
fn empty_report_list_says_so() {
    assert_eq!(render_report_list(&[]), "No reports found.\n");
}

#[test]
fn report_detail_lists_metadata_before_risk() {
    let detail = ReportDetail {
        analysis_id: "a1".to_string(),
        patient_id: Some("PT-1".to_string()),
        timestamp: "not a date".to_string(),
        risk_category: "Low".to_string(),
        risk_score: Some(0.1),
        explanation: None,
        disclaimer: None,
    };

    let text = render_report_detail(&detail);

    let id_at = text.find("Analysis ID: a1").unwrap();
    let risk_at = text.find("Category: Low Risk [low]").unwrap();
    assert!(id_at < risk_at);
    assert!(text.contains("Date: not a date"));
    assert!(text.contains("Probability Score: 10.0%"));
}

#[test]
fn missing_report_line_is_neutral() {
    assert_eq!(render_not_found("a9"), "Report a9 not found.\n");
}

#[test]
fn health_line_reports_model_state() {
    let health = ServiceHealth {
        status: "ok".to_string(),
        model_loaded: Some(false),
    };
    assert_eq!(render_health(&health), "Service: ok\nModel: not loaded\n");
}

#[test]
fn panel_is_grouped_by_signature() {
    let mut draft = FeatureDraft::new();
    draft.apply_field_edit(crate::input::Field::parse("HIF1A").unwrap(), "1.5");
    draft.apply_field_edit(crate::input::Field::parse("CD274").unwrap(), " 0.2 ");

    let text = render_panel(&draft);
    let rows: Vec<&str> = text.lines().collect();

    assert_eq!(rows[0], "Patient ID: -");
    assert!(rows[1].starts_with("Hypoxia:") && rows[1].contains("HIF1A=1.5"));
    assert!(rows[2].starts_with("Glycolysis:") && rows[2].contains("HK2= "));
    assert!(rows[3].starts_with("Immune:") && rows[3].contains("CD274=0.2"));
}
