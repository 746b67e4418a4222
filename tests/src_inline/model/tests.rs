use super::{AnalysisMode, AnalysisResult, ReportDetail, ReportSummary, RiskTier, ServiceHealth};

#[test]
fn test_mode_wire_names() {
    assert_eq!(serde_json::to_string(&AnalysisMode::Simple).unwrap(), "\"simple\"");
    assert_eq!(serde_json::to_string(&AnalysisMode::Detailed).unwrap(), "\"detailed\"");
    assert_eq!(AnalysisMode::default(), AnalysisMode::Detailed);
    let parsed: AnalysisMode = serde_json::from_str("\"simple\"").unwrap();
    assert_eq!(parsed, AnalysisMode::Simple);
    assert!(serde_json::from_str::<AnalysisMode>("\"verbose\"").is_err());
}

#[test]
fn test_simple_mode_result_without_score() {
    let body = r#"{"analysis_id":"a1","timestamp":"2024-03-01T10:00:00","risk_category":"Low","disclaimer":"For research use."}"#;
    let result: AnalysisResult = serde_json::from_str(body).unwrap();
    assert_eq!(result.risk_category, "Low");
    assert_eq!(result.risk_score, None);
    assert_eq!(result.explanation, None);
    assert_eq!(result.disclaimer.as_deref(), Some("For research use."));
}

#[test]
fn test_result_missing_disclaimer_decodes() {
    let result: AnalysisResult = serde_json::from_str(r#"{"risk_category":"High","risk_score":0.9}"#).unwrap();
    assert_eq!(result.disclaimer, None);
    assert_eq!(result.risk_score, Some(0.9));
}

#[test]
fn test_summary_with_null_patient() {
    let body = r#"[{"analysis_id":"x","patient_id":null,"timestamp":"t","risk_category":"Moderate","risk_score":0.5}]"#;
    let list: Vec<ReportSummary> = serde_json::from_str(body).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].patient_id, None);
}

#[test]
fn test_detail_optional_fields_default_to_none() {
    let body = r#"{"analysis_id":"id-1","patient_id":null,"timestamp":"2024-01-01T00:00:00","risk_category":"High","risk_score":0.7}"#;
    let detail: ReportDetail = serde_json::from_str(body).unwrap();
    assert_eq!(detail.patient_id, None);
    assert_eq!(detail.risk_score, Some(0.7));
    assert_eq!(detail.explanation, None);
    assert_eq!(detail.disclaimer, None);
}

#[test]
fn test_risk_tier_default_for_unknown() {
    assert_eq!(RiskTier::from_category("High"), RiskTier::High);
    assert_eq!(RiskTier::from_category(" moderate "), RiskTier::Moderate);
    assert_eq!(RiskTier::from_category("LOW"), RiskTier::Low);
    assert_eq!(RiskTier::from_category("Critical"), RiskTier::Unrecognized);
    assert_eq!(RiskTier::from_category(""), RiskTier::Unrecognized);
}

#[test]
fn test_health_readiness() {
    let ok: ServiceHealth = serde_json::from_str(r#"{"status":"ok","model_loaded":true}"#).unwrap();
    assert!(ok.is_ready());
    let root: ServiceHealth = serde_json::from_str(r#"{"status":"ok","message":"running"}"#).unwrap();
    assert!(!root.is_ready());
}
