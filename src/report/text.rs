use crate::genes::builtin_groups;
use crate::input::FeatureDraft;
use crate::model::{AnalysisResult, ReportDetail, ReportSummary, RiskTier, ServiceHealth};
use crate::report::layout::RESEARCH_NOTICE;
use crate::report::{format_percent, format_timestamp};

pub fn render_result(result: &AnalysisResult) -> String {
    let mut out = String::new();

    out.push_str("Analysis Result\n");
    out.push_str("===============\n\n");
    push_risk(&mut out, &result.risk_category, result.risk_score);
    if let Some(id) = &result.analysis_id {
        out.push_str(&format!("Analysis ID: {id}\n"));
    }
    if let Some(patient) = &result.patient_id {
        out.push_str(&format!("Patient ID: {patient}\n"));
    }
    if let Some(ts) = &result.timestamp {
        out.push_str(&format!("Date: {}\n", format_timestamp(ts)));
    }
    push_explanation(&mut out, result.explanation.as_deref());
    push_disclaimer(&mut out, result.disclaimer.as_deref());
    out
}

pub fn render_report_detail(detail: &ReportDetail) -> String {
    let mut out = String::new();

    out.push_str("BioStrata Analysis Report\n");
    out.push_str("=========================\n\n");
    out.push_str(&format!("Analysis ID: {}\n", detail.analysis_id));
    out.push_str(&format!("Date: {}\n", format_timestamp(&detail.timestamp)));
    if let Some(patient) = &detail.patient_id {
        out.push_str(&format!("Patient ID: {patient}\n"));
    }
    out.push('\n');
    push_risk(&mut out, &detail.risk_category, detail.risk_score);
    push_explanation(&mut out, detail.explanation.as_deref());
    push_disclaimer(&mut out, detail.disclaimer.as_deref());
    out
}

/// Submitted values grouped by signature. A gene shared by two signatures
/// appears under both.
pub fn render_panel(draft: &FeatureDraft) -> String {
    let mut out = String::new();
    let patient = draft.patient_id().trim();
    out.push_str(&format!(
        "Patient ID: {}\n",
        if patient.is_empty() { "-" } else { patient }
    ));
    for def in builtin_groups() {
        let values: Vec<String> = def
            .genes
            .iter()
            .map(|gene| format!("{gene}={}", draft.level(gene).unwrap_or("").trim()))
            .collect();
        out.push_str(&format!("{:<11} {}\n", format!("{}:", def.name), values.join(" ")));
    }
    out.push('\n');
    out
}

/// One row per report: date, patient, category, score, id.
pub fn render_report_list(reports: &[&ReportSummary]) -> String {
    if reports.is_empty() {
        return "No reports found.\n".to_string();
    }
    let mut out = String::new();
    out.push_str(&format!(
        "{:<19}  {:<16}  {:<12}  {:>7}  {}\n",
        "DATE", "PATIENT", "RISK", "SCORE", "ID"
    ));
    for report in reports {
        out.push_str(&format!(
            "{:<19}  {:<16}  {:<12}  {:>7}  {}\n",
            format_timestamp(&report.timestamp),
            report.patient_id.as_deref().unwrap_or("-"),
            report.risk_category,
            report.risk_score.map(format_percent).unwrap_or_else(|| "-".to_string()),
            report.analysis_id
        ));
    }
    out
}

pub fn render_not_found(id: &str) -> String {
    format!("Report {id} not found.\n")
}

pub fn render_health(health: &ServiceHealth) -> String {
    let model = match health.model_loaded {
        Some(true) => "loaded",
        Some(false) => "not loaded",
        None => "unknown",
    };
    format!("Service: {}\nModel: {model}\n", health.status)
}

fn push_risk(out: &mut String, category: &str, score: Option<f64>) {
    let tier = RiskTier::from_category(category);
    out.push_str(&format!("Category: {category} Risk {}\n", tier.marker()));
    if let Some(score) = score {
        out.push_str(&format!("Probability Score: {}\n", format_percent(score)));
    }
}

fn push_explanation(out: &mut String, explanation: Option<&str>) {
    if let Some(text) = explanation.filter(|t| !t.trim().is_empty()) {
        out.push_str("\nClinical Interpretation\n");
        out.push_str(text.trim_end());
        out.push('\n');
    }
}

fn push_disclaimer(out: &mut String, disclaimer: Option<&str>) {
    let notice = disclaimer
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(RESEARCH_NOTICE);
    out.push_str(&format!("\nDISCLAIMER: {notice}\n"));
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
