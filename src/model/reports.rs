use serde::{Deserialize, Serialize};

/// One line of the analysis history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub analysis_id: String,
    #[serde(default)]
    pub patient_id: Option<String>,
    pub timestamp: String,
    pub risk_category: String,
    #[serde(default)]
    pub risk_score: Option<f64>,
}

/// Full stored analysis, fetched lazily per id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDetail {
    pub analysis_id: String,
    #[serde(default)]
    pub patient_id: Option<String>,
    pub timestamp: String,
    pub risk_category: String,
    #[serde(default)]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub disclaimer: Option<String>,
}
