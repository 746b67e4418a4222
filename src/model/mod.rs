pub mod analysis;
pub mod health;
pub mod reports;
pub mod risk;

pub use analysis::{AnalysisMode, AnalysisResult};
pub use health::ServiceHealth;
pub use reports::{ReportDetail, ReportSummary};
pub use risk::RiskTier;

#[cfg(test)]
#[path = "../../tests/src_inline/model/tests.rs"]
mod tests;
