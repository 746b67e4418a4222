pub mod reports;
pub mod submit;
pub mod transport;

pub use reports::{DetailPane, ReportBrowser, ReportRepository, filter_reports};
pub use submit::{AnalysisSubmitter, PredictRequest, SubmissionState, SubmitPolicy};
pub use transport::{HttpReply, HttpTransport, Transport};

#[cfg(test)]
#[path = "../../tests/src_inline/client/stub.rs"]
pub(crate) mod stub;
