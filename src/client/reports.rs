use tracing::{info, warn};

use super::transport::Transport;
use crate::error::ClientError;
use crate::model::{ReportDetail, ReportSummary, ServiceHealth};

pub const REPORTS_PATH: &str = "/reports";
pub const HEALTH_PATH: &str = "/health";

/// Read side of the stored analysis history.
pub struct ReportRepository<T> {
    transport: T,
}

impl<T: Transport> ReportRepository<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub async fn list_reports(&self) -> Result<Vec<ReportSummary>, ClientError> {
        let reply = self.transport.get(REPORTS_PATH).await?;
        if !reply.is_success() {
            return Err(reply.failure("Failed to fetch reports"));
        }
        let reports: Vec<ReportSummary> = reply.decode()?;
        info!(count = reports.len(), "reports listed");
        Ok(reports)
    }

    pub async fn get_report(&self, id: &str) -> Result<ReportDetail, ClientError> {
        let path = format!("{REPORTS_PATH}/{}", urlencoding::encode(id));
        let reply = self.transport.get(&path).await?;
        if reply.status == 404 {
            return Err(ClientError::NotFound(id.to_string()));
        }
        if !reply.is_success() {
            return Err(reply.failure("Failed to fetch report details"));
        }
        reply.decode()
    }

    pub async fn health(&self) -> Result<ServiceHealth, ClientError> {
        let reply = self.transport.get(HEALTH_PATH).await?;
        if !reply.is_success() {
            return Err(reply.failure("Service unavailable"));
        }
        reply.decode()
    }
}

/// Case-insensitive substring match on patient id or risk category.
/// An empty term keeps every report, in input order.
pub fn filter_reports<'a>(reports: &'a [ReportSummary], term: &str) -> Vec<&'a ReportSummary> {
    if term.is_empty() {
        return reports.iter().collect();
    }
    let needle = term.to_lowercase();
    reports
        .iter()
        .filter(|report| matches_term(report, &needle))
        .collect()
}

fn matches_term(report: &ReportSummary, needle: &str) -> bool {
    let patient = report
        .patient_id
        .as_deref()
        .is_some_and(|id| id.to_lowercase().contains(needle));
    patient || report.risk_category.to_lowercase().contains(needle)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailPane {
    #[default]
    Empty,
    Loaded(ReportDetail),
    NotFound(String),
    Unavailable(String),
}

/// History list with a search term and one selected report.
pub struct ReportBrowser<T> {
    repository: ReportRepository<T>,
    reports: Vec<ReportSummary>,
    term: String,
    detail: DetailPane,
}

impl<T: Transport> ReportBrowser<T> {
    pub fn new(repository: ReportRepository<T>) -> Self {
        Self {
            repository,
            reports: Vec::new(),
            term: String::new(),
            detail: DetailPane::Empty,
        }
    }

    /// Reloads the list. On failure the previous list is kept.
    pub async fn refresh(&mut self) -> Result<usize, ClientError> {
        let reports = self
            .repository
            .list_reports()
            .await
            .inspect_err(|err| warn!(error = %err, "report list unavailable"))?;
        self.reports = reports;
        Ok(self.reports.len())
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    pub fn search(&self) -> &str {
        &self.term
    }

    pub fn reports(&self) -> &[ReportSummary] {
        &self.reports
    }

    pub fn visible(&self) -> Vec<&ReportSummary> {
        filter_reports(&self.reports, &self.term)
    }

    pub async fn select(&mut self, id: &str) -> &DetailPane {
        self.detail = match self.repository.get_report(id).await {
            Ok(detail) => DetailPane::Loaded(detail),
            Err(ClientError::NotFound(id)) => DetailPane::NotFound(id),
            Err(err) => {
                warn!(id, error = %err, "report detail unavailable");
                DetailPane::Unavailable(err.to_string())
            }
        };
        &self.detail
    }

    pub fn detail(&self) -> &DetailPane {
        &self.detail
    }

    pub fn selected(&self) -> Option<&ReportDetail> {
        match &self.detail {
            DetailPane::Loaded(detail) => Some(detail),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/client/reports.rs"]
mod tests;
