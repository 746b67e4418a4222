use std::path::{Path, PathBuf};

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::info;

use crate::error::ExportError;
use crate::model::ReportDetail;

pub mod layout;
pub mod metrics;
pub mod pdf;
pub mod text;

pub const FILENAME_PLACEHOLDER: &str = "v1";

/// Probability as a percentage with one decimal: `0.82` -> `82.0%`.
pub fn format_percent(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

/// `YYYY-MM-DD HH:MM:SS` when the timestamp parses, the raw text otherwise.
/// Offsets are kept as sent; no local-time conversion happens.
pub fn format_timestamp(raw: &str) -> String {
    let display = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let trimmed = raw.trim();
    if let Ok(parsed) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        if let Ok(text) = parsed.format(&display) {
            return text;
        }
    }
    let naive = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]"),
    ];
    for description in naive {
        if let Ok(parsed) = PrimitiveDateTime::parse(trimmed, description) {
            if let Ok(text) = parsed.format(&display) {
                return text;
            }
        }
    }
    raw.to_string()
}

/// `BioStrata_Report_<patient>.pdf`; characters unsafe in filenames become `_`.
pub fn export_filename(patient_id: Option<&str>) -> String {
    let stem = patient_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(sanitize_component)
        .unwrap_or_else(|| FILENAME_PLACEHOLDER.to_string());
    format!("BioStrata_Report_{stem}.pdf")
}

fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Where an export lands: an explicit file, a file inside an explicit
/// directory, or the default export directory.
pub fn resolve_export_path(
    detail: &ReportDetail,
    out: Option<&Path>,
    default_dir: Option<&Path>,
) -> Result<PathBuf, ExportError> {
    let filename = export_filename(detail.patient_id.as_deref());
    match out {
        Some(path) if path.is_dir() => Ok(path.join(filename)),
        Some(path) => Ok(path.to_path_buf()),
        None => default_dir
            .map(|dir| dir.join(&filename))
            .ok_or(ExportError::NoExportDir),
    }
}

/// Renders the report and writes it, creating parent directories as needed.
pub fn export_report(
    detail: &ReportDetail,
    out: Option<&Path>,
    default_dir: Option<&Path>,
) -> Result<PathBuf, ExportError> {
    let path = resolve_export_path(detail, out, default_dir)?;
    let io_err = |source| ExportError::Io {
        path: path.clone(),
        source,
    };
    let bytes = pdf::render_report(detail).map_err(io_err)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(&path, &bytes).map_err(io_err)?;
    info!(
        analysis_id = %detail.analysis_id,
        path = %path.display(),
        bytes = bytes.len(),
        "document written"
    );
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
