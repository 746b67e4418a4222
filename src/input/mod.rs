use std::collections::BTreeMap;
use std::path::Path;

use tracing::info;

use crate::error::ParseError;
use crate::genes::{GENE_SYMBOLS, KeyMatch};

pub mod delimited;
pub mod draft;
pub mod json;

pub use draft::{FeatureDraft, Field, parse_assignment};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Delimited,
}

impl InputFormat {
    /// `.json` selects JSON; anything else is read as delimited text.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Delimited,
        }
    }
}

/// Recognized keys of one upload. Gene keys index into `GENE_SYMBOLS`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureUpload {
    pub patient_id: Option<String>,
    pub levels: BTreeMap<usize, String>,
}

impl FeatureUpload {
    pub fn set(&mut self, key: KeyMatch, value: String) {
        match key {
            KeyMatch::Gene(idx) => {
                self.levels.insert(idx, value);
            }
            KeyMatch::PatientId => self.patient_id = Some(value),
        }
    }

    pub fn get(&self, symbol: &str) -> Option<&str> {
        let idx = crate::genes::gene_index(symbol)?;
        self.levels.get(&idx).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.patient_id.is_none() && self.levels.is_empty()
    }

    pub fn gene_symbols(&self) -> Vec<&'static str> {
        self.levels.keys().map(|&idx| GENE_SYMBOLS[idx]).collect()
    }
}

pub fn parse_upload(text: &str, format: InputFormat) -> Result<FeatureUpload, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    match format {
        InputFormat::Json => json::parse_json(text),
        InputFormat::Delimited => Ok(delimited::parse_delimited(text)),
    }
}

pub async fn read_upload(path: &Path) -> Result<FeatureUpload, ParseError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let format = InputFormat::from_path(path);
    let upload = parse_upload(&text, format)?;
    info!(
        path = %path.display(),
        format = ?format,
        genes = ?upload.gene_symbols(),
        patient_id = upload.patient_id.is_some(),
        "upload parsed"
    );
    Ok(upload)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/parse.rs"]
mod tests;
