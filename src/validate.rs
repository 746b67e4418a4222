use tracing::warn;

use crate::error::{InvalidReason, ValidationError};
use crate::genes::{GENE_COUNT, GENE_SYMBOLS, gene_index};
use crate::input::FeatureDraft;

/// A draft that passed validation: every gene is a finite, non-negative number.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub patient_id: Option<String>,
    pub levels: [f64; GENE_COUNT],
}

impl FeatureVector {
    pub fn level(&self, symbol: &str) -> Option<f64> {
        gene_index(symbol).map(|idx| self.levels[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        GENE_SYMBOLS.iter().copied().zip(self.levels.iter().copied())
    }
}

/// Walks the panel in order and stops at the first invalid gene.
pub fn validate(draft: &FeatureDraft) -> Result<FeatureVector, ValidationError> {
    let mut levels = [0.0f64; GENE_COUNT];
    for (idx, (symbol, raw)) in draft.levels().enumerate() {
        levels[idx] = parse_level(symbol, raw).inspect_err(|err| {
            warn!(gene = err.gene, reason = %err.reason, "validation failed");
        })?;
    }
    Ok(FeatureVector {
        patient_id: normalize_patient_id(draft.patient_id()),
        levels,
    })
}

pub fn parse_level(symbol: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let text = raw.trim();
    let fail = |reason| ValidationError {
        gene: symbol,
        value: raw.to_string(),
        reason,
    };
    if text.is_empty() {
        return Err(fail(InvalidReason::Missing));
    }
    let value: f64 = text.parse().map_err(|_| fail(InvalidReason::NotNumeric))?;
    if !value.is_finite() {
        return Err(fail(InvalidReason::NotFinite));
    }
    if value < 0.0 {
        return Err(fail(InvalidReason::Negative));
    }
    // folds -0.0 into 0.0
    Ok(value + 0.0)
}

/// Empty ids mean "none supplied" and are sent as `null`.
pub fn normalize_patient_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/validate.rs"]
mod tests;
