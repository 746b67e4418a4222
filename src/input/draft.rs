use crate::error::FieldError;
use crate::genes::{GENE_COUNT, GENE_SYMBOLS, KeyMatch, PATIENT_ID_KEY, gene_index, resolve_key};
use crate::input::FeatureUpload;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    PatientId,
    Gene(usize),
}

impl Field {
    pub fn parse(name: &str) -> Result<Self, FieldError> {
        match resolve_key(name) {
            Some(KeyMatch::Gene(idx)) => Ok(Field::Gene(idx)),
            Some(KeyMatch::PatientId) => Ok(Field::PatientId),
            None => Err(FieldError::UnknownField(name.trim().to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Field::PatientId => PATIENT_ID_KEY,
            Field::Gene(idx) => GENE_SYMBOLS[*idx],
        }
    }
}

/// Parses a manual edit written as `FIELD=VALUE`.
pub fn parse_assignment(raw: &str) -> Result<(Field, String), FieldError> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| FieldError::MissingValue(raw.to_string()))?;
    let field = Field::parse(name)?;
    Ok((field, value.trim().to_string()))
}

/// The in-progress form. Values stay textual until validation.
///
/// Only `apply_upload` and `apply_field_edit` mutate it; an upload never
/// clears fields it does not mention.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureDraft {
    patient_id: String,
    levels: [String; GENE_COUNT],
}

impl FeatureDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn level(&self, symbol: &str) -> Option<&str> {
        gene_index(symbol).map(|idx| self.levels[idx].as_str())
    }

    pub fn levels(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        GENE_SYMBOLS
            .iter()
            .zip(self.levels.iter())
            .map(|(sym, value)| (*sym, value.as_str()))
    }

    pub fn missing(&self) -> Vec<&'static str> {
        self.levels()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(sym, _)| sym)
            .collect()
    }

    pub fn apply_upload(&mut self, upload: FeatureUpload) {
        if let Some(id) = upload.patient_id {
            self.patient_id = id;
        }
        for (idx, value) in upload.levels {
            self.levels[idx] = value;
        }
    }

    pub fn apply_field_edit(&mut self, field: Field, value: impl Into<String>) {
        match field {
            Field::PatientId => self.patient_id = value.into(),
            Field::Gene(idx) => self.levels[idx] = value.into(),
        }
    }
}
