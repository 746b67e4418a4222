use crate::genes::defs::{GENE_SYMBOLS, PATIENT_ID_KEY};

/// A user-supplied key resolved against the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMatch {
    Gene(usize),
    PatientId,
}

pub fn resolve_key(raw: &str) -> Option<KeyMatch> {
    if let Some(idx) = gene_index(raw) {
        return Some(KeyMatch::Gene(idx));
    }
    if raw.trim().eq_ignore_ascii_case(PATIENT_ID_KEY) {
        return Some(KeyMatch::PatientId);
    }
    None
}

pub fn gene_index(raw: &str) -> Option<usize> {
    let sym = normalize_symbol(raw);
    GENE_SYMBOLS.iter().position(|known| *known == sym)
}

pub fn normalize_symbol(s: &str) -> String {
    s.trim().to_ascii_uppercase()
}
