pub mod defs;
pub mod mapping;

pub use defs::{GENE_COUNT, GENE_SYMBOLS, GeneGroup, PATIENT_ID_KEY, builtin_groups};
pub use mapping::{KeyMatch, gene_index, resolve_key};

#[cfg(test)]
#[path = "../../tests/src_inline/genes/tests.rs"]
mod tests;
