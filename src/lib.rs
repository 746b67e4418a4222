//! Intake and reporting pipeline for gene-expression risk analyses.
//!
//! Uploads are decoded into a [`input::FeatureDraft`], validated into a
//! [`validate::FeatureVector`], submitted through [`client::AnalysisSubmitter`]
//! and later retrieved and exported through [`client::ReportRepository`] and
//! [`report::pdf`].

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod genes;
pub mod input;
pub mod logging;
pub mod model;
pub mod report;
pub mod validate;
