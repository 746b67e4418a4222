use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Upload could not be decoded. The in-progress record is left untouched.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse file. Please use valid JSON or CSV ({0})")]
    Json(String),
    #[error("Failed to parse file. JSON upload must be an object, found {0}")]
    NotAnObject(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    Missing,
    NotNumeric,
    NotFinite,
    Negative,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InvalidReason::Missing => "no value supplied",
            InvalidReason::NotNumeric => "not a number",
            InvalidReason::NotFinite => "not a finite number",
            InvalidReason::Negative => "negative value",
        })
    }
}

/// First gene of the panel whose value failed the domain constraints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid input for {gene} ({reason}). Please enter a non-negative number.")]
pub struct ValidationError {
    pub gene: &'static str,
    pub value: String,
    pub reason: InvalidReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("unknown field '{0}' (expected patient_id or one of the gene symbols)")]
    UnknownField(String),
    #[error("expected FIELD=VALUE, got '{0}'")]
    MissingValue(String),
}

/// Failures of a call against the scoring service or the report store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Service unreachable, or a non-success status without an actionable detail.
    #[error("{0}")]
    Transport(String),
    /// Non-success status carrying a `detail` message.
    #[error("{detail}")]
    Service { status: u16, detail: String },
    #[error("report {0} not found")]
    NotFound(String),
    #[error("unexpected response from service: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("an analysis is already in progress")]
    Busy,
    #[error("submission discarded: the session closed before the response arrived")]
    Unmounted,
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Outcome of validating and submitting a draft in one step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no export directory available; pass --out")]
    NoExportDir,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {message}", path.display())]
    Json { path: PathBuf, message: String },
    #[error("invalid value for {var}: '{value}'")]
    Env { var: &'static str, value: String },
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Everything the command-line front end can surface.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("service is not ready")]
    NotReady,
    #[error("failed to start runtime: {0}")]
    Runtime(std::io::Error),
    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}
