use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::SettingsLayer;
use crate::model::AnalysisMode;

#[derive(Debug, Parser)]
#[command(
    name = "biostrata",
    version,
    about = "Submit gene-expression panels for risk analysis and export stored reports"
)]
pub struct Cli {
    #[arg(long, global = true, help = "JSON settings file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Base URL of the scoring service")]
    pub api_url: Option<String>,

    #[arg(long, global = true, help = "Delay before each submission, in milliseconds")]
    pub warmup_ms: Option<u64>,

    #[arg(long, global = true, help = "Request timeout in seconds (0 = none)")]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn settings_layer(&self) -> SettingsLayer {
        SettingsLayer {
            api_url: self.api_url.clone(),
            warmup_ms: self.warmup_ms,
            request_timeout_secs: self.timeout_secs,
            export_dir: None,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build a feature record from uploads and edits, then submit it.
    Analyze(AnalyzeArgs),
    /// Browse and export stored analyses.
    Reports(ReportsArgs),
    /// Show scoring service status.
    Health,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    #[arg(long, help = "Feature file (.json, or delimited text); repeatable, applied in order")]
    pub input: Vec<PathBuf>,

    #[arg(long = "set", value_name = "FIELD=VALUE", help = "Manual edit applied after uploads (repeatable)")]
    pub set: Vec<String>,

    #[arg(long)]
    pub patient_id: Option<String>,

    #[arg(long, value_enum, default_value_t = ModeArg::Detailed)]
    pub mode: ModeArg,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ReportsArgs {
    #[command(subcommand)]
    pub command: ReportsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReportsCommand {
    List(ListArgs),
    Show(ShowArgs),
    Export(ExportArgs),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long, help = "Case-insensitive match on patient id or risk category")]
    pub search: Option<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: String,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    pub id: String,

    #[arg(long, help = "Output file, or directory for the default file name")]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Simple,
    Detailed,
}

impl From<ModeArg> for AnalysisMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Simple => AnalysisMode::Simple,
            ModeArg::Detailed => AnalysisMode::Detailed,
        }
    }
}
