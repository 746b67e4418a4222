use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};

use biostrata::cli::{AnalyzeArgs, Cli, Commands, ExportArgs, ListArgs, ReportsCommand, ShowArgs};
use biostrata::client::{
    AnalysisSubmitter, DetailPane, HttpTransport, ReportBrowser, ReportRepository,
};
use biostrata::config::Settings;
use biostrata::error::{AppError, ClientError};
use biostrata::input::{FeatureDraft, Field, parse_assignment, read_upload};
use biostrata::model::ReportDetail;
use biostrata::{logging, report};

fn main() {
    logging::init_tracing();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let settings = Settings::load(cli.config.as_deref(), cli.settings_layer())?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(AppError::Runtime)?;
    runtime.block_on(dispatch(cli.command, &settings))
}

async fn dispatch(command: Commands, settings: &Settings) -> Result<(), AppError> {
    let transport = HttpTransport::new(&settings.api_url, settings.request_timeout())?;
    info!(api_url = %transport.base_url(), "service endpoint");
    match command {
        Commands::Analyze(args) => analyze(args, transport, settings).await,
        Commands::Reports(args) => match args.command {
            ReportsCommand::List(args) => list_reports(args, transport).await,
            ReportsCommand::Show(args) => show_report(args, transport).await,
            ReportsCommand::Export(args) => export_report(args, transport, settings).await,
        },
        Commands::Health => {
            let health = ReportRepository::new(transport).health().await?;
            print!("{}", report::text::render_health(&health));
            if health.is_ready() {
                Ok(())
            } else {
                Err(AppError::NotReady)
            }
        }
    }
}

/// Uploads first, in order, then `--patient-id`, then `--set` edits.
async fn build_draft(
    inputs: &[PathBuf],
    patient_id: Option<&str>,
    edits: &[String],
) -> Result<FeatureDraft, AppError> {
    let mut draft = FeatureDraft::new();
    for path in inputs {
        draft.apply_upload(read_upload(path).await?);
    }
    if let Some(id) = patient_id {
        draft.apply_field_edit(Field::PatientId, id);
    }
    for edit in edits {
        let (field, value) = parse_assignment(edit)?;
        draft.apply_field_edit(field, value);
    }
    Ok(draft)
}

async fn analyze(
    args: AnalyzeArgs,
    transport: HttpTransport,
    settings: &Settings,
) -> Result<(), AppError> {
    let draft = build_draft(&args.input, args.patient_id.as_deref(), &args.set).await?;
    let missing = draft.missing();
    if !missing.is_empty() {
        warn!(?missing, "genes without a value");
    }
    let submitter = AnalysisSubmitter::new(transport, settings.submit_policy());
    let result = submitter.submit_draft(&draft, args.mode.into()).await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", report::text::render_panel(&draft));
        print!("{}", report::text::render_result(&result));
    }
    Ok(())
}

async fn list_reports(args: ListArgs, transport: HttpTransport) -> Result<(), AppError> {
    let mut browser = ReportBrowser::new(ReportRepository::new(transport));
    browser.refresh().await?;
    browser.set_search(args.search.unwrap_or_default());
    let visible = browser.visible();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
    } else {
        print!("{}", report::text::render_report_list(&visible));
    }
    Ok(())
}

/// The loaded report, or `None` when the service does not know the id.
fn loaded_detail(pane: DetailPane) -> Result<Option<ReportDetail>, AppError> {
    match pane {
        DetailPane::Loaded(detail) => Ok(Some(detail)),
        DetailPane::NotFound(_) | DetailPane::Empty => Ok(None),
        DetailPane::Unavailable(message) => Err(ClientError::Transport(message).into()),
    }
}

async fn fetch_detail(
    id: &str,
    transport: HttpTransport,
) -> Result<Option<ReportDetail>, AppError> {
    let mut browser = ReportBrowser::new(ReportRepository::new(transport));
    let pane = browser.select(id).await.clone();
    let detail = loaded_detail(pane)?;
    if detail.is_none() {
        print!("{}", report::text::render_not_found(id));
    }
    Ok(detail)
}

async fn show_report(args: ShowArgs, transport: HttpTransport) -> Result<(), AppError> {
    let Some(detail) = fetch_detail(&args.id, transport).await? else {
        return Ok(());
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
    } else {
        print!("{}", report::text::render_report_detail(&detail));
    }
    Ok(())
}

async fn export_report(
    args: ExportArgs,
    transport: HttpTransport,
    settings: &Settings,
) -> Result<(), AppError> {
    let Some(detail) = fetch_detail(&args.id, transport).await? else {
        return Ok(());
    };
    let path = report::export_report(&detail, args.out.as_deref(), settings.export_dir.as_deref())?;
    println!("{}", path.display());
    Ok(())
}
