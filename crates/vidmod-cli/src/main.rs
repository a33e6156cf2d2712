//! vidmod: submit a video to the moderation service and show the verdict.
//!
//! Set VIDMOD_API_URL (or API_URL), or pass --api-url.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::watch;
use vidmod_api_client::AnalysisClient;
use vidmod_cli::{apply_api_url_override, init_tracing};
use vidmod_cli::render::{render_health, render_result, render_snapshot};
use vidmod_core::{ClientConfig, ErrorMetadata, FileCandidate, FileValidator, ValidationOutcome};
use vidmod_services::{format_file_size, SessionSnapshot, SessionState, WorkflowController};

#[derive(Parser)]
#[command(name = "vidmod", about = "Video content moderation client")]
struct Cli {
    /// Base URL of the analysis service (overrides VIDMOD_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a video and show its classification
    Analyze {
        /// Path to the video file
        file: PathBuf,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check whether a file would be accepted, without uploading it
    Check {
        /// Path to the file
        file: PathBuf,
    },
    /// Show service health and configured providers
    Health {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn load_candidate(path: &Path) -> anyhow::Result<FileCandidate> {
    FileCandidate::from_path(path).with_context(|| format!("Cannot read {}", path.display()))
}

/// Print the latest snapshot if it changed since the last call.
fn print_update(updates: &mut watch::Receiver<SessionSnapshot>, max_duration_secs: u64) {
    if !updates.has_changed().unwrap_or(false) {
        return;
    }
    if let Some(line) = render_snapshot(&updates.borrow_and_update(), max_duration_secs) {
        eprintln!("{}", line);
    }
}

async fn analyze(config: &ClientConfig, path: &Path, json: bool) -> anyhow::Result<bool> {
    let client = AnalysisClient::from_config(config)?;
    let mut controller = WorkflowController::from_config(Arc::new(client), config);
    let mut updates = controller.subscribe();
    let max_duration = config.max_video_duration_secs;

    let candidate = load_candidate(path)?;
    let outcome = controller.select_file(Some(candidate));
    print_update(&mut updates, max_duration);
    if !matches!(outcome, Some(ValidationOutcome::Accepted(_))) {
        return Ok(false);
    }

    let Some(pending) = controller.begin_submission() else {
        return Ok(false);
    };
    print_update(&mut updates, max_duration);

    let outcome = pending.run().await;
    let hint = outcome.result.as_ref().err().and_then(|err| err.suggested_action());
    controller.complete_submission(outcome);
    print_update(&mut updates, max_duration);
    if let Some(hint) = hint {
        eprintln!("Hint: {}", hint);
    }

    match controller.display_model() {
        Some(model) if json => print_json(&model)?,
        Some(model) => println!("{}", render_result(&model)),
        None => {}
    }

    Ok(controller.state() == SessionState::Completed)
}

fn check(config: &ClientConfig, path: &Path) -> anyhow::Result<bool> {
    let candidate = load_candidate(path)?;
    let validator = FileValidator::from_config(config);

    match validator.validate(Some(candidate)) {
        Some(ValidationOutcome::Accepted(file)) => {
            println!(
                "OK: {} ({}, {})",
                file.name(),
                file.media_type(),
                format_file_size(file.size())
            );
            Ok(true)
        }
        Some(ValidationOutcome::Rejected(err)) => {
            println!("Rejected: {}", err);
            if let Some(action) = err.suggested_action() {
                println!("Hint: {}", action);
            }
            Ok(false)
        }
        None => Ok(false),
    }
}

async fn health(config: &ClientConfig, json: bool) -> anyhow::Result<bool> {
    let client = AnalysisClient::from_config(config)?;
    let report = client
        .health()
        .await
        .with_context(|| format!("Health check against {} failed", client.base_url()))?;

    if json {
        print_json(&report)?;
    } else {
        println!("{}", render_health(&report));
    }

    Ok(report.is_healthy())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = ClientConfig::from_env().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        e.context("Invalid configuration. Check VIDMOD_API_URL and the upload limits")
    })?;
    let config = apply_api_url_override(config, cli.api_url)?;
    tracing::debug!(
        api_url = %config.api_url,
        max_upload_size_bytes = config.max_upload_size_bytes,
        request_timeout_secs = config.request_timeout_secs,
        "Configuration loaded"
    );

    let success = match cli.command {
        Commands::Analyze { file, json } => analyze(&config, &file, json).await?,
        Commands::Check { file } => check(&config, &file)?,
        Commands::Health { json } => health(&config, json).await?,
    };

    Ok(exit_code(success))
}
