//! `collector-bootstrap config`: apply and show the collector configuration.

use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::apply::{self, ApplyReport, BackupStatus};
use crate::application::services::config_service;

/// Installed agent properties file.
pub const DEFAULT_AGENT_CONF: &str = "/usr/local/logicmonitor/agent/conf/agent.conf";

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Merge the collector configuration into agent.conf
    Apply(ApplyArgs),
    /// Show the loaded configuration with sensitive values masked
    Show,
}

/// Arguments for `config apply`.
#[derive(Args)]
pub struct ApplyArgs {
    /// Properties file to update
    #[arg(long, env = "COLLECTOR_AGENT_CONF", default_value = DEFAULT_AGENT_CONF)]
    pub agent_conf: PathBuf,

    /// Collector index to use instead of the hostname ordinal
    #[arg(long, env = "COLLECTOR_DEBUG_INDEX")]
    pub debug_index: Option<usize>,

    /// Print the merged file to stdout without writing it
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the file cannot be updated.
pub async fn run(app: &AppContext, cmd: ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Apply(args) => apply_config(app, args).await,
        ConfigCommand::Show => show_config(app),
    }
}

async fn apply_config(app: &AppContext, args: ApplyArgs) -> Result<ExitCode> {
    let conf = config_service::load_config(&app.config_store)?;
    let masked = config_service::masked_config(&conf)?;
    tracing::debug!(configuration = %masked, "loaded configuration");

    let index = config_service::resolve_index(args.debug_index, &conf, &app.host)?;

    if args.dry_run {
        let merged = apply::preview(&app.fs, &args.agent_conf, &conf.agent_conf, index)?;
        std::io::stdout()
            .write_all(&merged)
            .context("cannot write preview to stdout")?;
        return Ok(ExitCode::SUCCESS);
    }

    let fs = app.fs;
    let path = args.agent_conf;
    let entries = conf.agent_conf;
    let report = tokio::task::spawn_blocking(move || apply::apply(&fs, &path, &entries, index))
        .await
        .context("apply task panicked")??;

    render_report(app, &report, index)?;
    Ok(ExitCode::SUCCESS)
}

fn render_report(app: &AppContext, report: &ApplyReport, index: usize) -> Result<()> {
    if app.is_json() {
        let backup = match &report.backup {
            BackupStatus::Created(_) => "created",
            BackupStatus::AlreadyPresent => "present",
            BackupStatus::NoSource => "none",
            BackupStatus::Failed(_) => "failed",
        };
        let doc = serde_json::json!({
            "path": report.path.display().to_string(),
            "fresh": report.fresh,
            "entries": report.entries,
            "bytesWritten": report.bytes_written,
            "backup": backup,
            "index": index,
        });
        println!("{}", serde_json::to_string_pretty(&doc).context("cannot render report")?);
        return Ok(());
    }

    let ctx = &app.output;
    if report.fresh {
        ctx.info(&format!("Created {}", ctx.path(&report.path)));
    }
    match &report.backup {
        BackupStatus::Created(path) => ctx.info(&format!("Backup written to {}", ctx.path(path))),
        BackupStatus::Failed(reason) => ctx.warn(&format!("Backup skipped: {reason}")),
        BackupStatus::AlreadyPresent | BackupStatus::NoSource => {}
    }
    ctx.success(&format!(
        "Applied {} setting(s) to {} (collector index {index})",
        report.entries,
        ctx.path(&report.path)
    ));
    Ok(())
}

fn show_config(app: &AppContext) -> Result<ExitCode> {
    let conf = config_service::load_config(&app.config_store)?;
    let masked = config_service::masked_config(&conf)?;

    if app.is_json() {
        println!("{}", serde_json::to_string_pretty(&masked).context("cannot render config")?);
        return Ok(ExitCode::SUCCESS);
    }

    let source = app.output.path(&app.config_store.path());
    app.output.header(&format!("Configuration: {source}"));
    print!("{}", serde_yaml::to_string(&masked).context("cannot render config")?);
    Ok(ExitCode::SUCCESS)
}
