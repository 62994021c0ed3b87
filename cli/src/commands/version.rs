//! Version command

use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use clap::Args;
use serde::Serialize;

use crate::app::AppContext;

/// Arguments for the version command.
#[derive(Args)]
pub struct VersionArgs {
    /// Print only the version number
    #[arg(long)]
    pub short: bool,
}

/// Build metadata embedded by `build.rs`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    pub version: &'static str,
    pub commit: &'static str,
    pub build_date_utc: String,
    pub build_date: String,
}

impl VersionInfo {
    /// Metadata for the running binary.
    #[must_use]
    pub fn current() -> Self {
        Self::from_parts(
            env!("CARGO_PKG_VERSION"),
            env!("COLLECTOR_GIT_COMMIT"),
            env!("COLLECTOR_BUILD_DATE"),
        )
    }

    /// Build from raw parts; an unparsable date reads `unknown`.
    #[must_use]
    pub fn from_parts(version: &'static str, commit: &'static str, date: &str) -> Self {
        let (build_date_utc, build_date) = match DateTime::parse_from_rfc3339(date) {
            Ok(parsed) => (
                parsed.with_timezone(&Utc).to_string(),
                parsed.with_timezone(&Local).to_string(),
            ),
            Err(_) => ("unknown".to_string(), "unknown".to_string()),
        };
        Self {
            version,
            commit,
            build_date_utc,
            build_date,
        }
    }
}

/// Run the version command.
///
/// # Errors
///
/// Returns an error if the JSON rendering fails.
pub fn run(app: &AppContext, args: &VersionArgs) -> Result<ExitCode> {
    let info = VersionInfo::current();

    if args.short {
        println!("{}", info.version);
    } else if app.is_json() {
        println!("{}", serde_json::to_string(&info).context("cannot render version")?);
    } else {
        println!("collector-bootstrap {}", info.version);
        app.output.kv("commit    ", info.commit);
        app.output.kv("built     ", &info.build_date);
        app.output.kv("built UTC ", &info.build_date_utc);
    }
    Ok(ExitCode::SUCCESS)
}
