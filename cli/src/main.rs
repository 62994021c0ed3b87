//! collector-bootstrap - merge declarative collector configuration into agent.conf

use std::process::ExitCode;

use clap::Parser;
use collector_bootstrap::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
