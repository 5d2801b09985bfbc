// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! attrib - conversion attribution pipeline.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::path::{Path, PathBuf};

use attrib::{collect_journeys, export_report, run_pipeline};
use attrib_config::AttribConfig;
use attrib_core::AttribError;
use attrib_ihc::types::ScoringRequest;
use clap::{Parser, Subcommand};
use tracing::{error, info};

/// attrib - build customer journeys, score them, and report per channel.
#[derive(Parser, Debug)]
#[command(name = "attrib", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the whole pipeline: journeys, scoring, rollup, export.
    Run,
    /// Build journeys and print them in scoring-request form.
    Journeys {
        /// Write to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Export the stored channel report to CSV without rescoring.
    Export {
        /// Destination CSV; defaults to `report.output_path`.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => attrib_config::load_and_validate_path(path),
        None => attrib_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            attrib_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.pipeline.log_level);

    if let Err(e) = dispatch(cli.command, &config).await {
        error!(error = %e, "attrib failed");
        eprintln!("attrib: {e}");
        std::process::exit(1);
    }
}

async fn dispatch(command: Commands, config: &AttribConfig) -> Result<(), AttribError> {
    match command {
        Commands::Run => {
            let outcome = run_pipeline(config).await?;
            if let Some(path) = &outcome.report_path {
                info!(path = %path.display(), rows = outcome.report_rows, "report ready");
            }
        }
        Commands::Journeys { output } => {
            let journeys = collect_journeys(config).await?;
            let json = serde_json::to_string_pretty(&ScoringRequest::from_records(&journeys))
                .map_err(|e| AttribError::Internal(format!("failed to serialize journeys: {e}")))?;
            match output {
                Some(path) => write_output(&path, &json).await?,
                None => println!("{json}"),
            }
        }
        Commands::Export { output } => {
            let path = output.unwrap_or_else(|| PathBuf::from(&config.report.output_path));
            export_report(config, &path).await?;
        }
    }
    Ok(())
}

async fn write_output(path: &Path, content: &str) -> Result<(), AttribError> {
    tokio::fs::write(path, content)
        .await
        .map_err(|e| AttribError::Io {
            path: path.display().to_string(),
            source: Box::new(e),
        })
}

/// Initialize the tracing subscriber. `RUST_LOG` wins over `log_level`.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("attrib={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
