//! Island builder binary.
//!
//! Builds the starting island once and writes its creation report as JSON.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `island-config.yaml` (defaults when absent)
//! 2. Initialize structured logging (tracing)
//! 3. Build the starting island
//! 4. Log the creation report
//! 5. Write the report to the configured path, or stdout
//! 6. Exit non-zero if the island is not ready

mod error;

use std::io::Write;
use std::path::Path;

use island_types::IslandCreationReport;
use island_world::config::{DEFAULT_CONFIG_FILE, OutputConfig};
use island_world::{IslandConfig, create_starting_island, log_creation_report};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::BuilderError;

/// Application entry point for the island builder.
///
/// # Errors
///
/// Returns an error if configuration, the build, or writing the report
/// fails, or if the finished island is not ready.
fn main() -> Result<(), BuilderError> {
    // 1. Load configuration.
    let config = IslandConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE))?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(
        world = ?config.geometry.world,
        island = ?config.geometry.island,
        spawn = %config.geometry.spawn,
        "island-builder starting"
    );

    // 3. Build the starting island.
    let world = create_starting_island(&config)?;

    // 4. Log the creation report.
    log_creation_report(&world.report);

    // 5. Write the report.
    write_report(&world.report, &config.output)?;

    // 6. Exit status follows the verdict.
    if world.report.is_ready() {
        Ok(())
    } else {
        Err(BuilderError::NotReady {
            blocking_issues: world.report.verdict.blocking_issues,
        })
    }
}

/// Serialize `report` and write it to the configured path, or stdout.
fn write_report(report: &IslandCreationReport, output: &OutputConfig) -> Result<(), BuilderError> {
    let mut json = if output.pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    json.push('\n');

    if let Some(path) = &output.report_path {
        std::fs::write(path, json)?;
        info!(path = %path.display(), "creation report written");
    } else {
        std::io::stdout().lock().write_all(json.as_bytes())?;
    }
    Ok(())
}
