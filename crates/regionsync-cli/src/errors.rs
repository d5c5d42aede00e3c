//! Error types for the CLI runtime.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use regionsync_engine::RegionError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("cannot access {}: {source}", path.display())]
    Discover { path: PathBuf, source: io::Error },
    #[error("failed to read {}: {source}", path.display())]
    ReadSource { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", path.display())]
    WriteSource { path: PathBuf, source: io::Error },
    #[error("failed to process {}: {source}", path.display())]
    Region { path: PathBuf, source: RegionError },
    #[error("failed to serialise diagnostic: {0}")]
    SerialiseDiagnostic(serde_json::Error),
    #[error("failed to write output: {0}")]
    WriteOutput(#[from] io::Error),
}
