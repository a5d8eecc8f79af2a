//! Suite Error Types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or running the regression suite.
///
/// Mismatching output is NOT an error: it is recorded as a failed record
/// and the run continues. Everything here either aborts construction of a
/// record or propagates out of the run after the temp directory is removed.
#[derive(Debug, Error)]
pub enum SuiteError {
    // === Construction Errors ===
    #[error("Executable `{program}` not found under {binary_root} (searched {} locations)", .searched.len())]
    BinaryNotFound {
        program: String,
        binary_root: PathBuf,
        searched: Vec<PathBuf>,
    },

    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("Invalid {axis} value: {value}")]
    InvalidDimension { axis: &'static str, value: String },

    // === Execution Faults ===
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to prepare output {path}: {source}")]
    PrepareOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Temporary directory error: {0}")]
    TempDir(#[source] io::Error),

    // === Ambient ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to write report {path}: {reason}")]
    Report { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
