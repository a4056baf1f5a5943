//! Error types for pedigree loading and inference.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a pedigree or running inference.
///
/// Every error is fatal to a run; the binary maps each kind to a stable
/// exit code with [`HeredityError::exit_code`].
#[derive(Debug, Error)]
pub enum HeredityError {
    /// Wrong invocation of the command line tool
    #[error("usage error: {0}")]
    Usage(String),

    /// The pedigree table is empty, incomplete or inconsistent
    #[error("failed to load pedigree: {0}")]
    Load(String),

    /// The pedigree file could not be opened
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Malformed CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Probability tables out of range
    #[error("invalid probability tables: {0}")]
    Tables(String),

    /// Probability tables file is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A posterior distribution has no probability mass to normalize
    #[error("inconsistent evidence: {0}")]
    DataInconsistency(String),
}

impl HeredityError {
    /// Process exit code for this error kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            Self::Load(_) | Self::Io { .. } | Self::Csv(_) => 3,
            Self::Tables(_) | Self::Json(_) => 4,
            Self::DataInconsistency(_) => 5,
        }
    }
}

/// Result type alias for heredity operations.
pub type Result<T> = std::result::Result<T, HeredityError>;
