//! CLI error types.

use std::path::PathBuf;

use accel_pricing_core::PricingError;

/// Errors that can occur while running a command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// An input file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A usage file is not a valid usage document.
    #[error("invalid usage file {path}: {source}")]
    InvalidUsage {
        /// The usage file.
        path: PathBuf,
        /// The parse error.
        source: serde_json::Error,
    },

    /// Pricing error, such as a malformed price list.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Output could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Output could not be written.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
