//! Error types for the `mercator` CLI.

use mercator::ConfigError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be read or no data root was found.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A lookup against the reference data failed.
    #[error(transparent)]
    Data(#[from] mercator::Error),

    /// Writing output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type alias using [`CliError`].
pub type Result<T> = std::result::Result<T, CliError>;
