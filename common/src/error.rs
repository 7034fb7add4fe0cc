//! Error taxonomy shared by every Mercator crate.
//!
//! Loading failures and code-validation failures live in the same enum so that
//! callers can match on a single type regardless of which layer rejected the
//! request. Each variant carries the structured context needed to explain the
//! failure without re-reading the data files.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while loading reference tables or asserting codes.
#[derive(Debug, Error)]
pub enum Error {
    /// The concrete path computed by a provider does not exist.
    #[error("reference data not found at {path}")]
    NotFound {
        /// Path the provider attempted to read.
        path: Utf8PathBuf,
    },

    /// The path exists but cannot be read as a plain file.
    #[error("reference data at {path} is not valid: {reason}")]
    NotValid {
        /// Offending path or URI.
        path: Utf8PathBuf,
        /// Why the path was rejected.
        reason: String,
    },

    /// The bytes read for a URI are not a JSON object or array.
    #[error("invalid content for {uri}: {reason}")]
    InvalidContent {
        /// Logical URI of the table.
        uri: String,
        /// Parser or shape-check message.
        reason: String,
    },

    /// No registered provider accepts the requested condition.
    #[error("no provider available for {uri} under condition {condition}")]
    NoProviderAvailable {
        /// Logical URI that was requested.
        uri: String,
        /// Signature of the unmatched condition.
        condition: String,
    },

    /// A provider was registered for a partition that already has one.
    #[error("a provider for the {partition} partition is already registered")]
    DuplicateProvider {
        /// Partition key shared by both providers.
        partition: String,
    },

    /// A locale-partition request arrived without a locale.
    #[error("locale partition request for {uri} carries no locale")]
    MissingLocale {
        /// Logical URI that was requested.
        uri: String,
    },

    /// The code is absent from its canonical or cross-map table.
    #[error("invalid code `{code}` for {table}")]
    InvalidCode {
        /// Code supplied by the caller.
        code: String,
        /// Table or code space the code was checked against.
        table: String,
    },

    /// The caller asked for a code space that does not exist.
    #[error("unsupported code type `{code_type}`")]
    InvalidCodeType {
        /// Code-space name supplied by the caller.
        code_type: String,
    },

    /// The process-wide registry was queried before a source was installed.
    #[error("no data source has been installed in the registry")]
    SourceNotInstalled,

    /// An I/O operation failed after the path was validated.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an [`Error::InvalidCode`] from borrowed parts.
    #[must_use]
    pub fn invalid_code(code: &str, table: impl Into<String>) -> Self {
        Self::InvalidCode {
            code: code.to_owned(),
            table: table.into(),
        }
    }

    /// Whether the error reports a missing file rather than a broken one.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
