//! Providers map logical URIs onto concrete paths within one partition.
//!
//! Each provider owns a data root and a [`Loader`]. The general provider reads
//! `<root>/general/<uri>` and the locale provider reads
//! `<root>/locales/<locale>/<uri>`. A provider accepts a request when the
//! condition's partition key equals its own; the [`crate::DataSource`] relies
//! on that check to pick exactly one provider per load.

use std::sync::Arc;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use log::debug;

use crate::condition::{Condition, Partition};
use crate::error::{Error, Result};
use crate::loader::Loader;
use crate::payload::Payload;

/// Directory under the data root holding the general partition.
pub const GENERAL_DIR: &str = "general";
/// Directory under the data root holding one sub-directory per locale.
pub const LOCALES_DIR: &str = "locales";

/// A source of payloads for one partition.
pub trait Provider: Send + Sync {
    /// Partition key this provider serves.
    fn partition(&self) -> Partition;

    /// Compute the concrete path for `uri` under `condition`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotValid`] for URIs that escape the partition and
    /// [`Error::MissingLocale`] when a locale is required but absent.
    fn resolve_path(&self, uri: &str, condition: &Condition) -> Result<Utf8PathBuf>;

    /// The loader used to read resolved paths.
    fn loader(&self) -> &dyn Loader;

    /// Whether this provider serves `condition`.
    fn accepts(&self, condition: &Condition) -> bool {
        condition.partition() == self.partition()
    }

    /// Resolve, read, and validate the table at `uri`.
    ///
    /// # Errors
    ///
    /// Propagates path, loader, and payload validation failures.
    fn provide(&self, uri: &str, condition: &Condition) -> Result<Payload> {
        let path = self.resolve_path(uri, condition)?;
        debug!(
            target: "mercator_common::provider",
            "{} provider loading {uri} from {path}",
            self.partition(),
        );
        let bytes = self.loader().read(&path)?;
        Payload::from_bytes(uri, bytes)
    }
}

/// Provider for the general partition.
#[derive(Clone)]
pub struct GeneralProvider {
    root: Utf8PathBuf,
    loader: Arc<dyn Loader>,
}

impl GeneralProvider {
    /// Create a provider rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>, loader: Arc<dyn Loader>) -> Self {
        Self {
            root: root.into(),
            loader,
        }
    }

    /// Data root the provider resolves against.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

impl Provider for GeneralProvider {
    fn partition(&self) -> Partition {
        Partition::General
    }

    fn resolve_path(&self, uri: &str, _condition: &Condition) -> Result<Utf8PathBuf> {
        let relative = checked_relative(uri)?;
        Ok(self.root.join(GENERAL_DIR).join(relative))
    }

    fn loader(&self) -> &dyn Loader {
        self.loader.as_ref()
    }
}

/// Provider for the per-locale partition.
#[derive(Clone)]
pub struct LocaleProvider {
    root: Utf8PathBuf,
    loader: Arc<dyn Loader>,
}

impl LocaleProvider {
    /// Create a provider rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>, loader: Arc<dyn Loader>) -> Self {
        Self {
            root: root.into(),
            loader,
        }
    }

    /// Data root the provider resolves against.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

impl Provider for LocaleProvider {
    fn partition(&self) -> Partition {
        Partition::Locale
    }

    fn resolve_path(&self, uri: &str, condition: &Condition) -> Result<Utf8PathBuf> {
        let locale = condition.locale_code().ok_or_else(|| Error::MissingLocale {
            uri: uri.to_owned(),
        })?;
        let locale_dir = checked_relative(locale)?;
        let relative = checked_relative(uri)?;
        Ok(self.root.join(LOCALES_DIR).join(locale_dir).join(relative))
    }

    fn loader(&self) -> &dyn Loader {
        self.loader.as_ref()
    }
}

/// Reject empty, absolute, or parent-escaping path fragments.
fn checked_relative(fragment: &str) -> Result<&Utf8Path> {
    let path = Utf8Path::new(fragment);
    let escapes = path
        .components()
        .any(|component| !matches!(component, Utf8Component::Normal(_)));

    if fragment.is_empty() || escapes {
        return Err(Error::NotValid {
            path: path.to_owned(),
            reason: "must be a non-empty relative path inside the partition".to_owned(),
        });
    }

    Ok(path)
}
