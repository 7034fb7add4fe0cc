//! Optional process-wide data source.
//!
//! Entities always take a `&DataSource`; nothing reads this registry
//! implicitly. It exists for binaries that want to build one source at
//! startup and reach it from distant call sites. Tests reset it between
//! cases.

use std::sync::{Arc, PoisonError, RwLock};

use log::debug;
use mercator_common::{DataSource, Error, Result};
use once_cell::sync::Lazy;

static INSTALLED: Lazy<RwLock<Option<Arc<DataSource>>>> = Lazy::new(|| RwLock::new(None));

/// Install `source` as the process-wide data source, replacing any other.
pub fn install(source: DataSource) {
    let replaced = INSTALLED
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .replace(Arc::new(source))
        .is_some();
    debug!(target: "mercator::registry", "installed data source (replaced: {replaced})");
}

/// The installed data source.
///
/// # Errors
///
/// Returns [`Error::SourceNotInstalled`] when nothing is installed.
pub fn current() -> Result<Arc<DataSource>> {
    INSTALLED
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .ok_or(Error::SourceNotInstalled)
}

/// Remove the installed data source.
pub fn reset() {
    INSTALLED
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take();
}
