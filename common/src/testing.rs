//! In-memory test doubles for the loading pipeline.
//!
//! [`MemoryLoader`] serves bytes from a map keyed by concrete path and counts
//! every read, which lets suites assert how often the cache let a request
//! through to the providers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::{Error, Result};
use crate::loader::Loader;

/// Loader that serves registered documents and counts reads.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    files: Mutex<HashMap<Utf8PathBuf, Vec<u8>>>,
    reads: AtomicUsize,
}

impl MemoryLoader {
    /// Create a loader with no documents.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `contents` for `path`.
    pub fn insert(&self, path: impl Into<Utf8PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), contents.into());
    }

    /// Number of reads attempted so far, including failed ones.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Loader for MemoryLoader {
    fn read(&self, path: &Utf8Path) -> Result<Vec<u8>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
            .ok_or_else(|| Error::NotFound {
                path: path.to_owned(),
            })
    }
}
