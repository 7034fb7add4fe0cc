//! Raw byte access for reference tables.
//!
//! A [`Loader`] turns a concrete path into bytes and nothing more; parsing and
//! partition rules belong to [`crate::payload`] and [`crate::provider`]. The
//! trait exists so tests can count reads or serve tables from memory.

use camino::Utf8Path;
use log::debug;

use crate::error::{Error, Result};

/// Reads the bytes stored at a concrete path.
#[cfg_attr(test, mockall::automock)]
pub trait Loader: Send + Sync {
    /// Read the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when nothing exists at `path`,
    /// [`Error::NotValid`] when the path is not a plain file, and
    /// [`Error::Io`] when the read itself fails.
    fn read(&self, path: &Utf8Path) -> Result<Vec<u8>>;
}

/// Loader backed by the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileLoader;

impl Loader for FileLoader {
    fn read(&self, path: &Utf8Path) -> Result<Vec<u8>> {
        if !path.exists() {
            return Err(Error::NotFound {
                path: path.to_owned(),
            });
        }

        if !path.is_file() {
            return Err(Error::NotValid {
                path: path.to_owned(),
                reason: "not a plain file".to_owned(),
            });
        }

        debug!(target: "mercator_common::loader", "reading {path}");
        Ok(std::fs::read(path)?)
    }
}
