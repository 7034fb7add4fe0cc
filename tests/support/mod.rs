//! Shared test support utilities for behaviour-driven suites.
//!
//! Exposes `StepCodes` for parsing code lists written in feature files and
//! `fixture_source` for a data source over the checked-in reference data.
pub mod codes;

use std::sync::Arc;

use camino::Utf8PathBuf;
use mercator_common::{DataSource, FileLoader};

/// Root of the checked-in reference data.
pub fn fixture_root() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/data")
}

/// A data source reading [`fixture_root`] from disk.
pub fn fixture_source() -> DataSource {
    DataSource::from_root(fixture_root(), Arc::new(FileLoader))
}
