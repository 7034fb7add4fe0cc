//! Mercator resolves locale identities against CLDR-derived reference data.
//!
//! Codes for languages, scripts, variants and territories are validated
//! against canonical tables after deprecated aliases are substituted.
//! Territories carry every code space they are known by and answer
//! containment queries, and locales fill missing parts from likely-subtag
//! data. Every lookup goes through a [`DataSource`] supplied by the caller.
//!
//! ```no_run
//! use mercator::{Locale, MercatorConfig};
//!
//! let source = MercatorConfig::default().data_source(None)?;
//! let locale = Locale::from_string(&source, "ru")?;
//! assert_eq!(locale.code(), "ru_Cyrl_RU");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod code;
pub mod config;
pub mod likely;
pub mod locale;
pub mod names;
pub mod registry;
pub mod tables;
pub mod territory;

pub use code::{CanonicalCode, Language, Script, Variant};
pub use config::{ConfigError, DATA_ROOT_ENV, MercatorConfig};
pub use likely::{LikelySubtag, LikelySubtags};
pub use locale::{Locale, load_localized};
pub use mercator_common::{Condition, DataSource, Error, Partition, Result};
pub use names::DisplayNames;
pub use territory::{Territory, TerritoryCodeType};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use camino::Utf8PathBuf;
    use mercator_common::{DataSource, FileLoader};

    /// Root of the checked-in reference data used by unit tests.
    pub(crate) fn fixture_root() -> Utf8PathBuf {
        Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/data")
    }

    /// A data source over [`fixture_root`].
    pub(crate) fn fixture_source() -> DataSource {
        DataSource::from_root(fixture_root(), Arc::new(FileLoader))
    }
}
