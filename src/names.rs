//! Localised display names for territories, languages and scripts.

use std::collections::BTreeMap;
use std::sync::Arc;

use mercator_common::{Condition, DataSource, Result};

use crate::code::{Language, Script};
use crate::locale::Locale;
use crate::tables::{LANGUAGE_NAMES, SCRIPT_NAMES, TERRITORY_NAMES};
use crate::territory::Territory;

type NameTable = BTreeMap<String, String>;

/// Display names in one locale, resolved through its fallback chain.
///
/// Each lookup walks the chain independently, so a regional table that only
/// overrides a handful of names (`en_GB`) still falls back to the base
/// language for everything else.
#[derive(Debug)]
pub struct DisplayNames<'a> {
    source: &'a DataSource,
    locale: Locale,
}

impl<'a> DisplayNames<'a> {
    /// Names for `locale`, read from `source`.
    #[must_use]
    pub const fn new(source: &'a DataSource, locale: Locale) -> Self {
        Self { source, locale }
    }

    /// The locale names are given in.
    #[must_use]
    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Name of `territory`, looked up by its primary code.
    ///
    /// # Errors
    ///
    /// Propagates load failures other than a missing table.
    pub fn territory(&self, territory: &Territory) -> Result<Option<String>> {
        self.lookup(TERRITORY_NAMES, territory.code())
    }

    /// Name of `language`.
    ///
    /// # Errors
    ///
    /// Propagates load failures other than a missing table.
    pub fn language(&self, language: &Language) -> Result<Option<String>> {
        self.lookup(LANGUAGE_NAMES, language.as_str())
    }

    /// Name of `script`.
    ///
    /// # Errors
    ///
    /// Propagates load failures other than a missing table.
    pub fn script(&self, script: &Script) -> Result<Option<String>> {
        self.lookup(SCRIPT_NAMES, script.as_str())
    }

    fn lookup(&self, uri: &str, code: &str) -> Result<Option<String>> {
        for candidate in self.locale.fallback_chain() {
            let Some(names) = self.names_for(uri, &candidate)? else {
                continue;
            };
            if let Some(name) = names.get(code) {
                return Ok(Some(name.clone()));
            }
        }
        Ok(None)
    }

    fn names_for(&self, uri: &str, locale: &str) -> Result<Option<Arc<NameTable>>> {
        match self
            .source
            .load_table::<NameTable>(uri, &Condition::locale(locale))
        {
            Ok(names) => Ok(Some(names)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }
}
