//! Code assertion against canonical tables.
//!
//! Every code entity follows the same routine: look the raw code up in the
//! entity's alias table (exact key) and substitute the preferred replacement,
//! then check the result against the canonical table. The default check is a
//! case-insensitive search over a list of codes that returns the table's own
//! casing. [`asserted_code_with`] swaps that check for a typed matcher so an
//! entity such as [`crate::Territory`] can return a composite record.

use std::collections::BTreeMap;

use log::debug;
use mercator_common::{DataSource, Error, Result};
use serde::de::DeserializeOwned;

use crate::tables::AliasEntry;

/// A short code validated against a canonical table.
pub trait CanonicalCode {
    /// URI of the table listing canonical codes.
    const TABLE: &'static str;

    /// URI of the alias table consulted before validation, if any.
    const ALIASES: Option<&'static str> = None;

    /// The canonical code.
    fn code(&self) -> &str;
}

/// Replace `code` with its preferred alias from `aliases`, if it has one.
///
/// Codes without an alias entry, or whose entry lists no replacement, are
/// returned unchanged.
///
/// # Errors
///
/// Propagates failures loading the alias table.
pub fn resolve_alias(source: &DataSource, aliases: &str, code: &str) -> Result<String> {
    let table = source.general_table::<BTreeMap<String, AliasEntry>>(aliases)?;

    match table.get(code).and_then(AliasEntry::preferred) {
        Some(replacement) => {
            debug!(
                target: "mercator::code",
                "substituting `{replacement}` for deprecated `{code}` via {aliases}",
            );
            Ok(replacement.to_owned())
        }
        None => Ok(code.to_owned()),
    }
}

/// Assert `code` against `table` after optional alias substitution.
///
/// Returns the canonically-cased entry from the table.
///
/// # Errors
///
/// Returns [`Error::InvalidCode`] when the code is not listed, and propagates
/// failures loading either table.
pub fn asserted_code(
    source: &DataSource,
    code: &str,
    table: &str,
    aliases: Option<&str>,
) -> Result<String> {
    asserted_code_with(source, code, table, aliases, |candidate, codes: &Vec<String>| {
        codes
            .iter()
            .find(|known| known.eq_ignore_ascii_case(candidate))
            .cloned()
    })
}

/// Assert `code` using a custom matcher over a typed table.
///
/// The matcher receives the alias-resolved code and the deserialised table.
/// `None` rejects the code; `Some` is returned verbatim.
///
/// # Errors
///
/// Returns [`Error::InvalidCode`] when the matcher rejects the code, and
/// propagates failures loading either table.
pub fn asserted_code_with<T, R, M>(
    source: &DataSource,
    code: &str,
    table: &str,
    aliases: Option<&str>,
    matcher: M,
) -> Result<R>
where
    T: DeserializeOwned + Send + Sync + 'static,
    M: FnOnce(&str, &T) -> Option<R>,
{
    let candidate = match aliases {
        Some(uri) => resolve_alias(source, uri, code)?,
        None => code.to_owned(),
    };
    let codes = source.general_table::<T>(table)?;

    matcher(&candidate, &codes).ok_or_else(|| Error::invalid_code(code, table))
}

/// Assert `code` for the entity type `C`.
///
/// # Errors
///
/// See [`asserted_code`].
pub fn assert_for<C: CanonicalCode>(source: &DataSource, code: &str) -> Result<String> {
    asserted_code(source, code, C::TABLE, C::ALIASES)
}
