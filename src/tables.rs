//! Logical URIs and row types for the general reference tables.
//!
//! The files are produced by the offline CLDR export and read through a
//! [`mercator_common::DataSource`]; this module only names them and describes
//! their shape.

use serde::Deserialize;

/// Canonical language codes (`["en", "ru", ...]`).
pub const LANGUAGE_CODES: &str = "language.codes.json";
/// Deprecated language codes and their replacements.
pub const LANGUAGE_ALIAS: &str = "language.alias.json";
/// Canonical script codes.
pub const SCRIPT_CODES: &str = "script.codes.json";
/// Canonical variant codes.
pub const VARIANT_CODES: &str = "variant.codes.json";
/// Territory code spaces and cross maps.
pub const TERRITORY_CODES: &str = "territory.codes.json";
/// Deprecated territory codes and their replacements.
pub const TERRITORY_ALIAS: &str = "territory.alias.json";
/// Territory containment forest plus the flat nearest-parent map.
pub const TERRITORY_CONTAINMENT: &str = "territory.containment.json";
/// Likely-subtag completions keyed by partial locale.
pub const LIKELY_SUBTAGS: &str = "likely.subtags.json";

/// Per-locale territory display names.
pub const TERRITORY_NAMES: &str = "territory.names.json";
/// Per-locale language display names.
pub const LANGUAGE_NAMES: &str = "language.names.json";
/// Per-locale script display names.
pub const SCRIPT_NAMES: &str = "script.names.json";

/// One row of an alias table.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct AliasEntry {
    /// Space-separated replacement codes, most preferred first.
    pub replacement: String,
    /// Why the code was deprecated (`deprecated`, `overlong`, ...).
    #[serde(default)]
    pub reason: Option<String>,
}

impl AliasEntry {
    /// The preferred replacement, if the entry lists any.
    #[must_use]
    pub fn preferred(&self) -> Option<&str> {
        self.replacement.split_whitespace().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("RU AM AZ BY", Some("RU"))]
    #[case("GB", Some("GB"))]
    #[case("  ", None)]
    #[case("", None)]
    fn preferred_is_the_first_token(#[case] replacement: &str, #[case] expected: Option<&str>) {
        let entry = AliasEntry {
            replacement: replacement.to_owned(),
            reason: Some("deprecated".to_owned()),
        };

        assert_eq!(entry.preferred(), expected);
    }
}
