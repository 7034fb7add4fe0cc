//! Locales: a language with optional script and territory.
//!
//! Construction always attempts to fill a missing script or territory from
//! the likely-subtags table. Completion is best effort: when the table cannot
//! be loaded, or has no entry for the locale, a warning is logged and the
//! locale stays partial. Invalid codes supplied by the caller are still hard
//! errors.

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};
use mercator_common::{DataSource, Error, Payload, Result};
use unic_langid::LanguageIdentifier;

use crate::code::{Language, Script};
use crate::likely::{LikelySubtag, LikelySubtags, completion_keys};
use crate::tables::LIKELY_SUBTAGS;
use crate::territory::Territory;

const LOG_TARGET: &str = "mercator::locale";

/// A language, optionally qualified by script and territory.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Locale {
    language: Language,
    script: Option<Script>,
    territory: Option<Territory>,
}

impl Locale {
    /// Compose a locale, completing missing parts from likely subtags.
    ///
    /// Parts supplied by the caller are never replaced.
    #[must_use]
    pub fn new(
        source: &DataSource,
        language: Language,
        script: Option<Script>,
        territory: Option<Territory>,
    ) -> Self {
        let mut locale = Self {
            language,
            script,
            territory,
        };
        if !locale.is_complete() {
            locale.complete(source);
        }
        locale
    }

    /// Parse a tag such as `ru`, `zh-TW` or `rus_Cyrl_BLR`.
    ///
    /// Hyphens are treated as underscores. A tag listed verbatim in the
    /// likely-subtags table takes that entry's parts, which covers deprecated
    /// and macrolanguage forms the naive split would reject. Otherwise the tag
    /// is split into at most three parts; a four-letter second part is a
    /// script, anything else a territory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCode`] for empty parts and for parts that fail
    /// their own assertion, and propagates failures loading the code tables.
    pub fn from_string(source: &DataSource, tag: &str) -> Result<Self> {
        let normalised = tag.trim().replace('-', "_");

        if let Some(entry) = likely_table(source).and_then(|table| table.get(&normalised).cloned()) {
            debug!(
                target: LOG_TARGET,
                "`{normalised}` is listed in {LIKELY_SUBTAGS}; using `{}`",
                entry.to(),
            );
            return Self::from_likely(source, &entry);
        }

        let parts: Vec<&str> = normalised.splitn(3, '_').collect();
        if parts.iter().any(|part| part.is_empty()) {
            return Err(Error::invalid_code(tag, "locale tag"));
        }

        let (language, script, territory) = match parts.as_slice() {
            [language] => (*language, None, None),
            [language, second] if is_script_shaped(second) => (*language, Some(*second), None),
            [language, second] => (*language, None, Some(*second)),
            [language, script, territory, ..] => (*language, Some(*script), Some(*territory)),
            [] => return Err(Error::invalid_code(tag, "locale tag")),
        };

        let language = Language::new(source, language)?;
        let script = script.map(|code| Script::new(source, code)).transpose()?;
        let territory = territory
            .map(|code| Territory::new(source, code))
            .transpose()?;
        Ok(Self::new(source, language, script, territory))
    }

    fn from_likely(source: &DataSource, entry: &LikelySubtag) -> Result<Self> {
        let language = Language::new(source, &entry.language)?;
        let script = entry
            .script
            .as_deref()
            .map(|code| Script::new(source, code))
            .transpose()?;
        let territory = entry
            .territory
            .as_deref()
            .map(|code| Territory::new(source, code))
            .transpose()?;
        Ok(Self::new(source, language, script, territory))
    }

    fn complete(&mut self, source: &DataSource) {
        let Some(table) = likely_table(source) else {
            return;
        };
        if table.is_empty() {
            warn!(
                target: LOG_TARGET,
                "{LIKELY_SUBTAGS} has no entries; `{}` left incomplete",
                self.code(),
            );
            return;
        }

        let keys = completion_keys(
            self.language.as_str(),
            self.script.as_ref().map(Script::as_str),
            self.territory.as_ref().map(Territory::code),
        );
        let Some((key, entry)) = table.first_match(keys.iter().map(String::as_str)) else {
            warn!(
                target: LOG_TARGET,
                "no likely subtags for `{}` (tried {} against {} entries); locale left incomplete",
                self.code(),
                keys.join(", "),
                table.len(),
            );
            return;
        };
        debug!(target: LOG_TARGET, "completing `{}` from `{key}`", self.code());

        if self.script.is_none() {
            self.script = entry
                .script
                .as_deref()
                .and_then(|code| completion_part(Script::new(source, code), key));
        }
        if self.territory.is_none() {
            self.territory = entry
                .territory
                .as_deref()
                .and_then(|code| completion_part(Territory::new(source, code), key));
        }
    }

    /// The language.
    #[must_use]
    pub const fn language(&self) -> &Language {
        &self.language
    }

    /// The script, if known.
    #[must_use]
    pub const fn script(&self) -> Option<&Script> {
        self.script.as_ref()
    }

    /// The territory, if known.
    #[must_use]
    pub const fn territory(&self) -> Option<&Territory> {
        self.territory.as_ref()
    }

    /// Whether both script and territory are known.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.script.is_some() && self.territory.is_some()
    }

    /// `language[_Script][_TERRITORY]`, with only the parts present.
    #[must_use]
    pub fn code(&self) -> String {
        join(&[
            Some(self.language.as_str()),
            self.script.as_ref().map(Script::as_str),
            self.territory.as_ref().map(Territory::code),
        ])
    }

    /// Locale codes to try for per-locale data, most specific first.
    ///
    /// # Examples
    ///
    /// For `sr_Latn_RS` the chain is `sr_Latn_RS`, `sr_Latn`, `sr_RS`, `sr`.
    #[must_use]
    pub fn fallback_chain(&self) -> Vec<String> {
        let language = Some(self.language.as_str());
        let script = self.script.as_ref().map(Script::as_str);
        let territory = self.territory.as_ref().map(Territory::code);

        let mut chain: Vec<String> = Vec::with_capacity(4);
        for parts in [
            [language, script, territory],
            [language, script, None],
            [language, None, territory],
            [language, None, None],
        ] {
            let code = join(&parts);
            if !chain.contains(&code) {
                chain.push(code);
            }
        }
        chain
    }

    /// Convert to a BCP 47 language identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCode`] when a part cannot be expressed in
    /// BCP 47.
    pub fn to_language_identifier(&self) -> Result<LanguageIdentifier> {
        let tag = self.code().replace('_', "-");
        tag.parse::<LanguageIdentifier>()
            .map_err(|err| Error::invalid_code(&tag, format!("BCP 47 ({err})")))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.code())
    }
}

/// Load `uri` from the locale partition for the first locale in the
/// fallback chain that has it.
///
/// Returns `Ok(None)` when no locale in the chain provides the table.
///
/// # Errors
///
/// Propagates every failure other than [`Error::NotFound`].
pub fn load_localized(source: &DataSource, uri: &str, locale: &Locale) -> Result<Option<Payload>> {
    for code in locale.fallback_chain() {
        match source.load_locale(uri, &code) {
            Ok(payload) => return Ok(Some(payload)),
            Err(err) if err.is_not_found() => {
                debug!(target: LOG_TARGET, "{uri} not provided for `{code}`; falling back");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(None)
}

fn likely_table(source: &DataSource) -> Option<Arc<LikelySubtags>> {
    source
        .general_table::<LikelySubtags>(LIKELY_SUBTAGS)
        .inspect_err(|err| {
            warn!(
                target: LOG_TARGET,
                "likely subtags unavailable ({err}); locale completion skipped",
            );
        })
        .ok()
}

fn completion_part<T>(outcome: Result<T>, key: &str) -> Option<T> {
    outcome
        .inspect_err(|err| {
            warn!(
                target: LOG_TARGET,
                "likely subtags entry `{key}` is unusable ({err}); part left unset",
            );
        })
        .ok()
}

fn is_script_shaped(part: &str) -> bool {
    part.len() == 4 && part.chars().all(|ch| ch.is_ascii_alphabetic())
}

fn join(parts: &[Option<&str>]) -> String {
    parts.iter().flatten().copied().collect::<Vec<_>>().join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture_source;
    use rstest::rstest;

    #[rstest]
    #[case("ru", "ru_Cyrl_RU")]
    #[case("rus_Cyrl_BLR", "ru_Cyrl_BY")]
    #[case("zh-TW", "zh_Hant_TW")]
    #[case("zh_Hant", "zh_Hant_TW")]
    #[case("de_AT", "de_Latn_AT")]
    #[case("en_GB", "en_Latn_GB")]
    #[case("sr_Latn", "sr_Latn_RS")]
    #[case("sh", "sr_Latn_RS")]
    #[case("RU", "ru_Cyrl_RU")]
    fn parses_and_completes(#[case] tag: &str, #[case] expected: &str) {
        let source = fixture_source();

        let locale = Locale::from_string(&source, tag).expect("locale");

        assert_eq!(locale.code(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("ru__RU")]
    #[case("ru_")]
    fn empty_parts_are_invalid(#[case] tag: &str) {
        let source = fixture_source();

        let err = Locale::from_string(&source, tag).expect_err("empty part");

        assert!(matches!(err, Error::InvalidCode { .. }));
    }

    #[rstest]
    #[case("qq_RU")]
    #[case("ru_Qaaa")]
    #[case("ru_Cyrl_QQQ")]
    fn invalid_parts_are_hard_errors(#[case] tag: &str) {
        let source = fixture_source();

        assert!(matches!(
            Locale::from_string(&source, tag),
            Err(Error::InvalidCode { .. })
        ));
    }

    #[test]
    fn supplied_parts_are_kept() {
        let source = fixture_source();
        let language = Language::new(&source, "sr").expect("sr");
        let montenegro = Territory::new(&source, "ME").expect("ME");

        let locale = Locale::new(&source, language, None, Some(montenegro));

        assert_eq!(locale.code(), "sr_Latn_ME");
    }

    #[test]
    fn missing_completion_leaves_the_locale_partial() {
        let source = fixture_source();
        let esperanto = Language::new(&source, "eo").expect("eo");

        let locale = Locale::new(&source, esperanto, None, None);

        assert_eq!(locale.code(), "eo");
        assert!(!locale.is_complete());
    }

    #[test]
    fn fallback_chain_runs_from_full_to_bare() {
        let source = fixture_source();

        let locale = Locale::from_string(&source, "ru").expect("ru");

        assert_eq!(locale.fallback_chain(), vec!["ru_Cyrl_RU", "ru_Cyrl", "ru_RU", "ru"]);
    }

    #[test]
    fn fallback_chain_of_a_partial_locale_is_deduplicated() {
        let source = fixture_source();
        let esperanto = Language::new(&source, "eo").expect("eo");

        let locale = Locale::new(&source, esperanto, None, None);

        assert_eq!(locale.fallback_chain(), vec!["eo"]);
    }

    #[test]
    fn converts_to_bcp47() {
        let source = fixture_source();

        let locale = Locale::from_string(&source, "zh_TW").expect("zh_TW");
        let identifier = locale.to_language_identifier().expect("BCP 47");

        assert_eq!(identifier.to_string(), "zh-Hant-TW");
    }
}
