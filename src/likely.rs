//! Likely-subtag completion data.
//!
//! `likely.subtags.json` maps an under-specified tag (`ru`, `zh_TW`,
//! `sr_ME`) to the most probable full `language_Script_TERRITORY` form. Keys
//! are matched exactly; callers normalise `-` to `_` before looking up.

use std::collections::BTreeMap;

use serde::Deserialize;

/// The completion recorded for one partial tag.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct LikelySubtag {
    /// Language subtag of the completed form.
    #[serde(rename = "locale", alias = "language")]
    pub language: String,
    /// Script subtag of the completed form.
    #[serde(default)]
    pub script: Option<String>,
    /// Territory subtag of the completed form.
    #[serde(default)]
    pub territory: Option<String>,
}

impl LikelySubtag {
    /// The completed tag, joining the parts that are present with `_`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mercator::LikelySubtag;
    ///
    /// let entry = LikelySubtag {
    ///     language: "ru".to_owned(),
    ///     script: Some("Cyrl".to_owned()),
    ///     territory: Some("RU".to_owned()),
    /// };
    /// assert_eq!(entry.to(), "ru_Cyrl_RU");
    /// ```
    #[must_use]
    pub fn to(&self) -> String {
        [
            Some(self.language.as_str()),
            self.script.as_deref(),
            self.territory.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join("_")
    }
}

/// Deserialised `likely.subtags.json`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(transparent)]
pub struct LikelySubtags(BTreeMap<String, LikelySubtag>);

impl LikelySubtags {
    /// The completion for `tag`, if one is recorded.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&LikelySubtag> {
        self.0.get(tag)
    }

    /// First completion found for `keys`, tried in order.
    #[must_use]
    pub fn first_match<'a, I>(&self, keys: I) -> Option<(&str, &LikelySubtag)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        keys.into_iter().find_map(|key| {
            self.0
                .get_key_value(key)
                .map(|(found, entry)| (found.as_str(), entry))
        })
    }

    /// Number of recorded completions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Lookup keys for completing a partial locale, most specific first.
///
/// A known territory yields `lang_TERR`, a known script `lang_Script`, and the
/// bare language is always tried last.
#[must_use]
pub fn completion_keys(language: &str, script: Option<&str>, territory: Option<&str>) -> Vec<String> {
    let mut keys = Vec::with_capacity(3);
    if let Some(territory) = territory {
        keys.push(format!("{language}_{territory}"));
    }
    if let Some(script) = script {
        keys.push(format!("{language}_{script}"));
    }
    keys.push(language.to_owned());
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn table() -> LikelySubtags {
        serde_json::from_str(
            r#"{
                "ru": {"locale": "ru", "script": "Cyrl", "territory": "RU"},
                "zh_TW": {"locale": "zh", "script": "Hant", "territory": "TW"},
                "zh": {"language": "zh", "script": "Hans", "territory": "CN"}
            }"#,
        )
        .expect("likely subtags parse")
    }

    #[rstest]
    #[case("zh", Some("TW"), None, vec!["zh_TW", "zh"])]
    #[case("zh", None, Some("Hant"), vec!["zh_Hant", "zh"])]
    #[case("zh", Some("TW"), Some("Hant"), vec!["zh_TW", "zh_Hant", "zh"])]
    #[case("ru", None, None, vec!["ru"])]
    fn keys_run_from_specific_to_bare(
        #[case] language: &str,
        #[case] territory: Option<&str>,
        #[case] script: Option<&str>,
        #[case] expected: Vec<&str>,
    ) {
        assert_eq!(completion_keys(language, script, territory), expected);
    }

    #[rstest]
    fn first_matching_key_wins(table: LikelySubtags) {
        let keys = completion_keys("zh", None, Some("TW"));

        let (key, entry) = table
            .first_match(keys.iter().map(String::as_str))
            .expect("zh_TW is listed");

        assert_eq!(key, "zh_TW");
        assert_eq!(entry.to(), "zh_Hant_TW");
    }

    #[rstest]
    fn accepts_language_as_the_subtag_field(table: LikelySubtags) {
        assert_eq!(table.get("zh").map(LikelySubtag::to), Some("zh_Hans_CN".to_owned()));
        assert_eq!(table.len(), 3);
    }

    #[rstest]
    fn unknown_keys_find_nothing(table: LikelySubtags) {
        assert!(table.first_match(["eo", "tlh"]).is_none());
    }
}
