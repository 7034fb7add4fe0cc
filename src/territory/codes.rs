//! The territory code table: two code lists and three alpha-2 cross maps.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::TerritoryCodeType;

/// Deserialised `territory.codes.json`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct TerritoryCodes {
    /// ISO 3166-1 alpha-2 codes, including CLDR groupings such as `EU`.
    #[serde(rename = "iso3166Alpha2", default)]
    pub alpha2: Vec<String>,
    /// UN M.49 region codes.
    #[serde(rename = "unM49", default)]
    pub un_m49: Vec<String>,
    /// Alpha-2 to alpha-3.
    #[serde(rename = "alpha2ToAlpha3", default)]
    pub alpha2_to_alpha3: BTreeMap<String, String>,
    /// Alpha-2 to ISO numeric.
    #[serde(rename = "alpha2ToNumeric", default)]
    pub alpha2_to_numeric: BTreeMap<String, String>,
    /// Alpha-2 to FIPS 10-4.
    #[serde(rename = "alpha2ToFips10", default)]
    pub alpha2_to_fips10: BTreeMap<String, String>,
}

impl TerritoryCodes {
    /// The alpha-2 cross map for `code_type`, if it has one.
    #[must_use]
    pub fn cross_map(&self, code_type: TerritoryCodeType) -> Option<&BTreeMap<String, String>> {
        match code_type {
            TerritoryCodeType::Iso3166Alpha3 => Some(&self.alpha2_to_alpha3),
            TerritoryCodeType::Iso3166Numeric => Some(&self.alpha2_to_numeric),
            TerritoryCodeType::Fips10 => Some(&self.alpha2_to_fips10),
            TerritoryCodeType::Iso3166Alpha2 | TerritoryCodeType::UnM49 => None,
        }
    }

    /// Canonically-cased `code` if it belongs to `code_type`.
    ///
    /// List-backed spaces are searched directly; cross-mapped spaces are
    /// searched through the values of their alpha-2 map.
    #[must_use]
    pub fn find(&self, code_type: TerritoryCodeType, code: &str) -> Option<&str> {
        let matches = |known: &&String| known.eq_ignore_ascii_case(code);
        let found = match code_type {
            TerritoryCodeType::Iso3166Alpha2 => self.alpha2.iter().find(matches),
            TerritoryCodeType::UnM49 => self.un_m49.iter().find(matches),
            other => self
                .cross_map(other)
                .and_then(|map| map.values().find(matches)),
        };
        found.map(String::as_str)
    }

    /// First code space, in inference order, that lists `code`.
    #[must_use]
    pub fn infer(&self, code: &str) -> Option<(TerritoryCodeType, &str)> {
        TerritoryCodeType::INFERENCE_ORDER
            .into_iter()
            .find_map(|code_type| self.find(code_type, code).map(|found| (code_type, found)))
    }

    /// Recover the alpha-2 hub code for a canonical `code` of `code_type`.
    #[must_use]
    pub fn alpha2_for(&self, code_type: TerritoryCodeType, code: &str) -> Option<&str> {
        match code_type {
            TerritoryCodeType::Iso3166Alpha2 => self.find(code_type, code),
            TerritoryCodeType::UnM49 => None,
            other => self.cross_map(other).and_then(|map| {
                map.iter()
                    .find(|(_, value)| value.as_str() == code)
                    .map(|(alpha2, _)| alpha2.as_str())
            }),
        }
    }

    /// Forward-map an alpha-2 code into `code_type`.
    #[must_use]
    pub fn map_alpha2(&self, code_type: TerritoryCodeType, alpha2: &str) -> Option<&str> {
        match code_type {
            TerritoryCodeType::Iso3166Alpha2 => self.find(code_type, alpha2),
            TerritoryCodeType::UnM49 => None,
            other => self
                .cross_map(other)
                .and_then(|map| map.get(alpha2))
                .map(String::as_str),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn codes() -> TerritoryCodes {
        let pairs = |entries: &[(&str, &str)]| -> BTreeMap<String, String> {
            entries
                .iter()
                .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
                .collect()
        };
        TerritoryCodes {
            alpha2: vec!["DE".to_owned(), "RS".to_owned(), "RU".to_owned()],
            un_m49: vec!["001".to_owned(), "150".to_owned()],
            alpha2_to_alpha3: pairs(&[("DE", "DEU"), ("RS", "SRB"), ("RU", "RUS")]),
            alpha2_to_numeric: pairs(&[("DE", "276"), ("RS", "688"), ("RU", "643")]),
            alpha2_to_fips10: pairs(&[("DE", "GM"), ("RS", "RI"), ("RU", "RS")]),
        }
    }

    #[rstest]
    #[case("DE", Some((TerritoryCodeType::Iso3166Alpha2, "DE")))]
    #[case("de", Some((TerritoryCodeType::Iso3166Alpha2, "DE")))]
    #[case("150", Some((TerritoryCodeType::UnM49, "150")))]
    #[case("deu", Some((TerritoryCodeType::Iso3166Alpha3, "DEU")))]
    #[case("276", Some((TerritoryCodeType::Iso3166Numeric, "276")))]
    #[case("GM", Some((TerritoryCodeType::Fips10, "GM")))]
    #[case("RS", Some((TerritoryCodeType::Iso3166Alpha2, "RS")))]
    #[case("Foo", None)]
    fn infers_in_priority_order(
        codes: TerritoryCodes,
        #[case] code: &str,
        #[case] expected: Option<(TerritoryCodeType, &str)>,
    ) {
        assert_eq!(codes.infer(code), expected);
    }

    #[rstest]
    #[case(TerritoryCodeType::Fips10, "RS", Some("RU"))]
    #[case(TerritoryCodeType::Iso3166Alpha3, "SRB", Some("RS"))]
    #[case(TerritoryCodeType::Iso3166Numeric, "643", Some("RU"))]
    #[case(TerritoryCodeType::UnM49, "150", None)]
    fn recovers_the_alpha2_hub(
        codes: TerritoryCodes,
        #[case] code_type: TerritoryCodeType,
        #[case] code: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(codes.alpha2_for(code_type, code), expected);
    }

    #[rstest]
    fn forward_maps_missing_entries_to_none(codes: TerritoryCodes) {
        assert_eq!(codes.map_alpha2(TerritoryCodeType::Fips10, "DE"), Some("GM"));
        assert_eq!(codes.map_alpha2(TerritoryCodeType::Fips10, "EU"), None);
        assert_eq!(codes.map_alpha2(TerritoryCodeType::UnM49, "DE"), None);
    }
}
