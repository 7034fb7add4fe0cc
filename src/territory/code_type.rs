//! The parallel code spaces a territory can be identified in.

use std::fmt;
use std::str::FromStr;

use mercator_common::Error;

/// One of the identifier systems for a territory.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum TerritoryCodeType {
    /// ISO 3166-1 alpha-2 (`DE`). The hub every other ISO space maps through.
    Iso3166Alpha2,
    /// ISO 3166-1 alpha-3 (`DEU`).
    Iso3166Alpha3,
    /// ISO 3166-1 numeric (`276`).
    Iso3166Numeric,
    /// FIPS 10-4 (`GM`).
    Fips10,
    /// UN M.49 region codes (`150`), most of which have no ISO mapping.
    UnM49,
}

impl TerritoryCodeType {
    /// Every code space.
    pub const ALL: [Self; 5] = [
        Self::Iso3166Alpha2,
        Self::Iso3166Alpha3,
        Self::Iso3166Numeric,
        Self::Fips10,
        Self::UnM49,
    ];

    /// Order in which code spaces are tried when none is specified.
    pub const INFERENCE_ORDER: [Self; 5] = [
        Self::Iso3166Alpha2,
        Self::UnM49,
        Self::Iso3166Alpha3,
        Self::Iso3166Numeric,
        Self::Fips10,
    ];

    /// Stable name of the code space.
    ///
    /// # Examples
    ///
    /// ```
    /// use mercator::TerritoryCodeType;
    ///
    /// assert_eq!(TerritoryCodeType::Fips10.name(), "FIPS_10");
    /// assert_eq!("iso_3166_a3".parse::<TerritoryCodeType>(), Ok(TerritoryCodeType::Iso3166Alpha3));
    /// assert!("Bogus".parse::<TerritoryCodeType>().is_err());
    /// ```
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Iso3166Alpha2 => "ISO_3166_A2",
            Self::Iso3166Alpha3 => "ISO_3166_A3",
            Self::Iso3166Numeric => "ISO_3166_N",
            Self::Fips10 => "FIPS_10",
            Self::UnM49 => "UN_M49",
        }
    }

    /// Whether codes of this space are derived from alpha-2 via a cross map.
    #[must_use]
    pub const fn is_cross_mapped(self) -> bool {
        matches!(self, Self::Iso3166Alpha3 | Self::Iso3166Numeric | Self::Fips10)
    }
}

impl fmt::Display for TerritoryCodeType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Error returned when parsing an unknown code-space name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownCodeType(String);

impl From<UnknownCodeType> for Error {
    fn from(unknown: UnknownCodeType) -> Self {
        Self::InvalidCodeType {
            code_type: unknown.0,
        }
    }
}

impl fmt::Display for UnknownCodeType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "unsupported code type `{}`", self.0)
    }
}

impl std::error::Error for UnknownCodeType {}

impl FromStr for TerritoryCodeType {
    type Err = UnknownCodeType;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCodeType(trimmed.to_owned()))
    }
}
