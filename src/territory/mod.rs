//! Territories: one identity spread across five code spaces.
//!
//! A [`Territory`] is asserted against `territory.codes.json` and then filled
//! in from the alpha-2 hub, so a territory built from `DEU`, `276` or `GM`
//! carries the same alpha-2 code as one built from `DE`. UN M.49 regions have
//! no ISO mapping and keep only their M.49 code.
//!
//! Hierarchy queries read `territory.containment.json` through the same data
//! source; see [`ContainmentGraph`] for the traversal rules.

mod code_type;
mod codes;
mod containment;

use std::fmt;

use mercator_common::{DataSource, Error, Result};

use crate::code::{CanonicalCode, asserted_code_with};
use crate::tables::{TERRITORY_ALIAS, TERRITORY_CODES, TERRITORY_CONTAINMENT};

pub use code_type::{TerritoryCodeType, UnknownCodeType};
pub use codes::TerritoryCodes;
pub use containment::ContainmentGraph;

/// A validated territory with every code it is known by.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Territory {
    origin: TerritoryCodeType,
    origin_code: String,
    alpha2: Option<String>,
    alpha3: Option<String>,
    numeric: Option<String>,
    fips10: Option<String>,
    un_m49: Option<String>,
}

impl Territory {
    /// Assert `code`, inferring its code space.
    ///
    /// Deprecated codes listed in `territory.alias.json` are replaced by their
    /// preferred successor before the code spaces are searched, alpha-2 first,
    /// then UN M.49, alpha-3, numeric and FIPS 10-4.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCode`] when no code space lists the code, and
    /// propagates failures loading the tables.
    pub fn new(source: &DataSource, code: &str) -> Result<Self> {
        asserted_code_with(
            source,
            code,
            Self::TABLE,
            Self::ALIASES,
            |candidate, codes: &TerritoryCodes| {
                codes
                    .infer(candidate)
                    .map(|(origin, found)| Self::from_table(codes, origin, found))
            },
        )
    }

    /// Assert `code` as a member of `code_type`.
    ///
    /// No alias substitution takes place: the code must appear in that code
    /// space as given, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCode`] naming the code space when the code is
    /// not listed there.
    pub fn with_code_type(
        source: &DataSource,
        code: &str,
        code_type: TerritoryCodeType,
    ) -> Result<Self> {
        asserted_code_with(
            source,
            code,
            Self::TABLE,
            None,
            |candidate, codes: &TerritoryCodes| {
                codes
                    .find(code_type, candidate)
                    .map(|found| Self::from_table(codes, code_type, found))
            },
        )
        .map_err(|err| match err {
            Error::InvalidCode { code, .. } => Error::InvalidCode {
                code,
                table: format!("{code_type} in {TERRITORY_CODES}"),
            },
            other => other,
        })
    }

    /// Assert `code` against a code space named by string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCodeType`] for an unknown code-space name
    /// before any table is read; otherwise as [`Territory::with_code_type`].
    pub fn parse_with_type(source: &DataSource, code: &str, code_type: &str) -> Result<Self> {
        let code_type = code_type.parse::<TerritoryCodeType>()?;
        Self::with_code_type(source, code, code_type)
    }

    fn from_table(codes: &TerritoryCodes, origin: TerritoryCodeType, code: &str) -> Self {
        let alpha2 = match origin {
            TerritoryCodeType::Iso3166Alpha2 => Some(code),
            TerritoryCodeType::UnM49 => None,
            cross_mapped => codes.alpha2_for(cross_mapped, code),
        };
        let field = |code_type: TerritoryCodeType| -> Option<String> {
            if code_type == origin {
                return Some(code.to_owned());
            }
            alpha2
                .and_then(|hub| codes.map_alpha2(code_type, hub))
                .map(str::to_owned)
        };

        Self {
            origin,
            origin_code: code.to_owned(),
            alpha2: field(TerritoryCodeType::Iso3166Alpha2),
            alpha3: field(TerritoryCodeType::Iso3166Alpha3),
            numeric: field(TerritoryCodeType::Iso3166Numeric),
            fips10: field(TerritoryCodeType::Fips10),
            un_m49: field(TerritoryCodeType::UnM49),
        }
    }

    /// The primary code: alpha-2 when known, else UN M.49, else the origin code.
    #[must_use]
    pub fn code(&self) -> &str {
        self.alpha2
            .as_deref()
            .or(self.un_m49.as_deref())
            .unwrap_or(&self.origin_code)
    }

    /// The code in `code_type`, if the territory has one there.
    #[must_use]
    pub fn code_by_type(&self, code_type: TerritoryCodeType) -> Option<&str> {
        match code_type {
            TerritoryCodeType::Iso3166Alpha2 => self.alpha2.as_deref(),
            TerritoryCodeType::Iso3166Alpha3 => self.alpha3.as_deref(),
            TerritoryCodeType::Iso3166Numeric => self.numeric.as_deref(),
            TerritoryCodeType::Fips10 => self.fips10.as_deref(),
            TerritoryCodeType::UnM49 => self.un_m49.as_deref(),
        }
    }

    /// The code space the territory was asserted in.
    #[must_use]
    pub const fn origin(&self) -> TerritoryCodeType {
        self.origin
    }

    /// The canonically-cased code the territory was asserted from.
    #[must_use]
    pub fn origin_code(&self) -> &str {
        &self.origin_code
    }

    /// Codes of the groups containing this territory.
    ///
    /// Without `expand` this is the nearest parent from the flat map, if any.
    /// With `expand` it is every ancestor, nearest first, in walk order rather
    /// than sorted.
    ///
    /// # Errors
    ///
    /// Propagates failures loading the containment table.
    pub fn parent_codes(&self, source: &DataSource, expand: bool) -> Result<Vec<String>> {
        let graph = containment(source)?;
        Ok(if expand {
            graph.ancestors(self.code())
        } else {
            graph.nearest_parents(self.code())
        })
    }

    /// Codes contained by this territory.
    ///
    /// Without `expand` this is the direct member list, groups included, in
    /// table order. With `expand` it is every leaf territory below, sorted.
    ///
    /// # Errors
    ///
    /// Propagates failures loading the containment table.
    pub fn children_codes(&self, source: &DataSource, expand: bool) -> Result<Vec<String>> {
        let graph = containment(source)?;
        Ok(if expand {
            graph.leaves(self.code())
        } else {
            graph.direct_children(self.code())
        })
    }

    /// Whether this territory groups other territories.
    ///
    /// # Errors
    ///
    /// Propagates failures loading the containment table.
    pub fn is_group(&self, source: &DataSource) -> Result<bool> {
        Ok(containment(source)?.is_group(self.code()))
    }

    /// Whether `other` lies anywhere below this territory.
    ///
    /// # Errors
    ///
    /// Propagates failures loading the containment table.
    pub fn contains(&self, source: &DataSource, other: &Self) -> Result<bool> {
        let ancestors = containment(source)?.ancestors(other.code());
        Ok(ancestors.iter().any(|ancestor| ancestor == self.code()))
    }
}

fn containment(source: &DataSource) -> Result<std::sync::Arc<ContainmentGraph>> {
    source.general_table::<ContainmentGraph>(TERRITORY_CONTAINMENT)
}

impl CanonicalCode for Territory {
    const TABLE: &'static str = TERRITORY_CODES;
    const ALIASES: Option<&'static str> = Some(TERRITORY_ALIAS);

    fn code(&self) -> &str {
        Self::code(self)
    }
}

impl fmt::Display for Territory {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.code())
    }
}
