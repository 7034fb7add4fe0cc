//! Load conditions select the storage partition for a request.

use std::fmt;

/// Storage partition a provider serves.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Partition {
    /// Global tables shared by every locale (`<root>/general/`).
    General,
    /// Tables that exist once per locale (`<root>/locales/<locale>/`).
    Locale,
}

impl Partition {
    /// Static key used when matching providers against conditions.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Locale => "locale",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.key())
    }
}

/// Partition key plus the locale a locale-partition request targets.
///
/// # Examples
///
/// ```
/// use mercator_common::{Condition, Partition};
///
/// assert_eq!(Condition::general().signature(), "general");
/// let localised = Condition::locale("ru_Cyrl_RU");
/// assert_eq!(localised.partition(), Partition::Locale);
/// assert_eq!(localised.signature(), "locale:ru_Cyrl_RU");
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Condition {
    partition: Partition,
    locale: Option<String>,
}

impl Condition {
    /// Condition for the general partition.
    #[must_use]
    pub const fn general() -> Self {
        Self {
            partition: Partition::General,
            locale: None,
        }
    }

    /// Condition for the locale partition of `locale`.
    #[must_use]
    pub fn locale(locale: impl Into<String>) -> Self {
        Self {
            partition: Partition::Locale,
            locale: Some(locale.into()),
        }
    }

    /// Build a condition from raw parts.
    #[must_use]
    pub const fn new(partition: Partition, locale: Option<String>) -> Self {
        Self { partition, locale }
    }

    /// Partition key the condition selects.
    #[must_use]
    pub const fn partition(&self) -> Partition {
        self.partition
    }

    /// Locale carried by the condition, if any.
    #[must_use]
    pub fn locale_code(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Stable string identifying the condition inside cache keys.
    #[must_use]
    pub fn signature(&self) -> String {
        match &self.locale {
            Some(locale) => format!("{}:{locale}", self.partition),
            None => self.partition.key().to_owned(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.signature())
    }
}
