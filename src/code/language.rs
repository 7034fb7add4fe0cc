//! Language codes.

use super::code_entity;
use crate::tables::{LANGUAGE_ALIAS, LANGUAGE_CODES};

code_entity!(
    /// A canonical language code such as `ru` or `zh`.
    ///
    /// Deprecated and overlong forms (`rus`, `ger`) are replaced through the
    /// language alias table before validation.
    Language,
    table = LANGUAGE_CODES,
    aliases = Some(LANGUAGE_ALIAS)
);
