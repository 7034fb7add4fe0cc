//! Variant subtags.

use super::code_entity;
use crate::tables::VARIANT_CODES;

code_entity!(
    /// A registered variant subtag such as `fonipa` or `1901`.
    Variant,
    table = VARIANT_CODES,
    aliases = None
);
