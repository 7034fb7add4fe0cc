//! Script codes.

use super::code_entity;
use crate::tables::SCRIPT_CODES;

code_entity!(
    /// A canonical ISO 15924 script code such as `Cyrl`.
    Script,
    table = SCRIPT_CODES,
    aliases = None
);
