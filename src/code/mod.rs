//! Single-code entities: languages, scripts, and variants.
//!
//! Each entity wraps one canonical code and is only constructible through
//! [`canonical`] assertion, so holding a value proves the code was listed in
//! the reference data when it was built.

pub mod canonical;
mod language;
mod script;
mod variant;

pub use canonical::{CanonicalCode, asserted_code, asserted_code_with, resolve_alias};
pub use language::Language;
pub use script::Script;
pub use variant::Variant;

/// Declare a newtype over a canonical code with the shared accessors.
macro_rules! code_entity {
    ($(#[$meta:meta])* $name:ident, table = $table:expr, aliases = $aliases:expr) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub struct $name(String);

        impl $name {
            /// Validate `code` against the reference data.
            ///
            /// # Errors
            ///
            /// Returns [`mercator_common::Error::InvalidCode`] when the code is
            /// unknown after alias substitution, and propagates load failures.
            pub fn new(source: &mercator_common::DataSource, code: &str) -> mercator_common::Result<Self> {
                $crate::code::canonical::assert_for::<Self>(source, code).map(Self)
            }

            /// The canonical code as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the inner code.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl $crate::code::CanonicalCode for $name {
            const TABLE: &'static str = $table;
            const ALIASES: Option<&'static str> = $aliases;

            fn code(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter.write_str(&self.0)
            }
        }
    };
}

pub(crate) use code_entity;
