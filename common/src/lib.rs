//! Reference-data access for Mercator.
//!
//! Tables are addressed by a logical URI plus a [`Condition`] naming the
//! partition (general or per-locale). A [`DataSource`] dispatches each request
//! to the first [`Provider`] serving that partition, the provider reads bytes
//! through a [`Loader`], and the bytes are validated into a [`Payload`].
//! Results are cached for the life of the source.

pub mod condition;
pub mod error;
pub mod loader;
pub mod payload;
pub mod provider;
pub mod registry;
pub mod source;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use condition::{Condition, Partition};
pub use error::{Error, Result};
pub use loader::{FileLoader, Loader};
pub use payload::Payload;
pub use provider::{GENERAL_DIR, GeneralProvider, LOCALES_DIR, LocaleProvider, Provider};
pub use registry::ProviderRegistry;
pub use source::DataSource;
