//! The data source: provider dispatch plus a process-lifetime cache.
//!
//! [`DataSource::load`] walks the registered providers in order and delegates
//! to the first one whose partition matches the [`Condition`]. Successful
//! results are memoised under `uri@signature`; a cache hit never touches the
//! providers. Failures are not cached, so a missing file is re-read on the next
//! request.
//!
//! The cache sits behind a mutex so a source can be shared between threads.
//! The lock is released while a provider reads, which means two threads
//! missing on the same key may both load it. Loads are idempotent, so the
//! first insert wins and the duplicate is discarded.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use camino::Utf8PathBuf;
use log::debug;
use serde::de::DeserializeOwned;

use crate::condition::Condition;
use crate::error::{Error, Result};
use crate::loader::Loader;
use crate::payload::Payload;
use crate::provider::{GeneralProvider, LocaleProvider, Provider};
use crate::registry::ProviderRegistry;

type TableKey = (String, TypeId);
type SharedTable = Arc<dyn Any + Send + Sync>;

#[derive(Default)]
struct Cache {
    payloads: HashMap<String, Payload>,
    tables: HashMap<TableKey, SharedTable>,
}

/// Ordered providers plus the payload and typed-table caches.
#[derive(Default)]
pub struct DataSource {
    providers: ProviderRegistry,
    cache: Mutex<Cache>,
}

impl DataSource {
    /// Create a source with no providers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source over an existing registry.
    #[must_use]
    pub fn with_providers(providers: ProviderRegistry) -> Self {
        Self {
            providers,
            cache: Mutex::default(),
        }
    }

    /// Create a source with the general and locale providers over `root`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use mercator_common::{DataSource, FileLoader, Partition};
    ///
    /// let source = DataSource::from_root("/srv/mercator", Arc::new(FileLoader));
    /// assert_eq!(
    ///     source.providers().partitions(),
    ///     vec![Partition::General, Partition::Locale]
    /// );
    /// ```
    #[must_use]
    pub fn from_root(root: impl Into<Utf8PathBuf>, loader: Arc<dyn Loader>) -> Self {
        let root = root.into();
        let mut providers = ProviderRegistry::new();
        providers.push(Box::new(GeneralProvider::new(root.clone(), Arc::clone(&loader))));
        providers.push(Box::new(LocaleProvider::new(root, loader)));
        Self::with_providers(providers)
    }

    /// Register another provider after the existing ones.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateProvider`] when the partition is taken.
    pub fn register(&mut self, provider: impl Provider + 'static) -> Result<()> {
        self.providers.add(Box::new(provider))
    }

    /// Registered providers.
    #[must_use]
    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    /// Load `uri` under `condition`, consulting the cache first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoProviderAvailable`] when no provider accepts the
    /// condition, and propagates provider failures unchanged.
    pub fn load(&self, uri: &str, condition: &Condition) -> Result<Payload> {
        let key = cache_key(uri, condition);

        if let Some(payload) = self.cache().payloads.get(&key) {
            debug!(target: "mercator_common::source", "cache hit for {key}");
            return Ok(payload.clone());
        }

        let provider =
            self.providers
                .accepting(condition)
                .ok_or_else(|| Error::NoProviderAvailable {
                    uri: uri.to_owned(),
                    condition: condition.signature(),
                })?;
        debug!(
            target: "mercator_common::source",
            "cache miss for {key}; delegating to the {} provider",
            provider.partition(),
        );
        let payload = provider.provide(uri, condition)?;

        Ok(self
            .cache()
            .payloads
            .entry(key)
            .or_insert(payload)
            .clone())
    }

    /// Load `uri` from the general partition.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_general(&self, uri: &str) -> Result<Payload> {
        self.load(uri, &Condition::general())
    }

    /// Load `uri` from the partition of `locale`.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_locale(&self, uri: &str, locale: &str) -> Result<Payload> {
        self.load(uri, &Condition::locale(locale))
    }

    /// Load `uri` and deserialise it into `T`, memoising the typed table.
    ///
    /// # Errors
    ///
    /// See [`Self::load`]; shape mismatches surface as
    /// [`Error::InvalidContent`].
    pub fn load_table<T>(&self, uri: &str, condition: &Condition) -> Result<Arc<T>>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        let key = (cache_key(uri, condition), TypeId::of::<T>());

        let cached = self.cache().tables.get(&key).cloned();
        if let Some(table) = cached.and_then(|shared| shared.downcast::<T>().ok()) {
            return Ok(table);
        }

        let table = Arc::new(self.load(uri, condition)?.deserialize::<T>()?);
        let shared: SharedTable = table.clone();
        self.cache().tables.entry(key).or_insert(shared);
        Ok(table)
    }

    /// Typed load from the general partition.
    ///
    /// # Errors
    ///
    /// See [`Self::load_table`].
    pub fn general_table<T>(&self, uri: &str) -> Result<Arc<T>>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        self.load_table(uri, &Condition::general())
    }

    /// Drop every cached payload and typed table.
    pub fn clear_cache(&self) {
        let mut cache = self.cache();
        cache.payloads.clear();
        cache.tables.clear();
        debug!(target: "mercator_common::source", "cache cleared");
    }

    /// Number of cached payloads.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache().payloads.len()
    }

    fn cache(&self) -> MutexGuard<'_, Cache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for DataSource {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("DataSource")
            .field("providers", &self.providers)
            .field("cached", &self.cached_len())
            .finish()
    }
}

fn cache_key(uri: &str, condition: &Condition) -> String {
    format!("{uri}@{}", condition.signature())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::MockLoader;
    use crate::testing::MemoryLoader;
    use std::collections::BTreeMap;

    fn mocked(loader: MockLoader) -> DataSource {
        DataSource::from_root("/data", Arc::new(loader))
    }

    #[test]
    fn repeated_loads_hit_the_provider_once() {
        let mut loader = MockLoader::new();
        loader
            .expect_read()
            .times(1)
            .returning(|_| Ok(br#"["en", "ru"]"#.to_vec()));
        let source = mocked(loader);

        let first = source
            .load_general("language.codes.json")
            .expect("first load");
        let second = source
            .load_general("language.codes.json")
            .expect("cached load");

        assert_eq!(first, second);
        assert_eq!(source.cached_len(), 1);
    }

    #[test]
    fn clearing_the_cache_forces_a_reload() {
        let mut loader = MockLoader::new();
        loader
            .expect_read()
            .times(2)
            .returning(|_| Ok(br#"["en"]"#.to_vec()));
        let source = mocked(loader);

        source.load_general("language.codes.json").expect("load");
        source.clear_cache();
        assert_eq!(source.cached_len(), 0);
        source.load_general("language.codes.json").expect("reload");
    }

    #[test]
    fn conditions_partition_the_cache() {
        let loader = Arc::new(MemoryLoader::new());
        loader.insert("/data/locales/fr/names.json", r#"{"DE": "Allemagne"}"#);
        loader.insert("/data/locales/de/names.json", r#"{"DE": "Deutschland"}"#);
        let source = DataSource::from_root("/data", loader.clone());

        let french = source.load_locale("names.json", "fr").expect("fr");
        let german = source.load_locale("names.json", "de").expect("de");

        assert_ne!(french, german);
        assert_eq!(source.cached_len(), 2);
        assert_eq!(loader.reads(), 2);
    }

    #[test]
    fn empty_source_has_no_provider() {
        let source = DataSource::new();

        let err = source
            .load_general("territory.codes.json")
            .expect_err("no providers registered");

        assert!(matches!(
            err,
            Error::NoProviderAvailable { ref uri, ref condition }
                if uri == "territory.codes.json" && condition == "general"
        ));
    }

    #[test]
    fn unmatched_condition_has_no_provider() {
        let mut source = DataSource::new();
        source
            .register(GeneralProvider::new("/data", Arc::new(MemoryLoader::new())))
            .expect("register general");

        let err = source
            .load_locale("names.json", "fr")
            .expect_err("no locale provider");

        assert!(matches!(err, Error::NoProviderAvailable { .. }));
    }

    #[test]
    fn failures_are_not_cached() {
        let loader = Arc::new(MemoryLoader::new());
        let source = DataSource::from_root("/data", loader.clone());

        assert!(source.load_general("absent.json").is_err());
        assert!(source.load_general("absent.json").is_err());

        assert_eq!(source.cached_len(), 0);
        assert_eq!(loader.reads(), 2);
    }

    #[test]
    fn typed_tables_are_memoised() {
        let loader = Arc::new(MemoryLoader::new());
        loader.insert("/data/general/names.json", r#"{"DE": "Germany"}"#);
        let source = DataSource::from_root("/data", loader.clone());

        let first: Arc<BTreeMap<String, String>> =
            source.general_table("names.json").expect("typed load");
        let second: Arc<BTreeMap<String, String>> =
            source.general_table("names.json").expect("typed hit");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.reads(), 1);
    }

    #[test]
    fn typed_shape_mismatch_is_invalid_content() {
        let loader = Arc::new(MemoryLoader::new());
        loader.insert("/data/general/names.json", r#"["DE"]"#);
        let source = DataSource::from_root("/data", loader);

        let outcome: Result<Arc<BTreeMap<String, String>>> = source.general_table("names.json");

        assert!(matches!(outcome, Err(Error::InvalidContent { .. })));
    }
}
