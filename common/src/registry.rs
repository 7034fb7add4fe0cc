//! Ordered provider registry.

use crate::condition::{Condition, Partition};
use crate::error::{Error, Result};
use crate::provider::Provider;

/// Providers in registration order, keyed by partition.
///
/// At most one provider may be registered per partition, so a condition always
/// selects a single provider.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<Box<dyn Provider>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateProvider`] when the partition is taken.
    pub fn add(&mut self, provider: Box<dyn Provider>) -> Result<()> {
        let partition = provider.partition();
        if self.get(partition).is_some() {
            return Err(Error::DuplicateProvider {
                partition: partition.to_string(),
            });
        }

        self.providers.push(provider);
        Ok(())
    }

    /// Append a provider whose partition is known to be free.
    pub(crate) fn push(&mut self, provider: Box<dyn Provider>) {
        self.providers.push(provider);
    }

    /// Provider registered for `partition`.
    #[must_use]
    pub fn get(&self, partition: Partition) -> Option<&dyn Provider> {
        self.iter().find(|provider| provider.partition() == partition)
    }

    /// First provider, in registration order, that accepts `condition`.
    #[must_use]
    pub fn accepting(&self, condition: &Condition) -> Option<&dyn Provider> {
        self.iter().find(|provider| provider.accepts(condition))
    }

    /// Providers matching `predicate`, in registration order.
    pub fn filter<'a>(
        &'a self,
        predicate: impl Fn(&dyn Provider) -> bool + 'a,
    ) -> impl Iterator<Item = &'a dyn Provider> + 'a {
        self.iter().filter(move |provider| predicate(*provider))
    }

    /// Iterate over providers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Provider> + '_ {
        self.providers.iter().map(|provider| provider.as_ref())
    }

    /// Number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether no providers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Partitions served, in registration order.
    #[must_use]
    pub fn partitions(&self) -> Vec<Partition> {
        self.iter().map(|provider| provider.partition()).collect()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ProviderRegistry")
            .field("partitions", &self.partitions())
            .finish()
    }
}
