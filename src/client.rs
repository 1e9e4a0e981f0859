//! Service facade.

use crate::auth::Auth;
use crate::config::MockConfig;
use crate::rpc;
use crate::storage::Storage;
use mock_core::Response;
use mock_generator::{GenerationCache, RegistryError, TableRegistry};
use mock_query::{DataSource, Latency, QueryBuilder};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::info;

/// Drop-in stand-in for the remote data service's client.
///
/// Cloning is cheap and clones share the same generation cache.
#[derive(Debug, Clone)]
pub struct MockClient {
    source: DataSource,
    config: MockConfig,
}

impl MockClient {
    /// Client over the standard tables with a fresh cache seeded from `config`.
    pub fn new(config: MockConfig) -> Result<Self, RegistryError> {
        let cache = Arc::new(GenerationCache::with_seed(config.seed));
        Self::with_cache(config, cache)
    }

    /// Client over the standard tables sharing an existing cache.
    ///
    /// The cache's own seed decides the generated data; `config.seed` is not
    /// consulted.
    pub fn with_cache(config: MockConfig, cache: Arc<GenerationCache>) -> Result<Self, RegistryError> {
        let registry = Arc::new(TableRegistry::standard()?);
        Ok(Self::with_parts(config, registry, cache))
    }

    /// Client over a custom registry.
    pub fn with_parts(
        config: MockConfig,
        registry: Arc<TableRegistry>,
        cache: Arc<GenerationCache>,
    ) -> Self {
        info!(
            "Mock client ready: {} tables, seed {}, latency {:?}..{:?}",
            registry.table_names().len(),
            cache.seeds().base(),
            config.latency.min,
            config.latency.max
        );
        let source = DataSource::new(registry, cache, Latency::from(config.latency));
        Self { source, config }
    }

    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<GenerationCache> {
        self.source.cache()
    }

    pub fn registry(&self) -> &Arc<TableRegistry> {
        self.source.registry()
    }

    /// Start a query against `table`.
    pub fn from(&self, table: &str) -> QueryBuilder {
        self.source.from(table)
    }

    /// Namespaced access. Every schema sees the same tables.
    pub fn schema(&self, name: &str) -> SchemaClient<'_> {
        SchemaClient {
            client: self,
            name: name.to_string(),
        }
    }

    /// Call a named procedure after the simulated latency.
    pub async fn rpc(&self, name: &str, params: JsonValue) -> Response<JsonValue> {
        self.source.latency().sleep().await;
        rpc::call(name, &params)
    }

    pub fn auth(&self) -> Auth {
        Auth::new(self.source.latency())
    }

    pub fn storage(&self) -> Storage {
        Storage::new(self.source.latency())
    }

    /// Drop every cached snapshot so the next query regenerates.
    pub fn clear_cache(&self) {
        self.source.cache().clear();
    }

    /// Names of all queryable tables, sorted.
    pub fn table_names(&self) -> Vec<&str> {
        self.source.registry().table_names()
    }
}

/// Result of [`MockClient::schema`].
#[derive(Debug)]
pub struct SchemaClient<'a> {
    client: &'a MockClient,
    name: String,
}

impl SchemaClient<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn from(&self, table: &str) -> QueryBuilder {
        self.client.source.from_schema(&self.name, table)
    }

    pub async fn rpc(&self, name: &str, params: JsonValue) -> Response<JsonValue> {
        self.client.rpc(name, params).await
    }
}
