//! Behavioural properties of the mock service.
//!
//! Every test builds its own client with zero latency, so the suites are
//! independent of one another and of wall-clock time.

mod calendar_effects;
mod determinism;
mod generation_once;
mod query_pipeline;

use mock_backend::{MockClient, MockConfig, Record};
use mock_generator::{GenerationCache, GenerationContext, GeneratorError, TableGenerator, TableRegistry};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Client over the standard tables.
pub fn standard_client(seed: u64) -> MockClient {
    MockClient::new(MockConfig::instant().with_seed(seed)).unwrap()
}

/// Generator returning fixed rows and counting how often it runs.
pub struct CountingTable {
    pub name: &'static str,
    pub rows: Vec<Record>,
    pub calls: Arc<AtomicUsize>,
}

impl CountingTable {
    pub fn new(name: &'static str, rows: Vec<Record>) -> Self {
        Self {
            name,
            rows,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl TableGenerator for CountingTable {
    fn table(&self) -> &str {
        self.name
    }

    fn generate(&self, _ctx: &GenerationContext<'_>) -> Result<Vec<Record>, GeneratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.clone())
    }
}

/// Client over a single custom table.
pub fn client_with(table: CountingTable) -> MockClient {
    let registry = TableRegistry::builder()
        .register(Arc::new(table))
        .build()
        .unwrap();
    MockClient::with_parts(
        MockConfig::instant(),
        Arc::new(registry),
        Arc::new(GenerationCache::new()),
    )
}
