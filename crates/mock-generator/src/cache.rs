//! Generation cache.
//!
//! Memoizes table snapshots by key for the lifetime of the cache. Each key is
//! backed by a settle-once slot that is inserted before generation starts, so
//! concurrent first requests for the same table wait on one generation instead
//! of racing to produce two.

use crate::error::GeneratorError;
use crate::sequence::SeedSequence;
use mock_core::{Record, Snapshot};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

type Slot = Arc<OnceLock<Result<Snapshot, GeneratorError>>>;

/// Process-wide (or test-local) store of generated tables.
#[derive(Debug, Default)]
pub struct GenerationCache {
    seeds: SeedSequence,
    slots: Mutex<HashMap<String, Slot>>,
    generations: AtomicUsize,
}

impl GenerationCache {
    /// Create an empty cache using the default base seed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache whose tables derive from the given base seed.
    pub fn with_seed(base_seed: u64) -> Self {
        Self {
            seeds: SeedSequence::new(base_seed),
            ..Self::default()
        }
    }

    /// Seed sequence shared by every generator run through this cache.
    pub fn seeds(&self) -> SeedSequence {
        self.seeds
    }

    /// Return the snapshot cached under `key`, generating it on first use.
    ///
    /// `generate` runs at most once per key per cache lifetime. Its result,
    /// including a failure, is what every later caller observes.
    pub fn get_or_generate<F>(&self, key: &str, generate: F) -> Result<Snapshot, GeneratorError>
    where
        F: FnOnce() -> Result<Vec<Record>, GeneratorError>,
    {
        let slot = {
            let mut slots = self.lock();
            Arc::clone(slots.entry(key.to_string()).or_default())
        };

        slot.get_or_init(|| {
            self.generations.fetch_add(1, Ordering::SeqCst);
            let result = generate().map(Snapshot::from);
            match &result {
                Ok(snapshot) => {
                    tracing::debug!(table = key, rows = snapshot.len(), "Generated table snapshot");
                }
                Err(e) => tracing::error!(table = key, "Table generation failed: {e}"),
            }
            result
        })
        .clone()
    }

    /// Cached snapshot for `key`, if it has been generated successfully.
    pub fn get(&self, key: &str) -> Option<Snapshot> {
        let slot = self.lock().get(key).cloned()?;
        slot.get().and_then(|result| result.as_ref().ok().cloned())
    }

    pub fn is_cached(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of keys with a slot (settled or in progress).
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total generator invocations over the cache lifetime, across clears.
    pub fn generation_count(&self) -> usize {
        self.generations.load(Ordering::SeqCst)
    }

    /// Drop every cached snapshot; the next access regenerates.
    pub fn clear(&self) {
        let mut slots = self.lock();
        tracing::debug!(tables = slots.len(), "Clearing generation cache");
        slots.clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
