//! Synthetic data generation for the mock-backend data service.
//!
//! This crate produces every table the dashboards query. All values derive
//! from seeded, index-addressed randomness, so a cache built with the same
//! base seed always yields the same dataset.
//!
//! # Architecture
//!
//! ```text
//! SeedSequence ──┐
//!                ├──► TableGenerator (one per table) ──► Vec<Record>
//! DayProfile ────┘            │
//!                             │ declared dependencies
//!                             ▼
//!                ┌────────────────────────┐
//!                │     TableRegistry      │
//!                │  (validated, acyclic)  │
//!                └───────────┬────────────┘
//!                            ▼
//!                ┌────────────────────────┐
//!                │    GenerationCache     │
//!                │  key -> Snapshot once  │
//!                └────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use mock_generator::{GenerationCache, TableRegistry};
//!
//! let registry = TableRegistry::standard().unwrap();
//! let cache = GenerationCache::with_seed(42);
//!
//! let usage = registry.snapshot(&cache, "feature_usage").unwrap().unwrap();
//! assert!(!usage.is_empty());
//!
//! // The activity table it scales by was generated once and cached on the way.
//! assert!(cache.is_cached("daily_activity"));
//! ```

pub mod cache;
pub mod calendar;
pub mod error;
pub mod registry;
pub mod sequence;
pub mod tables;

// Re-exports for convenience
pub use cache::GenerationCache;
pub use calendar::{DayKind, DayProfile};
pub use error::{GeneratorError, RegistryError};
pub use registry::{GenerationContext, RegistryBuilder, TableGenerator, TableRegistry};
pub use sequence::{seeded_random, SeedSequence};
