//! In-memory query engine for mock-backend.
//!
//! Reproduces the filter / order / limit / single-row semantics of a remote
//! tabular query API over the immutable snapshots held by a
//! [`GenerationCache`](mock_generator::GenerationCache).
//!
//! # Pipeline
//!
//! ```text
//! from(table) ──► QueryBuilder ──(.eq/.gt/.in_/.ilike/.order/.limit/.single)──►
//!
//!   .await ──► latency ──► filter (chain order) ──► stable sort ──► limit ──► cardinality
//!                                                                              │
//!                                                         Response { data, error }
//! ```
//!
//! The pipeline order is fixed: calling `limit` before `order` still sorts
//! the full filtered set first.
//!
//! # Example
//!
//! ```rust
//! use mock_generator::{GenerationCache, TableRegistry};
//! use mock_query::{DataSource, Latency, OrderOptions};
//! use std::sync::Arc;
//!
//! let source = DataSource::new(
//!     Arc::new(TableRegistry::standard().unwrap()),
//!     Arc::new(GenerationCache::with_seed(42)),
//!     Latency::none(),
//! );
//!
//! let response = tokio_test::block_on(
//!     source
//!         .from("daily_activity")
//!         .gte("date", "2024-03-04")
//!         .lt("date", "2024-03-11")
//!         .order("date", OrderOptions::ascending())
//!         .execute(),
//! );
//! assert_eq!(response.rows().len(), 7);
//! ```

pub mod builder;
pub mod descriptor;
pub mod filter;
pub mod latency;
pub mod pattern;
pub mod pipeline;

// Re-exports for convenience
pub use builder::{DataSource, QueryBuilder};
pub use descriptor::{Cardinality, OrderOptions, QueryDescriptor, SortOrder};
pub use filter::{Filter, FilterOp, FilterParseError};
pub use latency::Latency;
