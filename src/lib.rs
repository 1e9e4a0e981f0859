//! mock-backend
//!
//! An in-process substitute for a remote relational-data service. Dashboard
//! code queries it exactly as it would the real backend and gets
//! deterministic, calendar-aware synthetic analytics data back.
//!
//! # Crates
//!
//! - `mock_core` - values, records and the `{ data, error }` envelope
//! - `mock_generator` - seeded table generators and the generation cache
//! - `mock_query` - the filter / order / limit query builder
//!
//! # Example
//!
//! ```rust
//! use mock_backend::{MockClient, MockConfig};
//! use mock_query::OrderOptions;
//!
//! let client = MockClient::new(MockConfig::instant()).unwrap();
//! let response = tokio_test::block_on(
//!     client
//!         .from("feature_usage")
//!         .eq("feature", "ai_tutor")
//!         .order("usage_count", OrderOptions::descending())
//!         .limit(3)
//!         .execute(),
//! );
//! assert!(response.error.is_none());
//! assert_eq!(response.rows().len(), 3);
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod rpc;
pub mod storage;

pub use client::{MockClient, SchemaClient};
pub use config::{LatencyConfig, MockConfig};

pub use mock_core::{QueryData, Record, Response, ServiceError, Value};
pub use mock_query::{OrderOptions, QueryBuilder};
