//! Core types for the mock-backend data service.
//!
//! This crate provides the foundational types shared by the generator, the
//! query engine and the service facade:
//!
//! - [`Value`] - a field value, JSON-shaped but with typed dates, timestamps and UUIDs
//! - [`Record`] - one row, an ordered field name -> value map
//! - [`TableRow`] - typed row structs that convert into records
//! - [`Snapshot`] - the immutable, shared record sequence of a table
//! - [`Response`] - the `{ data, error }` envelope returned to callers
//!
//! # Architecture
//!
//! ```text
//! mock-core (this crate)
//!    │
//!    ├─── mock-generator  (sequence, calendar, table generators, cache)
//!    │
//!    ├─── mock-query      (filter / order / limit builder over snapshots)
//!    │
//!    └─── mock-backend    (client facade, rpc, auth and storage stubs, CLI)
//! ```
//!
//! # Example
//!
//! ```rust
//! use mock_core::{QueryData, Record, Response};
//!
//! let row = Record::new().field("date", "2024-03-04").field("active_user_count", 1200);
//! let response = Response::ok(QueryData::Many(vec![row]));
//!
//! assert!(response.is_ok());
//! assert_eq!(response.rows().len(), 1);
//! ```

pub mod compare;
pub mod record;
pub mod response;
pub mod value;

// Re-exports for convenience
pub use record::{into_records, Record, Snapshot, TableRow};
pub use response::{QueryData, Response, ServiceError};
pub use value::Value;
