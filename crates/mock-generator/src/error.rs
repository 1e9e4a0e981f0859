//! Error types for table generation.

use thiserror::Error;

/// Error raised while producing a table snapshot.
///
/// These indicate defects in a generator, never caller misuse, and are
/// cached alongside successful snapshots so a broken table fails the same
/// way on every access.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeneratorError {
    /// A generated float was NaN or infinite
    #[error("Table '{table}' produced a non-finite value in field '{field}' of row {row}")]
    NonFinite {
        table: String,
        field: String,
        row: usize,
    },

    /// A generator read a table it did not declare as a dependency
    #[error("Table '{table}' read undeclared dependency '{dependency}'")]
    UndeclaredDependency { table: String, dependency: String },

    /// Table not found in the registry
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// A dependency failed to generate
    #[error("Dependency '{dependency}' of table '{table}' failed: {message}")]
    Dependency {
        table: String,
        dependency: String,
        message: String,
    },

    /// Any other generator defect
    #[error("Table '{table}' generation failed: {message}")]
    Invalid { table: String, message: String },
}

impl GeneratorError {
    /// Table the failure belongs to, when known.
    pub fn table(&self) -> &str {
        match self {
            Self::NonFinite { table, .. }
            | Self::UndeclaredDependency { table, .. }
            | Self::Dependency { table, .. }
            | Self::Invalid { table, .. } => table,
            Self::TableNotFound(table) => table,
        }
    }
}

/// Error raised while assembling a [`TableRegistry`](crate::TableRegistry).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    /// Two generators registered for the same table
    #[error("Duplicate generator for table: {0}")]
    DuplicateTable(String),

    /// A declared dependency has no generator
    #[error("Table '{table}' depends on unknown table '{dependency}'")]
    UnknownDependency { table: String, dependency: String },

    /// Dependency declarations form a cycle
    #[error("Cyclic table dependency: {}", .0.join(" -> "))]
    CyclicDependency(Vec<String>),
}
