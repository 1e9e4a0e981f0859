//! Table registry: which generator serves which table, and what it depends on.
//!
//! Generators that derive values from another table declare that table as a
//! dependency. The registry checks the declarations when it is built (unknown
//! names and cycles are rejected) and at generation time hands a generator only
//! the snapshots it declared, read through the shared cache so the "same" day
//! never has two different values in two tables.

use crate::cache::GenerationCache;
use crate::error::{GeneratorError, RegistryError};
use crate::sequence::SeedSequence;
use mock_core::{Record, Snapshot};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// Producer of one logical table.
pub trait TableGenerator: Send + Sync {
    /// Table name this generator serves.
    fn table(&self) -> &str;

    /// Tables whose cached snapshots this generator reads.
    fn dependencies(&self) -> &[&'static str] {
        &[]
    }

    /// Build the full, ordered record sequence of the table.
    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<Record>, GeneratorError>;
}

/// What a generator may see while it runs.
pub struct GenerationContext<'a> {
    registry: &'a TableRegistry,
    cache: &'a GenerationCache,
    table: &'a str,
    dependencies: &'a [&'static str],
}

impl GenerationContext<'_> {
    pub fn table(&self) -> &str {
        self.table
    }

    pub fn seeds(&self) -> SeedSequence {
        self.cache.seeds()
    }

    /// Cached snapshot of a declared dependency, generating it if needed.
    pub fn dependency(&self, table: &str) -> Result<Snapshot, GeneratorError> {
        if !self.dependencies.contains(&table) {
            return Err(GeneratorError::UndeclaredDependency {
                table: self.table.to_string(),
                dependency: table.to_string(),
            });
        }

        match self.registry.snapshot(self.cache, table) {
            Ok(Some(snapshot)) => Ok(snapshot),
            Ok(None) => Err(GeneratorError::TableNotFound(table.to_string())),
            Err(e) => Err(GeneratorError::Dependency {
                table: self.table.to_string(),
                dependency: table.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

/// Validated set of table generators.
#[derive(Clone, Default)]
pub struct TableRegistry {
    generators: BTreeMap<String, Arc<dyn TableGenerator>>,
}

impl fmt::Debug for TableRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableRegistry")
            .field("tables", &self.table_names())
            .finish()
    }
}

impl TableRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registry with every built-in dashboard table.
    pub fn standard() -> Result<Self, RegistryError> {
        Self::builder()
            .register_all(crate::tables::standard_generators())
            .build()
    }

    pub fn get(&self, table: &str) -> Option<&Arc<dyn TableGenerator>> {
        self.generators.get(table)
    }

    pub fn contains(&self, table: &str) -> bool {
        self.generators.contains_key(table)
    }

    /// Registered table names in sorted order.
    pub fn table_names(&self) -> Vec<&str> {
        self.generators.keys().map(String::as_str).collect()
    }

    /// Snapshot of `table` from `cache`, generating it (and its dependencies)
    /// on first use.
    ///
    /// Returns `Ok(None)` for tables with no generator.
    pub fn snapshot(
        &self,
        cache: &GenerationCache,
        table: &str,
    ) -> Result<Option<Snapshot>, GeneratorError> {
        let Some(generator) = self.generators.get(table) else {
            return Ok(None);
        };

        cache
            .get_or_generate(table, || {
                let ctx = GenerationContext {
                    registry: self,
                    cache,
                    table,
                    dependencies: generator.dependencies(),
                };
                let records = generator.generate(&ctx)?;
                validate_records(table, &records)?;
                Ok(records)
            })
            .map(Some)
    }
}

/// Reject records carrying NaN or infinite floats.
fn validate_records(table: &str, records: &[Record]) -> Result<(), GeneratorError> {
    for (row, record) in records.iter().enumerate() {
        if let Some(field) = record.first_non_finite() {
            return Err(GeneratorError::NonFinite {
                table: table.to_string(),
                field: field.to_string(),
                row,
            });
        }
    }
    Ok(())
}

/// Builder for [`TableRegistry`].
#[derive(Default)]
pub struct RegistryBuilder {
    generators: Vec<Arc<dyn TableGenerator>>,
}

impl RegistryBuilder {
    /// Add a generator.
    pub fn register(mut self, generator: Arc<dyn TableGenerator>) -> Self {
        self.generators.push(generator);
        self
    }

    pub fn register_all(mut self, generators: impl IntoIterator<Item = Arc<dyn TableGenerator>>) -> Self {
        self.generators.extend(generators);
        self
    }

    /// Validate names and dependency declarations, then build the registry.
    pub fn build(self) -> Result<TableRegistry, RegistryError> {
        let mut generators = BTreeMap::new();
        for generator in self.generators {
            let name = generator.table().to_string();
            if generators.contains_key(&name) {
                return Err(RegistryError::DuplicateTable(name));
            }
            generators.insert(name, generator);
        }

        for (table, generator) in &generators {
            for dependency in generator.dependencies() {
                if !generators.contains_key(*dependency) {
                    return Err(RegistryError::UnknownDependency {
                        table: table.clone(),
                        dependency: dependency.to_string(),
                    });
                }
            }
        }

        check_acyclic(&generators)?;

        Ok(TableRegistry { generators })
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Visiting,
    Done,
}

fn check_acyclic(generators: &BTreeMap<String, Arc<dyn TableGenerator>>) -> Result<(), RegistryError> {
    fn visit<'a>(
        table: &'a str,
        generators: &'a BTreeMap<String, Arc<dyn TableGenerator>>,
        marks: &mut HashMap<&'a str, Mark>,
        path: &mut Vec<&'a str>,
    ) -> Result<(), RegistryError> {
        match marks.get(table) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                let start = path.iter().position(|t| *t == table).unwrap_or(0);
                let mut cycle: Vec<String> = path[start..].iter().map(|t| t.to_string()).collect();
                cycle.push(table.to_string());
                return Err(RegistryError::CyclicDependency(cycle));
            }
            None => {}
        }

        marks.insert(table, Mark::Visiting);
        path.push(table);
        if let Some(generator) = generators.get(table) {
            for dependency in generator.dependencies() {
                visit(dependency, generators, marks, path)?;
            }
        }
        path.pop();
        marks.insert(table, Mark::Done);
        Ok(())
    }

    let mut marks = HashMap::new();
    for table in generators.keys() {
        visit(table, generators, &mut marks, &mut Vec::new())?;
    }
    Ok(())
}
