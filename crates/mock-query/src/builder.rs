//! Fluent query builder.
//!
//! A [`QueryBuilder`] is created by [`DataSource::from`], which binds it to the
//! table's cached snapshot up front. Each chain method consumes the builder and
//! returns it with one more clause; [`QueryBuilder::execute`] (or `.await` on
//! the builder itself) resolves it into a [`Response`].

use crate::descriptor::{Cardinality, OrderOptions, QueryDescriptor, SortOrder};
use crate::filter::{Filter, FilterOp};
use crate::latency::Latency;
use crate::pipeline;
use mock_core::{QueryData, Response, ServiceError, Snapshot, Value};
use mock_generator::{GenerationCache, GeneratorError, TableRegistry};
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Everything a query needs to find its rows.
#[derive(Debug, Clone)]
pub struct DataSource {
    registry: Arc<TableRegistry>,
    cache: Arc<GenerationCache>,
    latency: Latency,
}

impl DataSource {
    pub fn new(registry: Arc<TableRegistry>, cache: Arc<GenerationCache>, latency: Latency) -> Self {
        Self {
            registry,
            cache,
            latency,
        }
    }

    pub fn registry(&self) -> &Arc<TableRegistry> {
        &self.registry
    }

    pub fn cache(&self) -> &Arc<GenerationCache> {
        &self.cache
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    /// Snapshot of `table`, generated on first access.
    pub fn snapshot(&self, table: &str) -> Result<Option<Snapshot>, GeneratorError> {
        self.registry.snapshot(&self.cache, table)
    }

    /// Start a query against `table`.
    pub fn from(&self, table: &str) -> QueryBuilder {
        self.start(QueryDescriptor::new(table))
    }

    /// Start a query against `table` in a named schema.
    ///
    /// Schemas share one table namespace; the name is only recorded.
    pub fn from_schema(&self, schema: &str, table: &str) -> QueryBuilder {
        let mut descriptor = QueryDescriptor::new(table);
        descriptor.schema = Some(schema.to_string());
        self.start(descriptor)
    }

    fn start(&self, descriptor: QueryDescriptor) -> QueryBuilder {
        let binding = match self.snapshot(&descriptor.table) {
            Ok(Some(rows)) => Binding::Snapshot(rows),
            Ok(None) => Binding::Missing,
            Err(e) => Binding::Failed(e),
        };
        QueryBuilder {
            descriptor,
            binding,
            latency: self.latency,
        }
    }
}

#[derive(Debug, Clone)]
enum Binding {
    Snapshot(Snapshot),
    Missing,
    Failed(GeneratorError),
}

/// A query under construction.
#[derive(Debug, Clone)]
#[must_use = "queries do nothing until executed or awaited"]
pub struct QueryBuilder {
    descriptor: QueryDescriptor,
    binding: Binding,
    latency: Latency,
}

impl QueryBuilder {
    /// Record the requested columns. Rows are returned whole.
    pub fn select(mut self, columns: &str) -> Self {
        self.descriptor.columns = columns.to_string();
        self
    }

    /// Append an arbitrary filter clause.
    pub fn filter(mut self, field: &str, op: FilterOp, value: impl Into<Value>) -> Self {
        if op == FilterOp::In {
            return self.in_(field, value);
        }
        self.descriptor.filters.push(Filter::new(field, op, value));
        self
    }

    /// Append filters given in query-string form (`date=gte.2024-03-04`).
    ///
    /// Clauses that fail to parse are logged and skipped; the rest apply in
    /// order.
    pub fn filter_strs<S: AsRef<str>>(self, raw: &[S]) -> Self {
        raw.iter().fold(self, |query, raw| match Filter::parse(raw.as_ref()) {
            Ok(filter) => query.filter(&filter.field, filter.op, filter.value),
            Err(e) => {
                warn!("Skipping filter '{}': {}", raw.as_ref(), e);
                query
            }
        })
    }

    pub fn eq(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, FilterOp::Eq, value)
    }

    pub fn neq(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, FilterOp::Neq, value)
    }

    pub fn gt(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, FilterOp::Gt, value)
    }

    pub fn gte(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, FilterOp::Gte, value)
    }

    pub fn lt(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, FilterOp::Lt, value)
    }

    pub fn lte(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, FilterOp::Lte, value)
    }

    /// Membership filter. A scalar operand is treated as a one-element list;
    /// a null operand adds no filter.
    pub fn in_(mut self, field: &str, values: impl Into<Value>) -> Self {
        match Filter::in_list(field, values) {
            Some(filter) => self.descriptor.filters.push(filter),
            None => debug!("Ignoring in filter on '{}' with null operand", field),
        }
        self
    }

    /// Case-insensitive pattern filter; `%` matches any run of characters.
    pub fn ilike(self, field: &str, pattern: &str) -> Self {
        self.filter(field, FilterOp::Ilike, pattern)
    }

    /// Sort by `field`. A later call replaces an earlier one.
    pub fn order(mut self, field: &str, options: OrderOptions) -> Self {
        self.descriptor.order = Some(SortOrder::new(field, options));
        self
    }

    /// Keep at most `count` rows. A later call replaces an earlier one.
    pub fn limit(mut self, count: usize) -> Self {
        self.descriptor.limit = Some(count);
        self
    }

    /// Resolve to the first matching row, or null data on a miss.
    pub fn single(mut self) -> Self {
        self.descriptor.cardinality = Cardinality::Single;
        self
    }

    /// Same as [`single`](Self::single).
    pub fn maybe_single(mut self) -> Self {
        self.descriptor.cardinality = Cardinality::MaybeSingle;
        self
    }

    pub fn descriptor(&self) -> &QueryDescriptor {
        &self.descriptor
    }

    /// Resolve the query after the simulated latency.
    pub async fn execute(self) -> Response<QueryData> {
        self.latency.sleep().await;
        self.resolve()
    }

    /// Resolve the query immediately, skipping the simulated latency.
    pub fn resolve(self) -> Response<QueryData> {
        let QueryBuilder {
            descriptor,
            binding,
            ..
        } = self;

        let rows = match binding {
            Binding::Snapshot(rows) => rows,
            Binding::Missing => {
                warn!("Query against unknown table '{}'", descriptor.table);
                return match descriptor.cardinality {
                    Cardinality::Many => Response::ok(QueryData::Many(Vec::new())),
                    Cardinality::Single | Cardinality::MaybeSingle => Response::empty(),
                };
            }
            Binding::Failed(e) => {
                error!("Table '{}' failed to generate: {}", descriptor.table, e);
                return Response::err(ServiceError::Generation {
                    table: descriptor.table,
                    message: e.to_string(),
                });
            }
        };

        debug!(
            "Resolving query on '{}' ({} rows, {} filters, order={:?}, limit={:?})",
            descriptor.table,
            rows.len(),
            descriptor.filters.len(),
            descriptor.order,
            descriptor.limit
        );

        match pipeline::run(&descriptor, &rows) {
            Some(data) => {
                debug!("Query on '{}' returned {} rows", descriptor.table, data.len());
                Response::ok(data)
            }
            None => Response::empty(),
        }
    }
}

impl IntoFuture for QueryBuilder {
    type Output = Response<QueryData>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.execute())
    }
}
