//! Query descriptor: the accumulated state of one builder chain.

use crate::filter::Filter;
use mock_core::Record;
use serde::Serialize;
use std::cmp::Ordering;

/// Options of an `order` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderOptions {
    pub ascending: bool,
}

impl Default for OrderOptions {
    fn default() -> Self {
        Self { ascending: true }
    }
}

impl OrderOptions {
    pub fn ascending() -> Self {
        Self { ascending: true }
    }

    pub fn descending() -> Self {
        Self { ascending: false }
    }
}

/// Sort key and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortOrder {
    pub field: String,
    pub ascending: bool,
}

impl SortOrder {
    pub fn new(field: impl Into<String>, options: OrderOptions) -> Self {
        Self {
            field: field.into(),
            ascending: options.ascending,
        }
    }

    /// Parse `field`, `field.asc` or `field.desc`.
    pub fn parse(s: &str) -> Self {
        match s.rsplit_once('.') {
            Some((field, "desc")) => Self::new(field, OrderOptions::descending()),
            Some((field, "asc")) => Self::new(field, OrderOptions::ascending()),
            _ => Self::new(s, OrderOptions::ascending()),
        }
    }

    /// Comparator for a stable sort: nulls sort last in both directions, and
    /// other values follow [`Value::sort_cmp`].
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let (x, y) = (a.get(&self.field), b.get(&self.field));
        match (x.is_null(), y.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ord = x.sort_cmp(y);
                if self.ascending {
                    ord
                } else {
                    ord.reverse()
                }
            }
        }
    }
}

/// How many rows the query resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// A list of rows.
    #[default]
    Many,
    /// The first matching row, or null.
    Single,
    /// Same as `Single`; kept separate to mirror the remote API surface.
    MaybeSingle,
}

impl Cardinality {
    pub fn is_single(&self) -> bool {
        !matches!(self, Self::Many)
    }
}

/// Immutable description of a query.
///
/// Filters are conjunctive and applied in chain order; the pipeline is always
/// filter, then order, then limit, regardless of the order of builder calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryDescriptor {
    pub table: String,
    pub schema: Option<String>,
    /// Requested columns. Recorded only; rows are never projected.
    pub columns: String,
    pub filters: Vec<Filter>,
    pub order: Option<SortOrder>,
    pub limit: Option<usize>,
    pub cardinality: Cardinality,
}

impl QueryDescriptor {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            schema: None,
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
            cardinality: Cardinality::Many,
        }
    }

    /// Does `record` pass every filter?
    pub fn matches(&self, record: &Record) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }
}
