//! Resolution of a [`QueryDescriptor`] against a snapshot.

use crate::descriptor::{Cardinality, QueryDescriptor};
use mock_core::{QueryData, Record};

/// Run the fixed filter, order, limit pipeline over `rows`.
///
/// The snapshot itself is never touched; matching rows are cloned out.
/// Returns `None` only for a single-row query with no match.
pub fn run(descriptor: &QueryDescriptor, rows: &[Record]) -> Option<QueryData> {
    let mut matched: Vec<Record> = rows
        .iter()
        .filter(|record| descriptor.matches(record))
        .cloned()
        .collect();

    if let Some(order) = &descriptor.order {
        // sort_by is stable, so ties keep snapshot order
        matched.sort_by(|a, b| order.compare(a, b));
    }

    if let Some(limit) = descriptor.limit {
        matched.truncate(limit);
    }

    match descriptor.cardinality {
        Cardinality::Many => Some(QueryData::Many(matched)),
        Cardinality::Single | Cardinality::MaybeSingle => {
            matched.into_iter().next().map(QueryData::One)
        }
    }
}
