//! Result envelope returned by every caller-facing operation.

use crate::record::Record;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Errors reported through the `error` field of a [`Response`].
///
/// The service never fails a call by returning `Err` or panicking; callers
/// inspect the envelope exactly as they would with the remote service.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    /// A table generator produced invalid data or failed internally.
    #[error("Generation failed for table '{table}': {message}")]
    Generation { table: String, message: String },

    /// RPC to a procedure with no canned response.
    #[error("Could not find the function {0} in the schema cache")]
    UnknownProcedure(String),
}

impl ServiceError {
    /// Short, stable error code in the style of the remote service.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Generation { .. } => "MOCK500",
            Self::UnknownProcedure(_) => "PGRST202",
        }
    }
}

impl Serialize for ServiceError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ServiceError", 2)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// The `{ data, error }` envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response<T> {
    pub data: Option<T>,
    pub error: Option<ServiceError>,
}

impl<T> Response<T> {
    /// Successful response carrying data.
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    /// Successful response with no data (e.g. a single-row miss).
    pub fn empty() -> Self {
        Self {
            data: None,
            error: None,
        }
    }

    /// Failed response.
    pub fn err(error: ServiceError) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Convert into a `Result`, for callers that prefer `?`.
    pub fn into_result(self) -> Result<Option<T>, ServiceError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.data),
        }
    }
}

/// Data of a resolved query: a row list, or one row for single-row queries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryData {
    Many(Vec<Record>),
    One(Record),
}

impl QueryData {
    /// All returned rows as a slice.
    pub fn rows(&self) -> &[Record] {
        match self {
            Self::Many(rows) => rows,
            Self::One(row) => std::slice::from_ref(row),
        }
    }

    pub fn into_rows(self) -> Vec<Record> {
        match self {
            Self::Many(rows) => rows,
            Self::One(row) => vec![row],
        }
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }

    pub fn first(&self) -> Option<&Record> {
        self.rows().first()
    }
}

impl Response<QueryData> {
    /// Rows of the response, empty on error or single-row miss.
    pub fn rows(&self) -> &[Record] {
        self.data.as_ref().map(QueryData::rows).unwrap_or_default()
    }
}
