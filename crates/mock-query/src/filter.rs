//! Filter predicates.
//!
//! A filter is a (field, operator, operand) triple evaluated structurally
//! against a record: missing fields read as null, and operands are compared
//! with [`Value::compare`]'s coercions so text operands from query strings
//! work against typed fields.

use crate::pattern;
use mock_core::{Record, Value};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Comparison operator of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    Ilike,
}

impl FilterOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::In => "in",
            Self::Ilike => "ilike",
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOp {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(Self::Eq),
            "neq" => Ok(Self::Neq),
            "gt" => Ok(Self::Gt),
            "gte" => Ok(Self::Gte),
            "lt" => Ok(Self::Lt),
            "lte" => Ok(Self::Lte),
            "in" => Ok(Self::In),
            "ilike" => Ok(Self::Ilike),
            other => Err(FilterParseError::UnknownOperator(other.to_string())),
        }
    }
}

/// Error parsing a `field=op.value` filter string.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterParseError {
    #[error("Filter '{0}' is not of the form field=op.value")]
    Malformed(String),

    #[error("Unknown filter operator: {0}")]
    UnknownOperator(String),
}

/// One predicate of a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Build an `in` filter, coercing the operand permissively.
    ///
    /// Arrays are used as-is, a scalar becomes a one-element list, and a null
    /// operand yields no filter at all.
    pub fn in_list(field: impl Into<String>, value: impl Into<Value>) -> Option<Self> {
        let values = match value.into() {
            Value::Null => return None,
            Value::Array(values) => values,
            scalar => vec![scalar],
        };
        Some(Self::new(field, FilterOp::In, Value::Array(values)))
    }

    /// Does `record` satisfy this filter?
    pub fn matches(&self, record: &Record) -> bool {
        let field = record.get(&self.field);
        match self.op {
            FilterOp::Eq => field.loose_eq(&self.value),
            FilterOp::Neq => !field.loose_eq(&self.value),
            FilterOp::Gt => field.compare(&self.value) == Some(Ordering::Greater),
            FilterOp::Gte => matches!(
                field.compare(&self.value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            FilterOp::Lt => field.compare(&self.value) == Some(Ordering::Less),
            FilterOp::Lte => matches!(
                field.compare(&self.value),
                Some(Ordering::Less | Ordering::Equal)
            ),
            FilterOp::In => match &self.value {
                Value::Array(candidates) => candidates.iter().any(|c| field.loose_eq(c)),
                single => field.loose_eq(single),
            },
            FilterOp::Ilike => {
                if field.is_null() {
                    return false;
                }
                pattern::ilike(&field.to_string(), &self.value.to_string())
            }
        }
    }

    /// Parse the query-string form used by the remote service's REST API,
    /// e.g. `date=gte.2024-03-04` or `feature=in.(flashcards,ai_tutor)`.
    pub fn parse(s: &str) -> Result<Self, FilterParseError> {
        let (field, rest) = s
            .split_once('=')
            .ok_or_else(|| FilterParseError::Malformed(s.to_string()))?;
        let (op, operand) = rest
            .split_once('.')
            .ok_or_else(|| FilterParseError::Malformed(s.to_string()))?;
        let field = field.trim();
        if field.is_empty() {
            return Err(FilterParseError::Malformed(s.to_string()));
        }

        let op: FilterOp = op.trim().parse()?;
        let value = match op {
            FilterOp::In => {
                let inner = operand
                    .trim()
                    .strip_prefix('(')
                    .and_then(|o| o.strip_suffix(')'))
                    .unwrap_or(operand);
                Value::Array(
                    inner
                        .split(',')
                        .map(|item| item.trim().trim_matches('"'))
                        .filter(|item| !item.is_empty())
                        .map(Value::from)
                        .collect(),
                )
            }
            // The REST syntax uses `*` as the like wildcard
            FilterOp::Ilike => Value::from(operand.replace('*', "%")),
            _ => Value::from(operand),
        };

        Ok(Self::new(field, op, value))
    }
}

impl FromStr for Filter {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Record {
        Record::new()
            .field("a", 1)
            .field("b", 2.5)
            .field("name", "Flashcards")
            .field("tags", Value::Null)
    }

    #[test]
    fn test_comparison_operators() {
        let r = row();
        assert!(Filter::new("a", FilterOp::Eq, 1).matches(&r));
        assert!(Filter::new("a", FilterOp::Neq, 2).matches(&r));
        assert!(Filter::new("b", FilterOp::Gt, 2).matches(&r));
        assert!(Filter::new("b", FilterOp::Gte, 2.5).matches(&r));
        assert!(!Filter::new("b", FilterOp::Lt, 2.5).matches(&r));
        assert!(Filter::new("b", FilterOp::Lte, 2.5).matches(&r));
    }

    #[test]
    fn test_missing_field_is_null() {
        let r = row();
        assert!(Filter::new("missing", FilterOp::Eq, Value::Null).matches(&r));
        assert!(!Filter::new("missing", FilterOp::Gt, 0).matches(&r));
        assert!(Filter::new("missing", FilterOp::Neq, 0).matches(&r));
    }

    #[test]
    fn test_in_list_coercion() {
        let r = row();
        let list = Filter::in_list("a", vec![3, 1]).unwrap();
        assert!(list.matches(&r));

        let scalar = Filter::in_list("a", 1).unwrap();
        assert_eq!(scalar.value, Value::Array(vec![Value::Int(1)]));
        assert!(scalar.matches(&r));

        assert!(Filter::in_list("a", Value::Null).is_none());
    }

    #[test]
    fn test_ilike() {
        let r = row();
        assert!(Filter::new("name", FilterOp::Ilike, "%CARD%").matches(&r));
        assert!(Filter::new("a", FilterOp::Ilike, "1").matches(&r));
        assert!(!Filter::new("tags", FilterOp::Ilike, "%").matches(&r));
    }

    #[test]
    fn test_parse_rest_syntax() {
        let f = Filter::parse("date=gte.2024-03-04").unwrap();
        assert_eq!(f.field, "date");
        assert_eq!(f.op, FilterOp::Gte);
        assert_eq!(f.value, Value::from("2024-03-04"));

        let f: Filter = "feature=in.(flashcards, \"ai_tutor\")".parse().unwrap();
        assert_eq!(
            f.value,
            Value::Array(vec![Value::from("flashcards"), Value::from("ai_tutor")])
        );

        let f = Filter::parse("handle=ilike.*study*").unwrap();
        assert_eq!(f.value, Value::from("%study%"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Filter::parse("date"),
            Err(FilterParseError::Malformed(_))
        ));
        assert!(matches!(
            Filter::parse("date=between.1"),
            Err(FilterParseError::UnknownOperator(_))
        ));
        assert!(matches!(
            Filter::parse("=eq.1"),
            Err(FilterParseError::Malformed(_))
        ));
    }

    #[test]
    fn test_parsed_text_operand_matches_typed_field() {
        let r = row();
        assert!(Filter::parse("a=eq.1").unwrap().matches(&r));
        assert!(Filter::parse("b=lt.3").unwrap().matches(&r));
    }
}
