//! Value comparison with the loose coercions a remote query API applies.
//!
//! Filter operands usually arrive as text (query strings) or as numbers of a
//! different width than the stored field, so comparison coerces:
//!
//! - `Int` and `Float` compare numerically
//! - `Text` against `Date`, `DateTime`, `Uuid`, `Bool` or a number is parsed first
//! - `Date` against `DateTime` compares at midnight UTC
//!
//! Anything else of mismatched kind is incomparable. Sorting uses
//! [`Value::sort_cmp`] instead, which is total.

use crate::value::Value;
use chrono::{DateTime, NaiveDate, Utc};
use std::cmp::Ordering;
use uuid::Uuid;

impl Value {
    /// Compare two values, returning `None` when they are incomparable.
    ///
    /// `Null` only compares equal to `Null`; ordering against null is undefined.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            (Value::Null, _) | (_, Value::Null) => None,

            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                self.as_f64()?.partial_cmp(&other.as_f64()?)
            }
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
            (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
            (Value::Date(a), Value::DateTime(b)) => Some(midnight(*a).cmp(b)),
            (Value::DateTime(a), Value::Date(b)) => Some(a.cmp(&midnight(*b))),
            (Value::Uuid(a), Value::Uuid(b)) => Some(a.cmp(b)),

            (Value::Text(text), typed) => coerce_text(text, typed)?.compare(typed),
            (typed, Value::Text(text)) => typed.compare(&coerce_text(text, typed)?),

            (Value::Array(a), Value::Array(b)) => {
                if a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loose_eq(y)) {
                    Some(Ordering::Equal)
                } else {
                    None
                }
            }
            (Value::Object(a), Value::Object(b)) => (a == b).then_some(Ordering::Equal),

            _ => None,
        }
    }

    /// Equality under the same coercions as [`Value::compare`].
    pub fn loose_eq(&self, other: &Value) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }

    /// Total order for sorting rows.
    ///
    /// Values of different kinds order by kind (booleans, numbers, text,
    /// dates and timestamps, uuids, arrays, objects, null) without any text
    /// coercion, so a column mixing kinds still sorts consistently.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        let (a, b) = (kind_rank(self), kind_rank(other));
        if a != b {
            return a.cmp(&b);
        }
        match (self, other) {
            (Value::Int(x), Value::Int(y)) => x.cmp(y),
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                let x = self.as_f64().unwrap_or_default();
                let y = other.as_f64().unwrap_or_default();
                x.total_cmp(&y)
            }
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            (Value::Text(x), Value::Text(y)) => x.cmp(y),
            (Value::Date(_) | Value::DateTime(_), Value::Date(_) | Value::DateTime(_)) => {
                instant(self).cmp(&instant(other))
            }
            (Value::Uuid(x), Value::Uuid(y)) => x.cmp(y),
            (Value::Array(x), Value::Array(y)) => x
                .iter()
                .zip(y)
                .map(|(l, r)| l.sort_cmp(r))
                .find(|o| o.is_ne())
                .unwrap_or_else(|| x.len().cmp(&y.len())),
            (Value::Object(x), Value::Object(y)) => x
                .iter()
                .zip(y)
                .map(|((lk, lv), (rk, rv))| lk.cmp(rk).then_with(|| lv.sort_cmp(rv)))
                .find(|o| o.is_ne())
                .unwrap_or_else(|| x.len().cmp(&y.len())),
            _ => Ordering::Equal,
        }
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::Int(_) | Value::Float(_) => 1,
        Value::Text(_) => 2,
        Value::Date(_) | Value::DateTime(_) => 3,
        Value::Uuid(_) => 4,
        Value::Array(_) => 5,
        Value::Object(_) => 6,
        Value::Null => 7,
    }
}

fn instant(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Date(d) => Some(midnight(*d)),
        Value::DateTime(dt) => Some(*dt),
        _ => None,
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

/// Parse a text operand into the kind of `target`.
fn coerce_text(text: &str, target: &Value) -> Option<Value> {
    let text = text.trim();
    match target {
        Value::Int(_) => text
            .parse::<i64>()
            .map(Value::Int)
            .or_else(|_| text.parse::<f64>().map(Value::Float))
            .ok(),
        Value::Float(_) => text.parse::<f64>().ok().map(Value::Float),
        Value::Bool(_) => match text.to_ascii_lowercase().as_str() {
            "true" | "t" | "1" => Some(Value::Bool(true)),
            "false" | "f" | "0" => Some(Value::Bool(false)),
            _ => None,
        },
        Value::Date(_) => parse_date(text).map(Value::Date),
        Value::DateTime(_) => parse_timestamp(text).map(Value::DateTime),
        Value::Uuid(_) => Uuid::parse_str(text).ok().map(Value::Uuid),
        _ => None,
    }
}

/// Parse a date, accepting a plain date or the date part of a timestamp.
fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    parse_timestamp(s).map(|dt| dt.date_naive())
}

/// Parse a timestamp string in various formats.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // Try common date-only format
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Value {
        Value::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_numeric_widening() {
        assert!(Value::Int(1).loose_eq(&Value::Float(1.0)));
        assert_eq!(
            Value::Float(2.5).compare(&Value::Int(2)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn test_text_operand_against_date() {
        let stored = date(2024, 3, 4);
        assert!(stored.loose_eq(&Value::from("2024-03-04")));
        assert_eq!(
            stored.compare(&Value::from("2024-03-10")),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::from("2024-02-01").compare(&stored),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn test_text_operand_against_timestamp() {
        let stored = Value::DateTime(
            DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        );
        assert_eq!(
            stored.compare(&Value::from("2024-05-01")),
            Some(Ordering::Greater)
        );
        assert_eq!(
            stored.compare(&Value::from("2024-05-01T12:00:00+00:00")),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn test_text_operand_against_number_and_bool() {
        assert!(Value::Int(7).loose_eq(&Value::from("7")));
        assert!(Value::Bool(false).loose_eq(&Value::from("false")));
        assert_eq!(Value::Int(7).compare(&Value::from("seven")), None);
    }

    #[test]
    fn test_null_handling() {
        assert!(Value::Null.loose_eq(&Value::Null));
        assert_eq!(Value::Null.compare(&Value::Int(1)), None);
        assert!(!Value::Int(1).loose_eq(&Value::Null));
    }

    #[test]
    fn test_sort_cmp_is_transitive_across_kinds() {
        let mut values = vec![
            Value::from("9"),
            Value::Float(9.5),
            Value::from("10"),
            Value::Int(5),
            Value::from("abc"),
            Value::Bool(true),
            date(2024, 1, 2),
        ];
        for a in &values {
            for b in &values {
                for c in &values {
                    if a.sort_cmp(b).is_le() && b.sort_cmp(c).is_le() {
                        assert!(a.sort_cmp(c).is_le(), "{a:?} <= {b:?} <= {c:?}");
                    }
                }
            }
        }

        values.sort_by(Value::sort_cmp);
        assert_eq!(
            values,
            vec![
                Value::Bool(true),
                Value::Int(5),
                Value::Float(9.5),
                Value::from("10"),
                Value::from("9"),
                Value::from("abc"),
                date(2024, 1, 2),
            ]
        );
    }

    #[test]
    fn test_sort_cmp_matches_compare_within_a_kind() {
        assert_eq!(Value::Int(2).sort_cmp(&Value::Float(2.5)), Ordering::Less);
        assert_eq!(
            date(2024, 1, 2).sort_cmp(&Value::DateTime(
                DateTime::parse_from_rfc3339("2024-01-01T23:00:00Z")
                    .unwrap()
                    .with_timezone(&Utc)
            )),
            Ordering::Greater
        );
    }

    #[test]
    fn test_mismatched_kinds_are_incomparable() {
        assert_eq!(Value::Bool(true).compare(&Value::Int(1)), None);
        assert_eq!(date(2024, 1, 1).compare(&Value::Int(1)), None);
    }
}
