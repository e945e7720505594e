use std::fmt::{Display, Formatter, Result as FmtResult};

use chrono::NaiveDate;
use serde::Deserialize;

use super::FieldType;
use crate::engine::ValueError;

/// Date format accepted by [`Value::coerce`] for `date` fields.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A user-supplied value for a placeholder.
///
/// Values deserialize from JSON strings, numbers, arrays of strings and
/// `null` (an empty value). Dates never come from JSON directly; use
/// [`Value::coerce`] to turn ISO date strings into [`Value::Date`] for
/// `date` fields.
///
/// # Example
///
/// ```
/// use docfill::Value;
///
/// let count: Value = 42.into();
/// let name: Value = "Acme Ltd".into();
/// let items: Value = vec!["Alpha", "Beta"].into();
///
/// assert_eq!(count.as_number(), Some(42));
/// assert_eq!(name.as_text(), Some("Acme Ltd"));
/// assert_eq!(items.as_list().map(<[String]>::len), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawValue")]
pub enum Value {
    Text(String),
    Number(i64),
    Float(f64),
    Date(NaiveDate),
    List(Vec<String>),
}

/// JSON shapes accepted for a value.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

impl From<RawValue> for Value {
    fn from(raw: RawValue) -> Self {
        match raw {
            RawValue::Null => Value::Text(String::new()),
            RawValue::Bool(b) => Value::Text(b.to_string()),
            RawValue::Integer(n) => Value::Number(n),
            RawValue::Float(n) => Value::Float(n),
            RawValue::Text(s) => Value::Text(s),
            RawValue::List(items) => Value::List(items),
        }
    }
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// True for an empty string or a list with no non-blank entries.
    ///
    /// Whitespace-only strings are not blank; only list entries are
    /// filtered for whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Text(s) => s.is_empty(),
            Value::List(items) => items.iter().all(|item| item.trim().is_empty()),
            Value::Number(_) | Value::Float(_) | Value::Date(_) => false,
        }
    }

    /// Converts a raw text value into the shape a field type expects.
    ///
    /// - `date`: an ISO `YYYY-MM-DD` string becomes [`Value::Date`]
    /// - `number`: an integer or decimal string becomes a number
    /// - `multiple`: a string becomes one list entry per line
    ///
    /// Empty strings and values that are not [`Value::Text`] are returned
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError`] if a non-empty string cannot be read as the
    /// requested date or number.
    pub fn coerce(self, field_type: FieldType) -> Result<Value, ValueError> {
        let Value::Text(text) = self else {
            return Ok(self);
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Value::Text(text));
        }

        match field_type {
            FieldType::Date => NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
                .map(Value::Date)
                .map_err(|_| ValueError::InvalidDate {
                    input: text.clone(),
                    expected: ISO_DATE_FORMAT.to_string(),
                }),
            FieldType::Number => {
                if let Ok(n) = trimmed.parse::<i64>() {
                    Ok(Value::Number(n))
                } else if let Ok(n) = trimmed.parse::<f64>() {
                    Ok(Value::Float(n))
                } else {
                    Err(ValueError::InvalidNumber { input: text })
                }
            }
            FieldType::Multiple => Ok(Value::List(text.lines().map(str::to_string).collect())),
            FieldType::Text | FieldType::Multiline => Ok(Value::Text(text)),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Date(d) => write!(f, "{d}"),
            Value::List(items) => write!(f, "{}", items.join(", ")),
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Value::List(items.into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn deserializes_json_shapes() {
        let json = r#"{"a": "x", "b": 3, "c": 2.5, "d": ["p", "q"], "e": null, "f": true}"#;
        let values: BTreeMap<String, Value> = serde_json::from_str(json).unwrap();
        assert_eq!(values["a"], Value::Text("x".into()));
        assert_eq!(values["b"], Value::Number(3));
        assert_eq!(values["c"], Value::Float(2.5));
        assert_eq!(values["d"], Value::List(vec!["p".into(), "q".into()]));
        assert!(values["e"].is_blank());
        assert_eq!(values["f"], Value::Text("true".into()));
    }

    #[test]
    fn blank_values() {
        assert!(Value::from("").is_blank());
        assert!(!Value::from(" ").is_blank());
        assert!(Value::from(vec!["", "  "]).is_blank());
        assert!(!Value::from(vec!["", "a"]).is_blank());
        assert!(!Value::from(0).is_blank());
    }

    #[test]
    fn coerce_date() {
        let value = Value::from("2024-03-05").coerce(FieldType::Date).unwrap();
        assert_eq!(value, Value::Date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()));

        let err = Value::from("March 5").coerce(FieldType::Date).unwrap_err();
        assert!(err.to_string().contains("March 5"));
    }

    #[test]
    fn coerce_number() {
        assert_eq!(Value::from(" 12 ").coerce(FieldType::Number).unwrap(), Value::Number(12));
        assert_eq!(Value::from("1.5").coerce(FieldType::Number).unwrap(), Value::Float(1.5));
        assert!(Value::from("twelve").coerce(FieldType::Number).is_err());
    }

    #[test]
    fn coerce_multiple_splits_lines() {
        let value = Value::from("Alpha\nBeta").coerce(FieldType::Multiple).unwrap();
        assert_eq!(value, Value::from(vec!["Alpha", "Beta"]));
    }

    #[test]
    fn coerce_leaves_empty_and_typed_values() {
        assert_eq!(Value::from("").coerce(FieldType::Date).unwrap(), Value::from(""));
        assert_eq!(Value::from(7).coerce(FieldType::Date).unwrap(), Value::Number(7));
        assert_eq!(Value::from("x").coerce(FieldType::Text).unwrap(), Value::from("x"));
    }
}
