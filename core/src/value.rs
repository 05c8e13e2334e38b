//! Typed parsers from raw tokens to [`Value`]s.
//!
//! Conversion is selected by the declared [`ValueType`]; there is no
//! open-ended coercion. Numeric parsing is locale-free and accepts a leading
//! `-` as a sign, so `-128` binds to an integer parameter.
//!
//! # Examples
//!
//! ```
//! use command_dispatch_core::{Value, ValueType};
//!
//! assert_eq!(ValueType::Integer.parse("-128").unwrap(), Value::Integer(-128));
//! assert_eq!(ValueType::Bool.parse("TRUE").unwrap(), Value::Bool(true));
//!
//! let list = ValueType::List(Box::new(ValueType::Integer));
//! assert_eq!(list.parse("[1,2]").unwrap(), list.parse("1,2").unwrap());
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::{Value, ValueType};

/// Failure converting a raw token to a declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Token is not valid for the expected type.
    #[error("'{value}' is not a valid {expected}")]
    Invalid { value: String, expected: String },
    /// Token is not one of the declared choices.
    #[error("'{value}' is not one of: {choices}")]
    NotAChoice { value: String, choices: String },
    /// JSON array syntax was malformed.
    #[error("malformed list '{value}': {detail}")]
    MalformedList { value: String, detail: String },
}

/// Failure extracting a typed value from a bound [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, found {found}")]
pub struct ValueMismatch {
    pub expected: &'static str,
    pub found: String,
}

impl ValueType {
    /// Parses `raw` according to this type.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError`] when `raw` is not a valid spelling of the
    /// type.
    pub fn parse(&self, raw: &str) -> Result<Value, ConversionError> {
        match self {
            ValueType::String => Ok(Value::String(raw.to_string())),
            ValueType::Integer => raw
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| self.invalid(raw)),
            ValueType::Float => match raw.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(Value::Float(n)),
                _ => Err(self.invalid(raw)),
            },
            ValueType::Bool => parse_bool(raw)
                .map(Value::Bool)
                .ok_or_else(|| self.invalid(raw)),
            ValueType::Path => {
                if raw.is_empty() {
                    Err(self.invalid(raw))
                } else {
                    Ok(Value::Path(PathBuf::from(raw)))
                }
            }
            ValueType::Choice(choices) => choices
                .iter()
                .find(|c| c.eq_ignore_ascii_case(raw))
                .map(|c| Value::String(c.clone()))
                .ok_or_else(|| ConversionError::NotAChoice {
                    value: raw.to_string(),
                    choices: choices.join(", "),
                }),
            ValueType::List(inner) => parse_list(inner, raw),
        }
    }

    /// Returns `true` if `value` is a well-formed instance of this type.
    ///
    /// Used to check declared defaults at table construction time.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (ValueType::String, Value::String(_))
            | (ValueType::Integer, Value::Integer(_))
            | (ValueType::Bool, Value::Bool(_))
            | (ValueType::Path, Value::Path(_)) => true,
            (ValueType::Float, Value::Float(n)) => n.is_finite(),
            (ValueType::Float, Value::Integer(_)) => true,
            (ValueType::Choice(choices), Value::String(s)) => choices.iter().any(|c| c == s),
            (ValueType::List(inner), Value::List(items)) => items.iter().all(|v| inner.accepts(v)),
            _ => false,
        }
    }

    fn invalid(&self, raw: &str) -> ConversionError {
        ConversionError::Invalid {
            value: raw.to_string(),
            expected: self.to_string(),
        }
    }
}

/// Parses `true`/`false` case-insensitively.
pub fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_list(inner: &ValueType, raw: &str) -> Result<Value, ConversionError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::List(Vec::new()));
    }

    if trimmed.starts_with('[') {
        let items: Vec<serde_json::Value> =
            serde_json::from_str(trimmed).map_err(|err| ConversionError::MalformedList {
                value: raw.to_string(),
                detail: err.to_string(),
            })?;
        return items
            .iter()
            .map(|item| match item {
                serde_json::Value::String(s) => inner.parse(s),
                other => inner.parse(&other.to_string()),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List);
    }

    trimmed
        .split(',')
        .map(|item| inner.parse(item.trim()))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::List)
}

/// Typed extraction from a bound [`Value`].
///
/// Command bodies use this (through `BoundArguments::get`) to turn bound
/// values into concrete Rust types.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::{FromValue, Value};
///
/// let n = i64::from_value(&Value::Integer(-128)).unwrap();
/// assert_eq!(n, -128);
/// assert!(bool::from_value(&Value::Integer(1)).is_err());
/// ```
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, ValueMismatch>;
}

fn mismatch(expected: &'static str, value: &Value) -> ValueMismatch {
    ValueMismatch {
        expected,
        found: value.to_string(),
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Path(p) => Ok(p.display().to_string()),
            other => Err(mismatch("string", other)),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::Integer(n) => Ok(*n),
            other => Err(mismatch("integer", other)),
        }
    }
}

macro_rules! narrow_integer {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Result<Self, ValueMismatch> {
                    match value {
                        Value::Integer(n) => {
                            <$ty>::try_from(*n).map_err(|_| mismatch(stringify!($ty), value))
                        }
                        other => Err(mismatch(stringify!($ty), other)),
                    }
                }
            }
        )*
    };
}

narrow_integer!(i32, u32, usize);

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::Float(n) => Ok(*n),
            Value::Integer(n) => Ok(*n as f64),
            other => Err(mismatch("float", other)),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(mismatch("bool", other)),
        }
    }
}

impl FromValue for PathBuf {
    fn from_value(value: &Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::Path(p) => Ok(p.clone()),
            Value::String(s) => Ok(PathBuf::from(s)),
            other => Err(mismatch("path", other)),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::List(items) => items.iter().map(T::from_value).collect(),
            other => Err(mismatch("list", other)),
        }
    }
}
