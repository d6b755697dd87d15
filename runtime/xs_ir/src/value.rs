//! Stack values.

use std::fmt;
use std::sync::Arc;

/// A value on the shared stack.
///
/// Text is reference counted: pushing a string literal from the registry
/// shares its storage instead of copying it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Value {
    Char(char),
    Int(i64),
    Real(f64),
    Text(Arc<str>),
}

impl Value {
    /// Create a text value.
    pub fn text(s: impl Into<Arc<str>>) -> Self {
        Value::Text(s.into())
    }

    /// Human-readable name of the literal kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Char(_) => "character",
            Value::Int(_) => "integer",
            Value::Real(_) => "real",
            Value::Text(_) => "text",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Char(_) | Value::Real(_) | Value::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&Arc<str>> {
        match self {
            Value::Text(s) => Some(s),
            Value::Char(_) | Value::Int(_) | Value::Real(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Char(c) => write!(f, "{c}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Real(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Real(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(Arc::from(s))
    }
}

#[cfg(test)]
mod tests;
