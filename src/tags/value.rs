//! Tag values and their coercion rules.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The value held by a tag.
///
/// Serialized untagged so a JSON document can carry plain `true`, `42`
/// or `"text"` literals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    /// Discrete signal
    Bool(bool),
    /// Analog value, timer accumulator, or counter value
    Number(f64),
    /// Free-form text
    Text(String),
}

impl TagValue {
    /// Boolean view of the value.
    ///
    /// Numbers are true when non-zero (NaN is false), text when non-empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            TagValue::Bool(b) => *b,
            TagValue::Number(n) => *n != 0.0 && !n.is_nan(),
            TagValue::Text(s) => !s.is_empty(),
        }
    }

    /// Numeric view of the value.
    ///
    /// Booleans map to 1/0. Text never converts to a number and reads as 0.
    pub fn as_number(&self) -> f64 {
        match self {
            TagValue::Bool(true) => 1.0,
            TagValue::Bool(false) => 0.0,
            TagValue::Number(n) => *n,
            TagValue::Text(_) => 0.0,
        }
    }

    /// Parse an editor-style literal: `true`/`false`, a number, or text.
    pub fn parse_literal(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "true" | "on" => return TagValue::Bool(true),
            "false" | "off" => return TagValue::Bool(false),
            _ => {}
        }
        match trimmed.parse::<f64>() {
            Ok(n) => TagValue::Number(n),
            Err(_) => TagValue::Text(trimmed.to_string()),
        }
    }

    /// Short type name for display.
    pub fn type_name(&self) -> &'static str {
        match self {
            TagValue::Bool(_) => "BOOL",
            TagValue::Number(_) => "REAL",
            TagValue::Text(_) => "STRING",
        }
    }
}

impl Default for TagValue {
    fn default() -> Self {
        TagValue::Bool(false)
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            TagValue::Number(n) => write!(f, "{}", n),
            TagValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<bool> for TagValue {
    fn from(value: bool) -> Self {
        TagValue::Bool(value)
    }
}

impl From<f64> for TagValue {
    fn from(value: f64) -> Self {
        TagValue::Number(value)
    }
}

impl From<i32> for TagValue {
    fn from(value: i32) -> Self {
        TagValue::Number(value as f64)
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        TagValue::Text(value.to_string())
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        TagValue::Text(value)
    }
}
