//! FILENAME: table-core/src/value.rs
//! PURPOSE: Defines the field data carried by a single table cell.
//! CONTEXT: This file contains the `FieldValue` enum, the heterogeneous
//! value a record field can hold. Accessors built into the view scheme
//! produce these; the sort/filter engine and the format registry consume
//! them. It is designed to be lightweight as one instance exists per
//! visible cell.

use serde::{Deserialize, Serialize};

/// The raw data of a single record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }

    /// Returns the plain text coercion of the value.
    /// This is what searching and string sorting operate on,
    /// independent of any display formatting.
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Empty => String::new(),
            FieldValue::Number(n) => {
                // Format without unnecessary decimal places
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            FieldValue::Text(s) => s.clone(),
            FieldValue::Boolean(b) => {
                if *b { "true" } else { "false" }.to_string()
            }
        }
    }

    /// Returns the numeric coercion of the value, or `None` when the
    /// value has no usable numeric interpretation. NaN counts as
    /// unusable so that comparators get a total order.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Empty => None,
            FieldValue::Number(n) => {
                if n.is_nan() {
                    None
                } else {
                    Some(*n)
                }
            }
            FieldValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| !n.is_nan()),
            FieldValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Empty
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}
