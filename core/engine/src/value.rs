//! FILENAME: core/engine/src/value.rs
//! PURPOSE: The typed value a record field resolves to.
//! CONTEXT: Filter, sort, summary and projection stages never look at raw
//! JSON; they ask a record for a `FieldValue` through its field enum.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Declared type of a record field. Fixed per field, independent of the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    Text,
    Number,
    Date,
    Bool,
}

/// A resolved field value. `Empty` stands for a missing value or a missing
/// linked reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
    Bool(bool),
}

impl FieldValue {
    pub fn text(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }

    /// Lifts an optional string, treating blank text as missing.
    pub fn opt_text(value: Option<&str>) -> Self {
        match value {
            Some(s) if !s.trim().is_empty() => FieldValue::Text(s.to_string()),
            _ => FieldValue::Empty,
        }
    }

    pub fn opt_number(value: Option<f64>) -> Self {
        value.map(FieldValue::Number).unwrap_or(FieldValue::Empty)
    }

    pub fn opt_date(value: Option<NaiveDateTime>) -> Self {
        value.map(FieldValue::Date).unwrap_or(FieldValue::Empty)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Text used for free-text search and grouping. Numbers drop a
    /// trailing `.0`, dates use ISO form.
    pub fn display_value(&self) -> String {
        match self {
            FieldValue::Empty => String::new(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            FieldValue::Date(d) => d.date().format("%Y-%m-%d").to_string(),
            FieldValue::Bool(b) => b.to_string(),
        }
    }
}
