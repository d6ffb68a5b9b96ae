//! FILENAME: core/projection-engine/src/view.rs
//! Projection View - Format-independent report rows.

use serde::{Deserialize, Serialize};

use crate::format::format_number;

/// A projected cell value. Numbers stay numeric so spreadsheet output can
/// write numeric cells; everything else is already display text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProjectedValue {
    Text(String),
    Number(f64),
}

impl ProjectedValue {
    pub fn display(&self) -> String {
        match self {
            ProjectedValue::Text(s) => s.clone(),
            ProjectedValue::Number(n) => format_number(*n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedCell {
    pub label: String,
    pub value: ProjectedValue,
}

/// One report row: ordered `{label, value}` pairs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectedRow {
    pub cells: Vec<ProjectedCell>,
}

impl ProjectedRow {
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|c| c.label.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &ProjectedValue> {
        self.cells.iter().map(|c| &c.value)
    }

    pub fn get(&self, label: &str) -> Option<&ProjectedValue> {
        self.cells.iter().find(|c| c.label == label).map(|c| &c.value)
    }
}

/// The projected rows plus their shared header. The header is known even
/// when there are no rows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Projection {
    pub labels: Vec<String>,
    pub rows: Vec<ProjectedRow>,
}

impl Projection {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
