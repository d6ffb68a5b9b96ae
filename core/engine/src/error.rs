//! FILENAME: core/engine/src/error.rs

use crate::record::RecordKind;
use crate::value::FieldType;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Cannot sort {kind} records by '{field}'")]
    InvalidSortField { field: String, kind: RecordKind },

    #[error("Invalid sort direction '{0}' (expected 'asc' or 'desc')")]
    InvalidSortDirection(String),

    #[error("Field '{field}' is {actual:?}, expected {expected:?}")]
    FieldTypeMismatch {
        field: &'static str,
        expected: FieldType,
        actual: FieldType,
    },

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Malformed {kind} record at index {index}: {reason}")]
    MalformedRecord {
        kind: RecordKind,
        index: usize,
        reason: String,
    },
}
