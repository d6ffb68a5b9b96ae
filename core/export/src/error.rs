//! FILENAME: core/export/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("PDF write error: {0}")]
    Pdf(String),

    #[error("Malformed row {row}: expected columns {expected:?}, found {found:?}")]
    MalformedRow {
        row: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },
}

