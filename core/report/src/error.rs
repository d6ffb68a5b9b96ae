//! FILENAME: core/report/src/error.rs

use engine::EngineError;
use export::ExportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Invalid report configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Export(#[from] ExportError),
}
