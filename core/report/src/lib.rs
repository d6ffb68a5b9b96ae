//! FILENAME: core/report/src/lib.rs
//! Report generation for orders, providers and products.
//!
//! Ties the workspace crates into a single synchronous call: a validated
//! `ReportConfig` selects records (`engine`), summarizes them
//! (`summary-engine`), projects them into labelled rows
//! (`projection-engine`) and renders one artifact (`export`).
//!
//! No state survives between calls and no logger is installed; hosts pick
//! a `log` backend.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod subject;
pub mod time_frame;

pub use config::{ReportConfig, DEFAULT_TITLE};
pub use error::ReportError;
pub use pipeline::{build_filter, generate_report, sort_spec, ReportOutput};
pub use subject::{ReportSubject, ORDER_COMPLETION_BASELINE, PROVIDER_ACTIVITY_BASELINE};
pub use time_frame::{DateBounds, TimeFrame};

pub use export::{write_artifact, Artifact, OutputFormat};
