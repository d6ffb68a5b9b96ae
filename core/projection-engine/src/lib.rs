//! FILENAME: core/projection-engine/src/lib.rs
//! Column projection for the report pipeline.
//!
//! Turns typed records into rows of `{label, value}` pairs, independent of
//! the output format. Every row of one projection carries the same ordered
//! label set; values a record cannot supply become the `N/A` placeholder.
//!
//! Layers:
//! - `definition`: Detail levels, sections, date locales
//! - `format`: Display formatting for currency, numbers and dates
//! - `columns`: Per-kind column tables
//! - `projector`: The projection itself
//! - `view`: Projected rows handed to the renderers

pub mod columns;
pub mod definition;
pub mod format;
pub mod projector;
pub mod view;

pub use columns::{Column, ColumnGroup, Projectable};
pub use definition::*;
pub use format::{format_currency, format_number, format_short_date};
pub use projector::{project, selected_columns};
pub use view::*;
