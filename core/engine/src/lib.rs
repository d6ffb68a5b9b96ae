//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Typed record model plus the filter and sort stages.
//! CONTEXT: Everything downstream (summary, projection, export) consumes the
//! types re-exported here. Stages are pure functions over explicit value
//! objects; no state survives a single report request.

pub mod collation;
pub mod decode;
pub mod error;
pub mod filter;
pub mod order;
pub mod product;
pub mod provider;
pub mod record;
pub mod sort;
pub mod timestamp;
pub mod value;
mod wire;

// Re-export commonly used types at the crate root
pub use collation::{compare_text, CollationKey};
pub use decode::{decode_json, decode_records};
pub use error::EngineError;
pub use filter::{DateRange, FilterSpec, FreeText, NumericRange, Selection};
pub use order::{Order, OrderField, OrderStatus, ProductRef, ProviderRef};
pub use product::{Product, ProductField};
pub use provider::{Provider, ProviderField, PROVIDER_ACTIVE, PROVIDER_INACTIVE};
pub use record::{Record, RecordField, RecordKind};
pub use sort::{SortDirection, SortSpec};
pub use timestamp::parse_timestamp;
pub use value::{FieldType, FieldValue};

/// Placeholder rendered for any value a record cannot supply.
pub const PLACEHOLDER: &str = "N/A";
