//! FILENAME: core/engine/src/record.rs
//! PURPOSE: The field-access layer shared by every record kind.
//! CONTEXT: Each kind (order, provider, product) declares a closed field enum
//! with a fixed type per field. Pipeline stages are generic over `Record` and
//! address data only through that enum, so an unknown key is rejected once at
//! parse time instead of silently reading nothing.

use crate::value::{FieldType, FieldValue};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};

/// The record kinds flowing through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordKind {
    Order,
    Provider,
    Product,
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Order => "order",
            RecordKind::Provider => "provider",
            RecordKind::Product => "product",
        };
        f.write_str(name)
    }
}

/// A derivable key of one record kind.
pub trait RecordField: Copy + Eq + Debug + 'static {
    /// Kind the field belongs to.
    const KIND: RecordKind;

    /// Every field, in declaration order.
    const ALL: &'static [Self];

    /// Wire key, as used by the record source and report configuration.
    fn key(self) -> &'static str;

    fn field_type(self) -> FieldType;

    /// Resolves a wire key. `None` for keys this kind does not know.
    fn parse(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }
}

/// A typed record. Implementations never fail: missing data resolves to
/// `FieldValue::Empty`.
pub trait Record {
    type Field: RecordField;

    fn id(&self) -> &str;

    fn value(&self, field: Self::Field) -> FieldValue;

    /// Status key compared by the status predicate (`None` when the kind or
    /// the record has no status).
    fn status_key(&self) -> Option<&str>;
}
