//! FILENAME: core/engine/src/provider.rs
//! PURPOSE: Provider (supplier) records.

use crate::record::{Record, RecordField, RecordKind};
use crate::timestamp;
use crate::value::{FieldType, FieldValue};
use crate::wire;
use chrono::NaiveDateTime;
use serde::Deserialize;

/// Status keys exposed by providers to the status predicate.
pub const PROVIDER_ACTIVE: &str = "activo";
pub const PROVIDER_INACTIVE: &str = "inactivo";

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Provider {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "contacto", default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,
    #[serde(rename = "calificacion", default, deserialize_with = "wire::opt_number")]
    pub rating: Option<f64>,
    /// Typical delivery window in days.
    #[serde(rename = "tiempo_entrega", default, deserialize_with = "wire::opt_number")]
    pub delivery_days: Option<f64>,
    #[serde(rename = "activo", default = "default_active")]
    pub active: bool,
    #[serde(rename = "fecha_registro", default, deserialize_with = "timestamp::option::deserialize")]
    pub registered_at: Option<NaiveDateTime>,
}

impl Provider {
    pub fn status_label(&self) -> &'static str {
        if self.active {
            "Activo"
        } else {
            "Inactivo"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderField {
    Id,
    Name,
    Contact,
    Email,
    Phone,
    Address,
    Category,
    Rating,
    DeliveryDays,
    Active,
    Status,
    RegisteredAt,
}

impl RecordField for ProviderField {
    const KIND: RecordKind = RecordKind::Provider;

    const ALL: &'static [Self] = &[
        ProviderField::Id,
        ProviderField::Name,
        ProviderField::Contact,
        ProviderField::Email,
        ProviderField::Phone,
        ProviderField::Address,
        ProviderField::Category,
        ProviderField::Rating,
        ProviderField::DeliveryDays,
        ProviderField::Active,
        ProviderField::Status,
        ProviderField::RegisteredAt,
    ];

    fn key(self) -> &'static str {
        match self {
            ProviderField::Id => "id",
            ProviderField::Name => "nombre",
            ProviderField::Contact => "contacto",
            ProviderField::Email => "email",
            ProviderField::Phone => "telefono",
            ProviderField::Address => "direccion",
            ProviderField::Category => "categoria",
            ProviderField::Rating => "calificacion",
            ProviderField::DeliveryDays => "tiempo_entrega",
            ProviderField::Active => "activo",
            ProviderField::Status => "estado",
            ProviderField::RegisteredAt => "fecha_registro",
        }
    }

    fn field_type(self) -> FieldType {
        match self {
            ProviderField::Rating | ProviderField::DeliveryDays => FieldType::Number,
            ProviderField::Active => FieldType::Bool,
            ProviderField::RegisteredAt => FieldType::Date,
            _ => FieldType::Text,
        }
    }
}

impl Record for Provider {
    type Field = ProviderField;

    fn id(&self) -> &str {
        &self.id
    }

    fn value(&self, field: ProviderField) -> FieldValue {
        match field {
            ProviderField::Id => FieldValue::text(&self.id),
            ProviderField::Name => FieldValue::opt_text(self.name.as_deref()),
            ProviderField::Contact => FieldValue::opt_text(self.contact.as_deref()),
            ProviderField::Email => FieldValue::opt_text(self.email.as_deref()),
            ProviderField::Phone => FieldValue::opt_text(self.phone.as_deref()),
            ProviderField::Address => FieldValue::opt_text(self.address.as_deref()),
            ProviderField::Category => FieldValue::opt_text(self.category.as_deref()),
            ProviderField::Rating => FieldValue::opt_number(self.rating),
            ProviderField::DeliveryDays => FieldValue::opt_number(self.delivery_days),
            ProviderField::Active => FieldValue::Bool(self.active),
            ProviderField::Status => FieldValue::text(self.status_key().unwrap_or_default()),
            ProviderField::RegisteredAt => FieldValue::opt_date(self.registered_at),
        }
    }

    fn status_key(&self) -> Option<&str> {
        Some(if self.active {
            PROVIDER_ACTIVE
        } else {
            PROVIDER_INACTIVE
        })
    }
}
