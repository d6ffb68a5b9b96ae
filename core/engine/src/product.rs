//! FILENAME: core/engine/src/product.rs
//! PURPOSE: Catalog products, each optionally linked to one provider.

use crate::order::ProviderRef;
use crate::record::{Record, RecordField, RecordKind};
use crate::value::{FieldType, FieldValue};
use crate::wire;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,
    #[serde(rename = "precio", default, deserialize_with = "wire::opt_number")]
    pub price: Option<f64>,
    #[serde(rename = "proveedor_id", default, deserialize_with = "wire::opt_id")]
    pub provider_id: Option<String>,
    #[serde(rename = "proveedor", default)]
    pub provider: Option<ProviderRef>,
    #[serde(rename = "stock", default, deserialize_with = "wire::opt_number")]
    pub stock: Option<f64>,
    #[serde(rename = "unidad", default)]
    pub unit: Option<String>,
    /// Delivery window in days.
    #[serde(rename = "tiempo_entrega", default, deserialize_with = "wire::opt_number")]
    pub delivery_days: Option<f64>,
}

impl Product {
    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_ref().and_then(|p| p.name.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductField {
    Id,
    Name,
    Description,
    Category,
    Price,
    ProviderId,
    ProviderName,
    Stock,
    Unit,
    DeliveryDays,
}

impl RecordField for ProductField {
    const KIND: RecordKind = RecordKind::Product;

    const ALL: &'static [Self] = &[
        ProductField::Id,
        ProductField::Name,
        ProductField::Description,
        ProductField::Category,
        ProductField::Price,
        ProductField::ProviderId,
        ProductField::ProviderName,
        ProductField::Stock,
        ProductField::Unit,
        ProductField::DeliveryDays,
    ];

    fn key(self) -> &'static str {
        match self {
            ProductField::Id => "id",
            ProductField::Name => "nombre",
            ProductField::Description => "descripcion",
            ProductField::Category => "categoria",
            ProductField::Price => "precio",
            ProductField::ProviderId => "proveedor_id",
            ProductField::ProviderName => "proveedor",
            ProductField::Stock => "stock",
            ProductField::Unit => "unidad",
            ProductField::DeliveryDays => "tiempo_entrega",
        }
    }

    fn field_type(self) -> FieldType {
        match self {
            ProductField::Price | ProductField::Stock | ProductField::DeliveryDays => {
                FieldType::Number
            }
            _ => FieldType::Text,
        }
    }
}

impl Record for Product {
    type Field = ProductField;

    fn id(&self) -> &str {
        &self.id
    }

    fn value(&self, field: ProductField) -> FieldValue {
        match field {
            ProductField::Id => FieldValue::text(&self.id),
            ProductField::Name => FieldValue::opt_text(self.name.as_deref()),
            ProductField::Description => FieldValue::opt_text(self.description.as_deref()),
            ProductField::Category => FieldValue::opt_text(self.category.as_deref()),
            ProductField::Price => FieldValue::opt_number(self.price),
            ProductField::ProviderId => FieldValue::opt_text(self.provider_id.as_deref()),
            ProductField::ProviderName => FieldValue::opt_text(self.provider_name()),
            ProductField::Stock => FieldValue::opt_number(self.stock),
            ProductField::Unit => FieldValue::opt_text(self.unit.as_deref()),
            ProductField::DeliveryDays => FieldValue::opt_number(self.delivery_days),
        }
    }

    /// Products carry no status.
    fn status_key(&self) -> Option<&str> {
        None
    }
}
