//! FILENAME: core/engine/src/order.rs
//! PURPOSE: Purchase orders and the references they carry.
//! CONTEXT: The record source expands one level of foreign keys, so an order
//! already holds its provider's and product's display data. Nothing here
//! resolves references on its own.

use crate::record::{Record, RecordField, RecordKind};
use crate::timestamp;
use crate::value::{FieldType, FieldValue};
use crate::wire;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ============================================================================
// ORDER STATUS
// ============================================================================

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pendiente,
    #[serde(alias = "procesando", alias = "en proceso")]
    EnProceso,
    Enviado,
    Recibido,
    Cancelado,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pendiente,
        OrderStatus::EnProceso,
        OrderStatus::Enviado,
        OrderStatus::Recibido,
        OrderStatus::Cancelado,
    ];

    /// Wire key, as stored by the record source.
    pub const fn key(self) -> &'static str {
        match self {
            OrderStatus::Pendiente => "pendiente",
            OrderStatus::EnProceso => "en_proceso",
            OrderStatus::Enviado => "enviado",
            OrderStatus::Recibido => "recibido",
            OrderStatus::Cancelado => "cancelado",
        }
    }

    /// Display label used in rendered reports.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pendiente => "Pendiente",
            OrderStatus::EnProceso => "En Proceso",
            OrderStatus::Enviado => "Enviado",
            OrderStatus::Recibido => "Recibido",
            OrderStatus::Cancelado => "Cancelado",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

// ============================================================================
// EXPANDED REFERENCES
// ============================================================================

/// Provider data expanded onto an order or product.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProviderRef {
    #[serde(default, deserialize_with = "wire::opt_id")]
    pub id: Option<String>,
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "contacto", default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "calificacion", default, deserialize_with = "wire::opt_number")]
    pub rating: Option<f64>,
}

/// Product data expanded onto an order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductRef {
    #[serde(default, deserialize_with = "wire::opt_id")]
    pub id: Option<String>,
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,
    #[serde(rename = "precio", default, deserialize_with = "wire::opt_number")]
    pub price: Option<f64>,
    #[serde(rename = "unidad", default)]
    pub unit: Option<String>,
}

// ============================================================================
// ORDER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Order {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    #[serde(rename = "numero_pedido", default, deserialize_with = "wire::opt_id")]
    pub order_number: Option<String>,
    #[serde(rename = "fecha_pedido", default, deserialize_with = "timestamp::option::deserialize")]
    pub order_date: Option<NaiveDateTime>,
    #[serde(rename = "fecha_entrega", default, deserialize_with = "timestamp::option::deserialize")]
    pub delivery_date: Option<NaiveDateTime>,
    #[serde(rename = "estado")]
    pub status: OrderStatus,
    #[serde(rename = "proveedor_id", default, deserialize_with = "wire::opt_id")]
    pub provider_id: Option<String>,
    #[serde(rename = "proveedor", default)]
    pub provider: Option<ProviderRef>,
    #[serde(rename = "producto_id", default, deserialize_with = "wire::opt_id")]
    pub product_id: Option<String>,
    #[serde(rename = "producto", default)]
    pub product: Option<ProductRef>,
    #[serde(rename = "cantidad", default, deserialize_with = "wire::opt_number")]
    pub quantity: Option<f64>,
    #[serde(rename = "precio_unitario", default, deserialize_with = "wire::opt_number")]
    pub unit_price: Option<f64>,
    #[serde(rename = "total", default, deserialize_with = "wire::opt_number")]
    pub total: Option<f64>,
    #[serde(rename = "notas", default)]
    pub notes: Option<String>,
}

impl Order {
    /// Stored total, or quantity times unit price when the source left it out.
    pub fn total_amount(&self) -> Option<f64> {
        self.total.or_else(|| match (self.quantity, self.unit_price) {
            (Some(q), Some(p)) => Some(q * p),
            _ => None,
        })
    }

    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_ref().and_then(|p| p.name.as_deref())
    }

    pub fn product_name(&self) -> Option<&str> {
        self.product.as_ref().and_then(|p| p.name.as_deref())
    }
}

/// Derivable keys of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderField {
    Id,
    OrderNumber,
    OrderDate,
    DeliveryDate,
    Status,
    ProviderId,
    ProviderName,
    ProviderRating,
    ProductId,
    ProductName,
    ProductCategory,
    Quantity,
    UnitPrice,
    Total,
    Notes,
}

impl RecordField for OrderField {
    const KIND: RecordKind = RecordKind::Order;

    const ALL: &'static [Self] = &[
        OrderField::Id,
        OrderField::OrderNumber,
        OrderField::OrderDate,
        OrderField::DeliveryDate,
        OrderField::Status,
        OrderField::ProviderId,
        OrderField::ProviderName,
        OrderField::ProviderRating,
        OrderField::ProductId,
        OrderField::ProductName,
        OrderField::ProductCategory,
        OrderField::Quantity,
        OrderField::UnitPrice,
        OrderField::Total,
        OrderField::Notes,
    ];

    fn key(self) -> &'static str {
        match self {
            OrderField::Id => "id",
            OrderField::OrderNumber => "numero_pedido",
            OrderField::OrderDate => "fecha_pedido",
            OrderField::DeliveryDate => "fecha_entrega",
            OrderField::Status => "estado",
            OrderField::ProviderId => "proveedor_id",
            OrderField::ProviderName => "proveedor",
            OrderField::ProviderRating => "calificacion_proveedor",
            OrderField::ProductId => "producto_id",
            OrderField::ProductName => "producto",
            OrderField::ProductCategory => "categoria_producto",
            OrderField::Quantity => "cantidad",
            OrderField::UnitPrice => "precio_unitario",
            OrderField::Total => "total",
            OrderField::Notes => "notas",
        }
    }

    fn field_type(self) -> FieldType {
        match self {
            OrderField::OrderDate | OrderField::DeliveryDate => FieldType::Date,
            OrderField::ProviderRating
            | OrderField::Quantity
            | OrderField::UnitPrice
            | OrderField::Total => FieldType::Number,
            _ => FieldType::Text,
        }
    }
}

impl Record for Order {
    type Field = OrderField;

    fn id(&self) -> &str {
        &self.id
    }

    fn value(&self, field: OrderField) -> FieldValue {
        match field {
            OrderField::Id => FieldValue::text(&self.id),
            OrderField::OrderNumber => FieldValue::opt_text(self.order_number.as_deref()),
            OrderField::OrderDate => FieldValue::opt_date(self.order_date),
            OrderField::DeliveryDate => FieldValue::opt_date(self.delivery_date),
            OrderField::Status => FieldValue::text(self.status.key()),
            OrderField::ProviderId => FieldValue::opt_text(self.provider_id.as_deref()),
            OrderField::ProviderName => FieldValue::opt_text(self.provider_name()),
            OrderField::ProviderRating => {
                FieldValue::opt_number(self.provider.as_ref().and_then(|p| p.rating))
            }
            OrderField::ProductId => FieldValue::opt_text(self.product_id.as_deref()),
            OrderField::ProductName => FieldValue::opt_text(self.product_name()),
            OrderField::ProductCategory => FieldValue::opt_text(
                self.product.as_ref().and_then(|p| p.category.as_deref()),
            ),
            OrderField::Quantity => FieldValue::opt_number(self.quantity),
            OrderField::UnitPrice => FieldValue::opt_number(self.unit_price),
            OrderField::Total => FieldValue::opt_number(self.total_amount()),
            OrderField::Notes => FieldValue::opt_text(self.notes.as_deref()),
        }
    }

    fn status_key(&self) -> Option<&str> {
        Some(self.status.key())
    }
}
