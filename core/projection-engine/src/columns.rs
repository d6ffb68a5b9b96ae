//! FILENAME: core/projection-engine/src/columns.rs
//! PURPOSE: Column tables per record kind.
//! CONTEXT: A column extracts one display value from a record. Returning
//! `None` means the record cannot supply it (missing field or missing linked
//! reference) and the projector substitutes the placeholder.

use chrono::NaiveDateTime;
use engine::{Order, Product, Provider, Record};

use crate::definition::{DateLocale, Section};
use crate::format::{format_currency, format_short_date};
use crate::view::ProjectedValue;

/// Which part of a projection a column belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnGroup {
    Base,
    Detail,
    Section(Section),
}

/// A labelled value extractor.
pub struct Column<R> {
    pub label: &'static str,
    pub group: ColumnGroup,
    pub extract: fn(&R, DateLocale) -> Option<ProjectedValue>,
}

impl<R> Column<R> {
    fn new(
        label: &'static str,
        group: ColumnGroup,
        extract: fn(&R, DateLocale) -> Option<ProjectedValue>,
    ) -> Self {
        Column {
            label,
            group,
            extract,
        }
    }
}

/// Records that know how to lay themselves out as report rows.
pub trait Projectable: Record + Sized {
    /// All columns of the kind, in display order.
    fn columns() -> Vec<Column<Self>>;
}

const BASE: ColumnGroup = ColumnGroup::Base;
const DETAIL: ColumnGroup = ColumnGroup::Detail;
const PROVIDER: ColumnGroup = ColumnGroup::Section(Section::ProviderDetails);
const PRODUCT: ColumnGroup = ColumnGroup::Section(Section::ProductDetails);

// ============================================================================
// VALUE HELPERS
// ============================================================================

fn text(value: Option<&str>) -> Option<ProjectedValue> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| ProjectedValue::Text(s.to_string()))
}

fn number(value: Option<f64>) -> Option<ProjectedValue> {
    value.map(ProjectedValue::Number)
}

fn currency(value: Option<f64>) -> Option<ProjectedValue> {
    value.map(|v| ProjectedValue::Text(format_currency(v)))
}

fn date(value: Option<NaiveDateTime>, locale: DateLocale) -> Option<ProjectedValue> {
    value.map(|d| ProjectedValue::Text(format_short_date(d, locale)))
}

fn label(value: &'static str) -> Option<ProjectedValue> {
    Some(ProjectedValue::Text(value.to_string()))
}

// ============================================================================
// ORDERS
// ============================================================================

impl Projectable for Order {
    fn columns() -> Vec<Column<Self>> {
        let col = Column::<Order>::new;

        vec![
            col("Nº Pedido", BASE, |o, _| {
                text(o.order_number.as_deref()).or_else(|| text(Some(o.id.as_str())))
            }),
            col("Fecha", BASE, |o, locale| date(o.order_date, locale)),
            col("Proveedor", BASE, |o, _| text(o.provider_name())),
            col("Producto", BASE, |o, _| text(o.product_name())),
            col("Cantidad", BASE, |o, _| number(o.quantity)),
            col("Total", BASE, |o, _| currency(o.total_amount())),
            col("Estado", BASE, |o, _| label(o.status.label())),
            col("Fecha de Entrega", DETAIL, |o, locale| date(o.delivery_date, locale)),
            col("Precio Unitario", DETAIL, |o, _| currency(o.unit_price)),
            col("Notas", DETAIL, |o, _| text(o.notes.as_deref())),
            col("Contacto del Proveedor", PROVIDER, |o, _| {
                text(o.provider.as_ref().and_then(|p| p.contact.as_deref()))
            }),
            col("Email del Proveedor", PROVIDER, |o, _| {
                text(o.provider.as_ref().and_then(|p| p.email.as_deref()))
            }),
            col("Teléfono del Proveedor", PROVIDER, |o, _| {
                text(o.provider.as_ref().and_then(|p| p.phone.as_deref()))
            }),
            col("Calificación del Proveedor", PROVIDER, |o, _| {
                number(o.provider.as_ref().and_then(|p| p.rating))
            }),
            col("Categoría del Producto", PRODUCT, |o, _| {
                text(o.product.as_ref().and_then(|p| p.category.as_deref()))
            }),
            col("Precio de Lista", PRODUCT, |o, _| {
                currency(o.product.as_ref().and_then(|p| p.price))
            }),
            col("Unidad", PRODUCT, |o, _| {
                text(o.product.as_ref().and_then(|p| p.unit.as_deref()))
            }),
        ]
    }
}

// ============================================================================
// PROVIDERS
// ============================================================================

impl Projectable for Provider {
    fn columns() -> Vec<Column<Self>> {
        let col = Column::<Provider>::new;

        vec![
            col("Nombre", BASE, |p, _| text(p.name.as_deref())),
            col("Categoría", BASE, |p, _| text(p.category.as_deref())),
            col("Contacto", BASE, |p, _| text(p.contact.as_deref())),
            col("Email", BASE, |p, _| text(p.email.as_deref())),
            col("Teléfono", BASE, |p, _| text(p.phone.as_deref())),
            col("Calificación", BASE, |p, _| number(p.rating)),
            col("Estado", BASE, |p, _| label(p.status_label())),
            col("Dirección", DETAIL, |p, _| text(p.address.as_deref())),
            col("Tiempo de Entrega (días)", DETAIL, |p, _| number(p.delivery_days)),
            col("Fecha de Registro", DETAIL, |p, locale| date(p.registered_at, locale)),
        ]
    }
}

// ============================================================================
// PRODUCTS
// ============================================================================

impl Projectable for Product {
    fn columns() -> Vec<Column<Self>> {
        let col = Column::<Product>::new;

        vec![
            col("Nombre", BASE, |p, _| text(p.name.as_deref())),
            col("Categoría", BASE, |p, _| text(p.category.as_deref())),
            col("Precio", BASE, |p, _| currency(p.price)),
            col("Stock", BASE, |p, _| number(p.stock)),
            col("Unidad", BASE, |p, _| text(p.unit.as_deref())),
            col("Descripción", DETAIL, |p, _| text(p.description.as_deref())),
            col("Tiempo de Entrega (días)", DETAIL, |p, _| number(p.delivery_days)),
            col("Proveedor", PROVIDER, |p, _| text(p.provider_name())),
            col("Contacto del Proveedor", PROVIDER, |p, _| {
                text(p.provider.as_ref().and_then(|r| r.contact.as_deref()))
            }),
            col("Email del Proveedor", PROVIDER, |p, _| {
                text(p.provider.as_ref().and_then(|r| r.email.as_deref()))
            }),
        ]
    }
}
