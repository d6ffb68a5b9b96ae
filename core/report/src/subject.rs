//! FILENAME: core/report/src/subject.rs
//! PURPOSE: Binds each record kind to the fields a report reads.
//! CONTEXT: The pipeline is generic; everything kind-specific (which date
//! a time frame applies to, what free text searches, what gets ranked and
//! grouped, the default order) lives in these three impls.

use engine::{
    Order, OrderField, OrderStatus, Product, ProductField, Provider, ProviderField, SortDirection,
    SortSpec, PROVIDER_ACTIVE, PROVIDER_INACTIVE,
};
use projection_engine::Projectable;
use summary_engine::SummaryConfig;

/// Share of received orders the completion heuristic compares against.
pub const ORDER_COMPLETION_BASELINE: f64 = 80.0;
/// Share of active providers the activity heuristic compares against.
pub const PROVIDER_ACTIVITY_BASELINE: f64 = 90.0;

const ORDER_STATUSES: [&str; 5] = [
    OrderStatus::Pendiente.key(),
    OrderStatus::EnProceso.key(),
    OrderStatus::Enviado.key(),
    OrderStatus::Recibido.key(),
    OrderStatus::Cancelado.key(),
];

pub trait ReportSubject: Projectable {
    /// Field the time frame applies to; kinds without one ignore it.
    const DATE_FIELD: Option<Self::Field>;
    const SEARCH_FIELDS: &'static [Self::Field];
    /// Field bounded by `minValue` / `maxValue`.
    const VALUE_FIELD: Self::Field;
    const PROVIDER_KEY: Option<Self::Field>;
    const PRODUCT_KEY: Option<Self::Field>;
    /// Accepted `status` values; empty when the kind has no status.
    const STATUSES: &'static [&'static str];

    fn summary_config(item_count: usize) -> SummaryConfig<Self::Field>;

    fn default_sort() -> SortSpec<Self::Field>;
}

impl ReportSubject for Order {
    const DATE_FIELD: Option<OrderField> = Some(OrderField::OrderDate);
    const SEARCH_FIELDS: &'static [OrderField] = &[
        OrderField::OrderNumber,
        OrderField::ProviderName,
        OrderField::ProductName,
        OrderField::Notes,
    ];
    const VALUE_FIELD: OrderField = OrderField::Total;
    const PROVIDER_KEY: Option<OrderField> = Some(OrderField::ProviderId);
    const PRODUCT_KEY: Option<OrderField> = Some(OrderField::ProductId);
    const STATUSES: &'static [&'static str] = &ORDER_STATUSES;

    fn summary_config(item_count: usize) -> SummaryConfig<OrderField> {
        SummaryConfig::new(OrderField::Total, OrderField::ProviderName)
            .with_top_n(item_count)
            .with_rating(OrderField::ProviderRating)
            .with_growth(OrderStatus::Recibido.key(), ORDER_COMPLETION_BASELINE)
    }

    fn default_sort() -> SortSpec<OrderField> {
        SortSpec::new(OrderField::OrderDate, SortDirection::Desc)
    }
}

impl ReportSubject for Provider {
    const DATE_FIELD: Option<ProviderField> = Some(ProviderField::RegisteredAt);
    const SEARCH_FIELDS: &'static [ProviderField] = &[
        ProviderField::Name,
        ProviderField::Contact,
        ProviderField::Email,
        ProviderField::Category,
    ];
    const VALUE_FIELD: ProviderField = ProviderField::Rating;
    const PROVIDER_KEY: Option<ProviderField> = Some(ProviderField::Id);
    const PRODUCT_KEY: Option<ProviderField> = None;
    const STATUSES: &'static [&'static str] = &[PROVIDER_ACTIVE, PROVIDER_INACTIVE];

    fn summary_config(item_count: usize) -> SummaryConfig<ProviderField> {
        SummaryConfig::new(ProviderField::Rating, ProviderField::Category)
            .with_top_n(item_count)
            .with_rating(ProviderField::Rating)
            .with_growth(PROVIDER_ACTIVE, PROVIDER_ACTIVITY_BASELINE)
    }

    fn default_sort() -> SortSpec<ProviderField> {
        SortSpec::new(ProviderField::Name, SortDirection::Asc)
    }
}

impl ReportSubject for Product {
    const DATE_FIELD: Option<ProductField> = None;
    const SEARCH_FIELDS: &'static [ProductField] = &[
        ProductField::Name,
        ProductField::Description,
        ProductField::Category,
        ProductField::ProviderName,
    ];
    const VALUE_FIELD: ProductField = ProductField::Price;
    const PROVIDER_KEY: Option<ProductField> = Some(ProductField::ProviderId);
    const PRODUCT_KEY: Option<ProductField> = Some(ProductField::Id);
    const STATUSES: &'static [&'static str] = &[];

    fn summary_config(item_count: usize) -> SummaryConfig<ProductField> {
        SummaryConfig::new(ProductField::Price, ProductField::Category).with_top_n(item_count)
    }

    fn default_sort() -> SortSpec<ProductField> {
        SortSpec::new(ProductField::Name, SortDirection::Asc)
    }
}
