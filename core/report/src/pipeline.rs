//! FILENAME: core/report/src/pipeline.rs
//! PURPOSE: One report invocation, start to finish.
//! CONTEXT: validate -> filter -> sort -> summarize -> project -> render.
//! Every option is checked before the first record is read. Input records
//! are only borrowed; the output references them through the summary.

use chrono::{NaiveDate, NaiveDateTime};
use engine::{filter, sort, FilterSpec, RecordField, Selection, SortSpec};
use export::{renderer_for, Artifact, OutputFormat};
use projection_engine::project;
use summary_engine::{chart_series, summarize, AggregateResult, ChartData};

use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::subject::ReportSubject;
use crate::time_frame::TimeFrame;

/// What one report invocation produces.
pub struct ReportOutput<'a, R> {
    pub artifact: Artifact,
    pub summary: AggregateResult<'a, R>,
    pub chart: ChartData,
    /// Column labels of the rendered table.
    pub labels: Vec<String>,
}

impl<R> ReportOutput<'_, R> {
    /// True when no record survived filtering. The artifact is still valid.
    pub fn is_empty(&self) -> bool {
        self.summary.count == 0
    }
}

/// Filter for `config` as of `today`. Fails on options the kind cannot
/// honour (an unknown status, a foreign key it does not carry) and on
/// predicates `FilterSpec::validate` rejects.
pub fn build_filter<R: ReportSubject>(
    config: &ReportConfig,
    today: NaiveDate,
) -> Result<FilterSpec<R::Field>, ReportError> {
    let kind = <R::Field as RecordField>::KIND;
    let mut spec = FilterSpec::new();

    if let Selection::Only(status) = &config.status {
        if !R::STATUSES.contains(&status.as_str()) {
            return Err(ReportError::InvalidConfig(format!(
                "status {:?} does not apply to {} records",
                status, kind
            )));
        }
        spec = spec.with_status(config.status.clone());
    }

    match R::DATE_FIELD {
        Some(field) => {
            let bounds = config.date_bounds(today);
            if !bounds.is_unbounded() {
                spec = spec.with_date_range(field, bounds.from, bounds.to);
            }
        }
        None if config.time_frame != TimeFrame::All => {
            log::warn!("{} records carry no date; time frame ignored", kind);
        }
        None => {}
    }

    for (selection, key, name) in [
        (&config.provider_id, R::PROVIDER_KEY, "providerId"),
        (&config.product_id, R::PRODUCT_KEY, "productId"),
    ] {
        if selection.is_all() {
            continue;
        }
        match key {
            Some(field) => spec = spec.with_foreign_key(field, selection.clone()),
            None => {
                return Err(ReportError::InvalidConfig(format!(
                    "{} does not apply to {} records",
                    name, kind
                )))
            }
        }
    }

    let query = config.search.trim();
    if !query.is_empty() {
        spec = spec.with_free_text(query, R::SEARCH_FIELDS.to_vec());
    }

    if config.min_value.is_some() || config.max_value.is_some() {
        spec = spec.with_numeric_range(R::VALUE_FIELD, config.min_value, config.max_value);
    }

    spec.validate()?;
    Ok(spec)
}

/// The requested sort, or the kind's default order when none is named.
pub fn sort_spec<R: ReportSubject>(config: &ReportConfig) -> Result<SortSpec<R::Field>, ReportError> {
    match config.sort_field.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => Ok(SortSpec::parse(key, config.sort_direction)?),
        _ => Ok(R::default_sort()),
    }
}

/// Builds one report over `records`. `now` stamps the artifact and anchors
/// relative time frames.
pub fn generate_report<'a, R: ReportSubject>(
    records: &'a [R],
    config: &ReportConfig,
    format: OutputFormat,
    now: NaiveDateTime,
) -> Result<ReportOutput<'a, R>, ReportError> {
    let kind = <R::Field as RecordField>::KIND;

    config.validate()?;
    let filter_spec = build_filter::<R>(config, now.date())?;
    let sort_spec = sort_spec::<R>(config)?;
    let summary_config = R::summary_config(config.item_count);
    let projection_spec = config.projection_spec();

    if records.is_empty() {
        log::warn!("no {} records supplied for report {:?}", kind, config.report_title);
    }

    let filtered = filter::apply(records, &filter_spec);
    log::debug!("{} of {} {} records passed the filter", filtered.len(), records.len(), kind);

    let sorted = sort::apply(filtered, &sort_spec);

    let summary = summarize(&sorted, &summary_config);
    let chart = chart_series(&sorted, config.chart_type, summary_config.group_by, R::DATE_FIELD);

    let projection = project(&sorted, &projection_spec);
    log::debug!(
        "projected {} rows with {} columns",
        projection.len(),
        projection.labels.len()
    );

    let renderer = renderer_for(format, &config.render_options());
    let artifact = renderer.render(&projection, &config.render_metadata(now))?;

    log::info!(
        "generated {} report {:?}: {} rows, {} bytes",
        format,
        artifact.file_name,
        artifact.rows,
        artifact.bytes.len()
    );

    Ok(ReportOutput {
        artifact,
        summary,
        chart,
        labels: projection.labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{EngineError, Order, OrderField, Product, Provider};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_build_filter_defaults_to_no_predicates() {
        let spec = build_filter::<Order>(&ReportConfig::default(), today()).unwrap();
        assert!(spec.date_range.is_none());
        assert!(spec.status.is_all());
        assert!(spec.foreign_keys.is_empty());
        assert!(spec.free_text.is_none());
        assert!(spec.numeric_range.is_none());
    }

    #[test]
    fn test_build_filter_rejects_unknown_status() {
        let config = ReportConfig { status: Selection::only("perdido"), ..ReportConfig::default() };
        assert!(matches!(
            build_filter::<Order>(&config, today()),
            Err(ReportError::InvalidConfig(_))
        ));
        assert!(build_filter::<Product>(&config, today()).is_err());
    }

    #[test]
    fn test_build_filter_provider_status_and_product_key() {
        let active = ReportConfig { status: Selection::only("activo"), ..ReportConfig::default() };
        assert!(build_filter::<Provider>(&active, today()).is_ok());

        let by_product = ReportConfig { product_id: Selection::only("7"), ..ReportConfig::default() };
        assert!(build_filter::<Provider>(&by_product, today()).is_err());
        let spec = build_filter::<Order>(&by_product, today()).unwrap();
        assert_eq!(spec.foreign_keys, vec![(OrderField::ProductId, Selection::only("7"))]);
    }

    #[test]
    fn test_build_filter_month_range() {
        let config = ReportConfig { time_frame: TimeFrame::Month, ..ReportConfig::default() };
        let spec = build_filter::<Order>(&config, today()).unwrap();
        let range = spec.date_range.unwrap();
        assert_eq!(range.field, OrderField::OrderDate);
        assert_eq!(range.from, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(range.to, Some(today()));
    }

    #[test]
    fn test_sort_spec_unknown_field() {
        let config = ReportConfig { sort_field: Some("color".into()), ..ReportConfig::default() };
        match sort_spec::<Order>(&config) {
            Err(ReportError::Engine(EngineError::InvalidSortField { field, .. })) => {
                assert_eq!(field, "color")
            }
            other => panic!("unexpected result: {:?}", other.map(|s| s.field)),
        }
    }

    #[test]
    fn test_sort_spec_default() {
        let spec = sort_spec::<Order>(&ReportConfig::default()).unwrap();
        assert_eq!(spec, Order::default_sort());
    }
}
