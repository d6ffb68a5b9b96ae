//! FILENAME: core/report/src/config.rs
//! PURPOSE: Report options as received from the settings collaborator.
//! CONTEXT: Deserialized from camelCase JSON with every option defaulted.
//! `validate` runs before any record is touched; nothing here is cached
//! between reports.

use chrono::{NaiveDate, NaiveDateTime};
use engine::{Selection, SortDirection};
use export::{RenderMetadata, RenderOptions};
use projection_engine::{DateLocale, DetailLevel, ProjectionSpec, Section};
use serde::{Deserialize, Serialize};
use summary_engine::{ChartType, DEFAULT_TOP_N};

use crate::error::ReportError;
use crate::time_frame::{DateBounds, TimeFrame};

pub const DEFAULT_TITLE: &str = "Reporte";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportConfig {
    pub time_frame: TimeFrame,
    pub status: Selection,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub include_provider_details: bool,
    pub include_product_details: bool,
    pub report_title: String,
    pub export_type: DetailLevel,
    pub chart_type: ChartType,
    /// Size of the top-N ranking.
    pub item_count: usize,
    pub search: String,
    pub provider_id: Selection,
    pub product_id: Selection,
    /// Inclusive bounds on the kind's value field (order total, provider
    /// rating, product price).
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    /// Field key to sort by; the kind's default order when absent.
    pub sort_field: Option<String>,
    pub sort_direction: SortDirection,
    pub locale: DateLocale,
    /// Base file name without extension; the title when absent.
    pub file_name: Option<String>,
    pub csv_delimiter: char,
    pub csv_bom: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            time_frame: TimeFrame::All,
            status: Selection::All,
            start_date: None,
            end_date: None,
            include_provider_details: false,
            include_product_details: false,
            report_title: DEFAULT_TITLE.to_string(),
            export_type: DetailLevel::Simple,
            chart_type: ChartType::Bar,
            item_count: DEFAULT_TOP_N,
            search: String::new(),
            provider_id: Selection::All,
            product_id: Selection::All,
            min_value: None,
            max_value: None,
            sort_field: None,
            sort_direction: SortDirection::Asc,
            locale: DateLocale::EsEs,
            file_name: None,
            csv_delimiter: ',',
            csv_bom: false,
        }
    }
}

impl ReportConfig {
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        let config: ReportConfig = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Rejects option combinations no report can be built from.
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.time_frame == TimeFrame::Custom {
            match (self.start_date, self.end_date) {
                (Some(start), Some(end)) if start > end => {
                    return Err(invalid(format!(
                        "startDate {} is after endDate {}",
                        start, end
                    )));
                }
                (Some(_), Some(_)) => {}
                _ => return Err(invalid("custom time frame requires startDate and endDate")),
            }
        }

        if self.item_count == 0 {
            return Err(invalid("itemCount must be at least 1"));
        }

        if self.report_title.trim().is_empty() {
            return Err(invalid("reportTitle must not be blank"));
        }

        if let (Some(min), Some(max)) = (self.min_value, self.max_value) {
            if min > max {
                return Err(invalid(format!("minValue {} exceeds maxValue {}", min, max)));
            }
        }

        if !self.csv_delimiter.is_ascii() || matches!(self.csv_delimiter, '"' | '\n' | '\r') {
            return Err(invalid(format!(
                "csvDelimiter {:?} is not a usable delimiter",
                self.csv_delimiter
            )));
        }

        Ok(())
    }

    /// Date bounds of the configured time frame as of `today`.
    pub fn date_bounds(&self, today: NaiveDate) -> DateBounds {
        self.time_frame.resolve(today, self.start_date, self.end_date)
    }

    pub fn projection_spec(&self) -> ProjectionSpec {
        let mut spec = ProjectionSpec::new(self.export_type).with_locale(self.locale);
        if self.include_provider_details {
            spec = spec.with_section(Section::ProviderDetails);
        }
        if self.include_product_details {
            spec = spec.with_section(Section::ProductDetails);
        }
        spec
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            // validate() guarantees an ASCII delimiter
            csv_delimiter: self.csv_delimiter as u8,
            csv_bom: self.csv_bom,
        }
    }

    pub fn render_metadata(&self, generated_at: NaiveDateTime) -> RenderMetadata {
        let base = self
            .file_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.report_title);
        RenderMetadata::new(self.report_title.trim(), generated_at, base)
    }
}

fn invalid(message: impl Into<String>) -> ReportError {
    ReportError::InvalidConfig(message.into())
}
