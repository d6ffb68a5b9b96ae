//! FILENAME: core/export/src/lib.rs
//! Report Export Module
//!
//! Renders projected report rows into delimited text, a spreadsheet or a
//! paginated document. The three renderers are independent implementations
//! of one `Renderer` capability, selected by `OutputFormat`; none of them
//! re-derives data, they only lay out what the projection already holds.

mod artifact;
mod csv_writer;
mod error;
mod pdf_layout;
mod pdf_writer;
mod xlsx_writer;

pub use artifact::{artifact_file_name, write_artifact, Artifact};
pub use csv_writer::CsvRenderer;
pub use error::ExportError;
pub use pdf_layout::{footer_text, DocumentLayout, PageGeometry, PageSlice};
pub use pdf_writer::PdfRenderer;
pub use xlsx_writer::{sanitize_sheet_name, XlsxRenderer};

use chrono::NaiveDateTime;
use projection_engine::Projection;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// OUTPUT FORMAT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[serde(alias = "csv")]
    Csv,
    #[serde(alias = "xlsx", alias = "excel")]
    Spreadsheet,
    #[serde(alias = "pdf")]
    Document,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Spreadsheet => "xlsx",
            OutputFormat::Document => "pdf",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Csv => "text/csv;charset=utf-8",
            OutputFormat::Spreadsheet => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            OutputFormat::Document => "application/pdf",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

// ============================================================================
// RENDERING
// ============================================================================

/// Descriptive data every artifact carries alongside its rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderMetadata {
    pub title: String,
    pub generated_at: NaiveDateTime,
    /// File name without extension.
    pub base_filename: String,
}

impl RenderMetadata {
    pub fn new(title: impl Into<String>, generated_at: NaiveDateTime, base_filename: impl Into<String>) -> Self {
        RenderMetadata {
            title: title.into(),
            generated_at,
            base_filename: base_filename.into(),
        }
    }

    pub fn timestamp_text(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Renderer tuning that is not part of the report itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub csv_delimiter: u8,
    /// Prefix CSV output with a UTF-8 BOM so spreadsheet apps detect the
    /// encoding of accented labels.
    pub csv_bom: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            csv_delimiter: b',',
            csv_bom: false,
        }
    }
}

/// One output format.
pub trait Renderer {
    fn format(&self) -> OutputFormat;

    fn render(&self, projection: &Projection, metadata: &RenderMetadata) -> Result<Artifact, ExportError>;
}

/// Renderer for `format`.
pub fn renderer_for(format: OutputFormat, options: &RenderOptions) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Csv => Box::new(CsvRenderer::new(options.csv_delimiter, options.csv_bom)),
        OutputFormat::Spreadsheet => Box::new(XlsxRenderer),
        OutputFormat::Document => Box::new(PdfRenderer::default()),
    }
}

/// Checks that every row carries exactly the projection's labels, in order.
/// Renderers call this before producing any output.
pub fn validate_rows(projection: &Projection) -> Result<(), ExportError> {
    for (index, row) in projection.rows.iter().enumerate() {
        let matches = row.cells.len() == projection.labels.len()
            && row.labels().zip(projection.labels.iter()).all(|(a, b)| a == b);
        if !matches {
            return Err(ExportError::MalformedRow {
                row: index,
                expected: projection.labels.clone(),
                found: row.labels().map(str::to_string).collect(),
            });
        }
    }

    if projection.is_empty() {
        log::warn!("rendering an empty report; artifact will hold the header only");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use projection_engine::{ProjectedCell, ProjectedRow, ProjectedValue};

    fn cell(label: &str, value: &str) -> ProjectedCell {
        ProjectedCell {
            label: label.to_string(),
            value: ProjectedValue::Text(value.to_string()),
        }
    }

    #[test]
    fn test_output_format_names() {
        assert_eq!(OutputFormat::Spreadsheet.extension(), "xlsx");
        let parsed: OutputFormat = serde_json::from_str("\"pdf\"").unwrap();
        assert_eq!(parsed, OutputFormat::Document);
        let excel: OutputFormat = serde_json::from_str("\"excel\"").unwrap();
        assert_eq!(excel, OutputFormat::Spreadsheet);
    }

    #[test]
    fn test_validate_rows_rejects_mismatched_shape() {
        let projection = Projection {
            labels: vec!["A".into(), "B".into()],
            rows: vec![
                ProjectedRow { cells: vec![cell("A", "1"), cell("B", "2")] },
                ProjectedRow { cells: vec![cell("A", "1")] },
            ],
        };
        match validate_rows(&projection) {
            Err(ExportError::MalformedRow { row, .. }) => assert_eq!(row, 1),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_every_renderer_rejects_malformed_rows() {
        let projection = Projection {
            labels: vec!["A".into()],
            rows: vec![ProjectedRow { cells: vec![cell("B", "x")] }],
        };
        let metadata = RenderMetadata::new("t", chrono::NaiveDateTime::default(), "t");
        for format in [OutputFormat::Csv, OutputFormat::Spreadsheet, OutputFormat::Document] {
            let renderer = renderer_for(format, &RenderOptions::default());
            assert!(matches!(
                renderer.render(&projection, &metadata),
                Err(ExportError::MalformedRow { .. })
            ));
        }
    }
}
