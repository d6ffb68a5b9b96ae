//! FILENAME: core/export/src/xlsx_writer.rs

use crate::artifact::{artifact_file_name, Artifact};
use crate::error::ExportError;
use crate::{validate_rows, OutputFormat, RenderMetadata, Renderer};
use projection_engine::{ProjectedValue, Projection};
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};

/// Excel caps worksheet names at 31 characters.
const MAX_SHEET_NAME_CHARS: usize = 31;
const FALLBACK_SHEET_NAME: &str = "Reporte";
const HEADER_FILL: u32 = 0xD9E1F2;

/// Single-worksheet workbook: bold header row with the projection labels,
/// numeric values as numeric cells, text as string cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XlsxRenderer;

impl Renderer for XlsxRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Spreadsheet
    }

    fn render(&self, projection: &Projection, metadata: &RenderMetadata) -> Result<Artifact, ExportError> {
        validate_rows(projection)?;

        let mut xlsx = Workbook::new();
        let header_format = Format::new()
            .set_bold()
            .set_background_color(Color::RGB(HEADER_FILL))
            .set_border(FormatBorder::Thin);

        let worksheet = xlsx.add_worksheet();
        worksheet.set_name(sanitize_sheet_name(&metadata.title).as_str())?;

        for (col, label) in projection.labels.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, label, &header_format)?;
        }

        for (index, row) in projection.rows.iter().enumerate() {
            let xlsx_row = index as u32 + 1;
            for (col, value) in row.values().enumerate() {
                match value {
                    ProjectedValue::Number(n) => {
                        worksheet.write_number(xlsx_row, col as u16, *n)?;
                    }
                    ProjectedValue::Text(s) => {
                        worksheet.write_string(xlsx_row, col as u16, s)?;
                    }
                }
            }
        }

        if !projection.labels.is_empty() {
            let last_col = projection.labels.len() as u16 - 1;
            worksheet.autofilter(0, 0, projection.len() as u32, last_col)?;
            worksheet.set_freeze_panes(1, 0)?;
        }
        worksheet.autofit();

        let bytes = xlsx.save_to_buffer()?;
        log::debug!("xlsx: {} rows, {} bytes", projection.len(), bytes.len());

        Ok(Artifact {
            format: OutputFormat::Spreadsheet,
            file_name: artifact_file_name(&metadata.base_filename, OutputFormat::Spreadsheet),
            bytes,
            rows: projection.len(),
        })
    }
}

/// Worksheet name Excel will accept: no `[]:*?/\`, no leading or trailing
/// apostrophe, at most 31 characters.
pub fn sanitize_sheet_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .collect();
    let truncated: String = cleaned
        .trim()
        .trim_matches('\'')
        .chars()
        .take(MAX_SHEET_NAME_CHARS)
        .collect();
    let name = truncated.trim();

    // "History" is reserved by Excel.
    if name.is_empty() || name.eq_ignore_ascii_case("history") {
        FALLBACK_SHEET_NAME.to_string()
    } else {
        name.to_string()
    }
}
