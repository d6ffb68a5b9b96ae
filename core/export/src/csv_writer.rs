//! FILENAME: core/export/src/csv_writer.rs
//! Delimited text output. One header line with the projection labels, then
//! one line per row; fields are quoted only when they contain the
//! delimiter, a quote or a line break.

use crate::artifact::{artifact_file_name, Artifact};
use crate::error::ExportError;
use crate::{validate_rows, OutputFormat, RenderMetadata, Renderer};
use csv::{QuoteStyle, WriterBuilder};
use projection_engine::Projection;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvRenderer {
    delimiter: u8,
    bom: bool,
}

impl CsvRenderer {
    pub fn new(delimiter: u8, bom: bool) -> Self {
        CsvRenderer { delimiter, bom }
    }
}

impl Default for CsvRenderer {
    fn default() -> Self {
        CsvRenderer::new(b',', false)
    }
}

impl Renderer for CsvRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Csv
    }

    fn render(&self, projection: &Projection, metadata: &RenderMetadata) -> Result<Artifact, ExportError> {
        validate_rows(projection)?;

        let mut buffer = Vec::new();
        if self.bom {
            buffer.extend_from_slice(UTF8_BOM);
        }

        {
            let mut writer = WriterBuilder::new()
                .delimiter(self.delimiter)
                .quote_style(QuoteStyle::Necessary)
                .from_writer(&mut buffer);

            writer.write_record(&projection.labels)?;
            for row in &projection.rows {
                writer.write_record(row.values().map(|v| v.display()))?;
            }
            writer.flush()?;
        }

        log::debug!("csv: {} rows, {} bytes", projection.len(), buffer.len());

        Ok(Artifact {
            format: OutputFormat::Csv,
            file_name: artifact_file_name(&metadata.base_filename, OutputFormat::Csv),
            bytes: buffer,
            rows: projection.len(),
        })
    }
}
