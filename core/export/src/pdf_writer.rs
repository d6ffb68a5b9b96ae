//! FILENAME: core/export/src/pdf_writer.rs
//! PURPOSE: Paginated document output.
//! CONTEXT: Draws the layout computed by `pdf_layout` with printpdf: title
//! and generation timestamp on the first page, the header row repeated on
//! every page, alternating row shading and a "Page i of N" footer.

use crate::artifact::{artifact_file_name, Artifact};
use crate::error::ExportError;
use crate::pdf_layout::{column_widths, fit_text, DocumentLayout, PageGeometry, PageSlice};
use crate::{validate_rows, OutputFormat, RenderMetadata, Renderer};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect, Rgb,
};
use projection_engine::Projection;

const LAYER_NAME: &str = "Contenido";
const TITLE_SIZE: f32 = 16.0;
const META_SIZE: f32 = 9.0;
const FOOTER_SIZE: f32 = 8.0;
/// Offset from the top of a row to the text baseline.
const BASELINE_OFFSET: f32 = 4.8;

const HEADER_SHADE: (f32, f32, f32) = (0.85, 0.88, 0.95);
const STRIPE_SHADE: (f32, f32, f32) = (0.95, 0.95, 0.95);
const TEXT_COLOR: (f32, f32, f32) = (0.0, 0.0, 0.0);

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PdfRenderer {
    pub geometry: PageGeometry,
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Renderer for PdfRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Document
    }

    fn render(&self, projection: &Projection, metadata: &RenderMetadata) -> Result<Artifact, ExportError> {
        validate_rows(projection)?;

        let geometry = &self.geometry;
        let layout = DocumentLayout::paginate(projection.len(), geometry);
        let total = layout.total_pages();
        let widths = column_widths(projection.labels.len(), geometry);

        let (doc, first_page, first_layer) = PdfDocument::new(
            metadata.title.as_str(),
            Mm(geometry.width),
            Mm(geometry.height),
            LAYER_NAME,
        );
        let fonts = Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?,
        };

        for slice in &layout.pages {
            let (page, layer) = if slice.number == 1 {
                (first_page, first_layer)
            } else {
                doc.add_page(Mm(geometry.width), Mm(geometry.height), LAYER_NAME)
            };
            let canvas = doc.get_page(page).get_layer(layer);

            if slice.shows_title {
                draw_title(&canvas, metadata, geometry, &fonts);
            }
            draw_table(&canvas, projection, slice, &widths, geometry, &fonts);
            draw_footer(&canvas, layout.footer(slice), geometry, &fonts);
        }

        let bytes = doc.save_to_bytes().map_err(pdf_error)?;
        log::debug!("pdf: {} rows over {} pages, {} bytes", projection.len(), total, bytes.len());

        Ok(Artifact {
            format: OutputFormat::Document,
            file_name: artifact_file_name(&metadata.base_filename, OutputFormat::Document),
            bytes,
            rows: projection.len(),
        })
    }
}

fn pdf_error(e: impl std::fmt::Display) -> ExportError {
    ExportError::Pdf(e.to_string())
}

fn fill(canvas: &PdfLayerReference, (r, g, b): (f32, f32, f32)) {
    canvas.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
}

fn draw_title(canvas: &PdfLayerReference, metadata: &RenderMetadata, geometry: &PageGeometry, fonts: &Fonts) {
    let top = geometry.height - geometry.margin;
    fill(canvas, TEXT_COLOR);
    canvas.use_text(metadata.title.as_str(), TITLE_SIZE, Mm(geometry.margin), Mm(top - 7.0), &fonts.bold);
    canvas.use_text(
        format!("Generado: {}", metadata.timestamp_text()),
        META_SIZE,
        Mm(geometry.margin),
        Mm(top - 13.0),
        &fonts.regular,
    );
}

fn draw_table(
    canvas: &PdfLayerReference,
    projection: &Projection,
    slice: &PageSlice,
    widths: &[f32],
    geometry: &PageGeometry,
    fonts: &Fonts,
) {
    let left = geometry.margin;
    let right = geometry.width - geometry.margin;
    let mut top = geometry.table_top(slice.shows_title);

    shade_row(canvas, left, right, top, geometry.row_height, HEADER_SHADE);
    fill(canvas, TEXT_COLOR);
    let labels = projection.labels.iter().map(String::as_str);
    draw_cells(canvas, labels, widths, top, geometry, &fonts.bold);
    top -= geometry.row_height;

    for (stripe, index) in slice.rows.clone().enumerate() {
        if stripe % 2 == 1 {
            shade_row(canvas, left, right, top, geometry.row_height, STRIPE_SHADE);
            fill(canvas, TEXT_COLOR);
        }
        let values: Vec<String> = projection.rows[index].values().map(|v| v.display()).collect();
        draw_cells(canvas, values.iter().map(String::as_str), widths, top, geometry, &fonts.regular);
        top -= geometry.row_height;
    }
}

fn shade_row(canvas: &PdfLayerReference, left: f32, right: f32, top: f32, height: f32, shade: (f32, f32, f32)) {
    fill(canvas, shade);
    canvas.add_rect(Rect::new(Mm(left), Mm(top - height), Mm(right), Mm(top)));
}

fn draw_cells<'a>(
    canvas: &PdfLayerReference,
    texts: impl Iterator<Item = &'a str>,
    widths: &[f32],
    top: f32,
    geometry: &PageGeometry,
    font: &IndirectFontRef,
) {
    let mut x = geometry.margin;
    for (text, width) in texts.zip(widths) {
        canvas.use_text(
            fit_text(text, *width, geometry),
            geometry.font_size,
            Mm(x + geometry.cell_padding),
            Mm(top - BASELINE_OFFSET),
            font,
        );
        x += width;
    }
}

fn draw_footer(canvas: &PdfLayerReference, text: String, geometry: &PageGeometry, fonts: &Fonts) {
    fill(canvas, TEXT_COLOR);
    canvas.use_text(
        text,
        FOOTER_SIZE,
        Mm(geometry.width - geometry.margin - 25.0),
        Mm(geometry.margin),
        &fonts.regular,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use projection_engine::{ProjectedCell, ProjectedRow, ProjectedValue};

    fn metadata() -> RenderMetadata {
        let at = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(9, 30, 0).unwrap();
        RenderMetadata::new("Reporte de Pedidos", at, "pedidos")
    }

    fn projection(rows: usize) -> Projection {
        Projection {
            labels: vec!["Nº Pedido".into(), "Total".into()],
            rows: (0..rows)
                .map(|i| ProjectedRow {
                    cells: vec![
                        ProjectedCell { label: "Nº Pedido".into(), value: ProjectedValue::Text(format!("P-{}", i)) },
                        ProjectedCell { label: "Total".into(), value: ProjectedValue::Number(i as f64) },
                    ],
                })
                .collect(),
        }
    }

    #[test]
    fn test_renders_pdf_bytes() {
        let artifact = PdfRenderer::default().render(&projection(3), &metadata()).unwrap();
        assert!(artifact.bytes.starts_with(b"%PDF"));
        assert_eq!(artifact.file_name, "pedidos.pdf");
        assert_eq!(artifact.rows, 3);
    }

    #[test]
    fn test_empty_projection_still_renders() {
        let artifact = PdfRenderer::default().render(&projection(0), &metadata()).unwrap();
        assert!(artifact.bytes.starts_with(b"%PDF"));
        assert_eq!(artifact.rows, 0);
    }

    #[test]
    fn test_multi_page_document_is_larger() {
        let one = PdfRenderer::default().render(&projection(5), &metadata()).unwrap();
        let many = PdfRenderer::default().render(&projection(120), &metadata()).unwrap();
        assert!(many.bytes.len() > one.bytes.len());
    }
}
