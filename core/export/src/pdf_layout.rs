//! FILENAME: core/export/src/pdf_layout.rs
//! PURPOSE: Page layout for the document renderer.
//! CONTEXT: Pagination, column widths and cell text fitting are computed
//! here without touching the PDF library, so the layout is testable on its
//! own. All measurements are millimetres.

use std::ops::Range;

/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.5;
const PT_TO_MM: f32 = 0.3528;
const ELLIPSIS: &str = "...";

/// Page geometry. The default is A4 landscape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub row_height: f32,
    /// Height reserved on the first page for the title and timestamp.
    pub title_block: f32,
    /// Height reserved at the bottom of every page for the footer.
    pub footer_block: f32,
    pub font_size: f32,
    pub cell_padding: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry {
            width: 297.0,
            height: 210.0,
            margin: 15.0,
            row_height: 7.0,
            title_block: 18.0,
            footer_block: 10.0,
            font_size: 9.0,
            cell_padding: 1.5,
        }
    }
}

impl PageGeometry {
    /// Y coordinate of the top edge of the table header.
    pub fn table_top(&self, first_page: bool) -> f32 {
        let top = self.height - self.margin;
        if first_page {
            top - self.title_block
        } else {
            top
        }
    }

    pub fn table_bottom(&self) -> f32 {
        self.margin + self.footer_block
    }

    pub fn usable_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Data rows that fit under the header on one page. Never less than one.
    pub fn rows_per_page(&self, first_page: bool) -> usize {
        let available = self.table_top(first_page) - self.table_bottom();
        let slots = (available / self.row_height).floor() as usize;
        slots.saturating_sub(1).max(1)
    }
}

/// The rows one page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice {
    /// 1-based page number.
    pub number: usize,
    pub rows: Range<usize>,
    pub shows_title: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLayout {
    pub pages: Vec<PageSlice>,
}

impl DocumentLayout {
    /// Splits `row_count` rows over pages. An empty report still gets one
    /// page carrying the title and header.
    pub fn paginate(row_count: usize, geometry: &PageGeometry) -> Self {
        let mut pages = Vec::new();
        let mut start = 0;

        loop {
            let first = pages.is_empty();
            let end = (start + geometry.rows_per_page(first)).min(row_count);
            pages.push(PageSlice {
                number: pages.len() + 1,
                rows: start..end,
                shows_title: first,
            });
            if end >= row_count {
                break;
            }
            start = end;
        }

        DocumentLayout { pages }
    }

    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    /// Footer line printed at the bottom of `slice`.
    pub fn footer(&self, slice: &PageSlice) -> String {
        footer_text(slice.number, self.total_pages())
    }

    /// Footer lines for every page, in page order.
    pub fn footers(&self) -> Vec<String> {
        self.pages.iter().map(|slice| self.footer(slice)).collect()
    }
}

pub fn footer_text(page: usize, total: usize) -> String {
    format!("Page {} of {}", page, total)
}

/// Equal column widths across the usable page width.
pub fn column_widths(columns: usize, geometry: &PageGeometry) -> Vec<f32> {
    if columns == 0 {
        return Vec::new();
    }
    vec![geometry.usable_width() / columns as f32; columns]
}

/// Cuts `text` so it fits in a cell `width` wide, ending in `...` when cut.
pub fn fit_text(text: &str, width: f32, geometry: &PageGeometry) -> String {
    let glyph = geometry.font_size * PT_TO_MM * AVG_GLYPH_EM;
    let room = ((width - 2.0 * geometry.cell_padding) / glyph).floor().max(0.0) as usize;

    if text.chars().count() <= room {
        return text.to_string();
    }
    if room <= ELLIPSIS.len() {
        return text.chars().take(room).collect();
    }
    let mut cut: String = text.chars().take(room - ELLIPSIS.len()).collect();
    cut.push_str(ELLIPSIS);
    cut
}
