//! A small top-down page cursor over `printpdf`, which itself only knows
//! absolute coordinates measured from the bottom-left corner.

use crate::error::ReportError;
use image::{DynamicImage, GenericImageView};
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point,
};

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 10.0;
pub const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;

const PT_TO_MM: f32 = 0.3528;
// Helvetica's average glyph width is close to half the font size.
const AVG_GLYPH_EM: f32 = 0.5;

const LAYER_NAME: &str = "Content";

/// Approximate rendered width of `text` at `size` points, in millimetres.
pub fn text_width_mm(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVG_GLYPH_EM * PT_TO_MM
}

/// Greedy word wrap so each line fits in `width_mm` at `size` points.
pub fn wrap(text: &str, size: f32, width_mm: f32) -> Vec<String> {
    let max_chars = ((width_mm / (size * AVG_GLYPH_EM * PT_TO_MM)) as usize).max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Shortens `text` with a trailing "..." so it fits in `width_mm`.
pub fn fit(text: &str, size: f32, width_mm: f32) -> String {
    if text_width_mm(text, size) <= width_mm {
        return text.to_string();
    }
    let max_chars = (width_mm / (size * AVG_GLYPH_EM * PT_TO_MM)) as usize;
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

/// Writes content top to bottom, starting a new page when the current one fills.
pub struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// Distance from the top edge of the page, in millimetres.
    cursor: f32,
    pages: usize,
}

impl PageWriter {
    pub fn new(title: &str) -> Result<Self, ReportError> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            cursor: MARGIN_MM,
            pages: 1,
        })
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = MARGIN_MM;
        self.pages += 1;
    }

    /// Starts a new page unless `height` more millimetres fit on this one.
    pub fn ensure_space(&mut self, height: f32) {
        if self.cursor + height > PAGE_HEIGHT_MM - MARGIN_MM {
            self.new_page();
        }
    }

    /// Moves the cursor down.
    pub fn ln(&mut self, height: f32) {
        self.cursor += height;
    }

    /// A full-width line of text, left aligned or centred, then a line break.
    pub fn line(&mut self, text: &str, size: f32, weight: Weight, height: f32, centred: bool) {
        self.ensure_space(height);
        let x = if centred {
            MARGIN_MM + ((CONTENT_WIDTH_MM - text_width_mm(text, size)) / 2.0).max(0.0)
        } else {
            MARGIN_MM
        };
        self.put_text(text, size, weight, x, height);
        self.cursor += height;
    }

    /// A bordered cell at `x` on the current row. Does not move the cursor.
    pub fn cell(&self, x: f32, width: f32, height: f32, text: &str, size: f32, weight: Weight) {
        let top = PAGE_HEIGHT_MM - self.cursor;
        let bottom = top - height;
        let border = Line {
            points: vec![
                (Point::new(Mm(x), Mm(top)), false),
                (Point::new(Mm(x + width), Mm(top)), false),
                (Point::new(Mm(x + width), Mm(bottom)), false),
                (Point::new(Mm(x), Mm(bottom)), false),
            ],
            is_closed: true,
        };
        self.layer.add_line(border);

        let padding = 1.0;
        let text = fit(text, size, width - 2.0 * padding);
        self.put_text(&text, size, weight, x + padding, height);
    }

    /// Places an image at the left margin, scaled to `max_width` and at most
    /// `max_height` millimetres, and moves the cursor below it.
    pub fn image(&mut self, image: &DynamicImage, max_width: f32, max_height: f32) {
        let (px_width, px_height) = image.dimensions();
        if px_width == 0 || px_height == 0 {
            return;
        }

        let aspect = px_height as f32 / px_width as f32;
        let mut width = max_width;
        let mut height = width * aspect;
        if height > max_height {
            height = max_height;
            width = height / aspect;
        }

        self.ensure_space(height);
        let dpi = px_width as f32 * 25.4 / width;
        let rgb = DynamicImage::ImageRgb8(image.to_rgb8());

        Image::from_dynamic_image(&rgb).add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(MARGIN_MM)),
                translate_y: Some(Mm(PAGE_HEIGHT_MM - self.cursor - height)),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
        self.cursor += height;
    }

    /// Serializes the finished document.
    pub fn finish(self) -> Result<Vec<u8>, ReportError> {
        self.doc.save_to_bytes().map_err(pdf_error)
    }

    /// Writes `text` vertically centred in a band of `height` starting at the cursor.
    fn put_text(&self, text: &str, size: f32, weight: Weight, x: f32, height: f32) {
        let font = match weight {
            Weight::Regular => &self.regular,
            Weight::Bold => &self.bold,
        };
        let baseline = PAGE_HEIGHT_MM - self.cursor - height / 2.0 - size * PT_TO_MM * 0.35;
        self.layer.use_text(text, size, Mm(x), Mm(baseline), font);
    }
}

fn pdf_error<E: std::fmt::Debug>(e: E) -> ReportError {
    ReportError::Pdf(format!("{:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        // 10pt Helvetica fits ~22 characters in 40 mm
        let lines = wrap("Consider improving value addition strategies.", 10.0, 40.0);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 22));
        assert_eq!(lines.join(" "), "Consider improving value addition strategies.");
    }

    #[test]
    fn short_text_is_not_wrapped() {
        assert_eq!(wrap("- fine", 10.0, CONTENT_WIDTH_MM), vec!["- fine".to_string()]);
    }

    #[test]
    fn fit_truncates_long_names() {
        let fitted = fit("An exceptionally long cooperative name", 10.0, 38.0);
        assert!(fitted.ends_with("..."));
        assert!(text_width_mm(&fitted, 10.0) <= 38.0);
        assert_eq!(fit("Farmer", 10.0, 38.0), "Farmer");
    }

    #[test]
    fn new_page_when_full() {
        let mut writer = PageWriter::new("test").unwrap();
        for _ in 0..30 {
            writer.line("row", 10.0, Weight::Regular, 10.0, false);
        }
        assert_eq!(writer.pages(), 2);
    }
}
