// File: ./src/render/pdf.rs
// `Canvas` backed by a single printpdf page.
use super::{Canvas, FontHandle};
use crate::color_utils::Rgb;
use crate::error::{CalendarError, CalendarResult};
use crate::fonts::{BuiltinFace, FontSource, LoadedFont};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::utils::calculate_points_for_circle;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon,
};

fn to_builtin(face: BuiltinFace) -> BuiltinFont {
    match face {
        BuiltinFace::Helvetica => BuiltinFont::Helvetica,
        BuiltinFace::HelveticaBold => BuiltinFont::HelveticaBold,
        BuiltinFace::HelveticaOblique => BuiltinFont::HelveticaOblique,
        BuiltinFace::HelveticaBoldOblique => BuiltinFont::HelveticaBoldOblique,
        BuiltinFace::TimesRoman => BuiltinFont::TimesRoman,
        BuiltinFace::TimesBold => BuiltinFont::TimesBold,
        BuiltinFace::TimesItalic => BuiltinFont::TimesItalic,
        BuiltinFace::TimesBoldItalic => BuiltinFont::TimesBoldItalic,
        BuiltinFace::Courier => BuiltinFont::Courier,
        BuiltinFace::CourierBold => BuiltinFont::CourierBold,
        BuiltinFace::CourierOblique => BuiltinFont::CourierOblique,
        BuiltinFace::CourierBoldOblique => BuiltinFont::CourierBoldOblique,
    }
}

fn pdf_color((r, g, b): Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(r, g, b, None))
}

pub struct PdfCanvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Vec<IndirectFontRef>,
    page_height: f32,
}

impl PdfCanvas {
    /// One page of `width` x `height` millimeters.
    pub fn new(title: &str, width: f32, height: f32) -> Self {
        let (doc, page, layer) = PdfDocument::new(title, Mm(width), Mm(height), "Calendar");
        let layer = doc.get_page(page).get_layer(layer);
        Self {
            doc,
            layer,
            fonts: Vec::new(),
            page_height: height,
        }
    }

    // printpdf measures from the bottom-left corner.
    fn point(&self, x: f32, y: f32) -> Point {
        Point::new(Mm(x), Mm(self.page_height - y))
    }

    pub fn finish(self) -> CalendarResult<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| CalendarError::Render(format!("failed to serialize PDF: {}", e)))
    }
}

impl Canvas for PdfCanvas {
    fn register_font(&mut self, font: &LoadedFont) -> CalendarResult<FontHandle> {
        let font_ref = match font.key() {
            FontSource::Builtin(face) => self.doc.add_builtin_font(to_builtin(*face)),
            FontSource::File { path, .. } => {
                let bytes = font.bytes().ok_or_else(|| CalendarError::FontLoad {
                    path: path.clone(),
                    reason: "font data was not loaded".to_string(),
                })?;
                self.doc.add_external_font(bytes)
            }
        }
        .map_err(|e| CalendarError::Render(format!("cannot embed {}: {}", font.resolved, e)))?;

        self.fonts.push(font_ref);
        Ok(FontHandle(self.fonts.len() - 1))
    }

    fn draw_text(&mut self, text: &str, font: FontHandle, size_pt: f32, x: f32, y: f32, color: Rgb) {
        let Some(font_ref) = self.fonts.get(font.0) else {
            log::error!("Unknown font handle {:?}; skipping '{}'", font, text);
            return;
        };
        self.layer.set_fill_color(pdf_color(color));
        self.layer
            .use_text(text, size_pt, Mm(x), Mm(self.page_height - y), font_ref);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, line_pt: f32, color: Rgb) {
        self.layer.set_outline_color(pdf_color(color));
        self.layer.set_outline_thickness(line_pt);
        let points = vec![
            (self.point(x, y), false),
            (self.point(x + width, y), false),
            (self.point(x + width, y + height), false),
            (self.point(x, y + height), false),
        ];
        self.layer.add_line(Line {
            points,
            is_closed: true,
        });
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb) {
        self.layer.set_fill_color(pdf_color(color));
        let points =
            calculate_points_for_circle(Mm(radius), Mm(cx), Mm(self.page_height - cy));
        self.layer.add_polygon(Polygon {
            rings: vec![points],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::{FontRegistry, FontSearchPath};

    #[test]
    fn test_shapes_and_text_serialize() {
        let mut registry = FontRegistry::new(FontSearchPath::new(Vec::new()));
        let resolved = registry.resolve("Helvetica-Bold").unwrap();
        let font = registry.load(&resolved).unwrap();

        let mut canvas = PdfCanvas::new("2026", 100.0, 50.0);
        let handle = canvas.register_font(&font).unwrap();
        canvas.stroke_rect(5.0, 5.0, 26.0, 40.0, 1.0, (0.25, 0.25, 0.25));
        canvas.fill_circle(10.0, 40.0, 0.6, (0.6, 0.6, 0.6));
        canvas.draw_text("25", handle, 16.0, 7.0, 12.0, (0.1, 0.1, 0.1));
        // Unknown handles are skipped, not fatal.
        canvas.draw_text("x", FontHandle(9), 16.0, 7.0, 12.0, (0.1, 0.1, 0.1));

        let bytes = canvas.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
