// File: ./src/render/recording.rs
// In-memory `Canvas` that keeps every drawing operation, for previews and assertions.
use super::{Canvas, FontHandle};
use crate::color_utils::Rgb;
use crate::error::CalendarResult;
use crate::fonts::{FontSource, LoadedFont};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        text: String,
        font: FontHandle,
        size_pt: f32,
        x: f32,
        y: f32,
        color: Rgb,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        line_pt: f32,
    },
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
    },
}

#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub registered: Vec<FontSource>,
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text drawn with its top-left-origin position, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, f32, f32)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, x, y, .. } => Some((text.as_str(), *x, *y)),
            _ => None,
        })
    }

    /// Texts whose anchor lies inside the given rectangle.
    pub fn texts_within(&self, x: f32, y: f32, width: f32, height: f32) -> Vec<&str> {
        self.texts()
            .filter(|(_, tx, ty)| *tx >= x && *tx <= x + width && *ty >= y && *ty <= y + height)
            .map(|(text, _, _)| text)
            .collect()
    }

    pub fn font_of(&self, handle: FontHandle) -> Option<&FontSource> {
        self.registered.get(handle.0)
    }
}

impl Canvas for RecordingCanvas {
    fn register_font(&mut self, font: &LoadedFont) -> CalendarResult<FontHandle> {
        self.registered.push(font.key().clone());
        Ok(FontHandle(self.registered.len() - 1))
    }

    fn draw_text(&mut self, text: &str, font: FontHandle, size_pt: f32, x: f32, y: f32, color: Rgb) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            font,
            size_pt,
            x,
            y,
            color,
        });
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, line_pt: f32, _color: Rgb) {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            line_pt,
        });
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, _color: Rgb) {
        self.ops.push(DrawOp::Circle { cx, cy, radius });
    }
}
