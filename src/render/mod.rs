// File: ./src/render/mod.rs
//! Drawing surface abstraction, page geometry and colors.
//!
//! All coordinates handed to a [`Canvas`] are millimeters measured from the
//! top-left corner of the page; text positions are baselines.

pub mod cell;
pub mod pdf;
pub mod recording;

use crate::color_utils::{self, Rgb};
use crate::error::{CalendarError, CalendarResult};
use crate::fonts::{FontSet, FontSource, LoadedFont};

/// Opaque reference to a font registered with a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHandle(pub usize);

pub trait Canvas {
    /// Makes `font` usable for text. Callers register each distinct face once per document.
    fn register_font(&mut self, font: &LoadedFont) -> CalendarResult<FontHandle>;

    fn draw_text(&mut self, text: &str, font: FontHandle, size_pt: f32, x: f32, y: f32, color: Rgb);

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, line_pt: f32, color: Rgb);

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb);
}

/// Backend handles for every face of a [`FontSet`], registered exactly once each.
#[derive(Debug, Default)]
pub struct RegisteredFonts {
    handles: Vec<(FontSource, FontHandle)>,
}

impl RegisteredFonts {
    /// Registers the primary faces, plus the fallback face when `with_fallback` is set
    /// and it differs from all of them.
    pub fn register_all<C: Canvas + ?Sized>(
        canvas: &mut C,
        fonts: &FontSet,
        with_fallback: bool,
    ) -> CalendarResult<Self> {
        let mut faces = fonts.distinct();
        if with_fallback
            && let Some(fallback) = &fonts.fallback
            && !faces.iter().any(|f| f.key() == fallback.key())
        {
            faces.push(fallback);
        }

        let mut registered = Self::default();
        for font in faces {
            let handle = canvas.register_font(font)?;
            log::debug!("Registered font {} as {:?}", font.resolved, handle);
            registered.handles.push((font.key().clone(), handle));
        }
        Ok(registered)
    }

    pub fn handle(&self, font: &LoadedFont) -> CalendarResult<FontHandle> {
        self.handles
            .iter()
            .find(|(key, _)| key == font.key())
            .map(|(_, handle)| *handle)
            .ok_or_else(|| {
                CalendarError::Render(format!("font {} was never registered", font.resolved))
            })
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub base: Rgb,
    pub alert: Rgb,
    pub muted: Rgb,
    pub border: Rgb,
    pub marker: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        let base = (0.1, 0.1, 0.1);
        Self {
            base,
            alert: (0.8, 0.13, 0.13),
            muted: color_utils::muted(base),
            border: (0.25, 0.25, 0.25),
            marker: (0.6, 0.6, 0.6),
        }
    }
}

/// Fixed page and cell geometry, millimeters unless the name says `pt`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub page_width: f32,
    pub page_height: f32,
    pub cell_width: f32,
    pub cell_height: f32,
    pub grid_left: f32,
    pub grid_top: f32,
    pub title_baseline: f32,
    pub title_pt: f32,
    pub padding: f32,
    pub border_pt: f32,
    pub date_pt: f32,
    pub weekday_pt: f32,
    pub event_pt: f32,
    pub month_label_pt: f32,
    pub year_label_pt: f32,
    pub marker_radius: f32,
    pub marker_spacing: f32,
    /// Display columns an event label may use before it is cut with an ellipsis.
    pub label_budget: usize,
}

impl Default for Layout {
    fn default() -> Self {
        // A1 landscape, 31 x 13 cells of 26 x 40 mm centered horizontally.
        let page_width = 841.0;
        let cell_width = 26.0;
        Self {
            page_width,
            page_height: 594.0,
            cell_width,
            cell_height: 40.0,
            grid_left: (page_width - 31.0 * cell_width) / 2.0,
            grid_top: 64.0,
            title_baseline: 44.0,
            title_pt: 80.0,
            padding: 1.8,
            border_pt: 1.0,
            date_pt: 16.0,
            weekday_pt: 9.0,
            event_pt: 7.0,
            month_label_pt: 72.0,
            year_label_pt: 30.0,
            marker_radius: 0.6,
            marker_spacing: 3.5,
            label_budget: 19,
        }
    }
}

impl Layout {
    /// Top-left corner of the cell at `row` (0-based) and `column` (1-based).
    pub fn cell_origin(&self, row: u8, column: u8) -> (f32, f32) {
        (
            self.grid_left + f32::from(column.saturating_sub(1)) * self.cell_width,
            self.grid_top + f32::from(row) * self.cell_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_fits_on_page() {
        let layout = Layout::default();
        let (right, bottom) = layout.cell_origin(12, 31);
        assert!(right + layout.cell_width <= layout.page_width);
        assert!(bottom + layout.cell_height <= layout.page_height);
        assert!(layout.grid_left > 0.0);
        assert!(layout.title_baseline < layout.grid_top);
    }

    #[test]
    fn test_cell_origin() {
        let layout = Layout::default();
        assert_eq!(layout.cell_origin(0, 1), (layout.grid_left, layout.grid_top));
        let (x, y) = layout.cell_origin(2, 3);
        assert!((x - (layout.grid_left + 52.0)).abs() < 1e-4);
        assert!((y - (layout.grid_top + 80.0)).abs() < 1e-4);
    }
}
