// Crate root library declaration and module exports.
pub mod cli;
pub mod color_utils;
pub mod compose;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod fonts;
pub mod grid;
pub mod render;

use crate::error::{CalendarResult, Warning};
use crate::events::ParsedEvents;
use crate::fonts::{FontRegistry, FontSearchPath, FontSelection, FontSet};
use crate::grid::GridCell;
use crate::render::{Canvas, Layout, Palette};

/// Inputs of a render besides year, title, fonts and events.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub search_path: FontSearchPath,
    pub palette: Palette,
    pub layout: Layout,
}

#[derive(Debug)]
pub struct RenderedCalendar {
    pub pdf: Vec<u8>,
    /// Event lines that were skipped or overridden.
    pub warnings: Vec<Warning>,
}

// Fonts first: a missing font fails the run before any grid work.
fn prepare(
    year: i32,
    selection: &FontSelection,
    events: &ParsedEvents,
    options: &RenderOptions,
) -> CalendarResult<(FontSet, Vec<GridCell>)> {
    let mut registry = FontRegistry::new(options.search_path.clone());
    let fonts = registry.load_font_set(selection)?;
    let cells = grid::build_grid(year, &events.events);
    Ok((fonts, cells))
}

/// Resolves fonts, builds the grid and draws it onto `canvas`.
pub fn render_calendar_to<C: Canvas + ?Sized>(
    canvas: &mut C,
    year: i32,
    title: &str,
    selection: &FontSelection,
    events: &ParsedEvents,
    options: &RenderOptions,
) -> CalendarResult<()> {
    let (fonts, cells) = prepare(year, selection, events, options)?;
    compose::compose_onto(canvas, title, &cells, &fonts, &options.palette, &options.layout)
}

/// Renders the calendar for `year` into PDF bytes.
///
/// Every call uses its own font registry, so concurrent calls share nothing
/// but the font directories on disk.
pub fn render_calendar(
    year: i32,
    title: &str,
    selection: &FontSelection,
    events: &ParsedEvents,
    options: &RenderOptions,
) -> CalendarResult<RenderedCalendar> {
    log::info!(
        "Rendering {} '{}' with fonts ({}, {}, {})",
        year,
        title,
        selection.regular,
        selection.bold,
        selection.title_name()
    );
    let (fonts, cells) = prepare(year, selection, events, options)?;
    let pdf = compose::compose(title, &cells, &fonts, &options.palette, &options.layout)?;

    Ok(RenderedCalendar {
        pdf,
        warnings: events.warnings.clone(),
    })
}
