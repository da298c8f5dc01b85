// File: ./src/compose.rs
// Places the title band and every grid cell on the page.
use crate::error::CalendarResult;
use crate::fonts::FontSet;
use crate::grid::GridCell;
use crate::render::cell::{CellContext, cell_uses_fallback, render_cell};
use crate::render::pdf::PdfCanvas;
use crate::render::{Canvas, Layout, Palette, RegisteredFonts};

/// Draws the whole calendar onto `canvas`. Errors propagate as-is; there is no partial output.
pub fn compose_onto<C: Canvas + ?Sized>(
    canvas: &mut C,
    title: &str,
    cells: &[GridCell],
    fonts: &FontSet,
    palette: &Palette,
    layout: &Layout,
) -> CalendarResult<()> {
    // The fallback face is embedded only when some string on the page needs it.
    let with_fallback = fonts.uses_fallback(&fonts.title, title)
        || cells.iter().any(|cell| cell_uses_fallback(cell, fonts));
    let handles = RegisteredFonts::register_all(canvas, fonts, with_fallback)?;

    if !title.is_empty() {
        let face = fonts.face_for(&fonts.title, title);
        let handle = handles.handle(face)?;
        let width = face.text_width_mm(title, layout.title_pt);
        canvas.draw_text(
            title,
            handle,
            layout.title_pt,
            (layout.page_width - width) / 2.0,
            layout.title_baseline,
            palette.base,
        );
    }

    let ctx = CellContext {
        fonts,
        handles: &handles,
        palette,
        layout,
    };
    for cell in cells {
        render_cell(canvas, cell, &ctx)?;
    }
    Ok(())
}

/// Renders to a single-page PDF and returns its bytes.
pub fn compose(
    title: &str,
    cells: &[GridCell],
    fonts: &FontSet,
    palette: &Palette,
    layout: &Layout,
) -> CalendarResult<Vec<u8>> {
    let mut canvas = PdfCanvas::new(title, layout.page_width, layout.page_height);
    compose_onto(&mut canvas, title, cells, fonts, palette, layout)?;
    let bytes = canvas.finish()?;
    log::info!("Composed calendar '{}' ({} bytes)", title, bytes.len());
    Ok(bytes)
}
