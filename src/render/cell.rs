// File: ./src/render/cell.rs
use super::{Canvas, Layout, Palette, RegisteredFonts};
use crate::color_utils::Rgb;
use crate::error::CalendarResult;
use crate::fonts::{FontSet, LoadedFont};
use crate::grid::{CellRole, DayInfo, GridCell, MONTH_INITIALS, year_label_lines};
use chrono::{Datelike, Weekday};
use std::borrow::Cow;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const ELLIPSIS: &str = "…";
pub const ASCII_ELLIPSIS: &str = "...";
const NOTE_MARKERS: usize = 3;
/// Cap height of typical Latin faces, in em.
const CAP_HEIGHT: f32 = 0.7;
const PT_TO_MM: f32 = 25.4 / 72.0;

pub fn weekday_short_name(val: Weekday) -> &'static str {
    ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"][val.num_days_from_monday() as usize]
}

/// Cuts `label` to at most `budget` display columns, ending with `ellipsis` when shortened.
pub fn truncate_label<'a>(label: &'a str, budget: usize, ellipsis: &str) -> Cow<'a, str> {
    if label.width() <= budget {
        return Cow::Borrowed(label);
    }
    let room = budget.saturating_sub(ellipsis.width());
    let mut used = 0;
    let mut out = String::new();
    for c in label.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > room {
            break;
        }
        used += w;
        out.push(c);
    }
    let mut out = out.trim_end().to_string();
    out.push_str(ellipsis);
    Cow::Owned(out)
}

/// Like [`truncate_label`], then shortens further until `measure` fits `max_width_mm`.
pub fn fit_label<'a>(
    label: &'a str,
    budget: usize,
    max_width_mm: f32,
    ellipsis: &str,
    measure: impl Fn(&str) -> f32,
) -> Cow<'a, str> {
    let shown = truncate_label(label, budget, ellipsis);
    if measure(&shown) <= max_width_mm {
        return shown;
    }
    let kept = match &shown {
        Cow::Borrowed(full) => full.chars().count(),
        Cow::Owned(cut) => cut.strip_suffix(ellipsis).unwrap_or(cut.as_str()).chars().count(),
    };
    for n in (0..kept).rev() {
        let prefix: String = label.chars().take(n).collect();
        let candidate = format!("{}{}", prefix.trim_end(), ellipsis);
        if n == 0 || measure(&candidate) <= max_width_mm {
            return Cow::Owned(candidate);
        }
    }
    Cow::Owned(ellipsis.to_string())
}

#[derive(Debug, Clone, Copy)]
enum Align {
    Left,
    Center,
    Right,
}

/// Everything a cell needs besides the canvas.
pub struct CellContext<'a> {
    pub fonts: &'a FontSet,
    pub handles: &'a RegisteredFonts,
    pub palette: &'a Palette,
    pub layout: &'a Layout,
}

impl CellContext<'_> {
    #[allow(clippy::too_many_arguments)]
    fn text<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        primary: &LoadedFont,
        text: &str,
        size_pt: f32,
        x: f32,
        y: f32,
        align: Align,
        color: Rgb,
    ) -> CalendarResult<()> {
        let face = self.fonts.face_for(primary, text);
        let handle = self.handles.handle(face)?;
        let width = face.text_width_mm(text, size_pt);
        let x = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };
        canvas.draw_text(text, handle, size_pt, x, y, color);
        Ok(())
    }
}

/// Whether drawing `cell` switches any of its strings to the fallback face.
pub fn cell_uses_fallback(cell: &GridCell, fonts: &FontSet) -> bool {
    match &cell.role {
        CellRole::Day(info) | CellRole::Preview(info) => {
            fonts.uses_fallback(&fonts.bold, &info.date.day().to_string())
                || fonts.uses_fallback(&fonts.regular, weekday_short_name(info.weekday))
                || info
                    .event
                    .as_deref()
                    .is_some_and(|label| fonts.uses_fallback(&fonts.italic, label))
        }
        CellRole::MonthLabel(index) => {
            let letter = MONTH_INITIALS[usize::from(*index) % 12].to_string();
            fonts.uses_fallback(&fonts.bold, &letter)
        }
        CellRole::YearLabel(year) => {
            let (century, rest) = year_label_lines(*year);
            fonts.uses_fallback(&fonts.bold, &century) || fonts.uses_fallback(&fonts.bold, &rest)
        }
        CellRole::Empty => false,
    }
}

/// Draws one grid cell at its position on the page.
pub fn render_cell<C: Canvas + ?Sized>(
    canvas: &mut C,
    cell: &GridCell,
    ctx: &CellContext<'_>,
) -> CalendarResult<()> {
    let layout = ctx.layout;
    let (x, y) = layout.cell_origin(cell.row, cell.column);

    canvas.stroke_rect(
        x,
        y,
        layout.cell_width,
        layout.cell_height,
        layout.border_pt,
        ctx.palette.border,
    );

    match &cell.role {
        CellRole::Day(info) => render_day(canvas, info, (x, y), false, ctx),
        CellRole::Preview(info) => render_day(canvas, info, (x, y), true, ctx),
        CellRole::MonthLabel(index) => {
            let letter = MONTH_INITIALS[usize::from(*index) % 12].to_string();
            let baseline =
                y + layout.cell_height / 2.0 + layout.month_label_pt * PT_TO_MM * CAP_HEIGHT / 2.0;
            ctx.text(
                canvas,
                &ctx.fonts.bold,
                &letter,
                layout.month_label_pt,
                x + layout.cell_width / 2.0,
                baseline,
                Align::Center,
                ctx.palette.base,
            )
        }
        CellRole::YearLabel(year) => {
            let (century, rest) = year_label_lines(*year);
            let line_height = layout.year_label_pt * PT_TO_MM;
            let first = y + layout.cell_height / 2.0 - 1.0;
            for (i, line) in [century, rest].iter().enumerate() {
                ctx.text(
                    canvas,
                    &ctx.fonts.bold,
                    line,
                    layout.year_label_pt,
                    x + layout.cell_width / 2.0,
                    first + i as f32 * line_height,
                    Align::Center,
                    ctx.palette.muted,
                )?;
            }
            Ok(())
        }
        CellRole::Empty => Ok(()),
    }
}

fn render_day<C: Canvas + ?Sized>(
    canvas: &mut C,
    info: &DayInfo,
    (x, y): (f32, f32),
    preview: bool,
    ctx: &CellContext<'_>,
) -> CalendarResult<()> {
    let layout = ctx.layout;
    let palette = ctx.palette;
    let left = x + layout.padding;
    let right = x + layout.cell_width - layout.padding;

    let (date_color, text_color) = if preview {
        (palette.muted, palette.muted)
    } else if info.is_weekend {
        (palette.alert, palette.base)
    } else {
        (palette.base, palette.base)
    };

    let top_baseline = y + layout.padding + layout.date_pt * PT_TO_MM * CAP_HEIGHT;
    ctx.text(
        canvas,
        &ctx.fonts.bold,
        &info.date.day().to_string(),
        layout.date_pt,
        left,
        top_baseline,
        Align::Left,
        date_color,
    )?;
    ctx.text(
        canvas,
        &ctx.fonts.regular,
        weekday_short_name(info.weekday),
        layout.weekday_pt,
        right,
        top_baseline,
        Align::Right,
        if info.is_weekend && !preview {
            date_color
        } else {
            text_color
        },
    )?;

    if let Some(label) = &info.event {
        let face = ctx.fonts.face_for(&ctx.fonts.italic, label);
        let ellipsis = if face.covers(ELLIPSIS) {
            ELLIPSIS
        } else {
            ASCII_ELLIPSIS
        };
        let shown = fit_label(
            label,
            layout.label_budget,
            layout.cell_width - 2.0 * layout.padding,
            ellipsis,
            |text| face.text_width_mm(text, layout.event_pt),
        );
        let event_baseline = top_baseline + 2.5 + layout.event_pt * PT_TO_MM * 1.2;
        ctx.text(
            canvas,
            face,
            &shown,
            layout.event_pt,
            left,
            event_baseline,
            Align::Left,
            text_color,
        )?;
    }

    if !preview {
        let marker_y = y + layout.cell_height - layout.padding - 2.0 * layout.marker_radius;
        for i in 0..NOTE_MARKERS {
            canvas.fill_circle(
                left + layout.marker_radius + i as f32 * layout.marker_spacing,
                marker_y,
                layout.marker_radius,
                palette.marker,
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_label_untouched() {
        assert!(matches!(
            truncate_label("Christmas", 19, ELLIPSIS),
            Cow::Borrowed("Christmas")
        ));
    }

    #[test]
    fn test_long_label_truncated() {
        let label = "a".repeat(40);
        let shown = truncate_label(&label, 19, ELLIPSIS);
        assert_eq!(shown.chars().count(), 19);
        assert!(shown.ends_with(ELLIPSIS));

        let shown = truncate_label(&label, 19, ASCII_ELLIPSIS);
        assert_eq!(shown, format!("{}...", "a".repeat(16)));
    }

    #[test]
    fn test_wide_characters_count_double() {
        // Each CJK character takes two columns.
        let shown = truncate_label("春節春節春節春節春節春節", 9, ELLIPSIS);
        assert_eq!(shown, "春節春節…");
    }

    #[test]
    fn test_trailing_space_removed_before_ellipsis() {
        let shown = truncate_label("Team offsite planning day", 14, ELLIPSIS);
        assert_eq!(shown, "Team offsite…");
    }

    #[test]
    fn test_fit_label_respects_width() {
        // One millimeter per character.
        let measure = |text: &str| text.chars().count() as f32;
        let label = "a".repeat(40);

        let shown = fit_label(&label, 19, 15.0, ASCII_ELLIPSIS, measure);
        assert_eq!(shown, format!("{}...", "a".repeat(12)));

        // Column budget is still an upper cap when width allows more.
        let shown = fit_label(&label, 19, 100.0, ASCII_ELLIPSIS, measure);
        assert_eq!(shown, format!("{}...", "a".repeat(16)));

        // A label within the column budget but too wide gets cut too.
        let shown = fit_label("Christmas party", 19, 10.0, ASCII_ELLIPSIS, measure);
        assert_eq!(shown, "Christm...");
    }

    #[test]
    fn test_fit_label_short_label_borrowed() {
        let shown = fit_label("Dentist", 19, 22.4, ELLIPSIS, |t| t.len() as f32);
        assert!(matches!(shown, Cow::Borrowed("Dentist")));
    }

    #[test]
    fn test_weekday_names() {
        assert_eq!(weekday_short_name(Weekday::Mon), "Mon");
        assert_eq!(weekday_short_name(Weekday::Sun), "Sun");
    }
}
