// File: ./src/grid.rs
//! Logical layout of the year grid, independent of any drawing backend.
//!
//! The grid has 13 rows and 31 columns. Rows 0..=11 are the months of the
//! rendered year and column `c` holds day-of-month `c`. Row 12 carries the
//! month initials, the next-year label and a preview of the first ten days of
//! the following January.

use crate::events::{EventMap, MonthDay};
use chrono::{Datelike, NaiveDate, Weekday};

pub const GRID_ROWS: u8 = 13;
pub const GRID_COLUMNS: u8 = 31;
pub const LABEL_ROW: u8 = 12;
pub const PREVIEW_DAYS: u8 = 10;
pub const YEAR_LABEL_COLUMN: u8 = GRID_COLUMNS - PREVIEW_DAYS;

pub const MONTH_INITIALS: [char; 12] = ['J', 'F', 'M', 'A', 'M', 'J', 'J', 'A', 'S', 'O', 'N', 'D'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayInfo {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub is_weekend: bool,
    pub event: Option<String>,
}

impl DayInfo {
    fn new(date: NaiveDate, event: Option<String>) -> Self {
        let weekday = date.weekday();
        Self {
            date,
            weekday,
            is_weekend: matches!(weekday, Weekday::Sat | Weekday::Sun),
            event,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellRole {
    Day(DayInfo),
    /// 0-based month index.
    MonthLabel(u8),
    /// The year shown above the preview days.
    YearLabel(i32),
    Preview(DayInfo),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    /// 0-based, 12 is the label row.
    pub row: u8,
    /// 1-based, equals day-of-month in month rows.
    pub column: u8,
    pub role: CellRole,
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Splits a year into the two lines of the next-year label ("20", "27").
pub fn year_label_lines(year: i32) -> (String, String) {
    let digits = format!("{:04}", year);
    let split = digits.len() - 2;
    (digits[..split].to_string(), digits[split..].to_string())
}

/// Builds all 403 cells of `year` in row-major order.
pub fn build_grid(year: i32, events: &EventMap) -> Vec<GridCell> {
    let mut cells = Vec::with_capacity(GRID_ROWS as usize * GRID_COLUMNS as usize);

    for month in 1..=12u32 {
        let row = (month - 1) as u8;
        for column in 1..=GRID_COLUMNS {
            let role = match NaiveDate::from_ymd_opt(year, month, column as u32) {
                Some(date) => {
                    let event = MonthDay::new(month, column as u32)
                        .and_then(|key| events.get(&key))
                        .cloned();
                    CellRole::Day(DayInfo::new(date, event))
                }
                None => CellRole::Empty,
            };
            cells.push(GridCell { row, column, role });
        }
    }

    for column in 1..=GRID_COLUMNS {
        let role = label_row_role(year, column);
        cells.push(GridCell {
            row: LABEL_ROW,
            column,
            role,
        });
    }

    log::debug!("Built grid for {} ({} cells)", year, cells.len());
    cells
}

fn label_row_role(year: i32, column: u8) -> CellRole {
    let next_year = year.saturating_add(1);
    match column {
        1..=12 => CellRole::MonthLabel(column - 1),
        YEAR_LABEL_COLUMN => CellRole::YearLabel(next_year),
        c if c > YEAR_LABEL_COLUMN => {
            let day = (c - YEAR_LABEL_COLUMN) as u32;
            // Preview days never carry events.
            NaiveDate::from_ymd_opt(next_year, 1, day)
                .map(|date| CellRole::Preview(DayInfo::new(date, None)))
                .unwrap_or(CellRole::Empty)
        }
        _ => CellRole::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(cells: &[GridCell], row: u8, column: u8) -> &GridCell {
        &cells[row as usize * GRID_COLUMNS as usize + (column as usize - 1)]
    }

    #[test]
    fn test_leap_rule() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2026));
    }

    #[test]
    fn test_short_months_have_empty_tail() {
        let cells = build_grid(2026, &EventMap::new());
        // April has 30 days.
        assert_eq!(cell(&cells, 3, 31).role, CellRole::Empty);
        assert!(matches!(cell(&cells, 3, 30).role, CellRole::Day(_)));
        // February 2026: 28 days.
        assert_eq!(cell(&cells, 1, 29).role, CellRole::Empty);
        assert_eq!(cell(&cells, 1, 30).role, CellRole::Empty);
    }

    #[test]
    fn test_weekend_flag() {
        let cells = build_grid(2026, &EventMap::new());
        // 2026-01-03 is a Saturday, 2026-01-05 a Monday.
        match &cell(&cells, 0, 3).role {
            CellRole::Day(info) => {
                assert_eq!(info.weekday, Weekday::Sat);
                assert!(info.is_weekend);
            }
            other => panic!("Expected day cell, got {:?}", other),
        }
        match &cell(&cells, 0, 5).role {
            CellRole::Day(info) => assert!(!info.is_weekend),
            other => panic!("Expected day cell, got {:?}", other),
        }
    }

    #[test]
    fn test_label_row_layout() {
        let cells = build_grid(2026, &EventMap::new());
        for column in 1..=12 {
            assert_eq!(
                cell(&cells, LABEL_ROW, column).role,
                CellRole::MonthLabel(column - 1)
            );
        }
        for column in 13..YEAR_LABEL_COLUMN {
            assert_eq!(cell(&cells, LABEL_ROW, column).role, CellRole::Empty);
        }
        assert_eq!(
            cell(&cells, LABEL_ROW, YEAR_LABEL_COLUMN).role,
            CellRole::YearLabel(2027)
        );
        match &cell(&cells, LABEL_ROW, 31).role {
            CellRole::Preview(info) => {
                assert_eq!(info.date, NaiveDate::from_ymd_opt(2027, 1, 10).unwrap());
            }
            other => panic!("Expected preview cell, got {:?}", other),
        }
    }

    #[test]
    fn test_preview_ignores_events() {
        let mut events = EventMap::new();
        events.insert(MonthDay::new(1, 1).unwrap(), "New Year".to_string());
        let cells = build_grid(2026, &events);
        match &cell(&cells, 0, 1).role {
            CellRole::Day(info) => assert_eq!(info.event.as_deref(), Some("New Year")),
            other => panic!("Expected day cell, got {:?}", other),
        }
        match &cell(&cells, LABEL_ROW, YEAR_LABEL_COLUMN + 1).role {
            CellRole::Preview(info) => assert!(info.event.is_none()),
            other => panic!("Expected preview cell, got {:?}", other),
        }
    }

    #[test]
    fn test_year_label_lines() {
        assert_eq!(
            year_label_lines(2027),
            ("20".to_string(), "27".to_string())
        );
        assert_eq!(year_label_lines(987), ("09".to_string(), "87".to_string()));
    }

    #[test]
    fn test_extreme_years_do_not_overflow() {
        // Far outside chrono's range: no day cells, but no panic either.
        let cells = build_grid(i32::MAX, &EventMap::new());
        assert_eq!(cells.len(), 403);
        assert_eq!(
            cell(&cells, LABEL_ROW, YEAR_LABEL_COLUMN).role,
            CellRole::YearLabel(i32::MAX)
        );
        assert_eq!(cell(&cells, LABEL_ROW, 31).role, CellRole::Empty);
        assert_eq!(cell(&cells, 0, 1).role, CellRole::Empty);
    }
}
