// File: ./src/events.rs
// Parser for the line-oriented events file (`25dec  Christmas`).
use crate::error::{CalendarError, CalendarResult, Warning};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Longest each month can be in any year. February allows 29 since the parser has no year.
const MAX_DAYS: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A calendar date without a year. Only [`MonthDay::new`] builds one, so it is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> Option<Self> {
        let max = *MAX_DAYS.get(month.checked_sub(1)? as usize)?;
        (1..=max).contains(&day).then_some(Self { month, day })
    }

    /// 1-based.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}{}",
            self.day,
            MONTH_ABBREVIATIONS[(self.month - 1) as usize]
        )
    }
}

pub type EventMap = BTreeMap<MonthDay, String>;

#[derive(Debug, Default, Clone)]
pub struct ParsedEvents {
    pub events: EventMap,
    pub warnings: Vec<Warning>,
}

enum LineOutcome<'a> {
    Skip,
    Event { day: u32, month: u32, label: &'a str },
    Malformed,
}

fn month_from_abbrev(token: &str) -> Option<u32> {
    MONTH_ABBREVIATIONS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(token))
        .map(|i| i as u32 + 1)
}

fn classify_line(line: &str) -> LineOutcome<'_> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return LineOutcome::Skip;
    }

    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    if !(1..=2).contains(&digits) {
        return LineOutcome::Malformed;
    }
    let (day_str, rest) = trimmed.split_at(digits);

    // Month token is exactly three ASCII letters.
    let Some(month_str) = rest.get(..3) else {
        return LineOutcome::Malformed;
    };
    if !month_str.bytes().all(|b| b.is_ascii_alphabetic()) {
        return LineOutcome::Malformed;
    }
    let Some(month) = month_from_abbrev(month_str) else {
        return LineOutcome::Malformed;
    };

    let after = &rest[3..];
    if !after.starts_with([' ', '\t']) {
        return LineOutcome::Malformed;
    }
    let label = after.trim_start_matches([' ', '\t']).trim_end();
    if label.is_empty() {
        return LineOutcome::Malformed;
    }

    match day_str.parse::<u32>() {
        Ok(day) => LineOutcome::Event { day, month, label },
        Err(_) => LineOutcome::Malformed,
    }
}

/// Parses events text into a date → label map. Bad lines become warnings, never errors.
/// When a date appears twice the later line wins.
pub fn parse_events(text: &str) -> ParsedEvents {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut parsed = ParsedEvents::default();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        match classify_line(raw) {
            LineOutcome::Skip => {}
            LineOutcome::Malformed => {
                let warning = Warning::MalformedEventLine {
                    line_no,
                    line: raw.trim().to_string(),
                };
                log::warn!("{}", warning);
                parsed.warnings.push(warning);
            }
            LineOutcome::Event { day, month, label } => {
                let Some(key) = MonthDay::new(month, day) else {
                    let warning = Warning::InvalidCalendarDate {
                        line_no,
                        day,
                        month,
                    };
                    log::warn!("{}", warning);
                    parsed.warnings.push(warning);
                    continue;
                };
                if parsed.events.insert(key, label.to_string()).is_some() {
                    let warning = Warning::DuplicateEvent {
                        line_no,
                        day,
                        month,
                    };
                    log::info!("{}", warning);
                    parsed.warnings.push(warning);
                }
            }
        }
    }

    log::debug!(
        "Parsed {} events ({} warnings)",
        parsed.events.len(),
        parsed.warnings.len()
    );
    parsed
}

/// Same as [`parse_events`] for raw bytes; invalid UTF-8 fails the whole input.
pub fn parse_events_bytes(bytes: &[u8]) -> CalendarResult<ParsedEvents> {
    let text = std::str::from_utf8(bytes)?;
    Ok(parse_events(text))
}

pub fn load_events_file(path: &Path) -> CalendarResult<ParsedEvents> {
    let bytes = fs::read(path).map_err(|source| CalendarError::EventFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_events_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let parsed = parse_events("01jan  New Year\n14feb\tValentine's Day  \n");
        assert!(parsed.warnings.is_empty());
        assert_eq!(
            parsed.events.get(&MonthDay::new(1, 1).unwrap()).map(String::as_str),
            Some("New Year")
        );
        assert_eq!(
            parsed.events.get(&MonthDay::new(2, 14).unwrap()).map(String::as_str),
            Some("Valentine's Day")
        );
    }

    #[test]
    fn test_label_keeps_inner_whitespace_and_unicode() {
        let parsed = parse_events("07jan  Рождество   Христово");
        assert_eq!(
            parsed.events.values().next().map(String::as_str),
            Some("Рождество   Христово")
        );
    }

    #[test]
    fn test_missing_separator_is_malformed() {
        let parsed = parse_events("01janNew Year\n01jan\n01jan   \n");
        assert!(parsed.events.is_empty());
        assert_eq!(parsed.warnings.len(), 3);
        assert!(
            parsed
                .warnings
                .iter()
                .all(|w| matches!(w, Warning::MalformedEventLine { .. }))
        );
    }

    #[test]
    fn test_three_digit_day_is_malformed() {
        let parsed = parse_events("101jan Foo");
        assert!(matches!(
            parsed.warnings[0],
            Warning::MalformedEventLine { line_no: 1, .. }
        ));
    }

    #[test]
    fn test_day_out_of_month_range() {
        let parsed = parse_events("31apr Foo\n30feb Bar\n00mar Baz\n29feb Leap");
        assert_eq!(parsed.events.len(), 1);
        assert_eq!(parsed.warnings.len(), 3);
        assert!(parsed.events.contains_key(&MonthDay::new(2, 29).unwrap()));
    }

    #[test]
    fn test_bom_is_ignored() {
        let parsed = parse_events("\u{feff}25dec Christmas");
        assert_eq!(parsed.events.len(), 1);
    }

    #[test]
    fn test_invalid_utf8_is_fatal() {
        let err = parse_events_bytes(&[0x30, 0x31, 0x6a, 0x61, 0x6e, 0x20, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, CalendarError::EventFileEncoding { .. }));
    }

    #[test]
    fn test_month_day_display() {
        assert_eq!(MonthDay::new(12, 5).unwrap().to_string(), "05dec");
        assert!(MonthDay::new(13, 1).is_none());
        assert!(MonthDay::new(0, 1).is_none());
    }

    #[test]
    fn test_month_day_accessors_round_trip_every_date() {
        for month in 1..=12 {
            for day in 1..=MAX_DAYS[month as usize - 1] {
                let key = MonthDay::new(month, day).unwrap();
                assert_eq!((key.month(), key.day()), (month, day));
                // Display indexes the month table; it must never panic.
                assert_eq!(key.to_string().len(), 5);
            }
        }
        assert!(MonthDay::new(4, 31).is_none());
        assert!(MonthDay::new(1, 0).is_none());
    }
}
