// File: tests/event_parsing.rs
use yeargrid::error::{CalendarError, Warning};
use yeargrid::events::{MONTH_ABBREVIATIONS, MonthDay, load_events_file, parse_events};

const DAYS_IN_MONTH: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

#[test]
fn test_every_valid_date_parses() {
    let mut text = String::new();
    for (m, abbrev) in MONTH_ABBREVIATIONS.iter().enumerate() {
        for day in 1..=DAYS_IN_MONTH[m] {
            // Alternate casing, zero padding and separator width.
            let month = if day % 2 == 0 {
                abbrev.to_uppercase()
            } else {
                abbrev.to_string()
            };
            let sep = " ".repeat(1 + (day as usize % 3));
            if day % 3 == 0 {
                text.push_str(&format!("{}{}{}Event {} {}\n", day, month, sep, day, abbrev));
            } else {
                text.push_str(&format!("{:02}{}{}Event {} {}\n", day, month, sep, day, abbrev));
            }
        }
    }

    let parsed = parse_events(&text);
    assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);
    assert_eq!(parsed.events.len(), 366);

    for (m, abbrev) in MONTH_ABBREVIATIONS.iter().enumerate() {
        for day in 1..=DAYS_IN_MONTH[m] {
            let key = MonthDay::new(m as u32 + 1, day).unwrap();
            assert_eq!(
                parsed.events.get(&key).map(String::as_str),
                Some(format!("Event {} {}", day, abbrev).as_str())
            );
        }
    }
}

#[test]
fn test_duplicate_dates_last_wins() {
    let parsed = parse_events("25dec Christmas\n25DEC  Xmas Day\n");
    assert_eq!(parsed.events.len(), 1);
    assert_eq!(
        parsed.events.get(&MonthDay::new(12, 25).unwrap()).unwrap(),
        "Xmas Day"
    );
    assert_eq!(
        parsed.warnings,
        vec![Warning::DuplicateEvent {
            line_no: 2,
            day: 25,
            month: 12
        }]
    );
}

#[test]
fn test_comments_and_blank_lines() {
    let parsed = parse_events("# holidays\n\n   \n  # indented comment\n\t\n");
    assert!(parsed.events.is_empty());
    assert!(parsed.warnings.is_empty());
}

#[test]
fn test_bad_lines_become_warnings() {
    let text = "01jan New Year\n32jan Foo\n01xyz Foo\n30feb Nope\nfoo bar\n14feb  Valentine's Day\n";
    let parsed = parse_events(text);

    assert_eq!(parsed.events.len(), 2);
    assert_eq!(parsed.warnings.len(), 4);
    assert_eq!(
        parsed.warnings[0],
        Warning::InvalidCalendarDate {
            line_no: 2,
            day: 32,
            month: 1
        }
    );
    assert!(matches!(
        &parsed.warnings[1],
        Warning::MalformedEventLine { line_no: 3, line } if line == "01xyz Foo"
    ));
    assert_eq!(
        parsed.warnings[2],
        Warning::InvalidCalendarDate {
            line_no: 4,
            day: 30,
            month: 2
        }
    );
    assert_eq!(parsed.warnings[3].line_no(), 5);
}

#[test]
fn test_label_trailing_whitespace_trimmed() {
    let parsed = parse_events("05dec\tDentist  \r\n");
    assert_eq!(
        parsed.events.get(&MonthDay::new(12, 5).unwrap()).unwrap(),
        "Dentist"
    );
}

#[test]
fn test_load_missing_file() {
    let err = load_events_file(std::path::Path::new("/nonexistent/yeargrid/events.txt"))
        .unwrap_err();
    assert!(matches!(err, CalendarError::EventFileRead { .. }));
}

#[test]
fn test_load_file_with_invalid_utf8() {
    let ctx = yeargrid::context::TestContext::new();
    let path = ctx.root.join("events.txt");
    std::fs::write(&path, b"25dec Christ\xffmas\n").unwrap();
    let err = load_events_file(&path).unwrap_err();
    assert!(matches!(err, CalendarError::EventFileEncoding { .. }));

    std::fs::write(&path, "\u{feff}25dec Christmas\n").unwrap();
    let parsed = load_events_file(&path).unwrap();
    assert_eq!(parsed.events.len(), 1);
}
