// File: ./src/error.rs
// Error and warning types shared by the rendering pipeline.
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures. Any of these aborts `render_calendar`; no partial document is produced.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Font '{name}' not found (searched builtins and {searched} font directories)")]
    FontNotFound { name: String, searched: usize },

    #[error("Failed to load font '{}': {reason}", path.display())]
    FontLoad { path: PathBuf, reason: String },

    #[error("Events file must be UTF-8 encoded: {source}")]
    EventFileEncoding {
        #[from]
        source: std::str::Utf8Error,
    },

    #[error("Failed to read events file '{}': {source}", path.display())]
    EventFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Render error: {0}")]
    Render(String),
}

pub type CalendarResult<T> = std::result::Result<T, CalendarError>;

/// Non-fatal problems collected while parsing events. Generation proceeds without the offending line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    MalformedEventLine { line_no: usize, line: String },
    InvalidCalendarDate { line_no: usize, day: u32, month: u32 },
    DuplicateEvent { line_no: usize, day: u32, month: u32 },
}

impl Warning {
    pub fn line_no(&self) -> usize {
        match self {
            Warning::MalformedEventLine { line_no, .. }
            | Warning::InvalidCalendarDate { line_no, .. }
            | Warning::DuplicateEvent { line_no, .. } => *line_no,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MalformedEventLine { line_no, line } => {
                write!(f, "line {}: ignored malformed event line '{}'", line_no, line)
            }
            Warning::InvalidCalendarDate {
                line_no,
                day,
                month,
            } => write!(
                f,
                "line {}: ignored invalid date (day {}, month {})",
                line_no, day, month
            ),
            Warning::DuplicateEvent {
                line_no,
                day,
                month,
            } => write!(
                f,
                "line {}: replaces earlier event on {:02}/{:02}",
                line_no, day, month
            ),
        }
    }
}
