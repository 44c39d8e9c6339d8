//! Error types for calendar parsing and validation.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from civil date/time construction or parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TimeError {
    /// The year/month/day triple is not a valid Gregorian date.
    InvalidDate { year: i32, month: u32, day: u32 },
    /// The hour/minute/second triple is not a valid time of day.
    InvalidTime { hour: u32, minute: u32, second: u32 },
    /// Text could not be parsed as a date or time.
    Parse(String),
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate { year, month, day } => {
                write!(f, "invalid calendar date: {year:04}-{month:02}-{day:02}")
            }
            Self::InvalidTime {
                hour,
                minute,
                second,
            } => write!(f, "invalid time of day: {hour:02}:{minute:02}:{second:02}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl Error for TimeError {}

impl From<std::num::ParseIntError> for TimeError {
    fn from(e: std::num::ParseIntError) -> Self {
        Self::Parse(e.to_string())
    }
}
