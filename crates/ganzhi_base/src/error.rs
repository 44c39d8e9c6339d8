//! Error types for Bazi calculations.

use std::error::Error;
use std::fmt::{Display, Formatter};

use ganzhi_time::TimeError;

use crate::stem::Stem;

/// Errors from Bazi base calculations.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum BaziError {
    /// Error from calendar validation or parsing.
    Time(TimeError),
    /// Calendar month outside 1..=12.
    InvalidMonth(u32),
    /// Hour of day outside 0..=23.
    InvalidHour(u32),
    /// Name or character does not denote a known stem/branch/element.
    UnknownSymbol(String),
    /// The element cycles produced no relation between two stems.
    /// Indicates a broken table, never a user error.
    Inconsistent { day: Stem, target: Stem },
}

impl Display for BaziError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Time(e) => write!(f, "time error: {e}"),
            Self::InvalidMonth(m) => write!(f, "invalid month: {m} (expected 1-12)"),
            Self::InvalidHour(h) => write!(f, "invalid hour: {h} (expected 0-23)"),
            Self::UnknownSymbol(s) => write!(f, "unknown symbol: {s:?}"),
            Self::Inconsistent { day, target } => write!(
                f,
                "internal inconsistency: no ten-god relation from {day} to {target}"
            ),
        }
    }
}

impl Error for BaziError {}

impl From<TimeError> for BaziError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}
