//! Validated civil calendar dates and birth times.
//!
//! `CivilDate` can only be built through [`CivilDate::new`] or parsing, so
//! every value is a real proleptic Gregorian date. Downstream pillar
//! arithmetic relies on that and never re-validates.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::TimeError;
use crate::julian::{calendar_to_jdn, days_in_month, jdn_to_calendar};

/// A validated proleptic Gregorian calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CivilDate {
    /// Build a date, rejecting impossible month/day combinations.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, TimeError> {
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return Err(TimeError::InvalidDate { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    pub const fn year(self) -> i32 {
        self.year
    }

    pub const fn month(self) -> u32 {
        self.month
    }

    pub const fn day(self) -> u32 {
        self.day
    }

    /// Julian Day Number of this date.
    pub fn jdn(self) -> i64 {
        calendar_to_jdn(self.year, self.month, self.day)
    }

    /// Date from a Julian Day Number.
    pub fn from_jdn(jdn: i64) -> Self {
        let (year, month, day) = jdn_to_calendar(jdn);
        Self { year, month, day }
    }

    /// Signed number of days from `other` to `self`.
    pub fn days_since(self, other: CivilDate) -> i64 {
        self.jdn() - other.jdn()
    }

    /// The date `days` days later (or earlier, if negative).
    pub fn add_days(self, days: i64) -> Self {
        Self::from_jdn(self.jdn() + days)
    }
}

impl Display for CivilDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.year < 0 {
            write!(f, "-{:04}-{:02}-{:02}", -self.year, self.month, self.day)
        } else {
            write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
        }
    }
}

impl FromStr for CivilDate {
    type Err = TimeError;

    /// Parse `YYYY-MM-DD`, with an optional leading `-` for negative years.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let parts: Vec<&str> = body.split('-').collect();
        if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(TimeError::Parse(format!("expected YYYY-MM-DD, got {s:?}")));
        }
        let year: i32 = parts[0].parse()?;
        let month: u32 = parts[1].parse()?;
        let day: u32 = parts[2].parse()?;
        Self::new(if negative { -year } else { year }, month, day)
    }
}

/// A validated wall-clock time of birth.
///
/// Only the hour feeds the hour pillar; minutes and seconds are kept so the
/// input can be echoed back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BirthTime {
    hour: u32,
    minute: u32,
    second: u32,
}

impl BirthTime {
    pub fn new(hour: u32, minute: u32, second: u32) -> Result<Self, TimeError> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(TimeError::InvalidTime {
                hour,
                minute,
                second,
            });
        }
        Ok(Self {
            hour,
            minute,
            second,
        })
    }

    pub const fn hour(self) -> u32 {
        self.hour
    }

    pub const fn minute(self) -> u32 {
        self.minute
    }

    pub const fn second(self) -> u32 {
        self.second
    }
}

impl Display for BirthTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

impl FromStr for BirthTime {
    type Err = TimeError;

    /// Parse `HH`, `HH:MM` or `HH:MM:SS`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parts: Vec<&str> = s.split(':').collect();
        if parts.is_empty() || parts.len() > 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(TimeError::Parse(format!("expected HH[:MM[:SS]], got {s:?}")));
        }
        let hour: u32 = parts[0].parse()?;
        let minute: u32 = match parts.get(1) {
            Some(p) => p.parse()?,
            None => 0,
        };
        let second: u32 = match parts.get(2) {
            Some(p) => p.parse()?,
            None => 0,
        };
        Self::new(hour, minute, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_date() {
        let d = CivilDate::new(1990, 1, 1).unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (1990, 1, 1));
    }

    #[test]
    fn day_31_of_april_rejected() {
        assert_eq!(
            CivilDate::new(2023, 4, 31),
            Err(TimeError::InvalidDate {
                year: 2023,
                month: 4,
                day: 31
            })
        );
    }

    #[test]
    fn feb_29_non_leap_rejected() {
        assert!(CivilDate::new(2023, 2, 29).is_err());
        assert!(CivilDate::new(2024, 2, 29).is_ok());
    }

    #[test]
    fn month_zero_rejected() {
        assert!(CivilDate::new(2023, 0, 1).is_err());
    }

    #[test]
    fn parse_date() {
        let d: CivilDate = "2024-03-20".parse().unwrap();
        assert_eq!(d, CivilDate::new(2024, 3, 20).unwrap());
    }

    #[test]
    fn parse_negative_year() {
        let d: CivilDate = "-0100-06-15".parse().unwrap();
        assert_eq!(d.year(), -100);
        assert_eq!(d.to_string(), "-0100-06-15");
    }

    #[test]
    fn parse_garbage() {
        assert!(matches!("1990/01/01".parse::<CivilDate>(), Err(TimeError::Parse(_))));
        assert!(matches!("1990-01".parse::<CivilDate>(), Err(TimeError::Parse(_))));
        assert!(matches!("1990-xx-01".parse::<CivilDate>(), Err(TimeError::Parse(_))));
    }

    #[test]
    fn display_date() {
        let d = CivilDate::new(987, 5, 3).unwrap();
        assert_eq!(d.to_string(), "0987-05-03");
    }

    #[test]
    fn days_since_is_signed() {
        let a = CivilDate::new(1900, 1, 1).unwrap();
        let b = CivilDate::new(1900, 1, 11).unwrap();
        assert_eq!(b.days_since(a), 10);
        assert_eq!(a.days_since(b), -10);
    }

    #[test]
    fn add_days_crosses_leap_day() {
        let d = CivilDate::new(2024, 2, 28).unwrap().add_days(2);
        assert_eq!(d, CivilDate::new(2024, 3, 1).unwrap());
    }

    #[test]
    fn parse_times() {
        assert_eq!("7".parse::<BirthTime>().unwrap().hour(), 7);
        let t: BirthTime = "23:45".parse().unwrap();
        assert_eq!((t.hour(), t.minute(), t.second()), (23, 45, 0));
        let t: BirthTime = "05:06:07".parse().unwrap();
        assert_eq!(t.to_string(), "05:06:07");
    }

    #[test]
    fn reject_bad_times() {
        assert!("24:00".parse::<BirthTime>().is_err());
        assert!("12:60".parse::<BirthTime>().is_err());
        assert!("12:".parse::<BirthTime>().is_err());
        assert!("1:2:3:4".parse::<BirthTime>().is_err());
    }
}
