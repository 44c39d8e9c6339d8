//! Calendar support for the ganzhi engine.
//!
//! This crate provides:
//! - Julian Day Number ↔ proleptic Gregorian conversions
//! - `CivilDate`, a date that is valid by construction
//! - `BirthTime` parsing (`HH`, `HH:MM`, `HH:MM:SS`)
//!
//! No timezone or daylight-saving handling: all inputs are local wall-clock
//! values taken at face value.

pub mod civil;
pub mod error;
pub mod julian;

pub use civil::{BirthTime, CivilDate};
pub use error::TimeError;
pub use julian::{
    J2000_JDN, JDN_1900_01_01, calendar_to_jdn, days_in_month, is_leap_year, jdn_to_calendar,
};
