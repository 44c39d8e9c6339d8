//! Four Pillars (Bazi) engine built on the sexagenary stem/branch cycle.
//!
//! This crate provides:
//! - Heavenly stems, earthly branches, elements and zodiac animals
//! - Year, month, day and hour pillar computation
//! - Ten-god classification relative to the day master
//! - Chart assembly with hidden stems and a weighted element tally
//! - Element balance and use-god / avoid-god inference
//!
//! Months follow the civil calendar (one solar month per calendar month)
//! and the year changes on January 1st; no solar-term boundaries.

pub mod analysis;
pub mod balance;
pub mod branch;
pub mod chart;
pub mod element;
pub mod error;
pub mod pillar;
pub mod stem;
pub mod ten_god;

pub use analysis::{ChartAnalysis, PillarTenGod, TenGodSummary, TenGodTally, analyze_chart};
pub use balance::{
    BalanceLabel, DayMasterStrength, ElementBalance, UseGodResult, element_balance, infer_use_god,
};
pub use branch::{ALL_ANIMALS, ALL_BRANCHES, Animal, Branch};
pub use chart::{Chart, ChartPillar, ElementCount, PillarPosition, compute_chart};
pub use element::{ALL_ELEMENTS, Element, Polarity};
pub use error::BaziError;
pub use pillar::{
    Pillar, compute_day_pillar, compute_hour_pillar, compute_month_pillar, compute_year_pillar,
    hour_bin, solar_month,
};
pub use stem::{ALL_STEMS, Stem};
pub use ten_god::{ALL_TEN_GODS, Relation, TenGod, TenGodLabel, relation, ten_god};
