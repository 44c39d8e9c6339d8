//! Pillar calculation for year, month, day and hour.
//!
//! All four follow the 60-term sexagenary cycle through fixed reference
//! points rather than astronomy:
//! - Year: CE 1984 = Jia-Zi, with the year boundary at 1 January.
//! - Month: every calendar month is pinned to one solar month (January is
//!   the 12th, Chou; February opens the cycle at Yin). True solar-term
//!   cutovers are deliberately not modelled.
//! - Day: 1900-01-01 = Jia-Xu, continuous day count in both directions.
//! - Hour: 12 two-hour bins, the Zi bin spanning 23:00-00:59.

use ganzhi_time::CivilDate;
use serde::{Deserialize, Serialize};

use crate::branch::{Animal, Branch};
use crate::element::Element;
use crate::error::BaziError;
use crate::stem::{ALL_STEMS, Stem};

/// Reference epoch: CE 1984 = Jia-Zi (index 0 of both cycles).
pub const YEAR_EPOCH: i32 = 1984;

/// Julian Day Number of the day-cycle reference date, 1900-01-01.
pub const DAY_EPOCH_JDN: i64 = ganzhi_time::JDN_1900_01_01;

/// Stem index of the reference day (Jia).
pub const DAY_EPOCH_STEM_INDEX: i64 = 0;

/// Branch index of the reference day (Xu).
pub const DAY_EPOCH_BRANCH_INDEX: i64 = 10;

/// Month branches for solar months 1..=12, opening at Yin.
pub const MONTH_BRANCHES: [Branch; 12] = [
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
    Branch::Zi,
    Branch::Chou,
];

/// Month stems indexed by `[year_stem][solar_month - 1]`.
///
/// Jia/Ji years open at Bing, Yi/Geng at Wu, Bing/Xin at Geng,
/// Ding/Ren at Ren, Wu/Gui at Jia.
pub const MONTH_STEM_TABLE: [[Stem; 12]; 10] = build_cycle_table(2);

/// Hour stems indexed by `[day_stem][hour_bin]`.
///
/// Jia/Ji days open at Jia, Yi/Geng at Bing, Bing/Xin at Wu,
/// Ding/Ren at Geng, Wu/Gui at Ren.
pub const HOUR_STEM_TABLE: [[Stem; 12]; 10] = build_cycle_table(0);

/// Row `s` starts at stem `(s mod 5) * 2 + offset` and runs 12 stems on.
const fn build_cycle_table(offset: usize) -> [[Stem; 12]; 10] {
    let mut table = [[Stem::Jia; 12]; 10];
    let mut row = 0;
    while row < 10 {
        let start = (row % 5) * 2 + offset;
        let mut col = 0;
        while col < 12 {
            table[row][col] = ALL_STEMS[(start + col) % 10];
            col += 1;
        }
        row += 1;
    }
    table
}

/// A (stem, branch) pair with its derived element and, for the year
/// pillar only, the zodiac animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
    /// Element of the stem.
    pub element: Element,
    /// Zodiac animal; `Some` only for year pillars.
    pub animal: Option<Animal>,
}

impl Pillar {
    /// Pillar without an animal (month, day, hour).
    pub const fn new(stem: Stem, branch: Branch) -> Self {
        Self {
            stem,
            branch,
            element: stem.element(),
            animal: None,
        }
    }

    /// Pillar carrying the branch's animal (year).
    pub const fn with_animal(stem: Stem, branch: Branch) -> Self {
        Self {
            stem,
            branch,
            element: stem.element(),
            animal: Some(branch.animal()),
        }
    }

    /// Position in the 60-term cycle (Jia-Zi = 0), or `None` for a
    /// stem/branch pair of mismatched parity that never occurs in the cycle.
    pub fn cycle_index(&self) -> Option<u8> {
        let s = self.stem.index();
        let b = self.branch.index();
        (0..60u8).find(|i| i % 10 == s && i % 12 == b)
    }

    /// Hidden stems of the branch.
    pub const fn hidden_stems(&self) -> &'static [Stem] {
        self.branch.hidden_stems()
    }
}

impl std::fmt::Display for Pillar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.stem.name(), self.branch.name())
    }
}

/// Year pillar for a CE year (astronomical numbering, any integer).
pub fn compute_year_pillar(year: i32) -> Pillar {
    let offset = (year as i64 - YEAR_EPOCH as i64).rem_euclid(60) as usize;
    Pillar::with_animal(Stem::from_index(offset % 10), Branch::from_index(offset % 12))
}

/// Solar month (1..=12) for a calendar month: January → 12, m → m - 1.
pub fn solar_month(month: u32) -> Result<u32, BaziError> {
    match month {
        1 => Ok(12),
        2..=12 => Ok(month - 1),
        _ => Err(BaziError::InvalidMonth(month)),
    }
}

/// Month pillar for a calendar month (1..=12) in a year with `year_stem`.
pub fn compute_month_pillar(year_stem: Stem, month: u32) -> Result<Pillar, BaziError> {
    let solar = solar_month(month)? as usize;
    let stem = MONTH_STEM_TABLE[year_stem.index() as usize][solar - 1];
    let branch = MONTH_BRANCHES[solar - 1];
    Ok(Pillar::new(stem, branch))
}

/// Day pillar for a validated civil date.
pub fn compute_day_pillar(date: CivilDate) -> Pillar {
    let days_diff = date.jdn() - DAY_EPOCH_JDN;
    let stem = (DAY_EPOCH_STEM_INDEX + days_diff).rem_euclid(10) as usize;
    let branch = (DAY_EPOCH_BRANCH_INDEX + days_diff).rem_euclid(12) as usize;
    Pillar::new(Stem::from_index(stem), Branch::from_index(branch))
}

/// Two-hour bin (0..=11) for an hour of day; 23 and 0 both fall in bin 0.
pub fn hour_bin(hour: u32) -> Result<u8, BaziError> {
    if hour > 23 {
        return Err(BaziError::InvalidHour(hour));
    }
    Ok((((hour + 1) / 2) % 12) as u8)
}

/// Hour pillar for an hour of day (0..=23) on a day with `day_stem`.
pub fn compute_hour_pillar(day_stem: Stem, hour: u32) -> Result<Pillar, BaziError> {
    let bin = hour_bin(hour)? as usize;
    let stem = HOUR_STEM_TABLE[day_stem.index() as usize][bin];
    Ok(Pillar::new(stem, Branch::from_index(bin)))
}
