//! Four Pillars chart assembly and five-element tally.

use ganzhi_time::CivilDate;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::branch::{Animal, Branch};
use crate::element::{ALL_ELEMENTS, Element};
use crate::error::BaziError;
use crate::pillar::{
    Pillar, compute_day_pillar, compute_hour_pillar, compute_month_pillar, compute_year_pillar,
};
use crate::stem::Stem;
use crate::ten_god::{TenGodLabel, ten_god};

/// Weight of a visible stem, in tenths.
pub const VISIBLE_WEIGHT_TENTHS: u32 = 10;

/// Weight of each hidden stem, in tenths (0.3).
pub const HIDDEN_WEIGHT_TENTHS: u32 = 3;

/// Which of the four pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PillarPosition {
    Year,
    Month,
    Day,
    Hour,
}

impl PillarPosition {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
        }
    }
}

/// A pillar enriched with its hidden stems and ten-god label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPillar {
    pub stem: Stem,
    pub branch: Branch,
    pub element: Element,
    pub animal: Option<Animal>,
    pub hidden_stems: Vec<Stem>,
    pub ten_god: TenGodLabel,
}

impl ChartPillar {
    /// Enrich `pillar` relative to `day_stem`. The day pillar itself must be
    /// built with [`ChartPillar::day_master`] instead.
    pub fn relative_to(pillar: Pillar, day_stem: Stem) -> Result<Self, BaziError> {
        let god = ten_god(day_stem, pillar.stem)?;
        Ok(Self::enrich(pillar, TenGodLabel::Relative(god)))
    }

    /// Enrich the day pillar; its label is always the day master sentinel.
    pub fn day_master(pillar: Pillar) -> Self {
        Self::enrich(pillar, TenGodLabel::DayMaster)
    }

    fn enrich(pillar: Pillar, ten_god: TenGodLabel) -> Self {
        Self {
            stem: pillar.stem,
            branch: pillar.branch,
            element: pillar.element,
            animal: pillar.animal,
            hidden_stems: pillar.hidden_stems().to_vec(),
            ten_god,
        }
    }

    /// The bare pillar without enrichment.
    pub fn pillar(&self) -> Pillar {
        Pillar {
            stem: self.stem,
            branch: self.branch,
            element: self.element,
            animal: self.animal,
        }
    }
}

/// A Four Pillars chart. The hour pillar is present iff a birth hour was
/// supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chart {
    #[serde(rename = "year_pillar")]
    pub year: ChartPillar,
    #[serde(rename = "month_pillar")]
    pub month: ChartPillar,
    #[serde(rename = "day_pillar")]
    pub day: ChartPillar,
    #[serde(rename = "hour_pillar")]
    pub hour: Option<ChartPillar>,
}

impl Chart {
    /// Assemble a chart from bare pillars, attaching hidden stems and ten
    /// gods relative to the day stem.
    pub fn from_pillars(
        year: Pillar,
        month: Pillar,
        day: Pillar,
        hour: Option<Pillar>,
    ) -> Result<Self, BaziError> {
        let day_stem = day.stem;
        Ok(Self {
            year: ChartPillar::relative_to(year, day_stem)?,
            month: ChartPillar::relative_to(month, day_stem)?,
            day: ChartPillar::day_master(day),
            hour: hour
                .map(|p| ChartPillar::relative_to(p, day_stem))
                .transpose()?,
        })
    }

    /// The day master (day pillar stem).
    pub fn day_master(&self) -> Stem {
        self.day.stem
    }

    /// Present pillars in year, month, day, hour order.
    pub fn pillars(&self) -> impl Iterator<Item = (PillarPosition, &ChartPillar)> {
        [
            (PillarPosition::Year, Some(&self.year)),
            (PillarPosition::Month, Some(&self.month)),
            (PillarPosition::Day, Some(&self.day)),
            (PillarPosition::Hour, self.hour.as_ref()),
        ]
        .into_iter()
        .filter_map(|(pos, p)| p.map(|p| (pos, p)))
    }

    /// Number of pillars whose visible stem carries `element`.
    pub fn visible_count(&self, element: Element) -> u32 {
        self.pillars().filter(|(_, p)| p.element == element).count() as u32
    }

    /// Number of hidden stems across all branches carrying `element`.
    pub fn hidden_count(&self, element: Element) -> u32 {
        self.pillars()
            .flat_map(|(_, p)| p.hidden_stems.iter())
            .filter(|s| s.element() == element)
            .count() as u32
    }

    /// Weighted five-element distribution: 1 per visible stem, 0.3 per
    /// hidden stem.
    pub fn element_count(&self) -> ElementCount {
        let mut count = ElementCount::default();
        for (_, p) in self.pillars() {
            count.add_visible(p.element);
            for s in &p.hidden_stems {
                count.add_hidden(s.element());
            }
        }
        count
    }
}

/// Compute the chart for a birth date and optional hour of day.
pub fn compute_chart(date: CivilDate, hour: Option<u32>) -> Result<Chart, BaziError> {
    let year = compute_year_pillar(date.year());
    let month = compute_month_pillar(year.stem, date.month())?;
    let day = compute_day_pillar(date);
    let hour = hour.map(|h| compute_hour_pillar(day.stem, h)).transpose()?;
    Chart::from_pillars(year, month, day, hour)
}

/// Weighted element tally, kept in exact tenths.
///
/// Serialized as a map from element name to a real count, in element order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ElementCount {
    tenths: [u32; 5],
}

/// Largest decoded per-element count, in tenths; five of them still sum
/// within `u32`.
const MAX_DECODED_TENTHS: u32 = u32::MAX / 5;

impl ElementCount {
    /// Build from per-element tenths in element order.
    pub const fn from_tenths(tenths: [u32; 5]) -> Self {
        Self { tenths }
    }

    pub fn add_visible(&mut self, element: Element) {
        let slot = &mut self.tenths[element.index() as usize];
        *slot = slot.saturating_add(VISIBLE_WEIGHT_TENTHS);
    }

    pub fn add_hidden(&mut self, element: Element) {
        let slot = &mut self.tenths[element.index() as usize];
        *slot = slot.saturating_add(HIDDEN_WEIGHT_TENTHS);
    }

    /// Count in tenths (13 means 1.3).
    pub const fn tenths(&self, element: Element) -> u32 {
        self.tenths[element.index() as usize]
    }

    /// Count as a real number.
    pub fn get(&self, element: Element) -> f64 {
        self.tenths(element) as f64 / 10.0
    }

    /// `(element, count)` pairs in element order.
    pub fn iter(&self) -> impl Iterator<Item = (Element, f64)> + '_ {
        ALL_ELEMENTS.into_iter().map(|e| (e, self.get(e)))
    }

    /// Sum of all counts, in tenths.
    pub fn total_tenths(&self) -> u32 {
        self.tenths.iter().fold(0, |acc, t| acc.saturating_add(*t))
    }
}

impl Serialize for ElementCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5))?;
        for (e, v) in self.iter() {
            map.serialize_entry(e.name(), &v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ElementCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CountVisitor;

        impl<'de> Visitor<'de> for CountVisitor {
            type Value = ElementCount;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map from element name to a non-negative count")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut tenths = [0u32; 5];
                while let Some((element, value)) = access.next_entry::<Element, f64>()? {
                    let scaled = value * 10.0;
                    let rounded = scaled.round();
                    if !value.is_finite() || value < 0.0 || rounded > f64::from(MAX_DECODED_TENTHS) {
                        return Err(serde::de::Error::custom(format!(
                            "invalid count {value} for {element}"
                        )));
                    }
                    if (scaled - rounded).abs() > 1e-6 {
                        return Err(serde::de::Error::custom(format!(
                            "count {value} for {element} is not a multiple of 0.1"
                        )));
                    }
                    tenths[element.index() as usize] = rounded as u32;
                }
                Ok(ElementCount { tenths })
            }
        }

        deserializer.deserialize_map(CountVisitor)
    }
}
