//! Full chart analysis: element balance, ten-god summary and use god.

use serde::{Deserialize, Serialize};

use crate::balance::{DayMasterStrength, ElementBalance, element_balance, infer_use_god};
use crate::chart::{Chart, PillarPosition};
use crate::element::Element;
use crate::stem::Stem;
use crate::ten_god::{TenGod, TenGodLabel};

/// Ten god carried by one non-day pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarTenGod {
    pub position: PillarPosition,
    pub ten_god: TenGod,
}

/// Occurrences of one ten god across the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenGodTally {
    pub ten_god: TenGod,
    pub count: u8,
}

/// Ten gods of every non-day pillar, plus a tally in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenGodSummary {
    pub pillars: Vec<PillarTenGod>,
    pub tally: Vec<TenGodTally>,
}

impl TenGodSummary {
    pub fn from_chart(chart: &Chart) -> Self {
        let mut summary = Self::default();
        for (position, pillar) in chart.pillars() {
            let TenGodLabel::Relative(ten_god) = pillar.ten_god else {
                continue;
            };
            summary.pillars.push(PillarTenGod { position, ten_god });
            match summary.tally.iter_mut().find(|t| t.ten_god == ten_god) {
                Some(t) => t.count += 1,
                None => summary.tally.push(TenGodTally { ten_god, count: 1 }),
            }
        }
        summary
    }

    /// Tally count for one ten god (0 if absent).
    pub fn count(&self, ten_god: TenGod) -> u8 {
        self.tally
            .iter()
            .find(|t| t.ten_god == ten_god)
            .map_or(0, |t| t.count)
    }
}

/// Structured analysis of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartAnalysis {
    pub element_analysis: ElementBalance,
    pub ten_god_analysis: TenGodSummary,
    /// Label of the day pillar, always the day master sentinel.
    pub day_ten_god: TenGodLabel,
    pub day_master: Stem,
    pub day_element: Element,
    pub day_master_strength: DayMasterStrength,
    pub use_god: Option<Element>,
    pub avoid_god: Option<Element>,
}

/// Analyse a chart. Infallible: every fallible step happened while the
/// chart was assembled.
pub fn analyze_chart(chart: &Chart) -> ChartAnalysis {
    let count = chart.element_count();
    let day_element = chart.day.element;
    let use_god = infer_use_god(&count, day_element);
    ChartAnalysis {
        element_analysis: element_balance(count),
        ten_god_analysis: TenGodSummary::from_chart(chart),
        day_ten_god: chart.day.ten_god,
        day_master: chart.day.stem,
        day_element,
        day_master_strength: use_god.strength,
        use_god: use_god.use_god,
        avoid_god: use_god.avoid_god,
    }
}
