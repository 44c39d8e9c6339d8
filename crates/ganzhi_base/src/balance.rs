//! Five-element balance and use-god / avoid-god inference.
//!
//! The strength test is a simple heuristic: day element plus
//! its generator against its controller, no seasonal command and no branch
//! combinations.

use serde::{Deserialize, Serialize};

use crate::chart::ElementCount;
use crate::element::{ALL_ELEMENTS, Element};

/// Spread (max - min) at or below which the chart is balanced, in tenths.
pub const BALANCED_SPREAD_TENTHS: u32 = 10;

/// Spread at or below which the chart is mildly skewed, in tenths.
pub const MILD_SPREAD_TENTHS: u32 = 20;

/// Margin by which support must exceed pressure for a strong day master,
/// in tenths.
pub const STRONG_MARGIN_TENTHS: u32 = 10;

/// Coarse balance classification of the element distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BalanceLabel {
    #[serde(rename = "balanced")]
    Balanced,
    #[serde(rename = "mildly skewed")]
    MildlySkewed,
    #[serde(rename = "significantly skewed")]
    SignificantlySkewed,
}

impl BalanceLabel {
    /// Classify a max - min spread given in tenths.
    pub const fn from_spread_tenths(spread: u32) -> Self {
        if spread <= BALANCED_SPREAD_TENTHS {
            Self::Balanced
        } else if spread <= MILD_SPREAD_TENTHS {
            Self::MildlySkewed
        } else {
            Self::SignificantlySkewed
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::MildlySkewed => "mildly skewed",
            Self::SignificantlySkewed => "significantly skewed",
        }
    }
}

impl std::fmt::Display for BalanceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Element distribution assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementBalance {
    pub element_count: ElementCount,
    /// First maximal element in Wood, Fire, Earth, Metal, Water order.
    pub dominant_element: Element,
    /// Elements with zero count, in element order.
    pub missing_elements: Vec<Element>,
    pub element_balance: BalanceLabel,
}

/// Assess an element distribution.
pub fn element_balance(count: ElementCount) -> ElementBalance {
    let mut dominant = Element::Wood;
    for e in ALL_ELEMENTS {
        if count.tenths(e) > count.tenths(dominant) {
            dominant = e;
        }
    }
    let missing = ALL_ELEMENTS
        .into_iter()
        .filter(|&e| count.tenths(e) == 0)
        .collect();
    let max = ALL_ELEMENTS.iter().map(|&e| count.tenths(e)).max().unwrap_or(0);
    let min = ALL_ELEMENTS.iter().map(|&e| count.tenths(e)).min().unwrap_or(0);
    ElementBalance {
        element_count: count,
        dominant_element: dominant,
        missing_elements: missing,
        element_balance: BalanceLabel::from_spread_tenths(max - min),
    }
}

/// Strength classification of the day master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayMasterStrength {
    Strong,
    Weak,
}

impl DayMasterStrength {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Weak => "weak",
        }
    }
}

/// Elements to favour and to avoid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UseGodResult {
    pub strength: DayMasterStrength,
    pub use_god: Option<Element>,
    pub avoid_god: Option<Element>,
}

/// Infer use god and avoid god for a day element.
///
/// support = count[D] + count[generator(D)], pressure = count[controller(D)].
/// Strong when support > pressure + 1: drain with the controller (falling
/// back to what D produces, then what D controls) and avoid the generator.
/// Otherwise weak: lean on the generator and avoid the controller.
pub fn infer_use_god(count: &ElementCount, day_element: Element) -> UseGodResult {
    let generator = day_element.generated_by();
    let controller = day_element.controlled_by();
    let support = count.tenths(day_element) + generator.map_or(0, |g| count.tenths(g));
    let pressure = controller.map_or(0, |c| count.tenths(c));

    if support > pressure + STRONG_MARGIN_TENTHS {
        UseGodResult {
            strength: DayMasterStrength::Strong,
            use_god: controller
                .or(Some(day_element.generates()))
                .or(Some(day_element.controls())),
            avoid_god: generator.or(Some(day_element)),
        }
    } else {
        UseGodResult {
            strength: DayMasterStrength::Weak,
            use_god: generator.or(Some(day_element)),
            avoid_god: controller,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_thresholds() {
        assert_eq!(BalanceLabel::from_spread_tenths(0), BalanceLabel::Balanced);
        assert_eq!(BalanceLabel::from_spread_tenths(10), BalanceLabel::Balanced);
        assert_eq!(BalanceLabel::from_spread_tenths(11), BalanceLabel::MildlySkewed);
        assert_eq!(BalanceLabel::from_spread_tenths(20), BalanceLabel::MildlySkewed);
        assert_eq!(BalanceLabel::from_spread_tenths(21), BalanceLabel::SignificantlySkewed);
    }

    #[test]
    fn dominant_tie_breaks_by_element_order() {
        let b = element_balance(ElementCount::from_tenths([10, 10, 10, 10, 10]));
        assert_eq!(b.dominant_element, Element::Wood);
        let b = element_balance(ElementCount::from_tenths([3, 13, 13, 0, 0]));
        assert_eq!(b.dominant_element, Element::Fire);
    }

    #[test]
    fn missing_in_order() {
        let b = element_balance(ElementCount::from_tenths([0, 10, 0, 10, 0]));
        assert_eq!(
            b.missing_elements,
            vec![Element::Wood, Element::Earth, Element::Water]
        );
        assert_eq!(b.element_balance, BalanceLabel::Balanced);
    }

    #[test]
    fn strong_fire_drains_with_water() {
        // Fire 1.6 + Wood 0.3 = 1.9 support vs Water 0.3 pressure.
        let count = ElementCount::from_tenths([3, 16, 19, 13, 3]);
        let r = infer_use_god(&count, Element::Fire);
        assert_eq!(r.strength, DayMasterStrength::Strong);
        assert_eq!(r.use_god, Some(Element::Water));
        assert_eq!(r.avoid_god, Some(Element::Wood));
    }

    #[test]
    fn weak_wood_leans_on_water() {
        let count = ElementCount::from_tenths([10, 0, 0, 20, 0]);
        let r = infer_use_god(&count, Element::Wood);
        assert_eq!(r.strength, DayMasterStrength::Weak);
        assert_eq!(r.use_god, Some(Element::Water));
        assert_eq!(r.avoid_god, Some(Element::Metal));
    }

    #[test]
    fn margin_is_strict() {
        // support 2.0 vs pressure 1.0: 2.0 > 1.0 + 1 is false → weak.
        let count = ElementCount::from_tenths([0, 0, 10, 0, 20]);
        let r = infer_use_god(&count, Element::Water);
        assert_eq!(r.strength, DayMasterStrength::Weak);
        assert_eq!(r.use_god, Some(Element::Metal));
        assert_eq!(r.avoid_god, Some(Element::Earth));
        // support 2.1 → strong.
        let count = ElementCount::from_tenths([0, 0, 10, 1, 20]);
        let r = infer_use_god(&count, Element::Water);
        assert_eq!(r.strength, DayMasterStrength::Strong);
        assert_eq!(r.use_god, Some(Element::Earth));
        assert_eq!(r.avoid_god, Some(Element::Metal));
    }
}
