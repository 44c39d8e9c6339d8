//! Shi Shen (ten gods): the relation of a stem to the day master.
//!
//! Classification runs in two steps. [`relation`] derives the element-cycle
//! geometry between the day stem and a target stem, checked in a fixed
//! priority order. [`TenGod::from_relation`] then maps the relation and
//! polarity match onto the label vocabulary.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BaziError;
use crate::stem::Stem;

/// Element-cycle relation of a target stem to the day stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// Target is the day stem itself.
    SameStem,
    /// Different stem, same element.
    SameElement,
    /// Day element produces the target element.
    Generates,
    /// Day element controls the target element.
    Controls,
    /// Target element controls the day element.
    ControlledBy,
    /// Target element produces the day element.
    GeneratedBy,
}

/// Derive the relation from `day` to `target`, first match wins.
///
/// Returns `None` only if the element cycles fail to cover the pair, which
/// cannot happen with five elements and both cycles intact.
pub fn relation(day: Stem, target: Stem) -> Option<Relation> {
    let de = day.element();
    let te = target.element();
    if target == day {
        Some(Relation::SameStem)
    } else if te == de {
        Some(Relation::SameElement)
    } else if de.generates() == te {
        Some(Relation::Generates)
    } else if de.controls() == te {
        Some(Relation::Controls)
    } else if te.controls() == de {
        Some(Relation::ControlledBy)
    } else if te.generates() == de {
        Some(Relation::GeneratedBy)
    } else {
        None
    }
}

/// The ten gods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenGod {
    /// Same stem (Bi Jian).
    Companion,
    /// Same element, other polarity; the rival (Jie Cai).
    #[serde(rename = "Rob Wealth")]
    RobWealth,
    /// Output, polarity aligned (Shi Shen).
    #[serde(rename = "Eating God")]
    EatingGod,
    /// Output, polarity opposed (Shang Guan).
    #[serde(rename = "Hurting Officer")]
    HurtingOfficer,
    /// Wealth, polarity aligned (Pian Cai).
    #[serde(rename = "Indirect Wealth")]
    IndirectWealth,
    /// Wealth, polarity opposed (Zheng Cai).
    #[serde(rename = "Direct Wealth")]
    DirectWealth,
    /// Authority, polarity aligned (Qi Sha).
    #[serde(rename = "Seven Killings")]
    SevenKillings,
    /// Authority, polarity opposed (Zheng Guan).
    #[serde(rename = "Direct Officer")]
    DirectOfficer,
    /// Resource, polarity aligned (Pian Yin).
    #[serde(rename = "Indirect Resource")]
    IndirectResource,
    /// Resource, polarity opposed (Zheng Yin).
    #[serde(rename = "Direct Resource")]
    DirectResource,
}

/// All ten gods in traditional order.
pub const ALL_TEN_GODS: [TenGod; 10] = [
    TenGod::Companion,
    TenGod::RobWealth,
    TenGod::EatingGod,
    TenGod::HurtingOfficer,
    TenGod::IndirectWealth,
    TenGod::DirectWealth,
    TenGod::SevenKillings,
    TenGod::DirectOfficer,
    TenGod::IndirectResource,
    TenGod::DirectResource,
];

impl TenGod {
    /// Label for a relation and whether the two stems share polarity.
    pub const fn from_relation(relation: Relation, same_polarity: bool) -> TenGod {
        match (relation, same_polarity) {
            (Relation::SameStem, _) => Self::Companion,
            (Relation::SameElement, _) => Self::RobWealth,
            (Relation::Generates, true) => Self::EatingGod,
            (Relation::Generates, false) => Self::HurtingOfficer,
            (Relation::Controls, true) => Self::IndirectWealth,
            (Relation::Controls, false) => Self::DirectWealth,
            (Relation::ControlledBy, true) => Self::SevenKillings,
            (Relation::ControlledBy, false) => Self::DirectOfficer,
            (Relation::GeneratedBy, true) => Self::IndirectResource,
            (Relation::GeneratedBy, false) => Self::DirectResource,
        }
    }

    /// English name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Companion => "Companion",
            Self::RobWealth => "Rob Wealth",
            Self::EatingGod => "Eating God",
            Self::HurtingOfficer => "Hurting Officer",
            Self::IndirectWealth => "Indirect Wealth",
            Self::DirectWealth => "Direct Wealth",
            Self::SevenKillings => "Seven Killings",
            Self::DirectOfficer => "Direct Officer",
            Self::IndirectResource => "Indirect Resource",
            Self::DirectResource => "Direct Resource",
        }
    }

    /// Chinese name.
    pub const fn chinese(self) -> &'static str {
        match self {
            Self::Companion => "比肩",
            Self::RobWealth => "劫财",
            Self::EatingGod => "食神",
            Self::HurtingOfficer => "伤官",
            Self::IndirectWealth => "偏财",
            Self::DirectWealth => "正财",
            Self::SevenKillings => "七杀",
            Self::DirectOfficer => "正官",
            Self::IndirectResource => "偏印",
            Self::DirectResource => "正印",
        }
    }
}

impl std::fmt::Display for TenGod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TenGod {
    type Err = BaziError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ALL_TEN_GODS
            .into_iter()
            .find(|g| g.name().eq_ignore_ascii_case(s) || g.chinese() == s)
            .ok_or_else(|| BaziError::UnknownSymbol(s.to_string()))
    }
}

/// Ten god of `target` relative to the day stem.
///
/// An uncovered pair is reported as [`BaziError::Inconsistent`]; it signals
/// a broken element table and is never mapped to a default label.
pub fn ten_god(day: Stem, target: Stem) -> Result<TenGod, BaziError> {
    let rel = relation(day, target).ok_or(BaziError::Inconsistent { day, target })?;
    Ok(TenGod::from_relation(rel, day.polarity() == target.polarity()))
}

/// Ten-god slot of a chart pillar: the day pillar is the day master itself,
/// every other pillar carries a classified ten god.
///
/// Serialized as a plain string (`"Day Master"` or the ten-god name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum TenGodLabel {
    DayMaster,
    Relative(TenGod),
}

/// Literal used for the day pillar's label.
pub const DAY_MASTER_LABEL: &str = "Day Master";

impl TenGodLabel {
    pub const fn name(self) -> &'static str {
        match self {
            Self::DayMaster => DAY_MASTER_LABEL,
            Self::Relative(g) => g.name(),
        }
    }

    pub const fn chinese(self) -> &'static str {
        match self {
            Self::DayMaster => "日主",
            Self::Relative(g) => g.chinese(),
        }
    }

    /// The classified ten god, `None` for the day master.
    pub const fn ten_god(self) -> Option<TenGod> {
        match self {
            Self::DayMaster => None,
            Self::Relative(g) => Some(g),
        }
    }
}

impl std::fmt::Display for TenGodLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<TenGodLabel> for String {
    fn from(label: TenGodLabel) -> Self {
        label.name().to_string()
    }
}

impl TryFrom<String> for TenGodLabel {
    type Error = BaziError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s == DAY_MASTER_LABEL {
            Ok(Self::DayMaster)
        } else {
            s.parse().map(Self::Relative)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stem::ALL_STEMS;

    #[test]
    fn self_is_companion() {
        for s in ALL_STEMS {
            assert_eq!(ten_god(s, s).unwrap(), TenGod::Companion);
        }
    }

    #[test]
    fn every_pair_classifies() {
        for d in ALL_STEMS {
            for t in ALL_STEMS {
                assert!(relation(d, t).is_some(), "{d} -> {t}");
            }
        }
    }

    #[test]
    fn jia_sees_yi_as_rob_wealth() {
        assert_eq!(relation(Stem::Jia, Stem::Yi), Some(Relation::SameElement));
        assert_eq!(ten_god(Stem::Jia, Stem::Yi).unwrap(), TenGod::RobWealth);
    }

    #[test]
    fn jia_day_full_row() {
        use Stem::*;
        let expected = [
            (Jia, TenGod::Companion),
            (Yi, TenGod::RobWealth),
            (Bing, TenGod::EatingGod),
            (Ding, TenGod::HurtingOfficer),
            (Wu, TenGod::IndirectWealth),
            (Ji, TenGod::DirectWealth),
            (Geng, TenGod::SevenKillings),
            (Xin, TenGod::DirectOfficer),
            (Ren, TenGod::IndirectResource),
            (Gui, TenGod::DirectResource),
        ];
        for (target, god) in expected {
            assert_eq!(ten_god(Jia, target).unwrap(), god, "Jia -> {target}");
        }
    }

    #[test]
    fn not_symmetric() {
        // Bing fire controls Geng metal; Geng sees Bing as its controller.
        assert_eq!(ten_god(Stem::Bing, Stem::Geng).unwrap(), TenGod::IndirectWealth);
        assert_eq!(ten_god(Stem::Geng, Stem::Bing).unwrap(), TenGod::SevenKillings);
    }

    #[test]
    fn each_day_stem_sees_all_ten_gods_once() {
        for d in ALL_STEMS {
            let mut seen: Vec<TenGod> = ALL_STEMS.iter().map(|&t| ten_god(d, t).unwrap()).collect();
            seen.sort_by_key(|g| ALL_TEN_GODS.iter().position(|x| x == g));
            assert_eq!(seen, ALL_TEN_GODS.to_vec(), "day {d}");
        }
    }

    #[test]
    fn label_string_roundtrip() {
        let s: String = TenGodLabel::DayMaster.into();
        assert_eq!(s, "Day Master");
        assert_eq!(TenGodLabel::try_from(s).unwrap(), TenGodLabel::DayMaster);
        let s: String = TenGodLabel::Relative(TenGod::SevenKillings).into();
        assert_eq!(
            TenGodLabel::try_from(s).unwrap(),
            TenGodLabel::Relative(TenGod::SevenKillings)
        );
        assert!(TenGodLabel::try_from("Nobody".to_string()).is_err());
    }
}
