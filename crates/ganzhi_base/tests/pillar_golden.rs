//! Golden-value tests for pillars and charts against published almanac
//! dates.
//!
//! Pure table arithmetic, no data files needed.

use ganzhi_base::{
    Animal, BalanceLabel, Branch, Chart, DayMasterStrength, Element, Pillar, PillarPosition, Stem,
    TenGod, TenGodLabel, analyze_chart, compute_chart, compute_day_pillar, compute_year_pillar,
};
use ganzhi_time::CivilDate;

fn date(y: i32, m: u32, d: u32) -> CivilDate {
    CivilDate::new(y, m, d).unwrap()
}

#[test]
fn day_cycle_repeats_every_60_days() {
    let start = date(1899, 6, 15);
    for offset in (0..3000).step_by(37) {
        let d = start.add_days(offset);
        assert_eq!(
            compute_day_pillar(d),
            compute_day_pillar(d.add_days(60)),
            "{d}"
        );
    }
}

#[test]
fn year_cycle_repeats_every_60_years() {
    for y in -200..2200 {
        assert_eq!(compute_year_pillar(y), compute_year_pillar(y + 60), "{y}");
    }
}

#[test]
fn founding_of_prc_is_jia_zi_day() {
    // 1949-10-01 is a Jia-Zi day in every standard almanac.
    let p = compute_day_pillar(date(1949, 10, 1));
    assert_eq!((p.stem, p.branch), (Stem::Jia, Branch::Zi));
    assert_eq!(p.cycle_index(), Some(0));
}

#[test]
fn lunar_new_year_2024_is_jia_chen_day() {
    let p = compute_day_pillar(date(2024, 2, 10));
    assert_eq!((p.stem, p.branch), (Stem::Jia, Branch::Chen));
}

#[test]
fn millennium_day_is_wu_wu() {
    let p = compute_day_pillar(date(2000, 1, 1));
    assert_eq!((p.stem, p.branch), (Stem::Wu, Branch::Wu));
}

#[test]
fn chart_1990_01_01_without_hour() {
    let chart = compute_chart(date(1990, 1, 1), None).unwrap();
    assert_eq!(chart.year.pillar().to_string(), "Geng-Wu");
    assert_eq!(chart.year.animal, Some(Animal::Horse));
    assert_eq!(chart.month.pillar().to_string(), "Ji-Chou");
    assert_eq!(chart.day.pillar().to_string(), "Bing-Yin");
    assert!(chart.hour.is_none());

    let a = analyze_chart(&chart);
    let count = &a.element_analysis.element_count;
    let tenths: Vec<u32> = Element::all().iter().map(|&e| count.tenths(e)).collect();
    assert_eq!(tenths, vec![3, 16, 19, 13, 3]);
    assert_eq!(a.element_analysis.dominant_element, Element::Earth);
    assert_eq!(a.element_analysis.element_balance, BalanceLabel::MildlySkewed);
    assert_eq!(a.day_master_strength, DayMasterStrength::Strong);
    assert_eq!(a.use_god, Some(Element::Water));
    assert_eq!(a.avoid_god, Some(Element::Wood));
}

#[test]
fn chart_1990_01_01_at_noon() {
    let chart = compute_chart(date(1990, 1, 1), Some(12)).unwrap();
    let hour = chart.hour.as_ref().unwrap();
    assert_eq!(hour.pillar().to_string(), "Jia-Wu");
    assert_eq!(hour.ten_god, TenGodLabel::Relative(TenGod::IndirectResource));
    assert_eq!(hour.animal, None);
}

#[test]
fn all_wood_chart_is_significantly_skewed() {
    let chart = Chart::from_pillars(
        Pillar::with_animal(Stem::Jia, Branch::Yin),
        Pillar::new(Stem::Yi, Branch::Mao),
        Pillar::new(Stem::Jia, Branch::Yin),
        Some(Pillar::new(Stem::Yi, Branch::Mao)),
    )
    .unwrap();
    assert_eq!(chart.visible_count(Element::Wood), 4);

    let a = analyze_chart(&chart);
    let b = &a.element_analysis;
    assert_eq!(b.element_count.tenths(Element::Wood), 52);
    assert_eq!(b.dominant_element, Element::Wood);
    assert_eq!(b.missing_elements, vec![Element::Metal, Element::Water]);
    assert_eq!(b.element_balance, BalanceLabel::SignificantlySkewed);
    assert_eq!(a.day_master_strength, DayMasterStrength::Strong);
    assert_eq!(a.use_god, Some(Element::Metal));
    assert_eq!(a.avoid_god, Some(Element::Water));
    assert_eq!(a.ten_god_analysis.count(TenGod::Companion), 1);
    assert_eq!(a.ten_god_analysis.count(TenGod::RobWealth), 2);
}

#[test]
fn weights_add_up_across_dates() {
    let start = date(1950, 1, 1);
    for offset in (0..27_000).step_by(113) {
        let d = start.add_days(offset);
        for hour in [None, Some(0), Some(13), Some(23)] {
            let chart = compute_chart(d, hour).unwrap();
            let count = chart.element_count();
            let visible: u32 = Element::all().iter().map(|&e| chart.visible_count(e)).sum();
            let hidden: u32 = Element::all().iter().map(|&e| chart.hidden_count(e)).sum();
            assert_eq!(visible as usize, chart.pillars().count());
            assert_eq!(count.total_tenths(), visible * 10 + hidden * 3, "{d} {hour:?}");
            for &e in Element::all() {
                assert_eq!(
                    count.tenths(e),
                    chart.visible_count(e) * 10 + chart.hidden_count(e) * 3
                );
            }
        }
    }
}

#[test]
fn missing_and_dominant_are_consistent() {
    let start = date(1980, 3, 3);
    for offset in (0..5000).step_by(71) {
        let chart = compute_chart(start.add_days(offset), Some(offset as u32 % 24)).unwrap();
        let b = analyze_chart(&chart).element_analysis;
        assert!(!b.missing_elements.contains(&b.dominant_element));
        for e in &b.missing_elements {
            assert_eq!(b.element_count.tenths(*e), 0);
        }
        let max = Element::all()
            .iter()
            .map(|&e| b.element_count.tenths(e))
            .max()
            .unwrap();
        assert_eq!(b.element_count.tenths(b.dominant_element), max);
    }
}

#[test]
fn only_day_pillar_is_day_master() {
    let chart = compute_chart(date(2010, 7, 20), Some(8)).unwrap();
    for (pos, p) in chart.pillars() {
        assert_eq!(p.ten_god == TenGodLabel::DayMaster, pos == PillarPosition::Day);
    }
}

#[test]
fn chart_json_roundtrip() {
    let chart = compute_chart(date(1990, 1, 1), Some(12)).unwrap();
    let json = serde_json::to_value(&chart).unwrap();
    assert_eq!(json["year_pillar"]["stem"], "Geng");
    assert_eq!(json["year_pillar"]["animal"], "Horse");
    assert_eq!(json["day_pillar"]["ten_god"], "Day Master");
    assert_eq!(json["month_pillar"]["ten_god"], "Hurting Officer");
    assert_eq!(json["hour_pillar"]["branch"], "Wu");
    let back: Chart = serde_json::from_value(json).unwrap();
    assert_eq!(back, chart);
}
