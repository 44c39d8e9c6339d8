//! Integration tests for civil date arithmetic.

use ganzhi_time::{CivilDate, TimeError, calendar_to_jdn, jdn_to_calendar};

#[test]
fn every_day_of_2024_roundtrips() {
    let start = CivilDate::new(2024, 1, 1).unwrap();
    let mut expected_month = 1;
    let mut seen = 0;
    for offset in 0..366 {
        let d = start.add_days(offset);
        assert_eq!(d.year(), 2024, "offset {offset}");
        if d.month() != expected_month {
            assert_eq!(d.day(), 1, "month change must land on day 1");
            expected_month = d.month();
        }
        assert_eq!(d.days_since(start), offset);
        seen += 1;
    }
    assert_eq!(seen, 366);
    assert_eq!(start.add_days(366), CivilDate::new(2025, 1, 1).unwrap());
}

#[test]
fn century_span_day_count() {
    let a = CivilDate::new(1900, 1, 1).unwrap();
    let b = CivilDate::new(2000, 1, 1).unwrap();
    // 100 years, 24 leap days (1900 is not a leap year, 2000 falls after).
    assert_eq!(b.days_since(a), 36_524);
}

#[test]
fn jdn_roundtrip_sweep() {
    let mut jdn = 1_000_000;
    while jdn < 3_000_000 {
        let (y, m, d) = jdn_to_calendar(jdn);
        assert_eq!(calendar_to_jdn(y, m, d), jdn);
        jdn += 9_973;
    }
}

#[test]
fn parse_errors_are_client_errors() {
    let err = "1990-02-30".parse::<CivilDate>().unwrap_err();
    assert_eq!(
        err,
        TimeError::InvalidDate {
            year: 1990,
            month: 2,
            day: 30
        }
    );
    assert_eq!(err.to_string(), "invalid calendar date: 1990-02-30");
}
