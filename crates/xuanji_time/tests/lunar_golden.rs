//! Golden-value tests for the lunisolar calendar against published almanacs.
//!
//! Pure math; no data files needed.

use xuanji_time::{
    LunarDate, SolarTerm, calendar_to_jd, leap_month, lunar_to_solar, lunar_year_months,
    solar_term_ut, solar_to_lunar,
};

/// Chinese New Year (正月初一) dates from the Hong Kong Observatory tables.
const NEW_YEARS: [(i32, u32, u32); 11] = [
    (1900, 1, 31),
    (1985, 2, 20),
    (1990, 1, 27),
    (2000, 2, 5),
    (2017, 1, 28),
    (2020, 1, 25),
    (2023, 1, 22),
    (2024, 2, 10),
    (2033, 1, 31),
    (2057, 2, 4),
    (2100, 2, 9),
];

#[test]
fn chinese_new_year_dates() {
    for (y, m, d) in NEW_YEARS {
        assert_eq!(
            solar_to_lunar(y, m, d).unwrap(),
            LunarDate::new(y, 1, 1, false),
            "{y}-{m:02}-{d:02}"
        );
        assert_eq!(lunar_to_solar(LunarDate::new(y, 1, 1, false)).unwrap(), (y, m, d));
    }
}

#[test]
fn eve_of_new_year_is_previous_lunar_year() {
    let eve = solar_to_lunar(2024, 2, 9).unwrap();
    assert_eq!(eve.year, 2023);
    assert_eq!(eve.month, 12);
    assert!(!eve.is_leap);
}

#[test]
fn leap_months() {
    assert_eq!(leap_month(2020).unwrap(), Some(4));
    assert_eq!(leap_month(2023).unwrap(), Some(2));
    assert_eq!(leap_month(2033).unwrap(), Some(11));
    assert_eq!(leap_month(1990).unwrap(), Some(5));
    assert_eq!(leap_month(2024).unwrap(), None);
}

#[test]
fn leap_eleventh_month_of_2033() {
    // 2033-12-22 opens 闰十一月; the 2033 problem year.
    assert_eq!(
        solar_to_lunar(2033, 12, 22).unwrap(),
        LunarDate::new(2033, 11, 1, true)
    );
    assert_eq!(
        solar_to_lunar(2034, 1, 1).unwrap(),
        LunarDate::new(2033, 11, 11, true)
    );
}

#[test]
fn fixture_birth_dates() {
    let d = solar_to_lunar(1990, 5, 15).unwrap();
    assert_eq!(d, LunarDate::new(1990, 4, 21, false));
    assert_eq!(d.month_day_zh(), "四月廿一");

    let d = solar_to_lunar(1985, 8, 23).unwrap();
    assert_eq!(d, LunarDate::new(1985, 7, 8, false));
}

#[test]
fn days_between_month11_start_and_solstice() {
    // Month 10 of 2023 ends 2023-12-12; month 11 starts 2023-12-13.
    assert_eq!(
        solar_to_lunar(2023, 12, 12).unwrap(),
        LunarDate::new(2023, 10, 30, false)
    );
    assert_eq!(
        solar_to_lunar(2023, 12, 13).unwrap(),
        LunarDate::new(2023, 11, 1, false)
    );
}

#[test]
fn every_day_of_a_year_roundtrips() {
    for m in lunar_year_months(2023).unwrap() {
        for day in 1..=m.days {
            let date = LunarDate::new(2023, m.number, day, m.is_leap);
            let (y, mo, d) = lunar_to_solar(date).unwrap();
            assert_eq!(solar_to_lunar(y, mo, d).unwrap(), date);
        }
    }
}

#[test]
fn day_thirty_rejected_in_short_month() {
    let short = lunar_year_months(2024)
        .unwrap()
        .into_iter()
        .find(|m| m.days == 29)
        .unwrap();
    assert!(lunar_to_solar(LunarDate::new(2024, short.number, 30, false)).is_err());
}

/// Beijing wall-clock minutes from a UT JD, relative to a given date.
fn beijing_minutes_after(jd_ut: f64, year: i32, month: u32, day: u32) -> f64 {
    (jd_ut + 8.0 / 24.0 - calendar_to_jd(year, month, day as f64)) * 1440.0
}

#[test]
fn solar_terms_near_published_times() {
    // (year, term, Beijing date, published hh:mm)
    let cases = [
        (2024, SolarTerm::LiChun, (2024, 2, 4), 16 * 60 + 27),
        (2000, SolarTerm::DongZhi, (2000, 12, 21), 21 * 60 + 37),
        (2023, SolarTerm::ChunFen, (2023, 3, 21), 5 * 60 + 24),
        (1990, SolarTerm::LiXia, (1990, 5, 6), 2 * 60 + 35),
    ];
    for (year, term, (y, m, d), published) in cases {
        let got = beijing_minutes_after(solar_term_ut(year, term), y, m, d);
        assert!(
            (got - published as f64).abs() < 15.0,
            "{} {year}: {got:.1} min vs {published}",
            term.name()
        );
    }
}
