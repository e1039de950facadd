//! Chinese lunisolar calendar (农历): solar ↔ lunar date conversion.
//!
//! Months begin on the Beijing civil day of the true new moon. The month
//! holding the winter solstice is month 11. A span from one month 11 to the
//! next (a 岁) with 13 lunations carries one leap month: the first month
//! that contains no principal term (中气). It repeats the preceding month's
//! number. Months 11 and 12 at the head of a span belong to the previous
//! lunar year.
//!
//! Clean-room implementation from the rules of the 1645 时宪历 reform as
//! codified in GB/T 33661-2017, using the Meeus solar and lunar theories.

use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::civil::{MAX_YEAR, MIN_YEAR, beijing_day_number, check_year};
use crate::delta_t::tt_to_ut;
use crate::error::CalendarError;
use crate::julian::{calendar_to_jdn, days_in_month, jdn_to_calendar};
use crate::lunation::{nearest_lunation, new_moon_jde};
use crate::solar::{ALL_SOLAR_TERMS, SolarTerm, solar_term_ut};

const MONTH_NAMES: [&str; 12] = [
    "正", "二", "三", "四", "五", "六", "七", "八", "九", "十", "冬", "腊",
];

const DAY_NAMES: [&str; 30] = [
    "初一", "初二", "初三", "初四", "初五", "初六", "初七", "初八", "初九", "初十", "十一", "十二",
    "十三", "十四", "十五", "十六", "十七", "十八", "十九", "二十", "廿一", "廿二", "廿三", "廿四",
    "廿五", "廿六", "廿七", "廿八", "廿九", "三十",
];

/// Chinese name of a lunar month number (1..=12), with 闰 for leap months.
///
/// Returns an empty string for an out-of-range number.
pub fn month_name_zh(month: u8, is_leap: bool) -> String {
    match MONTH_NAMES.get((month as usize).wrapping_sub(1)) {
        Some(name) if is_leap => format!("闰{name}"),
        Some(name) => (*name).to_string(),
        None => String::new(),
    }
}

/// Chinese name of a lunar day (1..=30), or `""` when out of range.
pub fn day_name_zh(day: u8) -> &'static str {
    DAY_NAMES
        .get((day as usize).wrapping_sub(1))
        .copied()
        .unwrap_or("")
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A date in the Chinese lunisolar calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LunarDate {
    /// Lunar year, numbered by the Gregorian year in which its month 1 starts.
    pub year: i32,
    /// Month number 1..=12.
    pub month: u8,
    /// Day of month 1..=30.
    pub day: u8,
    /// Whether the month is an intercalary (闰) month.
    pub is_leap: bool,
}

impl LunarDate {
    pub fn new(year: i32, month: u8, day: u8, is_leap: bool) -> Self {
        Self {
            year,
            month,
            day,
            is_leap,
        }
    }

    /// Month and day in Chinese, e.g. `四月廿一` or `闰二月初三`.
    pub fn month_day_zh(&self) -> String {
        format!(
            "{}月{}",
            month_name_zh(self.month, self.is_leap),
            day_name_zh(self.day)
        )
    }
}

impl Display for LunarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let leap = if self.is_leap { "闰" } else { "" };
        write!(f, "{}-{leap}{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// One lunation as placed in the civil calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LunarMonth {
    /// Julian Day Number of the first civil day (Beijing).
    pub start_jdn: i64,
    /// Month number 1..=12.
    pub number: u8,
    pub is_leap: bool,
    /// 29 or 30.
    pub days: u8,
}

/// The months between two successive winter-solstice months.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Sui {
    months: Vec<LunarMonth>,
    /// Index of the first non-leap month 1; earlier months belong to the
    /// previous lunar year.
    first_month_index: usize,
}

// ---------------------------------------------------------------------------
// Span construction
// ---------------------------------------------------------------------------

fn civil_day_of_term(year: i32, term: SolarTerm) -> i64 {
    beijing_day_number(solar_term_ut(year, term))
}

fn civil_day_of_new_moon(k: i64) -> i64 {
    beijing_day_number(tt_to_ut(new_moon_jde(k)))
}

/// Lunation number and start day of the month containing civil day `jdn`.
fn lunation_containing(jdn: i64) -> (i64, i64) {
    let mut k = nearest_lunation(jdn as f64);
    while civil_day_of_new_moon(k) > jdn {
        k -= 1;
    }
    while civil_day_of_new_moon(k + 1) <= jdn {
        k += 1;
    }
    (k, civil_day_of_new_moon(k))
}

/// Start day of the month-11 holding the winter solstice of `year`.
fn month11_start(year: i32) -> i64 {
    lunation_containing(civil_day_of_term(year, SolarTerm::DongZhi)).1
}

/// Build the span from month 11 of lunar year `y - 1` up to, not including,
/// month 11 of lunar year `y`.
fn build_sui(y: i32) -> Sui {
    let (k_start, _) = lunation_containing(civil_day_of_term(y - 1, SolarTerm::DongZhi));
    let (k_end, _) = lunation_containing(civil_day_of_term(y, SolarTerm::DongZhi));
    let starts: Vec<i64> = (k_start..=k_end).map(civil_day_of_new_moon).collect();

    let principal_days: Vec<i64> = [y - 1, y]
        .iter()
        .flat_map(|&yr| {
            ALL_SOLAR_TERMS
                .iter()
                .filter(|t| t.is_principal())
                .map(move |&t| civil_day_of_term(yr, t))
        })
        .collect();

    let lunations = starts.len().saturating_sub(1);
    let mut leap_pending = lunations == 13;
    let mut number = 11u8;
    let mut months = Vec::with_capacity(lunations);

    for (i, window) in starts.windows(2).enumerate() {
        let (s, e) = (window[0], window[1]);
        let mut is_leap = false;
        if i > 0 {
            let has_principal = principal_days.iter().any(|d| (s..e).contains(d));
            if leap_pending && !has_principal {
                leap_pending = false;
                is_leap = true;
            } else {
                number = number % 12 + 1;
            }
        }
        months.push(LunarMonth {
            start_jdn: s,
            number,
            is_leap,
            days: (e - s) as u8,
        });
    }

    let first_month_index = months
        .iter()
        .position(|m| m.number == 1 && !m.is_leap)
        .unwrap_or(months.len());

    log::debug!(
        "sui {y}: {} lunations from JDN {}, leap {:?}",
        lunations,
        starts.first().copied().unwrap_or_default(),
        months.iter().find(|m| m.is_leap).map(|m| m.number)
    );

    Sui {
        months,
        first_month_index,
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Ordered months of lunar year `year` (month 1 through month 12, with any
/// leap month in place).
pub fn lunar_year_months(year: i32) -> Result<Vec<LunarMonth>, CalendarError> {
    check_lunar_year(year)?;
    let head = build_sui(year);
    let tail = build_sui(year + 1);
    Ok(head.months[head.first_month_index..]
        .iter()
        .chain(tail.months[..tail.first_month_index].iter())
        .copied()
        .collect())
}

/// The leap month number of lunar year `year`, if any.
pub fn leap_month(year: i32) -> Result<Option<u8>, CalendarError> {
    Ok(lunar_year_months(year)?
        .iter()
        .find(|m| m.is_leap)
        .map(|m| m.number))
}

/// Convert a Gregorian civil date (Beijing) to a lunar date.
pub fn solar_to_lunar(year: i32, month: u32, day: u32) -> Result<LunarDate, CalendarError> {
    check_year(year)?;
    if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
        return Err(CalendarError::InvalidDate(format!(
            "{year}-{month:02}-{day:02}"
        )));
    }
    let jdn = calendar_to_jdn(year, month, day);
    let sui_year = if jdn >= month11_start(year) {
        year + 1
    } else {
        year
    };
    let sui = build_sui(sui_year);

    let (idx, m) = sui
        .months
        .iter()
        .enumerate()
        .rev()
        .find(|(_, m)| m.start_jdn <= jdn)
        .ok_or(CalendarError::NoConvergence("lunar month lookup"))?;

    let lunar_year = if idx >= sui.first_month_index {
        sui_year
    } else {
        sui_year - 1
    };
    let date = LunarDate::new(lunar_year, m.number, (jdn - m.start_jdn + 1) as u8, m.is_leap);
    log::debug!("solar {year}-{month:02}-{day:02} -> lunar {date}");
    Ok(date)
}

/// Convert a lunar date to its Gregorian civil date `(year, month, day)`.
pub fn lunar_to_solar(date: LunarDate) -> Result<(i32, u32, u32), CalendarError> {
    check_lunar_year(date.year)?;
    if !(1..=12).contains(&date.month) || !(1..=30).contains(&date.day) {
        return Err(CalendarError::InvalidLunarDate(date.to_string()));
    }
    let month = lunar_year_months(date.year)?
        .into_iter()
        .find(|m| m.number == date.month && m.is_leap == date.is_leap)
        .ok_or_else(|| CalendarError::InvalidLunarDate(format!("{date}: no such month")))?;
    if date.day > month.days {
        return Err(CalendarError::InvalidLunarDate(format!(
            "{date}: month has {} days",
            month.days
        )));
    }
    let solar = jdn_to_calendar(month.start_jdn + date.day as i64 - 1);
    check_year(solar.0)?;
    Ok(solar)
}

/// Lunar years run one behind Gregorian in January, so 1899 is allowed for
/// dates early in 1900.
fn check_lunar_year(year: i32) -> Result<(), CalendarError> {
    if (MIN_YEAR - 1..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(CalendarError::YearOutOfRange(year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_and_day_names() {
        assert_eq!(month_name_zh(1, false), "正");
        assert_eq!(month_name_zh(11, false), "冬");
        assert_eq!(month_name_zh(12, false), "腊");
        assert_eq!(month_name_zh(4, true), "闰四");
        assert_eq!(month_name_zh(13, false), "");
        assert_eq!(day_name_zh(1), "初一");
        assert_eq!(day_name_zh(10), "初十");
        assert_eq!(day_name_zh(20), "二十");
        assert_eq!(day_name_zh(21), "廿一");
        assert_eq!(day_name_zh(30), "三十");
        assert_eq!(day_name_zh(0), "");
    }

    #[test]
    fn month_day_string() {
        let d = LunarDate::new(1990, 4, 21, false);
        assert_eq!(d.month_day_zh(), "四月廿一");
        let d = LunarDate::new(2023, 2, 3, true);
        assert_eq!(d.month_day_zh(), "闰二月初三");
    }

    #[test]
    fn year_has_twelve_or_thirteen_months() {
        for y in [1950, 1990, 2020, 2023, 2024] {
            let months = lunar_year_months(y).unwrap();
            let leaps = months.iter().filter(|m| m.is_leap).count();
            assert_eq!(months.len(), 12 + leaps, "year {y}");
            assert!(leaps <= 1);
            assert_eq!(months[0].number, 1);
            assert!(months.iter().all(|m| m.days == 29 || m.days == 30));
            let total: u32 = months.iter().map(|m| m.days as u32).sum();
            assert!((353..=385).contains(&total), "year {y}: {total} days");
        }
    }

    #[test]
    fn lunar_to_solar_rejects_missing_leap() {
        // 2024 has no leap month
        let err = lunar_to_solar(LunarDate::new(2024, 5, 1, true)).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidLunarDate(_)));
    }

    #[test]
    fn solar_to_lunar_rejects_bad_dates() {
        assert!(solar_to_lunar(2023, 2, 29).is_err());
        assert_eq!(
            solar_to_lunar(2101, 1, 1),
            Err(CalendarError::YearOutOfRange(2101))
        );
    }
}
