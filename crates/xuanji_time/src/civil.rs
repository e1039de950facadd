//! Civil wall-clock date/time, fixed UTC offsets, and Beijing reckoning.
//!
//! Chinese calendar days and double-hours are counted in UTC+8. A birth
//! time given in another fixed offset is shifted to Beijing time before any
//! calendrical lookup.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

use crate::error::CalendarError;
use crate::julian::{calendar_to_jd, calendar_to_jdn, days_in_month, jdn_to_calendar};

/// Beijing time offset, minutes east of UTC.
pub const BEIJING_OFFSET_MINUTES: i32 = 480;

/// First supported Gregorian year.
pub const MIN_YEAR: i32 = 1900;
/// Last supported Gregorian year.
pub const MAX_YEAR: i32 = 2100;

/// Named zones accepted as aliases for UTC+8.
const UTC8_ZONES: [&str; 6] = [
    "Asia/Shanghai",
    "Asia/Hong_Kong",
    "Asia/Taipei",
    "Asia/Macau",
    "Asia/Singapore",
    "Asia/Chongqing",
];

/// Reject years outside the supported window.
pub fn check_year(year: i32) -> Result<(), CalendarError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(CalendarError::YearOutOfRange(year))
    }
}

// ---------------------------------------------------------------------------
// UtcOffset
// ---------------------------------------------------------------------------

/// A fixed offset from UTC in whole minutes (east positive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UtcOffset {
    minutes: i32,
}

impl UtcOffset {
    /// Beijing / China Standard Time.
    pub const BEIJING: Self = Self {
        minutes: BEIJING_OFFSET_MINUTES,
    };

    /// Construct from minutes east of UTC; valid range is ±14:00.
    pub fn from_minutes(minutes: i32) -> Result<Self, CalendarError> {
        if minutes.abs() > 14 * 60 {
            return Err(CalendarError::InvalidOffset(format!(
                "{minutes} minutes is beyond ±14:00"
            )));
        }
        Ok(Self { minutes })
    }

    pub fn minutes(self) -> i32 {
        self.minutes
    }
}

impl Default for UtcOffset {
    fn default() -> Self {
        Self::BEIJING
    }
}

impl Display for UtcOffset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = if self.minutes < 0 { '-' } else { '+' };
        let abs = self.minutes.abs();
        write!(f, "{sign}{:02}:{:02}", abs / 60, abs % 60)
    }
}

impl FromStr for UtcOffset {
    type Err = CalendarError;

    /// Accepts `+08:00`, `-0530`, `+8`, `UTC+8`, `GMT-3`, `Z`, and a few
    /// IANA names for UTC+8 zones.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if UTC8_ZONES.iter().any(|z| z.eq_ignore_ascii_case(s)) {
            return Ok(Self::BEIJING);
        }
        let upper = s.to_ascii_uppercase();
        let body = upper
            .strip_prefix("UTC")
            .or_else(|| upper.strip_prefix("GMT"))
            .unwrap_or(&upper);
        if body.is_empty() || body == "Z" {
            return Ok(Self { minutes: 0 });
        }

        let bad = || CalendarError::InvalidOffset(s.to_string());
        let (sign, digits) = match body.as_bytes()[0] {
            b'+' => (1, &body[1..]),
            b'-' => (-1, &body[1..]),
            _ => return Err(bad()),
        };
        let (hours, mins) = match digits.split_once(':') {
            Some((h, m)) => (h, m),
            None if digits.len() > 2 => digits.split_at(digits.len() - 2),
            None => (digits, "0"),
        };
        let hours: i32 = hours.parse().map_err(|_| bad())?;
        let mins: i32 = mins.parse().map_err(|_| bad())?;
        if mins >= 60 {
            return Err(bad());
        }
        Self::from_minutes(sign * (hours * 60 + mins))
    }
}

// ---------------------------------------------------------------------------
// CivilDateTime
// ---------------------------------------------------------------------------

/// Wall-clock Gregorian date and time to minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CivilDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl CivilDateTime {
    /// Construct and validate.
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Result<Self, CalendarError> {
        let dt = Self {
            year,
            month,
            day,
            hour,
            minute,
        };
        dt.validate()?;
        Ok(dt)
    }

    /// Check every component against the Gregorian calendar and the
    /// supported year window.
    pub fn validate(&self) -> Result<(), CalendarError> {
        check_year(self.year)?;
        if !(1..=12).contains(&self.month) {
            return Err(CalendarError::InvalidDate(format!("month {}", self.month)));
        }
        let dim = days_in_month(self.year, self.month);
        if self.day == 0 || self.day > dim {
            return Err(CalendarError::InvalidDate(format!(
                "day {} of {}-{:02}",
                self.day, self.year, self.month
            )));
        }
        if self.hour > 23 {
            return Err(CalendarError::InvalidDate(format!("hour {}", self.hour)));
        }
        if self.minute > 59 {
            return Err(CalendarError::InvalidDate(format!("minute {}", self.minute)));
        }
        Ok(())
    }

    /// Shift this wall-clock time from `offset` to UTC+8.
    pub fn to_beijing(&self, offset: UtcOffset) -> Self {
        self.shift_minutes(BEIJING_OFFSET_MINUTES - offset.minutes())
    }

    /// Add a signed number of minutes, carrying across day boundaries.
    pub fn shift_minutes(&self, delta: i32) -> Self {
        let total = self.hour as i64 * 60 + self.minute as i64 + delta as i64;
        let day_shift = total.div_euclid(1440);
        let in_day = total.rem_euclid(1440);
        let jdn = calendar_to_jdn(self.year, self.month, self.day) + day_shift;
        let (year, month, day) = jdn_to_calendar(jdn);
        Self {
            year,
            month,
            day,
            hour: (in_day / 60) as u32,
            minute: (in_day % 60) as u32,
        }
    }

    /// Universal Time JD of this wall-clock instant in `offset`.
    pub fn to_jd_ut(&self, offset: UtcOffset) -> f64 {
        let minutes = self.hour as f64 * 60.0 + self.minute as f64 - offset.minutes() as f64;
        calendar_to_jd(self.year, self.month, self.day as f64 + minutes / 1440.0)
    }

    /// Integer Julian Day Number of the calendar date.
    pub fn jdn(&self) -> i64 {
        calendar_to_jdn(self.year, self.month, self.day)
    }
}

impl Display for CivilDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }
}

/// Beijing civil day number (JDN of the UTC+8 date) containing a UT instant.
pub fn beijing_day_number(jd_ut: f64) -> i64 {
    (jd_ut + BEIJING_OFFSET_MINUTES as f64 / 1440.0 + 0.5).floor() as i64
}

/// Double-hour (时辰) index 0..=11 for a clock hour; 23:00 and 00:xx are 子 (0).
pub const fn hour_index(hour: u32) -> u8 {
    (((hour + 1) / 2) % 12) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_offsets() {
        assert_eq!("+08:00".parse::<UtcOffset>().unwrap().minutes(), 480);
        assert_eq!("-0530".parse::<UtcOffset>().unwrap().minutes(), -330);
        assert_eq!("UTC+8".parse::<UtcOffset>().unwrap().minutes(), 480);
        assert_eq!("GMT-3".parse::<UtcOffset>().unwrap().minutes(), -180);
        assert_eq!("Z".parse::<UtcOffset>().unwrap().minutes(), 0);
        assert_eq!("Asia/Taipei".parse::<UtcOffset>().unwrap(), UtcOffset::BEIJING);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("Europe/Nowhere".parse::<UtcOffset>().is_err());
        assert!("+25:00".parse::<UtcOffset>().is_err());
        assert!("+08:75".parse::<UtcOffset>().is_err());
    }

    #[test]
    fn offset_display() {
        assert_eq!(UtcOffset::from_minutes(-330).unwrap().to_string(), "-05:30");
        assert_eq!(UtcOffset::BEIJING.to_string(), "+08:00");
    }

    #[test]
    fn validate_rejects_bad_components() {
        assert!(CivilDateTime::new(2023, 2, 29, 0, 0).is_err());
        assert!(CivilDateTime::new(2024, 13, 1, 0, 0).is_err());
        assert!(CivilDateTime::new(2024, 1, 1, 24, 0).is_err());
        assert!(CivilDateTime::new(2024, 1, 1, 0, 60).is_err());
        assert_eq!(
            CivilDateTime::new(1899, 1, 1, 0, 0),
            Err(CalendarError::YearOutOfRange(1899))
        );
        assert!(CivilDateTime::new(2024, 2, 29, 23, 59).is_ok());
    }

    #[test]
    fn shift_to_beijing_crosses_midnight() {
        let utc = CivilDateTime::new(1999, 12, 31, 20, 30).unwrap();
        let bj = utc.to_beijing(UtcOffset::from_minutes(0).unwrap());
        assert_eq!(bj, CivilDateTime::new(2000, 1, 1, 4, 30).unwrap());

        let back = bj.shift_minutes(-480);
        assert_eq!(back, utc);
    }

    #[test]
    fn beijing_day_of_ut_instant() {
        // 2000-01-01 16:00 UT is 2000-01-02 00:00 in Beijing.
        let jd = calendar_to_jd(2000, 1, 1.0 + 16.0 / 24.0);
        assert_eq!(beijing_day_number(jd), calendar_to_jdn(2000, 1, 2));
        assert_eq!(beijing_day_number(jd - 1e-6), calendar_to_jdn(2000, 1, 1));
    }

    #[test]
    fn hour_indices() {
        assert_eq!(hour_index(23), 0);
        assert_eq!(hour_index(0), 0);
        assert_eq!(hour_index(1), 1);
        assert_eq!(hour_index(14), 7);
        assert_eq!(hour_index(10), 5);
        assert_eq!(hour_index(22), 11);
    }
}
