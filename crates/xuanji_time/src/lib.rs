//! Calendrical primitives for Chinese astrology.
//!
//! This crate provides:
//! - Julian Date ↔ Gregorian calendar conversions
//! - ΔT (TT − UT) and the Sun's apparent longitude
//! - The 24 solar terms (节气) and true new moons
//! - Civil date/time in fixed UTC offsets, reckoned in Beijing time
//! - Solar ↔ lunar (农历) date conversion with leap months
//!
//! Everything is pure math; no data files are needed. Supported Gregorian
//! years are 1900..=2100.

pub mod civil;
pub mod delta_t;
pub mod error;
pub mod julian;
pub mod lunar;
pub mod lunation;
pub mod solar;

pub use civil::{
    BEIJING_OFFSET_MINUTES, CivilDateTime, MAX_YEAR, MIN_YEAR, UtcOffset, beijing_day_number,
    check_year, hour_index,
};
pub use delta_t::{delta_t_seconds, tt_to_ut, ut_to_tt};
pub use error::CalendarError;
pub use julian::{
    J2000_JD, calendar_to_jd, calendar_to_jdn, days_in_month, is_leap_year, jd_to_calendar,
    jdn_to_calendar,
};
pub use lunar::{
    LunarDate, LunarMonth, day_name_zh, leap_month, lunar_to_solar, lunar_year_months,
    month_name_zh, solar_to_lunar,
};
pub use lunation::{SYNODIC_MONTH_DAYS, new_moon_jde};
pub use solar::{
    ALL_SOLAR_TERMS, SolarTerm, normalize_to_pm180, solar_term_jde, solar_term_ut,
    sun_apparent_longitude_deg, sun_longitude_at_ut,
};
