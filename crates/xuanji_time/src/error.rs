//! Error types for calendar conversions.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from calendar validation and solar/lunar conversion.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CalendarError {
    /// A Gregorian date or time component is out of range.
    InvalidDate(String),
    /// A lunar date does not exist (bad month, missing leap month, day past month end).
    InvalidLunarDate(String),
    /// Year is outside the supported 1900..=2100 window.
    YearOutOfRange(i32),
    /// UTC offset / time-zone string could not be understood.
    InvalidOffset(String),
    /// Iterative search did not converge.
    NoConvergence(&'static str),
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(msg) => write!(f, "invalid date: {msg}"),
            Self::InvalidLunarDate(msg) => write!(f, "invalid lunar date: {msg}"),
            Self::YearOutOfRange(y) => {
                write!(f, "year {y} outside supported range 1900..=2100")
            }
            Self::InvalidOffset(msg) => write!(f, "invalid UTC offset: {msg}"),
            Self::NoConvergence(msg) => write!(f, "no convergence: {msg}"),
        }
    }
}

impl Error for CalendarError {}
