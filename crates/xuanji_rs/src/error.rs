//! Error type for the convenience API.

use std::error::Error;
use std::fmt::{Display, Formatter};

use xuanji_base::BaseError;
use xuanji_bazi::BaziError;
use xuanji_time::CalendarError;
use xuanji_ziwei::ZiweiError;

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum XuanjiError {
    /// Birth input rejected before any table lookup.
    InvalidInput(String),
    Calendar(CalendarError),
    Base(BaseError),
    Ziwei(ZiweiError),
    Bazi(BaziError),
}

impl Display for XuanjiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::Calendar(e) => write!(f, "{e}"),
            Self::Base(e) => write!(f, "{e}"),
            Self::Ziwei(e) => write!(f, "ziwei: {e}"),
            Self::Bazi(e) => write!(f, "bazi: {e}"),
        }
    }
}

impl Error for XuanjiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Calendar(e) => Some(e),
            Self::Base(e) => Some(e),
            Self::Ziwei(e) => Some(e),
            Self::Bazi(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }
}

impl From<CalendarError> for XuanjiError {
    fn from(e: CalendarError) -> Self {
        Self::Calendar(e)
    }
}

impl From<BaseError> for XuanjiError {
    fn from(e: BaseError) -> Self {
        Self::Base(e)
    }
}

impl From<ZiweiError> for XuanjiError {
    fn from(e: ZiweiError) -> Self {
        Self::Ziwei(e)
    }
}

impl From<BaziError> for XuanjiError {
    fn from(e: BaziError) -> Self {
        Self::Bazi(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_source() {
        let e = XuanjiError::from(CalendarError::YearOutOfRange(1800));
        assert_eq!(e.to_string(), "year 1800 outside supported range 1900..=2100");
        assert!(e.source().is_some());
        let e = XuanjiError::InvalidInput("hour 24".into());
        assert_eq!(e.to_string(), "invalid input: hour 24");
        assert!(e.source().is_none());
    }
}
