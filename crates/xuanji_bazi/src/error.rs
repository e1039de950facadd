//! Error types for BaZi chart construction.

use std::error::Error;
use std::fmt::{Display, Formatter};

use xuanji_base::BaseError;
use xuanji_time::CalendarError;

/// Errors from pillar and chart construction.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum BaziError {
    /// Error from the calendrical layer.
    Calendar(CalendarError),
    /// Error from the symbolic vocabulary.
    Base(BaseError),
    /// Option value outside its domain.
    InvalidInput(String),
}

impl Display for BaziError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Calendar(e) => write!(f, "calendar error: {e}"),
            Self::Base(e) => write!(f, "{e}"),
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl Error for BaziError {}

impl From<CalendarError> for BaziError {
    fn from(e: CalendarError) -> Self {
        Self::Calendar(e)
    }
}

impl From<BaseError> for BaziError {
    fn from(e: BaseError) -> Self {
        Self::Base(e)
    }
}
