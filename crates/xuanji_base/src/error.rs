//! Error types for the symbolic vocabulary.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from stem/branch construction and cycle lookups.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum BaseError {
    /// Stem and branch of differing parity never pair in the 60-cycle.
    InvalidGanZhi(String),
    /// A symbol name or index outside its table.
    UnknownSymbol(String),
}

impl Display for BaseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidGanZhi(msg) => write!(f, "invalid stem-branch pair: {msg}"),
            Self::UnknownSymbol(msg) => write!(f, "unknown symbol: {msg}"),
        }
    }
}

impl Error for BaseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = BaseError::InvalidGanZhi("甲丑".into());
        assert_eq!(e.to_string(), "invalid stem-branch pair: 甲丑");
        let e = BaseError::UnknownSymbol("gender x".into());
        assert_eq!(e.to_string(), "unknown symbol: gender x");
        assert!(e.source().is_none());
    }
}
