//! Error types for Zi Wei chart construction.

use std::error::Error;
use std::fmt::{Display, Formatter};

use xuanji_base::BaseError;

/// Errors from chart construction.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ZiweiError {
    /// Error from the symbolic vocabulary.
    Base(BaseError),
    /// A reference table has no entry for a key that should always resolve.
    Configuration(String),
    /// Palace self-transformations were already applied to this board.
    AlreadyAnnotated,
    /// Input outside its domain (month, day or hour index).
    InvalidInput(String),
}

impl Display for ZiweiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Base(e) => write!(f, "{e}"),
            Self::Configuration(msg) => write!(f, "configuration error: {msg}"),
            Self::AlreadyAnnotated => write!(f, "palace self-transformations already applied"),
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl Error for ZiweiError {}

impl From<BaseError> for ZiweiError {
    fn from(e: BaseError) -> Self {
        Self::Base(e)
    }
}
