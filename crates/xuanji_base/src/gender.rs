//! Gender of the chart holder, which decides the direction of major periods.

use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::element::Polarity;
use crate::error::BaseError;
use crate::stem_branch::Stem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    pub const fn name_zh(self) -> &'static str {
        match self {
            Self::Male => "男",
            Self::Female => "女",
        }
    }

    /// Periods run forward for a yang-year male or a yin-year female (阳男阴女).
    pub const fn is_forward(self, year_stem: Stem) -> bool {
        matches!(
            (year_stem.polarity(), self),
            (Polarity::Yang, Self::Male) | (Polarity::Yin, Self::Female)
        )
    }
}

impl FromStr for Gender {
    type Err = BaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" | "男" => Ok(Self::Male),
            "female" | "f" | "女" => Ok(Self::Female),
            other => Err(BaseError::UnknownSymbol(format!("gender {other}"))),
        }
    }
}

impl Serialize for Gender {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
