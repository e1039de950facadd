//! Five-elements bureau (五行局) from the year stem and the life palace.
//!
//! Looked up on (year stem mod 5, life branch / 2). The pace (2..=6) sets
//! the first decade's starting age and selects the column of the 紫微 table.
//!
//! Clean-room implementation from the 五行局 lookup table.

use serde::{Serialize, Serializer};
use xuanji_base::{Branch, Element, Stem};

use crate::error::ZiweiError;

/// The five bureaus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bureau {
    Water2,
    Wood3,
    Metal4,
    Earth5,
    Fire6,
}

pub const ALL_BUREAUS: [Bureau; 5] = [
    Bureau::Water2,
    Bureau::Wood3,
    Bureau::Metal4,
    Bureau::Earth5,
    Bureau::Fire6,
];

/// Paces indexed by [year stem mod 5][life branch / 2].
const BUREAU_PACE: [[u8; 6]; 5] = [
    [2, 6, 3, 5, 4, 6],
    [6, 5, 4, 3, 2, 5],
    [5, 4, 2, 6, 3, 4],
    [4, 3, 6, 2, 5, 3],
    [3, 2, 5, 6, 4, 2],
];

impl Bureau {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Water2 => "水二局",
            Self::Wood3 => "木三局",
            Self::Metal4 => "金四局",
            Self::Earth5 => "土五局",
            Self::Fire6 => "火六局",
        }
    }

    /// Starting age of the first decade.
    pub const fn pace(self) -> u8 {
        match self {
            Self::Water2 => 2,
            Self::Wood3 => 3,
            Self::Metal4 => 4,
            Self::Earth5 => 5,
            Self::Fire6 => 6,
        }
    }

    pub const fn element(self) -> Element {
        match self {
            Self::Water2 => Element::Water,
            Self::Wood3 => Element::Wood,
            Self::Metal4 => Element::Metal,
            Self::Earth5 => Element::Earth,
            Self::Fire6 => Element::Fire,
        }
    }

    pub fn from_pace(pace: u8) -> Result<Bureau, ZiweiError> {
        ALL_BUREAUS
            .into_iter()
            .find(|b| b.pace() == pace)
            .ok_or_else(|| ZiweiError::Configuration(format!("no bureau with pace {pace}")))
    }

    /// Resolve the bureau for a year stem and life-palace branch.
    pub fn resolve(year_stem: Stem, life: Branch) -> Result<Bureau, ZiweiError> {
        let row = BUREAU_PACE
            .get(year_stem.index() as usize % 5)
            .ok_or_else(|| ZiweiError::Configuration(format!("bureau row {}", year_stem.name())))?;
        let pace = row
            .get(life.index() as usize / 2)
            .ok_or_else(|| ZiweiError::Configuration(format!("bureau column {}", life.name())))?;
        Self::from_pace(*pace)
    }
}

impl Serialize for Bureau {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xuanji_base::{ALL_BRANCHES, ALL_STEMS};

    #[test]
    fn fixtures() {
        assert_eq!(Bureau::resolve(Stem::Geng, Branch::Xu).unwrap(), Bureau::Earth5);
        assert_eq!(Bureau::resolve(Stem::Yi, Branch::Mao).unwrap(), Bureau::Earth5);
        assert_eq!(Bureau::resolve(Stem::Jia, Branch::Zi).unwrap(), Bureau::Water2);
        assert_eq!(Bureau::resolve(Stem::Wu, Branch::Wu).unwrap(), Bureau::Fire6);
    }

    #[test]
    fn paired_stems_share_rows() {
        for b in ALL_BRANCHES {
            for s in ALL_STEMS {
                assert_eq!(
                    Bureau::resolve(s, b).unwrap(),
                    Bureau::resolve(s.offset(5), b).unwrap()
                );
            }
        }
    }

    #[test]
    fn unknown_pace() {
        assert!(matches!(Bureau::from_pace(7), Err(ZiweiError::Configuration(_))));
    }
}
