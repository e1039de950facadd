//! Heavenly stems (天干) and earthly branches (地支).
//!
//! Ten stems and twelve branches, each with an element and a polarity.
//! Index arithmetic wraps modulo 10 or 12; even indices are yang.
//!
//! Clean-room implementation from the standard 干支 correspondences.

use serde::{Serialize, Serializer};

use crate::element::{Element, Polarity, Season};
use crate::error::BaseError;

// ---------------------------------------------------------------------------
// Stem
// ---------------------------------------------------------------------------

/// The ten heavenly stems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

/// All ten stems in order (index 0 = 甲).
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Jia,
    Stem::Yi,
    Stem::Bing,
    Stem::Ding,
    Stem::Wu,
    Stem::Ji,
    Stem::Geng,
    Stem::Xin,
    Stem::Ren,
    Stem::Gui,
];

impl Stem {
    /// Chinese name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Jia => "甲",
            Self::Yi => "乙",
            Self::Bing => "丙",
            Self::Ding => "丁",
            Self::Wu => "戊",
            Self::Ji => "己",
            Self::Geng => "庚",
            Self::Xin => "辛",
            Self::Ren => "壬",
            Self::Gui => "癸",
        }
    }

    /// 0-based index (甲=0 .. 癸=9).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Stem at `i`, wrapping modulo 10 (negative values allowed).
    pub const fn from_index(i: i32) -> Stem {
        ALL_STEMS[i.rem_euclid(10) as usize]
    }

    pub const fn element(self) -> Element {
        match self {
            Self::Jia | Self::Yi => Element::Wood,
            Self::Bing | Self::Ding => Element::Fire,
            Self::Wu | Self::Ji => Element::Earth,
            Self::Geng | Self::Xin => Element::Metal,
            Self::Ren | Self::Gui => Element::Water,
        }
    }

    pub const fn polarity(self) -> Polarity {
        Polarity::from_index(self.index())
    }

    /// The stem `n` steps later in the cycle.
    pub const fn offset(self, n: i32) -> Stem {
        Self::from_index(self.index() as i32 + n)
    }

    /// Parse a one-character stem name.
    pub fn from_name(name: &str) -> Result<Stem, BaseError> {
        ALL_STEMS
            .into_iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| BaseError::UnknownSymbol(format!("stem {name}")))
    }

    /// Stem of the given element and polarity.
    pub const fn of(element: Element, polarity: Polarity) -> Stem {
        let base = element.index() as i32 * 2;
        match polarity {
            Polarity::Yang => Self::from_index(base),
            Polarity::Yin => Self::from_index(base + 1),
        }
    }
}

impl Serialize for Stem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Branch
// ---------------------------------------------------------------------------

/// The twelve earthly branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

/// All twelve branches in order (index 0 = 子).
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Zi,
    Branch::Chou,
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
];

impl Branch {
    /// Chinese name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zi => "子",
            Self::Chou => "丑",
            Self::Yin => "寅",
            Self::Mao => "卯",
            Self::Chen => "辰",
            Self::Si => "巳",
            Self::Wu => "午",
            Self::Wei => "未",
            Self::Shen => "申",
            Self::You => "酉",
            Self::Xu => "戌",
            Self::Hai => "亥",
        }
    }

    /// Zodiac animal (生肖).
    pub const fn animal(self) -> &'static str {
        match self {
            Self::Zi => "鼠",
            Self::Chou => "牛",
            Self::Yin => "虎",
            Self::Mao => "兔",
            Self::Chen => "龙",
            Self::Si => "蛇",
            Self::Wu => "马",
            Self::Wei => "羊",
            Self::Shen => "猴",
            Self::You => "鸡",
            Self::Xu => "狗",
            Self::Hai => "猪",
        }
    }

    /// 0-based index (子=0 .. 亥=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Branch at `i`, wrapping modulo 12 (negative values allowed).
    pub const fn from_index(i: i32) -> Branch {
        ALL_BRANCHES[i.rem_euclid(12) as usize]
    }

    /// Principal element of the branch.
    pub const fn element(self) -> Element {
        match self {
            Self::Yin | Self::Mao => Element::Wood,
            Self::Si | Self::Wu => Element::Fire,
            Self::Chen | Self::Xu | Self::Chou | Self::Wei => Element::Earth,
            Self::Shen | Self::You => Element::Metal,
            Self::Hai | Self::Zi => Element::Water,
        }
    }

    pub const fn polarity(self) -> Polarity {
        Polarity::from_index(self.index())
    }

    /// The branch `n` steps later (negative = earlier).
    pub const fn offset(self, n: i32) -> Branch {
        Self::from_index(self.index() as i32 + n)
    }

    /// The branch six places away (对冲 / opposite palace).
    pub const fn opposite(self) -> Branch {
        self.offset(6)
    }

    /// Season when this branch rules the month.
    pub const fn season(self) -> Season {
        match self {
            Self::Yin | Self::Mao => Season::Spring,
            Self::Si | Self::Wu => Season::Summer,
            Self::Shen | Self::You => Season::Autumn,
            Self::Hai | Self::Zi => Season::Winter,
            Self::Chen | Self::Wei | Self::Xu | Self::Chou => Season::EarthMonth,
        }
    }

    /// Parse a one-character branch name.
    pub fn from_name(name: &str) -> Result<Branch, BaseError> {
        ALL_BRANCHES
            .into_iter()
            .find(|b| b.name() == name)
            .ok_or_else(|| BaseError::UnknownSymbol(format!("branch {name}")))
    }
}

impl Serialize for Branch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_indices_sequential() {
        for (i, s) in ALL_STEMS.iter().enumerate() {
            assert_eq!(s.index() as usize, i);
            assert_eq!(Stem::from_index(i as i32), *s);
        }
    }

    #[test]
    fn stem_wraps() {
        assert_eq!(Stem::from_index(-1), Stem::Gui);
        assert_eq!(Stem::Ren.offset(3), Stem::Yi);
    }

    #[test]
    fn stem_elements_and_polarity() {
        assert_eq!(Stem::Geng.element(), Element::Metal);
        assert_eq!(Stem::Geng.polarity(), Polarity::Yang);
        assert_eq!(Stem::Gui.polarity(), Polarity::Yin);
        assert_eq!(Stem::of(Element::Fire, Polarity::Yin), Stem::Ding);
        assert_eq!(Stem::of(Element::Water, Polarity::Yang), Stem::Ren);
    }

    #[test]
    fn branch_elements() {
        assert_eq!(Branch::Zi.element(), Element::Water);
        assert_eq!(Branch::Chou.element(), Element::Earth);
        assert_eq!(Branch::Wu.element(), Element::Fire);
        assert_eq!(Branch::You.element(), Element::Metal);
    }

    #[test]
    fn branch_opposites() {
        assert_eq!(Branch::Zi.opposite(), Branch::Wu);
        assert_eq!(Branch::Xu.opposite(), Branch::Chen);
        assert_eq!(Branch::Chou.offset(-3), Branch::Xu);
    }

    #[test]
    fn parse_names() {
        assert_eq!(Stem::from_name("庚").unwrap(), Stem::Geng);
        assert_eq!(Branch::from_name("戌").unwrap(), Branch::Xu);
        assert!(Stem::from_name("子").is_err());
    }

    #[test]
    fn seasons() {
        assert_eq!(Branch::Si.season(), Season::Summer);
        assert_eq!(Branch::Chou.season(), Season::EarthMonth);
        assert_eq!(Branch::Hai.season(), Season::Winter);
    }
}
