//! The sexagenary cycle (六十甲子) and its na-yin (纳音) elements.
//!
//! A stem-branch pair is valid only when stem and branch share parity, which
//! yields exactly 60 combinations. Cycle index `i` pairs stem `i mod 10`
//! with branch `i mod 12`; 甲子 is index 0.
//!
//! Clean-room implementation from the traditional 六十甲子纳音 table.

use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};

use crate::element::Element;
use crate::error::BaseError;
use crate::stem_branch::{Branch, Stem};

/// A valid stem-branch pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GanZhi {
    stem: Stem,
    branch: Branch,
}

impl GanZhi {
    /// Pair a stem with a branch; fails when their parities differ.
    pub fn new(stem: Stem, branch: Branch) -> Result<Self, BaseError> {
        if stem.index() % 2 != branch.index() % 2 {
            return Err(BaseError::InvalidGanZhi(format!(
                "{}{}",
                stem.name(),
                branch.name()
            )));
        }
        Ok(Self { stem, branch })
    }

    /// Pair at cycle index `i`, wrapping modulo 60.
    pub const fn from_cycle_index(i: i64) -> Self {
        let i = i.rem_euclid(60) as i32;
        Self {
            stem: Stem::from_index(i),
            branch: Branch::from_index(i),
        }
    }

    /// Sexagenary year pillar by the lunar-year rule (`year − 4`).
    pub const fn of_year(year: i32) -> Self {
        Self::from_cycle_index(year as i64 - 4)
    }

    /// Day pillar of a Julian Day Number.
    pub const fn of_jdn(jdn: i64) -> Self {
        Self::from_cycle_index(jdn + 49)
    }

    pub const fn stem(self) -> Stem {
        self.stem
    }

    pub const fn branch(self) -> Branch {
        self.branch
    }

    /// Position in the 60-cycle (甲子 = 0).
    pub const fn cycle_index(self) -> u8 {
        let s = self.stem.index() as i32;
        let b = self.branch.index() as i32;
        // CRT for mod 10 / mod 12 with matching parity
        ((6 * s - 5 * b).rem_euclid(60)) as u8
    }

    /// The pair `n` positions later (negative = earlier).
    pub const fn offset(self, n: i64) -> Self {
        Self::from_cycle_index(self.cycle_index() as i64 + n)
    }

    /// Two-character name, e.g. `庚午`.
    pub fn name(self) -> String {
        format!("{}{}", self.stem.name(), self.branch.name())
    }

    pub const fn na_yin(self) -> NaYin {
        NaYin::of(self)
    }
}

impl Display for GanZhi {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem.name(), self.branch.name())
    }
}

impl Serialize for GanZhi {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// NaYin
// ---------------------------------------------------------------------------

const NA_YIN_NAMES: [&str; 30] = [
    "海中金", "炉中火", "大林木", "路旁土", "剑锋金", "山头火", "涧下水", "城头土", "白蜡金", "杨柳木",
    "泉中水", "屋上土", "霹雳火", "松柏木", "长流水", "砂中金", "山下火", "平地木", "壁上土", "金箔金",
    "覆灯火", "天河水", "大驿土", "钗钏金", "桑柘木", "大溪水", "沙中土", "天上火", "石榴木", "大海水",
];

/// One of the 30 na-yin sounds; each covers two consecutive cycle pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NaYin(u8);

impl NaYin {
    pub const fn of(gz: GanZhi) -> Self {
        Self(gz.cycle_index() / 2)
    }

    /// 0-based index (海中金 = 0 .. 大海水 = 29).
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Three-character name, e.g. `路旁土`.
    pub const fn name(self) -> &'static str {
        NA_YIN_NAMES[self.0 as usize]
    }

    /// Element carried by the name's last character.
    pub fn element(self) -> Element {
        match self.name().chars().last() {
            Some('木') => Element::Wood,
            Some('火') => Element::Fire,
            Some('土') => Element::Earth,
            Some('金') => Element::Metal,
            _ => Element::Water,
        }
    }
}

impl Serialize for NaYin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
