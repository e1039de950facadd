//! Decade (大限) sequencing.
//!
//! The first decade starts at the life palace at the bureau's pace and
//! moves one palace per ten years: clockwise for a yang-year male or a
//! yin-year female, counter-clockwise otherwise.

use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};
use xuanji_base::{ALL_BRANCHES, Branch};

use crate::bureau::Bureau;
use crate::palace::Palace;

/// Nominal-age span of one decade, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecadeRange {
    pub start: u8,
    pub end: u8,
}

impl DecadeRange {
    pub const fn contains(self, age: u32) -> bool {
        age >= self.start as u32 && age <= self.end as u32
    }
}

impl Display for DecadeRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl Serialize for DecadeRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Steps from the life palace to `branch` in the direction of travel.
pub const fn decade_index(forward: bool, life: Branch, branch: Branch) -> u8 {
    let (from, to) = if forward {
        (life.index(), branch.index())
    } else {
        (branch.index(), life.index())
    };
    (to + 12 - from) % 12
}

pub const fn decade_range(bureau: Bureau, index: u8) -> DecadeRange {
    let start = bureau.pace() + index * 10;
    DecadeRange {
        start,
        end: start + 9,
    }
}

/// Range and index for every branch, indexed by branch.
pub fn decade_table(bureau: Bureau, forward: bool, life: Branch) -> [(DecadeRange, u8); 12] {
    ALL_BRANCHES.map(|b| {
        let di = decade_index(forward, life, b);
        (decade_range(bureau, di), di)
    })
}

/// Indices into `palaces` sorted by decade index.
pub fn decade_order(palaces: &[Palace; 12]) -> [usize; 12] {
    let mut order: [usize; 12] = std::array::from_fn(|i| i);
    order.sort_by_key(|&i| palaces[i].decade_index);
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_from_life() {
        assert_eq!(decade_index(true, Branch::Xu, Branch::Xu), 0);
        assert_eq!(decade_index(true, Branch::Xu, Branch::Hai), 1);
        assert_eq!(decade_index(true, Branch::Xu, Branch::You), 11);
    }

    #[test]
    fn backward_from_life() {
        assert_eq!(decade_index(false, Branch::Mao, Branch::Yin), 1);
        assert_eq!(decade_index(false, Branch::Mao, Branch::Chen), 11);
    }

    #[test]
    fn ranges() {
        let r = decade_range(Bureau::Earth5, 0);
        assert_eq!(r.to_string(), "5-14");
        assert!(r.contains(14) && !r.contains(15));
        assert_eq!(decade_range(Bureau::Water2, 11).to_string(), "112-121");
    }

    #[test]
    fn table_is_a_permutation() {
        let t = decade_table(Bureau::Fire6, false, Branch::Si);
        let mut seen: Vec<u8> = t.iter().map(|&(_, i)| i).collect();
        seen.sort();
        assert_eq!(seen, (0..12).collect::<Vec<u8>>());
    }
}
