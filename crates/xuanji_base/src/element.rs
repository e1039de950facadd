//! Five elements (五行), yin/yang polarity, and the seasons of the month order.
//!
//! Generating cycle: 木→火→土→金→水→木. Controlling cycle: 木→土→水→火→金→木.
//!
//! Clean-room implementation from the classical 五行 correspondences.

use serde::{Serialize, Serializer};

/// The five elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

/// All five elements in generating order (木 火 土 金 水).
pub const ALL_ELEMENTS: [Element; 5] = [
    Element::Wood,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Water,
];

impl Element {
    /// Chinese name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wood => "木",
            Self::Fire => "火",
            Self::Earth => "土",
            Self::Metal => "金",
            Self::Water => "水",
        }
    }

    /// 0-based index in generating order.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Element this one generates (生).
    pub const fn generates(self) -> Element {
        ALL_ELEMENTS[(self.index() as usize + 1) % 5]
    }

    /// Element that generates this one.
    pub const fn generated_by(self) -> Element {
        ALL_ELEMENTS[(self.index() as usize + 4) % 5]
    }

    /// Element this one controls (克).
    pub const fn controls(self) -> Element {
        ALL_ELEMENTS[(self.index() as usize + 2) % 5]
    }

    /// Element that controls this one.
    pub const fn controlled_by(self) -> Element {
        ALL_ELEMENTS[(self.index() as usize + 3) % 5]
    }

    /// Parse a single-character Chinese element name.
    pub fn from_name(name: &str) -> Option<Element> {
        ALL_ELEMENTS.into_iter().find(|e| e.name() == name)
    }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Yin/yang polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Yang,
    Yin,
}

impl Polarity {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Yang => "阳",
            Self::Yin => "阴",
        }
    }

    /// Polarity of an even (yang) or odd (yin) cycle index.
    pub const fn from_index(i: u8) -> Polarity {
        if i % 2 == 0 { Self::Yang } else { Self::Yin }
    }
}

impl Serialize for Polarity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Season of the month branch. The four 库 months (辰 未 戌 丑) form their
/// own earth season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
    EarthMonth,
}

/// Seasons in the order used by seasonal bonus tables.
pub const ALL_SEASONS: [Season; 5] = [
    Season::Spring,
    Season::Summer,
    Season::Autumn,
    Season::Winter,
    Season::EarthMonth,
];

impl Season {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Spring => "春",
            Self::Summer => "夏",
            Self::Autumn => "秋",
            Self::Winter => "冬",
            Self::EarthMonth => "土月",
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl Serialize for Season {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generating_cycle_closes() {
        let mut e = Element::Wood;
        for _ in 0..5 {
            e = e.generates();
        }
        assert_eq!(e, Element::Wood);
        assert_eq!(Element::Water.generates(), Element::Wood);
        assert_eq!(Element::Fire.generated_by(), Element::Wood);
    }

    #[test]
    fn controlling_cycle() {
        assert_eq!(Element::Wood.controls(), Element::Earth);
        assert_eq!(Element::Fire.controls(), Element::Metal);
        assert_eq!(Element::Earth.controls(), Element::Water);
        assert_eq!(Element::Metal.controls(), Element::Wood);
        assert_eq!(Element::Water.controls(), Element::Fire);
        for e in ALL_ELEMENTS {
            assert_eq!(e.controls().controlled_by(), e);
        }
    }

    #[test]
    fn names_roundtrip() {
        for e in ALL_ELEMENTS {
            assert_eq!(Element::from_name(e.name()), Some(e));
        }
        assert_eq!(Element::from_name("风"), None);
    }
}
