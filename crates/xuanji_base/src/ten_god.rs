//! Ten gods (十神): the relation of any stem to the day master.
//!
//! The element relation picks one of five pairs (same, output, wealth,
//! officer, resource); matching polarity picks the first label of the pair.

use serde::{Serialize, Serializer};

use crate::stem_branch::Stem;

/// The ten gods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TenGod {
    /// 比肩
    Companion,
    /// 劫财
    RobWealth,
    /// 食神
    EatingGod,
    /// 伤官
    HurtingOfficer,
    /// 偏财
    IndirectWealth,
    /// 正财
    DirectWealth,
    /// 七杀
    SevenKillings,
    /// 正官
    DirectOfficer,
    /// 偏印
    IndirectResource,
    /// 正印
    DirectResource,
}

/// All ten gods in canonical order.
pub const ALL_TEN_GODS: [TenGod; 10] = [
    TenGod::Companion,
    TenGod::RobWealth,
    TenGod::EatingGod,
    TenGod::HurtingOfficer,
    TenGod::IndirectWealth,
    TenGod::DirectWealth,
    TenGod::SevenKillings,
    TenGod::DirectOfficer,
    TenGod::IndirectResource,
    TenGod::DirectResource,
];

/// Broad character of a ten god.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nature {
    Positive,
    Negative,
    Neutral,
}

impl Nature {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl Serialize for Nature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl TenGod {
    /// Full Chinese name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Companion => "比肩",
            Self::RobWealth => "劫财",
            Self::EatingGod => "食神",
            Self::HurtingOfficer => "伤官",
            Self::IndirectWealth => "偏财",
            Self::DirectWealth => "正财",
            Self::SevenKillings => "七杀",
            Self::DirectOfficer => "正官",
            Self::IndirectResource => "偏印",
            Self::DirectResource => "正印",
        }
    }

    /// One-character abbreviation used in compact chart notation.
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Companion => "比",
            Self::RobWealth => "劫",
            Self::EatingGod => "食",
            Self::HurtingOfficer => "伤",
            Self::IndirectWealth => "才",
            Self::DirectWealth => "财",
            Self::SevenKillings => "杀",
            Self::DirectOfficer => "官",
            Self::IndirectResource => "枭",
            Self::DirectResource => "印",
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn nature(self) -> Nature {
        match self {
            Self::EatingGod | Self::IndirectWealth | Self::DirectWealth => Nature::Positive,
            Self::DirectOfficer | Self::DirectResource => Nature::Positive,
            Self::RobWealth | Self::SevenKillings | Self::IndirectResource => Nature::Negative,
            Self::Companion | Self::HurtingOfficer => Nature::Neutral,
        }
    }

    pub const fn is_wealth(self) -> bool {
        matches!(self, Self::IndirectWealth | Self::DirectWealth)
    }

    pub const fn is_officer(self) -> bool {
        matches!(self, Self::SevenKillings | Self::DirectOfficer)
    }

    pub const fn is_peer(self) -> bool {
        matches!(self, Self::Companion | Self::RobWealth)
    }

    pub const fn is_output(self) -> bool {
        matches!(self, Self::EatingGod | Self::HurtingOfficer)
    }

    pub const fn is_resource(self) -> bool {
        matches!(self, Self::IndirectResource | Self::DirectResource)
    }

    pub fn from_name(name: &str) -> Option<TenGod> {
        ALL_TEN_GODS.into_iter().find(|g| g.name() == name)
    }
}

impl Serialize for TenGod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Ten-god label of `other` seen from day master `dm`.
pub const fn ten_god(dm: Stem, other: Stem) -> TenGod {
    let d = dm.element();
    let o = other.element();
    let same_polarity = dm.index() % 2 == other.index() % 2;
    // offset in the generating cycle from dm to other
    let rel = (o.index() + 5 - d.index()) % 5;
    match (rel, same_polarity) {
        (0, true) => TenGod::Companion,
        (0, false) => TenGod::RobWealth,
        (1, true) => TenGod::EatingGod,
        (1, false) => TenGod::HurtingOfficer,
        (2, true) => TenGod::IndirectWealth,
        (2, false) => TenGod::DirectWealth,
        (3, true) => TenGod::SevenKillings,
        (3, false) => TenGod::DirectOfficer,
        (_, true) => TenGod::IndirectResource,
        (_, false) => TenGod::DirectResource,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stem_branch::ALL_STEMS;

    #[test]
    fn geng_day_master() {
        let dm = Stem::Geng;
        assert_eq!(ten_god(dm, Stem::Geng), TenGod::Companion);
        assert_eq!(ten_god(dm, Stem::Xin), TenGod::RobWealth);
        assert_eq!(ten_god(dm, Stem::Ren), TenGod::EatingGod);
        assert_eq!(ten_god(dm, Stem::Gui), TenGod::HurtingOfficer);
        assert_eq!(ten_god(dm, Stem::Jia), TenGod::IndirectWealth);
        assert_eq!(ten_god(dm, Stem::Yi), TenGod::DirectWealth);
        assert_eq!(ten_god(dm, Stem::Bing), TenGod::SevenKillings);
        assert_eq!(ten_god(dm, Stem::Ding), TenGod::DirectOfficer);
        assert_eq!(ten_god(dm, Stem::Wu), TenGod::IndirectResource);
        assert_eq!(ten_god(dm, Stem::Ji), TenGod::DirectResource);
    }

    #[test]
    fn each_day_master_sees_all_ten() {
        for dm in ALL_STEMS {
            let mut seen: Vec<TenGod> = ALL_STEMS.iter().map(|&s| ten_god(dm, s)).collect();
            seen.sort();
            assert_eq!(seen, ALL_TEN_GODS.to_vec());
        }
    }

    #[test]
    fn natures_and_short_names() {
        assert_eq!(TenGod::RobWealth.nature(), Nature::Negative);
        assert_eq!(TenGod::HurtingOfficer.nature(), Nature::Neutral);
        assert_eq!(TenGod::DirectResource.nature(), Nature::Positive);
        assert_eq!(TenGod::IndirectWealth.short_name(), "才");
        assert_eq!(TenGod::IndirectResource.short_name(), "枭");
        assert_eq!(TenGod::from_name("七杀"), Some(TenGod::SevenKillings));
    }
}
