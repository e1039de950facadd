//! Hidden stems (藏干) of the twelve branches.
//!
//! Each branch hides one to three stems. The principal qi (本气) carries
//! strength 100 and weight 1.0, the middle qi (中气) 50 / 0.5, the residual
//! qi (余气) 30 / 0.3. Lists keep the traditional order, principal first.

use serde::{Serialize, Serializer};

use crate::element::Element;
use crate::stem_branch::{Branch, Stem};

/// Rank of a hidden stem within its branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HiddenTier {
    Primary,
    Secondary,
    Tertiary,
}

impl HiddenTier {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Primary => "本气",
            Self::Secondary => "中气",
            Self::Tertiary => "余气",
        }
    }

    /// Integer strength on the 0–100 scale.
    pub const fn strength(self) -> u8 {
        match self {
            Self::Primary => 100,
            Self::Secondary => 50,
            Self::Tertiary => 30,
        }
    }

    /// Fractional weight used when summing element presence.
    pub const fn weight(self) -> f64 {
        match self {
            Self::Primary => 1.0,
            Self::Secondary => 0.5,
            Self::Tertiary => 0.3,
        }
    }
}

impl Serialize for HiddenTier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A stem hidden inside a branch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HiddenStem {
    pub stem: Stem,
    pub tier: HiddenTier,
    pub strength: u8,
    pub weight: f64,
}

impl HiddenStem {
    const fn new(stem: Stem, tier: HiddenTier) -> Self {
        Self {
            stem,
            tier,
            strength: tier.strength(),
            weight: tier.weight(),
        }
    }

    pub const fn element(&self) -> Element {
        self.stem.element()
    }
}

use HiddenTier::{Primary as P, Secondary as S, Tertiary as T};

const ZI: [HiddenStem; 1] = [HiddenStem::new(Stem::Gui, P)];
const CHOU: [HiddenStem; 3] = [
    HiddenStem::new(Stem::Ji, P),
    HiddenStem::new(Stem::Gui, T),
    HiddenStem::new(Stem::Xin, S),
];
const YIN: [HiddenStem; 3] = [
    HiddenStem::new(Stem::Jia, P),
    HiddenStem::new(Stem::Bing, S),
    HiddenStem::new(Stem::Wu, T),
];
const MAO: [HiddenStem; 1] = [HiddenStem::new(Stem::Yi, P)];
const CHEN: [HiddenStem; 3] = [
    HiddenStem::new(Stem::Wu, P),
    HiddenStem::new(Stem::Yi, T),
    HiddenStem::new(Stem::Gui, S),
];
const SI: [HiddenStem; 3] = [
    HiddenStem::new(Stem::Bing, P),
    HiddenStem::new(Stem::Wu, S),
    HiddenStem::new(Stem::Geng, T),
];
const WU: [HiddenStem; 2] = [HiddenStem::new(Stem::Ding, P), HiddenStem::new(Stem::Ji, T)];
const WEI: [HiddenStem; 3] = [
    HiddenStem::new(Stem::Ji, P),
    HiddenStem::new(Stem::Ding, T),
    HiddenStem::new(Stem::Yi, S),
];
const SHEN: [HiddenStem; 3] = [
    HiddenStem::new(Stem::Geng, P),
    HiddenStem::new(Stem::Ren, S),
    HiddenStem::new(Stem::Wu, T),
];
const YOU: [HiddenStem; 1] = [HiddenStem::new(Stem::Xin, P)];
const XU: [HiddenStem; 3] = [
    HiddenStem::new(Stem::Wu, P),
    HiddenStem::new(Stem::Xin, T),
    HiddenStem::new(Stem::Ding, S),
];
const HAI: [HiddenStem; 2] = [HiddenStem::new(Stem::Ren, P), HiddenStem::new(Stem::Jia, T)];

/// Ordered hidden stems of a branch, principal qi first.
pub const fn hidden_stems(branch: Branch) -> &'static [HiddenStem] {
    match branch {
        Branch::Zi => &ZI,
        Branch::Chou => &CHOU,
        Branch::Yin => &YIN,
        Branch::Mao => &MAO,
        Branch::Chen => &CHEN,
        Branch::Si => &SI,
        Branch::Wu => &WU,
        Branch::Wei => &WEI,
        Branch::Shen => &SHEN,
        Branch::You => &YOU,
        Branch::Xu => &XU,
        Branch::Hai => &HAI,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stem_branch::ALL_BRANCHES;

    #[test]
    fn principal_first_and_matches_branch_element() {
        for b in ALL_BRANCHES {
            let hs = hidden_stems(b);
            assert!(!hs.is_empty() && hs.len() <= 3);
            assert_eq!(hs[0].tier, HiddenTier::Primary);
            assert_eq!(hs[0].element(), b.element(), "{}", b.name());
            assert!(hs[1..].iter().all(|h| h.tier != HiddenTier::Primary));
        }
    }

    #[test]
    fn chou_order_and_weights() {
        let hs = hidden_stems(Branch::Chou);
        let names: Vec<&str> = hs.iter().map(|h| h.stem.name()).collect();
        assert_eq!(names, ["己", "癸", "辛"]);
        assert_eq!(hs[1].strength, 30);
        assert!((hs[2].weight - 0.5).abs() < 1e-12);
    }

    #[test]
    fn single_stem_branches() {
        for b in [Branch::Zi, Branch::Mao, Branch::You] {
            assert_eq!(hidden_stems(b).len(), 1);
        }
    }
}
