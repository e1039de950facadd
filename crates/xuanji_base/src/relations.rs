//! Stem and branch interaction tables: 合 冲 破 害 刑, 三合, 方会, 禄, 库.
//!
//! Pair lookups are symmetric. Group tables list members in their
//! traditional order.
//!
//! Clean-room implementation from the classical 干支 relation tables.

use crate::element::Element;
use crate::stem_branch::{Branch, Stem};

use Branch::*;

/// Five stem combinations (天干五合) and the element each transforms to.
pub const STEM_COMBINATIONS: [(Stem, Stem, Element); 5] = [
    (Stem::Jia, Stem::Ji, Element::Earth),
    (Stem::Yi, Stem::Geng, Element::Metal),
    (Stem::Bing, Stem::Xin, Element::Water),
    (Stem::Ding, Stem::Ren, Element::Wood),
    (Stem::Wu, Stem::Gui, Element::Fire),
];

/// Six harmonies (六合) with their element.
pub const SIX_HARMONIES: [(Branch, Branch, Element); 6] = [
    (Zi, Chou, Element::Earth),
    (Yin, Hai, Element::Wood),
    (Mao, Xu, Element::Fire),
    (Chen, You, Element::Metal),
    (Si, Shen, Element::Water),
    (Wu, Wei, Element::Earth),
];

/// Six clashes (六冲).
pub const CLASHES: [(Branch, Branch); 6] = [
    (Zi, Wu),
    (Chou, Wei),
    (Yin, Shen),
    (Mao, You),
    (Chen, Xu),
    (Si, Hai),
];

/// Six destructions (六破).
pub const DESTRUCTIONS: [(Branch, Branch); 6] = [
    (Zi, You),
    (Wu, Mao),
    (Yin, Hai),
    (Shen, Si),
    (Chen, Chou),
    (Xu, Wei),
];

/// Six harms (六害).
pub const HARMS: [(Branch, Branch); 6] = [
    (Zi, Wei),
    (Chou, Wu),
    (Yin, Si),
    (Mao, Chen),
    (Shen, Hai),
    (You, Xu),
];

/// A punishment (刑) group and its traditional label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PunishmentGroup {
    pub members: &'static [Branch],
    pub label: &'static str,
}

/// Punishment groups. The single-member self-punishments can never reach
/// two distinct hits and so never fire on a distinct-branch test.
pub const PUNISHMENTS: [PunishmentGroup; 7] = [
    PunishmentGroup {
        members: &[Zi, Mao],
        label: "无礼之刑",
    },
    PunishmentGroup {
        members: &[Yin, Si, Shen],
        label: "寅巳申三刑",
    },
    PunishmentGroup {
        members: &[Chou, Xu, Wei],
        label: "丑戌未三刑",
    },
    PunishmentGroup {
        members: &[Chen],
        label: "辰自刑",
    },
    PunishmentGroup {
        members: &[Wu],
        label: "午自刑",
    },
    PunishmentGroup {
        members: &[You],
        label: "酉自刑",
    },
    PunishmentGroup {
        members: &[Hai],
        label: "亥自刑",
    },
];

/// Three harmonies (三合局): members and the element of the frame.
pub const TRIPLE_HARMONIES: [([Branch; 3], Element); 4] = [
    ([Shen, Zi, Chen], Element::Water),
    ([Hai, Mao, Wei], Element::Wood),
    ([Yin, Wu, Xu], Element::Fire),
    ([Si, You, Chou], Element::Metal),
];

/// Directional assemblies (三会方).
pub const DIRECTIONAL_ASSEMBLIES: [([Branch; 3], Element); 4] = [
    ([Yin, Mao, Chen], Element::Wood),
    ([Si, Wu, Wei], Element::Fire),
    ([Shen, You, Xu], Element::Metal),
    ([Hai, Zi, Chou], Element::Water),
];

/// The four storage (库) branches.
pub const STORAGE_BRANCHES: [Branch; 4] = [Chen, Chou, Wei, Xu];

fn pair_in(list: &[(Branch, Branch)], a: Branch, b: Branch) -> bool {
    list.iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}

/// Element the two stems combine into, if they form a 五合 pair.
pub fn stem_combination(a: Stem, b: Stem) -> Option<Element> {
    STEM_COMBINATIONS
        .iter()
        .find(|&&(x, y, _)| (x == a && y == b) || (x == b && y == a))
        .map(|&(_, _, e)| e)
}

/// The partner stem of `s` in the five combinations, with the element.
pub fn stem_combination_partner(s: Stem) -> (Stem, Element) {
    let (a, b, e) = STEM_COMBINATIONS[(s.index() % 5) as usize];
    if a == s { (b, e) } else { (a, e) }
}

/// Element of a 六合 pair, if `a` and `b` form one.
pub fn six_harmony(a: Branch, b: Branch) -> Option<Element> {
    SIX_HARMONIES
        .iter()
        .find(|&&(x, y, _)| (x == a && y == b) || (x == b && y == a))
        .map(|&(_, _, e)| e)
}

pub fn is_clash(a: Branch, b: Branch) -> bool {
    pair_in(&CLASHES, a, b)
}

pub fn is_destruction(a: Branch, b: Branch) -> bool {
    pair_in(&DESTRUCTIONS, a, b)
}

pub fn is_harm(a: Branch, b: Branch) -> bool {
    pair_in(&HARMS, a, b)
}

/// Branches that root a stem element (通根).
pub const fn root_branches(element: Element) -> &'static [Branch] {
    match element {
        Element::Wood => &[Yin, Mao],
        Element::Fire => &[Si, Wu],
        Element::Earth => &[Chen, Xu, Chou, Wei],
        Element::Metal => &[Shen, You],
        Element::Water => &[Zi, Hai],
    }
}

/// 禄 (prosperity) branch of a stem.
pub const fn lu_branch(stem: Stem) -> Branch {
    match stem {
        Stem::Jia => Yin,
        Stem::Yi => Mao,
        Stem::Bing | Stem::Wu => Si,
        Stem::Ding | Stem::Ji => Wu,
        Stem::Geng => Shen,
        Stem::Xin => You,
        Stem::Ren => Hai,
        Stem::Gui => Zi,
    }
}

pub fn is_storage(b: Branch) -> bool {
    STORAGE_BRANCHES.contains(&b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_combinations_are_five_apart() {
        for (a, b, _) in STEM_COMBINATIONS {
            assert_eq!(b.index() - a.index(), 5);
        }
        assert_eq!(stem_combination(Stem::Geng, Stem::Yi), Some(Element::Metal));
        assert_eq!(stem_combination(Stem::Jia, Stem::Yi), None);
        assert_eq!(stem_combination_partner(Stem::Gui), (Stem::Wu, Element::Fire));
        assert_eq!(stem_combination_partner(Stem::Ding), (Stem::Ren, Element::Wood));
    }

    #[test]
    fn clash_is_opposition() {
        for (a, b) in CLASHES {
            assert_eq!(a.opposite(), b);
            assert!(is_clash(b, a));
        }
        assert!(!is_clash(Zi, Chou));
    }

    #[test]
    fn harmonies_sum_to_one() {
        for (a, b, _) in SIX_HARMONIES {
            assert_eq!((a.index() + b.index()) % 12, 1);
        }
        assert_eq!(six_harmony(Hai, Yin), Some(Element::Wood));
        assert_eq!(six_harmony(Zi, Wu), None);
    }

    #[test]
    fn destruction_and_harm() {
        assert!(is_destruction(You, Zi));
        assert!(is_harm(Wei, Zi));
        assert!(!is_harm(Zi, Wu));
    }

    #[test]
    fn lu_and_roots() {
        assert_eq!(lu_branch(Stem::Geng), Shen);
        assert_eq!(lu_branch(Stem::Wu), Si);
        assert!(root_branches(Element::Earth).contains(&Wei));
        assert!(is_storage(Xu));
        assert!(!is_storage(Zi));
    }
}
