//! Golden-value tests for the sexagenary cycle and its derived tables.
//!
//! Pure math; no data files needed.

use xuanji_base::{
    ALL_BRANCHES, Branch, Element, GanZhi, Stem, TenGod, hidden_stems, ten_god,
};
use xuanji_time::calendar_to_jdn;

#[test]
fn known_day_pillars() {
    let cases = [
        ((1990, 5, 15), "庚辰"),
        ((1985, 8, 23), "甲午"),
        ((2000, 1, 1), "戊午"),
        ((1949, 10, 1), "甲子"),
    ];
    for ((y, m, d), expected) in cases {
        assert_eq!(GanZhi::of_jdn(calendar_to_jdn(y, m, d)).name(), expected, "{y}-{m}-{d}");
    }
}

#[test]
fn sixty_distinct_pairs() {
    let mut names: Vec<String> = (0..60).map(|i| GanZhi::from_cycle_index(i).name()).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 60);
}

#[test]
fn na_yin_elements_cover_all_five() {
    let mut counts = [0u32; 5];
    for i in 0..60 {
        counts[GanZhi::from_cycle_index(i).na_yin().element().index() as usize] += 1;
    }
    assert_eq!(counts, [12, 12, 12, 12, 12]);
}

#[test]
fn hidden_stems_all_branches() {
    let total: usize = ALL_BRANCHES.iter().map(|&b| hidden_stems(b).len()).sum();
    assert_eq!(total, 28);
    let shen = hidden_stems(Branch::Shen);
    assert_eq!(shen[1].stem, Stem::Ren);
    assert_eq!(shen[1].strength, 50);
}

#[test]
fn ten_god_of_hidden_stems_for_geng() {
    // 庚 day master against 巳's hidden stems 丙 戊 庚
    let labels: Vec<TenGod> = hidden_stems(Branch::Si)
        .iter()
        .map(|h| ten_god(Stem::Geng, h.stem))
        .collect();
    assert_eq!(
        labels,
        [TenGod::SevenKillings, TenGod::IndirectResource, TenGod::Companion]
    );
    assert_eq!(Stem::Geng.element(), Element::Metal);
}
