//! Ten-god analysis of a set of four pillars.
//!
//! Every visible stem except the day stem, and every hidden stem except the
//! day master's own copy in the day branch, is labelled relative to the day
//! master and given a positional strength. The labels are then counted and
//! checked against four classic configurations.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use xuanji_base::{ALL_TEN_GODS, Element, Nature, Stem, TenGod, ten_god};

use crate::pillars::{FourPillars, PillarSlot};

/// Base strength of a visible stem before position weighting.
const BASE_STEM_STRENGTH: f64 = 80.0;
/// Bonus factor for a stem that shows on the pillar.
const TRANSPARENT_BONUS: f64 = 1.2;
/// Patterns at or below this average strength are dropped.
const PATTERN_MIN_STRENGTH: f64 = 30.0;

/// Position weight of a visible stem.
const fn stem_position_weight(slot: PillarSlot) -> f64 {
    match slot {
        PillarSlot::Year => 0.8,
        PillarSlot::Month => 1.0,
        PillarSlot::Day => 1.2,
        PillarSlot::Hour => 0.9,
    }
}

/// Position weight of a hidden stem; the month branch rules.
const fn hidden_position_weight(slot: PillarSlot) -> f64 {
    match slot {
        PillarSlot::Year => 0.7,
        PillarSlot::Month => 1.2,
        PillarSlot::Day => 1.0,
        PillarSlot::Hour => 0.8,
    }
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// What a relationship points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetType {
    Stem,
    HiddenStem,
}

impl TargetType {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Stem => "stem",
            Self::HiddenStem => "hidden_stem",
        }
    }
}

impl Serialize for TargetType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// One labelled stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TenGodRelationship {
    pub pillar: PillarSlot,
    pub target: Stem,
    pub target_type: TargetType,
    pub ten_god: TenGod,
    pub element: Element,
    pub strength: u32,
    /// Visible stem, or a hidden stem equal to its pillar's stem.
    pub visible: bool,
}

/// Count per ten god in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TenGodCount([u32; 10]);

impl TenGodCount {
    pub fn get(&self, god: TenGod) -> u32 {
        self.0[god.index() as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (TenGod, u32)> + '_ {
        ALL_TEN_GODS.iter().map(|&g| (g, self.get(g)))
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    fn bump(&mut self, god: TenGod) {
        self.0[god.index() as usize] += 1;
    }

    fn nature_total(&self, nature: Nature) -> u32 {
        self.iter()
            .filter(|(g, _)| g.nature() == nature)
            .map(|(_, n)| n)
            .sum()
    }
}

impl Serialize for TenGodCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(10))?;
        for (g, n) in self.iter() {
            map.serialize_entry(g.name(), &n)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenGodSummary {
    pub count: TenGodCount,
    /// Labels seen on visible stems, first occurrence order.
    pub visible: Vec<TenGod>,
    /// Labels seen only hidden, first occurrence order.
    pub hidden: Vec<TenGod>,
    /// First label with the highest count (比肩 when empty).
    pub strongest: TenGod,
    /// First label with the lowest positive count (比肩 when empty).
    pub weakest: TenGod,
    pub distribution: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Favorable,
    Unfavorable,
    Neutral,
}

impl PatternKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Favorable => "favorable",
            Self::Unfavorable => "unfavorable",
            Self::Neutral => "neutral",
        }
    }
}

impl Serialize for PatternKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A ten-god configuration (格局) found in the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TenGodPattern {
    pub name: &'static str,
    pub kind: PatternKind,
    pub components: [TenGod; 2],
    pub description: &'static str,
    /// Mean strength of the participating relationships.
    pub strength: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TenGodAnalysis {
    pub day_master: Stem,
    pub relationships: Vec<TenGodRelationship>,
    pub summary: TenGodSummary,
    pub patterns: Vec<TenGodPattern>,
}

impl TenGodAnalysis {
    /// Label of the visible stem on `slot`; `None` for the day stem.
    pub fn stem_god(&self, slot: PillarSlot) -> Option<TenGod> {
        self.relationships
            .iter()
            .find(|r| r.pillar == slot && r.target_type == TargetType::Stem)
            .map(|r| r.ten_god)
    }

    /// Relationships of hidden stems.
    pub fn hidden(&self) -> impl Iterator<Item = &TenGodRelationship> {
        self.relationships
            .iter()
            .filter(|r| r.target_type == TargetType::HiddenStem)
    }
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// Label and weigh every stem of the chart against its day master.
pub fn analyze_ten_gods(pillars: &FourPillars) -> TenGodAnalysis {
    let dm = pillars.day_master();
    let relationships = relationships(pillars, dm);
    let summary = summarize(&relationships);
    let patterns = find_patterns(&relationships);
    log::debug!(
        "ten gods for {}: {} relationships, {} patterns",
        dm.name(),
        relationships.len(),
        patterns.len()
    );
    TenGodAnalysis {
        day_master: dm,
        relationships,
        summary,
        patterns,
    }
}

fn relationships(pillars: &FourPillars, dm: Stem) -> Vec<TenGodRelationship> {
    let mut out = Vec::new();
    for p in pillars.pillars() {
        let is_day = p.slot == PillarSlot::Day;
        if !is_day {
            out.push(TenGodRelationship {
                pillar: p.slot,
                target: p.stem,
                target_type: TargetType::Stem,
                ten_god: ten_god(dm, p.stem),
                element: p.stem.element(),
                strength: (BASE_STEM_STRENGTH * stem_position_weight(p.slot) * TRANSPARENT_BONUS)
                    .round() as u32,
                visible: true,
            });
        }
        for h in p.hidden_stems {
            if is_day && h.stem == dm {
                continue;
            }
            let strength = f64::from(h.strength) * h.weight * hidden_position_weight(p.slot);
            out.push(TenGodRelationship {
                pillar: p.slot,
                target: h.stem,
                target_type: TargetType::HiddenStem,
                ten_god: ten_god(dm, h.stem),
                element: h.element(),
                strength: strength.round() as u32,
                visible: h.stem == p.stem,
            });
        }
    }
    out
}

fn summarize(rels: &[TenGodRelationship]) -> TenGodSummary {
    let mut count = TenGodCount::default();
    let mut visible = Vec::new();
    let mut hidden = Vec::new();
    for r in rels {
        count.bump(r.ten_god);
        if r.visible {
            if !visible.contains(&r.ten_god) {
                visible.push(r.ten_god);
            }
        } else if !hidden.contains(&r.ten_god) {
            hidden.push(r.ten_god);
        }
    }

    let mut strongest = TenGod::Companion;
    let mut weakest = TenGod::Companion;
    let mut max = 0;
    let mut min = u32::MAX;
    for (g, n) in count.iter() {
        if n > max {
            max = n;
            strongest = g;
        }
        if n > 0 && n < min {
            min = n;
            weakest = g;
        }
    }

    let distribution = distribution_text(&count, visible.len(), hidden.len());
    TenGodSummary {
        count,
        visible,
        hidden,
        strongest,
        weakest,
        distribution,
    }
}

fn distribution_text(count: &TenGodCount, visible_kinds: usize, hidden_kinds: usize) -> String {
    let mut text = format!(
        "十神共{}个，透出{}种，藏{}种。",
        count.total(),
        visible_kinds,
        hidden_kinds
    );
    let major: Vec<String> = count
        .iter()
        .filter(|&(_, n)| n >= 2)
        .map(|(g, n)| format!("{}{}个", g.name(), n))
        .collect();
    if !major.is_empty() {
        text.push_str(&format!("主要有{}。", major.join("、")));
    }
    let positive = count.nature_total(Nature::Positive);
    let negative = count.nature_total(Nature::Negative);
    text.push_str(match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => "整体偏向正面发展。",
        std::cmp::Ordering::Less => "需要注意负面影响。",
        std::cmp::Ordering::Equal => "正负十神比较均衡。",
    });
    text
}

struct PatternRule {
    name: &'static str,
    components: [TenGod; 2],
    min_members: usize,
    /// Both components must appear.
    needs_both: bool,
    description: &'static str,
    kind: fn(f64) -> PatternKind,
}

const PATTERN_RULES: [PatternRule; 4] = [
    PatternRule {
        name: "财多身弱格",
        components: [TenGod::DirectWealth, TenGod::IndirectWealth],
        min_members: 2,
        needs_both: true,
        description: "财星众多，需要身强才能胜任，主财运丰厚但需谨慎理财。",
        kind: |avg| {
            if avg > 70.0 {
                PatternKind::Favorable
            } else {
                PatternKind::Neutral
            }
        },
    },
    PatternRule {
        name: "官杀混杂格",
        components: [TenGod::DirectOfficer, TenGod::SevenKillings],
        min_members: 2,
        needs_both: false,
        description: "正官七杀并见，主事业波折，人际关系复杂，需要化解。",
        kind: |_| PatternKind::Unfavorable,
    },
    PatternRule {
        name: "比劫重重格",
        components: [TenGod::Companion, TenGod::RobWealth],
        min_members: 3,
        needs_both: false,
        description: "比劫过多，主破财克妻，需要食伤或官杀制化。",
        kind: |_| PatternKind::Unfavorable,
    },
    PatternRule {
        name: "食伤并透格",
        components: [TenGod::EatingGod, TenGod::HurtingOfficer],
        min_members: 2,
        needs_both: true,
        description: "食伤并见，主聪明才智，艺术天赋，利于创业和表达。",
        kind: |_| PatternKind::Favorable,
    },
];

fn find_patterns(rels: &[TenGodRelationship]) -> Vec<TenGodPattern> {
    PATTERN_RULES
        .iter()
        .filter_map(|rule| {
            let members: Vec<&TenGodRelationship> = rels
                .iter()
                .filter(|r| rule.components.contains(&r.ten_god))
                .collect();
            if members.len() < rule.min_members {
                return None;
            }
            if rule.needs_both
                && !rule
                    .components
                    .iter()
                    .all(|g| members.iter().any(|r| r.ten_god == *g))
            {
                return None;
            }
            let avg = members.iter().map(|r| f64::from(r.strength)).sum::<f64>()
                / members.len() as f64;
            Some(TenGodPattern {
                name: rule.name,
                kind: (rule.kind)(avg),
                components: rule.components,
                description: rule.description,
                strength: avg,
            })
        })
        .filter(|p| p.strength > PATTERN_MIN_STRENGTH)
        .collect()
}

/// Verbal grade of a strength score.
pub const fn strength_rating(strength: u32) -> &'static str {
    match strength {
        90.. => "很强",
        70..=89 => "较强",
        50..=69 => "中等",
        30..=49 => "较弱",
        _ => "很弱",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pillars::{PillarConfig, four_pillars};
    use xuanji_base::GanZhi;
    use xuanji_time::{CivilDateTime, UtcOffset};

    fn may_1990() -> FourPillars {
        let dt = CivilDateTime::new(1990, 5, 15, 14, 30).unwrap();
        four_pillars(&dt, UtcOffset::BEIJING, &PillarConfig::default()).unwrap()
    }

    fn gz(name: &str) -> GanZhi {
        let mut it = name.chars().map(|c| c.to_string());
        let s = Stem::from_name(&it.next().unwrap()).unwrap();
        let b = xuanji_base::Branch::from_name(&it.next().unwrap()).unwrap();
        GanZhi::new(s, b).unwrap()
    }

    fn chart(names: [&str; 4]) -> FourPillars {
        FourPillars::from_ganzhi(
            gz(names[0]),
            gz(names[1]),
            gz(names[2]),
            gz(names[3]),
            CivilDateTime::new(2000, 1, 1, 0, 0).unwrap(),
        )
    }

    #[test]
    fn visible_stems_exclude_day() {
        let a = analyze_ten_gods(&may_1990());
        assert_eq!(a.stem_god(PillarSlot::Year), Some(TenGod::Companion));
        assert_eq!(a.stem_god(PillarSlot::Month), Some(TenGod::RobWealth));
        assert_eq!(a.stem_god(PillarSlot::Day), None);
        assert_eq!(a.stem_god(PillarSlot::Hour), Some(TenGod::HurtingOfficer));
        let stems: Vec<_> = a
            .relationships
            .iter()
            .filter(|r| r.target_type == TargetType::Stem)
            .map(|r| r.strength)
            .collect();
        assert_eq!(stems, [77, 96, 86]);
    }

    #[test]
    fn hidden_strengths() {
        let a = analyze_ten_gods(&may_1990());
        // 午: 丁 primary in the year branch, 己 tertiary
        let year_hidden: Vec<(Stem, u32)> = a
            .hidden()
            .filter(|r| r.pillar == PillarSlot::Year)
            .map(|r| (r.target, r.strength))
            .collect();
        assert_eq!(year_hidden, [(Stem::Ding, 70), (Stem::Ji, 6)]);
        // 巳 in the month: 丙 100×1.0×1.2
        let bing = a
            .hidden()
            .find(|r| r.pillar == PillarSlot::Month && r.target == Stem::Bing)
            .unwrap();
        assert_eq!(bing.strength, 120);
        assert_eq!(a.relationships.len(), 14);
    }

    #[test]
    fn day_master_copy_in_day_branch_skipped() {
        // 庚申 day: 申 holds 庚 which is the day master itself
        let a = analyze_ten_gods(&chart(["甲子", "丙寅", "庚申", "丙子"]));
        assert!(
            !a.hidden()
                .any(|r| r.pillar == PillarSlot::Day && r.target == Stem::Geng)
        );
        assert!(a.hidden().any(|r| r.pillar == PillarSlot::Day && r.target == Stem::Ren));
    }

    #[test]
    fn hidden_visible_when_matching_pillar_stem() {
        let a = analyze_ten_gods(&chart(["甲寅", "丙寅", "庚申", "丙子"]));
        let jia = a
            .hidden()
            .find(|r| r.pillar == PillarSlot::Year && r.target == Stem::Jia)
            .unwrap();
        assert!(jia.visible);
        let bing = a
            .hidden()
            .find(|r| r.pillar == PillarSlot::Year && r.target == Stem::Bing)
            .unwrap();
        assert!(!bing.visible);
    }

    #[test]
    fn summary_counts() {
        let a = analyze_ten_gods(&may_1990());
        let s = &a.summary;
        assert_eq!(s.count.total() as usize, a.relationships.len());
        assert_eq!(s.visible, [TenGod::Companion, TenGod::RobWealth, TenGod::HurtingOfficer]);
        assert!(s.distribution.starts_with("十神共14个，透出3种，"));
        assert!(s.count.get(s.strongest) >= s.count.iter().map(|(_, n)| n).max().unwrap());
        assert!(s.count.get(s.weakest) > 0);
    }

    #[test]
    fn empty_summary_defaults() {
        let s = summarize(&[]);
        assert_eq!(s.strongest, TenGod::Companion);
        assert_eq!(s.weakest, TenGod::Companion);
        assert_eq!(s.distribution, "十神共0个，透出0种，藏0种。正负十神比较均衡。");
    }

    #[test]
    fn officer_mix_pattern() {
        // 庚 day master with 丙 and 丁 stems: 七杀 and 正官 visible
        let a = analyze_ten_gods(&chart(["丙午", "丁酉", "庚申", "丁亥"]));
        let p = a.patterns.iter().find(|p| p.name == "官杀混杂格").unwrap();
        assert_eq!(p.kind, PatternKind::Unfavorable);
        assert!(p.strength > PATTERN_MIN_STRENGTH);
    }

    #[test]
    fn weak_patterns_dropped() {
        let rels = [TargetType::HiddenStem; 3].map(|t| TenGodRelationship {
            pillar: PillarSlot::Year,
            target: Stem::Geng,
            target_type: t,
            ten_god: TenGod::Companion,
            element: Element::Metal,
            strength: 9,
            visible: false,
        });
        assert!(find_patterns(&rels).is_empty());
    }

    #[test]
    fn ratings() {
        assert_eq!(strength_rating(96), "很强");
        assert_eq!(strength_rating(70), "较强");
        assert_eq!(strength_rating(50), "中等");
        assert_eq!(strength_rating(30), "较弱");
        assert_eq!(strength_rating(29), "很弱");
    }
}
