//! Day-master strength (旺衰): a five-element score sheet and the share of
//! it held by the day master's element.
//!
//! Each element's total adds five components:
//!
//! - basic: 10 per visible stem, 10 × weight per hidden stem
//! - seasonal: basic scaled by the element's 旺相休囚死 state in the month
//! - combination: 三合 and 方会 frames, 六合 pairs
//! - conflict: clashes, punishments, harms and destructions among branches
//! - transparency: a stem rooted as a hidden stem of some branch
//!
//! Negative totals count as zero when shares are taken.

use serde::{Serialize, Serializer};
use xuanji_base::{ALL_ELEMENTS, Element, HiddenTier, hidden_stems};

use crate::nayin::seasonal_score;
use crate::pillars::{ALL_PILLAR_SLOTS, FourPillars, PerElement, PillarSlot};
use crate::structure::{BranchRelations, detect_relations};

/// Day-element share above which the day master is strong.
pub const STRONG_SHARE: f64 = 30.0;
/// Day-element share below which the day master is weak.
pub const WEAK_SHARE: f64 = 15.0;

const STEM_POINTS: f64 = 10.0;

// (complete, partial)
const TRIPLE_POINTS: (f64, f64) = (15.0, 9.0);
const ASSEMBLY_POINTS: (f64, f64) = (20.0, 10.0);
const HARMONY_POINTS: f64 = 5.0;

const CLASH_PENALTY: f64 = 6.0;
const PUNISHMENT_PENALTY: f64 = 4.0;
const HARM_PENALTY: f64 = 3.0;
const DESTRUCTION_PENALTY: f64 = 2.0;

// ---------------------------------------------------------------------------
// Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrengthLevel {
    Strong,
    Balanced,
    Weak,
}

impl StrengthLevel {
    pub fn from_share(share: f64) -> Self {
        if share > STRONG_SHARE {
            Self::Strong
        } else if share < WEAK_SHARE {
            Self::Weak
        } else {
            Self::Balanced
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Strong => "偏强",
            Self::Balanced => "中和",
            Self::Weak => "偏弱",
        }
    }
}

impl Serialize for StrengthLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BalanceLevel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl BalanceLevel {
    /// Level of a 0..=100 balance score.
    pub fn from_score(score: f64) -> Self {
        if score > 80.0 {
            Self::Excellent
        } else if score > 60.0 {
            Self::Good
        } else if score > 40.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Excellent => "优秀",
            Self::Good => "良好",
            Self::Fair => "一般",
            Self::Poor => "失衡",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Excellent => "五行分布均衡，命局稳定",
            Self::Good => "五行分布较为平衡",
            Self::Fair => "五行分布一般，存在偏颇",
            Self::Poor => "五行分布失衡，偏枯明显",
        }
    }
}

impl Serialize for BalanceLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

/// Components of one element's score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ElementScore {
    pub basic: f64,
    pub seasonal: f64,
    pub combination: f64,
    pub conflict: f64,
    pub transparency: f64,
}

impl ElementScore {
    pub fn total(&self) -> f64 {
        self.basic + self.seasonal + self.combination + self.conflict + self.transparency
    }
}

fn basic_scores(pillars: &FourPillars) -> PerElement<f64> {
    let mut out = PerElement::default();
    for s in pillars.stems() {
        out.add(s.element(), STEM_POINTS);
    }
    for (_, h) in pillars.all_hidden() {
        out.add(h.element(), STEM_POINTS * h.weight);
    }
    out
}

fn combination_scores(rel: &BranchRelations) -> PerElement<f64> {
    let mut out = PerElement::default();
    for g in &rel.triples {
        out.add(g.towards, TRIPLE_POINTS.0);
    }
    for g in &rel.half_triples {
        out.add(g.towards, TRIPLE_POINTS.1);
    }
    for g in &rel.assemblies {
        let points = if g.formed {
            ASSEMBLY_POINTS.0
        } else {
            ASSEMBLY_POINTS.1
        };
        out.add(g.towards, points);
    }
    for h in &rel.six_harmonies {
        out.add(h.element, HARMONY_POINTS);
    }
    out
}

fn conflict_scores(rel: &BranchRelations) -> PerElement<f64> {
    let mut out = PerElement::default();
    let mut hit = |a: xuanji_base::Branch, b: xuanji_base::Branch, penalty: f64| {
        out.add(a.element(), -penalty);
        out.add(b.element(), -penalty);
    };
    for p in &rel.clashes {
        hit(p.a, p.b, CLASH_PENALTY);
    }
    for p in &rel.punishments {
        hit(p.a, p.b, PUNISHMENT_PENALTY);
    }
    for p in &rel.harms {
        hit(p.a, p.b, HARM_PENALTY);
    }
    for p in &rel.destructions {
        hit(p.a, p.b, DESTRUCTION_PENALTY);
    }
    out
}

const fn tier_points(tier: HiddenTier) -> f64 {
    match tier {
        HiddenTier::Primary => 3.0,
        HiddenTier::Secondary => 2.0,
        HiddenTier::Tertiary => 1.0,
    }
}

const fn slot_weight(slot: PillarSlot) -> f64 {
    match slot {
        PillarSlot::Year | PillarSlot::Month => 1.0,
        PillarSlot::Day => 1.5,
        PillarSlot::Hour => 1.2,
    }
}

/// Best root of each visible stem among the branches, weighted by pillar.
fn transparency_scores(pillars: &FourPillars) -> PerElement<f64> {
    let mut out = PerElement::default();
    let branches = pillars.branches();
    for slot in ALL_PILLAR_SLOTS {
        let stem = pillars.get(slot).stem;
        let best = branches
            .iter()
            .flat_map(|&b| hidden_stems(b).iter())
            .filter(|h| h.stem == stem)
            .map(|h| tier_points(h.tier))
            .fold(0.0, f64::max);
        out.add(stem.element(), best * slot_weight(slot));
    }
    out
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayMasterStrength {
    pub element: Element,
    pub level: StrengthLevel,
    pub score: f64,
    /// Share of all positive scores, in percent.
    pub share: f64,
    pub supporting: Vec<&'static str>,
    pub weakening: Vec<&'static str>,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Balance {
    /// 100 minus twice the standard deviation of the shares, floored at 0.
    pub score: f64,
    pub level: BalanceLevel,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrengthAnalysis {
    pub breakdown: PerElement<ElementScore>,
    /// Totals, one decimal.
    pub scores: PerElement<f64>,
    /// Shares in percent, one decimal.
    pub shares: PerElement<f64>,
    /// Strongest first; ties keep 木 火 土 金 水 order.
    pub ranking: [Element; 5],
    pub strongest: Element,
    pub weakest: Element,
    pub day_master: DayMasterStrength,
    pub balance: Balance,
    pub summary: String,
}

fn recommendation(level: StrengthLevel, element: Element) -> String {
    let e = element.name();
    match level {
        StrengthLevel::Strong => format!("{e}日主偏强，宜用克泄耗的五行来平衡，避免再生扶。"),
        StrengthLevel::Weak => format!("{e}日主偏弱，宜用生扶的五行来增强，避免克泄耗。"),
        StrengthLevel::Balanced => format!("{e}日主中和，宜保持现有平衡，根据具体情况微调。"),
    }
}

fn factors(
    part: &ElementScore,
    element: Element,
    shares: &PerElement<f64>,
) -> (Vec<&'static str>, Vec<&'static str>) {
    let mut supporting = Vec::new();
    let mut weakening = Vec::new();
    if part.basic > STEM_POINTS {
        supporting.push("本气充足");
    }
    if shares.get(element.generated_by()) >= 20.0 {
        supporting.push("得生助力");
    }
    if part.combination > 0.0 {
        supporting.push("合局增力");
    }
    if part.transparency > 0.0 {
        supporting.push("透干有根");
    }
    if part.seasonal > 0.0 {
        supporting.push("当令得时");
    }
    if shares.get(element.controlled_by()) >= 25.0 {
        weakening.push("受克制");
    }
    if part.conflict < 0.0 {
        weakening.push("遭刑冲");
    }
    if part.seasonal < 0.0 {
        weakening.push("失时休囚");
    }
    (supporting, weakening)
}

/// Score the five elements and grade the day master.
pub fn analyze_strength(pillars: &FourPillars) -> StrengthAnalysis {
    let season = pillars.season();
    let rel = detect_relations(pillars).branches;
    let basic = basic_scores(pillars);
    let combination = combination_scores(&rel);
    let conflict = conflict_scores(&rel);
    let transparency = transparency_scores(pillars);

    let breakdown = PerElement::new(ALL_ELEMENTS.map(|e| {
        let b = basic.get(e);
        ElementScore {
            basic: b,
            seasonal: b * (f64::from(seasonal_score(e, season)) - 50.0) / 100.0,
            combination: combination.get(e),
            conflict: conflict.get(e),
            transparency: transparency.get(e),
        }
    }));
    let totals = ALL_ELEMENTS.map(|e| breakdown.get(e).total());
    let positive: f64 = totals.iter().map(|t| t.max(0.0)).sum();
    let shares = if positive > 0.0 {
        totals.map(|t| t.max(0.0) / positive * 100.0)
    } else {
        [20.0; 5]
    };

    let mut ranking = ALL_ELEMENTS;
    ranking.sort_by(|a, b| totals[b.index() as usize].total_cmp(&totals[a.index() as usize]));

    let mean = shares.iter().sum::<f64>() / 5.0;
    let deviation = (shares.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / 5.0).sqrt();
    let balance_score = (100.0 - 2.0 * deviation).max(0.0);
    let balance_level = BalanceLevel::from_score(balance_score);

    let share_table = PerElement::new(shares);
    let dm = pillars.day_master().element();
    let dm_share = share_table.get(dm);
    let level = StrengthLevel::from_share(dm_share);
    let (supporting, weakening) = factors(&breakdown.get(dm), dm, &share_table);
    let strongest = ranking[0];
    let weakest = ranking[4];
    log::debug!(
        "day master {} holds {dm_share:.1}% ({}), {} strongest",
        dm.name(),
        level.name(),
        strongest.name()
    );

    StrengthAnalysis {
        breakdown,
        scores: PerElement::new(totals.map(round1)),
        shares: PerElement::new(shares.map(round1)),
        ranking,
        strongest,
        weakest,
        day_master: DayMasterStrength {
            element: dm,
            level,
            score: round1(totals[dm.index() as usize]),
            share: round1(dm_share),
            supporting,
            weakening,
            recommendation: recommendation(level, dm),
        },
        balance: Balance {
            score: round1(balance_score),
            level: balance_level,
            description: balance_level.description(),
        },
        summary: format!(
            "{}命，日主{}，{}旺{}弱，整体{}。",
            dm.name(),
            level.name(),
            strongest.name(),
            weakest.name(),
            balance_level.description()
        ),
    }
}

// ---------------------------------------------------------------------------
