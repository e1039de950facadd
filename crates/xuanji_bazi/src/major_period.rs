//! Major periods (大运).
//!
//! Periods step from the month pillar through the 60-cycle, forward for a
//! yang-year male or yin-year female and backward otherwise. Each lasts ten
//! nominal years. Current-period selection takes an explicit age; nothing
//! here reads the wall clock.

use serde::{Serialize, Serializer};
use xuanji_base::{
    Branch, Element, GanZhi, Gender, HiddenStem, NaYin, Season, Stem, TenGod, hidden_stems,
    is_clash, six_harmony, stem_combination, ten_god,
};

use crate::pillars::FourPillars;
use crate::shensha::{ShenSha, period_shensha};

/// Default number of periods.
pub const DEFAULT_PERIOD_COUNT: usize = 8;

/// Most periods a chart lists; twelve decades cover a full life.
pub const MAX_PERIOD_COUNT: usize = 12;

const BASE_STRENGTH: i32 = 50;
const MIN_STRENGTH: i32 = 10;
const MAX_STRENGTH: i32 = 100;

/// How an element stands toward the day master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relationship {
    /// Generates or equals the day-master element.
    Favorable,
    /// Controls the day-master element.
    Unfavorable,
    Neutral,
}

impl Relationship {
    /// Classify `other` against the day-master element.
    pub fn of(day_master: Element, other: Element) -> Self {
        if other == day_master || other == day_master.generated_by() {
            Self::Favorable
        } else if other == day_master.controlled_by() {
            Self::Unfavorable
        } else {
            Self::Neutral
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Favorable => "favorable",
            Self::Unfavorable => "unfavorable",
            Self::Neutral => "neutral",
        }
    }

    pub const fn name_zh(self) -> &'static str {
        match self {
            Self::Favorable => "有利",
            Self::Unfavorable => "不利",
            Self::Neutral => "平和",
        }
    }

    const fn strength_delta(self) -> i32 {
        match self {
            Self::Favorable => 30,
            Self::Unfavorable => -20,
            Self::Neutral => 0,
        }
    }
}

impl Serialize for Relationship {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Seasonal bonus of a period element, by season (春 夏 秋 冬 土月).
const fn seasonal_bonus(element: Element, season: Season) -> i32 {
    const TABLE: [[i32; 5]; 5] = [
        [20, 10, -10, 5, -5],  // 木
        [10, 20, -5, -10, 5],  // 火
        [-5, 5, 10, -5, 20],   // 土
        [-10, -5, 20, 10, 5],  // 金
        [5, -10, 10, 20, -5],  // 水
    ];
    TABLE[element.index() as usize][season.index() as usize]
}

// ---------------------------------------------------------------------------
// Periods
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MajorPeriod {
    /// 1-based ordinal.
    pub period: u32,
    pub start_age: u32,
    pub end_age: u32,
    pub ganzhi: GanZhi,
    pub stem: Stem,
    pub branch: Branch,
    /// Element of the period stem.
    pub element: Element,
    pub na_yin: NaYin,
    pub hidden_stems: &'static [HiddenStem],
    pub ten_god: TenGod,
    pub relationship: Relationship,
    pub strength: u32,
    /// Stars the period pillar lights against the natal chart.
    pub shensha: Vec<ShenSha>,
    pub description: String,
}

impl MajorPeriod {
    pub fn contains(&self, age: u32) -> bool {
        (self.start_age..=self.end_age).contains(&age)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MajorPeriods {
    pub forward: bool,
    pub start_age: u32,
    pub periods: Vec<MajorPeriod>,
}

impl MajorPeriods {
    /// Period covering `age`.
    pub fn current(&self, age: u32) -> Option<&MajorPeriod> {
        self.periods.iter().find(|p| p.contains(age))
    }

    /// First period starting after `age`.
    pub fn next(&self, age: u32) -> Option<&MajorPeriod> {
        self.periods.iter().find(|p| p.start_age > age)
    }

    /// Changes between successive periods.
    pub fn transitions(&self) -> Vec<Transition> {
        self.periods
            .windows(2)
            .map(|w| Transition::between(&w[0], &w[1]))
            .collect()
    }
}

/// Age of the first period: 3 forward or 7 backward, plus one per quarter
/// of the month branch's position from 子.
pub fn start_age(pillars: &FourPillars, forward: bool) -> u32 {
    let base = if forward { 3 } else { 7 };
    (base + u32::from(pillars.month.branch.index()) / 3).max(1)
}

/// Lay out `count` periods for the chart, at most [`MAX_PERIOD_COUNT`].
pub fn major_periods(pillars: &FourPillars, gender: Gender, count: usize) -> MajorPeriods {
    let count = count.min(MAX_PERIOD_COUNT);
    let forward = gender.is_forward(pillars.year.stem);
    let first = start_age(pillars, forward);
    let step: i64 = if forward { 1 } else { -1 };
    let dm = pillars.day_master();
    let season = pillars.season();
    let month_element = pillars.month.stem.element();

    let periods = (0..count)
        .map(|i| {
            let ganzhi = pillars.month.ganzhi.offset(step * (i as i64 + 1));
            let stem = ganzhi.stem();
            let element = stem.element();
            let relationship = Relationship::of(dm.element(), element);
            let mut strength = BASE_STRENGTH + relationship.strength_delta();
            if element == month_element {
                strength += 15;
            }
            strength += seasonal_bonus(element, season);
            let na_yin = ganzhi.na_yin();
            let start = first + 10 * i as u32;
            MajorPeriod {
                period: i as u32 + 1,
                start_age: start,
                end_age: start + 9,
                ganzhi,
                stem,
                branch: ganzhi.branch(),
                element,
                na_yin,
                hidden_stems: hidden_stems(ganzhi.branch()),
                ten_god: ten_god(dm, stem),
                relationship,
                strength: strength.clamp(MIN_STRENGTH, MAX_STRENGTH) as u32,
                shensha: period_shensha(pillars, gender, ganzhi),
                description: format!(
                    "第{}步大运：{}，五行属{}，纳音{}。",
                    i + 1,
                    ganzhi,
                    element.name(),
                    na_yin.name()
                ),
            }
        })
        .collect();

    log::debug!(
        "major periods from age {first}, {}",
        if forward { "forward" } else { "backward" }
    );
    MajorPeriods {
        forward,
        start_age: first,
        periods,
    }
}

// ---------------------------------------------------------------------------
// Year within a period
// ---------------------------------------------------------------------------

/// A calendar year (流年) read against a major period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodYear {
    /// E.g. `壬午 + 甲辰`.
    pub combination: String,
    pub relationship: Relationship,
    pub strength: u32,
    pub description: String,
    pub warnings: Vec<String>,
}

/// Interactions of a year pillar with a period: 合 lifts, 冲 lowers.
pub fn analyze_year(period: &MajorPeriod, year: GanZhi, day_master: Stem) -> PeriodYear {
    let mut warnings = Vec::new();
    let mut strength = BASE_STRENGTH;
    let (ys, yb) = (year.stem(), year.branch());

    if let Some(el) = stem_combination(period.stem, ys) {
        strength += 15;
        warnings.push(format!(
            "大运天干{}与流年天干{}化{}",
            period.stem.name(),
            ys.name(),
            el.name()
        ));
    }
    if is_clash(period.branch, yb) {
        strength -= 20;
        warnings.push(format!(
            "大运地支{}与流年地支{}相冲",
            period.branch.name(),
            yb.name()
        ));
    } else if six_harmony(period.branch, yb).is_some() {
        strength += 10;
    }

    let relationship = Relationship::of(day_master.element(), ys.element());
    let outlook = match relationship {
        Relationship::Favorable => "有利发展",
        Relationship::Unfavorable => "需要谨慎",
        Relationship::Neutral => "平稳过渡",
    };
    PeriodYear {
        combination: format!("{} + {}", period.ganzhi, year),
        relationship,
        strength: strength.clamp(MIN_STRENGTH, MAX_STRENGTH) as u32,
        description: format!("{}运遇{}年，{}。", period.ganzhi, year, outlook),
        warnings,
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Significance {
    Major,
    Moderate,
    Minor,
}

impl Significance {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Moderate => "moderate",
            Self::Minor => "minor",
        }
    }
}

impl Serialize for Significance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// Ordinal of the period being left.
    pub from_period: u32,
    pub to_period: u32,
    pub age: u32,
    pub significance: Significance,
    pub description: String,
}

impl Transition {
    fn between(from: &MajorPeriod, to: &MajorPeriod) -> Self {
        let element_change = from.element != to.element;
        let (significance, description) =
            if element_change && from.relationship != to.relationship {
                (
                    Significance::Major,
                    format!(
                        "从{}转向{}，运势性质从{}转为{}，是重要转折点。",
                        from.element.name(),
                        to.element.name(),
                        from.relationship.name_zh(),
                        to.relationship.name_zh()
                    ),
                )
            } else if element_change || from.ten_god != to.ten_god {
                (
                    Significance::Moderate,
                    "运势特质发生变化，需要调整应对策略。".to_string(),
                )
            } else {
                (Significance::Minor, "运势延续，保持稳定发展。".to_string())
            };
        Self {
            from_period: from.period,
            to_period: to.period,
            age: to.start_age,
            significance,
            description,
        }
    }
}
