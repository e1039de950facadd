//! Na-yin (纳音) of the four pillars: how the other pillars' sounds sit with
//! the day pillar's, and how strong the day sound is in its season.

use serde::{Serialize, Serializer};
use xuanji_base::{Element, NaYin, Season};

use crate::pillars::FourPillars;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NaYinRelation {
    Favorable,
    Unfavorable,
    Neutral,
}

impl NaYinRelation {
    /// Same element or the other generates the day element: favourable.
    /// The other controls the day, or the day feeds the other: unfavourable.
    pub fn of(day: Element, other: Element) -> Self {
        if day == other || other.generates() == day {
            Self::Favorable
        } else if other.controls() == day || day.generates() == other {
            Self::Unfavorable
        } else {
            Self::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct NaYinCompatibility {
    pub favorable: Vec<NaYin>,
    pub unfavorable: Vec<NaYin>,
    pub neutral: Vec<NaYin>,
    pub analysis: String,
}

fn compatibility_text(fav: usize, unfav: usize, neutral: usize) -> String {
    let mut text = String::from("纳音相配分析：");
    if fav > unfav {
        text.push_str(&format!(
            "整体配置较好，有利纳音{fav}个，不利纳音{unfav}个。纳音组合有助于命主发展，能够得到较好的支持。"
        ));
    } else if unfav > fav {
        text.push_str(&format!(
            "纳音配置存在挑战，不利纳音{unfav}个，有利纳音{fav}个。需要注意纳音冲突带来的影响，宜化解不利因素。"
        ));
    } else {
        text.push_str("纳音配置相对平衡，各种关系并存。整体比较平和，需要综合考虑其他因素。");
    }
    if neutral > 0 {
        text.push_str(&format!("另有中性纳音{neutral}个，影响相对较小。"));
    }
    text
}

/// Compare the year, month and hour sounds with the day sound.
pub fn na_yin_compatibility(pillars: &FourPillars) -> NaYinCompatibility {
    let day = pillars.day.na_yin.element();
    let mut out = NaYinCompatibility::default();
    for other in [pillars.year.na_yin, pillars.month.na_yin, pillars.hour.na_yin] {
        match NaYinRelation::of(day, other.element()) {
            NaYinRelation::Favorable => out.favorable.push(other),
            NaYinRelation::Unfavorable => out.unfavorable.push(other),
            NaYinRelation::Neutral => out.neutral.push(other),
        }
    }
    out.analysis = compatibility_text(out.favorable.len(), out.unfavorable.len(), out.neutral.len());
    out
}

// ---------------------------------------------------------------------------
// Seasonal strength
// ---------------------------------------------------------------------------

/// 旺 相 休 囚 死
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeasonalLevel {
    Prosperous,
    Strong,
    Resting,
    Trapped,
    Dead,
}

impl SeasonalLevel {
    pub const fn from_score(score: u32) -> Self {
        match score {
            80.. => Self::Prosperous,
            60..=79 => Self::Strong,
            40..=59 => Self::Resting,
            20..=39 => Self::Trapped,
            _ => Self::Dead,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Prosperous => "旺",
            Self::Strong => "相",
            Self::Resting => "休",
            Self::Trapped => "囚",
            Self::Dead => "死",
        }
    }
}

impl Serialize for SeasonalLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Score of an element in a season, 20..=100.
pub const fn seasonal_score(element: Element, season: Season) -> u32 {
    // Rows: 春 夏 秋 冬 土月; columns: 木 火 土 金 水.
    const TABLE: [[u32; 5]; 5] = [
        [100, 70, 30, 20, 50],
        [50, 100, 70, 30, 20],
        [20, 30, 50, 100, 70],
        [30, 20, 30, 50, 100],
        [30, 50, 100, 70, 30],
    ];
    TABLE[season.index() as usize][element.index() as usize]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NaYinStrength {
    pub na_yin: NaYin,
    pub score: u32,
    pub level: SeasonalLevel,
    pub description: String,
}

pub fn na_yin_strength(na_yin: NaYin, season: Season) -> NaYinStrength {
    let score = seasonal_score(na_yin.element(), season);
    let level = SeasonalLevel::from_score(score);
    let outlook = match score {
        70.. => "力量充足，有利发展",
        40..=69 => "力量一般，需要支持",
        _ => "力量较弱，需要扶持",
    };
    NaYinStrength {
        na_yin,
        score,
        level,
        description: format!(
            "{}在当前季节处于{}地，强度为{}分，{}。",
            na_yin.name(),
            level.name(),
            score,
            outlook
        ),
    }
}

/// Na-yin of every pillar with the day sound's compatibility and strength.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NaYinInfo {
    pub year: NaYin,
    pub month: NaYin,
    pub day: NaYin,
    pub hour: NaYin,
    pub element: Element,
    pub compatibility: NaYinCompatibility,
    pub strength: NaYinStrength,
}

impl NaYinInfo {
    pub fn of(pillars: &FourPillars) -> Self {
        let day = pillars.day.na_yin;
        Self {
            year: pillars.year.na_yin,
            month: pillars.month.na_yin,
            day,
            hour: pillars.hour.na_yin,
            element: day.element(),
            compatibility: na_yin_compatibility(pillars),
            strength: na_yin_strength(day, pillars.season()),
        }
    }
}
