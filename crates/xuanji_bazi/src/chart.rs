//! The assembled BaZi chart.

use serde::Serialize;
use xuanji_base::Gender;
use xuanji_time::{CivilDateTime, UtcOffset};

use crate::error::BaziError;
use crate::major_period::{DEFAULT_PERIOD_COUNT, MAX_PERIOD_COUNT, MajorPeriods, major_periods};
use crate::nayin::NaYinInfo;
use crate::pillars::{
    DayMasterInfo, FourPillars, PerElement, PillarConfig, StemTransparency, four_pillars,
};
use crate::shensha::{ShenShaReport, detect_shensha};
use crate::strength::{StrengthAnalysis, analyze_strength};
use crate::ten_gods::{TenGodAnalysis, analyze_ten_gods};
use crate::yongshen::{YongshenResult, run_yongshen_agent};

/// Chart options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaziConfig {
    pub pillars: PillarConfig,
    /// Number of major periods to list, 1..=12. Default: 8.
    pub major_period_count: usize,
}

impl Default for BaziConfig {
    fn default() -> Self {
        Self {
            pillars: PillarConfig::default(),
            major_period_count: DEFAULT_PERIOD_COUNT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaziChart {
    /// Birth time as given, before conversion to Beijing time.
    pub birth: CivilDateTime,
    pub offset: UtcOffset,
    pub gender: Gender,
    pub pillars: FourPillars,
    pub day_master: DayMasterInfo,
    pub element_count: PerElement<u32>,
    pub hidden_element_weight: PerElement<f64>,
    pub transparency: StemTransparency,
    pub ten_gods: TenGodAnalysis,
    pub na_yin: NaYinInfo,
    pub major_periods: MajorPeriods,
    pub shensha: ShenShaReport,
    pub strength: StrengthAnalysis,
}

impl BaziChart {
    pub fn compute(
        birth: &CivilDateTime,
        offset: UtcOffset,
        gender: Gender,
        config: &BaziConfig,
    ) -> Result<Self, BaziError> {
        if !(1..=MAX_PERIOD_COUNT).contains(&config.major_period_count) {
            return Err(BaziError::InvalidInput(format!(
                "major period count {} outside 1..={MAX_PERIOD_COUNT}",
                config.major_period_count
            )));
        }
        let pillars = four_pillars(birth, offset, &config.pillars)?;
        let ten_gods = analyze_ten_gods(&pillars);
        let major_periods = major_periods(&pillars, gender, config.major_period_count);
        log::debug!(
            "bazi {} {} {} {}, periods from age {}",
            pillars.year.ganzhi,
            pillars.month.ganzhi,
            pillars.day.ganzhi,
            pillars.hour.ganzhi,
            major_periods.start_age
        );
        Ok(Self {
            birth: *birth,
            offset,
            gender,
            day_master: pillars.day_master_info(),
            element_count: pillars.element_count(),
            hidden_element_weight: pillars.hidden_element_weight(),
            transparency: pillars.stem_transparency(),
            na_yin: NaYinInfo::of(&pillars),
            shensha: detect_shensha(&pillars, gender),
            strength: analyze_strength(&pillars),
            pillars,
            ten_gods,
            major_periods,
        })
    }

    /// Run the yongshen agent over this chart.
    pub fn yongshen(&self) -> YongshenResult {
        run_yongshen_agent(&self.pillars, &self.ten_gods)
    }

    /// One-sentence overview. With `age`, names the major period in force.
    pub fn summary(&self, age: Option<u32>) -> String {
        let dm = &self.day_master;
        let mut text = format!(
            "{}日主，五行属{}，生于{}，十神以{}为主",
            dm.stem.name(),
            dm.element.name(),
            dm.season.name(),
            self.ten_gods.summary.strongest.name()
        );
        if let Some(p) = age.and_then(|a| self.major_periods.current(a)) {
            text.push_str(&format!(
                "，现行{}({}-{}岁)大运",
                p.ganzhi, p.start_age, p.end_age
            ));
        }
        text.push('。');
        text
    }
}
