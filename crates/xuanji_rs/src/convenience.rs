use serde::Serialize;
use xuanji_base::{Branch, GanZhi};
use xuanji_bazi::{BaziChart, YongshenResult};
use xuanji_time::{CivilDateTime, LunarDate, leap_month};
use xuanji_ziwei::ZiweiChart;

use crate::config::ChartConfig;
use crate::error::XuanjiError;
use crate::input::BirthInput;

/// Calendar facts for a birth moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LunarInfo {
    pub beijing: CivilDateTime,
    pub lunar: LunarDate,
    /// E.g. `庚午年 四月廿一`.
    pub text: String,
    pub year_ganzhi: GanZhi,
    /// 生肖 of the lunar year.
    pub animal: &'static str,
    pub hour_branch: Branch,
    /// Intercalary month of the lunar year, if any.
    pub leap_month: Option<u8>,
}

/// Solar/lunar conversion of a birth input.
pub fn lunar(input: &BirthInput) -> Result<LunarInfo, XuanjiError> {
    let r = input.resolve()?;
    let year_ganzhi = GanZhi::of_year(r.lunar.year);
    Ok(LunarInfo {
        beijing: r.beijing,
        lunar: r.lunar,
        text: format!("{year_ganzhi}年 {}", r.lunar.month_day_zh()),
        year_ganzhi,
        animal: year_ganzhi.branch().animal(),
        hour_branch: Branch::from_index(i32::from(r.hour_index)),
        leap_month: leap_month(r.lunar.year)?,
    })
}

/// Zi Wei Dou Shu chart of a birth input.
pub fn ziwei(input: &BirthInput, config: &ChartConfig) -> Result<ZiweiChart, XuanjiError> {
    let r = input.resolve()?;
    Ok(ZiweiChart::compute(
        r.lunar,
        r.hour_index,
        input.gender,
        &config.ziwei(),
    )?)
}

/// BaZi chart of a birth input.
pub fn bazi(input: &BirthInput, config: &ChartConfig) -> Result<BaziChart, XuanjiError> {
    let r = input.resolve()?;
    Ok(BaziChart::compute(
        &r.local,
        r.offset,
        input.gender,
        &config.bazi(),
    )?)
}

/// Yongshen analysis of a birth input's BaZi chart.
pub fn yongshen(input: &BirthInput, config: &ChartConfig) -> Result<YongshenResult, XuanjiError> {
    Ok(bazi(input, config)?.yongshen())
}
