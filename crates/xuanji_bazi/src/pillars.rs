//! The four pillars (四柱) of a birth moment.
//!
//! - Year pillar turns at the exact 立春 instant, not on lunar new year.
//! - Month branch follows the Sun's longitude in 30° steps from 315° (寅);
//!   the month stem follows the Five-Tiger rule from the year stem.
//! - Day pillar is the cycle day of the Beijing civil date.
//! - Hour stem follows the Five-Rat rule from the stem of the day on which
//!   the 子 hour opens.
//!
//! All solar quantities come from `xuanji_time`; the birth time is shifted
//! to UTC+8 before any lookup.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use xuanji_base::{
    ALL_ELEMENTS, Branch, Element, GanZhi, HiddenStem, NaYin, Season, Stem, hidden_stems,
};
use xuanji_time::{
    CivilDateTime, SolarTerm, UtcOffset, check_year, hour_index, solar_term_ut,
    sun_longitude_at_ut,
};

use crate::error::BaziError;

/// Longitude at which the 寅 month opens (立春).
const YIN_MONTH_LONGITUDE_DEG: f64 = 315.0;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Pillar options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PillarConfig {
    /// Count births from 23:00 as the next civil day. Default: `true`.
    pub late_zi_next_day: bool,
}

impl Default for PillarConfig {
    fn default() -> Self {
        Self {
            late_zi_next_day: true,
        }
    }
}

// ---------------------------------------------------------------------------
// PillarSlot
// ---------------------------------------------------------------------------

/// Position of a pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PillarSlot {
    Year,
    Month,
    Day,
    Hour,
}

pub const ALL_PILLAR_SLOTS: [PillarSlot; 4] = [
    PillarSlot::Year,
    PillarSlot::Month,
    PillarSlot::Day,
    PillarSlot::Hour,
];

impl PillarSlot {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
        }
    }

    /// 年柱 月柱 日柱 时柱.
    pub const fn name_zh(self) -> &'static str {
        match self {
            Self::Year => "年柱",
            Self::Month => "月柱",
            Self::Day => "日柱",
            Self::Hour => "时柱",
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl Serialize for PillarSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// PerElement
// ---------------------------------------------------------------------------

/// One value per element, in 木 火 土 金 水 order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PerElement<T>([T; 5]);

impl<T> PerElement<T> {
    /// Values in 木 火 土 金 水 order.
    pub const fn new(values: [T; 5]) -> Self {
        Self(values)
    }
}

impl<T: Copy> PerElement<T> {
    pub fn get(&self, element: Element) -> T {
        self.0[element.index() as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Element, T)> + '_ {
        ALL_ELEMENTS.iter().map(|&e| (e, self.get(e)))
    }
}

impl<T: Copy + std::ops::AddAssign> PerElement<T> {
    pub fn add(&mut self, element: Element, value: T) {
        self.0[element.index() as usize] += value;
    }
}

impl<T: Copy + PartialOrd> PerElement<T> {
    /// Element with the smallest value; ties go to the earlier element.
    pub fn min_element(&self) -> Element {
        let mut best = Element::Wood;
        for (e, v) in self.iter() {
            if v < self.get(best) {
                best = e;
            }
        }
        best
    }
}

impl<T: Copy + Serialize> Serialize for PerElement<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5))?;
        for (e, v) in self.iter() {
            map.serialize_entry(e.name(), &v)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Pillar
// ---------------------------------------------------------------------------

/// One pillar: a cycle pair with the hidden stems of its branch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pillar {
    pub slot: PillarSlot,
    pub ganzhi: GanZhi,
    pub stem: Stem,
    pub branch: Branch,
    /// Element of the stem.
    pub element: Element,
    pub hidden_stems: &'static [HiddenStem],
    pub na_yin: NaYin,
}

impl Pillar {
    pub fn new(slot: PillarSlot, ganzhi: GanZhi) -> Self {
        Self {
            slot,
            ganzhi,
            stem: ganzhi.stem(),
            branch: ganzhi.branch(),
            element: ganzhi.stem().element(),
            hidden_stems: hidden_stems(ganzhi.branch()),
            na_yin: ganzhi.na_yin(),
        }
    }
}

/// Day-master facts (日主).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayMasterInfo {
    pub stem: Stem,
    pub element: Element,
    pub season: Season,
    /// Element ruling the month branch (月令).
    pub month_order: Element,
    /// Day master shares the month-order element (当令).
    pub in_season: bool,
}

/// A stem visible on at least one pillar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransparentStem {
    pub stem: Stem,
    pub positions: Vec<PillarSlot>,
}

/// A stem hidden in some branch and not visible on any pillar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConcealedStem {
    pub stem: Stem,
    /// Pillars whose branch holds the stem.
    pub branches: Vec<PillarSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StemTransparency {
    pub transparent: Vec<TransparentStem>,
    pub hidden: Vec<ConcealedStem>,
}

// ---------------------------------------------------------------------------
// FourPillars
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
    /// Birth wall-clock time in UTC+8.
    pub beijing_time: CivilDateTime,
}

impl FourPillars {
    /// Pillars from a cycle pair per slot.
    pub fn from_ganzhi(
        year: GanZhi,
        month: GanZhi,
        day: GanZhi,
        hour: GanZhi,
        beijing_time: CivilDateTime,
    ) -> Self {
        Self {
            year: Pillar::new(PillarSlot::Year, year),
            month: Pillar::new(PillarSlot::Month, month),
            day: Pillar::new(PillarSlot::Day, day),
            hour: Pillar::new(PillarSlot::Hour, hour),
            beijing_time,
        }
    }

    pub fn get(&self, slot: PillarSlot) -> &Pillar {
        match slot {
            PillarSlot::Year => &self.year,
            PillarSlot::Month => &self.month,
            PillarSlot::Day => &self.day,
            PillarSlot::Hour => &self.hour,
        }
    }

    /// Year, month, day, hour.
    pub fn pillars(&self) -> [&Pillar; 4] {
        [&self.year, &self.month, &self.day, &self.hour]
    }

    pub fn stems(&self) -> [Stem; 4] {
        self.pillars().map(|p| p.stem)
    }

    pub fn branches(&self) -> [Branch; 4] {
        self.pillars().map(|p| p.branch)
    }

    /// Every hidden stem of the four branches, pillar by pillar.
    pub fn all_hidden(&self) -> impl Iterator<Item = (PillarSlot, &'static HiddenStem)> + '_ {
        self.pillars()
            .into_iter()
            .flat_map(|p| p.hidden_stems.iter().map(move |h| (p.slot, h)))
    }

    pub fn day_master(&self) -> Stem {
        self.day.stem
    }

    /// Element of the month branch (月令).
    pub fn month_order(&self) -> Element {
        self.month.branch.element()
    }

    pub fn season(&self) -> Season {
        self.month.branch.season()
    }

    /// Stem element plus branch element of each pillar.
    pub fn element_count(&self) -> PerElement<u32> {
        let mut out = PerElement::default();
        for p in self.pillars() {
            out.add(p.stem.element(), 1);
            out.add(p.branch.element(), 1);
        }
        out
    }

    /// Sum of hidden-stem weights per element.
    pub fn hidden_element_weight(&self) -> PerElement<f64> {
        let mut out = PerElement::default();
        for (_, h) in self.all_hidden() {
            out.add(h.element(), h.weight);
        }
        out
    }

    pub fn day_master_info(&self) -> DayMasterInfo {
        let dm = self.day_master();
        DayMasterInfo {
            stem: dm,
            element: dm.element(),
            season: self.season(),
            month_order: self.month_order(),
            in_season: dm.element() == self.month_order(),
        }
    }

    /// Which stems show on the pillars and which stay inside branches.
    pub fn stem_transparency(&self) -> StemTransparency {
        let mut out = StemTransparency::default();
        for p in self.pillars() {
            match out.transparent.iter_mut().find(|t| t.stem == p.stem) {
                Some(t) => t.positions.push(p.slot),
                None => out.transparent.push(TransparentStem {
                    stem: p.stem,
                    positions: vec![p.slot],
                }),
            }
        }
        let stems = self.stems();
        for (_, h) in self.all_hidden() {
            if stems.contains(&h.stem) || out.hidden.iter().any(|c| c.stem == h.stem) {
                continue;
            }
            let branches = self
                .pillars()
                .into_iter()
                .filter(|p| p.hidden_stems.iter().any(|x| x.stem == h.stem))
                .map(|p| p.slot)
                .collect();
            out.hidden.push(ConcealedStem {
                stem: h.stem,
                branches,
            });
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Five-Tiger rule: stem of the 寅 month for a year stem.
pub const fn tiger_month_stem(year_stem: Stem) -> Stem {
    Stem::from_index((year_stem.index() as i32 % 5) * 2 + 2)
}

/// Five-Rat rule: stem of the 子 hour for a day stem.
pub const fn rat_hour_stem(day_stem: Stem) -> Stem {
    Stem::from_index((day_stem.index() as i32 % 5) * 2)
}

/// Month number from 寅 (0) to 丑 (11) for a solar longitude.
pub fn solar_month_index(sun_longitude_deg: f64) -> u8 {
    let k = ((sun_longitude_deg - YIN_MONTH_LONGITUDE_DEG).rem_euclid(360.0) / 30.0).floor();
    (k as u8).min(11)
}

/// Four pillars of a wall-clock birth time given in `offset`.
pub fn four_pillars(
    birth: &CivilDateTime,
    offset: UtcOffset,
    config: &PillarConfig,
) -> Result<FourPillars, BaziError> {
    birth.validate()?;
    let bj = birth.to_beijing(offset);
    check_year(bj.year)?;
    let jd_ut = birth.to_jd_ut(offset);

    let li_chun = solar_term_ut(bj.year, SolarTerm::LiChun);
    let solar_year = if jd_ut >= li_chun { bj.year } else { bj.year - 1 };
    let year = GanZhi::of_year(solar_year);

    let k = solar_month_index(sun_longitude_at_ut(jd_ut));
    let month = GanZhi::new(
        tiger_month_stem(year.stem()).offset(k as i32),
        Branch::Yin.offset(k as i32),
    )?;

    let late = bj.hour >= 23;
    let civil_jdn = bj.jdn();
    let day = GanZhi::of_jdn(civil_jdn + i64::from(late && config.late_zi_next_day));

    let hi = hour_index(bj.hour);
    let zi_day = GanZhi::of_jdn(civil_jdn + i64::from(late));
    let hour = GanZhi::new(
        rat_hour_stem(zi_day.stem()).offset(hi as i32),
        Branch::from_index(hi as i32),
    )?;

    log::debug!("bazi {bj}: {year} {month} {day} {hour}");
    Ok(FourPillars::from_ganzhi(year, month, day, hour, bj))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pillars_at(y: i32, m: u32, d: u32, h: u32, min: u32, config: &PillarConfig) -> FourPillars {
        let dt = CivilDateTime::new(y, m, d, h, min).unwrap();
        four_pillars(&dt, UtcOffset::BEIJING, config).unwrap()
    }

    fn names(p: &FourPillars) -> [String; 4] {
        p.pillars().map(|x| x.ganzhi.name())
    }

    #[test]
    fn may_1990() {
        let p = pillars_at(1990, 5, 15, 14, 30, &PillarConfig::default());
        assert_eq!(names(&p), ["庚午", "辛巳", "庚辰", "癸未"]);
        assert_eq!(p.day_master(), Stem::Geng);
        assert_eq!(p.season(), Season::Summer);
        assert_eq!(p.month_order(), Element::Fire);
    }

    #[test]
    fn year_turns_at_li_chun() {
        let before = pillars_at(2024, 2, 4, 10, 0, &PillarConfig::default());
        let after = pillars_at(2024, 2, 4, 18, 0, &PillarConfig::default());
        assert_eq!(before.year.ganzhi.name(), "癸卯");
        assert_eq!(before.month.ganzhi.name(), "乙丑");
        assert_eq!(after.year.ganzhi.name(), "甲辰");
        assert_eq!(after.month.ganzhi.name(), "丙寅");
    }

    #[test]
    fn late_zi_hour() {
        let next = pillars_at(1990, 5, 15, 23, 30, &PillarConfig::default());
        assert_eq!(next.day.ganzhi.name(), "辛巳");
        assert_eq!(next.hour.ganzhi.name(), "戊子");
        let same = pillars_at(
            1990,
            5,
            15,
            23,
            30,
            &PillarConfig {
                late_zi_next_day: false,
            },
        );
        assert_eq!(same.day.ganzhi.name(), "庚辰");
        assert_eq!(same.hour.ganzhi.name(), "戊子");
    }

    #[test]
    fn offset_shifts_to_beijing() {
        let dt = CivilDateTime::new(1990, 5, 15, 7, 30).unwrap();
        let p = four_pillars(&dt, "+01:00".parse().unwrap(), &PillarConfig::default()).unwrap();
        assert_eq!(names(&p), ["庚午", "辛巳", "庚辰", "癸未"]);
        assert_eq!(p.beijing_time.hour, 14);
    }

    #[test]
    fn counts_and_weights() {
        let p = pillars_at(1990, 5, 15, 14, 30, &PillarConfig::default());
        let c = p.element_count();
        assert_eq!(
            c.iter().map(|(_, n)| n).collect::<Vec<_>>(),
            [0, 2, 2, 3, 1]
        );
        assert_eq!(c.min_element(), Element::Wood);
        let w = p.hidden_element_weight();
        assert!((w.get(Element::Wood) - 0.8).abs() < 1e-9);
        assert!((w.get(Element::Fire) - 2.3).abs() < 1e-9);
        assert!((w.get(Element::Earth) - 2.8).abs() < 1e-9);
        assert!((w.get(Element::Metal) - 0.3).abs() < 1e-9);
        assert!((w.get(Element::Water) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn day_master_info_and_transparency() {
        let p = pillars_at(1990, 5, 15, 14, 30, &PillarConfig::default());
        let info = p.day_master_info();
        assert_eq!(info.element, Element::Metal);
        assert!(!info.in_season);

        let t = p.stem_transparency();
        let geng = t.transparent.iter().find(|x| x.stem == Stem::Geng).unwrap();
        assert_eq!(geng.positions, [PillarSlot::Year, PillarSlot::Day]);
        assert_eq!(t.transparent.len(), 3);
        let ding = t.hidden.iter().find(|x| x.stem == Stem::Ding).unwrap();
        assert_eq!(ding.branches, [PillarSlot::Year, PillarSlot::Hour]);
        assert!(t.hidden.iter().all(|x| x.stem != Stem::Gui));
    }

    #[test]
    fn month_index_wraps() {
        assert_eq!(solar_month_index(315.0), 0);
        assert_eq!(solar_month_index(314.9), 11);
        assert_eq!(solar_month_index(54.0), 3);
        assert_eq!(solar_month_index(0.0), 1);
    }

    #[test]
    fn rejects_bad_time() {
        let dt = CivilDateTime {
            year: 1990,
            month: 2,
            day: 30,
            hour: 0,
            minute: 0,
        };
        assert!(matches!(
            four_pillars(&dt, UtcOffset::BEIJING, &PillarConfig::default()),
            Err(BaziError::Calendar(_))
        ));
    }
}
