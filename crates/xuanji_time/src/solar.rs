//! Apparent solar longitude and the 24 solar terms (节气).
//!
//! The Sun's apparent geocentric longitude uses the low-precision theory of
//! Meeus, *Astronomical Algorithms*, ch. 25 (accuracy ~0.01°), which places
//! solar terms within a few minutes of published almanac times over
//! 1900–2100. Term instants are found by Newton iteration on the longitude.
//!
//! Clean-room implementation from Meeus ch. 25 and the traditional 15° term
//! division of the ecliptic.

use serde::{Serialize, Serializer};

use crate::delta_t::{tt_to_ut, ut_to_tt};
use crate::julian::{calendar_to_jd, jd_to_centuries};

/// Mean tropical year in days.
const TROPICAL_YEAR_DAYS: f64 = 365.2422;

/// Newton iteration cap for term search.
const MAX_TERM_ITERATIONS: usize = 30;

/// Longitude tolerance for term search, degrees (~0.1 s of time).
const TERM_TOLERANCE_DEG: f64 = 1e-6;

/// The 24 solar terms, in Gregorian-year order starting from 小寒.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum SolarTerm {
    XiaoHan,
    DaHan,
    LiChun,
    YuShui,
    JingZhe,
    ChunFen,
    QingMing,
    GuYu,
    LiXia,
    XiaoMan,
    MangZhong,
    XiaZhi,
    XiaoShu,
    DaShu,
    LiQiu,
    ChuShu,
    BaiLu,
    QiuFen,
    HanLu,
    ShuangJiang,
    LiDong,
    XiaoXue,
    DaXue,
    DongZhi,
}

/// All 24 terms in order (index 0 = 小寒, longitude 285°).
pub const ALL_SOLAR_TERMS: [SolarTerm; 24] = [
    SolarTerm::XiaoHan,
    SolarTerm::DaHan,
    SolarTerm::LiChun,
    SolarTerm::YuShui,
    SolarTerm::JingZhe,
    SolarTerm::ChunFen,
    SolarTerm::QingMing,
    SolarTerm::GuYu,
    SolarTerm::LiXia,
    SolarTerm::XiaoMan,
    SolarTerm::MangZhong,
    SolarTerm::XiaZhi,
    SolarTerm::XiaoShu,
    SolarTerm::DaShu,
    SolarTerm::LiQiu,
    SolarTerm::ChuShu,
    SolarTerm::BaiLu,
    SolarTerm::QiuFen,
    SolarTerm::HanLu,
    SolarTerm::ShuangJiang,
    SolarTerm::LiDong,
    SolarTerm::XiaoXue,
    SolarTerm::DaXue,
    SolarTerm::DongZhi,
];

const SOLAR_TERM_NAMES: [&str; 24] = [
    "小寒", "大寒", "立春", "雨水", "惊蛰", "春分", "清明", "谷雨", "立夏", "小满", "芒种", "夏至",
    "小暑", "大暑", "立秋", "处暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪", "冬至",
];

impl SolarTerm {
    /// 0-based index (小寒=0 .. 冬至=23).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Chinese name.
    pub fn name(self) -> &'static str {
        SOLAR_TERM_NAMES[self.index() as usize]
    }

    /// Apparent solar longitude at which the term begins, degrees.
    pub fn longitude_deg(self) -> f64 {
        ((285 + 15 * self.index() as u32) % 360) as f64
    }

    /// Principal terms (中气) sit on multiples of 30°; the rest are 节.
    pub fn is_principal(self) -> bool {
        self.index() % 2 == 1
    }

    /// Term from its 0-based index, wrapping modulo 24.
    pub fn from_index(i: usize) -> Self {
        ALL_SOLAR_TERMS[i % 24]
    }
}

impl Serialize for SolarTerm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Wrap an angle difference into (-180, 180].
pub fn normalize_to_pm180(deg: f64) -> f64 {
    let mut d = deg.rem_euclid(360.0);
    if d > 180.0 {
        d -= 360.0;
    }
    d
}

/// Apparent geocentric ecliptic longitude of the Sun, degrees in [0, 360).
///
/// `jde` is a Julian Ephemeris Day (TT).
pub fn sun_apparent_longitude_deg(jde: f64) -> f64 {
    let t = jd_to_centuries(jde);
    let l0 = 280.46646 + 36_000.76983 * t + 0.000_303_2 * t * t;
    let m = (357.52911 + 35_999.05029 * t - 0.000_153_7 * t * t).to_radians();
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();
    let omega = (125.04 - 1934.136 * t).to_radians();
    (l0 + c - 0.00569 - 0.00478 * omega.sin()).rem_euclid(360.0)
}

/// Apparent solar longitude at a Universal Time JD.
pub fn sun_longitude_at_ut(jd_ut: f64) -> f64 {
    sun_apparent_longitude_deg(ut_to_tt(jd_ut))
}

/// TT instant at which the Sun reaches `term` in Gregorian `year`.
///
/// Terms are indexed from 小寒 (early January), so every term of a given
/// year falls inside that calendar year.
pub fn solar_term_jde(year: i32, term: SolarTerm) -> f64 {
    let target = term.longitude_deg();
    let mut jd = calendar_to_jd(year, 1, 6.0) + term.index() as f64 * TROPICAL_YEAR_DAYS / 24.0;
    for _ in 0..MAX_TERM_ITERATIONS {
        let d = normalize_to_pm180(target - sun_apparent_longitude_deg(jd));
        jd += d * TROPICAL_YEAR_DAYS / 360.0;
        if d.abs() < TERM_TOLERANCE_DEG {
            break;
        }
    }
    jd
}

/// UT instant of a solar term.
pub fn solar_term_ut(year: i32, term: SolarTerm) -> f64 {
    tt_to_ut(solar_term_jde(year, term))
}
