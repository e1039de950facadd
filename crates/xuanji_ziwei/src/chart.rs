//! Full chart assembly.
//!
//! Order of work: life/body palaces, bureau, palace stems and decades, star
//! placement, palace self-hua, then the birth-year summary. The finished
//! chart is plain data and is never mutated afterwards.

use serde::Serialize;
use xuanji_base::{Branch, GanZhi, Gender, Stem};
use xuanji_time::LunarDate;

use crate::bureau::Bureau;
use crate::decade::{decade_order, decade_table};
use crate::error::ZiweiError;
use crate::palace::{LeapMonthPolicy, Palace, PalaceBoard, locate_life_body, ming_zhu, shen_zhu};
use crate::placement::{PlacementInput, place_stars};
use crate::sihua::{SihuaInfo, apply_self_hua, sihua_info};
use crate::star::StarName;

/// Chart options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZiweiConfig {
    /// How a birth in an intercalary month is counted. Default: same month.
    pub leap_month_policy: LeapMonthPolicy,
}

/// A complete Zi Wei Dou Shu chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZiweiChart {
    /// Palaces indexed by branch (子 = 0).
    pub palaces: [Palace; 12],
    /// Indices into `palaces` in decade order.
    pub decade_order: [usize; 12],
    pub lunar: LunarDate,
    /// E.g. `庚午年 四月廿一`.
    pub lunar_date: String,
    pub hour_index: u8,
    /// Lunar month used for placement after the leap-month policy.
    pub placement_month: u8,
    pub bureau: Bureau,
    pub ming_zhu: StarName,
    pub shen_zhu: StarName,
    pub gender: Gender,
    pub year_ganzhi: GanZhi,
    pub year_stem: Stem,
    pub year_branch: Branch,
    pub life_branch: Branch,
    pub body_branch: Branch,
    pub sihua_info: [SihuaInfo; 4],
    pub warnings: Vec<String>,
}

impl ZiweiChart {
    /// Build a chart from a lunar birth date and double-hour index (0..=11).
    pub fn compute(
        lunar: LunarDate,
        hour_index: u8,
        gender: Gender,
        config: &ZiweiConfig,
    ) -> Result<Self, ZiweiError> {
        let year_ganzhi = GanZhi::of_year(lunar.year);
        let year_stem = year_ganzhi.stem();
        let year_branch = year_ganzhi.branch();
        let month = config.leap_month_policy.effective_month(&lunar);

        if !(1..=30).contains(&lunar.day) {
            return Err(ZiweiError::InvalidInput(format!("lunar day {}", lunar.day)));
        }
        let (life, body) = locate_life_body(month, hour_index)?;
        let bureau = Bureau::resolve(year_stem, life)?;
        log::debug!(
            "ziwei {}: life {} body {} {}",
            year_ganzhi,
            life.name(),
            body.name(),
            bureau.name()
        );

        let forward = gender.is_forward(year_stem);
        let decades = decade_table(bureau, forward, life);
        let mut board = PalaceBoard::new(year_stem, life, body, &decades);

        let placement = place_stars(&PlacementInput {
            bureau,
            lunar_day: lunar.day,
            lunar_month: month,
            hour_index,
            year_stem,
            year_branch,
        });
        for (palace, stars) in board.palaces.iter_mut().zip(placement.stars) {
            palace.stars = stars;
        }
        apply_self_hua(&mut board)?;
        let sihua_info = sihua_info(&board, year_stem);
        let palaces = board.into_palaces();

        Ok(Self {
            decade_order: decade_order(&palaces),
            palaces,
            lunar,
            lunar_date: format!("{year_ganzhi}年 {}", lunar.month_day_zh()),
            hour_index,
            placement_month: month,
            bureau,
            ming_zhu: ming_zhu(life),
            shen_zhu: shen_zhu(year_branch),
            gender,
            year_ganzhi,
            year_stem,
            year_branch,
            life_branch: life,
            body_branch: body,
            sihua_info,
            warnings: placement.warnings,
        })
    }

    pub fn palace(&self, branch: Branch) -> &Palace {
        &self.palaces[branch.index() as usize]
    }

    pub fn life_palace(&self) -> &Palace {
        self.palace(self.life_branch)
    }

    pub fn body_palace(&self) -> &Palace {
        self.palace(self.body_branch)
    }

    /// Palace opposite `branch` (对宫).
    pub fn opposite(&self, branch: Branch) -> &Palace {
        self.palace(branch.opposite())
    }

    /// Palaces in decade order.
    pub fn decade_palaces(&self) -> impl Iterator<Item = &Palace> {
        self.decade_order.iter().map(|&i| &self.palaces[i])
    }

    /// Palace whose decade covers the nominal age, if any.
    pub fn decade_for_age(&self, age: u32) -> Option<&Palace> {
        self.decade_palaces().find(|p| p.decade.contains(age))
    }

    /// Palace holding `star`, if placed.
    pub fn star_palace(&self, star: StarName) -> Option<&Palace> {
        self.palaces.iter().find(|p| p.has_star(star))
    }

    pub fn lai_yin_palaces(&self) -> impl Iterator<Item = &Palace> {
        self.palaces.iter().filter(|p| p.is_lai_yin)
    }
}
