//! Decade and yearly overlays.
//!
//! An overlay relabels the twelve palaces around a moving anchor without
//! touching the chart: the selected decade palace becomes 大命, the palace
//! of the year's branch becomes 流命, and the rest follow counter-clockwise
//! in the natal order.

use serde::Serialize;
use xuanji_base::{Branch, GanZhi};

use crate::chart::ZiweiChart;
use crate::decade::DecadeRange;
use crate::error::ZiweiError;

pub const DECADE_LABELS: [&str; 12] = [
    "大命", "大兄", "大夫", "大子", "大财", "大疾", "大迁", "大友", "大官", "大田", "大福", "大父",
];

pub const YEARLY_LABELS: [&str; 12] = [
    "流命", "流兄", "流夫", "流子", "流财", "流疾", "流迁", "流友", "流官", "流田", "流福", "流父",
];

fn labels_around(anchor: Branch, table: &[&'static str; 12]) -> [&'static str; 12] {
    std::array::from_fn(|b| table[(anchor.index() as usize + 12 - b) % 12])
}

/// One calendar year inside a decade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearAge {
    pub year: i32,
    pub age: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecadeOverlay {
    /// Position in decade order (0 = first decade).
    pub decade_index: u8,
    pub anchor: Branch,
    pub range: DecadeRange,
    /// Labels indexed by branch.
    pub labels: [&'static str; 12],
    /// Gregorian years covered, by nominal age.
    pub years: Vec<YearAge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyOverlay {
    pub year: i32,
    /// Nominal age (虚岁); zero or negative before birth.
    pub age: i32,
    pub ganzhi: GanZhi,
    pub anchor: Branch,
    /// Labels indexed by branch.
    pub labels: [&'static str; 12],
}

impl ZiweiChart {
    /// Overlay for the `k`-th decade (0..12).
    pub fn decade_overlay(&self, k: usize) -> Result<DecadeOverlay, ZiweiError> {
        let idx = *self
            .decade_order
            .get(k)
            .ok_or_else(|| ZiweiError::InvalidInput(format!("decade {k}")))?;
        let palace = &self.palaces[idx];
        let birth_year = self.lunar.year;
        let years = (palace.decade.start..=palace.decade.end)
            .map(|age| YearAge {
                year: birth_year + age as i32 - 1,
                age: age as u32,
            })
            .collect();
        Ok(DecadeOverlay {
            decade_index: palace.decade_index,
            anchor: palace.branch,
            range: palace.decade,
            labels: labels_around(palace.branch, &DECADE_LABELS),
            years,
        })
    }

    /// Overlay for a Gregorian year.
    pub fn yearly_overlay(&self, year: i32) -> YearlyOverlay {
        let ganzhi = GanZhi::of_year(year);
        let anchor = ganzhi.branch();
        YearlyOverlay {
            year,
            age: year - self.lunar.year + 1,
            ganzhi,
            anchor,
            labels: labels_around(anchor, &YEARLY_LABELS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ZiweiConfig;
    use xuanji_base::Gender;
    use xuanji_time::LunarDate;

    fn chart() -> ZiweiChart {
        ZiweiChart::compute(
            LunarDate::new(1990, 4, 21, false),
            7,
            Gender::Male,
            &ZiweiConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn first_decade_matches_life() {
        let c = chart();
        let o = c.decade_overlay(0).unwrap();
        assert_eq!(o.anchor, c.life_branch);
        assert_eq!(o.labels[c.life_branch.index() as usize], "大命");
        assert_eq!(o.range.to_string(), "5-14");
        assert_eq!(o.years.first(), Some(&YearAge { year: 1994, age: 5 }));
        assert_eq!(o.years.len(), 10);
        assert!(c.decade_overlay(12).is_err());
    }

    #[test]
    fn yearly_anchor() {
        let c = chart();
        let o = c.yearly_overlay(2024);
        assert_eq!(o.anchor, Branch::Chen);
        assert_eq!(o.age, 35);
        assert_eq!(o.labels[Branch::Chen.index() as usize], "流命");
        assert_eq!(o.labels[Branch::Mao.index() as usize], "流兄");
        assert_eq!(o.labels[Branch::Si.index() as usize], "流父");
    }

    #[test]
    fn overlays_leave_chart_untouched() {
        let c = chart();
        let before = c.clone();
        let _ = c.decade_overlay(3).unwrap();
        let _ = c.yearly_overlay(2030);
        assert_eq!(c, before);
    }
}
