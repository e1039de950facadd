//! Options shared by every chart function.

use xuanji_bazi::{BaziConfig, DEFAULT_PERIOD_COUNT, PillarConfig};
use xuanji_ziwei::{LeapMonthPolicy, ZiweiConfig};

/// Chart options.
///
/// Defaults: a leap month counts as the month it repeats, BaZi times from
/// 23:00 belong to the next day, and 8 major periods are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartConfig {
    pub leap_month_policy: LeapMonthPolicy,
    pub late_zi_next_day: bool,
    pub major_period_count: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            leap_month_policy: LeapMonthPolicy::SameMonth,
            late_zi_next_day: true,
            major_period_count: DEFAULT_PERIOD_COUNT,
        }
    }
}

impl ChartConfig {
    pub fn ziwei(&self) -> ZiweiConfig {
        ZiweiConfig {
            leap_month_policy: self.leap_month_policy,
        }
    }

    pub fn bazi(&self) -> BaziConfig {
        BaziConfig {
            pillars: PillarConfig {
                late_zi_next_day: self.late_zi_next_day,
            },
            major_period_count: self.major_period_count,
        }
    }
}
