//! Convenience wrapper for the xuanji chart engines.
//!
//! One birth input, one config, one call per chart. Callers need not resolve
//! time zones, convert solar and lunar dates, or pick double-hours.
//!
//! # Quick start
//!
//! ```rust
//! use xuanji_rs::*;
//!
//! let input = BirthInput::solar(1990, 5, 15, 14, 30, Gender::Male);
//! let config = ChartConfig::default();
//!
//! let chart = ziwei(&input, &config).unwrap();
//! assert_eq!(chart.lunar_date, "庚午年 四月廿一");
//!
//! let pillars = bazi(&input, &config).unwrap().pillars;
//! assert_eq!(pillars.day.ganzhi.name(), "庚辰");
//! ```

pub mod config;
pub mod convenience;
pub mod error;
pub mod input;

pub use config::ChartConfig;
pub use convenience::{LunarInfo, bazi, lunar, yongshen, ziwei};
pub use error::XuanjiError;
pub use input::{BirthInput, ResolvedBirth};

// Re-export the types callers meet in results.
pub use xuanji_base::{ALL_BRANCHES, Branch, Element, GanZhi, Gender, Stem, TenGod};
pub use xuanji_bazi::{BaziChart, BaziConfig, FourPillars, YongshenResult};
pub use xuanji_time::{CivilDateTime, LunarDate, UtcOffset};
pub use xuanji_ziwei::{DecadeOverlay, LeapMonthPolicy, YearlyOverlay, ZiweiChart, ZiweiConfig};
