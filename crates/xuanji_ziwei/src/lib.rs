//! Zi Wei Dou Shu (紫微斗数) natal chart.
//!
//! This crate provides:
//! - Five-elements bureau resolution from year stem and life palace
//! - Life/body palace location, palace names and five-tiger palace stems
//! - Placement of 32 stars with brightness
//! - Birth-year sihua markers and palace self-hua tags
//! - Decade sequencing and decade/yearly overlays
//!
//! Input is a lunar date (see `xuanji_time`) and a double-hour index.
//! Computation is pure; tables are `const` data.

pub mod bureau;
pub mod chart;
pub mod decade;
pub mod error;
pub mod overlay;
pub mod palace;
pub mod placement;
pub mod sihua;
pub mod star;

pub use bureau::{ALL_BUREAUS, Bureau};
pub use chart::{ZiweiChart, ZiweiConfig};
pub use decade::{DecadeRange, decade_index, decade_order, decade_range};
pub use error::ZiweiError;
pub use overlay::{DECADE_LABELS, DecadeOverlay, YEARLY_LABELS, YearAge, YearlyOverlay};
pub use palace::{
    ALL_PALACE_NAMES, LeapMonthPolicy, Palace, PalaceBoard, PalaceName, StarData,
    locate_life_body, ming_zhu, palace_stems, shen_zhu, tiger_stem,
};
pub use placement::{PlacementInput, StarPlacement, place_stars, tianfu_branch, ziwei_branch};
pub use sihua::{ALL_SIHUA, SelfHua, SihuaInfo, SihuaKind, apply_self_hua, sihua_info, sihua_of, sihua_stars};
pub use star::{ALL_STARS, Brightness, StarName, StarType, brightness};
