//! Symbolic vocabulary shared by the Zi Wei and BaZi engines.
//!
//! This crate provides:
//! - Heavenly stems, earthly branches, five elements, polarity and seasons
//! - Gender and the 阳男阴女 direction rule
//! - The sexagenary cycle (`GanZhi`) with its na-yin sounds
//! - Hidden stems of each branch with strength and weight
//! - Ten-god labelling relative to a day master
//! - Stem and branch interaction tables (合 冲 破 害 刑 三合 方会 禄 库)
//!
//! All tables are `const` data; every function is pure.

pub mod element;
pub mod error;
pub mod gender;
pub mod ganzhi;
pub mod hidden;
pub mod relations;
pub mod stem_branch;
pub mod ten_god;

pub use element::{ALL_ELEMENTS, ALL_SEASONS, Element, Polarity, Season};
pub use error::BaseError;
pub use gender::Gender;
pub use ganzhi::{GanZhi, NaYin};
pub use hidden::{HiddenStem, HiddenTier, hidden_stems};
pub use relations::{
    CLASHES, DESTRUCTIONS, DIRECTIONAL_ASSEMBLIES, HARMS, PUNISHMENTS, PunishmentGroup,
    SIX_HARMONIES, STEM_COMBINATIONS, STORAGE_BRANCHES, TRIPLE_HARMONIES, is_clash,
    is_destruction, is_harm, is_storage, lu_branch, root_branches, six_harmony,
    stem_combination, stem_combination_partner,
};
pub use stem_branch::{ALL_BRANCHES, ALL_STEMS, Branch, Stem};
pub use ten_god::{ALL_TEN_GODS, Nature, TenGod, ten_god};
