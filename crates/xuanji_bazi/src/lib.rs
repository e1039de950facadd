//! BaZi (八字) four-pillar charts.
//!
//! This crate provides:
//! - Year, month, day and hour pillars from a civil birth time
//! - Ten-god relationships with strengths, summary and patterns
//! - Structural factors: stem combinations and branch interactions
//! - Major periods (大运) with year analysis and transitions
//! - Na-yin compatibility and seasonal strength
//! - Auxiliary stars (神煞) and day-master strength (旺衰)
//! - The yongshen agent with climate adjustment, grading and a mermaid diagram
//!
//! Year and month boundaries come from the analytic solar-term model in
//! `xuanji_time`. Everything else is table arithmetic.

pub mod chart;
pub mod error;
pub mod major_period;
pub mod nayin;
pub mod pillars;
pub mod shensha;
pub mod strength;
pub mod structure;
pub mod ten_gods;
pub mod yongshen;

pub use chart::{BaziChart, BaziConfig};
pub use error::BaziError;
pub use major_period::{
    DEFAULT_PERIOD_COUNT, MAX_PERIOD_COUNT, MajorPeriod, MajorPeriods, PeriodYear, Relationship,
    Significance, Transition, analyze_year, major_periods, start_age,
};
pub use nayin::{NaYinCompatibility, NaYinInfo, NaYinStrength, SeasonalLevel};
pub use pillars::{
    ALL_PILLAR_SLOTS, FourPillars, PerElement, Pillar, PillarConfig, PillarSlot, four_pillars,
};
pub use shensha::{
    ALL_SHENSHA, ShenSha, ShenShaCategory, ShenShaHit, ShenShaReport, StarTally, detect_shensha,
    period_shensha, void_branches,
};
pub use strength::{
    Balance, BalanceLevel, DayMasterStrength, ElementScore, StrengthAnalysis, StrengthLevel,
    analyze_strength,
};
pub use structure::{
    StructuralFactors, StructuralRelations, WorkflowEdge, detect_relations, workflow_edges,
};
pub use ten_gods::{TenGodAnalysis, TenGodPattern, TenGodRelationship, analyze_ten_gods};
pub use yongshen::{
    Blocker, Grade, Tiaohou, YongshenPayload, YongshenResult, assess_tiaohou,
    evaluate_compatibility, render_mermaid, run_yongshen_agent, summary_line,
};
