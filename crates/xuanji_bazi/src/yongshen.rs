//! Yongshen (用神) agent.
//!
//! The agent works in three layers:
//! - **A, 做功**: the useful god, what blocks the chain toward the endpoint,
//!   and the four-rule check.
//! - **B, 调候**: climate adjustment from the month branch.
//! - **C, fit and grade**: how well A and B agree.
//!
//! Everything is structured data. [`render_mermaid`], [`YongshenResult::stream_lines`]
//! and [`summary_line`] turn a result into text.

use std::fmt::{self, Display};

use serde::{Serialize, Serializer};
use xuanji_base::{Branch, Element, Season, Stem, TenGod, hidden_stems};

use crate::pillars::{FourPillars, PerElement};
use crate::structure::{
    KEY_CHAIN_NODE, StructuralFactors, StructuralRelations, WorkflowEdge, detect_relations,
    workflow_edges,
};
use crate::ten_gods::{TargetType, TenGodAnalysis};

/// Chain the agent protects: water feeding wood.
pub const DEFAULT_KEY_CHAIN: &str = "水→木";

const COMPATIBILITY_NOTES: &str = "根据月令与调候方向的基础匹配结果，可在调用层追加更细的冲突矩阵。";

macro_rules! named_enum_serialize {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str(self.name())
                }
            }
        )*
    };
}

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TiaohouDirection {
    /// 火暖
    FireWarmth,
    /// 水润
    WaterMoisture,
    /// 燥化
    Drying,
    /// 湿化
    Moistening,
}

impl TiaohouDirection {
    pub const fn name(self) -> &'static str {
        match self {
            Self::FireWarmth => "火暖",
            Self::WaterMoisture => "水润",
            Self::Drying => "燥化",
            Self::Moistening => "湿化",
        }
    }
}

/// Effect of climate adjustment on the key chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainImpact {
    Enable,
    Boost,
    Neutral,
    Impair,
}

impl ChainImpact {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Boost => "boost",
            Self::Neutral => "neutral",
            Self::Impair => "impair",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compatibility {
    Match,
    Partial,
    Mismatch,
}

impl Compatibility {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::Partial => "partial",
            Self::Mismatch => "mismatch",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    High,
    Medium,
    Limited,
}

impl Grade {
    pub const fn name(self) -> &'static str {
        match self {
            Self::High => "高",
            Self::Medium => "中",
            Self::Limited => "受限",
        }
    }
}

/// Where the 做功 chain ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Wealth,
    Officer,
    Killings,
}

impl Endpoint {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wealth => "财",
            Self::Officer => "官",
            Self::Killings => "杀",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Blocker {
    /// 枭克食: a resource star attacks the eating god.
    ResourceOverOutput,
    /// 劫夺财: 劫财 robs the wealth.
    RobbedWealth,
    /// 财入辰库: wealth sealed in a storage branch.
    WealthInStorage,
}

impl Blocker {
    pub const fn name(self) -> &'static str {
        match self {
            Self::ResourceOverOutput => "枭克食",
            Self::RobbedWealth => "劫夺财",
            Self::WealthInStorage => "财入辰库",
        }
    }
}

/// Unfavourable gods (忌神) the useful god has to restrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Jishen {
    /// 枭
    Resource,
    /// 劫
    Rob,
}

impl Jishen {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Resource => "枭",
            Self::Rob => "劫",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColdHot {
    Cold,
    Hot,
    Mild,
}

impl ColdHot {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cold => "寒",
            Self::Hot => "热",
            Self::Mild => "温",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WetDry {
    Wet,
    Dry,
    Even,
}

impl WetDry {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wet => "湿",
            Self::Dry => "燥",
            Self::Even => "平",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverallBias {
    Cold,
    Hot,
    Balanced,
}

impl OverallBias {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cold => "偏寒",
            Self::Hot => "偏热",
            Self::Balanced => "中和",
        }
    }
}

named_enum_serialize!(
    TiaohouDirection,
    ChainImpact,
    Compatibility,
    Grade,
    Endpoint,
    Blocker,
    Jishen,
    ColdHot,
    WetDry,
    OverallBias,
);

/// The concrete useful god: a stem when one carries the element, otherwise
/// a branch, otherwise the bare element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YongshenSymbol {
    Stem(Stem),
    Branch(Branch),
    Element(Element),
}

impl YongshenSymbol {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Stem(s) => s.name(),
            Self::Branch(b) => b.name(),
            Self::Element(e) => e.name(),
        }
    }
}

impl Display for YongshenSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for YongshenSymbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Evidence
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StemGod {
    pub stem: Stem,
    pub god: TenGod,
}

/// Ten god of a hidden stem, with the branch hosting it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HiddenGod {
    pub host: Branch,
    pub stem: Stem,
    pub god: TenGod,
    pub weight: f64,
}

/// Branches in which a ten god takes root through a hidden stem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rooting {
    pub ten_god: TenGod,
    pub branches: Vec<Branch>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Environment {
    pub cold_hot: ColdHot,
    pub wet_dry: WetDry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformationCandidate {
    pub pattern: String,
    pub valid: bool,
    pub reason: &'static str,
}

/// Facts the agent reasons over, derived once from the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YongshenEvidence {
    pub month_branch: Branch,
    pub day_master: Stem,
    pub by_stem: Vec<StemGod>,
    pub by_hidden: Vec<HiddenGod>,
    pub rooting: Vec<Rooting>,
    pub seasonal_support: PerElement<f64>,
    pub overall_bias: OverallBias,
    pub relations: StructuralRelations,
    pub transformation_candidates: Vec<TransformationCandidate>,
    pub environment: Environment,
}

/// Seasonal push each element receives, in 木 火 土 金 水 order.
pub const fn seasonal_support(season: Season) -> PerElement<f64> {
    PerElement::new(match season {
        Season::Spring => [0.5, 0.3, -0.2, -0.3, 0.2],
        Season::Summer => [0.1, 0.5, 0.2, -0.2, -0.4],
        Season::Autumn => [-0.3, -0.2, 0.1, 0.5, 0.3],
        Season::Winter => [0.2, -0.3, -0.2, 0.1, 0.5],
        Season::EarthMonth => [-0.2, -0.2, 0.4, 0.1, 0.1],
    })
}

pub fn derive_evidence(pillars: &FourPillars, ten_gods: &TenGodAnalysis) -> YongshenEvidence {
    let relations = detect_relations(pillars);
    let season = pillars.season();
    let month_branch = pillars.month.branch;

    let mut by_stem: Vec<StemGod> = Vec::new();
    let mut by_hidden = Vec::new();
    let mut rooting: Vec<Rooting> = Vec::new();
    for rel in &ten_gods.relationships {
        let host = pillars.get(rel.pillar).branch;
        match rel.target_type {
            TargetType::Stem => {
                if !by_stem.iter().any(|s| s.stem == rel.target) {
                    by_stem.push(StemGod {
                        stem: rel.target,
                        god: rel.ten_god,
                    });
                }
            }
            TargetType::HiddenStem => {
                if let Some(h) = hidden_stems(host).iter().find(|h| h.stem == rel.target) {
                    by_hidden.push(HiddenGod {
                        host,
                        stem: h.stem,
                        god: rel.ten_god,
                        weight: h.weight,
                    });
                }
                match rooting.iter_mut().find(|r| r.ten_god == rel.ten_god) {
                    Some(r) if !r.branches.contains(&host) => r.branches.push(host),
                    Some(_) => {}
                    None => rooting.push(Rooting {
                        ten_god: rel.ten_god,
                        branches: vec![host],
                    }),
                }
            }
        }
    }

    let transformation_candidates = relations
        .stem_combinations
        .iter()
        .map(|c| TransformationCandidate {
            pattern: format!("{}{}合{}", c.a.name(), c.b.name(), c.element.name()),
            valid: c.formed,
            reason: if c.formed {
                "合化条件基本具备"
            } else {
                "合化条件欠缺"
            },
        })
        .collect();

    let (cold_hot, overall_bias) = match season {
        Season::Winter => (ColdHot::Cold, OverallBias::Cold),
        Season::Summer => (ColdHot::Hot, OverallBias::Hot),
        _ => (ColdHot::Mild, OverallBias::Balanced),
    };
    let wet_dry = if xuanji_base::is_storage(month_branch) {
        WetDry::Wet
    } else {
        WetDry::Even
    };

    YongshenEvidence {
        month_branch,
        day_master: pillars.day_master(),
        by_stem,
        by_hidden,
        rooting,
        seasonal_support: seasonal_support(season),
        overall_bias,
        relations,
        transformation_candidates,
        environment: Environment { cold_hot, wet_dry },
    }
}

// ---------------------------------------------------------------------------
// Layer B: 调候
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tiaohou {
    pub month_branch: Branch,
    pub need: bool,
    pub direction: Vec<TiaohouDirection>,
    pub why: &'static str,
    pub impact_on_chain: ChainImpact,
    pub conflict_with_yongshen: bool,
}

impl Tiaohou {
    /// Directions joined with `/`, or `None` when there are none.
    pub fn direction_text(&self) -> Option<String> {
        if self.direction.is_empty() {
            return None;
        }
        Some(
            self.direction
                .iter()
                .map(|d| d.name())
                .collect::<Vec<_>>()
                .join("/"),
        )
    }
}

/// Climate adjustment for a month branch. `key_chain` names the chain the
/// adjustment should unlock, e.g. `水→木`.
pub fn assess_tiaohou(month: Branch, key_chain: Option<&str>) -> Tiaohou {
    use Branch::*;
    let water_to_wood = key_chain.is_some_and(|k| k.contains(DEFAULT_KEY_CHAIN));
    let (need, direction, why, impact) = match month {
        Hai | Zi | Chou if water_to_wood => (
            true,
            vec![TiaohouDirection::FireWarmth],
            "冬水不生木，先火暖后水生木",
            ChainImpact::Enable,
        ),
        Hai | Zi | Chou => (
            true,
            vec![TiaohouDirection::FireWarmth],
            "冬月偏寒，火暖助生化",
            ChainImpact::Boost,
        ),
        Si | Wu | Wei => (
            true,
            vec![TiaohouDirection::WaterMoisture],
            "夏月火盛，需水润降伏以成其功",
            ChainImpact::Boost,
        ),
        Yin => (
            true,
            vec![TiaohouDirection::FireWarmth],
            "寅月初春寒犹在，需火暖以发木",
            if water_to_wood {
                ChainImpact::Enable
            } else {
                ChainImpact::Boost
            },
        ),
        _ => (false, Vec::new(), "平月通常不需调候", ChainImpact::Neutral),
    };
    Tiaohou {
        month_branch: month,
        need,
        direction,
        why,
        impact_on_chain: impact,
        conflict_with_yongshen: false,
    }
}

// ---------------------------------------------------------------------------
// Layer C: fit and grade
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FitAndGrade {
    pub compatibility: Compatibility,
    pub grade: Grade,
    pub notes: &'static str,
}

pub fn evaluate_compatibility(yongshen_element: Option<Element>, tiaohou: &Tiaohou) -> FitAndGrade {
    use Branch::*;
    let has = |d: TiaohouDirection| tiaohou.direction.contains(&d);
    let month = tiaohou.month_branch;

    let mut compatibility = Compatibility::Partial;
    let mut grade = Grade::Medium;
    let matched = !tiaohou.need
        || (has(TiaohouDirection::FireWarmth) && matches!(month, Hai | Zi | Chou | Yin))
        || (has(TiaohouDirection::WaterMoisture) && matches!(month, Si | Wu | Wei));
    if matched {
        compatibility = Compatibility::Match;
        grade = Grade::High;
    }

    if yongshen_element == Some(Element::Water) && has(TiaohouDirection::Drying) {
        compatibility = Compatibility::Mismatch;
        grade = Grade::Limited;
    }
    if yongshen_element == Some(Element::Fire)
        && has(TiaohouDirection::WaterMoisture)
        && month == Zi
    {
        if compatibility == Compatibility::Match {
            compatibility = Compatibility::Partial;
        }
        if grade == Grade::High {
            grade = Grade::Medium;
        }
    }

    FitAndGrade {
        compatibility,
        grade,
        notes: COMPATIBILITY_NOTES,
    }
}

// ---------------------------------------------------------------------------
// Layer A and assembly
// ---------------------------------------------------------------------------

/// 官不伤, 杀有制, 食不被枭, 财不被劫.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FourRules {
    pub guan_not_damaged: bool,
    pub sha_has_control: bool,
    pub shi_not_by_xiao: bool,
    pub cai_not_by_jie: bool,
}

impl Default for FourRules {
    fn default() -> Self {
        Self {
            guan_not_damaged: true,
            sha_has_control: true,
            shi_not_by_xiao: true,
            cai_not_by_jie: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoGong {
    pub endpoint: Endpoint,
    pub candidate_scope: Vec<String>,
    pub blockers: Vec<Blocker>,
    pub yongshen: YongshenSymbol,
    pub yongshen_element: Option<Element>,
    pub jishen: Vec<Jishen>,
    pub reasoning: String,
    pub four_rules_check: FourRules,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workflow {
    pub steps: Vec<String>,
    pub edges: Vec<WorkflowEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YongshenPayload {
    pub layer_a_do_gong: DoGong,
    pub layer_b_tiaohou: Tiaohou,
    pub layer_c_fit_and_grade: FitAndGrade,
    pub structural_factors: StructuralFactors,
    pub workflow: Workflow,
}

/// Decisions supplied by the caller; the rest is derived from evidence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub endpoint: Endpoint,
    pub yongshen: YongshenSymbol,
    pub yongshen_element: Option<Element>,
    pub jishen: Vec<Jishen>,
    pub blockers: Vec<Blocker>,
    pub reasoning: String,
    pub candidate_scope: Vec<String>,
    pub key_chain_hint: Option<String>,
    pub four_rules: FourRules,
}

fn join_names<T, F: Fn(&T) -> &'static str>(items: &[T], sep: &str, name: F) -> String {
    items.iter().map(name).collect::<Vec<_>>().join(sep)
}

/// Assemble the three layers, factor strings and workflow from evidence.
pub fn build_output(evidence: &YongshenEvidence, opts: BuildOptions) -> YongshenPayload {
    let tiaohou = assess_tiaohou(evidence.month_branch, opts.key_chain_hint.as_deref());
    let fit = evaluate_compatibility(opts.yongshen_element, &tiaohou);

    let steps = vec![
        "体→用主线".to_string(),
        format!(
            "标注阻断: {}",
            join_names(&opts.blockers, "；", |b| b.name())
        ),
        format!("用神介入: {}（制/生）", opts.yongshen),
        match tiaohou.direction_text() {
            Some(dirs) if tiaohou.need => format!("调候: {dirs}（{}）", tiaohou.why),
            _ => "调候: 不需要".to_string(),
        },
    ];

    YongshenPayload {
        layer_a_do_gong: DoGong {
            endpoint: opts.endpoint,
            candidate_scope: opts.candidate_scope,
            blockers: opts.blockers,
            yongshen: opts.yongshen,
            yongshen_element: opts.yongshen_element,
            jishen: opts.jishen,
            reasoning: opts.reasoning,
            four_rules_check: opts.four_rules,
        },
        layer_b_tiaohou: tiaohou,
        layer_c_fit_and_grade: fit,
        structural_factors: StructuralFactors::from_relations(&evidence.relations),
        workflow: Workflow {
            steps,
            edges: workflow_edges(&evidence.relations),
        },
    }
}

// ---------------------------------------------------------------------------
// Agent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YongshenResult {
    pub evidence: YongshenEvidence,
    pub payload: YongshenPayload,
    pub mermaid: String,
    pub stream_lines: Vec<String>,
}

impl YongshenResult {
    pub fn summary_line(&self) -> String {
        summary_line(&self.payload)
    }
}

fn pick_yongshen(element: Element, pillars: &FourPillars) -> YongshenSymbol {
    let dm = pillars.day_master();
    for p in pillars.pillars() {
        let candidates = std::iter::once(p.stem).chain(p.hidden_stems.iter().map(|h| h.stem));
        if let Some(s) = candidates
            .filter(|&s| s != dm)
            .find(|s| s.element() == element)
        {
            return YongshenSymbol::Stem(s);
        }
    }
    pillars
        .branches()
        .into_iter()
        .find(|b| b.element() == element)
        .map_or(YongshenSymbol::Element(element), YongshenSymbol::Branch)
}

fn detect_blockers(ten_gods: &TenGodAnalysis, relations: &StructuralRelations, element: Element) -> Vec<Blocker> {
    let count = &ten_gods.summary.count;
    let mut blockers = Vec::new();
    if count.get(TenGod::IndirectResource) + count.get(TenGod::DirectResource) > 0 {
        blockers.push(Blocker::ResourceOverOutput);
    }
    if count.get(TenGod::RobWealth) > 0 {
        blockers.push(Blocker::RobbedWealth);
    }
    if !relations.lu_mu_ku.ku.is_empty() && matches!(element, Element::Water | Element::Metal) {
        blockers.push(Blocker::WealthInStorage);
    }
    blockers
}

fn derive_jishen(ten_gods: &TenGodAnalysis) -> Vec<Jishen> {
    let count = &ten_gods.summary.count;
    let mut out = Vec::new();
    if count.get(TenGod::IndirectResource) + count.get(TenGod::DirectResource) > 0 {
        out.push(Jishen::Resource);
    }
    if count.get(TenGod::RobWealth) > 0 {
        out.push(Jishen::Rob);
    }
    out
}

fn reasoning(
    yongshen: YongshenSymbol,
    element: Element,
    month_element: Element,
    blockers: &[Blocker],
    relations: &StructuralRelations,
) -> String {
    let mut parts: Vec<String> = Vec::new();
    if blockers.contains(&Blocker::ResourceOverOutput) {
        parts.push("先制枭复原食神链路".into());
    }
    if blockers.contains(&Blocker::RobbedWealth) {
        parts.push("再护财路避免劫夺".into());
    }
    if month_element == Element::Water && element == Element::Fire {
        parts.push("冬水不生木需火暖".into());
    }
    if relations.has_formed_triple() {
        parts.push("三合局提供背书".into());
    }
    parts.push(format!("以{}({})作用神贯通制化", yongshen, element.name()));
    parts.join("；")
}

fn candidate_scope(pillars: &FourPillars, ten_gods: &TenGodAnalysis) -> Vec<String> {
    let stems = pillars.pillars().into_iter().flat_map(|p| {
        std::iter::once(p.stem.name()).chain(p.hidden_stems.iter().map(|h| h.stem.name()))
    });
    let branches = pillars.branches().into_iter().map(Branch::name);
    let elements = ten_gods.relationships.iter().map(|r| r.element.name());
    let mut scope: Vec<String> = Vec::new();
    for name in stems.chain(branches).chain(elements) {
        if !scope.iter().any(|s| s == name) {
            scope.push(name.to_string());
        }
    }
    scope
}

/// Run the agent over a chart and its ten-god analysis.
pub fn run_yongshen_agent(pillars: &FourPillars, ten_gods: &TenGodAnalysis) -> YongshenResult {
    let evidence = derive_evidence(pillars, ten_gods);
    let element = pillars.element_count().min_element();
    let yongshen = pick_yongshen(element, pillars);
    let blockers = detect_blockers(ten_gods, &evidence.relations, element);
    let jishen = derive_jishen(ten_gods);
    let reasoning = reasoning(
        yongshen,
        element,
        pillars.month_order(),
        &blockers,
        &evidence.relations,
    );
    let four_rules = FourRules {
        cai_not_by_jie: !blockers.contains(&Blocker::RobbedWealth),
        ..FourRules::default()
    };

    let payload = build_output(
        &evidence,
        BuildOptions {
            endpoint: Endpoint::Officer,
            yongshen,
            yongshen_element: Some(element),
            jishen: jishen.clone(),
            blockers,
            reasoning,
            candidate_scope: candidate_scope(pillars, ten_gods),
            key_chain_hint: Some(DEFAULT_KEY_CHAIN.to_string()),
            four_rules,
        },
    );
    log::debug!(
        "yongshen {} ({}), grade {}",
        yongshen,
        element.name(),
        payload.layer_c_fit_and_grade.grade.name()
    );

    let restrained = if jishen.is_empty() {
        "枭劫".to_string()
    } else {
        join_names(&jishen, "、", |j| j.name())
    };
    let a = &payload.layer_a_do_gong;
    let b = &payload.layer_b_tiaohou;
    let c = &payload.layer_c_fit_and_grade;
    let stream_lines = vec![
        format!("用神判定：取{}（{}）以制{}", yongshen, element.name(), restrained),
        format!("做功路径：{}", a.reasoning),
        format!(
            "调候方案：{}",
            match b.direction_text() {
                Some(dirs) if b.need => dirs,
                _ => "无需额外调候".to_string(),
            }
        ),
        format!("格局评估：{} · {}", c.grade.name(), c.notes),
    ];

    let mermaid = render_mermaid(&payload, KEY_CHAIN_NODE);
    YongshenResult {
        evidence,
        payload,
        mermaid,
        stream_lines,
    }
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// `用神：…；调候：…；格局：…`
pub fn summary_line(payload: &YongshenPayload) -> String {
    format!(
        "用神：{}；调候：{}；格局：{}",
        payload.layer_a_do_gong.yongshen,
        payload
            .layer_b_tiaohou
            .direction_text()
            .unwrap_or_else(|| "不需".to_string()),
        payload.layer_c_fit_and_grade.grade.name()
    )
}

/// Keep CJK ideographs, ASCII alphanumerics, `:`, `_` and `→`.
fn sanitize_node(raw: &str) -> String {
    raw.chars()
        .filter(|&c| {
            ('\u{4e00}'..='\u{9fa5}').contains(&c)
                || c.is_ascii_alphanumeric()
                || matches!(c, ':' | '_' | '→')
        })
        .collect()
}

/// Mermaid flowchart of the workflow edges, fenced as a markdown block.
pub fn render_mermaid(payload: &YongshenPayload, key_chain_label: &str) -> String {
    let key = sanitize_node(key_chain_label);
    let mut lines = vec![
        "```mermaid".to_string(),
        "flowchart TD".to_string(),
        "  A[体：食/伤/印/比劫] -->|生/泄| U[用：财/官/杀]".to_string(),
    ];
    for edge in &payload.workflow.edges {
        lines.push(format!(
            "  {} --|{} ({:+.1})|--> {}",
            sanitize_node(&edge.from),
            edge.effect,
            edge.weight,
            sanitize_node(&edge.to)
        ));
    }
    let th = &payload.layer_b_tiaohou;
    lines.push(format!(
        "  TH[调候：{}] --|上层校验|--> {key}",
        th.direction_text().unwrap_or_else(|| "无".to_string())
    ));
    lines.push(format!(
        "  ENV[月令：{}] --|影响|--> {key}",
        th.month_branch.name()
    ));
    lines.push("```".to_string());
    lines.join("\n")
}
