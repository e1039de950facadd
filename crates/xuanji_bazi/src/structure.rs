//! Structural factors: stem combinations and branch interactions among the
//! four pillars.
//!
//! Detection yields typed relations. Two views are derived from them: short
//! factor strings (`午未六合→土`) and weighted workflow edges that feed the
//! yongshen diagram.

use serde::Serialize;
use xuanji_base::{
    Branch, DIRECTIONAL_ASSEMBLIES, Element, PUNISHMENTS, Stem, TRIPLE_HARMONIES,
    is_clash, is_destruction, is_harm, is_storage, lu_branch, root_branches, six_harmony,
    stem_combination_partner,
};

use crate::pillars::FourPillars;

/// Target of every destructive branch edge.
pub const KEY_CHAIN_NODE: &str = "链:关键";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The three conditions weighed for a stem combination to transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CombinationEvidence {
    /// A stem of the target element stands in the chart (化神).
    pub hua_god: Option<Element>,
    /// A branch rooting the target element is present.
    pub root: bool,
    /// The month branch has the target element.
    pub season_support: bool,
}

impl CombinationEvidence {
    fn score(&self) -> u8 {
        u8::from(self.hua_god.is_some()) + u8::from(self.root) + u8::from(self.season_support)
    }
}

/// A 五合 pair among the visible stems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StemCombination {
    pub a: Stem,
    pub b: Stem,
    pub element: Element,
    pub evidence: CombinationEvidence,
    /// At least two of the three evidences hold.
    pub formed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BranchPair {
    pub a: Branch,
    pub b: Branch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PunishmentPair {
    pub a: Branch,
    pub b: Branch,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HarmonyPair {
    pub a: Branch,
    pub b: Branch,
    pub element: Element,
}

/// A three-branch frame, complete or partial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchGroup {
    /// Members present, in the frame's traditional order.
    pub members: Vec<Branch>,
    pub towards: Element,
    pub formed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BranchRelations {
    pub clashes: Vec<BranchPair>,
    pub punishments: Vec<PunishmentPair>,
    pub destructions: Vec<BranchPair>,
    pub harms: Vec<BranchPair>,
    pub six_harmonies: Vec<HarmonyPair>,
    /// Two members of a 三合 frame.
    pub half_triples: Vec<BranchGroup>,
    /// Complete 三合 frames.
    pub triples: Vec<BranchGroup>,
    /// 方会 frames with two or three members.
    pub assemblies: Vec<BranchGroup>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KuStrength {
    Medium,
    Strong,
}

impl KuStrength {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Medium => "中",
            Self::Strong => "强",
        }
    }
}

impl Serialize for KuStrength {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Wealth of the day master stored in a 库 branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnterKu {
    /// Element the day master controls.
    pub wealth: Element,
    pub branch: Branch,
    pub strength: KuStrength,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LuMuKu {
    /// Pillar branches equal to the day stem's 禄, one entry per pillar.
    pub lu: Vec<Branch>,
    /// Distinct 库 branches present.
    pub ku: Vec<Branch>,
    pub enter_ku: Vec<EnterKu>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StructuralRelations {
    pub stem_combinations: Vec<StemCombination>,
    pub branches: BranchRelations,
    pub lu_mu_ku: LuMuKu,
}

impl StructuralRelations {
    pub fn has_formed_triple(&self) -> bool {
        self.branches.triples.iter().any(|g| g.formed)
    }
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Detect every stem and branch relation in the chart.
pub fn detect_relations(pillars: &FourPillars) -> StructuralRelations {
    let branches = pillars.branches();
    StructuralRelations {
        stem_combinations: stem_combinations(pillars),
        branches: branch_relations(&branches),
        lu_mu_ku: lu_mu_ku(pillars.day_master(), &branches),
    }
}

fn stem_combinations(pillars: &FourPillars) -> Vec<StemCombination> {
    let stems = pillars.stems();
    let branches = pillars.branches();
    let month_element = pillars.month_order();
    let mut out: Vec<StemCombination> = Vec::new();
    for &s in &stems {
        let (partner, element) = stem_combination_partner(s);
        if !stems.contains(&partner) {
            continue;
        }
        if out.iter().any(|c| c.a == s || c.b == s) {
            continue;
        }
        let shows = stems.iter().any(|x| x.element() == element)
            || pillars.all_hidden().any(|(_, h)| h.element() == element);
        let evidence = CombinationEvidence {
            hua_god: shows.then_some(element),
            root: root_branches(element).iter().any(|r| branches.contains(r)),
            season_support: month_element == element,
        };
        out.push(StemCombination {
            a: s,
            b: partner,
            element,
            evidence,
            formed: evidence.score() >= 2,
        });
    }
    out
}

fn branch_relations(branches: &[Branch; 4]) -> BranchRelations {
    let mut out = BranchRelations::default();
    for i in 0..branches.len() {
        for &b in &branches[i + 1..] {
            let a = branches[i];
            if is_clash(a, b) {
                out.clashes.push(BranchPair { a, b });
            }
            if is_destruction(a, b) {
                out.destructions.push(BranchPair { a, b });
            }
            if is_harm(a, b) {
                out.harms.push(BranchPair { a, b });
            }
            if let Some(element) = six_harmony(a, b) {
                out.six_harmonies.push(HarmonyPair { a, b, element });
            }
        }
    }

    let present = |frame: &[Branch]| -> Vec<Branch> {
        frame
            .iter()
            .copied()
            .filter(|m| branches.contains(m))
            .collect()
    };
    for (frame, towards) in TRIPLE_HARMONIES {
        let members = present(&frame);
        match members.len() {
            3 => out.triples.push(BranchGroup {
                members,
                towards,
                formed: true,
            }),
            2 => out.half_triples.push(BranchGroup {
                members,
                towards,
                formed: false,
            }),
            _ => {}
        }
    }
    for (frame, towards) in DIRECTIONAL_ASSEMBLIES {
        let members = present(&frame);
        if members.len() >= 2 {
            out.assemblies.push(BranchGroup {
                formed: members.len() == 3,
                members,
                towards,
            });
        }
    }
    for group in PUNISHMENTS {
        let hits = present(group.members);
        if let [a, b, ..] = hits.as_slice() {
            out.punishments.push(PunishmentPair {
                a: *a,
                b: *b,
                label: group.label,
            });
        }
    }
    out
}

fn lu_mu_ku(day_master: Stem, branches: &[Branch; 4]) -> LuMuKu {
    let lu_of_dm = lu_branch(day_master);
    let storages: Vec<Branch> = branches.iter().copied().filter(|&b| is_storage(b)).collect();
    let mut ku: Vec<Branch> = Vec::new();
    for &b in &storages {
        if !ku.contains(&b) {
            ku.push(b);
        }
    }
    let wealth = day_master.element().controls();
    let strength = if storages.len() > 1 {
        KuStrength::Strong
    } else {
        KuStrength::Medium
    };
    let enter_ku = storages
        .iter()
        .filter(|b| b.element() == wealth)
        .map(|&branch| EnterKu {
            wealth,
            branch,
            strength,
        })
        .collect();
    LuMuKu {
        lu: branches.iter().copied().filter(|&b| b == lu_of_dm).collect(),
        ku,
        enter_ku,
    }
}

// ---------------------------------------------------------------------------
// Factor strings
// ---------------------------------------------------------------------------

/// Human-readable factor strings, one list per relation family.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StructuralFactors {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stems_he: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub branches_chong: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub branches_xing: Vec<String>,
    /// 破 entries first, then 害.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub branches_pohai: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sanhe: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub liuhe: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub banhe: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hui: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lu_mu_ku: Vec<String>,
}

fn pair_text(a: Branch, b: Branch, suffix: &str) -> String {
    format!("{}{}{}", a.name(), b.name(), suffix)
}

fn members_text(members: &[Branch]) -> String {
    members.iter().map(|b| b.name()).collect()
}

fn join_branches(list: &[Branch]) -> String {
    list.iter().map(|b| b.name()).collect::<Vec<_>>().join("、")
}

impl StructuralFactors {
    pub fn from_relations(rel: &StructuralRelations) -> Self {
        let b = &rel.branches;
        let group_text = |g: &BranchGroup, done: &str, intent: &str| {
            format!(
                "{}{}→{}",
                members_text(&g.members),
                if g.formed { done } else { intent },
                g.towards.name()
            )
        };

        let mut lu_mu_ku = Vec::new();
        if !rel.lu_mu_ku.lu.is_empty() {
            lu_mu_ku.push(format!("禄位:{}", join_branches(&rel.lu_mu_ku.lu)));
        }
        if !rel.lu_mu_ku.ku.is_empty() {
            lu_mu_ku.push(format!("四库:{}", join_branches(&rel.lu_mu_ku.ku)));
        }
        lu_mu_ku.extend(rel.lu_mu_ku.enter_ku.iter().map(|e| {
            format!(
                "财({})入{}库({})",
                e.wealth.name(),
                e.branch.name(),
                e.strength.name()
            )
        }));

        Self {
            stems_he: rel
                .stem_combinations
                .iter()
                .map(|c| {
                    format!(
                        "{}{}合{}{}",
                        c.a.name(),
                        c.b.name(),
                        c.element.name(),
                        if c.formed { "(成)" } else { "(未成)" }
                    )
                })
                .collect(),
            branches_chong: b.clashes.iter().map(|p| pair_text(p.a, p.b, "冲")).collect(),
            branches_xing: b.punishments.iter().map(|p| pair_text(p.a, p.b, "刑")).collect(),
            branches_pohai: b
                .destructions
                .iter()
                .map(|p| pair_text(p.a, p.b, "破"))
                .chain(b.harms.iter().map(|p| pair_text(p.a, p.b, "害")))
                .collect(),
            sanhe: b
                .triples
                .iter()
                .map(|g| group_text(g, "三合成局", "三合意向"))
                .collect(),
            liuhe: b
                .six_harmonies
                .iter()
                .map(|p| pair_text(p.a, p.b, &format!("六合→{}", p.element.name())))
                .collect(),
            banhe: b
                .half_triples
                .iter()
                .map(|g| group_text(g, "半合成", "半合意向"))
                .collect(),
            hui: b
                .assemblies
                .iter()
                .map(|g| group_text(g, "会局成", "会局意向"))
                .collect(),
            lu_mu_ku,
        }
    }
}

// ---------------------------------------------------------------------------
// Workflow edges
// ---------------------------------------------------------------------------

/// A weighted edge of the 做功 diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowEdge {
    pub from: String,
    pub to: String,
    pub effect: &'static str,
    pub weight: f64,
}

impl WorkflowEdge {
    fn new(from: String, to: String, effect: &'static str, weight: f64) -> Self {
        Self {
            from,
            to,
            effect,
            weight,
        }
    }
}

/// Edges in family order: 干合, 冲, 刑, 破, 害, 三合, 半合, 会局, 六合.
pub fn workflow_edges(rel: &StructuralRelations) -> Vec<WorkflowEdge> {
    let b = &rel.branches;
    let mut edges = Vec::new();
    for c in &rel.stem_combinations {
        let (effect, weight) = if c.formed { ("合化成", 0.8) } else { ("合绊意向", 0.3) };
        edges.push(WorkflowEdge::new(
            format!("干合:{}{}", c.a.name(), c.b.name()),
            format!("化:{}", c.element.name()),
            effect,
            weight,
        ));
    }
    let key = || KEY_CHAIN_NODE.to_string();
    for p in &b.clashes {
        edges.push(WorkflowEdge::new(
            format!("支冲:{}", pair_text(p.a, p.b, "")),
            key(),
            "冲破",
            -0.8,
        ));
    }
    for p in &b.punishments {
        edges.push(WorkflowEdge::new(
            format!("支刑:{}", pair_text(p.a, p.b, "")),
            key(),
            "损耗",
            -0.4,
        ));
    }
    for p in &b.destructions {
        edges.push(WorkflowEdge::new(
            format!("支破:{}", pair_text(p.a, p.b, "")),
            key(),
            "破坏",
            -0.5,
        ));
    }
    for p in &b.harms {
        edges.push(WorkflowEdge::new(
            format!("支害:{}", pair_text(p.a, p.b, "")),
            key(),
            "相害",
            -0.3,
        ));
    }
    let toward = |g: &BranchGroup| format!("向:{}", g.towards.name());
    for g in &b.triples {
        let (effect, weight) = if g.formed { ("成局", 0.8) } else { ("趋向", 0.4) };
        edges.push(WorkflowEdge::new(
            format!("三合:{}", members_text(&g.members)),
            toward(g),
            effect,
            weight,
        ));
    }
    for g in &b.half_triples {
        let (effect, weight) = if g.formed { ("半合成", 0.5) } else { ("半合意向", 0.3) };
        edges.push(WorkflowEdge::new(
            format!("半合:{}", members_text(&g.members)),
            toward(g),
            effect,
            weight,
        ));
    }
    for g in &b.assemblies {
        let (effect, weight) = if g.formed { ("会成", 0.6) } else { ("会意向", 0.3) };
        edges.push(WorkflowEdge::new(
            format!("会局:{}", members_text(&g.members)),
            toward(g),
            effect,
            weight,
        ));
    }
    for p in &b.six_harmonies {
        edges.push(WorkflowEdge::new(
            format!("六合:{}", pair_text(p.a, p.b, "")),
            format!("向:{}", p.element.name()),
            "合向",
            0.5,
        ));
    }
    edges
}
