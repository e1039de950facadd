//! Symbolic stars (神煞) of a BaZi chart.
//!
//! Every star is a lookup. A key taken from the chart (year branch, day
//! stem, month branch, year stem) names target branches or stems, and the
//! star sits on each pillar that shows a target. A major period or a flowing
//! year triggers the same stars through its own stem and branch.

use serde::{Serialize, Serializer};
use xuanji_base::Branch::{Chen, Chou, Hai, Mao, Shen, Si, Wei, Wu, Xu, Yin, You, Zi};
use xuanji_base::{Branch, Element, GanZhi, Gender, Stem, lu_branch, stem_combination_partner};

use crate::pillars::{FourPillars, PillarSlot};

// ---------------------------------------------------------------------------
// Stars
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShenShaCategory {
    PeachBlossom,
    Nobleman,
    Power,
    Movement,
    Wealth,
    Malefic,
}

impl ShenShaCategory {
    pub const fn name(self) -> &'static str {
        match self {
            Self::PeachBlossom => "桃花",
            Self::Nobleman => "贵人",
            Self::Power => "权势",
            Self::Movement => "变动",
            Self::Wealth => "财禄",
            Self::Malefic => "凶煞",
        }
    }
}

impl Serialize for ShenShaCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShenSha {
    HongLuan,
    TianXi,
    MuYu,
    XianChi,
    HongYan,
    TianYi,
    TianDe,
    TianDeHe,
    YueDe,
    TaiJi,
    SanQi,
    WenChang,
    GuoYin,
    YueDeHe,
    JiangXing,
    HuaGai,
    JinYu,
    XueTang,
    CiGuan,
    YiMa,
    LuShen,
    YangRen,
    KongWang,
    WangShen,
    JieSha,
    ZaiSha,
    GuChen,
    GuaSu,
    YuanChen,
    TianLuo,
    DiWang,
    BaiHu,
    ShiEDaBai,
    KuiGang,
}

/// Every star in report order.
pub const ALL_SHENSHA: [ShenSha; 34] = {
    use ShenSha::*;
    [
        HongLuan, TianXi, MuYu, XianChi, HongYan, TianYi, TianDe, TianDeHe, YueDe, TaiJi, SanQi,
        WenChang, GuoYin, YueDeHe, JiangXing, HuaGai, JinYu, XueTang, CiGuan, YiMa, LuShen,
        YangRen, KongWang, WangShen, JieSha, ZaiSha, GuChen, GuaSu, YuanChen, TianLuo, DiWang,
        BaiHu, ShiEDaBai, KuiGang,
    ]
};

impl ShenSha {
    pub const fn name(self) -> &'static str {
        match self {
            Self::HongLuan => "红鸾",
            Self::TianXi => "天喜",
            Self::MuYu => "沐浴",
            Self::XianChi => "咸池",
            Self::HongYan => "红艳",
            Self::TianYi => "天乙贵人",
            Self::TianDe => "天德贵人",
            Self::TianDeHe => "天德合",
            Self::YueDe => "月德贵人",
            Self::TaiJi => "太极贵人",
            Self::SanQi => "三奇贵人",
            Self::WenChang => "文昌贵人",
            Self::GuoYin => "国印贵人",
            Self::YueDeHe => "月德合",
            Self::JiangXing => "将星",
            Self::HuaGai => "华盖",
            Self::JinYu => "金舆",
            Self::XueTang => "学堂",
            Self::CiGuan => "词馆",
            Self::YiMa => "驿马",
            Self::LuShen => "禄神",
            Self::YangRen => "羊刃",
            Self::KongWang => "空亡",
            Self::WangShen => "亡神",
            Self::JieSha => "劫煞",
            Self::ZaiSha => "灾煞",
            Self::GuChen => "孤辰",
            Self::GuaSu => "寡宿",
            Self::YuanChen => "元辰",
            Self::TianLuo => "天罗",
            Self::DiWang => "地网",
            Self::BaiHu => "白虎煞",
            Self::ShiEDaBai => "十恶大败",
            Self::KuiGang => "魁罡",
        }
    }

    pub const fn category(self) -> ShenShaCategory {
        use ShenShaCategory::*;
        match self {
            Self::HongLuan | Self::TianXi | Self::MuYu | Self::XianChi | Self::HongYan => {
                PeachBlossom
            }
            Self::TianYi
            | Self::TianDe
            | Self::TianDeHe
            | Self::YueDe
            | Self::TaiJi
            | Self::SanQi
            | Self::WenChang
            | Self::GuoYin
            | Self::YueDeHe => Nobleman,
            Self::JiangXing | Self::HuaGai | Self::JinYu | Self::XueTang | Self::CiGuan => Power,
            Self::YiMa => Movement,
            Self::LuShen => Wealth,
            _ => Malefic,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::HongLuan => "红鸾主婚姻喜庆，感情运佳",
            Self::TianXi => "天喜主喜庆事件，人缘良好",
            Self::MuYu => "沐浴主聪明俊美，但易有桃花纠纷",
            Self::XianChi => "咸池主桃花运旺，异性缘佳",
            Self::HongYan => "红艳主异性缘强，容易有感情纠葛",
            Self::TianYi => "天乙贵人主逢凶化吉，有贵人相助",
            Self::TianDe => "天德贵人主德行高尚，福德深厚",
            Self::TianDeHe => "天德合与天德相得益彰，增强福德",
            Self::YueDe => "月德贵人主福德深厚，所临皆吉",
            Self::TaiJi => "太极贵人主聪明好学，善于钻研",
            Self::SanQi => "三奇贵人主智慧超群，能化险为夷",
            Self::WenChang => "文昌贵人主文思敏捷，利于考试读书",
            Self::GuoYin => "国印贵人主有权威地位，能得提拔",
            Self::YueDeHe => "月德合与月德相合，福德倍增",
            Self::JiangXing => "将星主有领导才能，能统率众人",
            Self::HuaGai => "华盖主聪明孤高，善于艺术宗教",
            Self::JinYu => "金舆主富贵荣华，生活优渥",
            Self::XueTang => "学堂主好学深造，学业有成",
            Self::CiGuan => "词馆主文笔优美，才华横溢",
            Self::YiMa => "驿马主奔波走动，利于外出发展",
            Self::LuShen => "禄神主衣食不愁，财源稳定",
            Self::YangRen => "羊刃主性格刚烈，勇敢果断而易有血光",
            Self::KongWang => "空亡主虚空不实，易有挫折",
            Self::WangShen => "亡神主破败消耗，易有意外损失",
            Self::JieSha => "劫煞主破财损物，需注意财物安全",
            Self::ZaiSha => "灾煞主疾病灾祸，需注意身体",
            Self::GuChen => "孤辰主孤独少合，男命不利婚姻",
            Self::GuaSu => "寡宿主孤独少合，女命不利婚姻",
            Self::YuanChen => "元辰主暗昧不明，易有小人是非",
            Self::TianLuo => "天罗主困顿不通，火土命人最忌",
            Self::DiWang => "地网主阻滞不利，水金命人最忌",
            Self::BaiHu => "白虎煞主血光之灾，需谨慎防范",
            Self::ShiEDaBai => "十恶大败主运势极凶，过后必有转机",
            Self::KuiGang => "魁罡主性格刚烈果断，有领导能力但易孤独",
        }
    }
}

impl Serialize for ShenSha {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Day-stem stars, one row per stem in 甲..癸 order.
const TIAN_YI: [[Branch; 2]; 10] = [
    [Chou, Wei],
    [Zi, Shen],
    [Hai, You],
    [Hai, You],
    [Chou, Wei],
    [Zi, Shen],
    [Chou, Wei],
    [Yin, Wu],
    [Mao, Si],
    [Mao, Si],
];
const TAI_JI: [[Branch; 2]; 5] = [[Zi, Wu], [Mao, You], [Chen, Xu], [Chou, Wei], [Yin, Shen]];
const WEN_CHANG: [Branch; 10] = [Si, Wu, Shen, You, Shen, You, Hai, Zi, Yin, Mao];
const GUO_YIN: [Branch; 10] = [Xu, Hai, Chou, Yin, Chou, Yin, Chen, Si, Wei, Shen];
const JIN_YU: [Branch; 10] = [Chen, Si, Wei, Shen, Wei, Shen, Xu, Hai, Chou, Yin];
const YANG_REN: [Branch; 10] = [Mao, Yin, Wu, Si, Wu, Si, You, Shen, Zi, Hai];
const MU_YU: [Branch; 10] = [Hai, Zi, Yin, Mao, Yin, Mao, Si, Wu, Shen, You];
const HONG_YAN: [Branch; 10] = [Wu, Shen, Yin, Wei, Chen, Chen, Xu, You, Zi, Shen];
const XUE_TANG: [Branch; 10] = [Hai, Wu, Yin, You, Yin, You, Si, Zi, Shen, Mao];

/// 天德 by year stem.
const TIAN_DE: [Stem; 10] = [
    Stem::Bing,
    Stem::Ding,
    Stem::Wu,
    Stem::Ji,
    Stem::Jia,
    Stem::Bing,
    Stem::Ding,
    Stem::Wu,
    Stem::Ji,
    Stem::Jia,
];

/// 三合 frames in 申子辰 亥卯未 寅午戌 巳酉丑 order, with the 月德 stem.
const FRAMES: [([Branch; 3], Stem); 4] = [
    ([Shen, Zi, Chen], Stem::Ren),
    ([Hai, Mao, Wei], Stem::Jia),
    ([Yin, Wu, Xu], Stem::Bing),
    ([Si, You, Chou], Stem::Geng),
];

/// Year-frame stars: (star, member of the year branch's frame, steps on).
const FRAME_STARS: [(ShenSha, usize, i32); 7] = [
    (ShenSha::JiangXing, 1, 0),
    (ShenSha::HuaGai, 2, 0),
    (ShenSha::YiMa, 0, 6),
    (ShenSha::XianChi, 1, 9),
    (ShenSha::JieSha, 2, 1),
    (ShenSha::WangShen, 0, 3),
    (ShenSha::ZaiSha, 1, 6),
];

const SHI_E_DA_BAI: [(Stem, Branch); 10] = [
    (Stem::Jia, Chen),
    (Stem::Yi, Si),
    (Stem::Bing, Shen),
    (Stem::Ding, Hai),
    (Stem::Wu, Xu),
    (Stem::Ji, Chou),
    (Stem::Geng, Chen),
    (Stem::Xin, Si),
    (Stem::Ren, Shen),
    (Stem::Gui, Hai),
];

/// 魁罡 days and their kind.
const KUI_GANG: [(Stem, Branch, &str); 4] = [
    (Stem::Geng, Chen, "绝妻罡"),
    (Stem::Ren, Chen, "绝妻罡"),
    (Stem::Wu, Xu, "绝夫罡"),
    (Stem::Geng, Xu, "绝夫罡"),
];

/// 三奇 trios, checked in this order; the first complete one counts.
const SAN_QI: [([Stem; 3], &str); 3] = [
    ([Stem::Jia, Stem::Wu, Stem::Geng], "天上三奇"),
    ([Stem::Yi, Stem::Bing, Stem::Ding], "地下三奇"),
    ([Stem::Ren, Stem::Gui, Stem::Xin], "人中三奇"),
];

const fn frame_of(b: Branch) -> usize {
    match b {
        Shen | Zi | Chen => 0,
        Hai | Mao | Wei => 1,
        Yin | Wu | Xu => 2,
        Si | You | Chou => 3,
    }
}

/// The two void branches (空亡) of the ten-day week holding `day`.
pub fn void_branches(day: GanZhi) -> [Branch; 2] {
    let head = day.branch().offset(-i32::from(day.stem().index()));
    [head.offset(10), head.offset(11)]
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Keys read from the natal chart.
#[derive(Debug, Clone, Copy)]
struct Keys {
    year_stem: Stem,
    year_branch: Branch,
    month_branch: Branch,
    day: GanZhi,
    gender: Gender,
    year_na_yin: Element,
}

impl Keys {
    fn of(pillars: &FourPillars, gender: Gender) -> Self {
        Self {
            year_stem: pillars.year.stem,
            year_branch: pillars.year.branch,
            month_branch: pillars.month.branch,
            day: pillars.day.ganzhi,
            gender,
            year_na_yin: pillars.year.na_yin.element(),
        }
    }
}

enum Target {
    Branches(Vec<Branch>),
    Stems(Vec<Stem>),
    /// The cell's own stem-branch pair.
    Pillar(fn(GanZhi) -> bool),
    Nothing,
}

impl Target {
    fn matches(&self, gz: GanZhi) -> bool {
        match self {
            Self::Branches(v) => v.contains(&gz.branch()),
            Self::Stems(v) => v.contains(&gz.stem()),
            Self::Pillar(f) => f(gz),
            Self::Nothing => false,
        }
    }
}

fn is_shi_e(gz: GanZhi) -> bool {
    SHI_E_DA_BAI.contains(&(gz.stem(), gz.branch()))
}

fn kui_gang(gz: GanZhi) -> Option<&'static str> {
    KUI_GANG
        .iter()
        .find(|&&(s, b, _)| s == gz.stem() && b == gz.branch())
        .map(|&(_, _, kind)| kind)
}

fn san_qi(stems: &[Stem]) -> Option<([Stem; 3], &'static str)> {
    SAN_QI
        .iter()
        .find(|(trio, _)| trio.iter().all(|s| stems.contains(s)))
        .copied()
}

fn target(star: ShenSha, k: &Keys, stems: &[Stem]) -> Target {
    use ShenSha::*;
    let ds = k.day.stem();
    let d = ds.index() as usize;
    let y = k.year_branch;
    let hong_luan = Mao.offset(-i32::from(y.index()));
    // 亥子丑 寅卯辰 巳午未 申酉戌
    let quarter = i32::from((y.index() + 1) % 12 / 3);
    let month_de = FRAMES[frame_of(k.month_branch)].1;
    let branch = |b: Branch| Target::Branches(vec![b]);

    if let Some(&(_, member, step)) = FRAME_STARS.iter().find(|(s, _, _)| *s == star) {
        return branch(FRAMES[frame_of(y)].0[member].offset(step));
    }
    match star {
        HongLuan => branch(hong_luan),
        TianXi => branch(hong_luan.opposite()),
        MuYu => branch(MU_YU[d]),
        HongYan => branch(HONG_YAN[d]),
        TianYi => Target::Branches(TIAN_YI[d].to_vec()),
        TianDe => Target::Stems(vec![TIAN_DE[k.year_stem.index() as usize]]),
        TianDeHe => Target::Stems(vec![
            stem_combination_partner(TIAN_DE[k.year_stem.index() as usize]).0,
        ]),
        YueDe => Target::Stems(vec![month_de]),
        YueDeHe => Target::Stems(vec![stem_combination_partner(month_de).0]),
        TaiJi => Target::Branches(TAI_JI[d / 2].to_vec()),
        SanQi => match san_qi(stems) {
            Some((trio, _)) => Target::Stems(trio.to_vec()),
            None => Target::Nothing,
        },
        WenChang => branch(WEN_CHANG[d]),
        GuoYin => branch(GUO_YIN[d]),
        JinYu => branch(JIN_YU[d]),
        XueTang => branch(XUE_TANG[d]),
        CiGuan => Target::Stems(vec![ds.offset(6)]),
        LuShen => branch(lu_branch(ds)),
        YangRen => branch(YANG_REN[d]),
        KongWang => Target::Branches(void_branches(k.day).to_vec()),
        GuChen => branch(Yin.offset(3 * quarter)),
        GuaSu => branch(Xu.offset(3 * quarter)),
        YuanChen => branch(y.offset(if k.gender == Gender::Male { 1 } else { -1 })),
        TianLuo if matches!(k.year_na_yin, Element::Fire | Element::Earth) => {
            Target::Branches(vec![Xu, Hai])
        }
        DiWang if matches!(k.year_na_yin, Element::Water | Element::Metal) => {
            Target::Branches(vec![Chen, Si])
        }
        BaiHu => branch(y.offset(1)),
        ShiEDaBai => Target::Pillar(is_shi_e),
        KuiGang => Target::Pillar(|gz| kui_gang(gz).is_some()),
        _ => Target::Nothing,
    }
}

/// Whether a star is read on a cell. `None` is a period or flowing year.
fn reads(star: ShenSha, slot: Option<PillarSlot>) -> bool {
    match star {
        ShenSha::TianDe => matches!(slot, Some(PillarSlot::Month) | None),
        ShenSha::TianLuo | ShenSha::DiWang => slot == Some(PillarSlot::Year),
        ShenSha::KuiGang => slot == Some(PillarSlot::Day),
        ShenSha::ShiEDaBai => matches!(slot, Some(PillarSlot::Day) | None),
        _ => true,
    }
}

/// Stars found on the cells, with the indices of the cells holding them.
fn scan(k: &Keys, cells: &[(Option<PillarSlot>, GanZhi)]) -> Vec<(ShenSha, Vec<usize>)> {
    let stems: Vec<Stem> = cells.iter().map(|(_, gz)| gz.stem()).collect();
    ALL_SHENSHA
        .iter()
        .filter_map(|&star| {
            let t = target(star, k, &stems);
            let hits: Vec<usize> = cells
                .iter()
                .enumerate()
                .filter(|(_, (slot, gz))| reads(star, *slot) && t.matches(*gz))
                .map(|(i, _)| i)
                .collect();
            (!hits.is_empty()).then_some((star, hits))
        })
        .collect()
}

fn natal_cells(pillars: &FourPillars) -> Vec<(Option<PillarSlot>, GanZhi)> {
    pillars
        .pillars()
        .iter()
        .map(|p| (Some(p.slot), p.ganzhi))
        .collect()
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShenShaHit {
    pub star: ShenSha,
    pub category: ShenShaCategory,
    /// Pillars showing the star, in year to hour order.
    pub positions: Vec<PillarSlot>,
    /// Kind of 三奇 or 魁罡.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<&'static str>,
    pub description: &'static str,
}

impl ShenShaHit {
    /// `三奇贵人(人中三奇)`, or the bare name.
    pub fn label(&self) -> String {
        match self.detail {
            Some(d) => format!("{}({d})", self.star.name()),
            None => self.star.name().to_string(),
        }
    }
}

/// A count of star placements with a reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StarTally {
    pub count: usize,
    pub stars: Vec<ShenSha>,
    pub description: &'static str,
}

/// Stars counted by the nobleman tally.
const NOBLE_CORE: [ShenSha; 4] = [
    ShenSha::TianYi,
    ShenSha::TianDe,
    ShenSha::TianDeHe,
    ShenSha::YueDe,
];

fn tally(
    hits: &[ShenShaHit],
    keep: impl Fn(ShenSha) -> bool,
    text: fn(usize) -> &'static str,
) -> StarTally {
    let kept: Vec<&ShenShaHit> = hits.iter().filter(|h| keep(h.star)).collect();
    let count = kept.iter().map(|h| h.positions.len()).sum();
    StarTally {
        count,
        stars: kept.iter().map(|h| h.star).collect(),
        description: text(count),
    }
}

fn peach_text(count: usize) -> &'static str {
    match count {
        0 => "八字中桃花星较少，人际关系平稳",
        1..=2 => "桃花运适中，具备良好的沟通能力",
        3..=4 => "桃花运旺盛，人缘极佳",
        _ => "桃花运极强，魅力十足，需注意分寸",
    }
}

fn noble_text(count: usize) -> &'static str {
    match count {
        0 => "贵人运一般，需要更多自身努力",
        1..=2 => "有贵人扶助，关键时刻能得到帮助",
        _ => "贵人运极佳，一生多得贵人相助",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShenShaReport {
    pub hits: Vec<ShenShaHit>,
    pub peach_blossom: StarTally,
    pub nobleman: StarTally,
}

impl ShenShaReport {
    pub fn has(&self, star: ShenSha) -> bool {
        self.hits.iter().any(|h| h.star == star)
    }

    pub fn get(&self, star: ShenSha) -> Option<&ShenShaHit> {
        self.hits.iter().find(|h| h.star == star)
    }

    /// Labels of the stars on one pillar.
    pub fn on(&self, slot: PillarSlot) -> Vec<String> {
        self.hits
            .iter()
            .filter(|h| h.positions.contains(&slot))
            .map(ShenShaHit::label)
            .collect()
    }

    pub fn labels(&self) -> Vec<String> {
        self.hits.iter().map(ShenShaHit::label).collect()
    }
}

/// Stars of the natal chart.
pub fn detect_shensha(pillars: &FourPillars, gender: Gender) -> ShenShaReport {
    let keys = Keys::of(pillars, gender);
    let cells = natal_cells(pillars);
    let stems = pillars.stems();
    let hits: Vec<ShenShaHit> = scan(&keys, &cells)
        .into_iter()
        .map(|(star, idx)| ShenShaHit {
            star,
            category: star.category(),
            positions: idx.iter().filter_map(|&i| cells[i].0).collect(),
            detail: match star {
                ShenSha::SanQi => san_qi(&stems).map(|(_, name)| name),
                ShenSha::KuiGang => kui_gang(keys.day),
                _ => None,
            },
            description: star.description(),
        })
        .collect();
    log::debug!("{} shensha on the natal chart", hits.len());

    ShenShaReport {
        peach_blossom: tally(
            &hits,
            |s| s.category() == ShenShaCategory::PeachBlossom,
            peach_text,
        ),
        nobleman: tally(&hits, |s| NOBLE_CORE.contains(&s), noble_text),
        hits,
    }
}

/// Stars a major period or flowing year brings in through its own pair,
/// keyed on the natal chart. A 三奇 completed by the period's stem counts.
pub fn period_shensha(pillars: &FourPillars, gender: Gender, ganzhi: GanZhi) -> Vec<ShenSha> {
    let keys = Keys::of(pillars, gender);
    let mut cells = natal_cells(pillars);
    cells.push((None, ganzhi));
    let period = cells.len() - 1;
    scan(&keys, &cells)
        .into_iter()
        .filter(|(_, idx)| idx.contains(&period))
        .map(|(star, _)| star)
        .collect()
}

// ---------------------------------------------------------------------------
