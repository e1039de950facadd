//! Golden charts for two recorded births.
//!
//! Pure table arithmetic on top of the analytic calendar; no data files needed.

use xuanji_base::{ALL_BRANCHES, Branch, Gender, Stem};
use xuanji_time::{LunarDate, hour_index, solar_to_lunar};
use xuanji_ziwei::{
    ALL_SIHUA, ALL_STARS, Brightness, Bureau, PalaceBoard, PalaceName, SelfHua, SihuaKind,
    StarName, ZiweiChart, ZiweiConfig, ZiweiError, apply_self_hua, decade_range, sihua_of,
};

fn chart(y: i32, m: u32, d: u32, h: u32, gender: Gender) -> ZiweiChart {
    let lunar = solar_to_lunar(y, m, d).unwrap();
    ZiweiChart::compute(lunar, hour_index(h), gender, &ZiweiConfig::default()).unwrap()
}

fn male_1990() -> ZiweiChart {
    chart(1990, 5, 15, 14, Gender::Male)
}

fn female_1985() -> ZiweiChart {
    chart(1985, 8, 23, 10, Gender::Female)
}

fn star_names(c: &ZiweiChart, b: Branch) -> Vec<&'static str> {
    c.palace(b).stars.iter().map(|s| s.name.name()).collect()
}

fn tags(c: &ZiweiChart, b: Branch, star: StarName) -> Vec<String> {
    c.palace(b)
        .stars
        .iter()
        .find(|s| s.name == star)
        .map(|s| s.palace_hua.iter().map(ToString::to_string).collect())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Male, 1990-05-15 14:30
// ---------------------------------------------------------------------------

#[test]
fn male_1990_header() {
    let c = male_1990();
    assert_eq!(c.lunar_date, "庚午年 四月廿一");
    assert_eq!(c.hour_index, 7);
    assert_eq!(c.year_stem, Stem::Geng);
    assert_eq!(c.life_branch, Branch::Xu);
    assert_eq!(c.body_branch, Branch::Zi);
    assert_eq!(c.bureau, Bureau::Earth5);
    assert_eq!(c.ming_zhu, StarName::LuCun);
    assert_eq!(c.shen_zhu, StarName::LingXing);
    assert!(c.warnings.is_empty());
}

#[test]
fn male_1990_stems_and_names() {
    let c = male_1990();
    let stems: String = c.palaces.iter().map(|p| p.heavenly_stem.name()).collect();
    assert_eq!(stems, "戊己戊己庚辛壬癸甲乙丙丁");
    let names: Vec<&str> = c.palaces.iter().map(|p| p.name.name()).collect();
    assert_eq!(
        names,
        ["福德", "田宅", "官禄", "交友", "迁移", "疾厄", "财帛", "子女", "夫妻", "兄弟", "命宫", "父母"]
    );
}

#[test]
fn male_1990_star_map() {
    let c = male_1990();
    let expected: [&[&str]; 12] = [
        &["七杀", "天刑"],
        &["天魁"],
        &["廉贞"],
        &["文昌", "天喜"],
        &["破军", "地空", "天姚"],
        &["天同", "铃星"],
        &["武曲", "天府", "地劫"],
        &["太阳", "太阴", "左辅", "右弼", "天钺", "陀罗"],
        &["贪狼", "天马", "禄存", "火星"],
        &["天机", "巨门", "擎羊", "红鸾"],
        &["紫微", "天相"],
        &["天梁", "文曲"],
    ];
    for b in ALL_BRANCHES {
        assert_eq!(star_names(&c, b), expected[b.index() as usize], "{}", b.name());
    }
}

#[test]
fn male_1990_brightness() {
    let c = male_1990();
    let find = |b: Branch, s: StarName| {
        c.palace(b)
            .stars
            .iter()
            .find(|x| x.name == s)
            .map(|x| x.brightness)
            .unwrap()
    };
    assert_eq!(find(Branch::Xu, StarName::ZiWei), Brightness::De);
    assert_eq!(find(Branch::Wei, StarName::TaiYang), Brightness::De);
    assert_eq!(find(Branch::Wei, StarName::TaiYin), Brightness::Bu);
    assert_eq!(find(Branch::Chen, StarName::PoJun), Brightness::Wang);
    assert_eq!(find(Branch::Wu, StarName::DiJie), Brightness::Xian);
}

#[test]
fn male_1990_sihua() {
    let c = male_1990();
    let marked: Vec<(StarName, SihuaKind)> = c
        .palaces
        .iter()
        .flat_map(|p| p.stars.iter())
        .filter_map(|s| s.sihua.map(|k| (s.name, k)))
        .collect();
    assert_eq!(marked.len(), 4);
    assert!(marked.contains(&(StarName::TaiYang, SihuaKind::Lu)));
    assert!(marked.contains(&(StarName::WuQu, SihuaKind::Quan)));
    assert!(marked.contains(&(StarName::TaiYin, SihuaKind::Ke)));
    assert!(marked.contains(&(StarName::TianTong, SihuaKind::Ji)));

    let info: Vec<String> = c.sihua_info.iter().map(ToString::to_string).collect();
    assert_eq!(info, ["子女：太阳", "财帛：武曲", "子女：太阴", "疾厄：天同"]);
}

#[test]
fn male_1990_self_hua() {
    let c = male_1990();
    assert_eq!(tags(&c, Branch::Yin, StarName::LianZhen), ["iA"]);
    assert_eq!(tags(&c, Branch::Si, StarName::TianTong), ["iB"]);
    assert_eq!(tags(&c, Branch::Wu, StarName::WuQu), ["xD"]);
    assert_eq!(tags(&c, Branch::Wei, StarName::TaiYin), ["xC"]);
    assert_eq!(tags(&c, Branch::Shen, StarName::TanLang), ["iA"]);
    assert_eq!(tags(&c, Branch::You, StarName::TianJi), ["xA"]);
    assert_eq!(tags(&c, Branch::Hai, StarName::WenQu), ["iC"]);
    assert!(tags(&c, Branch::Xu, StarName::ZiWei).is_empty());
    assert!(tags(&c, Branch::Wei, StarName::TaiYang).is_empty());
}

#[test]
fn male_1990_decades_run_forward() {
    let c = male_1990();
    let life = c.life_palace();
    assert_eq!(life.decade_index, 0);
    assert_eq!(life.decade.to_string(), "5-14");
    assert_eq!(c.palace(Branch::Hai).decade.to_string(), "15-24");
    assert_eq!(c.palace(Branch::You).decade.to_string(), "115-124");
    let order: Vec<Branch> = c.decade_palaces().map(|p| p.branch).collect();
    assert_eq!(order[0], Branch::Xu);
    assert_eq!(order[1], Branch::Hai);
    assert_eq!(order[2], Branch::Zi);
}

// ---------------------------------------------------------------------------
// Female, 1985-08-23 10:45
// ---------------------------------------------------------------------------

#[test]
fn female_1985_header() {
    let c = female_1985();
    assert_eq!(c.lunar_date, "乙丑年 七月初八");
    assert_eq!(c.life_branch, Branch::Mao);
    assert_eq!(c.body_branch, Branch::Chou);
    assert_eq!(c.bureau, Bureau::Earth5);
}

#[test]
fn female_1985_single_lai_yin() {
    let c = female_1985();
    let lai: Vec<&xuanji_ziwei::Palace> = c.lai_yin_palaces().collect();
    assert_eq!(lai.len(), 1);
    assert_eq!(lai[0].branch, Branch::You);
    assert_eq!(lai[0].heavenly_stem, Stem::Yi);
    assert_eq!(lai[0].name, PalaceName::Travel);
}

#[test]
fn female_1985_star_map() {
    let c = female_1985();
    let expected: [&[&str]; 12] = [
        &["天同", "太阴", "天魁"],
        &["武曲", "贪狼"],
        &["太阳", "巨门", "陀罗", "红鸾"],
        &["天相", "禄存", "铃星", "天刑"],
        &["天机", "天梁", "右弼", "擎羊", "地劫"],
        &["紫微", "七杀", "文昌"],
        &["地空"],
        &["天姚"],
        &["天钺", "火星", "天喜"],
        &["廉贞", "破军", "文曲"],
        &["左辅"],
        &["天府", "天马"],
    ];
    for b in ALL_BRANCHES {
        assert_eq!(star_names(&c, b), expected[b.index() as usize], "{}", b.name());
    }
}

#[test]
fn female_1985_self_hua_accumulates() {
    let c = female_1985();
    assert_eq!(tags(&c, Branch::Chou, StarName::TanLang), ["xB", "iD"]);
    assert_eq!(tags(&c, Branch::Zi, StarName::TaiYin), ["xB"]);
    assert_eq!(tags(&c, Branch::Yin, StarName::TaiYang), ["iD"]);
    assert_eq!(tags(&c, Branch::Chen, StarName::TianJi), ["iB"]);
    let info: Vec<String> = c.sihua_info.iter().map(ToString::to_string).collect();
    assert_eq!(info, ["父母：天机", "父母：天梁", "福德：紫微", "子女：太阴"]);
}

#[test]
fn female_1985_yin_year_runs_forward() {
    let c = female_1985();
    assert_eq!(c.palace(Branch::Chen).decade_index, 1);
    assert_eq!(c.palace(Branch::Chen).decade, decade_range(Bureau::Earth5, 1));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn deterministic() {
    assert_eq!(male_1990(), male_1990());
    assert_eq!(female_1985(), female_1985());
}

#[test]
fn bureau_ignores_gender() {
    let m = chart(1985, 8, 23, 10, Gender::Male);
    let f = female_1985();
    assert_eq!(m.bureau, f.bureau);
    assert_eq!(m.life_branch, f.life_branch);
    assert_ne!(m.palace(Branch::Chen).decade_index, f.palace(Branch::Chen).decade_index);
}

/// Structural checks every chart must pass, whatever the birth data.
fn check_chart(c: &ZiweiChart) {
    let what = format!("{} {}时", c.lunar_date, c.hour_index);

    // Twelve distinct branches and names, one 身宫, one 命宫 at the life branch.
    let mut branches: Vec<u8> = c.palaces.iter().map(|p| p.branch.index()).collect();
    branches.sort_unstable();
    branches.dedup();
    assert_eq!(branches.len(), 12, "{what}");
    let mut names: Vec<u8> = c.palaces.iter().map(|p| p.name.index()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 12, "{what}");
    assert_eq!(c.palaces.iter().filter(|p| p.is_shen_gong).count(), 1, "{what}");
    assert!(c.body_palace().is_shen_gong, "{what}");
    assert_eq!(c.life_palace().name, PalaceName::Life, "{what}");

    // Each star at most once; only 火星 may be missing, and then with a warning.
    let mut stars: Vec<StarName> = c
        .palaces
        .iter()
        .flat_map(|p| p.stars.iter().map(|s| s.name))
        .collect();
    let placed = stars.len();
    stars.sort_unstable();
    stars.dedup();
    assert_eq!(stars.len(), placed, "{what}");
    let huo_gap = matches!(c.year_branch, Branch::Hai | Branch::Mao | Branch::Wei);
    assert_eq!(placed, ALL_STARS.len() - usize::from(huo_gap), "{what}");
    assert_eq!(c.warnings.len(), usize::from(huo_gap), "{what}");

    // Each birth-year transformation at most once, on the star its stem names.
    for kind in ALL_SIHUA {
        let holders: Vec<StarName> = c
            .palaces
            .iter()
            .flat_map(|p| p.stars.iter())
            .filter(|s| s.sihua == Some(kind))
            .map(|s| s.name)
            .collect();
        assert!(holders.len() <= 1, "{what}");
        for star in holders {
            assert_eq!(sihua_of(c.year_stem, star), Some(kind), "{what}");
        }
    }

    // Self-hua tags are exactly those derivable from the palace and its opposite.
    for p in &c.palaces {
        let opposite = c.opposite(p.branch);
        for s in &p.stars {
            let mut expected = Vec::new();
            if let Some(kind) = sihua_of(p.heavenly_stem, s.name) {
                expected.push(SelfHua { inward: false, kind });
            }
            if let Some(kind) = sihua_of(opposite.heavenly_stem, s.name) {
                expected.push(SelfHua { inward: true, kind });
            }
            let mut tags = s.palace_hua.clone();
            tags.sort_by_key(|t| (t.inward, t.kind.index()));
            assert_eq!(tags, expected, "{what} {}", s.name.name());
        }
    }

    // Decade order is a permutation of the twelve palaces, by decade index.
    let mut order = c.decade_order.to_vec();
    order.sort_unstable();
    assert_eq!(order, (0..12).collect::<Vec<usize>>(), "{what}");
    let indices: Vec<u8> = c.decade_palaces().map(|p| p.decade_index).collect();
    assert_eq!(indices, (0..12).collect::<Vec<u8>>(), "{what}");
}

#[test]
fn fixtures_are_well_formed() {
    check_chart(&male_1990());
    check_chart(&female_1985());
}

#[test]
fn every_month_day_hour_and_year_stem() {
    let config = ZiweiConfig::default();
    // 1984 甲子 through 1993 癸酉 covers all ten year stems.
    for year in 1984..=1993 {
        let gender = if year % 2 == 0 { Gender::Male } else { Gender::Female };
        for month in 1..=12 {
            for day in 1..=30 {
                for hour in 0..12 {
                    let lunar = LunarDate::new(year, month, day, false);
                    let c = ZiweiChart::compute(lunar, hour, gender, &config).unwrap();
                    check_chart(&c);
                }
            }
        }
    }
}

#[test]
fn second_annotation_rejected() {
    let c = male_1990();
    let mut board = PalaceBoard::new(
        c.year_stem,
        c.life_branch,
        c.body_branch,
        &xuanji_ziwei::decade::decade_table(c.bureau, true, c.life_branch),
    );
    board.palaces = c.palaces.clone();
    for p in board.palaces.iter_mut() {
        for s in p.stars.iter_mut() {
            s.palace_hua.clear();
        }
    }
    apply_self_hua(&mut board).unwrap();
    let once = board.palaces.clone();
    assert_eq!(once, c.palaces);
    assert_eq!(apply_self_hua(&mut board), Err(ZiweiError::AlreadyAnnotated));
    assert_eq!(board.palaces, once);
}
