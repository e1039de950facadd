//! Star placement.
//!
//! 紫微 is read from the bureau × lunar-day table; its five companions sit at
//! fixed steps behind it. 天府 mirrors 紫微 across the 寅申 axis and leads
//! its own seven companions forward. The remaining stars each hang off one
//! of hour, month, year stem or year branch.
//!
//! Placement never fails. A star whose key has no table entry is left out
//! and a warning is recorded instead.
//!
//! Clean-room implementation from the 安星诀 rules.

use xuanji_base::{Branch, Stem, lu_branch};

use crate::bureau::Bureau;
use crate::palace::StarData;
use crate::sihua::sihua_of;
use crate::star::{StarName, brightness};

/// 紫微 branch index by lunar day (column) for each bureau pace 2..=6.
///
/// Divide the day by the pace, borrowing the smallest `x` that makes it
/// exact. Count the quotient from 寅, then move `x` palaces back when `x` is
/// odd or forward when it is even.
const ZIWEI_TABLE: [[u8; 30]; 5] = [
    // 水二局
    [1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11, 0, 0, 1, 1, 2, 2, 3, 3, 4],
    // 木三局
    [4, 1, 2, 5, 2, 3, 6, 3, 4, 7, 4, 5, 8, 5, 6, 9, 6, 7, 10, 7, 8, 11, 8, 9, 0, 9, 10, 1, 10, 11],
    // 金四局
    [11, 4, 1, 2, 0, 5, 2, 3, 1, 6, 3, 4, 2, 7, 4, 5, 3, 8, 5, 6, 4, 9, 6, 7, 5, 10, 7, 8, 6, 11],
    // 土五局
    [6, 11, 4, 1, 2, 7, 0, 5, 2, 3, 8, 1, 6, 3, 4, 9, 2, 7, 4, 5, 10, 3, 8, 5, 6, 11, 4, 9, 6, 7],
    // 火六局
    [9, 6, 11, 4, 1, 2, 10, 7, 0, 5, 2, 3, 11, 8, 1, 6, 3, 4, 0, 9, 2, 7, 4, 5, 1, 10, 3, 8, 5, 6],
];

const ZIWEI_GROUP: [(StarName, i32); 5] = [
    (StarName::TianJi, -1),
    (StarName::TaiYang, -3),
    (StarName::WuQu, -4),
    (StarName::TianTong, -5),
    (StarName::LianZhen, -8),
];

const TIANFU_GROUP: [(StarName, i32); 7] = [
    (StarName::TaiYin, 1),
    (StarName::TanLang, 2),
    (StarName::JuMen, 3),
    (StarName::TianXiang, 4),
    (StarName::TianLiang, 5),
    (StarName::QiSha, 6),
    (StarName::PoJun, 10),
];

/// Keys the placement rules read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementInput {
    pub bureau: Bureau,
    /// Lunar day 1..=30.
    pub lunar_day: u8,
    /// Lunar month 1..=12 after leap-month resolution.
    pub lunar_month: u8,
    /// Double-hour index 0..=11.
    pub hour_index: u8,
    pub year_stem: Stem,
    pub year_branch: Branch,
}

/// Placed stars, indexed by branch, and any warnings raised on the way.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StarPlacement {
    pub stars: [Vec<StarData>; 12],
    pub warnings: Vec<String>,
}

impl StarPlacement {
    fn put(&mut self, branch: Branch, name: StarName, year_stem: Stem) {
        self.stars[branch.index() as usize].push(StarData {
            name,
            brightness: brightness(name, branch),
            star_type: name.star_type(),
            sihua: sihua_of(year_stem, name),
            palace_hua: Vec::new(),
        });
    }

    fn warn(&mut self, message: String) {
        log::warn!("{message}");
        self.warnings.push(message);
    }

    /// Branch holding `star`, if placed.
    pub fn branch_of(&self, star: StarName) -> Option<Branch> {
        self.stars
            .iter()
            .position(|v| v.iter().any(|s| s.name == star))
            .map(|i| Branch::from_index(i as i32))
    }
}

/// 紫微 position for a bureau and lunar day, `None` outside days 1..=30.
pub fn ziwei_branch(bureau: Bureau, lunar_day: u8) -> Option<Branch> {
    let row = ZIWEI_TABLE.get(bureau.pace() as usize - 2)?;
    let idx = row.get((lunar_day as usize).checked_sub(1)?)?;
    Some(Branch::from_index(*idx as i32))
}

/// 天府 mirrors 紫微: the two sum to 寅 + 寅 (mod 12).
pub const fn tianfu_branch(ziwei: Branch) -> Branch {
    Branch::from_index(16 - ziwei.index() as i32)
}

const fn tian_kui(stem: Stem) -> Branch {
    match stem {
        Stem::Jia | Stem::Wu | Stem::Geng => Branch::Chou,
        Stem::Yi | Stem::Ji => Branch::Zi,
        Stem::Bing | Stem::Ding => Branch::Hai,
        Stem::Ren | Stem::Gui => Branch::Mao,
        Stem::Xin => Branch::Yin,
    }
}

const fn tian_yue(stem: Stem) -> Branch {
    match stem {
        Stem::Jia | Stem::Wu | Stem::Geng => Branch::Wei,
        Stem::Yi | Stem::Ji => Branch::Shen,
        Stem::Bing | Stem::Ding => Branch::You,
        Stem::Ren | Stem::Gui => Branch::Si,
        Stem::Xin => Branch::Wu,
    }
}

/// 天马 sits at the branch that clashes the triad's 长生.
const fn tian_ma(year_branch: Branch) -> Branch {
    match year_branch {
        Branch::Yin | Branch::Wu | Branch::Xu => Branch::Shen,
        Branch::Shen | Branch::Zi | Branch::Chen => Branch::Yin,
        Branch::Hai | Branch::Mao | Branch::Wei => Branch::Si,
        Branch::Si | Branch::You | Branch::Chou => Branch::Hai,
    }
}

/// Starting branch of 火星. The 亥卯未 triad has no entry.
const fn huo_xing_base(year_branch: Branch) -> Option<Branch> {
    match year_branch {
        Branch::Yin | Branch::Wu | Branch::Xu => Some(Branch::Chou),
        Branch::Shen | Branch::Zi | Branch::Chen => Some(Branch::Yin),
        Branch::Si | Branch::You | Branch::Chou => Some(Branch::Mao),
        Branch::Hai | Branch::Mao | Branch::Wei => None,
    }
}

const fn ling_xing_base(year_branch: Branch) -> Branch {
    match year_branch {
        Branch::Xu => Branch::Mao,
        _ => Branch::Xu,
    }
}

/// Place every star for the given keys.
pub fn place_stars(input: &PlacementInput) -> StarPlacement {
    let mut out = StarPlacement::default();
    let ys = input.year_stem;
    let h = input.hour_index as i32;
    let m = input.lunar_month as i32;

    let Some(ziwei) = ziwei_branch(input.bureau, input.lunar_day) else {
        out.warn(format!(
            "紫微 has no position for {} day {}; stars not placed",
            input.bureau.name(),
            input.lunar_day
        ));
        return out;
    };

    out.put(ziwei, StarName::ZiWei, ys);
    for (star, step) in ZIWEI_GROUP {
        out.put(ziwei.offset(step), star, ys);
    }
    let tianfu = tianfu_branch(ziwei);
    out.put(tianfu, StarName::TianFu, ys);
    for (star, step) in TIANFU_GROUP {
        out.put(tianfu.offset(step), star, ys);
    }

    out.put(Branch::Xu.offset(-h), StarName::WenChang, ys);
    out.put(Branch::Chen.offset(h), StarName::WenQu, ys);
    out.put(Branch::Chen.offset(m - 1), StarName::ZuoFu, ys);
    out.put(Branch::Xu.offset(-(m - 1)), StarName::YouBi, ys);

    out.put(tian_kui(ys), StarName::TianKui, ys);
    out.put(tian_yue(ys), StarName::TianYue, ys);
    out.put(tian_ma(input.year_branch), StarName::TianMa, ys);

    let lu_cun = lu_branch(ys);
    out.put(lu_cun, StarName::LuCun, ys);
    out.put(lu_cun.offset(1), StarName::QingYang, ys);
    out.put(lu_cun.offset(-1), StarName::TuoLuo, ys);

    match huo_xing_base(input.year_branch) {
        Some(base) => out.put(base.offset(h), StarName::HuoXing, ys),
        None => out.warn(format!(
            "火星 has no base for year branch {}; omitted",
            input.year_branch.name()
        )),
    }
    out.put(ling_xing_base(input.year_branch).offset(h), StarName::LingXing, ys);

    out.put(Branch::Hai.offset(-h), StarName::DiKong, ys);
    out.put(Branch::Hai.offset(h), StarName::DiJie, ys);

    let hong_luan = Branch::Mao.offset(-(input.year_branch.index() as i32));
    out.put(hong_luan, StarName::HongLuan, ys);
    out.put(hong_luan.offset(6), StarName::TianXi, ys);

    out.put(Branch::Chou.offset(m - 1), StarName::TianYao, ys);
    out.put(Branch::You.offset(m - 1), StarName::TianXing, ys);

    log::debug!(
        "placed stars: 紫微 {} 天府 {} ({} warnings)",
        ziwei.name(),
        tianfu.name(),
        out.warnings.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bureau::ALL_BUREAUS;
    use crate::star::ALL_STARS;

    fn input(year_branch: Branch) -> PlacementInput {
        PlacementInput {
            bureau: Bureau::Earth5,
            lunar_day: 21,
            lunar_month: 4,
            hour_index: 7,
            year_stem: Stem::Geng,
            year_branch,
        }
    }

    /// 紫微 by dividing the day by the pace, computed step by step.
    fn by_division(pace: u8, day: u8) -> Branch {
        let borrow = (0..pace).find(|x| (day + x) % pace == 0).unwrap_or(0);
        let quotient = (day + borrow) / pace;
        let base = Branch::Yin.offset(quotient as i32 - 1);
        if borrow % 2 == 1 {
            base.offset(-(borrow as i32))
        } else {
            base.offset(borrow as i32)
        }
    }

    #[test]
    fn ziwei_table_follows_division_rule() {
        for b in ALL_BUREAUS {
            for day in 1..=30 {
                assert_eq!(
                    ziwei_branch(b, day),
                    Some(by_division(b.pace(), day)),
                    "{} day {day}",
                    b.name()
                );
            }
        }
    }

    #[test]
    fn ziwei_table_cells() {
        assert_eq!(ziwei_branch(Bureau::Water2, 1), Some(Branch::Chou));
        assert_eq!(ziwei_branch(Bureau::Water2, 2), Some(Branch::Yin));
        assert_eq!(ziwei_branch(Bureau::Water2, 30), Some(Branch::Chen));
        assert_eq!(ziwei_branch(Bureau::Wood3, 1), Some(Branch::Chen));
        assert_eq!(ziwei_branch(Bureau::Metal4, 2), Some(Branch::Chen));
        assert_eq!(ziwei_branch(Bureau::Earth5, 2), Some(Branch::Hai));
        assert_eq!(ziwei_branch(Bureau::Earth5, 21), Some(Branch::Xu));
        assert_eq!(ziwei_branch(Bureau::Fire6, 1), Some(Branch::You));
        assert_eq!(ziwei_branch(Bureau::Water2, 0), None);
        assert_eq!(ziwei_branch(Bureau::Water2, 31), None);
    }

    #[test]
    fn tianfu_mirror() {
        assert_eq!(tianfu_branch(Branch::Chen), Branch::Zi);
        assert_eq!(tianfu_branch(Branch::Yin), Branch::Yin);
        assert_eq!(tianfu_branch(Branch::Shen), Branch::Shen);
        assert_eq!(tianfu_branch(Branch::Zi), Branch::Chen);
    }

    #[test]
    fn every_star_once() {
        let p = place_stars(&input(Branch::Wu));
        assert!(p.warnings.is_empty());
        for star in ALL_STARS {
            let n: usize = p
                .stars
                .iter()
                .map(|v| v.iter().filter(|s| s.name == star).count())
                .sum();
            assert_eq!(n, 1, "{}", star.name());
        }
    }

    #[test]
    fn huo_xing_gap_warns() {
        let p = place_stars(&input(Branch::Mao));
        assert_eq!(p.branch_of(StarName::HuoXing), None);
        assert_eq!(p.warnings.len(), 1);
        assert!(p.warnings[0].contains("火星"));
        assert!(p.branch_of(StarName::LingXing).is_some());
    }

    #[test]
    fn bad_day_skips_placement() {
        let mut i = input(Branch::Wu);
        i.lunar_day = 0;
        let p = place_stars(&i);
        assert!(p.stars.iter().all(Vec::is_empty));
        assert_eq!(p.warnings.len(), 1);
    }

    #[test]
    fn birth_year_markers() {
        let p = place_stars(&input(Branch::Wu));
        let yang = p.stars[7].iter().find(|s| s.name == StarName::TaiYang).unwrap();
        assert_eq!(yang.sihua, Some(crate::sihua::SihuaKind::Lu));
        let zw = p.stars[10].iter().find(|s| s.name == StarName::ZiWei).unwrap();
        assert_eq!(zw.sihua, None);
    }
}
