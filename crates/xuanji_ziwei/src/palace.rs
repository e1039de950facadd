//! The twelve palaces: life/body location, naming, stems and the board.
//!
//! Palaces are stored flat and indexed by branch (子 = 0). The life palace
//! is counted back from the month palace by the hour; the body palace
//! forward. Names run counter-clockwise from the life palace.
//!
//! Palace stems follow the five-tiger rule from 寅, after which 子 and 丑
//! reuse the stems of 寅 and 卯.

use serde::{Serialize, Serializer};
use xuanji_base::{ALL_BRANCHES, Branch, Stem};
use xuanji_time::LunarDate;

use crate::decade::DecadeRange;
use crate::error::ZiweiError;
use crate::sihua::{SelfHua, SihuaKind};
use crate::star::{Brightness, StarName, StarType};

// ---------------------------------------------------------------------------
// Names
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PalaceName {
    Life,
    Siblings,
    Spouse,
    Children,
    Wealth,
    Health,
    Travel,
    Friends,
    Career,
    Property,
    Fortune,
    Parents,
}

pub const ALL_PALACE_NAMES: [PalaceName; 12] = [
    PalaceName::Life,
    PalaceName::Siblings,
    PalaceName::Spouse,
    PalaceName::Children,
    PalaceName::Wealth,
    PalaceName::Health,
    PalaceName::Travel,
    PalaceName::Friends,
    PalaceName::Career,
    PalaceName::Property,
    PalaceName::Fortune,
    PalaceName::Parents,
];

impl PalaceName {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Life => "命宫",
            Self::Siblings => "兄弟",
            Self::Spouse => "夫妻",
            Self::Children => "子女",
            Self::Wealth => "财帛",
            Self::Health => "疾厄",
            Self::Travel => "迁移",
            Self::Friends => "交友",
            Self::Career => "官禄",
            Self::Property => "田宅",
            Self::Fortune => "福德",
            Self::Parents => "父母",
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Name of the palace at `branch` for a chart whose life palace is `life`.
    pub const fn at(life: Branch, branch: Branch) -> PalaceName {
        ALL_PALACE_NAMES[(life.index() as usize + 12 - branch.index() as usize) % 12]
    }
}

impl Serialize for PalaceName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Leap months
// ---------------------------------------------------------------------------

/// How an intercalary lunar month is counted for palace placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LeapMonthPolicy {
    /// Treat the leap month as the month it repeats.
    #[default]
    SameMonth,
    /// Treat the leap month as the following month.
    NextMonth,
    /// Days 1–15 count as the same month, 16 onward as the next.
    SplitAtFifteenth,
}

impl LeapMonthPolicy {
    /// Month number (1..=12) used for placement.
    pub const fn effective_month(self, date: &LunarDate) -> u8 {
        if !date.is_leap {
            return date.month;
        }
        let next = date.month % 12 + 1;
        match self {
            Self::SameMonth => date.month,
            Self::NextMonth => next,
            Self::SplitAtFifteenth if date.day > 15 => next,
            Self::SplitAtFifteenth => date.month,
        }
    }
}

// ---------------------------------------------------------------------------
// Location and stems
// ---------------------------------------------------------------------------

/// Life and body palace branches for a lunar month (1..=12) and hour index.
pub fn locate_life_body(month: u8, hour_index: u8) -> Result<(Branch, Branch), ZiweiError> {
    if !(1..=12).contains(&month) {
        return Err(ZiweiError::InvalidInput(format!("lunar month {month}")));
    }
    if hour_index > 11 {
        return Err(ZiweiError::InvalidInput(format!("hour index {hour_index}")));
    }
    let month_palace = Branch::Yin.offset(month as i32 - 1);
    Ok((
        month_palace.offset(-(hour_index as i32)),
        month_palace.offset(hour_index as i32),
    ))
}

/// Stem that opens the year at 寅 (五虎遁).
pub const fn tiger_stem(year_stem: Stem) -> Stem {
    Stem::from_index((year_stem.index() as i32 % 5) * 2 + 2)
}

/// Stems of all twelve palaces, indexed by branch.
pub fn palace_stems(year_stem: Stem) -> [Stem; 12] {
    let tiger = tiger_stem(year_stem);
    let mut stems: [Stem; 12] = std::array::from_fn(|b| tiger.offset(b as i32 - 2));
    stems[0] = stems[2];
    stems[1] = stems[3];
    stems
}

/// 命主 by life-palace branch.
pub const fn ming_zhu(life: Branch) -> StarName {
    match life {
        Branch::Zi => StarName::TanLang,
        Branch::Chou | Branch::Hai => StarName::JuMen,
        Branch::Yin | Branch::Xu => StarName::LuCun,
        Branch::Mao | Branch::You => StarName::WenQu,
        Branch::Chen | Branch::Shen => StarName::LianZhen,
        Branch::Si | Branch::Wei => StarName::WuQu,
        Branch::Wu => StarName::PoJun,
    }
}

/// 身主 by birth-year branch.
pub const fn shen_zhu(year_branch: Branch) -> StarName {
    match year_branch {
        Branch::Zi => StarName::HuoXing,
        Branch::Chou | Branch::Wei => StarName::TianXiang,
        Branch::Yin | Branch::Shen => StarName::TianLiang,
        Branch::Mao | Branch::You => StarName::TianTong,
        Branch::Chen | Branch::Xu => StarName::WenChang,
        Branch::Si | Branch::Hai => StarName::TianJi,
        Branch::Wu => StarName::LingXing,
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// A star as it sits in one palace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarData {
    pub name: StarName,
    pub brightness: Brightness,
    pub star_type: StarType,
    /// Birth-year transformation, set at most once.
    pub sihua: Option<SihuaKind>,
    /// Palace self-transformation tags; accumulate.
    pub palace_hua: Vec<SelfHua>,
}

/// One of the twelve palaces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Palace {
    /// Branch index 0..=11.
    pub id: u8,
    pub name: PalaceName,
    pub branch: Branch,
    pub heavenly_stem: Stem,
    /// Palace stem equals the year stem (子 and 丑 excluded).
    pub is_lai_yin: bool,
    pub is_shen_gong: bool,
    pub decade: DecadeRange,
    pub decade_index: u8,
    pub stars: Vec<StarData>,
}

impl Palace {
    pub fn has_star(&self, star: StarName) -> bool {
        self.stars.iter().any(|s| s.name == star)
    }
}

/// The twelve palaces under construction, indexed by branch.
#[derive(Debug, Clone, PartialEq)]
pub struct PalaceBoard {
    pub palaces: [Palace; 12],
    self_hua_applied: bool,
}

impl PalaceBoard {
    /// Lay out empty palaces with names, stems, 来因 and 身宫 flags, and
    /// decade ranges.
    pub fn new(
        year_stem: Stem,
        life: Branch,
        body: Branch,
        decades: &[(DecadeRange, u8); 12],
    ) -> Self {
        let stems = palace_stems(year_stem);
        let palaces = ALL_BRANCHES.map(|branch| {
            let i = branch.index() as usize;
            let (decade, decade_index) = decades[i];
            Palace {
                id: branch.index(),
                name: PalaceName::at(life, branch),
                branch,
                heavenly_stem: stems[i],
                is_lai_yin: stems[i] == year_stem && i >= 2,
                is_shen_gong: branch == body,
                decade,
                decade_index,
                stars: Vec::new(),
            }
        });
        Self {
            palaces,
            self_hua_applied: false,
        }
    }

    pub fn self_hua_applied(&self) -> bool {
        self.self_hua_applied
    }

    pub(crate) fn mark_self_hua_applied(&mut self) {
        self.self_hua_applied = true;
    }

    pub fn into_palaces(self) -> [Palace; 12] {
        self.palaces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn life_body_fixtures() {
        // 四月 未时
        assert_eq!(locate_life_body(4, 7).unwrap(), (Branch::Xu, Branch::Zi));
        // 七月 巳时
        assert_eq!(locate_life_body(7, 5).unwrap(), (Branch::Mao, Branch::Chou));
        // 正月 子时: both at 寅
        assert_eq!(locate_life_body(1, 0).unwrap(), (Branch::Yin, Branch::Yin));
        assert!(locate_life_body(13, 0).is_err());
        assert!(locate_life_body(1, 12).is_err());
    }

    #[test]
    fn names_run_counter_clockwise() {
        assert_eq!(PalaceName::at(Branch::Xu, Branch::Xu), PalaceName::Life);
        assert_eq!(PalaceName::at(Branch::Xu, Branch::You), PalaceName::Siblings);
        assert_eq!(PalaceName::at(Branch::Xu, Branch::Hai), PalaceName::Parents);
        assert_eq!(PalaceName::at(Branch::Xu, Branch::Wu), PalaceName::Career);
    }

    #[test]
    fn stems_with_zi_chou_override() {
        let names: String = palace_stems(Stem::Geng).iter().map(|s| s.name()).collect();
        assert_eq!(names, "戊己戊己庚辛壬癸甲乙丙丁");
        let names: String = palace_stems(Stem::Yi).iter().map(|s| s.name()).collect();
        assert_eq!(names, "戊己戊己庚辛壬癸甲乙丙丁");
        let names: String = palace_stems(Stem::Jia).iter().map(|s| s.name()).collect();
        assert_eq!(names, "丙丁丙丁戊己庚辛壬癸甲乙");
        assert_eq!(tiger_stem(Stem::Gui), Stem::Jia);
    }

    #[test]
    fn leap_policies() {
        let early = LunarDate::new(2023, 2, 10, true);
        let late = LunarDate::new(2023, 2, 20, true);
        assert_eq!(LeapMonthPolicy::SameMonth.effective_month(&late), 2);
        assert_eq!(LeapMonthPolicy::NextMonth.effective_month(&early), 3);
        assert_eq!(LeapMonthPolicy::SplitAtFifteenth.effective_month(&early), 2);
        assert_eq!(LeapMonthPolicy::SplitAtFifteenth.effective_month(&late), 3);
        let plain = LunarDate::new(2023, 12, 20, false);
        assert_eq!(LeapMonthPolicy::NextMonth.effective_month(&plain), 12);
        let leap12 = LunarDate::new(2033, 12, 1, true);
        assert_eq!(LeapMonthPolicy::NextMonth.effective_month(&leap12), 1);
    }

    #[test]
    fn lords() {
        assert_eq!(ming_zhu(Branch::Xu), StarName::LuCun);
        assert_eq!(shen_zhu(Branch::Wu), StarName::LingXing);
        assert_eq!(shen_zhu(Branch::Chou), StarName::TianXiang);
    }
}
