//! Star catalogue: names, categories and the brightness (庙旺) grid.
//!
//! Thirty-two stars are placed: the fourteen main stars, eight auxiliaries,
//! seven malefics and three romance stars. Brightness rows start at 寅 and
//! run through 丑, the traditional layout of the grid.
//!
//! Clean-room implementation from the classical 星曜庙旺表.

use serde::{Serialize, Serializer};
use xuanji_base::Branch;

// ---------------------------------------------------------------------------
// StarName
// ---------------------------------------------------------------------------

/// Every star the placement engine knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StarName {
    ZiWei,
    TianJi,
    TaiYang,
    WuQu,
    TianTong,
    LianZhen,
    TianFu,
    TaiYin,
    TanLang,
    JuMen,
    TianXiang,
    TianLiang,
    QiSha,
    PoJun,
    WenChang,
    WenQu,
    ZuoFu,
    YouBi,
    TianKui,
    TianYue,
    LuCun,
    TianMa,
    QingYang,
    TuoLuo,
    HuoXing,
    LingXing,
    DiKong,
    DiJie,
    TianXing,
    HongLuan,
    TianXi,
    TianYao,
}

pub const ALL_STARS: [StarName; 32] = [
    StarName::ZiWei,
    StarName::TianJi,
    StarName::TaiYang,
    StarName::WuQu,
    StarName::TianTong,
    StarName::LianZhen,
    StarName::TianFu,
    StarName::TaiYin,
    StarName::TanLang,
    StarName::JuMen,
    StarName::TianXiang,
    StarName::TianLiang,
    StarName::QiSha,
    StarName::PoJun,
    StarName::WenChang,
    StarName::WenQu,
    StarName::ZuoFu,
    StarName::YouBi,
    StarName::TianKui,
    StarName::TianYue,
    StarName::LuCun,
    StarName::TianMa,
    StarName::QingYang,
    StarName::TuoLuo,
    StarName::HuoXing,
    StarName::LingXing,
    StarName::DiKong,
    StarName::DiJie,
    StarName::TianXing,
    StarName::HongLuan,
    StarName::TianXi,
    StarName::TianYao,
];

impl StarName {
    pub const fn name(self) -> &'static str {
        match self {
            Self::ZiWei => "紫微",
            Self::TianJi => "天机",
            Self::TaiYang => "太阳",
            Self::WuQu => "武曲",
            Self::TianTong => "天同",
            Self::LianZhen => "廉贞",
            Self::TianFu => "天府",
            Self::TaiYin => "太阴",
            Self::TanLang => "贪狼",
            Self::JuMen => "巨门",
            Self::TianXiang => "天相",
            Self::TianLiang => "天梁",
            Self::QiSha => "七杀",
            Self::PoJun => "破军",
            Self::WenChang => "文昌",
            Self::WenQu => "文曲",
            Self::ZuoFu => "左辅",
            Self::YouBi => "右弼",
            Self::TianKui => "天魁",
            Self::TianYue => "天钺",
            Self::LuCun => "禄存",
            Self::TianMa => "天马",
            Self::QingYang => "擎羊",
            Self::TuoLuo => "陀罗",
            Self::HuoXing => "火星",
            Self::LingXing => "铃星",
            Self::DiKong => "地空",
            Self::DiJie => "地劫",
            Self::TianXing => "天刑",
            Self::HongLuan => "红鸾",
            Self::TianXi => "天喜",
            Self::TianYao => "天姚",
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn star_type(self) -> StarType {
        match self {
            Self::ZiWei
            | Self::TianJi
            | Self::TaiYang
            | Self::WuQu
            | Self::TianTong
            | Self::LianZhen
            | Self::TianFu
            | Self::TaiYin
            | Self::TanLang
            | Self::JuMen
            | Self::TianXiang
            | Self::TianLiang
            | Self::QiSha
            | Self::PoJun => StarType::Main,
            Self::WenChang
            | Self::WenQu
            | Self::ZuoFu
            | Self::YouBi
            | Self::TianKui
            | Self::TianYue
            | Self::LuCun
            | Self::TianMa => StarType::Auxiliary,
            Self::QingYang
            | Self::TuoLuo
            | Self::HuoXing
            | Self::LingXing
            | Self::DiKong
            | Self::DiJie
            | Self::TianXing => StarType::Malefic,
            Self::HongLuan | Self::TianXi | Self::TianYao => StarType::Romance,
        }
    }

    pub fn from_name(name: &str) -> Option<StarName> {
        ALL_STARS.into_iter().find(|s| s.name() == name)
    }
}

impl Serialize for StarName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// StarType
// ---------------------------------------------------------------------------

/// Star category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StarType {
    Main,
    Auxiliary,
    Malefic,
    Romance,
}

impl StarType {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Auxiliary => "auxiliary",
            Self::Malefic => "malefic",
            Self::Romance => "romance",
        }
    }
}

impl Serialize for StarType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Brightness
// ---------------------------------------------------------------------------

/// Seven-step brightness scale, brightest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Brightness {
    Miao,
    Wang,
    De,
    Li,
    Ping,
    Bu,
    Xian,
}

impl Brightness {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Miao => "庙",
            Self::Wang => "旺",
            Self::De => "得",
            Self::Li => "利",
            Self::Ping => "平",
            Self::Bu => "不",
            Self::Xian => "陷",
        }
    }

    const fn from_char(c: char) -> Brightness {
        match c {
            '庙' => Self::Miao,
            '旺' => Self::Wang,
            '得' => Self::De,
            '利' => Self::Li,
            '不' => Self::Bu,
            '陷' => Self::Xian,
            _ => Self::Ping,
        }
    }
}

impl Serialize for Brightness {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Rows from 寅 to 丑. `_` marks a slot the star never occupies.
const fn brightness_row(star: StarName) -> Option<&'static str> {
    Some(match star {
        StarName::ZiWei => "旺旺得旺庙庙旺旺得旺平庙",
        StarName::TianJi => "得旺利平庙陷得旺利平庙陷",
        StarName::TaiYang => "旺庙旺旺旺得得陷不陷陷不",
        StarName::WuQu => "得利庙平旺庙得利庙平旺庙",
        StarName::TianTong => "利平平庙陷不旺平平庙旺不",
        StarName::LianZhen => "庙平利陷平利庙平利陷平利",
        StarName::TianFu => "庙得庙平旺庙得旺庙平旺庙",
        StarName::TaiYin => "旺陷陷陷不不利不旺庙庙庙",
        StarName::TanLang => "平利庙陷旺庙平利庙陷旺庙",
        StarName::JuMen => "庙庙陷旺旺不庙庙陷旺旺不",
        StarName::TianXiang => "庙陷得得庙得庙陷得得庙庙",
        StarName::TianLiang => "庙庙庙陷庙旺陷得庙陷庙旺",
        StarName::QiSha => "庙旺庙平旺庙庙庙庙平旺庙",
        StarName::PoJun => "得陷旺平庙旺得陷旺平庙旺",
        StarName::WenChang => "陷利得庙陷利得庙陷利得庙",
        StarName::WenQu => "平旺得庙陷旺得庙陷旺得庙",
        StarName::HuoXing | StarName::LingXing => "庙利陷得庙利陷得庙利陷得",
        StarName::QingYang => "_陷庙_陷庙_陷庙_陷庙",
        StarName::TuoLuo => "陷_庙陷_庙陷_庙陷_庙",
        StarName::DiKong | StarName::DiJie => "陷陷陷陷陷陷陷陷陷陷陷陷",
        _ => return None,
    })
}

/// Brightness of `star` when it sits in `branch`. Stars without a row read 平.
pub fn brightness(star: StarName, branch: Branch) -> Brightness {
    let Some(row) = brightness_row(star) else {
        return Brightness::Ping;
    };
    let slot = (branch.index() as usize + 10) % 12;
    row.chars()
        .nth(slot)
        .map_or(Brightness::Ping, Brightness::from_char)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xuanji_base::ALL_BRANCHES;

    #[test]
    fn fourteen_main_stars() {
        let main = ALL_STARS
            .iter()
            .filter(|s| s.star_type() == StarType::Main)
            .count();
        assert_eq!(main, 14);
        for (i, s) in ALL_STARS.iter().enumerate() {
            assert_eq!(s.index() as usize, i);
            assert_eq!(StarName::from_name(s.name()), Some(*s));
        }
    }

    #[test]
    fn rows_cover_twelve_slots() {
        for s in ALL_STARS {
            if let Some(row) = brightness_row(s) {
                assert_eq!(row.chars().count(), 12, "{}", s.name());
            }
        }
    }

    #[test]
    fn grid_lookups() {
        assert_eq!(brightness(StarName::ZiWei, Branch::Yin), Brightness::Wang);
        assert_eq!(brightness(StarName::ZiWei, Branch::Chou), Brightness::Miao);
        assert_eq!(brightness(StarName::ZiWei, Branch::Zi), Brightness::Ping);
        assert_eq!(brightness(StarName::TaiYang, Branch::Mao), Brightness::Miao);
        assert_eq!(brightness(StarName::TaiYang, Branch::Zi), Brightness::Xian);
        assert_eq!(brightness(StarName::QingYang, Branch::Yin), Brightness::Ping);
        assert_eq!(brightness(StarName::QingYang, Branch::Wu), Brightness::Xian);
        assert_eq!(brightness(StarName::QingYang, Branch::Chen), Brightness::Miao);
        assert_eq!(brightness(StarName::TianMa, Branch::Shen), Brightness::Ping);
    }

    #[test]
    fn void_stars_always_fall() {
        for b in ALL_BRANCHES {
            assert_eq!(brightness(StarName::DiKong, b), Brightness::Xian);
            assert_eq!(brightness(StarName::DiJie, b), Brightness::Xian);
        }
    }
}
