//! Four transformations (四化): birth-year markers and palace self-hua.
//!
//! Each stem sends four stars into 禄 权 科 忌 (letters A B C D). The birth
//! year stem marks stars once at placement. Each palace stem then tags the
//! same four stars again: `x` when the star sits in that palace, `i` when it
//! sits in the opposite palace.
//!
//! Clean-room implementation from the 十干四化 table.

use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};
use xuanji_base::Stem;

use crate::error::ZiweiError;
use crate::palace::{PalaceBoard, PalaceName};
use crate::star::StarName;

// ---------------------------------------------------------------------------
// SihuaKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SihuaKind {
    Lu,
    Quan,
    Ke,
    Ji,
}

pub const ALL_SIHUA: [SihuaKind; 4] = [SihuaKind::Lu, SihuaKind::Quan, SihuaKind::Ke, SihuaKind::Ji];

impl SihuaKind {
    /// Single-letter code used in chart tags.
    pub const fn letter(self) -> char {
        match self {
            Self::Lu => 'A',
            Self::Quan => 'B',
            Self::Ke => 'C',
            Self::Ji => 'D',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Lu => "禄",
            Self::Quan => "权",
            Self::Ke => "科",
            Self::Ji => "忌",
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl Serialize for SihuaKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.letter())
    }
}

/// Stars transformed by `stem`, in 禄 权 科 忌 order.
pub const fn sihua_stars(stem: Stem) -> [StarName; 4] {
    use StarName::*;
    match stem {
        Stem::Jia => [LianZhen, PoJun, WuQu, TaiYang],
        Stem::Yi => [TianJi, TianLiang, ZiWei, TaiYin],
        Stem::Bing => [TianTong, TianJi, WenChang, LianZhen],
        Stem::Ding => [TaiYin, TianTong, TianJi, JuMen],
        Stem::Wu => [TanLang, TaiYin, YouBi, TianJi],
        Stem::Ji => [WuQu, TanLang, TianLiang, WenQu],
        Stem::Geng => [TaiYang, WuQu, TaiYin, TianTong],
        Stem::Xin => [JuMen, TaiYang, WenQu, WenChang],
        Stem::Ren => [TianLiang, ZiWei, ZuoFu, WuQu],
        Stem::Gui => [PoJun, JuMen, TaiYin, TanLang],
    }
}

/// Transformation that `stem` gives `star`, if any.
pub fn sihua_of(stem: Stem, star: StarName) -> Option<SihuaKind> {
    sihua_stars(stem)
        .iter()
        .position(|&s| s == star)
        .map(|i| ALL_SIHUA[i])
}

// ---------------------------------------------------------------------------
// Palace self-hua
// ---------------------------------------------------------------------------

/// A palace-stem transformation tag on a star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelfHua {
    /// `true` for `i` (sent in from the opposite palace), `false` for `x`.
    pub inward: bool,
    pub kind: SihuaKind,
}

impl Display for SelfHua {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let dir = if self.inward { 'i' } else { 'x' };
        write!(f, "{dir}{}", self.kind.letter())
    }
}

impl Serialize for SelfHua {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Tag every star with the transformations of its own palace's stem and of
/// the opposite palace's stem.
///
/// Runs once per board; a second call returns
/// [`ZiweiError::AlreadyAnnotated`] and leaves the tags untouched.
pub fn apply_self_hua(board: &mut PalaceBoard) -> Result<(), ZiweiError> {
    if board.self_hua_applied() {
        return Err(ZiweiError::AlreadyAnnotated);
    }
    for p in 0..12 {
        let stem = board.palaces[p].heavenly_stem;
        let opposite = (p + 6) % 12;
        for star in board.palaces[p].stars.iter_mut() {
            if let Some(kind) = sihua_of(stem, star.name) {
                star.palace_hua.push(SelfHua { inward: false, kind });
            }
        }
        for star in board.palaces[opposite].stars.iter_mut() {
            if let Some(kind) = sihua_of(stem, star.name) {
                star.palace_hua.push(SelfHua { inward: true, kind });
            }
        }
    }
    board.mark_self_hua_applied();
    Ok(())
}

// ---------------------------------------------------------------------------
// Birth-year summary
// ---------------------------------------------------------------------------

/// Where one birth-year transformation landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SihuaInfo {
    pub kind: SihuaKind,
    pub star: StarName,
    /// `None` when the star was not placed on the chart.
    pub palace: Option<PalaceName>,
}

impl Display for SihuaInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.palace {
            Some(p) => write!(f, "{}：{}", p.name(), self.star.name()),
            None => write!(f, "{}(未入盘)", self.star.name()),
        }
    }
}

/// Locate the four birth-year transformations on a board.
pub fn sihua_info(board: &PalaceBoard, year_stem: Stem) -> [SihuaInfo; 4] {
    let stars = sihua_stars(year_stem);
    std::array::from_fn(|i| SihuaInfo {
        kind: ALL_SIHUA[i],
        star: stars[i],
        palace: board
            .palaces
            .iter()
            .find(|p| p.stars.iter().any(|s| s.name == stars[i]))
            .map(|p| p.name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use xuanji_base::ALL_STEMS;

    #[test]
    fn table_rows_are_distinct() {
        for s in ALL_STEMS {
            let row = sihua_stars(s);
            for i in 0..4 {
                for j in i + 1..4 {
                    assert_ne!(row[i], row[j], "{}", s.name());
                }
            }
        }
    }

    #[test]
    fn lookup() {
        assert_eq!(sihua_of(Stem::Geng, StarName::TaiYang), Some(SihuaKind::Lu));
        assert_eq!(sihua_of(Stem::Geng, StarName::TianTong), Some(SihuaKind::Ji));
        assert_eq!(sihua_of(Stem::Geng, StarName::ZiWei), None);
        assert_eq!(sihua_of(Stem::Wu, StarName::YouBi), Some(SihuaKind::Ke));
    }

    #[test]
    fn tag_display() {
        let t = SelfHua {
            inward: true,
            kind: SihuaKind::Ke,
        };
        assert_eq!(t.to_string(), "iC");
        let t = SelfHua {
            inward: false,
            kind: SihuaKind::Lu,
        };
        assert_eq!(t.to_string(), "xA");
    }

    #[test]
    fn info_display() {
        let placed = SihuaInfo {
            kind: SihuaKind::Lu,
            star: StarName::TaiYang,
            palace: Some(PalaceName::Career),
        };
        assert_eq!(placed.to_string(), "官禄：太阳");
        let missing = SihuaInfo {
            palace: None,
            ..placed
        };
        assert_eq!(missing.to_string(), "太阳(未入盘)");
    }
}
