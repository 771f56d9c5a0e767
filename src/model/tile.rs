use std::str::FromStr;

use serde::ser;

use super::*;
use crate::util::common::tiles_from_group;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile(pub Type, pub Tnum); // (type index, number index)

impl Tile {
    // 赤5の場合,通常の5を返却. それ以外の場合はコピーをそのまま返却.
    #[inline]
    pub fn to_normal(self) -> Self {
        if self.1 == 0 { Self(self.0, 5) } else { self }
    }

    #[inline]
    pub fn is_red5(&self) -> bool {
        self.0 != TZ && self.1 == 0
    }

    // 数牌
    #[inline]
    pub fn is_suit(&self) -> bool {
        self.0 != TZ
    }

    // 字牌
    #[inline]
    pub fn is_hornor(&self) -> bool {
        self.0 == TZ
    }

    // 1,9牌
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.0 != TZ && (self.1 == 1 || self.1 == 9)
    }

    // 么九牌
    #[inline]
    pub fn is_end(&self) -> bool {
        self.0 == TZ || self.1 == 1 || self.1 == 9
    }

    // 風牌
    #[inline]
    pub fn is_wind(&self) -> bool {
        self.0 == TZ && WE <= self.1 && self.1 <= WN
    }

    // 三元牌
    #[inline]
    pub fn is_doragon(&self) -> bool {
        self.0 == TZ && DW <= self.1 && self.1 <= DR
    }

    // ドラ表示牌の次の牌(ドラ)を返却
    pub fn next_dora(self) -> Self {
        let Tile(ti, ni) = self.to_normal();
        let ni = if ti == TZ {
            match ni {
                WN => WE,
                DR => DW,
                n => n + 1,
            }
        } else {
            match ni {
                9 => 1,
                n => n + 1,
            }
        };
        Self(ti, ni)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_hornor() {
            let s = match self.1 {
                WE => "Ew",
                WS => "Sw",
                WW => "Ww",
                WN => "Nw",
                DW => "wd",
                DG => "gd",
                DR => "rd",
                _ => "??",
            };
            write!(f, "{}", s)
        } else {
            write!(f, "{}{}", self.1, ['m', 'p', 's'][self.0])
        }
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromStr for Tile {
    type Err = HandError;

    // 1枚の牌表記 ("1m", "0p", "Ew", "rd" など)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tiles, is_open) = tiles_from_group(s)?;
        if tiles.len() != 1 || is_open {
            return Err(HandError::InvalidTileToken(s.to_string()));
        }
        Ok(tiles[0])
    }
}

impl PartialOrd for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tile {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if self.0 != other.0 {
            return self.0.cmp(&other.0);
        }

        // 赤5は通常の5の直前に並べる
        let a = if self.1 == 0 { (5, 0) } else { (self.1, 1) };
        let b = if other.1 == 0 { (5, 0) } else { (other.1, 1) };
        a.cmp(&b)
    }
}

impl ser::Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

// [TileTable]
pub type TileRow = [usize; TNUM];
pub type TileTable = [TileRow; TYPE];

#[test]
fn test_tile_order() {
    let mut v = vec![Tile(TZ, DR), Tile(TP, 5), Tile(TP, 0), Tile(TM, 9), Tile(TP, 4)];
    v.sort();
    assert_eq!(
        v,
        vec![Tile(TM, 9), Tile(TP, 4), Tile(TP, 0), Tile(TP, 5), Tile(TZ, DR)]
    );
}

#[test]
fn test_tile_symbol() {
    assert_eq!("0p".parse::<Tile>().unwrap(), Tile(TP, 0));
    assert_eq!("Nw".parse::<Tile>().unwrap(), Tile(TZ, WN));
    assert_eq!("gd".parse::<Tile>().unwrap(), Tile(TZ, DG));
    assert_eq!(Tile(TS, 7).to_string(), "7s");
    assert_eq!(Tile(TZ, DW).to_string(), "wd");
    assert!("11m".parse::<Tile>().is_err());
    assert!("5x".parse::<Tile>().is_err());
}

#[test]
fn test_next_dora() {
    assert_eq!(Tile(TM, 9).next_dora(), Tile(TM, 1));
    assert_eq!(Tile(TS, 0).next_dora(), Tile(TS, 6));
    assert_eq!(Tile(TZ, WN).next_dora(), Tile(TZ, WE));
    assert_eq!(Tile(TZ, DR).next_dora(), Tile(TZ, DW));
    assert_eq!(Tile(TZ, WS).next_dora(), Tile(TZ, WW));
}
