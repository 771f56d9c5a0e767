use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum MeldKind {
    Pair,     // 雀頭
    Sequence, // 順子
    Triplet,  // 刻子
    Quad,     // 槓子
}

// tileは順子の場合は先頭の牌 (赤5は通常の5として保持)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Meld {
    pub kind: MeldKind,
    pub tile: Tile,
    pub open: bool,
}

impl Meld {
    #[inline]
    pub fn new(kind: MeldKind, tile: Tile, open: bool) -> Self {
        Self {
            kind,
            tile: tile.to_normal(),
            open,
        }
    }

    // 面子を構成する牌のリスト
    pub fn tiles(&self) -> Vec<Tile> {
        let Tile(ti, ni) = self.tile;
        match self.kind {
            MeldKind::Pair => vec![self.tile; 2],
            MeldKind::Sequence => vec![Tile(ti, ni), Tile(ti, ni + 1), Tile(ti, ni + 2)],
            MeldKind::Triplet => vec![self.tile; 3],
            MeldKind::Quad => vec![self.tile; 4],
        }
    }

    #[inline]
    pub fn contains(&self, t: Tile) -> bool {
        let t = t.to_normal();
        match self.kind {
            MeldKind::Sequence => t.0 == self.tile.0 && self.tile.1 <= t.1 && t.1 < self.tile.1 + 3,
            _ => t == self.tile,
        }
    }

    #[inline]
    pub fn is_sequence(&self) -> bool {
        self.kind == MeldKind::Sequence
    }

    // 刻子または槓子
    #[inline]
    pub fn is_triplet(&self) -> bool {
        matches!(self.kind, MeldKind::Triplet | MeldKind::Quad)
    }

    #[inline]
    pub fn is_pair(&self) -> bool {
        self.kind == MeldKind::Pair
    }

    // 面子が么九牌を含むかどうか
    pub fn has_end(&self) -> bool {
        match self.kind {
            MeldKind::Sequence => self.tile.1 == 1 || self.tile.1 == 7,
            _ => self.tile.is_end(),
        }
    }
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tiles = self.tiles();
        if self.tile.is_hornor() {
            let s = self.tile.to_string();
            let (c, suffix) = s.split_at(1);
            write!(f, "{}{}", c.repeat(tiles.len()), suffix)?;
        } else {
            for t in &tiles {
                write!(f, "{}", t.1)?;
            }
            write!(f, "{}", ['m', 'p', 's'][self.tile.0])?;
        }
        if self.open {
            write!(f, "o")?;
        }
        Ok(())
    }
}

// 待ちの形
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Wait {
    Ryanmen, // 両面
    Kanchan, // 嵌張
    Penchan, // 辺張
    Tanki,   // 単騎
    Shanpon, // 双碰
}

impl Wait {
    // 上がり牌を含む面子から待ちの形を判定
    pub fn from_meld(m: &Meld, winning_tile: Tile) -> Self {
        let wt = winning_tile.to_normal();
        match m.kind {
            MeldKind::Pair => Wait::Tanki,
            MeldKind::Triplet | MeldKind::Quad => Wait::Shanpon,
            MeldKind::Sequence => {
                let pos = wt.1 - m.tile.1;
                match pos {
                    1 => Wait::Kanchan,
                    0 if m.tile.1 == 7 => Wait::Penchan, // 89 -> 7
                    2 if m.tile.1 == 1 => Wait::Penchan, // 12 -> 3
                    _ => Wait::Ryanmen,
                }
            }
        }
    }
}

#[test]
fn test_meld_display() {
    assert_eq!(Meld::new(MeldKind::Sequence, Tile(TP, 2), true).to_string(), "234po");
    assert_eq!(Meld::new(MeldKind::Quad, Tile(TZ, WE), false).to_string(), "EEEEw");
    assert_eq!(Meld::new(MeldKind::Triplet, Tile(TZ, DR), false).to_string(), "rrrd");
    assert_eq!(Meld::new(MeldKind::Pair, Tile(TS, 0), false).to_string(), "55s");
}

#[test]
fn test_wait_from_meld() {
    let seq = |n| Meld::new(MeldKind::Sequence, Tile(TM, n), false);
    assert_eq!(Wait::from_meld(&seq(7), Tile(TM, 7)), Wait::Penchan);
    assert_eq!(Wait::from_meld(&seq(1), Tile(TM, 3)), Wait::Penchan);
    assert_eq!(Wait::from_meld(&seq(4), Tile(TM, 5)), Wait::Kanchan);
    assert_eq!(Wait::from_meld(&seq(4), Tile(TM, 6)), Wait::Ryanmen);
    assert_eq!(Wait::from_meld(&seq(1), Tile(TM, 1)), Wait::Ryanmen);
    assert_eq!(Wait::from_meld(&seq(7), Tile(TM, 9)), Wait::Ryanmen);
    let pair = Meld::new(MeldKind::Pair, Tile(TS, 1), false);
    assert_eq!(Wait::from_meld(&pair, Tile(TS, 1)), Wait::Tanki);
}
