use super::*;
use crate::util::common::{is_valid_tile, meld_from_tiles, tiles_from_group, tiles_to_tile_table};

// 評価対象の手牌
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    pub tiles: Vec<Tile>,     // 門前の手牌 (上がり牌を含む, 赤5はそのまま保持)
    pub table: TileTable,     // 門前の手牌のカウント
    pub melds: Vec<Meld>,     // 副露と暗槓 (分解の対象外)
    pub meld_tiles: Vec<Tile>, // 副露と暗槓の牌 (ドラ計算用)
    pub winning_tile: Tile,   // 上がり牌
}

impl Hand {
    // tiles: 門前の手牌, melds: (副露・暗槓の牌, 副露フラグ)のリスト
    // 門前の手牌が13枚の場合は上がり牌を追加
    pub fn new(
        mut tiles: Vec<Tile>,
        melds: Vec<(Vec<Tile>, bool)>,
        winning_tile: Tile,
    ) -> HandResult<Self> {
        for &t in tiles.iter().chain(melds.iter().flat_map(|m| m.0.iter())) {
            if !is_valid_tile(t) {
                return Err(HandError::InvalidTileToken(format!("{:?}", t)));
            }
        }
        if !is_valid_tile(winning_tile) {
            return Err(HandError::InvalidTileToken(format!("{:?}", winning_tile)));
        }

        let mut ms = vec![];
        let mut meld_tiles = vec![];
        for (mt, open) in &melds {
            ms.push(meld_from_tiles(mt, *open)?);
            meld_tiles.extend(mt.iter().copied());
        }

        match tiles.len() + ms.len() * 3 {
            HAND => {
                let wt = winning_tile.to_normal();
                if !tiles.iter().any(|t| t.to_normal() == wt) {
                    return Err(HandError::MissingWinTile(winning_tile));
                }
            }
            n if n == HAND - 1 => tiles.push(winning_tile),
            n => return Err(HandError::InvalidTileCount(n)),
        }

        let table = tiles_to_tile_table(&tiles);
        let mut total = table;
        for m in &ms {
            for t in m.tiles() {
                total[t.0][t.1] += 1;
            }
        }
        for ti in 0..TYPE {
            for ni in 1..TNUM {
                if total[ti][ni] > TILE {
                    return Err(HandError::TooManyCopies(Tile(ti, ni)));
                }
            }
        }

        Ok(Self {
            tiles,
            table,
            melds: ms,
            meld_tiles,
            winning_tile,
        })
    }

    // グループ表記のリストから手牌を生成
    // 副露("o"付き)と暗槓(同じ牌4枚)以外は門前の手牌
    pub fn from_groups<S: AsRef<str>>(groups: &[S], winning_tile: &str) -> HandResult<Self> {
        let winning_tile: Tile = winning_tile.parse()?;
        let mut tiles = vec![];
        let mut melds = vec![];
        for g in groups {
            let (ts, is_open) = tiles_from_group(g.as_ref())?;
            let is_kan = ts.len() == TILE && ts.iter().all(|t| t.to_normal() == ts[0].to_normal());
            if is_open || is_kan {
                melds.push((ts, is_open));
            } else {
                tiles.extend(ts);
            }
        }
        Self::new(tiles, melds, winning_tile)
    }

    #[inline]
    pub fn has_kan(&self) -> bool {
        self.melds.iter().any(|m| m.kind == MeldKind::Quad)
    }

    // 副露を含むすべての牌
    pub fn all_tiles(&self) -> Vec<Tile> {
        let mut v = self.tiles.clone();
        v.extend(self.meld_tiles.iter().copied());
        v
    }
}

#[test]
fn test_hand_from_groups() {
    let h = Hand::from_groups(&["rrrdo", "5555mo", "11s", "8888s", "789m"], "7m").unwrap();
    assert_eq!(h.tiles.len(), 5);
    assert_eq!(h.melds.len(), 3);
    assert_eq!(h.melds[2], Meld::new(MeldKind::Quad, Tile(TS, 8), false));
    assert!(h.melds[0].open);
    assert!(h.has_kan());
    assert_eq!(h.all_tiles().len(), 16);
}

#[test]
fn test_hand_adds_winning_tile() {
    let h = Hand::from_groups(&["rrrd", "EEEw", "234p", "234p", "1p"], "1p").unwrap();
    assert_eq!(h.tiles.len(), 14);
    assert_eq!(h.table[TP][1], 2);
}

#[test]
fn test_hand_errors() {
    let err = Hand::from_groups(&["SSSw"], "3s").unwrap_err();
    assert_eq!(err, HandError::InvalidTileCount(3));

    let err = Hand::from_groups(&["SSSw", "SSSw", "SSSw", "SSw", "SSSw", "SSw", "SSSw"], "3s");
    assert_eq!(err.unwrap_err(), HandError::InvalidTileCount(19));

    let err = Hand::from_groups(&["123m", "456m", "789m", "123p", "44p"], "9s");
    assert_eq!(err.unwrap_err(), HandError::MissingWinTile(Tile(TS, 9)));

    let err = Hand::from_groups(&["135mo", "123m", "456m", "789m", "44p"], "4p");
    assert!(matches!(err.unwrap_err(), HandError::InvalidMeld(_)));

    let err = Hand::from_groups(&["hhho", "SSSw", "SSSw", "SSSw", "SSw"], "3s");
    assert_eq!(err.unwrap_err(), HandError::InvalidTileToken("hhho".to_string()));

    let err = Hand::from_groups(&["111m", "111m", "234p", "234p", "55s"], "5s");
    assert_eq!(err.unwrap_err(), HandError::TooManyCopies(Tile(TM, 1)));

    let err = Hand::new(vec![Tile(TZ, 9)], vec![], Tile(TM, 1));
    assert!(matches!(err.unwrap_err(), HandError::InvalidTileToken(_)));
}
