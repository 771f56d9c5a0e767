use crate::model::*;
use crate::util::misc::vec_count;

pub fn inc_tile(tt: &mut TileTable, tile: Tile) {
    let t = tile;
    tt[t.0][t.1] += 1;
    if t.1 == 0 {
        // 0は赤5のフラグなので本来の5をたてる
        tt[t.0][5] += 1;
    }
}

pub fn tiles_to_tile_table(tiles: &[Tile]) -> TileTable {
    let mut tt = TileTable::default();
    for &t in tiles {
        inc_tile(&mut tt, t);
    }
    tt
}

// ドラ表示牌のリストからドラのリストを返却
pub fn doras_from_indicators(indicators: &[Tile]) -> Vec<Tile> {
    indicators.iter().map(|t| t.next_dora()).collect()
}

// ドラの数を勘定 (同じドラが複数指定された場合は重複して数える)
pub fn count_dora(tiles: &[Tile], doras: &[Tile]) -> usize {
    let mut n_dora = 0;
    for d in doras {
        let d = d.to_normal();
        n_dora += tiles.iter().filter(|t| t.to_normal() == d).count();
    }
    n_dora
}

pub fn count_red5(tiles: &[Tile]) -> usize {
    tiles.iter().filter(|t| t.is_red5()).count()
}

// 不正な値を持つ牌でないかのチェック
pub fn is_valid_tile(t: Tile) -> bool {
    match t.0 {
        TM | TP | TS => t.1 < TNUM,
        TZ => WE <= t.1 && t.1 <= DR,
        _ => false,
    }
}

// グループ表記 ("234p", "rrrd", "EEEEwo" など) -> (牌のリスト, 副露フラグ)
pub fn tiles_from_group(exp: &str) -> HandResult<(Vec<Tile>, bool)> {
    let err = || HandError::InvalidTileToken(exp.to_string());

    let (body, is_open) = match exp.strip_suffix('o') {
        Some(b) => (b, true),
        None => (exp, false),
    };
    let chars: Vec<char> = body.chars().collect();
    if chars.len() < 2 {
        return Err(err());
    }

    let (suit, nums) = chars.split_last().ok_or_else(err)?;
    let mut tiles = vec![];
    for &c in nums {
        let t = match suit {
            'm' | 'p' | 's' => {
                let ti = match suit {
                    'm' => TM,
                    'p' => TP,
                    _ => TS,
                };
                let ni = c.to_digit(10).ok_or_else(err)? as usize;
                Tile(ti, ni)
            }
            'w' => Tile(TZ, wind_from_char(c).ok_or_else(err)?),
            'd' => Tile(
                TZ,
                match c {
                    'w' => DW,
                    'g' => DG,
                    'r' => DR,
                    _ => return Err(err()),
                },
            ),
            _ => return Err(err()),
        };
        tiles.push(t);
    }

    Ok((tiles, is_open))
}

// 牌のリストを面子(順子,刻子,槓子)に変換
pub fn meld_from_tiles(tiles: &[Tile], open: bool) -> HandResult<Meld> {
    let err = || {
        let s: Vec<String> = tiles.iter().map(|t| t.to_string()).collect();
        HandError::InvalidMeld(s.join(" "))
    };
    if tiles.len() < 3 {
        return Err(err());
    }

    let mut ts: Vec<Tile> = tiles.iter().map(|t| t.to_normal()).collect();
    ts.sort();
    if ts.iter().any(|t| t.0 != ts[0].0) {
        return Err(err());
    }

    let mut diffs = vec![];
    let mut ni0 = ts[0].1;
    for t in &ts[1..] {
        diffs.push(t.1 - ni0);
        ni0 = t.1;
    }

    let kind = if diffs.len() == 2 && vec_count(&diffs, &1) == 2 && ts[0].is_suit() {
        MeldKind::Sequence
    } else if diffs.len() == 2 && vec_count(&diffs, &0) == 2 {
        MeldKind::Triplet
    } else if diffs.len() == 3 && vec_count(&diffs, &0) == 3 {
        MeldKind::Quad
    } else {
        return Err(err());
    };

    Ok(Meld::new(kind, ts[0], open))
}

pub fn wind_from_char(c: char) -> Option<Tnum> {
    Some(match c {
        'E' => WE,
        'S' => WS,
        'W' => WW,
        'N' => WN,
        _ => return None,
    })
}

// 風の指定 ("e", "E", "Ew" など)
pub fn wind_from_str(s: &str) -> HandResult<Tnum> {
    let err = || HandError::InvalidTileToken(s.to_string());
    let body = s.strip_suffix('w').unwrap_or(s);
    let mut chars = body.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => wind_from_char(c.to_ascii_uppercase()).ok_or_else(err),
        _ => Err(err()),
    }
}

#[test]
fn test_tiles_from_group() {
    let (tiles, open) = tiles_from_group("234po").unwrap();
    assert!(open);
    assert_eq!(tiles, vec![Tile(TP, 2), Tile(TP, 3), Tile(TP, 4)]);

    let (tiles, open) = tiles_from_group("WWw").unwrap();
    assert!(!open);
    assert_eq!(tiles, vec![Tile(TZ, WW); 2]);

    let (tiles, _) = tiles_from_group("wwwd").unwrap();
    assert_eq!(tiles, vec![Tile(TZ, DW); 3]);

    assert!(tiles_from_group("hhho").is_err());
    assert!(tiles_from_group("ShSo").is_err());
    assert!(tiles_from_group("m").is_err());
    assert!(tiles_from_group("12x").is_err());
}

#[test]
fn test_meld_from_tiles() {
    let m = |s: &str| meld_from_tiles(&tiles_from_group(s).unwrap().0, true);
    assert_eq!(m("789s").unwrap(), Meld::new(MeldKind::Sequence, Tile(TS, 7), true));
    assert_eq!(m("406m").unwrap(), Meld::new(MeldKind::Sequence, Tile(TM, 4), true));
    assert_eq!(m("EEEEw").unwrap(), Meld::new(MeldKind::Quad, Tile(TZ, WE), true));
    assert_eq!(m("555p").unwrap(), Meld::new(MeldKind::Triplet, Tile(TP, 5), true));
    assert!(m("135m").is_err());
    assert!(m("11s").is_err());
    assert!(m("ESWw").is_err());
    assert!(m("rgwd").is_err());
}

#[test]
fn test_wind_from_str() {
    assert_eq!(wind_from_str("e"), Ok(WE));
    assert_eq!(wind_from_str("Ww"), Ok(WW));
    assert_eq!(wind_from_str("N"), Ok(WN));
    assert!(wind_from_str("x").is_err());
    assert!(wind_from_str("ES").is_err());
}

#[test]
fn test_count_dora() {
    let (tiles, _) = tiles_from_group("4056m").unwrap();
    assert_eq!(count_dora(&tiles, &[Tile(TM, 5)]), 2);
    assert_eq!(count_dora(&tiles, &[Tile(TM, 5), Tile(TM, 5)]), 4);
    assert_eq!(count_red5(&tiles), 1);
    assert_eq!(doras_from_indicators(&[Tile(TM, 4)]), vec![Tile(TM, 5)]);
}
