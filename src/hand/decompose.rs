use serde::Serialize;

use crate::model::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Shape {
    Normal,       // 4面子1雀頭
    Chiitoitsu,   // 七対子
    Kokushimusou, // 国士無双
}

// 和了形の解釈の1つ (上がり牌の位置を含む)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decomposition {
    pub shape: Shape,
    pub melds: Vec<Meld>,         // 副露と雀頭を含むすべての面子 (国士無双は空)
    pub win_index: Option<Index>, // 上がり牌を含む面子のindex (国士無双はNone)
    pub wait: Wait,
}

impl Decomposition {
    #[inline]
    pub fn winning_meld(&self) -> Option<&Meld> {
        self.win_index.map(|i| &self.melds[i])
    }

    pub fn pair(&self) -> Option<&Meld> {
        self.melds.iter().find(|m| m.is_pair())
    }
}

// 手牌を和了形として解釈可能なすべてのパターンに分解して返却
// 和了形でない場合は空のリストを返却
pub fn decompose_hand(hand: &Hand) -> Vec<Decomposition> {
    let mut res = vec![];
    let wt = hand.winning_tile.to_normal();

    let mut partitions: Vec<(Shape, Vec<Meld>)> = vec![];
    for sets in decompose_into_normal_win(&hand.table) {
        partitions.push((Shape::Normal, sets));
    }
    if hand.melds.is_empty() {
        for pairs in decompose_into_chiitoitsu_win(&hand.table) {
            partitions.push((Shape::Chiitoitsu, pairs));
        }
        if is_kokushimusou_win(&hand.table) {
            res.push(Decomposition {
                shape: Shape::Kokushimusou,
                melds: vec![],
                win_index: None,
                wait: Wait::Tanki,
            });
        }
    }

    for (shape, mut melds) in partitions {
        melds.extend(hand.melds.iter().copied());
        melds.sort_by_key(|m| (m.tile, m.kind, m.open));

        // 上がり牌を含む門前の面子ごとに待ちの形が異なる解釈となる
        let mut seen: Vec<Meld> = vec![];
        for (i, m) in melds.iter().enumerate() {
            if m.open || m.kind == MeldKind::Quad || !m.contains(wt) || seen.contains(m) {
                continue;
            }
            seen.push(*m);
            res.push(Decomposition {
                shape,
                melds: melds.clone(),
                win_index: Some(i),
                wait: Wait::from_meld(m, wt),
            });
        }
    }

    res
}

// 手牌(副露以外)を面子+雀頭に分解したすべての組み合わせを返却
pub fn decompose_into_normal_win(hand: &TileTable) -> Vec<Vec<Meld>> {
    let mut tt = *hand;
    for ti in 0..TZ {
        tt[ti][0] = 0; // 赤5のフラグは分解に使用しない
    }

    let n: usize = tt.iter().map(|tr| tr.iter().sum::<usize>()).sum();
    if n % 3 != 2 {
        return vec![];
    }

    let mut res = vec![];
    let mut sets = vec![];
    decompose_sets(&mut tt, false, &mut sets, &mut res);

    for r in &mut res {
        r.sort();
    }
    res.sort();
    res.dedup();
    res
}

// 最も小さい牌から順に 刻子 -> 順子 -> 雀頭 として取り除けるかを試す
fn decompose_sets(
    tt: &mut TileTable,
    has_pair: bool,
    sets: &mut Vec<Meld>,
    res: &mut Vec<Vec<Meld>>,
) {
    let (ti, ni) = match lowest_tile(tt) {
        Some(t) => t,
        None => {
            if has_pair {
                res.push(sets.clone());
            }
            return;
        }
    };
    let t = Tile(ti, ni);

    // 刻子
    if tt[ti][ni] >= 3 {
        tt[ti][ni] -= 3;
        sets.push(Meld::new(MeldKind::Triplet, t, false));
        decompose_sets(tt, has_pair, sets, res);
        sets.pop();
        tt[ti][ni] += 3;
    }

    // 順子
    if ti != TZ && ni <= 7 && tt[ti][ni + 1] > 0 && tt[ti][ni + 2] > 0 {
        for i in 0..3 {
            tt[ti][ni + i] -= 1;
        }
        sets.push(Meld::new(MeldKind::Sequence, t, false));
        decompose_sets(tt, has_pair, sets, res);
        sets.pop();
        for i in 0..3 {
            tt[ti][ni + i] += 1;
        }
    }

    // 雀頭
    if !has_pair && tt[ti][ni] >= 2 {
        tt[ti][ni] -= 2;
        sets.push(Meld::new(MeldKind::Pair, t, false));
        decompose_sets(tt, true, sets, res);
        sets.pop();
        tt[ti][ni] += 2;
    }
}

fn lowest_tile(tt: &TileTable) -> Option<(Type, Tnum)> {
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if tt[ti][ni] > 0 {
                return Some((ti, ni));
            }
        }
    }
    None
}

// 手牌が完成形(七対子)ならすべて対子に分解して返却
// 同じ牌4枚を2つの対子とはみなさない
pub fn decompose_into_chiitoitsu_win(hand: &TileTable) -> Vec<Vec<Meld>> {
    let mut res = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            match hand[ti][ni] {
                0 => {}
                2 => res.push(Meld::new(MeldKind::Pair, Tile(ti, ni), false)),
                _ => return vec![],
            }
        }
    }

    if res.len() == 7 { vec![res] } else { vec![] }
}

// 国士無双
pub fn is_kokushimusou_win(hand: &TileTable) -> bool {
    let mut count = 0;
    for ti in 0..TZ {
        if hand[ti][1] == 0 || hand[ti][9] == 0 {
            return false;
        }
        for ni in 2..9 {
            if hand[ti][ni] != 0 {
                return false;
            }
        }
        count += hand[ti][1] + hand[ti][9]
    }
    for ni in WE..=DR {
        if hand[TZ][ni] == 0 {
            return false;
        }
        count += hand[TZ][ni]
    }

    count == HAND
}

#[cfg(test)]
fn hand(groups: &[&str], wt: &str) -> Hand {
    Hand::from_groups(groups, wt).unwrap()
}

#[test]
fn test_decompose_iipeikou_shape() {
    // 11223344p は 11+234+234 と 44+123+123 の2通り
    let h = hand(&["rrrd", "EEEw", "234p", "234p", "11p"], "1p");
    let sets = decompose_into_normal_win(&h.table);
    assert_eq!(sets.len(), 2);

    let ds = decompose_hand(&h);
    assert_eq!(ds.len(), 2);
    let waits: Vec<Wait> = ds.iter().map(|d| d.wait).collect();
    assert!(waits.contains(&Wait::Tanki));
    assert!(waits.contains(&Wait::Ryanmen));
}

#[test]
fn test_decompose_sanrenkou() {
    // 三連刻 111222333m は刻子3つと順子3つの2通り
    let h = hand(&["111m", "222m", "333m", "789s", "55p"], "9s");
    let sets = decompose_into_normal_win(&h.table);
    assert_eq!(sets.len(), 2);
    for s in &sets {
        assert_eq!(s.len(), 5);
    }
}

#[test]
fn test_decompose_not_win() {
    let h = hand(&["135m", "EEEw", "SSSw", "123p", "Nw"], "Nw");
    assert!(h.tiles.len() == 14);
    assert!(decompose_into_normal_win(&h.table).is_empty());
    assert!(decompose_hand(&h).is_empty());
}

#[test]
fn test_decompose_with_melds() {
    let h = hand(&["rrrdo", "5555mo", "11s", "8888s", "789m"], "7m");
    let ds = decompose_hand(&h);
    assert_eq!(ds.len(), 1);
    let d = &ds[0];
    assert_eq!(d.melds.len(), 5);
    assert_eq!(d.wait, Wait::Penchan);
    assert_eq!(
        d.winning_meld(),
        Some(&Meld::new(MeldKind::Sequence, Tile(TM, 7), false))
    );
}

#[test]
fn test_decompose_chiitoitsu() {
    let h = hand(&["11m", "99m", "22p", "55p", "77s", "EEw", "rrd"], "rd");
    let ds = decompose_hand(&h);
    assert_eq!(ds.len(), 1);
    assert_eq!(ds[0].shape, Shape::Chiitoitsu);
    assert_eq!(ds[0].wait, Wait::Tanki);

    // 4枚使いは七対子として認めない
    let h = hand(&["11m", "11m", "22p", "55p", "77s", "EEw", "rrd"], "rd");
    assert!(decompose_into_chiitoitsu_win(&h.table).is_empty());
}

#[test]
fn test_decompose_ryanpeikou_and_chiitoitsu() {
    // 二盃口形は七対子としても解釈できる
    let h = hand(&["112233m", "445566p", "77s"], "7s");
    let ds = decompose_hand(&h);
    assert!(ds.iter().any(|d| d.shape == Shape::Chiitoitsu));
    assert!(ds.iter().any(|d| d.shape == Shape::Normal));
}

#[test]
fn test_decompose_kokushimusou() {
    let h = hand(&["19m", "19p", "19s", "ESWNw", "wgrd", "1m"], "1m");
    let ds = decompose_hand(&h);
    assert_eq!(ds.len(), 1);
    assert_eq!(ds[0].shape, Shape::Kokushimusou);
    assert!(ds[0].melds.is_empty());
}

#[test]
fn test_decompose_random_hands() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    // 4面子1雀頭をランダムに組み立て
    // 分解結果がすべて元の牌と一致することを確認
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..500 {
        let mut tt = TileTable::default();
        let mut n = 0;
        while n < 4 {
            let ti = rng.gen_range(0..TYPE);
            let is_seq = ti != TZ && rng.gen_bool(0.6);
            if is_seq {
                let ni = rng.gen_range(1..=7);
                if (0..3).any(|i| tt[ti][ni + i] >= TILE) {
                    continue;
                }
                (0..3).for_each(|i| tt[ti][ni + i] += 1);
            } else {
                let ni = if ti == TZ { rng.gen_range(WE..=DR) } else { rng.gen_range(1..=9) };
                if tt[ti][ni] + 3 > TILE {
                    continue;
                }
                tt[ti][ni] += 3;
            }
            n += 1;
        }
        loop {
            let ti = rng.gen_range(0..TYPE);
            let ni = if ti == TZ { rng.gen_range(WE..=DR) } else { rng.gen_range(1..=9) };
            if tt[ti][ni] + 2 <= TILE {
                tt[ti][ni] += 2;
                break;
            }
        }

        let sets = decompose_into_normal_win(&tt);
        assert!(!sets.is_empty(), "{:?}", tt);
        for s in &sets {
            assert_eq!(s.len(), 5);
            assert_eq!(s.iter().filter(|m| m.is_pair()).count(), 1);
            let mut tt2 = TileTable::default();
            for m in s {
                for t in m.tiles() {
                    tt2[t.0][t.1] += 1;
                }
            }
            assert_eq!(tt, tt2);
        }
    }
}
