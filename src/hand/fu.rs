use serde::Serialize;

use super::decompose::Shape;
use super::yaku::{Yaku, YakuContext};
use crate::model::*;

// 符の内訳の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Fu {
    Base,                   // 副底
    ClosedRon,              // 門前加符
    Tsumo,                  // ツモ符
    SimpleOpenTriplet,      // 中張牌の明刻
    SimpleClosedTriplet,    // 中張牌の暗刻
    NonSimpleOpenTriplet,   // 么九牌の明刻
    NonSimpleClosedTriplet, // 么九牌の暗刻
    SimpleOpenKan,          // 中張牌の明槓
    SimpleClosedKan,        // 中張牌の暗槓
    NonSimpleOpenKan,       // 么九牌の明槓
    NonSimpleClosedKan,     // 么九牌の暗槓
    YakuhaiPair,            // 役牌の雀頭
    EdgeWait,               // 辺張待ち
    ClosedWait,             // 嵌張待ち
    SingleWait,             // 単騎待ち
    OpenPinfu,              // 喰い平和形
    Chiitoitsu,             // 七対子
    Rounding,               // 切り上げ
}

impl Fu {
    pub fn label(self) -> &'static str {
        match self {
            Fu::Base => "Base",
            Fu::ClosedRon => "Closed Ron",
            Fu::Tsumo => "Tsumo",
            Fu::SimpleOpenTriplet => "Simple Open Triplet",
            Fu::SimpleClosedTriplet => "Simple Closed Triplet",
            Fu::NonSimpleOpenTriplet => "Non-Simple Open Triplet",
            Fu::NonSimpleClosedTriplet => "Non-Simple Closed Triplet",
            Fu::SimpleOpenKan => "Simple Open Kan",
            Fu::SimpleClosedKan => "Simple Closed Kan",
            Fu::NonSimpleOpenKan => "Non-Simple Open Kan",
            Fu::NonSimpleClosedKan => "Non-Simple Closed Kan",
            Fu::YakuhaiPair => "Yakuhai Pair",
            Fu::EdgeWait => "Edge Wait",
            Fu::ClosedWait => "Closed Wait",
            Fu::SingleWait => "Single Wait",
            Fu::OpenPinfu => "Open Pinfu",
            Fu::Chiitoitsu => "Chiitoitsu",
            Fu::Rounding => "Rounding",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FuItem {
    pub fu: Fu,
    pub label: &'static str,
    pub points: usize,
}

// 符の内訳 (itemsの合計はtotalに一致)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FuBreakdown {
    pub items: Vec<FuItem>,
    pub raw: usize, // 切り上げ前
    pub total: usize,
}

impl FuBreakdown {
    fn add(&mut self, fu: Fu, points: usize) {
        self.items.push(FuItem {
            fu,
            label: fu.label(),
            points,
        });
        self.raw += points;
    }

    fn finish(mut self) -> Self {
        let total = round_up_fu(self.raw);
        if total != self.raw {
            let d = total - self.raw;
            self.items.push(FuItem {
                fu: Fu::Rounding,
                label: Fu::Rounding.label(),
                points: d,
            });
        }
        self.total = total;
        self
    }

    #[cfg(test)]
    pub fn fu_list(&self) -> Vec<Fu> {
        self.items.iter().map(|i| i.fu).collect()
    }
}

// １の位は切り上げ
#[inline]
pub fn round_up_fu(fu: usize) -> usize {
    (fu + 9) / 10 * 10
}

impl<'a> YakuContext<'a> {
    pub fn calc_fu(&self) -> FuBreakdown {
        let mut fb = FuBreakdown::default();
        let d = self.decomposition();
        let ctx = self.context();

        if d.shape == Shape::Chiitoitsu {
            fb.add(Fu::Chiitoitsu, 25);
            fb.total = 25; // 切り上げなし
            return fb;
        }

        // 副底
        fb.add(Fu::Base, 20);

        let is_pinfu = Yaku::Pinfu.eval(self).is_some();
        if is_pinfu && ctx.is_drawn {
            fb.total = 20; // 平和ツモ
            return fb;
        }

        // 和了り方
        if ctx.is_drawn {
            fb.add(Fu::Tsumo, 2);
        } else if !self.is_open() {
            fb.add(Fu::ClosedRon, 10);
        }

        // 面子
        for (i, m) in d.melds.iter().enumerate() {
            if !m.is_triplet() {
                continue;
            }
            let is_open = self.is_open_meld(i);
            let is_end = m.tile.is_end();
            let is_kan = m.kind == MeldKind::Quad;
            let (fu, points) = match (is_end, is_open, is_kan) {
                (false, true, false) => (Fu::SimpleOpenTriplet, 2),
                (false, true, true) => (Fu::SimpleOpenKan, 2),
                (false, false, false) => (Fu::SimpleClosedTriplet, 4),
                (false, false, true) => (Fu::SimpleClosedKan, 4),
                (true, true, false) => (Fu::NonSimpleOpenTriplet, 4),
                (true, true, true) => (Fu::NonSimpleOpenKan, 4),
                (true, false, false) => (Fu::NonSimpleClosedTriplet, 8),
                (true, false, true) => (Fu::NonSimpleClosedKan, 8),
            };
            fb.add(fu, if is_kan { points * 4 } else { points });
        }

        // 雀頭
        if self.is_yakuhai_pair() {
            fb.add(Fu::YakuhaiPair, 2);
        }

        // 待ちの形
        match d.wait {
            Wait::Penchan => fb.add(Fu::EdgeWait, 2),
            Wait::Kanchan => fb.add(Fu::ClosedWait, 2),
            Wait::Tanki => fb.add(Fu::SingleWait, 2),
            Wait::Ryanmen | Wait::Shanpon => {}
        }

        // 鳴きありで符が付かない場合は30符
        if self.is_open() && fb.raw == 20 {
            fb.add(Fu::OpenPinfu, 10);
        }

        fb.finish()
    }
}

#[cfg(test)]
fn calc_fu_for(groups: &[&str], wt: &str, ctx: &Context) -> Vec<FuBreakdown> {
    use super::decompose::decompose_hand;

    let hand = Hand::from_groups(groups, wt).unwrap();
    decompose_hand(&hand)
        .iter()
        .map(|d| YakuContext::new(&hand.table, d, ctx).calc_fu())
        .collect()
}

#[cfg(test)]
fn ctx_tsumo(seat: Tnum, prevalent: Tnum) -> Context {
    Context {
        seat_wind: seat,
        prevalent_wind: prevalent,
        is_drawn: true,
        ..Default::default()
    }
}

#[test]
fn test_round_up_fu() {
    assert_eq!(round_up_fu(22), 30);
    assert_eq!(round_up_fu(20), 20);
    assert_eq!(round_up_fu(21), 30);
    assert_eq!(round_up_fu(110), 110);
}

#[test]
fn test_fu_with_kans() {
    use Fu::*;
    let res = calc_fu_for(&["rrrdo", "5555mo", "11s", "8888s", "789m"], "7m", &ctx_tsumo(WE, WE));
    assert_eq!(res.len(), 1);
    let fb = &res[0];
    assert_eq!(
        fb.fu_list(),
        vec![Base, Tsumo, SimpleOpenKan, SimpleClosedKan, NonSimpleOpenTriplet, EdgeWait, Rounding]
    );
    assert_eq!(fb.raw, 52);
    assert_eq!(fb.total, 60);
    assert_eq!(fb.items.iter().map(|i| i.points).sum::<usize>(), fb.total);
}

#[test]
fn test_fu_open_hands() {
    use Fu::*;
    let ctx = ctx_tsumo(WE, WE);
    let res = calc_fu_for(&["555po", "234m", "11s", "rrrdo", "789m"], "7m", &ctx);
    assert_eq!(res[0].total, 30);

    let res = calc_fu_for(&["rrrdo", "567m", "567p", "55s", "456s"], "6s", &ctx);
    assert_eq!(res[0].fu_list(), vec![Base, Tsumo, NonSimpleOpenTriplet, Rounding]);
    assert_eq!(res[0].total, 30);

    // 鳴きありのロンで符がない場合
    let ctx = Context::default();
    let res = calc_fu_for(&["234po", "567m", "567p", "55s", "456s"], "6s", &ctx);
    assert_eq!(res[0].fu_list(), vec![Base, OpenPinfu]);
    assert_eq!(res[0].total, 30);
}

#[test]
fn test_fu_winds() {
    use Fu::*;
    // 場風の雀頭, 明槓, 暗槓, 嵌張
    let ctx = ctx_tsumo(WE, WW);
    let res = calc_fu_for(&["123mo", "rrrrdo", "EEEEw", "WWw", "456p"], "5p", &ctx);
    assert_eq!(res.len(), 1);
    assert_eq!(
        res[0].fu_list(),
        vec![Base, Tsumo, NonSimpleClosedKan, NonSimpleOpenKan, YakuhaiPair, ClosedWait, Rounding]
    );
    assert_eq!(res[0].raw, 74);
    assert_eq!(res[0].total, 80);

    let res = calc_fu_for(&["123mo", "rrrrdo", "EEEEw", "WWw", "456p"], "Ww", &ctx);
    assert_eq!(res[0].total, 80);
    assert!(res[0].fu_list().contains(&SingleWait));
}

#[test]
fn test_fu_ron_completed_triplet() {
    use Fu::*;
    // ロンで完成した刻子は明刻
    let ctx = Context::default();
    let res = calc_fu_for(&["111mo", "rrrd", "345s", "11s", "EEEw"], "Ew", &ctx);
    assert_eq!(res.len(), 1);
    assert_eq!(
        res[0].fu_list(),
        vec![Base, NonSimpleOpenTriplet, NonSimpleOpenTriplet, NonSimpleClosedTriplet, Rounding]
    );
    assert_eq!(res[0].total, 40);

    let res = calc_fu_for(&["444m", "789p", "555so", "rrrrd", "11s"], "1s", &ctx_tsumo(WE, WE));
    assert_eq!(
        res[0].fu_list(),
        vec![
            Base,
            Tsumo,
            SimpleClosedTriplet,
            SimpleOpenTriplet,
            NonSimpleClosedKan,
            SingleWait,
            Rounding,
        ]
    );
    assert_eq!(res[0].total, 70);
}

#[test]
fn test_fu_closed_ron_single_wait() {
    use Fu::*;
    let ctx = Context::default();
    let res = calc_fu_for(&["rrrd", "EEEw", "234p", "234p", "11p"], "1p", &ctx);
    let tanki = res.iter().find(|fb| fb.fu_list().contains(&SingleWait)).unwrap();
    assert_eq!(tanki.raw, 48);
    assert_eq!(tanki.total, 50);
    let ryanmen = res.iter().find(|fb| !fb.fu_list().contains(&SingleWait)).unwrap();
    assert_eq!(ryanmen.raw, 46);
    assert_eq!(ryanmen.total, 50);
}

#[test]
fn test_fu_pinfu_and_chiitoitsu() {
    use Fu::*;
    let res = calc_fu_for(&["123m", "456m", "789p", "345s", "99s"], "3s", &ctx_tsumo(WS, WE));
    assert_eq!(res[0].fu_list(), vec![Base]);
    assert_eq!(res[0].total, 20);

    let res = calc_fu_for(&["123m", "456m", "789p", "345s", "99s"], "3s", &Context::default());
    assert_eq!(res[0].fu_list(), vec![Base, ClosedRon]);
    assert_eq!(res[0].total, 30);

    let groups = ["11m", "99m", "22p", "55p", "77s", "EEw", "rrd"];
    let res = calc_fu_for(&groups, "rd", &Context::default());
    assert_eq!(res[0].fu_list(), vec![Chiitoitsu]);
    assert_eq!(res[0].total, 25);
}
