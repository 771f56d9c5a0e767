use serde::Serialize;

use super::decompose::{decompose_hand, Decomposition};
use super::fu::FuBreakdown;
use super::point::PointsTable;
use super::yaku::{YakuContext, YakuMatch};
use crate::model::*;
use crate::util::common::{count_dora, count_red5};

// 役一覧に表示するドラ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoraCount {
    pub name: &'static str,
    pub fan: usize,
}

// 和了の評価結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WinContext {
    pub decomposition: Decomposition, // 採用した和了形の解釈
    pub yakus: Vec<YakuMatch>,        // 役一覧(ドラは含まない)
    pub doras: Vec<DoraCount>,        // ドラ, 赤ドラ
    pub fu_breakdown: FuBreakdown,    // 符の内訳
    pub fu: usize,                    // 符数
    pub fan: usize,                   // 飜数(ドラを含む), 役満の場合は0
    pub yakuman: usize,               // 役満倍率 (0: 通常役, 1: 役満, 2: 二倍役満)
    pub title: String,                // 満貫, 跳満, ...
    pub points: PointsTable,          // 親・子それぞれの支払い
    pub score: Point,                 // 和了得点 (本場を含む)
}

impl WinContext {
    // 翻数(役満の場合は役満倍率)の合計を1行で
    pub fn yaku_summary(&self) -> String {
        let mut v: Vec<String> =
            self.yakus.iter().map(|y| format!("{}({})", y.name, y.fan)).collect();
        v.extend(self.doras.iter().map(|d| format!("{}({})", d.name, d.fan)));
        v.join(", ")
    }
}

// 最も高得点となる解釈のWinContextを返却
// 和了形でない場合はNoValidDecomposition
// すべての解釈が無役の場合はNoApplicableYaku
pub fn evaluate_hand(hand: &Hand, ctx: &Context) -> HandResult<WinContext> {
    ctx.validate(hand.has_kan())?;

    let decomps = decompose_hand(hand);
    if decomps.is_empty() {
        return Err(HandError::NoValidDecomposition); // 和了形以外
    }

    let all_tiles = hand.all_tiles();
    let n_dora = count_dora(&all_tiles, &ctx.doras);
    let n_red_dora = count_red5(&all_tiles);

    let mut best: Option<(WinContext, usize)> = None;
    for d in decomps {
        let yc = YakuContext::new(&hand.table, &d, ctx);
        let (yakus, is_yakuman, n) = yc.calc_yaku();
        if yakus.is_empty() {
            continue; // 無役
        }
        let fu_breakdown = yc.calc_fu();

        let (fan, yakuman) = if is_yakuman { (0, n) } else { (n + n_dora + n_red_dora, 0) };
        let mut doras = vec![];
        if !is_yakuman {
            if n_dora != 0 {
                doras.push(DoraCount {
                    name: "Dora",
                    fan: n_dora,
                });
            }
            if n_red_dora != 0 {
                doras.push(DoraCount {
                    name: "Aka Dora",
                    fan: n_red_dora,
                });
            }
        }

        let fu = fu_breakdown.total;
        let points = PointsTable::new(fu, fan, yakuman, ctx.honba);
        let score = points.score(ctx.is_dealer(), ctx.is_drawn);
        let raw_fu = fu_breakdown.raw;
        let win = WinContext {
            decomposition: d,
            yakus,
            doras,
            fu_breakdown,
            fu,
            fan,
            yakuman,
            title: points.title.clone(),
            points,
            score,
        };

        // 和了形に複数の解釈が可能な場合,最も得点の高いものを採用
        // 同点の場合は 翻数 -> 符 -> 切り上げ前の符 の順で比較
        let is_better = match &best {
            Some((b, b_raw)) => {
                (win.score, win.fan, win.fu, raw_fu) > (b.score, b.fan, b.fu, *b_raw)
            }
            None => true,
        };
        if is_better {
            best = Some((win, raw_fu));
        }
    }

    match best {
        Some((win, _)) => Ok(win),
        None => Err(HandError::NoApplicableYaku),
    }
}

#[cfg(test)]
fn evaluate(groups: &[&str], wt: &str, ctx: &Context) -> HandResult<WinContext> {
    let hand = Hand::from_groups(groups, wt)?;
    evaluate_hand(&hand, ctx)
}

#[test]
fn test_evaluate_honitsu_iipeikou() {
    let ctx = Context::default();
    let win = evaluate(&["rrrd", "EEEw", "234p", "234p", "11p"], "1p", &ctx).unwrap();
    assert_eq!(win.fan, 7);
    assert_eq!(win.fu, 50);
    assert_eq!(win.fu_breakdown.raw, 48);
    assert_eq!(win.decomposition.wait, Wait::Tanki);
    assert_eq!(win.title, "Haneman");
    assert_eq!(win.score, 18000);
    assert_eq!((win.points.dealer_ron, win.points.dealer_tsumo), (18000, 6000));
    assert_eq!(win.points.non_dealer_ron, 12000);
    assert_eq!(
        (win.points.non_dealer_tsumo, win.points.non_dealer_tsumo_by_dealer),
        (3000, 6000)
    );
    assert_eq!(win.yaku_summary(), "Iipeikou(1), Yakuhai(3), Honitsu(3)");
}

#[test]
fn test_evaluate_is_deterministic() {
    let ctx = Context {
        seat_wind: WS,
        riichi: true,
        doras: vec![Tile(TP, 5)],
        honba: 1,
        ..Default::default()
    };
    let hand = Hand::from_groups(&["123m", "067p", "345s", "789s", "99m"], "7p").unwrap();
    let a = evaluate_hand(&hand, &ctx).unwrap();
    let b = evaluate_hand(&hand, &ctx).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_evaluate_dora() {
    let ctx = Context {
        seat_wind: WS,
        riichi: true,
        doras: vec![Tile(TP, 5)],
        ..Default::default()
    };
    // リーチ, 平和, ドラ1, 赤ドラ1
    let win = evaluate(&["123m", "406p", "345s", "789s", "99m"], "4p", &ctx).unwrap();
    assert_eq!(win.yaku_summary(), "Riichi(1), Pinfu(1), Dora(1), Aka Dora(1)");
    assert_eq!(win.fan, 4);
    assert_eq!(win.fu, 30);
    assert_eq!(win.score, 7700);

    // ドラだけでは和了できない
    let ctx = Context {
        doras: vec![Tile(TM, 2)],
        ..Default::default()
    };
    let res = evaluate(&["123mo", "456m", "789p", "345s", "99s"], "3s", &ctx);
    assert_eq!(res.unwrap_err(), HandError::NoApplicableYaku);
}

#[test]
fn test_evaluate_errors() {
    let ctx = Context::default();
    let res = evaluate(&["135m", "EEEw", "SSSw", "123p", "Nw"], "Nw", &ctx);
    assert_eq!(res.unwrap_err(), HandError::NoValidDecomposition);

    let mut ctx = Context::default();
    ctx.flags.haiteiraoyue = true;
    let res = evaluate(&["rrrd", "EEEw", "234p", "234p", "11p"], "1p", &ctx);
    assert_eq!(res.unwrap_err(), HandError::HaiteiRon);
}

#[test]
fn test_evaluate_yakuman() {
    let ctx = Context {
        seat_wind: WS,
        is_drawn: true,
        doras: vec![Tile(TZ, DW)],
        honba: 2,
        ..Default::default()
    };
    let win = evaluate(&["wwwd", "gggd", "rrrd", "234s", "EEw"], "4s", &ctx).unwrap();
    assert_eq!(win.yakuman, 1);
    assert_eq!(win.fan, 0);
    assert!(win.doras.is_empty());
    assert_eq!(win.title, "Yakuman");
    // 8000×2 + 16000 + 本場 600
    assert_eq!(win.score, 32600);
}

#[test]
fn test_evaluate_prefers_higher_score() {
    // 二盃口(3) > 七対子(2)
    let ctx = Context::default();
    let win = evaluate(&["223344m", "667788p", "55s"], "5s", &ctx).unwrap();
    assert!(win.yakus.iter().any(|y| y.name == "Ryanpeikou"));

    // 三連刻は刻子として解釈すると三暗刻
    let ctx = Context {
        is_drawn: true,
        ..Default::default()
    };
    let win = evaluate(&["111m", "222m", "333m", "789s", "55p"], "9s", &ctx).unwrap();
    assert!(win.yakus.iter().any(|y| y.name == "Sanankou"));
}
