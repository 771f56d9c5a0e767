use serde::Serialize;

use crate::model::*;

// (トータルの点数・ロン, ツモ・子の支払い, ツモ・親の支払い)
// 親の和了の場合, ツモ・親の支払いは0
pub type Points = (Point, Point, Point);

fn ceil(n: Point) -> Point {
    (n + 99) / 100 * 100
}

pub fn calc_base_point(fu: usize, fan: usize, yakuman: usize) -> Point {
    if yakuman != 0 {
        return (8000 * yakuman) as Point;
    }

    let base = match fan {
        ..5 => fu
            .checked_mul(1 << (fan + 2))
            .filter(|&b| b < 2000)
            .unwrap_or(2000), // 満貫
        5 => 2000,
        6..8 => 3000,   // 跳満
        8..11 => 4000,  // 倍満
        11..13 => 6000, // 三倍満
        13.. => 8000,   // 数え役満
    };
    base as Point
}

pub fn get_score_title(base_point: Point, yakuman: usize) -> String {
    match yakuman {
        0 => match base_point {
            2000 => "Mangan",
            3000 => "Haneman",
            4000 => "Baiman",
            6000 => "Sanbaiman",
            8000 => "Kazoe Yakuman",
            _ => "",
        },
        1 => "Yakuman",
        2 => "Double Yakuman",
        3 => "Triple Yakuman",
        _ => "Multiple Yakuman",
    }
    .to_string()
}

// 和了者の支払い (ロン, ツモ・子の支払い, ツモ・親の支払い)を返却
// 本場はロンで1本場300点, ツモで1本場につき各100点
pub fn calc_points(
    is_dealer: bool,
    fu: usize,
    fan: usize,
    yakuman: usize,
    honba: usize,
) -> (Points, String) {
    let base = calc_base_point(fu, fan, yakuman);
    let title = get_score_title(base, yakuman);
    let hb = honba as Point * 100;
    if is_dealer {
        ((ceil(base * 6) + hb * 3, ceil(base * 2) + hb, 0), title)
    } else {
        ((ceil(base * 4) + hb * 3, ceil(base) + hb, ceil(base * 2) + hb), title)
    }
}

// 親と子の両方の支払い
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointsTable {
    pub dealer_ron: Point,
    pub dealer_tsumo: Point,        // 子の支払い (各)
    pub non_dealer_ron: Point,
    pub non_dealer_tsumo: Point,    // 子の支払い
    pub non_dealer_tsumo_by_dealer: Point, // 親の支払い
    pub title: String,
}

impl PointsTable {
    pub fn new(fu: usize, fan: usize, yakuman: usize, honba: usize) -> Self {
        let (d, title) = calc_points(true, fu, fan, yakuman, honba);
        let (nd, _) = calc_points(false, fu, fan, yakuman, honba);
        Self {
            dealer_ron: d.0,
            dealer_tsumo: d.1,
            non_dealer_ron: nd.0,
            non_dealer_tsumo: nd.1,
            non_dealer_tsumo_by_dealer: nd.2,
            title,
        }
    }

    // 和了者が受け取る点数
    pub fn score(&self, is_dealer: bool, is_drawn: bool) -> Point {
        match (is_dealer, is_drawn) {
            (true, false) => self.dealer_ron,
            (true, true) => self.dealer_tsumo * 3,
            (false, false) => self.non_dealer_ron,
            (false, true) => self.non_dealer_tsumo * 2 + self.non_dealer_tsumo_by_dealer,
        }
    }
}

// 翻と符を直接指定した場合の点数 (calculatorモード)
pub fn calculate(fan: usize, fu: usize, honba: usize) -> HandResult<PointsTable> {
    if fan == 0 {
        return Err(HandError::NoHan);
    }
    if fu == 0 {
        return Err(HandError::NoFu);
    }
    Ok(PointsTable::new(fu, fan, 0, honba))
}

// cargo test --release print_points_table -- --nocapture
#[test]
fn print_points_table() {
    let fu_list = [20, 25, 30, 40, 50, 60, 70, 80, 90, 100, 110];

    println!("点数計算表 (子) ============================================");
    for fu in fu_list {
        print!("[{fu:3}符] ");
        for fan in 1..=4 {
            let (scores, _) = calc_points(false, fu, fan, 0, 0);
            print!("{fan}飜:{:4}({:4}/{:4}) ", scores.0, scores.1, scores.2)
        }
        println!();
    }
    for fan in 5..=13 {
        let (scores, title) = calc_points(false, 20, fan, 0, 0);
        println!(
            "{fan:2}飜:{:5}({:4}/{:5}) {title}",
            scores.0, scores.1, scores.2
        );
    }
    println!();

    println!("点数計算表 (親) ============================================");
    for fu in fu_list {
        print!("[{fu:3}符] ");
        for fan in 1..=4 {
            let (scores, _) = calc_points(true, fu, fan, 0, 0);
            print!("{fan}飜:{:5}({:4}) ", scores.0, scores.1)
        }
        println!();
    }
    for fan in 5..=13 {
        let (scores, title) = calc_points(true, 20, fan, 0, 0);
        println!("{fan:2}飜:{:5}({:5}) {title}", scores.0, scores.1);
    }
    println!();
}

#[test]
fn test_calc_points() {
    // 子 30符1翻
    assert_eq!(calc_points(false, 30, 1, 0, 0).0, (1000, 300, 500));
    // 親 40符3翻
    assert_eq!(calc_points(true, 40, 3, 0, 0).0, (7700, 2600, 0));
    // 4翻30符は満貫未満
    assert_eq!(calc_points(false, 30, 4, 0, 0).0, (7700, 2000, 3900));
    assert_eq!(calc_points(false, 40, 4, 0, 0), ((8000, 2000, 4000), "Mangan".to_string()));
    assert_eq!(calc_points(true, 50, 7, 0, 0), ((18000, 6000, 0), "Haneman".to_string()));
    assert_eq!(
        calc_points(false, 30, 1, 2, 0),
        ((64000, 16000, 32000), "Double Yakuman".to_string())
    );
    // 本場
    assert_eq!(calc_points(false, 30, 4, 0, 3).0, (8600, 2300, 4200));
    assert_eq!(calc_points(true, 30, 4, 0, 3).0, (12500, 4200, 0));
}

#[test]
fn test_calculate() {
    let pt = calculate(4, 30, 3).unwrap();
    assert_eq!(pt.dealer_ron, 12500);
    assert_eq!(pt.dealer_tsumo, 4200);
    assert_eq!(pt.non_dealer_ron, 8600);
    assert_eq!((pt.non_dealer_tsumo, pt.non_dealer_tsumo_by_dealer), (2300, 4200));
    assert_eq!(pt.title, "");
    assert_eq!(pt.score(false, true), 8800);

    let pt = calculate(3, 70, 3).unwrap();
    assert_eq!((pt.dealer_ron, pt.non_dealer_ron), (12900, 8900));
    assert_eq!(pt.title, "Mangan");

    let pt = calculate(13, 70, 3).unwrap();
    assert_eq!((pt.dealer_ron, pt.dealer_tsumo), (48900, 16300));
    assert_eq!((pt.non_dealer_tsumo, pt.non_dealer_tsumo_by_dealer), (8300, 16300));

    // 翻数が大きくても数え役満で頭打ち
    let pt = calculate(70, 30, 0).unwrap();
    assert_eq!(pt.non_dealer_ron, 32000);
    assert_eq!(pt.dealer_ron, 48000);
    assert_eq!(pt.title, "Kazoe Yakuman");
    let pt = calculate(4, usize::MAX, 0).unwrap();
    assert_eq!(pt.non_dealer_ron, 8000);

    assert_eq!(calculate(0, 30, 0), Err(HandError::NoHan));
    assert_eq!(calculate(1, 0, 0), Err(HandError::NoFu));
}
