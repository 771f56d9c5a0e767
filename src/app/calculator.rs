use crate::hand::{calculate, PointsTable};
use crate::util::misc::*;

use crate::error;

// 翻数と符を直接指定して点数を計算するモード
#[derive(Debug)]
pub struct CalculatorApp {
    args: Vec<String>,
    json: bool,
}

impl CalculatorApp {
    pub fn new(args: Vec<String>) -> Self {
        Self { args, json: false }
    }

    pub fn run(&mut self) {
        let mut fan_fu: Option<(usize, usize)> = None;
        let mut honba = 0;
        let mut it = self.args.iter().peekable();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-m" => {
                    let fan = next_value(&mut it, s);
                    let fu = next_value(&mut it, s);
                    fan_fu = Some((fan, fu));
                }
                "-b" => honba = next_value(&mut it, s),
                "-j" => self.json = true,
                _ => {
                    error!("unknown option: {}", s);
                    return;
                }
            }
        }

        let (fan, fu) = match fan_fu {
            Some(v) => v,
            None => {
                print_usage();
                return;
            }
        };

        if let Err(e) = self.process(fan, fu, honba) {
            error!("{}", e);
        }
    }

    fn process(&self, fan: usize, fu: usize, honba: usize) -> Res {
        println!("{}", self.render(fan, fu, honba)?);
        Ok(())
    }

    // 満貫などの名称はjson出力にのみ含める
    fn render(&self, fan: usize, fu: usize, honba: usize) -> Res<String> {
        let pt = calculate(fan, fu, honba)?;
        if self.json {
            Ok(serde_json::to_string_pretty(&pt)?)
        } else {
            Ok(format_points(&pt))
        }
    }
}

// 親: ロン (ツモ・子の支払い)
// 子: ロン (ツモ・子の支払い/ツモ・親の支払い)
pub fn format_points(pt: &PointsTable) -> String {
    format!(
        "Dealer: {} ({})\nnon-dealer: {} ({}/{})",
        pt.dealer_ron,
        pt.dealer_tsumo,
        pt.non_dealer_ron,
        pt.non_dealer_tsumo,
        pt.non_dealer_tsumo_by_dealer
    )
}

fn print_usage() {
    error!(
        r"invalid input
Usage
    $ cargo run C -m HAN FU [-b HONBA] [-j]
Options
    -m: han and fu
    -b: honba (default: 0)
    -j: print result as json
"
    );
}

#[test]
fn test_format_points() {
    let f = |fan, fu, honba| format_points(&calculate(fan, fu, honba).unwrap());
    assert_eq!(f(4, 30, 3), "Dealer: 12500 (4200)\nnon-dealer: 8600 (2300/4200)");
    assert_eq!(f(1, 30, 0), "Dealer: 1500 (500)\nnon-dealer: 1000 (300/500)");
    assert_eq!(f(2, 80, 0), "Dealer: 7700 (2600)\nnon-dealer: 5200 (1300/2600)");
    assert_eq!(f(3, 70, 3), "Dealer: 12900 (4300)\nnon-dealer: 8900 (2300/4300)");
    for fan in [6, 7] {
        assert_eq!(f(fan, 70, 3), "Dealer: 18900 (6300)\nnon-dealer: 12900 (3300/6300)");
    }
    for fan in [8, 9, 10] {
        assert_eq!(f(fan, 70, 3), "Dealer: 24900 (8300)\nnon-dealer: 16900 (4300/8300)");
    }
    for fan in [11, 12] {
        assert_eq!(f(fan, 70, 3), "Dealer: 36900 (12300)\nnon-dealer: 24900 (6300/12300)");
    }
    assert_eq!(f(13, 70, 3), "Dealer: 48900 (16300)\nnon-dealer: 32900 (8300/16300)");
}

#[test]
fn test_calculator_errors() {
    let app = CalculatorApp::new(vec![]);
    assert!(app.process(0, 30, 0).is_err());
    assert!(app.process(1, 0, 0).is_err());
    assert!(app.process(1, 30, 0).is_ok());
}

#[test]
fn test_calculator_render() {
    let mut app = CalculatorApp::new(vec![]);
    let s = app.render(3, 70, 3).unwrap();
    assert_eq!(s, "Dealer: 12900 (4300)\nnon-dealer: 8900 (2300/4300)");
    assert_eq!(s.lines().count(), 2);

    app.json = true;
    let s = app.render(3, 70, 3).unwrap();
    assert!(s.contains("\"title\": \"Mangan\""));
}
