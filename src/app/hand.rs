use std::fs::File;
use std::io::{self, BufRead};

use crate::hand::{evaluate_hand, WinContext};
use crate::model::*;
use crate::util::common::*;
use crate::util::log::set_verbose;
use crate::util::misc::*;

use super::calculator::format_points;
use crate::{debug, error, info, warn};

#[derive(Debug)]
pub struct HandApp {
    args: Vec<String>,
    json: bool,
}

impl HandApp {
    pub fn new(args: Vec<String>) -> Self {
        Self { args, json: false }
    }

    pub fn run(&mut self) {
        let mut file_path = "".to_string();
        let mut exp = vec![];
        let mut it = self.args.iter().peekable();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-f" => file_path = next_value(&mut it, s),
                "-j" => self.json = true,
                "-v" => set_verbose(true),
                _ => exp.push(s.clone()),
            }
        }

        if (file_path.is_empty() && exp.is_empty()) || (!file_path.is_empty() && !exp.is_empty()) {
            print_usage();
            return;
        }

        if !exp.is_empty() {
            if let Err(e) = self.process_expression(&exp) {
                error!("{}", e);
            }
            return;
        }

        if let Err(e) = self.run_from_file(&file_path) {
            error!("{}", e);
        }
    }

    fn run_from_file(&self, file_path: &str) -> Res {
        let file = File::open(file_path)?;
        let lines = io::BufReader::new(file).lines();
        let (mut n_ok, mut n_err) = (0, 0);
        for exp in lines.map_while(Result::ok) {
            let e = exp.trim();
            if e.is_empty() || e.starts_with('#') {
                // 空行とコメント行はスキップ
                println!("> {}", exp);
                continue;
            }

            let mut scorer = Scorer::new(self.json);
            match scorer.parse_line(e) {
                Ok(()) => match scorer.run() {
                    Verify::Ok => n_ok += 1,
                    Verify::Error => {
                        warn!("verify failed: {}", e);
                        n_err += 1;
                    }
                    Verify::Skip => {}
                },
                Err(e) => error!("{}", e),
            }
            println!();
        }
        info!("verify ok: {}, error: {}", n_ok, n_err);
        Ok(())
    }

    fn process_expression(&self, args: &[String]) -> Res {
        let mut scorer = Scorer::new(self.json);
        scorer.parse(args)?;
        scorer.run();
        Ok(())
    }
}

#[derive(Debug, PartialEq)]
enum Verify {
    Ok,
    Error,
    Skip,
}

#[derive(Debug)]
struct Scorer {
    json: bool,
    // evaluate_hand params
    groups: Vec<String>,
    winning_tile: String,
    ctx: Context,
    // score verify
    verify: Option<(usize, usize, Point)>, // (翻, 符, 得点)
}

impl Scorer {
    fn new(json: bool) -> Self {
        Self {
            json,
            groups: vec![],
            winning_tile: "".to_string(),
            ctx: Context::default(),
            verify: None,
        }
    }

    // "--tiles rrrd EEEw 234p 234p 11p -w 1p => 7,50,18000"
    fn parse_line(&mut self, line: &str) -> Res {
        println!("> {}", line);

        let line = line.split('#').next().unwrap_or(""); // コメント削除
        let mut exps = line.split("=>");
        let args: Vec<String> = exps
            .next()
            .unwrap_or("")
            .split_whitespace()
            .map(|s| s.to_string())
            .collect();
        if let Some(v) = exps.next() {
            self.parse_score_verify(v)?;
        }
        self.parse(&args)
    }

    fn parse(&mut self, args: &[String]) -> Res {
        let mut it = args.iter().peekable();
        while let Some(s) = it.next() {
            match s.as_str() {
                "--tiles" => self.groups = next_values(&mut it),
                "-w" => self.winning_tile = it.next().ok_or("-w: value missing")?.clone(),
                "-s" => {
                    self.ctx.seat_wind = wind_from_str(it.next().ok_or("-s: value missing")?)?;
                }
                "-p" => {
                    self.ctx.prevalent_wind = wind_from_str(it.next().ok_or("-p: value missing")?)?;
                }
                "-t" => self.ctx.is_drawn = true,
                "-r" => self.ctx.riichi = true,
                "-d" => self.ctx.doras.extend(parse_tiles(&next_values(&mut it))?),
                "-i" => {
                    let indicators = parse_tiles(&next_values(&mut it))?;
                    self.ctx.doras.extend(doras_from_indicators(&indicators));
                }
                "-b" => self.ctx.honba = it.next().ok_or("-b: value missing")?.parse()?,
                "--double-riichi" => self.ctx.flags.dabururiichi = true,
                "--ippatsu" => self.ctx.flags.ippatsu = true,
                "--haitei" => self.ctx.flags.haiteiraoyue = true,
                "--houtei" => self.ctx.flags.houteiraoyui = true,
                "--rinshan" => self.ctx.flags.rinshankaihou = true,
                "--chankan" => self.ctx.flags.chankan = true,
                _ => Err(format!("unknown option: {}", s))?,
            }
        }

        if self.groups.is_empty() {
            Err("--tiles: value missing")?;
        }
        if self.winning_tile.is_empty() {
            Err("-w: value missing")?;
        }
        debug!("{:?}", self);

        Ok(())
    }

    fn parse_score_verify(&mut self, input: &str) -> Res {
        let exps: Vec<&str> = input.split(',').map(|s| s.trim()).collect();
        if exps.len() != 3 {
            Err(format!("invalid score verify info: {}", input))?;
        }
        let fan = exps[0].parse::<usize>()?;
        let fu = exps[1].parse::<usize>()?;
        let score = exps[2].parse::<Point>()?;
        self.verify = Some((fan, fu, score));
        Ok(())
    }

    fn evaluate(&self) -> Res<WinContext> {
        let hand = Hand::from_groups(&self.groups, &self.winning_tile)?;
        debug!("{:?}", hand);
        Ok(evaluate_hand(&hand, &self.ctx)?)
    }

    fn run(&self) -> Verify {
        let verify = match self.evaluate() {
            Ok(win) => {
                if self.json {
                    match serde_json::to_string_pretty(&win) {
                        Ok(s) => println!("{}", s),
                        Err(e) => error!("{}", e),
                    }
                } else {
                    print_win(&win);
                }

                match self.verify {
                    // 役満以上は得点のみをチェック
                    Some((_, _, score)) if win.yakuman > 0 => verify_result(win.score == score),
                    Some((fan, fu, score)) => {
                        verify_result(win.fan == fan && win.fu == fu && win.score == score)
                    }
                    None => Verify::Skip,
                }
            }
            Err(e) => {
                println!("{}", e);
                match self.verify {
                    Some((_, _, score)) => verify_result(score == 0),
                    None => Verify::Skip,
                }
            }
        };

        if verify != Verify::Skip {
            println!("verify: {:?}", verify);
        }
        verify
    }
}

fn verify_result(ok: bool) -> Verify {
    if ok { Verify::Ok } else { Verify::Error }
}

fn parse_tiles(exps: &[String]) -> Res<Vec<Tile>> {
    let mut tiles = vec![];
    for exp in exps {
        let (ts, is_open) = tiles_from_group(exp)?;
        if is_open {
            Err(HandError::InvalidTileToken(exp.clone()))?;
        }
        tiles.extend(ts);
    }
    Ok(tiles)
}

fn print_win(win: &WinContext) {
    println!("melds: {}", vec_to_string(&win.decomposition.melds));
    match win.decomposition.winning_meld() {
        Some(m) => println!("wait: {:?} ({})", win.decomposition.wait, m),
        None => println!("wait: {:?}", win.decomposition.wait),
    }
    println!("yakus: {}", win.yaku_summary());

    let fus: Vec<String> = win
        .fu_breakdown
        .items
        .iter()
        .map(|i| format!("{}({})", i.label, i.points))
        .collect();
    println!("fu: {}", fus.join(", "));

    println!(
        "fu: {}, fan: {}, yakuman: {}, score: {}, {}",
        win.fu, win.fan, win.yakuman, win.score, win.title
    );
    println!("{}", format_points(&win.points));
}

fn print_usage() {
    error!(
        r"invalid input
Usage
    $ cargo run H --tiles TILES... -w TILE [OPTIONS]
    $ cargo run H -f FILE [-j] [-v]
Options
    --tiles: tile groups (ex: rrrd EEEw 234p 234p 11p, open: 234po)
    -w: winning tile
    -s, -p: seat wind, prevalent wind (default: E)
    -t: tsumo (default: ron)
    -r: riichi
    -d: dora tiles
    -i: dora indicator tiles
    -b: honba
    --double-riichi, --ippatsu, --haitei, --houtei, --rinshan, --chankan
    -j: print result as json
    -v: print debug info
    -f: read expressions from file (EXPRESSION [=> HAN,FU,SCORE])
"
    );
}

#[test]
fn test_scorer_parse() {
    let mut scorer = Scorer::new(false);
    let line = "--tiles rrrd EEEw 234p 234p 11p -w 1p -s S -p e -t -r -i 4p -b 2 => 7,50,18000";
    scorer.parse_line(line).unwrap();
    assert_eq!(scorer.groups, vec!["rrrd", "EEEw", "234p", "234p", "11p"]);
    assert_eq!(scorer.winning_tile, "1p");
    assert_eq!(scorer.ctx.seat_wind, WS);
    assert_eq!(scorer.ctx.prevalent_wind, WE);
    assert!(scorer.ctx.is_drawn && scorer.ctx.riichi);
    assert_eq!(scorer.ctx.doras, vec![Tile(TP, 5)]);
    assert_eq!(scorer.ctx.honba, 2);
    assert_eq!(scorer.verify, Some((7, 50, 18000)));

    let mut scorer = Scorer::new(false);
    assert!(scorer.parse_line("--tiles rrrd EEEw -x").is_err());
    let mut scorer = Scorer::new(false);
    assert!(scorer.parse_line("-w 1p").is_err());
}

#[test]
fn test_win_hands() {
    let file = File::open("tests/win_hands.txt").unwrap();
    let lines = io::BufReader::new(file).lines();
    for exp in lines.map_while(Result::ok) {
        let e = exp.trim();
        if e.is_empty() || e.starts_with('#') {
            // 空行とコメント行はスキップ
            println!("> {}", exp);
        } else {
            let mut scorer = Scorer::new(false);
            scorer.parse_line(e).unwrap();
            assert_eq!(Verify::Ok, scorer.run(), "{}", e);
        }
    }
}
