#![warn(rust_2018_idioms)]
// 構造的な意味合いや一貫性を保つために以下の警告は無効化
#![allow(clippy::useless_format)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::single_match)]
#![allow(clippy::ptr_arg)]

mod app;
mod hand;
mod model;
mod util;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        error!("mode not specified");
        return;
    }

    let args2 = args[2..].to_vec();
    match args[1].as_str() {
        "H" => {
            // Hand (手牌の役・点数計算モード)
            app::HandApp::new(args2).run();
        }
        "C" => {
            // Calculator (翻数・符からの点数計算モード)
            app::CalculatorApp::new(args2).run();
        }
        m => {
            error!("unknown mode: {}", m)
        }
    }
}
