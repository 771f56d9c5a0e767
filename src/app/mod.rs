// mainから直接呼び出すアプリケーションの動作モード(H, C)のモジュール

mod calculator;
mod hand;

pub use calculator::CalculatorApp;
pub use hand::HandApp;
