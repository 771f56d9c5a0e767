// 汎用的な処理のモジュール
pub mod common;
pub mod log;
pub mod misc;
