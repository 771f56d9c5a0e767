// 手牌の役や点数計算を行うモジュール
mod decompose;
mod evaluate;
mod fu;
mod point;
mod yaku;

pub use self::{
    evaluate::{evaluate_hand, WinContext},
    point::{calculate, PointsTable},
};
