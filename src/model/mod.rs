// 麻雀のデータモデル
mod context;
mod define;
mod error;
mod hand;
mod meld;
mod tile;

use std::fmt;

use serde::Serialize;

pub use context::*;
pub use define::*;
pub use error::*;
pub use hand::*;
pub use meld::*;
pub use tile::*;
