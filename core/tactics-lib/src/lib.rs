use serde::{Deserialize, Serialize};

mod battle;
mod board;
mod error;
mod piece;
mod reach;
mod scheduler;
mod setup;

pub use battle::*;
pub use board::*;
pub use error::*;
pub use piece::*;
pub use reach::*;
pub use scheduler::*;
pub use setup::*;

pub type PieceID = u64;
pub type Tick = i64;
/// 敏捷值，以 0.1 為單位（54 代表 5.4），避免浮點誤差
pub type Agility = i64;

pub const BOARD_COLS: usize = 8;
pub const BOARD_ROWS: usize = 9;

/// 回合節奏常數：兩次行動間隔 = CADENCE * AGI_SCALE / agi（整數除法取底）
pub const CADENCE: Tick = 1000;
pub const AGI_SCALE: Tick = 10;

#[derive(
    Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}
