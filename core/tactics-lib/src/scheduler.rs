//! scheduler.rs：
//! - 連續虛擬時鐘回合排程：每個棋子依敏捷推得的間隔週期性取得行動權，
//!   不採固定輪替，速度差會自然反映在行動頻率上。
//! - 只改動時鐘與棋子的 next_turn_at，不碰棋盤位置與 HP。
//! - 碰撞（同刻多子就緒）以注入的 RNG 均勻洗牌決定，輸家順延一刻，
//!   避免固定順序對任一方產生系統性偏差。
use crate::*;
use rand::seq::SliceRandom;

#[derive(Debug, Clone, Copy, Default)]
pub struct TurnScheduler {
    pub clock: Tick,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// 開局時為所有棋子排入第一個行動刻
    pub fn seed_initial(&self, board: &mut Board) {
        for piece in board.pieces.values_mut() {
            piece.next_turn_at = self.clock + piece.turn_interval();
        }
    }

    /// 時鐘推進一刻，回傳本刻取得行動權的棋子（可能沒有）
    /// 多子同刻就緒時洗牌取一，其餘 next_turn_at 順延一刻，下一刻重新競爭
    pub fn advance_and_pick(
        &mut self,
        board: &mut Board,
        rng: &mut impl rand::Rng,
    ) -> Option<PieceID> {
        self.clock += 1;
        let mut due: Vec<PieceID> = board
            .pieces
            .values()
            .filter(|p| p.alive() && p.next_turn_at == self.clock)
            .map(|p| p.id)
            .collect();

        match due.len() {
            0 => None,
            1 => Some(due[0]),
            _ => {
                // HashMap 迭代順序不定，先排序再洗牌，同一種子才可重現
                due.sort_unstable();
                due.shuffle(rng);
                let winner = due[0];
                for loser in &due[1..] {
                    if let Some(piece) = board.get_mut(*loser) {
                        piece.next_turn_at += 1;
                    }
                }
                Some(winner)
            }
        }
    }

    /// 反覆推進時鐘直到有棋子取得行動權
    /// 場上無存活棋子時回傳 None，由呼叫端走勝負判定分支，不在此空轉
    pub fn next_active(&mut self, board: &mut Board, rng: &mut impl rand::Rng) -> Option<PieceID> {
        if board.living().next().is_none() {
            return None;
        }
        loop {
            if let Some(id) = self.advance_and_pick(board, rng) {
                return Some(id);
            }
        }
    }

    /// 回合結束時呼叫一次，以結束當下的時鐘值排定下一次行動
    /// （回合前的等待也計入間隔，實際節奏才會貼合敏捷）
    pub fn schedule_next(&self, board: &mut Board, id: PieceID) {
        if let Some(piece) = board.get_mut(id) {
            piece.next_turn_at = self.clock + piece.turn_interval();
        }
    }
}
