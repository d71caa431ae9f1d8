//! battle.rs：
//! - 對局流程膠合層：回合推進、行動檢核、勝負判定、悔棋。
//! - 棋盤與 HP 的變動全部集中在這裡，排程器只碰時鐘與 next_turn_at，
//!   解析器（reach）完全唯讀。
//! - 行動結果以 TurnEvent 值回傳，表現層自行播放動畫與音效，
//!   核心不持有任何回呼。
use crate::*;
use std::collections::HashSet;

/// 悔棋快照上限
pub const UNDO_CAP: usize = 5;

/// 對局結果
/// 雙方同時全滅判和局，不讓排程器空轉
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Ongoing,
    Winner(Player),
    Draw,
}

/// 回合中發生的狀態變化，回傳給表現層消費
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnEvent {
    Moved {
        piece: PieceID,
        from: Pos,
        to: Pos,
    },
    AttackResolved {
        attacker: PieceID,
        target: PieceID,
        target_pos: Pos,
        damage: i32,
        target_died: bool,
        kind: AttackKind,
    },
    TurnPassed {
        piece: PieceID,
    },
}

/// 悔棋快照：棋盤（含棋子）與時鐘一次還原
#[derive(Debug, Clone)]
struct Snapshot {
    board: Board,
    clock: Tick,
}

#[derive(Debug, Default)]
pub struct Battle {
    pub board: Board,
    pub scheduler: TurnScheduler,
    history: Vec<Snapshot>,
    active: Option<PieceID>,
}

/// 勝負判定：恰有一方無存活棋子時另一方獲勝
/// 雙方皆無或皆有存活棋子時尚無勝者（前者由 Battle::outcome 判為和局）
pub fn check_winner(board: &Board) -> Option<Player> {
    let p1 = board.living_count(Player::P1);
    let p2 = board.living_count(Player::P2);
    match (p1, p2) {
        (0, n) if n > 0 => Some(Player::P2),
        (n, 0) if n > 0 => Some(Player::P1),
        _ => None,
    }
}

impl Battle {
    /// 以佈好子的棋盤開局，所有棋子自第 0 刻排入首個行動刻
    pub fn new(mut board: Board) -> Self {
        let scheduler = TurnScheduler::new();
        scheduler.seed_initial(&mut board);
        Battle {
            board,
            scheduler,
            history: Vec::new(),
            active: None,
        }
    }

    pub fn active_piece(&self) -> Option<PieceID> {
        self.active
    }

    pub fn outcome(&self) -> MatchOutcome {
        if let Some(winner) = check_winner(&self.board) {
            return MatchOutcome::Winner(winner);
        }
        if self.board.living().next().is_none() {
            return MatchOutcome::Draw;
        }
        MatchOutcome::Ongoing
    }

    /// 推進時鐘直到下一個行動者出現並重置其回合旗標
    /// 對局已分出勝負（或和局）時回傳 None
    pub fn begin_turn(&mut self, rng: &mut impl rand::Rng) -> Option<PieceID> {
        if self.outcome() != MatchOutcome::Ongoing {
            return None;
        }
        let id = self.scheduler.next_active(&mut self.board, rng)?;
        if let Some(piece) = self.board.get_mut(id) {
            piece.reset_turn_state();
        }
        self.active = Some(id);
        Some(id)
    }

    /// 行動中棋子目前可走的格子；已移動過則為空集合
    pub fn legal_moves(&self) -> HashSet<Pos> {
        match self.active {
            Some(id) if !self.board.get(id).is_none_or(|p| p.has_moved) => {
                legal_move_cells(&self.board, id)
            }
            _ => HashSet::new(),
        }
    }

    /// 行動中棋子目前可攻擊的格子；已攻擊過則為空集合
    pub fn legal_attacks(&self) -> HashSet<Pos> {
        match self.active {
            Some(id) if !self.board.get(id).is_none_or(|p| p.has_attacked) => {
                legal_attack_cells(&self.board, id)
            }
            _ => HashSet::new(),
        }
    }

    /// 將行動中的棋子移動到 to，依回合策略決定是否就此結束回合
    pub fn move_active(&mut self, to: Pos) -> Result<TurnEvent, Error> {
        let func = "Battle::move_active";
        let id = self.active.ok_or(Error::NoActivePiece { func })?;
        let piece = self.board.get(id).ok_or(Error::PieceNotFound { func, id })?;
        if piece.has_moved {
            return Err(Error::AlreadyMoved { func });
        }
        if !legal_move_cells(&self.board, id).contains(&to) {
            return Err(Error::NotReachable { func, pos: to });
        }
        let from = self
            .board
            .piece_to_pos(id)
            .ok_or(Error::PieceNotFound { func, id })?;

        self.board.move_piece(from, to).map_err(|e| Error::Wrap {
            func,
            source: Box::new(e),
        })?;
        if let Some(piece) = self.board.get_mut(id) {
            piece.has_moved = true;
        }
        self.conclude_if_done();
        Ok(TurnEvent::Moved {
            piece: id,
            from,
            to,
        })
    }

    /// 以行動中的棋子攻擊 target_pos 上的敵方棋子
    /// 致死時目標立即自棋盤移除，表現層的死亡動畫由事件驅動
    pub fn attack(&mut self, target_pos: Pos) -> Result<TurnEvent, Error> {
        let func = "Battle::attack";
        let id = self.active.ok_or(Error::NoActivePiece { func })?;
        let piece = self.board.get(id).ok_or(Error::PieceNotFound { func, id })?;
        if piece.has_attacked {
            return Err(Error::AlreadyAttacked { func });
        }
        let damage = piece.atk;
        let kind = piece.attack_kind;
        let target = self
            .board
            .pos_to_piece(target_pos)
            .ok_or(Error::NoPieceAtPos {
                func,
                pos: target_pos,
            })?;
        if self
            .board
            .get(target)
            .is_some_and(|t| t.player == piece.player)
        {
            return Err(Error::FriendlyTarget {
                func,
                pos: target_pos,
            });
        }
        if !legal_attack_cells(&self.board, id).contains(&target_pos) {
            return Err(Error::NotReachable {
                func,
                pos: target_pos,
            });
        }

        let still_alive = self.board.apply_damage(target, damage).map_err(|e| Error::Wrap {
            func,
            source: Box::new(e),
        })?;
        if let Some(piece) = self.board.get_mut(id) {
            piece.has_attacked = true;
        }
        self.conclude_if_done();
        Ok(TurnEvent::AttackResolved {
            attacker: id,
            target,
            target_pos,
            damage,
            target_died: !still_alive,
            kind,
        })
    }

    /// 主動讓過本回合
    pub fn pass_turn(&mut self) -> Result<TurnEvent, Error> {
        let func = "Battle::pass_turn";
        let id = self.active.ok_or(Error::NoActivePiece { func })?;
        self.conclude_turn();
        Ok(TurnEvent::TurnPassed { piece: id })
    }

    /// 悔棋：還原到最近一次回合結束時的狀態（棋盤、棋子、時鐘一次還原）
    pub fn undo(&mut self) -> Result<(), Error> {
        let func = "Battle::undo";
        let snapshot = self.history.pop().ok_or(Error::NothingToUndo { func })?;
        self.board = snapshot.board;
        self.scheduler.clock = snapshot.clock;
        self.active = None;
        Ok(())
    }

    pub fn undo_available(&self) -> bool {
        !self.history.is_empty()
    }

    /// 行動後依回合策略判斷是否還有後續行動，否則自動結束回合
    fn conclude_if_done(&mut self) {
        let Some(id) = self.active else {
            return;
        };
        let Some(piece) = self.board.get(id) else {
            self.conclude_turn();
            return;
        };
        let more_to_do = match piece.turn_policy {
            // 任一行動即結束
            TurnPolicy::MoveOrAttack => false,
            // 移動後若仍有攻擊對象則等待攻擊；攻擊過即結束
            TurnPolicy::MoveThenAttack => {
                !piece.has_attacked && !legal_attack_cells(&self.board, id).is_empty()
            }
            // 移動與攻擊各一次，缺一且可執行時續留
            TurnPolicy::MoveAndAttack => {
                (!piece.has_attacked && !legal_attack_cells(&self.board, id).is_empty())
                    || (!piece.has_moved && !legal_move_cells(&self.board, id).is_empty())
            }
        };
        if !more_to_do {
            self.conclude_turn();
        }
    }

    /// 結束回合：先推快照（供悔棋），再以目前時鐘排定下一次行動
    fn conclude_turn(&mut self) {
        self.push_snapshot();
        if let Some(id) = self.active.take() {
            self.scheduler.schedule_next(&mut self.board, id);
        }
    }

    fn push_snapshot(&mut self) {
        self.history.push(Snapshot {
            board: self.board.clone(),
            clock: self.scheduler.clock,
        });
        if self.history.len() > UNDO_CAP {
            self.history.remove(0);
        }
    }
}
