//! reach：規則驅動的範圍解析器
//! - 輸入棋子與棋盤，輸出可移動／可攻擊的格子集合。
//! - 純函式、唯讀，不修改任何棋盤或棋子狀態。
//! - 各規則基元獨立求值後取聯集，再依用途過濾（移動限空格、攻擊限敵方）。
mod line;
mod walk;

use crate::*;
use std::collections::HashSet;

pub(crate) const ORTHOGONAL_DIRS: [(isize, isize); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
pub(crate) const DIAGONAL_DIRS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// 自 pos 往 (dx, dy) 方向走 i 格，界內才回傳
pub(crate) fn step_towards(board: &Board, pos: Pos, dx: isize, dy: isize, i: isize) -> Option<Pos> {
    let x = pos.x as isize + dx * i;
    let y = pos.y as isize + dy * i;
    if x < 0 || y < 0 {
        return None;
    }
    let next = Pos {
        x: x as usize,
        y: y as usize,
    };
    board.in_bounds(next).then_some(next)
}

/// 單一規則基元的求值
fn rule_cells(board: &Board, origin: Pos, piece: &Piece, rule: Rule, for_attack: bool) -> HashSet<Pos> {
    match rule {
        Rule::Orthogonal { range } => {
            line::slide_cells(board, origin, piece, &ORTHOGONAL_DIRS, range, for_attack)
        }
        Rule::Diagonal { range } => {
            line::slide_cells(board, origin, piece, &DIAGONAL_DIRS, range, for_attack)
        }
        Rule::Omnidirectional { range } => {
            // 十字與 X 各自獨立求值後取聯集
            let mut cells =
                line::slide_cells(board, origin, piece, &ORTHOGONAL_DIRS, range, for_attack);
            cells.extend(line::slide_cells(
                board,
                origin,
                piece,
                &DIAGONAL_DIRS,
                range,
                for_attack,
            ));
            cells
        }
        Rule::Walk { steps } => walk::walk_cells(board, origin, piece.player, steps, for_attack),
        Rule::Ring { min, max } => {
            if for_attack {
                walk::ring_cells(board, origin, piece.player, min, max)
            } else {
                // 環狀帶僅供攻擊，移動規則中出現時忽略
                HashSet::new()
            }
        }
    }
}

/// 計算棋子目前可合法移動到的格子集合（一定是空格，不含自身位置）
pub fn legal_move_cells(board: &Board, id: PieceID) -> HashSet<Pos> {
    let (Some(origin), Some(piece)) = (board.piece_to_pos(id), board.get(id)) else {
        return HashSet::new();
    };
    let mut cells = HashSet::new();
    for rule in &piece.movement_rules {
        cells.extend(rule_cells(board, origin, piece, *rule, false));
    }
    // 移動不可落在任何棋子上
    cells.retain(|pos| board.pos_to_piece(*pos).is_none());
    cells
}

/// 計算棋子目前可攻擊的格子集合（一定有敵方棋子）
pub fn legal_attack_cells(board: &Board, id: PieceID) -> HashSet<Pos> {
    let (Some(origin), Some(piece)) = (board.piece_to_pos(id), board.get(id)) else {
        return HashSet::new();
    };
    let mut cells = HashSet::new();
    for rule in &piece.attack_rules {
        cells.extend(rule_cells(board, origin, piece, *rule, true));
    }
    // 攻擊目標必須是敵方佔據格
    cells.retain(|pos| {
        board
            .occupant(*pos)
            .is_some_and(|other| other.player != piece.player)
    });
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(board: &mut Board, id: PieceID, archetype: Archetype, player: Player, x: usize, y: usize) {
        board
            .place(Piece::from_archetype(id, archetype, player), Pos { x, y })
            .unwrap();
    }

    #[test]
    fn test_move_cells_exclude_self_and_occupied() {
        let mut board = Board::standard();
        place(&mut board, 1, Archetype::Destroyer, Player::P1, 3, 3);
        place(&mut board, 2, Archetype::Soldier, Player::P1, 3, 4);
        place(&mut board, 3, Archetype::Soldier, Player::P2, 4, 4);

        let moves = legal_move_cells(&board, 1);
        assert!(!moves.contains(&Pos { x: 3, y: 3 }));
        assert!(!moves.contains(&Pos { x: 3, y: 4 }));
        assert!(!moves.contains(&Pos { x: 4, y: 4 }));
        for pos in &moves {
            assert!(board.pos_to_piece(*pos).is_none());
        }
    }

    #[test]
    fn test_attack_cells_only_enemies() {
        let mut board = Board::standard();
        place(&mut board, 1, Archetype::Destroyer, Player::P1, 3, 3);
        place(&mut board, 2, Archetype::Soldier, Player::P1, 3, 4); // 友方
        place(&mut board, 3, Archetype::Soldier, Player::P2, 4, 4); // 敵方

        let attacks = legal_attack_cells(&board, 1);
        assert_eq!(attacks, HashSet::from([Pos { x: 4, y: 4 }]));
    }

    #[test]
    fn test_omnidirectional_is_plus_and_x_not_disc() {
        let mut board = Board::standard();
        place(&mut board, 1, Archetype::Dragon, Player::P1, 3, 4); // Omnidirectional(2)

        let moves = legal_move_cells(&board, 1);
        // 十字與 X 上的格子
        assert!(moves.contains(&Pos { x: 3, y: 2 }));
        assert!(moves.contains(&Pos { x: 5, y: 6 }));
        // 騎士位（非十字非 X）不在範圍內
        assert!(!moves.contains(&Pos { x: 4, y: 6 }));
        assert_eq!(moves.len(), 16); // 內側一圈 8 格 + 外側 8 格
    }

    #[test]
    fn test_walk_move_set_is_bfs_distance_within_budget() {
        // 空棋盤 (3,3) 起點 Walk(2)：BFS 距離 1 或 2 的格子恰 12 格
        let mut board = Board::standard();
        place(&mut board, 1, Archetype::Soldier, Player::P1, 3, 3);

        let moves = legal_move_cells(&board, 1);
        assert_eq!(moves.len(), 12);
        for pos in &moves {
            let dist = pos.x.abs_diff(3) + pos.y.abs_diff(3);
            assert!(dist >= 1 && dist <= 2);
        }
    }

    #[test]
    fn test_mage_ring_sees_over_ally() {
        // 魔法師環狀帶 (1, 3)：距離 1 為死區，友方不阻擋攻擊視線
        let mut board = Board::standard();
        place(&mut board, 1, Archetype::Mage, Player::P1, 3, 3);
        board.get_mut(1).unwrap().attack_rules = vec![Rule::Ring { min: 1, max: 3 }];
        place(&mut board, 2, Archetype::Soldier, Player::P1, 4, 3); // 友方，距離 1
        place(&mut board, 3, Archetype::Soldier, Player::P2, 5, 3); // 敵方，距離 2

        let attacks = legal_attack_cells(&board, 1);
        assert!(attacks.contains(&Pos { x: 5, y: 3 }));
        assert!(!attacks.contains(&Pos { x: 3, y: 3 }));
        assert!(!attacks.contains(&Pos { x: 4, y: 3 }));
    }

    #[test]
    fn test_ring_min_zero_hits_adjacent() {
        let mut board = Board::standard();
        place(&mut board, 1, Archetype::Mage, Player::P1, 3, 3); // Ring(0, 3)
        place(&mut board, 2, Archetype::Soldier, Player::P2, 4, 3); // 距離 1

        let attacks = legal_attack_cells(&board, 1);
        assert!(attacks.contains(&Pos { x: 4, y: 3 }));
    }

    #[test]
    fn test_ring_in_movement_rules_is_ignored() {
        let mut board = Board::standard();
        place(&mut board, 1, Archetype::Mage, Player::P1, 3, 3);
        board.get_mut(1).unwrap().movement_rules = vec![Rule::Ring { min: 0, max: 3 }];

        assert!(legal_move_cells(&board, 1).is_empty());
    }

    #[test]
    fn test_jump_has_no_effect_on_walk_rules() {
        // 開放決議：can_jump 僅影響滑行類規則，步行類不受影響
        let mut board = Board::standard();
        place(&mut board, 1, Archetype::Soldier, Player::P1, 3, 3);
        place(&mut board, 2, Archetype::Soldier, Player::P2, 4, 3);
        place(&mut board, 3, Archetype::Soldier, Player::P2, 3, 4);

        let grounded = legal_move_cells(&board, 1);
        board.get_mut(1).unwrap().can_jump = true;
        let jumping = legal_move_cells(&board, 1);
        assert_eq!(grounded, jumping);
    }

    #[test]
    fn test_resolver_sees_fresh_state_after_move() {
        // 移動套用後立即重算：舊位置成為可達空格，新位置不可達
        let mut board = Board::standard();
        let from = Pos { x: 3, y: 3 };
        let to = Pos { x: 3, y: 4 };
        place(&mut board, 1, Archetype::Soldier, Player::P1, 3, 3);

        assert!(legal_move_cells(&board, 1).contains(&to));
        board.move_piece(from, to).unwrap();

        let moves = legal_move_cells(&board, 1);
        assert!(moves.contains(&from));
        assert!(!moves.contains(&to));
    }

    #[test]
    fn test_missing_piece_yields_empty_sets() {
        let board = Board::standard();
        assert!(legal_move_cells(&board, 42).is_empty());
        assert!(legal_attack_cells(&board, 42).is_empty());
    }
}
