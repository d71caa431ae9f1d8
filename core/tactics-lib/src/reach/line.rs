//! 滑行類規則基元（Orthogonal / Diagonal / Omnidirectional）
//! 沿固定方向逐格延伸，阻擋與穿越語意依移動或攻擊而異
use super::step_towards;
use crate::*;
use std::collections::HashSet;

/// 沿 dirs 各方向滑行最多 range 格
/// - 可跳躍：range 內所有界內格直接納入，不追蹤路徑。
/// - 不可跳躍：逐格延伸，空格納入並續行；遇棋子即停，僅攻擊時的首個敵人納入。
///   友方一律擋路且不納入。
pub(crate) fn slide_cells(
    board: &Board,
    origin: Pos,
    piece: &Piece,
    dirs: &[(isize, isize); 4],
    range: u32,
    for_attack: bool,
) -> HashSet<Pos> {
    let mut cells = HashSet::new();
    if piece.can_jump {
        for &(dx, dy) in dirs {
            for i in 1..=range as isize {
                if let Some(next) = step_towards(board, origin, dx, dy, i) {
                    cells.insert(next);
                }
            }
        }
        return cells;
    }
    for &(dx, dy) in dirs {
        for i in 1..=range as isize {
            let Some(next) = step_towards(board, origin, dx, dy, i) else {
                break; // 出界後不再延伸
            };
            match board.occupant(next) {
                None => {
                    cells.insert(next);
                }
                Some(blocker) => {
                    if for_attack && blocker.player != piece.player {
                        cells.insert(next);
                    }
                    break; // 攻擊不穿透首個敵人，移動遇任何棋子即停
                }
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::super::{DIAGONAL_DIRS, ORTHOGONAL_DIRS};
    use super::*;

    fn board_with(pieces: &[(PieceID, Player, usize, usize)]) -> Board {
        let mut board = Board::standard();
        for &(id, player, x, y) in pieces {
            board
                .place(
                    Piece::from_archetype(id, Archetype::Paladin, player),
                    Pos { x, y },
                )
                .unwrap();
        }
        board
    }

    #[test]
    fn test_slide_open_board_clips_at_range_and_bounds() {
        let board = board_with(&[(1, Player::P1, 1, 1)]);
        let piece = board.get(1).unwrap();
        let cells = slide_cells(&board, Pos { x: 1, y: 1 }, piece, &ORTHOGONAL_DIRS, 3, false);

        // 左與上各被邊界截為 1 格，右與下各 3 格
        assert_eq!(cells.len(), 8);
        assert!(cells.contains(&Pos { x: 0, y: 1 }));
        assert!(cells.contains(&Pos { x: 4, y: 1 }));
        assert!(cells.contains(&Pos { x: 1, y: 4 }));
        assert!(!cells.contains(&Pos { x: 5, y: 1 }));
    }

    #[test]
    fn test_slide_blocked_by_any_piece_for_movement() {
        let board = board_with(&[(1, Player::P1, 0, 0), (2, Player::P2, 0, 2)]);
        let piece = board.get(1).unwrap();
        let cells = slide_cells(&board, Pos { x: 0, y: 0 }, piece, &ORTHOGONAL_DIRS, 4, false);

        // 阻擋者所在格與其後方皆不可達
        assert!(cells.contains(&Pos { x: 0, y: 1 }));
        assert!(!cells.contains(&Pos { x: 0, y: 2 }));
        assert!(!cells.contains(&Pos { x: 0, y: 3 }));
    }

    #[test]
    fn test_slide_attack_includes_first_enemy_only() {
        let board = board_with(&[
            (1, Player::P1, 0, 0),
            (2, Player::P2, 0, 2),
            (3, Player::P2, 0, 3),
        ]);
        let piece = board.get(1).unwrap();
        let cells = slide_cells(&board, Pos { x: 0, y: 0 }, piece, &ORTHOGONAL_DIRS, 4, true);

        // 首個敵人可攻擊，其後方的第二個敵人不可
        assert!(cells.contains(&Pos { x: 0, y: 2 }));
        assert!(!cells.contains(&Pos { x: 0, y: 3 }));
    }

    #[test]
    fn test_slide_ally_halts_without_being_added() {
        let board = board_with(&[
            (1, Player::P1, 0, 0),
            (2, Player::P1, 0, 1), // 友方緊鄰
            (3, Player::P2, 0, 2), // 友方後方的敵人
        ]);
        let piece = board.get(1).unwrap();
        let cells = slide_cells(&board, Pos { x: 0, y: 0 }, piece, &ORTHOGONAL_DIRS, 4, true);

        // 攻擊也不可穿越友方
        assert!(!cells.contains(&Pos { x: 0, y: 1 }));
        assert!(!cells.contains(&Pos { x: 0, y: 2 }));
    }

    #[test]
    fn test_slide_jump_ignores_blockers() {
        let mut board = board_with(&[(1, Player::P1, 3, 3), (2, Player::P1, 3, 4)]);
        board.get_mut(1).unwrap().can_jump = true;
        let piece = board.get(1).unwrap();
        let cells = slide_cells(&board, Pos { x: 3, y: 3 }, piece, &ORTHOGONAL_DIRS, 2, false);

        // 跳躍不追蹤路徑：友方所在格也會被列出（由上層過濾），其後方可達
        assert!(cells.contains(&Pos { x: 3, y: 4 }));
        assert!(cells.contains(&Pos { x: 3, y: 5 }));
        assert_eq!(cells.len(), 8);
    }

    #[test]
    fn test_diagonal_dirs() {
        let board = board_with(&[(1, Player::P1, 3, 3)]);
        let piece = board.get(1).unwrap();
        let cells = slide_cells(&board, Pos { x: 3, y: 3 }, piece, &DIAGONAL_DIRS, 1, false);
        assert_eq!(
            cells,
            HashSet::from([
                Pos { x: 4, y: 4 },
                Pos { x: 4, y: 2 },
                Pos { x: 2, y: 4 },
                Pos { x: 2, y: 2 },
            ])
        );
    }

    #[test]
    fn test_slide_zero_range_is_empty() {
        let board = board_with(&[(1, Player::P1, 3, 3)]);
        let piece = board.get(1).unwrap();
        assert!(slide_cells(&board, Pos { x: 3, y: 3 }, piece, &ORTHOGONAL_DIRS, 0, false).is_empty());
    }
}
