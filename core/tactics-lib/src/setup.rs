//! setup.rs：標準開局配置
//! 純設定資料：8×9 棋盤，雙方各 14 子鏡像佈陣
use crate::*;

/// 佈好子的標準開局棋盤
/// - 士兵整排：P2 在 y=1，P1 在 y=6
/// - 後排（P2 y=0 / P1 y=7）：法師 x=1,6、聖騎士 x=2,5、巨龍 x=3、毀滅者 x=4
pub fn standard_board() -> Result<Board, Error> {
    let mut board = Board::standard();
    let mut next_id: PieceID = 0;
    let mut place = |board: &mut Board, archetype, player, x, y| {
        next_id += 1;
        board.place(
            Piece::from_archetype(next_id, archetype, player),
            Pos { x, y },
        )
    };

    for x in 0..BOARD_COLS {
        place(&mut board, Archetype::Soldier, Player::P2, x, 1)?;
        place(&mut board, Archetype::Soldier, Player::P1, x, 6)?;
    }
    for x in [1, 6] {
        place(&mut board, Archetype::Mage, Player::P2, x, 0)?;
        place(&mut board, Archetype::Mage, Player::P1, x, 7)?;
    }
    for x in [2, 5] {
        place(&mut board, Archetype::Paladin, Player::P2, x, 0)?;
        place(&mut board, Archetype::Paladin, Player::P1, x, 7)?;
    }
    place(&mut board, Archetype::Dragon, Player::P2, 3, 0)?;
    place(&mut board, Archetype::Dragon, Player::P1, 3, 7)?;
    place(&mut board, Archetype::Destroyer, Player::P2, 4, 0)?;
    place(&mut board, Archetype::Destroyer, Player::P1, 4, 7)?;

    Ok(board)
}

/// 標準開局的對局（含已排入首刻的排程器）
pub fn standard_battle() -> Result<Battle, Error> {
    Ok(Battle::new(standard_board()?))
}
