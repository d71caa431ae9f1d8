// 核心錯誤型別，攜帶 function name 與 context，支援來源錯誤巢狀
use crate::*;
use thiserror::Error;

/// 戰棋核心錯誤型別
#[derive(Debug, Error)]
pub enum Error {
    #[error("`{func}`: 位置 {pos:?} 超出棋盤範圍")]
    OutOfBounds { func: &'static str, pos: Pos },

    #[error("`{func}`: 位置 {pos:?} 已被佔用")]
    PosOccupied { func: &'static str, pos: Pos },

    #[error("`{func}`: 位置 {pos:?} 無棋子")]
    NoPieceAtPos { func: &'static str, pos: Pos },

    #[error("`{func}`: 棋子 {id} 不存在")]
    PieceNotFound { func: &'static str, id: PieceID },

    #[error("`{func}`: 棋子 {id} 不在 {pos:?}")]
    PieceNotAtPos {
        func: &'static str,
        id: PieceID,
        pos: Pos,
    },

    #[error("`{func}`: 目標 {pos:?} 不在可達範圍內")]
    NotReachable { func: &'static str, pos: Pos },

    #[error("`{func}`: 沒有行動中的棋子")]
    NoActivePiece { func: &'static str },

    #[error("`{func}`: 本回合已經移動過")]
    AlreadyMoved { func: &'static str },

    #[error("`{func}`: 本回合已經攻擊過")]
    AlreadyAttacked { func: &'static str },

    #[error("`{func}`: 位置 {pos:?} 是友方棋子，不可攻擊")]
    FriendlyTarget { func: &'static str, pos: Pos },

    #[error("`{func}`: 沒有可悔棋的紀錄")]
    NothingToUndo { func: &'static str },

    #[error("`{func}`: 包裝: {source}")]
    Wrap {
        func: &'static str,
        #[source]
        source: Box<Error>,
    },
}

pub fn root_error(err: &Error) -> &Error {
    let mut err = err;
    while let Error::Wrap { source, .. } = err {
        err = source.as_ref();
    }
    err
}
