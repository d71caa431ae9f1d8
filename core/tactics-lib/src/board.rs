use crate::*;
use std::collections::HashMap;

/// 棋盤：固定大小格網、棋子本體（arena）與雙向位置索引
/// 位置只記錄在 PieceMap，單一事實來源，不存在棋子欄位與格子欄位不同步的問題
#[derive(Debug, Clone, Default)]
pub struct Board {
    width: usize,
    height: usize,
    pub pieces: HashMap<PieceID, Piece>,
    pub piece_map: PieceMap,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Board {
            width,
            height,
            pieces: HashMap::new(),
            piece_map: PieceMap::default(),
        }
    }

    /// 標準棋盤大小（8 欄 9 列）
    pub fn standard() -> Self {
        Self::new(BOARD_COLS, BOARD_ROWS)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn pos_to_piece(&self, pos: Pos) -> Option<PieceID> {
        self.piece_map.get_piece(pos)
    }

    pub fn piece_to_pos(&self, id: PieceID) -> Option<Pos> {
        self.piece_map.get_pos(id)
    }

    pub fn get(&self, id: PieceID) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    pub fn get_mut(&mut self, id: PieceID) -> Option<&mut Piece> {
        self.pieces.get_mut(&id)
    }

    /// 取得位置上的棋子
    pub fn occupant(&self, pos: Pos) -> Option<&Piece> {
        self.pieces.get(&self.piece_map.get_piece(pos)?)
    }

    /// 將棋子放入棋盤，位置必須在界內且為空格
    pub fn place(&mut self, piece: Piece, pos: Pos) -> Result<(), Error> {
        let func = "Board::place";
        if !self.in_bounds(pos) {
            return Err(Error::OutOfBounds { func, pos });
        }
        if self.piece_map.get_piece(pos).is_some() {
            return Err(Error::PosOccupied { func, pos });
        }
        self.piece_map.insert(piece.id, pos);
        self.pieces.insert(piece.id, piece);
        Ok(())
    }

    /// 將 from 位置的棋子移動到 to 位置，目標必須為界內空格
    pub fn move_piece(&mut self, from: Pos, to: Pos) -> Result<(), Error> {
        let func = "Board::move_piece";
        if !self.in_bounds(to) {
            return Err(Error::OutOfBounds { func, pos: to });
        }
        let id = self
            .piece_map
            .get_piece(from)
            .ok_or(Error::NoPieceAtPos { func, pos: from })?;
        self.piece_map.move_piece(id, from, to)
    }

    /// 自棋盤與 arena 移除棋子
    pub fn remove_piece(&mut self, id: PieceID) -> Option<Piece> {
        self.piece_map.remove(id);
        self.pieces.remove(&id)
    }

    /// 扣血；歸零時棋子立即自 arena 與位置索引移除，回傳是否仍存活
    pub fn apply_damage(&mut self, id: PieceID, amount: i32) -> Result<bool, Error> {
        let func = "Board::apply_damage";
        let piece = self
            .pieces
            .get_mut(&id)
            .ok_or(Error::PieceNotFound { func, id })?;
        piece.hp -= amount;
        if piece.alive() {
            return Ok(true);
        }
        self.remove_piece(id);
        Ok(false)
    }

    /// 所有存活棋子
    pub fn living(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values().filter(|p| p.alive())
    }

    pub fn living_count(&self, player: Player) -> usize {
        self.living().filter(|p| p.player == player).count()
    }
}

/// 雙向位置索引，insert / move / remove 同步更新兩個方向
#[derive(Debug, Clone, Default)]
pub struct PieceMap {
    pos_to_piece: HashMap<Pos, PieceID>,
    piece_to_pos: HashMap<PieceID, Pos>,
}

impl PieceMap {
    pub fn insert(&mut self, id: PieceID, pos: Pos) {
        self.pos_to_piece.insert(pos, id);
        self.piece_to_pos.insert(id, pos);
    }

    pub fn move_piece(&mut self, id: PieceID, from: Pos, to: Pos) -> Result<(), Error> {
        let func = "PieceMap::move_piece";
        if self.piece_to_pos.get(&id) != Some(&from) {
            return Err(Error::PieceNotAtPos { func, id, pos: from });
        }
        if self.pos_to_piece.contains_key(&to) {
            return Err(Error::PosOccupied { func, pos: to });
        }
        self.pos_to_piece.remove(&from);
        self.pos_to_piece.insert(to, id);
        self.piece_to_pos.insert(id, to);
        Ok(())
    }

    pub fn remove(&mut self, id: PieceID) {
        if let Some(pos) = self.piece_to_pos.remove(&id) {
            self.pos_to_piece.remove(&pos);
        }
    }

    pub fn get_piece(&self, pos: Pos) -> Option<PieceID> {
        self.pos_to_piece.get(&pos).copied()
    }

    pub fn get_pos(&self, id: PieceID) -> Option<Pos> {
        self.piece_to_pos.get(&id).copied()
    }
}
