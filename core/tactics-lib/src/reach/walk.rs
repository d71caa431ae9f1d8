//! 步行類規則基元（Walk / Ring），以 4-連通 BFS 步行距離為度量
// https://github.com/TheAlgorithms/Rust/blob/master/src/graph/breadth_first_search.rs
use super::{ORTHOGONAL_DIRS, step_towards};
use crate::*;
use std::collections::{HashSet, VecDeque};

/// 4-連通 BFS 走訪，最多 steps 步，回傳所有被發現的格子（不含起點）
/// - 空格納入結果並續行擴張。
/// - 佔據格納入結果但為終端；僅攻擊時友方佔據格可續行（攻擊視線越過友軍），
///   敵方佔據格永遠是終端。
/// - 標準 visited set，不重複走訪。
pub(crate) fn walk_cells(
    board: &Board,
    origin: Pos,
    player: Player,
    steps: u32,
    for_attack: bool,
) -> HashSet<Pos> {
    let mut reached = HashSet::new();
    if steps == 0 {
        return reached;
    }
    let mut visited = HashSet::from([origin]);
    let mut queue = VecDeque::from([(origin, 0u32)]);

    while let Some((pos, depth)) = queue.pop_front() {
        if depth >= steps {
            continue;
        }
        for (dx, dy) in ORTHOGONAL_DIRS {
            let Some(next) = step_towards(board, pos, dx, dy, 1) else {
                continue;
            };
            if !visited.insert(next) {
                continue;
            }
            reached.insert(next);
            match board.occupant(next) {
                None => queue.push_back((next, depth + 1)),
                Some(other) if for_attack && other.player == player => {
                    queue.push_back((next, depth + 1))
                }
                Some(_) => {} // 終端：納入但不擴張
            }
        }
    }
    reached
}

/// 環狀攻擊帶：最大範圍扣掉死區，留下步行距離在 (min, max] 的格子
pub(crate) fn ring_cells(
    board: &Board,
    origin: Pos,
    player: Player,
    min: u32,
    max: u32,
) -> HashSet<Pos> {
    let zone = walk_cells(board, origin, player, max, true);
    if min == 0 {
        return zone;
    }
    let dead = walk_cells(board, origin, player, min, true);
    zone.difference(&dead).copied().collect()
}
