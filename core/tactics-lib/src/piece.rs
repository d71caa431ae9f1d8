//! piece.rs：
//! - 定義棋子（Piece）資料結構與靜態屬性，不含棋盤與回合流程邏輯。
//! - 規則基元（Rule）、回合策略、攻擊型態與原型數值表集中於此。
use crate::*;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// 玩家（固定雙人對戰）
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Display, EnumIter, PartialEq, Eq, Hash)]
pub enum Player {
    P1,
    P2,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
        }
    }
}

/// 移動／攻擊規則基元
/// 封閉 enum 搭配 pattern matching，編譯期即可檢查規則分派的完整性
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// 直線滑行（上下左右），最多 range 格
    Orthogonal { range: u32 },
    /// 斜線滑行（四個對角方向），最多 range 格
    Diagonal { range: u32 },
    /// 直線加斜線（十字加 X 形，並非圓形半徑）
    Omnidirectional { range: u32 },
    /// 四方向逐格走訪（BFS），最多 steps 步
    Walk { steps: u32 },
    /// 環狀攻擊帶：步行距離落在 (min, max] 之間，min 為 0 時無死區
    /// 僅供攻擊規則使用，出現在移動規則中會被忽略
    Ring { min: u32, max: u32 },
}

/// 回合內可執行的行動組合
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Display, EnumIter, PartialEq, Eq)]
pub enum TurnPolicy {
    /// 移動或攻擊擇一，任一行動即結束回合
    MoveOrAttack,
    /// 先移動後攻擊，攻擊後回合結束
    MoveThenAttack,
    /// 移動與攻擊各一次，順序不拘
    MoveAndAttack,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Display, EnumIter, PartialEq, Eq)]
pub enum AttackKind {
    Melee,
    Ranged,
}

/// 棋子原型
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Display, EnumIter, PartialEq, Eq, Hash)]
pub enum Archetype {
    Soldier,
    Paladin,
    Mage,
    Dragon,
    Destroyer,
}

/// 棋盤上的棋子
#[derive(Debug, Clone)]
pub struct Piece {
    pub id: PieceID,
    pub archetype: Archetype,
    pub player: Player,
    pub hp_max: i32,
    pub hp: i32,
    pub atk: i32,
    /// 以 0.1 為單位（54 代表 5.4）
    pub agi: Agility,
    pub can_jump: bool,
    pub movement_rules: Vec<Rule>,
    pub attack_rules: Vec<Rule>,
    pub turn_policy: TurnPolicy,
    pub attack_kind: AttackKind,
    // 回合內暫態，回合開始時歸零
    pub has_moved: bool,
    pub has_attacked: bool,
    // 排程器專用欄位
    pub next_turn_at: Tick,
}

impl Piece {
    /// 依原型數值表建立棋子
    pub fn from_archetype(id: PieceID, archetype: Archetype, player: Player) -> Self {
        let base = |hp, atk, agi, can_jump, movement_rules, attack_rules, attack_kind| Piece {
            id,
            archetype,
            player,
            hp_max: hp,
            hp,
            atk,
            agi,
            can_jump,
            movement_rules,
            attack_rules,
            turn_policy: TurnPolicy::MoveThenAttack,
            attack_kind,
            has_moved: false,
            has_attacked: false,
            next_turn_at: 0,
        };
        match archetype {
            Archetype::Soldier => base(
                15,
                4,
                60,
                false,
                vec![Rule::Walk { steps: 2 }],
                vec![Rule::Omnidirectional { range: 1 }],
                AttackKind::Melee,
            ),
            Archetype::Paladin => base(
                30,
                5,
                54,
                false,
                vec![Rule::Orthogonal { range: 4 }, Rule::Diagonal { range: 3 }],
                vec![Rule::Orthogonal { range: 1 }],
                AttackKind::Melee,
            ),
            Archetype::Mage => base(
                12,
                6,
                51,
                false,
                vec![Rule::Walk { steps: 2 }],
                vec![Rule::Ring { min: 0, max: 3 }],
                AttackKind::Ranged,
            ),
            Archetype::Dragon => base(
                40,
                7,
                45,
                true,
                vec![Rule::Omnidirectional { range: 2 }],
                vec![Rule::Ring { min: 0, max: 3 }],
                AttackKind::Ranged,
            ),
            Archetype::Destroyer => base(
                50,
                10,
                48,
                false,
                vec![Rule::Omnidirectional { range: 1 }],
                vec![Rule::Omnidirectional { range: 1 }],
                AttackKind::Melee,
            ),
        }
    }

    pub fn alive(&self) -> bool {
        self.hp > 0
    }

    /// 回合開始時重置行動旗標
    pub fn reset_turn_state(&mut self) {
        self.has_moved = false;
        self.has_attacked = false;
    }

    /// 兩次行動之間的刻數，敏捷越高間隔越短
    pub fn turn_interval(&self) -> Tick {
        debug_assert!(self.agi > 0);
        CADENCE * AGI_SCALE / self.agi
    }
}
