//! ゲームの基本型定義モジュール
//! オセロで使用される基本的な型とenum、構造体を定義する。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 盤面の一辺のマス数
pub const BOARD_SIZE: usize = 8;

/// 盤面の総マス数
pub const CELL_COUNT: u8 = (BOARD_SIZE * BOARD_SIZE) as u8;

/// 盤面の各マスの状態を表現するenum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    White,
    Black,
}

impl Cell {
    /// 石が置かれている場合はその色を返す
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::White => Some(Side::White),
            Cell::Black => Some(Side::Black),
        }
    }
}

/// 手番を表すenum
/// このゲームでは白が先手
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// 相手の色を返す
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// 対応するセル状態に変換する
    pub fn to_cell(self) -> Cell {
        match self {
            Side::White => Cell::White,
            Side::Black => Cell::Black,
        }
    }
}

/// 8x8盤面上の座標を表す構造体
/// row, colともに0-7の範囲で有効
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// 範囲チェック付きのコンストラクタ
    /// 盤面の範囲外の座標の場合はNoneを返す
    pub fn new(row: usize, col: usize) -> Option<Position> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Position { row, col })
        } else {
            None
        }
    }

    /// 座標が有効範囲内かチェックする
    pub fn is_valid(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// 指定方向に1マス進んだ座標を返す
    /// 盤外に出る場合はNone
    pub fn step(self, (dr, dc): (isize, isize)) -> Option<Position> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Position::new(row, col)
    }

    /// 盤面全64マスを行優先で列挙する
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position { row, col }))
    }
}

/// 着手の試行を表す構造体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub position: Position,
    pub side: Side,
}

impl Move {
    pub fn new(position: Position, side: Side) -> Self {
        Self { position, side }
    }
}

/// 履歴に残す1手分の記録
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// 石を置いた手（ひっくり返した石の位置を保持）
    Placed {
        position: Position,
        flipped: Vec<Position>,
    },
    /// 合法手がなくパスした手
    Pass,
}

/// 手の履歴エントリ
/// 手の内容とタイムスタンプを保持する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub side: Side,
    pub kind: MoveKind,
    pub timestamp: DateTime<Utc>,
}

impl MoveRecord {
    /// 着手の記録を作成する
    pub fn placed(side: Side, position: Position, flipped: Vec<Position>) -> Self {
        Self {
            side,
            kind: MoveKind::Placed { position, flipped },
            timestamp: Utc::now(),
        }
    }

    /// パスの記録を作成する
    pub fn pass(side: Side) -> Self {
        Self {
            side,
            kind: MoveKind::Pass,
            timestamp: Utc::now(),
        }
    }

    /// ひっくり返した石の数（パスは0）
    pub fn flipped_count(&self) -> usize {
        match &self.kind {
            MoveKind::Placed { flipped, .. } => flipped.len(),
            MoveKind::Pass => 0,
        }
    }
}
