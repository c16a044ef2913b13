//! ゲーム状態管理モジュール
//! 盤面、手番、進行状態、手の履歴など、1局分の状態を保持する。

use std::fmt;

use super::board::Board;
use super::types::{MoveRecord, Side, CELL_COUNT};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 終局時の勝敗
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    WhiteWins,
    BlackWins,
    Draw,
}

/// 終局時の最終結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub white_score: u8,
    pub black_score: u8,
    pub outcome: Outcome,
    /// 空きマスが残ったまま終局した（合法手切れ）
    pub unplayed_cells: bool,
}

impl GameResult {
    /// 盤面の石数から最終結果を確定する
    pub fn from_board(board: &Board) -> Self {
        let (white_score, black_score) = board.count_pieces();

        let outcome = if white_score > black_score {
            Outcome::WhiteWins
        } else if black_score > white_score {
            Outcome::BlackWins
        } else {
            Outcome::Draw
        };

        Self {
            white_score,
            black_score,
            outcome,
            unplayed_cells: white_score + black_score != CELL_COUNT,
        }
    }

    /// 勝者（引き分けはNone）
    pub fn winner(&self) -> Option<Side> {
        match self.outcome {
            Outcome::WhiteWins => Some(Side::White),
            Outcome::BlackWins => Some(Side::Black),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unplayed_cells {
            write!(f, "No more turns left, ")?;
        }
        let label = match self.outcome {
            Outcome::WhiteWins => "White wins",
            Outcome::BlackWins => "Black wins",
            Outcome::Draw => "Draw",
        };
        write!(f, "{}: {}:{}", label, self.white_score, self.black_score)
    }
}

/// ゲームの進行状態を表すenum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// ゲーム進行中
    InProgress,
    /// ゲーム終了（最終結果を記録）
    Ended(GameResult),
}

/// 1局分の状態を保持する構造体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub id: Uuid,
    pub board: Board,
    pub side_to_move: Side,
    pub status: GameStatus,
    pub move_history: Vec<MoveRecord>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl GameState {
    /// 初期盤面で新しいゲーム状態を作成する
    pub fn new(first_side: Side) -> Self {
        Self::with_board(Board::new(), first_side)
    }

    /// 任意の盤面から開始するゲーム状態を作成する
    pub fn with_board(board: Board, side_to_move: Side) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            board,
            side_to_move,
            status: GameStatus::InProgress,
            move_history: Vec::new(),
            created_at: now,
            last_updated: now,
        }
    }

    /// ゲームが終了しているかチェックする
    pub fn is_ended(&self) -> bool {
        matches!(self.status, GameStatus::Ended(_))
    }

    /// 終局していれば最終結果を返す
    pub fn result(&self) -> Option<GameResult> {
        match self.status {
            GameStatus::Ended(result) => Some(result),
            GameStatus::InProgress => None,
        }
    }

    /// 手番を交代する
    pub fn switch_side(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
        self.last_updated = Utc::now();
    }

    /// 手の履歴に記録を追加する
    pub fn add_record(&mut self, record: MoveRecord) {
        self.move_history.push(record);
        self.last_updated = Utc::now();
    }

    /// 現在の盤面で終局させ、最終結果を返す
    pub fn finish(&mut self) -> GameResult {
        let result = GameResult::from_board(&self.board);
        self.status = GameStatus::Ended(result);
        self.last_updated = Utc::now();
        result
    }

    /// これまでの手数（パスを含む）
    pub fn move_count(&self) -> usize {
        self.move_history.len()
    }
}
