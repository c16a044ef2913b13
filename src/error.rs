//! アプリケーション全体のエラー定義モジュール
//! 盤面操作、着手判定、AI探索のエラーを統一管理。

use thiserror::Error;

use crate::game::types::Side;

/// ゲームロジックに関連するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Cell out of range: ({row}, {col})")]
    OutOfRange { row: usize, col: usize },

    #[error("Invalid move: ({row}, {col}) is not a legal move for {side:?}")]
    InvalidMove { row: usize, col: usize, side: Side },

    #[error("Not your turn: {expected:?} to move, got {actual:?}")]
    NotYourTurn { expected: Side, actual: Side },

    #[error("Game already ended")]
    GameEnded,

    #[error("AI calculation failed: {source}")]
    AIError {
        #[from]
        source: AIError,
    },
}

/// AI探索に関連するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AIError {
    #[error("No legal move available for {side:?}")]
    NoLegalMove { side: Side },

    #[error("AI strategy error: {message}")]
    StrategyError { message: String },
}

/// ゲームエラーをベースとした結果型
pub type Result<T> = std::result::Result<T, GameError>;
