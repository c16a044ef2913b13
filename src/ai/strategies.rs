//! AI戦略の実装モジュール
//! ミニマックス探索と、合法手リストから選ぶだけのフォールバックを
//! 統一されたインターフェースで提供する。

use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::search::{MinimaxSearch, SearchConfig, SearchStats};
use crate::error::AIError;
use crate::game::{Board, OthelloRules, Position, Side};

/// 使用するAI戦略の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyKind {
    /// ミニマックス探索
    Minimax,
    /// 合法手から決定的に1手選ぶ
    Random,
}

/// AIの設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub strategy: StrategyKind,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Minimax,
        }
    }
}

/// AIの手の計算結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AIMoveResult {
    /// AIが選択した手の位置
    pub position: Position,
    /// 思考時間（ミリ秒）
    pub thinking_time_ms: u64,
    /// 盤面評価値（探索しない戦略ではNone）
    pub evaluation_score: Option<i32>,
    /// 探索の統計（探索しない戦略ではNone）
    pub stats: Option<SearchStats>,
}

/// AI戦略の共通インターフェース
pub trait AIStrategy {
    /// 盤面とsideから手を計算する
    /// 渡された盤面は変更しない
    fn calculate_move(&self, board: &Board, side: Side) -> Result<AIMoveResult, AIError>;

    /// AIの名前を返す
    fn get_name(&self) -> &'static str;
}

/// ミニマックス探索で手を選ぶAI
#[derive(Debug, Clone, Default)]
pub struct MinimaxAI {
    pub config: SearchConfig,
}

impl MinimaxAI {
    pub fn new(config: SearchConfig) -> Self {
        MinimaxAI { config }
    }
}

impl AIStrategy for MinimaxAI {
    fn calculate_move(&self, board: &Board, side: Side) -> Result<AIMoveResult, AIError> {
        let start_time = Instant::now();

        let mut search = MinimaxSearch::new(self.config);
        let result = search
            .find_best_move(board, side)
            .ok_or(AIError::NoLegalMove { side })?;

        Ok(AIMoveResult {
            position: result.position,
            thinking_time_ms: start_time.elapsed().as_millis() as u64,
            evaluation_score: Some(result.score),
            stats: Some(result.stats),
        })
    }

    fn get_name(&self) -> &'static str {
        "MinimaxAI"
    }
}

/// 合法手の一覧から1手選ぶAI
/// 真の乱数の代わりに石数ベースの決定的なインデックスを使う
#[derive(Debug, Clone, Default)]
pub struct RandomAI;

impl RandomAI {
    pub fn new() -> Self {
        RandomAI
    }
}

impl AIStrategy for RandomAI {
    fn calculate_move(&self, board: &Board, side: Side) -> Result<AIMoveResult, AIError> {
        let start_time = Instant::now();

        let legal_moves = OthelloRules::legal_moves(board, side);
        if legal_moves.is_empty() {
            return Err(AIError::NoLegalMove { side });
        }

        let index = (usize::from(board.disc_count()) * 7 + side as usize * 3) % legal_moves.len();
        let position = legal_moves
            .get(index)
            .copied()
            .ok_or_else(|| AIError::StrategyError {
                message: format!("index {} out of {} legal moves", index, legal_moves.len()),
            })?;

        Ok(AIMoveResult {
            position,
            thinking_time_ms: start_time.elapsed().as_millis() as u64,
            evaluation_score: None,
            stats: None,
        })
    }

    fn get_name(&self) -> &'static str {
        "RandomAI"
    }
}

/// 設定に応じたAI戦略を生成するファクトリ関数
pub fn create_ai_strategy(ai: &AiConfig, search: &SearchConfig) -> Box<dyn AIStrategy> {
    match ai.strategy {
        StrategyKind::Minimax => Box::new(MinimaxAI::new(*search)),
        StrategyKind::Random => Box::new(RandomAI::new()),
    }
}
