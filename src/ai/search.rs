//! ミニマックス探索モジュール
//! 枝刈りなしの全幅ミニマックスで着手を選ぶ。
//! 探索は1回の呼び出しごとに用意する作業用盤面の上で行い、
//! 各手を試したら次の候補に進む前に必ず元に戻す。

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::evaluation::BoardEvaluator;
use crate::game::{Board, OthelloRules, Position, Side, CELL_COUNT};

/// 既定の探索深度（候補手の後に読む手数）
pub const DEFAULT_MAX_DEPTH: u32 = 4;

/// 設定で許可する探索深度の上限
pub const MAX_SEARCH_DEPTH: u32 = 8;

/// 探索中の仮着手の方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationMode {
    /// 石をひっくり返さず対象マスだけに置く
    /// 相手番でも自分の合法手のマスを列挙する
    Placement,
    /// 実際のルール通りに石を返す
    Flip,
}

/// 探索の設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_depth: u32,
    pub simulation: SimulationMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            simulation: SimulationMode::Flip,
        }
    }
}

/// 1回の探索の統計情報
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// 評価したノード数
    pub nodes: u64,
    /// 到達した最大深度
    pub max_depth_reached: u32,
}

/// find_best_moveの結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub position: Position,
    pub score: i32,
    pub stats: SearchStats,
}

/// ミニマックス探索器
#[derive(Debug, Clone)]
pub struct MinimaxSearch {
    config: SearchConfig,
    stats: SearchStats,
}

impl MinimaxSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
        }
    }

    /// 直近の探索の統計
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// sideにとって最も評価の高い手を返す
    /// 合法手がなければNone。同点の場合は行優先で先に見つかった手
    pub fn find_best_move(&mut self, board: &Board, side: Side) -> Option<SearchResult> {
        self.stats = SearchStats::default();
        let mut scratch = board.clone();
        let mut best: Option<(Position, i32)> = None;

        for position in OthelloRules::legal_moves(&scratch, side) {
            let flipped = self.simulate(&mut scratch, side, position);
            let score = self.minimax(&mut scratch, 0, false, side);
            OthelloRules::undo_move(&mut scratch, side, position, &flipped);

            debug!(row = position.row, col = position.col, score, "candidate scored");

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((position, score));
            }
        }

        debug!(
            ?side,
            nodes = self.stats.nodes,
            depth = self.stats.max_depth_reached,
            "search finished"
        );

        best.map(|(position, score)| SearchResult {
            position,
            score,
            stats: self.stats,
        })
    }

    /// sideの石数を最大化するミニマックス
    /// maximizingの手番ではside、そうでなければ相手が仮に着手する
    pub fn minimax(&mut self, board: &mut Board, depth: u32, maximizing: bool, side: Side) -> i32 {
        self.stats.nodes += 1;
        self.stats.max_depth_reached = self.stats.max_depth_reached.max(depth);

        let score = BoardEvaluator::evaluate(board, side);

        // 全滅または全面取り
        if score == i32::from(CELL_COUNT) || score == 0 {
            return score;
        }

        if depth >= self.config.max_depth {
            return score;
        }

        let mover = if maximizing { side } else { side.opponent() };
        let enumerated_for = match self.config.simulation {
            SimulationMode::Placement => side,
            SimulationMode::Flip => mover,
        };

        let candidates = OthelloRules::legal_moves(board, enumerated_for);
        if candidates.is_empty() {
            return score;
        }

        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for position in candidates {
            let flipped = self.simulate(board, mover, position);
            let value = self.minimax(board, depth + 1, !maximizing, side);
            OthelloRules::undo_move(board, mover, position, &flipped);

            best = if maximizing {
                best.max(value)
            } else {
                best.min(value)
            };
        }

        best
    }

    /// 作業用盤面に仮着手し、undo_moveに渡すひっくり返した石を返す
    fn simulate(&self, board: &mut Board, mover: Side, position: Position) -> Vec<Position> {
        match self.config.simulation {
            SimulationMode::Placement => {
                board.set_cell(position, mover.to_cell());
                Vec::new()
            }
            SimulationMode::Flip => OthelloRules::apply_move(board, mover, position),
        }
    }
}

impl Default for MinimaxSearch {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}
