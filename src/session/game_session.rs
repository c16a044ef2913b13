//! 対局セッションモジュール
//! 表示側からの入力（人間の着手・AI着手の要求）を受け付け、
//! 手番コントローラーとAI戦略をつなぐ。

use tracing::{info, warn};

use crate::ai::{create_ai_strategy, AIStrategy};
use crate::config::Config;
use crate::error::{AIError, GameError, Result};
use crate::game::{Board, GameObserver, Move, Side, TurnController, TurnOutcome};

/// 1局分のセッション
/// コントローラーとAIは互いを知らず、このセッションだけが両者を使う
pub struct GameSession<O: GameObserver> {
    controller: TurnController<O>,
    strategy: Box<dyn AIStrategy>,
}

impl<O: GameObserver> GameSession<O> {
    /// 設定から新しい対局を作成する
    pub fn from_config(config: &Config, observer: O) -> Self {
        let controller = TurnController::new(config.game.clone(), observer);
        let strategy = create_ai_strategy(&config.ai, &config.search);
        Self::new(controller, strategy)
    }

    /// 任意の盤面から対局を作成する
    pub fn with_board(board: Board, side_to_move: Side, config: &Config, observer: O) -> Self {
        let controller =
            TurnController::with_board(board, side_to_move, config.game.clone(), observer);
        let strategy = create_ai_strategy(&config.ai, &config.search);
        Self::new(controller, strategy)
    }

    pub fn new(controller: TurnController<O>, strategy: Box<dyn AIStrategy>) -> Self {
        Self {
            controller,
            strategy,
        }
    }

    pub fn controller(&self) -> &TurnController<O> {
        &self.controller
    }

    pub fn board(&self) -> &Board {
        self.controller.board()
    }

    pub fn observer(&self) -> &O {
        self.controller.observer()
    }

    /// 人間の着手
    pub fn attempt_move(&mut self, row: usize, col: usize, side: Side) -> Result<TurnOutcome> {
        self.controller.make_move(row, col, side)
    }

    /// AIに手を選ばせて着手する
    ///
    /// AIが手を見つけられない場合はマスを総当たりせず、パスまたは終局させる。
    pub fn request_ai_move(&mut self, side: Side) -> Result<TurnOutcome> {
        if self.controller.is_ended() {
            return Err(GameError::GameEnded);
        }

        let expected = self.controller.side_to_move();
        if side != expected {
            return Err(GameError::NotYourTurn {
                expected,
                actual: side,
            });
        }

        match self.strategy.calculate_move(self.controller.board(), side) {
            Ok(ai_move) => {
                info!(
                    ai = self.strategy.get_name(),
                    ?side,
                    row = ai_move.position.row,
                    col = ai_move.position.col,
                    score = ?ai_move.evaluation_score,
                    thinking_time_ms = ai_move.thinking_time_ms,
                    "AI move chosen"
                );
                self.controller.play(Move::new(ai_move.position, side))
            }
            Err(AIError::NoLegalMove { side }) => {
                warn!(?side, "AI found no legal move");
                self.controller.pass_or_end()
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl<O: GameObserver + Default> GameSession<O> {
    /// 既定の設定とオブザーバーで対局を作成する
    pub fn with_defaults() -> Self {
        Self::from_config(&Config::default(), O::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{SearchConfig, SimulationMode};
    use crate::game::{Cell, NullObserver, OthelloRules, BOARD_SIZE};

    fn fast_config() -> Config {
        Config {
            search: SearchConfig {
                max_depth: 2,
                simulation: SimulationMode::Flip,
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_request_ai_move_applies_legal_move() {
        let mut session = GameSession::from_config(&fast_config(), NullObserver);
        let before = session.board().clone();

        let outcome = session.request_ai_move(Side::White).unwrap();

        match outcome {
            TurnOutcome::Moved { side, position, .. } => {
                assert_eq!(side, Side::White);
                assert!(OthelloRules::is_valid_move(&before, Side::White, position));
            }
            other => panic!("expected a move, got {:?}", other),
        }
        assert_eq!(session.controller().side_to_move(), Side::Black);
    }

    #[test]
    fn test_request_ai_move_out_of_turn() {
        let mut session = GameSession::<NullObserver>::with_defaults();

        assert_eq!(
            session.request_ai_move(Side::Black),
            Err(GameError::NotYourTurn {
                expected: Side::White,
                actual: Side::Black
            })
        );
    }

    #[test]
    fn test_request_ai_move_without_legal_moves_ends_game() {
        let mut cells = [[Cell::Black; BOARD_SIZE]; BOARD_SIZE];
        cells[0][0] = Cell::Empty;
        cells[0][2] = Cell::White;

        let mut session = GameSession::with_board(
            Board::from_cells(cells),
            Side::Black,
            &fast_config(),
            NullObserver,
        );

        let outcome = session.request_ai_move(Side::Black).unwrap();

        assert!(matches!(outcome, TurnOutcome::Ended(result) if result.unplayed_cells));
        assert!(session.controller().is_ended());
        assert_eq!(session.request_ai_move(Side::Black), Err(GameError::GameEnded));
    }
}
