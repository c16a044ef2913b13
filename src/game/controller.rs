//! 手番管理モジュール
//! 着手の検証と適用、手番の交代、終局判定を行い、
//! 表示側（GameObserver）へ盤面の変化と結果を通知する。

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::board::Board;
use super::rules::OthelloRules;
use super::state::{GameResult, GameState};
use super::types::{Move, MoveRecord, Position, Side};
use crate::error::{AIError, GameError, Result};

/// 手番側に合法手がない場合の扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoMovePolicy {
    /// その時点で終局する
    EndGame,
    /// 相手に合法手があればパス、両者ともなければ終局
    Pass,
}

/// 対局ルールの設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub first_side: Side,
    pub no_move_policy: NoMovePolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            first_side: Side::White,
            no_move_policy: NoMovePolicy::EndGame,
        }
    }
}

/// 表示側へのコールバック
/// 既定の実装は何もしない
pub trait GameObserver {
    /// 着手が適用されるたびに呼ばれる
    fn on_board_changed(&mut self, _board: &Board) {}

    /// 着手が拒否されたときに呼ばれる
    fn on_invalid_move(&mut self, _row: usize, _col: usize, _side: Side) {}

    /// パスが発生したときに呼ばれる
    fn on_pass(&mut self, _side: Side) {}

    /// 終局時に一度だけ呼ばれる
    fn on_game_ended(&mut self, _result: &GameResult) {}
}

/// 通知を必要としない場合のオブザーバー
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl GameObserver for NullObserver {}

/// 手番側が続行できないときに起きる遷移
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// 手番側がパスした
    Passed(Side),
    /// 終局した
    Ended(GameResult),
}

/// make_moveの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// 着手が適用された
    /// thenには着手直後に起きたパスまたは終局が入る
    Moved {
        side: Side,
        position: Position,
        flipped: Vec<Position>,
        then: Option<Transition>,
    },
    /// 手番側に合法手がなくパスした（試行された手は適用されていない）
    Passed { side: Side },
    /// 終局した
    Ended(GameResult),
}

impl From<Transition> for TurnOutcome {
    fn from(transition: Transition) -> Self {
        match transition {
            Transition::Passed(side) => TurnOutcome::Passed { side },
            Transition::Ended(result) => TurnOutcome::Ended(result),
        }
    }
}

/// 手番を管理するコントローラー
/// 正規の盤面を排他的に所有する
pub struct TurnController<O: GameObserver = NullObserver> {
    state: GameState,
    config: GameConfig,
    observer: O,
}

impl<O: GameObserver> TurnController<O> {
    /// 初期盤面で対局を開始する
    pub fn new(config: GameConfig, observer: O) -> Self {
        let state = GameState::new(config.first_side);
        Self::from_state(state, config, observer)
    }

    /// 任意の盤面・手番から対局を開始する
    pub fn with_board(board: Board, side_to_move: Side, config: GameConfig, observer: O) -> Self {
        Self::from_state(GameState::with_board(board, side_to_move), config, observer)
    }

    fn from_state(state: GameState, config: GameConfig, observer: O) -> Self {
        info!(game_id = %state.id, first = ?state.side_to_move, "game started");
        Self {
            state,
            config,
            observer,
        }
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn side_to_move(&self) -> Side {
        self.state.side_to_move
    }

    pub fn is_ended(&self) -> bool {
        self.state.is_ended()
    }

    pub fn result(&self) -> Option<GameResult> {
        self.state.result()
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.state.move_history
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// 手を検証して適用する
    ///
    /// 盤面が埋まっている、または手番側に合法手がない場合は着手を試みずに
    /// 終局（またはパス）へ遷移する。不正な手は盤面も手番も変えずにエラーを返す。
    pub fn make_move(&mut self, row: usize, col: usize, side: Side) -> Result<TurnOutcome> {
        if self.state.is_ended() {
            return Err(GameError::GameEnded);
        }

        if let Some(transition) = self.resolve_blocked_turn() {
            return Ok(transition.into());
        }

        let position = Position::new(row, col).ok_or(GameError::OutOfRange { row, col })?;

        let expected = self.state.side_to_move;
        if side != expected {
            warn!(row, col, ?side, ?expected, "move attempted out of turn");
            self.observer.on_invalid_move(row, col, side);
            return Err(GameError::NotYourTurn {
                expected,
                actual: side,
            });
        }

        if !OthelloRules::is_valid_move(&self.state.board, side, position) {
            warn!(row, col, ?side, "invalid move");
            self.observer.on_invalid_move(row, col, side);
            return Err(GameError::InvalidMove { row, col, side });
        }

        let flipped = OthelloRules::apply_move(&mut self.state.board, side, position);
        info!(row, col, ?side, flipped = flipped.len(), "move applied");

        self.state
            .add_record(MoveRecord::placed(side, position, flipped.clone()));
        self.state.switch_side();
        self.observer.on_board_changed(&self.state.board);

        // 次の手番が続行できない場合はこの時点で遷移させる
        let then = self.resolve_blocked_turn();

        Ok(TurnOutcome::Moved {
            side,
            position,
            flipped,
            then,
        })
    }

    /// 座標と手番をまとめた着手を適用する
    pub fn play(&mut self, mv: Move) -> Result<TurnOutcome> {
        self.make_move(mv.position.row, mv.position.col, mv.side)
    }

    /// 手番側が合法手を持たない場合にパスまたは終局させる
    /// AIが手を見つけられなかった場合に呼び出される
    pub fn pass_or_end(&mut self) -> Result<TurnOutcome> {
        if self.state.is_ended() {
            return Err(GameError::GameEnded);
        }

        let side = self.state.side_to_move;
        if OthelloRules::any_legal_move(&self.state.board, side) {
            return Err(AIError::StrategyError {
                message: format!("{:?} still has legal moves", side),
            }
            .into());
        }

        let transition = match self.resolve_blocked_turn() {
            Some(transition) => transition,
            None => Transition::Ended(self.end_game()),
        };
        Ok(transition.into())
    }

    /// 盤面が埋まっているか、手番側に合法手がなければ遷移を行う
    fn resolve_blocked_turn(&mut self) -> Option<Transition> {
        let board = &self.state.board;
        let side = self.state.side_to_move;

        if OthelloRules::is_board_full(board) {
            return Some(Transition::Ended(self.end_game()));
        }

        if OthelloRules::any_legal_move(board, side) {
            return None;
        }

        match self.config.no_move_policy {
            NoMovePolicy::Pass if OthelloRules::any_legal_move(board, side.opponent()) => {
                info!(?side, "no legal move, passing");
                self.state.add_record(MoveRecord::pass(side));
                self.state.switch_side();
                self.observer.on_pass(side);
                Some(Transition::Passed(side))
            }
            _ => Some(Transition::Ended(self.end_game())),
        }
    }

    fn end_game(&mut self) -> GameResult {
        let result = self.state.finish();
        info!(
            game_id = %self.state.id,
            white = result.white_score,
            black = result.black_score,
            outcome = ?result.outcome,
            "game ended"
        );
        debug!("final board:\n{}", self.state.board.display());
        self.observer.on_game_ended(&result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::Outcome;
    use crate::game::types::{Cell, BOARD_SIZE};

    #[derive(Debug, Default)]
    struct Recorder {
        board_changes: usize,
        invalid: Vec<(usize, usize, Side)>,
        passes: Vec<Side>,
        ended: Vec<GameResult>,
    }

    impl GameObserver for Recorder {
        fn on_board_changed(&mut self, _board: &Board) {
            self.board_changes += 1;
        }

        fn on_invalid_move(&mut self, row: usize, col: usize, side: Side) {
            self.invalid.push((row, col, side));
        }

        fn on_pass(&mut self, side: Side) {
            self.passes.push(side);
        }

        fn on_game_ended(&mut self, result: &GameResult) {
            self.ended.push(*result);
        }
    }

    fn controller() -> TurnController<Recorder> {
        TurnController::new(GameConfig::default(), Recorder::default())
    }

    /// 白だけが(0,0)に置ける盤面（他は全て埋まっている）
    fn one_hole_board() -> Board {
        let mut cells = [[Cell::Black; BOARD_SIZE]; BOARD_SIZE];
        cells[0][0] = Cell::Empty;
        cells[0][2] = Cell::White;
        Board::from_cells(cells)
    }

    #[test]
    fn test_make_move_toggles_turn() {
        let mut game = controller();

        let outcome = game.make_move(2, 4, Side::White).unwrap();

        assert!(matches!(
            outcome,
            TurnOutcome::Moved { ref flipped, then: None, .. } if flipped.len() == 1
        ));
        assert_eq!(game.side_to_move(), Side::Black);
        assert_eq!(game.board().count_pieces(), (4, 1));
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.observer().board_changes, 1);
    }

    #[test]
    fn test_play_move() {
        let mut game = controller();
        let mv = Move::new(Position { row: 2, col: 4 }, Side::White);

        assert!(matches!(game.play(mv), Ok(TurnOutcome::Moved { .. })));
        assert_eq!(game.side_to_move(), Side::Black);
    }

    #[test]
    fn test_make_move_occupied_cell_rejected() {
        let mut game = controller();
        let before = game.board().clone();

        let result = game.make_move(3, 3, Side::White);

        assert_eq!(
            result,
            Err(GameError::InvalidMove {
                row: 3,
                col: 3,
                side: Side::White
            })
        );
        assert_eq!(game.board(), &before);
        assert_eq!(game.side_to_move(), Side::White);
        assert_eq!(game.observer().invalid, vec![(3, 3, Side::White)]);
        assert_eq!(game.observer().board_changes, 0);
    }

    #[test]
    fn test_make_move_out_of_turn() {
        let mut game = controller();

        let result = game.make_move(2, 3, Side::Black);

        assert_eq!(
            result,
            Err(GameError::NotYourTurn {
                expected: Side::White,
                actual: Side::Black
            })
        );
        assert_eq!(game.side_to_move(), Side::White);
    }

    #[test]
    fn test_make_move_out_of_range() {
        let mut game = controller();
        assert_eq!(
            game.make_move(8, 0, Side::White),
            Err(GameError::OutOfRange { row: 8, col: 0 })
        );
    }

    #[test]
    fn test_full_board_ends_game() {
        let mut cells = [[Cell::White; BOARD_SIZE]; BOARD_SIZE];
        cells[7] = [Cell::Black; BOARD_SIZE];
        let mut game = TurnController::with_board(
            Board::from_cells(cells),
            Side::White,
            GameConfig::default(),
            Recorder::default(),
        );

        let outcome = game.make_move(0, 0, Side::White).unwrap();

        let result = match outcome {
            TurnOutcome::Ended(result) => result,
            other => panic!("expected game end, got {:?}", other),
        };
        assert_eq!((result.white_score, result.black_score), (56, 8));
        assert_eq!(result.outcome, Outcome::WhiteWins);
        assert!(!result.unplayed_cells);
        assert_eq!(game.observer().ended.len(), 1);
        assert_eq!(game.make_move(0, 0, Side::White), Err(GameError::GameEnded));
        assert_eq!(game.observer().ended.len(), 1);
    }

    #[test]
    fn test_last_move_fills_board_and_ends() {
        let mut game = TurnController::with_board(
            one_hole_board(),
            Side::White,
            GameConfig::default(),
            Recorder::default(),
        );

        let outcome = game.make_move(0, 0, Side::White).unwrap();

        assert!(game.is_ended());
        let result = game.result().unwrap();
        assert_eq!((result.white_score, result.black_score), (3, 61));
        assert_eq!(
            outcome,
            TurnOutcome::Moved {
                side: Side::White,
                position: Position { row: 0, col: 0 },
                flipped: vec![Position { row: 0, col: 1 }],
                then: Some(Transition::Ended(result)),
            }
        );
        assert_eq!(game.observer().ended.len(), 1);
    }

    #[test]
    fn test_no_legal_move_ends_game_by_default() {
        // 黒の手番だが(0,0)は白にしか置けない
        let mut game = TurnController::with_board(
            one_hole_board(),
            Side::Black,
            GameConfig::default(),
            Recorder::default(),
        );

        let outcome = game.make_move(0, 0, Side::Black).unwrap();

        let result = match outcome {
            TurnOutcome::Ended(result) => result,
            other => panic!("expected game end, got {:?}", other),
        };
        assert!(result.unplayed_cells);
        assert_eq!(result.to_string(), "No more turns left, Black wins: 1:62");
    }

    #[test]
    fn test_no_legal_move_passes_with_pass_policy() {
        let config = GameConfig {
            no_move_policy: NoMovePolicy::Pass,
            ..GameConfig::default()
        };
        let mut game =
            TurnController::with_board(one_hole_board(), Side::Black, config, Recorder::default());

        let outcome = game.make_move(0, 0, Side::Black).unwrap();

        assert_eq!(outcome, TurnOutcome::Passed { side: Side::Black });
        assert_eq!(game.side_to_move(), Side::White);
        assert_eq!(game.observer().passes, vec![Side::Black]);
        assert!(!game.is_ended());

        game.make_move(0, 0, Side::White).unwrap();
        assert!(game.is_ended());
    }

    #[test]
    fn test_move_reports_opponent_pass() {
        // 白が(0,2)に打つと黒は置けなくなるが、白には(5,2)が残る
        let mut board = Board::empty();
        board.set(0, 0, Cell::White).unwrap();
        board.set(0, 1, Cell::Black).unwrap();
        board.set(5, 0, Cell::White).unwrap();
        board.set(5, 1, Cell::Black).unwrap();
        let config = GameConfig {
            no_move_policy: NoMovePolicy::Pass,
            ..GameConfig::default()
        };
        let mut game = TurnController::with_board(board, Side::White, config, Recorder::default());

        let outcome = game.make_move(0, 2, Side::White).unwrap();

        assert!(matches!(
            outcome,
            TurnOutcome::Moved { then: Some(Transition::Passed(Side::Black)), .. }
        ));
        assert_eq!(game.side_to_move(), Side::White);
        assert_eq!(game.observer().passes, vec![Side::Black]);
        assert!(!game.is_ended());
    }

    #[test]
    fn test_pass_or_end_rejects_when_moves_exist() {
        let mut game = controller();
        assert!(game.pass_or_end().is_err());
        assert!(!game.is_ended());
    }
}
