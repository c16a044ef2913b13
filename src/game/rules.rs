//! オセロのルール実装モジュール
//! 合法手の判定、石のフリップ処理、盤面が埋まったかの判定を担当する。
//! 手番の管理は行わない（controllerモジュールの責務）。

use super::board::Board;
use super::types::{Cell, Position, Side, CELL_COUNT};

/// 盤面上の8方向への移動ベクトル
/// 北、南、東、西、北西、北東、南西、南東の順
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, 1),
    (0, -1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// オセロのルールを実装する構造体
/// スタティックメソッドのみを提供する
pub struct OthelloRules;

impl OthelloRules {
    /// 指定した位置にsideが置けるかチェックする
    /// 空のマスで、かつ少なくとも1方向で相手の石を挟める必要がある
    pub fn is_valid_move(board: &Board, side: Side, position: Position) -> bool {
        if !board.is_empty(position) {
            return false;
        }

        // 最初に条件を満たした方向で確定
        DIRECTIONS
            .iter()
            .any(|&direction| Self::captures_in_direction(board, side, position, direction) > 0)
    }

    /// 1方向に挟める相手の石の数を返す
    /// 隣が空・盤外、または盤端まで相手の石が続く場合は0
    fn captures_in_direction(
        board: &Board,
        side: Side,
        origin: Position,
        direction: (isize, isize),
    ) -> usize {
        let own = side.to_cell();
        let opponent = side.opponent().to_cell();
        let mut run = 0;
        let mut current = origin.step(direction);

        while let Some(position) = current {
            match board.get_cell(position) {
                Some(cell) if cell == opponent => run += 1,
                Some(cell) if cell == own => return run,
                _ => return 0,
            }
            current = position.step(direction);
        }

        0
    }

    /// 指定した位置に石を置いた場合にひっくり返る石の位置を返す
    pub fn flips_for(board: &Board, side: Side, position: Position) -> Vec<Position> {
        let mut flipped = Vec::new();

        for &direction in &DIRECTIONS {
            let run = Self::captures_in_direction(board, side, position, direction);
            let mut current = position;
            for _ in 0..run {
                match current.step(direction) {
                    Some(next) => {
                        flipped.push(next);
                        current = next;
                    }
                    None => break,
                }
            }
        }

        flipped
    }

    /// 手を盤面に適用し、ひっくり返した石の位置を返す
    /// 合法性の再チェックは行わないため、呼び出し側で必ずis_valid_moveを通すこと
    pub fn apply_move(board: &mut Board, side: Side, position: Position) -> Vec<Position> {
        debug_assert!(Self::is_valid_move(board, side, position));

        // 各方向は独立しているので、置く前に全方向分を計算しておく
        let flipped = Self::flips_for(board, side, position);

        board.set_cell(position, side.to_cell());
        for &flip_pos in &flipped {
            board.set_cell(flip_pos, side.to_cell());
        }

        flipped
    }

    /// apply_moveの結果を取り消して元の盤面に戻す
    pub fn undo_move(board: &mut Board, side: Side, position: Position, flipped: &[Position]) {
        let opponent = side.opponent().to_cell();
        for &flip_pos in flipped {
            board.set_cell(flip_pos, opponent);
        }
        board.set_cell(position, Cell::Empty);
    }

    /// 指定した色の合法手を全て取得する（行優先順）
    pub fn legal_moves(board: &Board, side: Side) -> Vec<Position> {
        Position::all()
            .filter(|&position| Self::is_valid_move(board, side, position))
            .collect()
    }

    /// 指定した色に合法手が1つでもあるかチェックする
    pub fn any_legal_move(board: &Board, side: Side) -> bool {
        Position::all().any(|position| Self::is_valid_move(board, side, position))
    }

    /// 全マスが埋まっているかチェックする
    pub fn is_board_full(board: &Board) -> bool {
        board.disc_count() == CELL_COUNT
    }
}
