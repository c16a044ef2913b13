//! AIの盤面評価
//! 評価は石数のみで行う。

use crate::game::{Board, Side};

/// 盤面評価を行うスタティックメソッド集
pub struct BoardEvaluator;

impl BoardEvaluator {
    /// sideの石数をそのまま評価値とする
    pub fn evaluate(board: &Board, side: Side) -> i32 {
        i32::from(board.count_of(side))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    #[test]
    fn test_evaluate_initial() {
        let board = Board::new();

        assert_eq!(BoardEvaluator::evaluate(&board, Side::White), 2);
        assert_eq!(BoardEvaluator::evaluate(&board, Side::Black), 2);
    }

    #[test]
    fn test_evaluate_advantage() {
        let mut board = Board::new();
        board.set(0, 0, Cell::Black).unwrap();

        assert_eq!(BoardEvaluator::evaluate(&board, Side::Black), 3);
        assert_eq!(BoardEvaluator::evaluate(&board, Side::White), 2);
    }
}
