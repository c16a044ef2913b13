//! 盤面の表示用射影モジュール
//! 1つの盤面を白側・黒側それぞれの視点に変換する。
//! ビューは状態を持たず、常に論理盤面から計算される。

use super::board::Board;
use super::types::{Cell, Position, Side, BOARD_SIZE};
use serde::{Deserialize, Serialize};

/// 盤面の見え方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardView {
    /// 論理盤面そのまま
    Identity,
    /// 180度回転
    Rotated180,
}

impl BoardView {
    /// 手番側の席に対応するビュー
    pub fn for_side(side: Side) -> Self {
        match side {
            Side::White => BoardView::Identity,
            Side::Black => BoardView::Rotated180,
        }
    }

    /// 論理座標をビュー座標に変換する
    /// どちらの変換も自己逆写像なので、ビュー座標から論理座標への変換にもそのまま使える
    /// 盤外の座標はNone
    pub fn project(self, position: Position) -> Option<Position> {
        if !position.is_valid() {
            return None;
        }
        match self {
            BoardView::Identity => Some(position),
            BoardView::Rotated180 => Position::new(
                BOARD_SIZE - 1 - position.row,
                BOARD_SIZE - 1 - position.col,
            ),
        }
    }

    /// ビューから見た盤面を生成する
    pub fn render(self, board: &Board) -> [[Cell; BOARD_SIZE]; BOARD_SIZE] {
        let mut rendered = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for position in Position::all() {
            if let (Some(target), Some(cell)) = (self.project(position), board.get_cell(position)) {
                rendered[target.row][target.col] = cell;
            }
        }
        rendered
    }
}
