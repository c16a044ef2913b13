//! オセロの盤面状態を管理するモジュール
//! 8x8グリッドの盤面と石の配置、操作を担当する。

use super::types::{Cell, Position, Side, BOARD_SIZE, CELL_COUNT};
use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};

/// 8x8オセロ盤面を表現する構造体
/// 各マスのCell状態を保持し、範囲チェック付きの読み書きを提供する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// 新しいオセロ盤面を作成する
    /// 中央の4マスに初期配置を設定する
    pub fn new() -> Self {
        let mut board = Board::empty();

        board.cells[3][3] = Cell::White;
        board.cells[3][4] = Cell::Black;
        board.cells[4][3] = Cell::Black;
        board.cells[4][4] = Cell::White;

        board
    }

    /// 石が1つもない盤面を作成する
    pub fn empty() -> Self {
        Board {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// 任意の配置から盤面を作成する
    pub fn from_cells(cells: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Board { cells }
    }

    /// 盤面の全マスを参照する
    pub fn cells(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// 行・列指定でセル状態を取得する
    /// 範囲外の場合はOutOfRangeエラー
    pub fn get(&self, row: usize, col: usize) -> Result<Cell> {
        Position::new(row, col)
            .and_then(|pos| self.get_cell(pos))
            .ok_or(GameError::OutOfRange { row, col })
    }

    /// 行・列指定でセル状態を設定する
    /// 範囲外の場合はOutOfRangeエラー
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<()> {
        let position = Position::new(row, col).ok_or(GameError::OutOfRange { row, col })?;
        self.set_cell(position, cell);
        Ok(())
    }

    /// 指定した位置のセル状態を取得する
    /// 範囲外の場合はNoneを返す
    pub fn get_cell(&self, position: Position) -> Option<Cell> {
        self.cells
            .get(position.row)
            .and_then(|row| row.get(position.col))
            .copied()
    }

    /// 指定した位置にセル状態を設定する
    /// 範囲外の場合はfalseを返す
    pub fn set_cell(&mut self, position: Position, cell: Cell) -> bool {
        match self
            .cells
            .get_mut(position.row)
            .and_then(|row| row.get_mut(position.col))
        {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// 指定した位置が空かチェックする
    pub fn is_empty(&self, position: Position) -> bool {
        matches!(self.get_cell(position), Some(Cell::Empty))
    }

    /// 指定した色の石の数を数える
    pub fn count_of(&self, side: Side) -> u8 {
        let target = side.to_cell();
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == target)
            .count() as u8
    }

    /// 盤面上の白石と黒石の数を数える
    /// 戻り値: (白石数, 黒石数)
    pub fn count_pieces(&self) -> (u8, u8) {
        (self.count_of(Side::White), self.count_of(Side::Black))
    }

    /// 盤面上の石の総数
    pub fn disc_count(&self) -> u8 {
        let (white, black) = self.count_pieces();
        white + black
    }

    /// 空きマスの数
    pub fn empty_count(&self) -> u8 {
        CELL_COUNT - self.disc_count()
    }

    /// デバッグ用の盤面表示文字列を生成する
    /// wで白、bで黒、.で空マスを表現
    pub fn display(&self) -> String {
        let mut result = String::new();
        result.push_str("  0 1 2 3 4 5 6 7\n");

        for (row_idx, row) in self.cells.iter().enumerate() {
            result.push_str(&format!("{} ", row_idx));
            for &cell in row {
                let symbol = match cell {
                    Cell::Empty => ".",
                    Cell::White => "w",
                    Cell::Black => "b",
                };
                result.push_str(&format!("{} ", symbol));
            }
            result.push('\n');
        }

        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
