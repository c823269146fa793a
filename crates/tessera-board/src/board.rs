//! The board: an ordered, growable sequence of cells.
//!
//! The board exclusively owns its cells. Insertion happens only at the end,
//! removal only by position; the sequence is never reordered, so a cell's
//! position is its identity. All value arithmetic saturates at `u64::MAX`
//! -- no silent overflows, no panics.

use serde::{Deserialize, Serialize};
use tessera_types::{BoardSnapshot, Cell, CellView};

use crate::error::BoardError;

/// The ordered cell store.
///
/// Starts empty and lives only in memory. Positional mutations return
/// [`BoardError::IndexOutOfBounds`] for indices past the end rather than
/// panicking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// The cells in insertion order.
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board.
    pub const fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Create a board from an existing cell sequence (useful for testing
    /// and state restoration).
    pub const fn from_cells(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Return the number of cells on the board.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Return `true` if the board holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Return the cells in insertion order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Return the cell at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Append a cell to the end of the board.
    pub fn push(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// Add 1 to the value of the cell at `index`, saturating at `u64::MAX`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::IndexOutOfBounds`] if `index` is past the end.
    pub fn increment(&mut self, index: usize) -> Result<(), BoardError> {
        let len = self.cells.len();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(BoardError::IndexOutOfBounds { index, len })?;
        cell.value = cell.value.saturating_add(1);
        Ok(())
    }

    /// Set the value of the cell at `index` to 0. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::IndexOutOfBounds`] if `index` is past the end.
    pub fn reset(&mut self, index: usize) -> Result<(), BoardError> {
        let len = self.cells.len();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(BoardError::IndexOutOfBounds { index, len })?;
        cell.value = 0;
        Ok(())
    }

    /// Remove and return the cell at `index`. Later cells shift left.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::IndexOutOfBounds`] if `index` is past the end.
    pub fn remove(&mut self, index: usize) -> Result<Cell, BoardError> {
        let len = self.cells.len();
        if index >= len {
            return Err(BoardError::IndexOutOfBounds { index, len });
        }
        Ok(self.cells.remove(index))
    }

    /// Add the preceding cell's current value to the cell at `index`.
    ///
    /// Index 0 has no predecessor; the operation is defined as a no-op
    /// there, for any board. The predecessor's value is read at call time,
    /// not snapshotted. Addition saturates at `u64::MAX`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::IndexOutOfBounds`] if `index` is nonzero and
    /// past the end.
    pub fn absorb_previous(&mut self, index: usize) -> Result<(), BoardError> {
        let Some(prev_index) = index.checked_sub(1) else {
            return Ok(());
        };
        let len = self.cells.len();
        if index >= len {
            return Err(BoardError::IndexOutOfBounds { index, len });
        }
        let prev_value = self.cells.get(prev_index).map_or(0, |cell| cell.value);
        if let Some(cell) = self.cells.get_mut(index) {
            cell.value = cell.value.saturating_add(prev_value);
        }
        Ok(())
    }

    /// Project the board into an ordered [`BoardSnapshot`] for rendering.
    ///
    /// Each cell's `is_last` flag is derived from its position so the
    /// presentation layer can suppress the trailing separator.
    pub fn snapshot(&self, tick: u64) -> BoardSnapshot {
        let last_index = self.cells.len().checked_sub(1);
        let cells = self
            .cells
            .iter()
            .enumerate()
            .map(|(index, cell)| CellView {
                value: cell.value,
                color: cell.color,
                is_last: Some(index) == last_index,
            })
            .collect();
        BoardSnapshot { tick, cells }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tessera_types::ColorTag;

    use super::*;

    /// Helper building the worked example board: `[{30,Red},{50,Blue}]`.
    fn example_board() -> Board {
        Board::from_cells(vec![
            Cell::new(30, ColorTag::Red),
            Cell::new(50, ColorTag::Blue),
        ])
    }

    #[test]
    fn new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_empty());
        assert_eq!(board.len(), 0);
    }

    #[test]
    fn push_appends_in_order() {
        let mut board = Board::new();
        board.push(Cell::new(1, ColorTag::Blue));
        board.push(Cell::new(2, ColorTag::Red));
        assert_eq!(board.len(), 2);
        assert_eq!(board.get(0).unwrap().value, 1);
        assert_eq!(board.get(1).unwrap().value, 2);
    }

    #[test]
    fn increment_adds_one() {
        let mut board = example_board();
        board.increment(0).unwrap();
        assert_eq!(board.get(0).unwrap().value, 31);
        assert_eq!(board.get(1).unwrap().value, 50);
    }

    #[test]
    fn increment_saturates_at_max() {
        let mut board = Board::from_cells(vec![Cell::new(u64::MAX, ColorTag::Blue)]);
        board.increment(0).unwrap();
        assert_eq!(board.get(0).unwrap().value, u64::MAX);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut board = example_board();
        board.reset(1).unwrap();
        assert_eq!(board.get(1).unwrap().value, 0);
        board.reset(1).unwrap();
        assert_eq!(board.get(1).unwrap().value, 0);
    }

    #[test]
    fn remove_shifts_later_cells_left() {
        let mut board = Board::from_cells(vec![
            Cell::new(1, ColorTag::Red),
            Cell::new(2, ColorTag::Blue),
            Cell::new(3, ColorTag::Red),
        ]);
        let removed = board.remove(1).unwrap();
        assert_eq!(removed.value, 2);
        assert_eq!(board.len(), 2);
        assert_eq!(board.get(0).unwrap().value, 1);
        assert_eq!(board.get(1).unwrap().value, 3);
    }

    #[test]
    fn absorb_adds_preceding_value() {
        // Worked example: [{30,Red},{50,Blue}] -> [{30,Red},{80,Blue}].
        let mut board = example_board();
        board.absorb_previous(1).unwrap();
        assert_eq!(board.get(0).unwrap().value, 30);
        assert_eq!(board.get(1).unwrap().value, 80);
        assert_eq!(board.get(1).unwrap().color, ColorTag::Blue);
    }

    #[test]
    fn absorb_at_index_zero_is_noop() {
        let mut board = example_board();
        board.absorb_previous(0).unwrap();
        assert_eq!(board.get(0).unwrap().value, 30);
        assert_eq!(board.get(1).unwrap().value, 50);
    }

    #[test]
    fn absorb_at_index_zero_is_noop_on_empty_board() {
        let mut board = Board::new();
        board.absorb_previous(0).unwrap();
        assert!(board.is_empty());
    }

    #[test]
    fn absorb_reads_current_predecessor_value() {
        // The predecessor's value is read at call time: mutate it first,
        // then absorb, and the mutated value is what gets added.
        let mut board = example_board();
        board.increment(0).unwrap(); // 30 -> 31
        board.absorb_previous(1).unwrap(); // 50 + 31
        assert_eq!(board.get(1).unwrap().value, 81);
    }

    #[test]
    fn absorb_repeats_accumulate() {
        let mut board = example_board();
        board.absorb_previous(1).unwrap(); // 50 + 30 = 80
        board.absorb_previous(1).unwrap(); // 80 + 30 = 110
        assert_eq!(board.get(1).unwrap().value, 110);
    }

    #[test]
    fn positional_ops_reject_out_of_range_indices() {
        let mut board = example_board();
        assert!(matches!(
            board.increment(2),
            Err(BoardError::IndexOutOfBounds { index: 2, len: 2 })
        ));
        assert!(matches!(
            board.reset(5),
            Err(BoardError::IndexOutOfBounds { index: 5, len: 2 })
        ));
        assert!(matches!(
            board.remove(2),
            Err(BoardError::IndexOutOfBounds { index: 2, len: 2 })
        ));
        assert!(matches!(
            board.absorb_previous(2),
            Err(BoardError::IndexOutOfBounds { index: 2, len: 2 })
        ));
    }

    #[test]
    fn snapshot_marks_only_last_cell() {
        let board = Board::from_cells(vec![
            Cell::new(1, ColorTag::Red),
            Cell::new(2, ColorTag::Blue),
            Cell::new(3, ColorTag::Red),
        ]);
        let snapshot = board.snapshot(9);
        assert_eq!(snapshot.tick, 9);
        let flags: Vec<bool> = snapshot.cells.iter().map(|view| view.is_last).collect();
        assert_eq!(flags, vec![false, false, true]);
    }

    #[test]
    fn snapshot_of_empty_board_has_no_cells() {
        let snapshot = Board::new().snapshot(0);
        assert!(snapshot.cells.is_empty());
    }
}
