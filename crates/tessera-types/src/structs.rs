//! Core entity structs for the Tessera board simulation.
//!
//! Covers the cell data model and the snapshot projection handed to a
//! presentation layer for rendering.

use serde::{Deserialize, Serialize};

use crate::enums::ColorTag;

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// One numbered, colored cell on the board.
///
/// Cells have no stable identity: their position in the board's ordered
/// sequence is their identity. They are created by the action engine,
/// mutated in place, and removed positionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// The cell's numeric value. Mutations saturate at `u64::MAX`.
    pub value: u64,
    /// The categorical color tag assigned at generation time.
    pub color: ColorTag,
}

impl Cell {
    /// Create a cell from a value and a color tag.
    pub const fn new(value: u64, color: ColorTag) -> Self {
        Self { value, color }
    }
}

// ---------------------------------------------------------------------------
// Snapshot types
// ---------------------------------------------------------------------------

/// The render-facing projection of one cell.
///
/// `is_last` is derived from position at snapshot time and is used by the
/// presentation layer to decide whether to draw a trailing separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    /// The cell's numeric value.
    pub value: u64,
    /// The cell's color tag.
    pub color: ColorTag,
    /// Whether this cell occupies the last position on the board.
    pub is_last: bool,
}

/// An ordered, read-only snapshot of the board at a given tick.
///
/// This is the only surface a presentation layer consumes: cell order is
/// display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// The tick count at the time the snapshot was taken.
    pub tick: u64,
    /// The cells in display order.
    pub cells: Vec<CellView>,
}
