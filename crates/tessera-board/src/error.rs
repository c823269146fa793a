//! Error types for the tessera-board crate.
//!
//! All positional operations that can fail return typed errors rather than
//! panicking.

/// Errors that can occur during board operations.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// A positional operation referenced an index past the end of the board.
    #[error("index {index} out of bounds for board of length {len}")]
    IndexOutOfBounds {
        /// The index the caller supplied.
        index: usize,
        /// The board length at the time of the call.
        len: usize,
    },
}
