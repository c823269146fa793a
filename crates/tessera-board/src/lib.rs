//! Ordered cell store and mutation operations for the Tessera simulation.
//!
//! This crate contains the logic layer for the board -- everything that
//! operates on the ordered cell sequence without touching randomness or
//! scheduling. It sits between `tessera-types` (which defines the data
//! structures) and `tessera-core` (which drives mutations from the action
//! engine and the periodic driver).
//!
//! # Modules
//!
//! - [`board`] -- The [`Board`] store: append, increment, reset, positional
//!   remove, absorb, and snapshot projection.
//! - [`error`] -- Error types for board operations ([`BoardError`]).

pub mod board;
pub mod error;

pub use board::Board;
pub use error::BoardError;
