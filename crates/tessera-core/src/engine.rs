//! The action engine: exactly one board mutation per invocation.
//!
//! Each step runs one of two regimes, decided by the current board length:
//!
//! - **Growth**: while the board is shorter than the growth threshold, a
//!   new cell is generated (uniform color draw, uniform base-value draw,
//!   red multiplier) and appended.
//! - **Mutation**: at or above the threshold, a target index is drawn
//!   uniformly and one action is drawn from the weighted set
//!   (increment / reset / delete / absorb), then applied at that index.
//!
//! Deleting below the threshold re-enters the growth regime on the next
//! step; the length check runs every invocation. On any selection error
//! the engine returns without mutating the board.

use rand::Rng;
use tessera_board::{Board, BoardError};
use tessera_types::{Cell, CellAction, ColorTag};
use tracing::debug;

use crate::choice::{self, ChoiceError};
use crate::config::{BoardConfig, SimulationConfig};

/// The color candidate set for cell generation.
const COLOR_CHOICES: [ColorTag; 2] = [ColorTag::Red, ColorTag::Blue];

/// Errors that can occur during an engine step.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A random selection failed.
    #[error("choice error: {source}")]
    Choice {
        /// The underlying choice error.
        #[from]
        source: ChoiceError,
    },

    /// A board mutation failed.
    #[error("board error: {source}")]
    Board {
        /// The underlying board error.
        #[from]
        source: BoardError,
    },
}

/// What a single engine step did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A new cell was generated and appended (growth regime).
    Appended {
        /// The cell that was appended.
        cell: Cell,
    },
    /// An action was applied to an existing cell (mutation regime).
    Applied {
        /// The action that was drawn.
        action: CellAction,
        /// The index the action was applied at.
        index: usize,
    },
}

/// The action engine.
///
/// Holds the generation parameters and the weighted action table; the
/// board and the random source are supplied per step, so the engine itself
/// is immutable and shareable.
#[derive(Debug, Clone)]
pub struct ActionEngine {
    /// Board and generation parameters.
    board: BoardConfig,
    /// The weighted action table drawn from in the mutation regime.
    weights: [(CellAction, u32); 4],
}

impl ActionEngine {
    /// Build an engine from a simulation configuration.
    pub const fn new(config: &SimulationConfig) -> Self {
        Self {
            board: BoardConfig {
                growth_threshold: config.board.growth_threshold,
                value_draw_max: config.board.value_draw_max,
                red_multiplier: config.board.red_multiplier,
            },
            weights: config.actions.weighted_entries(),
        }
    }

    /// Apply exactly one mutation to the board.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Choice`] if a selection primitive fails (an
    /// empty candidate set); the board is left unmodified in that case.
    pub fn step(
        &self,
        board: &mut Board,
        rng: &mut impl Rng,
    ) -> Result<StepOutcome, EngineError> {
        if board.len() < self.board.growth_threshold {
            let cell = self.generate_cell(rng)?;
            board.push(cell);
            debug!(
                value = cell.value,
                color = ?cell.color,
                len = board.len(),
                "appended cell"
            );
            return Ok(StepOutcome::Appended { cell });
        }

        let index = choice::pick_index(rng, board.len(), "board index")?;
        let action = *choice::pick_weighted(rng, &self.weights, "actions")?;
        match action {
            CellAction::Increment => board.increment(index)?,
            CellAction::Reset => board.reset(index)?,
            CellAction::Delete => {
                let _removed = board.remove(index)?;
            }
            CellAction::Absorb => board.absorb_previous(index)?,
        }
        debug!(?action, index, len = board.len(), "applied action");
        Ok(StepOutcome::Applied { action, index })
    }

    /// Generate one cell: uniform color draw, uniform base draw in
    /// `[1, value_draw_max]`, red cells multiplied by the red multiplier.
    fn generate_cell(&self, rng: &mut impl Rng) -> Result<Cell, EngineError> {
        let color = *choice::pick_uniform(rng, &COLOR_CHOICES, "colors")?;
        let base = rng.random_range(1..=self.board.value_draw_max);
        let value = match color {
            ColorTag::Red => base.saturating_mul(self.board.red_multiplier),
            ColorTag::Blue => base,
        };
        Ok(Cell { value, color })
    }
}
