//! Enumeration types for the Tessera board simulation.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Color tags
// ---------------------------------------------------------------------------

/// Categorical color tag carried by every cell.
///
/// The tag is assigned at generation time by a uniform draw and never
/// changes afterwards. It also drives the value-generation rule: cells
/// tagged [`ColorTag::Red`] receive their base draw multiplied by the
/// configured red multiplier, while [`ColorTag::Blue`] cells keep the base
/// draw unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ColorTag {
    /// Red cells; generated values are the base draw times the red multiplier.
    Red,
    /// Blue cells; generated values are the base draw unchanged.
    Blue,
}

// ---------------------------------------------------------------------------
// Cell actions
// ---------------------------------------------------------------------------

/// One mutation the action engine can apply to an existing cell.
///
/// Actions carry no payload; the target index is drawn separately by the
/// engine. The weighted set the engine draws from defaults to
/// increment=5, reset=3, delete=1, absorb=1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CellAction {
    /// Add 1 to the cell's value.
    Increment,
    /// Set the cell's value to 0.
    Reset,
    /// Remove the cell from the board; later cells shift left.
    Delete,
    /// Add the preceding cell's current value to this cell's value.
    Absorb,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn color_tag_serializes_as_variant_name() {
        let json = serde_json::to_string(&ColorTag::Red).unwrap();
        assert_eq!(json, "\"Red\"");
        let back: ColorTag = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ColorTag::Red);
    }

    #[test]
    fn cell_action_serializes_as_variant_name() {
        let json = serde_json::to_string(&CellAction::Absorb).unwrap();
        assert_eq!(json, "\"Absorb\"");
        let back: CellAction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CellAction::Absorb);
    }
}
