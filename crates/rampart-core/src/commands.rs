//! Player commands sent from the host to the simulation.
//!
//! Commands are queued and applied at the next tick boundary. Invalid
//! commands are dropped without changing any state.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Start a new match (from the menu or after a finished match).
    StartGame,
    /// Choose which tower type the next `PlaceTowerAt` builds.
    SelectTowerType { id: u32 },
    /// Build the selected tower at the slot nearest to the click.
    /// The selection is cleared whether or not the build succeeds.
    PlaceTowerAt { x: f64, y: f64 },
    /// Deploy a melee unit from a barracks onto the lane nearest to the click.
    PlaceUnitAt { x: f64, y: f64 },
    /// Arm the area ability; the next confirm picks its target.
    ActivateAbility,
    /// Drop the armed area ability at a point.
    ConfirmAbilityTarget { x: f64, y: f64 },
}
