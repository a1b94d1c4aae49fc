//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// Overall game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first `StartGame`.
    #[default]
    MainMenu,
    /// A match is running.
    Active,
    /// Every enemy of the wave was killed.
    Victory,
    /// An enemy reached the end of its lane.
    Defeat,
}

impl GamePhase {
    /// Whether a new match may be started from this phase.
    pub fn can_start(self) -> bool {
        !matches!(self, GamePhase::Active)
    }
}

/// Wave director state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// Waiting for the wave to start.
    #[default]
    Idle,
    /// Enemies are still being released.
    Spawning,
    /// The whole quota has been released; survivors may still be alive.
    Cleared,
}

/// Enemy archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyArchetype {
    #[default]
    Normal,
    Fast,
    Tank,
}

/// What dealt the killing blow to an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KillSource {
    Tower,
    /// Melee or area damage, reconciled in the end-of-tick sweep.
    Sweep,
}

/// Terminal match outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Victory,
    Defeat,
}

impl From<MatchOutcome> for GamePhase {
    fn from(outcome: MatchOutcome) -> Self {
        match outcome {
            MatchOutcome::Victory => GamePhase::Victory,
            MatchOutcome::Defeat => GamePhase::Defeat,
        }
    }
}

/// Target of a remaining-cooldown query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CooldownQuery {
    /// The area-damage ability.
    Ability,
    /// A placed tower. Barracks report time until the next unit credit.
    Tower(EntityId),
}
