//! Events emitted by the simulation for display hooks.

use serde::{Deserialize, Serialize};

use crate::enums::{EnemyArchetype, KillSource, MatchOutcome};
use crate::types::{EntityId, Position};

/// Something the host may want to react to (sounds, banners, counters).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// The wave began releasing enemies.
    WaveStarted { wave: u32, quota: u32 },
    /// An enemy died; `gold` is what was credited.
    EnemyKilled {
        id: EntityId,
        archetype: EnemyArchetype,
        gold: u32,
        source: KillSource,
    },
    /// A melee unit died.
    UnitLost { id: EntityId },
    TowerPlaced { id: EntityId, type_id: u32, slot: usize },
    UnitDeployed { id: EntityId, lane: usize },
    /// The area ability went off.
    AbilityFired { at: Position, hits: u32 },
    /// The match ended.
    MatchEnded { outcome: MatchOutcome },
}
