//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::EnemyArchetype;
use crate::types::Position;

/// Binding of an entity to a lane and its normalized place on it.
/// `Position` is derived from this after every update.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LaneProgress {
    pub lane: usize,
    pub progress: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
}

impl Health {
    pub fn full(max: f64) -> Self {
        Self { current: max, max }
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// Melee attack state shared by enemies and units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Melee {
    pub damage: f64,
    /// Nominal reach in pixels (display only).
    pub range: f64,
    pub cooldown_ms: f64,
    pub cooldown_remaining_ms: f64,
    /// Engaged with an opposing entity this tick.
    pub in_combat: bool,
}

impl Melee {
    pub fn new(damage: f64, range: f64, cooldown_ms: f64) -> Self {
        Self {
            damage,
            range,
            cooldown_ms,
            cooldown_remaining_ms: 0.0,
            in_combat: false,
        }
    }
}

/// Marks an entity as an enemy walking toward the goal line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    pub archetype: EnemyArchetype,
    /// Progress speed factor (see `PROGRESS_SPEED_DIVISOR`).
    pub speed: f64,
    /// Reward tier credited (halved) on a kill.
    pub bounty: u32,
}

/// Marks an entity as a player melee unit walking against the enemy flow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Unit {
    pub speed: f64,
}

/// Last damage a unit took, shown for a short time.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DamageFlash {
    pub amount: f64,
    pub remaining_secs: f64,
}

/// Per-type tower state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum TowerState {
    Ranged {
        damage: f64,
        cooldown_ms: f64,
        cooldown_remaining_ms: f64,
    },
    Barracks {
        /// Unit credits accrued and not yet deployed.
        credits: u32,
        /// Production time accumulated toward the next credit.
        timer_ms: f64,
    },
}

/// A placed tower. Towers never move and persist until the match resets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tower {
    pub type_id: u32,
    /// Index into the engine's placement slot list.
    pub slot: usize,
    pub range: f64,
    pub state: TowerState,
}

/// Cosmetic shot trace from a tower to the enemy it hit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub from: Position,
    pub to: Position,
    pub tower_type_id: u32,
    pub ttl_secs: f64,
}
