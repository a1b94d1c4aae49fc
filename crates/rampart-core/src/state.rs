//! Game state snapshot: the complete visible state handed to the host after
//! each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{EntityId, Position, SimTime};

/// Complete game state for drawing and HUD counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub gold: u32,
    pub selected_tower: Option<u32>,
    pub wave: WaveView,
    pub kills: u32,
    pub health_buff_count: u32,
    pub slots: Vec<SlotView>,
    pub towers: Vec<TowerView>,
    pub enemies: Vec<EnemyView>,
    pub units: Vec<UnitView>,
    pub projectiles: Vec<ProjectileView>,
    pub ability: AbilityView,
    pub events: Vec<SimEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub number: u32,
    pub phase: WavePhase,
    pub spawned: u32,
    pub quota: u32,
    pub alive: u32,
}

/// A valid tower placement slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotView {
    pub index: usize,
    pub position: Position,
    pub occupied: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub id: EntityId,
    pub type_id: u32,
    pub slot: usize,
    pub position: Position,
    pub range: f64,
    pub is_barracks: bool,
    /// Milliseconds until the next shot (ranged) or next unit credit (barracks).
    pub cooldown_remaining_ms: f64,
    /// Undeployed unit credits (barracks only).
    pub unit_credits: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EntityId,
    pub archetype: EnemyArchetype,
    pub lane: usize,
    pub progress: f64,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    pub in_combat: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitView {
    pub id: EntityId,
    pub lane: usize,
    pub progress: f64,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    pub in_combat: bool,
    /// Damage to display next to the unit, if the flash is still showing.
    pub last_damage: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub from: Position,
    pub to: Position,
    pub tower_type_id: u32,
    pub ttl_secs: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AbilityView {
    pub ready: bool,
    pub selecting: bool,
    pub cooldown_remaining_secs: f64,
    pub cooldown_total_secs: f64,
    pub radius: f64,
}
