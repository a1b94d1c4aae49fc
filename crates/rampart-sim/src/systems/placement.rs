//! Tower placement rules.

use hecs::World;

use rampart_core::components::Tower;
use rampart_core::config::GameConfig;
use rampart_core::constants::{MAX_TOWERS, TOWER_MIN_SPACING};
use rampart_core::error::CommandRejected;
use rampart_core::types::{EntityId, Position};

use crate::match_state::MatchState;
use crate::world_setup::{alloc_id, find_slot, spawn_tower};

pub fn tower_count(world: &World) -> usize {
    world.query::<&Tower>().iter().count()
}

/// A slot is taken when a tower sits on it or within minimum spacing of it.
pub fn slot_occupied(world: &World, slots: &[Position], index: usize) -> bool {
    let Some(slot) = slots.get(index) else {
        return false;
    };
    world
        .query::<(&Tower, &Position)>()
        .iter()
        .any(|(_, (tower, position))| {
            tower.slot == index || position.distance_to(slot) < TOWER_MIN_SPACING
        })
}

/// Resolve a click to a free slot, ignoring cost.
pub fn validate_site(
    world: &World,
    slots: &[Position],
    at: Position,
) -> Result<usize, CommandRejected> {
    let count = tower_count(world);
    if count >= MAX_TOWERS {
        return Err(CommandRejected::TowerCapReached(MAX_TOWERS));
    }
    let index = find_slot(slots, &at).ok_or(CommandRejected::OutsidePlacementZone {
        x: at.x,
        y: at.y,
    })?;
    if slot_occupied(world, slots, index) {
        return Err(CommandRejected::SlotOccupied(index));
    }
    Ok(index)
}

/// Build a tower of `type_id` at the slot nearest the click, charging its cost.
pub fn place_tower(
    world: &mut World,
    config: &GameConfig,
    slots: &[Position],
    match_state: &mut MatchState,
    next_entity_id: &mut u32,
    type_id: u32,
    at: Position,
) -> Result<(EntityId, usize), CommandRejected> {
    let tower_type = config
        .tower_type(type_id)
        .ok_or(CommandRejected::UnknownTowerType(type_id))?;
    let slot = validate_site(world, slots, at)?;
    match_state.spend(tower_type.cost)?;

    let id = alloc_id(next_entity_id);
    spawn_tower(world, id, tower_type, slot, slots[slot]);
    Ok((id, slot))
}
