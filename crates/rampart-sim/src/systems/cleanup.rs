//! Cleanup sweep: breach check, death removal and the victory check.
//!
//! Runs once per tick after all damage has been dealt. A breach ends the
//! match before anything else is reconciled.

use hecs::{Entity, World};

use rampart_core::components::{Enemy, Health, LaneProgress, Unit};
use rampart_core::enums::{KillSource, MatchOutcome};
use rampart_core::events::SimEvent;
use rampart_core::types::EntityId;

use crate::match_state::MatchState;
use crate::systems::melee::FreezeTable;

/// Returns the match outcome if this sweep decided one.
pub fn run(
    world: &mut World,
    match_state: &mut MatchState,
    quota: u32,
    freeze: &mut FreezeTable,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
) -> Option<MatchOutcome> {
    let breached = world
        .query::<(&Enemy, &LaneProgress)>()
        .iter()
        .any(|(_, (_, lp))| lp.progress >= 1.0);
    if breached {
        return Some(MatchOutcome::Defeat);
    }

    // Dead units.
    let mut lost: Vec<(EntityId, Entity)> = world
        .query::<(&EntityId, &Unit, &Health)>()
        .iter()
        .filter(|(_, (_, _, health))| health.is_dead())
        .map(|(entity, (id, _, _))| (*id, entity))
        .collect();
    lost.sort_by_key(|(id, _)| *id);

    despawn_buffer.clear();
    for (id, entity) in lost {
        freeze.remove(&id);
        events.push(SimEvent::UnitLost { id });
        despawn_buffer.push(entity);
    }

    // Dead enemies, credited once each.
    let mut killed: Vec<(EntityId, Entity, Enemy)> = world
        .query::<(&EntityId, &Enemy, &Health)>()
        .iter()
        .filter(|(_, (_, _, health))| health.is_dead())
        .map(|(entity, (id, enemy, _))| (*id, entity, *enemy))
        .collect();
    killed.sort_by_key(|(id, _, _)| *id);

    for (id, entity, enemy) in killed {
        let gold = match_state.credit_kill(enemy.bounty);
        events.push(SimEvent::EnemyKilled {
            id,
            archetype: enemy.archetype,
            gold,
            source: KillSource::Sweep,
        });
        despawn_buffer.push(entity);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    let enemies_alive = world.query::<&Enemy>().iter().count();
    if match_state.kills >= quota && enemies_alive == 0 {
        return Some(MatchOutcome::Victory);
    }
    None
}
