//! Area ability: arm, target, blast, cool down.

use hecs::World;

use rampart_core::components::{Enemy, Health};
use rampart_core::constants::*;
use rampart_core::error::CommandRejected;
use rampart_core::events::SimEvent;
use rampart_core::types::Position;

use crate::match_state::AbilityState;

/// Arm the ability so the next confirm picks a target.
pub fn activate(state: &mut AbilityState) -> Result<(), CommandRejected> {
    if state.selecting {
        return Err(CommandRejected::AbilityTargeting);
    }
    if !state.ready {
        return Err(CommandRejected::AbilityNotReady {
            remaining_secs: state.cooldown_remaining_secs,
        });
    }
    state.selecting = true;
    Ok(())
}

/// Fire the armed ability at `at` and start its cooldown. Returns the hit count.
pub fn confirm(
    world: &mut World,
    state: &mut AbilityState,
    at: Position,
    events: &mut Vec<SimEvent>,
) -> Result<u32, CommandRejected> {
    if !state.selecting {
        return Err(CommandRejected::AbilityNotTargeting);
    }
    let hits = blast(world, at);
    state.selecting = false;
    state.ready = false;
    state.cooldown_remaining_secs = ABILITY_COOLDOWN_SECS;
    events.push(SimEvent::AbilityFired { at, hits });
    Ok(hits)
}

/// Deal lethal damage to every living enemy within the radius.
/// Kills are reconciled by the cleanup sweep.
pub fn blast(world: &mut World, at: Position) -> u32 {
    let mut hits = 0;
    for (_entity, (_enemy, position, health)) in
        world.query_mut::<(&Enemy, &Position, &mut Health)>()
    {
        if !health.is_dead() && position.distance_to(&at) <= ABILITY_RADIUS {
            health.current -= ABILITY_DAMAGE.max(health.max + 1.0);
            hits += 1;
        }
    }
    hits
}

/// Count the cooldown down; the ability is ready again once it hits zero.
pub fn tick_cooldown(state: &mut AbilityState, dt: f64) {
    if state.ready {
        return;
    }
    state.cooldown_remaining_secs -= dt;
    if state.cooldown_remaining_secs <= 0.0 {
        state.cooldown_remaining_secs = 0.0;
        state.ready = true;
    }
}
