//! Tower cooldowns and ranged fire.
//!
//! Ranged towers shoot the nearest living enemy strictly inside their range.
//! An enemy a shot brings to zero health is removed and credited on the
//! spot, so later towers in the same tick never see it.

use hecs::{Entity, World};

use rampart_core::components::{Enemy, Health, Tower, TowerState};
use rampart_core::enums::KillSource;
use rampart_core::events::SimEvent;
use rampart_core::types::{EntityId, Position};

use crate::match_state::MatchState;
use crate::systems::barracks;
use crate::world_setup::spawn_projectile;

/// Count down ranged cooldowns and accrue barracks production.
///
/// Ranged cooldowns drop by `dt` once per tick, so a tower fires once per
/// `cooldown_ms`. That rate is the main lever on tower strength: halving
/// `cooldown_ms` doubles a tower's damage output against the wave.
pub fn advance_timers(world: &mut World, dt: f64, barracks_interval_ms: f64) {
    for (_entity, tower) in world.query_mut::<&mut Tower>() {
        match &mut tower.state {
            TowerState::Ranged {
                cooldown_remaining_ms,
                ..
            } => {
                if *cooldown_remaining_ms > 0.0 {
                    *cooldown_remaining_ms -= dt * 1000.0;
                }
            }
            TowerState::Barracks { credits, timer_ms } => {
                barracks::accrue(credits, timer_ms, dt, barracks_interval_ms);
            }
        }
    }
}

struct ReadyTower {
    entity: Entity,
    id: EntityId,
    type_id: u32,
    position: Position,
    range: f64,
    damage: f64,
}

struct Target {
    entity: Entity,
    id: EntityId,
    position: Position,
    enemy: Enemy,
}

/// Let every ready ranged tower take one shot, in placement order.
pub fn fire(world: &mut World, match_state: &mut MatchState, events: &mut Vec<SimEvent>) {
    let mut ready: Vec<ReadyTower> = world
        .query::<(&EntityId, &Tower, &Position)>()
        .iter()
        .filter_map(|(entity, (id, tower, position))| match tower.state {
            TowerState::Ranged {
                damage,
                cooldown_remaining_ms,
                ..
            } if cooldown_remaining_ms <= 0.0 => Some(ReadyTower {
                entity,
                id: *id,
                type_id: tower.type_id,
                position: *position,
                range: tower.range,
                damage,
            }),
            _ => None,
        })
        .collect();
    ready.sort_by_key(|t| t.id);

    for tower in ready {
        let Some(target) = nearest_target(world, &tower.position, tower.range) else {
            continue;
        };

        let killed = match world.get::<&mut Health>(target.entity) {
            Ok(mut health) => {
                health.current -= tower.damage;
                health.is_dead()
            }
            Err(_) => continue,
        };

        if let Ok(mut placed) = world.get::<&mut Tower>(tower.entity) {
            if let TowerState::Ranged {
                cooldown_ms,
                cooldown_remaining_ms,
                ..
            } = &mut placed.state
            {
                *cooldown_remaining_ms = *cooldown_ms;
            }
        }

        spawn_projectile(world, tower.position, target.position, tower.type_id);

        if killed {
            let _ = world.despawn(target.entity);
            let gold = match_state.credit_kill(target.enemy.bounty);
            log::debug!("tower {:?} killed enemy {:?} (+{gold} gold)", tower.id, target.id);
            events.push(SimEvent::EnemyKilled {
                id: target.id,
                archetype: target.enemy.archetype,
                gold,
                source: KillSource::Tower,
            });
        }
    }
}

/// Closest living enemy strictly within `range`. Equal distances keep the
/// enemy that spawned first.
fn nearest_target(world: &World, from: &Position, range: f64) -> Option<Target> {
    let mut candidates: Vec<(Target, f64)> = world
        .query::<(&EntityId, &Enemy, &Position, &Health)>()
        .iter()
        .filter(|(_, (_, _, _, health))| !health.is_dead())
        .map(|(entity, (id, enemy, position, _))| {
            (
                Target {
                    entity,
                    id: *id,
                    position: *position,
                    enemy: *enemy,
                },
                from.distance_to(position),
            )
        })
        .collect();
    candidates.sort_by_key(|(target, _)| target.id);

    let mut best: Option<Target> = None;
    let mut best_distance = range;
    for (target, distance) in candidates {
        if distance < best_distance {
            best_distance = distance;
            best = Some(target);
        }
    }
    best
}
