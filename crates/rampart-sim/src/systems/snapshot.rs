//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only and never modifies the world. All lists are
//! ordered by entity id so identical states serialize identically.

use hecs::World;

use rampart_core::components::*;
use rampart_core::config::GameConfig;
use rampart_core::constants::{ABILITY_COOLDOWN_SECS, ABILITY_RADIUS};
use rampart_core::enums::GamePhase;
use rampart_core::events::SimEvent;
use rampart_core::state::*;
use rampart_core::types::{EntityId, Position, SimTime};

use crate::match_state::MatchState;
use crate::systems::placement::slot_occupied;
use crate::systems::wave_spawner::WaveDirector;

/// Engine state the snapshot reads besides the world.
pub struct SnapshotSource<'a> {
    pub config: &'a GameConfig,
    pub slots: &'a [Position],
    pub time: SimTime,
    pub phase: GamePhase,
    pub match_state: &'a MatchState,
    pub director: &'a WaveDirector,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    source: &SnapshotSource,
    events: Vec<SimEvent>,
) -> GameStateSnapshot {
    let enemies = build_enemies(world);
    let ms = source.match_state;

    GameStateSnapshot {
        time: source.time,
        phase: source.phase,
        gold: ms.gold,
        selected_tower: ms.selected_tower,
        wave: WaveView {
            number: source.director.wave_number,
            phase: source.director.phase,
            spawned: source.director.spawned,
            quota: source.director.quota,
            alive: enemies.len() as u32,
        },
        kills: ms.kills,
        health_buff_count: ms.health_buff_count,
        slots: build_slots(world, source.slots),
        towers: build_towers(world, source.config),
        enemies,
        units: build_units(world),
        projectiles: build_projectiles(world),
        ability: AbilityView {
            ready: ms.ability.ready,
            selecting: ms.ability.selecting,
            cooldown_remaining_secs: ms.ability.cooldown_remaining_secs,
            cooldown_total_secs: ABILITY_COOLDOWN_SECS,
            radius: ABILITY_RADIUS,
        },
        events,
    }
}

fn build_slots(world: &World, slots: &[Position]) -> Vec<SlotView> {
    slots
        .iter()
        .enumerate()
        .map(|(index, position)| SlotView {
            index,
            position: *position,
            occupied: slot_occupied(world, slots, index),
        })
        .collect()
}

fn build_towers(world: &World, config: &GameConfig) -> Vec<TowerView> {
    let mut towers: Vec<TowerView> = world
        .query::<(&EntityId, &Tower, &Position)>()
        .iter()
        .map(|(_, (id, tower, position))| {
            let (cooldown_remaining_ms, unit_credits) = match tower.state {
                TowerState::Ranged {
                    cooldown_remaining_ms,
                    ..
                } => (cooldown_remaining_ms.max(0.0), 0),
                TowerState::Barracks { credits, timer_ms } => (
                    (config.barracks_unit_interval_ms - timer_ms).max(0.0),
                    credits,
                ),
            };
            TowerView {
                id: *id,
                type_id: tower.type_id,
                slot: tower.slot,
                position: *position,
                range: tower.range,
                is_barracks: matches!(tower.state, TowerState::Barracks { .. }),
                cooldown_remaining_ms,
                unit_credits,
            }
        })
        .collect();
    towers.sort_by_key(|t| t.id);
    towers
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&EntityId, &Enemy, &LaneProgress, &Position, &Health, &Melee)>()
        .iter()
        .map(|(_, (id, enemy, lp, position, health, melee))| EnemyView {
            id: *id,
            archetype: enemy.archetype,
            lane: lp.lane,
            progress: lp.progress,
            position: *position,
            health: health.current,
            max_health: health.max,
            in_combat: melee.in_combat,
        })
        .collect();
    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_units(world: &World) -> Vec<UnitView> {
    let mut units: Vec<UnitView> = world
        .query::<(
            &EntityId,
            &Unit,
            &LaneProgress,
            &Position,
            &Health,
            &Melee,
            Option<&DamageFlash>,
        )>()
        .iter()
        .map(|(_, (id, _, lp, position, health, melee, flash))| UnitView {
            id: *id,
            lane: lp.lane,
            progress: lp.progress,
            position: *position,
            health: health.current,
            max_health: health.max,
            in_combat: melee.in_combat,
            last_damage: flash
                .filter(|f| f.remaining_secs > 0.0)
                .map(|f| f.amount),
        })
        .collect();
    units.sort_by_key(|u| u.id);
    units
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<&Projectile>()
        .iter()
        .map(|(_, p)| ProjectileView {
            from: p.from,
            to: p.to,
            tower_type_id: p.tower_type_id,
            ttl_secs: p.ttl_secs,
        })
        .collect()
}
