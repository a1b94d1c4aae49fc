//! Lane melee: units and enemies blocking, queueing and trading blows.
//!
//! Each lane is resolved on a local copy of its combatants in two passes,
//! units first (walking toward the lane start) and then enemies (walking
//! toward the goal). Results are written back to the world afterwards.
//! Deaths are left at zero or negative health for the cleanup sweep.
//!
//! An enemy blocks a unit, and a unit blocks an enemy, when the enemy is
//! ahead of the unit by less than `ENGAGE_DISTANCE` of lane progress.
//! Allies closer than that hold each other in a queue.
//!
//! Units on a lane with no living enemy are frozen in place: their pose is
//! recorded once in a side table keyed by `EntityId` and replayed every tick
//! until an enemy shows up on the lane again.

use std::collections::HashMap;

use hecs::{Entity, World};

use rampart_core::components::*;
use rampart_core::constants::*;
use rampart_core::geometry::Lane;
use rampart_core::types::{EntityId, Position};

/// Pose a unit was frozen at.
#[derive(Debug, Clone, Copy)]
pub struct FrozenPose {
    pub progress: f64,
    pub position: Position,
}

pub type FreezeTable = HashMap<EntityId, FrozenPose>;

struct Combatant {
    entity: Entity,
    id: EntityId,
    progress: f64,
    position: Position,
    speed: f64,
    health: f64,
    melee: Melee,
    flash: Option<DamageFlash>,
}

impl Combatant {
    fn alive(&self) -> bool {
        self.health > 0.0
    }
}

/// `enemy` stands just ahead of `unit`.
fn engaged(unit_progress: f64, enemy_progress: f64) -> bool {
    let gap = enemy_progress - unit_progress;
    gap > 0.0 && gap < ENGAGE_DISTANCE
}

/// Swing if the attack is ready, then count the cooldown down.
/// Returns the damage dealt this tick, if any.
fn strike(melee: &mut Melee, defender_health: &mut f64, dt: f64) -> Option<f64> {
    let mut dealt = None;
    if melee.cooldown_remaining_ms <= 0.0 {
        *defender_health -= melee.damage;
        melee.cooldown_remaining_ms = melee.cooldown_ms;
        dealt = Some(melee.damage);
    }
    if melee.cooldown_remaining_ms > 0.0 {
        melee.cooldown_remaining_ms -= dt * 1000.0;
    }
    dealt
}

/// Resolve melee movement and combat on every lane.
pub fn run(world: &mut World, lanes: &[Lane], freeze: &mut FreezeTable, dt: f64) {
    for (lane_index, lane) in lanes.iter().enumerate() {
        let mut units = collect_units(world, lane_index);
        let mut enemies = collect_enemies(world, lane_index);
        if units.is_empty() && enemies.is_empty() {
            continue;
        }

        units_pass(&mut units, &mut enemies, lane, freeze, dt);
        enemies_pass(&mut enemies, &mut units, lane, dt);

        write_back(world, &units);
        write_back(world, &enemies);
    }
}

fn collect_units(world: &World, lane_index: usize) -> Vec<Combatant> {
    let mut units: Vec<Combatant> = world
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
        .filter(|(_, (_, _, lp, ..))| lp.lane == lane_index)
        .map(|(entity, (id, unit, lp, position, health, melee, flash))| Combatant {
            entity,
            id: *id,
            progress: lp.progress,
            position: *position,
            speed: unit.speed,
            health: health.current,
            melee: *melee,
            flash: flash.copied(),
        })
        .collect();
    // Closest to the lane start first.
    units.sort_by(|a, b| a.progress.total_cmp(&b.progress).then(a.id.cmp(&b.id)));
    units
}

fn collect_enemies(world: &World, lane_index: usize) -> Vec<Combatant> {
    let mut enemies: Vec<Combatant> = world
        .query::<(&EntityId, &Enemy, &LaneProgress, &Position, &Health, &Melee)>()
        .iter()
        .filter(|(_, (_, _, lp, ..))| lp.lane == lane_index)
        .map(|(entity, (id, enemy, lp, position, health, melee))| Combatant {
            entity,
            id: *id,
            progress: lp.progress,
            position: *position,
            speed: enemy.speed,
            health: health.current,
            melee: *melee,
            flash: None,
        })
        .collect();
    // Furthest along first.
    enemies.sort_by(|a, b| b.progress.total_cmp(&a.progress).then(a.id.cmp(&b.id)));
    enemies
}

fn units_pass(
    units: &mut [Combatant],
    enemies: &mut [Combatant],
    lane: &Lane,
    freeze: &mut FreezeTable,
    dt: f64,
) {
    let lane_has_enemies = enemies.iter().any(Combatant::alive);

    for i in 0..units.len() {
        if !units[i].alive() {
            continue;
        }

        if !lane_has_enemies {
            let unit = &mut units[i];
            let pose = freeze.entry(unit.id).or_insert(FrozenPose {
                progress: unit.progress,
                position: unit.position,
            });
            unit.progress = pose.progress;
            unit.position = pose.position;
            unit.melee.in_combat = false;
            fade_flash(unit, dt);
            continue;
        }
        freeze.remove(&units[i].id);

        let progress = units[i].progress;
        let target = enemies
            .iter()
            .position(|enemy| enemy.alive() && engaged(progress, enemy.progress));

        match target {
            Some(j) => {
                let unit = &mut units[i];
                let enemy = &mut enemies[j];
                unit.melee.in_combat = true;
                enemy.melee.in_combat = true;
                strike(&mut unit.melee, &mut enemy.health, dt);
            }
            None => {
                units[i].melee.in_combat = false;
                let queued = units.iter().enumerate().any(|(k, other)| {
                    k != i
                        && other.alive()
                        && other.progress < progress
                        && progress - other.progress < ENGAGE_DISTANCE
                });
                let unit = &mut units[i];
                if !queued && unit.progress > UNIT_PROGRESS_FLOOR {
                    unit.progress = (unit.progress - unit.speed * dt / PROGRESS_SPEED_DIVISOR)
                        .max(UNIT_PROGRESS_FLOOR);
                    unit.position = lane.position_at(unit.progress);
                }
            }
        }

        fade_flash(&mut units[i], dt);
    }
}

fn enemies_pass(enemies: &mut [Combatant], units: &mut [Combatant], lane: &Lane, dt: f64) {
    for i in 0..enemies.len() {
        if !enemies[i].alive() {
            continue;
        }

        let progress = enemies[i].progress;
        let target = units
            .iter()
            .position(|unit| unit.alive() && engaged(unit.progress, progress));

        match target {
            Some(j) => {
                let enemy = &mut enemies[i];
                let unit = &mut units[j];
                enemy.melee.in_combat = true;
                unit.melee.in_combat = true;
                if let Some(amount) = strike(&mut enemy.melee, &mut unit.health, dt) {
                    unit.flash = Some(DamageFlash {
                        amount,
                        remaining_secs: DAMAGE_FLASH_SECS,
                    });
                }
            }
            None => {
                enemies[i].melee.in_combat = false;
                let queued = enemies.iter().enumerate().any(|(k, other)| {
                    k != i
                        && other.alive()
                        && other.progress > progress
                        && other.progress - progress < ENGAGE_DISTANCE
                });
                let enemy = &mut enemies[i];
                if !queued {
                    enemy.progress =
                        (enemy.progress + enemy.speed * dt / PROGRESS_SPEED_DIVISOR).min(1.0);
                    enemy.position = lane.position_at(enemy.progress);
                }
            }
        }
    }
}

fn fade_flash(unit: &mut Combatant, dt: f64) {
    if let Some(flash) = unit.flash.as_mut() {
        if flash.remaining_secs > 0.0 {
            flash.remaining_secs = (flash.remaining_secs - dt).max(0.0);
        }
    }
}

fn write_back(world: &mut World, combatants: &[Combatant]) {
    for c in combatants {
        if let Ok((lp, position, health, melee)) =
            world.query_one_mut::<(&mut LaneProgress, &mut Position, &mut Health, &mut Melee)>(c.entity)
        {
            lp.progress = c.progress;
            *position = c.position;
            health.current = c.health;
            *melee = c.melee;
        }
        if let Some(flash) = c.flash {
            if let Ok(mut stored) = world.get::<&mut DamageFlash>(c.entity) {
                *stored = flash;
            }
        }
    }
}
