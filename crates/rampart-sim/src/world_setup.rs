//! Entity spawn factories and placement geometry.
//!
//! Creates enemies, melee units, towers and shot traces with the component
//! bundles the systems expect, and derives the fixed tower slots from the
//! lane layout.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use rampart_core::components::*;
use rampart_core::config::{GameConfig, TowerBehavior, TowerTypeConfig};
use rampart_core::constants::*;
use rampart_core::geometry::{clamp_progress, Lane};
use rampart_core::types::{EntityId, Position};

/// Hand out the next entity id.
pub fn alloc_id(next: &mut u32) -> EntityId {
    let id = EntityId(*next);
    *next += 1;
    id
}

/// Tower slots on the middle row of the field.
///
/// Candidates sit halfway between neighboring lane entries and half a lane
/// gap outside the outermost lanes. Candidates outside the field or closer
/// than `SLOT_LANE_CLEARANCE` to any lane are dropped.
pub fn placement_slots(config: &GameConfig) -> Vec<Position> {
    let mut xs: Vec<f64> = config.lanes.iter().map(|l| l.entry().x).collect();
    xs.sort_by(|a, b| a.total_cmp(b));
    xs.dedup();
    if xs.is_empty() {
        return Vec::new();
    }

    let (first_gap, last_gap) = if xs.len() > 1 {
        (xs[1] - xs[0], xs[xs.len() - 1] - xs[xs.len() - 2])
    } else {
        // Lone lane: use the distance to the nearer field edge.
        let edge = xs[0].min(config.field_width - xs[0]);
        (edge, edge)
    };

    let mut candidates = Vec::with_capacity(xs.len() + 1);
    candidates.push(xs[0] - first_gap / 2.0);
    candidates.extend(xs.windows(2).map(|w| (w[0] + w[1]) / 2.0));
    candidates.push(xs[xs.len() - 1] + last_gap / 2.0);

    let y = config.field_height / 2.0;
    candidates
        .into_iter()
        .filter(|x| *x >= 0.0 && *x <= config.field_width)
        .map(|x| Position::new(x, y))
        .filter(|p| {
            config
                .lanes
                .iter()
                .all(|lane| lane.distance_to_point(p) >= SLOT_LANE_CLEARANCE)
        })
        .collect()
}

/// Index of the first slot strictly within snap radius of the point.
pub fn find_slot(slots: &[Position], point: &Position) -> Option<usize> {
    slots
        .iter()
        .position(|slot| slot.distance_to(point) < SLOT_SNAP_RADIUS)
}

/// Lane whose entry x is closest to `x`. Ties keep the earlier lane.
pub fn nearest_lane(lanes: &[Lane], x: f64) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (index, lane) in lanes.iter().enumerate() {
        let distance = (lane.entry().x - x).abs();
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best
}

/// Unscaled speed factor so a lane takes roughly the same time whatever its length.
pub fn base_speed(lane: &Lane) -> f64 {
    lane.length() / LANE_TRAVERSAL_BUDGET * BASE_SPEED_TRIM
}

/// Stepwise speed bonus for the `count`-th entity of its kind.
pub fn speed_ramp(count: u32) -> f64 {
    1.0 + (count as f64 * SPEED_RAMP_RATE / SPEED_RAMP_GROUP).floor() * SPEED_RAMP_STEP
}

/// Spawn an enemy at the entry of a random lane with a random archetype.
///
/// `spawned_before` is the number of enemies this wave has already released.
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &GameConfig,
    id: EntityId,
    spawned_before: u32,
    health_multiplier: f64,
) -> (Entity, usize) {
    let lane_index = rng.gen_range(0..config.lanes.len());
    let kind = &config.enemy_types[rng.gen_range(0..config.enemy_types.len())];
    let lane = &config.lanes[lane_index];

    let enemy = Enemy {
        archetype: kind.archetype,
        speed: base_speed(lane) * speed_ramp(spawned_before),
        bounty: kind.bounty,
    };
    let health = Health::full((kind.health * health_multiplier).round());
    let melee = Melee::new(kind.attack_damage, kind.attack_range, kind.attack_cooldown_ms);

    let entity = world.spawn((
        id,
        enemy,
        LaneProgress {
            lane: lane_index,
            progress: 0.0,
        },
        lane.position_at(0.0),
        health,
        melee,
    ));
    (entity, lane_index)
}

/// Spawn a melee unit on the lane nearest to `x`, at the progress matching `y`.
///
/// `live_units` is how many units are on the field before this one.
pub fn spawn_unit(
    world: &mut World,
    config: &GameConfig,
    id: EntityId,
    x: f64,
    y: f64,
    live_units: u32,
) -> (Entity, usize) {
    let lane_index = nearest_lane(&config.lanes, x);
    let lane = &config.lanes[lane_index];
    let progress = clamp_progress(y / config.field_height);

    let entity = world.spawn((
        id,
        Unit {
            speed: base_speed(lane) * speed_ramp(live_units),
        },
        LaneProgress {
            lane: lane_index,
            progress,
        },
        lane.position_at(progress),
        Health::full(UNIT_HEALTH),
        Melee::new(UNIT_DAMAGE, config.unit_range(), UNIT_ATTACK_COOLDOWN_MS),
        DamageFlash::default(),
    ));
    (entity, lane_index)
}

/// Spawn a tower of the given type on a slot. Ranged towers start ready to fire.
pub fn spawn_tower(
    world: &mut World,
    id: EntityId,
    tower_type: &TowerTypeConfig,
    slot: usize,
    position: Position,
) -> Entity {
    let state = match tower_type.behavior {
        TowerBehavior::Ranged {
            damage,
            cooldown_ms,
        } => TowerState::Ranged {
            damage,
            cooldown_ms,
            cooldown_remaining_ms: 0.0,
        },
        TowerBehavior::Barracks => TowerState::Barracks {
            credits: 0,
            timer_ms: 0.0,
        },
    };

    world.spawn((
        id,
        Tower {
            type_id: tower_type.id,
            slot,
            range: tower_type.range,
            state,
        },
        position,
    ))
}

/// Spawn a short-lived shot trace.
pub fn spawn_projectile(world: &mut World, from: Position, to: Position, tower_type_id: u32) -> Entity {
    world.spawn((Projectile {
        from,
        to,
        tower_type_id,
        ttl_secs: PROJECTILE_TTL_SECS,
    },))
}
