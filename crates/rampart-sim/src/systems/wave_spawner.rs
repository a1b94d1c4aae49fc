//! Wave director: releases the wave's enemies one at a time at random intervals.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use rampart_core::config::GameConfig;
use rampart_core::constants::*;
use rampart_core::enums::WavePhase;
use rampart_core::events::SimEvent;

use crate::match_state::MatchState;
use crate::world_setup::{alloc_id, spawn_enemy};

/// Spawn pacing for the single wave of a match.
#[derive(Debug, Clone)]
pub struct WaveDirector {
    pub phase: WavePhase,
    pub wave_number: u32,
    pub quota: u32,
    /// Enemies released so far this wave.
    pub spawned: u32,
    /// Countdown to the wave start, when one is scheduled.
    start_in_secs: Option<f64>,
    /// Countdown to the next release while spawning.
    next_spawn_in_secs: f64,
}

impl WaveDirector {
    pub fn new(quota: u32) -> Self {
        Self {
            phase: WavePhase::Idle,
            wave_number: 0,
            quota,
            spawned: 0,
            start_in_secs: None,
            next_spawn_in_secs: 0.0,
        }
    }

    /// Schedule the wave to start after `delay_secs` of match time.
    pub fn schedule_start(&mut self, delay_secs: f64) {
        if self.phase == WavePhase::Idle {
            self.start_in_secs = Some(delay_secs);
        }
    }

    /// Drop any pending start or spawn. Used when the match ends.
    pub fn halt(&mut self) {
        self.start_in_secs = None;
        if self.phase == WavePhase::Spawning {
            self.phase = WavePhase::Cleared;
        }
    }

    /// Whether every enemy of the wave has been released.
    pub fn quota_released(&self) -> bool {
        self.spawned >= self.quota
    }

    pub fn has_pending_start(&self) -> bool {
        self.start_in_secs.is_some()
    }
}

/// Shared state a spawn needs from the engine.
pub struct SpawnContext<'a> {
    pub config: &'a GameConfig,
    pub match_state: &'a MatchState,
    pub next_entity_id: &'a mut u32,
    pub events: &'a mut Vec<SimEvent>,
}

/// Advance the wave start countdown and the spawn timer.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    director: &mut WaveDirector,
    ctx: &mut SpawnContext,
    dt: f64,
) {
    match director.phase {
        WavePhase::Idle => {
            let Some(remaining) = director.start_in_secs.as_mut() else {
                return;
            };
            *remaining -= dt;
            if *remaining <= 0.0 {
                director.start_in_secs = None;
                start_wave(world, rng, director, ctx);
            }
        }
        WavePhase::Spawning => {
            director.next_spawn_in_secs -= dt;
            while director.next_spawn_in_secs <= 0.0 && !director.quota_released() {
                release_one(world, rng, director, ctx);
                if !director.quota_released() {
                    director.next_spawn_in_secs += spawn_delay(rng);
                }
            }
            if director.quota_released() {
                director.phase = WavePhase::Cleared;
            }
        }
        WavePhase::Cleared => {}
    }
}

/// Begin the wave: reset counters and release the first enemy immediately.
/// Does nothing unless the director is idle.
pub fn start_wave(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    director: &mut WaveDirector,
    ctx: &mut SpawnContext,
) -> bool {
    if director.phase != WavePhase::Idle {
        return false;
    }
    director.wave_number += 1;
    director.spawned = 0;
    director.phase = WavePhase::Spawning;
    ctx.events.push(SimEvent::WaveStarted {
        wave: director.wave_number,
        quota: director.quota,
    });
    log::info!(
        "wave {} started: {} enemies",
        director.wave_number,
        director.quota
    );

    release_one(world, rng, director, ctx);
    if director.quota_released() {
        director.phase = WavePhase::Cleared;
    } else {
        director.next_spawn_in_secs = spawn_delay(rng);
    }
    true
}

fn release_one(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    director: &mut WaveDirector,
    ctx: &mut SpawnContext,
) {
    let id = alloc_id(ctx.next_entity_id);
    let (_, lane) = spawn_enemy(
        world,
        rng,
        ctx.config,
        id,
        director.spawned,
        ctx.match_state.health_multiplier(),
    );
    director.spawned += 1;
    log::trace!(
        "enemy {:?} released on lane {lane} ({}/{})",
        id,
        director.spawned,
        director.quota
    );
}

fn spawn_delay(rng: &mut ChaCha8Rng) -> f64 {
    rng.gen_range(SPAWN_DELAY_MIN_SECS..SPAWN_DELAY_MAX_SECS)
}
