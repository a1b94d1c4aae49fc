//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs the systems and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing: the same seed, config, command sequence
//! and frame deltas always produce the same snapshots.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rampart_core::commands::PlayerCommand;
use rampart_core::components::{Tower, TowerState};
use rampart_core::config::GameConfig;
use rampart_core::constants::WAVE_START_DELAY_SECS;
use rampart_core::enums::{CooldownQuery, GamePhase, MatchOutcome};
use rampart_core::error::{CommandRejected, ConfigError};
use rampart_core::events::SimEvent;
use rampart_core::state::GameStateSnapshot;
use rampart_core::types::{EntityId, Position, SimTime};

use crate::match_state::MatchState;
use crate::systems;
use crate::systems::barracks::DeployRequest;
use crate::systems::melee::FreezeTable;
use crate::systems::snapshot::SnapshotSource;
use crate::systems::wave_spawner::{SpawnContext, WaveDirector};
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Static game tables.
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            game: GameConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    config: GameConfig,
    slots: Vec<Position>,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    next_entity_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<SimEvent>,
    match_state: MatchState,
    director: WaveDirector,
    freeze: FreezeTable,
}

impl SimulationEngine {
    /// Create a new simulation engine. The game config is validated first.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.game.validate()?;
        Ok(Self::build(config.seed, config.game))
    }

    /// Engine with the stock game tables.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(seed, GameConfig::default())
    }

    fn build(seed: u64, config: GameConfig) -> Self {
        Self {
            world: World::new(),
            slots: world_setup::placement_slots(&config),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_entity_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            match_state: MatchState::new(config.starting_gold),
            director: WaveDirector::new(config.wave_quota),
            freeze: FreezeTable::new(),
            config,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Apply a command immediately, reporting why it was rejected.
    ///
    /// A rejected command spends no gold and spawns nothing. `PlaceTowerAt`
    /// still consumes the tower selection whether or not it succeeds.
    pub fn apply_command(&mut self, command: PlayerCommand) -> Result<(), CommandRejected> {
        self.handle_command(command)
    }

    /// Advance the simulation by `dt` seconds and return the events it produced.
    ///
    /// Queued commands are applied first. Outside an active match only
    /// commands are processed. Negative or non-finite deltas count as zero.
    pub fn advance(&mut self, dt: f64) -> Vec<SimEvent> {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems(dt);
        }

        std::mem::take(&mut self.events)
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    pub fn tick(&mut self, dt: f64) -> GameStateSnapshot {
        let events = self.advance(dt);
        self.build_snapshot(events)
    }

    /// Snapshot of the current state without advancing.
    pub fn snapshot(&self) -> GameStateSnapshot {
        self.build_snapshot(Vec::new())
    }

    /// Whether a tower could go at this point right now (cost not considered).
    pub fn is_valid_placement(&self, x: f64, y: f64) -> bool {
        systems::placement::validate_site(&self.world, &self.slots, Position::new(x, y)).is_ok()
    }

    /// Seconds until the ability or a tower is ready again.
    ///
    /// For a barracks this is the time to its next unit credit. `None` if the
    /// tower does not exist.
    pub fn remaining_cooldown(&self, query: CooldownQuery) -> Option<f64> {
        match query {
            CooldownQuery::Ability => Some(self.match_state.ability.cooldown_remaining_secs),
            CooldownQuery::Tower(id) => {
                let mut found = None;
                for (_, (tower_id, tower)) in self.world.query::<(&EntityId, &Tower)>().iter() {
                    if *tower_id != id {
                        continue;
                    }
                    let remaining_ms = match tower.state {
                        TowerState::Ranged {
                            cooldown_remaining_ms,
                            ..
                        } => cooldown_remaining_ms,
                        TowerState::Barracks { timer_ms, .. } => {
                            self.config.barracks_unit_interval_ms - timer_ms
                        }
                    };
                    found = Some(remaining_ms.max(0.0) / 1000.0);
                }
                found
            }
        }
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn gold(&self) -> u32 {
        self.match_state.gold
    }

    pub fn kills(&self) -> u32 {
        self.match_state.kills
    }

    pub fn match_state(&self) -> &MatchState {
        &self.match_state
    }

    pub fn director(&self) -> &WaveDirector {
        &self.director
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Tower placement slots, indexed as in `SlotView::index`.
    pub fn slots(&self) -> &[Position] {
        &self.slots
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Spawn an enemy directly at `progress` on a lane (for tests).
    #[cfg(test)]
    pub fn spawn_test_enemy(&mut self, lane: usize, progress: f64) -> EntityId {
        let id = world_setup::alloc_id(&mut self.next_entity_id);
        let (entity, _) = world_setup::spawn_enemy(
            &mut self.world,
            &mut self.rng,
            &self.config,
            id,
            0,
            self.match_state.health_multiplier(),
        );
        self.move_onto_lane(entity, lane, progress);
        id
    }

    /// Spawn a unit directly at `progress` on a lane (for tests).
    #[cfg(test)]
    pub fn spawn_test_unit(&mut self, lane: usize, progress: f64) -> EntityId {
        let id = world_setup::alloc_id(&mut self.next_entity_id);
        let x = self.config.lanes[lane].entry().x;
        let y = progress * self.config.field_height;
        let (entity, _) = world_setup::spawn_unit(&mut self.world, &self.config, id, x, y, 0);
        self.move_onto_lane(entity, lane, progress);
        id
    }

    #[cfg(test)]
    fn move_onto_lane(&mut self, entity: hecs::Entity, lane: usize, progress: f64) {
        use rampart_core::components::LaneProgress;

        let position = self.config.lanes[lane].position_at(progress);
        if let Ok((lp, pos)) = self
            .world
            .query_one_mut::<(&mut LaneProgress, &mut Position)>(entity)
        {
            *lp = LaneProgress { lane, progress };
            *pos = position;
        }
    }

    /// Cancel the pending wave start so tests control every spawn.
    #[cfg(test)]
    pub fn hold_wave(&mut self) {
        self.director.halt();
    }

    #[cfg(test)]
    pub fn match_state_mut(&mut self) -> &mut MatchState {
        &mut self.match_state
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn freeze_table(&self) -> &FreezeTable {
        &self.freeze
    }

    /// Process all queued commands. Rejections are logged and dropped.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            let label = format!("{command:?}");
            if let Err(reason) = self.handle_command(command) {
                log::debug!("dropped {label}: {reason}");
            }
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) -> Result<(), CommandRejected> {
        if !matches!(command, PlayerCommand::StartGame) && self.phase != GamePhase::Active {
            return Err(CommandRejected::NotPlaying);
        }

        match command {
            PlayerCommand::StartGame => {
                if !self.phase.can_start() {
                    return Err(CommandRejected::AlreadyPlaying);
                }
                self.reset_match();
                self.phase = GamePhase::Active;
                self.director.schedule_start(WAVE_START_DELAY_SECS);
                log::info!(
                    "match started: {} gold, {} lanes, {} slots",
                    self.match_state.gold,
                    self.config.lanes.len(),
                    self.slots.len()
                );
            }
            PlayerCommand::SelectTowerType { id } => {
                if self.config.tower_type(id).is_none() {
                    return Err(CommandRejected::UnknownTowerType(id));
                }
                self.match_state.selected_tower = Some(id);
            }
            PlayerCommand::PlaceTowerAt { x, y } => {
                let type_id = self
                    .match_state
                    .selected_tower
                    .take()
                    .ok_or(CommandRejected::NoTowerSelected)?;
                if self.match_state.ability.selecting {
                    return Err(CommandRejected::AbilityTargeting);
                }
                let (id, slot) = systems::placement::place_tower(
                    &mut self.world,
                    &self.config,
                    &self.slots,
                    &mut self.match_state,
                    &mut self.next_entity_id,
                    type_id,
                    Position::new(x, y),
                )?;
                log::debug!("tower {id:?} (type {type_id}) placed on slot {slot}");
                self.events.push(SimEvent::TowerPlaced { id, type_id, slot });
            }
            PlayerCommand::PlaceUnitAt { x, y } => {
                if self.match_state.ability.selecting {
                    return Err(CommandRejected::AbilityTargeting);
                }
                let (id, lane) = systems::barracks::deploy_unit(
                    &mut self.world,
                    &self.config,
                    &mut self.match_state,
                    &mut self.next_entity_id,
                    DeployRequest {
                        x,
                        y,
                        now_secs: self.time.elapsed_secs,
                    },
                )?;
                log::debug!("unit {id:?} deployed on lane {lane}");
                self.events.push(SimEvent::UnitDeployed { id, lane });
            }
            PlayerCommand::ActivateAbility => {
                systems::ability::activate(&mut self.match_state.ability)?;
            }
            PlayerCommand::ConfirmAbilityTarget { x, y } => {
                let hits = systems::ability::confirm(
                    &mut self.world,
                    &mut self.match_state.ability,
                    Position::new(x, y),
                    &mut self.events,
                )?;
                log::debug!("area ability hit {hits} enemies at ({x:.0}, {y:.0})");
            }
        }
        Ok(())
    }

    /// Throw away the previous match and start from the configured baseline.
    fn reset_match(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.next_entity_id = 0;
        self.match_state = MatchState::new(self.config.starting_gold);
        self.director = WaveDirector::new(self.config.wave_quota);
        self.freeze.clear();
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        self.time.advance(dt);

        // 1. Ability cooldown
        systems::ability::tick_cooldown(&mut self.match_state.ability, dt);
        // 2. Wave start and spawning
        systems::wave_spawner::run(
            &mut self.world,
            &mut self.rng,
            &mut self.director,
            &mut SpawnContext {
                config: &self.config,
                match_state: &self.match_state,
                next_entity_id: &mut self.next_entity_id,
                events: &mut self.events,
            },
            dt,
        );
        // 3. Tower cooldowns and barracks production
        systems::towers::advance_timers(&mut self.world, dt, self.config.barracks_unit_interval_ms);
        // 4. Tower fire (kills resolved inline), aimed at last tick's positions
        systems::towers::fire(&mut self.world, &mut self.match_state, &mut self.events);
        // 5. Lane melee and movement
        systems::melee::run(&mut self.world, &self.config.lanes, &mut self.freeze, dt);
        // 6. Cleanup sweep (breach, deaths, victory)
        if let Some(outcome) = systems::cleanup::run(
            &mut self.world,
            &mut self.match_state,
            self.director.quota,
            &mut self.freeze,
            &mut self.events,
            &mut self.despawn_buffer,
        ) {
            self.finish(outcome);
            return;
        }
        // 7. Shot traces
        systems::projectiles::run(&mut self.world, dt, &mut self.despawn_buffer);
        // 8. Enemy health scaling
        self.match_state.advance_health_buff(dt);
    }

    fn finish(&mut self, outcome: MatchOutcome) {
        self.phase = outcome.into();
        self.director.halt();
        self.match_state.ability.selecting = false;
        self.match_state.selected_tower = None;
        self.events.push(SimEvent::MatchEnded { outcome });
        log::info!(
            "match ended: {:?} after {:.1}s, {} kills, {} gold",
            outcome,
            self.time.elapsed_secs,
            self.match_state.kills,
            self.match_state.gold
        );
    }

    fn build_snapshot(&self, events: Vec<SimEvent>) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &SnapshotSource {
                config: &self.config,
                slots: &self.slots,
                time: self.time,
                phase: self.phase,
                match_state: &self.match_state,
                director: &self.director,
            },
            events,
        )
    }
}
