//! Whole-match runs through the public engine API.

use rampart_sim::core::commands::PlayerCommand;
use rampart_sim::core::config::{GameConfig, TowerBehavior};
use rampart_sim::core::enums::{GamePhase, KillSource, MatchOutcome};
use rampart_sim::core::error::ConfigError;
use rampart_sim::core::events::SimEvent;
use rampart_sim::{SimConfig, SimulationEngine};

const DT: f64 = 1.0 / 60.0;

/// Run until the match leaves `Active` or `max_secs` of match time pass.
fn run_to_end(engine: &mut SimulationEngine, max_secs: f64) -> Vec<SimEvent> {
    let mut events = Vec::new();
    while engine.phase() == GamePhase::Active && engine.time().elapsed_secs < max_secs {
        events.extend(engine.advance(DT));
    }
    events
}

fn build_everywhere(engine: &mut SimulationEngine, type_id: u32) {
    let slots = engine.slots().to_vec();
    for slot in slots {
        engine.queue_commands([
            PlayerCommand::SelectTowerType { id: type_id },
            PlayerCommand::PlaceTowerAt {
                x: slot.x,
                y: slot.y,
            },
        ]);
    }
}

#[test]
fn undefended_lanes_are_breached() {
    let mut engine = SimulationEngine::with_seed(2024);
    engine.queue_command(PlayerCommand::StartGame);
    let events = run_to_end(&mut engine, 120.0);

    assert_eq!(engine.phase(), GamePhase::Defeat);
    assert!(events.contains(&SimEvent::MatchEnded {
        outcome: MatchOutcome::Defeat
    }));
    assert_eq!(engine.kills(), 0);

    // Time stops once the match is over.
    let elapsed = engine.time().elapsed_secs;
    engine.tick(DT);
    assert_eq!(engine.time().elapsed_secs, elapsed);
}

#[test]
fn strong_towers_clear_the_wave() {
    let mut game = GameConfig::default();
    for tower in &mut game.tower_types {
        if tower.id == 1 {
            tower.range = 400.0;
            tower.behavior = TowerBehavior::Ranged {
                damage: 1000.0,
                cooldown_ms: 100.0,
            };
        }
    }
    let mut engine = SimulationEngine::new(SimConfig { seed: 77, game }).unwrap();
    engine.queue_command(PlayerCommand::StartGame);
    build_everywhere(&mut engine, 1);

    let events = run_to_end(&mut engine, 400.0);

    assert_eq!(engine.phase(), GamePhase::Victory);
    assert_eq!(engine.kills(), 100);
    assert_eq!(engine.director().spawned, 100);
    assert!(events.contains(&SimEvent::MatchEnded {
        outcome: MatchOutcome::Victory
    }));

    let kills: Vec<&SimEvent> = events
        .iter()
        .filter(|e| matches!(e, SimEvent::EnemyKilled { .. }))
        .collect();
    assert_eq!(kills.len(), 100, "Every enemy is credited exactly once");
    assert!(kills.iter().all(|e| matches!(
        e,
        SimEvent::EnemyKilled {
            source: KillSource::Tower,
            ..
        }
    )));
    assert_eq!(engine.gold(), 800 + gold_from(&events));
}

fn gold_from(events: &[SimEvent]) -> u32 {
    events
        .iter()
        .filter_map(|e| match e {
            SimEvent::EnemyKilled { gold, .. } => Some(*gold),
            _ => None,
        })
        .sum()
}

#[test]
fn gold_never_goes_negative() {
    let mut engine = SimulationEngine::with_seed(5);
    engine.queue_command(PlayerCommand::StartGame);
    // Far more purchases than the starting gold covers.
    for _ in 0..5 {
        build_everywhere(&mut engine, 4);
        engine.queue_command(PlayerCommand::PlaceUnitAt { x: 90.0, y: 600.0 });
    }
    let snapshot = engine.tick(DT);
    assert!(snapshot.towers.len() <= 4);
    assert_eq!(
        snapshot.gold,
        1000 - 150 * snapshot.towers.len() as u32 - 150 * snapshot.units.len() as u32
    );
}

#[test]
fn same_seed_replays_identically() {
    let play = |seed: u64| {
        let mut engine = SimulationEngine::with_seed(seed);
        engine.queue_command(PlayerCommand::StartGame);
        build_everywhere(&mut engine, 2);
        run_to_end(&mut engine, 60.0);
        serde_json::to_string(&engine.snapshot()).unwrap()
    };
    assert_eq!(play(31), play(31));
}

#[test]
fn invalid_config_is_rejected() {
    let mut game = GameConfig::default();
    game.lanes.clear();
    let result = SimulationEngine::new(SimConfig { seed: 1, game });
    assert!(matches!(result, Err(ConfigError::NoLanes)));

    let json = serde_json::to_string(&GameConfig::default()).unwrap();
    let game = GameConfig::from_json_str(&json).unwrap();
    assert!(SimulationEngine::new(SimConfig { seed: 1, game }).is_ok());
}
