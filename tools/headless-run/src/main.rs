//! headless-run: play seeded RAMPART matches without a frontend.
//!
//! Builds a fixed defense, deploys a unit whenever a barracks has a credit,
//! and prints one JSON summary line per match.
//!
//! Usage:
//!   headless-run [--seed N] [--runs N] [--dt SECONDS] [--config game.json]

use std::process;

use serde::Serialize;

use rampart_core::commands::PlayerCommand;
use rampart_core::config::GameConfig;
use rampart_core::enums::GamePhase;
use rampart_core::events::SimEvent;
use rampart_sim::{SimConfig, SimulationEngine};

/// Give up on a match after this much simulated time.
const MAX_MATCH_SECS: f64 = 900.0;

/// Tower types built on the slots, in slot order.
const BUILD_ORDER: [u32; 4] = [2, 1, 4, 2];

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    phase: GamePhase,
    elapsed_secs: f64,
    kills: u32,
    gold: u32,
    towers_built: u32,
    units_deployed: u32,
    units_lost: u32,
    abilities_fired: u32,
}

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let seed: u64 = parse_flag(&args, "--seed").unwrap_or(42);
    let runs: u64 = parse_flag(&args, "--runs").unwrap_or(1);
    let dt: f64 = parse_flag(&args, "--dt").unwrap_or(1.0 / 60.0);

    let game = match args.iter().position(|a| a == "--config") {
        Some(i) => match args.get(i + 1) {
            Some(path) => load_config(path),
            None => {
                eprintln!("--config needs a path");
                process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    for run in 0..runs {
        let summary = play(seed + run, game.clone(), dt);
        match serde_json::to_string(&summary) {
            Ok(line) => println!("{line}"),
            Err(e) => {
                eprintln!("Failed to encode summary: {e}");
                process::exit(1);
            }
        }
    }
}

fn print_usage() {
    eprintln!(
        "headless-run: play seeded RAMPART matches and print JSON summaries\n\
         \n\
           --seed <N>     First RNG seed (default: 42)\n\
           --runs <N>     Matches to play with consecutive seeds (default: 1)\n\
           --dt <secs>    Frame delta (default: 1/60)\n\
           --config <p>   Game config JSON (default: stock tables)\n"
    );
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

fn load_config(path: &str) -> GameConfig {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Failed to read {path}: {e}");
            process::exit(1);
        }
    };
    match GameConfig::from_json_str(&json) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid config {path}: {e}");
            process::exit(1);
        }
    }
}

fn play(seed: u64, game: GameConfig, dt: f64) -> RunSummary {
    let mut engine = match SimulationEngine::new(SimConfig { seed, game }) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Invalid config: {e}");
            process::exit(1);
        }
    };

    let mut summary = RunSummary {
        seed,
        phase: GamePhase::MainMenu,
        elapsed_secs: 0.0,
        kills: 0,
        gold: 0,
        towers_built: 0,
        units_deployed: 0,
        units_lost: 0,
        abilities_fired: 0,
    };

    engine.queue_command(PlayerCommand::StartGame);
    let slots = engine.slots().to_vec();
    for (slot, type_id) in slots.iter().zip(BUILD_ORDER) {
        engine.queue_commands([
            PlayerCommand::SelectTowerType { id: type_id },
            PlayerCommand::PlaceTowerAt {
                x: slot.x,
                y: slot.y,
            },
        ]);
    }

    let deploy_y = engine.config().field_height - 1.0;
    let lanes: Vec<f64> = engine.config().lanes.iter().map(|l| l.entry().x).collect();
    let mut next_lane = 0;

    loop {
        let snapshot = engine.tick(dt);
        for event in &snapshot.events {
            match event {
                SimEvent::TowerPlaced { .. } => summary.towers_built += 1,
                SimEvent::UnitDeployed { .. } => summary.units_deployed += 1,
                SimEvent::UnitLost { .. } => summary.units_lost += 1,
                SimEvent::AbilityFired { .. } => summary.abilities_fired += 1,
                _ => {}
            }
        }

        if snapshot.phase != GamePhase::Active || snapshot.time.elapsed_secs >= MAX_MATCH_SECS {
            summary.phase = snapshot.phase;
            summary.elapsed_secs = snapshot.time.elapsed_secs;
            summary.kills = snapshot.kills;
            summary.gold = snapshot.gold;
            break;
        }

        if snapshot.towers.iter().any(|t| t.unit_credits > 0) && !lanes.is_empty() {
            engine.queue_command(PlayerCommand::PlaceUnitAt {
                x: lanes[next_lane % lanes.len()],
                y: deploy_y,
            });
            next_lane += 1;
        }

        // Drop the ability on the most advanced enemy once it is close to the goal.
        if snapshot.ability.ready {
            if let Some(lead) = snapshot
                .enemies
                .iter()
                .filter(|e| e.progress > 0.8)
                .max_by(|a, b| a.progress.total_cmp(&b.progress))
            {
                engine.queue_commands([
                    PlayerCommand::ActivateAbility,
                    PlayerCommand::ConfirmAbilityTarget {
                        x: lead.position.x,
                        y: lead.position.y,
                    },
                ]);
            }
        }
    }

    log::info!(
        "seed {} finished: {:?} with {} kills",
        summary.seed,
        summary.phase,
        summary.kills
    );
    summary
}
