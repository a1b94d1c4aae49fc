#[cfg(test)]
mod tests {
    use crate::commands::PlayerCommand;
    use crate::config::{GameConfig, TowerBehavior};
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::SimEvent;
    use crate::geometry::{clamp_progress, Lane};
    use crate::state::GameStateSnapshot;
    use crate::types::{EntityId, Position, SimTime};

    fn bent_lane() -> Lane {
        // Two segments of different length: (0,0)->(0,100)->(300,100).
        Lane::new(vec![
            Position::new(0.0, 0.0),
            Position::new(0.0, 100.0),
            Position::new(300.0, 100.0),
        ])
    }

    // ---- Lane geometry ----

    #[test]
    fn test_lane_length() {
        assert!((bent_lane().length() - 400.0).abs() < 1e-10);
        assert!((Lane::vertical(90.0, 640.0).length() - 640.0).abs() < 1e-10);
    }

    #[test]
    fn test_position_at_endpoints() {
        for lane in GameConfig::default().lanes.iter().chain([bent_lane()].iter()) {
            let first = lane.waypoints[0];
            let last = *lane.waypoints.last().unwrap();
            assert_eq!(lane.position_at(0.0), first);
            assert_eq!(
                lane.position_at(1.0),
                last,
                "progress 1.0 must land on the last waypoint"
            );
        }
    }

    #[test]
    fn test_position_at_is_per_segment() {
        let lane = bent_lane();
        // Each segment covers half of the progress range regardless of length.
        let quarter = lane.position_at(0.25);
        assert!((quarter.x - 0.0).abs() < 1e-10);
        assert!((quarter.y - 50.0).abs() < 1e-10);

        let three_quarters = lane.position_at(0.75);
        assert!((three_quarters.x - 150.0).abs() < 1e-10);
        assert!((three_quarters.y - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_position_at_stays_on_lane() {
        let lane = bent_lane();
        for i in 0..=200 {
            let p = i as f64 / 200.0;
            let pos = lane.position_at(p);
            assert!(
                lane.distance_to_point(&pos) < 1e-9,
                "progress {p} produced off-lane point {pos:?}"
            );
        }
    }

    #[test]
    fn test_position_at_clamps_bad_input() {
        let lane = Lane::vertical(180.0, 640.0);
        assert_eq!(lane.position_at(-3.0), lane.position_at(0.0));
        assert_eq!(lane.position_at(7.5), lane.position_at(1.0));
        assert_eq!(lane.position_at(f64::NAN), lane.position_at(0.0));
        assert_eq!(clamp_progress(f64::INFINITY), 1.0);
    }

    #[test]
    fn test_single_waypoint_lane() {
        let lane = Lane::new(vec![Position::new(5.0, 6.0)]);
        assert_eq!(lane.segment_count(), 0);
        assert_eq!(lane.position_at(0.5), Position::new(5.0, 6.0));
        assert_eq!(lane.length(), 0.0);
    }

    #[test]
    fn test_distance_to_point() {
        let lane = Lane::vertical(90.0, 640.0);
        assert!((lane.distance_to_point(&Position::new(45.0, 320.0)) - 45.0).abs() < 1e-10);
        // Past the end of the segment the distance is to the endpoint.
        assert!((lane.distance_to_point(&Position::new(90.0, 700.0)) - 60.0).abs() < 1e-10);
    }

    // ---- Config ----

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        config.validate().unwrap();
        assert_eq!(config.lanes.len(), 3);
        assert_eq!(config.tower_types.len(), 4);
        assert_eq!(config.enemy_types.len(), 3);
        assert_eq!(config.barracks_type().map(|t| t.id), Some(4));
        assert!((config.unit_range() - 60.0).abs() < 1e-10);
        assert!((config.deploy_zone_top() - 512.0).abs() < 1e-10);
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back = GameConfig::from_json_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_ranged_cooldown_defaults_when_missing() {
        let json = r#"{"kind":"Ranged","damage":5.0}"#;
        let behavior: TowerBehavior = serde_json::from_str(json).unwrap();
        assert_eq!(
            behavior,
            TowerBehavior::Ranged {
                damage: 5.0,
                cooldown_ms: 1000.0
            }
        );
    }

    #[test]
    fn test_config_validation_errors() {
        let mut config = GameConfig::default();
        config.lanes.clear();
        assert!(matches!(config.validate(), Err(ConfigError::NoLanes)));

        let mut config = GameConfig::default();
        config.lanes[1] = Lane::new(vec![Position::new(1.0, 1.0), Position::new(1.0, 1.0)]);
        assert!(matches!(config.validate(), Err(ConfigError::DegenerateLane(1))));

        let mut config = GameConfig::default();
        let dup = config.tower_types[0].clone();
        config.tower_types.push(dup);
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateTowerId(1))));

        let mut config = GameConfig::default();
        config.enemy_types.clear();
        assert!(matches!(config.validate(), Err(ConfigError::NoEnemyTypes)));

        let mut config = GameConfig::default();
        config.wave_quota = 0;
        assert!(matches!(config.validate(), Err(ConfigError::EmptyWave)));

        let mut config = GameConfig::default();
        config.barracks_unit_interval_ms = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBarracksInterval(_))
        ));

        assert!(matches!(
            GameConfig::from_json_str("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    // ---- Serde surface ----

    #[test]
    fn test_player_command_serde() {
        let commands = vec![
            PlayerCommand::StartGame,
            PlayerCommand::SelectTowerType { id: 2 },
            PlayerCommand::PlaceTowerAt { x: 45.0, y: 320.0 },
            PlayerCommand::PlaceUnitAt { x: 90.0, y: 600.0 },
            PlayerCommand::ActivateAbility,
            PlayerCommand::ConfirmAbilityTarget { x: 10.0, y: 20.0 },
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: PlayerCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }

        let parsed: PlayerCommand =
            serde_json::from_str(r#"{"type":"PlaceTowerAt","x":1.0,"y":2.0}"#).unwrap();
        assert!(matches!(parsed, PlayerCommand::PlaceTowerAt { x, y } if x == 1.0 && y == 2.0));
    }

    #[test]
    fn test_sim_event_serde() {
        let events = vec![
            SimEvent::WaveStarted { wave: 1, quota: 100 },
            SimEvent::EnemyKilled {
                id: EntityId(7),
                archetype: EnemyArchetype::Tank,
                gold: 25,
                source: KillSource::Tower,
            },
            SimEvent::AbilityFired {
                at: Position::new(1.0, 2.0),
                hits: 3,
            },
            SimEvent::MatchEnded {
                outcome: MatchOutcome::Defeat,
            },
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let back: SimEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(*event, back);
        }
    }

    #[test]
    fn test_snapshot_serde() {
        let snapshot = GameStateSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.phase, back.phase);
        assert_eq!(snapshot.gold, back.gold);
        assert!(
            json.len() < 1024,
            "Empty snapshot should be <1KB, was {} bytes",
            json.len()
        );
    }

    // ---- Small types ----

    #[test]
    fn test_position_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..60 {
            time.advance(1.0 / 60.0);
        }
        assert_eq!(time.tick, 60);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_game_phase_can_start() {
        assert!(GamePhase::MainMenu.can_start());
        assert!(GamePhase::Victory.can_start());
        assert!(GamePhase::Defeat.can_start());
        assert!(!GamePhase::Active.can_start());
        assert_eq!(GamePhase::from(MatchOutcome::Defeat), GamePhase::Defeat);
    }
}
