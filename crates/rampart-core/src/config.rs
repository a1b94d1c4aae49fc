//! Static game tables and their loading.
//!
//! `GameConfig::default()` is the stock game: three vertical lanes, four
//! tower types and three enemy archetypes. Hosts may load an override from
//! JSON; the result is validated before the engine accepts it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::EnemyArchetype;
use crate::error::ConfigError;
use crate::geometry::Lane;

/// How a tower type behaves once placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TowerBehavior {
    /// Fires at the nearest enemy in range.
    Ranged {
        damage: f64,
        #[serde(default = "default_tower_cooldown")]
        cooldown_ms: f64,
    },
    /// Accrues unit credits instead of attacking.
    Barracks,
}

fn default_tower_cooldown() -> f64 {
    DEFAULT_TOWER_COOLDOWN_MS
}

/// A purchasable tower type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerTypeConfig {
    pub id: u32,
    pub name: String,
    pub cost: u32,
    /// Targeting range in pixels (flavor for barracks).
    pub range: f64,
    pub behavior: TowerBehavior,
}

impl TowerTypeConfig {
    pub fn is_barracks(&self) -> bool {
        matches!(self.behavior, TowerBehavior::Barracks)
    }
}

/// An enemy archetype's base stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTypeConfig {
    pub archetype: EnemyArchetype,
    /// Health before difficulty scaling.
    pub health: f64,
    /// Reward tier; half of it (floored) is credited as gold on a kill.
    pub bounty: u32,
    /// Melee reach in pixels. Engagement itself uses lane progress.
    pub attack_range: f64,
    pub attack_damage: f64,
    pub attack_cooldown_ms: f64,
}

/// All static game data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub field_width: f64,
    pub field_height: f64,
    pub starting_gold: u32,
    pub barracks_unit_interval_ms: f64,
    pub wave_quota: u32,
    pub tower_types: Vec<TowerTypeConfig>,
    pub enemy_types: Vec<EnemyTypeConfig>,
    pub lanes: Vec<Lane>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            starting_gold: STARTING_GOLD,
            barracks_unit_interval_ms: BARRACKS_UNIT_INTERVAL_MS,
            wave_quota: WAVE_QUOTA,
            tower_types: vec![
                TowerTypeConfig {
                    id: 1,
                    name: "Archer".into(),
                    cost: 50,
                    range: 120.0,
                    behavior: TowerBehavior::Ranged {
                        damage: 20.0,
                        cooldown_ms: 3000.0,
                    },
                },
                TowerTypeConfig {
                    id: 2,
                    name: "Cannon".into(),
                    cost: 100,
                    range: 100.0,
                    behavior: TowerBehavior::Ranged {
                        damage: 40.0,
                        cooldown_ms: 4000.0,
                    },
                },
                TowerTypeConfig {
                    id: 3,
                    name: "Ice".into(),
                    cost: 75,
                    range: 90.0,
                    behavior: TowerBehavior::Ranged {
                        damage: 10.0,
                        cooldown_ms: 5000.0,
                    },
                },
                TowerTypeConfig {
                    id: 4,
                    name: "Barracks".into(),
                    cost: 150,
                    range: 80.0,
                    behavior: TowerBehavior::Barracks,
                },
            ],
            enemy_types: vec![
                EnemyTypeConfig {
                    archetype: EnemyArchetype::Normal,
                    health: 50.0,
                    bounty: 30,
                    attack_range: 30.0,
                    attack_damage: 10.0,
                    attack_cooldown_ms: 1200.0,
                },
                EnemyTypeConfig {
                    archetype: EnemyArchetype::Fast,
                    health: 50.0,
                    bounty: 40,
                    attack_range: 30.0,
                    attack_damage: 8.0,
                    attack_cooldown_ms: 900.0,
                },
                EnemyTypeConfig {
                    archetype: EnemyArchetype::Tank,
                    health: 50.0,
                    bounty: 50,
                    attack_range: 35.0,
                    attack_damage: 20.0,
                    attack_cooldown_ms: 1800.0,
                },
            ],
            lanes: vec![
                Lane::vertical(90.0, FIELD_HEIGHT),
                Lane::vertical(180.0, FIELD_HEIGHT),
                Lane::vertical(270.0, FIELD_HEIGHT),
            ],
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.field_width > 0.0 && self.field_height > 0.0) {
            return Err(ConfigError::InvalidField {
                width: self.field_width,
                height: self.field_height,
            });
        }
        if self.lanes.is_empty() {
            return Err(ConfigError::NoLanes);
        }
        for (index, lane) in self.lanes.iter().enumerate() {
            if lane.segment_count() == 0 || lane.length() <= 0.0 {
                return Err(ConfigError::DegenerateLane(index));
            }
        }
        if self.enemy_types.is_empty() {
            return Err(ConfigError::NoEnemyTypes);
        }
        if self.tower_types.is_empty() {
            return Err(ConfigError::NoTowerTypes);
        }
        let mut seen = HashSet::new();
        for tower in &self.tower_types {
            if !seen.insert(tower.id) {
                return Err(ConfigError::DuplicateTowerId(tower.id));
            }
        }
        if self.wave_quota == 0 {
            return Err(ConfigError::EmptyWave);
        }
        if !(self.barracks_unit_interval_ms > 0.0) {
            return Err(ConfigError::InvalidBarracksInterval(
                self.barracks_unit_interval_ms,
            ));
        }
        Ok(())
    }

    pub fn tower_type(&self, id: u32) -> Option<&TowerTypeConfig> {
        self.tower_types.iter().find(|t| t.id == id)
    }

    /// The tower type used to build barracks, if the table has one.
    pub fn barracks_type(&self) -> Option<&TowerTypeConfig> {
        self.tower_types.iter().find(|t| t.is_barracks())
    }

    /// Nominal melee unit range: half of the base tower's range.
    pub fn unit_range(&self) -> f64 {
        self.tower_type(BASE_TOWER_TYPE_ID)
            .map(|t| t.range / 2.0)
            .unwrap_or(UNIT_FALLBACK_RANGE)
    }

    /// Lowest y at which units may be deployed.
    pub fn deploy_zone_top(&self) -> f64 {
        self.field_height * UNIT_DEPLOY_ZONE_FRACTION
    }
}
