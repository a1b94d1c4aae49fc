//! Error types.
//!
//! Player commands never fail loudly: the engine drops a rejected command
//! after logging the [`CommandRejected`] reason. Config loading is the only
//! fallible boundary that reports to the host.

use thiserror::Error;

/// Why a player command had no effect.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandRejected {
    #[error("no match is running")]
    NotPlaying,
    #[error("a match is already running")]
    AlreadyPlaying,
    #[error("unknown tower type {0}")]
    UnknownTowerType(u32),
    #[error("no tower type selected")]
    NoTowerSelected,
    #[error("not enough gold: need {needed}, have {available}")]
    InsufficientGold { needed: u32, available: u32 },
    #[error("no placement slot near ({x:.0}, {y:.0})")]
    OutsidePlacementZone { x: f64, y: f64 },
    #[error("placement slot {0} is occupied")]
    SlotOccupied(usize),
    #[error("tower limit of {0} reached")]
    TowerCapReached(usize),
    #[error("no barracks has been built")]
    NoBarracks,
    #[error("units must be deployed in the bottom of the field")]
    OutsideDeployZone,
    #[error("next deployment available in {remaining_secs:.2}s")]
    DeployThrottled { remaining_secs: f64 },
    #[error("area ability is cooling down ({remaining_secs:.1}s)")]
    AbilityNotReady { remaining_secs: f64 },
    #[error("area ability is waiting for a target")]
    AbilityTargeting,
    #[error("area ability is not waiting for a target")]
    AbilityNotTargeting,
}

/// Invalid game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse game config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config defines no lanes")]
    NoLanes,
    #[error("lane {0} needs at least two distinct waypoints")]
    DegenerateLane(usize),
    #[error("config defines no enemy types")]
    NoEnemyTypes,
    #[error("config defines no tower types")]
    NoTowerTypes,
    #[error("duplicate tower type id {0}")]
    DuplicateTowerId(u32),
    #[error("playfield size must be positive, got {width}x{height}")]
    InvalidField { width: f64, height: f64 },
    #[error("wave quota must be at least 1")]
    EmptyWave,
    #[error("barracks unit interval must be positive, got {0}ms")]
    InvalidBarracksInterval(f64),
}
