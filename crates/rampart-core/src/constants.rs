//! Simulation constants and tuning parameters.
//!
//! Data tables (tower/enemy types, lanes, starting gold) live in
//! [`crate::config::GameConfig`]; everything here is fixed game tuning.

// --- Playfield ---

/// Default playfield width in pixels.
pub const FIELD_WIDTH: f64 = 360.0;

/// Default playfield height in pixels.
pub const FIELD_HEIGHT: f64 = 640.0;

// --- Economy ---

/// Gold the player starts a match with.
pub const STARTING_GOLD: u32 = 1000;

/// Fraction of an enemy's bounty credited as gold on a kill (floored).
pub const KILL_REWARD_FACTOR: f64 = 0.5;

// --- Towers ---

/// Maximum number of towers alive at once.
pub const MAX_TOWERS: usize = 4;

/// A click must land within this distance of a slot to snap to it.
pub const SLOT_SNAP_RADIUS: f64 = 20.0;

/// Minimum spacing between two towers.
pub const TOWER_MIN_SPACING: f64 = 20.0;

/// Candidate slots closer than this to any lane segment are discarded.
pub const SLOT_LANE_CLEARANCE: f64 = 40.0;

/// Cooldown used for ranged tower types that do not specify one.
pub const DEFAULT_TOWER_COOLDOWN_MS: f64 = 1000.0;

/// Tower type whose range defines the melee unit's nominal range.
pub const BASE_TOWER_TYPE_ID: u32 = 1;

/// Lifetime of the cosmetic tower shot trace.
pub const PROJECTILE_TTL_SECS: f64 = 0.2;

// --- Barracks ---

/// Default barracks production interval in milliseconds.
pub const BARRACKS_UNIT_INTERVAL_MS: f64 = 6000.0;

/// Minimum sim time between two manual unit deployments.
pub const UNIT_DEPLOY_SPACING_SECS: f64 = 1.0;

/// Units may only be deployed at or below this fraction of field height.
pub const UNIT_DEPLOY_ZONE_FRACTION: f64 = 0.8;

// --- Melee units ---

pub const UNIT_HEALTH: f64 = 50.0;
pub const UNIT_DAMAGE: f64 = 15.0;
pub const UNIT_ATTACK_COOLDOWN_MS: f64 = 800.0;

/// Unit range when no base tower type exists.
pub const UNIT_FALLBACK_RANGE: f64 = 60.0;

/// Units never walk past this progress toward the lane start.
pub const UNIT_PROGRESS_FLOOR: f64 = 0.10;

/// How long a unit displays the last damage it took.
pub const DAMAGE_FLASH_SECS: f64 = 0.7;

// --- Movement & combat ---

/// Progress distance at which opposing entities engage and same-side
/// entities queue behind each other.
pub const ENGAGE_DISTANCE: f64 = 0.03;

/// Progress advanced per tick is `speed * dt / PROGRESS_SPEED_DIVISOR`.
pub const PROGRESS_SPEED_DIVISOR: f64 = 10.0;

/// Lane length is normalized against this budget for base speed.
pub const LANE_TRAVERSAL_BUDGET: f64 = 300.0;

/// Constant trim applied to the normalized base speed.
pub const BASE_SPEED_TRIM: f64 = 0.26;

/// Speed ramp: `1 + floor(n * RATE / GROUP) * STEP`.
pub const SPEED_RAMP_RATE: f64 = 2.5;
pub const SPEED_RAMP_GROUP: f64 = 6.0;
pub const SPEED_RAMP_STEP: f64 = 0.01;

// --- Difficulty scaling ---

/// Enemy health multiplier per buff step (compounding).
pub const HEALTH_BUFF_FACTOR: f64 = 1.05;

/// Match time between health buff steps.
pub const HEALTH_BUFF_INTERVAL_SECS: f64 = 10.0;

// --- Waves ---

/// Enemies per wave.
pub const WAVE_QUOTA: u32 = 100;

/// Delay between starting a game and the first wave.
pub const WAVE_START_DELAY_SECS: f64 = 2.0;

/// Uniform window for the delay between two enemy spawns.
pub const SPAWN_DELAY_MIN_SECS: f64 = 0.5;
pub const SPAWN_DELAY_MAX_SECS: f64 = 2.0;

// --- Area ability ---

pub const ABILITY_RADIUS: f64 = 100.0;
pub const ABILITY_COOLDOWN_SECS: f64 = 45.0;

/// Nominal ability damage; raised per target to exceed its max health.
pub const ABILITY_DAMAGE: f64 = 9999.0;
