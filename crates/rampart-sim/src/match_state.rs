//! Match-wide counters owned by the engine.
//!
//! Stored on `SimulationEngine`, NOT as ECS entities, and rebuilt from
//! scratch on every `StartGame`.

use rampart_core::constants::*;
use rampart_core::error::CommandRejected;

/// Area ability state.
#[derive(Debug, Clone)]
pub struct AbilityState {
    pub ready: bool,
    /// Armed and waiting for a target point.
    pub selecting: bool,
    pub cooldown_remaining_secs: f64,
}

impl Default for AbilityState {
    fn default() -> Self {
        Self {
            ready: true,
            selecting: false,
            cooldown_remaining_secs: 0.0,
        }
    }
}

/// Economy, score and difficulty counters for the running match.
#[derive(Debug, Clone, Default)]
pub struct MatchState {
    pub gold: u32,
    pub kills: u32,
    /// Compounding enemy health steps earned so far.
    pub health_buff_count: u32,
    /// Time accumulated toward the next health step.
    pub health_buff_timer_secs: f64,
    /// Tower type the next placement will build.
    pub selected_tower: Option<u32>,
    /// Match time of the last manual unit deployment.
    pub last_deploy_at: Option<f64>,
    pub ability: AbilityState,
}

impl MatchState {
    pub fn new(starting_gold: u32) -> Self {
        Self {
            gold: starting_gold,
            ..Default::default()
        }
    }

    /// Deduct `cost`, or reject without touching gold.
    pub fn spend(&mut self, cost: u32) -> Result<(), CommandRejected> {
        match self.gold.checked_sub(cost) {
            Some(rest) => {
                self.gold = rest;
                Ok(())
            }
            None => Err(CommandRejected::InsufficientGold {
                needed: cost,
                available: self.gold,
            }),
        }
    }

    /// Count a kill and credit its payout. Returns the gold credited.
    pub fn credit_kill(&mut self, bounty: u32) -> u32 {
        let payout = (bounty as f64 * KILL_REWARD_FACTOR).floor() as u32;
        self.gold = self.gold.saturating_add(payout);
        self.kills += 1;
        payout
    }

    /// Health multiplier applied to enemies spawned now.
    pub fn health_multiplier(&self) -> f64 {
        let steps = i32::try_from(self.health_buff_count).unwrap_or(i32::MAX);
        HEALTH_BUFF_FACTOR.powi(steps)
    }

    /// Accumulate match time; every full interval adds one health step.
    pub fn advance_health_buff(&mut self, dt: f64) {
        self.health_buff_timer_secs += dt;
        if self.health_buff_timer_secs < HEALTH_BUFF_INTERVAL_SECS {
            return;
        }
        let steps = (self.health_buff_timer_secs / HEALTH_BUFF_INTERVAL_SECS).floor();
        self.health_buff_timer_secs =
            (self.health_buff_timer_secs - steps * HEALTH_BUFF_INTERVAL_SECS).max(0.0);
        // `as` saturates at u32::MAX.
        self.health_buff_count = self.health_buff_count.saturating_add(steps as u32);
    }
}
