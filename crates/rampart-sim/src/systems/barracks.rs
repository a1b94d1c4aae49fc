//! Barracks production and manual unit deployment.

use hecs::{Entity, World};

use rampart_core::components::{Tower, TowerState, Unit};
use rampart_core::config::GameConfig;
use rampart_core::constants::UNIT_DEPLOY_SPACING_SECS;
use rampart_core::error::CommandRejected;
use rampart_core::types::EntityId;

use crate::match_state::MatchState;
use crate::world_setup::{alloc_id, spawn_unit};

/// Accumulate production time and bank one credit per full interval.
pub fn accrue(credits: &mut u32, timer_ms: &mut f64, dt: f64, interval_ms: f64) {
    if interval_ms <= 0.0 {
        return;
    }
    *timer_ms += dt * 1000.0;
    if *timer_ms < interval_ms {
        return;
    }
    let steps = (*timer_ms / interval_ms).floor();
    *timer_ms = (*timer_ms - steps * interval_ms).max(0.0);
    *credits = credits.saturating_add(steps as u32);
}

/// Where and when a deployment was requested.
pub struct DeployRequest {
    pub x: f64,
    pub y: f64,
    pub now_secs: f64,
}

/// Deploy a melee unit from a barracks.
///
/// A placed barracks is required; having the barracks type selected in the
/// build menu is not enough to buy units. Uses an accrued credit when any
/// barracks has one, otherwise charges the barracks build cost. Nothing
/// changes when the request is rejected.
pub fn deploy_unit(
    world: &mut World,
    config: &GameConfig,
    match_state: &mut MatchState,
    next_entity_id: &mut u32,
    request: DeployRequest,
) -> Result<(EntityId, usize), CommandRejected> {
    if !request.x.is_finite()
        || !request.y.is_finite()
        || request.y < config.deploy_zone_top()
    {
        return Err(CommandRejected::OutsideDeployZone);
    }

    let mut barracks: Vec<(EntityId, Entity, u32)> = world
        .query::<(&EntityId, &Tower)>()
        .iter()
        .filter_map(|(entity, (id, tower))| match tower.state {
            TowerState::Barracks { credits, .. } => Some((*id, entity, credits)),
            TowerState::Ranged { .. } => None,
        })
        .collect();
    if barracks.is_empty() {
        return Err(CommandRejected::NoBarracks);
    }
    barracks.sort_by_key(|(id, _, _)| *id);

    if let Some(last) = match_state.last_deploy_at {
        let since = request.now_secs - last;
        if since < UNIT_DEPLOY_SPACING_SECS {
            return Err(CommandRejected::DeployThrottled {
                remaining_secs: UNIT_DEPLOY_SPACING_SECS - since,
            });
        }
    }

    match barracks.iter().find(|(_, _, credits)| *credits > 0) {
        Some((_, entity, _)) => {
            if let Ok(mut tower) = world.get::<&mut Tower>(*entity) {
                if let TowerState::Barracks { credits, .. } = &mut tower.state {
                    *credits -= 1;
                }
            }
        }
        None => {
            let cost = config.barracks_type().map(|t| t.cost).unwrap_or(0);
            match_state.spend(cost)?;
        }
    }

    let live_units = world.query::<&Unit>().iter().count() as u32;
    let id = alloc_id(next_entity_id);
    let (_, lane) = spawn_unit(world, config, id, request.x, request.y, live_units);
    match_state.last_deploy_at = Some(request.now_secs);
    Ok((id, lane))
}
