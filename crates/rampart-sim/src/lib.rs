//! Simulation engine for RAMPART.
//!
//! Owns the hecs ECS world, advances it by host-supplied frame deltas,
//! and produces GameStateSnapshots for the frontend.

pub mod engine;
pub mod match_state;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use rampart_core as core;
