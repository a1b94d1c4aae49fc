//! Core types and definitions for the RAMPART simulation.
//!
//! This crate defines the vocabulary shared by the simulation and any host:
//! components, commands, state snapshots, events, configuration, lane
//! geometry and constants. It has no dependency on the ECS or any runtime
//! framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod geometry;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
