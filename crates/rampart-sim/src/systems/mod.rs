//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; everything persistent lives in components or on the engine.

pub mod ability;
pub mod barracks;
pub mod cleanup;
pub mod melee;
pub mod placement;
pub mod projectiles;
pub mod snapshot;
pub mod towers;
pub mod wave_spawner;
