//! Live simulation for BARRAGE.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate, and
//! parallelizes the physics and collision hot paths across bounded
//! worker pools.

pub mod engine;
pub mod pool;
pub mod systems;
pub mod world_setup;

pub use barrage_core as core;
pub use engine::SimulationEngine;
