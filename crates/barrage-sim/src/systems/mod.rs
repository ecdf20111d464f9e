//! Simulation systems, run in a fixed order each tick:
//! behavior → physics → collision → spawning → cleanup.

pub mod behavior;
pub mod bullet_fire;
pub mod cleanup;
pub mod collision;
pub mod physics;
pub mod wave_spawner;
