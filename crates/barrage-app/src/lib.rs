//! BARRAGE headless driver.
//!
//! Runs the simulation at a fixed rate on a dedicated thread, records
//! sessions to disk, and plays recorded logs back.

pub mod game_loop;
pub mod state;

pub use barrage_core as core;
