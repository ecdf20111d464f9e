//! Snapshot recording and replay for BARRAGE.
//!
//! The recorder samples live world state at a fixed cadence into an
//! append-only line-oriented log; the replay engine reconstructs smooth
//! motion from that log by interpolating between bracketing keyframes and
//! reconciling entity identity across them.

pub mod codec;
pub mod error;
pub mod keyframe;
pub mod recorder;
pub mod replay;
pub mod storage;

pub use barrage_core as core;
pub use error::ReplayError;
pub use recorder::{Recorder, RecorderConfig};
pub use replay::{ReplayEngine, ReplayState};

#[cfg(test)]
mod tests;
