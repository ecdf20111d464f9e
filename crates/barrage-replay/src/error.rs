//! Error taxonomy for recording and replay.
//!
//! Only resource acquisition surfaces to callers. Parse-level faults are
//! swallowed with best-effort continuation in the codec, and per-entity
//! faults are no-ops in the simulation: partial data beats a stalled
//! frame.

use std::fmt;
use std::io;

/// Failure starting a recording or loading a replay log.
#[derive(Debug)]
pub enum ReplayError {
    /// The log file could not be opened, created, or written.
    Io(io::Error),
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::Io(err) => write!(f, "recording log I/O failure: {err}"),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReplayError::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for ReplayError {
    fn from(err: io::Error) -> Self {
        ReplayError::Io(err)
    }
}
