//! Snapshot recorder: samples live world state into an append-only log.
//!
//! The recorder runs single-threaded on the simulation's driving thread
//! and samples on its own cadence, which need not match the tick rate.
//! Each sample appends one keyframe line and flushes, so a crash loses at
//! most the in-flight record.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use hecs::World;

use barrage_core::components::{Active, Shape, StableId};
use barrage_core::constants::DEFAULT_SAMPLE_INTERVAL_SECS;
use barrage_core::kind::{default_shape, EntityKind};
use barrage_core::types::Position;

use crate::codec;
use crate::error::ReplayError;
use crate::keyframe::{EntityRecord, Keyframe};

/// Recorder configuration: output path and sampling cadence.
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    pub path: PathBuf,
    pub sample_interval: f32,
}

impl RecorderConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sample_interval: DEFAULT_SAMPLE_INTERVAL_SECS,
        }
    }
}

/// Samples active entities into timestamped keyframes.
pub struct Recorder {
    config: RecorderConfig,
    writer: Option<BufWriter<File>>,
    /// Elapsed recording time in seconds.
    clock: f32,
    /// Time accumulated toward the next sample.
    accum: f32,
}

impl Recorder {
    pub fn new(config: RecorderConfig) -> Self {
        Self {
            config,
            writer: None,
            clock: 0.0,
            accum: 0.0,
        }
    }

    /// Open the log and write the header line. Idempotent: starting an
    /// already-started recorder is a no-op. On I/O failure the recorder
    /// stays stopped and the simulation continues unrecorded.
    pub fn start(&mut self, width: f32, height: f32) -> Result<(), ReplayError> {
        if self.writer.is_some() {
            return Ok(());
        }

        if let Some(parent) = self.config.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut writer = BufWriter::new(File::create(&self.config.path)?);
        writeln!(writer, "{}", codec::encode_header(width, height))?;
        writer.flush()?;

        self.writer = Some(writer);
        self.clock = 0.0;
        // Prime the accumulator so the first sample lands immediately.
        self.accum = self.config.sample_interval;
        tracing::info!(path = %self.config.path.display(), "recording started");
        Ok(())
    }

    /// Flush and close the log. Stopping a stopped recorder is a no-op.
    pub fn stop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
            tracing::info!(path = %self.config.path.display(), "recording stopped");
        }
    }

    pub fn is_recording(&self) -> bool {
        self.writer.is_some()
    }

    /// Advance the recording clock; when a sample is due, capture every
    /// active entity into a keyframe and append it. No-op while stopped.
    pub fn sample(&mut self, world: &World, dt: f32) -> Result<(), ReplayError> {
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };

        self.clock += dt;
        self.accum += dt;
        if self.accum < self.config.sample_interval {
            return Ok(());
        }
        self.accum = 0.0;

        let mut keyframe = Keyframe {
            t: self.clock,
            entities: Vec::new(),
        };

        for (_entity, (kind, pos, active, id, shape)) in world
            .query::<(
                &EntityKind,
                &Position,
                &Active,
                Option<&StableId>,
                Option<&Shape>,
            )>()
            .iter()
        {
            if !active.is_active() {
                continue;
            }
            let shape = shape.copied().unwrap_or_else(|| default_shape(*kind));
            keyframe.entities.push(EntityRecord {
                id: kind.name().to_owned(),
                uid: id.map(StableId::uid),
                x: pos.x,
                y: pos.y,
                rt: shape.render_type,
                w: shape.width,
                h: shape.height,
                color: shape.color,
            });
        }

        keyframe.normalize();

        writeln!(writer, "{}", codec::encode_keyframe(&keyframe))?;
        writer.flush()?;
        Ok(())
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        self.stop();
    }
}
