//! Replay engine: reconstructs continuous motion from a keyframe log.
//!
//! A virtual clock advances with the driving tick and is clamped to the
//! recorded time range; the engine never extrapolates past the final
//! keyframe. Each tick locates the two keyframes bracketing the clock,
//! linearly interpolates every entity between them, and reconciles
//! identity across the pair: by uid when both frames carry complete uids,
//! otherwise by positional index. Reconciliation is O(entities) per tick
//! via a lookup over the earlier frame's keys.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use hecs::{Entity, World};

use barrage_core::components::{Active, Shape};
use barrage_core::kind::{default_shape, EntityKind};
use barrage_core::types::Position;

use crate::codec;
use crate::error::ReplayError;
use crate::keyframe::{EntityRecord, Keyframe};

/// Guard against zero-length spans between keyframes.
const MIN_SPAN: f32 = 1e-6;

/// Reconciliation key of a replay-visual entity.
struct VisualKey(String);

/// Replay lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayState {
    /// No log loaded; the caller is picking one from a directory listing.
    FileBrowsing,
    /// A log is loaded and the visual set matches its first keyframe.
    Loaded,
    /// The virtual clock is advancing.
    Playing,
    /// The clock reached the final keyframe; further ticks stay clamped.
    Finished,
}

/// Drives replay-visual entities from a loaded keyframe log.
pub struct ReplayEngine {
    state: ReplayState,
    keyframes: Vec<Keyframe>,
    clock: f32,
    world: World,
    /// Active visual entity per reconciliation key (uid mode).
    index: HashMap<String, Entity>,
    /// Active visuals in keyframe order (positional fallback mode).
    ordered: Vec<Entity>,
}

impl ReplayEngine {
    pub fn new() -> Self {
        Self {
            state: ReplayState::FileBrowsing,
            keyframes: Vec::new(),
            clock: 0.0,
            world: World::new(),
            index: HashMap::new(),
            ordered: Vec::new(),
        }
    }

    /// Load a keyframe log and build the visual set from its first
    /// keyframe. A readable log with no keyframes leaves the engine
    /// browsing with an empty list rather than failing.
    pub fn load(&mut self, path: &Path) -> Result<usize, ReplayError> {
        let mut keyframes = codec::read_keyframes(path)?;
        keyframes.sort_by(|a, b| a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal));

        self.world = World::new();
        self.index.clear();
        self.ordered.clear();
        self.clock = 0.0;
        self.keyframes = keyframes;

        if self.keyframes.is_empty() {
            tracing::warn!(path = %path.display(), "log contains no keyframes");
            self.state = ReplayState::FileBrowsing;
            return Ok(0);
        }

        let first = self.keyframes[0].clone();
        for (i, record) in first.entities.iter().enumerate() {
            let key = record.stable_key(i);
            let entity = spawn_visual(&mut self.world, &key, record.position(), record.shape());
            self.index.insert(key, entity);
            self.ordered.push(entity);
        }

        self.state = ReplayState::Loaded;
        tracing::info!(
            path = %path.display(),
            keyframes = self.keyframes.len(),
            "replay loaded"
        );
        Ok(self.keyframes.len())
    }

    /// Advance the virtual clock and update every visual entity to its
    /// interpolated position. Idempotent once finished.
    pub fn tick(&mut self, dt: f32) {
        if self.state == ReplayState::FileBrowsing || self.keyframes.is_empty() {
            return;
        }

        let last_t = self.keyframes[self.keyframes.len() - 1].t;
        self.clock = (self.clock + dt).clamp(0.0, last_t);

        let (ai, bi) = self.bracket();
        let fa = &self.keyframes[ai];
        let fb = &self.keyframes[bi];
        let span = (fb.t - fa.t).max(MIN_SPAN);
        let u = ((self.clock - fa.t) / span).clamp(0.0, 1.0);

        if fa.all_uids() && fb.all_uids() {
            reconcile_by_uid(&mut self.world, &mut self.index, &mut self.ordered, fa, fb, u);
        } else {
            reconcile_by_index(&mut self.world, &mut self.ordered, fa, fb, u);
        }

        self.state = if self.clock >= last_t {
            ReplayState::Finished
        } else {
            ReplayState::Playing
        };
    }

    /// Indices of the keyframes bracketing the clock. The clock is
    /// pinned to the first/last pair when it falls outside all spans.
    fn bracket(&self) -> (usize, usize) {
        let n = self.keyframes.len();
        if n == 1 {
            return (0, 0);
        }
        for i in 0..n - 1 {
            if self.clock >= self.keyframes[i].t && self.clock <= self.keyframes[i + 1].t {
                return (i, i + 1);
            }
        }
        (0, n - 1)
    }

    /// Current interpolated entities: (key, position, render descriptor)
    /// for every active visual. Order is unspecified.
    pub fn current_entities(&self) -> Vec<(String, Position, Shape)> {
        self.world
            .query::<(&VisualKey, &Position, &Shape, &Active)>()
            .iter()
            .filter(|(_, (_, _, _, active))| active.is_active())
            .map(|(_, (key, pos, shape, _))| (key.0.clone(), *pos, *shape))
            .collect()
    }

    pub fn state(&self) -> ReplayState {
        self.state
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Playback progress in [0, 1] for a time bar.
    pub fn progress(&self) -> f32 {
        let total = self.keyframes.last().map_or(0.0, |kf| kf.t);
        if total <= MIN_SPAN {
            return 0.0;
        }
        (self.clock / total).clamp(0.0, 1.0)
    }
}

impl Default for ReplayEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_visual(world: &mut World, key: &str, pos: Position, shape: Shape) -> Entity {
    world.spawn((
        EntityKind::ReplayVisual,
        VisualKey(key.to_owned()),
        pos,
        shape,
        Active::default(),
    ))
}

/// Uid reconciliation: every entity of frame B interpolates from its
/// counterpart in frame A (or spawns in place without one); keys absent
/// from frame B are deactivated but kept in memory.
fn reconcile_by_uid(
    world: &mut World,
    index: &mut HashMap<String, Entity>,
    ordered: &mut Vec<Entity>,
    fa: &Keyframe,
    fb: &Keyframe,
    u: f32,
) {
    let map_a: HashMap<&str, &EntityRecord> = fa
        .entities
        .iter()
        .filter_map(|rec| rec.uid.as_deref().map(|uid| (uid, rec)))
        .collect();

    let mut alive: HashSet<&str> = HashSet::with_capacity(fb.entities.len());

    for record in &fb.entities {
        let Some(uid) = record.uid.as_deref() else {
            continue;
        };
        alive.insert(uid);

        let start = map_a
            .get(uid)
            .map(|rec| rec.position())
            .unwrap_or_else(|| record.position());
        let pos = start.lerp(&record.position(), u);

        let entity = match index.get(uid) {
            Some(&e) if is_active(world, e) => e,
            _ => {
                let e = spawn_visual(world, uid, record.position(), record.shape());
                index.insert(uid.to_owned(), e);
                ordered.push(e);
                e
            }
        };
        if let Ok(mut p) = world.get::<&mut Position>(entity) {
            *p = pos;
        }
    }

    index.retain(|key, &mut entity| {
        if alive.contains(key.as_str()) {
            return true;
        }
        if let Ok(active) = world.get::<&Active>(entity) {
            active.destroy();
        }
        false
    });
    ordered.retain(|&e| is_active(world, e));
}

/// Positional fallback: entity i of frame A interpolates toward entity i
/// of frame B. The visual list grows with placeholders or deactivates its
/// tail to match frame B's count; popping artifacts are accepted here.
fn reconcile_by_index(world: &mut World, ordered: &mut Vec<Entity>, fa: &Keyframe, fb: &Keyframe, u: f32) {
    let target = fb.entities.len();
    let common = fa.entities.len().min(target);

    while ordered.len() < target {
        let key = format!("ReplayObj#{}", ordered.len());
        let entity = spawn_visual(
            world,
            &key,
            fb.entities[ordered.len()].position(),
            default_shape(EntityKind::ReplayVisual),
        );
        ordered.push(entity);
    }
    while ordered.len() > target {
        if let Some(entity) = ordered.pop() {
            if let Ok(active) = world.get::<&Active>(entity) {
                active.destroy();
            }
        }
    }

    for (i, record) in fb.entities.iter().enumerate() {
        let end = record.position();
        let start = if i < common {
            fa.entities[i].position()
        } else {
            end
        };
        let pos = start.lerp(&end, u);
        if let Ok(mut p) = world.get::<&mut Position>(ordered[i]) {
            *p = pos;
        }
    }
}

fn is_active(world: &World, entity: Entity) -> bool {
    world
        .get::<&Active>(entity)
        .map(|active| active.is_active())
        .unwrap_or(false)
}
