//! ECS components for hecs entities.
//!
//! Components are plain data; game logic lives in systems. The two
//! exceptions are `Active` and `Health`, whose fields are atomics because
//! collision worker batches touch them across thread boundaries.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use serde::{Deserialize, Serialize};

use crate::kind::RenderType;
use crate::types::Velocity;

/// Physics state for entities integrated by the physics stepper.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Physics {
    pub velocity: Velocity,
    /// Velocity multiplier applied once per tick before integration.
    pub friction: f32,
    /// Non-bouncing entities (bullets) skip boundary reflection and are
    /// left to exit the field toward out-of-bounds deletion.
    pub bounces: bool,
}

impl Physics {
    pub fn new(velocity: Velocity, friction: f32) -> Self {
        Self {
            velocity,
            friction,
            bounces: true,
        }
    }

    pub fn non_bouncing(velocity: Velocity, friction: f32) -> Self {
        Self {
            velocity,
            friction,
            bounces: false,
        }
    }
}

/// Liveness flag. Destruction is idempotent and safe under concurrent
/// access: two worker batches may race to destroy the same entity and
/// exactly one observes the transition.
#[derive(Debug)]
pub struct Active {
    alive: AtomicBool,
}

impl Default for Active {
    fn default() -> Self {
        Self {
            alive: AtomicBool::new(true),
        }
    }
}

impl Active {
    pub fn is_active(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Mark destroyed. Returns true only for the caller that flipped the flag.
    pub fn destroy(&self) -> bool {
        self.alive.swap(false, Ordering::AcqRel)
    }
}

/// Hit points, decrementable from collision worker threads.
#[derive(Debug)]
pub struct Health {
    hp: AtomicI32,
}

impl Health {
    pub fn new(hp: i32) -> Self {
        Self {
            hp: AtomicI32::new(hp),
        }
    }

    pub fn hp(&self) -> i32 {
        self.hp.load(Ordering::Acquire)
    }

    pub fn take_damage(&self, amount: i32) {
        self.hp.fetch_sub(amount, Ordering::AcqRel);
    }

    pub fn is_dead(&self) -> bool {
        self.hp() <= 0
    }
}

/// Stable recording identity, assigned once at spawn and kept for the
/// entity's lifetime so replay can track it across keyframes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StableId(pub u64);

impl StableId {
    /// Uid string written to the keyframe log. Zero-padded so that the
    /// string sort used for keyframe normalization matches numeric order.
    pub fn uid(&self) -> String {
        format!("e{:06}", self.0)
    }
}

/// Render descriptor sampled into keyframes and used by replay visuals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Shape {
    pub render_type: RenderType,
    pub width: f32,
    pub height: f32,
    /// RGBA, each component in [0, 1].
    pub color: [f32; 4],
}
