//! Physics stepping system.
//!
//! For every entity with Position + Physics: apply friction, integrate
//! `position += velocity * dt`, reflect velocity components leaving the
//! playfield, then clamp the position back inside. Non-bouncing entities
//! (bullets) skip reflection and clamping; the cleanup system deletes them
//! once they leave the field.
//!
//! Above `PHYSICS_SERIAL_THRESHOLD` entities the step is partitioned into
//! contiguous batches across the primary worker pool. Batches hold disjoint
//! `&mut` ranges, so serial and parallel execution produce bit-identical
//! positions; the calling thread blocks until every batch completes.

use std::time::{Duration, Instant};

use hecs::World;

use barrage_core::components::Physics;
use barrage_core::constants::*;
use barrage_core::types::Position;

use crate::pool::WorkerPool;

/// Owns the primary worker pool and per-step timing.
pub struct PhysicsStepper {
    pool: WorkerPool,
    last_step: Duration,
}

impl PhysicsStepper {
    pub fn new() -> Self {
        Self {
            pool: WorkerPool::primary("physics"),
            last_step: Duration::ZERO,
        }
    }

    /// Worker count, used to size the collision pool.
    pub fn pool_workers(&self) -> usize {
        self.pool.workers()
    }

    /// Elapsed wall time of the most recent step.
    pub fn last_step_time(&self) -> Duration {
        self.last_step
    }

    /// Run one physics step over the whole world.
    pub fn run(&mut self, world: &mut World, dt: f32) {
        let start = Instant::now();

        let mut items: Vec<(&mut Position, &mut Physics)> = world
            .query_mut::<(&mut Position, &mut Physics)>()
            .into_iter()
            .map(|(_entity, pair)| pair)
            .collect();

        if items.len() < PHYSICS_SERIAL_THRESHOLD {
            for (pos, phys) in items.iter_mut() {
                step_entity(pos, phys, dt);
            }
        } else {
            self.pool.dispatch_mut(&mut items, |chunk| {
                for (pos, phys) in chunk {
                    step_entity(pos, phys, dt);
                }
            });
        }

        self.last_step = start.elapsed();
    }
}

impl Default for PhysicsStepper {
    fn default() -> Self {
        Self::new()
    }
}

/// Integrate one entity. An entity with non-finite state is skipped so a
/// single fault never poisons the rest of its batch or writes NaN back.
pub(crate) fn step_entity(pos: &mut Position, phys: &mut Physics, dt: f32) {
    if !phys.velocity.is_finite() || !pos.is_finite() {
        return;
    }

    phys.velocity.x *= phys.friction;
    phys.velocity.y *= phys.friction;
    pos.x += phys.velocity.x * dt;
    pos.y += phys.velocity.y * dt;

    if !phys.bounces {
        return;
    }

    let max_x = FIELD_WIDTH - ENTITY_MARGIN;
    let max_y = FIELD_HEIGHT - ENTITY_MARGIN;

    if pos.x <= 0.0 || pos.x >= max_x {
        phys.velocity.x = -phys.velocity.x;
    }
    if pos.y <= 0.0 || pos.y >= max_y {
        phys.velocity.y = -phys.velocity.y;
    }

    pos.x = pos.x.clamp(0.0, max_x);
    pos.y = pos.y.clamp(0.0, max_y);
}
