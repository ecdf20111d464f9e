//! Cleanup system: removes destroyed entities and out-of-field bullets.
//! Uses a pre-allocated buffer to avoid per-tick allocation.

use hecs::{Entity, World};

use barrage_core::components::Active;
use barrage_core::constants::*;
use barrage_core::kind::EntityKind;
use barrage_core::types::Position;

/// Despawn entities whose liveness flag is down, plus bullets that left
/// the playfield by more than the out-of-bounds margin.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, active) in world.query_mut::<&Active>() {
        if !active.is_active() {
            despawn_buffer.push(entity);
        }
    }

    for (entity, (kind, pos)) in world.query_mut::<(&EntityKind, &Position)>() {
        if *kind == EntityKind::Bullet && out_of_field(pos) {
            despawn_buffer.push(entity);
        }
    }

    // An entity can appear twice (destroyed bullet that also left the
    // field); the second despawn fails harmlessly.
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

fn out_of_field(pos: &Position) -> bool {
    pos.x < -BULLET_OOB_MARGIN
        || pos.x > FIELD_WIDTH + BULLET_OOB_MARGIN
        || pos.y < -BULLET_OOB_MARGIN
        || pos.y > FIELD_HEIGHT + BULLET_OOB_MARGIN
}
