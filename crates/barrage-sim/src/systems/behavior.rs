//! Per-kind entity behavior, dispatched by a single match.
//!
//! The player steers from the frame's input snapshot; enemies home toward
//! the player; bullets and decorations have no behavior of their own.

use hecs::World;

use barrage_core::components::Physics;
use barrage_core::constants::*;
use barrage_core::input::InputState;
use barrage_core::kind::EntityKind;
use barrage_core::types::{Position, Velocity};

/// Run behavior for every entity with a kind, position, and physics.
pub fn run(world: &mut World, input: &InputState) {
    let player_pos = find_player_position(world);

    for (_entity, (kind, pos, phys)) in
        world.query_mut::<(&EntityKind, &mut Position, &mut Physics)>()
    {
        match kind {
            EntityKind::Player => steer_player(pos, phys, input),
            EntityKind::Enemy => {
                if let Some(target) = player_pos {
                    steer_enemy(pos, phys, &target);
                }
            }
            _ => {}
        }
    }
}

fn find_player_position(world: &World) -> Option<Position> {
    world
        .query::<(&EntityKind, &Position)>()
        .iter()
        .find(|(_, (kind, _))| **kind == EntityKind::Player)
        .map(|(_, (_, pos))| *pos)
}

/// Set player velocity from held direction keys and keep the player
/// inside the field.
fn steer_player(pos: &mut Position, phys: &mut Physics, input: &InputState) {
    let (x, y) = input.movement_axes();
    let movement = Velocity::new(x, y);
    if movement.magnitude() > 0.0 {
        phys.velocity = movement.normalized().scaled(PLAYER_SPEED);
    }

    pos.x = pos.x.clamp(0.0, FIELD_WIDTH - PLAYER_MARGIN);
    pos.y = pos.y.clamp(0.0, FIELD_HEIGHT - PLAYER_MARGIN);
}

/// Home toward the player at chase speed, unless already on top of them.
fn steer_enemy(pos: &Position, phys: &mut Physics, target: &Position) {
    let dir = Velocity::new(target.x - pos.x, target.y - pos.y);
    if dir.magnitude() > ENEMY_CHASE_DEADZONE {
        phys.velocity = dir.normalized().scaled(ENEMY_CHASE_SPEED);
    }
}
