//! Automatic bullet fire system.
//!
//! Once per fire interval, launch a bullet from the player toward the
//! nearest active enemy. With no enemy on the field, fall back to the
//! player's travel direction, or straight up when the player is still.

use hecs::World;

use barrage_core::components::{Active, Physics};
use barrage_core::constants::*;
use barrage_core::kind::EntityKind;
use barrage_core::types::{Position, Velocity};

/// Accumulated time since the last shot.
#[derive(Debug, Clone, Copy, Default)]
pub struct FireTimer {
    elapsed: f32,
}

/// Fire a bullet whenever the interval elapses and a player exists.
pub fn run(world: &mut World, timer: &mut FireTimer, next_uid: &mut u64, dt: f32) {
    timer.elapsed += dt;
    if timer.elapsed < BULLET_FIRE_INTERVAL_SECS {
        return;
    }
    timer.elapsed = 0.0;

    let Some((player_pos, player_vel)) = find_player(world) else {
        return;
    };

    let direction = match nearest_enemy(world, &player_pos) {
        Some(enemy_pos) => {
            let dir = Velocity::new(enemy_pos.x - player_pos.x, enemy_pos.y - player_pos.y);
            if dir.magnitude() > 1e-3 {
                dir.normalized()
            } else {
                Velocity::new(0.0, -1.0)
            }
        }
        // No target: fire along the player's motion, or straight up.
        None if player_vel.magnitude() > 0.1 => player_vel.normalized(),
        None => Velocity::new(0.0, -1.0),
    };

    let start = Position::new(
        player_pos.x + direction.x * BULLET_SPAWN_OFFSET,
        player_pos.y + direction.y * BULLET_SPAWN_OFFSET,
    );
    crate::world_setup::spawn_bullet(world, start, direction, next_uid);
}

fn find_player(world: &World) -> Option<(Position, Velocity)> {
    world
        .query::<(&EntityKind, &Position, &Physics)>()
        .iter()
        .find(|(_, (kind, _, _))| **kind == EntityKind::Player)
        .map(|(_, (_, pos, phys))| (*pos, phys.velocity))
}

fn nearest_enemy(world: &World, from: &Position) -> Option<Position> {
    let mut best: Option<(f32, Position)> = None;
    for (_entity, (kind, pos, active)) in world.query::<(&EntityKind, &Position, &Active)>().iter()
    {
        if *kind != EntityKind::Enemy || !active.is_active() {
            continue;
        }
        let d = from.distance_to(pos);
        if best.map_or(true, |(bd, _)| d < bd) {
            best = Some((d, *pos));
        }
    }
    best.map(|(_, pos)| pos)
}
