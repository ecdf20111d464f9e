//! Entity spawn factories for setting up the simulation world.
//!
//! Every spawned entity receives a stable uid at creation so the recorder
//! can track it across keyframes for its whole lifetime.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use barrage_core::components::{Active, Health, Physics, StableId};
use barrage_core::constants::*;
use barrage_core::kind::{default_shape, EntityKind};
use barrage_core::types::{Position, Velocity};

/// Set up the initial world: player, first enemy wave, decorations.
pub fn setup_game(world: &mut World, rng: &mut ChaCha8Rng, next_uid: &mut u64) {
    spawn_player(world, next_uid);
    spawn_enemy_wave(world, rng, INITIAL_ENEMY_COUNT, next_uid);
    for _ in 0..DECORATION_COUNT {
        spawn_decoration(world, rng, next_uid);
    }
}

/// Spawn the player at the field center with full hit points.
pub fn spawn_player(world: &mut World, next_uid: &mut u64) -> hecs::Entity {
    world.spawn((
        EntityKind::Player,
        FIELD_CENTER,
        Physics::new(Velocity::default(), PLAYER_FRICTION),
        Health::new(PLAYER_START_HP),
        Active::default(),
        alloc_uid(next_uid),
        default_shape(EntityKind::Player),
    ))
}

/// Spawn a wave of enemies at random field positions.
pub fn spawn_enemy_wave(world: &mut World, rng: &mut ChaCha8Rng, count: usize, next_uid: &mut u64) {
    for _ in 0..count {
        spawn_enemy(world, rng, next_uid);
    }
}

/// Spawn a single enemy with a random position and drift velocity.
pub fn spawn_enemy(world: &mut World, rng: &mut ChaCha8Rng, next_uid: &mut u64) -> hecs::Entity {
    let position = Position::new(
        rng.gen::<f32>() * FIELD_WIDTH,
        rng.gen::<f32>() * FIELD_HEIGHT,
    );
    let velocity = Velocity::new(
        (rng.gen::<f32>() - 0.5) * ENEMY_SPAWN_SPEED,
        (rng.gen::<f32>() - 0.5) * ENEMY_SPAWN_SPEED,
    );

    world.spawn((
        EntityKind::Enemy,
        position,
        Physics::new(velocity, ENEMY_FRICTION),
        Active::default(),
        alloc_uid(next_uid),
        default_shape(EntityKind::Enemy),
    ))
}

/// Spawn a bullet heading along `direction` from `start`.
pub fn spawn_bullet(
    world: &mut World,
    start: Position,
    direction: Velocity,
    next_uid: &mut u64,
) -> hecs::Entity {
    world.spawn((
        EntityKind::Bullet,
        start,
        Physics::non_bouncing(direction.normalized().scaled(BULLET_SPEED), BULLET_FRICTION),
        Active::default(),
        alloc_uid(next_uid),
        default_shape(EntityKind::Bullet),
    ))
}

/// Spawn a static decoration. Decorations carry no physics state, so the
/// stepper and collision sweeps never touch them.
pub fn spawn_decoration(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_uid: &mut u64,
) -> hecs::Entity {
    let position = Position::new(
        rng.gen::<f32>() * FIELD_WIDTH,
        rng.gen::<f32>() * FIELD_HEIGHT,
    );

    world.spawn((
        EntityKind::Decoration,
        position,
        Active::default(),
        alloc_uid(next_uid),
        default_shape(EntityKind::Decoration),
    ))
}

fn alloc_uid(next_uid: &mut u64) -> StableId {
    let id = StableId(*next_uid);
    *next_uid += 1;
    id
}
