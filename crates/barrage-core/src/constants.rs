//! Simulation constants and tuning parameters.

use crate::types::Position;

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Playfield ---

/// Playfield width in units.
pub const FIELD_WIDTH: f32 = 800.0;

/// Playfield height in units.
pub const FIELD_HEIGHT: f32 = 600.0;

/// Bouncing entities reflect at [0, FIELD - ENTITY_MARGIN] on each axis.
pub const ENTITY_MARGIN: f32 = 15.0;

/// The player is clamped slightly tighter than other entities.
pub const PLAYER_MARGIN: f32 = 20.0;

/// Playfield center — player spawn point and punish-teleport target.
pub const FIELD_CENTER: Position = Position::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0);

/// Bullets are deleted once this far outside the playfield.
pub const BULLET_OOB_MARGIN: f32 = 50.0;

// --- Movement ---

/// Player movement speed when a direction key is held (units/s).
pub const PLAYER_SPEED: f32 = 200.0;

/// Enemy homing speed toward the player (units/s).
pub const ENEMY_CHASE_SPEED: f32 = 60.0;

/// Enemies stop steering inside this range of the player.
pub const ENEMY_CHASE_DEADZONE: f32 = 1.0;

/// Bullet muzzle speed (units/s).
pub const BULLET_SPEED: f32 = 300.0;

/// Bullets spawn this far from the player, along the fire direction.
pub const BULLET_SPAWN_OFFSET: f32 = 20.0;

/// Half-range of random enemy spawn velocity per axis (units/s).
pub const ENEMY_SPAWN_SPEED: f32 = 100.0;

// --- Friction (velocity multiplier applied once per tick) ---

pub const PLAYER_FRICTION: f32 = 0.95;
pub const ENEMY_FRICTION: f32 = 0.98;
pub const BULLET_FRICTION: f32 = 1.0;

// --- Collision ---

/// Bullet/enemy proximity threshold (strict `<`).
pub const BULLET_HIT_RADIUS: f32 = 20.0;

/// Enemy/player proximity threshold (strict `<`).
pub const PLAYER_HIT_RADIUS: f32 = 25.0;

// --- Parallelism ---

/// Below this many physics entities the step runs on the calling thread.
pub const PHYSICS_SERIAL_THRESHOLD: usize = 10;

/// Below this many bullets the bullet/enemy sweep runs serially.
pub const BULLET_SERIAL_THRESHOLD: usize = 5;

/// Below this many enemies the enemy/player sweep runs serially.
pub const ENEMY_SERIAL_THRESHOLD: usize = 10;

/// Worker pools never shrink below this many threads.
pub const POOL_MIN_WORKERS: usize = 2;

// --- Spawning ---

/// Enemies present at mission start.
pub const INITIAL_ENEMY_COUNT: usize = 6;

/// Enemies spawned per wave after the initial one.
pub const ENEMIES_PER_WAVE: usize = 2;

/// Seconds between enemy waves.
pub const WAVE_INTERVAL_SECS: f32 = 2.0;

/// Static decorations placed at mission start.
pub const DECORATION_COUNT: usize = 5;

/// Seconds between automatic bullet shots.
pub const BULLET_FIRE_INTERVAL_SECS: f32 = 1.0;

/// Player starting hit points.
pub const PLAYER_START_HP: i32 = 5;

// --- Recording ---

/// Default seconds between recorded keyframes.
pub const DEFAULT_SAMPLE_INTERVAL_SECS: f32 = 0.2;

/// Directory recordings are written to and listed from.
pub const RECORDINGS_DIR: &str = "recordings";
