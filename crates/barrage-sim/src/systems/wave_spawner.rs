//! Wave spawning system — drops fresh enemies in at a fixed cadence.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use barrage_core::constants::{ENEMIES_PER_WAVE, WAVE_INTERVAL_SECS};

/// Accumulated time since the last wave.
#[derive(Debug, Clone, Copy, Default)]
pub struct WaveTimer {
    elapsed: f32,
}

/// Spawn a wave whenever the interval elapses.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    timer: &mut WaveTimer,
    next_uid: &mut u64,
    dt: f32,
) {
    timer.elapsed += dt;
    if timer.elapsed < WAVE_INTERVAL_SECS {
        return;
    }
    timer.elapsed = 0.0;
    crate::world_setup::spawn_enemy_wave(world, rng, ENEMIES_PER_WAVE, next_uid);
}
