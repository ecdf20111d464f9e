//! Collision resolution system.
//!
//! Two independent sweeps per tick, both against distance thresholds:
//! bullet vs. enemy (`< BULLET_HIT_RADIUS`, first hit destroys both and
//! ends that bullet's scan) and enemy vs. player (`< PLAYER_HIT_RADIUS`,
//! damages the player and destroys the enemy, or punish-teleports a
//! player without health to the field center).
//!
//! Both sweeps batch across the collision pool above their serial
//! thresholds. Liveness is the one field shared across batch boundaries:
//! each pair check reads the flag at its own evaluation and destruction is
//! an idempotent atomic swap, so concurrent destroys of the same enemy
//! resolve without a precedence guarantee. The punish teleport is
//! requested by worker batches through a flag and applied by the calling
//! thread after the join, keeping position writes single-threaded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use hecs::{Entity, World};

use barrage_core::components::{Active, Health};
use barrage_core::constants::*;
use barrage_core::kind::EntityKind;
use barrage_core::types::Position;

use crate::pool::WorkerPool;

/// Position plus shared liveness flag, snapshotted for one tick's sweeps.
struct Contact<'a> {
    pos: Position,
    active: &'a Active,
}

/// Owns the collision worker pool and per-check timing.
pub struct CollisionResolver {
    pool: WorkerPool,
    last_check: Duration,
}

impl CollisionResolver {
    /// The collision pool is half the primary pool's size, floored at two.
    pub fn new(primary_workers: usize) -> Self {
        Self {
            pool: WorkerPool::secondary("collision", primary_workers),
            last_check: Duration::ZERO,
        }
    }

    /// Elapsed wall time of the most recent check.
    pub fn last_check_time(&self) -> Duration {
        self.last_check
    }

    /// Run both collision sweeps. No-op when there is no player.
    pub fn run(&mut self, world: &mut World) {
        let start = Instant::now();
        let punish = AtomicBool::new(false);
        let mut player_entity: Option<Entity> = None;

        {
            let mut query = world.query::<(&EntityKind, &Position, &Active, Option<&Health>)>();

            let mut player: Option<(Position, Option<&Health>)> = None;
            let mut bullets: Vec<Contact> = Vec::new();
            let mut enemies: Vec<Contact> = Vec::new();

            for (entity, (kind, pos, active, health)) in query.iter() {
                if !active.is_active() {
                    continue;
                }
                match kind {
                    EntityKind::Player => {
                        player_entity = Some(entity);
                        player = Some((*pos, health));
                    }
                    EntityKind::Bullet => bullets.push(Contact {
                        pos: *pos,
                        active,
                    }),
                    EntityKind::Enemy => enemies.push(Contact {
                        pos: *pos,
                        active,
                    }),
                    _ => {}
                }
            }

            let Some((player_pos, player_health)) = player else {
                self.last_check = start.elapsed();
                return;
            };

            if !bullets.is_empty() && !enemies.is_empty() {
                self.sweep_bullets(&bullets, &enemies);
            }
            self.sweep_enemies(player_pos, player_health, &enemies, &punish);
        }

        if punish.load(Ordering::Acquire) {
            if let Some(entity) = player_entity {
                if let Ok(mut pos) = world.get::<&mut Position>(entity) {
                    *pos = FIELD_CENTER;
                }
            }
        }

        self.last_check = start.elapsed();
    }

    fn sweep_bullets(&self, bullets: &[Contact], enemies: &[Contact]) {
        if bullets.len() < BULLET_SERIAL_THRESHOLD {
            for bullet in bullets {
                check_bullet(bullet, enemies);
            }
        } else {
            self.pool.dispatch(bullets, |chunk| {
                for bullet in chunk {
                    check_bullet(bullet, enemies);
                }
            });
        }
    }

    fn sweep_enemies(
        &self,
        player_pos: Position,
        player_health: Option<&Health>,
        enemies: &[Contact],
        punish: &AtomicBool,
    ) {
        if enemies.len() < ENEMY_SERIAL_THRESHOLD {
            for enemy in enemies {
                check_enemy(&player_pos, player_health, enemy, punish);
            }
        } else {
            self.pool.dispatch(enemies, |chunk| {
                for enemy in chunk {
                    check_enemy(&player_pos, player_health, enemy, punish);
                }
            });
        }
    }
}

/// First-hit-wins: destroy bullet and enemy on the first close contact,
/// then stop scanning this bullet.
fn check_bullet(bullet: &Contact, enemies: &[Contact]) {
    if !bullet.active.is_active() {
        return;
    }
    for enemy in enemies {
        if !enemy.active.is_active() {
            continue;
        }
        if bullet.pos.distance_to(&enemy.pos) < BULLET_HIT_RADIUS {
            bullet.active.destroy();
            enemy.active.destroy();
            break;
        }
    }
}

/// A close enemy damages the player and dies, or requests the punish
/// teleport when the player carries no health attribute.
fn check_enemy(
    player_pos: &Position,
    player_health: Option<&Health>,
    enemy: &Contact,
    punish: &AtomicBool,
) {
    if !enemy.active.is_active() {
        return;
    }
    if player_pos.distance_to(&enemy.pos) < PLAYER_HIT_RADIUS {
        match player_health {
            Some(health) => {
                health.take_damage(1);
                enemy.active.destroy();
            }
            None => punish.store(true, Ordering::Release),
        }
    }
}
