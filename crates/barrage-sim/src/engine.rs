//! Simulation engine — the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, runs all systems in a fixed
//! order each tick, and owns the two worker pools through its stepper and
//! resolver. Completely headless, enabling deterministic testing.
//!
//! Ordering guarantee per tick: all physics updates complete before any
//! collision check begins, and all collision checks complete before the
//! next tick's physics. Both hot paths block on their worker pools, so a
//! tick is observably atomic from the caller's side.

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use barrage_core::components::Health;
use barrage_core::constants::DT;
use barrage_core::input::InputState;
use barrage_core::kind::EntityKind;
use barrage_core::types::SimTime;

use crate::systems;
use crate::systems::bullet_fire::FireTimer;
use crate::systems::collision::CollisionResolver;
use crate::systems::physics::PhysicsStepper;
use crate::systems::wave_spawner::WaveTimer;
use crate::world_setup;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// Coarse run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    /// The player ran out of hit points; ticks become no-ops.
    GameOver,
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    stepper: PhysicsStepper,
    resolver: CollisionResolver,
    next_uid: u64,
    wave_timer: WaveTimer,
    fire_timer: FireTimer,
    despawn_buffer: Vec<hecs::Entity>,
}

impl SimulationEngine {
    /// Create a new engine with a populated world.
    pub fn new(config: SimConfig) -> Self {
        let stepper = PhysicsStepper::new();
        let resolver = CollisionResolver::new(stepper.pool_workers());
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut world = World::new();
        let mut next_uid = 0;
        world_setup::setup_game(&mut world, &mut rng, &mut next_uid);

        Self {
            world,
            time: SimTime::default(),
            phase: GamePhase::Running,
            rng,
            stepper,
            resolver,
            next_uid,
            wave_timer: WaveTimer::default(),
            fire_timer: FireTimer::default(),
            despawn_buffer: Vec::new(),
        }
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self, input: &InputState) {
        if self.phase != GamePhase::Running {
            return;
        }

        systems::behavior::run(&mut self.world, input);
        self.stepper.run(&mut self.world, DT);
        self.resolver.run(&mut self.world);
        systems::wave_spawner::run(
            &mut self.world,
            &mut self.rng,
            &mut self.wave_timer,
            &mut self.next_uid,
            DT,
        );
        systems::bullet_fire::run(&mut self.world, &mut self.fire_timer, &mut self.next_uid, DT);
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        if self.player_defeated() {
            tracing::info!(tick = self.time.tick, "player defeated, run over");
            self.phase = GamePhase::GameOver;
        }

        self.time.advance();
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Wall time of the most recent physics step.
    pub fn physics_step_time(&self) -> std::time::Duration {
        self.stepper.last_step_time()
    }

    /// Wall time of the most recent collision check.
    pub fn collision_check_time(&self) -> std::time::Duration {
        self.resolver.last_check_time()
    }

    /// Remaining player hit points, if a player with health exists.
    pub fn player_hp(&self) -> Option<i32> {
        self.world
            .query::<(&EntityKind, &Health)>()
            .iter()
            .find(|(_, (kind, _))| **kind == EntityKind::Player)
            .map(|(_, (_, health))| health.hp())
    }

    fn player_defeated(&self) -> bool {
        matches!(self.player_hp(), Some(hp) if hp <= 0)
    }

    /// Get a mutable reference to the world (for tests).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
