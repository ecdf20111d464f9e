//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 2D position in playfield space (units, screen-oriented: y grows downward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// 2D velocity in playfield space (units/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Component-wise linear interpolation: u=0 yields `self`, u=1 yields `other`.
    pub fn lerp(&self, other: &Position, u: f32) -> Position {
        Position {
            x: (1.0 - u) * self.x + u * other.x,
            y: (1.0 - u) * self.y + u * other.y,
        }
    }

    /// Whether both components are finite (no NaN/∞).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Velocity {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Speed magnitude (units/s).
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit-length copy, or zero velocity if the magnitude is negligible.
    pub fn normalized(&self) -> Velocity {
        let mag = self.magnitude();
        if mag < 1e-6 {
            return Velocity::default();
        }
        Velocity::new(self.x / mag, self.y / mag)
    }

    /// Scaled copy.
    pub fn scaled(&self, factor: f32) -> Velocity {
        Velocity::new(self.x * factor, self.y * factor)
    }

    /// Whether both components are finite (no NaN/∞).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f32 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
