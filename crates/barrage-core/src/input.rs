//! Input snapshot threaded into each simulation tick.
//!
//! The driving loop owns the snapshot's lifecycle: it applies key events,
//! hands a reference to the tick, and calls `end_frame` afterwards. Systems
//! never poll a global input source.

use std::collections::HashSet;

/// Logical keys the simulation reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Space,
    Escape,
}

/// Pressed / just-pressed key sets for one frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pressed: HashSet<Key>,
    just_pressed: HashSet<Key>,
}

impl InputState {
    /// Record a key-down event. The key reads as just-pressed until
    /// `end_frame`, and as pressed until released.
    pub fn press(&mut self, key: Key) {
        if self.pressed.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    /// Record a key-up event.
    pub fn release(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    /// Clear the just-pressed set at the end of a frame.
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    /// Raw movement axes from the held direction keys: (-1|0|1, -1|0|1),
    /// screen-oriented (up is negative y).
    pub fn movement_axes(&self) -> (f32, f32) {
        let mut x = 0.0;
        let mut y = 0.0;
        if self.is_pressed(Key::Left) {
            x -= 1.0;
        }
        if self.is_pressed(Key::Right) {
            x += 1.0;
        }
        if self.is_pressed(Key::Up) {
            y -= 1.0;
        }
        if self.is_pressed(Key::Down) {
            y += 1.0;
        }
        (x, y)
    }
}
