//! Keyboard movement resolver
//!
//! Tracks which movement keys are held and folds them into one velocity.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::vector::{DOWN, LEFT, RIGHT, UP};

/// A movement key (W/A/S/D)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MoveKey {
    Up,
    Left,
    Down,
    Right,
}

impl MoveKey {
    /// Map a `KeyboardEvent.key` value to a movement key (case-insensitive)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "w" | "W" => Some(MoveKey::Up),
            "a" | "A" => Some(MoveKey::Left),
            "s" | "S" => Some(MoveKey::Down),
            "d" | "D" => Some(MoveKey::Right),
            _ => None,
        }
    }

    /// Screen-space unit vector for this key
    pub fn direction(self) -> Vec2 {
        match self {
            MoveKey::Up => UP,
            MoveKey::Left => LEFT,
            MoveKey::Down => DOWN,
            MoveKey::Right => RIGHT,
        }
    }
}

/// Held movement keys and the velocity they produce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputResolver {
    held: BTreeSet<MoveKey>,
    speed: f32,
    velocity: Vec2,
}

impl InputResolver {
    pub fn new(speed: f32) -> Self {
        Self {
            held: BTreeSet::new(),
            speed,
            velocity: Vec2::ZERO,
        }
    }

    /// Key went down; returns the recomputed velocity
    pub fn press(&mut self, key: MoveKey) -> Vec2 {
        self.held.insert(key);
        self.recompute()
    }

    /// Key went up; returns the recomputed velocity
    pub fn release(&mut self, key: MoveKey) -> Vec2 {
        self.held.remove(&key);
        self.recompute()
    }

    /// Drop every held key (focus loss, restart)
    pub fn clear(&mut self) -> Vec2 {
        self.held.clear();
        self.recompute()
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    // Diagonals are intentionally left unnormalized (W+D moves at 3√2).
    fn recompute(&mut self) -> Vec2 {
        self.velocity = self
            .held
            .iter()
            .fold(Vec2::ZERO, |acc, key| acc + key.direction() * self.speed);
        self.velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_is_case_insensitive() {
        assert_eq!(MoveKey::from_key("w"), Some(MoveKey::Up));
        assert_eq!(MoveKey::from_key("D"), Some(MoveKey::Right));
        assert_eq!(MoveKey::from_key(" "), None);
        assert_eq!(MoveKey::from_key("ArrowUp"), None);
    }

    #[test]
    fn test_w_then_d_is_unnormalized_diagonal() {
        let mut input = InputResolver::new(3.0);
        input.press(MoveKey::Up);
        let vel = input.press(MoveKey::Right);
        assert_eq!(vel, Vec2::new(3.0, -3.0));
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut input = InputResolver::new(3.0);
        input.press(MoveKey::Left);
        let vel = input.press(MoveKey::Right);
        assert_eq!(vel, Vec2::ZERO);
    }

    #[test]
    fn test_release_and_repeat_press() {
        let mut input = InputResolver::new(3.0);
        input.press(MoveKey::Down);
        // Key repeat fires keydown again without a keyup
        input.press(MoveKey::Down);
        assert_eq!(input.velocity(), Vec2::new(0.0, 3.0));

        // One release is enough no matter how often the key repeated
        let vel = input.release(MoveKey::Down);
        assert_eq!(vel, Vec2::ZERO);
        assert_eq!(input.press(MoveKey::Left), Vec2::new(-3.0, 0.0));
    }

    #[test]
    fn test_clear() {
        let mut input = InputResolver::new(3.0);
        input.press(MoveKey::Up);
        input.press(MoveKey::Left);
        assert_eq!(input.clear(), Vec2::ZERO);
    }
}
