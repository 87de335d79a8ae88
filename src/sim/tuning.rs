//! Data-driven gameplay constants
//!
//! The three demo flavours share one simulation; a `Tuning` switches
//! features on and sets their speeds.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which demo flavour to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Move the circle around, nothing else
    Movement,
    /// Movement plus mouse-aimed projectiles
    Shooter,
    /// Projectiles, chasing enemies, score and health
    #[default]
    Arena,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Movement => "Movement",
            Variant::Shooter => "Shooter",
            Variant::Arena => "Arena",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "movement" | "move" => Some(Variant::Movement),
            "shooter" | "shoot" => Some(Variant::Shooter),
            "arena" => Some(Variant::Arena),
            _ => None,
        }
    }
}

/// Runtime gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub player_radius: f32,
    pub player_speed: f32,
    pub starting_health: i32,
    pub contact_damage: i32,

    /// Whether the fire input spawns projectiles
    pub projectiles_enabled: bool,
    pub projectile_speed: f32,
    pub particle_radius: f32,
    pub particle_lifespan: u32,
    pub fire_cooldown_ms: f64,

    /// Whether enemies spawn (and with them collisions, score and game over)
    pub enemies_enabled: bool,
    pub enemy_radius: f32,
    pub enemy_speed: f32,
    pub spawn_interval_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

impl Tuning {
    pub fn for_variant(variant: Variant) -> Self {
        let base = Self {
            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            starting_health: STARTING_HEALTH,
            contact_damage: CONTACT_DAMAGE,
            projectiles_enabled: true,
            projectile_speed: ARENA_PROJECTILE_SPEED,
            particle_radius: PARTICLE_RADIUS,
            particle_lifespan: PARTICLE_LIFESPAN,
            fire_cooldown_ms: FIRE_COOLDOWN_MS,
            enemies_enabled: true,
            enemy_radius: ENEMY_RADIUS,
            enemy_speed: ENEMY_SPEED,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
        };

        match variant {
            Variant::Movement => Self {
                projectiles_enabled: false,
                enemies_enabled: false,
                ..base
            },
            Variant::Shooter => Self {
                projectile_speed: SHOOTER_PROJECTILE_SPEED,
                enemies_enabled: false,
                ..base
            },
            Variant::Arena => base,
        }
    }

    /// Health and score only change when there is something to fight
    pub fn has_combat(&self) -> bool {
        self.enemies_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_from_str() {
        assert_eq!(Variant::from_str("ARENA"), Some(Variant::Arena));
        assert_eq!(Variant::from_str("shoot"), Some(Variant::Shooter));
        assert_eq!(Variant::from_str("pong"), None);
    }

    #[test]
    fn test_variant_presets() {
        let movement = Tuning::for_variant(Variant::Movement);
        assert!(!movement.projectiles_enabled);
        assert!(!movement.enemies_enabled);

        let shooter = Tuning::for_variant(Variant::Shooter);
        assert!(shooter.projectiles_enabled);
        assert_eq!(shooter.projectile_speed, 2.0);

        let arena = Tuning::default();
        assert!(arena.enemies_enabled);
        assert_eq!(arena.projectile_speed, 5.0);
        assert_eq!(arena.spawn_interval_ms, 400.0);
    }

    #[test]
    fn test_only_arena_has_combat() {
        assert!(!Tuning::for_variant(Variant::Movement).has_combat());
        assert!(!Tuning::for_variant(Variant::Shooter).has_combat());
        assert!(Tuning::for_variant(Variant::Arena).has_combat());
    }
}
