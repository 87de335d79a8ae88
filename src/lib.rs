//! Circle Chase - a keyboard-driven circle shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, firing, spawning, collisions)
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Player preferences and variant selection
//! - `highscores`: Local leaderboard

pub mod error;
pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::RenderError;
pub use highscores::HighScores;
pub use settings::{Settings, Toggle, Variant};

/// Game configuration constants
pub mod consts {
    /// Nominal frame length used by the headless runner (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Default canvas size (pixels) when the host doesn't provide one
    pub const DEFAULT_CANVAS_WIDTH: f32 = 800.0;
    pub const DEFAULT_CANVAS_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 30.0;
    /// Units per tick contributed by each held movement key
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const STARTING_HEALTH: i32 = 100;
    /// Health lost per enemy contact
    pub const CONTACT_DAMAGE: i32 = 10;

    /// Projectile defaults
    pub const PARTICLE_RADIUS: f32 = 10.0;
    pub const PARTICLE_LIFESPAN: u32 = 100;
    /// Minimum milliseconds between shots
    pub const FIRE_COOLDOWN_MS: f64 = 100.0;
    /// Projectile speed in the shooter-only demo
    pub const SHOOTER_PROJECTILE_SPEED: f32 = 2.0;
    /// Projectile speed in the arena
    pub const ARENA_PROJECTILE_SPEED: f32 = 5.0;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 15.0;
    pub const ENEMY_SPEED: f32 = 2.0;
    /// Milliseconds between enemy spawns
    pub const SPAWN_INTERVAL_MS: f64 = 400.0;
}
