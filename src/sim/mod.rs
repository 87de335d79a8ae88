//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per tick, time only from the sampled clock in `TickInput`
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod cooldown;
pub mod input;
pub mod state;
pub mod tick;
pub mod tuning;
pub mod vector;

pub use collision::{CollisionResult, Kill, resolve_collisions, resolve_hits, resolve_kills};
pub use cooldown::Cooldown;
pub use input::{InputResolver, MoveKey};
pub use state::{Body, Bounds, Enemy, Entity, EntityKind, GameEvent, GamePhase, GameState, Particle, Player};
pub use tick::{TickInput, spawn_enemies, tick, try_fire};
pub use tuning::{Tuning, Variant};
pub use vector::{aim_direction, circles_overlap, seek};
