//! Per-frame simulation tick
//!
//! Advances the game by exactly one step. The host calls `tick` once per
//! animation frame; velocities are in pixels per tick.

use glam::Vec2;
use rand::Rng;

use super::collision::resolve_collisions;
use super::state::{Enemy, Entity, GameEvent, GamePhase, GameState, Particle};
use super::vector::aim_direction;

/// Input sampled for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Wall-clock sample in milliseconds since the run started
    pub now_ms: f64,
    /// Fire request (Space)
    pub fire: bool,
    /// Pointer position in canvas pixels, if the pointer has been seen
    pub aim: Option<Vec2>,
}

/// Advance the game state by one tick
///
/// Order: fire, collisions (kills then hits), spawning, enemy movement,
/// particle movement and expiry, player clamp-and-move, game-over check.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;
    state.now_ms = input.now_ms;

    if input.fire && state.tuning.projectiles_enabled {
        try_fire(state, input.aim);
    }

    if state.tuning.enemies_enabled {
        let result =
            resolve_collisions(&state.player, &mut state.particles, &mut state.enemies);

        for kill in result.kills {
            state.score += 1;
            state.events.push(GameEvent::EnemyKilled {
                enemy_id: kill.enemy_id,
                particle_id: kill.particle_id,
            });
        }

        for enemy_id in result.hits {
            state.health -= state.tuning.contact_damage;
            state.events.push(GameEvent::PlayerHit {
                enemy_id,
                health: state.health,
            });
        }

        spawn_enemies(state);

        let target = state.player.pos;
        let speed = state.tuning.enemy_speed;
        for enemy in &mut state.enemies {
            enemy.chase(target, speed);
        }
    }

    for particle in &mut state.particles {
        particle.advance();
    }
    state.particles.retain(|p| p.is_alive());

    let bounds = state.bounds;
    state.player.clamp_and_move(bounds);

    if state.tuning.enemies_enabled && state.health <= 0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            score: state.score,
            ticks: state.time_ticks,
        });
        log::info!(
            "Game over: score {} after {} ticks",
            state.score,
            state.time_ticks
        );
    }
}

/// Spawn a particle toward `aim` if the fire cooldown allows it
///
/// Returns true if a particle was spawned. A shot with no usable direction
/// (pointer unknown or exactly on the player) is dropped without starting
/// the cooldown.
pub fn try_fire(state: &mut GameState, aim: Option<Vec2>) -> bool {
    let now = state.now_ms;
    if !state.fire_cooldown.is_ready(now) {
        return false;
    }

    let Some(aim) = aim else {
        log::debug!("Fire ignored: pointer position unknown");
        return false;
    };
    let origin = state.player.pos;
    let Some(dir) = aim_direction(origin, aim) else {
        log::debug!("Fire ignored: pointer is on the player");
        return false;
    };

    state.fire_cooldown.try_trigger(now);

    let id = state.next_entity_id();
    let vel = dir * state.tuning.projectile_speed;
    state.particles.push(Particle {
        id,
        pos: origin,
        vel,
        radius: state.tuning.particle_radius,
        lifespan: state.tuning.particle_lifespan,
    });
    state.events.push(GameEvent::ParticleFired {
        id,
        pos: origin,
        vel,
    });
    true
}

/// Spawn an enemy at a random canvas position if the spawn interval elapsed
pub fn spawn_enemies(state: &mut GameState) {
    if !state.spawn_cooldown.try_trigger(state.now_ms) {
        return;
    }

    let x = state.rng.random::<f32>() * state.bounds.width;
    let y = state.rng.random::<f32>() * state.bounds.height;
    let pos = Vec2::new(x, y);

    let id = state.next_entity_id();
    state.enemies.push(Enemy {
        id,
        pos,
        vel: Vec2::ZERO,
        radius: state.tuning.enemy_radius,
        alive: true,
    });
    state.events.push(GameEvent::EnemySpawned { id, pos });
    log::debug!("Enemy {} spawned at ({:.0}, {:.0})", id, x, y);
}
