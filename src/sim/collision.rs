//! Collision detection and response
//!
//! Everything is a circle, so a contact is just a centre distance below the
//! sum of the radii. Two passes run per tick, kills before hits: an enemy
//! that a particle has already destroyed can no longer hurt the player.

use super::state::{Enemy, Entity, Particle, Player};
use super::vector::circles_overlap;

/// A particle destroyed an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kill {
    pub enemy_id: u32,
    pub particle_id: u32,
}

/// Result of one tick's collision passes
#[derive(Debug, Clone, Default)]
pub struct CollisionResult {
    /// Enemies destroyed by particles
    pub kills: Vec<Kill>,
    /// IDs of enemies that touched the player
    pub hits: Vec<u32>,
}

/// Particle vs enemy pass
///
/// Every overlapping pair kills the enemy and zeroes the particle's lifespan.
/// Liveness of a particle is sampled when the pass reaches it, so a particle
/// sitting on two enemies takes out both.
pub fn resolve_kills(particles: &mut [Particle], enemies: &mut [Enemy]) -> Vec<Kill> {
    let mut kills = Vec::new();

    for particle in particles.iter_mut().filter(|p| p.is_alive()) {
        for enemy in enemies.iter_mut() {
            if !enemy.is_alive() {
                continue;
            }
            if circles_overlap(particle.pos, particle.radius, enemy.pos, enemy.radius) {
                enemy.alive = false;
                particle.expire();
                kills.push(Kill {
                    enemy_id: enemy.id,
                    particle_id: particle.id,
                });
            }
        }
    }

    kills
}

/// Enemy vs player pass; returns the IDs of enemies that made contact
pub fn resolve_hits(player: &Player, enemies: &mut [Enemy]) -> Vec<u32> {
    let mut hits = Vec::new();

    for enemy in enemies.iter_mut().filter(|e| e.is_alive()) {
        if circles_overlap(player.pos, player.radius, enemy.pos, enemy.radius) {
            enemy.alive = false;
            hits.push(enemy.id);
        }
    }

    hits
}

/// Run both passes in order and drop the dead enemies
pub fn resolve_collisions(
    player: &Player,
    particles: &mut [Particle],
    enemies: &mut Vec<Enemy>,
) -> CollisionResult {
    let kills = resolve_kills(particles, enemies);
    let hits = resolve_hits(player, enemies);
    enemies.retain(|e| e.is_alive());
    CollisionResult { kills, hits }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn particle(id: u32, pos: Vec2, radius: f32) -> Particle {
        Particle {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            lifespan: 100,
        }
    }

    fn enemy(id: u32, pos: Vec2, radius: f32) -> Enemy {
        Enemy {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            alive: true,
        }
    }

    #[test]
    fn test_particle_kills_overlapping_enemy() {
        let mut particles = vec![particle(1, Vec2::ZERO, 2.0)];
        let mut enemies = vec![enemy(2, Vec2::new(3.0, 0.0), 2.0)];

        let kills = resolve_kills(&mut particles, &mut enemies);
        assert_eq!(
            kills,
            vec![Kill {
                enemy_id: 2,
                particle_id: 1
            }]
        );
        assert!(!enemies[0].alive);
        assert_eq!(particles[0].lifespan, 0);
    }

    #[test]
    fn test_touching_is_not_a_hit() {
        let mut particles = vec![particle(1, Vec2::ZERO, 2.0)];
        let mut enemies = vec![enemy(2, Vec2::new(4.0, 0.0), 2.0)];

        assert!(resolve_kills(&mut particles, &mut enemies).is_empty());
        assert!(enemies[0].alive);
    }

    #[test]
    fn test_particle_kills_every_enemy_it_overlaps() {
        let mut particles = vec![particle(1, Vec2::ZERO, 5.0)];
        let mut enemies = vec![
            enemy(2, Vec2::new(3.0, 0.0), 2.0),
            enemy(3, Vec2::new(-3.0, 0.0), 2.0),
        ];

        let kills = resolve_kills(&mut particles, &mut enemies);
        assert_eq!(
            kills,
            vec![
                Kill {
                    enemy_id: 2,
                    particle_id: 1
                },
                Kill {
                    enemy_id: 3,
                    particle_id: 1
                },
            ]
        );
        assert!(enemies.iter().all(|e| !e.alive));
        assert_eq!(particles[0].lifespan, 0);
    }

    #[test]
    fn test_enemy_is_only_killed_once() {
        let mut particles = vec![
            particle(1, Vec2::ZERO, 5.0),
            particle(4, Vec2::new(1.0, 0.0), 5.0),
        ];
        let mut enemies = vec![enemy(2, Vec2::new(3.0, 0.0), 2.0)];

        let kills = resolve_kills(&mut particles, &mut enemies);
        assert_eq!(kills.len(), 1);
        assert_eq!(kills[0].particle_id, 1);
        // The second particle found nothing left to hit
        assert_eq!(particles[1].lifespan, 100);
    }

    #[test]
    fn test_expired_particle_is_inert() {
        let mut particles = vec![particle(1, Vec2::ZERO, 5.0)];
        particles[0].lifespan = 0;
        let mut enemies = vec![enemy(2, Vec2::new(3.0, 0.0), 2.0)];

        assert!(resolve_kills(&mut particles, &mut enemies).is_empty());
        assert!(enemies[0].alive);
    }

    #[test]
    fn test_player_hit() {
        let player = Player::new(Vec2::new(100.0, 100.0), 30.0);
        let mut enemies = vec![
            enemy(1, Vec2::new(140.0, 100.0), 15.0),
            enemy(2, Vec2::new(300.0, 100.0), 15.0),
        ];

        let hits = resolve_hits(&player, &mut enemies);
        assert_eq!(hits, vec![1]);
        assert!(!enemies[0].alive);
        assert!(enemies[1].alive);
    }

    #[test]
    fn test_kill_takes_precedence_over_hit() {
        let player = Player::new(Vec2::new(100.0, 100.0), 30.0);
        let mut particles = vec![particle(1, Vec2::new(130.0, 100.0), 10.0)];
        let mut enemies = vec![enemy(2, Vec2::new(140.0, 100.0), 15.0)];

        let result = resolve_collisions(&player, &mut particles, &mut enemies);
        assert_eq!(result.kills.len(), 1);
        assert!(result.hits.is_empty());
        assert!(enemies.is_empty());
    }
}
