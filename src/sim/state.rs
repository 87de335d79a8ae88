//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in `GameState`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::cooldown::Cooldown;
use super::input::{InputResolver, MoveKey};
use super::tuning::Tuning;
use super::vector::seek;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended (terminal)
    GameOver,
}

/// The closed set of things that live in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Particle,
    Enemy,
}

/// What the renderer needs to draw an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub radius: f32,
}

/// Capabilities shared by every entity
pub trait Entity {
    fn kind(&self) -> EntityKind;
    fn pos(&self) -> Vec2;
    fn radius(&self) -> f32;
    /// False once the entity should be dropped from its collection
    fn is_alive(&self) -> bool;

    fn body(&self) -> Body {
        Body {
            kind: self.kind(),
            pos: self.pos(),
            radius: self.radius(),
        }
    }
}

/// Canvas extents in pixels (origin top-left, +y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The keyboard-driven circle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Player {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
        }
    }

    /// Clamp against the canvas edges, then apply velocity
    ///
    /// Clamping looks at the position before the move. A velocity component
    /// pushing further out of the canvas is zeroed; the other axis is left
    /// alone so the circle can slide along a wall.
    pub fn clamp_and_move(&mut self, bounds: Bounds) {
        let r = self.radius;

        if self.pos.x + r >= bounds.width {
            self.pos.x = bounds.width - r;
            if self.vel.x > 0.0 {
                self.vel.x = 0.0;
            }
        } else if self.pos.x - r <= 0.0 {
            self.pos.x = r;
            if self.vel.x < 0.0 {
                self.vel.x = 0.0;
            }
        }

        if self.pos.y + r >= bounds.height {
            self.pos.y = bounds.height - r;
            if self.vel.y > 0.0 {
                self.vel.y = 0.0;
            }
        } else if self.pos.y - r <= 0.0 {
            self.pos.y = r;
            if self.vel.y < 0.0 {
                self.vel.y = 0.0;
            }
        }

        self.pos += self.vel;
    }
}

impl Entity for Player {
    fn kind(&self) -> EntityKind {
        EntityKind::Player
    }

    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn is_alive(&self) -> bool {
        true
    }
}

/// A projectile fired by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Ticks left before the particle expires
    pub lifespan: u32,
}

impl Particle {
    /// Move one tick and burn one tick of lifespan
    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.lifespan = self.lifespan.saturating_sub(1);
    }

    /// Expire immediately (consumed by a hit)
    pub fn expire(&mut self) {
        self.lifespan = 0;
    }
}

impl Entity for Particle {
    fn kind(&self) -> EntityKind {
        EntityKind::Particle
    }

    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn is_alive(&self) -> bool {
        self.lifespan > 0
    }
}

/// An enemy that homes in on the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub alive: bool,
}

impl Enemy {
    /// Steer straight at `target` and move one tick
    pub fn chase(&mut self, target: Vec2, speed: f32) {
        if !self.alive {
            return;
        }
        self.vel = seek(self.pos, target, speed);
        self.pos += self.vel;
    }
}

impl Entity for Enemy {
    fn kind(&self) -> EntityKind {
        EntityKind::Enemy
    }

    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ParticleFired { id: u32, pos: Vec2, vel: Vec2 },
    EnemySpawned { id: u32, pos: Vec2 },
    /// A particle destroyed an enemy
    EnemyKilled { enemy_id: u32, particle_id: u32 },
    /// An enemy reached the player
    PlayerHit { enemy_id: u32, health: i32 },
    GameOver { score: u64, ticks: u64 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn-position RNG
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub bounds: Bounds,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Clock sample (ms since run start) of the latest tick
    pub now_ms: f64,
    pub score: u64,
    pub health: i32,
    pub player: Player,
    pub input: InputResolver,
    /// Active particles (in spawn order)
    pub particles: Vec<Particle>,
    /// Active enemies (in spawn order)
    pub enemies: Vec<Enemy>,
    pub fire_cooldown: Cooldown,
    pub spawn_cooldown: Cooldown,
    /// Events produced since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new run with the player centred in `bounds`
    pub fn new(seed: u64, tuning: Tuning, bounds: Bounds) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(bounds.center(), tuning.player_radius),
            input: InputResolver::new(tuning.player_speed),
            fire_cooldown: Cooldown::ready(tuning.fire_cooldown_ms),
            spawn_cooldown: Cooldown::started_at(tuning.spawn_interval_ms, 0.0),
            health: tuning.starting_health,
            tuning,
            bounds,
            phase: GamePhase::Running,
            time_ticks: 0,
            now_ms: 0.0,
            score: 0,
            particles: Vec::new(),
            enemies: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Movement key went down
    pub fn press_key(&mut self, key: MoveKey) {
        self.player.vel = self.input.press(key);
    }

    /// Movement key went up
    pub fn release_key(&mut self, key: MoveKey) {
        self.player.vel = self.input.release(key);
    }

    /// Forget all held keys (e.g. the window lost focus)
    pub fn release_all_keys(&mut self) {
        self.player.vel = self.input.clear();
    }

    /// Canvas was resized
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Bounds::new(width, height);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Every live entity body in draw order (enemies, particles, player)
    pub fn bodies(&self) -> impl Iterator<Item = Body> + '_ {
        self.enemies
            .iter()
            .filter(|e| e.is_alive())
            .map(|e| e.body())
            .chain(
                self.particles
                    .iter()
                    .filter(|p| p.is_alive())
                    .map(|p| p.body()),
            )
            .chain(std::iter::once(self.player.body()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds::new(800.0, 600.0)
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(1, Tuning::default(), bounds());
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.health, 100);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.player.radius, 30.0);
        assert!(state.particles.is_empty());
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_clamp_right_edge() {
        let mut player = Player::new(Vec2::new(800.0 - 30.0 + 0.5, 300.0), 30.0);
        player.vel = Vec2::new(3.0, -3.0);
        player.clamp_and_move(bounds());
        assert_eq!(player.pos.x, 800.0 - 30.0);
        assert_eq!(player.vel.x, 0.0);
        // Sliding along the wall keeps the vertical component
        assert_eq!(player.vel.y, -3.0);
        assert_eq!(player.pos.y, 297.0);
    }

    #[test]
    fn test_clamp_keeps_inward_velocity() {
        let mut player = Player::new(Vec2::new(10.0, 300.0), 30.0);
        player.vel = Vec2::new(3.0, 0.0);
        player.clamp_and_move(bounds());
        // Snapped to the wall, then moved away from it
        assert_eq!(player.pos.x, 33.0);
        assert_eq!(player.vel.x, 3.0);
    }

    #[test]
    fn test_clamp_top_edge() {
        let mut player = Player::new(Vec2::new(400.0, 30.0), 30.0);
        player.vel = Vec2::new(0.0, -3.0);
        player.clamp_and_move(bounds());
        assert_eq!(player.pos.y, 30.0);
        assert_eq!(player.vel.y, 0.0);
    }

    #[test]
    fn test_particle_lifespan() {
        let mut particle = Particle {
            id: 1,
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, 0.0),
            radius: 10.0,
            lifespan: 2,
        };
        particle.advance();
        assert!(particle.is_alive());
        particle.advance();
        assert!(!particle.is_alive());
        assert_eq!(particle.pos, Vec2::new(2.0, 0.0));
        // Never underflows
        particle.advance();
        assert_eq!(particle.lifespan, 0);
    }

    #[test]
    fn test_enemy_chase() {
        let mut enemy = Enemy {
            id: 1,
            pos: Vec2::new(0.0, 0.0),
            vel: Vec2::ZERO,
            radius: 15.0,
            alive: true,
        };
        enemy.chase(Vec2::new(0.0, 10.0), 2.0);
        assert!((enemy.pos - Vec2::new(0.0, 2.0)).length() < 1.0e-6);

        // Sitting on the target doesn't produce NaN
        enemy.chase(enemy.pos, 2.0);
        assert!(enemy.pos.is_finite());
        assert_eq!(enemy.vel, Vec2::ZERO);
    }

    #[test]
    fn test_dead_enemy_does_not_move() {
        let mut enemy = Enemy {
            id: 1,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: 15.0,
            alive: false,
        };
        enemy.chase(Vec2::new(100.0, 0.0), 2.0);
        assert_eq!(enemy.pos, Vec2::ZERO);
    }

    #[test]
    fn test_press_key_sets_player_velocity() {
        let mut state = GameState::new(1, Tuning::default(), bounds());
        state.press_key(MoveKey::Up);
        state.press_key(MoveKey::Right);
        assert_eq!(state.player.vel, Vec2::new(3.0, -3.0));
        state.release_all_keys();
        assert_eq!(state.player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_bodies_skip_dead() {
        let mut state = GameState::new(1, Tuning::default(), bounds());
        state.enemies.push(Enemy {
            id: 7,
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::ZERO,
            radius: 15.0,
            alive: false,
        });
        let bodies: Vec<Body> = state.bodies().collect();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0].kind, EntityKind::Player);
    }
}
