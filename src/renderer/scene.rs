//! Turns a `GameState` into a triangle list in canvas pixel space

use super::shapes::{circle, ring, segments_for};
use super::vertex::{Vertex, colors};
use crate::sim::{Body, EntityKind, GameState};

/// Colors used for one frame
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: [f32; 4],
    pub player: [f32; 4],
    pub player_outline: [f32; 4],
    pub player_down: [f32; 4],
    pub particle: [f32; 4],
    pub enemy: [f32; 4],
}

impl Palette {
    pub fn new(high_contrast: bool) -> Self {
        if high_contrast {
            Self {
                background: colors::contrast::BACKGROUND,
                player: colors::contrast::PLAYER,
                player_outline: colors::contrast::PLAYER,
                player_down: colors::PLAYER_DOWN,
                particle: colors::contrast::PARTICLE,
                enemy: colors::contrast::ENEMY,
            }
        } else {
            Self {
                background: colors::BACKGROUND,
                player: colors::PLAYER,
                player_outline: colors::PLAYER_OUTLINE,
                player_down: colors::PLAYER_DOWN,
                particle: colors::PARTICLE,
                enemy: colors::ENEMY,
            }
        }
    }
}

/// Build the vertices for every live entity
///
/// Draw order is enemies, particles, then the player on top.
pub fn scene_vertices(state: &GameState, palette: &Palette) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    for body in state.bodies() {
        push_body(&mut vertices, &body, palette, state.is_game_over());
    }

    vertices
}

fn push_body(vertices: &mut Vec<Vertex>, body: &Body, palette: &Palette, game_over: bool) {
    let segments = segments_for(body.radius);
    match body.kind {
        EntityKind::Enemy => {
            vertices.extend(circle(body.pos, body.radius, palette.enemy, segments));
        }
        EntityKind::Particle => {
            vertices.extend(circle(body.pos, body.radius, palette.particle, segments));
        }
        EntityKind::Player => {
            let fill = if game_over {
                palette.player_down
            } else {
                palette.player
            };
            vertices.extend(circle(body.pos, body.radius, fill, segments));
            vertices.extend(ring(
                body.pos,
                body.radius - 2.0,
                body.radius,
                palette.player_outline,
                segments,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Bounds, Enemy, GamePhase, Tuning};
    use glam::Vec2;

    #[test]
    fn test_empty_arena_draws_player_only() {
        let state = GameState::new(1, Tuning::default(), Bounds::new(800.0, 600.0));
        let palette = Palette::new(false);
        let verts = scene_vertices(&state, &palette);

        let segments = segments_for(30.0) as usize;
        assert_eq!(verts.len(), segments * 3 + segments * 6);
        assert_eq!(verts[0].color, colors::PLAYER);
    }

    #[test]
    fn test_enemy_drawn_before_player() {
        let mut state = GameState::new(1, Tuning::default(), Bounds::new(800.0, 600.0));
        state.enemies.push(Enemy {
            id: 1,
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::ZERO,
            radius: 15.0,
            alive: true,
        });
        let verts = scene_vertices(&state, &Palette::new(false));
        assert_eq!(verts[0].color, colors::ENEMY);
        assert_eq!(verts[0].position, [10.0, 10.0]);
    }

    #[test]
    fn test_game_over_greys_out_player() {
        let mut state = GameState::new(1, Tuning::default(), Bounds::new(800.0, 600.0));
        state.phase = GamePhase::GameOver;
        let verts = scene_vertices(&state, &Palette::new(false));
        assert_eq!(verts[0].color, colors::PLAYER_DOWN);
    }
}
