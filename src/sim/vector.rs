//! 2D vector helpers
//!
//! `glam::Vec2` is the vector type for the whole simulation: `+`, `-`,
//! `length()`, `distance()`, `normalize()` and `* s` cover the arithmetic.
//! Raw `normalize()` divides by the length and yields NaN at zero, so any
//! direction derived from gameplay positions goes through the guarded helpers
//! here instead.

use glam::Vec2;

/// Screen-space unit vectors (+y points down)
pub const UP: Vec2 = Vec2::new(0.0, -1.0);
pub const DOWN: Vec2 = Vec2::new(0.0, 1.0);
pub const LEFT: Vec2 = Vec2::new(-1.0, 0.0);
pub const RIGHT: Vec2 = Vec2::new(1.0, 0.0);

/// Unit direction from `from` toward `to`
///
/// Returns `None` when the points coincide (or the inputs aren't finite), so
/// callers can skip the action instead of propagating NaN into positions.
#[inline]
pub fn aim_direction(from: Vec2, to: Vec2) -> Option<Vec2> {
    (to - from).try_normalize()
}

/// Velocity of magnitude `speed` from `from` toward `to`, zero if they coincide
#[inline]
pub fn seek(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    aim_direction(from, to).map_or(Vec2::ZERO, |dir| dir * speed)
}

/// True if two circles overlap (touching edges don't count)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn finite() -> impl Strategy<Value = f32> {
        -1.0e4f32..1.0e4f32
    }

    proptest! {
        #[test]
        fn add_undoes_subtract(ax in finite(), ay in finite(), bx in finite(), by in finite()) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            let back = a + (b - a);
            prop_assert!((back - b).length() < 1.0e-2);
        }

        #[test]
        fn normalized_has_unit_length(x in finite(), y in finite()) {
            let v = Vec2::new(x, y);
            prop_assume!(v.length() > 1.0e-3);
            prop_assert!((v.normalize().length() - 1.0).abs() < 1.0e-4);
        }
    }

    #[test]
    fn test_distance_and_scale() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b * 2.0, Vec2::new(6.0, 8.0));
    }

    #[test]
    fn test_aim_direction_at_same_point() {
        let p = Vec2::new(12.0, 7.0);
        assert!(aim_direction(p, p).is_none());
        assert_eq!(seek(p, p, 2.0), Vec2::ZERO);
    }

    #[test]
    fn test_aim_direction_points_at_target() {
        let dir = aim_direction(Vec2::new(10.0, 10.0), Vec2::new(10.0, 0.0)).unwrap();
        assert!((dir - UP).length() < 1.0e-6);

        let vel = seek(Vec2::ZERO, Vec2::new(10.0, 0.0), 2.0);
        assert!((vel - RIGHT * 2.0).length() < 1.0e-6);
    }

    #[test]
    fn test_circles_overlap_is_strict() {
        // distance 3 < 2 + 2
        assert!(circles_overlap(Vec2::ZERO, 2.0, Vec2::new(3.0, 0.0), 2.0));
        // distance 4 == 2 + 2: touching only
        assert!(!circles_overlap(Vec2::ZERO, 2.0, Vec2::new(4.0, 0.0), 2.0));
    }
}
