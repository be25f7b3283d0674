//! Angular collision detection
//!
//! Two attached pins collide when their angles on the ring come closer than
//! the threshold. The test is purely angular, so it does not depend on the
//! ring radius.

/// Forward gap from `b` to `a` in degrees, in [0, 360)
///
/// Both angles are expected in [0, 360).
#[inline]
pub fn angular_gap(a: f32, b: f32) -> f32 {
    ((a - b + 360.0) % 360.0).abs()
}

/// Whether two ring angles are within `threshold` degrees of each other
///
/// Symmetric: `pins_collide(a, b, t) == pins_collide(b, a, t)`.
#[inline]
pub fn pins_collide(a: f32, b: f32, threshold: f32) -> bool {
    // Fixed operand order keeps the float result symmetric
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    let d = angular_gap(hi, lo);
    d < threshold || d > 360.0 - threshold
}

/// Shortest angular distance between two ring angles, in [0, 180]
#[inline]
pub fn separation(a: f32, b: f32) -> f32 {
    let d = angular_gap(a, b);
    d.min(360.0 - d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_pins_collide() {
        assert!(pins_collide(90.0, 95.0, 9.0));
        assert!(pins_collide(95.0, 90.0, 9.0));
        assert!(!pins_collide(90.0, 99.0, 9.0));
    }

    #[test]
    fn collision_across_zero() {
        assert!(pins_collide(358.0, 2.0, 9.0));
        assert!(pins_collide(2.0, 358.0, 9.0));
        assert!(!pins_collide(350.0, 0.0, 9.0));
    }

    #[test]
    fn separation_is_shortest_way_round() {
        assert_eq!(separation(10.0, 350.0), 20.0);
        assert_eq!(separation(0.0, 180.0), 180.0);
        assert_eq!(separation(45.0, 45.0), 0.0);
    }
}
