//! 2D vector helpers on top of `glam::Vec2`
//!
//! Addition, subtraction and scaling are glam operators. The extension trait
//! adds the direction/magnitude vocabulary the gameplay code is written in.

use glam::Vec2;

use crate::wrap_angle;

pub trait Vec2Ext {
    /// Squared length (no square root)
    fn sq_magnitude(self) -> f32;
    /// Length
    fn magnitude(self) -> f32;
    /// Unit vector in the same direction, or zero for a zero-length vector
    fn normal(self) -> Vec2;
    /// Direction angle in radians, wrapped to [0, 2π)
    fn direction(self) -> f32;
    /// Same magnitude, pointed at `theta`
    fn with_direction(self, theta: f32) -> Vec2;
}

impl Vec2Ext for Vec2 {
    #[inline]
    fn sq_magnitude(self) -> f32 {
        self.length_squared()
    }

    #[inline]
    fn magnitude(self) -> f32 {
        self.length()
    }

    #[inline]
    fn normal(self) -> Vec2 {
        self.normalize_or_zero()
    }

    #[inline]
    fn direction(self) -> f32 {
        wrap_angle(self.y.atan2(self.x))
    }

    #[inline]
    fn with_direction(self, theta: f32) -> Vec2 {
        Vec2::from_angle(theta) * self.length()
    }
}

/// Vector of length `len` pointing at `theta`
#[inline]
pub fn from_angle_len(theta: f32, len: f32) -> Vec2 {
    Vec2::from_angle(theta) * len
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    #[test]
    fn test_normal_of_zero_is_zero() {
        assert_eq!(Vec2::ZERO.normal(), Vec2::ZERO);
    }

    #[test]
    fn test_normal_unit_length() {
        let n = Vec2::new(3.0, 4.0).normal();
        assert!((n.magnitude() - 1.0).abs() < 1e-6);
        assert!((n.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_direction_is_wrapped() {
        assert!((Vec2::new(0.0, -1.0).direction() - 1.5 * PI).abs() < 1e-5);
        assert!((Vec2::new(0.0, 1.0).direction() - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_with_direction_on_zero_stays_zero() {
        assert_eq!(Vec2::ZERO.with_direction(1.0), Vec2::ZERO);
    }

    #[test]
    fn test_sq_magnitude() {
        assert_eq!(Vec2::new(3.0, 4.0).sq_magnitude(), 25.0);
        assert_eq!(Vec2::new(3.0, 4.0).magnitude(), 5.0);
    }

    proptest! {
        #[test]
        fn prop_direction_round_trip(
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            theta in 0.0f32..TAU,
        ) {
            let v = Vec2::new(x, y);
            prop_assume!(v.magnitude() > 0.01);
            let turned = v.with_direction(theta);
            let tolerance = 1e-3 * v.magnitude().max(1.0);
            prop_assert!((turned.magnitude() - v.magnitude()).abs() < tolerance);
            let back = turned.direction();
            let diff = (back - theta).abs();
            prop_assert!(
                diff < 1e-3 || (TAU - diff) < 1e-3,
                "theta {} came back as {}",
                theta,
                back
            );
        }
    }
}
