//! 2-D vectors for positions, headings and velocities.
//!
//! Arithmetic comes from `glam`; this module only adds the two operations that
//! can fail and reports them as typed errors.

use glam::DVec2;
use thiserror::Error;

/// Position, heading and velocity type
pub type Vector2 = DVec2;

/// Failures of the vector substrate. Everything else is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VectorError {
    #[error("division of a vector by zero")]
    DivisionByZero,
    #[error("cannot normalize a zero-length vector")]
    ZeroLength,
}

/// Fallible counterparts of glam's division and normalization
pub trait CheckedVector: Sized {
    fn checked_div(self, k: f64) -> Result<Self, VectorError>;

    fn checked_normalize(self) -> Result<Self, VectorError>;
}

impl CheckedVector for DVec2 {
    fn checked_div(self, k: f64) -> Result<Self, VectorError> {
        if k == 0.0 {
            return Err(VectorError::DivisionByZero);
        }
        Ok(self / k)
    }

    fn checked_normalize(self) -> Result<Self, VectorError> {
        self.try_normalize().ok_or(VectorError::ZeroLength)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-12;

    #[test]
    fn test_from_angle_is_unit() {
        for i in 0..16 {
            let v = Vector2::from_angle(i as f64 * PI / 8.0);
            assert!((v.length() - 1.0).abs() < EPS);
        }
        let up = Vector2::from_angle(FRAC_PI_2);
        assert!(up.x.abs() < EPS);
        assert!((up.y - 1.0).abs() < EPS);
    }

    #[test]
    fn test_checked_normalize() {
        let n = Vector2::new(0.0, -7.5).checked_normalize().unwrap();
        assert_eq!(n, Vector2::new(0.0, -1.0));

        let n = Vector2::new(3.0, 4.0).checked_normalize().unwrap();
        assert!((n.x - 0.6).abs() < EPS);
        assert!((n.y - 0.8).abs() < EPS);
    }

    #[test]
    fn test_checked_div() {
        assert_eq!(
            Vector2::new(3.0, -6.0).checked_div(3.0),
            Ok(Vector2::new(1.0, -2.0))
        );
    }

    #[test]
    fn test_faults() {
        assert_eq!(Vector2::ZERO.checked_normalize(), Err(VectorError::ZeroLength));
        assert_eq!(
            Vector2::new(1.0, 1.0).checked_div(0.0),
            Err(VectorError::DivisionByZero)
        );
    }

    #[test]
    fn test_serializes_as_pair() {
        let json = serde_json::to_string(&Vector2::new(1.5, -2.0)).unwrap();
        assert_eq!(json, "[1.5,-2.0]");
        let back: Vector2 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Vector2::new(1.5, -2.0));
    }
}
