//! Easing functions for displaying a turn in progress.

use std::f32::consts::PI;

/// Function that maps a float from the range 0.0 to 1.0 to another float
/// from 0.0 to 1.0.
pub type InterpolateFn = fn(f32) -> f32;

/// Constant angular speed.
pub const LINEAR: InterpolateFn = |x| x;

/// Interpolate using cosine from 0.0 to PI.
pub const COSINE: InterpolateFn = |x| (1.0 - (x * PI).cos()) / 2.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for f in [LINEAR, COSINE] {
            assert!(f(0.0).abs() < 1e-6);
            assert!((f(1.0) - 1.0).abs() < 1e-6);
            assert!((f(0.5) - 0.5).abs() < 1e-6);
        }
    }
}
