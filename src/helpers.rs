//! Interpolation helpers shared by carousel, panel and stats animations

use bevy::prelude::*;

/// Hermite smooth-step on a normalized time, `3t² - 2t³` with `t` clamped to [0, 1]
pub fn smooth_step(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Normalized progress of `elapsed` through `duration`, clamped to [0, 1].
/// A non-positive duration counts as already finished.
pub fn progress(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0)
}

/// Linear interpolation between two scalars
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Linear interpolation between two points
pub fn lerp_vec2(from: Vec2, to: Vec2, t: f32) -> Vec2 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_step_endpoints_and_midpoint() {
        assert_eq!(smooth_step(0.0), 0.0);
        assert_eq!(smooth_step(1.0), 1.0);
        assert!((smooth_step(0.5) - 0.5).abs() < 1e-6);
        // Clamped outside the unit range
        assert_eq!(smooth_step(-2.0), 0.0);
        assert_eq!(smooth_step(3.0), 1.0);
    }

    #[test]
    fn test_smooth_step_eases_in() {
        // Slower than linear near the start
        assert!(smooth_step(0.1) < 0.1);
        assert!(smooth_step(0.9) > 0.9);
    }

    #[test]
    fn test_progress_handles_zero_duration() {
        assert_eq!(progress(0.0, 0.0), 1.0);
        assert_eq!(progress(0.15, 0.3), 0.5);
        assert_eq!(progress(1.0, 0.3), 1.0);
    }
}
