//! Sequence presets for feedback gestures
//!
//! Pre-built sequences behind the press and like interactions. Each call
//! returns a fresh [`Sequence`]; the like/unlike curves are fixed.

use crate::sequence::Sequence;

/// Spring stiffness shared by every like/unlike spring step
pub const LIKE_STIFFNESS: f32 = 400.0;

/// Peak scale of the like pulse
pub const LIKE_PEAK_SCALE: f32 = 1.4;

/// Pre-built sequences for common feedback gestures
pub struct SequencePreset;

impl SequencePreset {
    // ========================================================================
    // Press
    // ========================================================================

    /// Spring the scale to `target`: `scale_value` on press-in, `1.0` on
    /// press-out
    pub fn press(target: f32, damping: f32, stiffness: f32) -> Sequence {
        Sequence::new().spring(target, damping, stiffness)
    }

    // ========================================================================
    // Like / unlike
    // ========================================================================

    /// Scale pulse: overshoot, dip, small rebound, rest
    pub fn like_scale() -> Sequence {
        Sequence::new()
            .spring(LIKE_PEAK_SCALE, 6.0, LIKE_STIFFNESS)
            .spring(0.9, 6.0, LIKE_STIFFNESS)
            .spring(1.1, 8.0, LIKE_STIFFNESS)
            .spring(1.0, 10.0, LIKE_STIFFNESS)
    }

    /// Rotation wiggle in degrees, decaying back to 0
    pub fn like_wiggle() -> Sequence {
        Sequence::new()
            .timing(-15.0, 100)
            .timing(15.0, 100)
            .timing(-10.0, 80)
            .timing(10.0, 80)
            .timing(0.0, 60)
    }

    /// Quick squash then spring back to rest
    pub fn unlike_scale() -> Sequence {
        Sequence::new()
            .timing(0.8, 100)
            .spring(1.0, 15.0, LIKE_STIFFNESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spring::SpringConfig;
    use crate::step::{Curve, EasingStep};
    use crate::value::AnimatedValue;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_like_scale_steps() {
        let seq = SequencePreset::like_scale();
        let targets: Vec<f32> = seq.steps().iter().map(|s| s.target).collect();
        assert_eq!(targets, vec![1.4, 0.9, 1.1, 1.0]);
        assert_eq!(
            seq.steps()[2].curve,
            Curve::Spring(SpringConfig::damped(8.0, 400.0))
        );
    }

    #[test]
    fn test_like_wiggle_is_fully_timed() {
        let seq = SequencePreset::like_wiggle();
        assert_eq!(seq.len(), 5);
        assert_eq!(seq.fixed_duration_ms(), Some(420));
        assert_eq!(seq.final_target(), Some(0.0));
    }

    #[test]
    fn test_unlike_scale_steps() {
        let seq = SequencePreset::unlike_scale();
        assert_eq!(seq.steps()[0], EasingStep::timing(0.8, 100));
        assert_eq!(seq.steps()[1], EasingStep::spring(1.0, 15.0, 400.0));
    }

    #[test]
    fn test_wiggle_returns_to_zero() {
        let mut rotation = AnimatedValue::new(0.0);
        rotation.play(SequencePreset::like_wiggle());
        // 420ms of timed steps fits in 26 frames
        for _ in 0..26 {
            rotation.tick(DT);
        }
        assert!(!rotation.is_animating());
        assert_eq!(rotation.value(), 0.0);
    }

    #[test]
    fn test_wiggle_swings_both_ways() {
        let mut rotation = AnimatedValue::new(0.0);
        rotation.play(SequencePreset::like_wiggle());
        let (mut min, mut max) = (0.0f32, 0.0f32);
        while rotation.tick(DT) {
            min = min.min(rotation.value());
            max = max.max(rotation.value());
        }
        assert!(min <= -14.0 && min >= -15.0);
        assert!(max >= 14.0 && max <= 15.0);
    }
}
