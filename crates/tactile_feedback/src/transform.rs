//! Render-side transform built from feedback values

use std::fmt;

use serde::Serialize;

/// Scale and rotation for one frame of a feedback element
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FeedbackTransform {
    /// Uniform scale factor
    pub scale: f32,
    /// Rotation in degrees, clockwise
    pub rotate_deg: f32,
}

impl FeedbackTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        rotate_deg: 0.0,
    };

    pub fn new(scale: f32, rotate_deg: f32) -> Self {
        Self { scale, rotate_deg }
    }

    pub fn scale(scale: f32) -> Self {
        Self::new(scale, 0.0)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// 2D affine `[a, b, c, d, tx, ty]` about the element's centre
    pub fn to_matrix(&self) -> [f32; 6] {
        let (sin, cos) = self.rotate_deg.to_radians().sin_cos();
        [
            self.scale * cos,
            self.scale * sin,
            -self.scale * sin,
            self.scale * cos,
            0.0,
            0.0,
        ]
    }
}

impl Default for FeedbackTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for FeedbackTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scale({:.3}) rotate({:.1}deg)", self.scale, self.rotate_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_matrix() {
        assert!(FeedbackTransform::default().is_identity());
        assert_eq!(
            FeedbackTransform::IDENTITY.to_matrix(),
            [1.0, 0.0, -0.0, 1.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_rotated_matrix() {
        let m = FeedbackTransform::new(2.0, 90.0).to_matrix();
        assert!(m[0].abs() < 1e-5);
        assert!((m[1] - 2.0).abs() < 1e-5);
        assert!((m[2] + 2.0).abs() < 1e-5);
        assert!(m[3].abs() < 1e-5);
    }

    #[test]
    fn test_display() {
        let t = FeedbackTransform::new(0.97, -15.0);
        assert_eq!(t.to_string(), "scale(0.970) rotate(-15.0deg)");
    }
}
