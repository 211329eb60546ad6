//! Single eased transitions
//!
//! An [`EasingStep`] describes how a value moves from wherever it currently
//! is to one target. The starting point is never part of the step; it is
//! taken from the live value at the moment the step begins.

use crate::easing::Easing;
use crate::spring::SpringConfig;

/// How a step travels to its target
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Curve {
    /// Physically modelled, completes on convergence
    Spring(SpringConfig),
    /// Fixed duration, ignores incoming velocity. A zero duration is a hard cut.
    Timing { duration_ms: u32, easing: Easing },
}

/// One immutable `{ target, curve }` record
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EasingStep {
    pub target: f32,
    pub curve: Curve,
}

impl EasingStep {
    /// Unit-mass spring step
    pub fn spring(target: f32, damping: f32, stiffness: f32) -> Self {
        Self::spring_with(target, SpringConfig::damped(damping, stiffness))
    }

    pub fn spring_with(target: f32, config: SpringConfig) -> Self {
        Self {
            target,
            curve: Curve::Spring(config),
        }
    }

    /// Timed step on the default ease-in-out curve
    pub fn timing(target: f32, duration_ms: u32) -> Self {
        Self::timing_with(target, duration_ms, Easing::default())
    }

    pub fn timing_with(target: f32, duration_ms: u32, easing: Easing) -> Self {
        Self {
            target,
            curve: Curve::Timing {
                duration_ms,
                easing,
            },
        }
    }

    /// `None` for springs
    pub fn duration_ms(&self) -> Option<u32> {
        match self.curve {
            Curve::Spring(_) => None,
            Curve::Timing { duration_ms, .. } => Some(duration_ms),
        }
    }

    pub fn is_spring(&self) -> bool {
        matches!(self.curve, Curve::Spring(_))
    }
}
