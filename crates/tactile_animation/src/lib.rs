//! Tactile Animation Core
//!
//! Spring physics, timed easing, and interruptible step sequences for
//! micro-interaction feedback.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Timed Steps**: Fixed-duration transitions on an easing curve
//! - **Sequences**: Steps chained back to back, one sequence per value
//! - **Interruptible**: A new sequence supersedes the old one from the live
//!   value and velocity
//! - **Owned Values**: Values live with their UI element; everything else
//!   holds weak handles

pub mod easing;
pub mod presets;
pub mod scheduler;
pub mod sequence;
pub mod spring;
pub mod step;
pub mod value;

pub use easing::Easing;
pub use presets::SequencePreset;
pub use scheduler::{AnimationScheduler, AnimationSettings, FrameClock, ValueId};
pub use sequence::{Motion, Sequence, SequencePlayer};
pub use spring::{RestThreshold, Spring, SpringConfig};
pub use step::{Curve, EasingStep};
pub use value::{AnimatedValue, OwnedValue, ValueHandle};
