//! Tactile Feedback
//!
//! Feedback controllers for touchable elements:
//!
//! - **Press**: scale down while held, spring back on release
//! - **Like**: scale pulse plus rotation wiggle; unlike squashes and returns
//!
//! Each controller owns its animation values. The render layer reads
//! [`FeedbackTransform`]s every frame; event callbacks hold weak handles
//! that turn into no-ops once the element is dropped.
//!
//! # Example
//!
//! ```rust
//! use tactile_animation::AnimationScheduler;
//! use tactile_feedback::{PressConfig, PressFeedback};
//!
//! let mut scheduler = AnimationScheduler::new();
//! let press = PressFeedback::new(PressConfig::default());
//! press.attach(&mut scheduler);
//!
//! let handle = press.handle();
//! handle.on_press_in();
//! scheduler.advance_frames(120);
//! assert!((press.scale() - 0.97).abs() < 1e-3);
//!
//! drop(press);
//! handle.on_press_out(); // element is gone: nothing happens
//! ```

pub mod config;
pub mod error;
pub mod like;
pub mod press;
pub mod transform;

pub use config::FeedbackConfig;
pub use error::ConfigError;
pub use like::{LikeFeedback, LikeHandle, REST_ROTATION};
pub use press::{PressConfig, PressFeedback, PressHandle, REST_SCALE};
pub use transform::FeedbackTransform;
