//! Press feedback
//!
//! Scales an element down while it is held and springs it back on release.
//! Press-in and press-out each start a single spring step on the scale value;
//! a release during the press-in spring takes over from wherever the scale
//! is, and vice versa.

use serde::{Deserialize, Serialize};
use tactile_animation::{
    AnimationScheduler, AnimationSettings, OwnedValue, Sequence, SequencePreset, SpringConfig,
    ValueHandle, ValueId,
};

use crate::transform::FeedbackTransform;

/// Scale an element rests at
pub const REST_SCALE: f32 = 1.0;

/// Press feedback configuration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PressConfig {
    /// Scale while pressed
    pub scale_value: f32,
    /// Spring damping for both directions
    pub damping: f32,
    /// Spring stiffness for both directions
    pub stiffness: f32,
}

impl Default for PressConfig {
    fn default() -> Self {
        Self {
            scale_value: 0.97,
            damping: 15.0,
            stiffness: 400.0,
        }
    }
}

impl PressConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pressed scale
    pub fn scale_value(mut self, scale: f32) -> Self {
        self.scale_value = scale;
        self
    }

    /// Set the spring damping
    pub fn damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Set the spring stiffness
    pub fn stiffness(mut self, stiffness: f32) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn spring(&self) -> SpringConfig {
        SpringConfig::damped(self.damping, self.stiffness)
    }

    fn press_in_sequence(&self) -> Sequence {
        SequencePreset::press(self.scale_value, self.damping, self.stiffness)
    }

    fn press_out_sequence(&self) -> Sequence {
        SequencePreset::press(REST_SCALE, self.damping, self.stiffness)
    }
}

/// Press feedback for one mounted element.
///
/// Owns the scale value; dropping it unmounts the element and turns every
/// outstanding [`PressHandle`] into a no-op.
pub struct PressFeedback {
    config: PressConfig,
    scale: OwnedValue,
}

impl PressFeedback {
    pub fn new(config: PressConfig) -> Self {
        Self::with_settings(config, &AnimationSettings::default())
    }

    pub fn with_settings(config: PressConfig, settings: &AnimationSettings) -> Self {
        Self {
            config,
            scale: OwnedValue::at_rest(REST_SCALE, settings.rest_threshold()),
        }
    }

    pub fn config(&self) -> &PressConfig {
        &self.config
    }

    /// Press-down: spring towards `scale_value`
    pub fn on_press_in(&self) {
        self.scale.play(self.config.press_in_sequence());
    }

    /// Press-up: spring back to rest
    pub fn on_press_out(&self) {
        self.scale.play(self.config.press_out_sequence());
    }

    pub fn scale(&self) -> f32 {
        self.scale.get()
    }

    pub fn transform(&self) -> FeedbackTransform {
        FeedbackTransform::scale(self.scale())
    }

    pub fn is_animating(&self) -> bool {
        self.scale.is_animating()
    }

    /// Advance by `dt` seconds when not driven by a scheduler
    pub fn tick(&self, dt: f32) -> bool {
        self.scale.tick(dt)
    }

    /// Let `scheduler` drive the scale value
    pub fn attach(&self, scheduler: &mut AnimationScheduler) -> ValueId {
        scheduler.register(self.scale.handle())
    }

    /// A detached trigger handle for event callbacks
    pub fn handle(&self) -> PressHandle {
        PressHandle {
            config: self.config,
            scale: self.scale.handle(),
        }
    }
}

impl Default for PressFeedback {
    fn default() -> Self {
        Self::new(PressConfig::default())
    }
}

/// Weak trigger handle to a [`PressFeedback`].
///
/// Triggers after the element has been dropped do nothing.
#[derive(Clone)]
pub struct PressHandle {
    config: PressConfig,
    scale: ValueHandle,
}

impl PressHandle {
    pub fn on_press_in(&self) {
        self.scale.play(self.config.press_in_sequence());
    }

    pub fn on_press_out(&self) {
        self.scale.play(self.config.press_out_sequence());
    }

    pub fn is_mounted(&self) -> bool {
        self.scale.is_alive()
    }

    /// Current scale, `None` after unmount
    pub fn scale(&self) -> Option<f32> {
        self.scale.get()
    }
}
