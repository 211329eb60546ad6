//! Like feedback
//!
//! A like plays a scale pulse and a rotation wiggle at the same time, one
//! sequence per value with no synchronisation between them. An unlike plays
//! a squash-and-return on the scale only.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use tactile_animation::{
    AnimationScheduler, AnimationSettings, OwnedValue, SequencePreset, ValueHandle, ValueId,
};

use crate::press::REST_SCALE;
use crate::transform::FeedbackTransform;

/// Rotation an element rests at, in degrees
pub const REST_ROTATION: f32 = 0.0;

/// Like feedback for one mounted element.
///
/// Owns the scale and rotation values; dropping it unmounts the element.
pub struct LikeFeedback {
    scale: OwnedValue,
    rotation: OwnedValue,
    liked: Rc<Cell<bool>>,
}

impl LikeFeedback {
    pub fn new() -> Self {
        Self::with_settings(&AnimationSettings::default())
    }

    pub fn with_settings(settings: &AnimationSettings) -> Self {
        let rest = settings.rest_threshold();
        Self {
            scale: OwnedValue::at_rest(REST_SCALE, rest),
            rotation: OwnedValue::at_rest(REST_ROTATION, rest),
            liked: Rc::new(Cell::new(false)),
        }
    }

    /// Start with the liked state already set, without animating
    pub fn liked(self, liked: bool) -> Self {
        self.liked.set(liked);
        self
    }

    /// Pulse the scale and wiggle the rotation
    pub fn trigger_like(&self) {
        self.liked.set(true);
        play_like(&self.scale.handle(), &self.rotation.handle());
    }

    /// Squash and return the scale; rotation is left alone
    pub fn trigger_unlike(&self) {
        self.liked.set(false);
        self.scale.play(SequencePreset::unlike_scale());
    }

    /// Flip the liked state, playing the matching feedback. Returns the new
    /// state.
    pub fn toggle(&self) -> bool {
        if self.liked.get() {
            self.trigger_unlike();
        } else {
            self.trigger_like();
        }
        self.liked.get()
    }

    pub fn is_liked(&self) -> bool {
        self.liked.get()
    }

    pub fn scale(&self) -> f32 {
        self.scale.get()
    }

    /// Rotation in degrees
    pub fn rotation(&self) -> f32 {
        self.rotation.get()
    }

    pub fn transform(&self) -> FeedbackTransform {
        FeedbackTransform::new(self.scale(), self.rotation())
    }

    pub fn is_animating(&self) -> bool {
        self.scale.is_animating() || self.rotation.is_animating()
    }

    /// Index of the running step of the scale sequence
    pub fn scale_step(&self) -> Option<usize> {
        self.scale.with(|v| v.current_step())
    }

    /// Advance both values by `dt` seconds when not driven by a scheduler
    pub fn tick(&self, dt: f32) -> bool {
        let scale = self.scale.tick(dt);
        let rotation = self.rotation.tick(dt);
        scale || rotation
    }

    /// Let `scheduler` drive both values
    pub fn attach(&self, scheduler: &mut AnimationScheduler) -> [ValueId; 2] {
        [
            scheduler.register(self.scale.handle()),
            scheduler.register(self.rotation.handle()),
        ]
    }

    /// A detached trigger handle for event callbacks
    pub fn handle(&self) -> LikeHandle {
        LikeHandle {
            scale: self.scale.handle(),
            rotation: self.rotation.handle(),
            liked: Rc::downgrade(&self.liked),
        }
    }
}

impl Default for LikeFeedback {
    fn default() -> Self {
        Self::new()
    }
}

/// Weak trigger handle to a [`LikeFeedback`].
///
/// Triggers update the element's liked state, so a later `toggle` from
/// either side plays the matching feedback. Triggers after the element has
/// been dropped do nothing.
#[derive(Clone)]
pub struct LikeHandle {
    scale: ValueHandle,
    rotation: ValueHandle,
    liked: Weak<Cell<bool>>,
}

impl LikeHandle {
    pub fn trigger_like(&self) {
        let Some(liked) = self.liked.upgrade() else {
            return;
        };
        liked.set(true);
        play_like(&self.scale, &self.rotation);
    }

    pub fn trigger_unlike(&self) {
        let Some(liked) = self.liked.upgrade() else {
            return;
        };
        liked.set(false);
        self.scale.play(SequencePreset::unlike_scale());
    }

    /// Flip the liked state. Returns the new state, `None` after unmount.
    pub fn toggle(&self) -> Option<bool> {
        let liked = self.liked.upgrade()?.get();
        if liked {
            self.trigger_unlike();
        } else {
            self.trigger_like();
        }
        Some(!liked)
    }

    /// Liked state, `None` after unmount
    pub fn is_liked(&self) -> Option<bool> {
        self.liked.upgrade().map(|liked| liked.get())
    }

    pub fn is_mounted(&self) -> bool {
        self.scale.is_alive()
    }

    /// Current `(scale, rotation)`, `None` after unmount
    pub fn values(&self) -> Option<(f32, f32)> {
        Some((self.scale.get()?, self.rotation.get()?))
    }
}

fn play_like(scale: &ValueHandle, rotation: &ValueHandle) {
    scale.play(SequencePreset::like_scale());
    rotation.play(SequencePreset::like_wiggle());
}
