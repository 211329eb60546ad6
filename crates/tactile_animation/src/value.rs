//! Animated values and their ownership
//!
//! An [`AnimatedValue`] is one scalar driving one visual property. The UI
//! element that mounts it holds it through an [`OwnedValue`], the only strong
//! reference. Schedulers, event callbacks and readers get [`ValueHandle`]s,
//! which are weak: once the element drops its `OwnedValue` every handle goes
//! dead and writes through it are dropped silently.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::sequence::{Motion, Sequence, SequencePlayer};
use crate::spring::RestThreshold;

/// A scalar with at most one active [`Sequence`]
pub struct AnimatedValue {
    motion: Motion,
    rest_value: f32,
    rest: RestThreshold,
    player: Option<SequencePlayer>,
}

impl AnimatedValue {
    /// A value sitting at `rest_value` (1.0 for scale, 0.0 for rotation, ...)
    pub fn new(rest_value: f32) -> Self {
        Self {
            motion: Motion::at_rest(rest_value),
            rest_value,
            rest: RestThreshold::default(),
            player: None,
        }
    }

    /// Convergence threshold handed to every spring step this value plays
    pub fn with_rest_threshold(mut self, rest: RestThreshold) -> Self {
        self.rest = rest;
        self
    }

    pub fn value(&self) -> f32 {
        self.motion.value
    }

    pub fn velocity(&self) -> f32 {
        self.motion.velocity
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// The value this was mounted with
    pub fn rest_value(&self) -> f32 {
        self.rest_value
    }

    pub fn is_animating(&self) -> bool {
        self.player.is_some()
    }

    /// Index of the running step of the active sequence
    pub fn current_step(&self) -> Option<usize> {
        self.player.as_ref().and_then(SequencePlayer::step_index)
    }

    /// Start `sequence` from the live value, superseding whatever was playing.
    ///
    /// The remaining steps of the old sequence are discarded. Position and
    /// velocity carry over, so the first frame of the new sequence continues
    /// from exactly where the old one left off.
    pub fn play(&mut self, sequence: Sequence) {
        if let Some(old) = self.player.take() {
            tracing::trace!(
                from_step = ?old.step_index(),
                value = self.motion.value,
                "superseding in-flight sequence"
            );
        }
        if sequence.is_empty() {
            self.motion.velocity = 0.0;
            return;
        }
        self.player = Some(SequencePlayer::new(sequence, self.motion, self.rest));
    }

    /// Jump to `value` and stop any running sequence
    pub fn set_immediate(&mut self, value: f32) {
        self.player = None;
        self.motion = Motion::at_rest(value);
    }

    /// Advance by `dt` seconds. Returns whether the value is still animating.
    pub fn tick(&mut self, dt: f32) -> bool {
        if dt <= 0.0 || !dt.is_finite() {
            return self.is_animating();
        }
        let Some(player) = self.player.as_mut() else {
            return false;
        };

        player.advance(&mut self.motion, dt);
        if player.is_finished() {
            tracing::debug!(
                steps = player.sequence().len(),
                value = self.motion.value,
                "sequence finished"
            );
            self.player = None;
        }
        self.is_animating()
    }
}

/// Strong, non-clonable ownership of an [`AnimatedValue`].
///
/// Dropping it tears the value down.
pub struct OwnedValue {
    inner: Rc<RefCell<AnimatedValue>>,
}

impl OwnedValue {
    pub fn new(value: AnimatedValue) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }

    pub fn at_rest(rest_value: f32, rest: RestThreshold) -> Self {
        Self::new(AnimatedValue::new(rest_value).with_rest_threshold(rest))
    }

    pub fn get(&self) -> f32 {
        self.inner.borrow().value()
    }

    pub fn play(&self, sequence: Sequence) {
        self.inner.borrow_mut().play(sequence);
    }

    pub fn tick(&self, dt: f32) -> bool {
        self.inner.borrow_mut().tick(dt)
    }

    pub fn is_animating(&self) -> bool {
        self.inner.borrow().is_animating()
    }

    /// Read access to the underlying value
    pub fn with<R>(&self, f: impl FnOnce(&AnimatedValue) -> R) -> R {
        f(&*self.inner.borrow())
    }

    /// Write access to the underlying value
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut AnimatedValue) -> R) -> R {
        f(&mut *self.inner.borrow_mut())
    }

    pub fn handle(&self) -> ValueHandle {
        ValueHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

/// Weak reference to an animated value owned elsewhere.
///
/// Every operation is a no-op once the owner has been dropped.
#[derive(Clone)]
pub struct ValueHandle {
    inner: Weak<RefCell<AnimatedValue>>,
}

impl ValueHandle {
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Current value, `None` after teardown
    pub fn get(&self) -> Option<f32> {
        self.inner.upgrade().map(|v| v.borrow().value())
    }

    /// Play `sequence` on the value. Returns `false` (and does nothing) if the
    /// owner is gone.
    pub fn play(&self, sequence: Sequence) -> bool {
        match self.inner.upgrade() {
            Some(value) => {
                value.borrow_mut().play(sequence);
                true
            }
            None => false,
        }
    }

    /// Advance the value. `None` after teardown, otherwise whether it is
    /// still animating.
    pub fn tick(&self, dt: f32) -> Option<bool> {
        self.inner.upgrade().map(|v| v.borrow_mut().tick(dt))
    }

    pub fn is_animating(&self) -> bool {
        self.inner
            .upgrade()
            .is_some_and(|v| v.borrow().is_animating())
    }
}
