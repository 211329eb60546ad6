//! Animation scheduler
//!
//! Drives every registered value once per frame. The scheduler only holds
//! weak [`ValueHandle`]s: values belong to the UI elements that mounted them,
//! and a value whose owner has been torn down is pruned on the next tick.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::spring::RestThreshold;
use crate::value::ValueHandle;

new_key_type! {
    pub struct ValueId;
}

/// Frame rate used when nothing else is configured
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Frame rate and convergence settings shared by a scheduler and the values
/// it drives
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Ticks per second of the frame clock
    pub frame_rate: u32,
    /// Springs complete when `|value - target|` drops under this
    pub rest_displacement: f32,
    /// ...and `|velocity|` drops under this (units per second)
    pub rest_velocity: f32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        let rest = RestThreshold::default();
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            rest_displacement: rest.displacement,
            rest_velocity: rest.velocity,
        }
    }
}

impl AnimationSettings {
    pub fn rest_threshold(&self) -> RestThreshold {
        RestThreshold {
            displacement: self.rest_displacement,
            velocity: self.rest_velocity,
        }
    }
}

/// Fixed-rate frame clock
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    frame_rate: u32,
    frame: u64,
}

impl FrameClock {
    /// A zero rate falls back to [`DEFAULT_FRAME_RATE`]
    pub fn new(frame_rate: u32) -> Self {
        Self {
            frame_rate: if frame_rate == 0 {
                DEFAULT_FRAME_RATE
            } else {
                frame_rate
            },
            frame: 0,
        }
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    /// Seconds per frame
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frame_rate as f32
    }

    pub fn frame_ms(&self) -> f64 {
        1000.0 / self.frame_rate as f64
    }

    /// Frames elapsed so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.frame as f64 * self.frame_ms()
    }

    /// Whole frames needed to cover `ms`, rounding up. `None` on overflow.
    pub fn frames_for_ms(&self, ms: u64) -> Option<u64> {
        ms.checked_mul(self.frame_rate as u64)
            .map(|scaled| scaled.div_ceil(1000))
    }

    /// Advance one frame, returning its dt
    pub fn advance(&mut self) -> f32 {
        self.frame += 1;
        self.frame_dt()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_RATE)
    }
}

/// The animation scheduler that ticks all registered values
pub struct AnimationScheduler {
    values: SlotMap<ValueId, ValueHandle>,
    clock: FrameClock,
    last_frame: Instant,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::with_settings(&AnimationSettings::default())
    }

    pub fn with_settings(settings: &AnimationSettings) -> Self {
        Self {
            values: SlotMap::with_key(),
            clock: FrameClock::new(settings.frame_rate),
            last_frame: Instant::now(),
        }
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn register(&mut self, handle: ValueHandle) -> ValueId {
        self.values.insert(handle)
    }

    pub fn unregister(&mut self, id: ValueId) -> Option<ValueHandle> {
        self.values.remove(id)
    }

    pub fn get(&self, id: ValueId) -> Option<&ValueHandle> {
        self.values.get(id)
    }

    /// Advance one fixed frame of the clock
    pub fn tick_frame(&mut self) {
        let dt = self.clock.advance();
        self.step_all(dt);
    }

    /// Advance `frames` fixed frames
    pub fn advance_frames(&mut self, frames: u64) {
        for _ in 0..frames {
            self.tick_frame();
        }
    }

    /// Advance by the wall time since the previous call
    pub fn tick(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.step_all(dt);
    }

    /// Advance by an explicit `dt` in seconds
    pub fn tick_by(&mut self, dt: f32) {
        self.step_all(dt);
    }

    fn step_all(&mut self, dt: f32) {
        let mut dead = Vec::new();
        for (id, handle) in self.values.iter() {
            if handle.tick(dt).is_none() {
                dead.push(id);
            }
        }
        if !dead.is_empty() {
            tracing::debug!(count = dead.len(), "pruning torn-down values");
            for id in dead {
                self.values.remove(id);
            }
        }
    }

    /// Check if any registered value is still animating
    pub fn has_active_animations(&self) -> bool {
        self.values.values().any(ValueHandle::is_animating)
    }

    /// Number of registered values, including ones not yet pruned
    pub fn value_count(&self) -> usize {
        self.values.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
