//! Spring physics
//!
//! A damped harmonic oscillator integrated with RK4. Springs have no fixed
//! duration: they run until both the distance to the target and the velocity
//! fall under a [`RestThreshold`], then snap exactly onto the target.

use serde::{Deserialize, Serialize};

/// Largest integration step. Longer frames are split into substeps so stiff
/// springs stay stable on slow frames.
const MAX_SUBSTEP: f32 = 1.0 / 240.0;

/// Physical parameters of a spring
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Unit-mass spring from `(damping, stiffness)`, the pair feedback
    /// sequences are written in.
    pub fn damped(damping: f32, stiffness: f32) -> Self {
        Self::new(stiffness, damping, 1.0)
    }

    /// Fast, barely any overshoot
    pub fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// Quick with a small bounce
    pub fn snappy() -> Self {
        Self::new(400.0, 15.0, 1.0)
    }

    /// Slow and soft
    pub fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Pronounced oscillation
    pub fn wobbly() -> Self {
        Self::new(180.0, 6.0, 1.0)
    }

    /// ζ = c / (2·√(k·m)). Below 1 the spring overshoots.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::snappy()
    }
}

/// Convergence test for springs.
///
/// A spring is at rest once `|value - target| < displacement` and
/// `|velocity| < velocity` (units per second).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RestThreshold {
    pub displacement: f32,
    pub velocity: f32,
}

impl Default for RestThreshold {
    fn default() -> Self {
        Self {
            displacement: 0.001,
            velocity: 0.01,
        }
    }
}

/// A single animated spring
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    rest: RestThreshold,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Create a spring resting at `initial`
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            rest: RestThreshold::default(),
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    /// Start with an existing velocity, e.g. one inherited from an
    /// interrupted animation.
    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_rest_threshold(mut self, rest: RestThreshold) -> Self {
        self.rest = rest;
        self
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Retarget without touching position or velocity
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < self.rest.displacement
            && self.velocity.abs() < self.rest.velocity
    }

    /// Advance by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if self.is_settled() {
            self.snap();
            return;
        }
        if dt <= 0.0 || !dt.is_finite() {
            return;
        }

        let substeps = (dt / MAX_SUBSTEP).ceil().max(1.0) as u32;
        let h = dt / substeps as f32;
        for _ in 0..substeps {
            self.rk4(h);
        }

        if self.is_settled() {
            self.snap();
        }
    }

    fn snap(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;
        (-stiffness * (x - self.target) - damping * v) / mass
    }

    fn rk4(&mut self, h: f32) {
        let (x, v) = (self.value, self.velocity);

        let a1 = self.acceleration(x, v);
        let (x2, v2) = (x + 0.5 * h * v, v + 0.5 * h * a1);
        let a2 = self.acceleration(x2, v2);
        let (x3, v3) = (x + 0.5 * h * v2, v + 0.5 * h * a2);
        let a3 = self.acceleration(x3, v3);
        let (x4, v4) = (x + h * v3, v + h * a3);
        let a4 = self.acceleration(x4, v4);

        self.value = x + h / 6.0 * (v + 2.0 * v2 + 2.0 * v3 + v4);
        self.velocity = v + h / 6.0 * (a1 + 2.0 * a2 + 2.0 * a3 + a4);
    }
}
