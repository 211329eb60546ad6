//! Step sequences and their playback
//!
//! A [`Sequence`] is an ordered list of [`EasingStep`]s. It is built with
//! consuming builder calls and handed to an animated value by move, so once
//! playback starts nothing can change it. Each trigger builds a fresh one.
//!
//! Playback is driven by [`SequencePlayer`], which walks the steps in order:
//! step `i + 1` begins on the same frame step `i` completes, starting from the
//! value (and velocity) step `i` left behind. Time left over after a timed
//! step finishes flows straight into the next step.

use smallvec::SmallVec;

use crate::easing::Easing;
use crate::spring::{RestThreshold, Spring};
use crate::step::{Curve, EasingStep};

/// An ordered, immutable list of easing steps for one value
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sequence {
    steps: SmallVec<[EasingStep; 4]>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step
    pub fn then(mut self, step: EasingStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Append a unit-mass spring step
    pub fn spring(self, target: f32, damping: f32, stiffness: f32) -> Self {
        self.then(EasingStep::spring(target, damping, stiffness))
    }

    /// Append an ease-in-out timed step
    pub fn timing(self, target: f32, duration_ms: u32) -> Self {
        self.then(EasingStep::timing(target, duration_ms))
    }

    pub fn steps(&self) -> &[EasingStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Where the value ends up once every step has completed
    pub fn final_target(&self) -> Option<f32> {
        self.steps.last().map(|s| s.target)
    }

    /// Total duration when every step is timed; `None` if any step is a spring
    pub fn fixed_duration_ms(&self) -> Option<u32> {
        self.steps.iter().map(EasingStep::duration_ms).sum()
    }
}

impl From<EasingStep> for Sequence {
    fn from(step: EasingStep) -> Self {
        Self::new().then(step)
    }
}

impl FromIterator<EasingStep> for Sequence {
    fn from_iter<I: IntoIterator<Item = EasingStep>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

/// Position and velocity of an animated value
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Motion {
    pub value: f32,
    /// Units per second
    pub velocity: f32,
}

impl Motion {
    pub fn at_rest(value: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
        }
    }
}

enum ActiveStep {
    Spring(Spring),
    Timing {
        from: f32,
        to: f32,
        duration_ms: f32,
        elapsed_ms: f32,
        easing: Easing,
    },
}

impl ActiveStep {
    fn begin(step: &EasingStep, motion: Motion, rest: RestThreshold) -> Self {
        match step.curve {
            Curve::Spring(config) => {
                let mut spring = Spring::new(config, motion.value)
                    .with_velocity(motion.velocity)
                    .with_rest_threshold(rest);
                spring.set_target(step.target);
                ActiveStep::Spring(spring)
            }
            Curve::Timing {
                duration_ms,
                easing,
            } => ActiveStep::Timing {
                from: motion.value,
                to: step.target,
                duration_ms: duration_ms as f32,
                elapsed_ms: 0.0,
                easing,
            },
        }
    }
}

/// Plays one [`Sequence`] against a [`Motion`]
pub struct SequencePlayer {
    sequence: Sequence,
    index: usize,
    active: Option<ActiveStep>,
    rest: RestThreshold,
}

impl SequencePlayer {
    /// Begin the first step from `motion`
    pub fn new(sequence: Sequence, motion: Motion, rest: RestThreshold) -> Self {
        let mut player = Self {
            sequence,
            index: 0,
            active: None,
            rest,
        };
        player.begin(motion);
        player
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Index of the running step, `None` once every step has completed
    pub fn step_index(&self) -> Option<usize> {
        self.active.as_ref().map(|_| self.index)
    }

    pub fn is_finished(&self) -> bool {
        self.active.is_none()
    }

    /// Advance by `dt` seconds, writing the result into `motion`.
    ///
    /// Returns how many steps completed during this frame.
    pub fn advance(&mut self, motion: &mut Motion, dt: f32) -> usize {
        let mut remaining_ms = (dt * 1000.0).max(0.0);
        let mut completed = 0;

        while let Some(active) = self.active.as_mut() {
            match active {
                ActiveStep::Spring(spring) => {
                    spring.step(remaining_ms / 1000.0);
                    remaining_ms = 0.0;
                    motion.value = spring.value();
                    motion.velocity = spring.velocity();
                    if !spring.is_settled() {
                        break;
                    }
                }
                ActiveStep::Timing {
                    from,
                    to,
                    duration_ms,
                    elapsed_ms,
                    easing,
                } => {
                    let spent = remaining_ms.min(*duration_ms - *elapsed_ms).max(0.0);
                    *elapsed_ms += spent;
                    remaining_ms -= spent;

                    if *elapsed_ms >= *duration_ms {
                        motion.value = *to;
                        motion.velocity = 0.0;
                    } else {
                        let eased = easing.apply(*elapsed_ms / *duration_ms);
                        let value = *from + (*to - *from) * eased;
                        if spent > 0.0 {
                            motion.velocity = (value - motion.value) / (spent / 1000.0);
                        }
                        motion.value = value;
                        break;
                    }
                }
            }

            tracing::trace!(
                step = self.index,
                of = self.sequence.len(),
                value = motion.value,
                "sequence step completed"
            );
            completed += 1;
            self.index += 1;
            self.begin(*motion);
        }

        completed
    }

    fn begin(&mut self, motion: Motion) {
        self.active = self
            .sequence
            .steps
            .get(self.index)
            .map(|step| ActiveStep::begin(step, motion, self.rest));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn play(sequence: Sequence, start: f32) -> (SequencePlayer, Motion) {
        let motion = Motion::at_rest(start);
        (
            SequencePlayer::new(sequence, motion, RestThreshold::default()),
            motion,
        )
    }

    #[test]
    fn test_builder_keeps_order() {
        let seq = Sequence::new()
            .timing(0.8, 100)
            .spring(1.0, 15.0, 400.0);
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.steps()[0].target, 0.8);
        assert_eq!(seq.final_target(), Some(1.0));
        assert_eq!(seq.fixed_duration_ms(), None);
    }

    #[test]
    fn test_fixed_duration_sums_timed_steps() {
        let seq: Sequence = [
            EasingStep::timing(-15.0, 100),
            EasingStep::timing(15.0, 100),
            EasingStep::timing(0.0, 60),
        ]
        .into_iter()
        .collect();
        assert_eq!(seq.fixed_duration_ms(), Some(260));
    }

    #[test]
    fn test_empty_sequence_finishes_immediately() {
        let (mut player, mut motion) = play(Sequence::new(), 0.5);
        assert!(player.is_finished());
        assert_eq!(player.step_index(), None);
        assert_eq!(player.advance(&mut motion, DT), 0);
        assert_eq!(motion.value, 0.5);
    }

    #[test]
    fn test_timing_step_runs_exact_duration() {
        let (mut player, mut motion) = play(Sequence::new().timing(10.0, 110), 0.0);

        // 110ms at 60fps lands between frames 6 and 7
        for _ in 0..6 {
            player.advance(&mut motion, DT);
        }
        assert!(!player.is_finished());
        assert!(motion.value > 0.0 && motion.value < 10.0);

        assert_eq!(player.advance(&mut motion, DT), 1);
        assert!(player.is_finished());
        assert_eq!(motion.value, 10.0);
        assert_eq!(motion.velocity, 0.0);
    }

    #[test]
    fn test_leftover_time_flows_into_next_step() {
        let seq = Sequence::new().timing(1.0, 10).timing(2.0, 100);
        let (mut player, mut motion) = play(seq, 0.0);

        // One 20ms frame: 10ms finishes step 0, 10ms goes into step 1
        assert_eq!(player.advance(&mut motion, 0.020), 1);
        assert_eq!(player.step_index(), Some(1));
        let expected = 1.0 + Easing::EaseInOut.apply(0.1);
        assert!((motion.value - expected).abs() < 1e-5);
    }

    #[test]
    fn test_zero_duration_step_is_hard_cut() {
        let (mut player, mut motion) = play(Sequence::new().timing(5.0, 0), 1.0);
        assert_eq!(player.advance(&mut motion, DT), 1);
        assert_eq!(motion.value, 5.0);
    }

    #[test]
    fn test_spring_step_completes_on_convergence() {
        let (mut player, mut motion) = play(Sequence::new().spring(0.97, 15.0, 400.0), 1.0);
        let mut frames = 0;
        while !player.is_finished() && frames < 600 {
            player.advance(&mut motion, DT);
            frames += 1;
        }
        assert!(player.is_finished());
        assert_eq!(motion.value, 0.97);
        assert_eq!(motion.velocity, 0.0);
    }

    #[test]
    fn test_spring_already_at_target_completes_in_one_frame() {
        let (mut player, mut motion) = play(Sequence::new().spring(1.0, 15.0, 400.0), 1.0);
        assert_eq!(player.advance(&mut motion, DT), 1);
        assert_eq!(motion.value, 1.0);
    }

    #[test]
    fn test_spring_inherits_incoming_velocity() {
        let seq = Sequence::new().spring(0.0, 15.0, 400.0);
        let mut motion = Motion {
            value: 0.0,
            velocity: 5.0,
        };
        let mut player = SequencePlayer::new(seq, motion, RestThreshold::default());
        player.advance(&mut motion, DT);
        // Already at target, but moving: the spring carries the value past it
        assert!(motion.value > 0.0);
        assert!(!player.is_finished());
    }

    #[test]
    fn test_timing_step_ignores_incoming_velocity() {
        let seq = Sequence::new().timing(1.0, 100);
        let mut motion = Motion {
            value: 0.0,
            velocity: -50.0,
        };
        let mut player = SequencePlayer::new(seq, motion, RestThreshold::default());
        player.advance(&mut motion, DT);
        assert!(motion.value > 0.0);
        assert!(motion.velocity > 0.0);
    }
}
