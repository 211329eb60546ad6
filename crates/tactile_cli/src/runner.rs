//! Scenario runner that drives feedback elements on a fixed frame clock.

use anyhow::{bail, Result};
use tactile_animation::AnimationScheduler;
use tactile_feedback::{FeedbackConfig, LikeFeedback, LikeHandle, PressFeedback, PressHandle};

use crate::report::{FrameSample, SimulationReport};
use crate::scenario::{Scenario, ScenarioStep, Target};

/// Options for a simulation run.
#[derive(Debug, Clone, Copy)]
pub struct SimulationOptions {
    /// Sampling interval in frames (1 = every frame).
    pub sample_every: u64,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self { sample_every: 4 }
    }
}

/// Mounted elements plus the weak handles triggers go through.
///
/// Triggers always use the handles, so a trigger after `unmount` exercises
/// the same silent no-op path an event callback would hit.
struct Stage {
    scheduler: AnimationScheduler,
    press: Option<PressFeedback>,
    like: Option<LikeFeedback>,
    press_handle: PressHandle,
    like_handle: LikeHandle,
}

impl Stage {
    fn mount(config: &FeedbackConfig) -> Self {
        let mut scheduler = AnimationScheduler::with_settings(&config.animation);
        let press = PressFeedback::with_settings(config.press, &config.animation);
        let like = LikeFeedback::with_settings(&config.animation);
        press.attach(&mut scheduler);
        like.attach(&mut scheduler);

        Self {
            scheduler,
            press_handle: press.handle(),
            like_handle: like.handle(),
            press: Some(press),
            like: Some(like),
        }
    }

    fn apply(&mut self, step: &ScenarioStep) {
        match step {
            ScenarioStep::PressIn => self.press_handle.on_press_in(),
            ScenarioStep::PressOut => self.press_handle.on_press_out(),
            ScenarioStep::Like => self.like_handle.trigger_like(),
            ScenarioStep::Unlike => self.like_handle.trigger_unlike(),
            ScenarioStep::ToggleLike => {
                self.like_handle.toggle();
            }
            ScenarioStep::Unmount { target } => {
                tracing::debug!(?target, "unmounting element");
                match target {
                    Target::Press => self.press = None,
                    Target::Like => self.like = None,
                }
            }
            ScenarioStep::Tick { .. } | ScenarioStep::Wait { .. } => {}
        }
    }

    fn sample(&self) -> FrameSample {
        let clock = self.scheduler.clock();
        let like_values = self.like_handle.values();
        FrameSample {
            frame: clock.frame(),
            elapsed_ms: clock.elapsed_ms(),
            press_scale: self.press_handle.scale(),
            like_scale: like_values.map(|(scale, _)| scale),
            like_rotation: like_values.map(|(_, rotation)| rotation),
            press_transform: self.press.as_ref().map(|p| p.transform().to_string()),
            like_transform: self.like.as_ref().map(|l| l.transform().to_string()),
        }
    }
}

/// Execute a scenario against freshly mounted press and like elements.
pub fn run_scenario(
    scenario: &Scenario,
    config: &FeedbackConfig,
    options: SimulationOptions,
) -> Result<SimulationReport> {
    if options.sample_every == 0 {
        bail!("sample_every must be > 0");
    }
    config.validate()?;

    let mut stage = Stage::mount(config);
    let mut samples = vec![stage.sample()];

    for (step_index, step) in scenario.steps.iter().enumerate() {
        let frames = match *step {
            ScenarioStep::Tick { frames } => frames,
            ScenarioStep::Wait { ms } => match stage.scheduler.clock().frames_for_ms(ms) {
                Some(frames) => frames,
                None => bail!("step {step_index}: wait of {ms} ms is too long"),
            },
            _ => {
                tracing::trace!(step_index, ?step, "applying trigger");
                stage.apply(step);
                continue;
            }
        };

        for _ in 0..frames {
            stage.scheduler.tick_frame();
            if stage.scheduler.clock().frame() % options.sample_every == 0 {
                samples.push(stage.sample());
            }
        }
    }

    let clock = *stage.scheduler.clock();
    let settled = !stage.scheduler.has_active_animations();
    tracing::info!(
        frames = clock.frame(),
        samples = samples.len(),
        settled,
        "simulation finished"
    );

    Ok(SimulationReport {
        frame_rate: clock.frame_rate(),
        elapsed_frames: clock.frame(),
        elapsed_ms: clock.elapsed_ms(),
        settled,
        final_state: stage.sample(),
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(json: &str) -> SimulationReport {
        let scenario = Scenario::from_json(json).unwrap();
        run_scenario(&scenario, &FeedbackConfig::default(), SimulationOptions::default()).unwrap()
    }

    #[test]
    fn test_press_cycle_settles() {
        let report = run(
            r#"{ "steps": [
                { "type": "press_in" }, { "type": "wait", "ms": 2000 },
                { "type": "press_out" }, { "type": "wait", "ms": 2000 }
            ] }"#,
        );
        assert!(report.settled);
        assert_eq!(report.elapsed_frames, 240);
        assert_eq!(report.final_state.press_scale, Some(1.0));

        let lowest = report
            .samples
            .iter()
            .filter_map(|s| s.press_scale)
            .fold(f32::MAX, f32::min);
        assert!((lowest - 0.97).abs() < 0.015);
    }

    #[test]
    fn test_samples_follow_interval() {
        let report = run(r#"{ "steps": [{ "type": "tick", "frames": 10 }] }"#);
        let frames: Vec<u64> = report.samples.iter().map(|s| s.frame).collect();
        assert_eq!(frames, vec![0, 4, 8]);
    }

    #[test]
    fn test_unmounted_element_reports_none_and_ignores_triggers() {
        let report = run(
            r#"{ "steps": [
                { "type": "like" }, { "type": "tick", "frames": 2 },
                { "type": "unmount", "target": "like" },
                { "type": "like" }, { "type": "toggle_like" },
                { "type": "tick", "frames": 4 }
            ] }"#,
        );
        assert_eq!(report.final_state.like_scale, None);
        assert_eq!(report.final_state.like_transform, None);
        assert_eq!(report.final_state.press_scale, Some(1.0));
        assert!(report.settled);
    }

    #[test]
    fn test_toggle_like_round_trip() {
        let report = run(
            r#"{ "steps": [
                { "type": "toggle_like" }, { "type": "wait", "ms": 200 },
                { "type": "toggle_like" }, { "type": "wait", "ms": 20000 }
            ] }"#,
        );
        assert!(report.settled);
        assert_eq!(report.final_state.like_scale, Some(1.0));
        assert_eq!(
            report.final_state.like_transform.as_deref(),
            Some("scale(1.000) rotate(0.0deg)")
        );
    }

    #[test]
    fn test_toggle_after_like_plays_unlike() {
        let report = run(
            r#"{ "steps": [
                { "type": "like" }, { "type": "wait", "ms": 20000 },
                { "type": "toggle_like" }, { "type": "tick", "frames": 6 }
            ] }"#,
        );
        let last = report.samples.last().unwrap();
        let scale = last.like_scale.unwrap();
        assert!(scale < 1.0, "expected the unlike squash, got {scale}");
        assert_eq!(last.like_rotation, Some(0.0));
    }

    #[test]
    fn test_rejects_overlong_wait() {
        let scenario =
            Scenario::from_json(r#"{ "steps": [{ "type": "wait", "ms": 18446744073709551615 }] }"#)
                .unwrap();
        let result = run_scenario(&scenario, &FeedbackConfig::default(), SimulationOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_zero_sample_interval() {
        let scenario = Scenario::from_json(r#"{ "steps": [] }"#).unwrap();
        let err = run_scenario(
            &scenario,
            &FeedbackConfig::default(),
            SimulationOptions { sample_every: 0 },
        );
        assert!(err.is_err());
    }
}
