//! Feedback configuration file handling (tactile.toml)
//!
//! Every field has a default, so an empty file is a valid configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tactile_animation::AnimationSettings;

use crate::error::ConfigError;
use crate::press::PressConfig;

/// Top-level feedback configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct FeedbackConfig {
    #[serde(default)]
    pub animation: AnimationSettings,
    #[serde(default)]
    pub press: PressConfig,
}

impl FeedbackConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded feedback config");
        Ok(config)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: FeedbackConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let AnimationSettings {
            frame_rate,
            rest_displacement,
            rest_velocity,
        } = self.animation;
        if frame_rate == 0 {
            return Err(invalid("animation.frame_rate", "must be greater than 0"));
        }
        positive("animation.rest_displacement", rest_displacement)?;
        positive("animation.rest_velocity", rest_velocity)?;

        let PressConfig {
            scale_value,
            damping,
            stiffness,
        } = self.press;
        positive("press.scale_value", scale_value)?;
        positive("press.stiffness", stiffness)?;
        if !damping.is_finite() || damping < 0.0 {
            return Err(invalid(
                "press.damping",
                format!("must be a finite non-negative number, got {damping}"),
            ));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(
            field,
            format!("must be a finite positive number, got {value}"),
        ))
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = FeedbackConfig::from_toml_str("").unwrap();
        assert_eq!(config, FeedbackConfig::default());
        assert_eq!(config.animation.frame_rate, 60);
        assert_eq!(config.press.scale_value, 0.97);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = FeedbackConfig::from_toml_str(
            r#"
            [animation]
            frame_rate = 120

            [press]
            scale_value = 0.9
            "#,
        )
        .unwrap();
        assert_eq!(config.animation.frame_rate, 120);
        assert_eq!(config.animation.rest_displacement, 0.001);
        assert_eq!(config.press.scale_value, 0.9);
        assert_eq!(config.press.damping, 15.0);
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = FeedbackConfig {
            press: PressConfig::new().stiffness(300.0),
            ..Default::default()
        };
        let text = config.to_toml().unwrap();
        assert!(text.contains("[press]"));
        assert_eq!(FeedbackConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_zero_frame_rate() {
        let err = FeedbackConfig::from_toml_str("[animation]\nframe_rate = 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "animation.frame_rate",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_negative_damping() {
        let err = FeedbackConfig::from_toml_str("[press]\ndamping = -1.0\n").unwrap_err();
        assert!(err.to_string().contains("press.damping"));
    }

    #[test]
    fn test_rejects_non_positive_scale() {
        let err = FeedbackConfig::from_toml_str("[press]\nscale_value = 0.0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "press.scale_value",
                ..
            }
        ));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = FeedbackConfig::from_toml_str("[press\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FeedbackConfig::load(&dir.path().join("tactile.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tactile.toml");
        std::fs::write(&path, "[press]\nstiffness = 250.0\n").unwrap();
        let config = FeedbackConfig::load(&path).unwrap();
        assert_eq!(config.press.stiffness, 250.0);
    }
}
