//! Simulator configuration loaded from `otto.toml`
//!
//! Every field has a default, so an empty file (or no file) yields the
//! classic single-cylinder layout running at 60 steps per second.

use crate::error::{OttoError, Result};
use crate::geometry::EngineLayout;
use crate::phase::STROKE_DEGREES;
use crate::state::{MAX_SPEED, MIN_SPEED};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "otto.toml";

/// Fixed-step settings for the cycle clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Logical steps per second of wall time
    #[serde(default = "default_steps_per_second")]
    pub steps_per_second: f64,
    /// Crank degrees added per step at speed 1
    #[serde(default = "default_degrees_per_step")]
    pub degrees_per_step: f64,
    #[serde(default = "default_min_speed")]
    pub min_speed: u8,
    #[serde(default = "default_max_speed")]
    pub max_speed: u8,
}

fn default_steps_per_second() -> f64 {
    60.0
}
fn default_degrees_per_step() -> f64 {
    2.0
}
fn default_min_speed() -> u8 {
    MIN_SPEED
}
fn default_max_speed() -> u8 {
    MAX_SPEED
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            steps_per_second: default_steps_per_second(),
            degrees_per_step: default_degrees_per_step(),
            min_speed: default_min_speed(),
            max_speed: default_max_speed(),
        }
    }
}

impl ClockConfig {
    /// Length of one logical step in milliseconds
    pub fn step_ms(&self) -> f64 {
        1000.0 / self.steps_per_second
    }

    pub fn validate(&self) -> Result<()> {
        if !self.steps_per_second.is_finite() || self.steps_per_second <= 0.0 {
            return Err(OttoError::InvalidConfig(format!(
                "steps_per_second must be positive, got {}",
                self.steps_per_second
            )));
        }
        if !self.degrees_per_step.is_finite() || self.degrees_per_step <= 0.0 {
            return Err(OttoError::InvalidConfig(format!(
                "degrees_per_step must be positive, got {}",
                self.degrees_per_step
            )));
        }
        if self.min_speed == 0 || self.min_speed > self.max_speed {
            return Err(OttoError::InvalidConfig(format!(
                "speed range {}..={} is empty or starts at zero",
                self.min_speed, self.max_speed
            )));
        }
        // A single step must never jump over a whole stroke
        let max_step = self.degrees_per_step * self.max_speed as f64;
        if max_step >= STROKE_DEGREES {
            return Err(OttoError::InvalidConfig(format!(
                "degrees_per_step × max_speed ({max_step}) must stay below {STROKE_DEGREES}"
            )));
        }
        Ok(())
    }
}

/// Top-level simulation settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub layout: EngineLayout,
}

impl SimConfig {
    /// Parse and validate a config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SimConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.clock.validate()?;
        self.layout.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = SimConfig::from_toml_str("").unwrap();
        assert_eq!(config, SimConfig::default());
        assert!((config.clock.step_ms() - 1000.0 / 60.0).abs() < 1e-10);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = SimConfig::from_toml_str(
            r#"
            [clock]
            steps_per_second = 30.0

            [layout]
            rod_length = 120.0
            "#,
        )
        .unwrap();
        assert_eq!(config.clock.steps_per_second, 30.0);
        assert_eq!(config.clock.degrees_per_step, 2.0);
        assert_eq!(config.layout.rod_length, 120.0);
        assert_eq!(config.layout.crank_radius, 40.0);
    }

    #[test]
    fn toml_round_trip() {
        let config = SimConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(SimConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = SimConfig::from_toml_str("[clock]\nsteps_per_second = 0.0\n").unwrap_err();
        assert!(matches!(err, OttoError::InvalidConfig(_)));

        let err = SimConfig::from_toml_str("[clock]\nmin_speed = 4\nmax_speed = 2\n").unwrap_err();
        assert!(matches!(err, OttoError::InvalidConfig(_)));

        let err = SimConfig::from_toml_str("[clock]\ndegrees_per_step = 40.0\n").unwrap_err();
        assert!(matches!(err, OttoError::InvalidConfig(_)));

        let err = SimConfig::from_toml_str("[layout]\nrod_length = 10.0\n").unwrap_err();
        assert!(matches!(err, OttoError::InvalidConfig(_)));

        let err = SimConfig::from_toml_str("[clock\n").unwrap_err();
        assert!(matches!(err, OttoError::TomlParseError(_)));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config =
            SimConfig::load_or_default(Path::new("definitely/not/here/otto.toml")).unwrap();
        assert_eq!(config, SimConfig::default());
    }
}
