//! Viewer configuration: simulation settings plus a theme choice

use anyhow::{Context, Result};
use otto_core::{SimConfig, DEFAULT_CONFIG_FILE};
use otto_render::{Theme, ThemeSetting};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Contents of `otto.toml` as the viewer reads it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub theme: ThemeSetting,
    #[serde(flatten)]
    pub sim: SimConfig,
}

impl ViewerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ViewerConfig = toml::from_str(text).context("Failed to parse config")?;
        config.sim.validate()?;
        config.theme.resolve()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Palette named or described by the config
    pub fn resolved_theme(&self) -> Result<Theme> {
        Ok(self.theme.resolve()?)
    }
}

/// Everything `otto view` passes to the viewer
#[derive(Debug, Clone, Default)]
pub struct ViewerOptions {
    /// Explicit config path; falls back to `otto.toml` in the working directory
    pub config_path: Option<PathBuf>,
    /// Reload the config file whenever it changes on disk
    pub watch: bool,
    /// Theme override by name
    pub theme: Option<String>,
    /// Initial speed multiplier
    pub speed: Option<i32>,
    /// Start with the engine running
    pub run: bool,
}

impl ViewerOptions {
    /// Config file to read, if any.
    ///
    /// An explicit path is returned even when missing so loading reports it.
    pub fn config_file(&self) -> Option<PathBuf> {
        match &self.config_path {
            Some(path) => Some(path.clone()),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            }
        }
    }

    /// Load the config file and apply command-line overrides
    pub fn load_config(&self) -> Result<ViewerConfig> {
        let mut config = match self.config_file() {
            Some(path) => ViewerConfig::load(&path)?,
            None => ViewerConfig::default(),
        };
        if let Some(name) = &self.theme {
            let setting = ThemeSetting::Named(name.clone());
            setting.resolve()?;
            config.theme = setting;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_sits_beside_sim_sections() {
        let config = ViewerConfig::from_toml_str(
            r#"
            theme = "dark"

            [clock]
            steps_per_second = 30.0
            "#,
        )
        .unwrap();
        assert_eq!(config.resolved_theme().unwrap(), Theme::dark());
        assert_eq!(config.sim.clock.steps_per_second, 30.0);
        assert_eq!(config.sim.layout, otto_core::EngineLayout::default());
    }

    #[test]
    fn defaults_round_trip() {
        let config = ViewerConfig::default();
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("theme = \"classic\""));
        assert_eq!(ViewerConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn unknown_theme_is_rejected() {
        assert!(ViewerConfig::from_toml_str("theme = \"neon\"").is_err());
        let options = ViewerOptions {
            config_path: None,
            theme: Some("neon".to_string()),
            ..ViewerOptions::default()
        };
        assert!(options.load_config().is_err());
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let options = ViewerOptions {
            config_path: Some(PathBuf::from("no/such/dir/otto.toml")),
            ..ViewerOptions::default()
        };
        assert!(options.load_config().is_err());
    }
}
