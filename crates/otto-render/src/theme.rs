//! Color themes for the swappable presentation layer
//!
//! A [`Theme`] only chooses colors. Geometry and particle counts are fixed
//! by the renderer, so every theme draws the same engine.

use crate::RenderError;
use otto_core::Color;
use serde::{Deserialize, Serialize};

/// Palette used by the kinematic renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: Color,
    pub outline: Color,
    pub cylinder: Color,
    pub bore: Color,
    pub intake_open: Color,
    pub intake_closed: Color,
    pub exhaust_open: Color,
    pub exhaust_closed: Color,
    pub spark_active: Color,
    pub spark_inactive: Color,
    pub piston: Color,
    pub rod: Color,
    pub crankshaft: Color,
    pub crank_pin: Color,
    /// Fresh mixture dots during intake
    pub intake_charge: Color,
    /// Mixture dots during compression
    pub compressed_charge: Color,
    pub exhaust_smoke: Color,
    pub combustion_inner: Color,
    pub combustion_outer: Color,
    pub text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

impl Theme {
    pub const NAMES: [&'static str; 2] = ["classic", "dark"];

    /// Light palette: grey engine on white, blue intake, red exhaust
    pub fn classic() -> Self {
        Self {
            background: Color::WHITE,
            outline: Color::from_hex(0x333333),
            cylinder: Color::from_hex(0xDDDDDD),
            bore: Color::from_hex(0xEEEEEE),
            intake_open: Color::from_hex(0x6666FF),
            intake_closed: Color::from_hex(0x6666AA),
            exhaust_open: Color::from_hex(0xFF6666),
            exhaust_closed: Color::from_hex(0xAA6666),
            spark_active: Color::from_hex(0xFFFF00),
            spark_inactive: Color::from_hex(0xAAAAAA),
            piston: Color::from_hex(0x888888),
            rod: Color::from_hex(0x333333),
            crankshaft: Color::from_hex(0x555555),
            crank_pin: Color::from_hex(0x777777),
            intake_charge: Color::from_hex(0xAADDFF),
            compressed_charge: Color::from_hex(0x8899CC),
            exhaust_smoke: Color::from_rgba8(0x99, 0x99, 0x99, 0x55),
            combustion_inner: Color::from_rgba8(255, 200, 0, 179),
            combustion_outer: Color::from_rgba8(255, 0, 0, 26),
            text: Color::BLACK,
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::from_hex(0x16161F),
            outline: Color::from_hex(0xB4B4C8),
            cylinder: Color::from_hex(0x3A3A48),
            bore: Color::from_hex(0x24242E),
            intake_open: Color::from_hex(0x5A8CFF),
            intake_closed: Color::from_hex(0x34466E),
            exhaust_open: Color::from_hex(0xFF5A5A),
            exhaust_closed: Color::from_hex(0x6E3434),
            spark_active: Color::from_hex(0xFFF05A),
            spark_inactive: Color::from_hex(0x5A5A64),
            piston: Color::from_hex(0x9696A5),
            rod: Color::from_hex(0xB4B4C8),
            crankshaft: Color::from_hex(0x50505F),
            crank_pin: Color::from_hex(0x8C8C9B),
            intake_charge: Color::from_hex(0x7FC8FF),
            compressed_charge: Color::from_hex(0x6E82C8),
            exhaust_smoke: Color::from_rgba8(0xB4, 0xB4, 0xB4, 0x55),
            combustion_inner: Color::from_rgba8(255, 210, 40, 200),
            combustion_outer: Color::from_rgba8(255, 40, 0, 30),
            text: Color::from_hex(0xE6E6F0),
        }
    }

    /// Look up a built-in theme by name
    pub fn by_name(name: &str) -> Result<Self, RenderError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "classic" | "light" => Ok(Self::classic()),
            "dark" => Ok(Self::dark()),
            other => Err(RenderError::UnknownTheme(other.to_string())),
        }
    }
}

/// How a config file picks its theme: a built-in name or an inline palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeSetting {
    Named(String),
    Custom(Box<Theme>),
}

impl Default for ThemeSetting {
    fn default() -> Self {
        ThemeSetting::Named("classic".to_string())
    }
}

impl ThemeSetting {
    pub fn resolve(&self) -> Result<Theme, RenderError> {
        match self {
            ThemeSetting::Named(name) => Theme::by_name(name),
            ThemeSetting::Custom(theme) => Ok(**theme),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        theme: ThemeSetting,
    }

    #[test]
    fn classic_matches_canvas_palette() {
        let theme = Theme::classic();
        assert_eq!(theme.intake_open.to_rgba8(), [0x66, 0x66, 0xFF, 0xFF]);
        assert_eq!(theme.spark_active.to_rgba8(), [0xFF, 0xFF, 0x00, 0xFF]);
        assert_eq!(theme.exhaust_smoke.to_rgba8()[3], 0x55);
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(Theme::by_name("Dark").unwrap(), Theme::dark());
        assert_eq!(Theme::by_name("classic").unwrap(), Theme::default());
        assert!(matches!(
            Theme::by_name("neon"),
            Err(RenderError::UnknownTheme(_))
        ));
    }

    #[test]
    fn setting_accepts_name_or_table() {
        let named: Wrapper = toml::from_str(r#"theme = "dark""#).unwrap();
        assert_eq!(named.theme.resolve().unwrap(), Theme::dark());

        let custom: Wrapper = toml::from_str(
            r#"
            [theme]
            piston = { r = 1.0, g = 0.0, b = 0.0, a = 1.0 }
            "#,
        )
        .unwrap();
        let theme = custom.theme.resolve().unwrap();
        assert_eq!(theme.piston, Color::new(1.0, 0.0, 0.0, 1.0));
        // Unspecified colors fall back to the classic palette
        assert_eq!(theme.bore, Theme::classic().bore);
    }
}
