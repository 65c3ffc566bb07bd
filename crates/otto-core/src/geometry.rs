//! Slider-crank kinematics
//!
//! Maps a crank angle onto the piston height, crank pin position, valve
//! states and spark indicator for one cylinder.

use crate::error::{OttoError, Result};
use crate::phase::{normalize_angle, Phase, STROKE_DEGREES};
use crate::types::Point;
use serde::{Deserialize, Serialize};

/// Layout constants of the drawn engine, in logical surface units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineLayout {
    /// Crank throw `r`; the stroke is `2r`
    #[serde(default = "default_crank_radius")]
    pub crank_radius: f64,
    /// Connecting-rod length `L`
    #[serde(default = "default_rod_length")]
    pub rod_length: f64,
    #[serde(default = "default_base_y")]
    pub base_y: f64,
    #[serde(default = "default_center_x")]
    pub center_x: f64,
    #[serde(default = "default_crank_center_y")]
    pub crank_center_y: f64,
    /// Degrees after the start of the power stroke during which the spark shows
    #[serde(default = "default_ignition_window")]
    pub ignition_window: f64,
}

fn default_crank_radius() -> f64 {
    40.0
}
fn default_rod_length() -> f64 {
    100.0
}
fn default_base_y() -> f64 {
    150.0
}
fn default_center_x() -> f64 {
    100.0
}
fn default_crank_center_y() -> f64 {
    240.0
}
fn default_ignition_window() -> f64 {
    20.0
}

impl Default for EngineLayout {
    fn default() -> Self {
        Self {
            crank_radius: default_crank_radius(),
            rod_length: default_rod_length(),
            base_y: default_base_y(),
            center_x: default_center_x(),
            crank_center_y: default_crank_center_y(),
            ignition_window: default_ignition_window(),
        }
    }
}

impl EngineLayout {
    /// Reject layouts for which the slider-crank equation is undefined
    pub fn validate(&self) -> Result<()> {
        let finite = [
            self.crank_radius,
            self.rod_length,
            self.base_y,
            self.center_x,
            self.crank_center_y,
            self.ignition_window,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(OttoError::InvalidConfig(
                "layout values must be finite numbers".into(),
            ));
        }
        if self.crank_radius <= 0.0 {
            return Err(OttoError::InvalidConfig(format!(
                "crank_radius must be positive, got {}",
                self.crank_radius
            )));
        }
        if self.rod_length <= self.crank_radius {
            return Err(OttoError::InvalidConfig(format!(
                "rod_length ({}) must exceed crank_radius ({})",
                self.rod_length, self.crank_radius
            )));
        }
        if !(0.0..=STROKE_DEGREES).contains(&self.ignition_window) {
            return Err(OttoError::ValueOutOfRange {
                field: "ignition_window".into(),
                min: 0.0,
                max: STROKE_DEGREES,
                value: self.ignition_window,
            });
        }
        Ok(())
    }

    /// Piston height for a crank angle:
    /// `base_y − r·cos θ − sqrt(L² − (r·sin θ)²)`
    pub fn piston_y(&self, angle_degrees: f64) -> f64 {
        let theta = angle_degrees.to_radians();
        let r = self.crank_radius;
        let l = self.rod_length;
        let offset = r * theta.sin();
        // Clamp guards against rounding when L is barely longer than r
        let rod_rise = (l * l - offset * offset).max(0.0).sqrt();
        self.base_y - r * theta.cos() - rod_rise
    }

    pub fn crank_pin(&self, angle_degrees: f64) -> Point {
        let theta = angle_degrees.to_radians();
        Point::new(
            (self.center_x + self.crank_radius * theta.sin()) as f32,
            (self.crank_center_y - self.crank_radius * theta.cos()) as f32,
        )
    }

    pub fn crank_center(&self) -> Point {
        Point::new(self.center_x as f32, self.crank_center_y as f32)
    }

    /// Spark shows during the first `ignition_window` degrees of the power stroke
    pub fn spark_active(&self, angle_degrees: f64) -> bool {
        let angle = normalize_angle(angle_degrees);
        Phase::from_angle(angle) == Phase::Power
            && angle % STROKE_DEGREES < self.ignition_window
    }
}

/// Everything derived from a single crank angle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EngineGeometry {
    pub angle_degrees: f64,
    pub phase: Phase,
    pub piston_y: f64,
    pub crank_pin: Point,
    pub intake_valve_open: bool,
    pub exhaust_valve_open: bool,
    pub spark_active: bool,
}

impl EngineGeometry {
    /// Derive the geometry for an angle; the angle is wrapped into [0, 720) first
    pub fn compute(angle_degrees: f64, layout: &EngineLayout) -> Self {
        let angle = normalize_angle(angle_degrees);
        let phase = Phase::from_angle(angle);
        Self {
            angle_degrees: angle,
            phase,
            piston_y: layout.piston_y(angle),
            crank_pin: layout.crank_pin(angle),
            intake_valve_open: phase == Phase::Intake,
            exhaust_valve_open: phase == Phase::Exhaust,
            spark_active: layout.spark_active(angle),
        }
    }
}
