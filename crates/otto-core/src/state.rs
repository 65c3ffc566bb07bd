//! Crank state owned by the cycle clock

use crate::phase::{normalize_angle, Phase};
use serde::{Deserialize, Serialize};

/// Lowest speed multiplier the slider offers
pub const MIN_SPEED: u8 = 1;
/// Highest speed multiplier the slider offers
pub const MAX_SPEED: u8 = 5;

/// Snapshot of the simulated crankshaft.
///
/// `phase` is a cache of `Phase::from_angle(angle_degrees)`. Both are only
/// written through [`CrankState::set_angle`], so they cannot diverge.
/// Deserialization goes through the same setter and ignores any stored phase.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredCrankState")]
pub struct CrankState {
    angle_degrees: f64,
    phase: Phase,
    running: bool,
    speed_multiplier: u8,
}

/// Wire form of [`CrankState`]; the phase is always recomputed on load
#[derive(Deserialize)]
struct StoredCrankState {
    angle_degrees: f64,
    #[serde(default)]
    running: bool,
    #[serde(default = "default_speed")]
    speed_multiplier: u8,
}

fn default_speed() -> u8 {
    MIN_SPEED
}

impl From<StoredCrankState> for CrankState {
    fn from(stored: StoredCrankState) -> Self {
        let mut state = CrankState::at_angle(stored.angle_degrees);
        state.set_running(stored.running);
        state.set_speed_multiplier(stored.speed_multiplier, MIN_SPEED, MAX_SPEED);
        state
    }
}

impl Default for CrankState {
    fn default() -> Self {
        Self {
            angle_degrees: 0.0,
            phase: Phase::Intake,
            running: false,
            speed_multiplier: MIN_SPEED,
        }
    }
}

impl CrankState {
    /// Fresh state: angle 0, stopped, speed 1
    pub fn new() -> Self {
        Self::default()
    }

    /// A stopped state at the given angle (wrapped into [0, 720))
    pub fn at_angle(angle_degrees: f64) -> Self {
        let mut state = Self::default();
        state.set_angle(angle_degrees);
        state
    }

    pub fn angle_degrees(&self) -> f64 {
        self.angle_degrees
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn speed_multiplier(&self) -> u8 {
        self.speed_multiplier
    }

    /// Store a new angle and revalidate the cached phase.
    ///
    /// Returns the previous phase so callers can detect a boundary crossing.
    pub fn set_angle(&mut self, angle_degrees: f64) -> Phase {
        let previous = self.phase;
        self.angle_degrees = normalize_angle(angle_degrees);
        self.phase = Phase::from_angle(self.angle_degrees);
        previous
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Store a speed multiplier, clamped into the given bounds
    pub fn set_speed_multiplier(&mut self, speed: u8, min: u8, max: u8) {
        self.speed_multiplier = speed.clamp(min, max);
    }

    /// Rounded angle as shown in the on-canvas readout
    pub fn rounded_angle(&self) -> i32 {
        self.angle_degrees.round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_matches_startup() {
        let s = CrankState::new();
        assert_eq!(s.angle_degrees(), 0.0);
        assert_eq!(s.phase(), Phase::Intake);
        assert!(!s.running());
        assert_eq!(s.speed_multiplier(), 1);
    }

    #[test]
    fn set_angle_revalidates_phase() {
        let mut s = CrankState::new();
        let prev = s.set_angle(365.0);
        assert_eq!(prev, Phase::Intake);
        assert_eq!(s.phase(), Phase::Power);

        let prev = s.set_angle(-15.0);
        assert_eq!(prev, Phase::Power);
        assert_eq!(s.angle_degrees(), 705.0);
        assert_eq!(s.phase(), Phase::Exhaust);
    }

    #[test]
    fn speed_is_clamped() {
        let mut s = CrankState::new();
        s.set_speed_multiplier(9, MIN_SPEED, MAX_SPEED);
        assert_eq!(s.speed_multiplier(), 5);
        s.set_speed_multiplier(0, MIN_SPEED, MAX_SPEED);
        assert_eq!(s.speed_multiplier(), 1);
    }

    #[test]
    fn loading_recomputes_phase_and_clamps_speed() {
        let s: CrankState = toml::from_str(
            r#"
            angle_degrees = 10.0
            phase = "power"
            running = true
            speed_multiplier = 99
            "#,
        )
        .unwrap();
        assert_eq!(s.phase(), Phase::Intake);
        assert_eq!(s.phase(), Phase::from_angle(s.angle_degrees()));
        assert!(s.running());
        assert_eq!(s.speed_multiplier(), MAX_SPEED);

        let wrapped: CrankState = toml::from_str("angle_degrees = -90.0").unwrap();
        assert_eq!(wrapped.angle_degrees(), 630.0);
        assert_eq!(wrapped.phase(), Phase::Exhaust);
        assert_eq!(wrapped.speed_multiplier(), MIN_SPEED);
    }

    #[test]
    fn saved_state_loads_back() {
        let mut s = CrankState::at_angle(400.0);
        s.set_speed_multiplier(3, MIN_SPEED, MAX_SPEED);
        let text = toml::to_string(&s).unwrap();
        let loaded: CrankState = toml::from_str(&text).unwrap();
        assert_eq!(loaded, s);
    }

    #[test]
    fn rounded_angle_readout() {
        assert_eq!(CrankState::at_angle(359.6).rounded_angle(), 360);
        assert_eq!(CrankState::at_angle(10.2).rounded_angle(), 10);
    }
}
