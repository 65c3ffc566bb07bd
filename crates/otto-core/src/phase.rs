//! Stroke phases of the four-stroke cycle

use serde::{Deserialize, Serialize};
use std::fmt;

/// Crank degrees covered by one full Otto cycle (two crank revolutions)
pub const CYCLE_DEGREES: f64 = 720.0;

/// Crank degrees covered by a single stroke
pub const STROKE_DEGREES: f64 = 180.0;

/// One of the four 180°-wide strokes of the 720° cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Intake,
    Compression,
    Power,
    Exhaust,
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Phase::Intake,
        Phase::Compression,
        Phase::Power,
        Phase::Exhaust,
    ];

    /// The phase for a crank angle: `floor(angle / 180) mod 4`.
    ///
    /// This is the only place the mapping lives. Angles outside [0, 720)
    /// are wrapped first, so every caller agrees on the phase of an angle.
    pub fn from_angle(angle_degrees: f64) -> Phase {
        let angle = normalize_angle(angle_degrees);
        let index = (angle / STROKE_DEGREES).floor() as usize % 4;
        Self::ALL[index]
    }

    pub fn index(self) -> usize {
        match self {
            Phase::Intake => 0,
            Phase::Compression => 1,
            Phase::Power => 2,
            Phase::Exhaust => 3,
        }
    }

    /// The phase that follows this one in the cycle
    pub fn next(self) -> Phase {
        Self::ALL[(self.index() + 1) % 4]
    }

    /// First crank angle belonging to this phase
    pub fn start_angle(self) -> f64 {
        self.index() as f64 * STROKE_DEGREES
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::Intake => "intake",
            Phase::Compression => "compression",
            Phase::Power => "power",
            Phase::Exhaust => "exhaust",
        }
    }

    /// Heading shown above the phase description
    pub fn label(self) -> &'static str {
        match self {
            Phase::Intake => "Intake Stroke",
            Phase::Compression => "Compression Stroke",
            Phase::Power => "Power Stroke",
            Phase::Exhaust => "Exhaust Stroke",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Phase::Intake => "Air-fuel mixture enters the cylinder as the piston moves down.",
            Phase::Compression => "The piston moves upward, compressing the air-fuel mixture.",
            Phase::Power => {
                "The spark plug ignites the compressed mixture, forcing the piston down."
            }
            Phase::Exhaust => "The piston moves up, pushing exhaust gases out of the cylinder.",
        }
    }

    /// Short summary used in the cycle explanation list
    pub fn summary(self) -> &'static str {
        match self {
            Phase::Intake => "The piston moves down, drawing in air-fuel mixture",
            Phase::Compression => "The piston moves up, compressing the air-fuel mixture",
            Phase::Power => "The spark ignites the mixture, forcing the piston down",
            Phase::Exhaust => "The piston moves up, expelling exhaust gases",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown phase '{s}'; valid values: intake, compression, power, exhaust")
            })
    }
}

/// Wrap any crank angle into [0, 720).
///
/// Equivalent to `((angle mod 720) + 720) mod 720`, so negative deltas land
/// at the end of the cycle. Non-finite input maps to 0.
pub fn normalize_angle(angle_degrees: f64) -> f64 {
    if !angle_degrees.is_finite() {
        return 0.0;
    }
    let wrapped = angle_degrees.rem_euclid(CYCLE_DEGREES);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if wrapped >= CYCLE_DEGREES {
        0.0
    } else {
        wrapped
    }
}
