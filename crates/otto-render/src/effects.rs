//! Phase-dependent gas effects: mixture dots, combustion glow, exhaust smoke
//!
//! Marker positions are resampled on every frame from the injected random
//! source. This is visual noise, not simulation state.

use crate::shapes::{COMBUSTION_CENTER, COMBUSTION_RADIUS, MARKER_X_MIN, MARKER_X_SPAN};
use crate::theme::Theme;
use otto_core::{Color, Phase, Point, Rect};
use rand::Rng;

/// Dot count drawn during intake and compression
pub const CHARGE_MARKERS: usize = 20;
/// Dot count drawn during exhaust
pub const SMOKE_MARKERS: usize = 15;

/// What the chamber shows for a phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseEffect {
    /// A batch of randomly placed dots
    Markers {
        count: usize,
        radius_min: f32,
        radius_max: f32,
        color: Color,
    },
    /// A radial gradient filling the chamber
    Glow {
        center: Point,
        radius: f32,
        inner: Color,
        outer: Color,
    },
}

impl PhaseEffect {
    pub fn for_phase(phase: Phase, theme: &Theme) -> Self {
        match phase {
            Phase::Intake => PhaseEffect::Markers {
                count: CHARGE_MARKERS,
                radius_min: 1.0,
                radius_max: 3.0,
                color: theme.intake_charge,
            },
            Phase::Compression => PhaseEffect::Markers {
                count: CHARGE_MARKERS,
                radius_min: 1.0,
                radius_max: 3.0,
                color: theme.compressed_charge,
            },
            Phase::Power => PhaseEffect::Glow {
                center: COMBUSTION_CENTER,
                radius: COMBUSTION_RADIUS,
                inner: theme.combustion_inner,
                outer: theme.combustion_outer,
            },
            Phase::Exhaust => PhaseEffect::Markers {
                count: SMOKE_MARKERS,
                radius_min: 2.0,
                radius_max: 5.0,
                color: theme.exhaust_smoke,
            },
        }
    }
}

/// One sampled dot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub center: Point,
    pub radius: f32,
}

/// Scatter `count` markers over the chamber.
///
/// x is drawn from the marker band, y from `[chamber.y, chamber.y + height)`;
/// a collapsed chamber pins every marker to its top edge.
pub fn sample_markers<R: Rng>(
    rng: &mut R,
    chamber: Rect,
    count: usize,
    radius_min: f32,
    radius_max: f32,
) -> Vec<Marker> {
    (0..count)
        .map(|_| {
            let x = MARKER_X_MIN + rng.gen::<f32>() * MARKER_X_SPAN;
            let y = chamber.y + rng.gen::<f32>() * chamber.height;
            let radius = radius_min + rng.gen::<f32>() * (radius_max - radius_min);
            Marker {
                center: Point::new(x, y),
                radius,
            }
        })
        .collect()
}

fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear interpolation between two RGBA colors
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    Color::new(
        lerp_f32(a.r, b.r, t),
        lerp_f32(a.g, b.g, t),
        lerp_f32(a.b, b.b, t),
        lerp_f32(a.a, b.a, t),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn effect_table() {
        let theme = Theme::classic();
        match PhaseEffect::for_phase(Phase::Exhaust, &theme) {
            PhaseEffect::Markers {
                count,
                radius_min,
                radius_max,
                ..
            } => {
                assert_eq!(count, 15);
                assert_eq!((radius_min, radius_max), (2.0, 5.0));
            }
            other => panic!("unexpected effect {other:?}"),
        }
        assert!(matches!(
            PhaseEffect::for_phase(Phase::Power, &theme),
            PhaseEffect::Glow { .. }
        ));
    }

    #[test]
    fn markers_stay_in_band() {
        let mut rng = StdRng::seed_from_u64(7);
        let chamber = Rect::new(80.0, 55.0, 40.0, 35.0);
        let markers = sample_markers(&mut rng, chamber, 500, 1.0, 3.0);
        assert_eq!(markers.len(), 500);
        for m in markers {
            assert!(m.center.x >= 85.0 && m.center.x <= 115.0);
            assert!(m.center.y >= 55.0 && m.center.y <= 90.0);
            assert!(m.radius >= 1.0 && m.radius <= 3.0);
        }
    }

    #[test]
    fn collapsed_chamber_pins_markers_to_top() {
        let mut rng = StdRng::seed_from_u64(1);
        let chamber = Rect::new(80.0, 55.0, 40.0, 0.0);
        for m in sample_markers(&mut rng, chamber, 20, 1.0, 3.0) {
            assert_eq!(m.center.y, 55.0);
        }
    }

    #[test]
    fn lerp_color_midpoint() {
        let white = Color::new(1.0, 1.0, 1.0, 1.0);
        let black = Color::new(0.0, 0.0, 0.0, 0.0);
        let mid = lerp_color(white, black, 0.5);
        assert_eq!(mid, Color::new(0.5, 0.5, 0.5, 0.5));
    }
}
