//! Builds a [`Frame`] for a crank angle

use crate::effects::{sample_markers, PhaseEffect};
use crate::frame::{DrawCommand, Frame, Part};
use crate::shapes::{
    self, BORE, CRANK_PIN_RADIUS, CYLINDER, EXHAUST_VALVE, INTAKE_VALVE, OUTLINE_WIDTH,
    PISTON_HEIGHT, PISTON_WIDTH, READOUT_POSITION, READOUT_SIZE, ROD_WIDTH, SPARK_PLUG,
    SPARK_RADIUS, SURFACE_HEIGHT, SURFACE_WIDTH, VALVE_RADIUS,
};
use crate::theme::Theme;
use otto_core::{
    normalize_angle, Color, CrankState, EngineLayout, Phase, Point, Rect, STROKE_DEGREES,
};
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Turns `(angle, phase)` into drawing instructions.
///
/// Never touches simulation state. The random source only jitters the gas
/// markers, so two renderers with the same seed produce identical frames.
pub struct KinematicRenderer<R: Rng> {
    layout: EngineLayout,
    theme: Theme,
    rng: R,
}

impl KinematicRenderer<StdRng> {
    /// Reproducible renderer for tests and snapshots
    pub fn seeded(layout: EngineLayout, theme: Theme, seed: u64) -> Self {
        Self::new(layout, theme, StdRng::seed_from_u64(seed))
    }
}

impl KinematicRenderer<ThreadRng> {
    /// Renderer with nondeterministic marker noise, as used by the viewer
    pub fn with_thread_rng(layout: EngineLayout, theme: Theme) -> Self {
        Self::new(layout, theme, rand::thread_rng())
    }
}

impl<R: Rng> KinematicRenderer<R> {
    pub fn new(layout: EngineLayout, theme: Theme, rng: R) -> Self {
        Self { layout, theme, rng }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        tracing::debug!("renderer theme changed");
        self.theme = theme;
    }

    pub fn layout(&self) -> &EngineLayout {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: EngineLayout) {
        tracing::debug!(
            crank_radius = layout.crank_radius,
            rod_length = layout.rod_length,
            "renderer layout changed"
        );
        self.layout = layout;
    }

    pub fn render_state(&mut self, state: &CrankState) -> Frame {
        self.render(state.angle_degrees(), state.phase())
    }

    /// Build the frame for `angle_degrees` showing `phase`.
    ///
    /// Valves, spark and the chamber effect follow the phase passed in; the
    /// kinematics follow the angle.
    pub fn render(&mut self, angle_degrees: f64, phase: Phase) -> Frame {
        let angle = normalize_angle(angle_degrees);
        let theme = self.theme;
        let piston_y = self.layout.piston_y(angle) as f32;
        let crank_pin = self.layout.crank_pin(angle);
        let crank_center = self.layout.crank_center();

        let mut frame = Frame::new(SURFACE_WIDTH, SURFACE_HEIGHT, angle, phase);
        frame.piston_y = piston_y;

        frame.push(
            Part::Background,
            DrawCommand::FillRect {
                rect: Rect::new(0.0, 0.0, SURFACE_WIDTH, SURFACE_HEIGHT),
                color: theme.background,
            },
        );

        // Cylinder and bore
        frame.push(
            Part::Cylinder,
            DrawCommand::FillRect {
                rect: CYLINDER,
                color: theme.cylinder,
            },
        );
        frame.push(
            Part::Cylinder,
            DrawCommand::StrokeRect {
                rect: CYLINDER,
                color: theme.outline,
                width: OUTLINE_WIDTH,
            },
        );
        frame.push(
            Part::Bore,
            DrawCommand::FillRect {
                rect: BORE,
                color: theme.bore,
            },
        );

        // Valves
        let intake = if phase == Phase::Intake {
            theme.intake_open
        } else {
            theme.intake_closed
        };
        let exhaust = if phase == Phase::Exhaust {
            theme.exhaust_open
        } else {
            theme.exhaust_closed
        };
        self.push_disc(
            &mut frame,
            Part::IntakeValve,
            INTAKE_VALVE,
            VALVE_RADIUS,
            intake,
            OUTLINE_WIDTH,
        );
        self.push_disc(
            &mut frame,
            Part::ExhaustValve,
            EXHAUST_VALVE,
            VALVE_RADIUS,
            exhaust,
            OUTLINE_WIDTH,
        );

        let spark_on =
            phase == Phase::Power && angle % STROKE_DEGREES < self.layout.ignition_window;
        let spark = if spark_on {
            theme.spark_active
        } else {
            theme.spark_inactive
        };
        self.push_disc(
            &mut frame,
            Part::SparkPlug,
            SPARK_PLUG,
            SPARK_RADIUS,
            spark,
            OUTLINE_WIDTH,
        );

        // Piston, rod, crank
        let piston = Rect::new(
            crank_center.x - PISTON_WIDTH / 2.0,
            piston_y,
            PISTON_WIDTH,
            PISTON_HEIGHT,
        );
        frame.push(
            Part::Piston,
            DrawCommand::FillRect {
                rect: piston,
                color: theme.piston,
            },
        );
        frame.push(
            Part::Piston,
            DrawCommand::StrokeRect {
                rect: piston,
                color: theme.outline,
                width: OUTLINE_WIDTH,
            },
        );
        frame.push(
            Part::ConnectingRod,
            DrawCommand::Line {
                from: Point::new(crank_center.x, piston_y + PISTON_HEIGHT),
                to: crank_pin,
                color: theme.rod,
                width: ROD_WIDTH,
            },
        );
        // The crank outlines keep the rod's heavier line
        let crank_radius = self.layout.crank_radius as f32;
        self.push_disc(
            &mut frame,
            Part::Crankshaft,
            crank_center,
            crank_radius,
            theme.crankshaft,
            ROD_WIDTH,
        );
        self.push_disc(
            &mut frame,
            Part::CrankPin,
            crank_pin,
            CRANK_PIN_RADIUS,
            theme.crank_pin,
            ROD_WIDTH,
        );

        self.push_effect(&mut frame, phase, piston_y);

        frame.push(
            Part::Readout,
            DrawCommand::Text {
                position: READOUT_POSITION,
                text: format!("Crank Angle: {}°", angle.round() as i32),
                size: READOUT_SIZE,
                color: theme.text,
            },
        );

        frame
    }

    /// Filled circle with an outline on top
    fn push_disc(
        &self,
        frame: &mut Frame,
        part: Part,
        center: Point,
        radius: f32,
        color: Color,
        outline_width: f32,
    ) {
        frame.push(part, DrawCommand::FillCircle { center, radius, color });
        frame.push(
            part,
            DrawCommand::StrokeCircle {
                center,
                radius,
                color: self.theme.outline,
                width: outline_width,
            },
        );
    }

    fn push_effect(&mut self, frame: &mut Frame, phase: Phase, piston_y: f32) {
        let chamber = shapes::chamber(piston_y);
        match PhaseEffect::for_phase(phase, &self.theme) {
            PhaseEffect::Markers {
                count,
                radius_min,
                radius_max,
                color,
            } => {
                for marker in
                    sample_markers(&mut self.rng, chamber, count, radius_min, radius_max)
                {
                    frame.push(
                        Part::Particle,
                        DrawCommand::FillCircle {
                            center: marker.center,
                            radius: marker.radius,
                            color,
                        },
                    );
                }
            }
            PhaseEffect::Glow {
                center,
                radius,
                inner,
                outer,
            } => frame.push(
                Part::Combustion,
                DrawCommand::RadialGradientRect {
                    rect: chamber,
                    center,
                    radius,
                    inner,
                    outer,
                },
            ),
        }
    }
}
