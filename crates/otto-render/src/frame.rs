//! Frames of 2D drawing instructions

use crate::surface::DrawSurface;
use otto_core::{Color, Phase, Point, Rect};

/// Which engine part a draw command belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Background,
    Cylinder,
    Bore,
    IntakeValve,
    ExhaustValve,
    SparkPlug,
    Piston,
    ConnectingRod,
    Crankshaft,
    CrankPin,
    /// Mixture or smoke dot
    Particle,
    /// Power-stroke gradient
    Combustion,
    Readout,
}

/// A single drawing primitive in logical surface units
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        width: f32,
    },
    FillCircle {
        center: Point,
        radius: f32,
        color: Color,
    },
    StrokeCircle {
        center: Point,
        radius: f32,
        color: Color,
        width: f32,
    },
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: f32,
    },
    /// Rect filled with a radial gradient; outside `radius` the outer color pads
    RadialGradientRect {
        rect: Rect,
        center: Point,
        radius: f32,
        inner: Color,
        outer: Color,
    },
    Text {
        position: Point,
        text: String,
        size: f32,
        color: Color,
    },
}

impl DrawCommand {
    /// Fill color for fill commands, `None` otherwise
    pub fn fill_color(&self) -> Option<Color> {
        match self {
            DrawCommand::FillRect { color, .. } | DrawCommand::FillCircle { color, .. } => {
                Some(*color)
            }
            _ => None,
        }
    }
}

/// A tagged draw command
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub part: Part,
    pub command: DrawCommand,
}

/// Everything needed to draw one animation frame, in painter order
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    /// Normalized angle the frame was built for
    pub angle_degrees: f64,
    pub phase: Phase,
    pub piston_y: f32,
    pub items: Vec<DrawItem>,
}

impl Frame {
    pub fn new(width: f32, height: f32, angle_degrees: f64, phase: Phase) -> Self {
        Self {
            width,
            height,
            angle_degrees,
            phase,
            piston_y: 0.0,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, part: Part, command: DrawCommand) {
        self.items.push(DrawItem { part, command });
    }

    /// All commands for a part, in painter order
    pub fn part(&self, part: Part) -> impl Iterator<Item = &DrawCommand> {
        self.items
            .iter()
            .filter(move |item| item.part == part)
            .map(|item| &item.command)
    }

    pub fn count(&self, part: Part) -> usize {
        self.part(part).count()
    }

    /// Fill color of the first fill command of a part
    pub fn fill_of(&self, part: Part) -> Option<Color> {
        self.part(part).find_map(DrawCommand::fill_color)
    }

    /// Text of the angle readout
    pub fn readout(&self) -> Option<&str> {
        self.part(Part::Readout).find_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Draw every command onto a surface, in order
    pub fn replay<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        surface.begin(self.width, self.height);
        for item in &self.items {
            match &item.command {
                DrawCommand::FillRect { rect, color } => surface.fill_rect(*rect, *color),
                DrawCommand::StrokeRect { rect, color, width } => {
                    surface.stroke_rect(*rect, *color, *width)
                }
                DrawCommand::FillCircle {
                    center,
                    radius,
                    color,
                } => surface.fill_circle(*center, *radius, *color),
                DrawCommand::StrokeCircle {
                    center,
                    radius,
                    color,
                    width,
                } => surface.stroke_circle(*center, *radius, *color, *width),
                DrawCommand::Line {
                    from,
                    to,
                    color,
                    width,
                } => surface.line(*from, *to, *color, *width),
                DrawCommand::RadialGradientRect {
                    rect,
                    center,
                    radius,
                    inner,
                    outer,
                } => surface.radial_gradient_rect(*rect, *center, *radius, *inner, *outer),
                DrawCommand::Text {
                    position,
                    text,
                    size,
                    color,
                } => surface.text(*position, text, *size, *color),
            }
        }
        surface.end();
    }
}
