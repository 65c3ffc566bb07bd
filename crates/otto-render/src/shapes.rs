//! Fixed placement of the static engine parts on the 200×320 surface

use otto_core::{Point, Rect};

/// Logical width of the drawing surface
pub const SURFACE_WIDTH: f32 = 200.0;
/// Logical height of the drawing surface
pub const SURFACE_HEIGHT: f32 = 320.0;

pub const CYLINDER: Rect = Rect::new(75.0, 50.0, 50.0, 150.0);
pub const BORE: Rect = Rect::new(80.0, 55.0, 40.0, 140.0);

pub const INTAKE_VALVE: Point = Point::new(75.0, 60.0);
pub const EXHAUST_VALVE: Point = Point::new(125.0, 60.0);
pub const VALVE_RADIUS: f32 = 8.0;

pub const SPARK_PLUG: Point = Point::new(100.0, 55.0);
pub const SPARK_RADIUS: f32 = 5.0;

pub const PISTON_WIDTH: f32 = 30.0;
pub const PISTON_HEIGHT: f32 = 20.0;

pub const CRANK_PIN_RADIUS: f32 = 8.0;

/// Top of the gas chamber; particles and the combustion glow live below it
pub const CHAMBER_TOP: f32 = 55.0;
pub const CHAMBER_LEFT: f32 = 80.0;
pub const CHAMBER_WIDTH: f32 = 40.0;

/// Horizontal band particles are scattered in
pub const MARKER_X_MIN: f32 = 85.0;
pub const MARKER_X_SPAN: f32 = 30.0;

pub const COMBUSTION_CENTER: Point = Point::new(100.0, 100.0);
pub const COMBUSTION_RADIUS: f32 = 40.0;

pub const READOUT_POSITION: Point = Point::new(20.0, 300.0);
pub const READOUT_SIZE: f32 = 12.0;

pub const OUTLINE_WIDTH: f32 = 2.0;
pub const ROD_WIDTH: f32 = 4.0;

/// Gas region between the chamber top and the piston crown.
///
/// When the crown rises above the chamber top the region flips above it,
/// so the rect always has a non-negative height.
pub fn chamber(piston_y: f32) -> Rect {
    let top = piston_y.min(CHAMBER_TOP);
    Rect::new(
        CHAMBER_LEFT,
        top,
        CHAMBER_WIDTH,
        (piston_y - CHAMBER_TOP).abs(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bore_sits_inside_cylinder() {
        assert!(CYLINDER.min().x <= BORE.min().x);
        assert!(CYLINDER.min().y <= BORE.min().y);
        assert!(BORE.max().x <= CYLINDER.max().x);
        assert!(BORE.max().y <= CYLINDER.max().y);
    }

    #[test]
    fn chamber_never_inverts() {
        assert_eq!(chamber(90.0), Rect::new(80.0, 55.0, 40.0, 35.0));
        assert_eq!(chamber(10.0), Rect::new(80.0, 10.0, 40.0, 45.0));
        assert_eq!(chamber(55.0).height, 0.0);
    }
}
