//! Drawing surface abstraction
//!
//! A frame is replayed onto whatever surface the host has. The viewer paints
//! through egui (on screen or offscreen for snapshots) and tests count calls.

use otto_core::{Color, Point, Rect};

/// Target a [`crate::Frame`] can be replayed onto
pub trait DrawSurface {
    /// Called before the first command with the logical surface size
    fn begin(&mut self, _width: f32, _height: f32) {}

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color);

    fn stroke_circle(&mut self, center: Point, radius: f32, color: Color, width: f32);

    fn line(&mut self, from: Point, to: Point, color: Color, width: f32);

    fn radial_gradient_rect(
        &mut self,
        rect: Rect,
        center: Point,
        radius: f32,
        inner: Color,
        outer: Color,
    );

    fn text(&mut self, position: Point, text: &str, size: f32, color: Color);

    /// Called after the last command
    fn end(&mut self) {}
}

/// Surface that only counts what it was asked to draw
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CountingSurface {
    pub rects: usize,
    pub circles: usize,
    pub lines: usize,
    pub gradients: usize,
    pub texts: Vec<String>,
    pub frames: usize,
}

impl DrawSurface for CountingSurface {
    fn begin(&mut self, _width: f32, _height: f32) {
        self.frames += 1;
    }

    fn fill_rect(&mut self, _rect: Rect, _color: Color) {
        self.rects += 1;
    }

    fn stroke_rect(&mut self, _rect: Rect, _color: Color, _width: f32) {
        self.rects += 1;
    }

    fn fill_circle(&mut self, _center: Point, _radius: f32, _color: Color) {
        self.circles += 1;
    }

    fn stroke_circle(&mut self, _center: Point, _radius: f32, _color: Color, _width: f32) {
        self.circles += 1;
    }

    fn line(&mut self, _from: Point, _to: Point, _color: Color, _width: f32) {
        self.lines += 1;
    }

    fn radial_gradient_rect(
        &mut self,
        _rect: Rect,
        _center: Point,
        _radius: f32,
        _inner: Color,
        _outer: Color,
    ) {
        self.gradients += 1;
    }

    fn text(&mut self, _position: Point, text: &str, _size: f32, _color: Color) {
        self.texts.push(text.to_string());
    }
}
