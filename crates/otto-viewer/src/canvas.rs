//! Paints frames through egui
//!
//! The frame is laid out in a fixed 200×320 logical space; [`CanvasTransform`]
//! scales it uniformly to fit the space egui hands us and centers it.

use otto_core::{Color, Point, Rect};
use otto_render::{lerp_color, DrawSurface, Frame};

/// Concentric rings used to approximate a radial gradient
const GRADIENT_RINGS: usize = 24;

/// Uniform scale plus offset from logical frame units to screen points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    pub origin_x: f32,
    pub origin_y: f32,
    pub scale: f32,
}

impl CanvasTransform {
    /// Fit a `width × height` frame inside the available rect, centered
    pub fn fit(available: egui::Rect, width: f32, height: f32) -> Self {
        let scale = (available.width() / width)
            .min(available.height() / height)
            .max(0.0);
        let origin_x = available.min.x + (available.width() - width * scale) / 2.0;
        let origin_y = available.min.y + (available.height() - height * scale) / 2.0;
        Self {
            origin_x,
            origin_y,
            scale,
        }
    }

    pub fn point(&self, p: Point) -> egui::Pos2 {
        egui::pos2(self.origin_x + p.x * self.scale, self.origin_y + p.y * self.scale)
    }

    pub fn rect(&self, r: Rect) -> egui::Rect {
        egui::Rect::from_min_max(self.point(r.min()), self.point(r.max()))
    }

    pub fn length(&self, len: f32) -> f32 {
        len * self.scale
    }
}

pub fn color32(color: Color) -> egui::Color32 {
    let [r, g, b, a] = color.to_rgba8();
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// [`DrawSurface`] backed by an egui painter
pub struct EguiSurface {
    painter: egui::Painter,
    transform: CanvasTransform,
}

impl EguiSurface {
    pub fn new(painter: egui::Painter, transform: CanvasTransform) -> Self {
        Self { painter, transform }
    }

    /// Allocate space in `ui` and paint the frame into it
    pub fn paint(ui: &mut egui::Ui, frame: &Frame) {
        let available = ui.available_size();
        let (response, painter) = ui.allocate_painter(available, egui::Sense::hover());
        let transform = CanvasTransform::fit(response.rect, frame.width, frame.height);
        let mut surface = EguiSurface::new(painter, transform);
        frame.replay(&mut surface);
    }
}

impl DrawSurface for EguiSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.painter
            .rect_filled(self.transform.rect(rect), 0.0, color32(color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        let stroke = egui::Stroke::new(self.transform.length(width), color32(color));
        self.painter.rect_stroke(self.transform.rect(rect), 0.0, stroke);
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.painter.circle_filled(
            self.transform.point(center),
            self.transform.length(radius),
            color32(color),
        );
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, color: Color, width: f32) {
        let stroke = egui::Stroke::new(self.transform.length(width), color32(color));
        self.painter.circle_stroke(
            self.transform.point(center),
            self.transform.length(radius),
            stroke,
        );
    }

    fn line(&mut self, from: Point, to: Point, color: Color, width: f32) {
        let stroke = egui::Stroke::new(self.transform.length(width), color32(color));
        self.painter.line_segment(
            [self.transform.point(from), self.transform.point(to)],
            stroke,
        );
    }

    fn radial_gradient_rect(
        &mut self,
        rect: Rect,
        center: Point,
        radius: f32,
        inner: Color,
        outer: Color,
    ) {
        let clip = self.transform.rect(rect);
        if clip.height() <= 0.0 {
            return;
        }
        let painter = self.painter.with_clip_rect(clip);
        painter.rect_filled(clip, 0.0, color32(outer));

        let c = self.transform.point(center);
        // Outermost ring first so the bright core ends on top
        for i in (0..GRADIENT_RINGS).rev() {
            let t = (i as f32 + 1.0) / GRADIENT_RINGS as f32;
            let color = lerp_color(inner, outer, t);
            painter.circle_filled(c, self.transform.length(radius * t), color32(color));
        }
    }

    fn text(&mut self, position: Point, text: &str, size: f32, color: Color) {
        self.painter.text(
            self.transform.point(position),
            egui::Align2::LEFT_BOTTOM,
            text,
            egui::FontId::proportional(self.transform.length(size)),
            color32(color),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_keeps_aspect_and_centers() {
        let available = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 640.0));
        let t = CanvasTransform::fit(available, 200.0, 320.0);
        assert_eq!(t.scale, 2.0);
        assert_eq!(t.origin_y, 0.0);
        assert_eq!(t.origin_x, 200.0);
        assert_eq!(t.point(Point::new(100.0, 240.0)), egui::pos2(400.0, 480.0));
    }

    #[test]
    fn rect_maps_corners() {
        let available = egui::Rect::from_min_size(egui::pos2(10.0, 20.0), egui::vec2(200.0, 320.0));
        let t = CanvasTransform::fit(available, 200.0, 320.0);
        let r = t.rect(Rect::new(75.0, 50.0, 50.0, 150.0));
        assert_eq!(r.min, egui::pos2(85.0, 70.0));
        assert_eq!(r.max, egui::pos2(135.0, 220.0));
    }

    #[test]
    fn empty_area_collapses() {
        let available = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(0.0, 100.0));
        assert_eq!(CanvasTransform::fit(available, 200.0, 320.0).scale, 0.0);
    }

    #[test]
    fn translucent_colors_survive() {
        let c = color32(Color::from_rgba8(0x99, 0x99, 0x99, 0x55));
        assert_eq!(c.a(), 0x55);
    }
}
