use std::f64::consts::TAU;

use glam::Vec2;
use skyfall::{Color, Surface, Viewport};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// 2-D canvas context as a drawing surface.
///
/// The canvas sits above page content and never takes pointer input.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    size: Viewport,
}

impl CanvasSurface {
    /// `None` when the browser cannot hand out a 2-D context.
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        if canvas.style().set_property("pointer-events", "none").is_err() {
            log::warn!("canvas: could not disable pointer events");
        }
        let size = Viewport::new(canvas.width() as f32, canvas.height() as f32);
        Some(Self { canvas, ctx, size })
    }

    fn trace(&self, points: &[Vec2]) {
        self.ctx.begin_path();
        if let Some((first, rest)) = points.split_first() {
            self.ctx.move_to(first.x as f64, first.y as f64);
            for p in rest {
                self.ctx.line_to(p.x as f64, p.y as f64);
            }
        }
        self.ctx.close_path();
    }

    #[allow(deprecated)]
    fn set_fill(&self, color: Color) {
        self.ctx.set_fill_style(&JsValue::from_str(&color.to_css()));
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width.max(0.0) as u32);
        self.canvas.set_height(viewport.height.max(0.0) as u32);
        self.size = viewport;
    }

    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.size.width as f64, self.size.height as f64);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        let _ = self.ctx.translate(offset.x as f64, offset.y as f64);
    }

    fn rotate(&mut self, angle: f32) {
        let _ = self.ctx.rotate(angle as f64);
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.set_fill(color);
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }
        self.set_fill(color);
        self.trace(points);
        self.ctx.fill();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.set_fill(color);
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        self.ctx.fill();
    }

    #[allow(deprecated)]
    fn stroke_gradient(&mut self, from: Vec2, to: Vec2, width: f32, start: Color, end: Color) {
        let gradient = self
            .ctx
            .create_linear_gradient(from.x as f64, from.y as f64, to.x as f64, to.y as f64);
        if gradient.add_color_stop(0.0, &start.to_css()).is_err()
            || gradient.add_color_stop(1.0, &end.to_css()).is_err()
        {
            return;
        }
        self.ctx.set_stroke_style(&gradient);
        self.ctx.set_line_width(width as f64);
        self.ctx.set_line_cap("round");
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }
}
