//! Drawing contract between the engine and whatever paints pixels.
//!
//! The render pass only ever talks to a [`Surface`]. The browser bridge
//! implements it over Canvas 2D; [`VectorSurface`](super::vector::VectorSurface)
//! tessellates for GPU hosts; [`RecordingSurface`](super::recording::RecordingSurface)
//! keeps a command log for tests.
//!
//! Transforms follow Canvas 2D semantics: `translate` and `rotate` compose
//! onto the current transform, `save`/`restore` push and pop it.

use glam::Vec2;

use crate::api::types::Viewport;
use crate::renderer::color::Color;

pub trait Surface {
    /// Match the backing store to the viewport.
    fn resize(&mut self, viewport: Viewport);

    /// Erase everything drawn since the last clear.
    fn clear(&mut self);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, angle: f32);

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color);

    /// Closed polygon; fewer than three points draws nothing.
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Straight stroke whose color runs linearly from `start` at `from` to
    /// `end` at `to`.
    fn stroke_gradient(&mut self, from: Vec2, to: Vec2, width: f32, start: Color, end: Color);
}
