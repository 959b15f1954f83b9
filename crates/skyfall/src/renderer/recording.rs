use glam::Vec2;

use crate::api::types::Viewport;
use crate::renderer::color::Color;
use crate::renderer::surface::Surface;

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate(Vec2),
    Rotate(f32),
    FillRect { origin: Vec2, size: Vec2, color: Color },
    FillPolygon { points: Vec<Vec2>, color: Color },
    FillCircle { center: Vec2, radius: f32, color: Color },
    StrokeGradient { from: Vec2, to: Vec2, width: f32, start: Color, end: Color },
}

/// Headless surface that keeps the current frame's commands.
///
/// `clear` drops the log and bumps the clear counter, so after a tick the
/// log holds exactly that tick's drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    clears: u64,
    size: Option<Viewport>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Times `clear` has been called.
    pub fn clear_count(&self) -> u64 {
        self.clears
    }

    /// Last size passed to `resize`.
    pub fn size(&self) -> Option<Viewport> {
        self.size
    }

    /// Number of entity draws (each wrapped in one save/restore pair).
    pub fn draw_groups(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Save))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, viewport: Viewport) {
        self.size = Some(viewport);
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.clears += 1;
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn rotate(&mut self, angle: f32) {
        self.commands.push(DrawCommand::Rotate(angle));
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::FillRect { origin, size, color });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle { center, radius, color });
    }

    fn stroke_gradient(&mut self, from: Vec2, to: Vec2, width: f32, start: Color, end: Color) {
        self.commands.push(DrawCommand::StrokeGradient { from, to, width, start, end });
    }
}
