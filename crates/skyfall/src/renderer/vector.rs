//! Lyon-based surface for GPU hosts.
//!
//! Tessellates every drawing call on the CPU into a flat triangle-list
//! buffer the host uploads as-is. Canvas-style transforms are applied to
//! the input points before tessellation.

use bytemuck::{Pod, Zeroable};
use glam::{Affine2, Vec2};
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

use crate::api::types::Viewport;
use crate::renderer::color::Color;
use crate::renderer::surface::Surface;

/// Per-vertex data for vector rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 24

    fn at(pos: lyon::math::Point, color: Color) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        }
    }
}

/// Vertex constructor for lyon fill tessellation.
struct FillVertexCtor {
    color: Color,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        VectorVertex::at(vertex.position(), self.color)
    }
}

/// Vertex constructor for gradient strokes: each vertex takes the color at
/// its projection onto the stroke axis.
struct GradientVertexCtor {
    from: Vec2,
    axis: Vec2,
    start: Color,
    end: Color,
}

impl StrokeVertexConstructor<VectorVertex> for GradientVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        let pos = vertex.position();
        let len_sq = self.axis.length_squared();
        let t = if len_sq > 0.0 {
            (Vec2::new(pos.x, pos.y) - self.from).dot(self.axis) / len_sq
        } else {
            1.0
        };
        VectorVertex::at(pos, self.start.lerp(self.end, t))
    }
}

/// Surface that tessellates into a flat `[x, y, r, g, b, a]` buffer.
///
/// Cleared each frame and repopulated by the render pass.
pub struct VectorSurface {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
    transform: Affine2,
    stack: Vec<Affine2>,
    size: Viewport,
}

impl VectorSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(16384 * VectorVertex::FLOATS),
            transform: Affine2::IDENTITY,
            stack: Vec::new(),
            size: viewport,
        }
    }

    /// Number of vertices currently in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    /// Raw pointer to the flat float buffer.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }

    pub fn size(&self) -> Viewport {
        self.size
    }

    fn to_world(&self, p: Vec2) -> Vec2 {
        self.transform.transform_point2(p)
    }

    /// Flush indexed geometry to the flat buffer as triangle list.
    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color }),
        );

        if result.is_ok() {
            self.flush_geometry();
        } else {
            self.geometry.vertices.clear();
            self.geometry.indices.clear();
        }
    }
}

impl Surface for VectorSurface {
    fn resize(&mut self, viewport: Viewport) {
        self.size = viewport;
    }

    fn clear(&mut self) {
        self.buffer.clear();
        self.transform = Affine2::IDENTITY;
        self.stack.clear();
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform = self.transform * Affine2::from_translation(offset);
    }

    fn rotate(&mut self, angle: f32) {
        self.transform = self.transform * Affine2::from_angle(angle);
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        let points = [
            origin,
            Vec2::new(origin.x + size.x, origin.y),
            origin + size,
            Vec2::new(origin.x, origin.y + size.y),
        ];
        self.fill_polygon(&points, color);
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }

        let first = self.to_world(points[0]);
        let mut builder = Path::builder();
        builder.begin(point(first.x, first.y));
        for p in &points[1..] {
            let p = self.to_world(*p);
            builder.line_to(point(p.x, p.y));
        }
        builder.close();
        let path = builder.build();

        self.fill_path(&path, color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }

        let c = self.to_world(center);
        let mut builder = Path::builder();
        builder.add_circle(point(c.x, c.y), radius, lyon::path::Winding::Positive);
        let path = builder.build();

        self.fill_path(&path, color);
    }

    fn stroke_gradient(&mut self, from: Vec2, to: Vec2, width: f32, start: Color, end: Color) {
        if width <= 0.0 {
            return;
        }

        let a = self.to_world(from);
        let b = self.to_world(to);
        let mut builder = Path::builder();
        builder.begin(point(a.x, a.y));
        builder.line_to(point(b.x, b.y));
        builder.end(false);
        let path = builder.build();

        let ctor = GradientVertexCtor {
            from: a,
            axis: b - a,
            start,
            end,
        };
        let result = self.stroke_tess.tessellate_path(
            &path,
            &StrokeOptions::tolerance(0.5).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, ctor),
        );

        if result.is_ok() {
            self.flush_geometry();
        } else {
            self.geometry.vertices.clear();
            self.geometry.indices.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    fn surface() -> VectorSurface {
        VectorSurface::new(Viewport::new(800.0, 600.0))
    }

    fn positions(s: &VectorSurface) -> Vec<Vec2> {
        s.buffer()
            .chunks(VectorVertex::FLOATS)
            .map(|v| Vec2::new(v[0], v[1]))
            .collect()
    }

    #[test]
    fn vector_vertex_is_24_bytes() {
        assert_eq!(size_of::<VectorVertex>(), 24);
        assert_eq!(VectorVertex::STRIDE_BYTES, 24);
    }

    #[test]
    fn fill_rect_produces_two_triangles() {
        let mut s = surface();
        s.fill_rect(Vec2::ZERO, Vec2::new(100.0, 50.0), Color::WHITE);
        assert_eq!(s.vertex_count(), 6);
    }

    #[test]
    fn translate_moves_geometry() {
        let mut s = surface();
        s.save();
        s.translate(Vec2::new(200.0, 100.0));
        s.fill_polygon(
            &[Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)],
            Color::WHITE,
        );
        s.restore();
        for p in positions(&s) {
            assert!(p.x >= 199.9 && p.x <= 210.1 && p.y >= 99.9 && p.y <= 110.1, "{p:?}");
        }
        s.fill_polygon(
            &[Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)],
            Color::WHITE,
        );
        let last = positions(&s).into_iter().skip(3).collect::<Vec<_>>();
        assert!(last.iter().all(|p| p.x <= 10.1 && p.y <= 10.1));
    }

    #[test]
    fn rotate_turns_geometry() {
        let mut s = surface();
        s.rotate(std::f32::consts::FRAC_PI_2);
        s.fill_rect(Vec2::new(10.0, -1.0), Vec2::new(10.0, 2.0), Color::WHITE);
        // A bar along +x becomes a bar along +y.
        for p in positions(&s) {
            assert!(p.y >= 9.9 && p.y <= 20.1, "{p:?}");
            assert!(p.x.abs() <= 1.1, "{p:?}");
        }
    }

    #[test]
    fn gradient_stroke_colors_along_axis() {
        let mut s = surface();
        s.stroke_gradient(
            Vec2::ZERO,
            Vec2::new(100.0, 0.0),
            2.0,
            Color::TRANSPARENT,
            Color::WHITE,
        );
        assert!(s.vertex_count() > 0);
        for v in s.buffer().chunks(VectorVertex::FLOATS) {
            let expected = (v[0] / 100.0).clamp(0.0, 1.0);
            assert!((v[5] - expected).abs() < 0.05, "x={} a={}", v[0], v[5]);
        }
    }

    #[test]
    fn clear_resets_buffer_and_transform() {
        let mut s = surface();
        s.translate(Vec2::new(50.0, 50.0));
        s.fill_circle(Vec2::ZERO, 5.0, Color::WHITE);
        assert!(s.vertex_count() > 0);
        s.clear();
        assert_eq!(s.vertex_count(), 0);
        s.fill_rect(Vec2::ZERO, Vec2::ONE, Color::WHITE);
        assert!(positions(&s).iter().all(|p| p.x <= 1.0 && p.y <= 1.0));
    }
}
