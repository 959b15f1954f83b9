//! Render pass: paint live entities onto a [`Surface`].
//!
//! Every entity is drawn inside its own save/restore pair, translated to
//! its position (and rotated, for asteroids). Nothing here mutates state.

use glam::Vec2;

use crate::components::entity::{Body, Entity, Rock, Tail};
use crate::renderer::color::Color;
use crate::renderer::surface::Surface;

const SATELLITE_BODY: Color = Color::rgb(0.80, 0.84, 0.90);
const SATELLITE_PANEL: Color = Color::rgb(0.35, 0.51, 0.78);
/// Panel wing length relative to body size.
const PANEL_SPAN: f32 = 1.6;
/// Panel wing thickness relative to body size.
const PANEL_THICKNESS: f32 = 0.5;

const ROCK: Color = Color::rgb(0.55, 0.48, 0.40);

const COMET_HEAD: Color = Color::rgb(0.94, 0.96, 1.0);
const COMET_TAIL_END: Color = Color::TRANSPARENT;

/// Draw every entity of a population slice.
pub fn draw_all<S: Surface + ?Sized>(surface: &mut S, entities: &[Entity]) {
    for entity in entities {
        draw_entity(surface, entity);
    }
}

/// Draw one entity at its current state.
pub fn draw_entity<S: Surface + ?Sized>(surface: &mut S, entity: &Entity) {
    surface.save();
    surface.translate(entity.pos);
    match &entity.body {
        Body::Satellite { size } => draw_satellite(surface, *size, entity.opacity),
        Body::Asteroid(rock) => draw_asteroid(surface, rock, entity.opacity),
        Body::Comet(tail) => draw_comet(surface, tail, entity.angle, entity.opacity),
        Body::Orbiter(orbit) => {
            surface.fill_circle(Vec2::ZERO, orbit.size, orbit.color.scale_alpha(entity.opacity))
        }
    }
    surface.restore();
}

fn draw_satellite<S: Surface + ?Sized>(surface: &mut S, size: f32, opacity: f32) {
    let half = size / 2.0;
    let span = size * PANEL_SPAN;
    let thickness = size * PANEL_THICKNESS;
    let panel = SATELLITE_PANEL.scale_alpha(opacity);

    surface.fill_rect(Vec2::splat(-half), Vec2::splat(size), SATELLITE_BODY.scale_alpha(opacity));
    surface.fill_rect(
        Vec2::new(-half - span, -thickness / 2.0),
        Vec2::new(span, thickness),
        panel,
    );
    surface.fill_rect(
        Vec2::new(half, -thickness / 2.0),
        Vec2::new(span, thickness),
        panel,
    );
}

fn draw_asteroid<S: Surface + ?Sized>(surface: &mut S, rock: &Rock, opacity: f32) {
    surface.rotate(rock.rotation);
    let outline = rock.silhouette.outline(rock.radius);
    surface.fill_polygon(&outline, ROCK.scale_alpha(opacity));
}

fn draw_comet<S: Surface + ?Sized>(surface: &mut S, tail: &Tail, angle: f32, alpha: f32) {
    // Tail starts `length` behind the head, opposite the direction of travel.
    let tail_end = -Vec2::from_angle(angle) * tail.length;
    surface.stroke_gradient(
        tail_end,
        Vec2::ZERO,
        tail.head_radius,
        COMET_TAIL_END,
        COMET_HEAD.scale_alpha(alpha),
    );
    surface.fill_circle(Vec2::ZERO, tail.head_radius, COMET_HEAD.scale_alpha(alpha));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Silhouette;
    use crate::renderer::recording::{DrawCommand, RecordingSurface};

    fn entity(body: Body) -> Entity {
        Entity {
            pos: Vec2::new(300.0, 200.0),
            angle: std::f32::consts::PI,
            speed: 1.0,
            opacity: 0.5,
            body,
        }
    }

    #[test]
    fn satellite_is_body_and_two_panels() {
        let mut s = RecordingSurface::new();
        draw_entity(&mut s, &entity(Body::Satellite { size: 4.0 }));
        let cmds = s.commands();
        assert_eq!(cmds[0], DrawCommand::Save);
        assert_eq!(cmds[1], DrawCommand::Translate(Vec2::new(300.0, 200.0)));
        let rects: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { origin, size, color } => Some((*origin, *size, *color)),
                _ => None,
            })
            .collect();
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[0].0, Vec2::new(-2.0, -2.0));
        // Wings mirror each other around the body.
        assert!((rects[1].0.x + rects[1].1.x + 2.0).abs() < 1e-4);
        assert_eq!(rects[2].0.x, 2.0);
        assert!(rects.iter().all(|r| (r.2.a - 0.5).abs() < 1e-6));
        assert_eq!(*cmds.last().unwrap(), DrawCommand::Restore);
    }

    #[test]
    fn asteroid_rotates_then_fills_outline() {
        let e = entity(Body::Asteroid(Rock {
            radius: 10.0,
            rotation: 0.7,
            spin: 0.01,
            silhouette: Silhouette::new(vec![1.0; 6]),
        }));
        let mut s = RecordingSurface::new();
        draw_entity(&mut s, &e);
        assert_eq!(s.commands()[2], DrawCommand::Rotate(0.7));
        match &s.commands()[3] {
            DrawCommand::FillPolygon { points, .. } => {
                assert_eq!(points.len(), 6);
                assert!(points.iter().all(|p| (p.length() - 10.0).abs() < 1e-3));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn comet_tail_trails_behind_head() {
        let mut e = entity(Body::Comet(Tail {
            age: 50,
            max_life: 300,
            length: 150.0,
            head_radius: 3.0,
            peak_alpha: 0.6,
        }));
        e.opacity = 0.6;
        let mut s = RecordingSurface::new();
        draw_entity(&mut s, &e);
        match &s.commands()[2] {
            DrawCommand::StrokeGradient { from, to, start, end, .. } => {
                // Travelling toward -x, so the tail points to +x.
                assert!((from.x - 150.0).abs() < 1e-3);
                assert_eq!(*to, Vec2::ZERO);
                assert_eq!(start.a, 0.0);
                assert!((end.a - 0.6).abs() < 1e-6);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(s.commands()[3], DrawCommand::FillCircle { radius, .. } if radius == 3.0));
    }

    #[test]
    fn render_does_not_mutate() {
        let e = entity(Body::Satellite { size: 3.0 });
        let before = e.clone();
        let mut s = RecordingSurface::new();
        draw_all(&mut s, std::slice::from_ref(&e));
        assert_eq!(e, before);
    }
}
