use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::renderer::color::Color;

/// Entity kinds, in the order a scene table usually registers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Satellite,
    Asteroid,
    Comet,
    /// Background-only orbiting marker (planets, globe orbit markers).
    Orbiter,
}

/// One animated decorative object.
///
/// Common motion lives on the struct; anything kind-specific lives in
/// [`Body`]. Entities are owned by exactly one population and hold no
/// reference back to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Position in viewport pixels.
    pub pos: Vec2,
    /// Travel angle in radians. For orbiters, the orbital phase.
    pub angle: f32,
    /// Pixels per reference tick. For orbiters, radians per tick.
    pub speed: f32,
    /// Drawn opacity, always within `[0, 1]`.
    pub opacity: f32,
    pub body: Body,
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self.body {
            Body::Satellite { .. } => EntityKind::Satellite,
            Body::Asteroid(_) => EntityKind::Asteroid,
            Body::Comet(_) => EntityKind::Comet,
            Body::Orbiter(_) => EntityKind::Orbiter,
        }
    }

    /// Unit travel direction.
    pub fn heading(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }
}

/// Kind-specific state.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Satellite { size: f32 },
    Asteroid(Rock),
    Comet(Tail),
    Orbiter(Orbit),
}

/// Tumbling irregular rock.
#[derive(Debug, Clone, PartialEq)]
pub struct Rock {
    pub radius: f32,
    /// Accumulated rotation (radians).
    pub rotation: f32,
    /// Rotation per tick (radians).
    pub spin: f32,
    pub silhouette: Silhouette,
}

/// Radius multipliers around an asteroid, fixed at spawn.
///
/// Vertex `v` of `N` sits at angle `2π·v/N`. The multipliers are never
/// rewritten; rotation is applied as a transform when drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct Silhouette(Box<[f32]>);

impl Silhouette {
    pub fn new(lobes: impl Into<Box<[f32]>>) -> Self {
        Self(lobes.into())
    }

    pub fn lobes(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Outline points around the origin for a rock of `radius`.
    pub fn outline(&self, radius: f32) -> Vec<Vec2> {
        let n = self.0.len() as f32;
        self.0
            .iter()
            .enumerate()
            .map(|(v, m)| Vec2::from_angle(std::f32::consts::TAU * v as f32 / n) * radius * m)
            .collect()
    }
}

/// Comet lifetime and tail shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tail {
    /// Ticks lived so far.
    pub age: u32,
    /// The comet is culled once `age` reaches this.
    pub max_life: u32,
    /// Tail length in pixels.
    pub length: f32,
    pub head_radius: f32,
    /// Opacity at full envelope.
    pub peak_alpha: f32,
}

impl Tail {
    /// Fraction of life consumed, `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        if self.max_life == 0 {
            return 1.0;
        }
        (self.age as f32 / self.max_life as f32).min(1.0)
    }
}

/// Marker on an elliptical orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub center: Vec2,
    pub radius: f32,
    /// Vertical compression of the orbit (1.0 = circle).
    pub tilt: f32,
    /// Marker radius.
    pub size: f32,
    pub color: Color,
}

impl Orbit {
    /// Position on the orbit at `phase`.
    pub fn point_at(&self, phase: f32) -> Vec2 {
        let (sin, cos) = phase.sin_cos();
        self.center + Vec2::new(cos * self.radius, sin * self.radius * self.tilt)
    }
}
