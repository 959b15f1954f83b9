//! Per-kind behavior tables.
//!
//! A [`KindSpec`] carries everything the engine needs to run one entity
//! kind: spawn cadence, device throttling, cull margin and the ranges each
//! spawned attribute is drawn from. Motion, culling and drawing dispatch on
//! the entity's [`Body`](super::entity::Body) variant.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::api::error::SkyError;
use crate::api::types::DeviceClass;
use crate::components::entity::EntityKind;
use crate::core::random::Span;
use crate::renderer::color::Color;

/// Scheduling and culling rules for one kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindSpec {
    /// Milliseconds between spawns on desktop.
    pub interval_ms: Span,
    /// Interval multiplier applied on mobile viewports.
    pub mobile_multiplier: f32,
    /// How far outside the viewport an entity may drift before removal.
    pub cull_margin: f32,
    /// Population cap; the timer still re-arms while at capacity.
    #[serde(default)]
    pub max_alive: Option<usize>,
    pub profile: SpawnProfile,
}

impl KindSpec {
    pub fn kind(&self) -> EntityKind {
        self.profile.kind()
    }

    /// Interval multiplier for `device`.
    pub fn multiplier(&self, device: DeviceClass) -> f32 {
        match device {
            DeviceClass::Desktop => 1.0,
            DeviceClass::Mobile => self.mobile_multiplier,
        }
    }

    pub fn satellite() -> Self {
        Self {
            interval_ms: Span::new(45_000.0, 90_000.0),
            mobile_multiplier: 2.0,
            cull_margin: 60.0,
            max_alive: None,
            profile: SpawnProfile::Satellite(SatelliteProfile::default()),
        }
    }

    pub fn asteroid() -> Self {
        Self {
            interval_ms: Span::new(60_000.0, 120_000.0),
            mobile_multiplier: 2.0,
            cull_margin: 50.0,
            max_alive: None,
            profile: SpawnProfile::Asteroid(AsteroidProfile::default()),
        }
    }

    pub fn comet() -> Self {
        Self {
            interval_ms: Span::new(240_000.0, 360_000.0),
            mobile_multiplier: 1.5,
            cull_margin: 250.0,
            max_alive: None,
            profile: SpawnProfile::Comet(CometProfile::default()),
        }
    }

    pub fn with_interval(mut self, interval_ms: Span) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    pub fn with_max_alive(mut self, max_alive: usize) -> Self {
        self.max_alive = Some(max_alive);
        self
    }

    pub fn with_cull_margin(mut self, cull_margin: f32) -> Self {
        self.cull_margin = cull_margin;
        self
    }

    pub fn validate(&self) -> Result<(), SkyError> {
        check_span("interval_ms", &self.interval_ms)?;
        if self.interval_ms.min < 0.0 {
            return Err(SkyError::InvalidRange {
                field: "interval_ms",
                min: self.interval_ms.min,
                max: self.interval_ms.max,
            });
        }
        if !(self.mobile_multiplier >= 1.0) {
            return Err(SkyError::InvalidMultiplier {
                kind: self.kind(),
                value: self.mobile_multiplier,
            });
        }
        if !(self.cull_margin >= 0.0) {
            return Err(SkyError::InvalidRange {
                field: "cull_margin",
                min: self.cull_margin,
                max: self.cull_margin,
            });
        }
        self.profile.validate()
    }
}

fn check_span(field: &'static str, span: &Span) -> Result<(), SkyError> {
    if span.is_valid() {
        Ok(())
    } else {
        Err(SkyError::InvalidRange {
            field,
            min: span.min,
            max: span.max,
        })
    }
}

/// Upper bound on asteroid silhouette lobes.
pub const MAX_SIDES: u32 = 64;

fn check_opacity(span: &Span) -> Result<(), SkyError> {
    check_span("opacity", span)?;
    if span.min < 0.0 || span.max > 1.0 {
        return Err(SkyError::InvalidRange {
            field: "opacity",
            min: span.min,
            max: span.max,
        });
    }
    Ok(())
}

/// Attribute ranges a spawner draws from, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpawnProfile {
    Satellite(SatelliteProfile),
    Asteroid(AsteroidProfile),
    Comet(CometProfile),
    Orbiter(OrbiterProfile),
}

impl SpawnProfile {
    pub fn kind(&self) -> EntityKind {
        match self {
            SpawnProfile::Satellite(_) => EntityKind::Satellite,
            SpawnProfile::Asteroid(_) => EntityKind::Asteroid,
            SpawnProfile::Comet(_) => EntityKind::Comet,
            SpawnProfile::Orbiter(_) => EntityKind::Orbiter,
        }
    }

    fn validate(&self) -> Result<(), SkyError> {
        match self {
            SpawnProfile::Satellite(p) => {
                check_span("height", &p.height)?;
                check_span("speed", &p.speed)?;
                check_span("size", &p.size)?;
                check_opacity(&p.opacity)
            }
            SpawnProfile::Asteroid(p) => {
                check_span("height", &p.height)?;
                check_span("speed", &p.speed)?;
                check_span("radius", &p.radius)?;
                check_span("lobe", &p.lobe)?;
                check_span("spin", &p.spin)?;
                check_opacity(&p.opacity)?;
                if p.sides.0 < 5 {
                    return Err(SkyError::TooFewSides { got: p.sides.0 });
                }
                if p.sides.1 < p.sides.0 || p.sides.1 > MAX_SIDES {
                    return Err(SkyError::InvalidRange {
                        field: "sides",
                        min: p.sides.0 as f32,
                        max: p.sides.1 as f32,
                    });
                }
                Ok(())
            }
            SpawnProfile::Comet(p) => {
                check_span("height", &p.height)?;
                check_span("angle", &p.angle)?;
                check_span("speed", &p.speed)?;
                check_span("tail_length", &p.tail_length)?;
                check_span("head_radius", &p.head_radius)?;
                check_span("max_life", &p.max_life)?;
                if p.max_life.min < 1.0 {
                    return Err(SkyError::InvalidLifetime {
                        min: p.max_life.min,
                        max: p.max_life.max,
                    });
                }
                if !(0.0..=1.0).contains(&p.peak_alpha) {
                    return Err(SkyError::InvalidRange {
                        field: "peak_alpha",
                        min: p.peak_alpha,
                        max: p.peak_alpha,
                    });
                }
                Ok(())
            }
            SpawnProfile::Orbiter(p) => {
                check_span("radius", &p.radius)?;
                check_span("angular_speed", &p.angular_speed)?;
                check_span("size", &p.size)?;
                check_opacity(&p.opacity)
            }
        }
    }
}

/// Satellites cross near-horizontally from a random side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SatelliteProfile {
    /// Entry height as a fraction of viewport height.
    pub height: Span,
    /// Maximum deviation from horizontal (radians).
    pub angle_jitter: f32,
    pub speed: Span,
    pub opacity: Span,
    pub size: Span,
    /// Pixels outside the edge where satellites appear.
    pub entry_offset: f32,
}

impl Default for SatelliteProfile {
    fn default() -> Self {
        Self {
            height: Span::new(0.1, 0.6),
            angle_jitter: 0.1,
            speed: Span::new(0.6, 1.2),
            opacity: Span::new(0.4, 0.6),
            size: Span::new(3.0, 5.0),
            entry_offset: 20.0,
        }
    }
}

/// Asteroids drift across at a shallow angle, tumbling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidProfile {
    pub height: Span,
    pub angle_jitter: f32,
    pub speed: Span,
    pub opacity: Span,
    /// Base radius in pixels.
    pub radius: Span,
    /// Inclusive lobe count range for the silhouette.
    pub sides: (u32, u32),
    /// Radius multiplier range per lobe.
    pub lobe: Span,
    /// Rotation per tick (radians).
    pub spin: Span,
    pub entry_offset: f32,
}

impl Default for AsteroidProfile {
    fn default() -> Self {
        Self {
            height: Span::new(0.15, 0.7),
            angle_jitter: 0.2,
            speed: Span::new(0.4, 1.0),
            opacity: Span::new(0.4, 0.6),
            radius: Span::new(6.0, 14.0),
            sides: (5, 7),
            lobe: Span::new(0.6, 1.0),
            spin: Span::new(-0.015, 0.015),
            entry_offset: 30.0,
        }
    }
}

/// Comets always enter from the right, descending leftward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CometProfile {
    /// Entry height as a fraction of viewport height; may start above the top.
    pub height: Span,
    /// Travel angle (radians).
    pub angle: Span,
    pub speed: Span,
    /// Lifetime in ticks; sampled then floored.
    pub max_life: Span,
    pub tail_length: Span,
    pub head_radius: Span,
    /// Opacity at full envelope.
    pub peak_alpha: f32,
    pub entry_offset: f32,
}

impl Default for CometProfile {
    fn default() -> Self {
        Self {
            height: Span::new(-0.3, 0.3),
            angle: Span::new(0.6 * PI, 0.8 * PI),
            speed: Span::new(2.5, 4.0),
            max_life: Span::new(240.0, 360.0),
            tail_length: Span::new(120.0, 220.0),
            head_radius: Span::new(2.5, 4.0),
            peak_alpha: 0.6,
            entry_offset: 40.0,
        }
    }
}

/// Markers circling a fixed point of the viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbiterProfile {
    /// Orbit center as viewport fractions.
    pub center: [f32; 2],
    /// Orbit radius in pixels.
    pub radius: Span,
    /// Radians per tick; negative values orbit counter-clockwise.
    pub angular_speed: Span,
    /// Vertical compression of the orbit ellipse.
    pub tilt: f32,
    pub size: Span,
    pub opacity: Span,
    /// Marker colors; one is picked per spawn.
    pub palette: Vec<Color>,
}

impl Default for OrbiterProfile {
    fn default() -> Self {
        Self {
            center: [0.5, 0.5],
            radius: Span::new(80.0, 420.0),
            angular_speed: Span::new(0.001, 0.004),
            tilt: 0.45,
            size: Span::new(2.0, 6.0),
            opacity: Span::new(0.35, 0.6),
            palette: vec![Color::rgb8(200, 180, 140)],
        }
    }
}
