//! Spawn scheduling and per-kind entity construction.
//!
//! Each kind has one [`SpawnTimer`] holding the absolute elapsed time at
//! which its next spawn is allowed. When the timer comes due the scheduler
//! spawns one entity and re-arms with a fresh random interval, stretched on
//! mobile viewports.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

use crate::api::types::{DeviceClass, Viewport};
use crate::components::entity::{Body, Entity, Orbit, Rock, Silhouette, Tail};
use crate::components::kind::{
    AsteroidProfile, CometProfile, KindSpec, OrbiterProfile, SatelliteProfile, SpawnProfile,
};
use crate::core::population::Population;
use crate::core::random::RandomSource;
use crate::renderer::color::Color;

/// Elapsed time (ms) at which the next spawn is permitted.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpawnTimer {
    next_at: f64,
}

impl SpawnTimer {
    /// Schedule the next spawn a random interval after `now`.
    pub fn arm(
        &mut self,
        now: f64,
        spec: &KindSpec,
        device: DeviceClass,
        rng: &mut impl RandomSource,
    ) {
        let interval = spec.interval_ms.sample(rng) * spec.multiplier(device);
        self.next_at = now + interval as f64;
    }

    pub fn is_due(&self, now: f64) -> bool {
        now >= self.next_at
    }

    pub fn next_at(&self) -> f64 {
        self.next_at
    }
}

/// Run one scheduling check. Returns true if an entity was spawned.
///
/// A due timer is always re-armed, even when the population is at its cap.
pub fn schedule(
    population: &mut Population,
    now: f64,
    viewport: Viewport,
    device: DeviceClass,
    rng: &mut impl RandomSource,
) -> bool {
    if !population.timer.is_due(now) {
        return false;
    }

    let spawned = if population.is_full() {
        false
    } else {
        let entity = spawn_entity(&population.spec().profile, viewport, rng);
        log::debug!(
            "spawn {:?} at ({:.0}, {:.0})",
            entity.kind(),
            entity.pos.x,
            entity.pos.y
        );
        population.push(entity);
        true
    };

    let mut timer = population.timer;
    timer.arm(now, population.spec(), device, rng);
    population.timer = timer;
    spawned
}

/// Build one entity with attributes drawn from `profile`.
pub fn spawn_entity(
    profile: &SpawnProfile,
    viewport: Viewport,
    rng: &mut impl RandomSource,
) -> Entity {
    match profile {
        SpawnProfile::Satellite(p) => spawn_satellite(p, viewport, rng),
        SpawnProfile::Asteroid(p) => spawn_asteroid(p, viewport, rng),
        SpawnProfile::Comet(p) => spawn_comet(p, viewport, rng),
        SpawnProfile::Orbiter(p) => spawn_orbiter(p, viewport, rng),
    }
}

/// Pick an entry edge. Returns the x coordinate and the base heading.
fn entry_edge(viewport: Viewport, offset: f32, rng: &mut impl RandomSource) -> (f32, f32) {
    if rng.chance(0.5) {
        (-offset, 0.0)
    } else {
        (viewport.width + offset, PI)
    }
}

fn spawn_satellite(
    p: &SatelliteProfile,
    viewport: Viewport,
    rng: &mut impl RandomSource,
) -> Entity {
    let (x, heading) = entry_edge(viewport, p.entry_offset, rng);
    let y = viewport.height * p.height.sample(rng);
    let angle = heading + rng.sample(-p.angle_jitter, p.angle_jitter);
    Entity {
        pos: Vec2::new(x, y),
        angle,
        speed: p.speed.sample(rng),
        opacity: p.opacity.sample(rng).clamp(0.0, 1.0),
        body: Body::Satellite {
            size: p.size.sample(rng),
        },
    }
}

fn spawn_asteroid(
    p: &AsteroidProfile,
    viewport: Viewport,
    rng: &mut impl RandomSource,
) -> Entity {
    let (x, heading) = entry_edge(viewport, p.entry_offset, rng);
    let y = viewport.height * p.height.sample(rng);
    let angle = heading + rng.sample(-p.angle_jitter, p.angle_jitter);
    let speed = p.speed.sample(rng);
    let opacity = p.opacity.sample(rng).clamp(0.0, 1.0);
    let radius = p.radius.sample(rng);
    let sides = rng.pick_int(p.sides.0, p.sides.1);
    let lobes: Vec<f32> = (0..sides).map(|_| p.lobe.sample(rng)).collect();
    Entity {
        pos: Vec2::new(x, y),
        angle,
        speed,
        opacity,
        body: Body::Asteroid(Rock {
            radius,
            rotation: 0.0,
            spin: p.spin.sample(rng),
            silhouette: Silhouette::new(lobes),
        }),
    }
}

fn spawn_comet(p: &CometProfile, viewport: Viewport, rng: &mut impl RandomSource) -> Entity {
    let x = viewport.width + p.entry_offset;
    let y = viewport.height * p.height.sample(rng);
    let angle = p.angle.sample(rng);
    let speed = p.speed.sample(rng);
    let max_life = (p.max_life.sample(rng).floor() as u32).max(1);
    Entity {
        pos: Vec2::new(x, y),
        angle,
        speed,
        // Faded in by the lifetime envelope.
        opacity: 0.0,
        body: Body::Comet(Tail {
            age: 0,
            max_life,
            length: p.tail_length.sample(rng),
            head_radius: p.head_radius.sample(rng),
            peak_alpha: p.peak_alpha,
        }),
    }
}

fn spawn_orbiter(
    p: &OrbiterProfile,
    viewport: Viewport,
    rng: &mut impl RandomSource,
) -> Entity {
    let phase = rng.sample(0.0, TAU);
    let orbit = Orbit {
        center: viewport.at_fraction(p.center[0], p.center[1]),
        radius: p.radius.sample(rng),
        tilt: p.tilt,
        size: p.size.sample(rng),
        color: pick_color(&p.palette, rng),
    };
    Entity {
        pos: orbit.point_at(phase),
        angle: phase,
        speed: p.angular_speed.sample(rng),
        opacity: p.opacity.sample(rng).clamp(0.0, 1.0),
        body: Body::Orbiter(orbit),
    }
}

fn pick_color(palette: &[Color], rng: &mut impl RandomSource) -> Color {
    if palette.is_empty() {
        return Color::WHITE;
    }
    let idx = rng.pick_int(0, palette.len() as u32 - 1) as usize;
    palette[idx]
}
