//! Per-tick motion.
//!
//! Deltas are per tick, not scaled by measured frame time: at a steady
//! 60 Hz this matches the tuned speeds, at other refresh rates motion runs
//! proportionally faster or slower.

use glam::Vec2;

use crate::components::entity::{Body, Entity};

/// Fraction of comet life spent fading in.
const FADE_IN_END: f32 = 0.1;
/// Fraction of comet life after which it fades out.
const FADE_OUT_START: f32 = 0.8;

/// Advance one entity by one tick.
pub fn advance(entity: &mut Entity) {
    match &mut entity.body {
        Body::Orbiter(orbit) => {
            entity.angle += entity.speed;
            entity.pos = orbit.point_at(entity.angle);
        }
        body => {
            entity.pos += Vec2::from_angle(entity.angle) * entity.speed;
            match body {
                Body::Asteroid(rock) => rock.rotation += rock.spin,
                Body::Comet(tail) => {
                    tail.age = (tail.age + 1).min(tail.max_life);
                    entity.opacity =
                        (comet_envelope(tail.progress()) * tail.peak_alpha).clamp(0.0, 1.0);
                }
                Body::Satellite { .. } | Body::Orbiter(_) => {}
            }
        }
    }
}

/// Comet brightness over its life: ramp up over the first 10%, hold, then
/// ramp down over the last 20%.
pub fn comet_envelope(progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    let level = if p < FADE_IN_END {
        p / FADE_IN_END
    } else if p > FADE_OUT_START {
        (1.0 - p) / (1.0 - FADE_OUT_START)
    } else {
        1.0
    };
    level.clamp(0.0, 1.0)
}
