use thiserror::Error;

use crate::components::entity::EntityKind;

/// Errors raised while loading or validating sky configuration.
///
/// Nothing on the per-frame path returns these: once a scene table has been
/// validated, scheduling, motion, culling and drawing are infallible.
#[derive(Debug, Error)]
pub enum SkyError {
    /// The JSON override could not be parsed.
    #[error("invalid sky config: {0}")]
    Config(#[from] serde_json::Error),

    /// A sampled range has `min > max` or a negative interval.
    #[error("invalid range for {field}: [{min}, {max})")]
    InvalidRange {
        field: &'static str,
        min: f32,
        max: f32,
    },

    /// Mobile spawn multipliers may only slow spawning down.
    #[error("mobile multiplier for {kind:?} must be >= 1.0, got {value}")]
    InvalidMultiplier { kind: EntityKind, value: f32 },

    /// Asteroid silhouettes need at least five lobes.
    #[error("asteroid silhouette needs at least 5 lobes, got {got}")]
    TooFewSides { got: u32 },

    /// Comet lifetimes are counted in whole ticks and must be at least one.
    #[error("comet lifetime must be at least one tick, got [{min}, {max})")]
    InvalidLifetime { min: f32, max: f32 },

    /// A scene table without kinds would never draw anything.
    #[error("scene '{0}' registers no entity kinds")]
    EmptyScene(String),
}
