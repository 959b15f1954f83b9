use crate::api::types::Viewport;
use crate::components::entity::{Body, Entity};

/// Whether an entity should leave its population this tick.
///
/// Out of the viewport grown by `margin`, or a comet whose age has reached
/// its lifetime.
pub fn is_expired(entity: &Entity, viewport: Viewport, margin: f32) -> bool {
    if !viewport.contains_expanded(entity.pos, margin) {
        return true;
    }
    matches!(entity.body, Body::Comet(tail) if tail.age >= tail.max_life)
}
