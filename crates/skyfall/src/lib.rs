pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;

// Re-export key types at crate root for convenience
pub use api::backdrop::{Backdrop, GeoCoord};
pub use api::config::SkyConfig;
pub use api::error::SkyError;
pub use api::scene::SceneSpec;
pub use api::types::{DeviceClass, HostEnv, Viewport, MOBILE_BREAKPOINT};
pub use components::entity::{Body, Entity, EntityKind, Orbit, Rock, Silhouette, Tail};
pub use components::kind::{KindSpec, SpawnProfile};
pub use core::clock::{FrameClock, REFERENCE_FRAME_MS};
pub use core::driver::{DisableReason, DriverState, FrameDriver};
pub use core::population::Population;
pub use core::random::{RandomSource, Rng, Span};
pub use core::sky::{Sky, TickReport};
pub use renderer::{Color, DrawCommand, RecordingSurface, Surface};
pub use bridge::host::{FrameHost, FrameRequest, ManualHost};
pub use bridge::session::{IntroGate, MemoryFlags, SessionFlags, INTRO_SEEN_KEY};

#[cfg(feature = "vectors")]
pub use renderer::{VectorSurface, VectorVertex};
