pub mod color;
pub mod recording;
pub mod surface;
#[cfg(feature = "vectors")]
pub mod vector;

// Re-export key types for convenient access
pub use color::Color;
pub use recording::{DrawCommand, RecordingSurface};
pub use surface::Surface;
#[cfg(feature = "vectors")]
pub use vector::{VectorSurface, VectorVertex};
