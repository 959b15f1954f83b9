pub mod cull;
pub mod motion;
pub mod render;
pub mod spawn;
