use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Default width (px) below which a viewport counts as mobile.
pub const MOBILE_BREAKPOINT: f32 = 768.0;

/// Visible page area in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether `pos` lies inside the viewport grown by `margin` on every side.
    pub fn contains_expanded(&self, pos: Vec2, margin: f32) -> bool {
        pos.x >= -margin
            && pos.x <= self.width + margin
            && pos.y >= -margin
            && pos.y <= self.height + margin
    }

    /// Point at fractional coordinates (`0.5, 0.5` is the center).
    pub fn at_fraction(&self, fx: f32, fy: f32) -> Vec2 {
        Vec2::new(self.width * fx, self.height * fy)
    }

    pub fn device_class(&self, breakpoint: f32) -> DeviceClass {
        DeviceClass::from_width(self.width, breakpoint)
    }
}

/// Coarse viewport classification used to throttle spawning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Desktop,
    Mobile,
}

impl DeviceClass {
    pub fn from_width(width: f32, breakpoint: f32) -> Self {
        if width < breakpoint {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }
}

/// Host signals read once at mount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostEnv {
    pub viewport: Viewport,
    /// The user asked the platform for reduced motion.
    pub reduced_motion: bool,
}

impl HostEnv {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            reduced_motion: false,
        }
    }

    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }
}
