use serde::{Deserialize, Serialize};

use crate::api::scene::SceneSpec;

/// Latitude/longitude in degrees, as supplied by the content layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoord {
    pub lat: f64,
    pub lon: f64,
}

/// Which visual context a sky is mounted for.
///
/// The page layer decides the variant before mounting. The highlight and
/// focus values ride along for the host's own use; the engine never reads
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "kebab-case")]
pub enum Backdrop {
    Overlay,
    SolarSystem { highlight: Option<String> },
    Globe { focus: Option<GeoCoord> },
}

impl Backdrop {
    pub fn name(&self) -> &'static str {
        match self {
            Backdrop::Overlay => "overlay",
            Backdrop::SolarSystem { .. } => "solar-system",
            Backdrop::Globe { .. } => "globe",
        }
    }

    /// Variant by name, without the optional parameters.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "overlay" => Some(Backdrop::Overlay),
            "solar-system" => Some(Backdrop::SolarSystem { highlight: None }),
            "globe" => Some(Backdrop::Globe { focus: None }),
            _ => None,
        }
    }

    /// Built-in scene table for this variant.
    pub fn scene(&self) -> SceneSpec {
        match self {
            Backdrop::Overlay => SceneSpec::overlay(),
            Backdrop::SolarSystem { .. } => SceneSpec::solar_system(),
            Backdrop::Globe { .. } => SceneSpec::globe(),
        }
    }

    pub fn highlight(&self) -> Option<&str> {
        match self {
            Backdrop::SolarSystem { highlight } => highlight.as_deref(),
            _ => None,
        }
    }

    pub fn focus(&self) -> Option<GeoCoord> {
        match self {
            Backdrop::Globe { focus } => *focus,
            _ => None,
        }
    }
}
