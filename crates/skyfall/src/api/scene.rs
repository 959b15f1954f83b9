//! Scene tables: which kinds a mounted sky runs, and in what order.

use serde::{Deserialize, Serialize};

use crate::api::error::SkyError;
use crate::components::kind::{KindSpec, OrbiterProfile, SpawnProfile};
use crate::core::random::Span;
use crate::renderer::color::Color;

/// Ordered behavior table for one visual context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSpec {
    pub name: String,
    /// Kinds in tick order.
    pub kinds: Vec<KindSpec>,
}

impl SceneSpec {
    pub fn new(name: impl Into<String>, kinds: Vec<KindSpec>) -> Self {
        Self {
            name: name.into(),
            kinds,
        }
    }

    /// Page overlay: satellites, asteroids and comets.
    pub fn overlay() -> Self {
        Self::new(
            "overlay",
            vec![KindSpec::satellite(), KindSpec::asteroid(), KindSpec::comet()],
        )
    }

    /// Solar-system background: planet markers circling the page center,
    /// with the occasional asteroid and comet passing through.
    pub fn solar_system() -> Self {
        let planets = OrbiterProfile {
            center: [0.5, 0.5],
            radius: Span::new(70.0, 460.0),
            angular_speed: Span::new(0.0008, 0.004),
            tilt: 0.42,
            size: Span::new(2.5, 7.0),
            opacity: Span::new(0.35, 0.6),
            palette: vec![
                Color::rgb8(153, 128, 102), // dusty brown
                Color::rgb8(204, 178, 102), // golden
                Color::rgb8(77, 128, 204),  // blue
                Color::rgb8(178, 77, 51),   // rust red
                Color::rgb8(178, 153, 102), // tan
                Color::rgb8(102, 153, 178), // teal
            ],
        };
        Self::new(
            "solar-system",
            vec![
                KindSpec {
                    interval_ms: Span::new(400.0, 1_200.0),
                    mobile_multiplier: 1.0,
                    cull_margin: 400.0,
                    max_alive: Some(8),
                    profile: SpawnProfile::Orbiter(planets),
                },
                KindSpec::asteroid().with_interval(Span::new(90_000.0, 150_000.0)),
                KindSpec::comet(),
            ],
        )
    }

    /// Globe background: orbital markers around the globe, with satellites
    /// crossing overhead.
    pub fn globe() -> Self {
        let markers = OrbiterProfile {
            center: [0.5, 0.55],
            radius: Span::new(180.0, 320.0),
            angular_speed: Span::new(-0.006, 0.006),
            tilt: 0.3,
            size: Span::new(1.5, 3.0),
            opacity: Span::new(0.4, 0.7),
            palette: vec![Color::rgb8(140, 200, 255), Color::rgb8(220, 230, 255)],
        };
        Self::new(
            "globe",
            vec![
                KindSpec {
                    interval_ms: Span::new(1_500.0, 4_000.0),
                    mobile_multiplier: 2.0,
                    cull_margin: 400.0,
                    max_alive: Some(5),
                    profile: SpawnProfile::Orbiter(markers),
                },
                KindSpec::satellite().with_interval(Span::new(30_000.0, 60_000.0)),
            ],
        )
    }

    pub fn validate(&self) -> Result<(), SkyError> {
        if self.kinds.is_empty() {
            return Err(SkyError::EmptyScene(self.name.clone()));
        }
        self.kinds.iter().try_for_each(KindSpec::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::EntityKind;

    #[test]
    fn presets_validate() {
        for scene in [SceneSpec::overlay(), SceneSpec::solar_system(), SceneSpec::globe()] {
            scene.validate().unwrap();
        }
    }

    #[test]
    fn overlay_order() {
        let kinds: Vec<_> = SceneSpec::overlay().kinds.iter().map(KindSpec::kind).collect();
        assert_eq!(
            kinds,
            vec![EntityKind::Satellite, EntityKind::Asteroid, EntityKind::Comet]
        );
    }

    #[test]
    fn empty_scene_rejected() {
        let scene = SceneSpec::new("void", Vec::new());
        assert!(matches!(scene.validate(), Err(SkyError::EmptyScene(name)) if name == "void"));
    }

    #[test]
    fn scene_json_roundtrip_keeps_order() {
        let json = serde_json::to_string(&SceneSpec::globe()).unwrap();
        let back: SceneSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SceneSpec::globe());
    }
}
