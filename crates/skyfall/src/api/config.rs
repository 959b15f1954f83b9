use serde::{Deserialize, Serialize};

use crate::api::error::SkyError;
use crate::api::scene::SceneSpec;
use crate::api::types::MOBILE_BREAKPOINT;
use crate::core::clock::REFERENCE_FRAME_MS;

/// Engine configuration, provided by the host page.
///
/// Every field has a default, so a JSON override only needs the keys it
/// changes:
///
/// ```
/// use skyfall::SkyConfig;
///
/// let config = SkyConfig::from_json(r#"{ "seed": 7, "mobile_breakpoint": 640 }"#).unwrap();
/// assert_eq!(config.seed, Some(7));
/// assert_eq!(config.reference_frame_ms, 16.67);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    /// Viewports narrower than this (px) spawn less often (default: 768).
    pub mobile_breakpoint: f32,
    /// Delta assumed for the first tick (default: 16.67 ms).
    pub reference_frame_ms: f64,
    /// Fixed seed for reproducible skies; the host supplies entropy otherwise.
    pub seed: Option<u64>,
    /// Replaces the backdrop's built-in scene table.
    pub scene: Option<SceneSpec>,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: MOBILE_BREAKPOINT,
            reference_frame_ms: REFERENCE_FRAME_MS,
            seed: None,
            scene: None,
        }
    }
}

impl SkyConfig {
    /// Parse and validate a JSON override.
    pub fn from_json(json: &str) -> Result<Self, SkyError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SkyError> {
        if !(self.mobile_breakpoint >= 0.0) {
            return Err(SkyError::InvalidRange {
                field: "mobile_breakpoint",
                min: self.mobile_breakpoint,
                max: self.mobile_breakpoint,
            });
        }
        if !(self.reference_frame_ms > 0.0) {
            return Err(SkyError::InvalidRange {
                field: "reference_frame_ms",
                min: self.reference_frame_ms as f32,
                max: self.reference_frame_ms as f32,
            });
        }
        match &self.scene {
            Some(scene) => scene.validate(),
            None => Ok(()),
        }
    }

    /// The scene to run: the override if present, else `fallback`.
    pub fn scene_or(&self, fallback: SceneSpec) -> SceneSpec {
        self.scene.clone().unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::EntityKind;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(SkyConfig::from_json("{}").unwrap(), SkyConfig::default());
    }

    #[test]
    fn scene_override_replaces_fallback() {
        let json = r#"{
            "scene": {
                "name": "comets-only",
                "kinds": [{
                    "interval_ms": { "min": 1000, "max": 2000 },
                    "mobile_multiplier": 1.5,
                    "cull_margin": 250,
                    "profile": { "kind": "comet", "tail_length": { "min": 50, "max": 60 } }
                }]
            }
        }"#;
        let config = SkyConfig::from_json(json).unwrap();
        let scene = config.scene_or(SceneSpec::overlay());
        assert_eq!(scene.name, "comets-only");
        assert_eq!(scene.kinds.len(), 1);
        assert_eq!(scene.kinds[0].kind(), EntityKind::Comet);
        assert_eq!(scene.kinds[0].max_alive, None);
    }

    #[test]
    fn invalid_override_rejected() {
        let json = r#"{ "scene": { "name": "bad", "kinds": [] } }"#;
        assert!(matches!(SkyConfig::from_json(json), Err(SkyError::EmptyScene(_))));
        assert!(matches!(SkyConfig::from_json("{ seed: 1 }"), Err(SkyError::Config(_))));
        assert!(SkyConfig::from_json(r#"{ "reference_frame_ms": 0 }"#).is_err());
    }

    #[test]
    fn oversized_silhouette_rejected() {
        let json = r#"{
            "scene": {
                "name": "rocks",
                "kinds": [{
                    "interval_ms": { "min": 0, "max": 0 },
                    "mobile_multiplier": 2.0,
                    "cull_margin": 50,
                    "profile": { "kind": "asteroid", "sides": [4294967295, 4294967295] }
                }]
            }
        }"#;
        assert!(matches!(
            SkyConfig::from_json(json),
            Err(SkyError::InvalidRange { field: "sides", .. })
        ));
    }
}
