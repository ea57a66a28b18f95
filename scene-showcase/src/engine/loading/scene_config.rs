use bevy::prelude::*;
use serde::Deserialize;

use constants::render_settings::SHADOW_MAP_SIZE_HIGH;
use constants::scene::{FOG_COLOR, FOG_DENSITY, FOG_END, FOG_START, GROUND_HEIGHT, GROUND_SIZE};

use crate::engine::scene::fog::FogConfig;
use crate::engine::scene::static_hint::StaticHint;

/// Per-variant scene configuration, loaded as a JSON asset. The four
/// demo variants collapse into this one structure; a missing or
/// malformed manifest falls back to the built-in defaults.
#[derive(Asset, TypePath, Resource, Debug, Clone, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub ground: GroundConfig,
    #[serde(default = "default_shadow_map_size")]
    pub shadow_map_size: u32,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub fog: FogDefaults,
    #[serde(default)]
    pub particles: ParticleStrategy,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            ground: GroundConfig::default(),
            shadow_map_size: default_shadow_map_size(),
            camera: CameraConfig::default(),
            fog: FogDefaults::default(),
            particles: ParticleStrategy::default(),
        }
    }
}

fn default_shadow_map_size() -> u32 {
    SHADOW_MAP_SIZE_HIGH
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroundConfig {
    #[serde(default = "default_ground_size")]
    pub size: f32,
    #[serde(default = "default_ground_height")]
    pub height: f32,
    #[serde(default)]
    pub hint: StaticHint,
    /// Present for the heightmap-displaced variant; absent means flat.
    #[serde(default)]
    pub elevation: Option<ElevationConfig>,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            size: default_ground_size(),
            height: default_ground_height(),
            hint: StaticHint {
                freeze_transform: true,
                skip_bounding_sync: true,
                unindexed: false,
            },
            elevation: None,
        }
    }
}

fn default_ground_size() -> f32 {
    GROUND_SIZE
}

fn default_ground_height() -> f32 {
    GROUND_HEIGHT
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElevationConfig {
    /// Stored object holding the grayscale elevation image.
    pub object: String,
    #[serde(default = "default_subdivisions")]
    pub subdivisions: u32,
    pub min_height: f32,
    pub max_height: f32,
}

fn default_subdivisions() -> u32 {
    100
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_true")]
    pub auto_rotate: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { auto_rotate: true }
    }
}

fn default_true() -> bool {
    true
}

/// Fog parameters as configured per variant; becomes the live
/// [`FogConfig`] resource at construction time.
#[derive(Debug, Clone, Deserialize)]
pub struct FogDefaults {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_fog_color")]
    pub color: [f32; 3],
    #[serde(default = "default_fog_start")]
    pub start: f32,
    #[serde(default = "default_fog_end")]
    pub end: f32,
    #[serde(default = "default_fog_density")]
    pub density: f32,
}

impl Default for FogDefaults {
    fn default() -> Self {
        Self {
            enabled: false,
            color: FOG_COLOR,
            start: FOG_START,
            end: FOG_END,
            density: FOG_DENSITY,
        }
    }
}

impl FogDefaults {
    pub fn to_fog_config(&self) -> FogConfig {
        FogConfig {
            enabled: self.enabled,
            color: self.color,
            start: self.start,
            end: self.end,
            density: self.density,
        }
    }
}

fn default_fog_color() -> [f32; 3] {
    FOG_COLOR
}

fn default_fog_start() -> f32 {
    FOG_START
}

fn default_fog_end() -> f32 {
    FOG_END
}

fn default_fog_density() -> f32 {
    FOG_DENSITY
}

/// Which particle construction strategy the variant uses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum ParticleStrategy {
    /// One manually configured emitter, started immediately.
    #[default]
    Manual,
    /// Externally authored snippet presets, loaded by identifier.
    Presets { ids: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_manifest_fills_in_defaults() {
        let config: SceneConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.shadow_map_size, SHADOW_MAP_SIZE_HIGH);
        assert!(config.ground.elevation.is_none());
        assert!(matches!(config.particles, ParticleStrategy::Manual));
        assert!(!config.fog.enabled);
    }

    #[test]
    fn heightmap_variant_parses() {
        let config: SceneConfig = serde_json::from_str(
            r#"{
                "ground": {
                    "size": 100.0,
                    "elevation": {
                        "object": "terrain/elevation.png",
                        "subdivisions": 64,
                        "min_height": 0.0,
                        "max_height": 10.0
                    }
                },
                "shadow_map_size": 256
            }"#,
        )
        .unwrap();
        let elevation = config.ground.elevation.unwrap();
        assert_eq!(elevation.subdivisions, 64);
        assert_eq!(config.shadow_map_size, 256);
    }

    #[test]
    fn preset_strategy_parses() {
        let config: SceneConfig = serde_json::from_str(
            r#"{ "particles": { "strategy": "presets", "ids": ["core_glow", "sparks"] } }"#,
        )
        .unwrap();
        match config.particles {
            ParticleStrategy::Presets { ids } => assert_eq!(ids.len(), 2),
            other => panic!("expected presets strategy, got {other:?}"),
        }
    }
}
