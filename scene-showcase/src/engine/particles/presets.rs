use bevy::asset::LoadState;
use bevy::prelude::*;
use serde::Deserialize;

use crate::engine::assets::SceneAssets;
use crate::engine::particles::emitter::EmitterConfig;
use crate::engine::particles::{spawn_emitter_entity, FocalAnchor};

/// Externally authored emitter preset, loaded by identifier from a
/// `*.particle.json` snippet.
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct ParticlePreset {
    pub id: String,
    pub capacity: usize,
    pub emit_rate: f32,
    pub direction1: [f32; 3],
    pub direction2: [f32; 3],
    pub min_size: f32,
    pub max_size: f32,
    pub min_lifetime: f32,
    pub max_lifetime: f32,
    pub min_emit_power: f32,
    pub max_emit_power: f32,
    pub update_speed: f32,
    #[serde(default)]
    pub gravity: Option<[f32; 3]>,
    pub color1: [f32; 4],
    pub color2: [f32; 4],
    pub color_dead: [f32; 4],
}

impl ParticlePreset {
    pub fn to_config(&self) -> EmitterConfig {
        EmitterConfig {
            capacity: self.capacity,
            emit_rate: self.emit_rate,
            direction1: Vec3::from_array(self.direction1),
            direction2: Vec3::from_array(self.direction2),
            min_size: self.min_size,
            max_size: self.max_size,
            min_lifetime: self.min_lifetime,
            max_lifetime: self.max_lifetime,
            min_emit_power: self.min_emit_power,
            max_emit_power: self.max_emit_power,
            update_speed: self.update_speed,
            gravity: self.gravity.map(Vec3::from_array).unwrap_or(Vec3::ZERO),
            color1: Vec4::from_array(self.color1),
            color2: Vec4::from_array(self.color2),
            color_dead: Vec4::from_array(self.color_dead),
        }
    }
}

/// Presets still waiting for their snippet file.
#[derive(Resource, Default)]
pub struct PresetLibrary {
    pending: Vec<(String, Handle<ParticlePreset>)>,
}

/// Request the configured preset identifiers from the asset server.
pub fn load_presets(library: &mut PresetLibrary, asset_server: &AssetServer, ids: &[String]) {
    for id in ids {
        let path = format!("particles/{id}.particle.json");
        library
            .pending
            .push((id.clone(), asset_server.load(path)));
    }
}

/// Poll pending snippet loads. Each loaded preset becomes an emitter
/// rebound to the invisible focal anchor; a failed load only loses that
/// one effect.
pub fn bind_loaded_presets(
    mut commands: Commands,
    mut library: ResMut<PresetLibrary>,
    asset_server: Res<AssetServer>,
    presets: Res<Assets<ParticlePreset>>,
    mut meshes: ResMut<Assets<Mesh>>,
    scene_assets: Res<SceneAssets>,
    anchors: Query<Entity, With<FocalAnchor>>,
) {
    if library.pending.is_empty() {
        return;
    }
    let Ok(anchor) = anchors.single() else {
        return;
    };

    let mut still_pending = Vec::new();
    for (id, handle) in library.pending.drain(..) {
        match asset_server.get_load_state(&handle) {
            Some(LoadState::Loaded) => {
                if let Some(preset) = presets.get(&handle) {
                    spawn_emitter_entity(
                        &mut commands,
                        &mut meshes,
                        &scene_assets,
                        preset.to_config(),
                        anchor,
                    );
                    println!("✓ Particle preset '{id}' bound to focal anchor");
                }
            }
            Some(LoadState::Failed(_)) => {
                warn!("particle preset '{id}' failed to load, effect absent");
            }
            _ => still_pending.push((id, handle)),
        }
    }
    library.pending = still_pending;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_json_maps_onto_emitter_config() {
        let preset: ParticlePreset = serde_json::from_str(
            r#"{
                "id": "sparks",
                "capacity": 400,
                "emit_rate": 120.0,
                "direction1": [-3.0, 4.0, 3.0],
                "direction2": [3.0, 6.0, -3.0],
                "min_size": 0.05,
                "max_size": 0.15,
                "min_lifetime": 0.2,
                "max_lifetime": 0.7,
                "min_emit_power": 1.5,
                "max_emit_power": 3.5,
                "update_speed": 0.005,
                "gravity": [0.0, -9.8, 0.0],
                "color1": [1.0, 0.95, 0.7, 1.0],
                "color2": [1.0, 0.7, 0.2, 1.0],
                "color_dead": [0.2, 0.1, 0.0, 0.0]
            }"#,
        )
        .unwrap();
        let config = preset.to_config();
        assert_eq!(config.capacity, 400);
        assert_eq!(config.gravity, Vec3::new(0.0, -9.8, 0.0));
        assert_eq!(config.color_dead.w, 0.0);
    }

    #[test]
    fn gravity_defaults_to_zero_when_omitted() {
        let preset: ParticlePreset = serde_json::from_str(
            r#"{
                "id": "smoke",
                "capacity": 10,
                "emit_rate": 1.0,
                "direction1": [0.0, 1.0, 0.0],
                "direction2": [0.0, 1.0, 0.0],
                "min_size": 0.1,
                "max_size": 0.2,
                "min_lifetime": 0.5,
                "max_lifetime": 1.0,
                "min_emit_power": 0.1,
                "max_emit_power": 0.2,
                "update_speed": 0.005,
                "color1": [1.0, 1.0, 1.0, 1.0],
                "color2": [1.0, 1.0, 1.0, 1.0],
                "color_dead": [0.0, 0.0, 0.0, 0.0]
            }"#,
        )
        .unwrap();
        assert_eq!(preset.to_config().gravity, Vec3::ZERO);
    }
}
