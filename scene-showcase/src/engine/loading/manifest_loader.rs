use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::engine::core::app_state::AppState;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::scene_config::SceneConfig;

const SCENE_MANIFEST_PATH: &str = "scene/default.scene.json";

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<SceneConfig>>,
}

/// Start the loading process.
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    manifest_loader.handle = Some(asset_server.load(SCENE_MANIFEST_PATH));
}

/// Resolve the scene manifest and move on to construction. A manifest
/// that fails to load is not fatal: the built-in defaults take over.
pub fn resolve_manifest(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    asset_server: Res<AssetServer>,
    configs: Res<Assets<SceneConfig>>,
    mut commands: Commands,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.manifest_loaded {
        return;
    }
    let Some(ref handle) = manifest_loader.handle else {
        return;
    };

    match asset_server.get_load_state(handle) {
        Some(LoadState::Loaded) => {
            if let Some(config) = configs.get(handle) {
                println!("✓ Scene manifest loaded");
                commands.insert_resource(config.clone());
                loading_progress.manifest_loaded = true;
                next_state.set(AppState::Building);
            }
        }
        Some(LoadState::Failed(_)) => {
            warn!("scene manifest missing or malformed, using built-in defaults");
            commands.insert_resource(SceneConfig::default());
            loading_progress.manifest_loaded = true;
            next_state.set(AppState::Building);
        }
        _ => {}
    }
}
