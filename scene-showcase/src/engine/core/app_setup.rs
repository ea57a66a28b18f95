use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::pbr::{DirectionalLightShadowMap, MaterialPlugin};
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use constants::render_settings::CLEAR_COLOR;
use constants::storage::SKYBOX_FACE_OBJECTS;

// Crate engine modules
use crate::engine::assets::remote_texture::{apply_resolutions, TextureSlot};
use crate::engine::assets::storage::{cancel_resolutions_on_exit, StorageResolver};
use crate::engine::assets::SceneAssets;
use crate::engine::camera::orbit::{
    auto_rotate_camera, orbit_camera_controller, sync_orbit_camera, OrbitCamera,
};
use crate::engine::core::app_state::{activate_camera, transition_to_running, AppState};
use crate::engine::core::scene_context::SceneContext;
use crate::engine::core::window_config::create_window_config;
use crate::engine::interact::animation::animate_wobble;
use crate::engine::interact::click::handle_pick_up_trigger;
use crate::engine::interact::drag::drag_interactive_objects;
use crate::engine::interact::focal::spawn_focal_pair;
use crate::engine::lighting::shadow_rig::{sync_shadow_casters, ShadowRig};
use crate::engine::lighting::spawn_key_light;
use crate::engine::loading::manifest_loader::{resolve_manifest, start_loading, ManifestLoader};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::scene_config::SceneConfig;
use crate::engine::particles::emitter::update_emitters;
use crate::engine::particles::presets::{bind_loaded_presets, ParticlePreset, PresetLibrary};
use crate::engine::particles::render::rebuild_particle_meshes;
use crate::engine::particles::{
    handle_particle_toggle, spawn_particle_subsystem, ParticleToggleEvent,
};
use crate::engine::render::fresnel::FresnelMaterial;
use crate::engine::scene::fog::{apply_fog_toggles, sync_fog, FogConfig, FogToggleEvent};
use crate::engine::scene::grass::default_grass_texture;
use crate::engine::scene::ground::{
    build_heightmap_ground_when_ready, spawn_flat_ground, GroundBuilt,
};
use crate::engine::scene::skybox::{compose_skybox_when_ready, SkyFace};
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::engine::systems::surface::{correct_initial_surface, notify_surface_resized};
// Web RPC bridge
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::{fps_text_update_system, spawn_fps_overlay};
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::shortcuts::handle_toggle_shortcuts;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers the scene manifest and particle snippets as
        // loadable JSON asset types.
        .add_plugins(JsonAssetPlugin::<SceneConfig>::new(&["scene.json"]))
        .add_plugins(JsonAssetPlugin::<ParticlePreset>::new(&["particle.json"]))
        .add_plugins(MaterialPlugin::<FresnelMaterial>::default())
        .add_plugins(WebRpcPlugin);

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>()
        .init_resource::<SceneAssets>()
        .init_resource::<SceneContext>()
        .init_resource::<StorageResolver>()
        .init_resource::<PresetLibrary>()
        .init_resource::<GroundBuilt>()
        .init_resource::<OrbitCamera>()
        .init_resource::<FogConfig>()
        .init_resource::<ShadowRig>()
        .insert_resource(ClearColor(Color::srgba(
            CLEAR_COLOR[0],
            CLEAR_COLOR[1],
            CLEAR_COLOR[2],
            CLEAR_COLOR[3],
        )))
        .add_event::<FogToggleEvent>()
        .add_event::<ParticleToggleEvent>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            resolve_manifest.run_if(in_state(AppState::Loading)),
        )
        .add_systems(
            OnEnter(AppState::Building),
            (construct_scene, transition_to_running).chain(),
        )
        .add_systems(
            OnEnter(AppState::Running),
            (activate_camera, correct_initial_surface),
        );

    // Asynchronous resource binding: everything requested during
    // construction drains in here, frame by frame.
    app.add_systems(
        Update,
        (
            apply_resolutions,
            compose_skybox_when_ready,
            build_heightmap_ground_when_ready,
            bind_loaded_presets,
            sync_shadow_casters,
        )
            .chain()
            .run_if(in_state(AppState::Running)),
    );

    // Base runtime systems that run on all platforms.
    let runtime_systems = (
        // camera rig
        (orbit_camera_controller, auto_rotate_camera, sync_orbit_camera).chain(),
        // interaction
        drag_interactive_objects,
        handle_pick_up_trigger,
        animate_wobble,
        // particles
        (handle_particle_toggle, update_emitters, rebuild_particle_meshes).chain(),
        // fog
        (apply_fog_toggles, sync_fog).chain(),
        // frontend feedback
        fps_notification_system,
        notify_surface_resized,
    );

    app.add_systems(Update, runtime_systems.run_if(in_state(AppState::Running)));
    app.add_systems(Last, cancel_resolutions_on_exit);

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
        app.add_systems(
            Update,
            handle_toggle_shortcuts.run_if(in_state(AppState::Running)),
        );
    }

    app
}

/// Startup only handles the surface-level scaffolding: the inactive
/// camera and the overlay. The scene itself waits for the manifest.
fn setup(mut commands: Commands, orbit: Res<OrbitCamera>) {
    commands.spawn((
        Camera3d::default(),
        Camera {
            is_active: false,
            ..default()
        },
        Transform::from_translation(orbit.position()).looking_at(orbit.target, Vec3::Y),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 120.0,
        ..default()
    });

    #[cfg(not(target_arch = "wasm32"))]
    {
        spawn_fps_overlay(&mut commands);
    }
}

/// Assemble the whole scene graph in fixed dependency order: lighting
/// and shadow rig, ground, the focal pair projected into the rig,
/// particles, then the six skybox face requests. All remote texture
/// requests are issued here and bound later as they resolve.
fn construct_scene(
    mut commands: Commands,
    config: Res<SceneConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut standard_materials: ResMut<Assets<StandardMaterial>>,
    mut fresnel_materials: ResMut<Assets<FresnelMaterial>>,
    mut images: ResMut<Assets<Image>>,
    mut scene_assets: ResMut<SceneAssets>,
    resolver: Res<StorageResolver>,
    mut context: ResMut<SceneContext>,
    mut library: ResMut<PresetLibrary>,
    asset_server: Res<AssetServer>,
    mut orbit: ResMut<OrbitCamera>,
) {
    orbit.auto_rotate = config.camera.auto_rotate;

    // lighting and the shadow rig bound to it
    let light = spawn_key_light(&mut commands);
    let mut rig = ShadowRig::new(light, config.shadow_map_size);
    if let Some(map) = rig.shadow_map {
        commands.insert_resource(DirectionalLightShadowMap {
            size: map.size as usize,
        });
    }

    // ground with the procedural grass ambient texture
    scene_assets.grass_texture = Some(images.add(default_grass_texture()));
    if let Some(elevation) = config.ground.elevation.as_ref() {
        // displaced ground is built once the elevation image resolves
        resolver.request(&elevation.object, TextureSlot::GroundHeightmap);
    } else {
        spawn_flat_ground(
            &mut commands,
            &mut meshes,
            &mut standard_materials,
            &scene_assets,
            &config.ground,
        );
    }

    // focal interactive pair, projected into the shadow rig
    spawn_focal_pair(
        &mut commands,
        &mut meshes,
        &mut fresnel_materials,
        &mut scene_assets,
        &resolver,
        &mut rig,
    );

    // particle subsystem for the configured strategy
    spawn_particle_subsystem(
        &mut commands,
        &mut meshes,
        &mut standard_materials,
        &mut scene_assets,
        &resolver,
        &asset_server,
        &mut library,
        &mut context,
        &config.particles,
    );

    // six independent skybox face resolutions, joined on completion
    for (object, face) in SKYBOX_FACE_OBJECTS.iter().zip(SkyFace::ALL) {
        resolver.request(object, TextureSlot::SkyFace(face));
    }

    commands.insert_resource(config.fog.to_fog_config());
    commands.insert_resource(rig);
    println!("✓ Scene graph assembled");
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
