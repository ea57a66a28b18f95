pub mod emitter;
pub mod presets;
pub mod render;

use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;

use constants::particles::EMITTER_ANCHOR_POSITION;
use constants::scene::FOCAL_POSITION;
use constants::storage::PARTICLE_SPRITE_OBJECT;

use crate::engine::assets::remote_texture::TextureSlot;
use crate::engine::assets::storage::StorageResolver;
use crate::engine::assets::SceneAssets;
use crate::engine::core::scene_context::SceneContext;
use crate::engine::loading::scene_config::ParticleStrategy;
use crate::engine::particles::emitter::{EmitterConfig, ParticleEmitter};
use crate::engine::particles::presets::{load_presets, PresetLibrary};
use crate::engine::particles::render::ParticleCloud;

/// Invisible anchor at the visual focal point that preset effects are
/// rebound to after loading.
#[derive(Component)]
pub struct FocalAnchor;

/// Anchor the manual emitter emits from.
#[derive(Component)]
pub struct EmitterAnchor;

/// UI request to start or stop particle emission.
#[derive(Event)]
pub struct ParticleToggleEvent {
    pub enabled: bool,
}

/// Spawn a renderable emitter entity bound to an anchor.
pub fn spawn_emitter_entity(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    scene_assets: &SceneAssets,
    config: EmitterConfig,
    anchor: Entity,
) -> Entity {
    let mesh = meshes.add(ParticleCloud::empty_mesh());
    let material = scene_assets
        .particle_material
        .clone()
        .unwrap_or_default();
    commands
        .spawn((
            ParticleEmitter::started(config, anchor),
            ParticleCloud { mesh: mesh.clone() },
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::IDENTITY,
            // the cloud mesh is rewritten every frame, so its cached
            // bounds are meaningless
            NoFrustumCulling,
        ))
        .id()
}

/// Construct the particle subsystem for the configured strategy. The
/// shared sprite texture is requested here and bound whenever it
/// resolves; until then particles render with the plain gradient.
pub fn spawn_particle_subsystem(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    scene_assets: &mut SceneAssets,
    resolver: &StorageResolver,
    asset_server: &AssetServer,
    library: &mut PresetLibrary,
    context: &mut SceneContext,
    strategy: &ParticleStrategy,
) {
    scene_assets.particle_material = Some(materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        alpha_mode: AlphaMode::Add,
        cull_mode: None,
        ..default()
    }));
    resolver.request(PARTICLE_SPRITE_OBJECT, TextureSlot::ParticleSprite);

    match strategy {
        ParticleStrategy::Manual => {
            let anchor = commands
                .spawn((
                    Transform::from_translation(EMITTER_ANCHOR_POSITION),
                    EmitterAnchor,
                ))
                .id();
            let emitter = spawn_emitter_entity(
                commands,
                meshes,
                scene_assets,
                EmitterConfig::default(),
                anchor,
            );
            context.primary_emitter = Some(emitter);
        }
        ParticleStrategy::Presets { ids } => {
            commands.spawn((Transform::from_translation(FOCAL_POSITION), FocalAnchor));
            load_presets(library, asset_server, ids);
        }
    }
}

/// Start or stop emission on toggle. The manual emitter is the primary
/// handle; with the preset strategy every loaded effect follows the
/// toggle instead.
pub fn handle_particle_toggle(
    mut events: EventReader<ParticleToggleEvent>,
    context: Res<SceneContext>,
    mut emitters: Query<&mut ParticleEmitter>,
) {
    for event in events.read() {
        let apply = |emitter: &mut ParticleEmitter| {
            if emitter.is_running() == event.enabled {
                return;
            }
            if event.enabled {
                emitter.start();
            } else {
                emitter.stop();
            }
        };

        if let Some(primary) = context.primary_emitter {
            if let Ok(mut emitter) = emitters.get_mut(primary) {
                apply(&mut emitter);
            }
        } else {
            for mut emitter in &mut emitters {
                apply(&mut emitter);
            }
        }
        info!(
            "particle emission {}",
            if event.enabled { "started" } else { "stopped" }
        );
    }
}
