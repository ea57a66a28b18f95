use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;

use crate::engine::assets::SceneAssets;
use crate::engine::loading::scene_config::{GroundConfig, SceneConfig};
use crate::engine::scene::heightmap::build_heightmap_mesh;
use crate::engine::scene::static_hint::{apply_entity_hint, apply_mesh_hint};

#[derive(Component)]
pub struct Ground;

#[derive(Resource, Default)]
pub struct GroundBuilt {
    pub built: bool,
}

fn ground_material(scene_assets: &SceneAssets) -> StandardMaterial {
    StandardMaterial {
        base_color_texture: scene_assets.grass_texture.clone(),
        perceptual_roughness: 1.0,
        ..default()
    }
}

/// Spawn the flat ground variant: a shadow-receiving plane carrying the
/// procedural grass texture.
pub fn spawn_flat_ground(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    scene_assets: &SceneAssets,
    config: &GroundConfig,
) -> Entity {
    let mut mesh = Mesh::from(Plane3d::default().mesh().size(config.size, config.size));
    apply_mesh_hint(&mut mesh, config.hint);

    let mut entity = commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(ground_material(scene_assets))),
        Transform::from_xyz(0.0, config.height, 0.0),
        NotShadowCaster,
        Ground,
    ));
    apply_entity_hint(&mut entity, config.hint);
    entity.id()
}

/// Heightmap variant is deferred: the elevation image arrives through
/// the resolver, so the displaced mesh is built once it has decoded.
pub fn build_heightmap_ground_when_ready(
    mut commands: Commands,
    mut ground_built: ResMut<GroundBuilt>,
    config: Res<SceneConfig>,
    scene_assets: Res<SceneAssets>,
    images: Res<Assets<Image>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if ground_built.built {
        return;
    }
    let Some(elevation) = config.ground.elevation.as_ref() else {
        return;
    };
    let Some(heightmap) = scene_assets
        .heightmap
        .as_ref()
        .and_then(|handle| images.get(handle))
    else {
        return;
    };

    let mut mesh = build_heightmap_mesh(
        heightmap,
        config.ground.size,
        elevation.subdivisions,
        elevation.min_height,
        elevation.max_height,
    );
    apply_mesh_hint(&mut mesh, config.ground.hint);

    let mut entity = commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(ground_material(&scene_assets))),
        Transform::from_xyz(0.0, config.ground.height, 0.0),
        NotShadowCaster,
        Ground,
    ));
    apply_entity_hint(&mut entity, config.ground.hint);

    ground_built.built = true;
    println!("✓ Heightmap ground built");
}
