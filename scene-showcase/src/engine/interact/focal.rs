use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;

use constants::scene::{FOCAL_CLONE_POSITION, FOCAL_POSITION, FOCAL_RADIUS, FOCAL_SUBDIVISIONS};
use constants::storage::FOCAL_REFLECTION_OBJECT;

use crate::engine::assets::remote_texture::TextureSlot;
use crate::engine::assets::storage::StorageResolver;
use crate::engine::assets::SceneAssets;
use crate::engine::interact::animation::WobbleAnimation;
use crate::engine::interact::click::PickTarget;
use crate::engine::interact::drag::AxisDrag;
use crate::engine::lighting::shadow_rig::{project_shadow, ShadowRig};
use crate::engine::render::fresnel::{fresnel_material, FresnelMaterial, FresnelParams};

#[derive(Component)]
pub struct FocalPrimary;

#[derive(Component)]
pub struct FocalClone;

/// Build the focal pair: a draggable, clickable icosphere and a semi
/// transparent clone running the wobble animation. Both share one mesh;
/// the materials are independent clones so the transparency never leaks
/// back to the original. Both are projected into the shadow rig; the
/// translucent clone is filtered out again by the caster sync.
pub fn spawn_focal_pair(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<FresnelMaterial>,
    scene_assets: &mut SceneAssets,
    resolver: &StorageResolver,
    rig: &mut ShadowRig,
) -> (Entity, Entity) {
    let mesh = meshes.add(
        Sphere::new(FOCAL_RADIUS)
            .mesh()
            .ico(FOCAL_SUBDIVISIONS as u32)
            .expect("icosphere subdivision count is within the supported range"),
    );

    let params = FresnelParams::default();
    let primary_material = materials.add(fresnel_material(StandardMaterial::default(), params));
    let clone_material = materials.add(fresnel_material(
        StandardMaterial {
            base_color: Color::srgba(1.0, 1.0, 1.0, 0.5),
            alpha_mode: AlphaMode::Blend,
            ..default()
        },
        params,
    ));
    scene_assets.focal_material = Some(primary_material.clone());
    scene_assets.clone_material = Some(clone_material.clone());

    // reflection texture arrives asynchronously; the material shades
    // untextured until then
    resolver.request(FOCAL_REFLECTION_OBJECT, TextureSlot::FocalReflection);

    let primary = commands
        .spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(primary_material),
            Transform::from_translation(FOCAL_POSITION),
            NotShadowCaster,
            AxisDrag::along(Vec3::Y, FOCAL_RADIUS),
            PickTarget {
                radius: FOCAL_RADIUS,
            },
            FocalPrimary,
        ))
        .id();

    let clone = commands
        .spawn((
            Mesh3d(mesh),
            MeshMaterial3d(clone_material),
            Transform::from_translation(FOCAL_CLONE_POSITION),
            NotShadowCaster,
            WobbleAnimation::default(),
            FocalClone,
        ))
        .id();

    project_shadow(rig, &[primary, clone]);
    (primary, clone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::SystemState;

    #[test]
    fn focal_pair_has_materials_before_any_resolution_completes() {
        let mut world = World::new();
        world.insert_resource(Assets::<Mesh>::default());
        world.insert_resource(Assets::<FresnelMaterial>::default());

        let mut scene_assets = SceneAssets::default();
        let resolver = StorageResolver::new("https://bucket.example/o");
        let light = world.spawn_empty().id();
        let mut rig = ShadowRig::new(light, 1024);

        let mut state: SystemState<(
            Commands,
            ResMut<Assets<Mesh>>,
            ResMut<Assets<FresnelMaterial>>,
        )> = SystemState::new(&mut world);
        let (mut commands, mut meshes, mut materials) = state.get_mut(&mut world);
        let (primary, clone) = spawn_focal_pair(
            &mut commands,
            &mut meshes,
            &mut materials,
            &mut scene_assets,
            &resolver,
            &mut rig,
        );
        state.apply(&mut world);

        // both the primary and the clone are projected into the rig
        assert_eq!(rig.render_list(), &[primary, clone]);

        // materials exist immediately, texture slots still empty
        let materials = world.resource::<Assets<FresnelMaterial>>();
        let focal = materials
            .get(scene_assets.focal_material.as_ref().unwrap())
            .unwrap();
        assert!(focal.base.base_color_texture.is_none());

        let clone_material = materials
            .get(scene_assets.clone_material.as_ref().unwrap())
            .unwrap();
        assert!(clone_material.base.base_color.alpha() < 1.0);

        assert!(world.get::<MeshMaterial3d<FresnelMaterial>>(primary).is_some());
        assert!(world.get::<WobbleAnimation>(clone).is_some());
    }
}
