use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;

use crate::engine::render::fresnel::FresnelMaterial;

/// Engine-side description of the rig's shadow map. Absence of the map
/// makes every projection request a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowMapDesc {
    pub size: u32,
}

/// One shadow generator bound to one light, owning the ordered render
/// list of nodes rasterized into its depth map. The list is append
/// only: no deduplication, duplicate entries are wasted work but
/// harmless for opaque casters.
#[derive(Resource, Default)]
pub struct ShadowRig {
    pub light: Option<Entity>,
    pub shadow_map: Option<ShadowMapDesc>,
    render_list: Vec<Entity>,
}

impl ShadowRig {
    pub fn new(light: Entity, map_size: u32) -> Self {
        Self {
            light: Some(light),
            shadow_map: Some(ShadowMapDesc { size: map_size }),
            render_list: Vec::new(),
        }
    }

    pub fn render_list(&self) -> &[Entity] {
        &self.render_list
    }
}

/// Append nodes to the rig's render list. Skipped entirely when the
/// shadow map handle is absent; a node never appended simply casts no
/// shadow.
pub fn project_shadow(rig: &mut ShadowRig, nodes: &[Entity]) {
    if rig.shadow_map.is_none() {
        return;
    }
    rig.render_list.extend_from_slice(nodes);
}

/// Meshes spawn as non-casters; membership in the render list is what
/// turns casting on. Semi-transparent materials stay non-casters so
/// their partial transparency composites correctly.
pub fn sync_shadow_casters(
    mut commands: Commands,
    rig: Res<ShadowRig>,
    materials: Res<Assets<StandardMaterial>>,
    fresnel_materials: Res<Assets<FresnelMaterial>>,
    standard_handles: Query<&MeshMaterial3d<StandardMaterial>>,
    fresnel_handles: Query<&MeshMaterial3d<FresnelMaterial>>,
) {
    if rig.light.is_none() {
        return;
    }
    for &node in rig.render_list() {
        let alpha = if let Ok(handle) = fresnel_handles.get(node) {
            fresnel_materials
                .get(&handle.0)
                .map(|m| m.base.base_color.alpha())
        } else if let Ok(handle) = standard_handles.get(node) {
            materials.get(&handle.0).map(|m| m.base_color.alpha())
        } else {
            None
        };

        match alpha {
            Some(alpha) if alpha >= 1.0 => {
                commands.entity(node).remove::<NotShadowCaster>();
            }
            // translucent or unknown material: leave it out of the map
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_list_is_append_only_with_duplicates() {
        let mut world = World::new();
        let node = world.spawn_empty().id();
        let light = world.spawn_empty().id();

        let mut rig = ShadowRig::new(light, 1024);
        project_shadow(&mut rig, &[node]);
        project_shadow(&mut rig, &[node]);

        assert_eq!(rig.render_list().len(), 2);
        assert!(rig.render_list().iter().all(|&e| e == node));
    }

    #[test]
    fn single_projection_lists_exactly_that_mesh() {
        let mut world = World::new();
        let node = world.spawn_empty().id();
        let light = world.spawn_empty().id();

        let mut rig = ShadowRig::new(light, 256);
        project_shadow(&mut rig, &[node]);

        assert_eq!(rig.render_list(), &[node]);
    }

    #[test]
    fn projection_without_a_shadow_map_is_a_silent_skip() {
        let mut world = World::new();
        let node = world.spawn_empty().id();

        let mut rig = ShadowRig::default();
        project_shadow(&mut rig, &[node]);

        assert!(rig.render_list().is_empty());
    }
}
