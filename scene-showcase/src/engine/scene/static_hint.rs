use bevy::ecs::system::EntityCommands;
use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;
use serde::Deserialize;

/// Per-node performance hints for geometry that never moves. These only
/// trade per-frame work for memory; appearance is unaffected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct StaticHint {
    /// Node transform is considered immutable after construction.
    #[serde(default)]
    pub freeze_transform: bool,
    /// Skip bounding-volume upkeep for culling (node is always drawn).
    #[serde(default)]
    pub skip_bounding_sync: bool,
    /// Convert the mesh to a non-indexed representation.
    #[serde(default)]
    pub unindexed: bool,
}

/// Marker for nodes whose world transform is frozen after construction.
#[derive(Component)]
pub struct FrozenTransform;

/// Apply the entity-level hints. The mesh-level `unindexed` hint is
/// applied at build time via [`apply_mesh_hint`].
pub fn apply_entity_hint(entity: &mut EntityCommands, hint: StaticHint) {
    if hint.skip_bounding_sync {
        entity.insert(NoFrustumCulling);
    }
    if hint.freeze_transform {
        entity.insert(FrozenTransform);
    }
}

pub fn apply_mesh_hint(mesh: &mut Mesh, hint: StaticHint) {
    if hint.unindexed && mesh.indices().is_some() {
        mesh.duplicate_vertices();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unindexed_hint_drops_the_index_buffer() {
        let mut mesh = Mesh::from(Cuboid::new(1.0, 1.0, 1.0));
        assert!(mesh.indices().is_some());
        apply_mesh_hint(
            &mut mesh,
            StaticHint {
                unindexed: true,
                ..default()
            },
        );
        assert!(mesh.indices().is_none());
    }

    #[test]
    fn default_hint_leaves_mesh_untouched() {
        let mut mesh = Mesh::from(Cuboid::new(1.0, 1.0, 1.0));
        let before = mesh.count_vertices();
        apply_mesh_hint(&mut mesh, StaticHint::default());
        assert_eq!(mesh.count_vertices(), before);
        assert!(mesh.indices().is_some());
    }
}
