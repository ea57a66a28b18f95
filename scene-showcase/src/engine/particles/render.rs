use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};

use crate::engine::particles::emitter::ParticleEmitter;

/// Renderable side of an emitter: one mesh rebuilt every frame from the
/// live particles as camera-facing quads with per-vertex gradient
/// colours.
#[derive(Component)]
pub struct ParticleCloud {
    pub mesh: Handle<Mesh>,
}

impl ParticleCloud {
    pub fn empty_mesh() -> Mesh {
        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        );
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, Vec::<[f32; 3]>::new());
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, Vec::<[f32; 2]>::new());
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, Vec::<[f32; 4]>::new());
        mesh.insert_indices(Indices::U32(Vec::new()));
        mesh
    }
}

/// Rebuild every particle cloud mesh, billboarded toward the camera.
pub fn rebuild_particle_meshes(
    mut meshes: ResMut<Assets<Mesh>>,
    cameras: Query<&GlobalTransform, With<Camera3d>>,
    clouds: Query<(&ParticleEmitter, &ParticleCloud)>,
) {
    let Ok(camera_transform) = cameras.single() else {
        return;
    };
    let camera_transform = camera_transform.compute_transform();
    let right = camera_transform.right().as_vec3();
    let up = camera_transform.up().as_vec3();

    for (emitter, cloud) in &clouds {
        let Some(mesh) = meshes.get_mut(&cloud.mesh) else {
            continue;
        };

        let count = emitter.particles().len();
        let mut positions = Vec::with_capacity(count * 4);
        let mut uvs = Vec::with_capacity(count * 4);
        let mut colors = Vec::with_capacity(count * 4);
        let mut indices = Vec::with_capacity(count * 6);

        for (i, particle) in emitter.particles().iter().enumerate() {
            let half = particle.size * 0.5;
            let center = particle.position;
            let color = particle.color(&emitter.config).to_array();

            let corners = [
                center - right * half - up * half,
                center + right * half - up * half,
                center - right * half + up * half,
                center + right * half + up * half,
            ];
            for corner in corners {
                positions.push(corner.to_array());
                colors.push(color);
            }
            uvs.extend_from_slice(&[[0.0, 1.0], [1.0, 1.0], [0.0, 0.0], [1.0, 0.0]]);

            let base = (i * 4) as u32;
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 1, base + 3]);
        }

        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
        mesh.insert_indices(Indices::U32(indices));
    }
}
