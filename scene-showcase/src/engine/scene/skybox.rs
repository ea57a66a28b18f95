use bevy::asset::RenderAssetUsages;
use bevy::core_pipeline::Skybox;
use bevy::prelude::*;
use bevy::render::render_resource::{
    Extent3d, TextureDimension, TextureFormat, TextureViewDescriptor, TextureViewDimension,
};

use constants::render_settings::SKYBOX_BRIGHTNESS;

/// Directional face of the skybox cube, named after the axis it looks
/// down from the inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkyFace {
    Px,
    Py,
    Pz,
    Nx,
    Ny,
    Nz,
}

impl SkyFace {
    pub const ALL: [SkyFace; 6] = [
        SkyFace::Px,
        SkyFace::Py,
        SkyFace::Pz,
        SkyFace::Nx,
        SkyFace::Ny,
        SkyFace::Nz,
    ];

    fn index(self) -> usize {
        match self {
            SkyFace::Px => 0,
            SkyFace::Py => 1,
            SkyFace::Pz => 2,
            SkyFace::Nx => 3,
            SkyFace::Ny => 4,
            SkyFace::Nz => 5,
        }
    }
}

#[derive(Default, Clone)]
enum FaceState {
    #[default]
    Pending,
    Resolved(Handle<Image>),
    Failed,
}

/// Join state for the six independent face resolutions. The cube
/// texture is composed only once every face has resolved; one failure
/// leaves the skybox untextured for the rest of the session.
#[derive(Default)]
pub struct SkyboxFaces {
    faces: [FaceState; 6],
    composed: bool,
}

impl SkyboxFaces {
    pub fn set(&mut self, face: SkyFace, handle: Handle<Image>) {
        self.faces[face.index()] = FaceState::Resolved(handle);
    }

    pub fn mark_failed(&mut self, face: SkyFace) {
        self.faces[face.index()] = FaceState::Failed;
    }

    pub fn is_complete(&self) -> bool {
        self.faces
            .iter()
            .all(|f| matches!(f, FaceState::Resolved(_)))
    }

    pub fn is_composed(&self) -> bool {
        self.composed
    }

    fn resolved_handles(&self) -> Option<[&Handle<Image>; 6]> {
        let mut handles = [const { None }; 6];
        for (i, face) in self.faces.iter().enumerate() {
            match face {
                FaceState::Resolved(handle) => handles[i] = Some(handle),
                _ => return None,
            }
        }
        Some(handles.map(|h| h.expect("all faces checked resolved")))
    }
}

/// Stack the six face images into one cube texture, reordered from the
/// bucket's px/py/pz/nx/ny/nz naming to the engine's +X -X +Y -Y +Z -Z
/// layer order.
pub fn compose_cube_texture(faces: [&Image; 6]) -> Option<Image> {
    let width = faces[0].width();
    let height = faces[0].height();
    if faces
        .iter()
        .any(|f| f.width() != width || f.height() != height)
    {
        warn!("skybox faces disagree on dimensions, skipping composition");
        return None;
    }

    // px, nx, py, ny, pz, nz
    let layer_order = [0usize, 3, 1, 4, 2, 5];
    let mut data = Vec::with_capacity((width * height * 4) as usize * 6);
    for layer in layer_order {
        data.extend_from_slice(faces[layer].data.as_ref()?);
    }

    let mut cube = Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 6,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    );
    cube.texture_view_descriptor = Some(TextureViewDescriptor {
        dimension: Some(TextureViewDimension::Cube),
        ..default()
    });
    Some(cube)
}

/// Once all six faces are in, build the cube texture and hand it to the
/// engine's skybox on the active camera.
pub fn compose_skybox_when_ready(
    mut commands: Commands,
    mut scene_assets: ResMut<crate::engine::assets::SceneAssets>,
    mut images: ResMut<Assets<Image>>,
    cameras: Query<Entity, With<Camera3d>>,
) {
    if scene_assets.skybox.is_composed() || !scene_assets.skybox.is_complete() {
        return;
    }
    let Some(handles) = scene_assets.skybox.resolved_handles() else {
        return;
    };

    let mut faces = [const { None }; 6];
    for (i, handle) in handles.iter().enumerate() {
        faces[i] = images.get(*handle);
    }
    let Some(faces) = faces
        .iter()
        .copied()
        .collect::<Option<Vec<_>>>()
        .and_then(|v| <[&Image; 6]>::try_from(v).ok())
    else {
        return;
    };

    let Some(cube) = compose_cube_texture(faces) else {
        return;
    };
    let cube_handle = images.add(cube);

    let Ok(camera) = cameras.single() else {
        return;
    };
    commands.entity(camera).insert(Skybox {
        image: cube_handle,
        brightness: SKYBOX_BRIGHTNESS,
        rotation: Quat::IDENTITY,
    });
    scene_assets.skybox.composed = true;
    println!("✓ Skybox cube texture composed from six faces");
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::asset::RenderAssetUsages;

    fn solid_face(width: u32, height: u32, value: u8) -> Image {
        Image::new(
            Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            vec![value; (width * height * 4) as usize],
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::default(),
        )
    }

    #[test]
    fn five_of_six_faces_is_not_complete() {
        let mut faces = SkyboxFaces::default();
        for face in SkyFace::ALL.into_iter().take(5) {
            faces.set(face, Handle::default());
        }
        faces.mark_failed(SkyFace::Nz);
        assert!(!faces.is_complete());
    }

    #[test]
    fn all_six_faces_complete_the_join() {
        let mut faces = SkyboxFaces::default();
        for face in SkyFace::ALL {
            faces.set(face, Handle::default());
        }
        assert!(faces.is_complete());
    }

    #[test]
    fn cube_texture_stacks_six_layers() {
        let faces: Vec<Image> = (0..6).map(|i| solid_face(2, 2, i as u8)).collect();
        let refs: [&Image; 6] = std::array::from_fn(|i| &faces[i]);
        let cube = compose_cube_texture(refs).unwrap();
        assert_eq!(cube.texture_descriptor.size.depth_or_array_layers, 6);
        let data = cube.data.as_ref().unwrap();
        assert_eq!(data.len(), 2 * 2 * 4 * 6);
        // wgpu layer order: +X(-px) first, then -X which was the bucket's nx
        assert_eq!(data[0], 0);
        assert_eq!(data[2 * 2 * 4], 3);
    }

    #[test]
    fn mismatched_face_dimensions_abort_composition() {
        let faces: Vec<Image> = (0..5).map(|_| solid_face(2, 2, 0)).collect();
        let odd = solid_face(4, 4, 0);
        let refs: [&Image; 6] = [
            &faces[0], &faces[1], &faces[2], &faces[3], &faces[4], &odd,
        ];
        assert!(compose_cube_texture(refs).is_none());
    }
}
