use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use crate::engine::assets::storage::{ResolutionError, StorageResolver};
use crate::engine::assets::SceneAssets;
use crate::engine::render::fresnel::FresnelMaterial;
use crate::engine::scene::skybox::SkyFace;

/// Destination of one remote texture resolution. The slot is recorded
/// when the request is issued and applied when its bytes drain in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureSlot {
    /// Reflection texture of the focal material.
    FocalReflection,
    /// Sprite shared by all particles.
    ParticleSprite,
    /// One face of the skybox cube texture.
    SkyFace(SkyFace),
    /// Grayscale elevation image for the heightmap ground variant.
    GroundHeightmap,
}

/// Decode fetched bytes into an engine texture.
pub fn decode_image(bytes: &[u8]) -> Result<Image, ResolutionError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| ResolutionError::Malformed(e.to_string()))?
        .to_rgba8();
    let (width, height) = decoded.dimensions();
    Ok(Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        decoded.into_raw(),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    ))
}

/// Drain finished fetches and side-effect each decoded image into its
/// slot. A failed resolution leaves the slot unset: the mesh keeps its
/// untextured material and nothing retries.
pub fn apply_resolutions(
    resolver: Res<StorageResolver>,
    mut scene_assets: ResMut<SceneAssets>,
    mut images: ResMut<Assets<Image>>,
    mut fresnel_materials: ResMut<Assets<FresnelMaterial>>,
    mut standard_materials: ResMut<Assets<StandardMaterial>>,
) {
    for done in resolver.drain() {
        let slot = done.slot;
        let image = match done.result.and_then(|bytes| decode_image(&bytes)) {
            Ok(image) => image,
            Err(error) => {
                warn!("resolution for {slot:?} failed, slot stays unset: {error}");
                if let TextureSlot::SkyFace(face) = slot {
                    scene_assets.skybox.mark_failed(face);
                }
                continue;
            }
        };
        let handle = images.add(image);

        match slot {
            TextureSlot::FocalReflection => {
                if let Some(material) = scene_assets
                    .focal_material
                    .as_ref()
                    .and_then(|id| fresnel_materials.get_mut(id))
                {
                    material.base.base_color_texture = Some(handle);
                    println!("✓ Focal reflection texture bound");
                }
            }
            TextureSlot::ParticleSprite => {
                if let Some(material) = scene_assets
                    .particle_material
                    .as_ref()
                    .and_then(|id| standard_materials.get_mut(id))
                {
                    material.base_color_texture = Some(handle);
                    println!("✓ Particle sprite texture bound");
                }
            }
            TextureSlot::SkyFace(face) => {
                scene_assets.skybox.set(face, handle);
            }
            TextureSlot::GroundHeightmap => {
                scene_assets.heightmap = Some(handle);
                println!("✓ Ground heightmap resolved");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_a_malformed_resolution() {
        let result = decode_image(&[0xde, 0xad, 0xbe, 0xef]);
        assert!(matches!(result, Err(ResolutionError::Malformed(_))));
    }

    #[test]
    fn png_bytes_decode_to_rgba() {
        // 1x1 opaque red PNG
        let mut bytes = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut bytes);
        use image::ImageEncoder;
        encoder
            .write_image(&[255, 0, 0, 255], 1, 1, image::ExtendedColorType::Rgba8)
            .unwrap();

        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.width(), 1);
        assert_eq!(decoded.height(), 1);
        assert_eq!(decoded.data.as_ref().unwrap()[0], 255);
    }
}
