use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};

/// Sample the elevation image at normalised coordinates with bilinear
/// interpolation, reading the red channel as grayscale height in
/// [0, 1], then denormalising into the configured elevation range.
pub fn sample_heightmap_bilinear(
    heightmap_image: &Image,
    norm_x: f32,
    norm_z: f32,
    min_height: f32,
    max_height: f32,
) -> f32 {
    let Some(data) = heightmap_image.data.as_ref() else {
        return min_height;
    };
    let width = heightmap_image.width() as usize;
    let height = heightmap_image.height() as usize;
    if width == 0 || height == 0 {
        return min_height;
    }

    let pixel_x_f = norm_x.clamp(0.0, 1.0) * (width - 1) as f32;
    let pixel_z_f = norm_z.clamp(0.0, 1.0) * (height - 1) as f32;

    let x0 = pixel_x_f.floor() as usize;
    let z0 = pixel_z_f.floor() as usize;
    let x1 = (x0 + 1).min(width - 1);
    let z1 = (z0 + 1).min(height - 1);

    let wx = pixel_x_f - x0 as f32;
    let wz = pixel_z_f - z0 as f32;

    let h00 = sample_height_at_pixel(data, width, x0, z0);
    let h10 = sample_height_at_pixel(data, width, x1, z0);
    let h01 = sample_height_at_pixel(data, width, x0, z1);
    let h11 = sample_height_at_pixel(data, width, x1, z1);

    let top = h00 * (1.0 - wx) + h10 * wx;
    let bottom = h01 * (1.0 - wx) + h11 * wx;
    let normalized = top * (1.0 - wz) + bottom * wz;

    min_height + normalized * (max_height - min_height)
}

fn sample_height_at_pixel(data: &[u8], width: usize, x: usize, z: usize) -> f32 {
    let pixel_index = (z * width + x) * 4;
    if pixel_index >= data.len() {
        return 0.0;
    }
    data[pixel_index] as f32 / 255.0
}

/// Build a ground mesh displaced by the elevation image: a regular
/// grid in XZ, each vertex lifted by the sampled height.
pub fn build_heightmap_mesh(
    heightmap_image: &Image,
    size: f32,
    subdivisions: u32,
    min_height: f32,
    max_height: f32,
) -> Mesh {
    let cells = subdivisions.max(1);
    let verts_per_side = cells + 1;
    let step = size / cells as f32;
    let half = size / 2.0;

    let mut positions = Vec::with_capacity((verts_per_side * verts_per_side) as usize);
    let mut uvs = Vec::with_capacity(positions.capacity());
    for z in 0..verts_per_side {
        for x in 0..verts_per_side {
            let norm_x = x as f32 / cells as f32;
            let norm_z = z as f32 / cells as f32;
            let elevation =
                sample_heightmap_bilinear(heightmap_image, norm_x, norm_z, min_height, max_height);
            positions.push([
                -half + x as f32 * step,
                elevation,
                -half + z as f32 * step,
            ]);
            uvs.push([norm_x, norm_z]);
        }
    }

    let mut indices = Vec::with_capacity((cells * cells * 6) as usize);
    for z in 0..cells {
        for x in 0..cells {
            let i = z * verts_per_side + x;
            indices.extend_from_slice(&[
                i,
                i + verts_per_side,
                i + 1,
                i + 1,
                i + verts_per_side,
                i + verts_per_side + 1,
            ]);
        }
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh.compute_smooth_normals();
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

    fn gradient_image() -> Image {
        // 2x1: black on the left, white on the right
        Image::new(
            Extent3d {
                width: 2,
                height: 1,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            vec![0, 0, 0, 255, 255, 255, 255, 255],
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::default(),
        )
    }

    #[test]
    fn sampling_hits_configured_elevation_extremes() {
        let image = gradient_image();
        let low = sample_heightmap_bilinear(&image, 0.0, 0.0, 0.0, 10.0);
        let high = sample_heightmap_bilinear(&image, 1.0, 0.0, 0.0, 10.0);
        assert!(low.abs() < 1e-4);
        assert!((high - 10.0).abs() < 1e-4);
    }

    #[test]
    fn sampling_interpolates_between_texels() {
        let image = gradient_image();
        let mid = sample_heightmap_bilinear(&image, 0.5, 0.0, 0.0, 10.0);
        assert!(mid > 0.0 && mid < 10.0);
    }

    #[test]
    fn mesh_has_grid_resolution_vertices() {
        let image = gradient_image();
        let mesh = build_heightmap_mesh(&image, 100.0, 4, 0.0, 10.0);
        assert_eq!(mesh.count_vertices(), 25);
    }
}
