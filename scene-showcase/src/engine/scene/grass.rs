use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use constants::texture::{GRASS_NOISE_OCTAVES, GRASS_TEXTURE_SIZE};

/// Deterministic lattice hash, the usual integer scramble.
fn hash_noise(x: u32, y: u32, seed: u32) -> f32 {
    let mut h = x
        .wrapping_mul(374_761_393)
        .wrapping_add(y.wrapping_mul(668_265_263))
        .wrapping_add(seed.wrapping_mul(2_246_822_519));
    h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
    h ^= h >> 16;
    (h & 0x00FF_FFFF) as f32 / 16_777_215.0
}

fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Value noise at a continuous lattice coordinate, wrapping so the
/// resulting texture tiles.
fn value_noise(x: f32, y: f32, period: u32, seed: u32) -> f32 {
    let xi = x.floor() as u32 % period;
    let yi = y.floor() as u32 % period;
    let xf = x.fract();
    let yf = y.fract();

    let x1 = (xi + 1) % period;
    let y1 = (yi + 1) % period;

    let c00 = hash_noise(xi, yi, seed);
    let c10 = hash_noise(x1, yi, seed);
    let c01 = hash_noise(xi, y1, seed);
    let c11 = hash_noise(x1, y1, seed);

    let u = smoothstep(xf);
    let v = smoothstep(yf);
    let top = c00 + (c10 - c00) * u;
    let bottom = c01 + (c11 - c01) * u;
    top + (bottom - top) * v
}

/// Fractal value noise in [0, 1].
fn fbm(x: f32, y: f32, octaves: u32, seed: u32) -> f32 {
    let mut amplitude = 0.5;
    let mut frequency = 1.0;
    let mut total = 0.0;
    let mut norm = 0.0;
    for octave in 0..octaves {
        let period = (8u32 << octave).max(1);
        total += amplitude
            * value_noise(
                x * frequency,
                y * frequency,
                period,
                seed.wrapping_add(octave),
            );
        norm += amplitude;
        amplitude *= 0.5;
        frequency *= 2.0;
    }
    total / norm
}

/// Generate the grass-like ambient texture on the CPU: layered green
/// value noise with darker blade flecks. Fully deterministic, no file
/// is fetched for this one.
pub fn grass_texture(size: usize) -> Image {
    let mut data = Vec::with_capacity(size * size * 4);
    let scale = 8.0 / size as f32;
    for y in 0..size {
        for x in 0..size {
            let fx = x as f32 * scale;
            let fy = y as f32 * scale;
            let base = fbm(fx, fy, GRASS_NOISE_OCTAVES, 7);
            let fleck = hash_noise(x as u32, y as u32, 31);

            let mut green = 0.35 + 0.40 * base;
            let mut red = 0.10 + 0.15 * base;
            let blue = 0.05 + 0.08 * base;
            // sparse dark blades
            if fleck > 0.92 {
                green *= 0.6;
                red *= 0.6;
            }

            data.push((red * 255.0) as u8);
            data.push((green * 255.0) as u8);
            data.push((blue * 255.0) as u8);
            data.push(255);
        }
    }

    Image::new(
        Extent3d {
            width: size as u32,
            height: size as u32,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    )
}

pub fn default_grass_texture() -> Image {
    grass_texture(GRASS_TEXTURE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_has_requested_dimensions() {
        let image = grass_texture(32);
        assert_eq!(image.width(), 32);
        assert_eq!(image.height(), 32);
        assert_eq!(image.data.as_ref().unwrap().len(), 32 * 32 * 4);
    }

    #[test]
    fn generation_is_deterministic() {
        let a = grass_texture(16);
        let b = grass_texture(16);
        assert_eq!(a.data, b.data);
    }

    #[test]
    fn green_channel_dominates() {
        let image = grass_texture(16);
        let data = image.data.as_ref().unwrap();
        let mut red_total = 0u64;
        let mut green_total = 0u64;
        for pixel in data.chunks_exact(4) {
            red_total += pixel[0] as u64;
            green_total += pixel[1] as u64;
        }
        assert!(green_total > red_total);
    }

    #[test]
    fn noise_stays_in_unit_range() {
        for y in 0..64 {
            for x in 0..64 {
                let n = fbm(x as f32 * 0.37, y as f32 * 0.37, 4, 7);
                assert!((0.0..=1.0).contains(&n));
            }
        }
    }
}
