/// Edge length of the procedurally generated grass ambient texture
pub const GRASS_TEXTURE_SIZE: usize = 512;

/// Octave count for the grass value noise
pub const GRASS_NOISE_OCTAVES: u32 = 4;
