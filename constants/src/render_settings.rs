/// Shadow map texel size used by the high quality variant
pub const SHADOW_MAP_SIZE_HIGH: u32 = 1024;

/// Shadow map texel size used by the performance variant
pub const SHADOW_MAP_SIZE_LOW: u32 = 256;

/// Key light lux, the engine equivalent of the original 0.7 intensity
pub const KEY_LIGHT_ILLUMINANCE: f32 = 7_000.0;

/// Scene clear colour (mid grey, opaque)
pub const CLEAR_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 1.0];

/// How often the FPS readout is pushed to the frontend, in seconds
pub const FPS_NOTIFY_INTERVAL: f32 = 0.5;

/// Skybox cubemap brightness in the engine's physical units
pub const SKYBOX_BRIGHTNESS: f32 = 1_000.0;
