use bevy::math::Vec3;

/// Ground plane edge length in world units
pub const GROUND_SIZE: f32 = 100.0;

/// Ground rests slightly below the focal objects
pub const GROUND_HEIGHT: f32 = -2.0;

/// Focal icosphere radius
pub const FOCAL_RADIUS: f32 = 1.0;

/// Icosphere subdivision count
pub const FOCAL_SUBDIVISIONS: usize = 4;

/// Primary focal object position
pub const FOCAL_POSITION: Vec3 = Vec3::new(0.0, 2.0, 0.0);

/// Semi transparent clone position
pub const FOCAL_CLONE_POSITION: Vec3 = Vec3::new(3.0, 2.0, 0.0);

/// Key light world position
pub const KEY_LIGHT_POSITION: Vec3 = Vec3::new(20.0, 40.0, 20.0);

/// Key light aim direction
pub const KEY_LIGHT_DIRECTION: Vec3 = Vec3::new(-0.5, -1.0, -0.5);

/// Orbit camera initial azimuth
pub const CAMERA_ALPHA: f32 = 3.0 * std::f32::consts::PI / 2.0;

/// Orbit camera initial elevation
pub const CAMERA_BETA: f32 = std::f32::consts::PI / 8.0;

/// Orbit camera initial distance from target
pub const CAMERA_RADIUS: f32 = 18.0;

/// Elevation never exceeds the horizon-to-zenith quarter turn
pub const CAMERA_UPPER_BETA_LIMIT: f32 = std::f32::consts::PI / 2.0;

pub const CAMERA_LOWER_RADIUS_LIMIT: f32 = 10.0;
pub const CAMERA_UPPER_RADIUS_LIMIT: f32 = 50.0;

/// Autonomous azimuthal rotation, radians per 60Hz frame
pub const CAMERA_AUTO_ROTATE_SPEED: f32 = 0.001;

/// Fog defaults: exp mode with these parameters when enabled
pub const FOG_COLOR: [f32; 3] = [0.9, 0.9, 0.9];
pub const FOG_START: f32 = 20.0;
pub const FOG_END: f32 = 60.0;
pub const FOG_DENSITY: f32 = 0.02;
