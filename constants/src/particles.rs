use bevy::math::Vec3;

/// Upper bound on simultaneously live particles for the manual emitter
pub const PARTICLE_CAPACITY: usize = 2000;

/// Particles emitted per simulation second
pub const EMIT_RATE: f32 = 1000.0;

/// Emission direction corner pair for the point emitter
pub const EMIT_DIRECTION_1: Vec3 = Vec3::new(-7.0, 8.0, 3.0);
pub const EMIT_DIRECTION_2: Vec3 = Vec3::new(7.0, 8.0, -3.0);

/// Per particle size range
pub const MIN_SIZE: f32 = 0.1;
pub const MAX_SIZE: f32 = 0.5;

/// Per particle lifetime range, in simulation seconds
pub const MIN_LIFETIME: f32 = 0.3;
pub const MAX_LIFETIME: f32 = 1.5;

/// Per particle emit power range
pub const MIN_EMIT_POWER: f32 = 1.0;
pub const MAX_EMIT_POWER: f32 = 3.0;

/// Simulation step applied per 60Hz frame
pub const UPDATE_SPEED: f32 = 0.005;

/// Colour gradient: fresh particles blend between these two
pub const COLOR_1: [f32; 4] = [0.7, 0.8, 1.0, 1.0];
pub const COLOR_2: [f32; 4] = [0.2, 0.5, 1.0, 1.0];

/// Colour faded to at end of life
pub const COLOR_DEAD: [f32; 4] = [0.0, 0.0, 0.2, 0.0];

/// Manual emitter anchor position
pub const EMITTER_ANCHOR_POSITION: Vec3 = Vec3::new(5.0, 0.0, 0.0);
