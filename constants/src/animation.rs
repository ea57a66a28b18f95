/// Keyframe timeline frame rate for the focal object animation
pub const ANIMATION_FPS: f32 = 30.0;

/// One full wobble cycle spans two timeline seconds (0 -> FPS -> 2*FPS)
pub const WOBBLE_CYCLE_FRAMES: f32 = 2.0 * ANIMATION_FPS;
