use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use constants::scene::{
    CAMERA_ALPHA, CAMERA_AUTO_ROTATE_SPEED, CAMERA_BETA, CAMERA_LOWER_RADIUS_LIMIT, CAMERA_RADIUS,
    CAMERA_UPPER_BETA_LIMIT, CAMERA_UPPER_RADIUS_LIMIT,
};

use crate::engine::interact::drag::AxisDrag;

/// Orbit viewpoint: azimuth/elevation/distance around a target point,
/// with clamped elevation and zoom range.
#[derive(Resource)]
pub struct OrbitCamera {
    pub alpha: f32,
    pub beta: f32,
    pub radius: f32,
    pub target: Vec3,
    pub upper_beta_limit: f32,
    pub lower_radius_limit: f32,
    pub upper_radius_limit: f32,
    pub auto_rotate: bool,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            alpha: CAMERA_ALPHA,
            beta: CAMERA_BETA,
            radius: CAMERA_RADIUS,
            target: Vec3::ZERO,
            upper_beta_limit: CAMERA_UPPER_BETA_LIMIT,
            lower_radius_limit: CAMERA_LOWER_RADIUS_LIMIT,
            upper_radius_limit: CAMERA_UPPER_RADIUS_LIMIT,
            auto_rotate: true,
        }
    }
}

impl OrbitCamera {
    pub fn clamp_limits(&mut self) {
        self.beta = self.beta.clamp(0.02, self.upper_beta_limit);
        self.radius = self
            .radius
            .clamp(self.lower_radius_limit, self.upper_radius_limit);
    }

    pub fn position(&self) -> Vec3 {
        self.target
            + Vec3::new(
                self.radius * self.beta.cos() * self.alpha.cos(),
                self.radius * self.beta.sin(),
                self.radius * self.beta.cos() * self.alpha.sin(),
            )
    }
}

/// Mouse orbit and wheel zoom. Skipped while an object drag is active
/// so the two left-button gestures never fight.
pub fn orbit_camera_controller(
    mut orbit: ResMut<OrbitCamera>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    draggables: Query<&AxisDrag>,
) {
    let dragging_object = draggables.iter().any(|d| d.is_dragging());

    if buttons.pressed(MouseButton::Left) && !dragging_object {
        for event in motion.read() {
            orbit.alpha += event.delta.x * 0.005;
            orbit.beta += event.delta.y * 0.005;
        }
    } else {
        motion.clear();
    }

    for event in wheel.read() {
        let step = match event.unit {
            MouseScrollUnit::Line => event.y * 2.0,
            MouseScrollUnit::Pixel => event.y * 0.02,
        };
        orbit.radius -= step;
    }

    orbit.clamp_limits();
}

/// Slow autonomous azimuthal rotation, scaled by the frame-time ratio
/// so the speed is frame-rate independent.
pub fn auto_rotate_camera(mut orbit: ResMut<OrbitCamera>, time: Res<Time>) {
    if !orbit.auto_rotate {
        return;
    }
    let frame_ratio = time.delta_secs() * 60.0;
    orbit.alpha += CAMERA_AUTO_ROTATE_SPEED * frame_ratio;
}

/// Write the orbit state into the camera transform.
pub fn sync_orbit_camera(
    orbit: Res<OrbitCamera>,
    mut cameras: Query<&mut Transform, With<Camera3d>>,
) {
    for mut transform in &mut cameras {
        *transform = Transform::from_translation(orbit.position()).looking_at(orbit.target, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_clamp_elevation_and_zoom() {
        let mut orbit = OrbitCamera::default();
        orbit.beta = 3.0;
        orbit.radius = 500.0;
        orbit.clamp_limits();
        assert!(orbit.beta <= orbit.upper_beta_limit);
        assert!(orbit.radius <= orbit.upper_radius_limit);

        orbit.radius = 1.0;
        orbit.clamp_limits();
        assert!(orbit.radius >= orbit.lower_radius_limit);
    }

    #[test]
    fn position_sits_at_configured_distance_from_target() {
        let orbit = OrbitCamera::default();
        let distance = (orbit.position() - orbit.target).length();
        assert!((distance - orbit.radius).abs() < 1e-3);
    }
}
