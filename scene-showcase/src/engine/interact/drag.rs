use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Axis-constrained pointer drag: while grabbed, the node follows the
/// cursor ray's closest approach along its drag axis and moves on that
/// axis only.
#[derive(Component)]
pub struct AxisDrag {
    pub axis: Vec3,
    pub radius: f32,
    grab: Option<DragGrab>,
}

struct DragGrab {
    param: f32,
    origin: Vec3,
}

impl AxisDrag {
    pub fn along(axis: Vec3, radius: f32) -> Self {
        Self {
            axis: axis.normalize_or_zero(),
            radius,
            grab: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }
}

/// Smallest positive ray parameter hitting the sphere, if any.
/// Direction must be normalised.
pub fn ray_sphere_hit(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(direction);
    let disc = b * b - (oc.length_squared() - radius * radius);
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    let near = -b - sqrt_disc;
    let far = -b + sqrt_disc;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        Some(far)
    } else {
        None
    }
}

/// Parameter along the axis line closest to the given ray, or None when
/// ray and axis are parallel.
pub fn ray_axis_parameter(
    ray_origin: Vec3,
    ray_direction: Vec3,
    axis_origin: Vec3,
    axis_direction: Vec3,
) -> Option<f32> {
    let w0 = axis_origin - ray_origin;
    let a = axis_direction.dot(axis_direction);
    let b = axis_direction.dot(ray_direction);
    let c = ray_direction.dot(ray_direction);
    let d = axis_direction.dot(w0);
    let e = ray_direction.dot(w0);

    let denom = a * c - b * b;
    if denom.abs() < 1e-6 {
        return None;
    }
    Some((b * e - c * d) / denom)
}

pub fn drag_interactive_objects(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<Camera3d>>,
    mut draggables: Query<(&mut Transform, &mut AxisDrag)>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok((camera_transform, camera)) = cameras.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_pos) else {
        return;
    };
    let ray_direction: Vec3 = ray.direction.into();

    if buttons.just_pressed(MouseButton::Left) {
        for (transform, mut drag) in &mut draggables {
            let hit = ray_sphere_hit(ray.origin, ray_direction, transform.translation, drag.radius);
            if hit.is_some() {
                let origin = transform.translation;
                if let Some(param) =
                    ray_axis_parameter(ray.origin, ray_direction, origin, drag.axis)
                {
                    drag.grab = Some(DragGrab { param, origin });
                }
            }
        }
    } else if buttons.pressed(MouseButton::Left) {
        for (mut transform, drag) in &mut draggables {
            let Some(grab) = drag.grab.as_ref() else {
                continue;
            };
            if let Some(param) =
                ray_axis_parameter(ray.origin, ray_direction, grab.origin, drag.axis)
            {
                transform.translation = grab.origin + drag.axis * (param - grab.param);
            }
        }
    } else if buttons.just_released(MouseButton::Left) {
        for (_, mut drag) in &mut draggables {
            drag.grab = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_hits_sphere_straight_ahead() {
        let t = ray_sphere_hit(Vec3::new(0.0, 0.0, -10.0), Vec3::Z, Vec3::ZERO, 1.0);
        assert!((t.unwrap() - 9.0).abs() < 1e-4);
    }

    #[test]
    fn ray_misses_offset_sphere() {
        let t = ray_sphere_hit(Vec3::new(5.0, 0.0, -10.0), Vec3::Z, Vec3::ZERO, 1.0);
        assert!(t.is_none());
    }

    #[test]
    fn axis_parameter_tracks_ray_height() {
        // vertical axis through the origin, ray looking down +Z at y = 5
        let param = ray_axis_parameter(
            Vec3::new(0.0, 5.0, -10.0),
            Vec3::Z,
            Vec3::ZERO,
            Vec3::Y,
        );
        assert!((param.unwrap() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn parallel_ray_and_axis_have_no_parameter() {
        let param = ray_axis_parameter(Vec3::new(1.0, 0.0, 0.0), Vec3::Y, Vec3::ZERO, Vec3::Y);
        assert!(param.is_none());
    }

    #[test]
    fn drag_moves_only_along_the_axis() {
        // grab at param 5, cursor ray rises to param 7: node moves +2 in Y
        let axis = Vec3::Y;
        let origin = Vec3::new(0.0, 5.0, 0.0);
        let grab_param =
            ray_axis_parameter(Vec3::new(0.0, 5.0, -10.0), Vec3::Z, origin, axis).unwrap();
        let new_param =
            ray_axis_parameter(Vec3::new(0.0, 7.0, -10.0), Vec3::Z, origin, axis).unwrap();
        let moved = origin + axis * (new_param - grab_param);
        assert!((moved - Vec3::new(0.0, 7.0, 0.0)).length() < 1e-4);
    }
}
