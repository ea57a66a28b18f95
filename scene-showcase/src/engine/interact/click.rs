use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::engine::core::scene_context::SceneContext;
use crate::engine::interact::drag::ray_sphere_hit;
use crate::rpc::web_rpc::WebRpcInterface;

/// Clickable mesh with a spherical pick volume.
#[derive(Component)]
pub struct PickTarget {
    pub radius: f32,
}

fn pick_under_cursor(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&GlobalTransform, &Camera), With<Camera3d>>,
    targets: &Query<(Entity, &GlobalTransform, &PickTarget)>,
) -> Option<Entity> {
    let window = windows.single().ok()?;
    let cursor_pos = window.cursor_position()?;
    let (camera_transform, camera) = cameras.single().ok()?;
    let ray = camera.viewport_to_world(camera_transform, cursor_pos).ok()?;
    let direction: Vec3 = ray.direction.into();

    let mut best: Option<(Entity, f32)> = None;
    for (entity, transform, target) in targets.iter() {
        if let Some(t) = ray_sphere_hit(ray.origin, direction, transform.translation(), target.radius)
        {
            if best.map(|(_, bt)| t < bt).unwrap_or(true) {
                best = Some((entity, t));
            }
        }
    }
    best.map(|(entity, _)| entity)
}

/// Pick-up trigger: pressing on a target and releasing over the same
/// target counts one click. The counter lives in the scene context and
/// is pushed to the frontend on every change.
pub fn handle_pick_up_trigger(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<Camera3d>>,
    targets: Query<(Entity, &GlobalTransform, &PickTarget)>,
    mut context: ResMut<SceneContext>,
    mut rpc: ResMut<WebRpcInterface>,
    mut pressed_target: Local<Option<Entity>>,
) {
    if buttons.just_pressed(MouseButton::Left) {
        *pressed_target = pick_under_cursor(&windows, &cameras, &targets);
    } else if buttons.just_released(MouseButton::Left) {
        let released_over = pick_under_cursor(&windows, &cameras, &targets);
        if released_over.is_some() && released_over == *pressed_target {
            let count = context.register_click();
            rpc.send_notification("click_count", serde_json::json!({ "count": count }));
            info!("focal mesh picked up, click count {count}");
        }
        *pressed_target = None;
    }
}
