use bevy::prelude::*;

/// Application lifecycle. Nothing renders until construction finishes:
/// the camera stays inactive through `Loading` and `Building`, and the
/// per-frame systems only run in `Running`.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Building,
    Running,
}

#[derive(Component)]
pub struct FpsText;

/// Final transition: scene graph is wired, let the loop render.
pub fn transition_to_running(mut next_state: ResMut<NextState<AppState>>) {
    println!("→ Scene constructed, transitioning to Running state");
    next_state.set(AppState::Running);
}

/// The render guard: the camera only becomes active once construction
/// is complete, so a half-built scene is never rasterized.
pub fn activate_camera(mut cameras: Query<&mut Camera, With<Camera3d>>) {
    for mut camera in &mut cameras {
        camera.is_active = true;
    }
}
