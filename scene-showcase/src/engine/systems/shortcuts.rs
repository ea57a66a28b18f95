use bevy::prelude::*;

use crate::engine::particles::ParticleToggleEvent;
use crate::engine::scene::fog::{FogConfig, FogToggleEvent};

/// Native keyboard equivalents of the frontend toggles: F for fog,
/// P for particles.
pub fn handle_toggle_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    fog_config: Res<FogConfig>,
    mut fog_events: EventWriter<FogToggleEvent>,
    mut particle_events: EventWriter<ParticleToggleEvent>,
    mut particles_on: Local<Option<bool>>,
) {
    if keyboard.just_pressed(KeyCode::KeyF) {
        fog_events.write(FogToggleEvent {
            enabled: !fog_config.enabled,
        });
    }
    if keyboard.just_pressed(KeyCode::KeyP) {
        let next = !particles_on.unwrap_or(true);
        *particles_on = Some(next);
        particle_events.write(ParticleToggleEvent { enabled: next });
    }
}
