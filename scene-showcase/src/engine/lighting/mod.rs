pub mod shadow_rig;

use bevy::prelude::*;

use constants::render_settings::KEY_LIGHT_ILLUMINANCE;
use constants::scene::{KEY_LIGHT_DIRECTION, KEY_LIGHT_POSITION};

/// Spawn the directional key light. The caller binds the shadow rig to
/// the returned entity.
pub fn spawn_key_light(commands: &mut Commands) -> Entity {
    commands
        .spawn((
            DirectionalLight {
                illuminance: KEY_LIGHT_ILLUMINANCE,
                color: Color::WHITE,
                shadows_enabled: true,
                ..default()
            },
            Transform::from_translation(KEY_LIGHT_POSITION)
                .looking_to(KEY_LIGHT_DIRECTION.normalize(), Vec3::Y),
        ))
        .id()
}
