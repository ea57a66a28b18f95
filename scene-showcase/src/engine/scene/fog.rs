use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;

use constants::scene::{FOG_COLOR, FOG_DENSITY, FOG_END, FOG_START};

/// Scene-scoped fog state. Toggling off is a mode switch only: the
/// start/end/density parameters persist and are reapplied verbatim when
/// fog comes back on.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct FogConfig {
    pub enabled: bool,
    pub color: [f32; 3],
    pub start: f32,
    pub end: f32,
    pub density: f32,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            color: FOG_COLOR,
            start: FOG_START,
            end: FOG_END,
            density: FOG_DENSITY,
        }
    }
}

impl FogConfig {
    pub fn toggle(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn distance_fog(&self) -> DistanceFog {
        DistanceFog {
            color: Color::srgb(self.color[0], self.color[1], self.color[2]),
            falloff: FogFalloff::Exponential {
                density: self.density,
            },
            ..default()
        }
    }
}

/// UI request to switch the fog mode.
#[derive(Event)]
pub struct FogToggleEvent {
    pub enabled: bool,
}

pub fn apply_fog_toggles(mut events: EventReader<FogToggleEvent>, mut config: ResMut<FogConfig>) {
    for event in events.read() {
        config.toggle(event.enabled);
        info!("fog {}", if event.enabled { "on" } else { "off" });
    }
}

/// Mirror the fog config onto the camera whenever it changes.
pub fn sync_fog(
    mut commands: Commands,
    config: Res<FogConfig>,
    cameras: Query<Entity, With<Camera3d>>,
) {
    if !config.is_changed() {
        return;
    }
    for camera in &cameras {
        if config.enabled {
            commands.entity(camera).insert(config.distance_fog());
        } else {
            commands.entity(camera).remove::<DistanceFog>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_toggle_count_leaves_fog_enabled() {
        let mut config = FogConfig::default();
        for i in 0..5 {
            config.toggle(i % 2 == 0);
        }
        assert!(config.enabled);

        let mut config = FogConfig::default();
        for i in 0..4 {
            config.toggle(i % 2 == 0);
        }
        assert!(!config.enabled);
    }

    #[test]
    fn parameters_survive_an_off_on_cycle() {
        let mut config = FogConfig {
            enabled: true,
            start: 12.0,
            end: 48.0,
            density: 0.07,
            ..default()
        };
        let before = config.clone();
        config.toggle(false);
        config.toggle(true);
        assert_eq!(config, before);
    }
}
