use bevy::prelude::*;

#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub manifest_loaded: bool,
}
