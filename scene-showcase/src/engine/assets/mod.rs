pub mod remote_texture;
pub mod storage;

use bevy::prelude::*;

use crate::engine::render::fresnel::FresnelMaterial;
use crate::engine::scene::skybox::SkyboxFaces;

/// Scene-scoped asset slots. Materials exist from construction time;
/// the texture handles inside them arrive later as resolutions drain.
#[derive(Resource, Default)]
pub struct SceneAssets {
    pub grass_texture: Option<Handle<Image>>,
    pub focal_material: Option<Handle<FresnelMaterial>>,
    pub clone_material: Option<Handle<FresnelMaterial>>,
    pub particle_material: Option<Handle<StandardMaterial>>,
    pub skybox: SkyboxFaces,
    pub heightmap: Option<Handle<Image>>,
}
