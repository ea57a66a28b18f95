use bevy::pbr::{ExtendedMaterial, MaterialExtension};
use bevy::prelude::*;
use bevy::render::render_resource::{AsBindGroup, ShaderRef, ShaderType};

/// View-angle dependent two-colour reflection blend: `left_color` at
/// grazing incidence, `right_color` facing the viewer, shaped by bias
/// and power.
#[derive(Debug, Clone, Copy, ShaderType)]
pub struct FresnelParams {
    pub left_color: Vec4,
    pub right_color: Vec4,
    pub bias: f32,
    pub power: f32,
}

impl Default for FresnelParams {
    fn default() -> Self {
        Self {
            // magenta to yellow
            left_color: Vec4::new(1.0, 0.0, 1.0, 1.0),
            right_color: Vec4::new(1.0, 1.0, 0.0, 1.0),
            bias: 0.1,
            power: 2.0,
        }
    }
}

#[derive(Asset, AsBindGroup, TypePath, Debug, Clone)]
pub struct FresnelExtension {
    #[uniform(100)]
    pub params: FresnelParams,
}

impl MaterialExtension for FresnelExtension {
    fn fragment_shader() -> ShaderRef {
        "shaders/fresnel_extension.wgsl".into()
    }
}

pub type FresnelMaterial = ExtendedMaterial<StandardMaterial, FresnelExtension>;

/// Wrap a standard material with the reflection blend extension.
pub fn fresnel_material(base: StandardMaterial, params: FresnelParams) -> FresnelMaterial {
    ExtendedMaterial {
        base,
        extension: FresnelExtension { params },
    }
}
