pub mod fog;
pub mod grass;
pub mod ground;
pub mod heightmap;
pub mod skybox;
pub mod static_hint;
