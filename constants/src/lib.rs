pub mod animation;
pub mod particles;
pub mod render_settings;
pub mod scene;
pub mod storage;
pub mod texture;
