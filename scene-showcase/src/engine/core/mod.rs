pub mod app_setup;
pub mod app_state;
pub mod scene_context;
pub mod window_config;
