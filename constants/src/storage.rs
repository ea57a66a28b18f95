/// Object storage bucket root. Object metadata lives at
/// `{root}/{url-encoded object path}` and resolves to a tokenised
/// download URL, mirroring the hosted bucket layout.
pub const STORAGE_BUCKET_ROOT: &str =
    "https://firebasestorage.googleapis.com/v0/b/scene-showcase-assets.appspot.com/o";

/// Reflection texture bound to the focal material once resolved
pub const FOCAL_REFLECTION_OBJECT: &str = "paper_rough_texture.jpg";

/// Sprite applied to every particle once resolved
pub const PARTICLE_SPRITE_OBJECT: &str = "particle.jpeg";

/// Six skybox face objects, ordered px, py, pz, nx, ny, nz
pub const SKYBOX_FACE_OBJECTS: [&str; 6] = [
    "skybox/skybox_px.jpg",
    "skybox/skybox_py.jpg",
    "skybox/skybox_pz.jpg",
    "skybox/skybox_nx.jpg",
    "skybox/skybox_ny.jpg",
    "skybox/skybox_nz.jpg",
];
