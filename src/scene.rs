pub mod asset_cache;
pub mod camera;
pub mod frame;
pub mod loader;
pub mod mesh;
pub mod node;
pub mod normalizer;
pub mod smoother;
