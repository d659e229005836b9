use thiserror::Error;

/// Errors raised while reading the TOML configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Cabinet needs at least one category")]
    NoCategories,

    #[error("[{section}] damping must lie in (0, 1), got {value}")]
    Damping { section: &'static str, value: f32 },

    #[error("[{section}] target_size must be positive, got {value}")]
    TargetSize { section: &'static str, value: f32 },

    #[error("[camera] needs 0 < near < far, got near {near}, far {far}")]
    ClipPlanes { near: f32, far: f32 },

    #[error("[window] size must be non-zero, got {width}x{height}")]
    WindowSize { width: usize, height: usize },
}

/// Errors raised while decoding a model file into a scene graph.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Failed to load OBJ: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("Model '{0}' contains no geometry")]
    Empty(String),

    #[error("Loader thread for '{0}' went away")]
    Disconnected(String),
}

/// Errors raised by the presentation pages on invalid selections.
#[derive(Debug, Error, PartialEq)]
pub enum ShowcaseError {
    #[error("Cabinet needs at least one category")]
    EmptyCabinet,

    #[error("Category index {index} is out of range (have {count})")]
    UnknownCategory { index: usize, count: usize },

    #[error("Item slot {slot} is out of range")]
    UnknownItem { slot: usize },

    #[error("No perfume named '{0}'")]
    UnknownPerfume(String),
}

/// Errors that end a GUI or headless run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Showcase(#[from] ShowcaseError),

    #[error("Window error: {0}")]
    Window(#[from] minifb::Error),

    #[error("Failed to save image: {0}")]
    Image(#[from] image::ImageError),
}
