use crate::error::ConfigError;
use crate::showcase::perfume::Family;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub cabinet: CabinetConfig,
    #[serde(default)]
    pub perfume: PerfumeConfig,
}

#[derive(Debug, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_fps")]
    pub fps: usize,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_background_top")]
    pub background_top: [f32; 3],
    #[serde(default = "default_background_bottom")]
    pub background_bottom: [f32; 3],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            fps: default_fps(),
            output: default_output(),
            background_top: default_background_top(),
            background_bottom: default_background_bottom(),
        }
    }
}

fn default_width() -> usize {
    1280
}
fn default_height() -> usize {
    720
}
fn default_fps() -> usize {
    60
}
fn default_output() -> String {
    "showcase.png".to_string()
}
fn default_background_top() -> [f32; 3] {
    [0.94, 0.94, 0.94]
}
fn default_background_bottom() -> [f32; 3] {
    [0.80, 0.80, 0.82]
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],
    #[serde(default)]
    pub target: [f32; 3],
    #[serde(default = "default_up")]
    pub up: [f32; 3],
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            target: [0.0, 0.0, 0.0],
            up: default_up(),
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
        }
    }
}

fn default_camera_position() -> [f32; 3] {
    [0.0, 0.0, 8.0]
}
fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}
fn default_fov() -> f32 {
    45.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    100.0
}

#[derive(Debug, Deserialize)]
pub struct CabinetConfig {
    #[serde(default = "default_cabinet_target_size")]
    pub target_size: f32,
    #[serde(default = "default_damping")]
    pub damping: f32,
    #[serde(default = "default_face_offset")]
    pub face_offset: f32,
    #[serde(default = "default_grid_spacing")]
    pub grid_spacing: f32,
    #[serde(default = "default_panel_size")]
    pub panel_size: f32,
    #[serde(default = "default_placeholder_size")]
    pub placeholder_size: f32,
    #[serde(default = "default_hover_scale")]
    pub hover_scale: f32,
    /// Idle bob of every item: phase speed, wobble strength, bob strength.
    #[serde(default = "default_float_speed")]
    pub float_speed: f32,
    #[serde(default = "default_float_intensity")]
    pub float_rotation_intensity: f32,
    #[serde(default = "default_float_intensity")]
    pub float_intensity: f32,
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryConfig>,
}

impl Default for CabinetConfig {
    fn default() -> Self {
        Self {
            target_size: default_cabinet_target_size(),
            damping: default_damping(),
            face_offset: default_face_offset(),
            grid_spacing: default_grid_spacing(),
            panel_size: default_panel_size(),
            placeholder_size: default_placeholder_size(),
            hover_scale: default_hover_scale(),
            float_speed: default_float_speed(),
            float_rotation_intensity: default_float_intensity(),
            float_intensity: default_float_intensity(),
            categories: default_categories(),
        }
    }
}

fn default_cabinet_target_size() -> f32 {
    1.0
}
fn default_damping() -> f32 {
    0.1
}
fn default_face_offset() -> f32 {
    2.0
}
fn default_grid_spacing() -> f32 {
    1.2
}
fn default_panel_size() -> f32 {
    4.0
}
fn default_placeholder_size() -> f32 {
    0.8
}
fn default_hover_scale() -> f32 {
    1.1
}
fn default_float_speed() -> f32 {
    2.0
}
fn default_float_intensity() -> f32 {
    0.5
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryConfig {
    pub key: String,
    pub color: String,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemConfig {
    pub label: String,
    #[serde(default)]
    pub model_path: Option<String>,
}

fn placeholder_items(prefix: &str, first: usize) -> impl Iterator<Item = ItemConfig> + '_ {
    (first..=9).map(move |i| ItemConfig {
        label: format!("{} {}", prefix, i),
        model_path: None,
    })
}

fn default_categories() -> Vec<CategoryConfig> {
    let category = |key: &str, color: &str, items: Vec<ItemConfig>| CategoryConfig {
        key: key.to_string(),
        color: color.to_string(),
        items,
    };

    let mut characters = vec![ItemConfig {
        label: "Cinnamoroll".to_string(),
        model_path: Some("assets/models/cinna.obj".to_string()),
    }];
    characters.extend(placeholder_items("Char", 2));

    vec![
        category("HOME", "#ff6b6b", placeholder_items("Home", 1).collect()),
        category("CHARACTERS", "#4ecdc4", characters),
        category("FLOWERS", "#ffe66d", placeholder_items("Flower", 1).collect()),
        category("ITEMS", "#1a535c", placeholder_items("Item", 1).collect()),
    ]
}

#[derive(Debug, Deserialize)]
pub struct PerfumeConfig {
    #[serde(default = "default_perfume_target_size")]
    pub target_size: f32,
    #[serde(default = "default_damping")]
    pub damping: f32,
    #[serde(default = "default_perfumes")]
    pub perfumes: Vec<PerfumeEntryConfig>,
}

impl Default for PerfumeConfig {
    fn default() -> Self {
        Self {
            target_size: default_perfume_target_size(),
            damping: default_damping(),
            perfumes: default_perfumes(),
        }
    }
}

fn default_perfume_target_size() -> f32 {
    3.2
}

#[derive(Debug, Clone, Deserialize)]
pub struct PerfumeEntryConfig {
    pub name: String,
    pub brand: String,
    pub family: Family,
    #[serde(default)]
    pub price: f32,
    #[serde(default)]
    pub model_path: Option<String>,
}

fn default_perfumes() -> Vec<PerfumeEntryConfig> {
    let entry = |name: &str, brand: &str, family: Family, price: f32| PerfumeEntryConfig {
        name: name.to_string(),
        brand: brand.to_string(),
        family,
        price,
        model_path: None,
    };
    vec![
        entry("Rose Nocturne", "Maison Aube", Family::Floral, 128.0),
        entry("Cedar Hollow", "Northwood", Family::Woody, 96.0),
        entry("Sea Salt Mist", "Littoral", Family::Fresh, 74.0),
        entry("Amber Veil", "Maison Aube", Family::Oriental, 142.0),
        entry("Jasmine Hour", "Petale", Family::Floral, 88.0),
        entry("Vetiver Noir", "Northwood", Family::Woody, 110.0),
    ]
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the turntables and the normalizer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let WindowConfig { width, height, .. } = self.window;
        if width == 0 || height == 0 {
            return Err(ConfigError::WindowSize { width, height });
        }
        let CameraConfig { near, far, .. } = self.camera;
        if !(near > 0.0 && near < far) {
            return Err(ConfigError::ClipPlanes { near, far });
        }
        if self.cabinet.categories.is_empty() {
            return Err(ConfigError::NoCategories);
        }
        check_turntable("cabinet", self.cabinet.damping, self.cabinet.target_size)?;
        check_turntable("perfume", self.perfume.damping, self.perfume.target_size)
    }
}

fn check_turntable(
    section: &'static str,
    damping: f32,
    target_size: f32,
) -> Result<(), ConfigError> {
    if !(damping > 0.0 && damping < 1.0) {
        return Err(ConfigError::Damping {
            section,
            value: damping,
        });
    }
    if !(target_size > 0.0 && target_size.is_finite()) {
        return Err(ConfigError::TargetSize {
            section,
            value: target_size,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_builtin_catalog() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.cabinet.categories.len(), 4);
        assert_eq!(config.cabinet.categories[1].items[0].label, "Cinnamoroll");
        assert!(config.cabinet.categories[1].items[0].model_path.is_some());
        assert!(
            config
                .cabinet
                .categories
                .iter()
                .all(|c| c.items.len() == 9)
        );
        assert_eq!(config.perfume.target_size, 3.2);
        assert_eq!(config.cabinet.damping, 0.1);
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config = Config::from_toml_str(
            r##"
            [window]
            width = 640

            [cabinet]
            damping = 0.2

            [[cabinet.categories]]
            key = "SHOES"
            color = "#000000"
            items = [{ label = "Boot", model_path = "boot.obj" }]

            [[perfume.perfumes]]
            name = "Test"
            brand = "Lab"
            family = "fresh"
            "##,
        )
        .unwrap();

        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.cabinet.damping, 0.2);
        assert_eq!(config.cabinet.grid_spacing, 1.2);
        assert_eq!(config.cabinet.categories.len(), 1);
        assert_eq!(config.perfume.perfumes[0].family, Family::Fresh);
        assert_eq!(config.perfume.target_size, 3.2);
    }

    #[test]
    fn empty_category_list_is_rejected() {
        let err = Config::from_toml_str("[cabinet]\ncategories = []\n").unwrap_err();
        assert!(matches!(err, ConfigError::NoCategories));
    }

    #[test]
    fn diverging_damping_is_rejected() {
        let err = Config::from_toml_str("[cabinet]\ndamping = 2.5\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Damping {
                section: "cabinet",
                ..
            }
        ));
        let err = Config::from_toml_str("[perfume]\ndamping = 0.0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Damping {
                section: "perfume",
                ..
            }
        ));
    }

    #[test]
    fn non_positive_target_size_is_rejected() {
        let err = Config::from_toml_str("[cabinet]\ntarget_size = -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::TargetSize { value, .. } if value == -1.0));
        let err = Config::from_toml_str("[perfume]\ntarget_size = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::TargetSize { .. }));
    }

    #[test]
    fn camera_and_window_limits() {
        let err = Config::from_toml_str("[camera]\nnear = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ClipPlanes { .. }));
        let err = Config::from_toml_str("[camera]\nnear = 5.0\nfar = 1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ClipPlanes { .. }));
        let err = Config::from_toml_str("[window]\nheight = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::WindowSize { width: 1280, height: 0 }));
    }

    #[test]
    fn defaults_pass_validation() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let err = Config::from_toml_str("[window\nwidth = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
