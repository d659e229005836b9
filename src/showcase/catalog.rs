use crate::core::color::parse_hex;
use crate::io::config::{CategoryConfig, ItemConfig};
use log::warn;
use nalgebra::Vector3;

/// Slots per shelf face (3x3 grid).
pub const SLOTS_PER_FACE: usize = 9;

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub label: String,
    /// `None` shows a placeholder box in the category color.
    pub model_path: Option<String>,
}

impl From<&ItemConfig> for CatalogItem {
    fn from(item: &ItemConfig) -> Self {
        Self {
            label: item.label.clone(),
            model_path: item.model_path.clone(),
        }
    }
}

/// One shelf face worth of products.
#[derive(Debug, Clone)]
pub struct Category {
    pub key: String,
    pub color: Vector3<f32>,
    pub items: Vec<CatalogItem>,
}

impl Category {
    pub fn from_config(config: &CategoryConfig) -> Self {
        let color = parse_hex(&config.color).unwrap_or_else(|| {
            warn!(
                "Category '{}' has invalid color '{}'. Using grey.",
                config.key, config.color
            );
            Vector3::new(0.5, 0.5, 0.5)
        });

        if config.items.len() > SLOTS_PER_FACE {
            warn!(
                "Category '{}' has {} items; only the first {} fit on a face.",
                config.key,
                config.items.len(),
                SLOTS_PER_FACE
            );
        }

        Self {
            key: config.key.clone(),
            color,
            items: config
                .items
                .iter()
                .take(SLOTS_PER_FACE)
                .map(CatalogItem::from)
                .collect(),
        }
    }

    pub fn model_paths(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|i| i.model_path.as_deref())
    }
}
