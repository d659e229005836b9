use crate::core::color::to_u32;
use crate::core::math::transform::TransformFactory;
use crate::error::ShowcaseError;
use crate::io::config::CabinetConfig;
use crate::pipeline::renderer::DrawItem;
use crate::scene::asset_cache::NormalizedAssetCache;
use crate::scene::frame::FrameTick;
use crate::scene::loader::AssetSource;
use crate::scene::mesh::Mesh;
use crate::scene::node::Transform;
use crate::scene::normalizer::NormalizedAsset;
use crate::scene::smoother::RotationSmoother;
use crate::showcase::catalog::{CatalogItem, Category, SLOTS_PER_FACE};
use log::{debug, info};
use nalgebra::{Matrix4, Vector3};
use std::f32::consts::TAU;
use std::sync::Arc;

const PANEL_COLOR: u32 = 0xffa8_b4c0;

/// Geometry constants of the cabinet.
#[derive(Debug, Clone, Copy)]
pub struct CabinetLayout {
    /// Distance from the turntable axis to each face.
    pub face_offset: f32,
    pub grid_spacing: f32,
    pub panel_size: f32,
    pub placeholder_size: f32,
    pub hover_scale: f32,
    pub idle: IdleFloat,
}

impl From<&CabinetConfig> for CabinetLayout {
    fn from(config: &CabinetConfig) -> Self {
        Self {
            face_offset: config.face_offset,
            grid_spacing: config.grid_spacing,
            panel_size: config.panel_size,
            placeholder_size: config.placeholder_size,
            hover_scale: config.hover_scale,
            idle: IdleFloat {
                speed: config.float_speed,
                rotation_intensity: config.float_rotation_intensity,
                float_intensity: config.float_intensity,
            },
        }
    }
}

/// Slow bob and wobble applied to every item on the shelves.
#[derive(Debug, Clone, Copy)]
pub struct IdleFloat {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
}

impl IdleFloat {
    /// Local offset at `elapsed` seconds. `phase` keeps neighbours out of step.
    pub fn transform(&self, elapsed: f32, phase: f32) -> Transform {
        let (s, c) = ((phase + elapsed) / 4.0 * self.speed).sin_cos();
        Transform {
            position: Vector3::new(0.0, s / 10.0 * self.float_intensity, 0.0),
            rotation: Vector3::new(c / 8.0, s / 8.0, s / 20.0) * self.rotation_intensity,
            ..Default::default()
        }
    }
}

/// Seconds of phase between consecutive slots.
const SLOT_PHASE: f32 = 1.7;

impl CabinetLayout {
    /// 3x3 slot offsets inside a face, column-major: x outer, y inner.
    pub fn grid_slots(&self) -> [Vector3<f32>; SLOTS_PER_FACE] {
        let mut slots = [Vector3::zeros(); SLOTS_PER_FACE];
        let mut i = 0;
        for x in -1..=1 {
            for y in -1..=1 {
                slots[i] = Vector3::new(x as f32, y as f32, 0.0) * self.grid_spacing;
                i += 1;
            }
        }
        slots
    }
}

/// A turntable of shelf faces, one per category.
///
/// Selecting a category turns the whole cabinet so that face looks at the
/// camera; the turn is eased by a `RotationSmoother` on every frame tick.
pub struct Cabinet {
    categories: Vec<Category>,
    layout: CabinetLayout,
    active: usize,
    hovered: Option<usize>,
    smoother: RotationSmoother,
    assets: NormalizedAssetCache,
    placeholder: Arc<Mesh>,
    panel: Arc<Mesh>,
    elapsed: f32,
}

impl Cabinet {
    pub fn new(
        categories: Vec<Category>,
        layout: CabinetLayout,
        target_size: f32,
        damping: f32,
    ) -> Result<Self, ShowcaseError> {
        if categories.is_empty() {
            return Err(ShowcaseError::EmptyCabinet);
        }
        Ok(Self {
            categories,
            layout,
            active: 0,
            hovered: None,
            smoother: RotationSmoother::new(damping),
            assets: NormalizedAssetCache::new(target_size),
            placeholder: Arc::new(Mesh::create_box(
                layout.placeholder_size,
                layout.placeholder_size,
                layout.placeholder_size,
            )),
            panel: Arc::new(Mesh::create_plane(layout.panel_size, layout.panel_size)),
            elapsed: 0.0,
        })
    }

    pub fn from_config(config: &CabinetConfig) -> Result<Self, ShowcaseError> {
        let categories = config.categories.iter().map(Category::from_config).collect();
        Self::new(
            categories,
            CabinetLayout::from(config),
            config.target_size,
            config.damping,
        )
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn face_count(&self) -> usize {
        self.categories.len()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_category(&self) -> &Category {
        &self.categories[self.active]
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn current_angle(&self) -> f32 {
        self.smoother.current_angle()
    }

    fn face_step(&self) -> f32 {
        TAU / self.face_count() as f32
    }

    /// Cabinet angle that brings face `index` to the front.
    pub fn angle_for(&self, index: usize) -> f32 {
        index as f32 * -self.face_step()
    }

    pub fn target_angle(&self) -> f32 {
        self.angle_for(self.active)
    }

    pub fn select(&mut self, index: usize) -> Result<(), ShowcaseError> {
        if index >= self.face_count() {
            return Err(ShowcaseError::UnknownCategory {
                index,
                count: self.face_count(),
            });
        }
        if index != self.active {
            self.active = index;
            self.hovered = None;
            info!("Category: {}", self.categories[index].key);
        }
        Ok(())
    }

    pub fn select_next(&mut self) {
        let next = (self.active + 1) % self.face_count();
        self.select(next).ok();
    }

    pub fn select_previous(&mut self) {
        let prev = (self.active + self.face_count() - 1) % self.face_count();
        self.select(prev).ok();
    }

    /// Hover a slot on the active face, or clear hover with `None`.
    pub fn hover(&mut self, slot: Option<usize>) -> Result<(), ShowcaseError> {
        if let Some(slot) = slot
            && slot >= self.active_category().items.len()
        {
            return Err(ShowcaseError::UnknownItem { slot });
        }
        self.hovered = slot;
        Ok(())
    }

    /// Moves hover through the active face's items, wrapping at both ends.
    pub fn hover_step(&mut self, forward: bool) {
        let count = self.active_category().items.len();
        if count == 0 {
            return;
        }
        let next = match (self.hovered, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        };
        self.hovered = Some(next);
    }

    pub fn click(&self, slot: usize) -> Result<&CatalogItem, ShowcaseError> {
        let item = self
            .active_category()
            .items
            .get(slot)
            .ok_or(ShowcaseError::UnknownItem { slot })?;
        info!("You clicked {}", item.label);
        Ok(item)
    }

    /// Frame listener body: eases the cabinet toward the active face and
    /// advances the idle float clock.
    pub fn on_frame(&mut self, tick: &FrameTick) -> f32 {
        self.elapsed = tick.elapsed;
        let target = self.target_angle();
        self.smoother.advance(target, tick.delta)
    }

    pub fn preload(&self, assets: &mut dyn AssetSource) {
        for category in &self.categories {
            for path in category.model_paths() {
                assets.preload(path);
            }
        }
    }

    /// Placement of face `index` relative to the cabinet.
    pub fn face_transform(&self, index: usize) -> Transform {
        let angle = index as f32 * self.face_step();
        Transform {
            position: Vector3::new(angle.sin(), 0.0, angle.cos()) * self.layout.face_offset,
            rotation: Vector3::new(0.0, angle, 0.0),
            ..Default::default()
        }
    }

    /// Everything on the cabinet as world-space draw items.
    ///
    /// Items whose model is still loading (or failed) contribute nothing.
    pub fn draw_items(&mut self, assets: &mut dyn AssetSource) -> Vec<DrawItem> {
        let cabinet = TransformFactory::rotation_y(self.smoother.current_angle());
        let slots = self.layout.grid_slots();
        let mut items = Vec::new();

        for (face, category) in self.categories.iter().enumerate() {
            let face_matrix = cabinet * self.face_transform(face).matrix();

            items.push(DrawItem {
                mesh: Arc::clone(&self.panel),
                model: face_matrix * TransformFactory::translation(&Vector3::new(0.0, 0.0, -0.5)),
                color: PANEL_COLOR,
            });

            for (slot, item) in category.items.iter().enumerate() {
                let hover_scale = if face == self.active && self.hovered == Some(slot) {
                    self.layout.hover_scale
                } else {
                    1.0
                };
                let phase = (face * SLOTS_PER_FACE + slot) as f32 * SLOT_PHASE;
                let slot_matrix = face_matrix
                    * TransformFactory::translation(&slots[slot])
                    * self.layout.idle.transform(self.elapsed, phase).matrix()
                    * TransformFactory::scaling(hover_scale);
                let color = to_u32(category.color);

                match &item.model_path {
                    None => items.push(DrawItem {
                        mesh: Arc::clone(&self.placeholder),
                        model: slot_matrix,
                        color,
                    }),
                    Some(path) => {
                        if let Some(asset) = self.assets.fetch(assets, path) {
                            push_asset(&mut items, &(slot_matrix * asset.matrix()), asset, color);
                        }
                    }
                }
            }
        }

        debug!("Cabinet frame: {} draw items", items.len());
        items
    }
}

/// Flattens a normalized asset into draw items under `parent`.
pub(crate) fn push_asset(
    items: &mut Vec<DrawItem>,
    parent: &Matrix4<f32>,
    asset: &NormalizedAsset,
    color: u32,
) {
    asset.node.visit(parent, &mut |node, world| {
        if let Some(mesh) = &node.mesh {
            items.push(DrawItem {
                mesh: Arc::clone(mesh),
                model: *world,
                color,
            });
        }
    });
}
