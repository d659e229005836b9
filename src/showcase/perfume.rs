use crate::core::color::to_u32;
use crate::core::math::transform::TransformFactory;
use crate::error::ShowcaseError;
use crate::io::config::{PerfumeConfig, PerfumeEntryConfig};
use crate::pipeline::renderer::DrawItem;
use crate::scene::asset_cache::NormalizedAssetCache;
use crate::scene::frame::FrameTick;
use crate::scene::loader::{AssetSource, LoadState};
use crate::scene::mesh::Mesh;
use crate::scene::node::{SceneNode, Transform};
use crate::scene::smoother::RotationSmoother;
use crate::showcase::cabinet::push_asset;
use log::info;
use nalgebra::Vector3;
use serde::Deserialize;
use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::sync::Arc;

/// Cache key for the built-in bottle used by entries without a model.
const BOTTLE_KEY: &str = "builtin:bottle";
const ORIENTATIONS: usize = 4;
const PEDESTAL_COLOR: u32 = 0xff70_7880;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Floral,
    Woody,
    Fresh,
    Oriental,
}

impl Family {
    pub const ALL: [Family; 4] = [Family::Floral, Family::Woody, Family::Fresh, Family::Oriental];

    /// Line color of the viewer for this family.
    pub fn color(&self) -> Vector3<f32> {
        match self {
            Family::Floral => Vector3::new(0.85, 0.35, 0.55),
            Family::Woody => Vector3::new(0.45, 0.30, 0.15),
            Family::Fresh => Vector3::new(0.20, 0.60, 0.75),
            Family::Oriental => Vector3::new(0.75, 0.50, 0.10),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Family::Floral => "Floral",
            Family::Woody => "Woody",
            Family::Fresh => "Fresh",
            Family::Oriental => "Oriental",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FamilyFilter {
    #[default]
    All,
    Only(Family),
}

impl FamilyFilter {
    pub fn matches(&self, family: Family) -> bool {
        match self {
            FamilyFilter::All => true,
            FamilyFilter::Only(f) => *f == family,
        }
    }

    /// All -> Floral -> Woody -> Fresh -> Oriental -> All
    pub fn next(self) -> Self {
        match self {
            FamilyFilter::All => FamilyFilter::Only(Family::ALL[0]),
            FamilyFilter::Only(f) => {
                let i = Family::ALL.iter().position(|x| *x == f).unwrap_or(0);
                Family::ALL
                    .get(i + 1)
                    .map_or(FamilyFilter::All, |f| FamilyFilter::Only(*f))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Perfume {
    pub name: String,
    pub brand: String,
    pub family: Family,
    pub price: f32,
    pub model_path: Option<String>,
}

impl From<&PerfumeEntryConfig> for Perfume {
    fn from(entry: &PerfumeEntryConfig) -> Self {
        Self {
            name: entry.name.clone(),
            brand: entry.brand.clone(),
            family: entry.family,
            price: entry.price,
            model_path: entry.model_path.clone(),
        }
    }
}

/// Stand-in graph for perfumes without a model: body, neck and cap.
fn bottle_graph() -> SceneNode {
    let mut neck = SceneNode::with_mesh("neck", Mesh::create_box(0.3, 0.3, 0.3));
    neck.transform = Transform::from_position(Vector3::new(0.0, 0.85, 0.0));
    let mut cap = SceneNode::with_mesh("cap", Mesh::create_box(0.5, 0.4, 0.5));
    cap.transform = Transform::from_position(Vector3::new(0.0, 1.2, 0.0));

    SceneNode::new("bottle")
        .with_child(SceneNode::with_mesh("body", Mesh::create_box(1.0, 1.4, 0.6)))
        .with_child(neck)
        .with_child(cap)
}

/// Filterable perfume list with a turntable viewer for the selection.
pub struct PerfumeShowcase {
    perfumes: Vec<Perfume>,
    filter: FamilyFilter,
    query: String,
    /// Index into `perfumes`, always visible under the current filter.
    selected: Option<usize>,
    orientation: usize,
    smoother: RotationSmoother,
    assets: NormalizedAssetCache,
    bottle: LoadState,
    pedestal: Arc<Mesh>,
}

impl PerfumeShowcase {
    pub fn new(perfumes: Vec<Perfume>, target_size: f32, damping: f32) -> Self {
        let mut showcase = Self {
            perfumes,
            filter: FamilyFilter::All,
            query: String::new(),
            selected: None,
            orientation: 0,
            smoother: RotationSmoother::new(damping),
            assets: NormalizedAssetCache::new(target_size),
            bottle: LoadState::Ready(Arc::new(bottle_graph())),
            pedestal: Arc::new(Mesh::create_box(target_size, 0.2, target_size)),
        };
        showcase.reconcile_selection();
        showcase
    }

    pub fn from_config(config: &PerfumeConfig) -> Self {
        Self::new(
            config.perfumes.iter().map(Perfume::from).collect(),
            config.target_size,
            config.damping,
        )
    }

    fn is_visible(&self, perfume: &Perfume) -> bool {
        if !self.filter.matches(perfume.family) {
            return false;
        }
        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        perfume.name.to_lowercase().contains(&query) || perfume.brand.to_lowercase().contains(&query)
    }

    fn visible_indices(&self) -> Vec<usize> {
        (0..self.perfumes.len())
            .filter(|&i| self.is_visible(&self.perfumes[i]))
            .collect()
    }

    /// Perfumes passing the family filter and text query, in catalog order.
    pub fn filtered(&self) -> Vec<&Perfume> {
        self.perfumes.iter().filter(|p| self.is_visible(p)).collect()
    }

    pub fn filter(&self) -> FamilyFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: FamilyFilter) {
        self.filter = filter;
        self.reconcile_selection();
    }

    pub fn cycle_filter(&mut self) {
        self.set_filter(self.filter.next());
        match self.filter {
            FamilyFilter::All => info!("Filter: all families"),
            FamilyFilter::Only(f) => info!("Filter: {}", f),
        }
    }

    /// Case-insensitive substring match against name or brand. Surrounding
    /// whitespace is ignored when matching.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.reconcile_selection();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Appends one typed character to the query.
    pub fn push_query(&mut self, c: char) {
        self.query.push(c);
        self.reconcile_selection();
    }

    pub fn pop_query(&mut self) {
        self.query.pop();
        self.reconcile_selection();
    }

    /// Keeps the selection if still visible, else falls back to the first
    /// visible entry (or nothing).
    fn reconcile_selection(&mut self) {
        let visible = self.visible_indices();
        if self.selected.is_some_and(|s| visible.contains(&s)) {
            return;
        }
        self.selected = visible.first().copied();
    }

    pub fn selected(&self) -> Option<&Perfume> {
        self.selected.map(|i| &self.perfumes[i])
    }

    pub fn select(&mut self, name: &str) -> Result<&Perfume, ShowcaseError> {
        let index = self
            .visible_indices()
            .into_iter()
            .find(|&i| self.perfumes[i].name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ShowcaseError::UnknownPerfume(name.to_string()))?;
        self.selected = Some(index);
        let perfume = &self.perfumes[index];
        info!("Viewing {} by {}", perfume.name, perfume.brand);
        Ok(perfume)
    }

    /// Steps through the visible list, wrapping at both ends.
    pub fn select_step(&mut self, forward: bool) {
        let visible = self.visible_indices();
        if visible.is_empty() {
            return;
        }
        let pos = self
            .selected
            .and_then(|s| visible.iter().position(|&i| i == s));
        let next = match (pos, forward) {
            (None, _) => 0,
            (Some(p), true) => (p + 1) % visible.len(),
            (Some(p), false) => (p + visible.len() - 1) % visible.len(),
        };
        self.selected = Some(visible[next]);
    }

    pub fn orientation(&self) -> usize {
        self.orientation
    }

    /// Turns the stand a quarter turn; `clockwise` as seen from above.
    pub fn rotate(&mut self, clockwise: bool) {
        self.orientation = if clockwise {
            (self.orientation + 1) % ORIENTATIONS
        } else {
            (self.orientation + ORIENTATIONS - 1) % ORIENTATIONS
        };
    }

    pub fn target_angle(&self) -> f32 {
        self.orientation as f32 * -FRAC_PI_2
    }

    pub fn current_angle(&self) -> f32 {
        self.smoother.current_angle()
    }

    pub fn on_frame(&mut self, tick: &FrameTick) -> f32 {
        let target = self.target_angle();
        self.smoother.advance(target, tick.delta)
    }

    pub fn preload(&self, assets: &mut dyn AssetSource) {
        for path in self.perfumes.iter().filter_map(|p| p.model_path.as_deref()) {
            assets.preload(path);
        }
    }

    /// Pedestal plus the selected perfume, fitted to the viewer size.
    pub fn draw_items(&mut self, assets: &mut dyn AssetSource) -> Vec<DrawItem> {
        let stand = TransformFactory::rotation_y(self.smoother.current_angle());
        let half = self.assets.target_size() / 2.0;
        let mut items = vec![DrawItem {
            mesh: Arc::clone(&self.pedestal),
            model: stand * TransformFactory::translation(&Vector3::new(0.0, -half - 0.1, 0.0)),
            color: PEDESTAL_COLOR,
        }];

        let Some(perfume) = self.selected.map(|i| &self.perfumes[i]) else {
            return items;
        };
        let color = to_u32(perfume.family.color());
        let asset = match &perfume.model_path {
            Some(path) => self.assets.fetch(assets, path),
            None => self.assets.resolve(BOTTLE_KEY, &self.bottle),
        };
        if let Some(asset) = asset {
            push_asset(&mut items, &(stand * asset.matrix()), asset, color);
        }
        items
    }
}
