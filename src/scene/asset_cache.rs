use crate::scene::loader::{AssetSource, LoadState};
use crate::scene::node::SceneNode;
use crate::scene::normalizer::{AssetNormalizer, NormalizedAsset};
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

struct Entry {
    source: Arc<SceneNode>,
    asset: Option<NormalizedAsset>,
}

/// Memoized normalization keyed by asset path.
///
/// An entry is recomputed only when the source graph behind a path changes
/// identity (a different `Arc`). Asking again for the same ready source is a
/// lookup, so the cache can be consulted every frame.
pub struct NormalizedAssetCache {
    normalizer: AssetNormalizer,
    entries: HashMap<String, Entry>,
    normalize_count: usize,
}

impl NormalizedAssetCache {
    pub fn new(target_size: f32) -> Self {
        Self {
            normalizer: AssetNormalizer::new(target_size),
            entries: HashMap::new(),
            normalize_count: 0,
        }
    }

    pub fn target_size(&self) -> f32 {
        self.normalizer.target_size
    }

    /// Normalized asset for `path` given its current load state.
    /// `None` means "render nothing": still pending, failed, or no geometry.
    pub fn resolve(&mut self, path: &str, state: &LoadState) -> Option<&NormalizedAsset> {
        let Some(source) = state.ready() else {
            return None;
        };

        let stale = self
            .entries
            .get(path)
            .is_none_or(|entry| !Arc::ptr_eq(&entry.source, source));

        if stale {
            debug!("Normalizing '{}' to size {}", path, self.target_size());
            let asset = self.normalizer.normalize(source);
            self.normalize_count += 1;
            self.entries.insert(
                path.to_string(),
                Entry {
                    source: Arc::clone(source),
                    asset,
                },
            );
        }

        self.entries.get(path).and_then(|e| e.asset.as_ref())
    }

    /// Loads through `assets` and resolves in one go.
    pub fn fetch(&mut self, assets: &mut dyn AssetSource, path: &str) -> Option<&NormalizedAsset> {
        let state = assets.load(path);
        self.resolve(path, &state)
    }

    pub fn invalidate(&mut self, path: &str) -> bool {
        self.entries.remove(path).is_some()
    }

    /// How many normalizations have run so far.
    pub fn normalize_count(&self) -> usize {
        self.normalize_count
    }
}
