use crate::error::AssetError;
use crate::io::obj_loader::load_obj;
use crate::scene::node::SceneNode;
use log::{debug, error, info};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// Availability of an asset as seen by the presentation layer.
#[derive(Debug, Clone)]
pub enum LoadState {
    /// Still being decoded. Render nothing for now.
    Pending,
    /// Decoded source graph. Shared and never mutated by consumers.
    Ready(Arc<SceneNode>),
    /// Decoding failed. Render nothing.
    Failed(String),
}

impl LoadState {
    pub fn ready(&self) -> Option<&Arc<SceneNode>> {
        match self {
            LoadState::Ready(node) => Some(node),
            _ => None,
        }
    }
}

/// Where the pages get their model graphs from.
pub trait AssetSource {
    /// Current state of `path`. Starts a load if nothing is known about it yet.
    fn load(&mut self, path: &str) -> LoadState;

    /// Hint that `path` will be needed soon.
    fn preload(&mut self, path: &str);
}

enum Slot {
    Loading(Receiver<Result<SceneNode, AssetError>>),
    Ready(Arc<SceneNode>),
    Failed(String),
}

/// OBJ-backed asset store.
///
/// `preload` decodes on a background thread; `load` on an unknown path
/// decodes on the calling thread. Results, failures included, are kept until
/// `evict` is called.
#[derive(Default)]
pub struct ObjAssetStore {
    slots: HashMap<String, Slot>,
}

impl ObjAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets `path`; the next `load` decodes the file again and yields a new
    /// source identity.
    pub fn evict(&mut self, path: &str) -> bool {
        self.slots.remove(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn settle(&mut self, path: &str, result: Result<SceneNode, AssetError>) -> LoadState {
        let (slot, state) = match result {
            Ok(node) => {
                let node = Arc::new(node);
                debug!("Asset '{}' ready ({} meshes)", path, node.mesh_count());
                (Slot::Ready(Arc::clone(&node)), LoadState::Ready(node))
            }
            Err(e) => {
                error!("Error loading model '{}': {}", path, e);
                let msg = e.to_string();
                (Slot::Failed(msg.clone()), LoadState::Failed(msg))
            }
        };
        self.slots.insert(path.to_string(), slot);
        state
    }
}

impl AssetSource for ObjAssetStore {
    fn load(&mut self, path: &str) -> LoadState {
        let finished = match self.slots.get(path) {
            None => load_obj(path),
            Some(Slot::Ready(node)) => return LoadState::Ready(Arc::clone(node)),
            Some(Slot::Failed(msg)) => return LoadState::Failed(msg.clone()),
            Some(Slot::Loading(rx)) => match rx.try_recv() {
                Ok(result) => result,
                Err(TryRecvError::Empty) => return LoadState::Pending,
                Err(TryRecvError::Disconnected) => Err(AssetError::Disconnected(path.to_string())),
            },
        };
        self.settle(path, finished)
    }

    fn preload(&mut self, path: &str) {
        if self.slots.contains_key(path) {
            return;
        }
        info!("Preloading '{}'", path);
        let (tx, rx) = mpsc::channel();
        let owned = path.to_string();
        thread::spawn(move || {
            // receiver may be evicted before we finish
            let _ = tx.send(load_obj(&owned));
        });
        self.slots.insert(path.to_string(), Slot::Loading(rx));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::{Duration, Instant};

    fn write_triangle() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".obj").tempfile().unwrap();
        file.write_all(b"o tri\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n")
            .unwrap();
        file
    }

    #[test]
    fn load_is_cached_by_identity() {
        let file = write_triangle();
        let path = file.path().to_str().unwrap();
        let mut store = ObjAssetStore::new();

        let a = store.load(path).ready().cloned().unwrap();
        let b = store.load(path).ready().cloned().unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        assert!(store.evict(path));
        let c = store.load(path).ready().cloned().unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
    }

    #[test]
    fn preload_eventually_becomes_ready() {
        let file = write_triangle();
        let path = file.path().to_str().unwrap();
        let mut store = ObjAssetStore::new();
        store.preload(path);

        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            match store.load(path) {
                LoadState::Ready(node) => {
                    assert_eq!(node.mesh_count(), 1);
                    break;
                }
                LoadState::Pending => {
                    assert!(Instant::now() < deadline, "preload never finished");
                    thread::sleep(Duration::from_millis(5));
                }
                LoadState::Failed(e) => panic!("unexpected failure: {e}"),
            }
        }
    }

    #[test]
    fn failures_are_remembered() {
        let mut store = ObjAssetStore::new();
        assert!(matches!(store.load("missing.obj"), LoadState::Failed(_)));
        assert!(matches!(store.load("missing.obj"), LoadState::Failed(_)));
        assert_eq!(store.len(), 1);
    }
}
