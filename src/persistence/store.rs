//! Progress stores

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::{ProgressSnapshot, StoreError};

/// Storage collaborator for run progress.
///
/// `load` returns `Ok(None)` when nothing was ever saved.
pub trait ProgressStore {
    fn save(&mut self, snapshot: &ProgressSnapshot) -> Result<(), StoreError>;

    fn load(&self) -> Result<Option<ProgressSnapshot>, StoreError>;

    /// Drop run progress, keeping only the high score
    fn clear_keeping_high_score(&mut self, high_score: u64, timestamp: u64) -> Result<(), StoreError> {
        self.save(&ProgressSnapshot::high_score_only(high_score, timestamp))
    }
}

/// In-memory store holding the raw JSON.
///
/// Clones share one slot, so a host (or test) can keep a handle after
/// handing the store to the game.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Rc<RefCell<Option<String>>>,
    saves: Rc<Cell<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with arbitrary (possibly corrupt) stored text
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Rc::new(RefCell::new(Some(raw.into()))),
            ..Self::default()
        }
    }

    /// The stored JSON exactly as written
    pub fn raw(&self) -> Option<String> {
        self.raw.borrow().clone()
    }

    /// Successful writes since creation
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl ProgressStore for MemoryStore {
    fn save(&mut self, snapshot: &ProgressSnapshot) -> Result<(), StoreError> {
        let json = snapshot.to_json()?;
        *self.raw.borrow_mut() = Some(json);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn load(&self) -> Result<Option<ProgressSnapshot>, StoreError> {
        self.raw
            .borrow()
            .as_deref()
            .map(ProgressSnapshot::from_json)
            .transpose()
    }
}

/// JSON file on disk. Writes go to a sibling `.tmp` file, then get renamed
/// into place.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for FileStore {
    fn save(&mut self, snapshot: &ProgressSnapshot) -> Result<(), StoreError> {
        let json = snapshot.to_json()?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        log::info!("Progress saved to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<ProgressSnapshot>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => ProgressSnapshot::from_json(&json).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub const DEFAULT_KEY: &'static str = "sky-volley-save";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("LocalStorage".to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

#[cfg(target_arch = "wasm32")]
impl ProgressStore for LocalStorageStore {
    fn save(&mut self, snapshot: &ProgressSnapshot) -> Result<(), StoreError> {
        let json = snapshot.to_json()?;
        Self::storage()?
            .set_item(&self.key, &json)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?;
        log::info!("Progress saved (level {:?})", snapshot.level);
        Ok(())
    }

    fn load(&self) -> Result<Option<ProgressSnapshot>, StoreError> {
        let raw = Self::storage()?
            .get_item(&self.key)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?;
        raw.as_deref().map(ProgressSnapshot::from_json).transpose()
    }
}
