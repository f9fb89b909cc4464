use crate::errors::StoreError;
use crate::view::SavedView;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Key-value persistence for saved views, keyed by view name.
pub trait ViewStore {
    fn list(&self) -> Result<Vec<SavedView>, StoreError>;
    fn get(&self, name: &str) -> Result<Option<SavedView>, StoreError>;
    /// Stores the view under its name, returning the view it replaced.
    fn save(&mut self, view: SavedView) -> Result<Option<SavedView>, StoreError>;
    fn delete(&mut self, name: &str) -> Result<Option<SavedView>, StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryViewStore {
    views: BTreeMap<String, SavedView>,
}

impl MemoryViewStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ViewStore for MemoryViewStore {
    fn list(&self) -> Result<Vec<SavedView>, StoreError> {
        Ok(self.views.values().cloned().collect())
    }

    fn get(&self, name: &str) -> Result<Option<SavedView>, StoreError> {
        Ok(self.views.get(name).cloned())
    }

    fn save(&mut self, view: SavedView) -> Result<Option<SavedView>, StoreError> {
        Ok(self.views.insert(view.name.clone(), view))
    }

    fn delete(&mut self, name: &str) -> Result<Option<SavedView>, StoreError> {
        Ok(self.views.remove(name))
    }
}

/// Keeps all views in one JSON object file, `{ "<name>": <view>, ... }`.
/// Every write replaces the whole file through a temporary sibling.
#[derive(Debug, Clone)]
pub struct JsonFileViewStore {
    path: PathBuf,
}

impl JsonFileViewStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, SavedView>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs_err::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, views: &BTreeMap<String, SavedView>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent)?;
        }
        let tmp_path = self.path.with_extension("json.tmp");
        fs_err::write(&tmp_path, serde_json::to_string_pretty(views)?)?;
        fs_err::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl ViewStore for JsonFileViewStore {
    fn list(&self) -> Result<Vec<SavedView>, StoreError> {
        Ok(self.read_all()?.into_values().collect())
    }

    fn get(&self, name: &str) -> Result<Option<SavedView>, StoreError> {
        Ok(self.read_all()?.remove(name))
    }

    fn save(&mut self, view: SavedView) -> Result<Option<SavedView>, StoreError> {
        let mut views = self.read_all()?;
        let name = view.name.clone();
        let replaced = views.insert(name.clone(), view);
        self.write_all(&views)?;
        info!("Saved view '{}' to {}", name, self.path.display());
        Ok(replaced)
    }

    fn delete(&mut self, name: &str) -> Result<Option<SavedView>, StoreError> {
        let mut views = self.read_all()?;
        let removed = views.remove(name);
        if removed.is_some() {
            self.write_all(&views)?;
            info!("Deleted view '{}' from {}", name, self.path.display());
        }
        Ok(removed)
    }
}
