//! Save storage backends
//!
//! The save is a single JSON blob under one key. Native builds keep it in a
//! file, web builds in LocalStorage, tests in memory.

use std::cell::RefCell;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::persistence::SaveError;

/// Durable storage for the save blob
pub trait SaveStore {
    /// Read the stored blob, `None` if nothing was saved yet
    fn read(&self) -> Result<Option<String>, SaveError>;
    /// Replace the stored blob
    fn write(&mut self, json: &str) -> Result<(), SaveError>;
}

/// Save file on disk.
///
/// Writes go to a temporary sibling first and are renamed over the save, so
/// an interrupted write leaves the previous save intact.
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

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SaveStore for FileStore {
    fn read(&self) -> Result<Option<String>, SaveError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, json: &str) -> Result<(), SaveError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let tmp = self.tmp_path();
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-memory store. Clones share the same slot, so a test can keep a handle
/// and inspect what the app wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryStore {
    pub fn with_contents(json: &str) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(json.to_string()))),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl SaveStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, SaveError> {
        Ok(self.slot.borrow().clone())
    }

    fn write(&mut self, json: &str) -> Result<(), SaveError> {
        *self.slot.borrow_mut() = Some(json.to_string());
        Ok(())
    }
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, SaveError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| SaveError::Storage("LocalStorage unavailable".to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl SaveStore for LocalStorageStore {
    fn read(&self) -> Result<Option<String>, SaveError> {
        Self::storage()?
            .get_item(&self.key)
            .map_err(|e| SaveError::Storage(format!("{:?}", e)))
    }

    fn write(&mut self, json: &str) -> Result<(), SaveError> {
        Self::storage()?
            .set_item(&self.key, json)
            .map_err(|e| SaveError::Storage(format!("{:?}", e)))
    }
}

/// Store whose every operation fails
#[cfg(test)]
pub(crate) struct FailingStore;

#[cfg(test)]
impl SaveStore for FailingStore {
    fn read(&self) -> Result<Option<String>, SaveError> {
        Err(SaveError::Storage("read refused".to_string()))
    }

    fn write(&mut self, _json: &str) -> Result<(), SaveError> {
        Err(SaveError::Storage("write refused".to_string()))
    }
}
