//! Save/load persistence
//!
//! Features:
//! - Plain JSON save (`high_score`, `coins`, `items`)
//! - Missing fields default to zero; unreadable saves fall back to defaults
//! - Pluggable storage backend (file, LocalStorage, memory)
//! - Write failures are logged, never fatal

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::economy::{Inventory, Ledger};
use crate::platform::storage::SaveStore;

/// Errors from persistence operations
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Durable player progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveData {
    /// Best score ever reached
    pub high_score: u32,
    pub coins: u32,
    pub items: Inventory,
}

impl SaveData {
    pub fn new(high_score: u32, ledger: &Ledger) -> Self {
        Self {
            high_score,
            coins: ledger.coins(),
            items: ledger.items(),
        }
    }

    pub fn ledger(&self) -> Ledger {
        Ledger::new(self.coins, self.items)
    }

    pub fn from_json(json: &str) -> Result<Self, SaveError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Loads the save at startup and writes it back when asked.
///
/// Gameplay requests a save (game over); the app flushes pending requests at
/// the end of the frame and saves unconditionally on quit.
pub struct SaveCoordinator {
    store: Box<dyn SaveStore>,
    pending: bool,
}

impl SaveCoordinator {
    pub fn new(store: Box<dyn SaveStore>) -> Self {
        Self {
            store,
            pending: false,
        }
    }

    /// Read the save, falling back to defaults on any failure
    pub fn load(&self) -> SaveData {
        match self.store.read() {
            Ok(Some(json)) => match SaveData::from_json(&json) {
                Ok(data) => {
                    log::info!(
                        "Loaded save (high score {}, {} coins)",
                        data.high_score,
                        data.coins
                    );
                    data
                }
                Err(e) => {
                    log::warn!("Corrupt save, starting fresh: {}", e);
                    SaveData::default()
                }
            },
            Ok(None) => {
                log::info!("No save found, starting fresh");
                SaveData::default()
            }
            Err(e) => {
                log::warn!("Could not read save, starting fresh: {}", e);
                SaveData::default()
            }
        }
    }

    pub fn request_save(&mut self) {
        self.pending = true;
    }

    #[cfg(test)]
    pub(crate) fn is_pending(&self) -> bool {
        self.pending
    }

    /// Write `data` now
    pub fn save(&mut self, data: &SaveData) -> Result<(), SaveError> {
        let json = data.to_json()?;
        self.store.write(&json)?;
        self.pending = false;
        log::info!(
            "Game saved (high score {}, {} coins)",
            data.high_score,
            data.coins
        );
        Ok(())
    }

    /// Save if a save was requested. Failures are logged and the request is
    /// dropped; the in-memory state stays authoritative.
    pub fn flush(&mut self, data: &SaveData) {
        if !self.pending {
            return;
        }
        self.save_best_effort(data);
    }

    /// Save, logging instead of returning errors
    pub fn save_best_effort(&mut self, data: &SaveData) {
        if let Err(e) = self.save(data) {
            log::error!("Save failed: {}", e);
            self.pending = false;
        }
    }
}
