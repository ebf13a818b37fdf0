//! Persistence backends for favorite cities.
//!
//! This module defines the `FavoritesStorage` trait and its two
//! implementations: a JSON file in the config directory and an in-memory
//! list for tests and throwaway sessions.

use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while loading or saving favorites.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend-specific failure.
    #[error("Storage error: {0}")]
    Backend(String),
}

/// Result type for favorites storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage collaborator for the favorites list.
///
/// `save` always receives the complete list; backends replace what they hold.
pub trait FavoritesStorage: Send {
    /// Load the persisted list. A backend with nothing stored yet returns an
    /// empty list rather than an error.
    fn load(&self) -> StorageResult<Vec<String>>;

    /// Replace the persisted list.
    fn save(&self, favorites: &[String]) -> StorageResult<()>;
}

/// Favorites stored as a JSON array of city names.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `favorites.json` inside the application config directory
    pub fn in_config_dir(config_dir: &Path) -> Self {
        Self::new(config_dir.join("favorites.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FavoritesStorage for JsonFileStorage {
    fn load(&self) -> StorageResult<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let json = fs::read_to_string(&self.path)?;
        let favorites: Vec<String> = serde_json::from_str(&json)?;

        tracing::info!("Loaded {} favorites from {:?}", favorites.len(), self.path);
        Ok(favorites)
    }

    fn save(&self, favorites: &[String]) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(favorites)?;
        fs::write(&self.path, json)?;

        tracing::debug!("Saved {} favorites to {:?}", favorites.len(), self.path);
        Ok(())
    }
}

/// In-memory storage. Clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    favorites: Arc<Mutex<Vec<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_favorites<I, S>(favorites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            favorites: Arc::new(Mutex::new(favorites.into_iter().map(Into::into).collect())),
        }
    }

    /// Copy of what has been saved so far
    pub fn saved(&self) -> Vec<String> {
        self.favorites.lock().clone()
    }
}

impl FavoritesStorage for MemoryStorage {
    fn load(&self) -> StorageResult<Vec<String>> {
        Ok(self.saved())
    }

    fn save(&self, favorites: &[String]) -> StorageResult<()> {
        *self.favorites.lock() = favorites.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_json_storage_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::in_config_dir(dir.path());
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_json_storage_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nested").join("favorites.json"));

        storage
            .save(&["Zagreb".to_string(), "Rijeka".to_string()])
            .unwrap();

        assert_eq!(storage.load().unwrap(), vec!["Zagreb", "Rijeka"]);
    }

    #[test]
    fn test_json_storage_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::in_config_dir(dir.path());
        fs::write(storage.path(), "{not json").unwrap();

        assert!(matches!(
            storage.load(),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn test_memory_storage_clones_share_state() {
        let storage = MemoryStorage::with_favorites(["Osijek"]);
        let handle = storage.clone();
        storage.save(&["Pula".to_string()]).unwrap();
        assert_eq!(handle.saved(), vec!["Pula"]);
    }
}
