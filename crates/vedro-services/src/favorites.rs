//! Favorite cities.
//!
//! The in-memory list is authoritative for the session. Every mutation is
//! written through to the storage backend; a failed write is reported in the
//! returned [`Mutation`] and logged, but never rolls the list back.

use crate::favorites_storage::{FavoritesStorage, MemoryStorage};

/// Outcome of a mutating call on [`FavoritesStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// Nothing changed (already present, absent, or blank name)
    Unchanged,
    /// Changed and written to storage
    Persisted,
    /// Changed in memory, but the write failed
    NotPersisted,
}

impl Mutation {
    pub fn changed(self) -> bool {
        !matches!(self, Mutation::Unchanged)
    }
}

/// Set of favorited city names, in the order they were added.
///
/// Names are compared exactly (case-sensitive). Blank names are never stored.
pub struct FavoritesStore {
    cities: Vec<String>,
    storage: Box<dyn FavoritesStorage>,
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("cities", &self.cities)
            .finish_non_exhaustive()
    }
}

impl FavoritesStore {
    /// Load favorites from `storage`. A failed load starts with an empty list.
    pub fn load(storage: Box<dyn FavoritesStorage>) -> Self {
        let loaded = storage.load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load favorites, starting empty: {}", e);
            Vec::new()
        });

        let mut cities: Vec<String> = Vec::with_capacity(loaded.len());
        for city in loaded {
            if !is_blank(&city) && !cities.contains(&city) {
                cities.push(city);
            }
        }

        Self { cities, storage }
    }

    /// Store backed by [`MemoryStorage`], starting empty
    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryStorage::new()))
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn contains(&self, city: &str) -> bool {
        self.cities.iter().any(|c| c == city)
    }

    pub fn add(&mut self, city: &str) -> Mutation {
        if is_blank(city) || self.contains(city) {
            return Mutation::Unchanged;
        }

        self.cities.push(city.to_string());
        tracing::info!("Added favorite: {}", city);
        self.persist()
    }

    pub fn remove(&mut self, city: &str) -> Mutation {
        let before = self.cities.len();
        self.cities.retain(|c| c != city);
        if self.cities.len() == before {
            return Mutation::Unchanged;
        }

        tracing::info!("Removed favorite: {}", city);
        self.persist()
    }

    /// Remove if present, add otherwise
    pub fn toggle(&mut self, city: &str) -> Mutation {
        if self.contains(city) {
            self.remove(city)
        } else {
            self.add(city)
        }
    }

    fn persist(&self) -> Mutation {
        match self.storage.save(&self.cities) {
            Ok(()) => Mutation::Persisted,
            Err(e) => {
                tracing::warn!("Failed to save favorites: {}", e);
                Mutation::NotPersisted
            }
        }
    }
}

fn is_blank(city: &str) -> bool {
    city.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites_storage::{StorageError, StorageResult};

    struct BrokenStorage;

    impl FavoritesStorage for BrokenStorage {
        fn load(&self) -> StorageResult<Vec<String>> {
            Err(StorageError::Backend("disk on fire".into()))
        }

        fn save(&self, _favorites: &[String]) -> StorageResult<()> {
            Err(StorageError::Backend("disk on fire".into()))
        }
    }

    #[test]
    fn test_add_twice_keeps_one_entry() {
        let mut store = FavoritesStore::in_memory();
        assert_eq!(store.add("Zagreb"), Mutation::Persisted);
        assert_eq!(store.add("Zagreb"), Mutation::Unchanged);
        assert_eq!(store.cities(), ["Zagreb"]);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let mut store = FavoritesStore::in_memory();
        store.add("Zagreb");
        assert!(store.contains("Zagreb"));
        assert!(!store.contains("zagreb"));
        assert_eq!(store.add("zagreb"), Mutation::Persisted);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_remove_on_empty_is_noop() {
        let mut store = FavoritesStore::in_memory();
        assert_eq!(store.remove("Split"), Mutation::Unchanged);
        assert!(store.is_empty());
    }

    #[test]
    fn test_blank_names_rejected() {
        let mut store = FavoritesStore::in_memory();
        assert_eq!(store.add(""), Mutation::Unchanged);
        assert_eq!(store.add("   "), Mutation::Unchanged);
        assert!(store.is_empty());
    }

    #[test]
    fn test_mutations_write_through() {
        let storage = MemoryStorage::new();
        let mut store = FavoritesStore::load(Box::new(storage.clone()));

        store.add("Zadar");
        store.add("Pula");
        assert_eq!(storage.saved(), vec!["Zadar", "Pula"]);

        store.remove("Zadar");
        assert_eq!(storage.saved(), vec!["Pula"]);
    }

    #[test]
    fn test_toggle() {
        let mut store = FavoritesStore::in_memory();
        assert_eq!(store.toggle("Rijeka"), Mutation::Persisted);
        assert!(store.contains("Rijeka"));
        assert_eq!(store.toggle("Rijeka"), Mutation::Persisted);
        assert!(!store.contains("Rijeka"));
    }

    #[test]
    fn test_load_cleans_stored_list() {
        let storage = MemoryStorage::with_favorites(["Split", "", "Split", "  ", "Osijek"]);
        let store = FavoritesStore::load(Box::new(storage));
        assert_eq!(store.cities(), ["Split", "Osijek"]);
    }

    #[test]
    fn test_failed_load_starts_empty() {
        let store = FavoritesStore::load(Box::new(BrokenStorage));
        assert!(store.is_empty());
    }

    #[test]
    fn test_failed_save_keeps_memory_state() {
        let mut store = FavoritesStore::load(Box::new(BrokenStorage));

        let outcome = store.add("Dubrovnik");

        assert_eq!(outcome, Mutation::NotPersisted);
        assert!(outcome.changed());
        assert!(store.contains("Dubrovnik"));
    }
}
