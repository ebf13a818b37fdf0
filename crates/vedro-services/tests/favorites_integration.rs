//! Integration tests for FavoritesStore on top of the JSON file backend.
//!
//! Each test simulates an app restart by loading a fresh store from the same
//! file.

use std::fs;

use tempfile::TempDir;
use vedro_services::{FavoritesStore, JsonFileStorage, Mutation};

fn open(dir: &TempDir) -> FavoritesStore {
    FavoritesStore::load(Box::new(JsonFileStorage::in_config_dir(dir.path())))
}

#[test]
fn test_favorites_survive_restart() {
    let dir = TempDir::new().unwrap();

    let mut store = open(&dir);
    assert_eq!(store.add("Zagreb"), Mutation::Persisted);
    assert_eq!(store.add("Split"), Mutation::Persisted);
    assert_eq!(store.add("Zagreb"), Mutation::Unchanged);
    drop(store);

    let store = open(&dir);
    assert_eq!(store.cities(), ["Zagreb", "Split"]);
}

#[test]
fn test_removal_survives_restart() {
    let dir = TempDir::new().unwrap();

    let mut store = open(&dir);
    store.add("Zadar");
    store.add("Pula");
    store.remove("Zadar");
    drop(store);

    let store = open(&dir);
    assert!(!store.contains("Zadar"));
    assert!(store.contains("Pula"));
}

#[test]
fn test_corrupt_file_starts_empty_and_recovers() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("favorites.json"), "][").unwrap();

    let mut store = open(&dir);
    assert!(store.is_empty());

    // The next mutation overwrites the corrupt file
    assert_eq!(store.add("Osijek"), Mutation::Persisted);
    drop(store);

    assert_eq!(open(&dir).cities(), ["Osijek"]);
}
