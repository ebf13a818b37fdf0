pub mod favorites;
pub mod favorites_storage;
pub mod theme;

pub use favorites::{FavoritesStore, Mutation};
pub use favorites_storage::{
    FavoritesStorage, JsonFileStorage, MemoryStorage, StorageError, StorageResult,
};
pub use theme::ThemeState;
