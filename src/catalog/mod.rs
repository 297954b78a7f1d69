/// Catalog module for reelfind
///
/// Loads the movie catalog from JSON once at startup and answers
/// read-only lookups against it.

pub mod models;
pub mod queries;
pub mod store;

pub use models::{CatalogEntry, GenreTag, MAX_GENRES_PER_ENTRY};
pub use store::{CatalogStats, CatalogStore};
