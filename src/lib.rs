/// reelfind library
///
/// Resolves free-form movie requests against a fixed catalog, either by
/// local lexical search or by reading an external model's answer.

pub mod catalog;
pub mod config;
pub mod core;
pub mod error;
pub mod intelligence;
pub mod observability;

// Re-exports for convenience
pub use crate::catalog::{CatalogEntry, CatalogStore, GenreTag};
pub use crate::config::Config;
pub use crate::core::Engine;
pub use crate::error::{ReelfindError, Result};
