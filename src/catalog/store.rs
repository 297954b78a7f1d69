/// Catalog store
///
/// Loads the movie catalog once and hands out read-only views of it.
/// Nothing in here mutates after construction, so a `CatalogStore` behind an
/// `Arc` can be shared by every searcher and extractor without locking.

use crate::catalog::models::{CatalogEntry, GenreTag, RawCatalog};
use crate::error::{ReelfindError, Result};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Immutable in-memory movie catalog
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    entries: Vec<CatalogEntry>,
    source: Option<PathBuf>,
}

impl CatalogStore {
    /// Load a catalog from a JSON file
    ///
    /// # Arguments
    /// * `path` - Path to a `{"movies": [...]}` document
    ///
    /// # Returns
    /// * `Ok(CatalogStore)` - Catalog with every valid entry, in file order
    /// * `Err(ReelfindError::CatalogLoad)` - File unreadable or not a catalog document
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let contents = std::fs::read_to_string(path).map_err(|e| {
            ReelfindError::CatalogLoad(format!("cannot read {}: {}", path.display(), e))
        })?;

        let mut store = Self::from_json_str(&contents).map_err(|e| match e {
            ReelfindError::CatalogLoad(msg) => {
                ReelfindError::CatalogLoad(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;
        store.source = Some(path.to_path_buf());

        tracing::info!(
            "Loaded {} movies from {}",
            store.entries.len(),
            path.display()
        );

        Ok(store)
    }

    /// Load a catalog, substituting an empty one on failure
    ///
    /// Search and resolution then degrade to empty results instead of the
    /// whole program refusing to start.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(store) => store,
            Err(e) => {
                tracing::error!("{}; continuing with an empty catalog", e);
                Self {
                    entries: Vec::new(),
                    source: Some(path.to_path_buf()),
                }
            }
        }
    }

    /// Parse a catalog document held in memory
    ///
    /// Structural problems (bad JSON, missing title/year, wrong types) fail the
    /// whole document. Entries that parse but break an invariant are skipped.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawCatalog = serde_json::from_str(json)
            .map_err(|e| ReelfindError::CatalogLoad(format!("malformed catalog: {}", e)))?;

        let mut entries = Vec::with_capacity(raw.movies.len());
        for (index, raw_entry) in raw.movies.into_iter().enumerate() {
            match raw_entry.into_entry(index) {
                Ok(entry) => entries.push(entry),
                Err(e) => tracing::warn!("Skipping catalog entry: {}", e),
            }
        }

        Ok(Self::from_entries(entries))
    }

    /// Build a catalog from already-validated entries
    ///
    /// Titles are unique: a later entry reusing a title is dropped.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|entry| {
                let fresh = seen.insert(entry.title().to_string());
                if !fresh {
                    tracing::warn!("Skipping duplicate title '{}'", entry.title());
                }
                fresh
            })
            .collect();

        Self {
            entries,
            source: None,
        }
    }

    /// Every entry, in load order
    pub fn all(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Where the catalog was loaded from, if it came from disk
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Get catalog statistics
    pub fn stats(&self) -> CatalogStats {
        let mut genre_counts: BTreeMap<GenreTag, usize> = BTreeMap::new();
        for entry in &self.entries {
            for genre in entry.genres() {
                *genre_counts.entry(*genre).or_insert(0) += 1;
            }
        }

        CatalogStats {
            total_entries: self.entries.len(),
            unrated_entries: self.entries.iter().filter(|e| e.rating().is_none()).count(),
            genre_counts,
        }
    }
}

/// Catalog statistics
#[derive(Debug, Clone)]
pub struct CatalogStats {
    pub total_entries: usize,
    pub unrated_entries: usize,
    pub genre_counts: BTreeMap<GenreTag, usize>,
}
