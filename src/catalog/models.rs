/// Data models for catalog entities
///
/// The on-disk shape (`RawCatalog`/`RawEntry`) is loose JSON. Everything past the
/// loader works with the validated `CatalogEntry` and the closed `GenreTag` set.

use crate::error::{ReelfindError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Most genres an entry may carry; extras are dropped at load time
pub const MAX_GENRES_PER_ENTRY: usize = 3;

/// Canonical genre tags
///
/// Declaration order is the canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenreTag {
    Horror,
    Comedy,
    Action,
    Drama,
    SciFi,
    Romance,
    Thriller,
    Mystery,
    Superhero,
    Animation,
    Anime,
    Classic,
    Family,
    Crime,
    Adventure,
    Documentary,
}

impl GenreTag {
    pub const ALL: [GenreTag; 16] = [
        GenreTag::Horror,
        GenreTag::Comedy,
        GenreTag::Action,
        GenreTag::Drama,
        GenreTag::SciFi,
        GenreTag::Romance,
        GenreTag::Thriller,
        GenreTag::Mystery,
        GenreTag::Superhero,
        GenreTag::Animation,
        GenreTag::Anime,
        GenreTag::Classic,
        GenreTag::Family,
        GenreTag::Crime,
        GenreTag::Adventure,
        GenreTag::Documentary,
    ];

    /// The canonical lowercase tag, as stored in catalog files
    pub fn as_str(&self) -> &'static str {
        match self {
            GenreTag::Horror => "horror",
            GenreTag::Comedy => "comedy",
            GenreTag::Action => "action",
            GenreTag::Drama => "drama",
            GenreTag::SciFi => "sci-fi",
            GenreTag::Romance => "romance",
            GenreTag::Thriller => "thriller",
            GenreTag::Mystery => "mystery",
            GenreTag::Superhero => "superhero",
            GenreTag::Animation => "animation",
            GenreTag::Anime => "anime",
            GenreTag::Classic => "classic",
            GenreTag::Family => "family",
            GenreTag::Crime => "crime",
            GenreTag::Adventure => "adventure",
            GenreTag::Documentary => "documentary",
        }
    }
}

impl FromStr for GenreTag {
    type Err = ReelfindError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_lowercase();
        GenreTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == needle)
            .ok_or_else(|| ReelfindError::UnknownGenre(s.trim().to_string()))
    }
}

impl std::fmt::Display for GenreTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single movie in the catalog
///
/// Fields are private so an entry can only come out of `CatalogEntry::new`,
/// which enforces the non-empty title and genre invariants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    title: String,
    year: i32,
    rating: Option<f64>,
    genres: Vec<GenreTag>,
    description: String,
}

impl CatalogEntry {
    /// Build a validated entry
    ///
    /// Duplicate tags collapse (first occurrence wins) and anything past
    /// `MAX_GENRES_PER_ENTRY` is dropped.
    pub fn new(
        title: impl Into<String>,
        year: i32,
        rating: Option<f64>,
        genres: Vec<GenreTag>,
        description: impl Into<String>,
    ) -> Result<Self> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(ReelfindError::Generic("title is empty".to_string()));
        }

        if let Some(r) = rating {
            if !r.is_finite() || !(0.0..=10.0).contains(&r) {
                return Err(ReelfindError::Generic(format!(
                    "rating {} is outside 0-10",
                    r
                )));
            }
        }

        let mut unique = Vec::with_capacity(MAX_GENRES_PER_ENTRY);
        for genre in genres {
            if !unique.contains(&genre) {
                unique.push(genre);
            }
        }
        unique.truncate(MAX_GENRES_PER_ENTRY);

        if unique.is_empty() {
            return Err(ReelfindError::Generic(format!(
                "'{}' has no recognised genres",
                title
            )));
        }

        Ok(Self {
            title,
            year,
            rating,
            genres: unique,
            description: description.into(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Raw rating, `None` when the catalog left it out
    pub fn rating(&self) -> Option<f64> {
        self.rating
    }

    /// Rating with a caller-chosen default for missing values
    pub fn rating_or(&self, default: f64) -> f64 {
        self.rating.unwrap_or(default)
    }

    pub fn genres(&self) -> &[GenreTag] {
        &self.genres
    }

    pub fn has_genre(&self, genre: GenreTag) -> bool {
        self.genres.contains(&genre)
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Catalog document as it sits on disk
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawCatalog {
    #[serde(default)]
    pub movies: Vec<RawEntry>,
}

/// One catalog record before validation
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawEntry {
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl RawEntry {
    /// Validate into a `CatalogEntry`
    ///
    /// Unknown genre strings are dropped rather than failing the entry;
    /// the entry only fails if nothing usable is left.
    pub fn into_entry(self, index: usize) -> Result<CatalogEntry> {
        let genres = self
            .genres
            .iter()
            .filter_map(|g| g.parse::<GenreTag>().ok())
            .collect();

        CatalogEntry::new(self.title, self.year, self.rating, genres, self.description).map_err(
            |e| ReelfindError::InvalidEntry {
                index,
                reason: e.to_string(),
            },
        )
    }
}
