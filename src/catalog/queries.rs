/// Read-only lookups over the catalog
///
/// Everything here walks the entries in load order, so ties always resolve
/// to whichever movie came first in the file.

use crate::catalog::models::{CatalogEntry, GenreTag};
use crate::catalog::CatalogStore;
use std::collections::BTreeSet;

impl CatalogStore {
    /// Find a movie by title
    ///
    /// Tries a case-insensitive exact match first, then the first title that
    /// contains the query as a case-insensitive substring.
    ///
    /// # Returns
    /// * `Some(&CatalogEntry)` - The matched movie
    /// * `None` - Nothing matched, or the title was blank
    pub fn find_by_title(&self, title: &str) -> Option<&CatalogEntry> {
        let needle = title.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        self.all()
            .iter()
            .find(|entry| entry.title().to_lowercase() == needle)
            .or_else(|| {
                self.all()
                    .iter()
                    .find(|entry| entry.title().to_lowercase().contains(&needle))
            })
    }

    /// Every genre used by at least one entry
    pub fn all_genres(&self) -> BTreeSet<GenreTag> {
        self.all()
            .iter()
            .flat_map(|entry| entry.genres().iter().copied())
            .collect()
    }

    /// `all_genres` as a list in canonical order
    pub fn sorted_genres(&self) -> Vec<GenreTag> {
        self.all_genres().into_iter().collect()
    }

    /// All titles, in load order
    pub fn titles(&self) -> Vec<&str> {
        self.all().iter().map(|entry| entry.title()).collect()
    }

    /// Highest rated movies first; unrated entries count as 0
    pub fn top_rated(&self, limit: usize) -> Vec<&CatalogEntry> {
        let mut entries: Vec<&CatalogEntry> = self.all().iter().collect();
        entries.sort_by(|a, b| b.rating_or(0.0).total_cmp(&a.rating_or(0.0)));
        entries.truncate(limit);
        entries
    }

    /// Movies tagged with any of `genres`, in load order
    pub fn with_any_genre(&self, genres: &[GenreTag]) -> Vec<&CatalogEntry> {
        self.all()
            .iter()
            .filter(|entry| genres.iter().any(|g| entry.has_genre(*g)))
            .collect()
    }

    /// One line per movie, used as catalog context for an external model
    ///
    /// Format: `- Title (year) - genre, genre - Rating: 7.5`
    pub fn summary_lines(&self) -> Vec<String> {
        self.all()
            .iter()
            .map(|entry| {
                let genres: Vec<&str> = entry.genres().iter().map(|g| g.as_str()).collect();
                let rating = entry
                    .rating()
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "n/a".to_string());
                format!(
                    "- {} ({}) - {} - Rating: {}",
                    entry.title(),
                    entry.year(),
                    genres.join(", "),
                    rating
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, rating: Option<f64>, genres: Vec<GenreTag>) -> CatalogEntry {
        CatalogEntry::new(title, 2000, rating, genres, "").unwrap()
    }

    fn store() -> CatalogStore {
        CatalogStore::from_entries(vec![
            entry("The Conjuring 2", Some(7.3), vec![GenreTag::Horror]),
            entry("The Conjuring", Some(7.5), vec![GenreTag::Horror]),
            entry("Get Out", Some(7.7), vec![GenreTag::Horror, GenreTag::Thriller]),
            entry("Superbad", Some(7.6), vec![GenreTag::Comedy]),
            entry("Mystery Box", None, vec![GenreTag::Mystery]),
        ])
    }

    #[test]
    fn test_find_by_title_exact_beats_substring() {
        let store = store();

        // "The Conjuring" is a substring of the first entry, but the exact match wins
        let found = store.find_by_title("the conjuring").unwrap();
        assert_eq!(found.title(), "The Conjuring");
    }

    #[test]
    fn test_find_by_title_substring_first_in_load_order() {
        let store = store();

        let found = store.find_by_title("conjuring").unwrap();
        assert_eq!(found.title(), "The Conjuring 2");
    }

    #[test]
    fn test_find_by_title_trims_and_ignores_case() {
        let store = store();

        assert_eq!(store.find_by_title("  GET OUT ").unwrap().title(), "Get Out");
        assert!(store.find_by_title("Nonexistent Movie XYZ").is_none());
        assert!(store.find_by_title("   ").is_none());
    }

    #[test]
    fn test_all_genres() {
        let store = store();

        let genres = store.sorted_genres();
        assert_eq!(
            genres,
            vec![
                GenreTag::Horror,
                GenreTag::Comedy,
                GenreTag::Thriller,
                GenreTag::Mystery
            ]
        );
    }

    #[test]
    fn test_top_rated_treats_missing_rating_as_zero() {
        let store = store();

        let top: Vec<&str> = store.top_rated(10).iter().map(|e| e.title()).collect();
        assert_eq!(
            top,
            vec![
                "Get Out",
                "Superbad",
                "The Conjuring",
                "The Conjuring 2",
                "Mystery Box"
            ]
        );
        assert_eq!(store.top_rated(2).len(), 2);
    }

    #[test]
    fn test_with_any_genre() {
        let store = store();

        let hits = store.with_any_genre(&[GenreTag::Thriller, GenreTag::Comedy]);
        let titles: Vec<&str> = hits.iter().map(|e| e.title()).collect();
        assert_eq!(titles, vec!["Get Out", "Superbad"]);
    }

    #[test]
    fn test_titles_in_load_order() {
        let store = store();
        assert_eq!(store.titles()[..3], ["The Conjuring 2", "The Conjuring", "Get Out"]);
    }

    #[test]
    fn test_summary_lines() {
        let store = store();
        let lines = store.summary_lines();

        assert_eq!(lines[2], "- Get Out (2000) - horror, thriller - Rating: 7.7");
        assert_eq!(lines[4], "- Mystery Box (2000) - mystery - Rating: n/a");
    }
}
