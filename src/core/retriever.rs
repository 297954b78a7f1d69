/// Genre-driven retrieval
///
/// Browsing by category and the genre chips shown next to search results.

use crate::catalog::{CatalogEntry, GenreTag};
use crate::core::Searcher;
use crate::intelligence::GenreInfo;
use serde::Serialize;
use std::sync::Arc;

/// Default number of genre chips next to results
pub const DEFAULT_MAX_GENRES: usize = 3;
/// Default number of movies next to genre chips
pub const DEFAULT_MAX_MOVIES: usize = 5;

/// Genre chips plus movie results for one query
#[derive(Debug, Clone, Serialize)]
pub struct GenreSearch {
    pub genres: Vec<GenreInfo>,
    pub movies: Vec<CatalogEntry>,
}

/// Handles category browsing
#[derive(Debug)]
pub struct Retriever {
    searcher: Arc<Searcher>,
}

impl Retriever {
    /// Create a new retriever instance
    pub fn new(searcher: Arc<Searcher>) -> Self {
        Self { searcher }
    }

    /// Top rated movies for a category
    ///
    /// The category goes through the lexicon first ("scary" -> horror and
    /// thriller) and is otherwise read as a genre name. Unknown categories
    /// yield nothing.
    pub fn suggestions_for_category(&self, category: &str, max_results: usize) -> Vec<CatalogEntry> {
        let genres = self.category_genres(category);
        if genres.is_empty() {
            tracing::debug!("No genres for category '{}'", category);
            return Vec::new();
        }

        let mut movies = self.searcher.catalog().with_any_genre(&genres);
        movies.sort_by(|a, b| b.rating_or(0.0).total_cmp(&a.rating_or(0.0)));

        movies
            .into_iter()
            .take(max_results)
            .cloned()
            .collect()
    }

    /// Genre chips for a (possibly half-typed) query
    pub fn matching_genres(&self, query: &str) -> Vec<GenreInfo> {
        self.searcher.analyzer().lexicon().matching_genres(query)
    }

    /// Genre chips and movie results together
    pub fn search_with_genres(&self, query: &str, max_genres: usize, max_movies: usize) -> GenreSearch {
        let mut genres = self.matching_genres(query);
        genres.truncate(max_genres);

        GenreSearch {
            genres,
            movies: self.searcher.search(query, max_movies),
        }
    }

    /// Every genre present in the catalog, in canonical order
    pub fn catalog_genres(&self) -> Vec<GenreInfo> {
        self.searcher
            .catalog()
            .sorted_genres()
            .into_iter()
            .map(GenreInfo::for_tag)
            .collect()
    }

    fn category_genres(&self, category: &str) -> Vec<GenreTag> {
        let mapped = self.searcher.analyzer().lexicon().lookup(category);
        if !mapped.is_empty() {
            return mapped.into_iter().collect();
        }

        category.parse::<GenreTag>().map(|tag| vec![tag]).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogStore;
    use crate::intelligence::{GenreLexicon, QueryAnalyzer};

    fn entry(title: &str, rating: f64, genres: Vec<GenreTag>) -> CatalogEntry {
        CatalogEntry::new(title, 2019, Some(rating), genres, "").unwrap()
    }

    fn setup() -> Retriever {
        let catalog = Arc::new(CatalogStore::from_entries(vec![
            entry("Hereditary", 7.3, vec![GenreTag::Horror]),
            entry("Get Out", 7.7, vec![GenreTag::Horror, GenreTag::Thriller]),
            entry("Prisoners", 8.1, vec![GenreTag::Thriller, GenreTag::Crime]),
            entry("Superbad", 7.6, vec![GenreTag::Comedy]),
        ]));
        let analyzer = Arc::new(QueryAnalyzer::new(Arc::new(GenreLexicon::new())).unwrap());
        Retriever::new(Arc::new(Searcher::new(catalog, analyzer)))
    }

    fn titles(entries: &[CatalogEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.title()).collect()
    }

    #[test]
    fn test_category_by_genre_name() {
        let retriever = setup();

        let movies = retriever.suggestions_for_category("Horror", 8);
        assert_eq!(titles(&movies), vec!["Get Out", "Hereditary"]);
    }

    #[test]
    fn test_category_through_lexicon() {
        let retriever = setup();

        // scary -> horror + thriller
        let movies = retriever.suggestions_for_category("scary", 2);
        assert_eq!(titles(&movies), vec!["Prisoners", "Get Out"]);
    }

    #[test]
    fn test_unknown_category() {
        let retriever = setup();
        assert!(retriever.suggestions_for_category("polka", 8).is_empty());
    }

    #[test]
    fn test_search_with_genres() {
        let retriever = setup();

        let result = retriever.search_with_genres("scary", 1, 5);
        assert_eq!(result.genres.len(), 1);
        assert_eq!(result.genres[0].tag, GenreTag::Horror);
        assert_eq!(result.movies[0].title(), "Get Out");
    }

    #[test]
    fn test_catalog_genres() {
        let retriever = setup();

        let names: Vec<String> = retriever
            .catalog_genres()
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["Horror", "Comedy", "Thriller", "Crime"]);
    }
}
