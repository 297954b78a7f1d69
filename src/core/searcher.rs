/// Movie searcher with tiered fallback
///
/// Tries scored matching first, then title prefixes, then just the top rated
/// movies, so a non-empty catalog always produces something for a real query.

use crate::catalog::{CatalogEntry, CatalogStore};
use crate::intelligence::{QueryAnalyzer, ScoredCandidate, Scorer};
use std::sync::Arc;

/// Default number of results
pub const DEFAULT_MAX_RESULTS: usize = 8;

/// Base score for a title prefix hit, before adding the rating
const PREFIX_BASE_SCORE: f64 = 10.0;
/// Rating assumed for unrated entries in the prefix tier
const PREFIX_DEFAULT_RATING: f64 = 5.0;

/// Which tier produced a result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTier {
    /// Query was blank; nothing searched
    Skipped,
    /// Genre/keyword scoring
    Scored,
    /// Title or title-word prefix match
    Prefix,
    /// Top rated movies regardless of the query
    TopRated,
}

impl std::fmt::Display for SearchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SearchTier::Skipped => "skipped",
            SearchTier::Scored => "scored",
            SearchTier::Prefix => "prefix",
            SearchTier::TopRated => "top_rated",
        };
        write!(f, "{}", s)
    }
}

/// Results plus the tier that produced them
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub tier: SearchTier,
    pub entries: Vec<CatalogEntry>,
}

/// Handles local query resolution
#[derive(Debug)]
pub struct Searcher {
    catalog: Arc<CatalogStore>,
    analyzer: Arc<QueryAnalyzer>,
}

impl Searcher {
    /// Create a new searcher instance
    pub fn new(catalog: Arc<CatalogStore>, analyzer: Arc<QueryAnalyzer>) -> Self {
        Self { catalog, analyzer }
    }

    /// Search the catalog
    ///
    /// # Arguments
    /// * `query` - Raw user query
    /// * `max_results` - Maximum results to return
    ///
    /// # Returns
    /// * Matching movies, best first. Empty only for a blank query or an
    ///   empty catalog.
    pub fn search(&self, query: &str, max_results: usize) -> Vec<CatalogEntry> {
        self.search_detailed(query, max_results).entries
    }

    /// Same as `search`, but also reports which tier answered
    pub fn search_detailed(&self, query: &str, max_results: usize) -> SearchOutcome {
        let analyzed = self.analyzer.analyze(query);

        // Blank means "no search yet", not "show me defaults"
        if analyzed.is_empty() {
            return SearchOutcome {
                tier: SearchTier::Skipped,
                entries: Vec::new(),
            };
        }

        let scored: Vec<ScoredCandidate> = {
            let mut candidates: Vec<ScoredCandidate> = self
                .catalog
                .all()
                .iter()
                .map(|entry| Scorer::candidate(entry, &analyzed))
                .filter(|c| c.is_match())
                .collect();

            // score first, rating breaks ties; stable, so load order settles the rest
            candidates.sort_by(|a, b| {
                b.score.total_cmp(&a.score).then_with(|| {
                    b.entry
                        .rating_or(0.0)
                        .total_cmp(&a.entry.rating_or(0.0))
                })
            });
            candidates
        };

        let (tier, ranked) = if !scored.is_empty() {
            (SearchTier::Scored, scored)
        } else {
            let prefixed = self.prefix_candidates(&analyzed.raw_lower);
            if !prefixed.is_empty() {
                (SearchTier::Prefix, prefixed)
            } else {
                let top: Vec<ScoredCandidate> = self
                    .catalog
                    .top_rated(max_results)
                    .into_iter()
                    .map(|entry| ScoredCandidate {
                        entry,
                        score: entry.rating_or(0.0),
                    })
                    .collect();
                (SearchTier::TopRated, top)
            }
        };

        tracing::debug!(
            "Search '{}' answered by {} tier ({} candidates)",
            analyzed.raw_lower,
            tier,
            ranked.len()
        );

        SearchOutcome {
            tier,
            entries: ranked
                .into_iter()
                .take(max_results)
                .map(|c| c.entry.clone())
                .collect(),
        }
    }

    /// Title prefix matches on their own, best first
    ///
    /// Any prefix of a title is also a substring of it, so through `search`
    /// this tier only answers when scoring found nothing at all.
    pub fn prefix_matches(&self, query: &str, max_results: usize) -> Vec<CatalogEntry> {
        let lowered = query.trim().to_lowercase();
        if lowered.is_empty() {
            return Vec::new();
        }

        self.prefix_candidates(&lowered)
            .into_iter()
            .take(max_results)
            .map(|c| c.entry.clone())
            .collect()
    }

    /// Entries whose title, or any word of it, starts with the whole query
    fn prefix_candidates(&self, lowered: &str) -> Vec<ScoredCandidate<'_>> {
        let mut candidates: Vec<ScoredCandidate> = self
            .catalog
            .all()
            .iter()
            .filter(|entry| {
                let title = entry.title().to_lowercase();
                title.starts_with(lowered)
                    || title.split_whitespace().any(|word| word.starts_with(lowered))
            })
            .map(|entry| ScoredCandidate {
                entry,
                score: PREFIX_BASE_SCORE + entry.rating_or(PREFIX_DEFAULT_RATING),
            })
            .collect();

        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn analyzer(&self) -> &QueryAnalyzer {
        &self.analyzer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::GenreTag;
    use crate::intelligence::GenreLexicon;

    fn entry(title: &str, rating: Option<f64>, genres: Vec<GenreTag>) -> CatalogEntry {
        CatalogEntry::new(title, 2015, rating, genres, "").unwrap()
    }

    fn searcher_over(entries: Vec<CatalogEntry>) -> Searcher {
        let catalog = Arc::new(CatalogStore::from_entries(entries));
        let analyzer = Arc::new(QueryAnalyzer::new(Arc::new(GenreLexicon::new())).unwrap());
        Searcher::new(catalog, analyzer)
    }

    fn setup() -> Searcher {
        searcher_over(vec![
            entry("Superbad", Some(7.6), vec![GenreTag::Comedy]),
            entry("The Conjuring", Some(7.5), vec![GenreTag::Horror]),
            entry("Hereditary", Some(7.3), vec![GenreTag::Horror]),
            entry("Parasite", Some(8.5), vec![GenreTag::Thriller, GenreTag::Drama]),
            entry("Whiplash", Some(8.5), vec![GenreTag::Drama]),
            entry("Zootopia", Some(8.0), vec![GenreTag::Animation, GenreTag::Family]),
        ])
    }

    fn titles(entries: &[CatalogEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.title()).collect()
    }

    #[test]
    fn test_blank_query_is_empty() {
        let searcher = setup();

        let outcome = searcher.search_detailed("   ", 8);
        assert_eq!(outcome.tier, SearchTier::Skipped);
        assert!(outcome.entries.is_empty());
        assert!(searcher.search("", 8).is_empty());
    }

    #[test]
    fn test_genre_search_ranks_horror_only() {
        let searcher = setup();

        let outcome = searcher.search_detailed("horror", 8);
        assert_eq!(outcome.tier, SearchTier::Scored);
        assert_eq!(titles(&outcome.entries), vec!["The Conjuring", "Hereditary"]);
    }

    #[test]
    fn test_exact_title_ranks_first() {
        let searcher = setup();

        let results = searcher.search("the conjuring", 8);
        assert_eq!(results[0].title(), "The Conjuring");
    }

    #[test]
    fn test_rating_breaks_ties() {
        let searcher = searcher_over(vec![
            entry("Low", Some(6.0), vec![GenreTag::Drama]),
            entry("High", Some(8.5), vec![GenreTag::Drama]),
        ]);

        let results = searcher.search("drama", 8);
        assert_eq!(titles(&results), vec!["High", "Low"]);
    }

    #[test]
    fn test_equal_scores_fall_back_to_rating() {
        // 10 + 6.0 * 0.5 == 3 * 3 + 8.0 * 0.5, so only the rating tells them apart
        let searcher = searcher_over(vec![
            entry("Alpha", Some(6.0), vec![GenreTag::Drama]),
            CatalogEntry::new(
                "Beta",
                2015,
                Some(8.0),
                vec![GenreTag::Comedy],
                "xyzzy plugh frobnitz",
            )
            .unwrap(),
        ]);

        let results = searcher.search("drama xyzzy plugh frobnitz", 8);
        assert_eq!(titles(&results), vec!["Beta", "Alpha"]);
    }

    #[test]
    fn test_full_ties_keep_load_order() {
        let searcher = searcher_over(vec![
            entry("First", Some(7.0), vec![GenreTag::Drama]),
            entry("Second", Some(7.0), vec![GenreTag::Drama]),
            entry("Third", Some(7.0), vec![GenreTag::Drama]),
        ]);

        let results = searcher.search("drama", 8);
        assert_eq!(titles(&results), vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_short_title_fragment_is_scored() {
        let searcher = setup();

        // "zo" is too short to be a keyword but still sits inside "zootopia"
        let outcome = searcher.search_detailed("zo", 8);
        assert_eq!(outcome.tier, SearchTier::Scored);
        assert_eq!(titles(&outcome.entries), vec!["Zootopia"]);
    }

    #[test]
    fn test_prefix_matches() {
        let searcher = searcher_over(vec![
            entry("The Conjuring", Some(7.5), vec![GenreTag::Horror]),
            entry("Coco", Some(8.4), vec![GenreTag::Animation]),
            entry("Unrated Comet", None, vec![GenreTag::SciFi]),
            entry("Deco", Some(9.0), vec![GenreTag::Drama]),
        ]);

        // title start, inner word start, unrated counts as 5.0; "Deco" only contains "co"
        let results = searcher.prefix_matches("CO", 8);
        assert_eq!(titles(&results), vec!["Coco", "The Conjuring", "Unrated Comet"]);
        assert!(searcher.prefix_matches("  ", 8).is_empty());
    }

    #[test]
    fn test_top_rated_fallback() {
        let searcher = setup();

        let outcome = searcher.search_detailed("zzzzqqqq", 3);
        assert_eq!(outcome.tier, SearchTier::TopRated);
        assert_eq!(titles(&outcome.entries), vec!["Parasite", "Whiplash", "Zootopia"]);
    }

    #[test]
    fn test_max_results_respected() {
        let searcher = setup();

        assert_eq!(searcher.search("zzzzqqqq", 100).len(), 6);
        assert_eq!(searcher.search("horror", 1).len(), 1);
        assert!(searcher.search("horror", 0).is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        let searcher = searcher_over(vec![]);

        assert!(searcher.search("horror", 8).is_empty());
        assert!(searcher.search("zzzzqqqq", 8).is_empty());
    }

    #[test]
    fn test_search_is_idempotent() {
        let searcher = setup();

        let first = searcher.search("funny drama", 8);
        let second = searcher.search("funny drama", 8);
        assert_eq!(first, second);
    }
}
