/// Scoring heuristics for catalog entries
///
/// Additive weights, no upper bound. A score of zero means "not a match".

use crate::catalog::CatalogEntry;
use crate::intelligence::AnalyzedQuery;

/// Per target genre the entry carries
pub const GENRE_WEIGHT: f64 = 10.0;
/// Per keyword found in the title
pub const TITLE_KEYWORD_WEIGHT: f64 = 15.0;
/// Per keyword found only in the description
pub const DESCRIPTION_KEYWORD_WEIGHT: f64 = 3.0;
/// Whole query found inside the title
pub const EXACT_TITLE_BONUS: f64 = 50.0;
/// Multiplier on the rating, applied only to entries that already matched
pub const RATING_BOOST: f64 = 0.5;
/// Rating assumed for entries without one when boosting
pub const DEFAULT_BOOST_RATING: f64 = 5.0;

/// A catalog entry paired with its score
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
    pub entry: &'a CatalogEntry,
    pub score: f64,
}

impl ScoredCandidate<'_> {
    pub fn is_match(&self) -> bool {
        self.score > 0.0
    }
}

/// Scorer for catalog entries
pub struct Scorer;

impl Scorer {
    /// Score one entry against an analyzed query
    ///
    /// # Arguments
    /// * `entry` - Catalog entry to score
    /// * `analyzed` - Output of `QueryAnalyzer::analyze`
    ///
    /// # Returns
    /// * `0.0` for a non-match, otherwise the weighted sum plus a rating boost
    pub fn score(entry: &CatalogEntry, analyzed: &AnalyzedQuery) -> f64 {
        let mut score = 0.0;

        score += analyzed
            .target_genres
            .iter()
            .filter(|genre| entry.has_genre(**genre))
            .count() as f64
            * GENRE_WEIGHT;

        let title = entry.title().to_lowercase();
        let description = entry.description().to_lowercase();

        // A keyword earns the title bonus or the description bonus, never both
        for keyword in &analyzed.keywords {
            if title.contains(keyword.as_str()) {
                score += TITLE_KEYWORD_WEIGHT;
            } else if description.contains(keyword.as_str()) {
                score += DESCRIPTION_KEYWORD_WEIGHT;
            }
        }

        if !analyzed.raw_lower.is_empty() && title.contains(analyzed.raw_lower.as_str()) {
            score += EXACT_TITLE_BONUS;
        }

        // Rating only breaks ties between matches, it never creates one
        if score > 0.0 {
            score += entry.rating_or(DEFAULT_BOOST_RATING) * RATING_BOOST;
        }

        score
    }

    /// Score an entry and keep the pairing
    pub fn candidate<'a>(entry: &'a CatalogEntry, analyzed: &AnalyzedQuery) -> ScoredCandidate<'a> {
        ScoredCandidate {
            entry,
            score: Self::score(entry, analyzed),
        }
    }
}
