/// Query analyzer
///
/// Splits a raw query into the genres it asks for and the leftover words
/// that might be part of a title.

use crate::catalog::GenreTag;
use crate::error::{ReelfindError, Result};
use crate::intelligence::GenreLexicon;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

/// Filler words that say nothing about which movie someone wants
const STOPWORDS: &[&str] = &[
    "a",
    "an",
    "the",
    "movie",
    "movies",
    "film",
    "films",
    "show",
    "shows",
    "good",
    "best",
    "great",
    "top",
    "popular",
    "new",
    "old",
    "like",
    "similar",
    "to",
    "with",
    "about",
    "for",
    "me",
    "recommend",
    "suggestion",
    "suggestions",
    "find",
    "search",
    "get",
    "want",
    "looking",
];

/// Keywords must be longer than this many characters
const MIN_KEYWORD_LEN: usize = 2;

/// A query broken down into scoring signals
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyzedQuery {
    pub target_genres: BTreeSet<GenreTag>,
    pub keywords: Vec<String>,
    pub raw_lower: String,
}

impl AnalyzedQuery {
    pub fn is_empty(&self) -> bool {
        self.raw_lower.is_empty()
    }
}

/// Turns raw query strings into `AnalyzedQuery` values
#[derive(Debug)]
pub struct QueryAnalyzer {
    lexicon: Arc<GenreLexicon>,
    word_regex: Regex,
    stopwords: HashSet<String>,
}

impl QueryAnalyzer {
    /// Create a new analyzer
    ///
    /// Every lexicon term is a stopword too, so "scary" counts toward
    /// horror but never as a title keyword.
    pub fn new(lexicon: Arc<GenreLexicon>) -> Result<Self> {
        let word_regex = Regex::new(r"\w+")
            .map_err(|e| ReelfindError::Generic(format!("bad word pattern: {}", e)))?;

        let stopwords = STOPWORDS
            .iter()
            .copied()
            .chain(lexicon.terms())
            .map(|w| w.to_string())
            .collect();

        Ok(Self {
            lexicon,
            word_regex,
            stopwords,
        })
    }

    /// Analyze a raw query
    ///
    /// Blank input comes back with no genres and no keywords.
    pub fn analyze(&self, raw_query: &str) -> AnalyzedQuery {
        let raw_lower = raw_query.trim().to_lowercase();
        if raw_lower.is_empty() {
            return AnalyzedQuery::default();
        }

        let target_genres = self.lexicon.match_terms_in(&raw_lower);
        let keywords = self.extract_keywords(&raw_lower);

        tracing::debug!(
            "Analyzed '{}': genres={:?}, keywords={:?}",
            raw_lower,
            target_genres,
            keywords
        );

        AnalyzedQuery {
            target_genres,
            keywords,
            raw_lower,
        }
    }

    /// Word tokens that are not stopwords and are long enough to matter
    fn extract_keywords(&self, lowered: &str) -> Vec<String> {
        self.word_regex
            .find_iter(lowered)
            .map(|m| m.as_str())
            .filter(|w| !self.stopwords.contains(*w))
            .filter(|w| w.chars().count() > MIN_KEYWORD_LEN)
            .map(|w| w.to_string())
            .collect()
    }

    pub fn lexicon(&self) -> &GenreLexicon {
        &self.lexicon
    }
}
