/// Model-backed recommendations with a local safety net
///
/// Builds the prompt for an external text generator, reads whatever it
/// answered, and falls back to local search when the answer is missing or
/// names nothing from the catalog. The generator call itself belongs to the
/// caller.

use crate::catalog::CatalogEntry;
use crate::core::{ExtractionSource, SearchTier, Searcher, TitleExtractor};
use serde_json::Value;
use std::sync::Arc;

/// How many titles the prompt asks the model for
const PROMPT_TITLE_RANGE: (usize, usize) = (5, 8);

/// Where a recommendation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationSource {
    /// Resolved from the model answer
    Model(ExtractionSource),
    /// Model gave nothing usable; local search answered
    Local(SearchTier),
}

impl std::fmt::Display for RecommendationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationSource::Model(source) => write!(f, "model ({})", source),
            RecommendationSource::Local(tier) => write!(f, "local search ({})", tier),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Recommendation {
    pub source: RecommendationSource,
    pub entries: Vec<CatalogEntry>,
}

#[derive(Debug)]
pub struct Recommender {
    searcher: Arc<Searcher>,
    extractor: Arc<TitleExtractor>,
}

impl Recommender {
    pub fn new(searcher: Arc<Searcher>, extractor: Arc<TitleExtractor>) -> Self {
        Self {
            searcher,
            extractor,
        }
    }

    /// Prompt for the external generator
    ///
    /// Lists the whole catalog and asks for a bare JSON array of titles.
    pub fn build_prompt(&self, query: &str) -> String {
        let (min, max) = PROMPT_TITLE_RANGE;
        let catalog = self.searcher.catalog().summary_lines().join("\n");

        format!(
            "You recommend movies, and only movies from this catalog:\n\n\
             {catalog}\n\n\
             Pick {min}-{max} titles from the catalog that fit the request below. \
             Reply with a JSON array of exact catalog titles and nothing else.\n\n\
             Example reply:\n\
             [\"The Conjuring\", \"Hereditary\", \"Get Out\"]\n\n\
             Recommend movies for: {query}",
            catalog = catalog,
            min = min,
            max = max,
            query = query.trim()
        )
    }

    /// Turn a generator answer into catalog entries
    ///
    /// # Arguments
    /// * `query` - The user's query, used for the local fallback
    /// * `response` - Raw generator output, `None` if the call failed
    /// * `max_results` - Maximum entries to return
    pub fn recommend(&self, query: &str, response: Option<&str>, max_results: usize) -> Recommendation {
        if let Some(body) = response {
            let text = response_text(body);
            let extraction = self.extractor.extract_titles(&text);
            let mut entries = self.extractor.resolve(&extraction.titles);
            entries.truncate(max_results);

            if !entries.is_empty() {
                return Recommendation {
                    source: RecommendationSource::Model(extraction.source),
                    entries,
                };
            }

            tracing::warn!(
                "Model answer resolved to no catalog titles ({} extracted via {}), using local search",
                extraction.titles.len(),
                extraction.source
            );
        }

        let outcome = self.searcher.search_detailed(query, max_results);
        Recommendation {
            source: RecommendationSource::Local(outcome.tier),
            entries: outcome.entries,
        }
    }
}

/// Text of a generator reply
///
/// Generators that wrap their answer as
/// `{"candidates": [{"content": {"parts": [{"text": ...}]}}]}` get unwrapped;
/// anything else is taken as the answer itself.
pub fn response_text(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/candidates/0/content/parts/0/text")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}
