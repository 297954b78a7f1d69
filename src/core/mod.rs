/// Core functionality modules
///
/// Local search with fallback tiers, genre browsing, and turning model
/// answers into catalog entries.

pub mod engine;
pub mod extractor;
pub mod recommender;
pub mod retriever;
pub mod searcher;

pub use engine::Engine;
pub use extractor::{Extraction, ExtractionSource, TitleExtractor};
pub use recommender::{response_text, Recommendation, RecommendationSource, Recommender};
pub use retriever::{GenreSearch, Retriever};
pub use searcher::{SearchOutcome, SearchTier, Searcher, DEFAULT_MAX_RESULTS};
