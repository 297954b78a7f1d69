/// Intelligence module
///
/// Turns free-form queries into genre and keyword signals and scores
/// catalog entries against them.

pub mod analyzer;
pub mod lexicon;
pub mod scorer;

pub use analyzer::{AnalyzedQuery, QueryAnalyzer};
pub use lexicon::{GenreInfo, GenreLexicon, LexiconEntry};
pub use scorer::{ScoredCandidate, Scorer};
