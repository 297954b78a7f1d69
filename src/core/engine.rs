/// Resolution engine
///
/// Wires the catalog and lexicon into every component once, and exposes the
/// two entry points the outside world uses: `search` and `resolve`.

use crate::catalog::{CatalogEntry, CatalogStore};
use crate::core::{Recommender, Retriever, Searcher, TitleExtractor};
use crate::error::Result;
use crate::intelligence::{GenreLexicon, QueryAnalyzer};
use std::path::Path;
use std::sync::Arc;

/// Read-only context shared by all components
#[derive(Debug)]
pub struct Engine {
    catalog: Arc<CatalogStore>,
    searcher: Arc<Searcher>,
    extractor: Arc<TitleExtractor>,
    retriever: Retriever,
    recommender: Recommender,
}

impl Engine {
    /// Build an engine around an already loaded catalog
    pub fn new(catalog: CatalogStore) -> Result<Self> {
        let catalog = Arc::new(catalog);
        let lexicon = Arc::new(GenreLexicon::new());
        let analyzer = Arc::new(QueryAnalyzer::new(lexicon)?);

        let searcher = Arc::new(Searcher::new(Arc::clone(&catalog), analyzer));
        let extractor = Arc::new(TitleExtractor::new(Arc::clone(&catalog))?);
        let retriever = Retriever::new(Arc::clone(&searcher));
        let recommender = Recommender::new(Arc::clone(&searcher), Arc::clone(&extractor));

        Ok(Self {
            catalog,
            searcher,
            extractor,
            retriever,
            recommender,
        })
    }

    /// Load the catalog from disk and build an engine
    ///
    /// A catalog that fails to load becomes an empty one; the engine still
    /// comes up and simply finds nothing.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(CatalogStore::load_or_empty(path))
    }

    /// Local lexical search
    pub fn search(&self, query: &str, max_results: usize) -> Vec<CatalogEntry> {
        self.searcher.search(query, max_results)
    }

    /// Catalog entries named in a free-text model answer
    pub fn resolve(&self, model_response: &str) -> Vec<CatalogEntry> {
        self.extractor.resolve_response(model_response)
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }

    pub fn extractor(&self) -> &TitleExtractor {
        &self.extractor
    }

    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    pub fn recommender(&self) -> &Recommender {
        &self.recommender
    }
}
