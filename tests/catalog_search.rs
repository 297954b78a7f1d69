//! End-to-end tests against the bundled sample catalog.
//!
//! These go through `Engine` the same way the CLI does, so they cover the
//! loader, the lexicon, scoring, the fallback chain and title resolution
//! together.

use reelfind_lib::catalog::GenreTag;
use reelfind_lib::core::{ExtractionSource, RecommendationSource, SearchTier};
use reelfind_lib::{CatalogStore, Engine};
use test_case::test_case;

fn bundled_catalog_path() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("movies.json")
}

fn engine() -> Engine {
    let catalog = CatalogStore::load(bundled_catalog_path()).expect("bundled catalog loads");
    Engine::new(catalog).expect("engine builds")
}

fn titles(entries: &[reelfind_lib::CatalogEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.title()).collect()
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn test_bundled_catalog_is_valid() {
    let catalog = CatalogStore::load(bundled_catalog_path()).unwrap();

    assert!(catalog.len() >= 40);
    for entry in catalog.all() {
        assert!(!entry.title().trim().is_empty());
        assert!(!entry.genres().is_empty() && entry.genres().len() <= 3);
    }
}

#[test]
fn test_engine_from_missing_path_degrades_to_empty() {
    let engine = Engine::from_path("/definitely/not/here/movies.json").unwrap();

    assert!(engine.catalog().is_empty());
    assert!(engine.search("scary movies", 8).is_empty());
    assert!(engine.resolve(r#"["Inception"]"#).is_empty());
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[test]
fn test_scary_movies_prefers_horror_thrillers() {
    let engine = engine();
    let outcome = engine.searcher().search_detailed("scary movies", 8);

    assert_eq!(outcome.tier, SearchTier::Scored);
    assert_eq!(outcome.entries.len(), 8);
    // Two genre hits beat one, so the horror thrillers lead
    assert_eq!(titles(&outcome.entries)[..2], ["Get Out", "Us"]);
    for entry in &outcome.entries {
        assert!(entry.has_genre(GenreTag::Horror) || entry.has_genre(GenreTag::Thriller));
    }
}

#[test]
fn test_exact_title_query_ranks_title_first() {
    let engine = engine();
    let results = engine.search("the conjuring", 5);

    assert_eq!(titles(&results)[..2], ["The Conjuring", "The Conjuring 2"]);
}

#[test]
fn test_funny_family_movie() {
    let engine = engine();
    let results = engine.search("funny family movie", 5);

    assert_eq!(results[0].title(), "Paddington 2");
    for entry in &results {
        assert!(entry.has_genre(GenreTag::Comedy) || entry.has_genre(GenreTag::Family));
    }
}

#[test]
fn test_gibberish_falls_back_to_top_rated() {
    let engine = engine();
    let outcome = engine.searcher().search_detailed("zzzzqqqq", 3);

    assert_eq!(outcome.tier, SearchTier::TopRated);
    // Rating ties keep catalog order
    assert_eq!(
        titles(&outcome.entries),
        vec!["The Shawshank Redemption", "Our Planet", "The Godfather"]
    );
}

#[test_case("" ; "empty")]
#[test_case("   " ; "spaces")]
#[test_case("\t\n" ; "whitespace")]
fn test_blank_query_returns_nothing(query: &str) {
    let engine = engine();
    let outcome = engine.searcher().search_detailed(query, 8);

    assert_eq!(outcome.tier, SearchTier::Skipped);
    assert!(outcome.entries.is_empty());
}

#[test]
fn test_results_come_from_the_catalog() {
    let engine = engine();

    for query in ["space", "mafia gangster", "love story", "heroes", "x"] {
        for entry in engine.search(query, 8) {
            assert!(engine.catalog().all().contains(&entry), "{} not in catalog", entry.title());
        }
    }
}

// ---------------------------------------------------------------------------
// Title resolution
// ---------------------------------------------------------------------------

#[test]
fn test_resolve_json_array_skips_unknown_titles() {
    let engine = engine();
    let response = r#"Here you go: ["Inception", "Not A Real Movie", "Up"]"#;

    let extraction = engine.extractor().extract_titles(response);
    assert_eq!(extraction.source, ExtractionSource::Array);

    let movies = engine.resolve(response);
    assert_eq!(titles(&movies), vec!["Inception", "Up"]);
}

#[test]
fn test_resolve_quoted_titles() {
    let engine = engine();
    let movies = engine.resolve(r#"I'd suggest "Coco" and "Free Solo"."#);

    assert_eq!(titles(&movies), vec!["Coco", "Free Solo"]);
}

#[test]
fn test_resolve_plain_prose_is_empty() {
    let engine = engine();
    assert!(engine.resolve("I'm not sure what you'd like.").is_empty());
}

// ---------------------------------------------------------------------------
// Genres, categories, recommendations
// ---------------------------------------------------------------------------

#[test]
fn test_category_suggestions_are_rating_ordered() {
    let engine = engine();
    let movies = engine.retriever().suggestions_for_category("scary", 6);

    assert_eq!(movies.len(), 6);
    assert_eq!(movies[0].title(), "Inception");
    for pair in movies.windows(2) {
        assert!(pair[0].rating_or(0.0) >= pair[1].rating_or(0.0));
    }
}

#[test]
fn test_search_with_genres_caps_chips() {
    let engine = engine();
    let result = engine
        .retriever()
        .search_with_genres("scary funny space adventure", 3, 5);

    assert_eq!(result.genres.len(), 3);
    assert!(result.movies.len() <= 5);
    assert!(!result.movies.is_empty());
}

#[test]
fn test_recommend_uses_model_answer() {
    let engine = engine();
    let body = r#"{"candidates":[{"content":{"parts":[{"text":"[\"Arrival\", \"Dune\"]"}]}}]}"#;

    let recommendation = engine.recommender().recommend("thoughtful sci-fi", Some(body), 8);

    assert_eq!(
        recommendation.source,
        RecommendationSource::Model(ExtractionSource::Array)
    );
    assert_eq!(titles(&recommendation.entries), vec!["Arrival", "Dune"]);
}

#[test]
fn test_recommend_falls_back_to_local_search() {
    let engine = engine();

    let recommendation = engine
        .recommender()
        .recommend("scary movies", Some("Sorry, I can't help with that."), 4);

    assert_eq!(recommendation.source, RecommendationSource::Local(SearchTier::Scored));
    assert_eq!(recommendation.entries, engine.search("scary movies", 4));
}

#[test]
fn test_prompt_lists_whole_catalog() {
    let engine = engine();
    let prompt = engine.recommender().build_prompt("something funny");

    assert!(prompt.contains("- Get Out (2017) - horror, thriller - Rating: 7.7"));
    assert!(prompt.ends_with("something funny"));
    assert_eq!(
        prompt.lines().filter(|l| l.starts_with("- ")).count(),
        engine.catalog().len()
    );
}
