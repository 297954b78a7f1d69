// Pulls movie titles out of whatever the recommendation model said
//
// We ask for a JSON array, but models wander: sometimes there's chatter
// around the array, sometimes no array at all. So: first bracketed array
// that parses, else every "quoted" bit, else nothing. Never an error.

use crate::catalog::{CatalogEntry, CatalogStore};
use crate::error::{ReelfindError, Result};
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;

// Quoted-string fallback is noisy, so only take this many
pub const MAX_QUOTED_TITLES: usize = 8;

// Non-greedy so chatter with several bracket pairs only grabs the first one
const ARRAY_PATTERN: &str = r"(?s)\[.*?\]";
const QUOTED_PATTERN: &str = r#""([^"]+)""#;

/// Which extraction tier produced the titles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionSource {
    Array,
    Quoted,
    None,
}

impl std::fmt::Display for ExtractionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExtractionSource::Array => "array",
            ExtractionSource::Quoted => "quoted",
            ExtractionSource::None => "none",
        };
        write!(f, "{}", s)
    }
}

/// Titles found in a model answer, tagged with how they were found
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub source: ExtractionSource,
    pub titles: Vec<String>,
}

impl Extraction {
    fn none() -> Self {
        Self {
            source: ExtractionSource::None,
            titles: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct TitleExtractor {
    catalog: Arc<CatalogStore>,
    array_regex: Regex,
    quoted_regex: Regex,
}

impl TitleExtractor {
    pub fn new(catalog: Arc<CatalogStore>) -> Result<Self> {
        let array_regex = Regex::new(ARRAY_PATTERN)
            .map_err(|e| ReelfindError::Generic(format!("bad array pattern: {}", e)))?;
        let quoted_regex = Regex::new(QUOTED_PATTERN)
            .map_err(|e| ReelfindError::Generic(format!("bad quote pattern: {}", e)))?;

        Ok(Self {
            catalog,
            array_regex,
            quoted_regex,
        })
    }

    // Main extraction function. Tries the array, then quotes, then gives up quietly.
    pub fn extract_titles(&self, text: &str) -> Extraction {
        if let Some(titles) = self.parse_array(text) {
            return Extraction {
                source: ExtractionSource::Array,
                titles,
            };
        }

        let quoted: Vec<String> = self
            .quoted_regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .take(MAX_QUOTED_TITLES)
            .collect();

        if quoted.is_empty() {
            tracing::debug!("No titles found in model response");
            return Extraction::none();
        }

        tracing::debug!("Model response had no usable array, using {} quoted titles", quoted.len());
        Extraction {
            source: ExtractionSource::Quoted,
            titles: quoted,
        }
    }

    /// First bracketed span, if it is a JSON list
    ///
    /// Strings are trimmed, non-zero numbers rendered, anything else dropped,
    /// and so is anything that ends up empty.
    fn parse_array(&self, text: &str) -> Option<Vec<String>> {
        let found = self.array_regex.find(text)?;

        let items: Vec<Value> = match serde_json::from_str(found.as_str()) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("Bracketed text in model response is not a JSON list: {}", e);
                return None;
            }
        };

        let titles = items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
                _ => None,
            })
            .filter(|t| !t.is_empty())
            .collect();

        Some(titles)
    }

    /// Look each title up in the catalog
    ///
    /// Unknown titles are dropped, order is kept, duplicates are not removed.
    pub fn resolve<S: AsRef<str>>(&self, titles: &[S]) -> Vec<CatalogEntry> {
        titles
            .iter()
            .filter_map(|title| {
                let found = self.catalog.find_by_title(title.as_ref());
                if found.is_none() {
                    tracing::debug!("Model suggested '{}', not in catalog", title.as_ref());
                }
                found
            })
            .cloned()
            .collect()
    }

    /// Extract and resolve in one go
    pub fn resolve_response(&self, text: &str) -> Vec<CatalogEntry> {
        let extraction = self.extract_titles(text);
        self.resolve(&extraction.titles)
    }
}
