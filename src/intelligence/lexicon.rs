// Genre lexicon - maps the words people actually type to genre tags
//
// "something scary" should find horror, "funny" should find comedy, etc.
// Matching is plain substring on the lowercased text, so short stems like
// "com" or "hor" also catch "comedies" or "horrors". The flip side: "rom"
// fires on "from". Small catalog, so recall wins over precision here.

use crate::catalog::GenreTag;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::catalog::GenreTag::*;

// Order matters for matching_genres: genres show up in the order their first
// matching term appears in this table.
const TERMS: &[(&str, &[GenreTag])] = &[
    // Horror
    ("horror", &[Horror]),
    ("scary", &[Horror, Thriller]),
    ("creepy", &[Horror, Thriller]),
    ("spooky", &[Horror]),
    ("terrifying", &[Horror]),
    ("hor", &[Horror]),
    // Comedy
    ("comedy", &[Comedy]),
    ("funny", &[Comedy]),
    ("hilarious", &[Comedy]),
    ("laugh", &[Comedy]),
    ("com", &[Comedy]),
    // Action
    ("action", &[Action]),
    ("explosive", &[Action]),
    ("fight", &[Action]),
    ("exciting", &[Action, Thriller]),
    ("act", &[Action]),
    // Drama
    ("drama", &[Drama]),
    ("emotional", &[Drama]),
    ("moving", &[Drama]),
    ("serious", &[Drama]),
    ("dra", &[Drama]),
    // Sci-Fi
    ("sci-fi", &[SciFi]),
    ("scifi", &[SciFi]),
    ("science fiction", &[SciFi]),
    ("space", &[SciFi]),
    ("future", &[SciFi]),
    ("futuristic", &[SciFi]),
    ("sci", &[SciFi]),
    // Romance
    ("romance", &[Romance]),
    ("romantic", &[Romance]),
    ("love", &[Romance]),
    ("love story", &[Romance]),
    ("rom", &[Romance]),
    // Thriller
    ("thriller", &[Thriller]),
    ("suspense", &[Thriller]),
    ("tense", &[Thriller]),
    ("suspenseful", &[Thriller]),
    ("thrill", &[Thriller]),
    // Mystery
    ("mystery", &[Mystery]),
    ("mysterious", &[Mystery]),
    ("detective", &[Mystery, Crime]),
    ("whodunit", &[Mystery]),
    ("myst", &[Mystery]),
    // Superhero
    ("superhero", &[Superhero]),
    ("marvel", &[Superhero, Action]),
    ("dc", &[Superhero, Action]),
    ("heroes", &[Superhero]),
    ("super", &[Superhero]),
    // Animation
    ("animation", &[Animation]),
    ("animated", &[Animation]),
    ("cartoon", &[Animation]),
    ("anime", &[Anime, Animation]),
    ("anim", &[Animation]),
    // Classic
    ("classic", &[Classic]),
    ("old", &[Classic]),
    ("vintage", &[Classic]),
    // Family
    ("family", &[Family]),
    ("kids", &[Family, Animation]),
    ("children", &[Family]),
    ("fam", &[Family]),
    // Crime
    ("crime", &[Crime]),
    ("criminal", &[Crime]),
    ("mafia", &[Crime, Drama]),
    ("gangster", &[Crime]),
    ("cri", &[Crime]),
    // Adventure
    ("adventure", &[Adventure]),
    ("adv", &[Adventure]),
    ("journey", &[Adventure]),
    ("quest", &[Adventure]),
    // Documentary
    ("documentary", &[Documentary]),
    ("doc", &[Documentary]),
    ("docu", &[Documentary]),
    ("true story", &[Documentary, Drama]),
];

/// One surface term and the genres it stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexiconEntry {
    pub term: &'static str,
    pub tags: &'static [GenreTag],
}

/// Display metadata for a genre chip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreInfo {
    pub tag: GenreTag,
    pub name: String,
    pub icon: &'static str,
}

impl GenreInfo {
    pub fn for_tag(tag: GenreTag) -> Self {
        Self {
            tag,
            name: capitalize(tag.as_str()),
            icon: icon_for(tag),
        }
    }
}

/// Static term -> genre table
#[derive(Debug, Clone)]
pub struct GenreLexicon {
    entries: Vec<LexiconEntry>,
}

impl Default for GenreLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl GenreLexicon {
    pub fn new() -> Self {
        let entries = TERMS
            .iter()
            .map(|&(term, tags)| LexiconEntry { term, tags })
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    pub fn terms(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.term)
    }

    /// Genres for an exact term, empty if the term is unknown
    pub fn lookup(&self, term: &str) -> BTreeSet<GenreTag> {
        let needle = term.trim().to_lowercase();
        self.entries
            .iter()
            .find(|e| e.term == needle)
            .map(|e| e.tags.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Union of the genres of every term found anywhere in `text`
    pub fn match_terms_in(&self, text: &str) -> BTreeSet<GenreTag> {
        let lowered = text.to_lowercase();
        self.entries
            .iter()
            .filter(|e| lowered.contains(e.term))
            .flat_map(|e| e.tags.iter().copied())
            .collect()
    }

    /// Genre chips for a query, looser than `match_terms_in`
    ///
    /// A term also matches when a query word (2+ chars) starts with it or is
    /// the start of it, so a half-typed "thri" already offers Thriller.
    /// Each genre appears once, in table order.
    pub fn matching_genres(&self, query: &str) -> Vec<GenreInfo> {
        let lowered = query.trim().to_lowercase();
        let words: Vec<&str> = lowered
            .split_whitespace()
            .filter(|w| w.chars().count() >= 2)
            .collect();

        let mut seen = BTreeSet::new();
        let mut matching = Vec::new();

        for entry in &self.entries {
            let hit = lowered.contains(entry.term)
                || words
                    .iter()
                    .any(|w| w.starts_with(entry.term) || entry.term.starts_with(*w));

            if hit {
                for tag in entry.tags {
                    if seen.insert(*tag) {
                        matching.push(GenreInfo::for_tag(*tag));
                    }
                }
            }
        }

        matching
    }
}

fn icon_for(tag: GenreTag) -> &'static str {
    match tag {
        Horror => "👻",
        Comedy => "😂",
        Action => "💥",
        Drama => "🎭",
        SciFi => "🚀",
        Romance => "❤️",
        Thriller => "😱",
        Mystery => "🔍",
        Superhero => "🦸",
        Animation => "🎨",
        Anime => "🎌",
        Classic => "🎬",
        Family => "👨‍👩‍👧‍👦",
        Crime => "🔫",
        Adventure => "🗺️",
        Documentary => "📹",
    }
}

// "sci-fi" -> "Sci-fi"
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
