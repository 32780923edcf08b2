//! Tag and alt-text relevance ranking for image search.
//!
//! Each whitespace-separated query token earns points from the first rule it
//! satisfies:
//!
//! | rule | points |
//! |---|---|
//! | a tag equals the token | 10 |
//! | a tag contains the token | 5 |
//! | the alt text contains the token | 3 |
//! | tags and alt text joined by spaces contain the token | 1 |
//!
//! Matching is case-insensitive. Items scoring zero are dropped, the rest are
//! sorted by descending score with ties kept in collection order.

use serde::{Deserialize, Serialize};

use crate::id::EntryId;

/// Default page size for search results.
pub const DEFAULT_LIMIT: usize = 8;

const EXACT_TAG: u32 = 10;
const PARTIAL_TAG: u32 = 5;
const ALT_TEXT: u32 = 3;
const ANY_TEXT: u32 = 1;

/// A searchable image record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedItem {
    pub id: EntryId,
    pub url: String,
    pub alt: String,
    pub tags: Vec<String>,
}

/// Lower-cased view of an item, built once per search.
struct Normalized {
    tags: Vec<String>,
    alt: String,
    all_text: String,
}

impl Normalized {
    fn new(item: &TaggedItem) -> Self {
        let tags: Vec<String> = item.tags.iter().map(|t| t.to_lowercase()).collect();
        let alt = item.alt.to_lowercase();
        let mut all_text = tags.join(" ");
        all_text.push(' ');
        all_text.push_str(&alt);
        Self {
            tags,
            alt,
            all_text,
        }
    }

    fn token_score(&self, token: &str) -> u32 {
        if self.tags.iter().any(|t| t == token) {
            EXACT_TAG
        } else if self.tags.iter().any(|t| t.contains(token)) {
            PARTIAL_TAG
        } else if self.alt.contains(token) {
            ALT_TEXT
        } else if self.all_text.contains(token) {
            ANY_TEXT
        } else {
            0
        }
    }
}

/// Split a query into lower-case tokens.
pub fn tokenize(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

/// Score of `item` against already-tokenized `tokens`.
pub fn score(item: &TaggedItem, tokens: &[String]) -> u32 {
    let normalized = Normalized::new(item);
    tokens.iter().map(|t| normalized.token_score(t)).sum()
}

/// Ranks tagged items against free-text queries.
#[derive(Debug, Clone, Copy)]
pub struct RelevanceScorer {
    limit: usize,
}

impl RelevanceScorer {
    /// Scorer returning at most `limit` items (at least one).
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Rank `items` against `query`.
    ///
    /// A blank query returns the first `limit` items unscored, in order.
    pub fn search<'a>(&self, items: &'a [TaggedItem], query: &str) -> Vec<&'a TaggedItem> {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return items.iter().take(self.limit).collect();
        }
        self.rank(items, &tokens)
    }

    /// Rank `items` against already-tokenized `tokens`: zero scores dropped,
    /// highest first, collection order among ties, at most `limit` results.
    pub fn rank<'a>(&self, items: &'a [TaggedItem], tokens: &[String]) -> Vec<&'a TaggedItem> {
        let mut scored: Vec<(u32, &TaggedItem)> = items
            .iter()
            .map(|item| (score(item, tokens), item))
            .filter(|(s, _)| *s > 0)
            .collect();
        // Stable sort keeps collection order among equal scores.
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        tracing::debug!(
            tokens = tokens.len(),
            matched = scored.len(),
            limit = self.limit,
            "ranked items"
        );

        scored
            .into_iter()
            .take(self.limit)
            .map(|(_, item)| item)
            .collect()
    }
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}
