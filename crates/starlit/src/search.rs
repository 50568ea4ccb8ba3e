//! Fuzzy title search.
//!
//! Built once over all record titles; a query resolves to the index of
//! the best-scoring title, typo tolerance included. Blank queries and
//! queries that match nothing resolve to `None` so the caller can treat
//! them as silent no-ops.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// A fuzzy index over record titles.
#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    titles: Vec<String>,
}

impl TitleIndex {
    pub fn new<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            titles: titles.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolve a free-text query to the best-matching title's index.
    ///
    /// Ranking is by match score; ties break toward the earliest index so
    /// the result order is stable across runs.
    pub fn query(&self, text: &str) -> Option<usize> {
        let pattern = text.trim();
        if pattern.is_empty() {
            return None;
        }

        let matcher = SkimMatcherV2::default().smart_case();
        let mut best: Option<(i64, usize)> = None;
        for (index, title) in self.titles.iter().enumerate() {
            let Some(score) = matcher.fuzzy_match(title, pattern) else {
                continue;
            };
            if best.is_none_or(|(best_score, _)| score > best_score) {
                best = Some((score, index));
            }
        }

        best.map(|(_, index)| index)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}
