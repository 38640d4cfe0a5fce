use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use std::ops::Range;

/// A successful fuzzy match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyMatch {
    pub score: u32,
    /// Matched character positions in the candidate, ascending.
    pub indices: Vec<u32>,
}

impl FuzzyMatch {
    /// Matched positions merged into contiguous character ranges.
    #[must_use]
    pub fn highlight_ranges(&self) -> Vec<Range<usize>> {
        highlight_ranges(&self.indices)
    }
}

/// Scores a candidate string against a query.
pub trait FuzzyScorer {
    /// `None` when the candidate does not match.
    fn score(&mut self, query: &str, candidate: &str) -> Option<FuzzyMatch>;
}

/// Fuzzy scorer using nucleo
pub struct NucleoScorer {
    matcher: Matcher,
    pattern: Option<(String, Pattern)>,
    buf: Vec<char>,
}

impl NucleoScorer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
            pattern: None,
            buf: Vec::new(),
        }
    }

    /// Reuse the parsed pattern while the query stays the same.
    fn pattern_for<'p>(pattern: &'p mut Option<(String, Pattern)>, query: &str) -> &'p Pattern {
        if pattern.as_ref().is_some_and(|(cached, _)| cached != query) {
            *pattern = None;
        }
        let (_, parsed) = pattern.get_or_insert_with(|| {
            (
                query.to_string(),
                Pattern::new(
                    query,
                    CaseMatching::Smart,
                    Normalization::Smart,
                    AtomKind::Fuzzy,
                ),
            )
        });
        parsed
    }
}

impl Default for NucleoScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyScorer for NucleoScorer {
    fn score(&mut self, query: &str, candidate: &str) -> Option<FuzzyMatch> {
        let Self {
            matcher,
            pattern,
            buf,
        } = self;
        let pattern = Self::pattern_for(pattern, query);

        let mut indices = Vec::new();
        let haystack = Utf32Str::new(candidate, buf);
        let score = pattern.indices(haystack, matcher, &mut indices)?;

        indices.sort_unstable();
        indices.dedup();
        Some(FuzzyMatch { score, indices })
    }
}

/// Merge sorted character indices into half-open ranges.
#[must_use]
pub fn highlight_ranges(indices: &[u32]) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = Vec::new();
    for &idx in indices {
        let idx = idx as usize;
        match ranges.last_mut() {
            Some(last) if last.end == idx => last.end = idx + 1,
            _ => ranges.push(idx..idx + 1),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_match() {
        let mut scorer = NucleoScorer::new();
        let m = scorer.score("tod", "Today notes").unwrap();
        assert!(m.score > 0);
        assert_eq!(m.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_no_match() {
        let mut scorer = NucleoScorer::new();
        assert!(scorer.score("xyz", "Today notes").is_none());
    }

    #[test]
    fn test_smart_case() {
        let mut scorer = NucleoScorer::new();
        assert!(scorer.score("work", "Work projects").is_some());
        assert!(scorer.score("Work", "work projects").is_none());
    }

    #[test]
    fn test_better_match_scores_higher() {
        let mut scorer = NucleoScorer::new();
        let exact = scorer.score("inbox", "Inbox").unwrap();
        let scattered = scorer.score("inbox", "in a box").unwrap();
        assert!(exact.score > scattered.score);
    }

    #[test]
    fn test_pattern_cache_follows_query() {
        let mut scorer = NucleoScorer::new();
        assert!(scorer.score("abc", "abc").is_some());
        assert!(scorer.score("zzz", "abc").is_none());
        assert!(scorer.score("abc", "abc").is_some());
    }

    #[test]
    fn test_highlight_ranges_merge() {
        assert_eq!(highlight_ranges(&[0, 1, 2, 5, 7, 8]), vec![0..3, 5..6, 7..9]);
        assert!(highlight_ranges(&[]).is_empty());
    }

    #[test]
    fn test_match_highlight_ranges() {
        let mut scorer = NucleoScorer::new();
        let m = scorer.score("nt", "notes").unwrap();
        let ranges = m.highlight_ranges();
        assert_eq!(ranges.iter().map(ExactSizeIterator::len).sum::<usize>(), 2);
    }
}
