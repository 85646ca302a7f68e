//! Ranked company/ticker search over the in-memory dataset.
//!
//! Every record falls into at most one [`MatchBucket`]: the first one it
//! satisfies, checked from the strongest (exact ticker) to the weakest
//! (company-name substring). Results are the buckets concatenated in that
//! order, dataset order preserved inside each bucket, truncated to the
//! configured limit.
//!
//! ```rust
//! use valuora_core::{search, TickerRecord};
//!
//! let dataset = vec![
//!     TickerRecord::new("AAPL2", "Apple Holdings"),
//!     TickerRecord::new("AAPL", "Apple Inc."),
//! ];
//!
//! let ranked = search::rank(" aapl ", &dataset);
//! assert_eq!(ranked[0].symbol, "AAPL");
//! assert_eq!(ranked[1].symbol, "AAPL2");
//! ```

use serde::Serialize;

use crate::TickerRecord;

/// Hard cap on the number of records a search returns.
pub const MAX_RESULTS: usize = 50;

const EARLY_EXIT_SYMBOL_MATCHES: usize = 100;
const EARLY_EXIT_MIN_QUERY_CHARS: usize = 4;

/// Why a record matched, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchBucket {
    ExactSymbol,
    SymbolPrefix,
    SymbolContains,
    NamePrefix,
    NameAllWords,
    NameContains,
}

impl MatchBucket {
    pub const ALL: [Self; 6] = [
        Self::ExactSymbol,
        Self::SymbolPrefix,
        Self::SymbolContains,
        Self::NamePrefix,
        Self::NameAllWords,
        Self::NameContains,
    ];

    const fn index(self) -> usize {
        match self {
            Self::ExactSymbol => 0,
            Self::SymbolPrefix => 1,
            Self::SymbolContains => 2,
            Self::NamePrefix => 3,
            Self::NameAllWords => 4,
            Self::NameContains => 5,
        }
    }

    pub const fn is_symbol_match(self) -> bool {
        matches!(
            self,
            Self::ExactSymbol | Self::SymbolPrefix | Self::SymbolContains
        )
    }
}

/// Tuning knobs for [`rank_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub limit: usize,
    /// Stop scanning once the symbol buckets hold enough records for a
    /// long query. Skips work on large datasets and may miss later exact
    /// matches.
    pub early_exit: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: MAX_RESULTS,
            early_exit: false,
        }
    }
}

impl SearchOptions {
    /// Limit is clamped into `1..=MAX_RESULTS`.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.clamp(1, MAX_RESULTS);
        self
    }

    /// Opt into the early-exit scan. Exact tickers past the cutoff are
    /// not guaranteed to rank first.
    pub fn fast(mut self) -> Self {
        self.early_exit = true;
        self
    }
}

/// A ranked record together with the bucket that placed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankedMatch<'a> {
    #[serde(flatten)]
    pub record: &'a TickerRecord,
    pub bucket: MatchBucket,
}

/// Result of a user-facing search, including the manual-entry fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// Blank query; nothing was searched.
    Empty,
    Matches { results: Vec<TickerRecord> },
    /// Nothing matched. The caller can offer `fallback` for manual entry.
    Unavailable { fallback: TickerRecord },
}

impl SearchOutcome {
    pub fn records(&self) -> &[TickerRecord] {
        match self {
            Self::Matches { results } => results,
            Self::Unavailable { fallback } => std::slice::from_ref(fallback),
            Self::Empty => &[],
        }
    }

    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

struct PreparedQuery {
    needle: String,
    words: Vec<String>,
    char_len: usize,
}

impl PreparedQuery {
    fn new(query: &str) -> Option<Self> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }

        let needle = trimmed.to_lowercase();
        let words = needle.split_whitespace().map(str::to_owned).collect();
        Some(Self {
            char_len: trimmed.chars().count(),
            needle,
            words,
        })
    }

    fn classify(&self, record: &TickerRecord) -> Option<MatchBucket> {
        let symbol = record.symbol.to_lowercase();
        if symbol == self.needle {
            return Some(MatchBucket::ExactSymbol);
        }
        if symbol.starts_with(&self.needle) {
            return Some(MatchBucket::SymbolPrefix);
        }
        if symbol.contains(&self.needle) {
            return Some(MatchBucket::SymbolContains);
        }

        let name = record.company_name.to_lowercase();
        if name.starts_with(&self.needle) {
            return Some(MatchBucket::NamePrefix);
        }
        if self.words.len() >= 2 && self.words.iter().all(|word| name.contains(word.as_str())) {
            return Some(MatchBucket::NameAllWords);
        }
        if name.contains(&self.needle) {
            return Some(MatchBucket::NameContains);
        }

        None
    }

    fn allows_early_exit(&self) -> bool {
        self.char_len >= EARLY_EXIT_MIN_QUERY_CHARS
    }
}

/// Bucket a single record would land in for `query`, if any.
pub fn classify(query: &str, record: &TickerRecord) -> Option<MatchBucket> {
    PreparedQuery::new(query)?.classify(record)
}

/// Rank `dataset` against `query` with default options.
pub fn rank<'a>(query: &str, dataset: &'a [TickerRecord]) -> Vec<&'a TickerRecord> {
    rank_with(query, dataset, SearchOptions::default())
        .into_iter()
        .map(|ranked| ranked.record)
        .collect()
}

/// Rank `dataset` against `query`, keeping the bucket of each hit.
pub fn rank_with<'a>(
    query: &str,
    dataset: &'a [TickerRecord],
    options: SearchOptions,
) -> Vec<RankedMatch<'a>> {
    let Some(prepared) = PreparedQuery::new(query) else {
        return Vec::new();
    };

    let mut buckets: [Vec<&'a TickerRecord>; 6] = Default::default();
    let early_exit = options.early_exit && prepared.allows_early_exit();

    for record in dataset {
        let Some(bucket) = prepared.classify(record) else {
            continue;
        };
        buckets[bucket.index()].push(record);

        if early_exit && bucket.is_symbol_match() {
            let symbol_hits: usize = buckets[..3].iter().map(Vec::len).sum();
            if symbol_hits >= EARLY_EXIT_SYMBOL_MATCHES {
                break;
            }
        }
    }

    let limit = options.limit.clamp(1, MAX_RESULTS);
    MatchBucket::ALL
        .iter()
        .flat_map(|bucket| {
            buckets[bucket.index()]
                .iter()
                .map(move |record| RankedMatch {
                    record: *record,
                    bucket: *bucket,
                })
        })
        .take(limit)
        .collect()
}

/// Search with the manual-entry fallback applied.
pub fn search(query: &str, dataset: &[TickerRecord], options: SearchOptions) -> SearchOutcome {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return SearchOutcome::Empty;
    }

    let results: Vec<TickerRecord> = rank_with(trimmed, dataset, options)
        .into_iter()
        .map(|ranked| ranked.record.clone())
        .collect();

    if results.is_empty() {
        SearchOutcome::Unavailable {
            fallback: TickerRecord::unavailable(trimmed),
        }
    } else {
        SearchOutcome::Matches { results }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(symbol: &str, name: &str) -> TickerRecord {
        TickerRecord::new(symbol, name)
    }

    #[test]
    fn classifies_each_bucket_in_precedence_order() {
        let cases = [
            ("msft", record("MSFT", "Microsoft Corporation"), MatchBucket::ExactSymbol),
            ("ms", record("MSFT", "Microsoft Corporation"), MatchBucket::SymbolPrefix),
            ("sf", record("MSFT", "Microsoft Corporation"), MatchBucket::SymbolContains),
            ("micro", record("MSFT", "Microsoft Corporation"), MatchBucket::NamePrefix),
            ("corp micro", record("MSFT", "Microsoft Corporation"), MatchBucket::NameAllWords),
            ("soft", record("MSFT", "Microsoft Corporation"), MatchBucket::NameContains),
        ];

        for (query, record, expected) in cases {
            assert_eq!(classify(query, &record), Some(expected), "query {query:?}");
        }
    }

    #[test]
    fn symbol_match_wins_over_name_match() {
        let target = record("APPL", "Apple Inc.");
        assert_eq!(classify("app", &target), Some(MatchBucket::SymbolPrefix));
    }

    #[test]
    fn single_word_query_never_uses_all_words_bucket() {
        let target = record("XYZ", "Alpha Beta");
        assert_eq!(classify("beta", &target), Some(MatchBucket::NameContains));
    }

    #[test]
    fn blank_query_classifies_nothing() {
        assert_eq!(classify("  ", &record("A", "Agilent")), None);
        assert!(rank("\t", &[record("A", "Agilent")]).is_empty());
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(SearchOptions::default().with_limit(0).limit, 1);
        assert_eq!(SearchOptions::default().with_limit(500).limit, MAX_RESULTS);
    }

    #[test]
    fn early_exit_stops_after_enough_symbol_hits() {
        let mut dataset: Vec<TickerRecord> = (0..120)
            .map(|i| record(&format!("ABCD{i}"), "Filler"))
            .collect();
        dataset.push(record("ABCD", "Exact Match Co"));

        let fast = rank_with("abcd", &dataset, SearchOptions::default().fast());
        assert!(fast.iter().all(|hit| hit.bucket == MatchBucket::SymbolPrefix));

        let full = rank_with("abcd", &dataset, SearchOptions::default());
        assert_eq!(full[0].record.symbol, "ABCD");
        assert_eq!(full.len(), MAX_RESULTS);
    }

    #[test]
    fn default_rank_puts_late_exact_ticker_first() {
        let mut dataset: Vec<TickerRecord> = (0..100)
            .map(|i| record(&format!("ABCD{i}"), "Filler"))
            .collect();
        dataset.push(record("ABCD", "Exact Match Co"));

        let ranked = rank("abcd", &dataset);
        assert_eq!(ranked[0].symbol, "ABCD");
        assert_eq!(ranked.len(), MAX_RESULTS);
    }

    #[test]
    fn short_queries_never_exit_early() {
        let mut dataset: Vec<TickerRecord> = (0..150)
            .map(|i| record(&format!("AB{i}"), "Filler"))
            .collect();
        dataset.push(record("AB", "Exact"));

        let ranked = rank_with("ab", &dataset, SearchOptions::default().fast());
        assert_eq!(ranked[0].record.symbol, "AB");
    }

    #[test]
    fn search_outcome_offers_fallback_with_trimmed_query() {
        let outcome = search("  Acme Widgets ", &[record("MSFT", "Microsoft")], SearchOptions::default());
        match outcome {
            SearchOutcome::Unavailable { fallback } => {
                assert!(fallback.is_unavailable());
                assert_eq!(fallback.company_name, "Acme Widgets");
            }
            other => panic!("expected fallback, got {other:?}"),
        }
    }

    #[test]
    fn search_outcome_is_empty_for_blank_query() {
        let outcome = search("", &[record("MSFT", "Microsoft")], SearchOptions::default());
        assert_eq!(outcome, SearchOutcome::Empty);
        assert!(outcome.records().is_empty());
    }
}
