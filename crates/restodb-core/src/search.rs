// crates/restodb-core/src/search.rs

//! Fuzzy title search.
//!
//! Similarity is the Ratcliff/Obershelp "gestalt" ratio: find the longest
//! common contiguous block, recurse on both sides of it, and score
//! `2·M / (|a| + |b|)` where `M` is the total length of all blocks found.
//! Scores live in `[0, 1]`; `1.0` means identical.
//!
//! Comparison is on Unicode scalar values and case-sensitive unless
//! [`SearchOptions::fold`] is set.

use crate::error::{RestoError, Result};
use crate::model::{Restaurant, RestaurantDb};
use crate::text::fold_key;
use std::collections::{HashMap, HashSet};

pub const DEFAULT_LIMIT: usize = 5;
/// Minimum similarity for a title to count as a match.
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Maximum number of distinct titles returned.
    pub limit: usize,
    pub min_similarity: f64,
    /// Compare case- and accent-folded forms.
    pub fold: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            min_similarity: DEFAULT_MIN_SIMILARITY,
            fold: false,
        }
    }
}

impl SearchOptions {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_similarity) {
            return Err(RestoError::InvalidArgument(format!(
                "min_similarity must be within [0, 1], got {}",
                self.min_similarity
            )));
        }
        Ok(())
    }
}

/// Similarity ratio between `a` and `b`.
///
/// ```rust
/// use restodb_core::search::similarity;
///
/// assert_eq!(similarity("abcd", "bcde"), 0.75);
/// assert_eq!(similarity("", ""), 1.0);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio(&a, &b)
}

fn ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(a, b) as f64 / total as f64
}

/// Upper bound on [`ratio`] from character multiset overlap.
fn quick_ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let mut avail: HashMap<char, isize> = HashMap::new();
    for &c in b {
        *avail.entry(c).or_insert(0) += 1;
    }
    let mut matches = 0usize;
    for &c in a {
        let n = avail.entry(c).or_insert(0);
        if *n > 0 {
            matches += 1;
        }
        *n -= 1;
    }
    2.0 * matches as f64 / total as f64
}

/// Total size of the matching blocks between `a` and `b`.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        total += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }
    total
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, len)`.
///
/// Ties go to the block that starts earliest in `a`, then earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best) = (alo, blo, 0);
    // prev[j] = length of the common suffix ending at a[i-1], b[j-1]
    let width = bhi - blo;
    let mut prev = vec![0usize; width + 1];
    let mut cur = vec![0usize; width + 1];
    for i in alo..ahi {
        for j in blo..bhi {
            let col = j - blo + 1;
            if a[i] == b[j] {
                let k = prev[col - 1] + 1;
                cur[col] = k;
                if k > best {
                    best = k;
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                }
            } else {
                cur[col] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    (best_i, best_j, best)
}

/// A ranked candidate: index of its first occurrence plus its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked {
    pub index: usize,
    pub score: f64,
}

/// Ranks `titles` against `query`.
///
/// Duplicate titles are scored once, at their first occurrence. Candidates
/// scoring below `opts.min_similarity` are dropped; the rest are ordered by
/// score descending with ties kept in input order, then truncated to
/// `opts.limit`.
pub fn rank<S: AsRef<str>>(query: &str, titles: &[S], opts: &SearchOptions) -> Vec<Ranked> {
    if query.trim().is_empty() || opts.limit == 0 {
        return Vec::new();
    }

    let fold = |s: &str| -> Vec<char> {
        if opts.fold {
            fold_key(s).chars().collect()
        } else {
            s.chars().collect()
        }
    };
    let q = fold(query);

    let mut seen: HashSet<&str> = HashSet::new();
    let mut hits: Vec<Ranked> = Vec::new();
    for (index, title) in titles.iter().enumerate() {
        let title = title.as_ref();
        if !seen.insert(title) {
            continue;
        }
        let candidate = fold(title);
        // Cheap upper bound first; most titles stop here.
        if quick_ratio(&candidate, &q) < opts.min_similarity {
            continue;
        }
        let score = ratio(&candidate, &q);
        if score >= opts.min_similarity {
            hits.push(Ranked { index, score });
        }
    }

    // Stable: equal scores keep input order.
    hits.sort_by(|x, y| y.score.total_cmp(&x.score));
    hits.truncate(opts.limit);
    hits
}

/// The `limit` titles most similar to `query`, best first.
///
/// Returns an empty vector for an empty query or when nothing reaches
/// `min_similarity`. Every returned title is a member of `titles`.
pub fn search<S: AsRef<str>>(
    query: &str,
    titles: &[S],
    limit: usize,
    min_similarity: f64,
) -> Vec<String> {
    let opts = SearchOptions {
        limit,
        min_similarity,
        ..SearchOptions::default()
    };
    search_with(query, titles, &opts)
}

pub fn search_with<S: AsRef<str>>(query: &str, titles: &[S], opts: &SearchOptions) -> Vec<String> {
    rank(query, titles, opts)
        .into_iter()
        .map(|r| titles[r.index].as_ref().to_string())
        .collect()
}

/// One matched title with every record carrying it.
#[derive(Debug, Clone)]
pub struct TitleMatch<'a> {
    pub title: &'a str,
    pub score: f64,
    /// Dataset order.
    pub records: Vec<&'a Restaurant>,
}

/// Ranked matches for one query. Empty means "no results", not an error.
#[derive(Debug, Clone, Default)]
pub struct MatchResult<'a> {
    pub matches: Vec<TitleMatch<'a>>,
}

impl<'a> MatchResult<'a> {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn titles(&self) -> Vec<&'a str> {
        self.matches.iter().map(|m| m.title).collect()
    }

    /// Records across all matched titles.
    pub fn record_count(&self) -> usize {
        self.matches.iter().map(|m| m.records.len()).sum()
    }

    /// Matched records, grouped by title in rank order.
    pub fn records(&self) -> impl Iterator<Item = &'a Restaurant> + '_ {
        self.matches.iter().flat_map(|m| m.records.iter().copied())
    }

    pub fn get(&self, title: &str) -> Option<&TitleMatch<'a>> {
        self.matches.iter().find(|m| m.title == title)
    }
}

impl RestaurantDb {
    /// Fuzzy-search record titles and expand each match to its records.
    pub fn find_matches(&self, query: &str, opts: &SearchOptions) -> Result<MatchResult<'_>> {
        opts.validate()?;
        let titles = self.titles();
        let ranked = rank(query, &titles, opts);

        let mut matches: Vec<TitleMatch<'_>> = ranked
            .into_iter()
            .map(|r| TitleMatch {
                title: titles[r.index],
                score: r.score,
                records: Vec::new(),
            })
            .collect();

        let slot: HashMap<&str, usize> = matches
            .iter()
            .enumerate()
            .map(|(i, m)| (m.title, i))
            .collect();
        for record in &self.records {
            if let Some(&i) = slot.get(record.title.as_str()) {
                matches[i].records.push(record);
            }
        }

        tracing::debug!(query, hits = matches.len(), "title search");
        Ok(MatchResult { matches })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_follows_matching_blocks() {
        // "McD" + "nalds" matched, "o" unmatched: 2*8 / 17
        assert!((similarity("McDonalds", "McDnalds") - 16.0 / 17.0).abs() < 1e-12);
        assert_eq!(similarity("abc", "xyz"), 0.0);
        assert_eq!(similarity("same", "same"), 1.0);
    }

    #[test]
    fn longest_match_prefers_earliest_block() {
        let a: Vec<char> = "abxab".chars().collect();
        let b: Vec<char> = "ab".chars().collect();
        assert_eq!(longest_match(&a, &b, 0, a.len(), 0, b.len()), (0, 0, 2));
    }

    #[test]
    fn quick_ratio_bounds_ratio() {
        for (x, y) in [("kitten", "sitting"), ("Wendys", "McDnalds"), ("ab", "ba")] {
            let a: Vec<char> = x.chars().collect();
            let b: Vec<char> = y.chars().collect();
            assert!(quick_ratio(&a, &b) >= ratio(&a, &b));
        }
    }

    #[test]
    fn empty_query_or_zero_limit_yields_nothing() {
        let titles = ["McDonalds"];
        assert!(search("", &titles, 5, 0.6).is_empty());
        assert!(search("   ", &titles, 5, 0.6).is_empty());
        assert!(search("McDonalds", &titles, 0, 0.6).is_empty());
    }

    #[test]
    fn surrounding_whitespace_counts_toward_the_ratio() {
        let ranked = rank("  abc ", &["abc"], &SearchOptions::default());
        assert_eq!(ranked.len(), 1);
        // 2*3 / (6 + 3)
        assert!((ranked[0].score - 6.0 / 9.0).abs() < 1e-12);
        assert_eq!(similarity("  abc ", "abc"), ranked[0].score);
    }

    #[test]
    fn duplicates_are_reported_once() {
        let titles = ["Subway", "Subway", "Subways"];
        assert_eq!(search("Subway", &titles, 5, 0.6), ["Subway", "Subways"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let titles = ["Cafe B", "Cafe A", "Cafe C"];
        assert_eq!(search("Cafe", &titles, 2, 0.6), ["Cafe B", "Cafe A"]);
    }

    #[test]
    fn folding_is_opt_in() {
        let titles = ["CAFÉ ROMA"];
        assert!(search("cafe roma", &titles, 5, 0.6).is_empty());
        let opts = SearchOptions {
            fold: true,
            ..SearchOptions::default()
        };
        assert_eq!(search_with("cafe roma", &titles, &opts), ["CAFÉ ROMA"]);
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let opts = SearchOptions {
            min_similarity: 1.5,
            ..SearchOptions::default()
        };
        assert!(matches!(opts.validate(), Err(RestoError::InvalidArgument(_))));
        assert!(SearchOptions::default().validate().is_ok());
    }
}
