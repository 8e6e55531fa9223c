//! Case-insensitive lookup over ordered sequences of named records.
//!
//! Exact lookups use either Boyer–Moore (bad-character rule) or Knuth–Morris–Pratt
//! substring search; both implement the same containment predicate. Fuzzy
//! lookup picks the record whose whole name is closest to the pattern by
//! Levenshtein distance. Every entry point returns the first qualifying record
//! in sequence order, and an empty pattern never matches.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;

/// Edit-distance threshold used by [`SearchAlgorithm::Fuzzy`] unless overridden.
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 2;

/// Minimum normalized similarity for a name to be offered as a suggestion.
const MIN_SUGGESTION_SIMILARITY: f64 = 0.5;

/// Size of the direct-indexed part of the bad-character table.
const ALPHABET_SIZE: usize = 256;

/// A record with searchable display text.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for String {
    fn name(&self) -> &str {
        self
    }
}

impl Named for &str {
    fn name(&self) -> &str {
        self
    }
}

/// Supported lookup algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchAlgorithm {
    /// Boyer–Moore substring search.
    #[default]
    BoyerMoore,
    /// Knuth–Morris–Pratt substring search.
    Kmp,
    /// Closest whole-name match by edit distance.
    Fuzzy,
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SearchAlgorithm::BoyerMoore => "boyer-moore",
            SearchAlgorithm::Kmp => "kmp",
            SearchAlgorithm::Fuzzy => "fuzzy",
        };
        f.write_str(value)
    }
}

impl FromStr for SearchAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "boyer-moore" | "boyer_moore" | "boyermoore" | "bm" => Ok(SearchAlgorithm::BoyerMoore),
            "kmp" => Ok(SearchAlgorithm::Kmp),
            "fuzzy" | "levenshtein" => Ok(SearchAlgorithm::Fuzzy),
            _ => Err(Error::UnsupportedAlgorithm {
                kind: "search",
                name: s.to_string(),
            }),
        }
    }
}

/// A pattern prepared for repeated matching with one algorithm.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    algorithm: SearchAlgorithm,
    folded: String,
    chars: Vec<char>,
    kind: MatcherKind,
}

#[derive(Debug, Clone)]
enum MatcherKind {
    BoyerMoore(LastOccurrence),
    Kmp(Vec<usize>),
    Fuzzy { max_distance: usize },
}

impl PatternMatcher {
    pub fn new(pattern: &str, algorithm: SearchAlgorithm) -> Self {
        let folded = pattern.to_lowercase();
        let chars: Vec<char> = folded.chars().collect();
        let kind = match algorithm {
            SearchAlgorithm::BoyerMoore => MatcherKind::BoyerMoore(LastOccurrence::new(&chars)),
            SearchAlgorithm::Kmp => MatcherKind::Kmp(failure_table(&chars)),
            SearchAlgorithm::Fuzzy => MatcherKind::Fuzzy {
                max_distance: DEFAULT_MAX_EDIT_DISTANCE,
            },
        };

        Self {
            algorithm,
            folded,
            chars,
            kind,
        }
    }

    /// Override the fuzzy threshold. Has no effect on exact algorithms.
    pub fn with_max_distance(mut self, max_distance: usize) -> Self {
        if let MatcherKind::Fuzzy { max_distance: current } = &mut self.kind {
            *current = max_distance;
        }
        self
    }

    pub fn algorithm(&self) -> SearchAlgorithm {
        self.algorithm
    }

    /// Edit distance between the pattern and `text`, both lowercased.
    pub fn distance(&self, text: &str) -> usize {
        strsim::levenshtein(&self.folded, &text.to_lowercase())
    }

    /// Whether `text` satisfies the pattern: containment for exact algorithms,
    /// distance within the threshold for fuzzy.
    pub fn is_match(&self, text: &str) -> bool {
        if self.chars.is_empty() {
            return false;
        }

        match &self.kind {
            MatcherKind::BoyerMoore(last) => {
                boyer_moore_matches(&fold_chars(text), &self.chars, last)
            }
            MatcherKind::Kmp(lps) => kmp_matches(&fold_chars(text), &self.chars, lps),
            MatcherKind::Fuzzy { max_distance } => self.distance(text) <= *max_distance,
        }
    }

    /// The first record matching the pattern.
    ///
    /// For fuzzy matching this is the record with the smallest distance within
    /// the threshold; ties go to the earliest record.
    pub fn find_first<'a, T, I>(&self, records: I) -> Option<&'a T>
    where
        T: Named + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        if self.chars.is_empty() {
            return None;
        }

        match &self.kind {
            MatcherKind::Fuzzy { max_distance } => {
                let mut best: Option<(&'a T, usize)> = None;
                for record in records {
                    let distance = self.distance(record.name());
                    if distance > *max_distance {
                        continue;
                    }
                    if best.map_or(true, |(_, best_distance)| distance < best_distance) {
                        best = Some((record, distance));
                        if distance == 0 {
                            break;
                        }
                    }
                }
                best.map(|(record, _)| record)
            }
            _ => records
                .into_iter()
                .find(|record| self.is_match(record.name())),
        }
    }

    /// Every matching record in sequence order.
    pub fn find_all<'a, T, I>(&self, records: I) -> Vec<&'a T>
    where
        T: Named + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        records
            .into_iter()
            .filter(|record| self.is_match(record.name()))
            .collect()
    }
}

/// First record whose name contains `pattern` (Boyer–Moore).
pub fn boyer_moore_search<'a, T, I>(records: I, pattern: &str) -> Option<&'a T>
where
    T: Named + 'a,
    I: IntoIterator<Item = &'a T>,
{
    PatternMatcher::new(pattern, SearchAlgorithm::BoyerMoore).find_first(records)
}

/// First record whose name contains `pattern` (Knuth–Morris–Pratt).
pub fn kmp_search<'a, T, I>(records: I, pattern: &str) -> Option<&'a T>
where
    T: Named + 'a,
    I: IntoIterator<Item = &'a T>,
{
    PatternMatcher::new(pattern, SearchAlgorithm::Kmp).find_first(records)
}

/// Record whose name is closest to `pattern`, if within `max_distance` edits.
pub fn fuzzy_search<'a, T, I>(records: I, pattern: &str, max_distance: usize) -> Option<&'a T>
where
    T: Named + 'a,
    I: IntoIterator<Item = &'a T>,
{
    PatternMatcher::new(pattern, SearchAlgorithm::Fuzzy)
        .with_max_distance(max_distance)
        .find_first(records)
}

/// Dispatch to the selected algorithm with its default settings.
pub fn search<'a, T, I>(records: I, pattern: &str, algorithm: SearchAlgorithm) -> Option<&'a T>
where
    T: Named + 'a,
    I: IntoIterator<Item = &'a T>,
{
    PatternMatcher::new(pattern, algorithm).find_first(records)
}

/// Case-insensitive containment using Boyer–Moore.
pub fn boyer_moore_contains(text: &str, pattern: &str) -> bool {
    PatternMatcher::new(pattern, SearchAlgorithm::BoyerMoore).is_match(text)
}

/// Case-insensitive containment using Knuth–Morris–Pratt.
pub fn kmp_contains(text: &str, pattern: &str) -> bool {
    PatternMatcher::new(pattern, SearchAlgorithm::Kmp).is_match(text)
}

/// Unit-cost Levenshtein distance after folding case, the metric fuzzy
/// matching uses.
pub fn edit_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(&a.to_lowercase(), &b.to_lowercase())
}

/// Names similar to `pattern`, best first, for "did you mean" hints.
pub fn suggest<'a, T, I>(records: I, pattern: &str, limit: usize) -> Vec<String>
where
    T: Named + 'a,
    I: IntoIterator<Item = &'a T>,
{
    if limit == 0 || pattern.is_empty() {
        return Vec::new();
    }

    let folded = pattern.to_lowercase();
    let mut scored: Vec<(f64, &str)> = Vec::new();
    for record in records {
        let name = record.name();
        if scored.iter().any(|(_, seen)| *seen == name) {
            continue;
        }
        let score = strsim::normalized_levenshtein(&folded, &name.to_lowercase());
        if score >= MIN_SUGGESTION_SIMILARITY {
            scored.push((score, name));
        }
    }

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, name)| name.to_string())
        .collect()
}

fn fold_chars(text: &str) -> Vec<char> {
    text.to_lowercase().chars().collect()
}

/// Last index of each character in the pattern, `-1` when absent.
#[derive(Debug, Clone)]
struct LastOccurrence {
    table: [isize; ALPHABET_SIZE],
    overflow: HashMap<char, isize>,
}

impl LastOccurrence {
    fn new(pattern: &[char]) -> Self {
        let mut table = [-1isize; ALPHABET_SIZE];
        let mut overflow = HashMap::new();
        for (index, &c) in pattern.iter().enumerate() {
            let code = c as usize;
            if code < ALPHABET_SIZE {
                table[code] = index as isize;
            } else {
                overflow.insert(c, index as isize);
            }
        }
        Self { table, overflow }
    }

    fn get(&self, c: char) -> isize {
        let code = c as usize;
        if code < ALPHABET_SIZE {
            self.table[code]
        } else {
            self.overflow.get(&c).copied().unwrap_or(-1)
        }
    }
}

fn boyer_moore_matches(text: &[char], pattern: &[char], last: &LastOccurrence) -> bool {
    let n = text.len();
    let m = pattern.len();
    if m == 0 || m > n {
        return false;
    }

    let mut shift = 0usize;
    while shift <= n - m {
        let mut j = m as isize - 1;
        while j >= 0 && pattern[j as usize] == text[shift + j as usize] {
            j -= 1;
        }
        if j < 0 {
            return true;
        }

        let mismatched = text[shift + j as usize];
        shift += (j - last.get(mismatched)).max(1) as usize;
    }

    false
}

/// Longest proper prefix that is also a suffix, for each pattern prefix.
fn failure_table(pattern: &[char]) -> Vec<usize> {
    let mut lps = vec![0usize; pattern.len()];
    let mut len = 0usize;
    let mut i = 1usize;

    while i < pattern.len() {
        if pattern[i] == pattern[len] {
            len += 1;
            lps[i] = len;
            i += 1;
        } else if len != 0 {
            len = lps[len - 1];
        } else {
            lps[i] = 0;
            i += 1;
        }
    }

    lps
}

fn kmp_matches(text: &[char], pattern: &[char], lps: &[usize]) -> bool {
    if pattern.is_empty() || pattern.len() > text.len() {
        return false;
    }

    let mut j = 0usize;
    for &c in text {
        while j > 0 && c != pattern[j] {
            j = lps[j - 1];
        }
        if c == pattern[j] {
            j += 1;
            if j == pattern.len() {
                return true;
            }
        }
    }

    false
}
