//! Word-level scorers used to rank candidates when no slug matches exactly.

use std::collections::HashSet;

use serde::Serialize;

use crate::slug::normalize_to_words;

/// Penalty weight for candidate words the query did not match.
const UNMATCHED_CANDIDATE_WEIGHT: f64 = 0.4;
const WORD_MATCH_THRESHOLD: f64 = 0.8;
const PREFIX_WORD_SIMILARITY: f64 = 0.85;
const MIN_COMMON_PREFIX: usize = 3;

const EDITION_BONUS: i64 = 100;
const SEQUEL_PENALTY: i64 = -10;
const NON_SEQUEL_BONUS: i64 = 20;

/// Fragments that mark a re-release rather than a different game.
const EDITION_PATTERNS: &[&str] = &[
    "se",
    "special",
    "specialedition",
    "remaster",
    "remastered",
    "directorscut",
    "ultimate",
    "gold",
    "goty",
    "deluxe",
    "definitive",
    "enhanced",
    "cd32",
    "cdtv",
    "aga",
    "missiondisk",
    "expansion",
    "addon",
];

const SEQUEL_NUMERALS: &[&str] = &[
    "2", "3", "4", "5", "6", "7", "8", "9", "ii", "iii", "iv", "v", "vi", "vii", "viii", "ix", "x",
];

/// A slug found by prefix lookup together with its rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrefixMatchCandidate {
    pub slug: String,
    pub score: i64,
}

// ── Word helpers ────────────────────────────────────────────────

/// Lowercase ASCII words of an already-normalized string; anything outside
/// `[a-z0-9]` separates words.
pub fn tokenize_slug_words(s: &str) -> Vec<String> {
    s.to_ascii_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether `candidate` begins with every word of `query`, in order.
pub fn starts_with_word_sequence(candidate: &[String], query: &[String]) -> bool {
    candidate.len() >= query.len() && candidate.iter().zip(query).all(|(c, q)| c == q)
}

/// Words with duplicates removed, first occurrence kept.
pub fn unique_words(words: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    words
        .iter()
        .filter(|w| seen.insert(w.as_str()))
        .cloned()
        .collect()
}

/// Words of `a` that also occur in `b`.
pub fn intersect_words(a: &[String], b: &[String]) -> Vec<String> {
    let b: HashSet<&str> = b.iter().map(String::as_str).collect();
    a.iter().filter(|w| b.contains(w.as_str())).cloned().collect()
}

/// Words of `a` that do not occur in `b`.
pub fn difference_words(a: &[String], b: &[String]) -> Vec<String> {
    let b: HashSet<&str> = b.iter().map(String::as_str).collect();
    a.iter().filter(|w| !b.contains(w.as_str())).cloned().collect()
}

// ── Token scoring ───────────────────────────────────────────────

/// 1.0 for equal words, 0.85 for a shared three-character prefix when the
/// longer word is at most twice the shorter, else 0.
fn word_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let (a_len, b_len) = (a.chars().count(), b.chars().count());
    let (shorter, longer) = (a_len.min(b_len), a_len.max(b_len));
    if shorter < MIN_COMMON_PREFIX || longer > shorter * 2 {
        return 0.0;
    }
    let common_prefix = a
        .chars()
        .zip(b.chars())
        .take(MIN_COMMON_PREFIX)
        .all(|(x, y)| x == y);
    if common_prefix {
        PREFIX_WORD_SIMILARITY
    } else {
        0.0
    }
}

fn asymmetric_ratio(matched: usize, query_words: usize, unmatched_candidate: usize) -> f64 {
    let denominator = query_words as f64 + unmatched_candidate as f64 * UNMATCHED_CANDIDATE_WEIGHT;
    if denominator == 0.0 {
        return 0.0;
    }
    matched as f64 / denominator
}

/// Greedy word alignment: each query word takes the best unused candidate
/// word scoring above 0.8.
///
/// Score is `matched / (query_words + 0.4 * unmatched_candidate_words)`, so
/// extra candidate words cost less than missing query words. Word order does
/// not matter: "Link Awakening" matches "Awakening of Link".
pub fn score_token_match(query: &str, candidate: &str) -> f64 {
    let query_words = normalize_to_words(query);
    let candidate_words = normalize_to_words(candidate);
    if query_words.is_empty() || candidate_words.is_empty() {
        return 0.0;
    }

    let mut used = vec![false; candidate_words.len()];
    let mut matched = 0;
    for query_word in &query_words {
        let best = candidate_words
            .iter()
            .enumerate()
            .filter(|(i, _)| !used[*i])
            .map(|(i, word)| (i, word_similarity(query_word, word)))
            .fold(None, |best: Option<(usize, f64)>, (i, score)| match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((i, score)),
            });

        if let Some((i, score)) = best {
            if score > WORD_MATCH_THRESHOLD {
                used[i] = true;
                matched += 1;
            }
        }
    }

    let unmatched = used.iter().filter(|u| !**u).count();
    asymmetric_ratio(matched, query_words.len(), unmatched)
}

/// Like [`score_token_match`] over deduplicated word sets with exact word
/// equality.
pub fn score_token_set_ratio(query: &str, candidate: &str) -> f64 {
    let query_words = unique_words(&normalize_to_words(query));
    let candidate_words = unique_words(&normalize_to_words(candidate));
    if query_words.is_empty() || candidate_words.is_empty() {
        return 0.0;
    }

    let common = intersect_words(&query_words, &candidate_words).len();
    let unmatched = difference_words(&candidate_words, &query_words).len();
    asymmetric_ratio(common, query_words.len(), unmatched)
}

// ── Prefix scoring ──────────────────────────────────────────────

/// The part of the candidate that distinguishes it from the query: what
/// follows the query when it is a prefix, otherwise a trailing number or the
/// whole slug.
fn distinguishing_tail<'a>(query_slug: &str, candidate_slug: &'a str) -> &'a str {
    if let Some(tail) = candidate_slug.strip_prefix(query_slug) {
        if !tail.is_empty() {
            return tail;
        }
    }
    let digits = candidate_slug
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i);
    match digits {
        Some(start) => &candidate_slug[start..],
        None => candidate_slug,
    }
}

/// Whether the tail splits entirely into edition markers ("se",
/// "remasteredgoty"). A tail that merely contains one ("universe") does not
/// count.
fn is_edition_like(tail: &str) -> bool {
    let bytes = tail.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    // reachable[i]: the first i bytes are a run of markers.
    let mut reachable = vec![false; bytes.len() + 1];
    reachable[0] = true;
    for i in 0..bytes.len() {
        if !reachable[i] {
            continue;
        }
        for pattern in EDITION_PATTERNS {
            if bytes[i..].starts_with(pattern.as_bytes()) {
                reachable[i + pattern.len()] = true;
            }
        }
    }
    reachable[bytes.len()]
}

fn is_sequel_like(tail: &str) -> bool {
    (!tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()))
        || SEQUEL_NUMERALS.contains(&tail)
}

/// Rank a prefix match: an edition-like tail earns +100, a sequel-like tail
/// costs 10 where any other tail earns 20, minus the length difference.
///
/// ```
/// use mediaslug_core::scoring::score_prefix_candidate;
///
/// assert_eq!(score_prefix_candidate("alienbreed", "alienbreedse"), 118);
/// assert_eq!(score_prefix_candidate("alienbreed", "alienbreed2"), -11);
/// ```
pub fn score_prefix_candidate(query_slug: &str, candidate_slug: &str) -> i64 {
    let candidate = candidate_slug.to_lowercase();
    let tail = distinguishing_tail(query_slug, &candidate);

    let mut score = 0;
    if is_edition_like(tail) {
        score += EDITION_BONUS;
    }
    score += if is_sequel_like(tail) {
        SEQUEL_PENALTY
    } else {
        NON_SEQUEL_BONUS
    };

    let length_diff = (candidate_slug.len() as i64 - query_slug.len() as i64).abs();
    score - length_diff
}

/// Score every slug and sort best first; ties keep their input order.
pub fn rank_prefix_candidates<I, S>(query_slug: &str, slugs: I) -> Vec<PrefixMatchCandidate>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut ranked: Vec<PrefixMatchCandidate> = slugs
        .into_iter()
        .map(|slug| {
            let slug = slug.into();
            PrefixMatchCandidate {
                score: score_prefix_candidate(query_slug, &slug),
                slug,
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}
