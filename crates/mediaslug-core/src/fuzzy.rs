use mediaslug_parse::MediaType;
use serde::Serialize;
use strsim::{damerau_levenshtein, jaro_winkler};

use crate::slug::slugify_with_tokens;

/// Scores above this are worth a debug line.
const LOG_SIMILARITY: f64 = 0.7;

/// A candidate slug within typo distance of the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzyMatch {
    pub slug: String,
    pub similarity: f64,
}

/// Jaro-Winkler matches of `query` among `candidates`, best first.
///
/// Exact matches are skipped (the exact strategy owns those), as are
/// candidates whose byte length differs from the query by more than
/// `max_length_delta`. Equal scores keep their input order.
pub fn find_fuzzy_matches<'a, I>(
    query: &str,
    candidates: I,
    max_length_delta: usize,
    min_similarity: f64,
) -> Vec<FuzzyMatch>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut matches: Vec<FuzzyMatch> = candidates
        .into_iter()
        .filter(|candidate| *candidate != query)
        .filter(|candidate| candidate.len().abs_diff(query.len()) <= max_length_delta)
        .filter_map(|candidate| {
            let similarity = jaro_winkler(query, candidate);
            if similarity > LOG_SIMILARITY {
                tracing::debug!(query, candidate, similarity, "Fuzzy candidate");
            }
            (similarity >= min_similarity).then(|| FuzzyMatch {
                slug: candidate.to_string(),
                similarity,
            })
        })
        .collect();

    matches.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    matches
}

/// Keep the `top_n` best matches and reorder them by edit distance to the
/// query, counting a swap of adjacent characters as one edit.
pub fn apply_damerau_levenshtein_tie_breaker(
    query: &str,
    mut matches: Vec<FuzzyMatch>,
    top_n: usize,
) -> Vec<FuzzyMatch> {
    matches.truncate(top_n);
    matches.sort_by_key(|m| damerau_levenshtein(query, &m.slug));
    matches
}

/// Order-independent key for a title: its slug words sorted and joined with
/// `_`. "Link Awakening Zelda" and "Zelda: Link Awakening" share one.
pub fn token_signature(media_type: MediaType, title: &str) -> String {
    let mut tokens = slugify_with_tokens(media_type, title).tokens;
    tokens.sort_unstable();
    tokens.join("_")
}

/// Titles whose token signature equals the query's. An empty signature
/// matches nothing.
pub fn find_token_signature_matches<'a, I>(
    media_type: MediaType,
    query: &str,
    titles: I,
) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let signature = token_signature(media_type, query);
    if signature.is_empty() {
        return Vec::new();
    }
    titles
        .into_iter()
        .filter(|title| token_signature(media_type, title) == signature)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fm(slug: &str, similarity: f64) -> FuzzyMatch {
        FuzzyMatch {
            slug: slug.to_string(),
            similarity,
        }
    }

    #[test]
    fn typo_ranks_first() {
        let candidates = ["supermetroid", "supermario", "zelda"];
        let matches = find_fuzzy_matches("supermaro", candidates, 5, 0.85);
        assert_eq!(matches[0].slug, "supermario");
        assert!(matches.iter().all(|m| m.slug != "zelda"));
        assert!(matches.windows(2).all(|w| w[0].similarity >= w[1].similarity));
    }

    #[test]
    fn exact_and_length_filtered() {
        let candidates = ["supermaro", "supermarioworldextended"];
        assert!(find_fuzzy_matches("supermaro", candidates, 5, 0.0).is_empty());
    }

    #[test]
    fn transposition_scores_high() {
        let matches = find_fuzzy_matches("zelad", ["zelda"], 5, 0.85);
        assert_eq!(matches.len(), 1);
        assert!(matches[0].similarity > 0.9);
    }

    #[test]
    fn empty_candidates() {
        assert!(find_fuzzy_matches("zelda", std::iter::empty(), 5, 0.85).is_empty());
    }

    #[test]
    fn tie_breaker_truncates_then_orders() {
        let matches = vec![fm("abxy", 0.9), fm("abcx", 0.9), fm("abdc", 0.9)];

        let top_two = apply_damerau_levenshtein_tie_breaker("abcd", matches.clone(), 2);
        let slugs: Vec<&str> = top_two.iter().map(|m| m.slug.as_str()).collect();
        assert_eq!(slugs, vec!["abcx", "abxy"]);

        let all = apply_damerau_levenshtein_tie_breaker("abcd", matches, 5);
        let slugs: Vec<&str> = all.iter().map(|m| m.slug.as_str()).collect();
        assert_eq!(slugs, vec!["abcx", "abdc", "abxy"]);
    }

    #[test]
    fn signature_ignores_order() {
        assert_eq!(
            token_signature(MediaType::Game, "Link Awakening Zelda"),
            "awakening_link_zelda"
        );
        assert_eq!(
            token_signature(MediaType::Game, "Zelda: Link Awakening"),
            token_signature(MediaType::Game, "Link Awakening Zelda")
        );
        assert_eq!(token_signature(MediaType::Game, "!!!"), "");
    }

    #[test]
    fn signature_matches() {
        let titles = ["Zelda Link Awakening", "Link's Awakening", "Awakening Link Zelda"];
        let found = find_token_signature_matches(MediaType::Game, "Link Awakening Zelda", titles);
        assert_eq!(found, vec!["Zelda Link Awakening", "Awakening Link Zelda"]);
        assert!(find_token_signature_matches(MediaType::Game, "", titles).is_empty());
    }
}
