use std::collections::HashSet;

use mediaslug_parse::brackets::strip_metadata_brackets;
use mediaslug_parse::edition::strip_edition_and_version_suffixes;
use mediaslug_parse::normalize_width;
use serde::Serialize;

use crate::slug::slugify_string;

const MAX_TRIMS: usize = 10;
const MIN_TRIM_SLUG_LEN: usize = 6;
const MIN_WORDS: usize = 3;

/// One lookup to try for a shortened title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressiveTrimCandidate {
    pub slug: String,
    pub word_count: usize,
    pub is_exact_match: bool,
    pub is_prefix_match: bool,
}

/// Shortened variants of a long title, longest first.
///
/// Drops one trailing word at a time (at most ten), stopping once the slug
/// would be shorter than six bytes. Each distinct slug yields an exact and a
/// prefix candidate, so the result never exceeds twenty entries. Titles of
/// fewer than three words give nothing.
pub fn generate_progressive_trim_candidates(title: &str) -> Vec<ProgressiveTrimCandidate> {
    let s = normalize_width(title);
    let s = strip_metadata_brackets(&s);
    let s = strip_edition_and_version_suffixes(&s);

    let words: Vec<&str> = s.split_whitespace().collect();
    if words.len() < MIN_WORDS {
        return Vec::new();
    }

    let max_trims = (words.len() - 1).min(MAX_TRIMS);
    let mut seen = HashSet::new();
    let mut candidates = Vec::with_capacity(max_trims * 2);

    for trims in 1..=max_trims {
        let word_count = words.len() - trims;
        let slug = slugify_string(&words[..word_count].join(" "));
        if slug.len() < MIN_TRIM_SLUG_LEN {
            break;
        }
        if !seen.insert(slug.clone()) {
            continue;
        }

        candidates.push(ProgressiveTrimCandidate {
            slug: slug.clone(),
            word_count,
            is_exact_match: true,
            is_prefix_match: false,
        });
        candidates.push(ProgressiveTrimCandidate {
            slug,
            word_count,
            is_exact_match: false,
            is_prefix_match: true,
        });
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_trailing_words_until_floor() {
        let candidates = generate_progressive_trim_candidates("Super Mario Bros 3 Extra Words");
        let slugs: Vec<&str> = candidates
            .iter()
            .filter(|c| c.is_exact_match)
            .map(|c| c.slug.as_str())
            .collect();
        assert_eq!(
            slugs,
            vec![
                "supermariobrothers3extra",
                "supermariobrothers3",
                "supermariobrothers",
                "supermario",
            ]
        );
        assert_eq!(candidates.len(), 8);
        assert_eq!(candidates[0].word_count, 5);
    }

    #[test]
    fn exact_and_prefix_pairs() {
        let candidates = generate_progressive_trim_candidates("Metal Gear Solid Twin Snakes");
        for pair in candidates.chunks(2) {
            assert_eq!(pair[0].slug, pair[1].slug);
            assert!(pair[0].is_exact_match && !pair[0].is_prefix_match);
            assert!(pair[1].is_prefix_match && !pair[1].is_exact_match);
        }
    }

    #[test]
    fn short_titles_give_nothing() {
        assert!(generate_progressive_trim_candidates("Zelda").is_empty());
        assert!(generate_progressive_trim_candidates("Super Metroid").is_empty());
        assert!(generate_progressive_trim_candidates("").is_empty());
    }

    #[test]
    fn brackets_and_editions_removed_first() {
        // Only two words remain once the metadata is gone.
        assert!(generate_progressive_trim_candidates("Super Metroid (USA) (Rev 1)").is_empty());
        assert!(generate_progressive_trim_candidates("Super Metroid Edition").is_empty());
    }

    #[test]
    fn duplicate_slugs_skipped() {
        let candidates = generate_progressive_trim_candidates("Legend of Zelda, The Extra");
        let slugs: Vec<&str> = candidates.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(
            slugs,
            vec!["legendofzelda", "legendofzelda", "legendof", "legendof", "legend", "legend"]
        );
    }

    #[test]
    fn bounded_to_twenty() {
        let title = (0..40).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ");
        let candidates = generate_progressive_trim_candidates(&title);
        assert_eq!(candidates.len(), 20);
        assert_eq!(candidates.last().map(|c| c.word_count), Some(30));
    }
}
