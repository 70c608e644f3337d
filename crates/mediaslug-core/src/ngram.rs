//! Character n-gram similarity for scripts written without word spacing.

use std::collections::HashSet;

/// Strings at least this many characters long compare by trigrams.
const TRIGRAM_MIN_CHARS: usize = 10;

/// Overlapping `n`-character windows of `s`. Strings shorter than `n`
/// (including `""`) yield themselves as the single gram.
pub fn generate_ngrams(s: &str, n: usize) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    if n == 0 || chars.len() <= n {
        return vec![s.to_string()];
    }
    chars.windows(n).map(|w| w.iter().collect()).collect()
}

pub fn generate_bigrams(s: &str) -> Vec<String> {
    generate_ngrams(s, 2)
}

pub fn generate_trigrams(s: &str) -> Vec<String> {
    generate_ngrams(s, 3)
}

/// `|A ∩ B| / |A ∪ B|` over the distinct grams; two empty inputs are
/// identical.
pub fn jaccard_similarity(a: &[String], b: &[String]) -> f64 {
    let a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let b: HashSet<&str> = b.iter().map(String::as_str).collect();
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(&b).count() as f64 / union as f64
}

/// Jaccard similarity of two slugs, by trigrams when both are long enough
/// and by bigrams otherwise.
pub fn ngram_similarity(a: &str, b: &str) -> f64 {
    let long = a.chars().count() >= TRIGRAM_MIN_CHARS && b.chars().count() >= TRIGRAM_MIN_CHARS;
    if long {
        jaccard_similarity(&generate_trigrams(a), &generate_trigrams(b))
    } else {
        jaccard_similarity(&generate_bigrams(a), &generate_bigrams(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grams(gs: &[&str]) -> Vec<String> {
        gs.iter().map(|g| g.to_string()).collect()
    }

    #[test]
    fn bigrams() {
        assert_eq!(generate_bigrams(""), grams(&[""]));
        assert_eq!(generate_bigrams("a"), grams(&["a"]));
        assert_eq!(generate_bigrams("ab"), grams(&["ab"]));
        assert_eq!(generate_bigrams("test"), grams(&["te", "es", "st"]));
        assert_eq!(generate_bigrams("เพลง"), grams(&["เพ", "พล", "ลง"]));
    }

    #[test]
    fn trigrams() {
        assert_eq!(generate_trigrams("a"), grams(&["a"]));
        assert_eq!(generate_trigrams("ab"), grams(&["ab"]));
        assert_eq!(generate_trigrams("abc"), grams(&["abc"]));
        assert_eq!(generate_trigrams("test"), grams(&["tes", "est"]));
        assert_eq!(generate_trigrams("เพลงไทย").len(), 5);
    }

    #[test]
    fn jaccard() {
        assert_eq!(jaccard_similarity(&[], &[]), 1.0);
        assert_eq!(jaccard_similarity(&grams(&["a"]), &[]), 0.0);
        assert_eq!(jaccard_similarity(&grams(&["a", "b", "c"]), &grams(&["b", "c", "d"])), 0.5);

        let subset = jaccard_similarity(&grams(&["a", "b"]), &grams(&["a", "b", "c"]));
        assert!((subset - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn jaccard_ignores_repeats() {
        assert_eq!(jaccard_similarity(&grams(&["a", "a", "b"]), &grams(&["a", "b"])), 1.0);
    }

    #[test]
    fn thai_partial_titles() {
        assert_eq!(ngram_similarity("เพลง", "เพลงไทย"), 0.5);
        assert!(ngram_similarity("ไทย", "เพลงไทย") >= 0.25);
        assert_eq!(ngram_similarity("เพลงไทย", "เพลงไทย"), 1.0);
    }

    #[test]
    fn long_strings_use_trigrams() {
        let a = "abcdabcdabcd";
        let b = "abdcabdcabdc";
        assert!(jaccard_similarity(&generate_bigrams(a), &generate_bigrams(b)) > 0.0);
        assert_eq!(ngram_similarity(a, b), 0.0);
    }
}
