pub mod catalog;
pub mod config;
pub mod error;
pub mod fuzzy;
pub mod match_info;
pub mod ngram;
pub mod resolver;
pub mod scoring;
pub mod slug;
pub mod trim;

pub use catalog::{CatalogEntry, MemoryCatalog, SlugCatalog};
pub use config::MatchConfig;
pub use error::SlugError;
pub use fuzzy::{
    apply_damerau_levenshtein_tie_breaker, find_fuzzy_matches, find_token_signature_matches,
    token_signature, FuzzyMatch,
};
pub use match_info::{generate_match_info, TitleMatchInfo};
pub use ngram::{
    generate_bigrams, generate_ngrams, generate_trigrams, jaccard_similarity, ngram_similarity,
};
pub use resolver::{Resolution, Strategy, TitleResolver};
pub use scoring::{
    rank_prefix_candidates, score_prefix_candidate, score_token_match, score_token_set_ratio,
    PrefixMatchCandidate,
};
pub use slug::{normalize_to_words, slugify, slugify_string, slugify_with_tokens, SlugResult};
pub use trim::{generate_progressive_trim_candidates, ProgressiveTrimCandidate};
