use std::fmt;

use serde::Serialize;

use crate::catalog::CatalogEntry;

/// Which step of the resolution chain produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Exact,
    Prefix,
    TokenMatch,
    MainTitleOnly,
    SecondaryTitleExact,
    ProgressiveTrim,
    TokenSignature,
    Fuzzy,
    #[serde(rename = "ngram")]
    NGram,
    TokenSet,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Prefix => "prefix",
            Self::TokenMatch => "token_match",
            Self::MainTitleOnly => "main_title_only",
            Self::SecondaryTitleExact => "secondary_title_exact",
            Self::ProgressiveTrim => "progressive_trim",
            Self::TokenSignature => "token_signature",
            Self::Fuzzy => "fuzzy",
            Self::NGram => "ngram",
            Self::TokenSet => "token_set",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved catalog entry and how sure the resolver is about it (0.0–1.0).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub entry: CatalogEntry,
    pub strategy: Strategy,
    pub confidence: f64,
}

impl Resolution {
    pub(crate) fn new(entry: CatalogEntry, strategy: Strategy, confidence: f64) -> Self {
        Self {
            entry,
            strategy,
            confidence,
        }
    }
}
