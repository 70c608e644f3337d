//! Title resolution against a slug catalog.
//!
//! Strategies run from cheapest and most certain to broadest, stopping at the
//! first hit: exact slug, slug prefix (or word matching over the prefix
//! hits), main title, secondary title, progressive trim, token signature,
//! Jaro-Winkler, character n-grams and finally token-set ratio.

mod strategy;

use std::collections::HashSet;

use mediaslug_parse::{detect_script, normalize_width, MediaType};

use crate::catalog::{CatalogEntry, SlugCatalog};
use crate::config::MatchConfig;
use crate::error::SlugError;
use crate::fuzzy::{
    apply_damerau_levenshtein_tie_breaker, find_fuzzy_matches, find_token_signature_matches,
};
use crate::match_info::{generate_match_info, TitleMatchInfo};
use crate::ngram::ngram_similarity;
use crate::scoring::{
    rank_prefix_candidates, score_prefix_candidate, score_token_match, score_token_set_ratio,
    starts_with_word_sequence,
};
use crate::slug::{slugify, slugify_with_tokens};
use crate::trim::generate_progressive_trim_candidates;

pub use strategy::{Resolution, Strategy};

const EXACT_CONFIDENCE: f64 = 1.0;
const PREFIX_CONFIDENCE: f64 = 0.9;
const MAIN_TITLE_CONFIDENCE: f64 = 0.85;
const SECONDARY_TITLE_CONFIDENCE: f64 = 0.8;
const TRIM_EXACT_CONFIDENCE: f64 = 0.7;
const TRIM_PREFIX_CONFIDENCE: f64 = 0.6;
const TOKEN_SIGNATURE_CONFIDENCE: f64 = 0.95;

/// Query words needed before prefix hits must start with the query's words.
const MIN_WORDS_FOR_SEQUENCE_CHECK: usize = 2;

/// Resolves free-form titles to catalog entries.
pub struct TitleResolver<C> {
    catalog: C,
    config: MatchConfig,
}

impl<C: SlugCatalog> TitleResolver<C> {
    pub fn new(catalog: C, config: MatchConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Find the catalog entry `query` most likely refers to.
    ///
    /// Returns `Ok(None)` when no strategy matches; errors only come from the
    /// catalog.
    #[tracing::instrument(name = "resolve", skip(self), fields(query = %query))]
    pub fn resolve(&self, query: &str) -> Result<Option<Resolution>, SlugError> {
        let slug = slugify(self.catalog.media_type(), query);
        if slug.is_empty() {
            tracing::debug!("Query has an empty slug");
            return Ok(None);
        }

        let resolution = self.run_strategies(query, &slug)?;
        match &resolution {
            Some(r) => tracing::debug!(
                strategy = %r.strategy,
                matched = %r.entry.title,
                confidence = format!("{:.1}%", r.confidence * 100.0),
                "Resolution hit"
            ),
            None => tracing::debug!("No resolution"),
        }
        Ok(resolution)
    }

    fn run_strategies(&self, query: &str, slug: &str) -> Result<Option<Resolution>, SlugError> {
        if let Some(hit) = self.try_exact(slug)? {
            return Ok(Some(hit));
        }
        if let Some(hit) = self.try_prefix(query, slug)? {
            return Ok(Some(hit));
        }

        // Match info and trims are built with the game pipeline.
        if self.catalog.media_type() == MediaType::Game {
            let info = generate_match_info(query);
            if let Some(hit) = self.try_main_title(&info, slug)? {
                return Ok(Some(hit));
            }
            if let Some(hit) = self.try_secondary_title(&info)? {
                return Ok(Some(hit));
            }
            if self.config.trim.enabled {
                if let Some(hit) = self.try_progressive_trim(query)? {
                    return Ok(Some(hit));
                }
            }
        }

        let entries = self.catalog.all_titles()?;
        tracing::debug!(entries = entries.len(), "Scanning catalog");

        Ok(self
            .try_token_signature(query, &entries)
            .or_else(|| self.try_fuzzy(slug, &entries))
            .or_else(|| self.try_ngram(query, slug, &entries))
            .or_else(|| self.try_token_set(query, &entries)))
    }

    fn words(&self, title: &str) -> Vec<String> {
        slugify_with_tokens(self.catalog.media_type(), title).tokens
    }

    fn lookup_exact(&self, slug: &str, strategy: Strategy) -> Result<Option<CatalogEntry>, SlugError> {
        let found = self.catalog.find_exact(slug)?;
        tracing::debug!(strategy = %strategy, slug, hits = found.len(), "Strategy attempted");
        Ok(found.into_iter().next())
    }

    // ── Index lookups ───────────────────────────────────────────

    fn try_exact(&self, slug: &str) -> Result<Option<Resolution>, SlugError> {
        Ok(self
            .lookup_exact(slug, Strategy::Exact)?
            .map(|entry| Resolution::new(entry, Strategy::Exact, EXACT_CONFIDENCE)))
    }

    /// Prefix hits ranked by edition awareness. Multi-word queries only accept
    /// hits whose words start with the query's words; if none do, the hits are
    /// scored word by word instead.
    fn try_prefix(&self, query: &str, slug: &str) -> Result<Option<Resolution>, SlugError> {
        let found = self.catalog.find_prefix(slug)?;
        tracing::debug!(strategy = %Strategy::Prefix, slug, hits = found.len(), "Strategy attempted");
        if found.is_empty() {
            return Ok(None);
        }

        let query_words = self.words(query);
        let check_sequence = query_words.len() >= MIN_WORDS_FOR_SEQUENCE_CHECK;
        let valid = found.iter().filter(|entry| {
            !check_sequence || starts_with_word_sequence(&self.words(&entry.title), &query_words)
        });
        if let Some((entry, score)) =
            best_scoring(valid.map(|entry| (entry, score_prefix_candidate(slug, &entry.slug))))
        {
            tracing::debug!(matched = %entry.title, score, "Prefix candidate selected");
            return Ok(Some(Resolution::new(
                entry.clone(),
                Strategy::Prefix,
                PREFIX_CONFIDENCE,
            )));
        }

        let best = best_scoring(found.iter().map(|entry| {
            let score = score_token_match(query, &entry.title)
                .max(score_token_set_ratio(query, &entry.title));
            (entry, score)
        }));
        tracing::debug!(strategy = %Strategy::TokenMatch, candidates = found.len(), "Strategy attempted");
        Ok(best
            .filter(|(_, score)| *score > self.config.token.min_score)
            .map(|(entry, score)| Resolution::new(entry.clone(), Strategy::TokenMatch, score)))
    }

    fn try_main_title(
        &self,
        info: &TitleMatchInfo,
        slug: &str,
    ) -> Result<Option<Resolution>, SlugError> {
        if !info.has_secondary_title
            || info.main_title_slug.is_empty()
            || info.main_title_slug == slug
        {
            return Ok(None);
        }
        Ok(self
            .lookup_exact(&info.main_title_slug, Strategy::MainTitleOnly)?
            .map(|entry| Resolution::new(entry, Strategy::MainTitleOnly, MAIN_TITLE_CONFIDENCE)))
    }

    fn try_secondary_title(&self, info: &TitleMatchInfo) -> Result<Option<Resolution>, SlugError> {
        if !info.has_secondary_title
            || info.secondary_title_slug.len() < self.config.resolver.min_secondary_slug_length
        {
            return Ok(None);
        }
        Ok(self
            .lookup_exact(&info.secondary_title_slug, Strategy::SecondaryTitleExact)?
            .map(|entry| {
                Resolution::new(entry, Strategy::SecondaryTitleExact, SECONDARY_TITLE_CONFIDENCE)
            }))
    }

    /// Exact lookups for every trim level first, then prefix lookups.
    fn try_progressive_trim(&self, query: &str) -> Result<Option<Resolution>, SlugError> {
        let candidates = generate_progressive_trim_candidates(query);
        tracing::debug!(
            strategy = %Strategy::ProgressiveTrim,
            candidates = candidates.len(),
            "Strategy attempted"
        );

        for candidate in candidates.iter().filter(|c| c.is_exact_match) {
            if let Some(entry) = self.catalog.find_exact(&candidate.slug)?.into_iter().next() {
                return Ok(Some(Resolution::new(
                    entry,
                    Strategy::ProgressiveTrim,
                    TRIM_EXACT_CONFIDENCE,
                )));
            }
        }

        for candidate in candidates.iter().filter(|c| c.is_prefix_match) {
            let found = self.catalog.find_prefix(&candidate.slug)?;
            let ranked =
                rank_prefix_candidates(&candidate.slug, found.iter().map(|e| e.slug.as_str()));
            let best = ranked
                .first()
                .and_then(|best| found.iter().find(|e| e.slug == best.slug));
            if let Some(entry) = best {
                return Ok(Some(Resolution::new(
                    entry.clone(),
                    Strategy::ProgressiveTrim,
                    TRIM_PREFIX_CONFIDENCE,
                )));
            }
        }

        Ok(None)
    }

    // ── Catalog scans ───────────────────────────────────────────

    fn try_token_signature(&self, query: &str, entries: &[CatalogEntry]) -> Option<Resolution> {
        let matches = find_token_signature_matches(
            self.catalog.media_type(),
            query,
            entries.iter().map(|e| e.title.as_str()),
        );
        tracing::debug!(strategy = %Strategy::TokenSignature, hits = matches.len(), "Strategy attempted");

        let title = matches.first()?;
        entries
            .iter()
            .find(|e| e.title == *title)
            .map(|entry| {
                Resolution::new(entry.clone(), Strategy::TokenSignature, TOKEN_SIGNATURE_CONFIDENCE)
            })
    }

    fn try_fuzzy(&self, slug: &str, entries: &[CatalogEntry]) -> Option<Resolution> {
        let config = &self.config.fuzzy;
        if slug.len() < config.min_query_length {
            tracing::debug!(strategy = %Strategy::Fuzzy, slug, "Query too short, skipping");
            return None;
        }

        let mut seen = HashSet::new();
        let slugs = entries
            .iter()
            .map(|e| e.slug.as_str())
            .filter(|s| seen.insert(*s));
        let matches =
            find_fuzzy_matches(slug, slugs, config.max_length_delta, config.min_similarity);
        tracing::debug!(strategy = %Strategy::Fuzzy, hits = matches.len(), "Strategy attempted");
        let matches = apply_damerau_levenshtein_tie_breaker(slug, matches, config.tie_breaker_top_n);

        let best = matches.into_iter().next()?;
        entries
            .iter()
            .find(|e| e.slug == best.slug)
            .map(|entry| Resolution::new(entry.clone(), Strategy::Fuzzy, best.similarity))
    }

    fn try_ngram(&self, query: &str, slug: &str, entries: &[CatalogEntry]) -> Option<Resolution> {
        let script = detect_script(&normalize_width(query));
        if !script.needs_ngram_matching() {
            return None;
        }

        let best = best_scoring(entries.iter().map(|e| (e, ngram_similarity(slug, &e.slug))));
        tracing::debug!(
            strategy = %Strategy::NGram,
            script = %script,
            best = best.map(|(_, score)| score),
            "Strategy attempted"
        );
        best.filter(|(_, score)| *score >= self.config.ngram.min_similarity)
            .map(|(entry, score)| Resolution::new(entry.clone(), Strategy::NGram, score))
    }

    fn try_token_set(&self, query: &str, entries: &[CatalogEntry]) -> Option<Resolution> {
        let best =
            best_scoring(entries.iter().map(|e| (e, score_token_set_ratio(query, &e.title))));
        tracing::debug!(
            strategy = %Strategy::TokenSet,
            best = best.map(|(_, score)| score),
            "Strategy attempted"
        );
        best.filter(|(_, score)| *score >= self.config.token.min_score)
            .map(|(entry, score)| Resolution::new(entry.clone(), Strategy::TokenSet, score))
    }
}

/// Highest-scoring entry; the first one wins ties.
fn best_scoring<'a, T, I>(scored: I) -> Option<(&'a CatalogEntry, T)>
where
    T: PartialOrd + Copy,
    I: IntoIterator<Item = (&'a CatalogEntry, T)>,
{
    scored
        .into_iter()
        .fold(None, |best: Option<(&'a CatalogEntry, T)>, (entry, score)| match best {
            Some((_, best_score)) if best_score >= score => best,
            _ => Some((entry, score)),
        })
}
