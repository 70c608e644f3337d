//! Shared normalization pipeline.
//!
//! Every media parser ends up here; the Game parser is this pipeline as-is.
//! Stage order matters: width folding precedes delimiter detection, separator
//! folding precedes abbreviation lookup, and periods survive until after it.
//!
//! A title that folds to a single run of letters and digits is already in slug
//! form and skips the word-level stages, so a slug normalizes to itself.

use crate::brackets::strip_metadata_brackets;
use crate::edition::strip_edition_and_version_suffixes;
use crate::expand::{expand_abbreviations, expand_number_words, normalize_ordinals};
use crate::roman::convert_roman_numerals;
use crate::script::{detect_script, is_script_letter, ScriptType};
use crate::structure::{split_and_strip_articles, strip_trailing_article};
use crate::symbols::normalize_symbols_and_separators;
use crate::unicode::normalize_unicode_with;
use crate::width::normalize_width;

/// Per-title facts computed once and threaded through the stages.
///
/// Built from the width-folded title; never shared between titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineContext {
    is_ascii: bool,
    script: ScriptType,
}

impl PipelineContext {
    pub fn new(s: &str) -> Self {
        let is_ascii = s.is_ascii();
        let script = if is_ascii {
            ScriptType::Latin
        } else {
            detect_script(s)
        };
        Self { is_ascii, script }
    }

    pub fn is_ascii(&self) -> bool {
        self.is_ascii
    }

    pub fn script(&self) -> ScriptType {
        self.script
    }
}

/// Output of the pipeline: space-separated lowercase words plus the context
/// the final slug emitter needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub text: String,
    pub context: PipelineContext,
}

impl Normalized {
    fn empty() -> Self {
        Self {
            text: String::new(),
            context: PipelineContext::new(""),
        }
    }
}

// ── Slug words ──────────────────────────────────────────────────

/// Width and Unicode folding: the stages that never rewrite words.
fn fold_characters(title: &str) -> (String, PipelineContext) {
    let s = normalize_width(title);
    let context = PipelineContext::new(&s);
    (normalize_unicode_with(&s, &context), context)
}

/// Width and Unicode folding followed by lowercasing.
///
/// A slug word equal to its own folded form passes through [`normalize`]
/// unchanged.
pub fn fold_lowercase(title: &str) -> String {
    fold_characters(title).0.to_lowercase()
}

/// One unbroken run of `[a-z0-9]` or non-Latin script letters.
pub fn is_slug_word(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || is_script_letter(c))
}

/// The folded, lowercased title when it is a single slug word.
///
/// Such titles bypass every word-level stage and media parser: "xi", "1st"
/// and "episode2" stay as they are.
pub fn as_slug_word(title: &str) -> Option<Normalized> {
    let (s, context) = fold_characters(title.trim());
    let text = s.to_lowercase();
    is_slug_word(&text).then_some(Normalized { text, context })
}

// ── Pipeline ────────────────────────────────────────────────────

/// Whether a pipeline run applies the article stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Articles {
    /// Split the title, strip the leading article of each half and a trailing
    /// ", The".
    Strip,
    /// Leave articles alone; the media parser already handled them.
    Keep,
}

/// Run every shared stage over a raw title.
///
/// 1. Width and punctuation folding
/// 2. Script-aware Unicode normalization
/// 3. Title split and leading-article removal
/// 4. Trailing ", The" removal
/// 5. Conjunction and separator folding
/// 6. Metadata bracket removal
/// 7. Edition and version suffix removal
/// 8. Abbreviations, number words, ordinals, then periods to spaces
/// 9. Roman numerals (lowercases the result)
///
/// Stages 3 to 9 are skipped when stage 2 leaves a single slug word.
pub fn normalize(title: &str) -> Normalized {
    normalize_with(title, Articles::Strip)
}

/// [`normalize`] with stages 3 and 4 controlled by `articles`.
pub fn normalize_with(title: &str, articles: Articles) -> Normalized {
    let s = title.trim();
    if s.is_empty() {
        return Normalized::empty();
    }

    let (s, context) = fold_characters(s);
    let lowered = s.to_lowercase();
    if is_slug_word(&lowered) {
        return Normalized {
            text: lowered,
            context,
        };
    }

    let s = match articles {
        Articles::Strip => strip_trailing_article(&split_and_strip_articles(&s)),
        Articles::Keep => s,
    };
    let s = normalize_symbols_and_separators(&s);
    let s = strip_metadata_brackets(&s);
    let s = strip_edition_and_version_suffixes(&s);
    let s = expand_abbreviations(&s);
    let s = expand_number_words(&s);
    let s = normalize_ordinals(&s);
    let s = s.replace('.', " ");
    let s = convert_roman_numerals(&s);

    Normalized {
        text: s.split_whitespace().collect::<Vec<_>>().join(" "),
        context,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_fast_path() {
        let ctx = PipelineContext::new("Sonic");
        assert!(ctx.is_ascii());
        assert_eq!(ctx.script(), ScriptType::Latin);

        let ctx = PipelineContext::new("Тетрис");
        assert!(!ctx.is_ascii());
        assert_eq!(ctx.script(), ScriptType::Cyrillic);
    }

    #[test]
    fn empty_input() {
        assert_eq!(normalize("").text, "");
        assert_eq!(normalize("   ").text, "");
    }

    #[test]
    fn full_pipeline() {
        assert_eq!(
            normalize("Super Mario Bros. III (USA) [!] Edition").text,
            "super mario brothers 3"
        );
        assert_eq!(normalize("Street Fighter II v2.0").text, "street fighter 2");
        assert_eq!(
            normalize("Dr. Mario vs. Donkey Kong Jr. Two").text,
            "doctor mario versus donkey kong junior 2"
        );
    }

    #[test]
    fn edition_words() {
        assert_eq!(normalize("Pokemon Red Version").text, "pokemon red");
        assert_eq!(normalize("Game Special Edition").text, "game special");
    }

    #[test]
    fn ordinals_and_numbers() {
        assert_eq!(normalize("Street Fighter 2nd Impact").text, "street fighter 2 impact");
        assert_eq!(normalize("3rd Strike").text, "3 strike");
        assert_eq!(normalize("Crash Bandicoot Three").text, "crash bandicoot 3");
    }

    #[test]
    fn articles() {
        assert_eq!(
            normalize("The Legend of Zelda: The Minish Cap").text,
            "legend of zelda minish cap"
        );
        assert_eq!(
            normalize("Legend of Zelda, The: Ocarina of Time").text,
            "legend of zelda ocarina of time"
        );
    }

    #[test]
    fn articles_kept_on_request() {
        assert_eq!(
            normalize_with("Queen: The Game", Articles::Keep).text,
            "queen the game"
        );
        assert_eq!(normalize_with("Queen: The Game", Articles::Strip).text, "queen game");
    }

    #[test]
    fn mega_man_x_keeps_x() {
        assert_eq!(normalize("Mega Man X").text, "mega man x");
    }

    #[test]
    fn plain_titles_only_lowercase() {
        assert_eq!(normalize("Sonic").text, "sonic");
        assert_eq!(normalize("Game 123").text, "game 123");
    }

    #[test]
    fn slug_words() {
        assert!(is_slug_word("finalfantasy7"));
        assert!(is_slug_word("тетрис"));
        assert!(!is_slug_word("Sonic"));
        assert!(is_slug_word("streetfighterストリート"));
        assert!(!is_slug_word(""));
        assert!(!is_slug_word("final fantasy"));
        assert!(!is_slug_word("dr."));
        assert!(!is_slug_word("pokémon"));
    }

    #[test]
    fn single_words_skip_word_stages() {
        let cases = [
            ("xi", "xi"),
            ("XI", "xi"),
            ("1st", "1st"),
            ("1999st", "1999st"),
            ("dr", "dr"),
            ("two", "two"),
            ("Pokémon", "pokemon"),
            ("Ёлки", "елки"),
            ("Game²", "game2"),
        ];
        for (input, expected) in cases {
            assert_eq!(normalize(input).text, expected, "{input}");
        }
        assert_eq!(normalize("Final Fantasy XI").text, "final fantasy 11");
        assert_eq!(normalize("Dr. Mario").text, "doctor mario");
    }

    #[test]
    fn fold_lowercase_is_character_level() {
        assert_eq!(fold_lowercase("Ｐｏｋéｍｏｎ"), "pokemon");
        assert_eq!(fold_lowercase("Dr. Mario II"), "dr. mario ii");
        assert_eq!(fold_lowercase("ｶﾞ"), "ガ");
    }

    #[test]
    fn as_slug_word_only_for_single_words() {
        let word = as_slug_word("  Episode2 ").map(|n| n.text);
        assert_eq!(word.as_deref(), Some("episode2"));
        assert!(as_slug_word("Episode II").is_none());
        assert!(as_slug_word("Show.S01E01").is_none());
        assert!(as_slug_word("").is_none());
    }

    #[test]
    fn context_follows_width_folding() {
        let n = normalize("Ｓｏｎｉｃ");
        assert_eq!(n.text, "sonic");
        assert_eq!(n.context.script(), ScriptType::Latin);
        assert!(n.context.is_ascii());
    }
}
