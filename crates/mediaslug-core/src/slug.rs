//! Final slug emission and the public normalization entry points.

use mediaslug_parse::script::is_script_letter;
use mediaslug_parse::{fold_lowercase, normalize_media, MediaType, Normalized};
use serde::Serialize;

/// A slug together with the words it was assembled from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlugResult {
    pub slug: String,
    pub tokens: Vec<String>,
}

fn is_slug_char(c: char, unicode: bool) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || (unicode && is_script_letter(c))
}

/// Split normalized text into slug words. Characters outside the slug set act
/// as word breaks, so the words concatenate to exactly the slug.
fn emit_words(normalized: &Normalized) -> Vec<String> {
    let unicode = normalized.context.script().needs_unicode_slug();
    let lowered = normalized.text.to_lowercase();

    let mut words = Vec::new();
    let mut current = String::new();
    for c in lowered.chars() {
        if is_slug_char(c, unicode) {
            current.push(c);
        } else if !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

const SETTLE_ROUNDS: usize = 4;

/// Refold the slug until it equals its own folded form, so that slugging it
/// again takes the single-word path and returns it unchanged.
///
/// Joining words can expose script marks to composition or to a different
/// script context. Slugs that do not settle keep their ASCII characters only.
fn settle(slug: String) -> String {
    let mut slug = slug;
    for _ in 0..SETTLE_ROUNDS {
        let folded = fold_lowercase(&slug);
        if folded == slug {
            return slug;
        }
        slug = folded.chars().filter(|&c| is_slug_char(c, true)).collect();
    }
    if fold_lowercase(&slug) == slug {
        return slug;
    }

    tracing::debug!(slug = %slug, "Slug did not settle, keeping ASCII");
    slug.chars().filter(|&c| is_slug_char(c, false)).collect()
}

/// Cap the slug at `3 * len(input) + 100` bytes.
fn enforce_bound(slug: String, input: &str) -> String {
    let limit = 3 * input.len() + 100;
    if slug.len() <= limit {
        return slug;
    }

    tracing::warn!(
        input_len = input.len(),
        slug_len = slug.len(),
        limit,
        "Slug exceeds length bound, truncating"
    );
    let mut end = limit;
    while !slug.is_char_boundary(end) {
        end -= 1;
    }
    slug[..end].to_string()
}

/// Slug and tokens from a single pipeline run.
pub fn slugify_with_tokens(media_type: MediaType, title: &str) -> SlugResult {
    let normalized = normalize_media(media_type, title);
    let mut tokens = emit_words(&normalized);
    let joined = tokens.concat();
    let slug = enforce_bound(settle(joined.clone()), title);
    if slug != joined {
        tokens = if slug.is_empty() { Vec::new() } else { vec![slug.clone()] };
    }
    SlugResult { slug, tokens }
}

/// Canonical slug of a title.
///
/// Never fails; empty, whitespace-only and symbol-only titles give `""`.
///
/// ```
/// use mediaslug_core::slugify;
/// use mediaslug_parse::MediaType;
///
/// assert_eq!(slugify(MediaType::Game, "Final Fantasy VII"), "finalfantasy7");
/// assert_eq!(slugify(MediaType::Game, "Street Fighter ストリート"), "streetfighterストリート");
/// ```
pub fn slugify(media_type: MediaType, title: &str) -> String {
    slugify_with_tokens(media_type, title).slug
}

/// [`slugify`] for games, the default media type.
pub fn slugify_string(title: &str) -> String {
    slugify(MediaType::Game, title)
}

/// The words of a title after every normalization stage, for word-level
/// scoring.
///
/// ```
/// use mediaslug_core::normalize_to_words;
///
/// assert_eq!(
///     normalize_to_words("The Legend of Zelda: The Minish Cap"),
///     ["legend", "of", "zelda", "minish", "cap"]
/// );
/// ```
pub fn normalize_to_words(title: &str) -> Vec<String> {
    slugify_with_tokens(MediaType::Game, title).tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(title: &str) -> String {
        slugify(MediaType::Game, title)
    }

    #[test]
    fn game_titles() {
        let cases = [
            ("Final Fantasy VII", "finalfantasy7"),
            ("Mega Man X", "megamanx"),
            ("Legend of Zelda, The: Ocarina of Time", "legendofzeldaocarinaoftime"),
            ("Sonic & Knuckles", "sonicandknuckles"),
            ("Rock 'n' Roll Racing", "rockandrollracing"),
            ("C++Programming", "cprogramming"),
            ("Game +/-", "game"),
            ("Skyrim Special Edition", "skyrimspecial"),
            ("Game v1.2", "game"),
            ("Disney's The Lion King", "disneyslionking"),
            ("Super Mario Bros. III (USA) [!]", "supermariobrothers3"),
        ];
        for (input, expected) in cases {
            assert_eq!(game(input), expected, "{input}");
        }
    }

    #[test]
    fn empty_and_symbol_only() {
        assert_eq!(game(""), "");
        assert_eq!(game("   "), "");
        assert_eq!(game("!!! ???"), "");
        assert_eq!(game("™©®"), "");
        assert_eq!(game("(USA) [!]"), "");
    }

    #[test]
    fn non_latin_scripts() {
        let cases = [
            ("Тетрис", "тетрис"),
            ("Ёлки", "елки"),
            ("Super Тетрис Bros", "superтетрисbrothers"),
            ("Σούπερ Μάριο", "σουπερμαριο"),
            ("Τι είναι;", "τιειναι"),
            ("दिलवाले", "दिलवाले"),
            ("Тетрис (Russia) [!]", "тетрис"),
            ("Super Ελληνικό Game", "superελληνικοgame"),
            ("Street Fighter ストリート", "streetfighterストリート"),
        ];
        for (input, expected) in cases {
            assert_eq!(game(input), expected, "{input}");
        }
    }

    #[test]
    fn width_and_symbol_folding() {
        assert_eq!(game("Sonic™ Adventure"), "sonicadventure");
        assert_eq!(game("Zelda：Link's Awakening"), "zeldalinksawakening");
        assert_eq!(game("ﬁnal Fantasy VII"), "finalfantasy7");
        assert_eq!(game("Game²"), "game2");
        assert_eq!(game("Ｓｕｐｅｒ Ｍａｒｉｏ"), "supermario");
    }

    #[test]
    fn latin_output_is_ascii() {
        assert_eq!(game("Pokémon Café"), "pokemoncafe");
        assert_eq!(game("Ærø Straße"), "aerostrasse");
    }

    #[test]
    fn slugify_string_is_game() {
        assert_eq!(slugify_string("Final Fantasy VII"), game("Final Fantasy VII"));
    }

    #[test]
    fn tokens_concatenate_to_slug() {
        for media in MediaType::ALL {
            let result = slugify_with_tokens(media, "The Legend of Zelda: A Link to the Past");
            assert_eq!(result.tokens.concat(), result.slug);
            assert_eq!(result.slug, slugify(media, "The Legend of Zelda: A Link to the Past"));
        }
    }

    #[test]
    fn words() {
        assert_eq!(
            normalize_to_words("The Legend of Zelda: The Minish Cap"),
            vec!["legend", "of", "zelda", "minish", "cap"]
        );
        assert!(normalize_to_words("").is_empty());
    }

    #[test]
    fn media_types() {
        assert_eq!(
            slugify(MediaType::TvShow, "Attack on Titan - 1x02 - That Day"),
            slugify(MediaType::TvShow, "S01E02 - Attack on Titan - That Day")
        );
        assert_eq!(
            slugify(MediaType::TvShow, "Breaking.Bad.S01E02.1080p.BluRay.x264-GROUP"),
            "breakingbads01e02"
        );
        assert_eq!(
            slugify(MediaType::Movie, "The.Matrix.1999.1080p.BluRay.x264-GRP"),
            slugify(MediaType::Movie, "The Matrix (1999)")
        );
        assert_eq!(
            slugify(MediaType::Music, "Pink Floyd - The Wall [FLAC] CD1"),
            "pinkfloydthewall"
        );
    }

    #[test]
    fn hyphenated_scene_names() {
        assert_eq!(slugify(MediaType::Movie, "Spider-Man.2002.1080p.BluRay"), "spiderman");
        assert_eq!(
            slugify(MediaType::Movie, "Spider-Man.2002.1080p.BluRay-GRP"),
            slugify(MediaType::Movie, "Spider-Man (2002)")
        );
        assert_eq!(slugify(MediaType::Movie, "X-Men.2000.720p"), "xmen");
    }

    #[test]
    fn slugs_are_fixed_points() {
        let cases = [
            (MediaType::Game, "X I"),
            (MediaType::Game, "1 st"),
            (MediaType::Game, "1999 st"),
            (MediaType::Game, "D R"),
            (MediaType::Game, "T wo"),
            (MediaType::Game, "Final Fantasy XI"),
            (MediaType::TvShow, "Episode II"),
            (MediaType::TvShow, "-e 5"),
            (MediaType::TvShow, "Show - 01"),
            (MediaType::Movie, "The Matrix (1999)"),
            (MediaType::Music, "Pink Floyd - The Wall [FLAC] CD1"),
        ];
        for (media, title) in cases {
            let once = slugify(media, title);
            assert_eq!(slugify(media, &once), once, "{media} {title:?}");
        }
        assert_eq!(game("X I"), "xi");
        assert_eq!(slugify(MediaType::TvShow, "Episode II"), "episode2");
        assert_eq!(slugify(MediaType::TvShow, "episode2"), "episode2");
    }

    #[test]
    fn joined_marks_settle() {
        // The voiced mark composes with カ once the separator is gone.
        let once = game("ｶ.ﾞ");
        assert_eq!(game(&once), once);
        let result = slugify_with_tokens(MediaType::Game, "ｶ.ﾞ");
        assert_eq!(result.tokens.concat(), result.slug);
    }

    #[test]
    fn settled_slugs_unchanged() {
        assert_eq!(settle("finalfantasy7".into()), "finalfantasy7");
        assert_eq!(settle("тетрис".into()), "тетрис");
        assert_eq!(settle(String::new()), "");
    }

    #[test]
    fn bound_truncates_on_char_boundary() {
        let slug = "т".repeat(200);
        let bounded = enforce_bound(slug, "");
        assert!(bounded.len() <= 100);
        assert_eq!(bounded.chars().count(), 50);
    }

    #[test]
    fn bound_keeps_normal_slugs() {
        assert_eq!(enforce_bound("abc".into(), "abc"), "abc");
    }
}
