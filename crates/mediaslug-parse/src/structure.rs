use std::sync::LazyLock;

use regex::Regex;

/// `, The` right before the end of the string or a separator.
static RE_TRAILING_ARTICLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i),\s*the\s*($|[\s:\-\(\[])").unwrap());

const ARTICLES: &[&str] = &["the ", "a ", "an "];

/// A title split into its main and optional secondary part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleSplit<'a> {
    pub main: &'a str,
    pub secondary: Option<&'a str>,
}

/// Split a title on the highest-priority delimiter present.
///
/// Priority is `:`, then `" - "`, then `"'s "`; the leftmost occurrence of the
/// chosen delimiter is used. The possessive form keeps `'s` in the main part.
pub fn split_title(title: &str) -> TitleSplit<'_> {
    let cleaned = title.trim();

    if let Some(idx) = cleaned.find(':') {
        return TitleSplit {
            main: cleaned[..idx].trim(),
            secondary: Some(cleaned[idx + 1..].trim()),
        };
    }
    if let Some(idx) = cleaned.find(" - ") {
        return TitleSplit {
            main: cleaned[..idx].trim(),
            secondary: Some(cleaned[idx + 3..].trim()),
        };
    }
    if let Some(idx) = cleaned.find("'s ") {
        return TitleSplit {
            main: cleaned[..idx + 2].trim(),
            secondary: Some(cleaned[idx + 3..].trim()),
        };
    }

    TitleSplit {
        main: cleaned,
        secondary: None,
    }
}

/// Remove one leading "the", "a" or "an" (case-insensitive, followed by a space).
pub fn strip_leading_article(s: &str) -> &str {
    let s = s.trim();
    for article in ARTICLES {
        let n = article.len();
        if s.get(..n).is_some_and(|p| p.eq_ignore_ascii_case(article)) {
            return s[n..].trim_start();
        }
    }
    s
}

/// Split on the title delimiter and strip leading articles from both halves.
///
/// "The Legend of Zelda: The Minish Cap" → "Legend of Zelda Minish Cap".
pub fn split_and_strip_articles(s: &str) -> String {
    let split = split_title(s);
    let main = strip_leading_article(split.main);

    match split.secondary {
        Some(secondary) => {
            let secondary = strip_leading_article(secondary);
            format!("{main} {secondary}").trim().to_string()
        }
        None => main.to_string(),
    }
}

/// Remove a trailing ", The" ("Legend of Zelda, The" → "Legend of Zelda").
pub fn strip_trailing_article(s: &str) -> String {
    if !RE_TRAILING_ARTICLE.is_match(s) {
        return s.to_string();
    }
    RE_TRAILING_ARTICLE
        .replace_all(s, "${1}")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_on_colon() {
        let split = split_title("The Legend of Zelda: Link's Awakening");
        assert_eq!(split.main, "The Legend of Zelda");
        assert_eq!(split.secondary, Some("Link's Awakening"));
    }

    #[test]
    fn colon_beats_dash() {
        let split = split_title("Game - Part: Subtitle");
        assert_eq!(split.main, "Game - Part");
        assert_eq!(split.secondary, Some("Subtitle"));
    }

    #[test]
    fn split_on_dash() {
        let split = split_title("Game - Subtitle");
        assert_eq!(split.main, "Game");
        assert_eq!(split.secondary, Some("Subtitle"));
    }

    #[test]
    fn possessive_keeps_marker() {
        let split = split_title("Disney's The Lion King");
        assert_eq!(split.main, "Disney's");
        assert_eq!(split.secondary, Some("The Lion King"));
    }

    #[test]
    fn hyphenated_word_is_not_a_delimiter() {
        let split = split_title("Spider-Man");
        assert_eq!(split.main, "Spider-Man");
        assert_eq!(split.secondary, None);
    }

    #[test]
    fn leading_articles() {
        assert_eq!(strip_leading_article("The Legend of Zelda"), "Legend of Zelda");
        assert_eq!(strip_leading_article("A New Hope"), "New Hope");
        assert_eq!(strip_leading_article("an American Tail"), "American Tail");
        assert_eq!(strip_leading_article("Theme Park"), "Theme Park");
        assert_eq!(strip_leading_article("Another World"), "Another World");
    }

    #[test]
    fn articles_stripped_from_both_halves() {
        assert_eq!(
            split_and_strip_articles("The Legend of Zelda: The Minish Cap"),
            "Legend of Zelda Minish Cap"
        );
        assert_eq!(split_and_strip_articles("The Game - A Subtitle"), "Game Subtitle");
        assert_eq!(split_and_strip_articles("Mario's Adventure"), "Mario's Adventure");
    }

    #[test]
    fn trailing_article() {
        assert_eq!(strip_trailing_article("Legend of Zelda, The"), "Legend of Zelda");
        assert_eq!(
            strip_trailing_article("Legend of Zelda, The: Ocarina of Time"),
            "Legend of Zelda: Ocarina of Time"
        );
        assert_eq!(strip_trailing_article("Story, the (USA)"), "Story (USA)");
        assert_eq!(strip_trailing_article("Breathe, Then Run"), "Breathe, Then Run");
    }
}
