use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::brackets::strip_metadata_brackets;
use crate::scene::{normalize_dot_separators, strip_movie_scene_tags};
use crate::structure::{split_and_strip_articles, strip_trailing_article};
use crate::width::normalize_width;

static RE_YEAR_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(((?:18|19|20)\d{2})\)").unwrap());
static RE_YEAR_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[((?:18|19|20)\d{2})\]").unwrap());
static RE_YEAR_DOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.((?:18|19|20)\d{2})(?:\.|$)").unwrap());
static RE_YEAR_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b((?:18|19|20)\d{2})\b").unwrap());

/// Media-server ID tags: `{imdb-tt0133093}`, `[tmdbid-603]`, `{tvdb-81189}`.
static RE_EXTERNAL_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[\[{]((?:imdb|tmdb|tvdb)(?:id)?[-=](?:tt)?\d+)[\]}]").unwrap()
});

/// "<qualifier> Edition|Cut|Version|Release", e.g. "Director's Cut".
static RE_EDITION_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([\p{L}\d']+)\s+(?:edition|cut|version|release)\b").unwrap()
});

static RE_EDITION_STANDALONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:extended|unrated|remastered|theatrical|uncut|imax)\b").unwrap()
});

static RE_EDITION_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(?:edition|version|cut|release)$").unwrap());

/// Which notation the release year was taken from, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum YearSource {
    Parenthesized,
    Bracketed,
    DotScene,
    Bare,
}

/// Structure recovered from a movie file or release name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MovieElements {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_source: Option<YearSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub external_ids: Vec<String>,
}

struct YearMatch {
    year: u16,
    source: YearSource,
    span: Range<usize>,
}

fn find_year(s: &str) -> Option<YearMatch> {
    let tiers: [(&Regex, YearSource); 4] = [
        (&*RE_YEAR_PAREN, YearSource::Parenthesized),
        (&*RE_YEAR_BRACKET, YearSource::Bracketed),
        (&*RE_YEAR_DOT, YearSource::DotScene),
        (&*RE_YEAR_BARE, YearSource::Bare),
    ];

    tiers.into_iter().find_map(|(re, source)| {
        let caps = re.captures(s)?;
        let whole = caps.get(0)?;
        let digits = caps.get(1)?;
        Some(YearMatch {
            year: digits.as_str().parse().ok()?,
            source,
            span: whole.start()..digits.end(),
        })
    })
}

/// Release year and where it was found. Parenthesized beats bracketed beats
/// dot-separated beats bare; within a tier the first occurrence wins.
pub fn extract_movie_year(title: &str) -> Option<(u16, YearSource)> {
    find_year(title).map(|m| (m.year, m.source))
}

fn find_edition(s: &str) -> Option<String> {
    let phrase = RE_EDITION_PHRASE.captures_iter(s).find(|caps| {
        !matches!(
            caps[1].to_ascii_lowercase().as_str(),
            "the" | "a" | "an" | "of"
        )
    });
    phrase
        .and_then(|caps| caps.get(0))
        .or_else(|| RE_EDITION_STANDALONE.find(s))
        .map(|m| m.as_str().to_string())
}

/// Drop trailing "Edition", "Version", "Cut" and "Release" words until none
/// remain, keeping the qualifier in front of them.
fn strip_edition_words(s: &str) -> String {
    let mut s = s.trim().to_string();
    while let Some(m) = RE_EDITION_WORD.find(&s) {
        s.truncate(m.start());
    }
    s
}

/// Parse a movie name into title, year, edition and media-server IDs.
pub fn parse_movie_elements(title: &str) -> MovieElements {
    let s = normalize_width(title);

    let external_ids: Vec<String> = RE_EXTERNAL_ID
        .captures_iter(&s)
        .map(|caps| caps[1].to_string())
        .collect();
    let s = RE_EXTERNAL_ID.replace_all(&s, "").into_owned();

    let year = find_year(&s);
    let s = match &year {
        Some(m) if m.source == YearSource::DotScene => {
            format!("{}{}", &s[..m.span.start], &s[m.span.end..])
        }
        _ => s,
    };

    let s = strip_movie_scene_tags(&s);
    let s = normalize_dot_separators(&s);
    let edition = find_edition(&s);
    let s = strip_metadata_brackets(&s);
    let s = strip_edition_words(&s);
    let s = split_and_strip_articles(&s);
    let title = strip_trailing_article(&s);

    MovieElements {
        title,
        year: year.as_ref().map(|m| m.year),
        year_source: year.as_ref().map(|m| m.source),
        edition,
        external_ids,
    }
}

/// Movie title with year, edition words, IDs and release tags removed.
pub fn parse_movie(title: &str) -> String {
    parse_movie_elements(title).title
}
