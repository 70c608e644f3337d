use std::sync::LazyLock;

use regex::Regex;

use crate::keyword::{self, TagFlags, MAX_TAG_WORDS};

/// Release group ("-GROUP") right after the last removed tag, optionally
/// behind a release year ("FLAC.2020-GRP"). At least two letters, so dates
/// ("-15") and markers ("-E02") never match.
static RE_GROUP_TAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[._ ](?:19|20)\d{2})?(-[A-Za-z]{2}[A-Za-z0-9]*)[._ ]*$").unwrap()
});

/// Separator runs left behind where tags were cut out of a scene name.
static RE_SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([._])[._]+").unwrap());

static RE_EPISODE_DOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(s\d+)\.(e\d+)").unwrap());

static RE_DATE_DOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2,4})\.(\d{2})\.(\d{2,4})").unwrap());

static RE_DISC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:cd|disc|disk)\s*\d{1,2}\b").unwrap());

const EPISODE_DOT: char = '\u{E000}';
const DATE_DOT: char = '\u{E001}';

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '.' | '_' | '-' | '(' | ')' | '[' | ']' | '{' | '}')
}

/// Whether the name uses dots or underscores instead of spaces
/// ("Show.Name.S01E02.720p").
pub fn is_scene_name(s: &str) -> bool {
    let s = s.trim();
    !s.is_empty() && !s.contains(char::is_whitespace) && s.contains(['.', '_'])
}

/// Byte spans of the separator-delimited words in `s`.
fn word_spans(s: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, c) in s.char_indices() {
        match (is_separator(c), start) {
            (true, Some(st)) => {
                spans.push((st, i));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(st) = start {
        spans.push((st, s.len()));
    }
    spans
}

/// Remove every tag in `scope`, plus a trailing release group attached to the
/// last removed tag. Hyphens inside the title ("Spider-Man") are never a
/// group.
fn strip_tags(s: &str, scope: TagFlags) -> String {
    let scene = is_scene_name(s);
    let spans = word_spans(s);
    let mut removed: Vec<(usize, usize)> = Vec::new();

    let mut i = 0;
    while i < spans.len() {
        let max = MAX_TAG_WORDS.min(spans.len() - i);
        let matched = (1..=max).rev().find(|&n| {
            // Multi-word tags only span a single separator character.
            let contiguous = spans[i..i + n].windows(2).all(|w| w[1].0 - w[0].1 == 1);
            let key = spans[i..i + n]
                .iter()
                .map(|&(a, b)| s[a..b].to_lowercase())
                .collect::<Vec<_>>()
                .join(" ");
            contiguous && keyword::lookup(&key, scope, scene).is_some()
        });

        match matched {
            Some(n) => {
                removed.push((spans[i].0, spans[i + n - 1].1));
                i += n;
            }
            None => i += 1,
        }
    }

    let Some(&(_, last_end)) = removed.last() else {
        return s.trim().to_string();
    };
    let end = RE_GROUP_TAIL
        .captures(&s[last_end..])
        .and_then(|caps| caps.get(1))
        .map_or(s.len(), |group| last_end + group.start());

    let mut result = String::with_capacity(s.len());
    let mut cursor = 0;
    for (a, b) in removed {
        result.push_str(&s[cursor..a]);
        cursor = b;
    }
    result.push_str(&s[cursor..end]);

    let result = RE_SEPARATOR_RUN.replace_all(&result, "${1}");
    result
        .trim_end_matches(is_separator)
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '.' | '_' | '-'))
        .to_string()
}

/// Strip quality, source, codec, audio and release tags from an episode name.
///
/// "Breaking.Bad.S01E02.1080p.BluRay.x264-GROUP" → "Breaking.Bad.S01E02".
pub fn strip_scene_tags(s: &str) -> String {
    strip_tags(s, TagFlags::TV)
}

/// Like [`strip_scene_tags`] but keeps edition qualifiers (Extended, Director's
/// Cut, ...) and also strips HDR and 3D tags.
pub fn strip_movie_scene_tags(s: &str) -> String {
    strip_tags(s, TagFlags::MOVIE)
}

/// Strip audio format, bitrate and source tags plus disc numbers.
pub fn strip_music_scene_tags(s: &str) -> String {
    let s = strip_tags(s, TagFlags::MUSIC);
    let s = RE_DISC.replace_all(&s, "");
    s.trim().to_string()
}

/// Remove disc numbers ("CD1", "Disc 2").
pub fn strip_disc_numbers(s: &str) -> String {
    RE_DISC
        .replace_all(s, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turn scene dots into spaces, keeping the dots of episode markers
/// ("S01.E02") and dotted dates ("2024.01.15").
pub fn normalize_dot_separators(s: &str) -> String {
    if !s.contains('.') {
        return s.trim().to_string();
    }

    let protected = RE_EPISODE_DOT.replace_all(s, format!("${{1}}{EPISODE_DOT}${{2}}"));
    let protected = RE_DATE_DOT.replace_all(
        &protected,
        format!("${{1}}{DATE_DOT}${{2}}{DATE_DOT}${{3}}"),
    );

    protected
        .replace('.', " ")
        .replace([EPISODE_DOT, DATE_DOT], ".")
        .trim()
        .to_string()
}
