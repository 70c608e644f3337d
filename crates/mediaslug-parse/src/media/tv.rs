use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

use crate::brackets::strip_metadata_brackets;
use crate::scene::{normalize_dot_separators, strip_scene_tags};
use crate::structure::{split_and_strip_articles, strip_trailing_article};
use crate::width::normalize_width;

// ── Episode marker patterns ─────────────────────────────────────

/// S01E02, S01.E02, S01_E02, S01E01E02, S01E01-E02, S01E01-02.
static RE_SEASON_EPISODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(^|[^\p{L}\p{N}])s(\d{1,3})[._ ]?e(\d{1,4})(?:-?e(\d{1,4})|-(\d{1,4}))?($|[^\p{L}\p{N}])",
    )
    .unwrap()
});

/// 1x02, 0x01, 1x01-02.
static RE_CROSS_EPISODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(^|[^\p{L}\p{N}])(\d{1,2})x(\d{2,3})(?:-(\d{2,3}))?($|[^\p{L}\p{N}])").unwrap()
});

static RE_DATE_YMD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[^\p{N}])((?:19|20)\d{2})[-./](\d{2})[-./](\d{2})($|[^\p{N}])").unwrap()
});

static RE_DATE_DMY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[^\p{N}])(\d{2})[-./](\d{2})[-./]((?:19|20)\d{2})($|[^\p{N}])").unwrap()
});

// Absolute numbering, tried in order, only when nothing else matched.
static RE_ABSOLUTE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(^|[^\p{L}\p{N}])(?:episode\s*|ep\.?\s*|e)(\d{1,4})($|[^\p{L}\p{N}])").unwrap()
});
static RE_ABSOLUTE_HASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|\s)#(\d{1,4})($|[^\p{N}])").unwrap());
static RE_ABSOLUTE_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\s-\s)(\d{2,3})($|\s)").unwrap());
static RE_ABSOLUTE_LEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^()(0\d{2,3}|\d{3})(\s+-\s+)").unwrap());

// Canonical forms, as written by the stages above.
static RE_CANONICAL_SEASON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\p{L}\p{N}])(s(\d{2,3})e(\d{2,4})(?:e(\d{2,4}))?)(?:$|[^\p{L}\p{N}])").unwrap()
});
static RE_CANONICAL_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\p{N}])((\d{4})-(\d{2})-(\d{2}))(?:$|[^\p{N}])").unwrap()
});
static RE_CANONICAL_ABSOLUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\p{L}\p{N}])(e(\d{2,4}))(?:$|[^\p{L}\p{N}])").unwrap()
});

static RE_COMPONENT_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+[-|]\s+").unwrap());

// ── Types ───────────────────────────────────────────────────────

/// Where an episode sits, in one of the three canonical notations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EpisodeMarker {
    Season {
        season: u32,
        episode: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        end_episode: Option<u32>,
    },
    Date { year: u16, month: u8, day: u8 },
    Absolute { number: u32 },
}

impl EpisodeMarker {
    /// `s01e02`, `s01e01e02`, `2024-01-15` or `e001`.
    pub fn canonical(&self) -> String {
        match self {
            Self::Season {
                season,
                episode,
                end_episode: Some(end),
            } => format!("s{season:02}e{episode:02}e{end:02}"),
            Self::Season {
                season, episode, ..
            } => format!("s{season:02}e{episode:02}"),
            Self::Date { year, month, day } => format!("{year:04}-{month:02}-{day:02}"),
            Self::Absolute { number } => format!("e{number:03}"),
        }
    }
}

impl fmt::Display for EpisodeMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// Structure recovered from an episode name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TvShowElements {
    /// `show marker title`, articles stripped; input to the shared pipeline.
    pub normalized: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<EpisodeMarker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_title: Option<String>,
}

// ── Marker canonicalization ─────────────────────────────────────

fn number(s: &str) -> u32 {
    s.parse().unwrap_or(0)
}

fn canonicalize_season_markers(s: &str) -> String {
    let s = RE_SEASON_EPISODE.replace_all(s, |caps: &Captures| {
        let marker = EpisodeMarker::Season {
            season: number(&caps[2]),
            episode: number(&caps[3]),
            end_episode: caps.get(4).or_else(|| caps.get(5)).map(|m| number(m.as_str())),
        };
        format!("{}{marker}{}", &caps[1], &caps[6])
    });
    RE_CROSS_EPISODE
        .replace_all(&s, |caps: &Captures| {
            let marker = EpisodeMarker::Season {
                season: number(&caps[2]),
                episode: number(&caps[3]),
                end_episode: caps.get(4).map(|m| number(m.as_str())),
            };
            format!("{}{marker}{}", &caps[1], &caps[5])
        })
        .into_owned()
}

fn date_marker(year: &str, month: &str, day: &str) -> Option<EpisodeMarker> {
    let year: u16 = year.parse().ok()?;
    let month: u8 = month.parse().ok()?;
    let day: u8 = day.parse().ok()?;
    ((1..=12).contains(&month) && (1..=31).contains(&day))
        .then_some(EpisodeMarker::Date { year, month, day })
}

/// Rewrite "2024.01.15" and "15/01/2024" as "2024-01-15". Impossible dates
/// are left alone.
fn canonicalize_dates(s: &str) -> String {
    let s = RE_DATE_YMD.replace_all(s, |caps: &Captures| {
        match date_marker(&caps[2], &caps[3], &caps[4]) {
            Some(marker) => format!("{}{marker}{}", &caps[1], &caps[5]),
            None => caps[0].to_string(),
        }
    });
    RE_DATE_DMY
        .replace_all(&s, |caps: &Captures| {
            match date_marker(&caps[4], &caps[3], &caps[2]) {
                Some(marker) => format!("{}{marker}{}", &caps[1], &caps[5]),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Rewrite the first absolute episode number as `e%03d`.
fn canonicalize_absolute(s: &str) -> String {
    let patterns: [&Regex; 4] = [
        &*RE_ABSOLUTE_WORD,
        &*RE_ABSOLUTE_HASH,
        &*RE_ABSOLUTE_DASH,
        &*RE_ABSOLUTE_LEADING,
    ];
    match patterns.into_iter().find(|re| re.is_match(s)) {
        Some(re) => re
            .replace(s, |caps: &Captures| {
                let marker = EpisodeMarker::Absolute {
                    number: number(&caps[2]),
                };
                format!("{}{marker}{}", &caps[1], &caps[3])
            })
            .into_owned(),
        None => s.to_string(),
    }
}

/// Locate the canonical marker with the highest priority: season/episode,
/// then air date, then absolute number.
fn find_marker(s: &str) -> Option<(std::ops::Range<usize>, EpisodeMarker)> {
    if let Some(caps) = RE_CANONICAL_SEASON.captures(s) {
        let span = caps.get(1)?.range();
        let marker = EpisodeMarker::Season {
            season: number(&caps[2]),
            episode: number(&caps[3]),
            end_episode: caps.get(4).map(|m| number(m.as_str())),
        };
        return Some((span, marker));
    }
    if let Some(caps) = RE_CANONICAL_DATE.captures(s) {
        let span = caps.get(1)?.range();
        return date_marker(&caps[2], &caps[3], &caps[4]).map(|marker| (span, marker));
    }
    let caps = RE_CANONICAL_ABSOLUTE.captures(s)?;
    let span = caps.get(1)?.range();
    Some((
        span,
        EpisodeMarker::Absolute {
            number: number(&caps[2]),
        },
    ))
}

// ── Reordering ──────────────────────────────────────────────────

fn is_component_edge(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '|' | '.' | '_')
}

struct Reordered {
    text: String,
    show: Option<String>,
    marker: Option<EpisodeMarker>,
    episode_title: Option<String>,
}

/// Move the marker after the show name: "S01E02 - Show - Title" and
/// "Show - 1x02 - Title" both become "Show s01e02 Title".
fn reorder_components(s: &str) -> Reordered {
    let Some((span, marker)) = find_marker(s) else {
        return Reordered {
            text: s.to_string(),
            show: None,
            marker: None,
            episode_title: None,
        };
    };

    let before = s[..span.start].trim_matches(is_component_edge);
    let after = s[span.end..].trim_matches(is_component_edge);
    let rest = [before, after]
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" - ");

    let parts: Vec<&str> = RE_COMPONENT_SPLIT
        .split(&rest)
        .map(|p| p.trim_matches(is_component_edge))
        .filter(|p| !p.is_empty())
        .collect();

    let canonical = marker.canonical();
    match parts.split_first() {
        None => Reordered {
            text: canonical,
            show: None,
            marker: Some(marker),
            episode_title: None,
        },
        Some((show, [])) => Reordered {
            text: format!("{show} {canonical}"),
            show: Some(show.to_string()),
            marker: Some(marker),
            episode_title: None,
        },
        Some((show, title)) => {
            let title = title.join(" ");
            Reordered {
                text: format!("{show} {canonical} {title}"),
                show: Some(show.to_string()),
                marker: Some(marker),
                episode_title: Some(title),
            }
        }
    }
}

// ── Public API ──────────────────────────────────────────────────

/// Parse an episode name into show, marker and episode title.
pub fn parse_tv_show_elements(title: &str) -> TvShowElements {
    let s = normalize_width(title);
    let s = strip_scene_tags(&s);
    let s = normalize_dot_separators(&s);
    let s = strip_metadata_brackets(&s);
    let s = canonicalize_dates(&s);
    let s = canonicalize_season_markers(&s);

    let has_marker = RE_CANONICAL_SEASON.is_match(&s) || RE_CANONICAL_DATE.is_match(&s);
    let s = if has_marker {
        s
    } else {
        canonicalize_absolute(&s)
    };

    let reordered = reorder_components(&s);
    let normalized = strip_trailing_article(&split_and_strip_articles(&reordered.text));

    TvShowElements {
        normalized,
        show: reordered.show,
        marker: reordered.marker,
        episode_title: reordered.episode_title,
    }
}

/// Normalize an episode name so every marker notation of the same episode
/// yields the same string.
pub fn parse_tv_show(title: &str) -> String {
    parse_tv_show_elements(title).normalized
}
