use std::sync::LazyLock;

use regex::Regex;

static RE_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[:_\-/\\,;]+").unwrap());
static RE_SPACED_PLUS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+\+\s+").unwrap());

/// `'n'`, `'n`, `n'` and a bare `n` between spaces all read as "and".
static RE_CONJUNCTIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(?:'n'|'n|n'|n)\s+").unwrap());

/// Fold conjunction spellings to "and" and structural separators to spaces.
///
/// Periods are left alone: abbreviation lookup still needs "Bros." intact.
pub fn normalize_symbols_and_separators(s: &str) -> String {
    let s = s.replace('&', " and ");
    let s = RE_SEPARATORS.replace_all(&s, " ");
    let s = collapse_whitespace(&s);
    let s = RE_SPACED_PLUS.replace_all(&s, " and ");
    // Applied twice: adjacent conjunctions share the surrounding space.
    let s = RE_CONJUNCTIONS.replace_all(&s, " and ");
    let s = RE_CONJUNCTIONS.replace_all(&s, " and ");
    let s = attached_plus(&s);
    collapse_whitespace(&s)
}

/// A `+` glued to the end of a word ("Disney+", "Game+") reads as "plus".
/// Runs like "C++" and detached signs are left for the emitter to drop.
fn attached_plus(s: &str) -> String {
    if !s.contains('+') {
        return s.to_string();
    }

    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 8);
    for (i, &c) in chars.iter().enumerate() {
        if c != '+' {
            result.push(c);
            continue;
        }
        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();
        let glued = prev.is_some_and(char::is_alphanumeric);
        let run = next == Some('+') || prev == Some('+');
        if glued && !run {
            result.push_str(" plus ");
        } else {
            result.push(c);
        }
    }
    result
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
