use std::sync::LazyLock;

use phf::phf_map;
use regex::Regex;

/// Abbreviations that only expand with their period: without it each one is
/// an ordinary word ("feat", "no", "st" for street).
static PERIOD_REQUIRED: phf::Map<&'static str, &'static str> = phf_map! {
    "feat." => "featuring",
    "no." => "number",
    "st." => "saint",
};

/// Abbreviations that expand with or without a trailing period.
static PERIOD_OPTIONAL: phf::Map<&'static str, &'static str> = phf_map! {
    "vs" => "versus",
    "bros" => "brothers",
    "dr" => "doctor",
    "mr" => "mister",
    "vol" => "volume",
    "pt" => "part",
    "ft" => "featuring",
    "jr" => "junior",
    "sr" => "senior",
};

static NUMBER_WORDS: phf::Map<&'static str, &'static str> = phf_map! {
    "one" => "1",
    "two" => "2",
    "three" => "3",
    "four" => "4",
    "five" => "5",
    "six" => "6",
    "seven" => "7",
    "eight" => "8",
    "nine" => "9",
    "ten" => "10",
    "eleven" => "11",
    "twelve" => "12",
    "thirteen" => "13",
    "fourteen" => "14",
    "fifteen" => "15",
    "sixteen" => "16",
    "seventeen" => "17",
    "eighteen" => "18",
    "nineteen" => "19",
    "twenty" => "20",
};

static RE_ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d+)(?:st|nd|rd|th)\b").unwrap());

fn lookup_abbreviation(lower: &str) -> Option<&'static str> {
    PERIOD_REQUIRED
        .get(lower)
        .or_else(|| PERIOD_OPTIONAL.get(lower.strip_suffix('.').unwrap_or(lower)))
        .copied()
}

fn lookup_number_word(lower: &str) -> Option<&'static str> {
    NUMBER_WORDS
        .get(lower.strip_suffix('.').unwrap_or(lower))
        .copied()
}

/// Replace whitespace-delimited tokens found in `lookup`, keeping the rest as-is.
fn map_tokens(s: &str, lookup: fn(&str) -> Option<&'static str>) -> String {
    s.split_whitespace()
        .map(|word| lookup(&word.to_lowercase()).unwrap_or(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Expand common abbreviations ("Bros." → "brothers", "Dr." → "doctor").
///
/// "feat", "no" and "st" need their period; the rest expand either way.
pub fn expand_abbreviations(s: &str) -> String {
    map_tokens(s, lookup_abbreviation)
}

/// Replace the number words one through twenty with digits.
pub fn expand_number_words(s: &str) -> String {
    map_tokens(s, lookup_number_word)
}

/// Strip ordinal suffixes from numbers that start a word ("2nd" → "2").
pub fn normalize_ordinals(s: &str) -> String {
    RE_ORDINAL.replace_all(s, "${1}").into_owned()
}
