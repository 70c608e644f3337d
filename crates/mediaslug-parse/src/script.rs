use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;

/// Writing system a title is classified under.
///
/// Decides whether the final slug keeps native characters and whether
/// fuzzy matching has to fall back to character n-grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptType {
    Latin,
    Cjk,
    Cyrillic,
    Greek,
    Indic,
    Arabic,
    Hebrew,
    Thai,
    Burmese,
    Khmer,
    Lao,
    Amharic,
}

impl ScriptType {
    pub fn as_str(self) -> &'static str {
        match self {
            ScriptType::Latin => "latin",
            ScriptType::Cjk => "cjk",
            ScriptType::Cyrillic => "cyrillic",
            ScriptType::Greek => "greek",
            ScriptType::Indic => "indic",
            ScriptType::Arabic => "arabic",
            ScriptType::Hebrew => "hebrew",
            ScriptType::Thai => "thai",
            ScriptType::Burmese => "burmese",
            ScriptType::Khmer => "khmer",
            ScriptType::Lao => "lao",
            ScriptType::Amharic => "amharic",
        }
    }

    /// Whether slugs for this script keep native characters.
    pub fn needs_unicode_slug(self) -> bool {
        !matches!(self, ScriptType::Latin)
    }

    /// Whether this script lacks reliable inter-word spacing.
    pub fn needs_ngram_matching(self) -> bool {
        matches!(
            self,
            ScriptType::Thai | ScriptType::Burmese | ScriptType::Khmer | ScriptType::Lao
        )
    }
}

impl std::fmt::Display for ScriptType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Block tables ──────────────────────────────────────────────────────

const CJK: &[(u32, u32)] = &[
    (0x4E00, 0x9FFF),   // CJK unified ideographs
    (0x3400, 0x4DBF),   // extension A
    (0x20000, 0x2A6DF), // extension B
    (0xF900, 0xFAFF),   // compatibility ideographs
    (0x3040, 0x309F),   // hiragana
    (0x30A0, 0x30FF),   // katakana
    (0x31F0, 0x31FF),   // katakana phonetic extensions
    (0xFF65, 0xFF9F),   // halfwidth katakana
    (0xAC00, 0xD7AF),   // hangul syllables
    (0x1100, 0x11FF),   // hangul jamo
    (0x3130, 0x318F),   // hangul compatibility jamo
    (0x3000, 0x303F),   // CJK symbols and punctuation
];

const CYRILLIC: &[(u32, u32)] = &[(0x0400, 0x04FF), (0x0500, 0x052F)];

const INDIC: &[(u32, u32)] = &[(0x0900, 0x0DFF)];

const ARABIC: &[(u32, u32)] = &[
    (0x0600, 0x06FF),
    (0x0750, 0x077F),
    (0x08A0, 0x08FF),
    (0xFB50, 0xFDFF),
    (0xFE70, 0xFEFF),
];

const THAI: &[(u32, u32)] = &[(0x0E00, 0x0E7F)];

const GREEK: &[(u32, u32)] = &[(0x0370, 0x03FF), (0x1F00, 0x1FFF)];

const HEBREW: &[(u32, u32)] = &[(0x0590, 0x05FF), (0xFB1D, 0xFB4F)];

const MYANMAR: &[(u32, u32)] = &[(0x1000, 0x109F)];

const KHMER: &[(u32, u32)] = &[(0x1780, 0x17FF)];

const LAO: &[(u32, u32)] = &[(0x0E80, 0x0EFF)];

const ETHIOPIC: &[(u32, u32)] = &[(0x1200, 0x139F), (0x2D80, 0x2DDF)];

/// Scripts in the order they are probed, most common first.
const SCRIPT_BLOCKS: &[(ScriptType, &[(u32, u32)])] = &[
    (ScriptType::Cjk, CJK),
    (ScriptType::Cyrillic, CYRILLIC),
    (ScriptType::Indic, INDIC),
    (ScriptType::Arabic, ARABIC),
    (ScriptType::Thai, THAI),
    (ScriptType::Greek, GREEK),
    (ScriptType::Hebrew, HEBREW),
    (ScriptType::Burmese, MYANMAR),
    (ScriptType::Khmer, KHMER),
    (ScriptType::Lao, LAO),
    (ScriptType::Amharic, ETHIOPIC),
];

fn in_ranges(c: char, ranges: &[(u32, u32)]) -> bool {
    let cp = c as u32;
    ranges.iter().any(|&(lo, hi)| cp >= lo && cp <= hi)
}

/// The non-Latin script a single character belongs to, if any.
pub fn script_of(c: char) -> Option<ScriptType> {
    if c.is_ascii() {
        return None;
    }
    SCRIPT_BLOCKS
        .iter()
        .find(|(_, ranges)| in_ranges(c, ranges))
        .map(|&(script, _)| script)
}

/// Classify a title by the first character that belongs to a non-Latin block.
///
/// Pure-ASCII input returns [`ScriptType::Latin`] without scanning characters.
pub fn detect_script(s: &str) -> ScriptType {
    if s.is_ascii() {
        return ScriptType::Latin;
    }
    s.chars().find_map(script_of).unwrap_or(ScriptType::Latin)
}

/// Letters, digits and combining marks of a non-Latin script: the characters
/// a Unicode slug keeps besides `[a-z0-9]`. Script punctuation is excluded.
pub fn is_script_letter(c: char) -> bool {
    script_of(c).is_some() && (c.is_alphanumeric() || is_combining_mark(c))
}

/// Latin letters outside ASCII (accented, extended and ligature forms).
pub fn is_extended_latin(c: char) -> bool {
    match c as u32 {
        0x00AA | 0x00BA => true,
        0x00D7 | 0x00F7 => false,
        0x00C0..=0x024F => true,
        0x1E00..=0x1EFF => true,
        0x2C60..=0x2C7F => true,
        0xA720..=0xA7FF => true,
        0xAB30..=0xAB6F => true,
        0xFB00..=0xFB06 => true,
        _ => false,
    }
}
