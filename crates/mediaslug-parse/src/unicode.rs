use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::pipeline::PipelineContext;
use crate::script::{is_extended_latin, ScriptType};

/// "Other symbol" and "currency symbol" categories: ™ © ® ♪ € ¥ and emoji.
static RE_SYMBOLS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\p{So}\p{Sc}]").unwrap());

/// Script-aware Unicode normalization of a single title.
///
/// Detects the script itself; use [`normalize_unicode_with`] inside the
/// pipeline where the context is already known.
pub fn normalize_unicode(s: &str) -> String {
    normalize_unicode_with(s, &PipelineContext::new(s))
}

/// Normalize using a precomputed pipeline context.
///
/// ASCII-only input is returned untouched. Otherwise symbols are removed and
/// the script decides the rest:
///
/// | script | normal form | marks removed | punctuation |
/// |---|---|---|---|
/// | Latin | NFKC | all combining marks | |
/// | CJK | NFC | | |
/// | Cyrillic | NFKC | all combining marks | |
/// | Greek | NFKC | all combining marks | `;` → `?` |
/// | Indic | NFKC | none (matras kept) | |
/// | Arabic | NFKC | tashkeel U+064B–U+065F | `، ؛ ؟` |
/// | Hebrew | NFKC | niqqud U+0591–U+05C7 | |
/// | Thai | NFKC | U+0E34–U+0E3A, U+0E47–U+0E4E | |
/// | Burmese, Khmer, Lao | NFKC | | |
/// | Amharic | NFKC | | `። ፤ ፣ ፡` |
pub fn normalize_unicode_with(s: &str, ctx: &PipelineContext) -> String {
    if ctx.is_ascii() {
        return s.to_string();
    }

    let s = RE_SYMBOLS.replace_all(s, "");

    match ctx.script() {
        ScriptType::Latin => {
            let s = nfkc(&s);
            let s = transliterate(&s);
            remove_diacritics(&s)
        }
        ScriptType::Cjk => {
            // NFKC would rewrite some katakana sequences; compose only.
            let s: String = s.nfc().collect();
            fold_latin_letters(&s)
        }
        ScriptType::Cyrillic => remove_diacritics(&nfkc(&s)),
        ScriptType::Greek => remove_diacritics(&nfkc(&s)).replace(';', "?"),
        ScriptType::Indic => fold_latin_letters(&nfkc(&s)),
        ScriptType::Arabic => {
            let s: String = nfkc(&s)
                .chars()
                .filter(|c| !('\u{064B}'..='\u{065F}').contains(c))
                .map(|c| match c {
                    '\u{060C}' => ',',
                    '\u{061B}' => ';',
                    '\u{061F}' => '?',
                    c => c,
                })
                .collect();
            fold_latin_letters(&s)
        }
        ScriptType::Hebrew => {
            let s: String = nfkc(&s)
                .chars()
                .filter(|c| !('\u{0591}'..='\u{05C7}').contains(c))
                .collect();
            fold_latin_letters(&s)
        }
        ScriptType::Thai => {
            let s: String = nfkc(&s)
                .chars()
                .filter(|c| {
                    !('\u{0E34}'..='\u{0E3A}').contains(c) && !('\u{0E47}'..='\u{0E4E}').contains(c)
                })
                .collect();
            fold_latin_letters(&s)
        }
        ScriptType::Burmese | ScriptType::Khmer | ScriptType::Lao => fold_latin_letters(&nfkc(&s)),
        ScriptType::Amharic => {
            let mut result = String::with_capacity(s.len());
            for c in nfkc(&s).chars() {
                match c {
                    '\u{1362}' => result.push('.'),
                    '\u{1364}' => result.push(';'),
                    '\u{1363}' => result.push(','),
                    '\u{1361}' => result.push(' '),
                    c => result.push(c),
                }
            }
            fold_latin_letters(&result)
        }
    }
}

fn nfkc(s: &str) -> String {
    s.nfkc().collect()
}

/// NFD, drop every combining mark, recompose.
fn remove_diacritics(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}

/// Latin letters with no canonical decomposition.
fn transliterate_char(c: char) -> Option<&'static str> {
    Some(match c {
        'æ' => "ae",
        'Æ' => "AE",
        'œ' => "oe",
        'Œ' => "OE",
        'ß' => "ss",
        'ẞ' => "SS",
        'þ' => "th",
        'Þ' => "TH",
        'ð' => "d",
        'Ð' => "D",
        'ø' => "o",
        'Ø' => "O",
        'ł' => "l",
        'Ł' => "L",
        'đ' => "d",
        'Đ' => "D",
        'ı' => "i",
        '\u{00D7}' => "x",
        _ => return None,
    })
}

fn transliterate(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match transliterate_char(c) {
            Some(t) => result.push_str(t),
            None => result.push(c),
        }
    }
    result
}

/// Strip accents from Latin letters embedded in a non-Latin title, leaving
/// every other character (and its marks) alone.
fn fold_latin_letters(s: &str) -> String {
    if !s.chars().any(|c| is_extended_latin(c) || c == '\u{00D7}') {
        return s.to_string();
    }
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        if let Some(t) = transliterate_char(c) {
            result.push_str(t);
        } else if is_extended_latin(c) {
            result.extend(c.nfd().filter(|m| !is_combining_mark(*m)));
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_untouched() {
        assert_eq!(normalize_unicode("Sonic & Knuckles $"), "Sonic & Knuckles $");
    }

    #[test]
    fn latin_diacritics_removed() {
        assert_eq!(normalize_unicode("Pokémon Café"), "Pokemon Cafe");
        assert_eq!(normalize_unicode("Ōkami"), "Okami");
    }

    #[test]
    fn symbols_removed() {
        assert_eq!(normalize_unicode("Sonic™ Adventure"), "Sonic Adventure");
        assert_eq!(normalize_unicode("Game© 2000®"), "Game 2000");
        assert_eq!(normalize_unicode("Price €5"), "Price 5");
    }

    #[test]
    fn compatibility_forms() {
        assert_eq!(normalize_unicode("ﬁnal"), "final");
        assert_eq!(normalize_unicode("Game²"), "Game2");
    }

    #[test]
    fn latin_transliteration() {
        assert_eq!(normalize_unicode("Æther Straße"), "AEther Strasse");
        assert_eq!(normalize_unicode("Øresund Łódź"), "Oresund Lodz");
        assert_eq!(normalize_unicode("Hunter×Hunter"), "HunterxHunter");
    }

    #[test]
    fn cjk_keeps_dakuten() {
        // Decomposed ガ composes instead of losing the voiced mark.
        assert_eq!(normalize_unicode("\u{30AB}\u{3099}ンダム"), "ガンダム");
        assert_eq!(normalize_unicode("ドラゴンクエスト"), "ドラゴンクエスト");
    }

    #[test]
    fn cjk_title_with_accented_latin() {
        assert_eq!(normalize_unicode("Pokémon ポケモン"), "Pokemon ポケモン");
    }

    #[test]
    fn cyrillic_diacritics() {
        assert_eq!(normalize_unicode("Ёлки"), "Елки");
    }

    #[test]
    fn greek_accents_and_question_mark() {
        assert_eq!(normalize_unicode("Σούπερ Μάριο"), "Σουπερ Μαριο");
        assert_eq!(normalize_unicode("Τι είναι;"), "Τι ειναι?");
    }

    #[test]
    fn indic_matras_preserved() {
        assert_eq!(normalize_unicode("दिलवाले"), "दिलवाले");
    }

    #[test]
    fn arabic_tashkeel_removed() {
        assert_eq!(normalize_unicode("مُوسِيقَى"), "موسيقى");
        assert_eq!(normalize_unicode("لعبة؟"), "لعبة?");
    }

    #[test]
    fn hebrew_niqqud_removed() {
        assert_eq!(normalize_unicode("שָׁלוֹם"), "שלום");
    }

    #[test]
    fn thai_tone_marks_removed() {
        assert_eq!(normalize_unicode("เพลง"), "เพลง");
        assert_eq!(normalize_unicode("ไทย\u{0E48}"), "ไทย");
    }

    #[test]
    fn amharic_punctuation() {
        assert_eq!(normalize_unicode("ሙዚቃ፡ጨዋታ።"), "ሙዚቃ ጨዋታ.");
    }
}
