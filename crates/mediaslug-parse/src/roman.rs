use crate::script::is_extended_latin;

/// Numerals II through XIX, longest first so "XVIII" never matches as "XIII".
/// A lone X is absent: "Mega Man X" is a name, not "Mega Man 10".
const ROMAN_NUMERALS: &[(&str, &str)] = &[
    ("XVIII", "18"),
    ("XVII", "17"),
    ("XIII", "13"),
    ("VIII", "8"),
    ("XIX", "19"),
    ("XVI", "16"),
    ("XIV", "14"),
    ("XII", "12"),
    ("VII", "7"),
    ("III", "3"),
    ("XV", "15"),
    ("XI", "11"),
    ("IX", "9"),
    ("VI", "6"),
    ("IV", "4"),
    ("II", "2"),
    ("V", "5"),
];

/// Word characters for numeral boundaries: ASCII letters, digits and `_` only,
/// so a numeral glued to kana or hangul still converts.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Whether `chars[pos..]` starts with `pattern`, ignoring ASCII case.
fn matches_at(chars: &[char], pos: usize, pattern: &str) -> bool {
    let n = pattern.len();
    pos + n <= chars.len()
        && chars[pos..pos + n]
            .iter()
            .zip(pattern.chars())
            .all(|(c, p)| c.to_ascii_uppercase() == p)
}

/// Convert standalone Roman numerals II–XIX to digits and lowercase the result.
///
/// A numeral converts only when bordered by non-word characters. Accented
/// Latin letters on either side block conversion ("Václav" stays a name),
/// while CJK neighbours do not ("クエストVII" → "クエスト7").
pub fn convert_roman_numerals(s: &str) -> String {
    if !s.contains(['i', 'v', 'x', 'I', 'V', 'X']) {
        return s.to_lowercase();
    }

    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len());
    let mut i = 0;

    while i < chars.len() {
        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();

        let at_boundary = prev.map_or(true, |p| !is_word_char(p) && !is_extended_latin(p))
            && !next.is_some_and(is_extended_latin);

        let numeral = at_boundary
            .then(|| {
                ROMAN_NUMERALS.iter().find(|(pattern, _)| {
                    let end = i + pattern.len();
                    matches_at(&chars, i, pattern)
                        && chars
                            .get(end)
                            .map_or(true, |&c| !is_word_char(c) && !is_extended_latin(c))
                })
            })
            .flatten();

        match numeral {
            Some((pattern, digits)) => {
                result.push_str(digits);
                i += pattern.len();
            }
            None => {
                result.extend(chars[i].to_lowercase());
                i += 1;
            }
        }
    }

    result
}
