use unicode_normalization::UnicodeNormalization;

/// Fold character widths and typographic punctuation to plain forms.
///
/// Fullwidth Latin letters, digits and punctuation become ASCII, halfwidth
/// katakana and hangul become their fullwidth forms, curly quotes and primes
/// become `'`/`"`, every dash variant becomes `-` and `…` becomes `...`.
///
/// Must run before title splitting: a fullwidth colon or an em-dash used as a
/// separator is otherwise invisible to the delimiter search.
pub fn normalize_width(s: &str) -> String {
    if s.is_ascii() && !s.contains('`') {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            // Fullwidth ASCII block maps 1:1 onto printable ASCII.
            '\u{FF01}'..='\u{FF5E}' => {
                result.push(char::from_u32(c as u32 - 0xFEE0).unwrap_or(c));
            }
            '\u{3000}' => result.push(' '),
            // Halfwidth katakana, hangul and fullwidth signs. NFKC of the single
            // character gives the canonical width; voiced marks compose later.
            '\u{FF61}'..='\u{FFDC}' | '\u{FFE0}'..='\u{FFEE}' => result.extend(c.nfkc()),
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' | '\u{2035}'
            | '\u{0060}' | '\u{00B4}' | '\u{02BC}' | '\u{02B9}' => result.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' | '\u{2036}' => {
                result.push('"')
            }
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2015}'
            | '\u{2212}' | '\u{FE58}' | '\u{FE63}' => result.push('-'),
            '\u{2026}' => result.push_str("..."),
            c => result.push(c),
        }
    }
    result
}
