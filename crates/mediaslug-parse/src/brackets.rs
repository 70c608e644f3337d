/// Bracket pairs tracked independently, in depth-counter order.
const BRACKETS: [(char, char); 4] = [('(', ')'), ('[', ']'), ('{', '}'), ('<', '>')];

/// Remove everything inside `()`, `[]`, `{}` and `<>`, including nested and
/// interleaved pairs.
///
/// Each bracket kind keeps its own depth; a character is emitted only while all
/// four depths are zero. An unclosed opener drops the rest of the string.
/// "Sonic (USA) [!]" → "Sonic".
pub fn strip_metadata_brackets(s: &str) -> String {
    if !s.contains(['(', '[', '{', '<', ')', ']', '}', '>']) {
        return s.trim().to_string();
    }

    let mut depth = [0u32; 4];
    let mut result = String::with_capacity(s.len());

    for c in s.chars() {
        if let Some(i) = BRACKETS.iter().position(|&(open, _)| open == c) {
            depth[i] += 1;
            continue;
        }
        if let Some(i) = BRACKETS.iter().position(|&(_, close)| close == c) {
            depth[i] = depth[i].saturating_sub(1);
            continue;
        }
        if depth.iter().all(|&d| d == 0) {
            result.push(c);
        }
    }

    result.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_and_dump_tags() {
        assert_eq!(strip_metadata_brackets("Sonic (USA) [!]"), "Sonic");
        assert_eq!(strip_metadata_brackets("Title {Europe} <Beta>"), "Title");
    }

    #[test]
    fn inner_text_survives() {
        assert_eq!(strip_metadata_brackets("Game (Rev 1) Deluxe"), "Game Deluxe");
    }

    #[test]
    fn nested() {
        assert_eq!(strip_metadata_brackets("Game ((nested)) [test]"), "Game");
    }

    #[test]
    fn interleaved_kinds() {
        assert_eq!(strip_metadata_brackets("Game ([)] tail"), "Game tail");
        assert_eq!(strip_metadata_brackets("Game ([a)b] tail"), "Game tail");
    }

    #[test]
    fn unclosed_drops_remainder() {
        assert_eq!(strip_metadata_brackets("Game (USA"), "Game");
        assert_eq!(strip_metadata_brackets("(Unclosed"), "");
    }

    #[test]
    fn stray_closer_dropped() {
        assert_eq!(strip_metadata_brackets("Game) Title"), "Game Title");
    }

    #[test]
    fn no_brackets() {
        assert_eq!(strip_metadata_brackets("  Plain Title "), "Plain Title");
    }
}
