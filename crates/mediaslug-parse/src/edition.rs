use std::sync::LazyLock;

use regex::Regex;

/// Generic "version"/"edition" words in the languages seen in catalogs.
static RE_EDITION_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\s+(?:version|edition|ausgabe|versione|edizione|versao|versão|edicao|edição|バージョン|エディション|ヴァージョン)$",
    )
    .unwrap()
});

/// Explicit version numbers: "v1.2", "v.2", "vIII".
static RE_VERSION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+v\.?(?:\d{1,3}(?:\.\d{1,4})*|[IVX]{1,5})$").unwrap());

/// Drop a trailing generic edition word, then a trailing version number.
///
/// Qualifiers that name a different product (Special, Deluxe, GOTY, ...) stay:
/// "Skyrim Special Edition" → "Skyrim Special".
pub fn strip_edition_and_version_suffixes(s: &str) -> String {
    let s = RE_EDITION_SUFFIX.replace(s.trim(), "");
    let s = RE_VERSION_SUFFIX.replace(s.trim(), "");
    s.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_words() {
        assert_eq!(strip_edition_and_version_suffixes("Pokemon Red Version"), "Pokemon Red");
        assert_eq!(strip_edition_and_version_suffixes("Game Edition"), "Game");
        assert_eq!(strip_edition_and_version_suffixes("Spiel Ausgabe"), "Spiel");
        assert_eq!(strip_edition_and_version_suffixes("Gioco Edizione"), "Gioco");
    }

    #[test]
    fn qualifiers_kept() {
        assert_eq!(
            strip_edition_and_version_suffixes("Skyrim Special Edition"),
            "Skyrim Special"
        );
        assert_eq!(strip_edition_and_version_suffixes("Game Deluxe Edition"), "Game Deluxe");
        assert_eq!(strip_edition_and_version_suffixes("Doom Ultimate"), "Doom Ultimate");
    }

    #[test]
    fn version_numbers() {
        assert_eq!(strip_edition_and_version_suffixes("Game v1.2"), "Game");
        assert_eq!(strip_edition_and_version_suffixes("Game v.2"), "Game");
        assert_eq!(strip_edition_and_version_suffixes("Street Fighter II v2.0"), "Street Fighter II");
        assert_eq!(strip_edition_and_version_suffixes("Game vIII"), "Game");
    }

    #[test]
    fn japanese_suffix_needs_space() {
        assert_eq!(strip_edition_and_version_suffixes("ドラゴンクエスト バージョン"), "ドラゴンクエスト");
        assert_eq!(
            strip_edition_and_version_suffixes("ドラゴンクエストバージョン"),
            "ドラゴンクエストバージョン"
        );
    }

    #[test]
    fn only_trailing() {
        assert_eq!(
            strip_edition_and_version_suffixes("Edition Wars Returns"),
            "Edition Wars Returns"
        );
        assert_eq!(strip_edition_and_version_suffixes("Version"), "Version");
    }
}
