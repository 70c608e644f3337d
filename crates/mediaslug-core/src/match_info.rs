use mediaslug_parse::{normalize_width, split_title, strip_leading_article};
use serde::Serialize;

use crate::slug::slugify_string;

/// Slugs for a title and for each half of it, used by the fallback strategies
/// when the full slug has no exact match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TitleMatchInfo {
    pub canonical_slug: String,
    pub main_title_slug: String,
    pub secondary_title_slug: String,
    pub original_input: String,
    pub has_secondary_title: bool,
    pub has_leading_article: bool,
}

/// Split a game title into main and secondary parts and slug each one.
///
/// "The Legend of Zelda: Link's Awakening" gives main `legendofzelda`,
/// secondary `linksawakening` and canonical `legendofzeldalinksawakening`.
pub fn generate_match_info(title: &str) -> TitleMatchInfo {
    let folded = normalize_width(title);
    let trimmed = folded.trim();
    let cleaned = strip_leading_article(trimmed);
    let has_leading_article = cleaned.len() != trimmed.len();

    let split = split_title(cleaned);
    let main_title_slug = slugify_string(split.main);

    match split.secondary {
        Some(secondary) => {
            let secondary_title_slug = slugify_string(strip_leading_article(secondary));
            TitleMatchInfo {
                canonical_slug: format!("{main_title_slug}{secondary_title_slug}"),
                main_title_slug,
                secondary_title_slug,
                original_input: title.to_string(),
                has_secondary_title: true,
                has_leading_article,
            }
        }
        None => TitleMatchInfo {
            canonical_slug: main_title_slug.clone(),
            main_title_slug,
            secondary_title_slug: String::new(),
            original_input: title.to_string(),
            has_secondary_title: false,
            has_leading_article,
        },
    }
}
