use crate::brackets::strip_metadata_brackets;
use crate::scene::{strip_disc_numbers, strip_music_scene_tags};
use crate::structure::{strip_leading_article, strip_trailing_article};
use crate::width::normalize_width;

/// Normalize an album or track name.
///
/// Dots, underscores and hyphens all become spaces, so "Artist - Album" never
/// splits and only the leading article of the whole string is removed.
pub fn parse_music(title: &str) -> String {
    let s = normalize_width(title);
    let s = strip_music_scene_tags(&s);
    let s = s.replace(['.', '_', '-'], " ");
    let s = strip_metadata_brackets(&s);
    let s = strip_disc_numbers(&s);
    let s = strip_leading_article(&s);
    let s = strip_trailing_article(s);
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
