//! Media-type specific parsers.
//!
//! Each parser extracts structure (episode markers, years, editions) from a
//! raw title and hands a cleaned string to the shared pipeline.

mod movie;
mod music;
mod tv;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::pipeline::{as_slug_word, normalize, normalize_with, Articles, Normalized};

pub use movie::{extract_movie_year, parse_movie, parse_movie_elements, MovieElements, YearSource};
pub use music::parse_music;
pub use tv::{parse_tv_show, parse_tv_show_elements, EpisodeMarker, TvShowElements};

/// Kind of media a title belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Game,
    #[serde(alias = "tv")]
    TvShow,
    Movie,
    Music,
}

impl MediaType {
    pub const ALL: [MediaType; 4] = [Self::Game, Self::TvShow, Self::Movie, Self::Music];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Game => "game",
            Self::TvShow => "tvshow",
            Self::Movie => "movie",
            Self::Music => "music",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "game" => Ok(Self::Game),
            "tv" | "tvshow" | "tv-show" | "show" => Ok(Self::TvShow),
            "movie" | "film" => Ok(Self::Movie),
            "music" | "album" => Ok(Self::Music),
            other => Err(format!("unknown media type: {other}")),
        }
    }
}

/// Game titles go straight through the shared pipeline.
pub fn parse_game(title: &str) -> String {
    normalize(title).text
}

/// Apply the media-specific parser only (no shared pipeline for TV, movies
/// and music).
pub fn parse_with_media_type(media_type: MediaType, title: &str) -> String {
    match media_type {
        MediaType::Game => parse_game(title),
        MediaType::TvShow => parse_tv_show(title),
        MediaType::Movie => parse_movie(title),
        MediaType::Music => parse_music(title),
    }
}

/// Media-specific parser followed by the shared pipeline.
///
/// Single slug words skip the media parser as they skip the word stages.
/// Music keeps every article but the first, which its parser removes.
pub fn normalize_media(media_type: MediaType, title: &str) -> Normalized {
    if media_type == MediaType::Game {
        return normalize(title);
    }
    if let Some(word) = as_slug_word(title) {
        return word;
    }
    match media_type {
        MediaType::Music => normalize_with(&parse_music(title), Articles::Keep),
        other => normalize(&parse_with_media_type(other, title)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_from_str() {
        assert_eq!("game".parse::<MediaType>(), Ok(MediaType::Game));
        assert_eq!("TV".parse::<MediaType>(), Ok(MediaType::TvShow));
        assert_eq!("tvshow".parse::<MediaType>(), Ok(MediaType::TvShow));
        assert_eq!("Movie".parse::<MediaType>(), Ok(MediaType::Movie));
        assert_eq!("music".parse::<MediaType>(), Ok(MediaType::Music));
        assert!("book".parse::<MediaType>().is_err());
    }

    #[test]
    fn media_type_display_roundtrips() {
        for media in MediaType::ALL {
            assert_eq!(media.to_string().parse::<MediaType>(), Ok(media));
        }
    }

    #[test]
    fn media_type_serde() {
        let json = serde_json::to_string(&MediaType::TvShow).unwrap();
        assert_eq!(json, "\"tvshow\"");
        let parsed: MediaType = serde_json::from_str("\"tv\"").unwrap();
        assert_eq!(parsed, MediaType::TvShow);
    }

    #[test]
    fn game_uses_pipeline() {
        assert_eq!(
            parse_with_media_type(MediaType::Game, "Super Mario Bros. III (USA) [!] Edition"),
            "super mario brothers 3"
        );
    }

    #[test]
    fn dispatch_tv() {
        let a = parse_with_media_type(MediaType::TvShow, "Attack on Titan - 1x02 - That Day");
        let b = parse_with_media_type(MediaType::TvShow, "S01E02 - Attack on Titan - That Day");
        assert_eq!(a, b);
        assert!(a.contains("s01e02"));
    }

    #[test]
    fn dispatch_movie() {
        assert_eq!(parse_with_media_type(MediaType::Movie, "The Matrix (1999)"), "Matrix");
    }

    #[test]
    fn slug_words_skip_media_parsers() {
        assert_eq!(normalize_media(MediaType::TvShow, "episode2").text, "episode2");
        assert_eq!(normalize_media(MediaType::TvShow, "e5").text, "e5");
        assert_eq!(normalize_media(MediaType::Movie, "matrix1999").text, "matrix1999");
        assert_eq!(normalize_media(MediaType::TvShow, "Episode II").text, "episode 2");
    }

    #[test]
    fn music_keeps_inner_articles() {
        assert_eq!(normalize_media(MediaType::Music, "Queen: The Game").text, "queen the game");
        assert_eq!(
            normalize_media(MediaType::Music, "The Beatles: The White Album").text,
            "beatles the white album"
        );
        assert_eq!(normalize_media(MediaType::Game, "Queen: The Game").text, "queen game");
    }

    #[test]
    fn normalize_media_runs_both_layers() {
        assert_eq!(
            normalize_media(MediaType::TvShow, "Breaking.Bad.S01E02.1080p.BluRay.x264-GROUP").text,
            "breaking bad s01e02"
        );
        assert_eq!(
            normalize_media(MediaType::Movie, "The.Matrix.1999.1080p.BluRay.x264-GRP").text,
            "matrix"
        );
    }
}
