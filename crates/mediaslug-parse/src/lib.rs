pub mod brackets;
pub mod edition;
pub mod expand;
pub mod keyword;
pub mod media;
pub mod pipeline;
pub mod roman;
pub mod scene;
pub mod script;
pub mod structure;
pub mod symbols;
pub mod unicode;
pub mod width;

pub use media::{
    extract_movie_year, normalize_media, parse_game, parse_movie, parse_movie_elements,
    parse_music, parse_tv_show, parse_tv_show_elements, parse_with_media_type, EpisodeMarker,
    MediaType, MovieElements, TvShowElements, YearSource,
};
pub use pipeline::{
    as_slug_word, fold_lowercase, is_slug_word, normalize, normalize_with, Articles, Normalized,
    PipelineContext,
};
pub use script::{detect_script, ScriptType};
pub use structure::{split_title, strip_leading_article, TitleSplit};
pub use width::normalize_width;
