use bitflags::bitflags;
use phf::phf_map;

bitflags! {
    /// Which media parsers strip a tag, and how cautiously.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TagFlags: u8 {
        /// Stripped from TV episode names.
        const TV = 0b0000_0001;
        /// Stripped from movie names.
        const MOVIE = 0b0000_0010;
        /// Stripped from music names.
        const MUSIC = 0b0000_0100;
        /// Also an ordinary title word ("Live", "Radio", "Cam"); only stripped
        /// from dot- or underscore-separated scene names.
        const AMBIGUOUS = 0b0000_1000;

        const VIDEO = Self::TV.bits() | Self::MOVIE.bits();
    }
}

const TV: TagFlags = TagFlags::TV;
const MOVIE: TagFlags = TagFlags::MOVIE;
const MUSIC: TagFlags = TagFlags::MUSIC;
const VIDEO: TagFlags = TagFlags::VIDEO;
const AMBIGUOUS_VIDEO: TagFlags = TagFlags::VIDEO.union(TagFlags::AMBIGUOUS);
const AMBIGUOUS_MOVIE: TagFlags = TagFlags::MOVIE.union(TagFlags::AMBIGUOUS);
const AMBIGUOUS_MUSIC: TagFlags = TagFlags::MUSIC.union(TagFlags::AMBIGUOUS);

/// Longest tag, in separator-delimited words.
pub const MAX_TAG_WORDS: usize = 3;

/// Compile-time scene tag table.
///
/// Keys are lowercase; multi-word tags use one space for any run of scene
/// separators, so "WEB-DL", "web.dl" and "Web DL" all look up "web dl".
pub static TAGS: phf::Map<&'static str, TagFlags> = phf_map! {
    // ── Quality ──────────────────────────────────────────────────
    "480p" => VIDEO,
    "576p" => VIDEO,
    "720p" => VIDEO,
    "1080p" => VIDEO,
    "1080i" => VIDEO,
    "2160p" => VIDEO,
    "4k" => VIDEO,
    "uhd" => VIDEO,
    "hd" => AMBIGUOUS_VIDEO,
    "sd" => AMBIGUOUS_VIDEO,

    // ── Source ───────────────────────────────────────────────────
    "bluray" => VIDEO,
    "blu ray" => VIDEO,
    "bdrip" => VIDEO,
    "brrip" => VIDEO,
    "bdremux" => VIDEO,
    "remux" => VIDEO,
    "webrip" => VIDEO,
    "web dl" => VIDEO,
    "webdl" => VIDEO,
    "hdtv" => VIDEO,
    "dvdrip" => VIDEO,
    "hdcam" => VIDEO,
    "telesync" => VIDEO,
    "cam" => AMBIGUOUS_VIDEO,
    "ts" => AMBIGUOUS_VIDEO,
    "tc" => AMBIGUOUS_VIDEO,

    // ── Video codec ──────────────────────────────────────────────
    "x264" => VIDEO,
    "x265" => VIDEO,
    "h264" => VIDEO,
    "h 264" => VIDEO,
    "h265" => VIDEO,
    "h 265" => VIDEO,
    "hevc" => VIDEO,
    "xvid" => VIDEO,
    "avc" => VIDEO,
    "10bit" => VIDEO,
    "8bit" => VIDEO,

    // ── Audio ────────────────────────────────────────────────────
    "ac3" => VIDEO,
    "aac" => VIDEO.union(MUSIC),
    "aac2 0" => VIDEO,
    "dts" => VIDEO,
    "dd5 1" => VIDEO,
    "dd7 1" => VIDEO,
    "ddp5 1" => VIDEO,
    "ddp2 0" => VIDEO,
    "atmos" => VIDEO,
    "truehd" => VIDEO,

    // ── Release info ─────────────────────────────────────────────
    "proper" => VIDEO,
    "repack" => VIDEO,
    "internal" => AMBIGUOUS_VIDEO,
    "limited" => AMBIGUOUS_VIDEO,
    "multi" => AMBIGUOUS_VIDEO,
    "korsub" => VIDEO,
    // Edition qualifiers only count as tags on episodes; a movie keeps them.
    "extended" => TV,
    "unrated" => TV,
    "remastered" => TV,
    "directors cut" => TV,
    "director's cut" => TV,
    "director cut" => TV,

    // ── Dynamic range ────────────────────────────────────────────
    "hdr" => MOVIE,
    "hdr10" => MOVIE,
    "hdr10+" => MOVIE,
    "hlg" => MOVIE,
    "dolby vision" => MOVIE,
    "dv" => AMBIGUOUS_MOVIE,

    // ── 3D ───────────────────────────────────────────────────────
    "3d" => AMBIGUOUS_MOVIE,
    "hsbs" => MOVIE,
    "hou" => MOVIE,
    "half sbs" => MOVIE,
    "half ou" => MOVIE,

    // ── Music format ─────────────────────────────────────────────
    "flac" => MUSIC,
    "mp3" => MUSIC,
    "alac" => MUSIC,
    "wav" => MUSIC,
    "ogg" => MUSIC,
    "wma" => MUSIC,
    "m4a" => MUSIC,
    "opus" => AMBIGUOUS_MUSIC,
    "ape" => AMBIGUOUS_MUSIC,

    // ── Music bitrate and resolution ─────────────────────────────
    "v0" => MUSIC,
    "v2" => AMBIGUOUS_MUSIC,
    "320" => AMBIGUOUS_MUSIC,
    "256" => AMBIGUOUS_MUSIC,
    "192" => AMBIGUOUS_MUSIC,
    "128" => AMBIGUOUS_MUSIC,
    "320kbps" => MUSIC,
    "256kbps" => MUSIC,
    "192kbps" => MUSIC,
    "128kbps" => MUSIC,
    "cbr" => MUSIC,
    "vbr" => MUSIC,
    "lame" => AMBIGUOUS_MUSIC,
    "lossless" => MUSIC,
    "16bit" => MUSIC,
    "24bit" => MUSIC,
    "44khz" => MUSIC,
    "48khz" => MUSIC,
    "96khz" => MUSIC,
    "192khz" => MUSIC,
    "24 96" => MUSIC,
    "24 192" => MUSIC,
    "16 44" => MUSIC,
    "hi res" => MUSIC,

    // ── Music source ─────────────────────────────────────────────
    "sacd" => MUSIC,
    "vinyl" => MUSIC,
    "cassette" => AMBIGUOUS_MUSIC,
    "cd" => AMBIGUOUS_MUSIC,
    "web" => AMBIGUOUS_MUSIC,
    "dvd" => AMBIGUOUS_MUSIC,
    "dat" => AMBIGUOUS_MUSIC,
    "tape" => AMBIGUOUS_MUSIC,
    "radio" => AMBIGUOUS_MUSIC,
    "fm" => AMBIGUOUS_MUSIC,
    "live" => AMBIGUOUS_MUSIC,
    "bootleg" => AMBIGUOUS_MUSIC,
};

/// Look up a normalized (lowercase, single-spaced) tag for a media scope.
///
/// Ambiguous tags only match when `scene` is set.
pub fn lookup(key: &str, scope: TagFlags, scene: bool) -> Option<TagFlags> {
    TAGS.get(key).copied().filter(|flags| {
        flags.intersects(scope) && (scene || !flags.contains(TagFlags::AMBIGUOUS))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_respects_scope() {
        assert!(lookup("1080p", TagFlags::TV, false).is_some());
        assert!(lookup("1080p", TagFlags::MUSIC, false).is_none());
        assert!(lookup("flac", TagFlags::MUSIC, false).is_some());
        assert!(lookup("aac", TagFlags::MUSIC, false).is_some());
    }

    #[test]
    fn edition_qualifiers_are_tv_only() {
        assert!(lookup("extended", TagFlags::TV, false).is_some());
        assert!(lookup("extended", TagFlags::MOVIE, false).is_none());
        assert!(lookup("directors cut", TagFlags::MOVIE, false).is_none());
    }

    #[test]
    fn ambiguous_needs_scene_context() {
        assert!(lookup("live", TagFlags::MUSIC, false).is_none());
        assert!(lookup("live", TagFlags::MUSIC, true).is_some());
        assert!(lookup("cam", TagFlags::MOVIE, true).is_some());
    }

    #[test]
    fn multi_word_keys() {
        assert!(lookup("dolby vision", TagFlags::MOVIE, false).is_some());
        assert!(lookup("web dl", TagFlags::TV, false).is_some());
        assert!(lookup("aac2 0", TagFlags::MUSIC, true).is_none());
    }
}
