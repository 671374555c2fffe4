use crate::types::{ExternalId, RawTrack, Track, UNKNOWN_ALBUM, UNKNOWN_ARTIST, UNKNOWN_TITLE};

/// Maps a raw upstream record onto a [`Track`].
///
/// Missing or blank display strings degrade to the "Unknown …" sentinels,
/// missing URLs to empty strings and a missing explicit flag to `false`.
/// The gateway only hands over records that carry an id; should one slip
/// through without it, the record is still normalized under an empty
/// string id rather than failing.
pub fn normalize(raw: RawTrack) -> Track {
    let RawTrack {
        id,
        title,
        link,
        preview,
        explicit_lyrics,
        artist,
        album,
    } = raw;

    let album = album.unwrap_or_default();

    Track::new(
        id.unwrap_or_else(|| ExternalId::Str(String::new())),
        text_or(title, UNKNOWN_TITLE),
        text_or(artist.and_then(|a| a.name), UNKNOWN_ARTIST),
        text_or(album.title, UNKNOWN_ALBUM),
        preview.unwrap_or_default(),
        link.unwrap_or_default(),
        album.cover_big.unwrap_or_default(),
        album.cover_xl.unwrap_or_default(),
        explicit_lyrics.unwrap_or(false),
    )
}

fn text_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}
