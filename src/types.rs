use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use tabled::Tabled;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

const FALLBACK_ID: &str = "aswa-fallback";
const FALLBACK_TITLE: &str = "No tracks available";

/// Upstream identifier of a catalog entry. Deezer uses integers, but string
/// ids are accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExternalId {
    Int(i64),
    Str(String),
}

impl ExternalId {
    pub fn is_empty(&self) -> bool {
        match self {
            ExternalId::Int(_) => false,
            ExternalId::Str(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExternalId::Int(id) => write!(f, "{}", id),
            ExternalId::Str(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for ExternalId {
    fn from(id: i64) -> Self {
        ExternalId::Int(id)
    }
}

impl From<&str> for ExternalId {
    fn from(id: &str) -> Self {
        ExternalId::Str(id.to_string())
    }
}

/// A fully populated track as handed to callers.
///
/// Tracks are immutable once built; the only constructors are
/// [`crate::deezer::normalize`] and [`Track::fallback`]. `track_id` mirrors
/// `id_deezer` for consumers that expect that field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    #[serde(rename = "id_deezer")]
    external_id: ExternalId,
    track_id: ExternalId,
    title: String,
    artist: String,
    album: String,
    preview: String,
    link: String,
    cover: String,
    cover_xl: String,
    is_explicit: bool,
}

impl Track {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        external_id: ExternalId,
        title: String,
        artist: String,
        album: String,
        preview: String,
        link: String,
        cover: String,
        cover_xl: String,
        is_explicit: bool,
    ) -> Self {
        Self {
            track_id: external_id.clone(),
            external_id,
            title,
            artist,
            album,
            preview,
            link,
            cover,
            cover_xl,
            is_explicit,
        }
    }

    /// The placeholder returned when no real track can be obtained.
    pub fn fallback() -> Self {
        Self::new(
            ExternalId::Str(FALLBACK_ID.to_string()),
            FALLBACK_TITLE.to_string(),
            UNKNOWN_ARTIST.to_string(),
            UNKNOWN_ALBUM.to_string(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            false,
        )
    }

    pub fn is_fallback(&self) -> bool {
        matches!(&self.external_id, ExternalId::Str(id) if id == FALLBACK_ID)
    }

    pub fn external_id(&self) -> &ExternalId {
        &self.external_id
    }

    pub fn track_id(&self) -> &ExternalId {
        &self.track_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn album(&self) -> &str {
        &self.album
    }

    pub fn preview_url(&self) -> &str {
        &self.preview
    }

    pub fn permalink(&self) -> &str {
        &self.link
    }

    pub fn cover_url(&self) -> &str {
        &self.cover
    }

    pub fn cover_url_large(&self) -> &str {
        &self.cover_xl
    }

    pub fn is_explicit(&self) -> bool {
        self.is_explicit
    }
}

/// Deserializes an optional field, turning a value of the wrong JSON type
/// into `None` instead of rejecting the whole record.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// One record of the `data` array returned by the search endpoint, or the
/// body of the lookup-by-id endpoint.
///
/// Every field is optional and read leniently: a missing, `null` or
/// mistyped value ends up as `None` and is filled in by
/// [`crate::deezer::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTrack {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<ExternalId>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub preview: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub explicit_lyrics: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub artist: Option<RawArtist>,
    #[serde(default, deserialize_with = "lenient")]
    pub album: Option<RawAlbum>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawArtist {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAlbum {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub cover_big: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub cover_xl: Option<String>,
}

/// Error object Deezer embeds in otherwise successful responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub explicit: String,
}

impl From<&Track> for TrackTableRow {
    fn from(track: &Track) -> Self {
        TrackTableRow {
            id: track.external_id().to_string(),
            title: track.title().to_string(),
            artist: track.artist().to_string(),
            album: track.album().to_string(),
            explicit: if track.is_explicit() { "yes" } else { "" }.to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct QueryTableRow {
    pub strategy: String,
    pub query: String,
    pub limit: u32,
    pub offset: u32,
}
