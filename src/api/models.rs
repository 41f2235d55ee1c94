use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub type TrackId = i64;
pub type AlbumId = i64;
pub type PlaylistId = i64;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";

/// Where the API server lives. Stream URLs are derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim().trim_end_matches('/').to_string(),
        }
    }

    /// Build-time default, overridable with `RIFFSTREAM_API_URL`.
    pub fn from_build_env() -> Self {
        Self::new(option_env!("RIFFSTREAM_API_URL").unwrap_or(DEFAULT_API_URL))
    }

    pub fn music_url(&self) -> String {
        format!("{}/music", self.base_url)
    }

    pub fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    pub fn stream_url(&self, kind: MediaKind, id: TrackId) -> String {
        match kind {
            MediaKind::Audio => format!("{}/stream/{}/", self.music_url(), id),
            MediaKind::Video => format!("{}/videos/{}/stream/", self.music_url(), id),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Audio,
    Video,
}

impl MediaKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Song as the catalog serves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SongRecord {
    pub id: TrackId,
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: Option<AlbumId>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub listen_count: u64,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VideoRecord {
    pub id: TrackId,
    pub title: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A playable catalog item with its resolved stream URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub cover_image: Option<String>,
    pub source_url: String,
    pub duration: String,
    pub kind: MediaKind,
}

impl Track {
    pub fn from_song(record: SongRecord, config: &ApiConfig) -> Self {
        Self {
            source_url: config.stream_url(MediaKind::Audio, record.id),
            id: record.id,
            title: record.title,
            artist: record.artist,
            cover_image: record.cover_image.filter(|url| !url.trim().is_empty()),
            duration: normalize_duration(&record.duration),
            kind: MediaKind::Audio,
        }
    }

    pub fn from_video(record: VideoRecord, config: &ApiConfig) -> Self {
        Self {
            source_url: config.stream_url(MediaKind::Video, record.id),
            id: record.id,
            title: record.title,
            artist: "Video".to_string(),
            cover_image: record.thumbnail.filter(|url| !url.trim().is_empty()),
            duration: normalize_duration(&record.duration),
            kind: MediaKind::Video,
        }
    }
}

pub fn songs_to_tracks(records: Vec<SongRecord>, config: &ApiConfig) -> Vec<Track> {
    records
        .into_iter()
        .map(|record| Track::from_song(record, config))
        .collect()
}

pub fn videos_to_tracks(records: Vec<VideoRecord>, config: &ApiConfig) -> Vec<Track> {
    records
        .into_iter()
        .map(|record| Track::from_video(record, config))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ArtistSummary {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    #[serde(default)]
    pub user: Option<i64>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Raw search payload; the server omits `artists`/`videos` when it has none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SearchPayload {
    #[serde(default)]
    pub songs: Vec<SongRecord>,
    #[serde(default)]
    pub albums: Vec<Album>,
    #[serde(default)]
    pub artists: Vec<ArtistSummary>,
    #[serde(default)]
    pub videos: Vec<VideoRecord>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResults {
    pub songs: Vec<Track>,
    pub albums: Vec<Album>,
    pub artists: Vec<ArtistSummary>,
    pub videos: Vec<Track>,
}

impl SearchResults {
    pub fn from_payload(payload: SearchPayload, config: &ApiConfig) -> Self {
        Self {
            songs: songs_to_tracks(payload.songs, config),
            albums: payload.albums,
            artists: payload.artists,
            videos: videos_to_tracks(payload.videos, config),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
            && self.albums.is_empty()
            && self.artists.is_empty()
            && self.videos.is_empty()
    }

    /// Keeps only the sections `filter` shows.
    pub fn filtered(self, filter: SearchFilter) -> Self {
        match filter {
            SearchFilter::All => self,
            SearchFilter::Music => Self {
                videos: Vec::new(),
                ..self
            },
            SearchFilter::Videos => Self {
                videos: self.videos,
                ..Self::default()
            },
        }
    }
}

/// Result tabs over a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchFilter {
    #[default]
    All,
    Music,
    Videos,
}

impl SearchFilter {
    pub const ALL: [SearchFilter; 3] = [SearchFilter::All, SearchFilter::Music, SearchFilter::Videos];

    pub fn label(self) -> &'static str {
        match self {
            SearchFilter::All => "All",
            SearchFilter::Music => "Music",
            SearchFilter::Videos => "Videos",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Accepts RFC 3339 and the naive formats Django emits without time zone support.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed.and_utc());
        }
    }

    None
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map(str::trim).and_then(parse_timestamp))
}

/// Catalog durations are free-form strings; anything that already looks like
/// `M:SS` is zero-padded to `MM:SS`, plain seconds are converted.
pub fn normalize_duration(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "00:00".to_string();
    }

    if let Some((minutes, seconds)) = trimmed.split_once(':') {
        if let (Ok(minutes), Ok(seconds)) =
            (minutes.trim().parse::<u32>(), seconds.trim().parse::<u32>())
        {
            return format!("{:02}:{:02}", minutes, seconds);
        }
        return trimmed.to_string();
    }

    match trimmed.parse::<f64>() {
        Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => {
            let total = seconds.floor() as u64;
            format!("{:02}:{:02}", total / 60, total % 60)
        }
        _ => trimmed.to_string(),
    }
}
