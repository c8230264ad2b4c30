use serde::Serialize;

pub const UNKNOWN_ALBUM: &str = "Unknown Album";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_GENRE: &str = "Unknown Genre";
pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const DEFAULT_DATE: &str = "1900";

/// Album level data taken from the commands preceding the first audio track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumMetadata {
    pub title: String,
    pub performer: String,
    pub genre: String,
    pub date: String,
    /// Any other `REM` field, keyed by its lower-cased name, in sheet order.
    pub extra: Vec<(String, String)>,
}

impl Default for AlbumMetadata {
    fn default() -> Self {
        Self {
            title: UNKNOWN_ALBUM.to_string(),
            performer: UNKNOWN_ARTIST.to_string(),
            genre: UNKNOWN_GENRE.to_string(),
            date: DEFAULT_DATE.to_string(),
            extra: Vec::new(),
        }
    }
}

impl AlbumMetadata {
    pub fn set_field(&mut self, key: &str, value: String) {
        match key {
            "title" => self.title = value,
            "performer" => self.performer = value,
            "genre" => self.genre = value,
            "date" => self.date = value,
            _ => match self.extra.iter_mut().find(|(k, _)| k == key) {
                Some((_, existing)) => *existing = value,
                None => self.extra.push((key.to_string(), value)),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackRecord {
    pub title: String,
    pub performer: String,
    /// Media file named by the `FILE` command in effect when the track opened.
    pub source_file: String,
    /// Track number exactly as written in the sheet, e.g. `"01"`.
    pub index: String,
    /// Raw `INDEX 01` position, `mm:ss:ff`.
    pub timestamp: Option<String>,
    pub isrc: Option<String>,
    pub songwriter: Option<String>,
}

impl TrackRecord {
    pub fn new(index: impl Into<String>, source_file: impl Into<String>) -> Self {
        Self {
            title: UNKNOWN_TITLE.to_string(),
            performer: UNKNOWN_ARTIST.to_string(),
            source_file: source_file.into(),
            index: index.into(),
            timestamp: None,
            isrc: None,
            songwriter: None,
        }
    }
}

/// Result of parsing one sheet: album data plus its audio tracks in playback order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CueSheet {
    pub metadata: AlbumMetadata,
    pub tracks: Vec<TrackRecord>,
}
