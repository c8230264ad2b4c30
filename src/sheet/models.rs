use crate::cue::models::{AlbumMetadata, CueSheet, TrackRecord};
use std::path::PathBuf;

/// A directory that holds a CUE sheet, as found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredSheet {
    pub cue_path: PathBuf,
    pub cover_path: Option<PathBuf>,
}

/// A parsed sheet together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetBundle {
    pub metadata: AlbumMetadata,
    pub tracks: Vec<TrackRecord>,
    /// Absolute path of the CUE file.
    pub cue_path: PathBuf,
    pub cover_path: Option<PathBuf>,
}

impl SheetBundle {
    pub fn new(sheet: CueSheet, cue_path: PathBuf, cover_path: Option<PathBuf>) -> Self {
        Self {
            metadata: sheet.metadata,
            tracks: sheet.tracks,
            cue_path,
            cover_path,
        }
    }
}
