use crate::cue::models::{AlbumMetadata, TrackRecord};
use serde::Serialize;
use std::path::PathBuf;

/// A parsed track plus everything needed to cut it out of its source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedTrack {
    pub track: TrackRecord,
    pub source_path: PathBuf,
    pub start_seconds: f64,
    /// `0.0` means the end of the source file.
    pub end_seconds: f64,
    pub destination_path: PathBuf,
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedSheet {
    pub metadata: AlbumMetadata,
    pub tracks: Vec<PlannedTrack>,
    pub cue_path: PathBuf,
    pub cover_path: Option<PathBuf>,
}

impl PlannedSheet {
    /// Directory all of this sheet's tracks are written to.
    pub fn output_dir(&self) -> Option<&std::path::Path> {
        self.tracks
            .first()
            .and_then(|track| track.destination_path.parent())
    }
}
