use crate::cue::decode::decode_cue_bytes;
use crate::cue::error::CueResult;
use crate::cue::models::{AlbumMetadata, CueSheet, TrackRecord};
use log::debug;
use std::path::{Path, PathBuf};

pub mod decode;
pub mod error;
pub mod models;

/// Where the parser is within the sheet.
///
/// Everything before the first `TRACK .. AUDIO` line describes the album,
/// everything after it describes the most recently opened track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    InHeader,
    InTrack(usize),
}

pub struct CueParser {
    cue_path: PathBuf,
    encoding: Option<String>,
}

impl CueParser {
    pub fn new(cue_path: impl AsRef<Path>, encoding: Option<String>) -> Self {
        Self {
            cue_path: cue_path.as_ref().to_path_buf(),
            encoding,
        }
    }

    pub async fn parse(&self) -> CueResult<CueSheet> {
        let data = tokio::fs::read(&self.cue_path).await?;
        let text = decode_cue_bytes(&self.cue_path, &data, self.encoding.as_deref())?;

        let sheet = parse_lines(text.lines());
        debug!(
            "Parsed {:?}: {} audio track(s)",
            self.cue_path,
            sheet.tracks.len()
        );

        Ok(sheet)
    }
}

pub fn parse_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> CueSheet {
    let mut metadata = AlbumMetadata::default();
    let mut tracks: Vec<TrackRecord> = Vec::new();
    let mut current_file = String::new();
    let mut state = ParserState::InHeader;

    for line in lines {
        let (keyword, rest) = split_keyword(line);

        match (state, keyword) {
            (ParserState::InHeader, "REM") => {
                let (key, value) = split_keyword(rest);
                if !key.is_empty() {
                    metadata.set_field(&key.to_lowercase(), clean_value(value));
                }
            }
            (ParserState::InHeader, "PERFORMER") => metadata.performer = clean_value(rest),
            (ParserState::InHeader, "TITLE") => metadata.title = clean_value(rest),
            (_, "FILE") => current_file = parse_file_name(rest),
            (_, "TRACK") => {
                let (number, track_type) = split_keyword(rest);
                if track_type == "AUDIO" {
                    tracks.push(TrackRecord::new(number, current_file.clone()));
                    state = ParserState::InTrack(tracks.len() - 1);
                }
            }
            (ParserState::InTrack(i), "PERFORMER") => tracks[i].performer = clean_value(rest),
            (ParserState::InTrack(i), "TITLE") => tracks[i].title = clean_value(rest),
            (ParserState::InTrack(i), "ISRC") => tracks[i].isrc = Some(clean_value(rest)),
            (ParserState::InTrack(i), "SONGWRITER") => {
                tracks[i].songwriter = Some(clean_value(rest))
            }
            (ParserState::InTrack(i), "INDEX") => {
                let (number, position) = split_keyword(rest);
                if number == "01" {
                    tracks[i].timestamp = Some(clean_value(position));
                }
            }
            _ => {}
        }
    }

    CueSheet { metadata, tracks }
}

/// Splits a line into its first word and the trimmed remainder.
fn split_keyword(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    }
}

fn clean_value(value: &str) -> String {
    value.replace('"', "").trim().to_string()
}

fn parse_file_name(rest: &str) -> String {
    if let Some(start) = rest.find('"') {
        let quoted = &rest[start + 1..];
        return match quoted.find('"') {
            Some(end) => quoted[..end].to_string(),
            None => quoted.trim().to_string(),
        };
    }

    // Unquoted names run up to the trailing file type
    match rest.rsplit_once(char::is_whitespace) {
        Some((name, _file_type)) => name.trim().to_string(),
        None => rest.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::models::{UNKNOWN_ARTIST, UNKNOWN_TITLE};

    const FIXTURE: &str = include_str!("../../tests/data/awesome_album.cue");

    #[test]
    fn parses_album_metadata_from_header() {
        let sheet = parse_lines(FIXTURE.lines());

        assert_eq!(sheet.metadata.title, "Awesome Album (or maybe not) [800 030-2]");
        assert_eq!(sheet.metadata.performer, "Awesome Artist");
        assert_eq!(sheet.metadata.genre, "Progressive Rock");
        assert_eq!(sheet.metadata.date, "1969");
        assert_eq!(
            sheet.metadata.extra,
            [
                ("discid".to_string(), "5B0A6E07".to_string()),
                ("comment".to_string(), "ExactAudioCopy v1.6".to_string()),
            ]
        );
    }

    #[test]
    fn parses_tracks_in_sheet_order() {
        let sheet = parse_lines(FIXTURE.lines());

        let indices: Vec<_> = sheet.tracks.iter().map(|t| t.index.as_str()).collect();
        assert_eq!(indices, ["01", "02", "03", "04", "05"]);
        assert!(
            sheet
                .tracks
                .iter()
                .all(|t| t.source_file == "Awesome Artist - Awesome Album.wav")
        );
    }

    #[test]
    fn parses_track_fields() {
        let sheet = parse_lines(FIXTURE.lines());
        let tracks = &sheet.tracks;

        assert_eq!(tracks[0].title, "21st Century Schizoid Man (Including Mirrors)");
        assert_eq!(tracks[0].isrc.as_deref(), Some("GBAAA6900001"));
        assert_eq!(tracks[1].songwriter.as_deref(), Some("the best of the best"));
        assert_eq!(tracks[2].songwriter, None);
        assert_eq!(
            tracks[2].title,
            "Epitaph (Including March For No Reason And Tomorrow And Tomorrow)"
        );
        assert_eq!(tracks[4].performer, UNKNOWN_ARTIST);
    }

    #[test]
    fn only_index_01_sets_the_timestamp() {
        let sheet = parse_lines(FIXTURE.lines());

        assert_eq!(sheet.tracks[1].timestamp.as_deref(), Some("07:23:41"));
        assert_eq!(sheet.tracks[2].timestamp.as_deref(), Some("13:27:320"));
    }

    #[test]
    fn header_fields_after_file_line_still_belong_to_the_album() {
        let text = "FILE \"a.flac\" WAVE\nPERFORMER \"Band\"\nTITLE \"Record\"\nTRACK 01 AUDIO\nINDEX 01 00:00:00\n";
        let sheet = parse_lines(text.lines());

        assert_eq!(sheet.metadata.performer, "Band");
        assert_eq!(sheet.metadata.title, "Record");
        assert_eq!(sheet.tracks[0].performer, UNKNOWN_ARTIST);
        assert_eq!(sheet.tracks[0].title, UNKNOWN_TITLE);
    }

    #[test]
    fn rem_after_first_track_is_ignored() {
        let text = "TRACK 01 AUDIO\nREM COMPOSER \"Someone\"\nREM DATE 2001\n";
        let sheet = parse_lines(text.lines());

        assert_eq!(sheet.metadata.date, "1900");
        assert!(sheet.metadata.extra.is_empty());
    }

    #[test]
    fn data_tracks_are_skipped() {
        let text = "FILE \"game.bin\" BINARY\nTRACK 01 MODE1/2352\nINDEX 01 00:00:00\nTRACK 02 AUDIO\nTITLE \"Intro\"\nINDEX 01 10:00:00\n";
        let sheet = parse_lines(text.lines());

        assert_eq!(sheet.tracks.len(), 1);
        assert_eq!(sheet.tracks[0].index, "02");
        assert_eq!(sheet.tracks[0].title, "Intro");
        assert_eq!(sheet.tracks[0].timestamp.as_deref(), Some("10:00:00"));
    }

    #[test]
    fn tracks_follow_the_current_file() {
        let text = "FILE \"one.wav\" WAVE\nTRACK 01 AUDIO\nINDEX 01 00:00:00\nFILE \"two.wav\" WAVE\nTRACK 02 AUDIO\nINDEX 01 00:00:00\n";
        let sheet = parse_lines(text.lines());

        assert_eq!(sheet.tracks[0].source_file, "one.wav");
        assert_eq!(sheet.tracks[1].source_file, "two.wav");
    }

    #[test]
    fn unknown_commands_are_ignored() {
        let text = "CATALOG 0000000000000\nCDTEXTFILE \"x.cdt\"\nFILE \"a.wav\" WAVE\nTRACK 01 AUDIO\nFLAGS DCP\nPREGAP 00:02:00\nINDEX 01 00:00:00\n";
        let sheet = parse_lines(text.lines());

        assert_eq!(sheet.tracks.len(), 1);
        assert_eq!(sheet.metadata, AlbumMetadata::default());
    }

    #[test]
    fn sheet_without_audio_tracks_is_empty() {
        let sheet = parse_lines("REM DATE 2000\nFILE \"a.bin\" BINARY\nTRACK 01 MODE1/2048\n".lines());
        assert!(sheet.tracks.is_empty());
        assert_eq!(sheet.metadata.date, "2000");
    }

    #[test]
    fn parses_unquoted_file_names() {
        assert_eq!(parse_file_name("\"My Album.flac\" WAVE"), "My Album.flac");
        assert_eq!(parse_file_name("album.flac WAVE"), "album.flac");
        assert_eq!(parse_file_name("album.flac"), "album.flac");
    }

    #[test]
    fn split_keyword_tolerates_extra_whitespace() {
        assert_eq!(split_keyword("  INDEX   01 00:00:00 "), ("INDEX", "01 00:00:00"));
        assert_eq!(split_keyword("REM"), ("REM", ""));
    }

    #[tokio::test]
    async fn parse_reads_and_decodes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("album.cue");
        tokio::fs::write(&path, FIXTURE).await.unwrap();

        let sheet = CueParser::new(&path, None).parse().await.unwrap();
        assert_eq!(sheet.tracks.len(), 5);
    }
}
