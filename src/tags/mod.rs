use crate::config::upsert;
use crate::cue::models::{AlbumMetadata, TrackRecord, UNKNOWN_ARTIST};
use crate::plan::models::PlannedSheet;
use crate::tags::error::{TagError, TagResult};
use lazy_static::lazy_static;
use lofty::config::WriteOptions;
use lofty::file::TaggedFileExt;
use lofty::picture::{Picture, PictureType};
use lofty::tag::{Accessor, ItemKey, Tag, TagExt};
use log::debug;
use regex::Regex;
use std::io::Cursor;
use std::path::Path;

pub mod error;

lazy_static! {
    static ref CATALOG_ID: Regex = Regex::new(r"\s[\(\[].*?[0-9]{2}.*?[\)\]]$").unwrap();
    static ref DISC_NUMBER: Regex = Regex::new(r"CD(\d+)").unwrap();
}

/// Tags shared by every track of a sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumTags {
    pub album_title: String,
    pub album_artist: String,
    pub year: String,
    pub genre: String,
    pub comments: String,
    pub disc: Option<u32>,
    pub track_total: String,
    pub cover: Option<Vec<u8>>,
}

impl AlbumTags {
    pub async fn from_sheet(
        sheet: &PlannedSheet,
        user_comments: &[(String, String)],
    ) -> TagResult<Self> {
        let cover = match &sheet.cover_path {
            Some(path) => Some(tokio::fs::read(path).await?),
            None => None,
        };

        Ok(Self::build(
            &sheet.metadata,
            sheet.tracks.len(),
            user_comments,
            cover,
        ))
    }

    pub fn build(
        metadata: &AlbumMetadata,
        track_count: usize,
        user_comments: &[(String, String)],
        cover: Option<Vec<u8>>,
    ) -> Self {
        let (album_title, catalog_id) = split_catalog_id(&metadata.title);

        let mut comments = metadata.extra.clone();
        if let Some(catalog_id) = catalog_id {
            upsert(&mut comments, "CATID", &catalog_id);
        }
        for (key, value) in user_comments {
            upsert(&mut comments, key, value);
        }

        Self {
            album_title,
            album_artist: metadata.performer.clone(),
            year: metadata.date.clone(),
            genre: metadata.genre.clone(),
            comments: comments
                .iter()
                .map(|(key, value)| format!("{}: {value}", key.to_uppercase()))
                .collect::<Vec<_>>()
                .join(" "),
            disc: disc_number(&metadata.title),
            track_total: format!("{track_count:02}"),
            cover,
        }
    }
}

/// Per track tags, layered on top of [`AlbumTags`] when written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackTags {
    pub title: String,
    pub track: String,
    pub isrc: Option<String>,
    pub composer: Option<String>,
    pub artist: String,
}

impl TrackTags {
    pub fn for_track(album: &AlbumTags, track: &TrackRecord) -> Self {
        let artist = if track.performer != UNKNOWN_ARTIST {
            track.performer.clone()
        } else {
            album.album_artist.clone()
        };

        Self {
            title: track.title.clone(),
            track: track.index.clone(),
            isrc: track.isrc.clone(),
            composer: track.songwriter.clone(),
            artist,
        }
    }
}

/// Splits a trailing bracketed catalog id such as ` [800 030-2]` off an album title.
pub fn split_catalog_id(title: &str) -> (String, Option<String>) {
    match CATALOG_ID.find(title) {
        Some(found) => (
            title[..found.start()].to_string(),
            Some(
                found
                    .as_str()
                    .trim_matches(|c: char| matches!(c, '(' | ')' | '[' | ']' | ' '))
                    .to_string(),
            ),
        ),
        None => (title.to_string(), None),
    }
}

/// Disc number from a `CD<digits>` marker anywhere in the title.
pub fn disc_number(title: &str) -> Option<u32> {
    DISC_NUMBER
        .captures(&title.to_uppercase())
        .and_then(|captures| captures[1].parse().ok())
}

/// Writes album and track tags into the file at `path`.
///
/// Blocking, callers on the async runtime should use `spawn_blocking`.
pub fn write_tags(path: &Path, album: &AlbumTags, track: &TrackTags) -> TagResult<()> {
    let mut tagged_file = lofty::read_from_path(path)?;

    if tagged_file.primary_tag().is_none() {
        let tag_type = tagged_file.primary_tag_type();
        tagged_file.insert_tag(Tag::new(tag_type));
    }

    let tag = tagged_file
        .primary_tag_mut()
        .ok_or_else(|| TagError::NoTag(path.to_path_buf()))?;

    tag.set_title(track.title.clone());
    tag.set_artist(track.artist.clone());
    tag.set_album(album.album_title.clone());
    tag.set_genre(album.genre.clone());
    tag.insert_text(ItemKey::AlbumArtist, album.album_artist.clone());
    tag.insert_text(ItemKey::RecordingDate, album.year.clone());

    if let Ok(number) = track.track.parse::<u32>() {
        tag.set_track(number);
    }
    if let Ok(total) = album.track_total.parse::<u32>() {
        tag.set_track_total(total);
    }
    if let Some(disc) = album.disc {
        tag.set_disk(disc);
    }
    if let Some(isrc) = &track.isrc {
        tag.insert_text(ItemKey::Isrc, isrc.clone());
    }
    if let Some(composer) = &track.composer {
        tag.insert_text(ItemKey::Composer, composer.clone());
    }
    if !album.comments.is_empty() {
        tag.set_comment(album.comments.clone());
    }
    if let Some(cover) = &album.cover {
        let mut picture = Picture::from_reader(&mut Cursor::new(cover))?;
        picture.set_pic_type(PictureType::CoverFront);
        tag.push_picture(picture);
    }

    tag.save_to_path(path, WriteOptions::default())?;
    debug!("Tagged {path:?}");

    Ok(())
}
