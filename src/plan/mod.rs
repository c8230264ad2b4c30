use crate::config::Config;
use crate::cue::models::TrackRecord;
use crate::plan::error::{PlanError, PlanResult};
use crate::plan::models::{PlannedSheet, PlannedTrack};
use crate::plan::naming::{expand_template, split_directory};
use crate::plan::timing::{Timestamp, end_offsets};
use crate::sheet::models::SheetBundle;
use log::debug;
use std::path::{Path, PathBuf};

pub mod error;
pub mod models;
pub mod naming;
pub mod timing;

/// Turns a parsed sheet into per-track conversion jobs.
///
/// Either every track is planned or the whole sheet fails.
pub async fn plan_sheet(bundle: SheetBundle, config: &Config) -> PlanResult<PlannedSheet> {
    let SheetBundle {
        metadata,
        tracks,
        cue_path,
        cover_path,
    } = bundle;

    let cue_dir = cue_path.parent().unwrap_or_else(|| Path::new("."));

    let names: Vec<String> = tracks
        .iter()
        .map(|track| expand_template(&config.naming_spec, &metadata, track))
        .collect();
    let (directory, names) = split_directory(names);

    let mut output_dir = match &config.output_dir {
        Some(dir) => dir.clone(),
        None => cue_dir.join("tracks"),
    };
    if let Some(directory) = directory {
        output_dir.push(directory);
    }

    let starts = tracks
        .iter()
        .map(track_start)
        .collect::<PlanResult<Vec<f64>>>()?;
    let files: Vec<&str> = tracks.iter().map(|t| t.source_file.as_str()).collect();
    let ends = end_offsets(&starts, &files);

    let mut planned = Vec::with_capacity(tracks.len());

    for (i, (track, name)) in tracks.iter().zip(names).enumerate() {
        let source_path =
            resolve_source(cue_dir, &track.source_file, &config.sox.supported_formats).await?;
        let destination_path =
            std::path::absolute(output_dir.join(format!("{name}.{}", config.format)))?;

        let command =
            config
                .sox
                .render_command(&source_path, &destination_path, starts[i], ends[i]);

        debug!("Track {}: {command}", track.index);

        planned.push(PlannedTrack {
            track: track.clone(),
            source_path,
            start_seconds: starts[i],
            end_seconds: ends[i],
            destination_path,
            command,
        });
    }

    Ok(PlannedSheet {
        metadata,
        tracks: planned,
        cue_path,
        cover_path,
    })
}

fn track_start(track: &TrackRecord) -> PlanResult<f64> {
    let raw = track
        .timestamp
        .as_deref()
        .ok_or_else(|| PlanError::MissingIndex(track.index.clone()))?;
    let timestamp = Timestamp::parse(raw)?;

    debug!("Track {} starts at {timestamp}", track.index);

    Ok(timestamp.to_seconds())
}

/// Finds the media file a track was declared against.
///
/// The declared name wins if it exists next to the sheet. Otherwise a file with
/// the same stem is looked up for each supported format, in the given order.
pub async fn resolve_source(
    cue_dir: &Path,
    declared: &str,
    supported_formats: &[String],
) -> PlanResult<PathBuf> {
    let declared_path = cue_dir.join(declared);

    // No FILE line preceded the track
    if declared.is_empty() {
        return Err(PlanError::SourceFileNotFound(declared_path));
    }

    if is_file(&declared_path).await {
        return Ok(declared_path);
    }

    if let Some(stem) = declared_path.file_stem() {
        for format in supported_formats {
            let mut file_name = stem.to_os_string();
            file_name.push(".");
            file_name.push(format);

            let candidate = cue_dir.join(file_name);
            if is_file(&candidate).await {
                debug!("{declared_path:?} not found, using {candidate:?}");
                return Ok(candidate);
            }
        }
    }

    Err(PlanError::SourceFileNotFound(declared_path))
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|metadata| metadata.is_file())
        .unwrap_or(false)
}
