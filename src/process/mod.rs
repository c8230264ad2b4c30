use crate::commands::split::SplitArgs;
use crate::config::Config;
use crate::error::CueSplitResult;
use crate::plan::models::{PlannedSheet, PlannedTrack};
use crate::process::error::{ProcessError, ProcessResult};
use crate::sheet::collect_sheets;
use crate::tags::{AlbumTags, TrackTags, write_tags};
use futures::{StreamExt, stream};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use lofty::file::AudioFile;
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;

pub mod error;

pub async fn split(progress: MultiProgress, args: SplitArgs) -> CueSplitResult<()> {
    let config = Config::from_args(&args).await?;
    let sheets = collect_sheets(&config).await?;

    if sheets.is_empty() {
        info!("No CUE sheets with audio tracks found in {:?}", config.src_path);
        return Ok(());
    }

    for sheet in &sheets {
        process_sheet(sheet, &config, &progress).await?;
    }

    Ok(())
}

pub async fn print_plan(args: SplitArgs, json: bool) -> CueSplitResult<()> {
    let config = Config::from_args(&args).await?;
    let sheets = collect_sheets(&config).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&sheets).map_err(ProcessError::from)?
        );
        return Ok(());
    }

    for sheet in &sheets {
        println!("# {}", sheet.cue_path.display());
        for track in &sheet.tracks {
            println!("{}", track.command);
        }
    }

    Ok(())
}

/// Splits and tags every track of one sheet, at most `config.jobs` at a time.
///
/// The first failing track aborts the sheet; conversions still running are killed.
pub async fn process_sheet(
    sheet: &PlannedSheet,
    config: &Config,
    progress: &MultiProgress,
) -> ProcessResult<()> {
    let album = Arc::new(AlbumTags::from_sheet(sheet, &config.comments).await?);

    log_sheet_summary(sheet, &album);
    countdown(config.wait).await;

    if let Some(output_dir) = sheet.output_dir() {
        tokio::fs::create_dir_all(output_dir).await?;
    }

    let bar = progress.add(ProgressBar::new(sheet.tracks.len() as u64));
    bar.set_style(ProgressStyle::with_template(
        "{prefix} [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}",
    )?);
    bar.set_prefix(format!(
        "{} - {}",
        sheet.metadata.performer, sheet.metadata.title
    ));

    let track_style = ProgressStyle::with_template("  {prefix} {msg}")?;
    let durations = track_durations(sheet).await?;
    let track_bars: Vec<ProgressBar> = sheet
        .tracks
        .iter()
        .zip(durations)
        .map(|(track, duration)| {
            let track_bar = progress.add(ProgressBar::new_spinner());
            track_bar.set_style(track_style.clone());
            track_bar.set_prefix(format!(
                "{:<4} {:<60} {duration:>9}",
                track.track.index,
                file_name(&track.destination_path)
            ));
            track_bar.set_message("waiting");
            track_bar
        })
        .collect();

    let mut jobs = stream::iter(sheet.tracks.iter().zip(&track_bars))
        .map(|(track, track_bar)| {
            let album = Arc::clone(&album);
            async move {
                let result = run_track(track, album, track_bar).await;
                if result.is_err() {
                    track_bar.abandon_with_message("failed");
                }
                result.map(|()| track)
            }
        })
        .buffer_unordered(config.jobs);

    while let Some(result) = jobs.next().await {
        let track = result?;
        bar.inc(1);
        bar.set_message(file_name(&track.destination_path));
    }

    bar.finish_with_message("done");
    Ok(())
}

async fn run_track(
    track: &PlannedTrack,
    album: Arc<AlbumTags>,
    track_bar: &ProgressBar,
) -> ProcessResult<()> {
    track_bar.set_message("sox");
    split_track(track).await?;
    track_bar.set_message("tagging");
    tag_track(track, album).await?;
    track_bar.finish_with_message("done");
    Ok(())
}

/// Planned length of every track as `H:MM:SS`.
///
/// Tracks running to the end of their source take the source's length from its
/// audio properties, or `?` when it cannot be read.
async fn track_durations(sheet: &PlannedSheet) -> ProcessResult<Vec<String>> {
    let spans: Vec<(PathBuf, f64, f64)> = sheet
        .tracks
        .iter()
        .map(|t| (t.source_path.clone(), t.start_seconds, t.end_seconds))
        .collect();

    let durations = tokio::task::spawn_blocking(move || {
        let mut lengths: HashMap<PathBuf, Option<f64>> = HashMap::new();

        spans
            .into_iter()
            .map(|(source, start, end)| {
                let end = if end != 0.0 {
                    Some(end)
                } else {
                    *lengths
                        .entry(source.clone())
                        .or_insert_with(|| source_length(&source))
                };
                end.map_or_else(|| "?".to_string(), |end| format_duration(end - start))
            })
            .collect::<Vec<String>>()
    })
    .await?;

    Ok(durations)
}

fn source_length(path: &Path) -> Option<f64> {
    match lofty::read_from_path(path) {
        Ok(file) => Some(file.properties().duration().as_secs_f64()),
        Err(e) => {
            debug!("Could not read the length of {path:?}: {e}");
            None
        }
    }
}

/// Whole seconds as `H:MM:SS`, e.g. `0:07:23`.
fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}:{:02}", total / 3600, total / 60 % 60, total % 60)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

async fn split_track(track: &PlannedTrack) -> ProcessResult<()> {
    debug!("Running: {}", track.command);

    let output = shell(&track.command)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await?;

    if !output.status.success() {
        return Err(ProcessError::CommandFailed {
            command: track.command.clone(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(())
}

async fn tag_track(track: &PlannedTrack, album: Arc<AlbumTags>) -> ProcessResult<()> {
    let tags = TrackTags::for_track(&album, &track.track);
    let path = track.destination_path.clone();

    tokio::task::spawn_blocking(move || write_tags(&path, &album, &tags)).await??;

    Ok(())
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

#[cfg(not(windows))]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

fn log_sheet_summary(sheet: &PlannedSheet, album: &AlbumTags) {
    info!("{} - {}", sheet.metadata.performer, album.album_title);

    if let Some(output_dir) = sheet.output_dir() {
        info!("Output directory: {}", output_dir.display());
    }

    match &sheet.cover_path {
        Some(cover) => info!("Cover: {}", cover.display()),
        None => info!("Cover: not found"),
    }

    if let Some(first) = sheet.tracks.first() {
        let extension = |path: &Path| {
            path.extension()
                .map(|ext| ext.to_string_lossy().into_owned())
                .unwrap_or_default()
        };
        info!("Input file format: {}", extension(&first.source_path));
        info!("Output file format: {}", extension(&first.destination_path));
    }
}

async fn countdown(wait: Duration) {
    for remaining in (1..=wait.as_secs()).rev() {
        info!("Starting in: {remaining}");
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::cue::models::{AlbumMetadata, TrackRecord};

    fn planned(command: &str) -> PlannedTrack {
        PlannedTrack {
            track: TrackRecord::new("01", "album.wav"),
            source_path: PathBuf::from("/music/album.wav"),
            start_seconds: 0.0,
            end_seconds: 0.0,
            destination_path: PathBuf::from("/music/tracks/01.flac"),
            command: command.to_string(),
        }
    }

    #[tokio::test]
    async fn successful_command_passes() {
        split_track(&planned("true")).await.unwrap();
    }

    #[tokio::test]
    async fn failing_command_reports_status_and_stderr() {
        let err = split_track(&planned("echo broken >&2; exit 3"))
            .await
            .unwrap_err();

        match err {
            ProcessError::CommandFailed {
                status, stderr, ..
            } => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn formats_durations_as_clock_time() {
        assert_eq!(format_duration(443.547), "0:07:23");
        assert_eq!(format_duration(807.32 - 443.547), "0:06:03");
        assert_eq!(format_duration(3725.0), "1:02:05");
        assert_eq!(format_duration(-1.0), "0:00:00");
    }

    #[tokio::test]
    async fn durations_use_the_next_start_or_fall_back_to_unknown() {
        let mut first = planned("true");
        first.start_seconds = 443.547;
        first.end_seconds = 807.32;
        let mut last = planned("true");
        last.start_seconds = 2073.16;
        last.source_path = PathBuf::from("/nonexistent/album.wav");

        let sheet = PlannedSheet {
            metadata: AlbumMetadata::default(),
            tracks: vec![first, last],
            cue_path: PathBuf::from("/nonexistent/album.cue"),
            cover_path: None,
        };

        assert_eq!(track_durations(&sheet).await.unwrap(), ["0:06:03", "?"]);
    }

    #[tokio::test]
    async fn process_sheet_stops_at_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut track = planned("exit 1");
        track.destination_path = dir.path().join("out/01.flac");

        let sheet = PlannedSheet {
            metadata: AlbumMetadata::default(),
            tracks: vec![track],
            cue_path: dir.path().join("album.cue"),
            cover_path: None,
        };
        let config = Config {
            src_path: dir.path().to_path_buf(),
            output_dir: None,
            comments: Vec::new(),
            format: "flac".to_string(),
            naming_spec: "#n".to_string(),
            cue_encoding: None,
            wait: Duration::ZERO,
            jobs: 2,
            sox: crate::sox::SoxProperties {
                exe_name: "sox".to_string(),
                compression_level: None,
                supported_formats: vec!["flac".to_string()],
            },
        };

        let err = process_sheet(&sheet, &config, &MultiProgress::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ProcessError::CommandFailed { .. }));
        assert!(dir.path().join("out").is_dir());
    }
}
