use crate::config::Config;
use crate::cue::CueParser;
use crate::plan::models::PlannedSheet;
use crate::plan::plan_sheet;
use crate::sheet::discovery::{find_cover, find_cue_sheets};
use crate::sheet::error::{SheetError, SheetResult};
use crate::sheet::models::{DiscoveredSheet, SheetBundle};
use log::{debug, info};
use std::path::Path;
use tokio::fs;

pub mod discovery;
pub mod error;
pub mod models;

/// Finds, parses and plans every sheet reachable from the configured source path.
///
/// The source may be a single CUE file or a directory tree. Sheets without audio
/// tracks are left out. The first failing sheet aborts the whole run.
pub async fn collect_sheets(config: &Config) -> SheetResult<Vec<PlannedSheet>> {
    config.sox.ensure_format_supported(&config.format)?;

    if !fs::try_exists(&config.src_path).await? {
        return Err(SheetError::SourcePathNotFound(config.src_path.clone()));
    }

    let src_path = std::path::absolute(&config.src_path)?;
    let discovered = if fs::metadata(&src_path).await?.is_dir() {
        info!("Searching for CUE files in {src_path:?}");
        find_cue_sheets(&src_path).await?
    } else {
        let parent = src_path.parent().unwrap_or_else(|| Path::new("."));
        vec![DiscoveredSheet {
            cover_path: find_cover(parent).await?,
            cue_path: src_path.clone(),
        }]
    };

    debug!("Discovered {} CUE sheet(s)", discovered.len());

    let mut planned = Vec::with_capacity(discovered.len());

    for DiscoveredSheet {
        cue_path,
        cover_path,
    } in discovered
    {
        let sheet = CueParser::new(&cue_path, config.cue_encoding.clone())
            .parse()
            .await?;

        if sheet.tracks.is_empty() {
            info!("Skipping {cue_path:?}: no audio tracks");
            continue;
        }

        let bundle = SheetBundle::new(sheet, cue_path, cover_path);
        planned.push(plan_sheet(bundle, config).await?);
    }

    Ok(planned)
}
