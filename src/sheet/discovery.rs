use crate::sheet::error::SheetResult;
use crate::sheet::models::DiscoveredSheet;
use async_recursion::async_recursion;
use log::debug;
use std::path::{Path, PathBuf};
use tokio::fs;

const COVER_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];
const COVER_STEMS: [&str; 3] = ["cover", "folder", "front"];

/// Finds one CUE sheet (and an optional cover image) per directory under `root`.
pub async fn find_cue_sheets(root: &Path) -> SheetResult<Vec<DiscoveredSheet>> {
    let mut sheets = Vec::new();
    walk(root, &mut sheets).await?;
    Ok(sheets)
}

/// The cover image of a single directory, without descending into subdirectories.
pub async fn find_cover(dir: &Path) -> SheetResult<Option<PathBuf>> {
    let (files, _) = list_dir(dir).await?;
    Ok(files.into_iter().find(|file| is_cover(file)))
}

#[async_recursion]
async fn walk(dir: &Path, sheets: &mut Vec<DiscoveredSheet>) -> SheetResult<()> {
    let (files, subdirs) = list_dir(dir).await?;

    let mut cue_files = files.iter().filter(|file| is_cue(file));
    if let Some(cue_path) = cue_files.next() {
        let skipped = cue_files.count();
        if skipped > 0 {
            debug!("Ignoring {skipped} additional CUE file(s) in {dir:?}");
        }

        sheets.push(DiscoveredSheet {
            cue_path: cue_path.clone(),
            cover_path: files.iter().find(|file| is_cover(file)).cloned(),
        });
    }

    for subdir in &subdirs {
        walk(subdir, sheets).await?;
    }

    Ok(())
}

/// Files and subdirectories of `dir`, each sorted by name.
///
/// Symlinked directories are listed as neither and never walked into.
async fn list_dir(dir: &Path) -> SheetResult<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut entries = fs::read_dir(dir).await?;
    let mut files = Vec::new();
    let mut subdirs = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let file_type = entry.file_type().await?;

        if file_type.is_dir() {
            subdirs.push(path);
        } else if file_type.is_symlink() && is_dir(&path).await {
            debug!("Not following symlinked directory {path:?}");
        } else {
            files.push(path);
        }
    }

    files.sort();
    subdirs.sort();

    Ok((files, subdirs))
}

async fn is_dir(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|metadata| metadata.is_dir())
        .unwrap_or(false)
}

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

fn is_cue(path: &Path) -> bool {
    lowercase_extension(path).as_deref() == Some("cue")
}

fn is_cover(path: &Path) -> bool {
    let extension_matches = lowercase_extension(path)
        .is_some_and(|ext| COVER_EXTENSIONS.contains(&ext.as_str()));
    let stem_matches = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| COVER_STEMS.contains(&stem.to_lowercase().as_str()));

    extension_matches && stem_matches
}
