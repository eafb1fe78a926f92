//! Local content scanning.
//!
//! Walks a local `Portfolio-Content/` directory and produces the same item
//! array the site embeds as static fallback data: one entry per media file
//! with type, key-relative `src`, display label, category, and the file's
//! modification date. `lightwork scan` prints it as JSON; the result is
//! what `static/fallback.json` is regenerated from.
//!
//! ## Directory Layout
//!
//! ```text
//! Portfolio-Content/           # scan root
//! ├── Bothead/                 # project directory = category
//! │   ├── ANIMATED3.gif
//! │   └── Bothead.mp4
//! ├── Degen-Legends/
//! │   └── banner.gif
//! └── notes.txt                # root-level files are ignored
//! ```
//!
//! Categories come from the project directory name verbatim — the embedded
//! data keeps `Degen-Legends` as-is, matching the original site. Files with
//! extensions outside the media sets are skipped.

use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

use crate::types::{GalleryItem, classify_extension, extension_of};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("content root is not a directory: {0}")]
    NotADirectory(String),
}

/// Scan a local content directory into fallback gallery items.
///
/// `content_root_name` is the prefix written into each item's `src`
/// (normally `"Portfolio-Content"`), independent of where `root` actually
/// lives on disk. Output is sorted by category, then path, for stable
/// regeneration diffs.
pub fn scan_content(root: &Path, content_root_name: &str) -> Result<Vec<GalleryItem>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.display().to_string()));
    }

    let mut projects: Vec<_> = fs::read_dir(root)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    projects.sort();

    let mut items = Vec::new();
    for project in &projects {
        let category = project
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        for entry in WalkDir::new(project).min_depth(1).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy();
            let Some(media_type) = extension_of(&file_name).and_then(classify_extension) else {
                continue;
            };

            let rel = entry
                .path()
                .strip_prefix(root)
                .expect("walkdir yields paths under the scan root");
            let key = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            let stem = file_name.split('.').next().unwrap_or(&file_name);
            items.push(GalleryItem {
                media_type,
                src: format!("{content_root_name}/{key}"),
                alt: format!("{category} - {stem}"),
                category: category.clone(),
                date_modified: Some(modification_date(entry.path())?),
                url: None,
            });
        }
    }

    items.sort_by(|a, b| (&a.category, &a.src).cmp(&(&b.category, &b.src)));
    Ok(items)
}

/// `MM-DD-YYYY` from the file's mtime, in local time — the format the
/// site's embedded data uses.
fn modification_date(path: &Path) -> Result<String, ScanError> {
    let modified = fs::metadata(path)?.modified()?;
    let local: DateTime<Local> = modified.into();
    Ok(local.format("%m-%d-%Y").to_string())
}

/// Serialize scanned items the way `static/fallback.json` stores them.
pub fn to_fallback_json(items: &[GalleryItem]) -> String {
    serde_json::to_string_pretty(items).expect("gallery items always serialize")
}
