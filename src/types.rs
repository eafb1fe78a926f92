//! Shared gallery types.
//!
//! These types cross every boundary in the crate: the lister serializes URLs
//! built from object keys, the parser produces [`GalleryItem`]s from those
//! URLs, the metadata scan emits them as the embedded fallback array, and the
//! gallery loader holds them as its working set. Field names follow the
//! site's embedded data format (`type`, `src`, `alt`, `category`,
//! `dateModified`) so the fallback array and the scan output deserialize
//! directly.

use serde::{Deserialize, Serialize};

/// Extensions classified as images, matched case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Extensions classified as videos, matched case-insensitively.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov"];

/// Kind of media a gallery item holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

/// Classify a file extension into a media type.
///
/// Case-insensitive. Returns `None` for anything outside the two allowed
/// sets — such files never become gallery items.
pub fn classify_extension(ext: &str) -> Option<MediaType> {
    let ext = ext.to_ascii_lowercase();
    if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaType::Video)
    } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaType::Image)
    } else {
        None
    }
}

/// Whether a key's extension belongs to either allowed media set.
pub fn is_media_key(key: &str) -> bool {
    extension_of(key).and_then(classify_extension).is_some()
}

/// Extension of a path or key: text after the last dot of the last segment.
///
/// Returns `None` when the last segment has no dot, or the dot is the last
/// character (`"clip."`).
pub fn extension_of(key: &str) -> Option<&str> {
    let segment = key.rsplit('/').next()?;
    let (_, ext) = segment.rsplit_once('.')?;
    if ext.is_empty() { None } else { Some(ext) }
}

/// One gallery entry.
///
/// Constructed once per load — either parsed from a lister URL or read from
/// the embedded fallback array — and replaced wholesale on the next load.
/// Items are never mutated individually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    /// Image or video, derived deterministically from the extension.
    #[serde(rename = "type")]
    pub media_type: MediaType,
    /// Key-relative path, e.g. `Portfolio-Content/Riddle/desert.png`.
    pub src: String,
    /// Display label: `"<category> - <stem>"`.
    pub alt: String,
    /// First path segment under the content root, dashes shown as spaces.
    pub category: String,
    /// `MM-DD-YYYY` modification date. Only the metadata scan fills this in;
    /// the lister response carries no dates.
    #[serde(rename = "dateModified", skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<String>,
    /// Absolute address when the item came from the lister.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl GalleryItem {
    /// Final segment of `src` — the raw file name shown in the overlay.
    pub fn file_name(&self) -> &str {
        self.src.rsplit('/').next().unwrap_or(&self.src)
    }
}
