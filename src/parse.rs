//! Media URL parsing.
//!
//! A single pure function turns a lister URL (or a bare object key) into a
//! structured [`GalleryItem`]. All entry points that ingest remote media go
//! through here, so the category/type/label derivation lives in exactly one
//! place.
//!
//! ## Derivation Rules
//!
//! - The public base URL prefix is stripped when present; what remains must
//!   start with the content root or the input is dropped.
//! - The first segment under the content root is the category; dashes in it
//!   are shown as spaces (`Degen-Legends` → "Degen Legends").
//! - The last segment is the file name, percent-decoded for display. Earlier
//!   segments are left as-is.
//! - The display stem is the file name up to the *first* dot, so
//!   `Fairy, she can dance..mp4` labels as "Fairy, she can dance".
//! - The extension decides the type; keys outside both media sets are
//!   dropped rather than defaulted.
//!
//! The function is total: malformed input yields `None`, never a panic.

use crate::types::{GalleryItem, classify_extension, extension_of};

/// Parse an absolute media URL (or bare object key) into a gallery item.
///
/// `base_url` is stripped when the input starts with it, so both forms work:
///
/// - `"https://cdn.example.com/Portfolio-Content/Foo/bar.MP4"`
/// - `"Portfolio-Content/Foo/bar.MP4"`
///
/// Returns `None` when the path lies outside `content_root`, has no
/// category segment, or carries an extension outside the media sets.
/// Parsing the same input twice yields the same output.
pub fn parse_media_url(url: &str, base_url: &str, content_root: &str) -> Option<GalleryItem> {
    let (key, absolute) = match url.strip_prefix(base_url) {
        Some(rest) => (rest.trim_start_matches('/'), true),
        None => (url, false),
    };

    let under_root = key.strip_prefix(content_root)?.strip_prefix('/')?;

    let mut segments = under_root.split('/');
    let category_raw = segments.next().filter(|s| !s.is_empty())?;
    let file_name = segments.next_back().filter(|s| !s.is_empty())?;

    let media_type = extension_of(file_name).and_then(classify_extension)?;

    let decoded = urlencoding::decode(file_name)
        .map(|c| c.into_owned())
        .unwrap_or_else(|_| file_name.to_string());
    let stem = decoded.split('.').next().unwrap_or(&decoded);

    let category = category_raw.replace('-', " ");
    let alt = format!("{category} - {stem}");

    Some(GalleryItem {
        media_type,
        src: key.to_string(),
        alt,
        category,
        date_modified: None,
        url: absolute.then(|| url.to_string()),
    })
}
