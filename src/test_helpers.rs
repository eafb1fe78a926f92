//! Shared test utilities for the lightwork test suite.
//!
//! Item builders and a seeded RNG so view-building tests are deterministic
//! despite the gallery's shuffle-on-every-load behavior.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::types::{GalleryItem, classify_extension, extension_of};

/// Build a gallery item the way the parser would: type from the extension,
/// key under `Portfolio-Content/<category>/`, label `"<category> - <stem>"`.
///
/// Panics on a non-media extension — tests should classify on purpose.
pub fn item(category: &str, file_name: &str) -> GalleryItem {
    let media_type = extension_of(file_name)
        .and_then(classify_extension)
        .unwrap_or_else(|| panic!("'{file_name}' has no media extension"));
    let stem = file_name.split('.').next().unwrap_or(file_name);
    GalleryItem {
        media_type,
        src: format!("Portfolio-Content/{category}/{file_name}"),
        alt: format!("{category} - {stem}"),
        category: category.to_string(),
        date_modified: None,
        url: None,
    }
}

/// Deterministic RNG for shuffle-dependent assertions.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
