//! Filter bar derivation.
//!
//! The filter row is derived from whatever items are currently loaded: the
//! sorted set of distinct categories with the synthetic `all` prepended.
//! The site presents the row as a continuously scrolling marquee, which
//! needs a second identical copy of every button — purely cosmetic, both
//! copies wired to the same action.
//!
//! Selecting a filter updates [`GalleryState`] and the caller rebuilds the
//! whole grid; there is no incremental diffing.

use crate::gallery::{ALL_CATEGORY, GalleryState};
use crate::types::GalleryItem;

/// One button in the filter row.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterButton {
    /// Category this button selects (`"all"` for the synthetic entry).
    pub category: String,
    /// Whether this is the active filter.
    pub active: bool,
}

/// Sorted distinct categories present in `items`, with `all` prepended.
pub fn categories(items: &[GalleryItem]) -> Vec<String> {
    let mut distinct: Vec<String> = items.iter().map(|i| i.category.clone()).collect();
    distinct.sort();
    distinct.dedup();
    let mut all = Vec::with_capacity(distinct.len() + 1);
    all.push(ALL_CATEGORY.to_string());
    all.extend(distinct);
    all
}

/// One button per category, marking the active filter.
pub fn filter_bar(items: &[GalleryItem], active: &str) -> Vec<FilterButton> {
    categories(items)
        .into_iter()
        .map(|category| FilterButton {
            active: category == active,
            category,
        })
        .collect()
}

/// The marquee track: the button set followed by an identical duplicate.
///
/// The duplicate exists only so the scroll animation can loop seamlessly;
/// both halves carry the same categories and active flags.
pub fn marquee_track(buttons: &[FilterButton]) -> Vec<FilterButton> {
    let mut track = buttons.to_vec();
    track.extend_from_slice(buttons);
    track
}

/// Apply a filter selection: set it active and report that a full rebuild
/// is needed. Selecting the already-active category still rebuilds, same as
/// the site.
pub fn select_filter(state: &mut GalleryState, category: &str) {
    state.set_filter(category);
}
