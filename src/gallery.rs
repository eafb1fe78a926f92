//! Gallery loading and view building.
//!
//! The gallery holds one explicit piece of application state —
//! [`GalleryState`]: the loaded item list and the active filter. Rendering
//! is a pure function from that state to a [`GalleryView`], a declarative
//! description of the masonry grid that a DOM layer (or a test) can realize
//! without knowing how it was computed.
//!
//! ## Load Pipeline
//!
//! ```text
//! reload:      source → items (wholesale replacement; failure → empty set)
//! build_view:  filter → shuffle → round-robin into columns → cells
//! ```
//!
//! ## Known Properties
//!
//! - **Column count is per-load.** `build_view` takes the viewport width at
//!   call time; a resize between loads is not retroactively applied.
//! - **Order is shuffled on every build.** Presentation order is an explicit
//!   non-guarantee, chosen for visual variety. Tests inject a seeded RNG.
//! - **Last response wins.** A reload replaces the item list wholesale, so a
//!   slow fetch landing after a fresher one leaves a stale but internally
//!   consistent view. Acceptable because every build is a full re-render;
//!   revisit with request sequence numbers if rapid interaction ever makes
//!   staleness matter.

use rand::Rng;
use rand::seq::SliceRandom;
use std::time::Duration;

use crate::config::{LayoutConfig, ObserverConfig};
use crate::source::MediaSource;
use crate::types::{GalleryItem, MediaType};

/// The synthetic category that passes every item through the filter.
pub const ALL_CATEGORY: &str = "all";

/// Application state for the gallery: loaded items plus the active filter.
#[derive(Debug)]
pub struct GalleryState {
    items: Vec<GalleryItem>,
    filter: String,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self::new()
    }
}

impl GalleryState {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            filter: ALL_CATEGORY.to_string(),
        }
    }

    /// Fetch a fresh item list from the source.
    ///
    /// A failed fetch degrades to an empty set — the gallery shows less,
    /// never an error page.
    pub fn reload(&mut self, source: &dyn MediaSource) {
        let items = source.fetch_items().unwrap_or_else(|err| {
            log::warn!("media fetch failed, showing empty gallery: {err}");
            Vec::new()
        });
        self.replace_items(items);
    }

    /// Replace the item list wholesale. The previous list is discarded even
    /// if the new one arrived late (last response wins).
    pub fn replace_items(&mut self, items: Vec<GalleryItem>) {
        log::debug!("gallery now holds {} items", items.len());
        self.items = items;
    }

    /// Set the active filter. The caller rebuilds the view from scratch —
    /// there is no incremental diffing.
    pub fn set_filter(&mut self, category: impl Into<String>) {
        self.filter = category.into();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    /// Items passing the active filter, in load order.
    pub fn visible_items(&self) -> Vec<&GalleryItem> {
        self.items
            .iter()
            .filter(|item| self.filter == ALL_CATEGORY || item.category == self.filter)
            .collect()
    }
}

/// Column count for a viewport width.
///
/// Recomputed fresh on every build — never cached.
pub fn column_count(viewport_width: u32, layout: &LayoutConfig) -> usize {
    if viewport_width <= layout.narrow_max {
        1
    } else if viewport_width <= layout.medium_max {
        2
    } else {
        layout.wide_columns
    }
}

/// How a cell's media resource is brought in.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStrategy {
    /// Images: the address is set immediately with native lazy loading.
    Eager { src: String },
    /// Videos: no preload; the address is assigned only when the cell
    /// first becomes visible.
    Deferred { src: String },
}

/// Metadata overlay shown on hover.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub category: String,
    pub file_name: String,
    pub date_modified: Option<String>,
}

/// One placeholder in the masonry grid.
#[derive(Debug, Clone)]
pub struct MediaCell {
    pub item: GalleryItem,
    pub load: LoadStrategy,
    pub overlay: Overlay,
    /// Delay before this cell registers with the visibility observer,
    /// proportional to its position — produces the sequential fade-in.
    pub reveal_delay: Duration,
}

/// Declarative description of the rendered grid: N columns of cells.
#[derive(Debug, Default)]
pub struct GalleryView {
    pub columns: Vec<Vec<MediaCell>>,
}

impl GalleryView {
    pub fn cell_count(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn cells(&self) -> impl Iterator<Item = &MediaCell> {
        self.columns.iter().flatten()
    }
}

/// Build the grid for the current state and viewport width.
///
/// Filters by the active category, shuffles, and distributes round-robin by
/// index modulo column count. The RNG is injected so tests can seed it.
pub fn build_view<R: Rng + ?Sized>(
    state: &GalleryState,
    viewport_width: u32,
    layout: &LayoutConfig,
    observer: &ObserverConfig,
    rng: &mut R,
) -> GalleryView {
    let count = column_count(viewport_width, layout);
    let mut columns: Vec<Vec<MediaCell>> = (0..count).map(|_| Vec::new()).collect();

    let mut visible: Vec<&GalleryItem> = state.visible_items();
    visible.shuffle(rng);

    for (index, item) in visible.into_iter().enumerate() {
        let address = item.url.clone().unwrap_or_else(|| item.src.clone());
        let load = match item.media_type {
            MediaType::Image => LoadStrategy::Eager { src: address },
            MediaType::Video => LoadStrategy::Deferred { src: address },
        };
        let cell = MediaCell {
            overlay: Overlay {
                category: item.category.clone(),
                file_name: item.file_name().to_string(),
                date_modified: item.date_modified.clone(),
            },
            load,
            reveal_delay: Duration::from_millis(index as u64 * observer.stagger_ms),
            item: item.clone(),
        };
        columns[index % count].push(cell);
    }

    GalleryView { columns }
}
