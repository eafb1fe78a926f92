//! # Lightwork
//!
//! Gallery pipeline and media-listing service for the LightWork portfolio.
//! The backing bucket is the data source: project directories become
//! categories, and every media object under the content root becomes a
//! gallery item.
//!
//! # Architecture: One Pipeline, Explicit State
//!
//! Everything the gallery shows flows through a single pipeline:
//!
//! ```text
//! 1. List     object store  →  JSON array of public URLs   (lister)
//! 2. Parse    URL           →  GalleryItem                 (parse)
//! 3. Load     source        →  GalleryState                (gallery/source)
//! 4. Build    state + width →  GalleryView (columns/cells) (gallery/filter)
//! 5. Observe  visibility    →  lazy load / play / pause    (observe)
//! ```
//!
//! State lives in two explicit objects — [`gallery::GalleryState`] (items +
//! active filter) and per-cell [`observe::LazyMedia`] machines — and
//! rendering is a pure function from state to a declarative
//! [`gallery::GalleryView`]. Nothing here touches a DOM; a thin view layer
//! (or a test) realizes the description.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`lister`] | HTTP media-listing service — store enumeration, key filtering, CORS |
//! | [`parse`] | URL → structured gallery item (pure, total) |
//! | [`source`] | Item sources: lister endpoint over HTTP, embedded fallback array |
//! | [`gallery`] | Application state, column buckets, shuffled masonry view building |
//! | [`filter`] | Category derivation, filter bar, marquee duplication |
//! | [`observe`] | Intersection geometry and the lazy-media state machine |
//! | [`transition`] | Timed section-transition state machine (injected clock) |
//! | [`scan`] | Local content scan producing the embedded fallback data |
//! | [`config`] | `config.toml` loading, validation, stock defaults |
//! | [`types`] | Shared item types and extension classification |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Degrade, Never Blank
//!
//! Every external call that can fail degrades to "show less": a failed
//! store enumeration is a 500 with a JSON error, a failed fetch is an empty
//! gallery, a URL the parser can't place is dropped, a policy-blocked
//! autoplay is retried on the next viewport entry. No failure path renders
//! a blank page.
//!
//! ## Single-Page Enumeration
//!
//! The lister asks its store for one page of at most `lister.page_limit`
//! keys (1000 stock) and filters afterwards — identical to the production
//! listing. This is a deliberate, documented scale boundary; pagination
//! waits until a bucket actually exceeds it.
//!
//! ## Shuffle On Every Load
//!
//! Presentation order is randomized per build for visual variety. The RNG
//! is a parameter, so tests seed it and the non-guarantee stays testable.
//!
//! ## Last Response Wins
//!
//! Reloads are not cancelled or sequenced. A slow fetch landing after a
//! fresher one replaces the item list wholesale, which is acceptable
//! because every build is a full re-render of consistent state.

pub mod config;
pub mod filter;
pub mod gallery;
pub mod lister;
pub mod observe;
pub mod output;
pub mod parse;
pub mod scan;
pub mod source;
pub mod transition;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
