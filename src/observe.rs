//! Visibility observation and lazy media control.
//!
//! A gallery page can hold hundreds of video cells; loading and playing all
//! of them at once is not survivable. The site keeps memory and bandwidth
//! bounded with one mechanism: each media element is watched for viewport
//! intersection, videos get their real source only on first entry, play on
//! entry, and pause on exit without discarding the decoded source.
//!
//! ## Per-Element State Machine
//!
//! ```text
//! Unloaded --enter--> Playing --exit--> Paused --re-enter--> Playing
//!    |                                    ^
//!    +---enter, autoplay blocked----------+
//! ```
//!
//! Autoplay failure (platform policy) is swallowed and logged; the next
//! entry retries. Exit never unloads — re-entry is cheap by design.
//!
//! ## Intersection Test
//!
//! Visibility is an intersection ratio crossing a threshold (10% by stock
//! config) against the viewport expanded by a pre-load margin (50 logical
//! pixels), mirroring `IntersectionObserver` semantics. The geometry is
//! pure so tests drive it directly.
//!
//! Observation runs for the life of the page. Cells removed from the grid
//! without dropping their observer registration leak; full page unload is
//! currently the only teardown.

use thiserror::Error;

use crate::config::ObserverConfig;

#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("autoplay blocked: {0}")]
    AutoplayBlocked(String),
    #[error("media failed to load: {0}")]
    Load(String),
}

/// Axis-aligned rectangle in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Grow by `margin` on every side.
    fn expand(&self, margin: f32) -> Self {
        Self {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + 2.0 * margin,
            height: self.height + 2.0 * margin,
        }
    }

    fn intersection_area(&self, other: &Self) -> f32 {
        let left = self.x.max(other.x);
        let right = (self.x + self.width).min(other.x + other.width);
        let top = self.y.max(other.y);
        let bottom = (self.y + self.height).min(other.y + other.height);
        (right - left).max(0.0) * (bottom - top).max(0.0)
    }
}

/// Fraction of `element` inside `viewport` expanded by `margin`.
pub fn intersection_ratio(element: &Rect, viewport: &Rect, margin: f32) -> f32 {
    let area = element.area();
    if area == 0.0 {
        return 0.0;
    }
    element.intersection_area(&viewport.expand(margin)) / area
}

/// Threshold/margin pair deciding when an element counts as visible.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityObserver {
    threshold: f32,
    margin: f32,
}

impl VisibilityObserver {
    pub fn from_config(config: &ObserverConfig) -> Self {
        Self {
            threshold: config.threshold,
            margin: config.margin_px,
        }
    }

    pub fn is_visible(&self, element: &Rect, viewport: &Rect) -> bool {
        intersection_ratio(element, viewport, self.margin) >= self.threshold
    }
}

/// Playback surface of one media element, injectable for tests.
pub trait MediaElement {
    /// Assign the real address and request a load.
    fn assign_source(&mut self, src: &str);
    fn has_source(&self) -> bool;
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self);
}

/// Lifecycle state of a lazily-managed media element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LazyState {
    Unloaded,
    Playing,
    Paused,
}

/// Drives one element through the lazy-load state machine.
///
/// `deferred_src` holds the address of a video that has not been assigned
/// yet; eagerly-loaded elements pass `None` and only get play/pause
/// management.
#[derive(Debug)]
pub struct LazyMedia {
    state: LazyState,
    deferred_src: Option<String>,
    visible: bool,
}

impl LazyMedia {
    pub fn new(deferred_src: Option<String>) -> Self {
        Self {
            state: LazyState::Unloaded,
            deferred_src,
            visible: false,
        }
    }

    pub fn state(&self) -> LazyState {
        self.state
    }

    /// Feed the current visibility; acts only on transitions.
    pub fn update(&mut self, visible: bool, element: &mut dyn MediaElement) {
        if visible == self.visible {
            return;
        }
        self.visible = visible;
        if visible {
            self.enter(element);
        } else {
            self.exit(element);
        }
    }

    /// Entered the viewport: assign the deferred source if still pending,
    /// then attempt playback. A blocked autoplay leaves the element paused
    /// and is retried on the next entry.
    fn enter(&mut self, element: &mut dyn MediaElement) {
        if let Some(src) = self.deferred_src.take()
            && !element.has_source()
        {
            element.assign_source(&src);
        }
        if !element.has_source() {
            return;
        }
        match element.play() {
            Ok(()) => self.state = LazyState::Playing,
            Err(err) => {
                log::warn!("media playback failed: {err}");
                self.state = LazyState::Paused;
            }
        }
    }

    /// Left the viewport: pause if playing. The source stays assigned so
    /// re-entry resumes without a reload.
    fn exit(&mut self, element: &mut dyn MediaElement) {
        if self.state == LazyState::Playing {
            element.pause();
            self.state = LazyState::Paused;
        }
    }
}
