//! Site configuration module.
//!
//! Handles loading and validating `config.toml`. All values have stock
//! defaults matching the production deployment, so a config file is only
//! needed to override something.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! public_base_url = "https://pub-456f19304a5c430d8c184ecc68198a3c.r2.dev"
//! content_root = "Portfolio-Content"
//!
//! [lister]
//! page_limit = 1000          # Single-page enumeration limit (scale boundary)
//! bind_addr = "127.0.0.1:8787"
//!
//! [layout]
//! narrow_max = 480           # width <= narrow_max  -> 1 column
//! medium_max = 768           # width <= medium_max  -> 2 columns
//! wide_columns = 4           # anything wider       -> wide_columns
//!
//! [observer]
//! threshold = 0.1            # Intersection ratio that counts as visible
//! margin_px = 50             # Pre-load buffer around the viewport
//! stagger_ms = 50            # Per-item delay before observation starts
//!
//! [transition]
//! fade_in_ms = 500           # Overlay fade-in before the section switch
//! hold_ms = 1000             # Overlay hold after the switch
//! fade_out_ms = 500          # Overlay fade-out back to idle
//! ```
//!
//! Config files are sparse — override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults matching the production deployment. Unknown keys
/// are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Public base URL the lister joins object keys onto.
    pub public_base_url: String,
    /// Top-level prefix under which all portfolio media lives.
    pub content_root: String,
    /// Media-listing service settings.
    pub lister: ListerConfig,
    /// Masonry column breakpoints.
    pub layout: LayoutConfig,
    /// Visibility observer thresholds.
    pub observer: ObserverConfig,
    /// Section transition timings.
    pub transition: TransitionConfig,
}

fn default_base_url() -> String {
    "https://pub-456f19304a5c430d8c184ecc68198a3c.r2.dev".to_string()
}

fn default_content_root() -> String {
    "Portfolio-Content".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            public_base_url: default_base_url(),
            content_root: default_content_root(),
            lister: ListerConfig::default(),
            layout: LayoutConfig::default(),
            observer: ObserverConfig::default(),
            transition: TransitionConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.public_base_url.is_empty() {
            return Err(ConfigError::Validation(
                "public_base_url must not be empty".into(),
            ));
        }
        if self.public_base_url.ends_with('/') {
            return Err(ConfigError::Validation(
                "public_base_url must not end with '/' (keys are joined verbatim)".into(),
            ));
        }
        if self.content_root.is_empty() || self.content_root.contains('/') {
            return Err(ConfigError::Validation(
                "content_root must be a single path segment".into(),
            ));
        }
        if self.lister.page_limit == 0 {
            return Err(ConfigError::Validation(
                "lister.page_limit must be non-zero".into(),
            ));
        }
        if self.layout.narrow_max >= self.layout.medium_max {
            return Err(ConfigError::Validation(
                "layout.narrow_max must be below layout.medium_max".into(),
            ));
        }
        if self.layout.wide_columns == 0 {
            return Err(ConfigError::Validation(
                "layout.wide_columns must be non-zero".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.observer.threshold) {
            return Err(ConfigError::Validation(
                "observer.threshold must be within 0.0-1.0".into(),
            ));
        }
        Ok(())
    }
}

/// Media-listing service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListerConfig {
    /// Maximum objects enumerated per request. The store is asked for a
    /// single page of this size; buckets beyond it need pagination, which
    /// the lister deliberately does not do.
    pub page_limit: usize,
    /// Listen address for `lightwork serve`.
    pub bind_addr: String,
}

impl Default for ListerConfig {
    fn default() -> Self {
        Self {
            page_limit: 1000,
            bind_addr: "127.0.0.1:8787".to_string(),
        }
    }
}

/// Masonry column breakpoints.
///
/// Width buckets mirror the site's CSS: phones get one column, tablets two,
/// anything wider the full desktop count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Largest width (logical px) that still renders a single column.
    pub narrow_max: u32,
    /// Largest width that renders two columns.
    pub medium_max: u32,
    /// Column count above `medium_max`.
    pub wide_columns: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            narrow_max: 480,
            medium_max: 768,
            wide_columns: 4,
        }
    }
}

/// Visibility observer thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ObserverConfig {
    /// Fraction of an element that must intersect the (expanded) viewport
    /// before it counts as visible.
    pub threshold: f32,
    /// Margin added around the viewport so media starts loading slightly
    /// before it scrolls in.
    pub margin_px: f32,
    /// Per-item delay before observation begins, producing the sequential
    /// fade-in.
    pub stagger_ms: u64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            margin_px: 50.0,
            stagger_ms: 50,
        }
    }
}

/// Section transition timings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransitionConfig {
    /// Overlay fade-in duration; the section switches when it completes.
    pub fade_in_ms: u64,
    /// How long the overlay holds after the switch.
    pub hold_ms: u64,
    /// Overlay fade-out duration back to idle.
    pub fade_out_ms: u64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            fade_in_ms: 500,
            hold_ms: 1000,
            fade_out_ms: 500,
        }
    }
}

/// Load `config.toml` from the given path, falling back to stock defaults
/// when the file doesn't exist.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let config = if path.exists() {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Stock config as a documented TOML string, for `lightwork gen-config`.
pub fn stock_config_toml() -> String {
    let config = SiteConfig::default();
    toml::to_string_pretty(&config).expect("stock config always serializes")
}
