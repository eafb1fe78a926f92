//! Media sources for the gallery loader.
//!
//! The gallery doesn't care where its items come from. A [`MediaSource`]
//! yields a fresh item list per load; the two shipped implementations are:
//!
//! - [`HttpSource`] — fetch the lister's JSON array of URLs and parse each
//!   one. Malformed URLs are dropped, not errors.
//! - [`EmbeddedSource`] — the fallback array compiled into the binary, for
//!   operation without any network call.
//!
//! Fetch failures are returned as [`FetchError`]; the loader degrades them
//! to an empty item set rather than surfacing an error.

use std::io::Read;
use thiserror::Error;

use crate::config::SiteConfig;
use crate::parse::parse_media_url;
use crate::types::GalleryItem;

/// Fallback data compiled into the binary, same shape the site embeds
/// inline. Regenerate with `lightwork scan`.
pub const FALLBACK_JSON: &str = include_str!("../static/fallback.json");

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] Box<ureq::Error>),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Anything that can produce a full gallery item list.
pub trait MediaSource {
    fn fetch_items(&self) -> Result<Vec<GalleryItem>, FetchError>;
}

/// Parse a lister response (URL strings) into items.
///
/// URLs the parser rejects are dropped silently — the rendered set shows
/// less, never an error.
pub fn items_from_listing(urls: &[String], base_url: &str, content_root: &str) -> Vec<GalleryItem> {
    urls.iter()
        .filter_map(|url| {
            let item = parse_media_url(url, base_url, content_root);
            if item.is_none() {
                log::debug!("dropping unparseable media url: {url}");
            }
            item
        })
        .collect()
}

/// Live source: the media lister endpoint.
pub struct HttpSource {
    endpoint: String,
    base_url: String,
    content_root: String,
}

impl HttpSource {
    pub fn new(endpoint: impl Into<String>, config: &SiteConfig) -> Self {
        Self {
            endpoint: endpoint.into(),
            base_url: config.public_base_url.clone(),
            content_root: config.content_root.clone(),
        }
    }
}

impl MediaSource for HttpSource {
    fn fetch_items(&self) -> Result<Vec<GalleryItem>, FetchError> {
        let response = ureq::get(&self.endpoint).call().map_err(Box::new)?;
        let mut body = String::new();
        response
            .into_body()
            .into_reader()
            .read_to_string(&mut body)?;
        let urls: Vec<String> = serde_json::from_str(&body)?;
        Ok(items_from_listing(&urls, &self.base_url, &self.content_root))
    }
}

/// Offline source: the embedded fallback array.
pub struct EmbeddedSource;

impl MediaSource for EmbeddedSource {
    fn fetch_items(&self) -> Result<Vec<GalleryItem>, FetchError> {
        Ok(serde_json::from_str(FALLBACK_JSON)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MediaType;

    fn config() -> SiteConfig {
        SiteConfig::default()
    }

    #[test]
    fn listing_parses_well_formed_urls() {
        let config = config();
        let urls = vec![
            format!("{}/Portfolio-Content/Foo/bar.mp4", config.public_base_url),
            format!("{}/Portfolio-Content/Riddle/desert.png", config.public_base_url),
        ];
        let items = items_from_listing(&urls, &config.public_base_url, &config.content_root);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].media_type, MediaType::Video);
        assert_eq!(items[1].category, "Riddle");
    }

    #[test]
    fn malformed_urls_dropped_not_fatal() {
        let config = config();
        let urls = vec![
            "https://elsewhere.example/thing.png".to_string(),
            format!("{}/random.txt", config.public_base_url),
            format!("{}/Portfolio-Content/Foo/keep.png", config.public_base_url),
        ];
        let items = items_from_listing(&urls, &config.public_base_url, &config.content_root);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].alt, "Foo - keep");
    }

    #[test]
    fn embedded_fallback_parses() {
        let items = EmbeddedSource.fetch_items().unwrap();
        assert!(!items.is_empty());
        // Every embedded entry is complete: category, label, and a date.
        for item in &items {
            assert!(!item.category.is_empty());
            assert!(!item.alt.is_empty());
            assert!(item.date_modified.is_some());
        }
    }

    #[test]
    fn embedded_fallback_spans_multiple_categories() {
        let items = EmbeddedSource.fetch_items().unwrap();
        let mut categories: Vec<&str> = items.iter().map(|i| i.category.as_str()).collect();
        categories.sort_unstable();
        categories.dedup();
        assert!(categories.len() >= 3);
    }
}
