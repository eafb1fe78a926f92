//! Media-listing service.
//!
//! The production site's gallery asks one endpoint for everything it shows:
//! `GET /` enumerates the backing object store, keeps media keys under the
//! content prefix, and returns a JSON array of public URLs. This module
//! implements that endpoint plus the store abstraction behind it.
//!
//! ## Store Abstraction
//!
//! The bucket binding is an [`ObjectStore`] trait so the same listing logic
//! runs against a local directory ([`FsStore`]), an in-memory key list
//! (tests), or a real bucket adapter. Stores return raw keys; all filtering
//! and URL joining happens here.
//!
//! ## Enumeration Limit
//!
//! The store is asked for a single page of `lister.page_limit` keys
//! (1000 by default) and keys are filtered *after* truncation, exactly like
//! the production listing. There is no pagination: a bucket beyond the page
//! limit silently loses the tail. That is a documented scale boundary, not a
//! bug to paper over — see the limit tests below.
//!
//! ## Responses
//!
//! | Request     | Response                                        |
//! |-------------|-------------------------------------------------|
//! | `GET /`     | `200` JSON array of URL strings                 |
//! | `GET /` (store failure) | `500` `{"error": "<message>"}`      |
//! | `OPTIONS /` | `200` empty body (preflight)                    |
//!
//! Every response, including errors and preflight, carries the permissive
//! CORS header set.

use crate::config::SiteConfig;
use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use walkdir::WalkDir;

use crate::types::is_media_key;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store backend error: {0}")]
    Backend(String),
}

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid bind address '{0}'")]
    BindAddr(String),
}

/// A single-page view of a bucket: object keys in store order.
///
/// Keys use `/` as the separator regardless of platform. Implementations
/// must truncate to `limit` themselves — the lister never asks for more.
pub trait ObjectStore: Send + Sync {
    fn list(&self, limit: usize) -> Result<Vec<String>, StoreError>;
}

/// Object store backed by a local directory tree.
///
/// Keys are `/`-joined paths relative to the root, sorted for stable output.
/// Stands in for the bucket during local development and in tests.
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ObjectStore for FsStore {
    fn list(&self, limit: usize) -> Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| StoreError::Backend(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(&self.root)
                .expect("walkdir yields paths under its root");
            let key = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            keys.push(key);
            if keys.len() == limit {
                break;
            }
        }
        Ok(keys)
    }
}

/// In-memory store with a fixed key list. Useful for tests and demos.
pub struct MemStore {
    keys: Vec<String>,
}

impl MemStore {
    pub fn new(keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }
}

impl ObjectStore for MemStore {
    fn list(&self, limit: usize) -> Result<Vec<String>, StoreError> {
        Ok(self.keys.iter().take(limit).cloned().collect())
    }
}

/// Filter a key page down to media URLs.
///
/// A key survives when its extension is in an allowed media set and it lives
/// under the content prefix (or at least below some directory — bucket-root
/// stray files are excluded either way). Survivors become
/// `<public-base>/<key>` with the key joined verbatim, not re-encoded.
pub fn media_urls(keys: &[String], config: &SiteConfig) -> Vec<String> {
    let prefix = format!("{}/", config.content_root);
    keys.iter()
        .filter(|key| is_media_key(key))
        .filter(|key| key.starts_with(&prefix) || key.contains('/'))
        .map(|key| format!("{}/{}", config.public_base_url, key))
        .collect()
}

/// Enumerate one page from the store and reduce it to media URLs.
pub fn build_listing(
    store: &dyn ObjectStore,
    config: &SiteConfig,
) -> Result<Vec<String>, StoreError> {
    let keys = store.list(config.lister.page_limit)?;
    Ok(media_urls(&keys, config))
}

struct ListerState {
    store: Arc<dyn ObjectStore>,
    config: SiteConfig,
}

/// CORS header set attached to every response, error and preflight included.
fn cors_headers() -> [(HeaderName, HeaderValue); 3] {
    [
        (ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")),
        (
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, OPTIONS"),
        ),
        (
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ),
    ]
}

async fn list_media(State(state): State<Arc<ListerState>>) -> Response {
    match build_listing(state.store.as_ref(), &state.config) {
        Ok(urls) => {
            log::debug!("listed {} media urls", urls.len());
            (StatusCode::OK, cors_headers(), Json(urls)).into_response()
        }
        Err(err) => {
            log::error!("store enumeration failed: {err}");
            let body = serde_json::json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, cors_headers(), Json(body)).into_response()
        }
    }
}

async fn preflight() -> Response {
    (StatusCode::OK, cors_headers()).into_response()
}

/// Build the lister router: `GET /` and `OPTIONS /`.
pub fn router(store: Arc<dyn ObjectStore>, config: SiteConfig) -> Router {
    let state = Arc::new(ListerState { store, config });
    Router::new()
        .route("/", get(list_media).options(preflight))
        .with_state(state)
}

/// Serve the lister on `config.lister.bind_addr` until shutdown.
pub fn serve(store: Arc<dyn ObjectStore>, config: SiteConfig) -> Result<(), ServeError> {
    let addr: SocketAddr = config
        .lister
        .bind_addr
        .parse()
        .map_err(|_| ServeError::BindAddr(config.lister.bind_addr.clone()))?;
    let app = router(store, config);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        log::info!("media lister listening on {addr}");
        axum::serve(listener, app).await
    })?;
    Ok(())
}

/// Serve a lister over a local directory, for `lightwork serve`.
pub fn serve_dir(root: &Path, config: SiteConfig) -> Result<(), ServeError> {
    serve(Arc::new(FsStore::new(root)), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use std::fs;
    use tempfile::TempDir;

    fn test_config() -> SiteConfig {
        SiteConfig::default()
    }

    fn url_for(key: &str) -> String {
        format!("{}/{}", test_config().public_base_url, key)
    }

    struct BrokenStore;

    impl ObjectStore for BrokenStore {
        fn list(&self, _limit: usize) -> Result<Vec<String>, StoreError> {
            Err(StoreError::Backend("bucket unavailable".into()))
        }
    }

    #[test]
    fn media_keys_under_prefix_kept_exactly_once() {
        let keys = vec![
            "Portfolio-Content/Foo/bar.MP4".to_string(),
            "Portfolio-Content/Foo/baz.png".to_string(),
            "Portfolio-Content/Foo/notes.txt".to_string(),
            "random.txt".to_string(),
            "random.png".to_string(),
        ];
        let urls = media_urls(&keys, &test_config());
        assert_eq!(
            urls,
            vec![
                url_for("Portfolio-Content/Foo/bar.MP4"),
                url_for("Portfolio-Content/Foo/baz.png"),
            ]
        );
    }

    #[test]
    fn nested_media_outside_prefix_still_passes_separator_guard() {
        // The production rule is `starts_with(prefix) || contains('/')`:
        // media below any directory survives, bucket-root strays do not.
        let keys = vec![
            "Archive/old.jpg".to_string(),
            "stray.jpg".to_string(),
        ];
        let urls = media_urls(&keys, &test_config());
        assert_eq!(urls, vec![url_for("Archive/old.jpg")]);
    }

    #[test]
    fn keys_joined_verbatim_without_reencoding() {
        let keys = vec!["Portfolio-Content/Magic Eden/Top-1-Loop.mp4".to_string()];
        let urls = media_urls(&keys, &test_config());
        assert_eq!(
            urls,
            vec![url_for("Portfolio-Content/Magic Eden/Top-1-Loop.mp4")]
        );
    }

    #[test]
    fn page_limit_truncates_before_filtering() {
        let mut config = test_config();
        config.lister.page_limit = 2;
        // Two non-media keys fill the page; the media key behind them is
        // never seen. Single-page enumeration is a real scale boundary.
        let store = MemStore::new([
            "Portfolio-Content/Foo/a.txt",
            "Portfolio-Content/Foo/b.txt",
            "Portfolio-Content/Foo/c.png",
        ]);
        let urls = build_listing(&store, &config).unwrap();
        assert!(urls.is_empty());
    }

    #[test]
    fn fs_store_lists_relative_slash_keys() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("Portfolio-Content/Foo");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("bar.mp4"), b"v").unwrap();
        fs::write(dir.join("baz.png"), b"i").unwrap();

        let store = FsStore::new(tmp.path());
        let keys = store.list(1000).unwrap();
        assert_eq!(
            keys,
            vec![
                "Portfolio-Content/Foo/bar.mp4".to_string(),
                "Portfolio-Content/Foo/baz.png".to_string(),
            ]
        );
    }

    #[test]
    fn fs_store_honors_limit() {
        let tmp = TempDir::new().unwrap();
        for i in 0..5 {
            fs::write(tmp.path().join(format!("f{i}.png")), b"i").unwrap();
        }
        let store = FsStore::new(tmp.path());
        assert_eq!(store.list(3).unwrap().len(), 3);
    }

    #[tokio::test]
    async fn get_returns_json_array_with_cors() {
        let state = Arc::new(ListerState {
            store: Arc::new(MemStore::new(["Portfolio-Content/Foo/bar.mp4"])),
            config: test_config(),
        });
        let response = list_media(State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
        assert_eq!(
            response
                .headers()
                .get(ACCESS_CONTROL_ALLOW_METHODS)
                .unwrap(),
            "GET, OPTIONS"
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let urls: Vec<String> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(urls, vec![url_for("Portfolio-Content/Foo/bar.mp4")]);
    }

    #[tokio::test]
    async fn store_failure_returns_500_json_error_with_cors() {
        let state = Arc::new(ListerState {
            store: Arc::new(BrokenStore),
            config: test_config(),
        });
        let response = list_media(State(state)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().contains_key(ACCESS_CONTROL_ALLOW_ORIGIN));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .contains("bucket unavailable")
        );
    }

    #[tokio::test]
    async fn preflight_is_empty_with_cors() {
        let response = preflight().await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .headers()
                .contains_key(ACCESS_CONTROL_ALLOW_HEADERS)
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }
}
