//! End-to-end pipeline tests: object store → lister → parser → gallery
//! state → rendered view, including one pass over real HTTP.

use std::fs;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

use lightwork::config::SiteConfig;
use lightwork::gallery::{ALL_CATEGORY, GalleryState, build_view};
use lightwork::lister::{self, FsStore, MemStore, build_listing};
use lightwork::source::{EmbeddedSource, HttpSource, MediaSource, items_from_listing};

fn rng() -> StdRng {
    StdRng::seed_from_u64(99)
}

/// A bucket-shaped directory: two projects, one text file, one stray.
fn fixture_store() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("Portfolio-Content");
    for (dir, file) in [
        ("Bothead", "OG.png"),
        ("Bothead", "Teaser2.mp4"),
        ("Riddle", "desert.png"),
    ] {
        let dir = root.join(dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file), b"media").unwrap();
    }
    fs::write(root.join("Bothead").join("notes.txt"), b"text").unwrap();
    fs::write(tmp.path().join("random.txt"), b"stray").unwrap();
    tmp
}

#[test]
fn store_to_view_full_pipeline() {
    let config = SiteConfig::default();
    let tmp = fixture_store();
    let store = FsStore::new(tmp.path());

    let urls = build_listing(&store, &config).unwrap();
    assert_eq!(urls.len(), 3, "text and stray files excluded");
    assert!(urls.iter().all(|u| u.starts_with(&config.public_base_url)));

    let items = items_from_listing(&urls, &config.public_base_url, &config.content_root);
    assert_eq!(items.len(), 3);

    let mut state = GalleryState::new();
    state.replace_items(items);

    state.set_filter("Riddle");
    let view = build_view(&state, 1280, &config.layout, &config.observer, &mut rng());
    assert_eq!(view.cell_count(), 1);
    assert_eq!(view.columns.len(), 4);

    state.set_filter(ALL_CATEGORY);
    let view = build_view(&state, 400, &config.layout, &config.observer, &mut rng());
    assert_eq!(view.cell_count(), 3);
    assert_eq!(view.columns.len(), 1);
}

#[test]
fn embedded_fallback_renders_without_network() {
    let config = SiteConfig::default();
    let mut state = GalleryState::new();
    state.reload(&EmbeddedSource);
    assert!(!state.items().is_empty());

    let view = build_view(&state, 1280, &config.layout, &config.observer, &mut rng());
    assert_eq!(view.cell_count(), state.items().len());
}

#[tokio::test]
async fn lister_serves_listing_over_http() {
    let config = SiteConfig::default();
    let store = Arc::new(MemStore::new([
        "Portfolio-Content/Foo/bar.MP4",
        "Portfolio-Content/Foo/readme.txt",
        "random.txt",
    ]));
    let app = lister::router(store, config.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let endpoint = format!("http://{addr}/");
    let items = tokio::task::spawn_blocking(move || {
        HttpSource::new(endpoint, &config).fetch_items().unwrap()
    })
    .await
    .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].category, "Foo");
    assert_eq!(items[0].alt, "Foo - bar");
}

#[tokio::test]
async fn unreachable_lister_degrades_to_empty_gallery() {
    let config = SiteConfig::default();
    let state = tokio::task::spawn_blocking(move || {
        let source = HttpSource::new("http://127.0.0.1:9/", &config);
        let mut state = GalleryState::new();
        state.reload(&source);
        state
    })
    .await
    .unwrap();
    assert!(state.items().is_empty());
}
