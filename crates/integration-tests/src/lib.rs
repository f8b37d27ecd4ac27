//! Integration test harness for the Black Royalty storefront.
//!
//! Builds the real router over temporary content and data directories and
//! drives it in-process with `tower::ServiceExt::oneshot`; no server or
//! network is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p black-royalty-integration-tests
//! ```

use std::path::Path;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use black_royalty_core::Cart;
use black_royalty_storefront::{
    cart::CartStore,
    config::StorefrontConfig,
    content::{ContentLoader, ContentSource},
    state::AppState,
    storage::{CART_STORAGE_KEY, CartPersistence, FileStore, KeyValueStore},
};
use tempfile::TempDir;
use tower::ServiceExt;

/// Default `settings.json` fixture.
pub const SETTINGS_JSON: &str = r#"{
    "hero_headline": "Wear the Crown",
    "hero_subtext": "",
    "whatsapp_number": "+2348012345678"
}"#;

/// Default `products.json` fixture.
pub const PRODUCTS_JSON: &str = r#"{
    "products": [
        {"id": "p1", "name": "Royal Oud", "description": "Agarwood and amber", "price": 1000, "image": "img/p1.jpg", "in_stock": true, "images": ["img/p1-box.jpg"]},
        {"id": "p2", "name": "Gold Musk", "description": "White musk", "price": 250050, "image": "img/p2.jpg", "in_stock": true},
        {"id": "p3", "name": "Midnight Amber", "description": "Sold out", "price": 500000, "image": "img/p3.jpg", "in_stock": false}
    ]
}"#;

/// A response with its body collected.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Value of a response header, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A storefront wired to temporary directories.
pub struct TestContext {
    pub content_dir: TempDir,
    pub data_dir: TempDir,
    pub state: AppState,
}

impl TestContext {
    /// Storefront with the default fixtures.
    #[must_use]
    pub fn new() -> Self {
        Self::with_content(Some(SETTINGS_JSON), Some(PRODUCTS_JSON))
    }

    /// Storefront with the given documents; `None` leaves a document absent.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directories cannot be created.
    #[must_use]
    pub fn with_content(settings: Option<&str>, products: Option<&str>) -> Self {
        let content_dir = TempDir::new().expect("Failed to create content dir");
        let data_dir = TempDir::new().expect("Failed to create data dir");
        if let Some(settings) = settings {
            write(&content_dir.path().join("settings.json"), settings);
        }
        if let Some(products) = products {
            write(&content_dir.path().join("products.json"), products);
        }

        let state = build_state(content_dir.path(), data_dir.path());
        Self {
            content_dir,
            data_dir,
            state,
        }
    }

    /// Router over the shared state.
    #[must_use]
    pub fn app(&self) -> Router {
        black_royalty_storefront::app(self.state.clone())
    }

    /// A fresh state over the same directories, as after a restart.
    #[must_use]
    pub fn restart(&self) -> AppState {
        build_state(self.content_dir.path(), self.data_dir.path())
    }

    /// Replace `products.json`.
    pub fn write_products(&self, contents: &str) {
        write(&self.content_dir.path().join("products.json"), contents);
    }

    /// Replace the raw persisted cart value.
    ///
    /// # Panics
    ///
    /// Panics if the store cannot be written.
    pub fn write_raw_cart(&self, raw: &str) {
        FileStore::open(self.data_dir.path())
            .and_then(|store| store.set(CART_STORAGE_KEY, raw))
            .expect("Failed to write cart");
    }

    /// Snapshot of the in-memory cart.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.state.with_cart(|store| store.cart().clone())
    }

    /// Send a GET request.
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    /// Send an HTMX form POST.
    pub async fn post_form(&self, uri: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header("HX-Request", "true")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");
        self.send(request).await
    }

    /// Send any request through the router.
    ///
    /// # Panics
    ///
    /// Panics if the router fails or the body is not UTF-8.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app()
            .oneshot(request)
            .await
            .expect("Router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8"),
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

fn write(path: &Path, contents: &str) {
    std::fs::write(path, contents).expect("Failed to write fixture");
}

fn build_state(content_dir: &Path, data_dir: &Path) -> AppState {
    let mut config =
        StorefrontConfig::from_lookup(|_| None).expect("Default configuration is valid");
    config.content_source = ContentSource::Directory(content_dir.to_path_buf());
    config.content_ttl = std::time::Duration::ZERO;
    config.data_dir = data_dir.to_path_buf();

    let store = FileStore::open(data_dir).expect("Failed to open data dir");
    let cart = CartStore::restore(CartPersistence::new(std::sync::Arc::new(store)));
    let content = ContentLoader::new(config.content_source.clone(), config.content_ttl);

    AppState::new(config, content, cart)
}
