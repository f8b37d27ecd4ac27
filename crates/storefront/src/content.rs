//! Content loading for the editor-managed JSON documents.
//!
//! Two documents drive the storefront:
//!
//! - `settings.json` - hero copy and the checkout contact ([`SiteSettings`])
//! - `products.json` - the catalog ([`Catalog`])
//!
//! Both are read either over HTTP from a base URL or from a local directory.
//! Each read is independent and returns an explicit [`Result`]; the caller
//! decides what to show on failure. Nothing is retried.
//!
//! Successful reads are cached with `moka` for a configurable TTL so product
//! detail lookups reuse the product-list read. Failures are never cached.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use black_royalty_core::{Catalog, Product, ProductId, SiteSettings};
use moka::future::Cache;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

/// Settings document name.
pub const SETTINGS_RESOURCE: &str = "settings.json";

/// Products document name.
pub const PRODUCTS_RESOURCE: &str = "products.json";

/// Where the content documents live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// Base URL; documents are fetched from `<base>/settings.json` etc.
    Remote(Url),
    /// Local directory containing the documents.
    Directory(PathBuf),
}

impl ContentSource {
    /// Remote source from a base URL string. A trailing `/` is added when
    /// missing so that document names resolve beneath the base path.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is not a valid absolute URL.
    pub fn remote(base: &str) -> Result<Self, ContentError> {
        let mut url = Url::parse(base)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self::Remote(url))
    }

    /// Human-readable location of a document, for logs.
    fn describe(&self, resource: &str) -> String {
        match self {
            Self::Remote(base) => base
                .join(resource)
                .map_or_else(|_| format!("{base}{resource}"), |u| u.to_string()),
            Self::Directory(dir) => dir.join(resource).display().to_string(),
        }
    }
}

/// Content loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{resource} returned HTTP {status}")]
    Status { resource: String, status: u16 },

    /// Reading a local document failed.
    #[error("IO error: {0}")]
    Io(String),

    /// The document is not valid JSON of the expected shape.
    #[error("Parse error in {resource}: {source}")]
    Parse {
        resource: String,
        #[source]
        source: serde_json::Error,
    },

    /// The content base URL is invalid.
    #[error("Invalid content URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Cache key for content documents.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
enum CacheKey {
    Settings,
    Products,
}

/// Cached document values.
#[derive(Debug, Clone)]
enum CacheValue {
    Settings(Arc<SiteSettings>),
    Products(Arc<Catalog>),
}

/// Loader for the content documents.
///
/// Cheap to clone; clones share the HTTP client and cache.
#[derive(Clone)]
pub struct ContentLoader {
    inner: Arc<ContentLoaderInner>,
}

struct ContentLoaderInner {
    client: reqwest::Client,
    source: ContentSource,
    cache: Option<Cache<CacheKey, CacheValue>>,
}

impl std::fmt::Debug for ContentLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentLoader")
            .field("source", &self.inner.source)
            .field("cached", &self.inner.cache.is_some())
            .finish_non_exhaustive()
    }
}

impl ContentLoader {
    /// Create a loader. A zero `ttl` disables caching.
    #[must_use]
    pub fn new(source: ContentSource, ttl: Duration) -> Self {
        let cache = (!ttl.is_zero()).then(|| Cache::builder().max_capacity(2).time_to_live(ttl).build());

        Self {
            inner: Arc::new(ContentLoaderInner {
                client: reqwest::Client::new(),
                source,
                cache,
            }),
        }
    }

    /// Read `settings.json`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or a
    /// malformed document.
    #[instrument(skip(self))]
    pub async fn fetch_settings(&self) -> Result<Arc<SiteSettings>, ContentError> {
        if let Some(CacheValue::Settings(settings)) = self.cached(CacheKey::Settings).await {
            return Ok(settings);
        }

        let settings: Arc<SiteSettings> = Arc::new(self.read_json(SETTINGS_RESOURCE).await?);
        self.store(CacheKey::Settings, CacheValue::Settings(Arc::clone(&settings)))
            .await;
        Ok(settings)
    }

    /// Read `products.json`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or a
    /// malformed document.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self) -> Result<Arc<Catalog>, ContentError> {
        if let Some(CacheValue::Products(catalog)) = self.cached(CacheKey::Products).await {
            return Ok(catalog);
        }

        let catalog: Arc<Catalog> = Arc::new(self.read_json(PRODUCTS_RESOURCE).await?);
        tracing::debug!(products = catalog.len(), "Loaded catalog");
        self.store(CacheKey::Products, CacheValue::Products(Arc::clone(&catalog)))
            .await;
        Ok(catalog)
    }

    /// Look up one product via the product-list read.
    ///
    /// `Ok(None)` means the list loaded but has no product with `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the product list cannot be read.
    pub async fn find_product(&self, id: &ProductId) -> Result<Option<Product>, ContentError> {
        let catalog = self.fetch_products().await?;
        Ok(catalog.find(id).cloned())
    }

    /// Drop cached documents so the next read goes to the source.
    pub fn invalidate(&self) {
        if let Some(cache) = &self.inner.cache {
            cache.invalidate_all();
        }
    }

    async fn cached(&self, key: CacheKey) -> Option<CacheValue> {
        match &self.inner.cache {
            Some(cache) => cache.get(&key).await,
            None => None,
        }
    }

    async fn store(&self, key: CacheKey, value: CacheValue) {
        if let Some(cache) = &self.inner.cache {
            cache.insert(key, value).await;
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, resource: &str) -> Result<T, ContentError> {
        let body = self.read(resource).await?;
        serde_json::from_str(&body).map_err(|source| ContentError::Parse {
            resource: resource.to_string(),
            source,
        })
    }

    async fn read(&self, resource: &str) -> Result<String, ContentError> {
        tracing::debug!(location = %self.inner.source.describe(resource), "Reading content");

        match &self.inner.source {
            ContentSource::Remote(base) => {
                let url = base.join(resource)?;
                let response = self.inner.client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(ContentError::Status {
                        resource: resource.to_string(),
                        status: status.as_u16(),
                    });
                }
                Ok(response.text().await?)
            }
            ContentSource::Directory(dir) => tokio::fs::read_to_string(dir.join(resource))
                .await
                .map_err(|e| ContentError::Io(format!("{resource}: {e}"))),
        }
    }
}
