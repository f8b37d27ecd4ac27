//! Application state shared across handlers.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use black_royalty_core::{Catalog, Product, ProductId, SiteSettings};

use crate::cart::CartStore;
use crate::config::StorefrontConfig;
use crate::content::ContentLoader;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the content loader, the last applied content and the cart.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    content: ContentLoader,
    settings: RwLock<Option<Arc<SiteSettings>>>,
    catalog: RwLock<Option<Arc<Catalog>>>,
    cart: Mutex<CartStore>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `content` - Loader for the settings and products documents
    /// * `cart` - The restored cart store
    #[must_use]
    pub fn new(config: StorefrontConfig, content: ContentLoader, cart: CartStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                content,
                settings: RwLock::new(None),
                catalog: RwLock::new(None),
                cart: Mutex::new(cart),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the content loader.
    #[must_use]
    pub fn content(&self) -> &ContentLoader {
        &self.inner.content
    }

    /// Last successfully applied settings, if any.
    #[must_use]
    pub fn settings(&self) -> Option<Arc<SiteSettings>> {
        self.inner
            .settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Last successfully applied catalog, if any.
    #[must_use]
    pub fn catalog(&self) -> Option<Arc<Catalog>> {
        self.inner
            .catalog
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Load settings and apply them. On failure the error is logged and the
    /// previously applied settings are returned unchanged.
    pub async fn refresh_settings(&self) -> Option<Arc<SiteSettings>> {
        match self.inner.content.fetch_settings().await {
            Ok(settings) => {
                *self
                    .inner
                    .settings
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = Some(settings.clone());
                Some(settings)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load site settings");
                self.settings()
            }
        }
    }

    /// Load the catalog and apply it. On failure the error is logged and the
    /// previously applied catalog is returned unchanged.
    pub async fn refresh_catalog(&self) -> Option<Arc<Catalog>> {
        match self.inner.content.fetch_products().await {
            Ok(catalog) => {
                tracing::debug!(products = catalog.len(), "Catalog loaded");
                *self
                    .inner
                    .catalog
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = Some(catalog.clone());
                Some(catalog)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load products");
                self.catalog()
            }
        }
    }

    /// Run both content loads concurrently.
    pub async fn refresh_content(&self) -> (Option<Arc<SiteSettings>>, Option<Arc<Catalog>>) {
        tokio::join!(self.refresh_settings(), self.refresh_catalog())
    }

    /// Look up a product by id in the current catalog.
    pub async fn find_product(&self, id: &ProductId) -> Option<Product> {
        self.refresh_catalog()
            .await
            .and_then(|catalog| catalog.find(id).cloned())
    }

    /// Run `f` with exclusive access to the cart store.
    ///
    /// The lock is released before this returns, so `f` must not await.
    pub fn with_cart<R>(&self, f: impl FnOnce(&mut CartStore) -> R) -> R {
        let mut cart = self
            .inner
            .cart
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }
}
