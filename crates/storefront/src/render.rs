//! View models for the storefront's templates.
//!
//! Every function here is a pure projection of current state: the same input
//! always yields the same view, and each render replaces the whole region it
//! describes. Templates consume these structs without doing any formatting of
//! their own.

use black_royalty_core::{Cart, CartLineItem, Catalog, Product, SiteSettings};
use url::Url;

use crate::cart::DrawerState;

/// Title shown when a product id does not resolve.
pub const NOT_FOUND_TITLE: &str = "Product Not Found";

/// Per-card stagger for the scroll-in animation.
const CARD_ANIMATION_STEP_MS: u32 = 100;

// =============================================================================
// Cart drawer
// =============================================================================

/// One line in the cart drawer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub price: String,
    pub quantity: u32,
    pub line_total: String,
}

/// The cart drawer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    /// Badge count (sum of quantities).
    pub count: u64,
    pub is_empty: bool,
    pub open: bool,
    pub checkout_enabled: bool,
}

impl From<&CartLineItem> for CartItemView {
    fn from(item: &CartLineItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            image: item.image.clone(),
            price: item.price.display(),
            quantity: item.quantity.get(),
            line_total: item.line_total().display_fixed(),
        }
    }
}

/// Project the cart into the drawer view.
#[must_use]
pub fn cart_view(cart: &Cart, drawer: DrawerState) -> CartView {
    CartView {
        items: cart.items().iter().map(CartItemView::from).collect(),
        total: cart.total().display_fixed(),
        count: cart.count(),
        is_empty: cart.is_empty(),
        open: drawer.is_open(),
        checkout_enabled: !cart.is_empty(),
    }
}

// =============================================================================
// Hero
// =============================================================================

/// Hero section overrides; `None` keeps the template's default copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeroView {
    pub headline: Option<String>,
    pub subtext: Option<String>,
    pub background_image: Option<String>,
}

/// Apply recognized settings to the hero. Missing settings leave defaults.
#[must_use]
pub fn hero_view(settings: Option<&SiteSettings>) -> HeroView {
    settings.map_or_else(HeroView::default, |s| HeroView {
        headline: s.hero_headline().map(String::from),
        subtext: s.hero_subtext().map(String::from),
        background_image: s.hero_bg_image().and_then(css_image_url),
    })
}

/// The background image as a value safe inside `url('...')`.
///
/// Only http(s) URLs and relative paths made of URL-safe characters are
/// kept; anything that could close the quoted string or the `url()` call is
/// dropped.
fn css_image_url(value: &str) -> Option<String> {
    let safe_chars = value.chars().all(|c| {
        c.is_ascii_alphanumeric()
            || matches!(
                c,
                '/' | '.' | '-' | '_' | '~' | ':' | '?' | '=' | '&' | '%' | '+' | '#' | ','
            )
    });
    let safe_scheme = match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => !value.contains(':'),
    };

    if safe_chars && safe_scheme {
        Some(value.to_string())
    } else {
        tracing::warn!(hero_bg_image = %value, "Ignoring unsafe hero background image");
        None
    }
}

// =============================================================================
// Product grid
// =============================================================================

/// A product card in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: String,
    pub in_stock: bool,
    pub detail_url: String,
    pub animation_delay_ms: u32,
}

/// Project the catalog into grid cards, in catalog order.
#[must_use]
pub fn product_grid(catalog: &Catalog) -> Vec<ProductCardView> {
    catalog
        .products
        .iter()
        .enumerate()
        .map(|(index, product)| {
            let position = u32::try_from(index + 1).unwrap_or(u32::MAX);
            ProductCardView {
                id: product.id.to_string(),
                name: product.name.clone(),
                description: product.description.clone(),
                image: product.image.clone(),
                price: product.price.display(),
                in_stock: product.in_stock,
                detail_url: detail_url(product),
                animation_delay_ms: position.saturating_mul(CARD_ANIMATION_STEP_MS),
            }
        })
        .collect()
}

/// Link to a product's detail page.
#[must_use]
pub fn detail_url(product: &Product) -> String {
    format!(
        "/product-details?id={}",
        urlencoding::encode(product.id.as_str())
    )
}

// =============================================================================
// Product detail
// =============================================================================

/// A thumbnail in the detail gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailView {
    pub url: String,
    pub index: usize,
    pub active: bool,
    /// Detail page link selecting this image.
    pub href: String,
}

/// Detail fields for a found product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetail {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub in_stock: bool,
    pub main_image: String,
    pub thumbnails: Vec<ThumbnailView>,
}

/// The detail page: either the product or the not-found placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetailView {
    pub title: String,
    pub product: Option<ProductDetail>,
}

impl ProductDetailView {
    /// The not-found placeholder.
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            title: NOT_FOUND_TITLE.to_string(),
            product: None,
        }
    }
}

/// Project a looked-up product into the detail view.
///
/// `selected_image` picks the gallery entry shown as the main image; an
/// out-of-range index falls back to the first image.
#[must_use]
pub fn product_detail(product: Option<&Product>, selected_image: usize) -> ProductDetailView {
    let Some(product) = product else {
        return ProductDetailView::not_found();
    };

    let gallery: Vec<&str> = product.gallery().collect();
    let selected = if selected_image < gallery.len() {
        selected_image
    } else {
        0
    };
    let main_image = gallery
        .get(selected)
        .map_or_else(|| product.image.clone(), |url| (*url).to_string());

    let base_url = detail_url(product);
    let thumbnails = gallery
        .iter()
        .enumerate()
        .map(|(index, url)| ThumbnailView {
            url: (*url).to_string(),
            index,
            active: index == selected,
            href: format!("{base_url}&image={index}"),
        })
        .collect();

    ProductDetailView {
        title: product.name.clone(),
        product: Some(ProductDetail {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            in_stock: product.in_stock,
            main_image,
            thumbnails,
        }),
    }
}
