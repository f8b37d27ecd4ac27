//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads:
//! every mutation answers with the re-rendered drawer and an `HX-Trigger`
//! so the badge refreshes. Plain form posts (no JavaScript) are redirected
//! back to the page they came from.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, header::REFERER},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use black_royalty_core::{ProductId, Quantity, SiteSettings};
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use crate::checkout::resolve_contact;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::render::{self, CartView};
use crate::state::AppState;
use crate::storage::StorageError;

/// Add to cart form data.
///
/// Only the product id and quantity come from the client; name, price and
/// image are taken from the catalog.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: String,
    pub quantity: Option<String>,
}

/// Quantity adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartAction {
    Increase,
    Decrease,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: String,
    pub action: CartAction,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: String,
}

/// Cart drawer fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_drawer.html")]
pub struct CartDrawerTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

// =============================================================================
// Response Helpers
// =============================================================================

fn current_cart(state: &AppState) -> CartView {
    state.with_cart(|store| render::cart_view(store.cart(), store.drawer()))
}

/// A cart write that failed is logged; the shopper keeps the in-memory cart.
fn log_write_failure<T>(result: std::result::Result<T, StorageError>) {
    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to persist cart");
    }
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers.contains_key("hx-request")
}

/// Path (and query) of the referring page, or `/`.
///
/// Only the path is kept, and a path that a browser would read as
/// scheme-relative (`//host` or `/\host`) falls back to `/`.
fn return_path(headers: &HeaderMap) -> String {
    headers
        .get(REFERER)
        .and_then(|h| h.to_str().ok())
        .and_then(|referer| Url::parse(referer).ok())
        .map(|url| match url.query() {
            Some(query) => format!("{}?{query}", url.path()),
            None => url.path().to_string(),
        })
        .filter(|path| is_local_path(path))
        .unwrap_or_else(|| "/".to_string())
}

fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.starts_with("/\\")
}

/// Drawer fragment for HTMX, redirect back otherwise.
fn drawer_response(headers: &HeaderMap, cart: CartView) -> Response {
    if is_htmx(headers) {
        (
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartDrawerTemplate { cart },
        )
            .into_response()
    } else {
        Redirect::to(&return_path(headers)).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Cart drawer fragment.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    CartDrawerTemplate {
        cart: current_cart(&state),
    }
}

/// Cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    CartCountTemplate {
        count: state.with_cart(|store| store.count()),
    }
}

/// Add a product to the cart and open the drawer.
///
/// # Errors
///
/// - 400 for a quantity below one or an out-of-stock product
/// - 404 for an id not in the catalog
#[instrument(skip(state, headers))]
pub async fn add(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let quantity = match form.quantity.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => Quantity::parse(q)?,
        _ => Quantity::ONE,
    };
    let id = ProductId::from(form.id.trim());

    let Some(product) = state.find_product(&id).await else {
        return Err(AppError::NotFound(format!("product {id}")));
    };
    if !product.in_stock {
        return Err(AppError::BadRequest(format!("{} is out of stock", product.name)));
    }

    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", id.as_str())]));
    let cart = state.with_cart(|store| {
        log_write_failure(store.add_product(&product, quantity));
        render::cart_view(store.cart(), store.drawer())
    });

    Ok(drawer_response(&headers, cart))
}

/// Increase or decrease a line by one. Missing ids are ignored.
#[instrument(skip(state, headers))]
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<UpdateCartForm>,
) -> Response {
    let id = ProductId::from(form.id.trim());
    let cart = state.with_cart(|store| {
        log_write_failure(match form.action {
            CartAction::Increase => store.increase(&id),
            CartAction::Decrease => store.decrease(&id),
        });
        render::cart_view(store.cart(), store.drawer())
    });

    drawer_response(&headers, cart)
}

/// Remove a line. Missing ids are ignored.
#[instrument(skip(state, headers))]
pub async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    let id = ProductId::from(form.id.trim());
    let cart = state.with_cart(|store| {
        log_write_failure(store.remove(&id));
        render::cart_view(store.cart(), store.drawer())
    });

    drawer_response(&headers, cart)
}

/// Open the drawer.
#[instrument(skip(state, headers))]
pub async fn open(State(state): State<AppState>, headers: HeaderMap) -> Response {
    state.with_cart(crate::cart::CartStore::open);
    drawer_response(&headers, current_cart(&state))
}

/// Close the drawer.
#[instrument(skip(state, headers))]
pub async fn close(State(state): State<AppState>, headers: HeaderMap) -> Response {
    state.with_cart(crate::cart::CartStore::close);
    drawer_response(&headers, current_cart(&state))
}

/// Redirect to the WhatsApp deep link carrying the order message.
///
/// # Errors
///
/// Returns 400 with the empty-cart notice when there is nothing to order.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> Result<Redirect> {
    let cart = state.with_cart(|store| store.cart().clone());
    let settings = state.refresh_settings().await;
    let contact = resolve_contact(
        settings.as_deref().and_then(SiteSettings::whatsapp_number),
        state.config().whatsapp_number.as_deref(),
    );

    let link = crate::checkout::checkout(&cart, &state.config().store_name, contact)?;
    add_breadcrumb("checkout", "WhatsApp checkout started", None);

    Ok(Redirect::to(link.url.as_str()))
}
