//! Product detail route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use black_royalty_core::ProductId;
use serde::Deserialize;
use tracing::instrument;

use crate::render::{self, CartView, ProductDetailView};
use crate::state::AppState;

/// Detail page query parameters.
#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    pub id: Option<String>,
    /// Gallery index of the main image. Unparseable values select the first.
    pub image: Option<String>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub store_name: String,
    pub view: ProductDetailView,
    pub cart: CartView,
}

/// Display the product detail page.
///
/// A missing or unknown `id` renders the not-found view with a 404 status.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Query(query): Query<DetailQuery>,
) -> impl IntoResponse {
    let product = match query.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => state.find_product(&ProductId::from(id)).await,
        None => None,
    };
    let selected = query
        .image
        .as_deref()
        .and_then(|i| i.parse::<usize>().ok())
        .unwrap_or(0);

    let view = render::product_detail(product.as_ref(), selected);
    let status = if view.product.is_some() {
        StatusCode::OK
    } else {
        tracing::info!(id = ?query.id, "Product not found");
        StatusCode::NOT_FOUND
    };

    (
        status,
        ProductShowTemplate {
            store_name: state.config().store_name.clone(),
            view,
            cart: state.with_cart(|store| render::cart_view(store.cart(), store.drawer())),
        },
    )
}
