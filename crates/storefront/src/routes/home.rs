//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::render::{self, CartView, HeroView, ProductCardView};
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub store_name: String,
    pub hero: HeroView,
    /// `None` when no catalog has loaded yet.
    pub products: Option<Vec<ProductCardView>>,
    pub cart: CartView,
}

/// Display the home page.
///
/// Settings and products load concurrently. Either may fail independently;
/// the page then shows whatever was last loaded successfully.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let (settings, catalog) = state.refresh_content().await;

    HomeTemplate {
        store_name: state.config().store_name.clone(),
        hero: render::hero_view(settings.as_deref()),
        products: catalog.as_deref().map(render::product_grid),
        cart: state.with_cart(|store| render::cart_view(store.cart(), store.drawer())),
    }
}
