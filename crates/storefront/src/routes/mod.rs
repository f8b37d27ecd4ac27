//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (hero, product grid, cart drawer)
//! GET  /product-details        - Product detail (?id=<product id>&image=<gallery index>)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart drawer fragment
//! GET  /cart/count             - Cart count badge fragment
//! POST /cart/add               - Add to cart, opens the drawer
//! POST /cart/update            - Increase or decrease a line
//! POST /cart/remove            - Remove a line
//! POST /cart/open              - Open the drawer
//! POST /cart/close             - Close the drawer
//!
//! # Checkout
//! GET  /checkout               - Redirect to the WhatsApp deep link
//! ```

pub mod cart;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/open", post(cart::open))
        .route("/close", post(cart::close))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/product-details", get(products::show))
        .nest("/cart", cart_routes())
        .route("/checkout", get(cart::checkout))
}
