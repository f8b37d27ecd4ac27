//! Checkout command.
//!
//! Prints the order message and the WhatsApp link. Nothing is opened or sent.

use black_royalty_storefront::{
    cart::CartStore,
    checkout::{checkout, resolve_contact},
    config::StorefrontConfig,
    content::ContentLoader,
};

use super::CommandError;

/// Print the checkout hand-off for the current cart.
///
/// Settings supply the contact when they load; otherwise the configured
/// fallback is used.
///
/// # Errors
///
/// Returns an error if the cart is empty or the contact is invalid.
#[allow(clippy::print_stdout)]
pub async fn run(
    config: &StorefrontConfig,
    loader: &ContentLoader,
    store: &CartStore,
) -> Result<(), CommandError> {
    let settings = match loader.fetch_settings().await {
        Ok(settings) => Some(settings),
        Err(e) => {
            tracing::warn!(error = %e, "Settings unavailable, using configured contact");
            None
        }
    };
    let contact = resolve_contact(
        settings.as_deref().and_then(|s| s.whatsapp_number()),
        config.whatsapp_number.as_deref(),
    );

    let link = checkout(store.cart(), &config.store_name, contact)?;
    println!("{}\n\n{}", link.message, link.url);
    Ok(())
}
