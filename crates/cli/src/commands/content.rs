//! Content commands.
//!
//! # Usage
//!
//! ```bash
//! br-cli content check
//! ```

use black_royalty_storefront::{config::StorefrontConfig, content::ContentLoader};

use super::CommandError;

/// Content loader for the configured source. CLI runs are short, so nothing
/// is cached.
#[must_use]
pub fn loader(config: &StorefrontConfig) -> ContentLoader {
    ContentLoader::new(config.content_source.clone(), std::time::Duration::ZERO)
}

/// Load both documents and print a summary.
///
/// # Errors
///
/// Returns the first failure after reporting both documents.
#[allow(clippy::print_stdout)]
pub async fn check(loader: &ContentLoader) -> Result<(), CommandError> {
    let (settings, products) = tokio::join!(loader.fetch_settings(), loader.fetch_products());

    match &settings {
        Ok(settings) => println!(
            "settings.json: ok (hero headline: {}, whatsapp: {})",
            settings.hero_headline().unwrap_or("default"),
            settings.whatsapp_number().unwrap_or("default")
        ),
        Err(e) => println!("settings.json: FAILED ({e})"),
    }

    match &products {
        Ok(catalog) => {
            let out_of_stock = catalog.products.iter().filter(|p| !p.in_stock).count();
            println!(
                "products.json: ok ({} products, {out_of_stock} out of stock)",
                catalog.len()
            );
        }
        Err(e) => println!("products.json: FAILED ({e})"),
    }

    settings?;
    products?;
    Ok(())
}
