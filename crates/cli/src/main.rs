//! Black Royalty CLI - cart, checkout and content tools.
//!
//! Works against the same cart file and content source as the storefront
//! server, configured through the same `STOREFRONT_*` environment variables.
//!
//! # Usage
//!
//! ```bash
//! # Show the persisted cart
//! br-cli cart show
//!
//! # Add two of a product
//! br-cli cart add royal-oud -q 2
//!
//! # Print the WhatsApp order message and link
//! br-cli checkout
//!
//! # Verify settings.json and products.json load
//! br-cli content check
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use black_royalty_core::{ProductId, Quantity};
use black_royalty_storefront::config::StorefrontConfig;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "br-cli")]
#[command(author, version, about = "Black Royalty storefront tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or change the persisted cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Print the order message and WhatsApp link for the current cart
    Checkout,
    /// Check the content documents
    Content {
        #[command(subcommand)]
        action: ContentAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// List cart lines and the total
    Show,
    /// Add a product from the catalog
    Add {
        /// Product id
        id: String,

        /// Number of units
        #[arg(short, long, default_value = "1", value_parser = Quantity::parse)]
        quantity: Quantity,
    },
    /// Increase a line by one
    Increase {
        /// Product id
        id: String,
    },
    /// Decrease a line by one, removing it at zero
    Decrease {
        /// Product id
        id: String,
    },
    /// Remove a line
    Remove {
        /// Product id
        id: String,
    },
}

#[derive(Subcommand)]
enum ContentAction {
    /// Load settings.json and products.json and report what was found
    Check,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;

    match cli.command {
        Commands::Cart { action } => {
            let mut store = commands::cart::open_store(&config)?;
            match action {
                CartAction::Show => {}
                CartAction::Add { id, quantity } => {
                    let loader = commands::content::loader(&config);
                    commands::cart::add(&mut store, &loader, &ProductId::from(id), quantity)
                        .await?;
                }
                CartAction::Increase { id } => {
                    commands::cart::adjust(&mut store, &ProductId::from(id), 1)?;
                }
                CartAction::Decrease { id } => {
                    commands::cart::adjust(&mut store, &ProductId::from(id), -1)?;
                }
                CartAction::Remove { id } => {
                    commands::cart::remove(&mut store, &ProductId::from(id))?;
                }
            }
            commands::cart::show(&store);
        }
        Commands::Checkout => {
            let store = commands::cart::open_store(&config)?;
            let loader = commands::content::loader(&config);
            commands::checkout::run(&config, &loader, &store).await?;
        }
        Commands::Content { action } => match action {
            ContentAction::Check => {
                let loader = commands::content::loader(&config);
                commands::content::check(&loader).await?;
            }
        },
    }
    Ok(())
}
