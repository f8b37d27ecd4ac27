//! Black Royalty Core - Shared types library.
//!
//! This crate provides the domain types used across the Black Royalty components:
//! - `storefront` - The public storefront (HTTP server and library)
//! - `cli` - Command-line tools for inspecting the cart and content
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no persistence. The cart model lives here so that every
//! invariant (unique line ids, quantities of at least one) is enforced in a
//! single place, whichever front end drives it.
//!
//! # Modules
//!
//! - [`types`] - Product ids, prices, quantities, the cart and content documents

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
