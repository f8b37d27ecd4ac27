//! WhatsApp checkout.
//!
//! Checkout does not take payment. It turns the cart into a readable order
//! message and builds a `wa.me` deep link that opens a chat with the store,
//! pre-filled with that message. The store then follows up with payment
//! details.

use black_royalty_core::Cart;
use thiserror::Error;
use url::Url;

/// Contact used when neither settings nor configuration provide one.
pub const DEFAULT_WHATSAPP_NUMBER: &str = "+2347040964171";

/// Deep link host.
const WHATSAPP_BASE: &str = "https://wa.me/";

/// Closing line of every order message.
const CLOSING_REQUEST: &str = "Please confirm my order and provide payment details.";

/// Checkout errors.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout needs at least one item.
    #[error("Your cart is empty. Please add items before proceeding to WhatsApp checkout.")]
    EmptyCart,

    /// The contact identifier does not form a valid URL.
    #[error("Invalid WhatsApp contact: {0}")]
    InvalidContact(String),
}

/// A ready-to-open checkout hand-off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLink {
    /// The order text.
    pub message: String,
    /// Deep link carrying the order text.
    pub url: Url,
}

/// Format the order message for a non-empty cart.
///
/// ```text
/// Hello Black Royalty Stores! I'd like to order the following items:
///
/// 1. Royal Oud (x2) - ₦50,000.00
///
/// Total: ₦50,000.00
///
/// Please confirm my order and provide payment details.
/// ```
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] if the cart has no items.
pub fn build_order_message(cart: &Cart, store_name: &str) -> Result<String, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let mut message = format!("Hello {store_name}! I'd like to order the following items:\n\n");
    for (index, item) in cart.items().iter().enumerate() {
        message.push_str(&format!(
            "{}. {} (x{}) - {}\n",
            index + 1,
            item.name,
            item.quantity,
            item.line_total().display_fixed()
        ));
    }
    message.push_str(&format!("\nTotal: {}\n\n", cart.total().display_fixed()));
    message.push_str(CLOSING_REQUEST);

    Ok(message)
}

/// Digits of a phone number with an optional leading `+`, or `None` if
/// `contact` holds anything but digits and the usual separators.
fn phone_number(contact: &str) -> Option<String> {
    let contact = contact.trim();
    let number: String = contact
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
        .collect();
    let digits = number.strip_prefix('+').unwrap_or(&number);
    (!digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())).then_some(number)
}

/// Build the `wa.me` deep link for `contact` carrying `message`.
///
/// # Errors
///
/// Returns [`CheckoutError::InvalidContact`] unless the contact is a phone
/// number: digits with an optional leading `+`, separated by spaces,
/// dashes, dots or parentheses.
pub fn whatsapp_link(contact: &str, message: &str) -> Result<Url, CheckoutError> {
    let number =
        phone_number(contact).ok_or_else(|| CheckoutError::InvalidContact(contact.to_string()))?;

    let mut url = Url::parse(&format!("{WHATSAPP_BASE}{number}"))
        .map_err(|_| CheckoutError::InvalidContact(contact.to_string()))?;
    url.set_query(Some(&format!("text={}", urlencoding::encode(message))));
    Ok(url)
}

/// Pick the contact: settings first, then the configured fallback, then
/// [`DEFAULT_WHATSAPP_NUMBER`]. Blank or unusable values are skipped.
#[must_use]
pub fn resolve_contact<'a>(from_settings: Option<&'a str>, configured: Option<&'a str>) -> &'a str {
    [from_settings, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|c| {
            let usable = phone_number(c).is_some();
            if !usable && !c.is_empty() {
                tracing::warn!(contact = %c, "Ignoring unusable WhatsApp contact");
            }
            usable
        })
        .unwrap_or(DEFAULT_WHATSAPP_NUMBER)
}

/// Build the full checkout hand-off.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] for an empty cart, or
/// [`CheckoutError::InvalidContact`] for an unusable contact.
pub fn checkout(cart: &Cart, store_name: &str, contact: &str) -> Result<CheckoutLink, CheckoutError> {
    let message = build_order_message(cart, store_name)?;
    let url = whatsapp_link(contact, &message)?;
    tracing::info!(lines = cart.len(), total = %cart.total().display_fixed(), "Checkout link built");
    Ok(CheckoutLink { message, url })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use black_royalty_core::{CartLineItem, Price, ProductId, Quantity};

    use super::*;

    fn cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(CartLineItem {
            id: ProductId::from("oud"),
            name: "Royal Oud".to_string(),
            price: Price::from_minor(2_500_000),
            image: "img/oud.jpg".to_string(),
            quantity: Quantity::new(2).unwrap(),
        });
        cart.add(CartLineItem {
            id: ProductId::from("musk"),
            name: "Gold Musk".to_string(),
            price: Price::from_minor(1_800_050),
            image: "img/musk.jpg".to_string(),
            quantity: Quantity::ONE,
        });
        cart
    }

    #[test]
    fn test_order_message_format() {
        let message = build_order_message(&cart(), "Black Royalty Stores").unwrap();
        assert_eq!(
            message,
            "Hello Black Royalty Stores! I'd like to order the following items:\n\n\
             1. Royal Oud (x2) - ₦50,000.00\n\
             2. Gold Musk (x1) - ₦18,000.50\n\
             \nTotal: ₦68,000.50\n\n\
             Please confirm my order and provide payment details."
        );
    }

    #[test]
    fn test_empty_cart_refused() {
        assert!(matches!(
            build_order_message(&Cart::new(), "Store"),
            Err(CheckoutError::EmptyCart)
        ));
        assert!(matches!(
            checkout(&Cart::new(), "Store", DEFAULT_WHATSAPP_NUMBER),
            Err(CheckoutError::EmptyCart)
        ));
    }

    #[test]
    fn test_whatsapp_link_encodes_message() {
        let url = whatsapp_link("+2347040964171", "Hello there!\nTotal: ₦10.00").unwrap();
        assert_eq!(url.host_str(), Some("wa.me"));
        assert_eq!(url.path(), "/+2347040964171");
        assert_eq!(
            url.query(),
            Some("text=Hello%20there%21%0ATotal%3A%20%E2%82%A610.00")
        );

        let text: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(text, vec![("text".to_string(), "Hello there!\nTotal: ₦10.00".to_string())]);
    }

    #[test]
    fn test_whatsapp_link_rejects_bad_contact() {
        assert!(matches!(
            whatsapp_link("", "hi"),
            Err(CheckoutError::InvalidContact(_))
        ));
        assert!(matches!(
            whatsapp_link("123/evil", "hi"),
            Err(CheckoutError::InvalidContact(_))
        ));
        assert!(matches!(
            whatsapp_link("tel:+1", "hi"),
            Err(CheckoutError::InvalidContact(_))
        ));
    }

    #[test]
    fn test_whatsapp_link_strips_separators() {
        let url = whatsapp_link("+234 704-096-4171", "hi").unwrap();
        assert_eq!(url.path(), "/+2347040964171");

        let url = whatsapp_link("+234 (704) 096.4171", "hi").unwrap();
        assert_eq!(url.path(), "/+2347040964171");

        assert!(whatsapp_link("23+4", "hi").is_err());
        assert!(whatsapp_link("+", "hi").is_err());
    }

    #[test]
    fn test_resolve_contact_precedence() {
        assert_eq!(resolve_contact(Some("+1"), Some("+2")), "+1");
        assert_eq!(resolve_contact(None, Some("+2")), "+2");
        assert_eq!(resolve_contact(None, None), DEFAULT_WHATSAPP_NUMBER);
        assert_eq!(resolve_contact(Some("  "), None), DEFAULT_WHATSAPP_NUMBER);
        assert_eq!(resolve_contact(Some(""), Some("+2")), "+2");
    }

    #[test]
    fn test_resolve_contact_skips_unusable_values() {
        assert_eq!(resolve_contact(Some("call me"), Some("+2")), "+2");
        assert_eq!(
            resolve_contact(Some("call me"), Some("wa.me/123")),
            DEFAULT_WHATSAPP_NUMBER
        );
        assert_eq!(resolve_contact(Some(" (0704) 096 "), None), "(0704) 096");

        let cart = cart();
        let contact = resolve_contact(Some("ask in store"), None);
        assert!(checkout(&cart, "Store", contact).is_ok());
    }

    #[test]
    fn test_checkout_link() {
        let link = checkout(&cart(), "Black Royalty Stores", "+2348000000000").unwrap();
        assert!(link.url.as_str().starts_with("https://wa.me/+2348000000000?text=Hello%20Black"));
        assert!(link.message.ends_with("provide payment details."));
    }
}
