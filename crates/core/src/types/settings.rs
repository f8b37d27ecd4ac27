//! Site settings document (`content/settings.json`).

use serde::{Deserialize, Serialize};

/// Editor-controlled site settings.
///
/// Only the keys below affect rendering; anything else in the document is
/// ignored. Empty strings count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    pub hero_headline: Option<String>,
    pub hero_subtext: Option<String>,
    pub hero_bg_image: Option<String>,
    /// Contact identifier for WhatsApp checkout.
    pub whatsapp_number: Option<String>,
}

impl SiteSettings {
    /// Hero headline, if set.
    #[must_use]
    pub fn hero_headline(&self) -> Option<&str> {
        non_empty(self.hero_headline.as_deref())
    }

    /// Hero subtext, if set.
    #[must_use]
    pub fn hero_subtext(&self) -> Option<&str> {
        non_empty(self.hero_subtext.as_deref())
    }

    /// Hero background image URL, if set.
    #[must_use]
    pub fn hero_bg_image(&self) -> Option<&str> {
        non_empty(self.hero_bg_image.as_deref())
    }

    /// Checkout contact identifier, if set.
    #[must_use]
    pub fn whatsapp_number(&self) -> Option<&str> {
        non_empty(self.whatsapp_number.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
