//! View projections.
//!
//! Every function here is a pure projection of state into markup or display
//! strings. Rendering the same state twice yields the same output, so the
//! DOM layer can redraw a view at any time by replacing its contents.
//!
//! # Views
//!
//! ```text
//! #productGrid            - products::render_product_grid
//! #shadeRecommendations   - products::render_recommendations
//! #cartTable tbody        - cart::render_cart_page
//! #cartMenu               - mini_cart::render_mini_cart
//! #navCartCount           - mini_cart::nav_count
//! #productModal           - modal::ProductModalView
//! ```

pub mod cart;
pub mod mini_cart;
pub mod modal;
pub mod products;

use lip_glaze_core::{Locale, Translations};

/// Translation lookups bound to one locale.
#[derive(Debug, Clone, Copy)]
pub struct Localizer<'a> {
    translations: &'a Translations,
    locale: Locale,
}

impl<'a> Localizer<'a> {
    #[must_use]
    pub const fn new(translations: &'a Translations, locale: Locale) -> Self {
        Self {
            translations,
            locale,
        }
    }

    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Text for rendered views, falling back to English and then the key.
    #[must_use]
    pub fn t(&self, key: &'a str) -> &'a str {
        self.translations.text(self.locale, key)
    }

    /// Text for tagged static elements. `None` means keep the element's text.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&'a str> {
        self.translations.lookup(self.locale, key)
    }
}
