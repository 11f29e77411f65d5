//! Navigation mini-cart and cart badge.

use askama::Template;
use lip_glaze_core::i18n::keys;
use lip_glaze_core::Cart;

use super::Localizer;
use crate::error::Result;

/// Mini-cart entry display data for templates.
#[derive(Debug, Clone)]
pub struct MiniCartItemView {
    pub name: String,
    pub quantity: u32,
    pub subtotal: String,
}

/// Dropdown list items.
#[derive(Template)]
#[template(path = "partials/mini_cart_items.html")]
pub struct MiniCartItemsTemplate {
    pub items: Vec<MiniCartItemView>,
    pub empty_label: String,
}

/// Everything the mini-cart dropdown shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiniCartView {
    /// Markup for `#miniCartItems`.
    pub items_html: String,
    /// Text for `#miniCartTotalPrice`.
    pub total: String,
    pub title: String,
    pub total_label: String,
    pub view_cart_label: String,
    pub checkout_label: String,
}

/// Render the mini-cart for `cart` in the active locale.
///
/// # Errors
///
/// Returns `AppError::Template` if rendering fails.
pub fn render_mini_cart(cart: &Cart, l10n: &Localizer<'_>) -> Result<MiniCartView> {
    let items = MiniCartItemsTemplate {
        items: cart
            .lines()
            .iter()
            .map(|line| MiniCartItemView {
                name: line.name.clone(),
                quantity: line.quantity,
                subtotal: line.subtotal().to_string(),
            })
            .collect(),
        empty_label: l10n.t(keys::MINI_CART_EMPTY).to_string(),
    };

    Ok(MiniCartView {
        items_html: items.render()?,
        total: cart.total().plain(),
        title: l10n.t(keys::MINI_CART_TITLE).to_string(),
        total_label: l10n.t(keys::MINI_CART_TOTAL).to_string(),
        view_cart_label: l10n.t(keys::VIEW_CART).to_string(),
        checkout_label: l10n.t(keys::PROCEED_CHECKOUT).to_string(),
    })
}

/// Text for the navigation badge: total units in the cart.
#[must_use]
pub fn nav_count(cart: &Cart) -> String {
    cart.item_count().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lip_glaze_core::{Catalog, Locale, ProductId, Translations};

    use super::*;

    #[test]
    fn test_empty_message_follows_locale() {
        let translations = Translations::bundled().unwrap();

        let en = render_mini_cart(&Cart::default(), &Localizer::new(&translations, Locale::En))
            .unwrap();
        assert!(en.items_html.contains("<li>Your cart is empty.</li>"));
        assert_eq!(en.total, "Rp 0");
        assert_eq!(en.title, "Cart");

        let id = render_mini_cart(&Cart::default(), &Localizer::new(&translations, Locale::Id))
            .unwrap();
        assert!(id.items_html.contains("<li>Keranjang Anda kosong.</li>"));
        assert_eq!(id.view_cart_label, "Lihat Keranjang");
    }

    #[test]
    fn test_items_and_total() {
        let translations = Translations::bundled().unwrap();
        let catalog = Catalog::builtin();
        let mut cart = Cart::default();
        cart.add(catalog.find(ProductId::new(3)).unwrap());
        cart.add(catalog.find(ProductId::new(3)).unwrap());
        cart.add(catalog.find(ProductId::new(2)).unwrap());

        let view = render_mini_cart(&cart, &Localizer::new(&translations, Locale::En)).unwrap();
        assert_eq!(view.items_html.matches("class=\"mini-cart-item\"").count(), 2);
        assert!(view.items_html.contains("Glamour Pink</span> x2"));
        assert!(view.items_html.contains("Rp\u{a0}278.000"));
        assert!(!view.items_html.contains("empty"));
        assert_eq!(view.total, "Rp 437.000");
        assert_eq!(nav_count(&cart), "3");
    }
}
