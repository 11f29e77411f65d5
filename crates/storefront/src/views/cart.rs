//! Full cart page.

use askama::Template;
use lip_glaze_core::cart::CartLine;
use lip_glaze_core::i18n::keys;
use lip_glaze_core::Cart;

use super::Localizer;
use crate::error::Result;

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    /// Unit price with currency, e.g. `Rp 149.000`.
    pub price: String,
    /// Line total without currency; the template prints the symbol.
    pub subtotal: String,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.as_i32(),
            name: line.name.clone(),
            image: line.image.clone(),
            quantity: line.quantity,
            price: line.price.to_string(),
            subtotal: line.subtotal().grouped(),
        }
    }
}

/// Table body rows.
#[derive(Template)]
#[template(path = "partials/cart_rows.html")]
pub struct CartRowsTemplate {
    pub lines: Vec<CartLineView>,
}

/// Everything the cart page shows for one cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartPageView {
    /// Markup for `#cartTable tbody`.
    pub rows_html: String,
    /// Text for `#cartTotal`, without currency.
    pub total: String,
}

/// Render the cart table body and total.
///
/// # Errors
///
/// Returns `AppError::Template` if rendering fails.
pub fn render_cart_page(cart: &Cart) -> Result<CartPageView> {
    let rows = CartRowsTemplate {
        lines: cart.lines().iter().map(CartLineView::from).collect(),
    };
    Ok(CartPageView {
        rows_html: rows.render()?,
        total: cart.total().grouped(),
    })
}

/// Localized labels for the cart page chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLabels {
    /// The five `thead th` cells, in column order.
    pub headings: [String; 5],
    pub total_label: String,
    pub continue_shopping: String,
    pub checkout: String,
}

impl CartLabels {
    #[must_use]
    pub fn new(l10n: &Localizer<'_>) -> Self {
        let headings = [
            keys::CART_PRODUCT,
            keys::CART_PRICE,
            keys::CART_QUANTITY,
            keys::CART_SUBTOTAL,
            keys::CART_ACTION,
        ]
        .map(|key| l10n.t(key).to_string());

        Self {
            headings,
            // A trailing space separates the label from the amount.
            total_label: format!("{} ", l10n.t(keys::TOTAL_LABEL)),
            continue_shopping: l10n.t(keys::CONTINUE_SHOPPING).to_string(),
            checkout: l10n.t(keys::CHECKOUT_BUTTON).to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lip_glaze_core::{Catalog, Locale, ProductId, Translations};
    use pretty_assertions::assert_eq;

    use super::*;

    fn cart_with(ids: &[i32]) -> Cart {
        let catalog = Catalog::builtin();
        let mut cart = Cart::default();
        for id in ids {
            cart.add(catalog.find(ProductId::new(*id)).unwrap());
        }
        cart
    }

    #[test]
    fn test_rows_and_total() {
        let mut cart = cart_with(&[1, 1, 5]);
        cart.set_quantity(ProductId::new(5), 3);

        let page = render_cart_page(&cart).unwrap();
        assert_eq!(page.total, "835.000");
        assert_eq!(page.rows_html.matches("<tr>").count(), 2);
        assert!(page.rows_html.contains("value=\"2\" data-id=\"1\""));
        assert!(page.rows_html.contains("<span class=\"subtotal\">298.000</span>"));
        assert!(page.rows_html.contains("<span class=\"subtotal\">537.000</span>"));
        assert!(page.rows_html.contains("Rp\u{a0}179.000"));
        assert!(page.rows_html.contains("class=\"btn-delete\" data-id=\"5\""));
    }

    #[test]
    fn test_empty_cart_page() {
        let page = render_cart_page(&Cart::default()).unwrap();
        assert!(page.rows_html.trim().is_empty());
        assert_eq!(page.total, "0");
    }

    #[test]
    fn test_names_are_escaped() {
        let mut line = CartLine::from_product(
            Catalog::builtin().find(ProductId::new(1)).unwrap(),
        );
        line.name = "<b>Rosy</b>".to_string();
        let cart = Cart::from_lines(vec![line]);

        let page = render_cart_page(&cart).unwrap();
        assert!(!page.rows_html.contains("<b>Rosy</b>"));
        assert!(page.rows_html.contains("Rosy"));
    }

    #[test]
    fn test_labels() {
        let translations = Translations::bundled().unwrap();
        let labels = CartLabels::new(&Localizer::new(&translations, Locale::Id));
        assert_eq!(labels.headings[0], "Produk");
        assert_eq!(labels.headings[4], "Aksi");
        assert!(labels.total_label.ends_with(' '));
    }
}
