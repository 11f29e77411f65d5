//! Product grid and shade finder results.

use askama::Template;
use lip_glaze_core::i18n::keys;
use lip_glaze_core::{Catalog, CatalogQuery, Product, SkinTone};

use super::Localizer;
use crate::error::Result;

/// Product card display data for templates.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
            price: product.price.to_string(),
        }
    }
}

/// Grid of product cards.
#[derive(Template)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub cards: Vec<ProductCardView>,
    pub add_label: String,
    pub details_label: String,
    pub show_details: bool,
}

impl ProductGridTemplate {
    fn new(products: &[&Product], l10n: &Localizer<'_>, show_details: bool) -> Self {
        Self {
            cards: products.iter().map(|p| ProductCardView::from(*p)).collect(),
            add_label: l10n.t(keys::ADD_TO_CART).to_string(),
            details_label: l10n.t(keys::VIEW_DETAILS).to_string(),
            show_details,
        }
    }
}

/// Listing grid: the catalog filtered and sorted by `query`, with add and
/// detail buttons.
///
/// # Errors
///
/// Returns `AppError::Template` if rendering fails.
pub fn render_product_grid(
    catalog: &Catalog,
    query: &CatalogQuery,
    l10n: &Localizer<'_>,
) -> Result<String> {
    let products = catalog.query(query);
    Ok(ProductGridTemplate::new(&products, l10n, true).render()?)
}

/// Shade finder results for `tone`: add buttons only.
///
/// # Errors
///
/// Returns `AppError::Template` if rendering fails.
pub fn render_recommendations(
    catalog: &Catalog,
    tone: SkinTone,
    l10n: &Localizer<'_>,
) -> Result<String> {
    let products = catalog.recommend_for(tone);
    Ok(ProductGridTemplate::new(&products, l10n, false).render()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lip_glaze_core::{Category, CategoryFilter, Locale, SortOrder, Translations};

    use super::*;

    fn card_ids(html: &str) -> Vec<String> {
        html.match_indices("class=\"btn-add\" data-id=\"")
            .map(|(i, m)| {
                let rest = &html[i + m.len()..];
                rest[..rest.find('"').unwrap()].to_string()
            })
            .collect()
    }

    #[test]
    fn test_grid_follows_query() {
        let translations = Translations::bundled().unwrap();
        let l10n = Localizer::new(&translations, Locale::En);
        let catalog = Catalog::builtin();

        let html = render_product_grid(&catalog, &CatalogQuery::default(), &l10n).unwrap();
        assert_eq!(card_ids(&html), vec!["1", "2", "3", "4", "5"]);

        let query = CatalogQuery::new(CategoryFilter::Only(Category::Glossy), SortOrder::Default);
        let html = render_product_grid(&catalog, &query, &l10n).unwrap();
        assert_eq!(card_ids(&html), vec!["2"]);
        assert!(html.contains("Coral Shine"));
        assert!(html.contains("Rp\u{a0}159.000"));

        let query = CatalogQuery::new(CategoryFilter::All, SortOrder::Desc);
        let html = render_product_grid(&catalog, &query, &l10n).unwrap();
        assert_eq!(card_ids(&html), vec!["4", "5", "2", "1", "3"]);
    }

    #[test]
    fn test_grid_buttons_are_localized() {
        let translations = Translations::bundled().unwrap();
        let catalog = Catalog::builtin();

        let en = Localizer::new(&translations, Locale::En);
        let html = render_product_grid(&catalog, &CatalogQuery::default(), &en).unwrap();
        assert!(html.contains(">Add to Cart</button>"));
        assert!(html.contains(">View Details</button>"));

        let id = Localizer::new(&translations, Locale::Id);
        let html = render_product_grid(&catalog, &CatalogQuery::default(), &id).unwrap();
        assert!(html.contains(">Tambah ke Keranjang</button>"));
        assert!(html.contains(">Detail</button>"));
    }

    #[test]
    fn test_recommendations_have_no_details_button() {
        let translations = Translations::bundled().unwrap();
        let l10n = Localizer::new(&translations, Locale::En);
        let html = render_recommendations(&Catalog::builtin(), SkinTone::Deep, &l10n).unwrap();
        assert_eq!(card_ids(&html), vec!["2", "5"]);
        assert!(!html.contains("btn-details"));
    }

    #[test]
    fn test_empty_grid() {
        let translations = Translations::bundled().unwrap();
        let l10n = Localizer::new(&translations, Locale::En);
        let html = render_product_grid(&Catalog::new(Vec::new()), &CatalogQuery::default(), &l10n)
            .unwrap();
        assert!(html.trim().is_empty());
    }
}
