//! Category filter, price sort and the shade finder.

use lip_glaze_core::{
    Catalog, CatalogQuery, Category, CategoryFilter, Product, SkinTone, SortOrder,
};
use lip_glaze_integration_tests::TestPage;
use lip_glaze_storefront::views::products::{render_product_grid, render_recommendations};
use pretty_assertions::assert_eq;

fn ids(products: &[&Product]) -> Vec<i32> {
    products.iter().map(|p| p.id.as_i32()).collect()
}

/// Query as the page builds it from the two select values.
fn query(category: &str, sort: &str) -> CatalogQuery {
    CatalogQuery::new(
        category.parse().expect("category option"),
        sort.parse().expect("sort option"),
    )
}

// =============================================================================
// Filtering and sorting
// =============================================================================

#[test]
fn test_glossy_filter() {
    let catalog = Catalog::builtin();
    let listed = catalog.query(&query("Glossy", "default"));

    assert_eq!(ids(&listed), vec![2]);
    assert!(listed.iter().all(|p| p.category == Category::Glossy));
}

#[test]
fn test_every_category_lists_exactly_its_products() {
    let catalog = Catalog::builtin();
    for category in Category::ALL {
        let filter = CategoryFilter::Only(category);
        let listed = catalog.query(&CatalogQuery::new(filter, SortOrder::Default));
        let expected = catalog
            .products()
            .iter()
            .filter(|p| p.category == category)
            .count();
        assert_eq!(listed.len(), expected, "{category}");
        assert!(listed.iter().all(|p| p.category == category));
    }
}

#[test]
fn test_default_order_is_catalog_order() {
    let catalog = Catalog::builtin();
    assert_eq!(ids(&catalog.query(&query("all", "default"))), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_price_sort_matches_numeric_order() {
    let catalog = Catalog::builtin();

    let asc = catalog.query(&query("all", "asc"));
    assert!(asc.windows(2).all(|w| w[0].price <= w[1].price));
    assert_eq!(ids(&asc), vec![3, 1, 2, 5, 4]);

    let desc = catalog.query(&query("all", "desc"));
    assert!(desc.windows(2).all(|w| w[0].price >= w[1].price));
    assert_eq!(ids(&desc), vec![4, 5, 2, 1, 3]);
}

#[test]
fn test_filter_and_sort_combine() {
    let catalog = Catalog::builtin();
    assert_eq!(ids(&catalog.query(&query("Classic", "asc"))), vec![3, 1]);
    assert_eq!(ids(&catalog.query(&query("Classic", "desc"))), vec![1, 3]);
}

#[test]
fn test_unknown_select_values_are_rejected() {
    assert!("Matte".parse::<CategoryFilter>().is_err());
    assert!("cheapest".parse::<SortOrder>().is_err());
}

// =============================================================================
// Shade finder
// =============================================================================

#[test]
fn test_deep_tone_recommendations() {
    let catalog = Catalog::builtin();
    let picks = catalog.recommend_for(SkinTone::Deep);

    assert_eq!(ids(&picks), vec![2, 5]);
    assert!(picks.iter().all(|p| p.tones.contains(&SkinTone::Deep)));
}

#[test]
fn test_every_tone_has_recommendations() {
    let catalog = Catalog::builtin();
    for tone in SkinTone::ALL {
        assert!(!catalog.recommend_for(tone).is_empty(), "{tone}");
    }
}

// =============================================================================
// Rendered grid
// =============================================================================

#[test]
fn test_grid_renders_filtered_cards_in_locale() {
    let page = TestPage::new();
    let catalog = Catalog::builtin();

    let html = render_product_grid(&catalog, &query("Luxury", "default"), &page.l10n())
        .expect("grid should render");

    assert_eq!(html.matches("class=\"product-card animate-on-scroll\"").count(), 1);
    assert!(html.contains("Golden Glam"));
    assert!(html.contains("Rp\u{a0}179.000"));
    assert!(html.contains("data-id=\"5\">Add to Cart</button>"));
}

#[test]
fn test_shade_results_render_add_buttons_only() {
    let page = TestPage::new();
    let html = render_recommendations(&Catalog::builtin(), SkinTone::Fair, &page.l10n())
        .expect("results should render");

    assert_eq!(html.matches("btn-add").count(), 3);
    assert!(!html.contains("btn-details"));
}
