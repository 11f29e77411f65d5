//! Product catalog, listing queries and the shade finder.
//!
//! The catalog is fixed and ships inside the binary. Listing and shade
//! finder results borrow from it and keep catalog order unless a price sort
//! is requested.

use serde::{Deserialize, Serialize};

use crate::types::{Category, CategoryFilter, Price, ProductId, SkinTone, SortOrder};

/// A product offered in the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Image path relative to the page.
    pub image: String,
    /// One-line summary shown on product cards.
    pub description: String,
    /// Longer copy shown in the detail modal.
    pub details: String,
    pub category: Category,
    /// Skin tones this shade is recommended for.
    pub tones: Vec<SkinTone>,
}

impl Product {
    /// Whether the shade finder should recommend this product for `tone`.
    #[must_use]
    pub fn suits(&self, tone: SkinTone) -> bool {
        self.tones.contains(&tone)
    }
}

/// Filter and sort state of the product listing.
///
/// Transient view state: it is never persisted and resets on reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogQuery {
    pub category: CategoryFilter,
    pub sort: SortOrder,
}

impl CatalogQuery {
    #[must_use]
    pub const fn new(category: CategoryFilter, sort: SortOrder) -> Self {
        Self { category, sort }
    }
}

/// The fixed product catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from an explicit product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The catalog the storefront ships with.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![
            product(
                1,
                "Rosy Blush",
                149_000,
                "images/lip2.png",
                "A delicate rosy shade with a silky finish.",
                "Soft pink hue with a silky finish that compliments fair to medium skin tones. Long\u{2011}lasting moisture and lightweight feel.",
                Category::Classic,
                &[SkinTone::Fair, SkinTone::Medium],
            ),
            product(
                2,
                "Coral Shine",
                159_000,
                "images/lip3.png",
                "Vibrant coral gloss for a bold, youthful look.",
                "Vibrant coral gloss with high shine that brightens any complexion. Perfect for beach vibes and festive looks.",
                Category::Glossy,
                &[SkinTone::Medium, SkinTone::Tan, SkinTone::Deep],
            ),
            product(
                3,
                "Glamour Pink",
                139_000,
                "images/lip1.png",
                "Classic pink glaze with a moisturizing touch.",
                "Classic pink glaze enriched with vitamin E for hydration. Suitable for daily wear with a natural finish.",
                Category::Classic,
                &[SkinTone::Fair, SkinTone::Medium],
            ),
            product(
                4,
                "Trio Blossom",
                189_000,
                "images/lip4.png",
                "A set of three vibrant shades to match every mood.",
                "A set of three vibrant shades\u{2014}rosy, coral, and nude\u{2014}in travel\u{2011}friendly sizes. Ideal for experimenting with different looks.",
                Category::Set,
                &[SkinTone::Fair, SkinTone::Medium, SkinTone::Tan],
            ),
            product(
                5,
                "Golden Glam",
                179_000,
                "images/lip5.png",
                "Luxurious lipstick with a golden touch for a radiant look.",
                "Luxurious lipstick with a hint of gold shimmer for a radiant finish. Enriched with antioxidants to nourish lips.",
                Category::Luxury,
                &[SkinTone::Tan, SkinTone::Deep],
            ),
        ])
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products matching the query's category, ordered by its sort.
    ///
    /// Price sorting is stable: equally priced products keep catalog order.
    #[must_use]
    pub fn query(&self, query: &CatalogQuery) -> Vec<&Product> {
        let mut list: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| query.category.matches(p.category))
            .collect();

        match query.sort {
            SortOrder::Default => {}
            SortOrder::Asc => list.sort_by_key(|p| p.price),
            SortOrder::Desc => list.sort_by(|a, b| b.price.cmp(&a.price)),
        }

        list
    }

    /// Shade finder: products recommended for `tone`, in catalog order.
    #[must_use]
    pub fn recommend_for(&self, tone: SkinTone) -> Vec<&Product> {
        self.products.iter().filter(|p| p.suits(tone)).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: i32,
    name: &str,
    price: u64,
    image: &str,
    description: &str,
    details: &str,
    category: Category,
    tones: &[SkinTone],
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Price::new(price),
        image: image.to_string(),
        description: description.to_string(),
        details: details.to_string(),
        category,
        tones: tones.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ids(products: &[&Product]) -> Vec<i32> {
        products.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let catalog = Catalog::builtin();
        let mut seen: Vec<i32> = catalog.products().iter().map(|p| p.id.as_i32()).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), catalog.products().len());
    }

    #[test]
    fn test_default_query_keeps_catalog_order() {
        let catalog = Catalog::builtin();
        assert_eq!(ids(&catalog.query(&CatalogQuery::default())), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_filter_by_category() {
        let catalog = Catalog::builtin();
        let glossy = catalog.query(&CatalogQuery::new(
            CategoryFilter::Only(Category::Glossy),
            SortOrder::Default,
        ));
        assert_eq!(ids(&glossy), vec![2]);

        let classic = catalog.query(&CatalogQuery::new(
            CategoryFilter::Only(Category::Classic),
            SortOrder::Default,
        ));
        assert_eq!(ids(&classic), vec![1, 3]);
    }

    #[test]
    fn test_sort_by_price() {
        let catalog = Catalog::builtin();
        let asc = catalog.query(&CatalogQuery::new(CategoryFilter::All, SortOrder::Asc));
        assert_eq!(ids(&asc), vec![3, 1, 2, 5, 4]);

        let desc = catalog.query(&CatalogQuery::new(CategoryFilter::All, SortOrder::Desc));
        assert_eq!(ids(&desc), vec![4, 5, 2, 1, 3]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_prices() {
        let mut twin = Catalog::builtin().products()[0].clone();
        twin.id = ProductId::new(9);
        let mut products = Catalog::builtin().products().to_vec();
        products.push(twin);
        let catalog = Catalog::new(products);

        let asc = catalog.query(&CatalogQuery::new(CategoryFilter::All, SortOrder::Asc));
        assert_eq!(ids(&asc), vec![3, 1, 9, 2, 5, 4]);
        let desc = catalog.query(&CatalogQuery::new(CategoryFilter::All, SortOrder::Desc));
        assert_eq!(ids(&desc), vec![4, 5, 2, 1, 9, 3]);
    }

    #[test]
    fn test_shade_finder() {
        let catalog = Catalog::builtin();
        assert_eq!(ids(&catalog.recommend_for(SkinTone::Deep)), vec![2, 5]);
        assert_eq!(ids(&catalog.recommend_for(SkinTone::Fair)), vec![1, 3, 4]);
    }

    #[test]
    fn test_find() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.find(ProductId::new(4)).map(|p| p.name.as_str()),
            Some("Trio Blossom")
        );
        assert!(catalog.find(ProductId::new(42)).is_none());
    }
}
