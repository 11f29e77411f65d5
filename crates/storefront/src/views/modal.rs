//! Product detail modal.

use lip_glaze_core::Product;

/// Field values for the fixed `#productModal` elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductModalView {
    /// `src` for `#modalImage`.
    pub image: String,
    /// Text for `#modalName`.
    pub name: String,
    /// Text for `#modalDesc`.
    pub description: String,
    /// Text for `#modalDetails`.
    pub details: String,
}

impl From<&Product> for ProductModalView {
    fn from(product: &Product) -> Self {
        Self {
            image: product.image.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            details: product.details.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lip_glaze_core::{Catalog, ProductId};

    use super::*;

    #[test]
    fn test_from_product() {
        let catalog = Catalog::builtin();
        let view = ProductModalView::from(catalog.find(ProductId::new(5)).unwrap());
        assert_eq!(view.name, "Golden Glam");
        assert_eq!(view.image, "images/lip5.png");
        assert!(view.details.starts_with("Luxurious lipstick with a hint of gold"));
    }
}
