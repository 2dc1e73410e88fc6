//! Product catalog.
//!
//! The catalog is a fixed, ordered lineup baked into the binary. Product ids
//! are stable across releases: cart lines, favorites, and order history all
//! persist references to them.

use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A purchasable e-bike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Marketing copy shown on the detail page.
    pub description: String,
    /// Unit price.
    pub price: Money,
    /// Glyph reference used when no photo asset exists.
    pub image_ref: String,
    /// Optional photo asset reference.
    pub asset_image_ref: Option<String>,
}

impl Product {
    /// Create a new product.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
            image_ref: image_ref.into(),
            asset_image_ref: None,
        }
    }

    /// Attach a photo asset reference.
    pub fn with_asset_image(mut self, asset_ref: impl Into<String>) -> Self {
        self.asset_image_ref = Some(asset_ref.into());
        self
    }
}

/// Fixed, ordered, read-only list of purchasable products.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an ordered product list.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The storefront's e-bike lineup.
    pub fn builtin() -> Self {
        Self::new(vec![
            Product::new(
                "evoque-atom",
                "Evoque Atom",
                "72V powerhouse built for raw power and smooth handling.",
                Money::new(199900, Currency::USD),
                "bicycle",
            )
            .with_asset_image("evoque_atom"),
            Product::new(
                "lightning-bolt",
                "Lightning Bolt",
                "Engineered for speed and efficiency with aerodynamic design.",
                Money::new(159900, Currency::USD),
                "bolt.circle",
            ),
            Product::new(
                "urban-cruiser",
                "Urban Cruiser",
                "Perfect for leisurely city rides with comfort and style.",
                Money::new(129900, Currency::USD),
                "bicycle.circle",
            ),
            Product::new(
                "mountain-explorer",
                "Mountain Explorer",
                "Rugged e-bike with all-terrain capabilities and full suspension.",
                Money::new(229900, Currency::USD),
                "mountain.2",
            ),
        ])
    }

    /// All products, in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_products() {
        let catalog = Catalog::builtin();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_products_have_positive_prices() {
        for product in &Catalog::builtin() {
            assert!(
                product.price.is_positive(),
                "{} should have a positive price",
                product.name
            );
        }
    }

    #[test]
    fn test_products_have_names() {
        for product in &Catalog::builtin() {
            assert!(!product.name.is_empty());
        }
    }

    #[test]
    fn test_product_ids_are_distinct() {
        let catalog = Catalog::builtin();
        let ids: HashSet<_> = catalog.products().iter().map(|p| &p.id).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_product_lookup() {
        let catalog = Catalog::builtin();
        let id = ProductId::new("urban-cruiser");
        let product = catalog.product(&id).unwrap();
        assert_eq!(product.name, "Urban Cruiser");
        assert!(catalog.product(&ProductId::new("missing")).is_none());
    }
}
