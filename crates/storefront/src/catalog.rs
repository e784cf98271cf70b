//! Products shown on the collection page.

use bella_mode_core::{CurrencyStyle, Price};

/// A product on sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub name: String,
    pub price: Price,
    pub description: String,
}

/// Product card data for templates.
#[derive(Debug, Clone)]
pub struct ProductCard {
    pub name: String,
    /// Formatted price. Add-to-cart submits this label as-is.
    pub price_label: String,
    pub description: String,
}

/// The products the storefront sells.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The house collection.
    #[must_use]
    pub fn house_collection() -> Self {
        let product = |name: &str, price: u64, description: &str| Product {
            name: name.to_string(),
            price: Price::new(price),
            description: description.to_string(),
        };

        Self::new(vec![
            product("Tas A", 150_000, "Structured tote in vegan leather."),
            product("Dress Bella", 275_000, "Flowing midi dress in soft crepe."),
            product("Sepatu Heels", 320_000, "Block-heel pumps for all-day wear."),
            product("Scarf Satin", 85_000, "Printed satin scarf, 90 x 90 cm."),
        ])
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Product cards formatted in `style`.
    #[must_use]
    pub fn cards(&self, style: &CurrencyStyle) -> Vec<ProductCard> {
        self.products
            .iter()
            .map(|product| ProductCard {
                name: product.name.clone(),
                price_label: style.format(product.price),
                description: product.description.clone(),
            })
            .collect()
    }
}
