// ============================================================================
// Catalog Provider Interface
// Supplies the product catalog the matcher scans
// ============================================================================

use crate::domain::Product;
use parking_lot::RwLock;

/// Source of the current product catalog.
/// Freshness and caching are the provider's concern; the order of the
/// returned products is the order the matcher scans them in.
pub trait CatalogProvider: Send + Sync {
    fn products(&self) -> Vec<Product>;
}

/// In-memory catalog that can be swapped wholesale (e.g. on a cache refresh)
#[derive(Debug, Default)]
pub struct StaticCatalog {
    products: RwLock<Vec<Product>>,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }

    /// Replace the whole catalog, returning the previous one
    pub fn replace(&self, products: Vec<Product>) -> Vec<Product> {
        std::mem::replace(&mut *self.products.write(), products)
    }

    pub fn len(&self) -> usize {
        self.products.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.read().is_empty()
    }
}

impl CatalogProvider for StaticCatalog {
    fn products(&self) -> Vec<Product> {
        self.products.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_static_catalog_preserves_order() {
        let catalog = StaticCatalog::new(vec![
            Product::new(2, "B", dec!(0.02), 1, dec!(1)),
            Product::new(1, "A", dec!(0.01), 1, dec!(1)),
        ]);

        let codes: Vec<i32> = catalog.products().iter().map(|p| p.code.0).collect();
        assert_eq!(codes, vec![2, 1]);
    }

    #[test]
    fn test_replace() {
        let catalog = StaticCatalog::default();
        assert!(catalog.is_empty());

        let previous = catalog.replace(vec![Product::new(1, "A", dec!(0.01), 1, dec!(1))]);
        assert!(previous.is_empty());
        assert_eq!(catalog.len(), 1);
    }
}
