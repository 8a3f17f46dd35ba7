//! Read-only product catalog.
//!
//! The catalog is loaded once at startup and never changes during a run, so
//! it is shared by reference without locking.

mod data;
mod query;

pub use query::{ListingParams, PriceRange, ProductQuery, QueryError, SortOrder};

use giftshop_core::{Category, CategoryId, Product, ProductId};

/// In-memory catalog of categories and products.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<Category>,
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from explicit records.
    #[must_use]
    pub const fn new(categories: Vec<Category>, products: Vec<Product>) -> Self {
        Self {
            categories,
            products,
        }
    }

    /// The built-in gift shop dataset.
    #[must_use]
    pub fn mock() -> Self {
        Self::new(data::categories(), data::products())
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All categories in catalog order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == *id)
    }

    #[must_use]
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == *id)
    }

    #[must_use]
    pub fn products_in_category(&self, category_id: &CategoryId) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category_id == *category_id)
            .collect()
    }

    #[must_use]
    pub fn featured_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_featured).collect()
    }

    /// Products matching `query`, in the query's sort order.
    #[must_use]
    pub fn search(&self, query: &ProductQuery) -> Vec<&Product> {
        let mut found: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| query.matches(p))
            .collect();
        query.sort(&mut found);
        found
    }
}
