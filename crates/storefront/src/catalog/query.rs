//! Product listing filters and sort orders.

use std::cmp::Ordering;
use std::str::FromStr;

use giftshop_core::{CategoryId, Product};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors parsing listing parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid price range {0:?}, expected \"all\", \"min-max\" or \"min\"")]
    PriceRange(String),
    #[error("invalid sort order {0:?}, expected \"name\", \"price-low\" or \"price-high\"")]
    SortOrder(String),
}

/// Inclusive price bounds for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceRange {
    #[default]
    All,
    /// `min <= price <= max`
    Between(Decimal, Decimal),
    /// `price >= min`
    AtLeast(Decimal),
}

impl PriceRange {
    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        match *self {
            Self::All => true,
            Self::Between(min, max) => price >= min && price <= max,
            Self::AtLeast(min) => price >= min,
        }
    }
}

impl FromStr for PriceRange {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }

        let invalid = || QueryError::PriceRange(s.to_owned());
        let bound = |v: &str| Decimal::from_str(v.trim()).map_err(|_| invalid());

        match s.split_once('-') {
            Some((min, max)) => {
                let (min, max) = (bound(min)?, bound(max)?);
                if min > max {
                    return Err(invalid());
                }
                Ok(Self::Between(min, max))
            }
            None => Ok(Self::AtLeast(bound(s)?)),
        }
    }
}

/// Listing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Alphabetical by name.
    #[default]
    Name,
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
}

impl SortOrder {
    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            Self::PriceLow => a.price.cmp(&b.price),
            Self::PriceHigh => b.price.cmp(&a.price),
        }
    }
}

impl FromStr for SortOrder {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "name" => Ok(Self::Name),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            other => Err(QueryError::SortOrder(other.to_owned())),
        }
    }
}

/// Raw listing parameters as they arrive in a query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
    pub sort: Option<String>,
}

/// A parsed product listing query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// Case-insensitive substring of name or description.
    pub search: Option<String>,
    pub category: Option<CategoryId>,
    pub price: PriceRange,
    pub sort: SortOrder,
}

impl ProductQuery {
    /// Whether `product` passes every filter in this query.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let term_matches = self.search.as_deref().is_none_or(|term| {
            let term = term.to_lowercase();
            product.name.to_lowercase().contains(&term)
                || product.description.to_lowercase().contains(&term)
        });
        let category_matches = self
            .category
            .as_ref()
            .is_none_or(|category| product.category_id == *category);

        term_matches && category_matches && self.price.contains(product.price)
    }

    /// Sort `products` in place. The sort is stable.
    pub fn sort(&self, products: &mut [&Product]) {
        products.sort_by(|a, b| self.sort.compare(a, b));
    }
}

impl TryFrom<ListingParams> for ProductQuery {
    type Error = QueryError;

    fn try_from(params: ListingParams) -> Result<Self, Self::Error> {
        let search = params
            .search
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty());
        let category = params
            .category
            .filter(|c| !c.is_empty() && c != "all")
            .map(CategoryId::from);

        Ok(Self {
            search,
            category,
            price: params.price.as_deref().unwrap_or_default().parse()?,
            sort: params.sort.as_deref().unwrap_or_default().parse()?,
        })
    }
}
