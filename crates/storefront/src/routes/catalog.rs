//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use tracing::instrument;

use giftshop_core::{Category, CategoryId, Product, ProductId};

use super::format_price;
use crate::catalog::{ListingParams, ProductQuery};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product display data.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub category_id: String,
    pub stock_quantity: u32,
    pub is_featured: bool,
    pub in_stock: bool,
    pub low_stock: bool,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: format_price(product.price),
            image_url: product.image_url.clone(),
            category_id: product.category_id.to_string(),
            stock_quantity: product.stock_quantity,
            is_featured: product.is_featured,
            in_stock: product.is_in_stock(),
            low_stock: product.is_low_stock(),
        }
    }
}

/// Category display data.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub product_count: usize,
}

/// A category together with its products.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryDetailView {
    pub category: CategoryView,
    pub products: Vec<ProductView>,
}

/// Product listing response.
#[derive(Debug, Clone, Serialize)]
pub struct ProductListView {
    pub products: Vec<ProductView>,
    pub total: usize,
}

fn category_view(category: &Category, product_count: usize) -> CategoryView {
    CategoryView {
        id: category.id.to_string(),
        name: category.name.clone(),
        description: category.description.clone(),
        image_url: category.image_url.clone(),
        product_count,
    }
}

fn product_views(products: &[&Product]) -> Vec<ProductView> {
    products.iter().map(|p| ProductView::from(*p)).collect()
}

/// List all categories.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Json<Vec<CategoryView>> {
    let catalog = state.catalog();
    let views = catalog
        .categories()
        .iter()
        .map(|c| category_view(c, catalog.products_in_category(&c.id).len()))
        .collect();
    Json(views)
}

/// Display a category and its products.
#[instrument(skip(state))]
pub async fn category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CategoryDetailView>> {
    let catalog = state.catalog();
    let id = CategoryId::new(id);
    let category = catalog
        .category(&id)
        .ok_or_else(|| AppError::NotFound(format!("category {id}")))?;
    let products = catalog.products_in_category(&id);

    Ok(Json(CategoryDetailView {
        category: category_view(category, products.len()),
        products: product_views(&products),
    }))
}

/// List products with optional search, category, price and sort filters.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ProductListView>> {
    let query = ProductQuery::try_from(params)?;
    let products = state.catalog().search(&query);

    tracing::debug!(count = products.len(), "Product listing");

    Ok(Json(ProductListView {
        total: products.len(),
        products: product_views(&products),
    }))
}

/// List featured products.
#[instrument(skip(state))]
pub async fn featured(State(state): State<AppState>) -> Json<Vec<ProductView>> {
    Json(product_views(&state.catalog().featured_products()))
}

/// Display a single product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductView>> {
    let id = ProductId::new(id);
    state
        .catalog()
        .product(&id)
        .map(|p| Json(ProductView::from(p)))
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}
