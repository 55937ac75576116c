//! Browse and home view aggregation.
//!
//! Fetches the data a catalog page needs in one go and keeps the full
//! product snapshot around so the filter engine can narrow it locally.

use serde::Serialize;
use tracing::{instrument, warn};

use crate::search::{FilterCriteria, distinct_brands, filter_products};
use crate::shop::CatalogClient;
use crate::shop::types::{Category, Product};

/// Everything the browse view needs on first render.
#[derive(Debug, Clone, Default)]
pub struct BrowsePage {
    /// The full, unfiltered product snapshot.
    pub products: Vec<Product>,
    /// Categories offered as filter options.
    pub categories: Vec<Category>,
    /// Brands offered as filter options, derived from `products`.
    pub brands: Vec<String>,
}

impl BrowsePage {
    /// Load products and categories concurrently.
    ///
    /// The two fetches are joined, and a failure in one is substituted with
    /// an empty list so the other's success is not discarded: the page can
    /// render partially rather than fail as a whole. Failures are logged at
    /// warn level.
    #[instrument(skip(catalog))]
    pub async fn load(catalog: &CatalogClient) -> Self {
        let (products, categories) =
            tokio::join!(catalog.list_products(), catalog.list_categories());

        let products = products.unwrap_or_else(|e| {
            warn!(error = %e, "Product fetch failed, rendering without products");
            Vec::new()
        });
        let categories = categories.unwrap_or_else(|e| {
            warn!(error = %e, "Category fetch failed, rendering without categories");
            Vec::new()
        });

        let brands = distinct_brands(&products);

        Self {
            products,
            categories,
            brands,
        }
    }
}

/// The browse view's interactive state: the immutable product snapshot plus
/// the shopper's current criteria.
#[derive(Debug, Clone, Default)]
pub struct BrowseState {
    all_products: Vec<Product>,
    /// Current filter selections, mutated field-by-field by the view.
    pub criteria: FilterCriteria,
}

impl BrowseState {
    /// Start a browse session over a product snapshot.
    #[must_use]
    pub fn new(all_products: Vec<Product>) -> Self {
        Self {
            all_products,
            criteria: FilterCriteria::default(),
        }
    }

    /// The full, unfiltered snapshot.
    #[must_use]
    pub fn all_products(&self) -> &[Product] {
        &self.all_products
    }

    /// Run the current criteria over the snapshot.
    #[must_use]
    pub fn apply(&self) -> Vec<Product> {
        filter_products(&self.all_products, &self.criteria)
    }

    /// Reset every selection and show the full snapshot again.
    pub fn clear_filters(&mut self) {
        self.criteria.clear();
    }
}

/// Per-category counts shown on the home page's category cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    /// Category display name.
    pub category_name: String,
    /// Number of products in the category.
    pub product_count: u32,
    /// Average discount percent across those products, rounded.
    pub avg_discount_percent: u32,
}

/// Aggregate per-category stats over the full product set.
///
/// Categories appear in order of first appearance. Products without a
/// category are left out of the cards entirely.
#[must_use]
pub fn category_stats(products: &[Product]) -> Vec<CategoryStats> {
    let mut stats: Vec<(String, u32, u32)> = Vec::new(); // (name, count, discount total)

    for product in products {
        let Some(name) = product.category_name.as_deref() else {
            continue;
        };
        if let Some(entry) = stats.iter_mut().find(|(n, _, _)| n == name) {
            entry.1 += 1;
            entry.2 += product.discount_percent;
        } else {
            stats.push((name.to_string(), 1, product.discount_percent));
        }
    }

    stats
        .into_iter()
        .map(|(category_name, product_count, discount_total)| CategoryStats {
            category_name,
            product_count,
            // Round half up
            avg_discount_percent: (discount_total + product_count / 2) / product_count,
        })
        .collect()
}
