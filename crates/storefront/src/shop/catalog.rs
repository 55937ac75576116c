//! Catalog API client.
//!
//! Read-only access to products and categories, cached with `moka`
//! (5-minute TTL).

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, instrument};

use fashionhub_core::ProductId;

use crate::config::ShopApiConfig;
use crate::shop::types::{Category, Product};
use crate::shop::{ShopError, read_json};

/// Cached catalog responses.
#[derive(Clone)]
enum CacheValue {
    Products(Vec<Product>),
    Product(Box<Product>),
    Categories(Vec<Category>),
}

/// Client for the shop's catalog API.
///
/// Provides typed access to products and categories. List and detail reads
/// are cached for 5 minutes.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    config: ShopApiConfig,
    cache: Cache<String, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ShopApiConfig) -> Result<Self, ShopError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                config: config.clone(),
                cache,
            }),
        })
    }

    /// Get the full product list.
    ///
    /// # Errors
    ///
    /// Returns an error if the API is unreachable, times out, or answers
    /// with something other than a product list.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ShopError> {
        let cache_key = "products".to_string();

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product list");
            return Ok(products);
        }

        let endpoint = self.inner.config.endpoint("products");
        let response = self.inner.client.get(&endpoint).send().await?;
        let products: Vec<Product> = read_json(response, "products").await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get a single product by ID.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NotFound` if the product does not exist, or a
    /// transport error if the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, ShopError> {
        let cache_key = format!("product:{id}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let path = format!("products/{id}");
        let endpoint = self.inner.config.endpoint(&path);
        let response = self.inner.client.get(&endpoint).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ShopError::NotFound(format!("product {id}")));
        }

        let product: Product = read_json(response, &path).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get the category list.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, ShopError> {
        let cache_key = "categories".to_string();

        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for category list");
            return Ok(categories);
        }

        let endpoint = self.inner.config.endpoint("categories");
        let response = self.inner.client.get(&endpoint).send().await?;
        let categories: Vec<Category> = read_json(response, "categories").await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    /// Invalidate all cached catalog data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}
