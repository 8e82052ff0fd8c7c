//! Catalog API client.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, instrument};

use swiftcart_core::Product;

use crate::api::{ApiError, decode_response};
use crate::config::StorefrontConfig;

const CATALOG_CACHE_KEY: &str = "catalog:all";

/// Client for the product catalog endpoints.
///
/// Cheaply cloneable. Unfiltered catalog responses are cached (TTL from
/// configuration); search responses never are.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    endpoint: String,
    request_timeout: Duration,
    cache: Cache<String, Vec<Product>>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(config.catalog_cache_ttl)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                endpoint: config.base_url.as_str().trim_end_matches('/').to_string(),
                request_timeout: config.request_timeout,
                cache,
            }),
        }
    }

    /// Fetch the full catalog.
    ///
    /// No retry: the caller decides what to do with a failure (typically keep
    /// the previously displayed catalog).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a product
    /// array.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Result<Vec<Product>, ApiError> {
        if let Some(products) = self.inner.cache.get(CATALOG_CACHE_KEY).await {
            debug!("Cache hit for catalog");
            return Ok(products);
        }

        let response = self
            .inner
            .client
            .get(format!("{}/products", self.inner.endpoint))
            .timeout(self.inner.request_timeout)
            .send()
            .await?;

        let products: Vec<Product> = decode_response(response).await?;

        self.inner
            .cache
            .insert(CATALOG_CACHE_KEY.to_string(), products.clone())
            .await;

        Ok(products)
    }

    /// Fetch the catalog subset matching a free-text query.
    ///
    /// Not cached. The contract with callers is that any failure renders as
    /// an empty result set - a deliberate product decision that makes a
    /// broken search indistinguishable from zero matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a product
    /// array; the caller maps that to "no products found".
    #[instrument(skip(self), fields(query = %query))]
    pub async fn fetch_filtered(&self, query: &str) -> Result<Vec<Product>, ApiError> {
        let response = self
            .inner
            .client
            .get(format!("{}/products/search", self.inner.endpoint))
            .query(&[("value", query)])
            .timeout(self.inner.request_timeout)
            .send()
            .await?;

        decode_response(response).await
    }
}
