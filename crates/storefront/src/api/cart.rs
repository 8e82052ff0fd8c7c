//! Cart API client.
//!
//! Cart state is mutable server-side, so nothing here is cached. Every call
//! requires a [`Session`]; unauthenticated users have no server cart and the
//! orchestrator never calls these methods without one.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::instrument;

use swiftcart_core::{CartEntry, ProductId};

use crate::api::{ApiError, decode_response};
use crate::config::StorefrontConfig;
use crate::session::Session;

/// Client for the cart endpoints.
#[derive(Clone)]
pub struct CartClient {
    inner: Arc<CartClientInner>,
}

struct CartClientInner {
    client: reqwest::Client,
    endpoint: String,
    request_timeout: Duration,
}

/// Request body for `POST /cart`. The quantity is absolute, not a delta.
#[derive(Debug, Serialize)]
struct SubmitQuantityBody<'a> {
    #[serde(rename = "productId")]
    product_id: &'a ProductId,
    qty: u32,
}

impl CartClient {
    /// Create a new cart client.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        Self {
            inner: Arc::new(CartClientInner {
                client: reqwest::Client::new(),
                endpoint: config.base_url.as_str().trim_end_matches('/').to_string(),
                request_timeout: config.request_timeout,
            }),
        }
    }

    /// Fetch the user's raw cart record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; a 4xx response carries the
    /// backend's message (e.g. an invalid or expired token).
    #[instrument(skip(self, session))]
    pub async fn fetch_cart(&self, session: &Session) -> Result<Vec<CartEntry>, ApiError> {
        let response = self
            .inner
            .client
            .get(format!("{}/cart", self.inner.endpoint))
            .bearer_auth(session.token())
            .timeout(self.inner.request_timeout)
            .send()
            .await?;

        decode_response(response).await
    }

    /// Submit the desired absolute quantity for a product.
    ///
    /// The backend applies the quantity (zero delegates removal semantics to
    /// it) and returns the full updated cart record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, e.g. a 404 for an unknown
    /// product ID.
    #[instrument(skip(self, session), fields(product_id = %product_id, qty))]
    pub async fn submit_quantity(
        &self,
        session: &Session,
        product_id: &ProductId,
        qty: u32,
    ) -> Result<Vec<CartEntry>, ApiError> {
        let response = self
            .inner
            .client
            .post(format!("{}/cart", self.inner.endpoint))
            .bearer_auth(session.token())
            .timeout(self.inner.request_timeout)
            .json(&SubmitQuantityBody { product_id, qty })
            .send()
            .await?;

        decode_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_body_wire_shape() {
        let product_id = ProductId::new("KCRwjF7lN97HnEaY");
        let body = SubmitQuantityBody {
            product_id: &product_id,
            qty: 3,
        };

        let json = serde_json::to_value(&body).expect("serialize body");
        assert_eq!(
            json,
            serde_json::json!({"productId": "KCRwjF7lN97HnEaY", "qty": 3})
        );
    }
}
