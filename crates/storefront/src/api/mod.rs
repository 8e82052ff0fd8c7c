//! Backend API clients.
//!
//! # Architecture
//!
//! - Plain JSON-over-HTTPS REST endpoints, base URL from configuration
//! - The backend is source of truth - no local sync, direct API calls
//! - In-memory caching via `moka` for the unfiltered catalog (TTL from
//!   configuration); search responses and cart state are never cached
//! - Error bodies have the shape `{"success": false, "message": "..."}`;
//!   the message is surfaced through [`ApiError::Status`]
//!
//! # Endpoints
//!
//! ## Catalog
//! - `GET /products` - full catalog, no auth
//! - `GET /products/search?value=<text>` - free-text subset, no auth
//!
//! ## Cart
//! - `GET /cart` - the user's raw cart record, Bearer auth
//! - `POST /cart` - absolute-quantity add/update, Bearer auth

mod cart;
mod catalog;

pub use cart::CartClient;
pub use catalog::CatalogClient;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to the backend API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Status {
        /// HTTP status code of the response.
        status: reqwest::StatusCode,
        /// Message extracted from the error body, or a truncated raw body.
        message: String,
    },
}

impl ApiError {
    /// The backend's own message, when it rejected the request (4xx).
    ///
    /// Server errors and transport failures return `None`; their details are
    /// for logs, not for users.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Status { status, message } if status.is_client_error() => Some(message),
            _ => None,
        }
    }
}

/// Error body shape used by the backend on failed requests.
#[derive(Debug, Deserialize)]
struct ApiFailure {
    message: String,
}

/// Decode a backend response, mapping non-success statuses to [`ApiError::Status`].
///
/// Reads the body as text first so a failure leaves something useful to log.
pub(crate) async fn decode_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = failure_message(&body);
        tracing::debug!(%status, message = %message, "backend returned non-success status");
        return Err(ApiError::Status { status, message });
    }

    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::error!(
                error = %e,
                body = %truncate(&body, 500),
                "failed to parse backend response"
            );
            Err(ApiError::Parse(e))
        }
    }
}

/// Extract the backend's message from an error body, falling back to the
/// (truncated) raw body when it isn't the expected shape.
fn failure_message(body: &str) -> String {
    serde_json::from_str::<ApiFailure>(body)
        .map_or_else(|_| truncate(body, 200), |failure| failure.message)
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
