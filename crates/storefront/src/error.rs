//! Unified error handling for the storefront engine.
//!
//! Provides a `StoreError` type covering every way a user action can fail,
//! plus the mapping from errors to the transient notices shown to the user.
//! Failures here are never fatal: the page stays interactive and keeps its
//! previous state.

use thiserror::Error;

use crate::api::ApiError;

/// Notice shown when an unauthenticated user tries to change the cart.
pub const LOGIN_REQUIRED_NOTICE: &str = "Login to add an item to the Cart";

/// Notice shown when the catalog "add" path hits a product already in the cart.
pub const DUPLICATE_ITEM_NOTICE: &str =
    "Item already in cart. Use the cart sidebar to update quantity or remove item.";

/// Generic notice for cart requests that failed without a backend message.
pub const CART_UNREACHABLE_NOTICE: &str =
    "Could not fetch cart details. Check that the backend is running, reachable and returns valid JSON.";

/// Generic notice for catalog requests that failed without a backend message.
pub const CATALOG_UNREACHABLE_NOTICE: &str =
    "Something went wrong. Check that the backend is running, reachable and returns valid JSON.";

/// Application-level error type for storefront operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The operation requires a logged-in session and none was supplied.
    #[error("login required to modify the cart")]
    Unauthenticated,

    /// The catalog "add" path was used for a product already in the cart.
    #[error("product is already in the cart")]
    DuplicateItem,

    /// A catalog request failed.
    #[error("catalog error: {0}")]
    Catalog(ApiError),

    /// A cart request failed.
    #[error("cart error: {0}")]
    Cart(ApiError),
}

impl StoreError {
    /// The transient notice text to surface for this error.
    ///
    /// Backend-rejected cart requests (4xx) carry the backend's own message;
    /// everything else falls back to a generic connectivity notice.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthenticated => LOGIN_REQUIRED_NOTICE.to_string(),
            Self::DuplicateItem => DUPLICATE_ITEM_NOTICE.to_string(),
            Self::Cart(err) => match err.backend_message() {
                Some(message) => message.to_string(),
                None => CART_UNREACHABLE_NOTICE.to_string(),
            },
            Self::Catalog(err) => match err.backend_message() {
                Some(message) => message.to_string(),
                None => CATALOG_UNREACHABLE_NOTICE.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Unauthenticated;
        assert_eq!(err.to_string(), "login required to modify the cart");

        let err = StoreError::DuplicateItem;
        assert_eq!(err.to_string(), "product is already in the cart");
    }

    #[test]
    fn test_precondition_notices() {
        assert_eq!(
            StoreError::Unauthenticated.user_message(),
            LOGIN_REQUIRED_NOTICE
        );
        assert_eq!(
            StoreError::DuplicateItem.user_message(),
            DUPLICATE_ITEM_NOTICE
        );
    }

    #[test]
    fn test_cart_client_error_surfaces_backend_message() {
        let err = StoreError::Cart(ApiError::Status {
            status: reqwest::StatusCode::BAD_REQUEST,
            message: "Protected route, Oauth2 Bearer token not found".to_string(),
        });
        assert_eq!(
            err.user_message(),
            "Protected route, Oauth2 Bearer token not found"
        );
    }

    #[test]
    fn test_cart_server_error_is_generic() {
        let err = StoreError::Cart(ApiError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            message: "boom".to_string(),
        });
        assert_eq!(err.user_message(), CART_UNREACHABLE_NOTICE);
    }
}
