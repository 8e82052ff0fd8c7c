//! Cart mutation orchestration.
//!
//! All cart quantity changes go through [`CartMutator::add_or_update`]: it
//! enforces the preconditions (a session, the duplicate-add policy), submits
//! exactly one absolute-quantity update, and re-derives the display state
//! from the server's response. There is no optimistic local mutation - until
//! the backend confirms, nothing changes.

use swiftcart_core::{CartEntry, CartItem, Product, ProductId, merge};

use crate::api::CartClient;
use crate::error::StoreError;
use crate::session::Session;

/// How to treat a product that already has a cart line.
///
/// The catalog's "Add to cart" button uses [`Reject`](Self::Reject) so a
/// second click points the user at the cart view instead of silently bumping
/// the quantity. The cart view's own +/- controls use
/// [`AllowUpdate`](Self::AllowUpdate) - adjusting an existing line is always
/// permitted there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Refuse the update if the product is already in the cart.
    Reject,
    /// Permit quantity changes for existing lines.
    AllowUpdate,
}

/// The confirmed outcome of a cart mutation: the backend's full updated
/// record plus the re-merged display lines.
#[derive(Debug, Clone)]
pub struct CartRefresh {
    /// Raw entries as returned by the backend.
    pub entries: Vec<CartEntry>,
    /// Entries merged against the catalog the caller supplied.
    pub items: Vec<CartItem>,
}

/// Whether a product already has a line in the merged cart.
#[must_use]
pub fn is_item_in_cart(items: &[CartItem], product_id: &ProductId) -> bool {
    items.iter().any(|item| item.product_id == *product_id)
}

/// The single authorized path through which cart quantities change.
#[derive(Clone)]
pub struct CartMutator {
    client: CartClient,
}

impl CartMutator {
    /// Create a mutator over the given cart client.
    #[must_use]
    pub const fn new(client: CartClient) -> Self {
        Self { client }
    }

    /// Add a product to the cart or set an existing line to a new quantity.
    ///
    /// `desired_qty` is absolute: decrementing means the caller computes
    /// `current - 1` and a decrement to zero is submitted as zero, leaving
    /// removal semantics to the backend.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Unauthenticated`] without a session; no request is sent.
    /// - [`StoreError::DuplicateItem`] when `policy` is
    ///   [`DuplicatePolicy::Reject`] and the product is already in
    ///   `current_items`; no request is sent.
    /// - [`StoreError::Cart`] when the backend rejects the update (e.g. 404
    ///   for an unknown product); the caller keeps its previous state.
    pub async fn add_or_update(
        &self,
        session: Option<&Session>,
        current_items: &[CartItem],
        catalog: &[Product],
        product_id: &ProductId,
        desired_qty: u32,
        policy: DuplicatePolicy,
    ) -> Result<CartRefresh, StoreError> {
        let Some(session) = session else {
            return Err(StoreError::Unauthenticated);
        };

        if policy == DuplicatePolicy::Reject && is_item_in_cart(current_items, product_id) {
            return Err(StoreError::DuplicateItem);
        }

        let entries = self
            .client
            .submit_quantity(session, product_id, desired_qty)
            .await
            .map_err(StoreError::Cart)?;

        let items = merge(Some(&entries), catalog);
        Ok(CartRefresh { entries, items })
    }
}
