//! Products page state: catalog, cart and search wired together.
//!
//! [`ProductsPage`] owns every piece of shared mutable state - the catalog
//! cache, the raw cart record, the merged display lines, the loading flag
//! and the pending debounce handle - and is the only place that mutates
//! them. All mutation happens between awaits of its own methods, on a single
//! logical task; debounce timers are the only spawned tasks and they
//! communicate exclusively by sending the captured query text back over a
//! channel. No locks needed.

use rust_decimal::Decimal;
use tokio::sync::mpsc;
use tracing::{error, warn};

use swiftcart_core::{CartEntry, CartItem, Product, ProductId, cart_total, merge};

use crate::api::{CartClient, CatalogClient};
use crate::cart::{CartMutator, DuplicatePolicy};
use crate::config::StorefrontConfig;
use crate::error::StoreError;
use crate::search::{self, DebounceHandle};
use crate::session::Session;

/// State owner for the products page.
///
/// The displayed cart is always `merge(catalog, cart_entries)`; every event
/// that changes either input ends with an explicit re-merge. The cart record
/// may arrive before the catalog does - the merge tolerates that and the
/// unresolved lines heal on the next re-merge.
pub struct ProductsPage {
    catalog_client: CatalogClient,
    cart_client: CartClient,
    mutator: CartMutator,
    search_debounce: std::time::Duration,

    catalog: Vec<Product>,
    cart_entries: Option<Vec<CartEntry>>,
    cart_items: Vec<CartItem>,
    loading: bool,

    debounce: Option<DebounceHandle>,
    queries_tx: mpsc::UnboundedSender<String>,
    queries_rx: mpsc::UnboundedReceiver<String>,

    notices: Vec<String>,
}

impl ProductsPage {
    /// Create the page state with clients built from configuration.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        let (queries_tx, queries_rx) = mpsc::unbounded_channel();
        let cart_client = CartClient::new(config);

        Self {
            catalog_client: CatalogClient::new(config),
            mutator: CartMutator::new(cart_client.clone()),
            cart_client,
            search_debounce: config.search_debounce,
            catalog: Vec::new(),
            cart_entries: None,
            cart_items: Vec::new(),
            loading: false,
            debounce: None,
            queries_tx,
            queries_rx,
            notices: Vec::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The currently displayed catalog (full or filtered).
    #[must_use]
    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    /// The merged, display-ready cart lines.
    #[must_use]
    pub fn cart_items(&self) -> &[CartItem] {
        &self.cart_items
    }

    /// Whether a catalog request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Total value of the displayed cart.
    #[must_use]
    pub fn total(&self) -> Decimal {
        cart_total(&self.cart_items)
    }

    /// Drain the queued user-visible notices (toast texts).
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Initial page load: fetch the catalog, then the cart, then merge.
    ///
    /// A failed catalog fetch keeps whatever catalog was displayed before
    /// (initially empty); the page stays interactive either way.
    pub async fn load(&mut self, session: Option<&Session>) {
        self.loading = true;
        match self.catalog_client.fetch_all().await {
            Ok(products) => self.catalog = products,
            Err(err) => error!(error = %err, "catalog fetch failed"),
        }
        self.loading = false;

        self.refresh_cart(session).await;
    }

    /// Re-fetch the raw cart record and re-merge.
    ///
    /// Without a session there is no server cart and no request is made.
    /// Any fetch failure resolves to "no cart" with a notice: the backend's
    /// own message for 4xx, a generic connectivity notice otherwise.
    pub async fn refresh_cart(&mut self, session: Option<&Session>) {
        self.cart_entries = match session {
            None => None,
            Some(session) => match self.cart_client.fetch_cart(session).await {
                Ok(entries) => Some(entries),
                Err(err) => {
                    warn!(error = %err, "cart fetch failed");
                    self.notices.push(StoreError::Cart(err).user_message());
                    None
                }
            },
        };

        self.recompute_cart_items();
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Record a keystroke in the search box.
    ///
    /// The previous pending query (if any) is cancelled and `text` is
    /// scheduled in its place; only the last keystroke of a burst produces a
    /// catalog request.
    pub fn on_search_input(&mut self, text: &str) {
        self.debounce = Some(search::debounce(
            self.debounce.take(),
            text.to_string(),
            self.search_debounce,
            &self.queries_tx,
        ));
    }

    /// Wait for the next debounced query text.
    ///
    /// Pends until a scheduled delivery fires; the host's event loop selects
    /// over this alongside its other inputs.
    pub async fn next_search(&mut self) -> Option<String> {
        self.queries_rx.recv().await
    }

    /// Execute a search query and replace the catalog with its result.
    ///
    /// Failures degrade to an empty result set - on screen this reads as
    /// "no products found", indistinguishable from a genuine zero-match
    /// search.
    pub async fn apply_search(&mut self, query: &str) {
        self.loading = true;
        let catalog = match self.catalog_client.fetch_filtered(query).await {
            Ok(products) => products,
            Err(err) => {
                warn!(error = %err, "search failed; rendering empty result set");
                Vec::new()
            }
        };
        self.catalog = catalog;
        self.loading = false;

        self.recompute_cart_items();
    }

    /// Await the next debounced query and execute it.
    pub async fn process_next_search(&mut self) {
        if let Some(query) = self.next_search().await {
            self.apply_search(&query).await;
        }
    }

    // =========================================================================
    // Cart Mutation
    // =========================================================================

    /// Add a product or set a line's quantity through the mutator.
    ///
    /// Precondition failures (no session, duplicate add) become user
    /// notices; backend rejections are logged and the previous cart state
    /// stays displayed - nothing was applied locally, so there is nothing to
    /// roll back.
    pub async fn add_to_cart(
        &mut self,
        session: Option<&Session>,
        product_id: &ProductId,
        desired_qty: u32,
        policy: DuplicatePolicy,
    ) {
        let result = self
            .mutator
            .add_or_update(
                session,
                &self.cart_items,
                &self.catalog,
                product_id,
                desired_qty,
                policy,
            )
            .await;

        match result {
            Ok(refresh) => {
                self.cart_entries = Some(refresh.entries);
                self.cart_items = refresh.items;
            }
            Err(err @ (StoreError::Unauthenticated | StoreError::DuplicateItem)) => {
                self.notices.push(err.user_message());
            }
            Err(err) => error!(error = %err, "cart update failed"),
        }
    }

    /// Bump an existing line's quantity by one (cart view "+" control).
    pub async fn increment(&mut self, session: Option<&Session>, product_id: &ProductId) {
        let desired = self.current_quantity(product_id) + 1;
        self.add_to_cart(session, product_id, desired, DuplicatePolicy::AllowUpdate)
            .await;
    }

    /// Lower an existing line's quantity by one (cart view "-" control).
    ///
    /// A decrement at quantity one submits zero; whether that removes the
    /// line is the backend's call.
    pub async fn decrement(&mut self, session: Option<&Session>, product_id: &ProductId) {
        let desired = self.current_quantity(product_id).saturating_sub(1);
        self.add_to_cart(session, product_id, desired, DuplicatePolicy::AllowUpdate)
            .await;
    }

    fn current_quantity(&self, product_id: &ProductId) -> u32 {
        self.cart_items
            .iter()
            .find(|item| item.product_id == *product_id)
            .map_or(0, |item| item.quantity)
    }

    /// Rebuild the merged cart lines from the current catalog and entries.
    ///
    /// Called deliberately after every event that changes either input;
    /// there is no implicit dependency tracking.
    fn recompute_cart_items(&mut self) {
        self.cart_items = merge(self.cart_entries.as_deref(), &self.catalog);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use url::Url;

    use crate::error::LOGIN_REQUIRED_NOTICE;

    fn page() -> ProductsPage {
        // Discard-port address: these tests only exercise paths that must
        // not touch the network.
        #[allow(clippy::unwrap_used)]
        let config = StorefrontConfig::new(Url::parse("http://127.0.0.1:9/api/v1").unwrap());
        ProductsPage::new(&config)
    }

    #[tokio::test]
    async fn test_add_without_session_surfaces_login_notice() {
        let mut page = page();

        page.add_to_cart(None, &ProductId::new("A"), 1, DuplicatePolicy::Reject)
            .await;

        assert_eq!(page.take_notices(), vec![LOGIN_REQUIRED_NOTICE.to_string()]);
        assert!(page.cart_items().is_empty());
        // Draining is one-shot.
        assert!(page.take_notices().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_input_debounces_to_last_text() {
        let mut page = page();

        for text in ["x", "xb", "xbo", "xbox"] {
            page.on_search_input(text);
            tokio::time::advance(Duration::from_millis(100)).await;
        }

        assert_eq!(page.next_search().await.as_deref(), Some("xbox"));
    }

    #[test]
    fn test_fresh_page_is_empty() {
        let page = page();
        assert!(page.catalog().is_empty());
        assert!(page.cart_items().is_empty());
        assert!(!page.is_loading());
        assert_eq!(page.total(), Decimal::ZERO);
    }
}
