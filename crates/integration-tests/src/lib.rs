//! Integration tests for Swiftcart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p swiftcart-integration-tests
//! ```
//!
//! # Harness
//!
//! [`TestBackend`] is an in-process mock of the backend API built on `axum`,
//! bound to an ephemeral port. It serves the four REST routes with the
//! backend's documented JSON shapes, tracks per-route hit counts (so tests
//! can assert that a precondition failure sent *no* request), records search
//! queries and submitted quantities, and holds a mutable cart record with
//! the backend's absolute-quantity semantics.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

use swiftcart_core::{CartEntry, Product, ProductId};
use swiftcart_storefront::config::StorefrontConfig;
use swiftcart_storefront::session::Session;

/// Bearer token the mock backend accepts.
pub const TEST_TOKEN: &str = "integration-test-token";

/// Message returned for requests with a missing or unknown token.
pub const BAD_TOKEN_MESSAGE: &str = "Protected route, Oauth2 Bearer token not found";

/// Message returned for cart updates naming an unknown product.
pub const UNKNOWN_PRODUCT_MESSAGE: &str = "Product doesn't exist";

/// Initialize test logging once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A small catalog matching the backend's documented product shape.
#[must_use]
pub fn sample_catalog() -> Vec<Product> {
    let fixtures = [
        ("v4sLtEcMpzabRyfx", "iPhone XR", "Phones", 100, 4),
        ("upLK9JbQ4rMhTwt4", "Basketball", "Sports", 50, 5),
        ("TwMM4OAhmK0VQ93S", "UNIFACTOR Mens Running Shoes", "Fashion", 50, 5),
    ];

    fixtures
        .into_iter()
        .map(|(id, name, category, cost, rating)| Product {
            id: ProductId::new(id),
            name: name.to_string(),
            category: category.to_string(),
            cost: cost.into(),
            rating,
            image_url: "https://i.imgur.com/lulqWzW.jpg".to_string(),
        })
        .collect()
}

struct BackendState {
    products: Vec<Product>,
    cart: Mutex<Vec<CartEntry>>,
    fail_search: AtomicBool,
    catalog_fetches: AtomicUsize,
    searches: AtomicUsize,
    cart_fetches: AtomicUsize,
    cart_submits: AtomicUsize,
    search_queries: Mutex<Vec<String>>,
    submitted: Mutex<Vec<(String, u32)>>,
}

/// In-process mock backend bound to an ephemeral port.
pub struct TestBackend {
    state: Arc<BackendState>,
    addr: SocketAddr,
    server: JoinHandle<()>,
}

impl TestBackend {
    /// Start the backend serving the given catalog.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot bind (test environment failure).
    pub async fn start(products: Vec<Product>) -> Self {
        let state = Arc::new(BackendState {
            products,
            cart: Mutex::new(Vec::new()),
            fail_search: AtomicBool::new(false),
            catalog_fetches: AtomicUsize::new(0),
            searches: AtomicUsize::new(0),
            cart_fetches: AtomicUsize::new(0),
            cart_submits: AtomicUsize::new(0),
            search_queries: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/products", get(list_products))
            .route("/products/search", get(search_products))
            .route("/cart", get(fetch_cart).post(submit_cart))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");

        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock backend");
        });

        Self {
            state,
            addr,
            server,
        }
    }

    /// Base URL for client configuration.
    ///
    /// # Panics
    ///
    /// Panics if the bound address does not form a valid URL (cannot happen).
    #[must_use]
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}/", self.addr)).expect("backend base url")
    }

    /// A storefront configuration pointed at this backend, default timings.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig::new(self.base_url())
    }

    /// A session the backend accepts.
    #[must_use]
    pub fn session(&self) -> Session {
        Session::new("integration", TEST_TOKEN)
    }

    /// A session carrying a token the backend rejects with 401.
    #[must_use]
    pub fn expired_session(&self) -> Session {
        Session::new("integration", "expired-token")
    }

    /// Replace the server-side cart record.
    pub fn set_cart(&self, entries: Vec<CartEntry>) {
        *self.state.cart.lock().expect("cart lock") = entries;
    }

    /// Current server-side cart record.
    #[must_use]
    pub fn cart_snapshot(&self) -> Vec<CartEntry> {
        self.state.cart.lock().expect("cart lock").clone()
    }

    /// Make every subsequent search request fail with a 500.
    pub fn set_fail_search(&self, fail: bool) {
        self.state.fail_search.store(fail, Ordering::SeqCst);
    }

    /// Number of `GET /products` hits.
    #[must_use]
    pub fn catalog_fetches(&self) -> usize {
        self.state.catalog_fetches.load(Ordering::SeqCst)
    }

    /// Number of `GET /products/search` hits.
    #[must_use]
    pub fn searches(&self) -> usize {
        self.state.searches.load(Ordering::SeqCst)
    }

    /// Number of `GET /cart` hits.
    #[must_use]
    pub fn cart_fetches(&self) -> usize {
        self.state.cart_fetches.load(Ordering::SeqCst)
    }

    /// Number of `POST /cart` hits.
    #[must_use]
    pub fn cart_submits(&self) -> usize {
        self.state.cart_submits.load(Ordering::SeqCst)
    }

    /// Search query texts in arrival order.
    #[must_use]
    pub fn search_queries(&self) -> Vec<String> {
        self.state.search_queries.lock().expect("queries lock").clone()
    }

    /// Submitted `(productId, qty)` pairs in arrival order.
    #[must_use]
    pub fn submitted(&self) -> Vec<(String, u32)> {
        self.state.submitted.lock().expect("submits lock").clone()
    }
}

impl Drop for TestBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

// =============================================================================
// Route Handlers
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct SubmitBody {
    #[serde(rename = "productId")]
    product_id: String,
    qty: u32,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Bearer {TEST_TOKEN}"))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"success": false, "message": BAD_TOKEN_MESSAGE})),
    )
        .into_response()
}

async fn list_products(State(state): State<Arc<BackendState>>) -> Response {
    state.catalog_fetches.fetch_add(1, Ordering::SeqCst);
    Json(state.products.clone()).into_response()
}

async fn search_products(
    State(state): State<Arc<BackendState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    state.searches.fetch_add(1, Ordering::SeqCst);
    state
        .search_queries
        .lock()
        .expect("queries lock")
        .push(params.value.clone());

    if state.fail_search.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "success": false,
                "message": "Something went wrong. Check the backend console for more details"
            })),
        )
            .into_response();
    }

    let needle = params.value.to_lowercase();
    let matches: Vec<Product> = state
        .products
        .iter()
        .filter(|product| {
            product.name.to_lowercase().contains(&needle)
                || product.category.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    Json(matches).into_response()
}

async fn fetch_cart(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    state.cart_fetches.fetch_add(1, Ordering::SeqCst);

    if !authorized(&headers) {
        return unauthorized();
    }

    Json(state.cart.lock().expect("cart lock").clone()).into_response()
}

async fn submit_cart(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Json(body): Json<SubmitBody>,
) -> Response {
    state.cart_submits.fetch_add(1, Ordering::SeqCst);

    if !authorized(&headers) {
        return unauthorized();
    }

    state
        .submitted
        .lock()
        .expect("submits lock")
        .push((body.product_id.clone(), body.qty));

    if !state
        .products
        .iter()
        .any(|product| product.id.as_str() == body.product_id)
    {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "message": UNKNOWN_PRODUCT_MESSAGE})),
        )
            .into_response();
    }

    let mut cart = state.cart.lock().expect("cart lock");
    let product_id = ProductId::new(body.product_id);

    // Absolute quantity; zero removes the line. Existing lines keep their
    // position - the record's ordering is the server's.
    if body.qty == 0 {
        cart.retain(|entry| entry.product_id != product_id);
    } else if let Some(entry) = cart.iter_mut().find(|entry| entry.product_id == product_id) {
        entry.qty = body.qty;
    } else {
        cart.push(CartEntry {
            product_id,
            qty: body.qty,
        });
    }

    Json(cart.clone()).into_response()
}
