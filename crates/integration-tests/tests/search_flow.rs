//! End-to-end tests for debounced search against the mock backend.

use std::time::Duration;

use rust_decimal::Decimal;

use swiftcart_core::{CartEntry, ProductId};
use swiftcart_integration_tests::{TestBackend, init_tracing, sample_catalog};
use swiftcart_storefront::products::ProductsPage;

fn entry(id: &str, qty: u32) -> CartEntry {
    CartEntry {
        product_id: ProductId::new(id),
        qty,
    }
}

const PHONE_ID: &str = "v4sLtEcMpzabRyfx";

#[tokio::test]
async fn test_keystroke_burst_issues_single_backend_query() {
    init_tracing();
    let backend = TestBackend::start(sample_catalog()).await;

    // Short real-clock debounce; the keystrokes below land well inside it.
    let mut config = backend.config();
    config.search_debounce = Duration::from_millis(150);

    let mut page = ProductsPage::new(&config);
    page.load(None).await;

    for text in ["p", "ph", "pho", "phones"] {
        page.on_search_input(text);
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    page.process_next_search().await;

    assert_eq!(backend.searches(), 1);
    assert_eq!(backend.search_queries(), vec!["phones".to_string()]);
    assert_eq!(page.catalog().len(), 1);
    assert_eq!(page.catalog()[0].name, "iPhone XR");
}

#[tokio::test]
async fn test_search_replaces_catalog_and_remerges_cart() {
    init_tracing();
    let backend = TestBackend::start(sample_catalog()).await;
    backend.set_cart(vec![entry(PHONE_ID, 2)]);
    let session = backend.session();

    let mut page = ProductsPage::new(&backend.config());
    page.load(Some(&session)).await;
    assert_eq!(page.total(), Decimal::from(200));

    // A search whose results still contain the carted product keeps the
    // line resolved.
    page.apply_search("phones").await;
    assert_eq!(page.catalog().len(), 1);
    assert_eq!(page.cart_items().len(), 1);
    assert_eq!(page.cart_items()[0].name(), Some("iPhone XR"));

    // A search that filters it out leaves the line unresolved until the
    // catalog covers it again.
    page.apply_search("sports").await;
    assert_eq!(page.cart_items().len(), 1);
    assert!(page.cart_items()[0].product.is_none());
    assert_eq!(page.total(), Decimal::ZERO);
}

#[tokio::test]
async fn test_zero_match_search_shows_empty_catalog() {
    init_tracing();
    let backend = TestBackend::start(sample_catalog()).await;

    let mut page = ProductsPage::new(&backend.config());
    page.load(None).await;

    page.apply_search("no such product anywhere").await;

    assert!(page.catalog().is_empty());
    assert!(!page.is_loading());
}

#[tokio::test]
async fn test_failed_search_is_indistinguishable_from_zero_matches() {
    init_tracing();
    let backend = TestBackend::start(sample_catalog()).await;
    backend.set_fail_search(true);

    let mut page = ProductsPage::new(&backend.config());
    page.load(None).await;
    assert_eq!(page.catalog().len(), 3);

    page.apply_search("phones").await;

    // The 500 degrades to an empty result set; no notice is raised.
    assert_eq!(backend.searches(), 1);
    assert!(page.catalog().is_empty());
    assert!(page.take_notices().is_empty());
}

#[tokio::test]
async fn test_separated_searches_each_reach_the_backend() {
    init_tracing();
    let backend = TestBackend::start(sample_catalog()).await;

    let mut config = backend.config();
    config.search_debounce = Duration::from_millis(20);

    let mut page = ProductsPage::new(&config);
    page.load(None).await;

    page.on_search_input("sports");
    page.process_next_search().await;
    page.on_search_input("fashion");
    page.process_next_search().await;

    assert_eq!(backend.searches(), 2);
    assert_eq!(
        backend.search_queries(),
        vec!["sports".to_string(), "fashion".to_string()]
    );
    assert_eq!(page.catalog().len(), 1);
    assert_eq!(page.catalog()[0].category, "Fashion");
}
