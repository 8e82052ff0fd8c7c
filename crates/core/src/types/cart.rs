//! Cart entities and the pure merge/total functions.
//!
//! The backend owns the raw cart record; the client derives display state
//! from it. `merge` combines the raw record with the catalog and `cart_total`
//! aggregates the result. Both are pure: no I/O, same inputs same outputs,
//! safe to re-run whenever either collection changes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::product::Product;

/// Raw server cart record: one product and its quantity.
///
/// The backend is the source of truth for this collection, including whether
/// a zero quantity means "absent". Ordering is the server's and is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// ID of the product in the cart.
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    /// Absolute quantity. Non-negative.
    pub qty: u32,
}

/// Display-ready cart line: a [`CartEntry`] joined with its catalog product.
///
/// Derived and ephemeral - rebuilt from scratch by [`merge`] whenever the
/// catalog or the raw cart changes, never mutated in place. `product` is
/// `None` when the catalog has no matching product; that indicates a
/// consistency gap between catalog and cart (for example the cart arrived
/// before the catalog) and is corrected by the next re-merge.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    /// ID of the product this line refers to.
    pub product_id: ProductId,
    /// Quantity in the cart.
    pub quantity: u32,
    /// Full product data, when the catalog resolves the ID.
    pub product: Option<Product>,
}

impl CartItem {
    /// Product name, if resolved.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.product.as_ref().map(|p| p.name.as_str())
    }

    /// Unit cost, if resolved.
    #[must_use]
    pub fn cost(&self) -> Option<Decimal> {
        self.product.as_ref().map(|p| p.cost)
    }

    /// Image URL, if resolved.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.product.as_ref().map(|p| p.image_url.as_str())
    }

    /// Cost times quantity. An unresolved line contributes zero.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.cost()
            .map_or(Decimal::ZERO, |cost| cost * Decimal::from(self.quantity))
    }
}

/// Combine the raw cart record with the catalog into display-ready lines.
///
/// `None` means "no cart to show" (unauthenticated, or the fetch resolved to
/// nothing) and yields an empty vector. Every entry produces exactly one
/// item, in the server's order; the first catalog product with a matching ID
/// wins. Entries without a match still produce an item, with `product: None`.
#[must_use]
pub fn merge(entries: Option<&[CartEntry]>, catalog: &[Product]) -> Vec<CartItem> {
    let Some(entries) = entries else {
        return Vec::new();
    };

    entries
        .iter()
        .map(|entry| CartItem {
            product_id: entry.product_id.clone(),
            quantity: entry.qty,
            product: catalog
                .iter()
                .find(|product| product.id == entry.product_id)
                .cloned(),
        })
        .collect()
}

/// Total value of all cart lines. Empty carts total zero.
#[must_use]
pub fn cart_total(items: &[CartItem]) -> Decimal {
    items.iter().map(CartItem::line_total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, cost: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("product {id}"),
            category: "Misc".to_string(),
            cost: Decimal::from(cost),
            rating: 4,
            image_url: "https://example.com/img.jpg".to_string(),
        }
    }

    fn entry(id: &str, qty: u32) -> CartEntry {
        CartEntry {
            product_id: ProductId::new(id),
            qty,
        }
    }

    #[test]
    fn test_merge_no_cart_is_empty() {
        let catalog = vec![product("A", 10)];
        assert!(merge(None, &catalog).is_empty());
        assert!(merge(Some(&[]), &catalog).is_empty());
    }

    #[test]
    fn test_merge_preserves_length_and_order() {
        let catalog = vec![product("A", 10), product("B", 20)];
        let entries = vec![entry("B", 1), entry("A", 3)];

        let items = merge(Some(&entries), &catalog);

        assert_eq!(items.len(), entries.len());
        assert_eq!(items[0].product_id, ProductId::new("B"));
        assert_eq!(items[1].product_id, ProductId::new("A"));
        assert_eq!(items[1].quantity, 3);
        assert_eq!(items[0].cost(), Some(Decimal::from(20)));
    }

    #[test]
    fn test_merge_tolerates_unknown_product() {
        let catalog = vec![product("A", 10)];
        let entries = vec![entry("A", 1), entry("GONE", 2)];

        let items = merge(Some(&entries), &catalog);

        assert_eq!(items.len(), 2);
        assert!(items[0].product.is_some());
        assert!(items[1].product.is_none());
        assert_eq!(items[1].name(), None);
        assert_eq!(items[1].line_total(), Decimal::ZERO);
    }

    #[test]
    fn test_merge_against_empty_catalog() {
        // Cart record can arrive before the catalog is loaded; every line is
        // unresolved until the next re-merge.
        let entries = vec![entry("A", 3)];

        let items = merge(Some(&entries), &[]);

        assert_eq!(items.len(), 1);
        assert!(items[0].product.is_none());
        assert_eq!(cart_total(&items), Decimal::ZERO);
    }

    #[test]
    fn test_total_empty_is_zero() {
        assert_eq!(cart_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_total_sums_cost_times_qty() {
        let catalog = vec![product("A", 10), product("B", 25)];
        let entries = vec![entry("A", 3), entry("B", 2)];

        let items = merge(Some(&entries), &catalog);

        assert_eq!(cart_total(&items), Decimal::from(80));
    }

    #[test]
    fn test_total_skips_unmatched_entries() {
        let catalog = vec![product("A", 10)];
        let entries = vec![entry("A", 3), entry("GONE", 5)];

        let items = merge(Some(&entries), &catalog);

        assert_eq!(cart_total(&items), Decimal::from(30));
    }

    #[test]
    fn test_cart_entry_wire_shape() {
        let json = r#"[{"productId": "KCRwjF7lN97HnEaY", "qty": 3}]"#;
        let entries: Vec<CartEntry> = serde_json::from_str(json).expect("deserialize cart");
        assert_eq!(entries, vec![entry("KCRwjF7lN97HnEaY", 3)]);
    }
}
