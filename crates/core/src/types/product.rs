//! Catalog product entity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;

/// A purchasable product as supplied by the backend catalog.
///
/// The client holds a read-only cached copy; the whole catalog is replaced
/// wholesale on every fetch. Field names follow the backend's JSON shape
/// (`_id`, `image`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// The name or title of the product.
    pub name: String,
    /// The category the product belongs to.
    pub category: String,
    /// The price to buy the product. Non-negative.
    pub cost: Decimal,
    /// Aggregate rating, an integer out of five.
    pub rating: u8,
    /// URL for the product image.
    #[serde(rename = "image")]
    pub image_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_wire_shape() {
        let json = r#"{
            "name": "iPhone XR",
            "category": "Phones",
            "cost": 100,
            "rating": 4,
            "image": "https://i.imgur.com/lulqWzW.jpg",
            "_id": "v4sLtEcMpzabRyfx"
        }"#;

        let product: Product = serde_json::from_str(json).expect("deserialize product");
        assert_eq!(product.id, ProductId::new("v4sLtEcMpzabRyfx"));
        assert_eq!(product.name, "iPhone XR");
        assert_eq!(product.category, "Phones");
        assert_eq!(product.cost, Decimal::from(100));
        assert_eq!(product.rating, 4);
        assert_eq!(product.image_url, "https://i.imgur.com/lulqWzW.jpg");
    }

    #[test]
    fn test_product_fractional_cost() {
        let json = r#"{
            "name": "Basketball",
            "category": "Sports",
            "cost": 49.5,
            "rating": 5,
            "image": "https://i.imgur.com/lulqWzW.jpg",
            "_id": "upLK9JbQ4rMhTwt4"
        }"#;

        let product: Product = serde_json::from_str(json).expect("deserialize product");
        assert_eq!(product.cost, Decimal::new(495, 1));
    }
}
