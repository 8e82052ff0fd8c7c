//! Core types for Swiftcart.
//!
//! Catalog and cart entities in the backend's wire shapes, plus the pure
//! functions that derive display-ready cart state from them.

pub mod cart;
pub mod id;
pub mod product;

pub use cart::{CartEntry, CartItem, cart_total, merge};
pub use id::*;
pub use product::Product;
