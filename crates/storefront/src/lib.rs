//! Swiftcart Storefront - client engine for the backend API.
//!
//! This crate keeps a locally-rendered storefront consistent with the
//! server-owned catalog and cart:
//!
//! - [`api`] - HTTP clients for the catalog and cart endpoints
//! - [`cart`] - the single authorized path through which cart quantities change
//! - [`search`] - debounced catalog search
//! - [`products`] - the page state owner wiring the above together
//!
//! Rendering, routing and credential storage are the host application's
//! concern; everything here takes an explicit [`session::Session`] instead of
//! reading ambient state.
//!
//! # Example
//!
//! ```rust,ignore
//! use swiftcart_storefront::config::StorefrontConfig;
//! use swiftcart_storefront::products::ProductsPage;
//!
//! let config = StorefrontConfig::from_env()?;
//! let mut page = ProductsPage::new(&config);
//! page.load(session.as_ref()).await;
//! println!("cart total: {}", page.total());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod config;
pub mod error;
pub mod products;
pub mod search;
pub mod session;
