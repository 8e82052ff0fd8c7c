//! Swiftcart Core - Shared types and cart math.
//!
//! This crate provides the domain types used across the Swiftcart components:
//! - `storefront` - The client engine talking to the backend API
//! - `integration-tests` - End-to-end tests against a mock backend
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no async. This keeps it lightweight and allows it to be used
//! anywhere, including synchronous test code.
//!
//! # Modules
//!
//! - [`types`] - Catalog and cart entities, plus the merge and total functions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
