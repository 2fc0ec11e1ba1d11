//! Cartwheel Core - Shared types library.
//!
//! This crate provides common types used across all Cartwheel components:
//! - `shop` - Headless shop services (catalog, cart, wishlist, sessions)
//! - `integration-tests` - End-to-end flows over the in-memory backends
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no document-store access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and quantities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
