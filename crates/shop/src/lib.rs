//! Cartwheel Shop library.
//!
//! The headless service core of a small shop: a document-store-backed
//! catalog, a per-user cart with an explicit reconciliation log, a wishlist,
//! user profiles, and a session gate that owns authentication state.
//!
//! # Architecture
//!
//! - The remote document store is the durable owner of every persisted
//!   entity; services hold transient, screen-scoped copies.
//! - Screen-scoped state holders ([`services`]) are single-owner values
//!   driven by the embedding presentation layer; they publish results into
//!   plain state cells read through accessors.
//! - All per-user operations take the [`cartwheel_core::UserId`] explicitly;
//!   the only ambient authority is the [`services::SessionGate`].
//!
//! This crate exposes no HTTP surface of its own - the presentation layer
//! (mobile client, web frontend) is an external consumer.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod models;
pub mod repo;
pub mod services;
pub mod state;
pub mod store;
pub mod telemetry;
