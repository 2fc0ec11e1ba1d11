//! Domain models persisted in (or derived from) the document store.
//!
//! These are serde document types separate from the transport layer. The
//! remote document store is the durable owner of every persisted model;
//! services hold transient copies scoped to the current screen or session.

pub mod cart;
pub mod product;
pub mod user;

pub use cart::{CartItem, MergedCartEntry};
pub use product::{Product, Rating};
pub use user::{LikedItem, UserProfile};
