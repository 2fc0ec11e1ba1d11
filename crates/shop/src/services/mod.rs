//! Screen-scoped state holders.
//!
//! Each holder is a single-owner value driven by the embedding
//! presentation layer: operations take `&mut self`, publish into plain
//! state cells, and are read back through accessors. There are no locks
//! and no shared mutable structures across holders - the only shared
//! authority is the process-wide [`SessionGate`], and every per-user
//! operation takes its [`cartwheel_core::UserId`] explicitly.
//!
//! One-shot notification flags (item removed, item added, profile saved)
//! are raised by operations and consumed exactly once via the
//! corresponding `acknowledge_*` call.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod details;
pub mod profile;
pub mod wishlist;

pub use auth::{SessionGate, SessionState};
pub use cart::CartState;
pub use catalog::CatalogState;
pub use details::ProductDetailsState;
pub use profile::ProfileState;
pub use wishlist::WishlistState;

/// Async status of a screen-scoped fetch.
///
/// `Idle` is the state before the first operation; every remote failure
/// lands in `Error` carrying the raw message, with no retry and no
/// classification.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

impl FetchState {
    /// Whether the last operation completed successfully.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Whether an operation is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}
