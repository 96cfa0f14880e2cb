//! Thunks: validated, orchestrated multi-step operations.
//!
//! A flow validates its input, runs the service call through the
//! [`Coordinator`](crate::store::Coordinator), reduces the result into the
//! store and re-fetches whatever collection the call changed.

mod auth;
mod buyer;
mod mechanic;
mod seller;

pub use auth::AuthFlows;
pub use buyer::BuyerFlows;
pub use mechanic::MechanicFlows;
pub use seller::SellerFlows;

/// Server-owned lists the client re-fetches instead of patching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Cart,
    Orders,
    Inspections,
    SellerProducts,
    SellerOrders,
    AvailableGigs,
    AssignedGigs,
}
