//! Request shaping for each backend area.
//!
//! Services hold no state and make no decisions: each method is one REST
//! call with its path and payload.

mod auth;
mod buyer;
mod mechanic;
mod seller;

pub use auth::AuthService;
pub use buyer::{BuyerService, CheckoutReceipt, ProductFilter};
pub use mechanic::MechanicService;
pub use seller::SellerService;
