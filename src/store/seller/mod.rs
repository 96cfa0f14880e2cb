//! Seller dashboard state: own listings and incoming orders.

mod intent;
mod reducer;
mod state;

pub use intent::SellerIntent;
pub use reducer::SellerReducer;
pub use state::SellerSliceState;
