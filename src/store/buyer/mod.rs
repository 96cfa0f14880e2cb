//! Buyer-side state: catalog, cart, orders and inspection requests.
//!
//! Collections are server snapshots. The reducer only replaces them with a
//! newer snapshot or flips the status of a single entry to what the server
//! returned; it never adds, removes or reorders entries on its own.

mod intent;
mod reducer;
mod state;

pub use intent::BuyerIntent;
pub use reducer::BuyerReducer;
pub use state::{BuyerSliceState, CartPhase};
