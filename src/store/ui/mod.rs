//! Transient presentation state: loaders, the status modal and the tour.
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - loader slots and modal descriptor
//! - `intent.rs` - acquire/release and show/dismiss actions
//! - `reducer.rs` - state transitions

mod intent;
mod reducer;
mod state;

pub use intent::UiIntent;
pub use reducer::UiReducer;
pub use state::{LoaderKey, LoaderSlot, OpId, StatusKind, StatusModal, UiSliceState};
