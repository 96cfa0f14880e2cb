//! Mechanic gig board: open gigs and the ones this mechanic took.

mod intent;
mod reducer;
mod state;

pub use intent::MechanicIntent;
pub use reducer::MechanicReducer;
pub use state::MechanicSliceState;
