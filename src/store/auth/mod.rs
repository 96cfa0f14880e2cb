//! Who is signed in.

mod intent;
mod reducer;
mod state;

pub use intent::AuthIntent;
pub use reducer::AuthReducer;
pub use state::{AuthSliceState, AuthStatus};
