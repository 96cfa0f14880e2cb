//! State/intent/reducer primitives every store slice is built from.
//!
//! ```text
//! flow ──dispatch──→ Intent ──→ Reducer ──→ SliceState ──→ subscribers
//! ```
//!
//! Reducers never perform I/O. Anything asynchronous happens in a flow,
//! which reports its outcome back as an intent.

/// Something that happened: a user action, a settled request, or loader
/// bookkeeping from the coordinator.
pub trait Intent: Send + 'static {}

/// A slice of client state. Snapshots are cloned out to subscribers and
/// compared to detect changes.
pub trait SliceState: Clone + PartialEq + Default + Send + Sync + 'static {}

/// Pure `(State, Intent) -> State` transition. The only place a slice
/// changes.
pub trait Reducer {
    type State: SliceState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;

    /// Applies `intents` in order.
    fn reduce_all(
        state: Self::State,
        intents: impl IntoIterator<Item = Self::Intent>,
    ) -> Self::State {
        intents.into_iter().fold(state, Self::reduce)
    }
}
