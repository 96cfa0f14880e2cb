use crate::store::mvi::Reducer;

use super::intent::UiIntent;
use super::state::{LoaderSlot, UiSliceState};

pub struct UiReducer;

impl Reducer for UiReducer {
    type State = UiSliceState;
    type Intent = UiIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            UiIntent::LoaderAcquired { op, key } => {
                state.loaders.push(LoaderSlot { op, key });
            }
            UiIntent::LoaderReleased { op } => {
                state.loaders.retain(|slot| slot.op != op);
            }
            UiIntent::ShowStatus(modal) => {
                state.status_modal = Some(modal);
            }
            UiIntent::DismissStatus => {
                state.status_modal = None;
            }
            UiIntent::SetTourOpen(open) => {
                state.tour_open = open;
            }
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ui::{LoaderKey, OpId, StatusKind, StatusModal};

    fn acquire(state: UiSliceState, op: u64, key: LoaderKey) -> UiSliceState {
        UiReducer::reduce(state, UiIntent::LoaderAcquired { op: OpId(op), key })
    }

    #[test]
    fn acquire_then_release_clears_loader() {
        let state = acquire(UiSliceState::default(), 1, LoaderKey::Cart);
        assert_eq!(state.active_loader(), Some(LoaderKey::Cart));

        let state = UiReducer::reduce(state, UiIntent::LoaderReleased { op: OpId(1) });
        assert_eq!(state.active_loader(), None);
    }

    #[test]
    fn early_finisher_does_not_hide_other_loader() {
        let state = acquire(UiSliceState::default(), 1, LoaderKey::Cart);
        let state = acquire(state, 2, LoaderKey::Orders);

        let state = UiReducer::reduce(state, UiIntent::LoaderReleased { op: OpId(2) });
        assert_eq!(state.active_loader(), Some(LoaderKey::Cart));

        let state = UiReducer::reduce(state, UiIntent::LoaderReleased { op: OpId(1) });
        assert_eq!(state.in_flight(), 0);
    }

    #[test]
    fn releasing_unknown_op_is_noop() {
        let state = acquire(UiSliceState::default(), 1, LoaderKey::Cart);
        let state = UiReducer::reduce(state, UiIntent::LoaderReleased { op: OpId(9) });
        assert_eq!(state.in_flight(), 1);
    }

    #[test]
    fn status_modal_show_and_dismiss() {
        let state = UiReducer::reduce(
            UiSliceState::default(),
            UiIntent::ShowStatus(StatusModal::error("Checkout failed", "Out of stock")),
        );
        let modal = state.status_modal().unwrap();
        assert_eq!(modal.kind, StatusKind::Error);
        assert_eq!(modal.message, "Out of stock");

        let state = UiReducer::reduce(state, UiIntent::DismissStatus);
        assert!(state.status_modal().is_none());
    }

    #[test]
    fn newer_status_replaces_older() {
        let state = UiReducer::reduce(
            UiSliceState::default(),
            UiIntent::ShowStatus(StatusModal::success("Order placed", "Order #abc123")),
        );
        let state = UiReducer::reduce(
            state,
            UiIntent::ShowStatus(StatusModal::error("Network error", "Try again")),
        );
        assert_eq!(state.status_modal().unwrap().title, "Network error");
    }

    #[test]
    fn tour_flag_toggles() {
        let state = UiReducer::reduce(UiSliceState::default(), UiIntent::SetTourOpen(true));
        assert!(state.tour_open());
        let state = UiReducer::reduce(state, UiIntent::SetTourOpen(false));
        assert!(!state.tour_open());
    }
}
