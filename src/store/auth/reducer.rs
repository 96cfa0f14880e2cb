use crate::store::mvi::Reducer;

use super::intent::AuthIntent;
use super::state::{AuthSliceState, AuthStatus};

pub struct AuthReducer;

impl Reducer for AuthReducer {
    type State = AuthSliceState;
    type Intent = AuthIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            AuthIntent::SignedIn { user } => AuthSliceState {
                user: Some(user),
                status: AuthStatus::Authenticated,
            },
            AuthIntent::ProfileLoaded { user } => AuthSliceState {
                user: Some(user),
                ..state
            },
            AuthIntent::SignedOut { .. } => AuthSliceState::default(),
            AuthIntent::SessionExpired => AuthSliceState {
                user: None,
                status: AuthStatus::Expired,
            },
        }
    }
}
