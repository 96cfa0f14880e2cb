//! Centralized client state.
//!
//! Each slice is an MVI triple (state, intent, reducer). `AppReducer`
//! routes an `AppIntent` to the slice it targets; the `Coordinator` owns the
//! resulting `AppState` and is the only writer.

pub mod auth;
pub mod buyer;
mod coordinator;
pub mod mechanic;
pub mod mvi;
mod revision;
pub mod seller;
pub mod ui;

pub use coordinator::{Coordinator, Operation};
pub use revision::Synced;

use auth::{AuthIntent, AuthReducer, AuthSliceState};
use buyer::{BuyerIntent, BuyerReducer, BuyerSliceState};
use mechanic::{MechanicIntent, MechanicReducer, MechanicSliceState};
use mvi::{Intent, Reducer, SliceState};
use seller::{SellerIntent, SellerReducer, SellerSliceState};
use ui::{UiIntent, UiReducer, UiSliceState};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub auth: AuthSliceState,
    pub buyer: BuyerSliceState,
    pub seller: SellerSliceState,
    pub mechanic: MechanicSliceState,
    pub ui: UiSliceState,
}

impl SliceState for AppState {}

#[derive(Debug, Clone)]
pub enum AppIntent {
    Auth(AuthIntent),
    Buyer(BuyerIntent),
    Seller(SellerIntent),
    Mechanic(MechanicIntent),
    Ui(UiIntent),
}

impl Intent for AppIntent {}

pub struct AppReducer;

impl Reducer for AppReducer {
    type State = AppState;
    type Intent = AppIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            AppIntent::Auth(intent) => {
                // Signing out drops everything that belonged to the old user,
                // including fetches still in flight.
                if let AuthIntent::SignedOut { revision } = intent {
                    state.buyer = BuyerSliceState::cleared(revision);
                    state.seller = SellerSliceState::cleared(revision);
                    state.mechanic = MechanicSliceState::cleared(revision);
                }
                state.auth = AuthReducer::reduce(state.auth, intent);
            }
            AppIntent::Buyer(intent) => state.buyer = BuyerReducer::reduce(state.buyer, intent),
            AppIntent::Seller(intent) => {
                state.seller = SellerReducer::reduce(state.seller, intent)
            }
            AppIntent::Mechanic(intent) => {
                state.mechanic = MechanicReducer::reduce(state.mechanic, intent)
            }
            AppIntent::Ui(intent) => state.ui = UiReducer::reduce(state.ui, intent),
        }
        state
    }
}

impl From<AuthIntent> for AppIntent {
    fn from(intent: AuthIntent) -> Self {
        AppIntent::Auth(intent)
    }
}

impl From<BuyerIntent> for AppIntent {
    fn from(intent: BuyerIntent) -> Self {
        AppIntent::Buyer(intent)
    }
}

impl From<SellerIntent> for AppIntent {
    fn from(intent: SellerIntent) -> Self {
        AppIntent::Seller(intent)
    }
}

impl From<MechanicIntent> for AppIntent {
    fn from(intent: MechanicIntent) -> Self {
        AppIntent::Mechanic(intent)
    }
}

impl From<UiIntent> for AppIntent {
    fn from(intent: UiIntent) -> Self {
        AppIntent::Ui(intent)
    }
}
