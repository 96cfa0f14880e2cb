use crate::store::mvi::Reducer;

use super::intent::SellerIntent;
use super::state::SellerSliceState;

pub struct SellerReducer;

impl Reducer for SellerReducer {
    type State = SellerSliceState;
    type Intent = SellerIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SellerIntent::ProductsLoaded { revision, products } => {
                state.products.apply(revision, products);
            }
            SellerIntent::OrdersLoaded { revision, orders } => {
                state.orders.apply(revision, orders);
            }
            SellerIntent::OrderUpdated(updated) => {
                state.orders.modify(|orders| {
                    if let Some(order) = orders.iter_mut().find(|o| o.id == updated.id) {
                        order.status = updated.status;
                    }
                });
            }
        }
        state
    }
}
