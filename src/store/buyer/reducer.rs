use crate::store::mvi::Reducer;

use super::intent::BuyerIntent;
use super::state::BuyerSliceState;

pub struct BuyerReducer;

impl Reducer for BuyerReducer {
    type State = BuyerSliceState;
    type Intent = BuyerIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            BuyerIntent::ProductsLoaded { revision, products } => {
                state.products.apply(revision, products);
            }
            BuyerIntent::CategoriesLoaded(categories) => {
                state.categories = categories;
            }
            BuyerIntent::ProductSelected(product) => {
                state.selected_product = Some(product);
            }
            BuyerIntent::CartFetchStarted => {
                state.cart_fetches += 1;
            }
            BuyerIntent::CartFetchSettled => {
                state.cart_fetches = state.cart_fetches.saturating_sub(1);
            }
            BuyerIntent::CartLoaded { revision, cart } => {
                state.cart.apply(revision, cart);
            }
            BuyerIntent::CheckoutStarted => {
                state.checking_out = true;
            }
            BuyerIntent::CheckoutSettled => {
                state.checking_out = false;
            }
            BuyerIntent::CartCleared => {
                state.cart.modify(|cart| cart.items.clear());
            }
            BuyerIntent::OrdersLoaded { revision, orders } => {
                state.orders.apply(revision, orders);
            }
            BuyerIntent::OrderUpdated(updated) => {
                state.orders.modify(|orders| {
                    if let Some(order) = orders.iter_mut().find(|o| o.id == updated.id) {
                        order.status = updated.status;
                    }
                });
            }
            BuyerIntent::InspectionsLoaded {
                revision,
                inspections,
            } => {
                state.inspections.apply(revision, inspections);
            }
            BuyerIntent::InspectionUpdated(updated) => {
                state.inspections.modify(|inspections| {
                    if let Some(inspection) = inspections.iter_mut().find(|i| i.id == updated.id) {
                        inspection.status = updated.status;
                    }
                });
            }
        }
        state
    }
}
