use crate::model::{Cart, Category, Inspection, Order, Product};
use crate::store::mvi::SliceState;
use crate::store::revision::Synced;

/// What the cart view should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartPhase {
    Empty,
    Loading,
    Populated,
    CheckingOut,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BuyerSliceState {
    pub products: Synced<Vec<Product>>,
    pub categories: Vec<Category>,
    pub selected_product: Option<Product>,
    pub cart: Synced<Cart>,
    pub orders: Synced<Vec<Order>>,
    pub inspections: Synced<Vec<Inspection>>,
    pub(crate) cart_fetches: u32,
    pub(crate) checking_out: bool,
}

impl SliceState for BuyerSliceState {}

impl BuyerSliceState {
    /// Empty slice whose collections reject tickets up to `floor`.
    pub fn cleared(floor: u64) -> Self {
        Self {
            products: Synced::cleared(floor),
            cart: Synced::cleared(floor),
            orders: Synced::cleared(floor),
            inspections: Synced::cleared(floor),
            ..Self::default()
        }
    }

    pub fn cart_phase(&self) -> CartPhase {
        if self.checking_out {
            CartPhase::CheckingOut
        } else if self.cart_fetches > 0 {
            CartPhase::Loading
        } else if self.cart.get().is_empty() {
            CartPhase::Empty
        } else {
            CartPhase::Populated
        }
    }

    pub fn order(&self, order_id: &str) -> Option<&Order> {
        self.orders.get().iter().find(|order| order.id == order_id)
    }

    pub fn inspection(&self, inspection_id: &str) -> Option<&Inspection> {
        self.inspections
            .get()
            .iter()
            .find(|inspection| inspection.id == inspection_id)
    }
}
