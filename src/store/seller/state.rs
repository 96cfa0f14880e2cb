use crate::model::{Order, Product};
use crate::store::mvi::SliceState;
use crate::store::revision::Synced;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SellerSliceState {
    pub products: Synced<Vec<Product>>,
    pub orders: Synced<Vec<Order>>,
}

impl SliceState for SellerSliceState {}

impl SellerSliceState {
    pub fn cleared(floor: u64) -> Self {
        Self {
            products: Synced::cleared(floor),
            orders: Synced::cleared(floor),
        }
    }

    pub fn order(&self, order_id: &str) -> Option<&Order> {
        self.orders.get().iter().find(|order| order.id == order_id)
    }
}
