use crate::model::{Order, Product};
use crate::store::mvi::Intent;

#[derive(Debug, Clone)]
pub enum SellerIntent {
    ProductsLoaded { revision: u64, products: Vec<Product> },

    OrdersLoaded { revision: u64, orders: Vec<Order> },

    OrderUpdated(Order),
}

impl Intent for SellerIntent {}
