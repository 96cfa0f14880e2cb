use crate::model::{Cart, Category, Inspection, Order, Product};
use crate::store::mvi::Intent;

#[derive(Debug, Clone)]
pub enum BuyerIntent {
    ProductsLoaded { revision: u64, products: Vec<Product> },

    CategoriesLoaded(Vec<Category>),

    ProductSelected(Product),

    CartFetchStarted,

    /// Paired with every `CartFetchStarted`, success or not.
    CartFetchSettled,

    CartLoaded { revision: u64, cart: Cart },

    CheckoutStarted,

    CheckoutSettled,

    /// Checkout went through; the server has emptied the cart.
    CartCleared,

    OrdersLoaded { revision: u64, orders: Vec<Order> },

    /// Server response to a single-order mutation.
    OrderUpdated(Order),

    InspectionsLoaded { revision: u64, inspections: Vec<Inspection> },

    /// Server response to a single-inspection mutation.
    InspectionUpdated(Inspection),
}

impl Intent for BuyerIntent {}
