use crate::config::MarketplaceConfig;
use crate::error::FlowError;
use crate::model::{short_id, Inspection, InspectionRequest, Order, Product};
use crate::services::{BuyerService, ProductFilter};
use crate::store::buyer::BuyerIntent;
use crate::store::ui::LoaderKey;
use crate::store::{Coordinator, Operation};
use crate::validation::{self, ValidationError};

const LOAD_CATALOG: Operation = Operation::new(LoaderKey::Catalog, "Could not load products");
const LOAD_CART: Operation = Operation::new(LoaderKey::Cart, "Could not load cart");
const ADD_TO_CART: Operation = Operation::new(LoaderKey::Cart, "Could not add to cart");
const UPDATE_CART: Operation = Operation::new(LoaderKey::Cart, "Could not update cart");
const REMOVE_FROM_CART: Operation = Operation::new(LoaderKey::Cart, "Could not remove item");
const CHECKOUT: Operation = Operation::new(LoaderKey::Checkout, "Checkout failed");
const LOAD_ORDERS: Operation = Operation::new(LoaderKey::Orders, "Could not load orders");
const CANCEL_ORDER: Operation = Operation::new(LoaderKey::Orders, "Could not cancel order");
const LOAD_INSPECTIONS: Operation =
    Operation::new(LoaderKey::Inspection, "Could not load inspections");
const REQUEST_INSPECTION: Operation =
    Operation::new(LoaderKey::Inspection, "Could not book inspection");
const CANCEL_INSPECTION: Operation =
    Operation::new(LoaderKey::Inspection, "Could not cancel inspection");

/// Buyer thunks: catalog, cart, checkout, orders and inspection requests.
///
/// Structural changes to the cart, orders or inspections are never merged
/// locally. After a successful mutation the affected list is re-fetched.
#[derive(Clone)]
pub struct BuyerFlows {
    coordinator: Coordinator,
    service: BuyerService,
    limits: MarketplaceConfig,
}

impl BuyerFlows {
    pub fn new(coordinator: Coordinator, service: BuyerService, limits: MarketplaceConfig) -> Self {
        Self {
            coordinator,
            service,
            limits,
        }
    }

    pub async fn load_products(&self, filter: &ProductFilter) -> Result<(), FlowError> {
        let revision = self.coordinator.next_revision();
        let products = self
            .coordinator
            .run(LOAD_CATALOG, self.service.products(filter))
            .await?;
        self.coordinator
            .dispatch(BuyerIntent::ProductsLoaded { revision, products });
        Ok(())
    }

    pub async fn load_categories(&self) -> Result<(), FlowError> {
        let categories = self
            .coordinator
            .run(LOAD_CATALOG, self.service.categories())
            .await?;
        self.coordinator
            .dispatch(BuyerIntent::CategoriesLoaded(categories));
        Ok(())
    }

    pub async fn select_product(&self, product_id: &str) -> Result<Product, FlowError> {
        validation::required("Product", product_id)?;
        let product = self
            .coordinator
            .run(LOAD_CATALOG, self.service.product(product_id))
            .await?;
        self.coordinator
            .dispatch(BuyerIntent::ProductSelected(product.clone()));
        Ok(product)
    }

    pub async fn refresh_cart(&self) -> Result<(), FlowError> {
        let revision = self.coordinator.next_revision();
        self.coordinator.dispatch(BuyerIntent::CartFetchStarted);
        let _settled = scopeguard::guard(self.coordinator.clone(), |coordinator| {
            coordinator.dispatch(BuyerIntent::CartFetchSettled);
        });

        let cart = self.coordinator.run(LOAD_CART, self.service.cart()).await?;
        self.coordinator
            .dispatch(BuyerIntent::CartLoaded { revision, cart });
        Ok(())
    }

    pub async fn add_to_cart(&self, product_id: &str, quantity: u32) -> Result<(), FlowError> {
        validation::required("Product", product_id)?;
        validation::quantity(quantity, self.limits.max_cart_quantity)?;

        self.coordinator
            .run(ADD_TO_CART, self.service.add_to_cart(product_id, quantity))
            .await?;
        tracing::info!(product_id, quantity, "Added to cart");
        self.refetch_cart().await;
        Ok(())
    }

    pub async fn update_quantity(&self, item_id: &str, quantity: u32) -> Result<(), FlowError> {
        validation::required("Cart item", item_id)?;
        validation::quantity(quantity, self.limits.max_cart_quantity)?;

        self.coordinator
            .run(UPDATE_CART, self.service.update_cart_item(item_id, quantity))
            .await?;
        tracing::info!(item_id, quantity, "Cart quantity updated");
        self.refetch_cart().await;
        Ok(())
    }

    pub async fn remove_from_cart(&self, item_id: &str) -> Result<(), FlowError> {
        validation::required("Cart item", item_id)?;

        self.coordinator
            .run(REMOVE_FROM_CART, self.service.remove_cart_item(item_id))
            .await?;
        tracing::info!(item_id, "Removed from cart");
        self.refetch_cart().await;
        Ok(())
    }

    /// Places an order for everything in the loaded cart and returns the
    /// new order id.
    pub async fn checkout(&self, shipping_address: &str) -> Result<String, FlowError> {
        if self.coordinator.read(|state| state.buyer.cart.get().is_empty()) {
            return Err(ValidationError::EmptyCart.into());
        }
        validation::required("Shipping address", shipping_address)?;

        self.coordinator.dispatch(BuyerIntent::CheckoutStarted);
        let settled = scopeguard::guard(self.coordinator.clone(), |coordinator| {
            coordinator.dispatch(BuyerIntent::CheckoutSettled);
        });

        let receipt = self
            .coordinator
            .run(CHECKOUT, self.service.checkout(shipping_address))
            .await?;
        self.coordinator.dispatch(BuyerIntent::CartCleared);
        drop(settled);

        let order_id = receipt.order_id().unwrap_or_default().to_string();
        let message = if order_id.is_empty() {
            "Your order has been placed.".to_string()
        } else {
            format!("Order #{} has been placed.", short_id(&order_id))
        };
        tracing::info!(order_id = %order_id, "Checkout complete");
        self.coordinator.notify_success("Order placed", message);

        self.refetch_orders().await;
        self.refetch_cart().await;
        Ok(order_id)
    }

    pub async fn refresh_orders(&self) -> Result<(), FlowError> {
        let revision = self.coordinator.next_revision();
        let orders = self
            .coordinator
            .run(LOAD_ORDERS, self.service.orders())
            .await?;
        self.coordinator
            .dispatch(BuyerIntent::OrdersLoaded { revision, orders });
        Ok(())
    }

    pub async fn cancel_order(&self, order_id: &str) -> Result<Order, FlowError> {
        let status = self
            .coordinator
            .read(|state| state.buyer.order(order_id).map(|order| order.status))
            .ok_or_else(|| ValidationError::UnknownEntity {
                entity: "order",
                id: order_id.to_string(),
            })?;
        if status.is_terminal() {
            return Err(ValidationError::AlreadyTerminal {
                entity: "order",
                status: status.to_string(),
            }
            .into());
        }

        let order = self
            .coordinator
            .run(CANCEL_ORDER, self.service.cancel_order(order_id))
            .await?;
        tracing::info!(order_id, status = %order.status, "Order cancelled");
        self.coordinator
            .dispatch(BuyerIntent::OrderUpdated(order.clone()));
        self.coordinator.notify_success(
            "Order cancelled",
            format!("Order #{} has been cancelled.", short_id(&order.id)),
        );
        Ok(order)
    }

    pub async fn refresh_inspections(&self) -> Result<(), FlowError> {
        let revision = self.coordinator.next_revision();
        let inspections = self
            .coordinator
            .run(LOAD_INSPECTIONS, self.service.inspections())
            .await?;
        self.coordinator.dispatch(BuyerIntent::InspectionsLoaded {
            revision,
            inspections,
        });
        Ok(())
    }

    pub async fn request_inspection(
        &self,
        request: &InspectionRequest,
    ) -> Result<Inspection, FlowError> {
        validation::inspection_request(request, self.limits.min_offer_amount)?;

        let inspection = self
            .coordinator
            .run(REQUEST_INSPECTION, self.service.request_inspection(request))
            .await?;
        tracing::info!(inspection_id = %inspection.id, offer = request.offer_amount, "Inspection requested");
        self.coordinator.notify_success(
            "Inspection requested",
            format!(
                "Request #{} is waiting for a mechanic.",
                short_id(&inspection.id)
            ),
        );
        self.refetch_inspections().await;
        Ok(inspection)
    }

    pub async fn cancel_inspection(&self, inspection_id: &str) -> Result<Inspection, FlowError> {
        let status = self
            .coordinator
            .read(|state| {
                state
                    .buyer
                    .inspection(inspection_id)
                    .map(|inspection| inspection.status)
            })
            .ok_or_else(|| ValidationError::UnknownEntity {
                entity: "inspection",
                id: inspection_id.to_string(),
            })?;
        if status.is_terminal() {
            return Err(ValidationError::AlreadyTerminal {
                entity: "inspection",
                status: status.to_string(),
            }
            .into());
        }

        let inspection = self
            .coordinator
            .run(CANCEL_INSPECTION, self.service.cancel_inspection(inspection_id))
            .await?;
        tracing::info!(inspection_id, "Inspection cancelled");
        self.coordinator
            .dispatch(BuyerIntent::InspectionUpdated(inspection.clone()));
        self.coordinator.notify_success(
            "Inspection cancelled",
            format!("Request #{} has been cancelled.", short_id(&inspection.id)),
        );
        Ok(inspection)
    }

    // Follow-up fetches after a mutation. Their failures were already shown
    // in the status modal and do not undo the mutation.

    async fn refetch_cart(&self) {
        if let Err(err) = self.refresh_cart().await {
            tracing::debug!(error = %err, "Cart refetch failed");
        }
    }

    async fn refetch_orders(&self) {
        if let Err(err) = self.refresh_orders().await {
            tracing::debug!(error = %err, "Order refetch failed");
        }
    }

    async fn refetch_inspections(&self) {
        if let Err(err) = self.refresh_inspections().await {
            tracing::debug!(error = %err, "Inspection refetch failed");
        }
    }
}
