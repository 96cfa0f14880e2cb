use crate::api::{ApiError, ImageFile};
use crate::error::FlowError;
use crate::model::{short_id, Order, OrderStatus, Product, ProductDraft};
use crate::services::SellerService;
use crate::store::seller::SellerIntent;
use crate::store::ui::LoaderKey;
use crate::store::{Coordinator, Operation};
use crate::validation::{self, ValidationError};

const LOAD_LISTINGS: Operation = Operation::new(LoaderKey::Listing, "Could not load listings");
const UPLOAD_IMAGES: Operation = Operation::new(LoaderKey::Upload, "Image upload failed");
const SAVE_LISTING: Operation = Operation::new(LoaderKey::Listing, "Could not save listing");
const DELETE_LISTING: Operation = Operation::new(LoaderKey::Listing, "Could not delete listing");
const LOAD_ORDERS: Operation = Operation::new(LoaderKey::Orders, "Could not load orders");
const UPDATE_ORDER: Operation = Operation::new(LoaderKey::Orders, "Could not update order");

#[derive(Clone)]
pub struct SellerFlows {
    coordinator: Coordinator,
    service: SellerService,
}

impl SellerFlows {
    pub fn new(coordinator: Coordinator, service: SellerService) -> Self {
        Self {
            coordinator,
            service,
        }
    }

    pub async fn refresh_products(&self) -> Result<(), FlowError> {
        let revision = self.coordinator.next_revision();
        let products = self
            .coordinator
            .run(LOAD_LISTINGS, self.service.products())
            .await?;
        self.coordinator
            .dispatch(SellerIntent::ProductsLoaded { revision, products });
        Ok(())
    }

    /// Upload-then-save: images go to the media host first and the listing
    /// is only created once every upload succeeded.
    pub async fn create_listing(
        &self,
        mut draft: ProductDraft,
        images: Vec<ImageFile>,
    ) -> Result<Product, FlowError> {
        validation::listing(&draft)?;

        let urls = self.upload_images(images).await?;
        draft.images.extend(urls);

        let product = self
            .coordinator
            .run(SAVE_LISTING, self.service.create_product(&draft))
            .await?;
        tracing::info!(product_id = %product.id, images = draft.images.len(), "Listing created");
        self.coordinator.notify_success(
            "Listing published",
            format!("\"{}\" is now live.", product.title),
        );
        self.refetch_products().await;
        Ok(product)
    }

    pub async fn update_listing(
        &self,
        product_id: &str,
        mut draft: ProductDraft,
        new_images: Vec<ImageFile>,
    ) -> Result<Product, FlowError> {
        validation::required("Product", product_id)?;
        validation::listing(&draft)?;

        let urls = self.upload_images(new_images).await?;
        draft.images.extend(urls);

        let product = self
            .coordinator
            .run(SAVE_LISTING, self.service.update_product(product_id, &draft))
            .await?;
        tracing::info!(product_id, "Listing updated");
        self.coordinator
            .notify_success("Listing updated", format!("\"{}\" was saved.", product.title));
        self.refetch_products().await;
        Ok(product)
    }

    pub async fn delete_listing(&self, product_id: &str) -> Result<(), FlowError> {
        validation::required("Product", product_id)?;

        self.coordinator
            .run(DELETE_LISTING, self.service.delete_product(product_id))
            .await?;
        tracing::info!(product_id, "Listing deleted");
        self.refetch_products().await;
        Ok(())
    }

    pub async fn refresh_orders(&self) -> Result<(), FlowError> {
        let revision = self.coordinator.next_revision();
        let orders = self
            .coordinator
            .run(LOAD_ORDERS, self.service.orders())
            .await?;
        self.coordinator
            .dispatch(SellerIntent::OrdersLoaded { revision, orders });
        Ok(())
    }

    /// Moves an incoming order one fulfilment step forward.
    pub async fn advance_order(&self, order_id: &str, to: OrderStatus) -> Result<Order, FlowError> {
        let from = self
            .coordinator
            .read(|state| state.seller.order(order_id).map(|order| order.status))
            .ok_or_else(|| ValidationError::UnknownEntity {
                entity: "order",
                id: order_id.to_string(),
            })?;
        validation::order_transition(from, to)?;

        let order = self
            .coordinator
            .run(UPDATE_ORDER, self.service.update_order_status(order_id, to))
            .await?;
        tracing::info!(order_id, %from, to = %order.status, "Order status updated");
        self.coordinator
            .dispatch(SellerIntent::OrderUpdated(order.clone()));
        self.coordinator.notify_success(
            "Order updated",
            format!("Order #{} is now {}.", short_id(&order.id), order.status),
        );
        Ok(order)
    }

    /// Signs once, then uploads each image in order. Stops at the first
    /// failure; nothing is saved in that case.
    async fn upload_images(&self, images: Vec<ImageFile>) -> Result<Vec<String>, FlowError> {
        if images.is_empty() {
            return Ok(Vec::new());
        }

        let service = &self.service;
        self.coordinator
            .run(UPLOAD_IMAGES, async move {
                let descriptor = service.sign_upload().await?;
                let mut urls = Vec::with_capacity(images.len());
                for image in images {
                    urls.push(service.upload_image(&descriptor, image).await?);
                }
                Ok::<_, ApiError>(urls)
            })
            .await
    }

    async fn refetch_products(&self) {
        if let Err(err) = self.refresh_products().await {
            tracing::debug!(error = %err, "Listing refetch failed");
        }
    }
}
