use serde_json::json;

use crate::api::{ApiClient, ApiError, ImageFile, UploadDescriptor};
use crate::model::{Order, OrderStatus, Product, ProductDraft};

/// Media host folder for listing photos.
pub const LISTING_FOLDER: &str = "listings";

#[derive(Clone)]
pub struct SellerService {
    api: ApiClient,
}

impl SellerService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        self.api.get("/seller/products").await
    }

    pub async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ApiError> {
        self.api.post("/seller/products", draft).await
    }

    pub async fn update_product(
        &self,
        product_id: &str,
        draft: &ProductDraft,
    ) -> Result<Product, ApiError> {
        self.api
            .put(&format!("/seller/products/{}", product_id), draft)
            .await
    }

    pub async fn delete_product(&self, product_id: &str) -> Result<(), ApiError> {
        self.api
            .delete(&format!("/seller/products/{}", product_id))
            .await
    }

    pub async fn orders(&self) -> Result<Vec<Order>, ApiError> {
        self.api.get("/seller/orders").await
    }

    pub async fn update_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        self.api
            .patch(
                &format!("/seller/orders/{}/status", order_id),
                &json!({ "status": status }),
            )
            .await
    }

    /// Step one of an image upload: ask the backend to sign it.
    pub async fn sign_upload(&self) -> Result<UploadDescriptor, ApiError> {
        self.api
            .post("/uploads/signature", &json!({ "folder": LISTING_FOLDER }))
            .await
    }

    /// Step two: send the file to the media host.
    pub async fn upload_image(
        &self,
        descriptor: &UploadDescriptor,
        image: ImageFile,
    ) -> Result<String, ApiError> {
        self.api.upload_image(descriptor, image).await
    }
}
