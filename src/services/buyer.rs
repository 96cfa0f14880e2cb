use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

use crate::api::{ApiClient, ApiError};
use crate::model::{
    Cart, Category, Inspection, InspectionRequest, Order, Product, ProductKind,
};

/// Catalog query parameters. Unset fields are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub kind: Option<ProductKind>,
    pub search: Option<String>,
}

impl ProductFilter {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(category) = &self.category {
            query.push(("category", category.clone()));
        }
        if let Some(kind) = self.kind {
            let kind = match kind {
                ProductKind::Bike => "BIKE",
                ProductKind::Part => "PART",
            };
            query.push(("kind", kind.to_string()));
        }
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        query
    }
}

#[derive(Debug, Clone, Deserialize)]
struct OrderRef {
    #[serde(alias = "_id")]
    id: String,
}

/// Checkout response. Depending on the endpoint version the id is either
/// nested under `order` or returned at the top level.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutReceipt {
    #[serde(default)]
    order: Option<OrderRef>,
    #[serde(default, alias = "_id")]
    id: Option<String>,
}

impl CheckoutReceipt {
    pub fn order_id(&self) -> Option<&str> {
        self.order
            .as_ref()
            .map(|order| order.id.as_str())
            .or(self.id.as_deref())
    }
}

#[derive(Clone)]
pub struct BuyerService {
    api: ApiClient,
}

impl BuyerService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn products(&self, filter: &ProductFilter) -> Result<Vec<Product>, ApiError> {
        self.api.get_with_query("/products", &filter.to_query()).await
    }

    pub async fn product(&self, product_id: &str) -> Result<Product, ApiError> {
        self.api.get(&format!("/products/{}", product_id)).await
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.api.get("/categories").await
    }

    pub async fn cart(&self) -> Result<Cart, ApiError> {
        self.api.get("/cart").await
    }

    pub async fn add_to_cart(&self, product_id: &str, quantity: u32) -> Result<(), ApiError> {
        let body = json!({ "productId": product_id, "quantity": quantity });
        self.api.execute(Method::POST, "/cart", Some(&body)).await
    }

    pub async fn update_cart_item(&self, item_id: &str, quantity: u32) -> Result<(), ApiError> {
        let body = json!({ "quantity": quantity });
        self.api
            .execute(Method::PATCH, &format!("/cart/{}", item_id), Some(&body))
            .await
    }

    pub async fn remove_cart_item(&self, item_id: &str) -> Result<(), ApiError> {
        self.api.delete(&format!("/cart/{}", item_id)).await
    }

    pub async fn checkout(&self, shipping_address: &str) -> Result<CheckoutReceipt, ApiError> {
        let body = json!({ "shippingAddress": shipping_address });
        self.api.post("/orders/checkout", &body).await
    }

    pub async fn orders(&self) -> Result<Vec<Order>, ApiError> {
        self.api.get("/orders").await
    }

    pub async fn cancel_order(&self, order_id: &str) -> Result<Order, ApiError> {
        self.api
            .patch(&format!("/orders/{}/cancel", order_id), &json!({}))
            .await
    }

    pub async fn request_inspection(
        &self,
        request: &InspectionRequest,
    ) -> Result<Inspection, ApiError> {
        self.api.post("/inspections", request).await
    }

    pub async fn inspections(&self) -> Result<Vec<Inspection>, ApiError> {
        self.api.get("/inspections").await
    }

    pub async fn cancel_inspection(&self, inspection_id: &str) -> Result<Inspection, ApiError> {
        self.api
            .patch(&format!("/inspections/{}/cancel", inspection_id), &json!({}))
            .await
    }
}
