//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use mock_backend::MockBackend;
use rebike::config::Config;
use rebike::App;
use std::path::PathBuf;
use tempfile::TempDir;

/// Config pointing at `backend`, with the session file inside `dir`.
pub fn test_config(backend: &MockBackend, dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.api.base_url = backend.api_url();
    config.api.timeout_seconds = 5;
    config.api.connect_timeout_seconds = 2;
    config.session.path = Some(session_path(dir));
    config
}

pub fn session_path(dir: &TempDir) -> PathBuf {
    dir.path().join("session.toml")
}

/// A started mock backend plus an `App` wired to it.
pub async fn start_app() -> (MockBackend, App, TempDir) {
    let backend = MockBackend::start().await;
    let dir = TempDir::new().expect("Failed to create temp dir");
    let app = App::new(&test_config(&backend, &dir)).expect("Failed to build app");
    (backend, app, dir)
}

// -- JSON fixtures ------------------------------------------------------------

pub fn product_json(id: &str, title: &str, price: u64, stock: u32) -> String {
    format!(
        r#"{{"_id":"{}","title":"{}","price":{},"stock":{},"kind":"BIKE"}}"#,
        id, title, price, stock
    )
}

pub fn cart_item_json(item_id: &str, product_id: &str, quantity: u32, price: u64) -> String {
    format!(
        r#"{{"_id":"{}","productId":"{}","quantity":{},"product":{}}}"#,
        item_id,
        product_id,
        quantity,
        product_json(product_id, "Test bike", price, 5)
    )
}

pub fn cart_json(items: &[String]) -> String {
    format!(r#"{{"items":[{}]}}"#, items.join(","))
}

pub fn order_json(id: &str, status: &str, total: u64) -> String {
    format!(
        r#"{{"_id":"{}","items":[],"status":"{}","totalAmount":{}}}"#,
        id, status, total
    )
}

pub fn inspection_json(id: &str, status: &str, offer: u64) -> String {
    format!(
        r#"{{"_id":"{}","productId":"p-1","offerAmount":{},"status":"{}","scheduledDate":"2026-12-01"}}"#,
        id, offer, status
    )
}

pub fn user_json(id: &str, role: &str) -> String {
    format!(
        r#"{{"_id":"{}","name":"Asha","email":"asha@example.com","role":"{}"}}"#,
        id, role
    )
}
