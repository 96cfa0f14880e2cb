mod common;

use common::{cart_item_json, cart_json, start_app, test_config};
use common::mock_backend::{MockBackend, MockResponse};
use rebike::api::{ErrorKind, NETWORK_MESSAGE};
use rebike::App;
use tempfile::TempDir;
use rebike::store::buyer::CartPhase;
use rebike::store::ui::StatusKind;

#[tokio::test]
async fn test_add_to_cart_refetches_server_cart() {
    let (backend, app, _dir) = start_app().await;
    backend.enqueue_json(r#"{"ok":true}"#).await;
    backend
        .enqueue_json(&cart_json(&[cart_item_json("i-1", "p-1", 1, 25000)]))
        .await;

    app.buyer.add_to_cart("p-1", 1).await.unwrap();

    assert_eq!(
        backend.request_lines().await,
        vec!["POST /api/cart", "GET /api/cart"]
    );
    let requests = backend.captured_requests().await;
    assert_eq!(requests[0].json()["productId"], "p-1");
    assert_eq!(requests[0].json()["quantity"], 1);

    let state = app.coordinator.snapshot();
    assert_eq!(state.buyer.cart.get().items.len(), 1);
    assert_eq!(state.buyer.cart.get().total(), 25000);
    assert_eq!(state.buyer.cart_phase(), CartPhase::Populated);
    assert_eq!(state.ui.active_loader(), None);
    assert!(state.ui.status_modal().is_none());
}

#[tokio::test]
async fn test_quantity_over_stock_leaves_cart_unchanged() {
    let (backend, app, _dir) = start_app().await;
    backend
        .enqueue_json(&cart_json(&[cart_item_json("i-1", "p-1", 1, 25000)]))
        .await;
    app.buyer.refresh_cart().await.unwrap();
    let before = app.coordinator.read(|s| s.buyer.cart.get().clone());

    backend
        .enqueue_response(MockResponse::error(400, "Only 3 left in stock"))
        .await;
    let err = app.buyer.update_quantity("i-1", 4).await.unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::LimitExceeded));
    // No refetch after a failed mutation.
    assert_eq!(
        backend.request_lines().await,
        vec!["GET /api/cart", "PATCH /api/cart/i-1"]
    );

    let state = app.coordinator.snapshot();
    assert_eq!(state.buyer.cart.get(), &before);
    assert_eq!(state.buyer.cart.get().item("i-1").map(|i| i.quantity), Some(1));
    assert_eq!(state.ui.active_loader(), None);

    let modal = state.ui.status_modal().unwrap();
    assert_eq!(modal.kind, StatusKind::Error);
    assert_eq!(modal.title, "Could not update cart");
    assert_eq!(modal.message, "Only 3 left in stock");
}

#[tokio::test]
async fn test_invalid_quantity_makes_no_request() {
    let (backend, app, _dir) = start_app().await;

    let err = app.buyer.update_quantity("i-1", 0).await.unwrap_err();

    assert!(err.is_validation());
    assert!(backend.captured_requests().await.is_empty());
    let state = app.coordinator.snapshot();
    assert_eq!(state.ui.active_loader(), None);
    assert!(state.ui.status_modal().is_none());
}

#[tokio::test]
async fn test_remove_item_refetches_empty_cart() {
    let (backend, app, _dir) = start_app().await;
    backend
        .enqueue_json(&cart_json(&[cart_item_json("i-1", "p-1", 2, 1500)]))
        .await;
    app.buyer.refresh_cart().await.unwrap();

    backend.enqueue_json(r#"{"ok":true}"#).await;
    backend.enqueue_json(r#"{"items":[]}"#).await;
    app.buyer.remove_from_cart("i-1").await.unwrap();

    assert_eq!(
        backend.request_lines().await,
        vec!["GET /api/cart", "DELETE /api/cart/i-1", "GET /api/cart"]
    );
    let phase = app.coordinator.read(|s| s.buyer.cart_phase());
    assert_eq!(phase, CartPhase::Empty);
}

#[tokio::test]
async fn test_cart_is_loading_while_fetch_in_flight() {
    let (backend, app, _dir) = start_app().await;
    backend
        .enqueue_response(MockResponse::json(r#"{"items":[]}"#).with_delay(200))
        .await;

    let buyer = app.buyer.clone();
    let fetch = tokio::spawn(async move { buyer.refresh_cart().await });

    let mut changes = app.coordinator.subscribe();
    changes
        .wait_for(|s| s.buyer.cart_phase() == CartPhase::Loading)
        .await
        .unwrap();

    fetch.await.unwrap().unwrap();
    assert_eq!(
        app.coordinator.read(|s| s.buyer.cart_phase()),
        CartPhase::Empty
    );
}

#[tokio::test]
async fn test_stale_cart_response_is_ignored() {
    let (backend, app, _dir) = start_app().await;
    backend
        .enqueue_response(
            MockResponse::json(&cart_json(&[cart_item_json("i-1", "p-1", 1, 1000)]))
                .with_delay(300),
        )
        .await;
    backend
        .enqueue_json(&cart_json(&[cart_item_json("i-1", "p-1", 2, 1000)]))
        .await;

    let buyer = app.buyer.clone();
    let slow = tokio::spawn(async move { buyer.refresh_cart().await });
    while backend.captured_requests().await.is_empty() {
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    app.buyer.refresh_cart().await.unwrap();
    slow.await.unwrap().unwrap();

    let quantity = app
        .coordinator
        .read(|s| s.buyer.cart.get().items[0].quantity);
    assert_eq!(quantity, 2);
    assert_eq!(
        app.coordinator.read(|s| s.buyer.cart_phase()),
        CartPhase::Populated
    );
}

#[tokio::test]
async fn test_timed_out_fetch_is_a_network_error() {
    let backend = MockBackend::start().await;
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&backend, &dir);
    config.api.timeout_seconds = 1;
    let app = App::new(&config).unwrap();

    backend
        .enqueue_json(&cart_json(&[cart_item_json("i-1", "p-1", 1, 25000)]))
        .await;
    app.buyer.refresh_cart().await.unwrap();
    let before = app.coordinator.read(|s| s.buyer.cart.get().clone());

    backend
        .enqueue_response(MockResponse::json(&cart_json(&[])).with_delay(1500))
        .await;
    let err = app.buyer.refresh_cart().await.unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::Network));
    let state = app.coordinator.snapshot();
    assert_eq!(state.buyer.cart.get(), &before);
    assert_eq!(state.ui.active_loader(), None);
    let modal = state.ui.status_modal().unwrap();
    assert_eq!(modal.kind, StatusKind::Error);
    assert_eq!(modal.title, "Network error");
    assert_eq!(modal.message, NETWORK_MESSAGE);
}

#[tokio::test]
async fn test_unreachable_backend_is_a_network_error() {
    let backend = MockBackend::start().await;
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&backend, &dir);
    // Nothing listens on the discard port.
    config.api.base_url = "http://127.0.0.1:9/api".to_string();
    let app = App::new(&config).unwrap();

    let err = app.buyer.refresh_cart().await.unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::Network));
    let modal = app.coordinator.read(|s| s.ui.status_modal().cloned()).unwrap();
    assert_eq!(modal.message, NETWORK_MESSAGE);
    assert!(backend.captured_requests().await.is_empty());
}
