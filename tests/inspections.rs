mod common;

use common::{inspection_json, start_app};
use rebike::model::{InspectionRequest, InspectionStatus};
use rebike::store::ui::StatusKind;
use rebike::validation::ValidationError;
use rebike::FlowError;

fn request(offer: u64) -> InspectionRequest {
    InspectionRequest {
        product_id: Some("p-1".to_string()),
        user_bike_id: None,
        offer_amount: offer,
        scheduled_date: "2026-12-01".to_string(),
        notes: None,
    }
}

#[tokio::test]
async fn test_offer_below_minimum_makes_no_request() {
    let (backend, app, _dir) = start_app().await;

    let err = app.buyer.request_inspection(&request(400)).await.unwrap_err();

    assert!(matches!(
        err,
        FlowError::Validation(ValidationError::OfferTooLow {
            offered: 400,
            minimum: 500
        })
    ));
    assert!(backend.captured_requests().await.is_empty());
    let state = app.coordinator.snapshot();
    assert_eq!(state.ui.active_loader(), None);
    assert!(state.ui.status_modal().is_none());
}

#[tokio::test]
async fn test_request_inspection_posts_and_refetches() {
    let (backend, app, _dir) = start_app().await;
    backend
        .enqueue_json(&inspection_json("insp-000123", "PENDING", 600))
        .await;
    backend
        .enqueue_json(&format!(
            "[{}]",
            inspection_json("insp-000123", "PENDING", 600)
        ))
        .await;

    let created = app.buyer.request_inspection(&request(600)).await.unwrap();

    assert_eq!(created.status, InspectionStatus::Pending);
    assert_eq!(
        backend.request_lines().await,
        vec!["POST /api/inspections", "GET /api/inspections"]
    );
    let body = backend.captured_requests().await[0].json();
    assert_eq!(body["productId"], "p-1");
    assert_eq!(body["offerAmount"], 600);
    assert_eq!(body["scheduledDate"], "2026-12-01");
    assert!(body.get("userBikeId").is_none());

    let state = app.coordinator.snapshot();
    assert_eq!(state.buyer.inspections.get().len(), 1);
    let modal = state.ui.status_modal().unwrap();
    assert_eq!(modal.kind, StatusKind::Success);
    assert!(modal.message.contains("000123"));
}

#[tokio::test]
async fn test_cancel_completed_inspection_is_rejected_locally() {
    let (backend, app, _dir) = start_app().await;
    backend
        .enqueue_json(&format!(
            "[{}]",
            inspection_json("insp-1", "COMPLETED", 900)
        ))
        .await;
    app.buyer.refresh_inspections().await.unwrap();

    let err = app.buyer.cancel_inspection("insp-1").await.unwrap_err();

    assert!(matches!(
        err,
        FlowError::Validation(ValidationError::AlreadyTerminal { .. })
    ));
    assert_eq!(backend.request_lines().await, vec!["GET /api/inspections"]);
}

#[tokio::test]
async fn test_cancel_unknown_inspection_is_rejected_locally() {
    let (backend, app, _dir) = start_app().await;

    let err = app.buyer.cancel_inspection("missing").await.unwrap_err();

    assert!(matches!(
        err,
        FlowError::Validation(ValidationError::UnknownEntity { .. })
    ));
    assert!(backend.captured_requests().await.is_empty());
}
